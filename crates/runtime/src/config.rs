use std::time::Duration;

/// Runtime configuration shared by every encounter the runtime drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Fixed session seed. When unset a fresh seed is drawn per encounter.
    pub seed: Option<u64>,
    /// Round cap against endless stalemates.
    pub max_rounds: u32,
    /// How long ally input may take before the ally defends.
    pub input_timeout: Option<Duration>,
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_ROUNDS: u32 = 100;
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            input_timeout: None,
            event_buffer_size: 256,
        }
    }
}
