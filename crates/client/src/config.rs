//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use battle_runtime::RuntimeConfig;

/// How the final report is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for one client run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub encounter: String,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub output: OutputFormat,
    pub max_rounds: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            encounter: "goblin_ambush".to_owned(),
            seed: None,
            log_dir: None,
            output: OutputFormat::Text,
            max_rounds: RuntimeConfig::DEFAULT_MAX_ROUNDS,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - content directory (default: `data`)
    /// - `BATTLE_ENCOUNTER` - encounter file stem (default: `goblin_ambush`)
    /// - `BATTLE_SEED` - fixed session seed (default: random)
    /// - `BATTLE_LOG_DIR` - also write daily log files here
    /// - `BATTLE_OUTPUT` - `text` or `json` (default: `text`)
    /// - `BATTLE_MAX_ROUNDS` - round cap (default: 100)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable source.
    /// Unparseable values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("BATTLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup("BATTLE_ENCOUNTER") {
            config.encounter = name;
        }
        config.seed = parse(&lookup, "BATTLE_SEED");
        config.log_dir = lookup("BATTLE_LOG_DIR").map(PathBuf::from);
        if let Some(output) = parse(&lookup, "BATTLE_OUTPUT") {
            config.output = output;
        }
        if let Some(rounds) = parse::<u32>(&lookup, "BATTLE_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            seed: self.seed,
            max_rounds: self.max_rounds,
            ..Default::default()
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
