//! Resource pools (HP, MP).
//!
//! Maximums come from base stats and never change in combat. Current values
//! are the only mutable part and are always clamped to `[0, max]`.

/// Resource types an ability can cost.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    Hp,
    Mp,
}

/// A clamped resource meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    max: u32,
}

impl ResourceMeter {
    /// Create a meter, clamping `current` into range.
    pub const fn new(current: u32, max: u32) -> Self {
        let current = if current > max { max } else { current };
        Self { current, max }
    }

    /// Create a full meter.
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Subtract `amount`, clamping at 0. Returns the amount actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Add `amount`, clamping at max. Returns the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.max - self.current);
        self.current += added;
        added
    }
}
