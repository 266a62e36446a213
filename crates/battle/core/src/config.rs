/// Combat balance constants and tunable parameters.
///
/// Every value that shapes the combat math is carried here and handed to the
/// session at construction time. Nothing in the engine reads global state.
/// Percentages are whole numbers (`150` means ×1.5).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Base hit chance before the speed differential is applied.
    pub base_accuracy: i32,
    /// Hit chance gained per point of speed the actor has over the target.
    pub accuracy_per_speed: i32,
    /// Lowest hit chance after clamping.
    pub min_hit_chance: u32,
    /// Highest hit chance after clamping.
    pub max_hit_chance: u32,

    /// Base critical chance before the speed differential is applied.
    pub crit_base_chance: i32,
    /// Critical chance gained per point of speed over the target.
    pub crit_per_speed: i32,
    /// Highest critical chance after clamping.
    pub crit_max_chance: u32,
    /// Damage multiplier on a critical hit.
    pub crit_multiplier: u32,

    /// Lower bound of the uniform damage variance.
    pub variance_min: u32,
    /// Upper bound of the uniform damage variance (inclusive).
    pub variance_max: u32,

    /// Incoming damage percentage while defending.
    pub defend_damage_pct: u32,

    /// Flee chance when both sides have equal average speed.
    pub flee_base_chance: u32,
    pub flee_min_chance: u32,
    pub flee_max_chance: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ALLIES: usize = 4;
    pub const MAX_ENEMIES: usize = 4;
    pub const MAX_COMBATANTS: usize = Self::MAX_ALLIES + Self::MAX_ENEMIES;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_ABILITIES: usize = 12;
    pub const MAX_MODIFIERS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_ACCURACY: i32 = 90;
    pub const DEFAULT_ACCURACY_PER_SPEED: i32 = 1;
    pub const DEFAULT_MIN_HIT_CHANCE: u32 = 50;
    pub const DEFAULT_MAX_HIT_CHANCE: u32 = 100;
    pub const DEFAULT_CRIT_BASE_CHANCE: i32 = 5;
    pub const DEFAULT_CRIT_PER_SPEED: i32 = 1;
    pub const DEFAULT_CRIT_MAX_CHANCE: u32 = 50;
    pub const DEFAULT_CRIT_MULTIPLIER: u32 = 150;
    pub const DEFAULT_VARIANCE_MIN: u32 = 90;
    pub const DEFAULT_VARIANCE_MAX: u32 = 110;
    pub const DEFAULT_DEFEND_DAMAGE_PCT: u32 = 50;
    pub const DEFAULT_FLEE_BASE_CHANCE: u32 = 50;
    pub const DEFAULT_FLEE_MIN_CHANCE: u32 = 10;
    pub const DEFAULT_FLEE_MAX_CHANCE: u32 = 95;

    pub fn new() -> Self {
        Self {
            base_accuracy: Self::DEFAULT_BASE_ACCURACY,
            accuracy_per_speed: Self::DEFAULT_ACCURACY_PER_SPEED,
            min_hit_chance: Self::DEFAULT_MIN_HIT_CHANCE,
            max_hit_chance: Self::DEFAULT_MAX_HIT_CHANCE,
            crit_base_chance: Self::DEFAULT_CRIT_BASE_CHANCE,
            crit_per_speed: Self::DEFAULT_CRIT_PER_SPEED,
            crit_max_chance: Self::DEFAULT_CRIT_MAX_CHANCE,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            variance_min: Self::DEFAULT_VARIANCE_MIN,
            variance_max: Self::DEFAULT_VARIANCE_MAX,
            defend_damage_pct: Self::DEFAULT_DEFEND_DAMAGE_PCT,
            flee_base_chance: Self::DEFAULT_FLEE_BASE_CHANCE,
            flee_min_chance: Self::DEFAULT_FLEE_MIN_CHANCE,
            flee_max_chance: Self::DEFAULT_FLEE_MAX_CHANCE,
        }
    }

    /// Configuration with every random component pinned: attacks always hit,
    /// never crit, and deal exactly the formula damage.
    pub fn fixed() -> Self {
        Self {
            base_accuracy: 100,
            accuracy_per_speed: 0,
            min_hit_chance: 100,
            max_hit_chance: 100,
            crit_base_chance: 0,
            crit_per_speed: 0,
            crit_max_chance: 0,
            variance_min: 100,
            variance_max: 100,
            ..Self::new()
        }
    }

    /// Returns true when the variance range is empty (min > max).
    pub fn has_valid_variance(&self) -> bool {
        self.variance_min <= self.variance_max
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_config_pins_randomness() {
        let config = BattleConfig::fixed();
        assert_eq!(config.min_hit_chance, 100);
        assert_eq!(config.crit_max_chance, 0);
        assert_eq!(config.variance_min, config.variance_max);
        assert_eq!(config.crit_multiplier, BattleConfig::DEFAULT_CRIT_MULTIPLIER);
    }

    #[test]
    fn roster_bounds() {
        assert_eq!(BattleConfig::MAX_COMBATANTS, 8);
    }
}
