//! Hit and critical chance calculations.

use crate::config::BattleConfig;

/// Calculate hit chance from the speed difference between actor and target.
///
/// # Formula
///
/// ```text
/// hit_chance = base_accuracy + (actor_speed - target_speed) * accuracy_per_speed
/// clamped to [min_hit_chance, max_hit_chance]
/// ```
pub fn calculate_hit_chance(actor_speed: u32, target_speed: u32, config: &BattleConfig) -> u32 {
    let diff = i64::from(actor_speed) - i64::from(target_speed);
    let chance = i64::from(config.base_accuracy) + diff * i64::from(config.accuracy_per_speed);

    chance.clamp(
        i64::from(config.min_hit_chance),
        i64::from(config.max_hit_chance),
    ) as u32
}

/// Calculate critical chance from the speed difference between actor and target.
///
/// ```text
/// crit_chance = crit_base_chance + (actor_speed - target_speed) * crit_per_speed
/// clamped to [0, crit_max_chance]
/// ```
pub fn calculate_crit_chance(actor_speed: u32, target_speed: u32, config: &BattleConfig) -> u32 {
    let diff = i64::from(actor_speed) - i64::from(target_speed);
    let chance = i64::from(config.crit_base_chance) + diff * i64::from(config.crit_per_speed);

    chance.clamp(0, i64::from(config.crit_max_chance)) as u32
}

/// A d100 roll succeeds when it is at most `chance`.
#[inline]
pub fn check_roll(chance: u32, roll: u32) -> bool {
    roll <= chance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_chance_scales_with_speed_and_clamps() {
        let config = BattleConfig::new();
        assert_eq!(calculate_hit_chance(10, 10, &config), 90);
        assert_eq!(calculate_hit_chance(15, 10, &config), 95);
        assert_eq!(calculate_hit_chance(50, 0, &config), 100);
        assert_eq!(calculate_hit_chance(0, 200, &config), 50);
    }

    #[test]
    fn crit_chance_never_negative() {
        let config = BattleConfig::new();
        assert_eq!(calculate_crit_chance(10, 10, &config), 5);
        assert_eq!(calculate_crit_chance(0, 40, &config), 0);
        assert_eq!(calculate_crit_chance(200, 0, &config), 50);
    }

    #[test]
    fn fixed_config_always_hits_never_crits() {
        let config = BattleConfig::fixed();
        assert_eq!(calculate_hit_chance(1, 99, &config), 100);
        assert_eq!(calculate_crit_chance(99, 1, &config), 0);
        assert!(check_roll(100, 100));
        assert!(!check_roll(0, 1));
    }
}
