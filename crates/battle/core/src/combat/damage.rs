//! Damage calculation.

use crate::config::BattleConfig;
use crate::env::AbilityCategory;
use crate::stats::StatKind;

/// Offensive stat and the target stat that mitigates it, per category.
///
/// Returns `None` for categories that never deal formula damage.
pub const fn damage_stats(category: AbilityCategory) -> Option<(StatKind, StatKind)> {
    match category {
        AbilityCategory::Physical => Some((StatKind::Attack, StatKind::Defense)),
        AbilityCategory::Magical => Some((StatKind::Magic, StatKind::Resistance)),
        AbilityCategory::Item | AbilityCategory::Defend => None,
    }
}

/// Random factors rolled for one hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRoll {
    /// Variance in percent (e.g. 90..=110).
    pub variance_pct: u32,
    pub critical: bool,
}

impl DamageRoll {
    /// No variance and no critical.
    pub const NEUTRAL: Self = Self {
        variance_pct: 100,
        critical: false,
    };
}

/// Calculate pre-roll damage.
///
/// # Formula
///
/// ```text
/// base = max(1, stat * power / 100 - mitigation)
/// ```
///
/// `power` is a percentage, so 100 means a power factor of 1.0.
pub fn base_damage(stat: u32, power: u32, mitigation: u32) -> u32 {
    let raw = u64::from(stat) * u64::from(power) / 100;
    let reduced = raw.saturating_sub(u64::from(mitigation));
    reduced.clamp(1, u64::from(u32::MAX)) as u32
}

/// Apply variance, critical and guard factors to base damage.
///
/// ```text
/// damage = base * variance% * (crit_multiplier% if critical) * guard%
/// floored at 1
/// ```
pub fn calculate_damage(
    base: u32,
    roll: DamageRoll,
    guard_pct: u32,
    config: &BattleConfig,
) -> u32 {
    let mut damage = u64::from(base) * u64::from(roll.variance_pct) / 100;

    if roll.critical {
        damage = damage * u64::from(config.crit_multiplier) / 100;
    }

    damage = damage * u64::from(guard_pct) / 100;

    damage.clamp(1, u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_damage_matches_reference_attack() {
        assert_eq!(base_damage(20, 100, 5), 15);
    }

    #[test]
    fn minimum_damage_floor() {
        assert_eq!(base_damage(10, 100, 10), 1);
        assert_eq!(base_damage(10, 100, 50), 1);
        assert_eq!(base_damage(0, 0, 0), 1);
    }

    #[test]
    fn multipliers_apply_in_order() {
        let config = BattleConfig::new();
        let roll = DamageRoll {
            variance_pct: 110,
            critical: true,
        };
        // 20 * 1.1 = 22, * 1.5 = 33
        assert_eq!(calculate_damage(20, roll, 100, &config), 33);
        // guarded: 33 * 0.5 = 16
        assert_eq!(calculate_damage(20, roll, 50, &config), 16);
    }

    #[test]
    fn guard_never_reduces_below_one() {
        let config = BattleConfig::new();
        assert_eq!(calculate_damage(1, DamageRoll::NEUTRAL, 50, &config), 1);
    }

    #[test]
    fn support_categories_have_no_damage_stats() {
        assert!(damage_stats(AbilityCategory::Item).is_none());
        assert_eq!(
            damage_stats(AbilityCategory::Magical),
            Some((StatKind::Magic, StatKind::Resistance))
        );
    }
}
