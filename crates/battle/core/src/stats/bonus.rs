//! Stat modifiers carried by status effects.
//!
//! Calculation order for one stat:
//! 1. Additive deltas (summed)
//! 2. Multiplicative deltas (applied sequentially, in whole percent)
//! 3. Floor at 0, saturate at `u32::MAX`
//!
//! All arithmetic is integer so identical inputs always produce identical
//! output.

use super::core::StatKind;

/// How a modifier changes a stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierOp {
    /// Additive delta, applied first (e.g., +5 defense).
    Add(i32),

    /// Multiplicative delta in percent, applied after all additive deltas.
    /// `150` = ×1.5, `50` = ×0.5.
    Scale(u32),
}

/// A single modifier targeting one stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub op: ModifierOp,
}

impl StatModifier {
    /// Create an additive modifier.
    pub const fn add(stat: StatKind, delta: i32) -> Self {
        Self {
            stat,
            op: ModifierOp::Add(delta),
        }
    }

    /// Create a multiplicative modifier (percent).
    pub const fn scale(stat: StatKind, percent: u32) -> Self {
        Self {
            stat,
            op: ModifierOp::Scale(percent),
        }
    }
}

/// Combine a base value with every modifier that targets `stat`.
///
/// # Formula
///
/// ```text
/// result = max(0, (base + Σadd) × Π(scale / 100))
/// ```
///
/// # Example
/// ```
/// # use battle_core::stats::{StatKind, StatModifier, apply_modifiers};
/// let mods = [
///     StatModifier::add(StatKind::Attack, 5),
///     StatModifier::scale(StatKind::Attack, 150),
///     StatModifier::add(StatKind::Speed, 99),
/// ];
/// // (10 + 5) × 1.5 = 22 (integer)
/// assert_eq!(apply_modifiers(10, StatKind::Attack, mods.iter()), 22);
/// ```
pub fn apply_modifiers<'a>(
    base: u32,
    stat: StatKind,
    modifiers: impl Iterator<Item = &'a StatModifier> + Clone,
) -> u32 {
    let relevant = modifiers.filter(|m| m.stat == stat);

    let flat_sum: i64 = relevant
        .clone()
        .filter_map(|m| match m.op {
            ModifierOp::Add(delta) => Some(i64::from(delta)),
            ModifierOp::Scale(_) => None,
        })
        .sum();

    let scaled = relevant
        .filter_map(|m| match m.op {
            ModifierOp::Scale(percent) => Some(i64::from(percent)),
            ModifierOp::Add(_) => None,
        })
        .fold(i64::from(base) + flat_sum, |acc, percent| {
            acc.saturating_mul(percent) / 100
        });

    scaled.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_modifiers_returns_base() {
        let mods: [StatModifier; 0] = [];
        assert_eq!(apply_modifiers(12, StatKind::Defense, mods.iter()), 12);
    }

    #[test]
    fn additive_before_multiplicative() {
        let mods = [
            StatModifier::scale(StatKind::Defense, 200),
            StatModifier::add(StatKind::Defense, 3),
        ];
        // (10 + 3) × 2, not 10 × 2 + 3
        assert_eq!(apply_modifiers(10, StatKind::Defense, mods.iter()), 26);
    }

    #[test]
    fn multiplicative_applies_sequentially() {
        let mods = [
            StatModifier::scale(StatKind::Speed, 150),
            StatModifier::scale(StatKind::Speed, 50),
        ];
        // 10 × 1.5 = 15, 15 × 0.5 = 7
        assert_eq!(apply_modifiers(10, StatKind::Speed, mods.iter()), 7);
    }

    #[test]
    fn result_floored_at_zero() {
        let mods = [StatModifier::add(StatKind::Attack, -50)];
        assert_eq!(apply_modifiers(10, StatKind::Attack, mods.iter()), 0);
    }

    #[test]
    fn stacked_scales_saturate() {
        let mods = [StatModifier::scale(StatKind::Attack, u32::MAX); 3];
        assert_eq!(apply_modifiers(10, StatKind::Attack, mods.iter()), u32::MAX);

        let debuffed = [
            StatModifier::add(StatKind::Attack, -20),
            StatModifier::scale(StatKind::Attack, u32::MAX),
            StatModifier::scale(StatKind::Attack, u32::MAX),
        ];
        assert_eq!(apply_modifiers(10, StatKind::Attack, debuffed.iter()), 0);
    }

    #[test]
    fn ignores_other_stats() {
        let mods = [StatModifier::add(StatKind::Magic, 40)];
        assert_eq!(apply_modifiers(10, StatKind::Attack, mods.iter()), 10);
    }
}
