//! Base stats - the immutable half of the stat model.
//!
//! Base stats come from a combatant template and never change during a
//! session. Everything the resolver reads goes through
//! [`effective_stat`](crate::state::Combatant::effective_stat), which layers
//! active status modifiers on top of these values.

/// Stats that status effects can modify.
///
/// HP and MP maximums are not modifiable in combat; only the five
/// combat-facing stats are.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Attack,
    Defense,
    Magic,
    Resistance,
    Speed,
}

/// Immutable base stats for a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub resistance: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Create base stats with explicit values for every field.
    pub const fn new(
        max_hp: u32,
        max_mp: u32,
        attack: u32,
        defense: u32,
        magic: u32,
        resistance: u32,
        speed: u32,
    ) -> Self {
        Self {
            max_hp,
            max_mp,
            attack,
            defense,
            magic,
            resistance,
            speed,
        }
    }

    /// Read the base value of a modifiable stat.
    pub const fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Magic => self.magic,
            StatKind::Resistance => self.resistance,
            StatKind::Speed => self.speed,
        }
    }

    /// A template is usable only if it can hold hit points.
    pub const fn is_valid(&self) -> bool {
        self.max_hp > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn get_reads_each_field() {
        let stats = BaseStats::new(30, 10, 1, 2, 3, 4, 5);
        let values: Vec<u32> = StatKind::iter().map(|s| stats.get(s)).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn stat_kind_parses_snake_case() {
        assert_eq!("resistance".parse::<StatKind>(), Ok(StatKind::Resistance));
        assert_eq!("SPEED".parse::<StatKind>(), Ok(StatKind::Speed));
        assert_eq!(StatKind::Magic.to_string(), "magic");
    }

    #[test]
    fn zero_hp_template_is_invalid() {
        assert!(!BaseStats::new(0, 0, 1, 1, 1, 1, 1).is_valid());
    }
}
