//! Identifiers used across the combat state.

use core::fmt;

/// Index of a combatant in the session roster.
///
/// Roster order is insertion order (allies first, then enemies), so the id
/// doubles as the stable tie-breaker for initiative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u8);

impl CombatantId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the encounter a combatant fights on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    /// Player-controlled; waits for external input.
    Ally,
    /// AI-controlled; acts immediately.
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id!(
    /// Catalog key of an ability (e.g., `"slash"`).
    AbilityId
);
string_id!(
    /// Catalog key of a status effect definition (e.g., `"poison"`).
    StatusId
);
string_id!(
    /// Catalog key of an inventory item (e.g., `"potion"`).
    ItemId
);
string_id!(
    /// Catalog key of a combatant template (e.g., `"goblin_scout"`).
    TemplateId
);
