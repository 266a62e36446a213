use crate::env::Ability;
use crate::state::{AbilityId, CombatantId};

/// External input for the ally whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ActionCommand {
    UseAbility {
        ability: AbilityId,
        #[cfg_attr(feature = "serde", serde(default))]
        targets: Vec<CombatantId>,
    },
    Flee,
}

impl ActionCommand {
    pub fn ability(ability: impl Into<AbilityId>, targets: Vec<CombatantId>) -> Self {
        Self::UseAbility {
            ability: ability.into(),
            targets,
        }
    }

    /// Single-target convenience.
    pub fn target(ability: impl Into<AbilityId>, target: CombatantId) -> Self {
        Self::ability(ability, vec![target])
    }

    /// Built-in defend; also the default for timed-out input.
    pub fn defend() -> Self {
        Self::ability(Ability::DEFEND, Vec::new())
    }

    pub fn flee() -> Self {
        Self::Flee
    }
}
