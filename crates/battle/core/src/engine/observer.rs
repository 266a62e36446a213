//! Presentation contracts.
//!
//! A renderer sees the session through three narrow interfaces:
//! [`BattleReader`] to read, [`BattleCommander`] to submit the one external
//! input, and [`BattleObserver`] to receive effects as they commit.

use crate::combat::EffectEntry;
use crate::state::{AbilityId, Combatant, CombatantId, Side, StatusId};

use super::command::ActionCommand;
use super::errors::SubmitError;
use super::phase::Phase;

/// Read-only view of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub statuses: Vec<(StatusId, u32)>,
}

impl CombatantView {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

impl From<&Combatant> for CombatantView {
    fn from(c: &Combatant) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            side: c.side,
            hp: c.hp(),
            max_hp: c.max_hp(),
            mp: c.mp(),
            max_mp: c.max_mp(),
            statuses: c
                .statuses
                .iter()
                .map(|s| (s.id.clone(), s.remaining))
                .collect(),
        }
    }
}

/// Per-turn snapshot for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub round: u32,
    pub phase: Phase,
    pub awaiting: Option<CombatantId>,
    pub combatants: Vec<CombatantView>,
    pub log: Vec<EffectEntry>,
}

impl BattleSnapshot {
    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantView> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = &CombatantView> {
        self.combatants.iter().filter(move |c| c.side == side)
    }
}

/// Read contract.
pub trait BattleReader {
    fn snapshot(&self) -> BattleSnapshot;

    fn phase(&self) -> Phase;

    fn round(&self) -> u32;

    /// Ally whose action is being waited on, if any.
    fn awaiting_actor(&self) -> Option<CombatantId>;

    fn combatant(&self, id: CombatantId) -> Option<&Combatant>;

    /// Abilities the combatant could submit right now (known, affordable, in stock).
    fn usable_abilities(&self, id: CombatantId) -> Vec<AbilityId>;

    fn effect_log(&self) -> &[EffectEntry];
}

/// Command contract.
pub trait BattleCommander {
    fn submit_action(&mut self, command: ActionCommand) -> Result<(), SubmitError>;
}

/// Event feed. Callbacks fire synchronously, in log order, once the step
/// that produced them has committed.
pub trait BattleObserver {
    /// Every log entry, before the specific callbacks below.
    fn on_effect(&mut self, _entry: &EffectEntry) {}

    fn on_round_started(&mut self, _round: u32) {}

    fn on_turn_started(&mut self, _actor: CombatantId, _side: Side) {}

    fn on_damage_dealt(&mut self, _target: CombatantId, _amount: u32) {}

    fn on_enemy_defeated(&mut self, _enemy: CombatantId) {}

    fn on_status_applied(&mut self, _target: CombatantId, _status: &StatusId) {}

    fn on_combat_ended(&mut self, _outcome: Phase) {}
}
