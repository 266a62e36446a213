//! Event types for different topics.

use battle_core::{BattleResult, CombatantId, EffectEntry, Phase, Side};
use serde::{Deserialize, Serialize};

/// Events describing what happened in combat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    /// One committed effect log entry.
    Effect(EffectEntry),

    /// The session reached a terminal phase.
    Ended { outcome: Phase },

    /// Rewards and writeback were applied to the party.
    Settled { result: Box<BattleResult> },
}

/// Events related to turn management (lightweight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    RoundStarted {
        round: u32,
    },

    TurnStarted {
        actor: CombatantId,
        side: Side,
    },

    /// Provider input was rejected and the actor defended instead.
    InputRejected {
        actor: CombatantId,
        code: String,
        reason: String,
    },
}
