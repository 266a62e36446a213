//! Effect log entries.
//!
//! Every mutation the session performs is appended here in the order it
//! happened. The log covers the current round only and is cleared at each
//! `ROUND_START`. Presentation layers render it; tests replay it.

use crate::state::{AbilityId, CombatantId, ItemId, StatusId};
use crate::stats::ResourceKind;

/// Why a status effect left a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ExpiryReason {
    /// Duration ran out at a round tick.
    Elapsed,
    /// A guard absorbed a hit.
    Consumed,
    /// Cleared because the bearer was defeated.
    Defeated,
}

/// Why a declared action did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FailureReason {
    InsufficientResource,
    ItemUnavailable,
    UnknownItem,
    NoValidTarget,
}

/// One resolved effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum EffectEntry {
    ActionDeclared {
        actor: CombatantId,
        ability: AbilityId,
        targets: Vec<CombatantId>,
    },
    ActionFailed {
        actor: CombatantId,
        ability: AbilityId,
        reason: FailureReason,
    },
    ResourceSpent {
        actor: CombatantId,
        resource: ResourceKind,
        amount: u32,
    },
    ItemConsumed {
        actor: CombatantId,
        item: ItemId,
    },
    Missed {
        actor: CombatantId,
        target: CombatantId,
    },
    DamageDealt {
        actor: CombatantId,
        target: CombatantId,
        amount: u32,
        critical: bool,
        guarded: bool,
    },
    Healed {
        actor: CombatantId,
        target: CombatantId,
        amount: u32,
    },
    Revived {
        actor: CombatantId,
        target: CombatantId,
        hp: u32,
    },
    ManaRestored {
        actor: CombatantId,
        target: CombatantId,
        amount: u32,
    },
    StatusApplied {
        target: CombatantId,
        status: StatusId,
        refreshed: bool,
    },
    StatusExpired {
        target: CombatantId,
        status: StatusId,
        reason: ExpiryReason,
    },
    StatusDamage {
        target: CombatantId,
        status: StatusId,
        amount: u32,
    },
    StatusHeal {
        target: CombatantId,
        status: StatusId,
        amount: u32,
    },
    Defeated {
        target: CombatantId,
    },
    FleeFailed {
        actor: CombatantId,
        chance: u32,
    },
    Fled {
        actor: CombatantId,
    },
}

impl EffectEntry {
    /// HP removed from a combatant by this entry, if any.
    pub fn damage(&self) -> Option<(CombatantId, u32)> {
        match self {
            Self::DamageDealt { target, amount, .. }
            | Self::StatusDamage { target, amount, .. } => Some((*target, *amount)),
            _ => None,
        }
    }
}

/// Ordered effects of the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectLog {
    entries: Vec<EffectEntry>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: EffectEntry) {
        tracing::trace!(?entry, "effect");
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record a defeat followed by every status the defeat cleared.
    pub fn push_defeat(&mut self, target: CombatantId, cleared: Vec<StatusId>) {
        self.push(EffectEntry::Defeated { target });
        for status in cleared {
            self.push(EffectEntry::StatusExpired {
                target,
                status,
                reason: ExpiryReason::Defeated,
            });
        }
    }

    pub fn entries(&self) -> &[EffectEntry] {
        &self.entries
    }

    pub fn since(&self, start: usize) -> &[EffectEntry] {
        self.entries.get(start..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
