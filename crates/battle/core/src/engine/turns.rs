use std::collections::VecDeque;

use crate::state::{CombatantId, Roster};
use crate::stats::StatKind;

/// Per-round initiative order.
///
/// Built once per round from living combatants, fastest first. Ties keep
/// roster order. Combatants defeated mid-round are skipped lazily when popped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeQueue {
    order: VecDeque<CombatantId>,
}

impl InitiativeQueue {
    pub fn build(roster: &Roster) -> Self {
        let mut living: Vec<(u32, CombatantId)> = roster
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| (c.effective_stat(StatKind::Speed), c.id))
            .collect();
        // stable: equal speeds stay in roster order
        living.sort_by(|a, b| b.0.cmp(&a.0));

        Self {
            order: living.into_iter().map(|(_, id)| id).collect(),
        }
    }

    /// Next living combatant, discarding any defeated since the build.
    pub fn pop_next(&mut self, roster: &Roster) -> Option<CombatantId> {
        while let Some(id) = self.order.pop_front() {
            if roster.get(id).is_some_and(|c| c.is_alive()) {
                return Some(id);
            }
        }
        None
    }

    pub fn remaining(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
