use arrayvec::ArrayVec;

use super::combatant::Combatant;
use super::ids::{CombatantId, Side};
use crate::config::BattleConfig;
use crate::stats::StatKind;

/// Ordered roster of every combatant in a session.
///
/// Combatants are never removed; defeated ones stay in place with 0 HP so
/// that ids remain stable indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    combatants: ArrayVec<Combatant, { BattleConfig::MAX_COMBATANTS }>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next pushed combatant will receive.
    pub fn next_id(&self) -> CombatantId {
        CombatantId(self.combatants.len() as u8)
    }

    /// Appends a combatant. Returns it back if the roster is full.
    pub fn push(&mut self, combatant: Combatant) -> Result<(), Combatant> {
        self.combatants
            .try_push(combatant)
            .map_err(|e| e.element())
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.index())
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(move |c| c.side == side)
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.side(side).filter(|c| c.is_alive())
    }

    pub fn count(&self, side: Side) -> usize {
        self.side(side).count()
    }

    /// True when every combatant on `side` is defeated.
    pub fn is_wiped(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }

    /// Average effective speed of the living members of `side`.
    pub fn average_speed(&self, side: Side) -> u32 {
        let (total, count) = self
            .living(side)
            .fold((0u64, 0u64), |(total, count), c| {
                (total + u64::from(c.effective_stat(StatKind::Speed)), count + 1)
            });
        if count == 0 {
            return 0;
        }
        (total / count) as u32
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}
