//! Observer that republishes session callbacks on the event bus.

use battle_core::{BattleObserver, CombatantId, EffectEntry, Phase, Side};

use super::bus::{Event, EventBus};
use super::types::{CombatEvent, TurnEvent};

pub struct BusObserver {
    bus: EventBus,
}

impl BusObserver {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl BattleObserver for BusObserver {
    fn on_effect(&mut self, entry: &EffectEntry) {
        self.bus.publish(Event::Combat(CombatEvent::Effect(entry.clone())));
    }

    fn on_round_started(&mut self, round: u32) {
        self.bus.publish(Event::Turn(TurnEvent::RoundStarted { round }));
    }

    fn on_turn_started(&mut self, actor: CombatantId, side: Side) {
        self.bus.publish(Event::Turn(TurnEvent::TurnStarted { actor, side }));
    }

    fn on_combat_ended(&mut self, outcome: Phase) {
        self.bus.publish(Event::Combat(CombatEvent::Ended { outcome }));
    }
}
