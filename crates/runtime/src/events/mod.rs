//! Topic-based event bus for presentation events.
//!
//! The session reports through [`BattleObserver`](battle_core::BattleObserver)
//! callbacks; [`BusObserver`] republishes them on an [`EventBus`] so any
//! number of async consumers can follow the fight.

mod bridge;
mod bus;
mod types;

pub use bridge::BusObserver;
pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, TurnEvent};
