//! Asynchronous abstraction for sourcing ally input.
//!
//! The session suspends only for ally input. Runtime users plug in
//! [`ActionProvider`] implementations so encounters can run with human
//! input, scripted fixtures, or the built-in policy.

mod autopilot;
mod scripted;
mod timeout;

pub use autopilot::AutopilotProvider;
pub use scripted::ScriptedProvider;
pub use timeout::TimeoutProvider;

use async_trait::async_trait;
use battle_core::{AbilityId, ActionCommand, BattleSnapshot, CombatantId};

use crate::error::Result;

/// Everything a provider may consult when choosing an ally's action.
#[derive(Clone, Debug)]
pub struct TurnContext {
    pub actor: CombatantId,
    pub snapshot: BattleSnapshot,
    /// Abilities the actor can pay for right now, `defend` included.
    pub usable: Vec<AbilityId>,
    /// What the AI policy would do in the actor's place.
    pub recommended: ActionCommand,
}

/// Trait for providing the action of the ally whose turn it is.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn provide_action(&self, ctx: &TurnContext) -> Result<ActionCommand>;
}

#[async_trait]
impl<P: ActionProvider + ?Sized> ActionProvider for Box<P> {
    async fn provide_action(&self, ctx: &TurnContext) -> Result<ActionCommand> {
        (**self).provide_action(ctx).await
    }
}
