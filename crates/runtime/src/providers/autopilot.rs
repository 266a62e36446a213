use async_trait::async_trait;
use battle_core::ActionCommand;

use super::{ActionProvider, TurnContext};
use crate::error::Result;

/// Plays allies with the same policy the enemies use.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutopilotProvider;

#[async_trait]
impl ActionProvider for AutopilotProvider {
    async fn provide_action(&self, ctx: &TurnContext) -> Result<ActionCommand> {
        tracing::debug!(actor = %ctx.actor, command = ?ctx.recommended, "autopilot");
        Ok(ctx.recommended.clone())
    }
}
