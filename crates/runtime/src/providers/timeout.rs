use std::time::Duration;

use async_trait::async_trait;
use battle_core::ActionCommand;

use super::{ActionProvider, TurnContext};
use crate::error::Result;

/// Defends on behalf of an inner provider that does not answer in time.
pub struct TimeoutProvider<P> {
    inner: P,
    limit: Duration,
}

impl<P: ActionProvider> TimeoutProvider<P> {
    pub fn new(inner: P, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<P: ActionProvider> ActionProvider for TimeoutProvider<P> {
    async fn provide_action(&self, ctx: &TurnContext) -> Result<ActionCommand> {
        match tokio::time::timeout(self.limit, self.inner.provide_action(ctx)).await {
            Ok(command) => command,
            Err(_) => {
                tracing::info!(
                    actor = %ctx.actor,
                    limit = ?self.limit,
                    "input timed out; defending"
                );
                Ok(ActionCommand::defend())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BattleSnapshot, CombatantId, Phase};

    struct Slow(Duration);

    #[async_trait]
    impl ActionProvider for Slow {
        async fn provide_action(&self, ctx: &TurnContext) -> Result<ActionCommand> {
            tokio::time::sleep(self.0).await;
            Ok(ctx.recommended.clone())
        }
    }

    fn ctx() -> TurnContext {
        TurnContext {
            actor: CombatantId(0),
            snapshot: BattleSnapshot {
                round: 1,
                phase: Phase::AwaitingAction,
                awaiting: Some(CombatantId(0)),
                combatants: Vec::new(),
                log: Vec::new(),
            },
            usable: vec!["strike".into()],
            recommended: ActionCommand::target("strike", CombatantId(1)),
        }
    }

    #[tokio::test]
    async fn late_input_becomes_defend() {
        let provider =
            TimeoutProvider::new(Slow(Duration::from_secs(5)), Duration::from_millis(10));
        let command = provider.provide_action(&ctx()).await.unwrap();
        assert_eq!(command, ActionCommand::defend());
    }

    #[tokio::test]
    async fn prompt_input_passes_through() {
        let provider = TimeoutProvider::new(Slow(Duration::ZERO), Duration::from_secs(5));
        let command = provider.provide_action(&ctx()).await.unwrap();
        assert_eq!(command, ActionCommand::target("strike", CombatantId(1)));
    }
}
