use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use battle_core::ActionCommand;

use super::{ActionProvider, TurnContext};
use crate::error::{Result, RuntimeError};

/// Replays a fixed list of commands, then defends forever.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<ActionCommand>>,
}

impl ScriptedProvider {
    pub fn new(commands: impl IntoIterator<Item = ActionCommand>) -> Self {
        Self {
            script: Mutex::new(commands.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map_or(0, |script| script.len())
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, ctx: &TurnContext) -> Result<ActionCommand> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| RuntimeError::Provider("script lock poisoned".to_owned()))?;
        Ok(script.pop_front().unwrap_or_else(|| {
            tracing::debug!(actor = %ctx.actor, "script exhausted; defending");
            ActionCommand::defend()
        }))
    }
}
