use crate::config::BattleConfig;
use crate::env::{BattleEnv, CombatantTemplate, Inventory};
use crate::state::{Combatant, Roster, Side, StackingPolicy, StatusDefinition, StatusId};

use super::CombatSession;
use super::errors::SetupError;
use super::outcome::Vitals;

/// Assembles and validates a [`CombatSession`].
///
/// A malformed encounter is a construction error: `build` refuses to create
/// the session rather than letting it fail mid-battle.
pub struct SessionBuilder<'a> {
    env: BattleEnv<'a>,
    config: BattleConfig,
    allies: Vec<(CombatantTemplate, Option<Vitals>)>,
    enemies: Vec<CombatantTemplate>,
    opening: Vec<(Side, StatusId)>,
    escapable: bool,
    seed: Option<u64>,
}

impl<'a> SessionBuilder<'a> {
    pub fn new(env: BattleEnv<'a>) -> Self {
        Self {
            env,
            config: BattleConfig::default(),
            allies: Vec::new(),
            enemies: Vec::new(),
            opening: Vec::new(),
            escapable: true,
            seed: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Add an ally at full HP/MP.
    #[must_use]
    pub fn ally(mut self, template: CombatantTemplate) -> Self {
        self.allies.push((template, None));
        self
    }

    /// Add an ally carrying vitals from its persistent record.
    #[must_use]
    pub fn ally_with_vitals(mut self, template: CombatantTemplate, vitals: Vitals) -> Self {
        self.allies.push((template, Some(vitals)));
        self
    }

    #[must_use]
    pub fn enemy(mut self, template: CombatantTemplate) -> Self {
        self.enemies.push(template);
        self
    }

    /// Apply a status to every combatant on `side` during SETUP (e.g. ambush).
    #[must_use]
    pub fn opening_status(mut self, side: Side, status: impl Into<StatusId>) -> Self {
        self.opening.push((side, status.into()));
        self
    }

    #[must_use]
    pub fn escapable(mut self, escapable: bool) -> Self {
        self.escapable = escapable;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self, inventory: &'a mut dyn Inventory) -> Result<CombatSession<'a>, SetupError> {
        let seed = self.seed.ok_or(SetupError::MissingSeed)?;
        self.validate_config()?;

        if self.allies.is_empty() {
            return Err(SetupError::NoAllies);
        }
        if self.allies.len() > BattleConfig::MAX_ALLIES {
            return Err(SetupError::TooManyAllies(self.allies.len()));
        }
        if self.enemies.is_empty() {
            return Err(SetupError::NoEnemies);
        }
        if self.enemies.len() > BattleConfig::MAX_ENEMIES {
            return Err(SetupError::TooManyEnemies(self.enemies.len()));
        }

        for template in self.allies.iter().map(|(t, _)| t).chain(&self.enemies) {
            self.validate_template(template)?;
        }

        let opening = self
            .opening
            .iter()
            .map(|(side, id)| {
                self.env
                    .status(id)
                    .map(|def| (*side, def))
                    .ok_or_else(|| SetupError::UnknownStatus(id.clone()))
            })
            .collect::<Result<Vec<(Side, StatusDefinition)>, _>>()?;

        let mut roster = Roster::new();
        for (template, vitals) in &self.allies {
            let mut ally = Combatant::from_template(roster.next_id(), Side::Ally, template);
            if let Some(vitals) = vitals {
                ally = ally.with_vitals(vitals.hp, vitals.mp);
                if ally.is_alive() {
                    for effect in &vitals.statuses {
                        ally.statuses.apply(effect.clone(), StackingPolicy::Stack);
                    }
                }
            }
            push(&mut roster, ally);
        }
        if roster.is_wiped(Side::Ally) {
            return Err(SetupError::NoAllies);
        }
        for template in &self.enemies {
            let enemy = Combatant::from_template(roster.next_id(), Side::Enemy, template);
            push(&mut roster, enemy);
        }

        tracing::info!(
            allies = self.allies.len(),
            enemies = self.enemies.len(),
            escapable = self.escapable,
            seed,
            "encounter assembled"
        );

        Ok(CombatSession::new(
            self.env,
            self.config,
            inventory,
            roster,
            opening,
            self.escapable,
            seed,
        ))
    }

    fn validate_config(&self) -> Result<(), SetupError> {
        let config = &self.config;
        if !config.has_valid_variance() {
            return Err(SetupError::InvalidConfig("variance_min exceeds variance_max"));
        }
        if config.min_hit_chance > config.max_hit_chance {
            return Err(SetupError::InvalidConfig("min_hit_chance exceeds max_hit_chance"));
        }
        if config.flee_min_chance > config.flee_max_chance {
            return Err(SetupError::InvalidConfig("flee_min_chance exceeds flee_max_chance"));
        }
        Ok(())
    }

    fn validate_template(&self, template: &CombatantTemplate) -> Result<(), SetupError> {
        if !template.stats.is_valid() {
            return Err(SetupError::InvalidTemplate(template.id.clone()));
        }
        for ability in &template.abilities {
            if self.env.ability(ability).is_none() {
                return Err(SetupError::UnknownAbility {
                    template: template.id.clone(),
                    ability: ability.clone(),
                });
            }
        }
        Ok(())
    }
}

// Side counts are checked against MAX_ALLIES/MAX_ENEMIES first, so the
// roster always has room.
fn push(roster: &mut Roster, combatant: Combatant) {
    if let Err(rejected) = roster.push(combatant) {
        tracing::error!(id = %rejected.id, "roster full; combatant dropped");
    }
}
