//! In-memory content catalog.
//!
//! [`ContentCatalog`] owns every ability, status, item and template and
//! implements the core oracle traits over them. It is validated as a whole
//! once loading finishes, so a session never meets a dangling reference.

use std::collections::{HashMap, HashSet};

use battle_core::{
    Ability, AbilityCategory, AbilityId, AbilityOracle, BattleEnv, CombatantTemplate,
    ItemDefinition, ItemEffect, ItemId, ItemOracle, RngOracle, StatusDefinition, StatusId,
    StatusOracle, TemplateId,
};

use crate::specs::{EncounterSpec, PartySpec};

/// A broken reference or malformed entry in loaded content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("ability '{0}' is defined twice")]
    DuplicateAbility(AbilityId),

    #[error("status '{0}' is defined twice")]
    DuplicateStatus(StatusId),

    #[error("item '{0}' is defined twice")]
    DuplicateItem(ItemId),

    #[error("template '{0}' is defined twice")]
    DuplicateTemplate(TemplateId),

    #[error("'{0}' is built in and cannot be redefined")]
    Reserved(String),

    #[error("ability '{ability}' applies unknown status '{status}'")]
    AbilityStatus { ability: AbilityId, status: StatusId },

    #[error("ability '{ability}' consumes unknown item '{item}'")]
    AbilityItem { ability: AbilityId, item: ItemId },

    #[error("item ability '{0}' names no item")]
    MissingItem(AbilityId),

    #[error("item '{item}' applies unknown status '{status}'")]
    ItemStatus { item: ItemId, status: StatusId },

    #[error("template '{0}' has no hit points")]
    InvalidTemplate(TemplateId),

    #[error("template '{template}' knows unknown ability '{ability}'")]
    TemplateAbility {
        template: TemplateId,
        ability: AbilityId,
    },

    #[error("template '{template}' drops unknown item '{item}'")]
    DropItem { template: TemplateId, item: ItemId },

    #[error("template '{template}' drops '{item}' with chance {chance} outside 1-100")]
    DropChance {
        template: TemplateId,
        item: ItemId,
        chance: u32,
    },

    #[error("encounter '{encounter}' references unknown template '{template}'")]
    UnknownTemplate {
        encounter: String,
        template: TemplateId,
    },

    #[error("encounter '{encounter}' opens with unknown status '{status}'")]
    UnknownStatus { encounter: String, status: StatusId },

    #[error("party lists member '{0}' more than once")]
    DuplicateMember(TemplateId),

    #[error("party starts with unknown item '{0}'")]
    UnknownItem(ItemId),
}

#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    abilities: HashMap<AbilityId, Ability>,
    statuses: HashMap<StatusId, StatusDefinition>,
    items: HashMap<ItemId, ItemDefinition>,
    templates: HashMap<TemplateId, CombatantTemplate>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a catalog from loaded parts and validate it.
    pub fn from_parts(
        abilities: Vec<Ability>,
        statuses: Vec<StatusDefinition>,
        items: Vec<ItemDefinition>,
        templates: Vec<CombatantTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for ability in abilities {
            catalog.add_ability(ability)?;
        }
        for status in statuses {
            catalog.add_status(status)?;
        }
        for item in items {
            catalog.add_item(item)?;
        }
        for template in templates {
            catalog.add_template(template)?;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn add_ability(&mut self, ability: Ability) -> Result<(), CatalogError> {
        if ability.id.as_str() == Ability::DEFEND {
            return Err(CatalogError::Reserved(ability.id.0));
        }
        if self.abilities.contains_key(&ability.id) {
            return Err(CatalogError::DuplicateAbility(ability.id));
        }
        self.abilities.insert(ability.id.clone(), ability);
        Ok(())
    }

    pub fn add_status(&mut self, status: StatusDefinition) -> Result<(), CatalogError> {
        if status.id.as_str() == StatusDefinition::DEFEND {
            return Err(CatalogError::Reserved(status.id.0));
        }
        if self.statuses.contains_key(&status.id) {
            return Err(CatalogError::DuplicateStatus(status.id));
        }
        self.statuses.insert(status.id.clone(), status);
        Ok(())
    }

    pub fn add_item(&mut self, item: ItemDefinition) -> Result<(), CatalogError> {
        if self.items.contains_key(&item.id) {
            return Err(CatalogError::DuplicateItem(item.id));
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    pub fn add_template(&mut self, template: CombatantTemplate) -> Result<(), CatalogError> {
        if self.templates.contains_key(&template.id) {
            return Err(CatalogError::DuplicateTemplate(template.id));
        }
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Check every cross reference between entries.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for ability in self.abilities.values() {
            let missing = ability
                .status
                .as_ref()
                .filter(|s| !self.statuses.contains_key(*s));
            if let Some(status) = missing {
                return Err(CatalogError::AbilityStatus {
                    ability: ability.id.clone(),
                    status: status.clone(),
                });
            }
            match (&ability.item, ability.category) {
                (Some(item), _) if !self.items.contains_key(item) => {
                    return Err(CatalogError::AbilityItem {
                        ability: ability.id.clone(),
                        item: item.clone(),
                    });
                }
                (None, AbilityCategory::Item) => {
                    return Err(CatalogError::MissingItem(ability.id.clone()));
                }
                _ => {}
            }
        }

        for item in self.items.values() {
            let ItemEffect::ApplyStatus(status) = &item.effect else {
                continue;
            };
            if !self.statuses.contains_key(status) {
                return Err(CatalogError::ItemStatus {
                    item: item.id.clone(),
                    status: status.clone(),
                });
            }
        }

        for template in self.templates.values() {
            self.validate_template(template)?;
        }
        Ok(())
    }

    fn validate_template(&self, template: &CombatantTemplate) -> Result<(), CatalogError> {
        if !template.stats.is_valid() {
            return Err(CatalogError::InvalidTemplate(template.id.clone()));
        }
        for ability in &template.abilities {
            if ability.as_str() != Ability::DEFEND && !self.abilities.contains_key(ability) {
                return Err(CatalogError::TemplateAbility {
                    template: template.id.clone(),
                    ability: ability.clone(),
                });
            }
        }
        let Some(bounty) = &template.bounty else {
            return Ok(());
        };
        for drop in &bounty.drops {
            if !self.items.contains_key(&drop.item) {
                return Err(CatalogError::DropItem {
                    template: template.id.clone(),
                    item: drop.item.clone(),
                });
            }
            if !(1..=100).contains(&drop.chance) {
                return Err(CatalogError::DropChance {
                    template: template.id.clone(),
                    item: drop.item.clone(),
                    chance: drop.chance,
                });
            }
        }
        Ok(())
    }

    /// Check an encounter against this catalog. Side counts are left to the
    /// session builder.
    pub fn validate_encounter(&self, id: &str, spec: &EncounterSpec) -> Result<(), CatalogError> {
        for template in spec.enemies.iter() {
            if !self.templates.contains_key(template) {
                return Err(CatalogError::UnknownTemplate {
                    encounter: id.to_owned(),
                    template: template.clone(),
                });
            }
        }
        for opening in &spec.opening {
            if !self.statuses.contains_key(&opening.status) {
                return Err(CatalogError::UnknownStatus {
                    encounter: id.to_owned(),
                    status: opening.status.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn validate_party(&self, spec: &PartySpec) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for member in &spec.members {
            if !self.templates.contains_key(member) {
                return Err(CatalogError::UnknownTemplate {
                    encounter: "party".to_owned(),
                    template: member.clone(),
                });
            }
            if !seen.insert(member) {
                return Err(CatalogError::DuplicateMember(member.clone()));
            }
        }
        for stack in &spec.inventory {
            if !self.items.contains_key(&stack.item) {
                return Err(CatalogError::UnknownItem(stack.item.clone()));
            }
        }
        Ok(())
    }

    pub fn template(&self, id: &TemplateId) -> Option<&CombatantTemplate> {
        self.templates.get(id)
    }

    /// Borrow this catalog as the session environment.
    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle) -> BattleEnv<'a> {
        BattleEnv::new(self, self, self, rng)
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    pub fn status_count(&self) -> usize {
        self.statuses.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}

impl AbilityOracle for ContentCatalog {
    fn ability(&self, id: &AbilityId) -> Option<Ability> {
        self.abilities.get(id).cloned()
    }
}

impl StatusOracle for ContentCatalog {
    fn status(&self, id: &StatusId) -> Option<StatusDefinition> {
        self.statuses.get(id).cloned()
    }
}

impl ItemOracle for ContentCatalog {
    fn item(&self, id: &ItemId) -> Option<ItemDefinition> {
        self.items.get(id).cloned()
    }
}
