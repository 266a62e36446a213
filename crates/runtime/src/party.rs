//! Persistent party state.
//!
//! The party outlives every encounter: members keep their grown stats,
//! experience and vitals, and the shared inventory is lent to each session
//! as its [`Inventory`] collaborator. After a fight the runtime writes ally
//! vitals back and reports rewards through [`Progression`].

use std::collections::{BTreeMap, BTreeSet};

use battle_content::{ContentCatalog, PartySpec, ProgressionTable};
use battle_core::{
    BaseStats, BattleResult, CombatantTemplate, Inventory, ItemId, LevelUp, Progression,
    TemplateId, Vitals,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

/// Items held by the party, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInventory {
    items: BTreeMap<ItemId, u32>,
}

impl PartyInventory {
    pub fn add(&mut self, item: &ItemId, quantity: u32) {
        let held = self.items.entry(item.clone()).or_default();
        *held = held.saturating_add(quantity);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.items.iter().map(|(id, n)| (id, *n))
    }
}

impl Inventory for PartyInventory {
    fn quantity(&self, item: &ItemId) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    fn consume_one(&mut self, item: &ItemId) -> bool {
        match self.items.get_mut(item) {
            Some(held) if *held > 0 => {
                *held -= 1;
                true
            }
            _ => false,
        }
    }
}

/// One persistent character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyMember {
    /// Current definition, including stat growth from levels gained.
    pub template: CombatantTemplate,
    /// Experience toward the next level.
    pub experience: u32,
    pub vitals: Vitals,
}

impl PartyMember {
    pub fn new(template: CombatantTemplate) -> Self {
        let vitals = Vitals {
            hp: template.stats.max_hp,
            mp: template.stats.max_mp,
            statuses: Vec::new(),
        };
        Self {
            template,
            experience: 0,
            vitals,
        }
    }

    pub fn id(&self) -> &TemplateId {
        &self.template.id
    }

    pub fn level(&self) -> u32 {
        self.template.level
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.hp > 0
    }

    fn grow(&mut self, growth: &BaseStats) {
        let stats = &mut self.template.stats;
        stats.max_hp = stats.max_hp.saturating_add(growth.max_hp);
        stats.max_mp = stats.max_mp.saturating_add(growth.max_mp);
        stats.attack = stats.attack.saturating_add(growth.attack);
        stats.defense = stats.defense.saturating_add(growth.defense);
        stats.magic = stats.magic.saturating_add(growth.magic);
        stats.resistance = stats.resistance.saturating_add(growth.resistance);
        stats.speed = stats.speed.saturating_add(growth.speed);
        let (max_hp, max_mp) = (stats.max_hp, stats.max_mp);
        self.template.level += 1;

        // a level up heals by the growth, never above the new maximum
        if self.is_alive() {
            self.vitals.hp = self.vitals.hp.saturating_add(growth.max_hp).min(max_hp);
            self.vitals.mp = self.vitals.mp.saturating_add(growth.max_mp).min(max_mp);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    members: Vec<PartyMember>,
    pub inventory: PartyInventory,
    pub currency: u32,
    progression: ProgressionTable,
}

impl Party {
    pub fn new(members: Vec<PartyMember>, progression: ProgressionTable) -> Self {
        Self {
            members,
            inventory: PartyInventory::default(),
            currency: 0,
            progression,
        }
    }

    /// Build the starting party from content.
    pub fn from_spec(
        spec: &PartySpec,
        catalog: &ContentCatalog,
        progression: ProgressionTable,
    ) -> Result<Self> {
        if spec.members.is_empty() {
            return Err(RuntimeError::EmptyParty);
        }
        // writeback and experience are keyed by template id
        let mut seen = BTreeSet::new();
        if let Some(dup) = spec.members.iter().find(|id| !seen.insert(*id)) {
            return Err(RuntimeError::DuplicateMember(dup.clone()));
        }
        let members = spec
            .members
            .iter()
            .map(|id| {
                catalog
                    .template(id)
                    .cloned()
                    .map(PartyMember::new)
                    .ok_or_else(|| RuntimeError::UnknownTemplate(id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut party = Self::new(members, progression);
        for stack in &spec.inventory {
            party.inventory.add(&stack.item, stack.quantity);
        }
        party.currency = spec.currency;
        Ok(party)
    }

    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    pub fn member(&self, id: &TemplateId) -> Option<&PartyMember> {
        self.members.iter().find(|m| m.id() == id)
    }

    pub fn is_wiped(&self) -> bool {
        self.members.iter().all(|m| !m.is_alive())
    }

    /// Copy final ally vitals from a finished encounter.
    pub fn apply_writeback(&mut self, result: &BattleResult) {
        for ally in &result.allies {
            match self.members.iter_mut().find(|m| m.template.id == ally.member) {
                Some(member) => member.vitals = ally.vitals.clone(),
                None => tracing::warn!(member = %ally.member, "writeback for unknown member"),
            }
        }
    }

    /// Restore every member to full HP/MP and clear lingering statuses.
    pub fn rest(&mut self) {
        for member in &mut self.members {
            member.vitals = Vitals {
                hp: member.template.stats.max_hp,
                mp: member.template.stats.max_mp,
                statuses: Vec::new(),
            };
        }
    }
}

impl Progression for Party {
    fn grant_experience(&mut self, member: &TemplateId, amount: u32) -> Option<LevelUp> {
        let table = &self.progression;
        let target = self.members.iter_mut().find(|m| &m.template.id == member)?;
        target.experience = target.experience.saturating_add(amount);

        let mut gained = false;
        loop {
            let needed = table.experience_to_next(target.level());
            if needed == 0 || target.experience < needed {
                break;
            }
            target.experience -= needed;
            target.grow(&table.growth);
            gained = true;
        }

        gained.then(|| LevelUp {
            member: member.clone(),
            new_level: target.level(),
        })
    }

    fn grant_currency(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
    }

    fn grant_item(&mut self, item: &ItemId, quantity: u32) {
        self.inventory.add(item, quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AllyWriteback, BattleOutcome, CombatantId, Rewards};

    fn hero() -> CombatantTemplate {
        CombatantTemplate::new("hero", "Hero", BaseStats::new(50, 10, 10, 5, 5, 5, 8))
    }

    fn party() -> Party {
        Party::new(vec![PartyMember::new(hero())], ProgressionTable::default())
    }

    #[test]
    fn experience_rolls_over_multiple_levels() {
        let mut party = party();
        let hero_id = TemplateId::from("hero");

        assert_eq!(party.grant_experience(&hero_id, 50), None);
        // 50 + 260: level 1 needs 100, level 2 needs 200 -> level 3 with 10 left
        let level_up = party.grant_experience(&hero_id, 260).unwrap();
        assert_eq!(level_up.new_level, 3);

        let hero = party.member(&hero_id).unwrap();
        assert_eq!(hero.experience, 10);
        assert_eq!(hero.template.stats.max_hp, 66);
        assert_eq!(hero.template.stats.attack, 14);
        assert_eq!(hero.vitals.hp, 66);
    }

    #[test]
    fn level_up_heals_the_living_only() {
        let growth = ProgressionTable::default().growth;

        let mut wounded = PartyMember::new(hero());
        wounded.vitals.hp = 49;
        wounded.vitals.mp = 2;
        wounded.grow(&growth);
        assert_eq!(wounded.level(), 2);
        assert_eq!(wounded.vitals.hp, (49 + growth.max_hp).min(wounded.template.stats.max_hp));
        assert_eq!(wounded.vitals.mp, (2 + growth.max_mp).min(wounded.template.stats.max_mp));

        let mut fallen = PartyMember::new(hero());
        fallen.vitals.hp = 0;
        fallen.grow(&growth);
        assert_eq!(fallen.vitals.hp, 0);
        assert_eq!(fallen.template.stats.max_hp, 50 + growth.max_hp);
    }

    #[test]
    fn duplicate_members_are_rejected() {
        let catalog = ContentCatalog::from_parts(vec![], vec![], vec![], vec![hero()]).unwrap();
        let spec = PartySpec {
            members: vec!["hero".into(), "hero".into()],
            inventory: Vec::new(),
            currency: 0,
        };

        let err = Party::from_spec(&spec, &catalog, ProgressionTable::default()).unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateMember(id) if id.0 == "hero"));
    }

    #[test]
    fn unknown_member_gains_nothing() {
        let mut party = party();
        assert_eq!(party.grant_experience(&"ghost".into(), 1_000), None);
    }

    #[test]
    fn inventory_consumes_and_refills() {
        let mut inventory = PartyInventory::default();
        let potion = ItemId::from("potion");
        assert!(!inventory.consume_one(&potion));
        inventory.add(&potion, 2);
        assert!(inventory.consume_one(&potion));
        assert_eq!(inventory.quantity(&potion), 1);
    }

    #[test]
    fn writeback_replaces_vitals_and_rest_restores() {
        let mut party = party();
        let result = BattleResult {
            outcome: BattleOutcome::Defeat,
            rounds: 4,
            rewards: Rewards::default(),
            allies: vec![AllyWriteback {
                combatant: CombatantId(0),
                member: "hero".into(),
                vitals: Vitals {
                    hp: 0,
                    mp: 3,
                    statuses: Vec::new(),
                },
            }],
        };

        party.apply_writeback(&result);
        assert!(party.is_wiped());

        party.rest();
        assert_eq!(party.members()[0].vitals.hp, 50);
        assert!(!party.is_wiped());
    }
}
