#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use battle_core::{
    Ability, AbilityCategory, AbilityEffect, AbilityId, AbilityOracle, BaseStats, BattleObserver,
    CombatantId, CombatantTemplate, EffectEntry, Inventory, ItemDefinition, ItemEffect, ItemId,
    ItemOracle, Phase, ResourceCost, Side, StatusDefinition, StatusId, StatusOracle, TargetShape,
};

/// In-memory catalog used by the scenario tests.
#[derive(Default)]
pub struct Catalog {
    abilities: HashMap<AbilityId, Ability>,
    statuses: HashMap<StatusId, StatusDefinition>,
    items: HashMap<ItemId, ItemDefinition>,
}

impl Catalog {
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        catalog.add_ability(Ability::new(
            "strike",
            "Strike",
            AbilityCategory::Physical,
            100,
            TargetShape::SingleEnemy,
        ));
        catalog.add_ability(
            Ability::new("fire", "Fire", AbilityCategory::Magical, 150, TargetShape::SingleEnemy)
                .with_cost(ResourceCost::mp(4)),
        );
        catalog.add_ability(Ability::new(
            "sweep",
            "Sweep",
            AbilityCategory::Physical,
            60,
            TargetShape::AllEnemies,
        ));
        catalog.add_ability(
            Ability::new("cure", "Cure", AbilityCategory::Magical, 100, TargetShape::SingleAlly)
                .with_effect(AbilityEffect::Heal)
                .with_cost(ResourceCost::mp(3)),
        );
        catalog.add_ability(Ability::use_item(
            "use_potion",
            "Potion",
            "potion",
            TargetShape::SingleAlly,
        ));
        catalog.add_ability(Ability::use_item(
            "use_phoenix",
            "Phoenix Down",
            "phoenix_down",
            TargetShape::SingleAlly,
        ));

        catalog.add_status(StatusDefinition::new("poison", "Poison", 3).with_per_round_hp(-5));
        catalog.add_item(ItemDefinition::new("potion", "Potion", ItemEffect::Heal(25)));
        catalog.add_item(ItemDefinition::new(
            "phoenix_down",
            "Phoenix Down",
            ItemEffect::Revive(50),
        ));
        catalog
    }

    pub fn add_ability(&mut self, ability: Ability) {
        self.abilities.insert(ability.id.clone(), ability);
    }

    pub fn add_status(&mut self, status: StatusDefinition) {
        self.statuses.insert(status.id.clone(), status);
    }

    pub fn add_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id.clone(), item);
    }
}

impl AbilityOracle for Catalog {
    fn ability(&self, id: &AbilityId) -> Option<Ability> {
        self.abilities.get(id).cloned()
    }
}

impl StatusOracle for Catalog {
    fn status(&self, id: &StatusId) -> Option<StatusDefinition> {
        self.statuses.get(id).cloned()
    }
}

impl ItemOracle for Catalog {
    fn item(&self, id: &ItemId) -> Option<ItemDefinition> {
        self.items.get(id).cloned()
    }
}

#[derive(Debug, Default)]
pub struct Bag(pub HashMap<ItemId, u32>);

impl Bag {
    pub fn with(item: &str, quantity: u32) -> Self {
        let mut bag = Self::default();
        bag.0.insert(ItemId::from(item), quantity);
        bag
    }
}

impl Inventory for Bag {
    fn quantity(&self, item: &ItemId) -> u32 {
        self.0.get(item).copied().unwrap_or(0)
    }

    fn consume_one(&mut self, item: &ItemId) -> bool {
        match self.0.get_mut(item) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }
}

/// Template with the given attack, defense, HP and speed; other stats fixed.
pub fn fighter(id: &str, attack: u32, defense: u32, hp: u32, speed: u32) -> CombatantTemplate {
    CombatantTemplate::new(id, id, BaseStats::new(hp, 10, attack, defense, 8, 2, speed))
        .with_ability("strike")
}

/// Everything the observer saw, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seen {
    Round(u32),
    Turn(CombatantId, Side),
    Effect(EffectEntry),
    Damage(CombatantId, u32),
    EnemyDefeated(CombatantId),
    Status(CombatantId, StatusId),
    Ended(Phase),
}

#[derive(Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<Seen>>>);

impl Recorder {
    pub fn seen(&self) -> Vec<Seen> {
        self.0.borrow().clone()
    }
}

impl BattleObserver for Recorder {
    fn on_effect(&mut self, entry: &EffectEntry) {
        self.0.borrow_mut().push(Seen::Effect(entry.clone()));
    }

    fn on_round_started(&mut self, round: u32) {
        self.0.borrow_mut().push(Seen::Round(round));
    }

    fn on_turn_started(&mut self, actor: CombatantId, side: Side) {
        self.0.borrow_mut().push(Seen::Turn(actor, side));
    }

    fn on_damage_dealt(&mut self, target: CombatantId, amount: u32) {
        self.0.borrow_mut().push(Seen::Damage(target, amount));
    }

    fn on_enemy_defeated(&mut self, enemy: CombatantId) {
        self.0.borrow_mut().push(Seen::EnemyDefeated(enemy));
    }

    fn on_status_applied(&mut self, target: CombatantId, status: &StatusId) {
        self.0.borrow_mut().push(Seen::Status(target, status.clone()));
    }

    fn on_combat_ended(&mut self, outcome: Phase) {
        self.0.borrow_mut().push(Seen::Ended(outcome));
    }
}
