//! Ability catalog types and oracle interface.

use crate::state::{AbilityId, ItemId, Side, StatusId};
use crate::stats::ResourceKind;

/// Broad category of an ability; drives formula choice and accuracy rules.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityCategory {
    /// Uses attack vs. defense.
    Physical,
    /// Uses magic vs. resistance.
    Magical,
    /// Consumes an inventory item; never misses.
    Item,
    /// Applies the defend guard to the user; never misses.
    Defend,
}

/// Which combatants an ability may target, relative to the user.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetShape {
    SingleEnemy,
    SingleAlly,
    AllEnemies,
    AllAllies,
    User,
}

impl TargetShape {
    /// Side this shape targets when used by a combatant on `user_side`.
    pub const fn target_side(self, user_side: Side) -> Side {
        match self {
            TargetShape::SingleEnemy | TargetShape::AllEnemies => user_side.opponent(),
            TargetShape::SingleAlly | TargetShape::AllAllies | TargetShape::User => user_side,
        }
    }

    /// Whether the caller must name exactly one target.
    pub const fn is_single(self) -> bool {
        matches!(self, TargetShape::SingleEnemy | TargetShape::SingleAlly)
    }

    pub const fn is_hostile(self) -> bool {
        matches!(self, TargetShape::SingleEnemy | TargetShape::AllEnemies)
    }
}

/// What a physical or magical ability does to each target it lands on.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityEffect {
    /// Deal formula damage.
    #[default]
    Damage,
    /// Restore HP scaled by the user's stat.
    Heal,
    /// Restore a defeated target to a share of max HP (`power` percent).
    Revive,
    /// Only apply the attached status effect.
    StatusOnly,
}

/// Resource cost paid by the user before the ability resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub resource: ResourceKind,
    pub amount: u32,
}

impl ResourceCost {
    pub const fn free() -> Self {
        Self {
            resource: ResourceKind::Mp,
            amount: 0,
        }
    }

    pub const fn mp(amount: u32) -> Self {
        Self {
            resource: ResourceKind::Mp,
            amount,
        }
    }

    pub const fn hp(amount: u32) -> Self {
        Self {
            resource: ResourceKind::Hp,
            amount,
        }
    }

    pub const fn is_free(&self) -> bool {
        self.amount == 0
    }
}

impl Default for ResourceCost {
    fn default() -> Self {
        Self::free()
    }
}

/// Static definition of a usable action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: ResourceCost,
    pub category: AbilityCategory,
    /// Power factor in percent (`100` = ×1.0).
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: u32,
    pub target: TargetShape,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: AbilityEffect,
    /// Status applied to each target the ability lands on.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<StatusId>,
    /// Item consumed by an `Item` ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: Option<ItemId>,
}

impl Ability {
    pub const DEFEND: &'static str = "defend";

    pub fn new(
        id: impl Into<AbilityId>,
        name: impl Into<String>,
        category: AbilityCategory,
        power: u32,
        target: TargetShape,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost: ResourceCost::free(),
            category,
            power,
            target,
            effect: AbilityEffect::Damage,
            status: None,
            item: None,
        }
    }

    /// The built-in defend action every combatant knows.
    pub fn defend() -> Self {
        Self {
            effect: AbilityEffect::StatusOnly,
            ..Self::new(
                Self::DEFEND,
                "Defend",
                AbilityCategory::Defend,
                0,
                TargetShape::User,
            )
        }
    }

    /// An ability that consumes `item` and applies the item's effect.
    pub fn use_item(
        id: impl Into<AbilityId>,
        name: impl Into<String>,
        item: impl Into<ItemId>,
        target: TargetShape,
    ) -> Self {
        Self {
            item: Some(item.into()),
            ..Self::new(id, name, AbilityCategory::Item, 0, target)
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: ResourceCost) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: AbilityEffect) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<StatusId>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn is_defend(&self) -> bool {
        self.category == AbilityCategory::Defend
    }

    /// Whether the ability rolls for accuracy against its targets.
    pub fn rolls_to_hit(&self) -> bool {
        matches!(
            self.category,
            AbilityCategory::Physical | AbilityCategory::Magical
        ) && self.target.is_hostile()
    }

    /// Whether the ability deals formula damage.
    pub fn deals_damage(&self) -> bool {
        self.effect == AbilityEffect::Damage
            && matches!(
                self.category,
                AbilityCategory::Physical | AbilityCategory::Magical
            )
    }
}

/// Catalog of abilities by id.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: &AbilityId) -> Option<Ability>;
}
