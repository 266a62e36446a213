use crate::state::{ItemId, TemplateId};

/// A level gained by an ally while rewards were applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub member: TemplateId,
    pub new_level: u32,
}

/// Persistent character progression, owned by the caller.
///
/// The outcome calculator reports rewards through this interface once a
/// session ends in victory. Level-up rules live entirely on the implementer's
/// side.
pub trait Progression {
    /// Credit experience to a party member. Returns the new level if one was gained.
    fn grant_experience(&mut self, member: &TemplateId, amount: u32) -> Option<LevelUp>;

    /// Credit currency to the party.
    fn grant_currency(&mut self, amount: u32);

    /// Add dropped items to the party inventory.
    fn grant_item(&mut self, item: &ItemId, quantity: u32);
}
