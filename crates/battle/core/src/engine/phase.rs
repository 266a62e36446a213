/// Combat state machine phases.
///
/// ```text
/// SETUP → ROUND_START → AWAITING_ACTION ⇄ RESOLVING
///              ↑               │              │
///              └── queue empty ┘              └→ VICTORY | DEFEAT | FLED
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Phase {
    Setup,
    RoundStart,
    AwaitingAction,
    Resolving,
    Victory,
    Defeat,
    Fled,
}

impl Phase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }
}
