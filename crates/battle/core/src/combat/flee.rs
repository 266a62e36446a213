use crate::config::BattleConfig;

/// Chance for a side to escape, from the average speeds of both sides.
///
/// ```text
/// flee_chance = flee_base_chance * own_avg_speed / max(1, other_avg_speed)
/// clamped to [flee_min_chance, flee_max_chance]
/// ```
pub fn calculate_flee_chance(own_speed: u32, other_speed: u32, config: &BattleConfig) -> u32 {
    let chance =
        u64::from(config.flee_base_chance) * u64::from(own_speed) / u64::from(other_speed.max(1));

    chance.clamp(
        u64::from(config.flee_min_chance),
        u64::from(config.flee_max_chance),
    ) as u32
}
