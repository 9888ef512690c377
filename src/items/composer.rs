//! Final stat composition for a rolled item.

use super::types::{BaseItem, Imbuement, ItemStats, Prefix, Rarity};
use crate::core::constants::{LEVEL_SCALING_PER_LEVEL, MIN_PLAYER_LEVEL};

/// +25% damage and defense per player level above 1.
pub fn level_scaling(player_level: u32) -> f64 {
    1.0 + (player_level.max(MIN_PLAYER_LEVEL) - MIN_PLAYER_LEVEL) as f64 * LEVEL_SCALING_PER_LEVEL
}

/// Compose the final stats. The order matters and is fixed:
///
/// 1. base template stats
/// 2. damage/defense times level scaling, then times the rarity multiplier,
///    multiplied left to right and floored once
/// 3. prefix: relative damage/defense bonus (floored again), then flat bonuses
/// 4. imbuements, each added to its own field
pub fn compose_stats(
    base: &BaseItem,
    rarity: Rarity,
    prefix: Option<&Prefix>,
    imbuements: &[&Imbuement],
    level_scaling: f64,
) -> ItemStats {
    let mut stats = base.stats.clone();

    let multiplier = rarity.stat_multiplier();
    stats.damage = scale_level_rarity(stats.damage, level_scaling, multiplier);
    stats.defense = scale_level_rarity(stats.defense, level_scaling, multiplier);

    if let Some(prefix) = prefix {
        let bonuses = &prefix.bonuses;
        stats.damage = scale_floor(stats.damage, 1.0 + bonuses.damage_pct);
        stats.defense = scale_floor(stats.defense, 1.0 + bonuses.defense_pct);
        stats.crit_chance += bonuses.crit_chance;
        stats.crit_multiplier += bonuses.crit_multiplier;
        stats.cooldown_reduction += bonuses.cooldown_reduction;
    }

    for imbuement in imbuements {
        imbuement.effect.apply(&mut stats);
    }

    stats
}

// Folding the two factors first can land a hair under an exact integer
// (1.5 * 1.2 = 1.7999999999999998), so the value goes in first.
fn scale_level_rarity(value: u32, level_scaling: f64, multiplier: f64) -> u32 {
    (value as f64 * level_scaling * multiplier).floor() as u32
}

fn scale_floor(value: u32, factor: f64) -> u32 {
    // `as` saturates, so a negative factor floors at 0.
    (value as f64 * factor).floor() as u32
}

/// Prefix name (if any) followed by the base item's name.
pub fn display_name(base: &BaseItem, prefix: Option<&Prefix>) -> String {
    match prefix {
        Some(prefix) => format!("{} {}", prefix.name, base.name),
        None => base.name.clone(),
    }
}
