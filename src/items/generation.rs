//! The loot pipeline: category, base item, rarity, prefix, imbuements, stats.
//!
//! Skill effects only reach the roll weights through [`LootRequest::with_effects`];
//! the tables themselves are never modified.

use super::composer::{compose_stats, display_name, level_scaling};
use super::imbuement::roll_imbuements;
use super::prefix::roll_prefix;
use super::rarity::roll_rarity;
use super::tables::{CategoryWeights, LootTables};
use super::types::{GeneratedItem, ItemCategory};
use crate::core::constants::{MIN_PLAYER_LEVEL, MULTI_SPAWN_MAX_EXTRA};
use crate::error::LootError;
use crate::skills::EffectBundle;
use crate::utils::choose_weighted;
use rand::Rng;
use std::borrow::Cow;
use uuid::Builder;

/// Input for one item roll.
#[derive(Debug, Clone, PartialEq)]
pub struct LootRequest {
    /// Skip the category draw.
    pub force_category: Option<ItemCategory>,
    pub player_level: u32,
    /// Weight moved from Common to higher tiers.
    pub rarity_bonus: f64,
    /// Fraction of the "none" prefix weight removed.
    pub prefix_chance: f64,
    /// Whether the category draw may pick Anomaly. A forced category ignores this.
    pub allow_anomalies: bool,
}

impl LootRequest {
    pub fn new(player_level: u32) -> Self {
        Self {
            force_category: None,
            player_level,
            rarity_bonus: 0.0,
            prefix_chance: 0.0,
            allow_anomalies: false,
        }
    }

    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.force_category = Some(category);
        self
    }

    /// Thread the loot-related fields of an effect bundle into this request.
    pub fn with_effects(mut self, effects: &EffectBundle) -> Self {
        self.rarity_bonus = effects.rarity_bonus;
        self.prefix_chance = effects.prefix_chance;
        self.allow_anomalies = effects.anomaly_drops;
        self
    }
}

impl Default for LootRequest {
    fn default() -> Self {
        Self::new(MIN_PLAYER_LEVEL)
    }
}

/// Draw a category from the weights. Anomaly only takes part when allowed.
/// Falls back to Weapon when nothing has weight.
pub fn roll_category<R: Rng>(
    weights: &CategoryWeights,
    allow_anomalies: bool,
    rng: &mut R,
) -> ItemCategory {
    let candidates: Vec<(ItemCategory, f64)> = ItemCategory::ALL
        .iter()
        .filter(|c| allow_anomalies || **c != ItemCategory::Anomaly)
        .map(|c| (*c, weights.get(*c)))
        .collect();
    choose_weighted(&candidates, rng)
        .copied()
        .unwrap_or(ItemCategory::Weapon)
}

/// Roll one complete item.
pub fn roll_item<R: Rng>(
    tables: &LootTables,
    request: &LootRequest,
    rng: &mut R,
) -> Result<GeneratedItem, LootError> {
    let category = match request.force_category {
        Some(category) => category,
        None => roll_category(&tables.category_weights, request.allow_anomalies, rng),
    };

    let bases: Vec<_> = tables.base_items_in(category).collect();
    if bases.is_empty() {
        return Err(LootError::EmptyCategory(category.name().to_string()));
    }
    let base = bases[rng.gen_range(0..bases.len())];

    let rarity_table = tables.rarity.with_rarity_bonus(request.rarity_bonus);
    let rarity = roll_rarity(&rarity_table, rng);

    let prefix_table = if request.prefix_chance > 0.0 {
        Cow::Owned(tables.prefixes.with_prefix_chance(request.prefix_chance))
    } else {
        Cow::Borrowed(&tables.prefixes)
    };
    let prefix = roll_prefix(&prefix_table, rng).cloned();

    let imbuements = roll_imbuements(tables, rarity, rng);

    let item_level = request.player_level.max(MIN_PLAYER_LEVEL);
    let stats = compose_stats(base, rarity, prefix.as_ref(), &imbuements, level_scaling(item_level));
    let display_name = display_name(base, prefix.as_ref());
    let unique_id = Builder::from_random_bytes(rng.gen()).into_uuid();

    log::debug!(
        "Rolled {} {} (ilvl {}, {} imbuements)",
        rarity.name(),
        display_name,
        item_level,
        imbuements.len()
    );

    Ok(GeneratedItem {
        unique_id,
        base_item_id: base.id.clone(),
        category,
        slot: base.slot,
        rarity,
        prefix,
        imbuements: imbuements.into_iter().cloned().collect(),
        stats,
        display_name,
        item_level,
    })
}

/// How many items one drop event yields: 1, plus one on a double roll,
/// plus up to `MULTI_SPAWN_MAX_EXTRA` on a multi-spawn roll.
pub fn roll_drop_count<R: Rng>(effects: &EffectBundle, rng: &mut R) -> u32 {
    let mut count = 1;
    if rng.gen::<f64>() < effects.double_chance {
        count += 1;
    }
    if rng.gen::<f64>() < effects.multi_spawn_chance {
        count += rng.gen_range(1..=MULTI_SPAWN_MAX_EXTRA);
    }
    count
}
