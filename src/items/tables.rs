//! Tunable roll tables and their RON loader.
//!
//! Loads from an external RON file, with fallback to the built-in catalog.

use super::catalog;
use super::types::{BaseItem, Imbuement, ItemCategory, Prefix, Rarity};
use crate::core::constants::{
    MAX_IMBUEMENTS_PER_ITEM, MIN_COMMON_WEIGHT, PREFIX_CHANCE_CAP, RARITY_BONUS_CAP,
    RARITY_BONUS_SPREAD, WEIGHT_SUM_TOLERANCE,
};
use crate::error::TablesError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One value per rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerRarity<T> {
    pub common: T,
    pub uncommon: T,
    pub rare: T,
    pub epic: T,
    pub legendary: T,
    pub mythic: T,
}

impl<T> PerRarity<T> {
    pub fn get(&self, rarity: Rarity) -> &T {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
            Rarity::Epic => &self.epic,
            Rarity::Legendary => &self.legendary,
            Rarity::Mythic => &self.mythic,
        }
    }

    pub fn get_mut(&mut self, rarity: Rarity) -> &mut T {
        match rarity {
            Rarity::Common => &mut self.common,
            Rarity::Uncommon => &mut self.uncommon,
            Rarity::Rare => &mut self.rare,
            Rarity::Epic => &mut self.epic,
            Rarity::Legendary => &mut self.legendary,
            Rarity::Mythic => &mut self.mythic,
        }
    }
}

/// Drop-rate weight of each rarity. Expected to sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RarityTable {
    pub weights: PerRarity<f64>,
}

impl Default for RarityTable {
    fn default() -> Self {
        Self {
            weights: PerRarity {
                common: 0.55,
                uncommon: 0.25,
                rare: 0.12,
                epic: 0.055,
                legendary: 0.02,
                mythic: 0.005,
            },
        }
    }
}

impl RarityTable {
    pub fn weight(&self, rarity: Rarity) -> f64 {
        *self.weights.get(rarity)
    }

    /// Sum of the positive weights.
    pub fn total(&self) -> f64 {
        crate::utils::total_weight(Rarity::ALL.iter().map(|r| self.weights.get(*r)))
    }

    pub fn is_calibrated(&self) -> bool {
        (self.total() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Scaled down to sum to 1.0 when the weights overshoot.
    ///
    /// A table that sums to less than 1.0 is returned as is; the resolver
    /// sends the uncovered part of the draw to Common.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 1.0 + WEIGHT_SUM_TOLERANCE {
            return *self;
        }
        let mut table = *self;
        for rarity in Rarity::ALL {
            *table.weights.get_mut(rarity) /= total;
        }
        table
    }

    /// Move up to `bonus` weight out of Common and spread it over the higher
    /// tiers. The bonus is capped and Common never drops below its floor, so
    /// the total weight is unchanged.
    pub fn with_rarity_bonus(&self, bonus: f64) -> Self {
        let bonus = if bonus.is_finite() {
            bonus.clamp(0.0, RARITY_BONUS_CAP)
        } else {
            0.0
        };
        let mut table = *self;
        let moved = (table.weights.common - MIN_COMMON_WEIGHT).clamp(0.0, bonus);
        if moved <= 0.0 {
            return table;
        }
        table.weights.common -= moved;
        for (rarity, share) in Rarity::ALL[1..].iter().zip(RARITY_BONUS_SPREAD) {
            *table.weights.get_mut(*rarity) += moved * share;
        }
        table
    }
}

/// Prefix candidates plus the explicit weight of rolling none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefixTable {
    pub none_weight: f64,
    pub prefixes: Vec<Prefix>,
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self {
            none_weight: catalog::NO_PREFIX_WEIGHT,
            prefixes: catalog::prefixes(),
        }
    }
}

impl PrefixTable {
    /// Shrink the "none" weight by `chance` (capped), making a prefix likelier.
    pub fn with_prefix_chance(&self, chance: f64) -> Self {
        let chance = if chance.is_finite() {
            chance.clamp(0.0, PREFIX_CHANCE_CAP)
        } else {
            0.0
        };
        Self {
            none_weight: self.none_weight * (1.0 - chance),
            prefixes: self.prefixes.clone(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Prefix> {
        self.prefixes.iter().find(|p| p.id == id)
    }
}

/// Inclusive range of how many imbuements an item of a rarity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub weapon: f64,
    pub armor: f64,
    pub anomaly: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            weapon: 0.45,
            armor: 0.45,
            anomaly: 0.10,
        }
    }
}

impl CategoryWeights {
    pub fn get(&self, category: ItemCategory) -> f64 {
        match category {
            ItemCategory::Weapon => self.weapon,
            ItemCategory::Armor => self.armor,
            ItemCategory::Anomaly => self.anomaly,
        }
    }
}

/// Every table the loot pipeline reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTables {
    pub rarity: RarityTable,
    pub prefixes: PrefixTable,
    pub imbuements: Vec<Imbuement>,
    pub imbuement_counts: PerRarity<CountRange>,
    pub base_items: Vec<BaseItem>,
    #[serde(default)]
    pub category_weights: CategoryWeights,
}

impl Default for LootTables {
    fn default() -> Self {
        Self {
            rarity: RarityTable::default(),
            prefixes: PrefixTable::default(),
            imbuements: catalog::imbuements(),
            imbuement_counts: PerRarity {
                common: CountRange::new(0, 1),
                uncommon: CountRange::new(0, 1),
                rare: CountRange::new(1, 2),
                epic: CountRange::new(1, 2),
                legendary: CountRange::new(2, 3),
                mythic: CountRange::new(3, 3),
            },
            base_items: catalog::base_items(),
            category_weights: CategoryWeights::default(),
        }
    }
}

impl LootTables {
    /// Parse and validate a RON document.
    pub fn from_ron_str(content: &str) -> Result<Self, TablesError> {
        let tables: LootTables = ron::from_str(content)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load tables from a RON file.
    pub fn load(path: &Path) -> Result<Self, TablesError> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Load tables from a RON file, falling back to the built-in tables.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{} ({}). Using built-in loot tables.", e, path.display());
            Self::default()
        })
    }

    /// Reject tables the roller cannot use. A rarity table that does not sum
    /// to 1.0 is only reported; rolls normalize it or fall back to Common.
    pub fn validate(&self) -> Result<(), TablesError> {
        for rarity in Rarity::ALL {
            check_weight(&format!("rarity {}", rarity.name()), self.rarity.weight(rarity))?;

            let range = self.imbuement_counts.get(rarity);
            if range.min > range.max {
                return Err(TablesError::Invalid(format!(
                    "imbuement count for {} has min {} above max {}",
                    rarity.name(),
                    range.min,
                    range.max
                )));
            }
            if range.max > MAX_IMBUEMENTS_PER_ITEM {
                return Err(TablesError::Invalid(format!(
                    "imbuement count for {} exceeds {}",
                    rarity.name(),
                    MAX_IMBUEMENTS_PER_ITEM
                )));
            }
        }
        if !self.rarity.is_calibrated() {
            log::warn!(
                "Rarity weights sum to {:.6}, not 1.0; drop rates will differ from the table",
                self.rarity.total()
            );
        }

        check_weight("no-prefix", self.prefixes.none_weight)?;
        for prefix in &self.prefixes.prefixes {
            check_weight(&format!("prefix {}", prefix.id), prefix.weight)?;
        }

        for category in ItemCategory::ALL {
            let weight = self.category_weights.get(category);
            check_weight(&format!("category {}", category.name()), weight)?;
            if weight > 0.0 && self.base_items_in(category).next().is_none() {
                return Err(TablesError::Invalid(format!(
                    "category {} has weight {} but no base items",
                    category.name(),
                    weight
                )));
            }
        }
        for item in &self.base_items {
            if item.category == ItemCategory::Armor && item.slot.is_none() {
                return Err(TablesError::Invalid(format!("armor '{}' has no slot", item.id)));
            }
        }
        Ok(())
    }

    pub fn base_items_in(&self, category: ItemCategory) -> impl Iterator<Item = &BaseItem> {
        self.base_items.iter().filter(move |b| b.category == category)
    }

    pub fn base_item(&self, id: &str) -> Option<&BaseItem> {
        self.base_items.iter().find(|b| b.id == id)
    }
}

fn check_weight(label: &str, weight: f64) -> Result<(), TablesError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(TablesError::Invalid(format!("{} weight {} is not a finite non-negative number", label, weight)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        let tables = LootTables::default();
        assert!(tables.validate().is_ok());
        assert!(tables.rarity.is_calibrated());
    }

    #[test]
    fn test_shipped_ron_matches_defaults() {
        let tables = LootTables::from_ron_str(include_str!("../../data/loot_tables.ron")).unwrap();
        assert_eq!(tables, LootTables::default());
    }

    #[test]
    fn test_ron_round_trip_of_defaults() {
        let ron_text = ron::to_string(&LootTables::default()).unwrap();
        let parsed = LootTables::from_ron_str(&ron_text).unwrap();
        assert_eq!(parsed, LootTables::default());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut tables = LootTables::default();
        tables.imbuement_counts.rare = CountRange::new(2, 1);
        assert!(matches!(tables.validate(), Err(TablesError::Invalid(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut tables = LootTables::default();
        tables.prefixes.none_weight = -1.0;
        assert!(matches!(tables.validate(), Err(TablesError::Invalid(_))));
    }

    #[test]
    fn test_weighted_category_without_items_rejected() {
        let mut tables = LootTables::default();
        tables.base_items.retain(|b| b.category != ItemCategory::Anomaly);
        assert!(tables.validate().is_err());
        tables.category_weights.anomaly = 0.0;
        assert!(tables.validate().is_ok());
    }

    #[test]
    fn test_miscalibrated_rarity_is_not_an_error() {
        let mut tables = LootTables::default();
        tables.rarity.weights.common = 0.9;
        assert!(tables.validate().is_ok());
        assert!(!tables.rarity.is_calibrated());
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(
            LootTables::from_ron_str("(rarity: oops"),
            Err(TablesError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tables = LootTables::load_or_default(Path::new("definitely/not/here.ron"));
        assert_eq!(tables, LootTables::default());
    }

    #[test]
    fn test_normalized_scales_overshoot_only() {
        let mut heavy = RarityTable::default();
        heavy.weights.common = 1.55;
        let normalized = heavy.normalized();
        assert!((normalized.total() - 1.0).abs() < 1e-9);

        let mut light = RarityTable::default();
        light.weights.common = 0.30;
        assert_eq!(light.normalized(), light);
    }

    #[test]
    fn test_rarity_bonus_preserves_total() {
        let table = RarityTable::default().with_rarity_bonus(0.2);
        assert!((table.total() - 1.0).abs() < 1e-9);
        assert!((table.weights.common - 0.35).abs() < 1e-9);
        assert!(table.weights.mythic > RarityTable::default().weights.mythic);
    }

    #[test]
    fn test_rarity_bonus_is_capped_and_floored() {
        let table = RarityTable::default().with_rarity_bonus(10.0);
        assert!((table.weights.common - (0.55 - RARITY_BONUS_CAP)).abs() < 1e-9);

        let mut thin = RarityTable::default();
        thin.weights.common = 0.12;
        thin.weights.uncommon = 0.68;
        let shifted = thin.with_rarity_bonus(0.3);
        assert!((shifted.weights.common - MIN_COMMON_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rarity_bonus_is_identity() {
        assert_eq!(RarityTable::default().with_rarity_bonus(0.0), RarityTable::default());
        assert_eq!(RarityTable::default().with_rarity_bonus(-1.0), RarityTable::default());
    }

    #[test]
    fn test_prefix_chance_shrinks_none_weight() {
        let table = PrefixTable::default();
        let boosted = table.with_prefix_chance(0.5);
        assert!((boosted.none_weight - table.none_weight * 0.5).abs() < 1e-9);
        let capped = table.with_prefix_chance(5.0);
        assert!((capped.none_weight - table.none_weight * (1.0 - PREFIX_CHANCE_CAP)).abs() < 1e-9);
        assert_eq!(boosted.prefixes, table.prefixes);
    }
}
