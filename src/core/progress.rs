//! Host-owned player progress: one immutable snapshot per action.
//!
//! Every action builds a new [`PlayerProgress`] from the current one. A
//! [`ProgressStore`] swaps the whole snapshot under a single lock, so readers
//! see either the state before an action or after it, never a mix.

use super::constants::{MIN_PLAYER_LEVEL, SKILL_POINTS_PER_LEVEL};
use crate::error::PurchaseRejection;
use crate::items::GeneratedItem;
use crate::skills::{
    aggregate_effects, try_purchase, EffectBundle, PurchaseGrant, PurchaseRequest, SkillGraph,
    SkillLevels,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// An owned item plus the one mutable bit the inventory tracks for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: Arc<GeneratedItem>,
    pub equipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub player_level: u32,
    pub skill_points: u64,
    pub skills: SkillLevels,
    pub inventory: Vec<InventoryEntry>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self {
            player_level: MIN_PLAYER_LEVEL,
            skill_points: 0,
            skills: SkillLevels::new(),
            inventory: Vec::new(),
        }
    }

    /// Effect bundle for the current skill levels. Computed on every call.
    pub fn effects(&self, graph: &SkillGraph) -> EffectBundle {
        aggregate_effects(graph, &self.skills)
    }

    /// One level up, with its skill points.
    pub fn level_up(&self) -> Self {
        Self {
            player_level: self.player_level.saturating_add(1),
            skill_points: self.skill_points.saturating_add(SKILL_POINTS_PER_LEVEL),
            ..self.clone()
        }
    }

    /// Buy the next level of a skill, returning the new snapshot and the grant.
    pub fn purchase_skill(
        &self,
        graph: &SkillGraph,
        skill_id: &str,
    ) -> Result<(Self, PurchaseGrant), PurchaseRejection> {
        let request = PurchaseRequest {
            purchased: &self.skills,
            available_points: self.skill_points,
            player_level: self.player_level,
            skill_id,
        };
        let (grant, outcome) = try_purchase(graph, &request)?;
        let next = Self {
            skills: outcome.levels,
            skill_points: outcome.remaining_points,
            ..self.clone()
        };
        Ok((next, grant))
    }

    pub fn with_item(&self, item: GeneratedItem) -> Self {
        let mut next = self.clone();
        next.inventory.push(InventoryEntry {
            item: Arc::new(item),
            equipped: false,
        });
        next
    }

    /// Equip an item, unequipping whatever shares its category and slot.
    /// `None` if the item is not in the inventory.
    pub fn equip(&self, unique_id: Uuid) -> Option<Self> {
        let target = self.inventory.iter().find(|e| e.item.unique_id == unique_id)?;
        let (category, slot) = (target.item.category, target.item.slot);

        let mut next = self.clone();
        for entry in &mut next.inventory {
            if entry.item.unique_id == unique_id {
                entry.equipped = true;
            } else if entry.item.category == category && entry.item.slot == slot {
                entry.equipped = false;
            }
        }
        Some(next)
    }

    pub fn equipped(&self) -> impl Iterator<Item = &GeneratedItem> {
        self.inventory.iter().filter(|e| e.equipped).map(|e| e.item.as_ref())
    }
}

/// Shared, swap-on-write holder for the current snapshot.
#[derive(Debug, Default)]
pub struct ProgressStore {
    current: RwLock<Arc<PlayerProgress>>,
}

impl ProgressStore {
    pub fn new(progress: PlayerProgress) -> Self {
        Self {
            current: RwLock::new(Arc::new(progress)),
        }
    }

    /// The current snapshot. Later writes do not affect it.
    pub fn snapshot(&self) -> Arc<PlayerProgress> {
        Arc::clone(&self.current.read())
    }

    pub fn replace(&self, progress: PlayerProgress) {
        *self.current.write() = Arc::new(progress);
    }

    /// Run one action against the current snapshot and install its result.
    ///
    /// The write lock is held for the whole action, so two actions never
    /// build on the same snapshot. On error nothing changes.
    pub fn apply<T, E>(
        &self,
        action: impl FnOnce(&PlayerProgress) -> Result<(PlayerProgress, T), E>,
    ) -> Result<T, E> {
        let mut current = self.current.write();
        let (next, value) = action(&current)?;
        *current = Arc::new(next);
        Ok(value)
    }

    pub fn purchase_skill(
        &self,
        graph: &SkillGraph,
        skill_id: &str,
    ) -> Result<PurchaseGrant, PurchaseRejection> {
        self.apply(|progress| progress.purchase_skill(graph, skill_id))
    }

    pub fn level_up(&self) {
        let mut current = self.current.write();
        *current = Arc::new(current.level_up());
    }

    pub fn add_item(&self, item: GeneratedItem) {
        let mut current = self.current.write();
        *current = Arc::new(current.with_item(item));
    }

    /// Equip an item by id. Returns `false` if it is not owned.
    pub fn equip(&self, unique_id: Uuid) -> bool {
        let mut current = self.current.write();
        match current.equip(unique_id) {
            Some(next) => {
                *current = Arc::new(next);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{roll_item, ItemCategory, LootRequest, LootTables};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn item(category: ItemCategory, seed: u64) -> GeneratedItem {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let request = LootRequest::new(1).with_category(category);
        roll_item(&LootTables::default(), &request, &mut rng).unwrap()
    }

    #[test]
    fn test_level_up_awards_points() {
        let progress = PlayerProgress::new().level_up().level_up();
        assert_eq!(progress.player_level, 3);
        assert_eq!(progress.skill_points, 2 * SKILL_POINTS_PER_LEVEL);
    }

    #[test]
    fn test_purchase_returns_new_snapshot() {
        let graph = SkillGraph::standard();
        let before = PlayerProgress::new().level_up();
        let (after, grant) = before.purchase_skill(&graph, "keen_eye").unwrap();
        assert_eq!(grant.new_level, 1);
        assert_eq!(after.skills.level("keen_eye"), 1);
        assert_eq!(after.skill_points, before.skill_points - grant.cost);
        assert_eq!(before.skills.level("keen_eye"), 0);
    }

    #[test]
    fn test_effects_follow_purchases() {
        let graph = SkillGraph::standard();
        let start = PlayerProgress::new().level_up();
        assert_eq!(start.effects(&graph), EffectBundle::default());
        let (after, _) = start.purchase_skill(&graph, "keen_eye").unwrap();
        assert!(after.effects(&graph).rarity_bonus > 0.0);
    }

    #[test]
    fn test_equip_swaps_same_slot_only() {
        let weapon_a = item(ItemCategory::Weapon, 1);
        let weapon_b = item(ItemCategory::Weapon, 2);
        let anomaly = item(ItemCategory::Anomaly, 3);
        let (a, b, c) = (weapon_a.unique_id, weapon_b.unique_id, anomaly.unique_id);

        let progress = PlayerProgress::new()
            .with_item(weapon_a)
            .with_item(weapon_b)
            .with_item(anomaly);
        let progress = progress.equip(a).unwrap().equip(c).unwrap().equip(b).unwrap();

        let equipped: Vec<Uuid> = progress.equipped().map(|i| i.unique_id).collect();
        assert!(equipped.contains(&b));
        assert!(equipped.contains(&c));
        assert!(!equipped.contains(&a));
    }

    #[test]
    fn test_equip_unknown_item() {
        assert!(PlayerProgress::new().equip(Uuid::nil()).is_none());
    }

    #[test]
    fn test_store_rejection_leaves_state() {
        let graph = SkillGraph::standard();
        let store = ProgressStore::new(PlayerProgress::new());
        let before = store.snapshot();
        let err = store.purchase_skill(&graph, "keen_eye").unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_POINTS");
        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn test_store_snapshot_is_stable_across_writes() {
        let store = ProgressStore::default();
        let old = store.snapshot();
        store.level_up();
        assert_eq!(old.player_level, 1);
        assert_eq!(store.snapshot().player_level, 2);
    }

    #[test]
    fn test_store_add_and_equip() {
        let store = ProgressStore::default();
        let weapon = item(ItemCategory::Weapon, 4);
        let id = weapon.unique_id;
        store.add_item(weapon);
        assert!(store.equip(id));
        assert!(!store.equip(Uuid::nil()));
        assert_eq!(store.snapshot().equipped().count(), 1);
    }

    #[test]
    fn test_progress_serializes() {
        let progress = PlayerProgress::new().with_item(item(ItemCategory::Armor, 5));
        let json = serde_json::to_string(&progress).unwrap();
        let back: PlayerProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back.inventory.len(), 1);
        assert_eq!(back.inventory[0].item.unique_id, progress.inventory[0].item.unique_id);
        assert_eq!(back.skills, progress.skills);
    }
}
