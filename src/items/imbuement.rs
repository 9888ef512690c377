//! Imbuement draw: a count from the rarity's range, then distinct picks.

use super::tables::{CountRange, LootTables};
use super::types::{Imbuement, Rarity};
use rand::Rng;
use std::collections::HashSet;

/// Draw the imbuements for an item of `rarity`.
pub fn roll_imbuements<'a, R: Rng>(tables: &'a LootTables, rarity: Rarity, rng: &mut R) -> Vec<&'a Imbuement> {
    draw_distinct(&tables.imbuements, *tables.imbuement_counts.get(rarity), rng)
}

/// Pick a count uniformly from `range`, then that many imbuements without
/// replacement. No id appears twice, even if the catalog repeats one.
/// The count is clamped to the number of distinct ids available.
pub fn draw_distinct<'a, R: Rng>(catalog: &'a [Imbuement], range: CountRange, rng: &mut R) -> Vec<&'a Imbuement> {
    let (min, max) = if range.min <= range.max {
        (range.min, range.max)
    } else {
        (range.max, range.min)
    };
    let wanted = rng.gen_range(min..=max) as usize;

    let mut seen = HashSet::new();
    let mut pool: Vec<&Imbuement> = catalog.iter().filter(|i| seen.insert(i.id.as_str())).collect();
    let count = wanted.min(pool.len());

    // Fisher-Yates partial shuffle
    for i in 0..count {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::ImbuementEffect;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog(ids: &[&str]) -> Vec<Imbuement> {
        ids.iter()
            .map(|id| Imbuement {
                id: id.to_string(),
                name: id.to_string(),
                effect: ImbuementEffect::Lifesteal(0.01),
                rarity_class: Rarity::Common,
            })
            .collect()
    }

    fn assert_distinct(picked: &[&Imbuement]) {
        let ids: HashSet<_> = picked.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), picked.len(), "duplicate imbuement in {:?}", picked);
    }

    #[test]
    fn test_never_repeats_for_any_rarity() {
        let tables = LootTables::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for rarity in Rarity::ALL {
            for _ in 0..2_000 {
                let picked = roll_imbuements(&tables, rarity, &mut rng);
                assert_distinct(&picked);
                let range = tables.imbuement_counts.get(rarity);
                assert!(picked.len() as u32 >= range.min && picked.len() as u32 <= range.max);
            }
        }
    }

    #[test]
    fn test_mythic_always_three() {
        let tables = LootTables::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            assert_eq!(roll_imbuements(&tables, Rarity::Mythic, &mut rng).len(), 3);
        }
    }

    #[test]
    fn test_count_clamped_to_catalog() {
        let small = catalog(&["a", "b"]);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let picked = draw_distinct(&small, CountRange::new(3, 3), &mut rng);
        assert_eq!(picked.len(), 2);
        assert_distinct(&picked);
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        assert!(draw_distinct(&[], CountRange::new(1, 3), &mut rng).is_empty());
    }

    #[test]
    fn test_repeated_catalog_ids_are_not_drawn_twice() {
        let repeated = catalog(&["a", "a", "a", "b"]);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..200 {
            let picked = draw_distinct(&repeated, CountRange::new(3, 3), &mut rng);
            assert_eq!(picked.len(), 2);
            assert_distinct(&picked);
        }
    }

    #[test]
    fn test_every_catalog_size_stays_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let ids = ["a", "b", "c", "d", "e"];
        for size in 0..=ids.len() {
            let cat = catalog(&ids[..size]);
            for _ in 0..200 {
                assert_distinct(&draw_distinct(&cat, CountRange::new(0, 3), &mut rng));
            }
        }
    }

    #[test]
    fn test_all_imbuements_reachable() {
        let tables = LootTables::default();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut seen = HashSet::new();
        for _ in 0..2_000 {
            for imbuement in roll_imbuements(&tables, Rarity::Legendary, &mut rng) {
                seen.insert(imbuement.id.clone());
            }
        }
        assert_eq!(seen.len(), tables.imbuements.len());
    }
}
