//! Prefix draw.

use super::tables::PrefixTable;
use super::types::Prefix;
use crate::utils::choose_weighted;
use rand::Rng;

/// Draw a prefix, or `None` when the "none" entry wins.
///
/// "None" competes with the prefixes on equal terms through its own weight.
/// A table with no positive weight at all yields `None`.
pub fn roll_prefix<'a, R: Rng>(table: &'a PrefixTable, rng: &mut R) -> Option<&'a Prefix> {
    let mut candidates: Vec<(Option<&Prefix>, f64)> = Vec::with_capacity(table.prefixes.len() + 1);
    candidates.push((None, table.none_weight));
    candidates.extend(table.prefixes.iter().map(|p| (Some(p), p.weight)));
    choose_weighted(&candidates, rng).copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::PrefixBonuses;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table(none_weight: f64, weights: &[(&str, f64)]) -> PrefixTable {
        PrefixTable {
            none_weight,
            prefixes: weights
                .iter()
                .map(|(id, weight)| Prefix {
                    id: id.to_string(),
                    name: id.to_string(),
                    weight: *weight,
                    bonuses: PrefixBonuses::default(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_only_none_weight_always_none() {
        let table = table(1.0, &[("brutal", 0.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1_000 {
            assert!(roll_prefix(&table, &mut rng).is_none());
        }
    }

    #[test]
    fn test_zero_none_weight_always_prefix() {
        let table = table(0.0, &[("brutal", 1.0), ("keen", 1.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1_000 {
            assert!(roll_prefix(&table, &mut rng).is_some());
        }
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let table = table(2.0, &[("brutal", 1.0), ("keen", 1.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let trials = 40_000;
        let mut none = 0;
        let mut brutal = 0;
        for _ in 0..trials {
            match roll_prefix(&table, &mut rng) {
                None => none += 1,
                Some(p) if p.id == "brutal" => brutal += 1,
                Some(_) => {}
            }
        }
        let none_rate = none as f64 / trials as f64;
        let brutal_rate = brutal as f64 / trials as f64;
        assert!((none_rate - 0.5).abs() < 0.02, "none rate {none_rate}");
        assert!((brutal_rate - 0.25).abs() < 0.02, "brutal rate {brutal_rate}");
    }

    #[test]
    fn test_empty_table_is_none() {
        let table = table(0.0, &[]);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(roll_prefix(&table, &mut rng).is_none());
    }
}
