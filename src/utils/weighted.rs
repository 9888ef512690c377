//! Cumulative-weight sampling shared by every weighted roll.
//!
//! Rarity, prefix and category draws all walk their candidates in a caller
//! chosen order, accumulate weights, and take the first candidate whose
//! running total meets or exceeds the draw.

use rand::Rng;

/// Pick the first candidate whose cumulative weight is `>= roll`.
///
/// Candidates with a non-positive weight are skipped, so a zero-weight entry
/// can never win a draw of exactly `0.0`. Returns `None` when the roll is
/// past the total weight (a table that sums to less than the roll range).
pub fn pick_cumulative<T, I>(candidates: I, roll: f64) -> Option<T>
where
    I: IntoIterator<Item = (T, f64)>,
{
    let mut cumulative = 0.0;
    for (candidate, weight) in candidates {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if cumulative >= roll {
            return Some(candidate);
        }
    }
    None
}

/// Sum of the positive weights in a table.
pub fn total_weight<'a, I>(weights: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    weights.into_iter().filter(|w| **w > 0.0).sum()
}

/// Draw one candidate with probability proportional to its weight.
///
/// The draw is scaled by the table's total so weights need not sum to 1.0.
/// Returns `None` only when no candidate has a positive weight.
pub fn choose_weighted<'a, T, R: Rng>(candidates: &'a [(T, f64)], rng: &mut R) -> Option<&'a T> {
    let total = total_weight(candidates.iter().map(|(_, w)| w));
    if total <= 0.0 {
        return None;
    }
    let roll = rng.gen::<f64>() * total;
    pick_cumulative(candidates.iter().map(|(c, w)| (c, *w)), roll).or_else(|| {
        // Float drift can leave the roll a hair past the running sum.
        candidates
            .iter()
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map(|(c, _)| c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pick_cumulative_boundaries() {
        let table = [("a", 0.2), ("b", 0.3), ("c", 0.5)];
        assert_eq!(pick_cumulative(table, 0.0), Some("a"));
        assert_eq!(pick_cumulative(table, 0.2), Some("a"));
        assert_eq!(pick_cumulative(table, 0.21), Some("b"));
        assert_eq!(pick_cumulative(table, 0.5), Some("b"));
        assert_eq!(pick_cumulative(table, 0.99), Some("c"));
    }

    #[test]
    fn test_pick_cumulative_skips_zero_weight() {
        let table = [("never", 0.0), ("always", 1.0)];
        assert_eq!(pick_cumulative(table, 0.0), Some("always"));
    }

    #[test]
    fn test_pick_cumulative_short_table_returns_none() {
        let table = [("a", 0.1), ("b", 0.1)];
        assert_eq!(pick_cumulative(table, 0.5), None);
    }

    #[test]
    fn test_total_weight_ignores_negatives() {
        let weights = [1.0, -2.0, 0.5];
        assert!((total_weight(&weights) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_choose_weighted_empty_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let table: [(u8, f64); 2] = [(1, 0.0), (2, 0.0)];
        assert_eq!(choose_weighted(&table, &mut rng), None);
    }

    #[test]
    fn test_choose_weighted_unnormalized_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let table = [("heavy", 3.0), ("light", 1.0)];
        let trials = 20_000;
        let heavy = (0..trials)
            .filter(|_| choose_weighted(&table, &mut rng) == Some(&"heavy"))
            .count();
        let ratio = heavy as f64 / trials as f64;
        assert!(
            (ratio - 0.75).abs() < 0.02,
            "heavy should win ~75% of draws, got {ratio}"
        );
    }
}
