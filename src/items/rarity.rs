//! Rarity draw.

use super::tables::RarityTable;
use super::types::Rarity;
use crate::utils::pick_cumulative;
use rand::Rng;

/// Draw one rarity tier from `table`.
pub fn roll_rarity<R: Rng>(table: &RarityTable, rng: &mut R) -> Rarity {
    rarity_for_roll(table, rng.gen::<f64>())
}

/// Map a uniform draw in `[0, 1)` to a rarity.
///
/// Tiers are walked rarest first, so a draw landing exactly on a cumulative
/// boundary goes to the rarer tier. Overshooting tables are normalized; a
/// draw past the end of an undershooting table is Common.
pub fn rarity_for_roll(table: &RarityTable, roll: f64) -> Rarity {
    let table = table.normalized();
    pick_cumulative(
        Rarity::ALL.iter().rev().map(|r| (*r, table.weight(*r))),
        roll,
    )
    .unwrap_or(Rarity::Common)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_low_roll_is_rarest() {
        assert_eq!(rarity_for_roll(&RarityTable::default(), 0.0), Rarity::Mythic);
        assert_eq!(rarity_for_roll(&RarityTable::default(), 0.004), Rarity::Mythic);
    }

    #[test]
    fn test_boundary_goes_to_rarer_tier() {
        let table = RarityTable::default();
        // Mythic covers [0, 0.005], Legendary (0.005, 0.025].
        assert_eq!(rarity_for_roll(&table, 0.005), Rarity::Mythic);
        assert_eq!(rarity_for_roll(&table, 0.006), Rarity::Legendary);
    }

    #[test]
    fn test_high_roll_is_common() {
        assert_eq!(rarity_for_roll(&RarityTable::default(), 0.999), Rarity::Common);
    }

    #[test]
    fn test_undershooting_table_falls_back_to_common() {
        let mut table = RarityTable::default();
        table.weights.common = 0.0;
        // Covered weight is 0.45; anything above goes to Common.
        assert_eq!(rarity_for_roll(&table, 0.9), Rarity::Common);
        assert_eq!(rarity_for_roll(&table, 0.3), Rarity::Uncommon);
    }

    #[test]
    fn test_overshooting_table_is_normalized() {
        let mut table = RarityTable::default();
        table.weights.common = 1.55;
        // Normalized mythic weight is 0.0025.
        assert_eq!(rarity_for_roll(&table, 0.003), Rarity::Legendary);
    }

    #[test]
    fn test_zero_weight_tier_never_drops() {
        let mut table = RarityTable::default();
        table.weights.common += table.weights.mythic;
        table.weights.mythic = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20_000 {
            assert_ne!(roll_rarity(&table, &mut rng), Rarity::Mythic);
        }
    }
}
