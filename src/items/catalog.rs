//! Built-in base items, prefixes and imbuements.

use super::types::{
    ArmorSlot, BaseItem, Imbuement, ImbuementEffect, ItemCategory, ItemStats, Prefix,
    PrefixBonuses, Rarity,
};

fn weapon(id: &str, name: &str, damage: u32, crit_chance: f64, crit_multiplier: f64, flavor: &str) -> BaseItem {
    BaseItem {
        id: id.to_string(),
        name: name.to_string(),
        category: ItemCategory::Weapon,
        slot: None,
        stats: ItemStats {
            damage,
            crit_chance,
            crit_multiplier,
            ..ItemStats::default()
        },
        flavor: flavor.to_string(),
    }
}

fn armor(id: &str, name: &str, slot: ArmorSlot, defense: u32, flavor: &str) -> BaseItem {
    BaseItem {
        id: id.to_string(),
        name: name.to_string(),
        category: ItemCategory::Armor,
        slot: Some(slot),
        stats: ItemStats {
            defense,
            ..ItemStats::default()
        },
        flavor: flavor.to_string(),
    }
}

fn anomaly(id: &str, name: &str, damage: u32, defense: u32, flavor: &str) -> BaseItem {
    BaseItem {
        id: id.to_string(),
        name: name.to_string(),
        category: ItemCategory::Anomaly,
        slot: None,
        stats: ItemStats {
            damage,
            defense,
            crit_chance: 0.02,
            ..ItemStats::default()
        },
        flavor: flavor.to_string(),
    }
}

pub fn base_items() -> Vec<BaseItem> {
    vec![
        weapon("stapler", "Stapler", 8, 0.05, 1.5, "Heavy-duty. Jams at the worst moment."),
        weapon("letter_opener", "Letter Opener", 6, 0.10, 1.75, "Sharper than it needs to be."),
        weapon("hole_punch", "Hole Punch", 11, 0.02, 1.5, "Three holes, one purpose."),
        weapon("tape_gun", "Tape Gun", 9, 0.04, 1.6, "Screeches on every swing."),
        weapon("laser_pointer", "Laser Pointer", 5, 0.15, 2.0, "Do not point at the projector."),
        armor("headset", "Headset", ArmorSlot::Head, 3, "Noise-cancelling, mostly."),
        armor("cardigan", "Cardigan", ArmorSlot::Body, 6, "Knitted by someone in accounting."),
        armor("fingerless_gloves", "Fingerless Gloves", ArmorSlot::Hands, 2, "For typing in a cold office."),
        armor("orthopedic_loafers", "Orthopedic Loafers", ArmorSlot::Feet, 3, "Sensible above all."),
        anomaly("haunted_printer", "Haunted Printer", 5, 5, "PC LOAD LETTER, forever."),
        anomaly("humming_mug", "Humming Mug", 3, 7, "The coffee never cools."),
        anomaly("glitched_badge", "Glitched Badge", 7, 2, "Opens doors that are not there."),
    ]
}

fn prefix(id: &str, name: &str, weight: f64, bonuses: PrefixBonuses) -> Prefix {
    Prefix {
        id: id.to_string(),
        name: name.to_string(),
        weight,
        bonuses,
    }
}

/// Weight of rolling no prefix at all, on the same scale as [`prefixes`].
pub const NO_PREFIX_WEIGHT: f64 = 45.0;

pub fn prefixes() -> Vec<Prefix> {
    vec![
        prefix(
            "brutal",
            "Brutal",
            12.0,
            PrefixBonuses {
                damage_pct: 0.25,
                ..PrefixBonuses::default()
            },
        ),
        prefix(
            "sturdy",
            "Sturdy",
            12.0,
            PrefixBonuses {
                defense_pct: 0.25,
                ..PrefixBonuses::default()
            },
        ),
        prefix(
            "keen",
            "Keen",
            10.0,
            PrefixBonuses {
                crit_chance: 0.05,
                ..PrefixBonuses::default()
            },
        ),
        prefix(
            "swift",
            "Swift",
            8.0,
            PrefixBonuses {
                cooldown_reduction: 0.08,
                ..PrefixBonuses::default()
            },
        ),
        prefix(
            "vicious",
            "Vicious",
            6.0,
            PrefixBonuses {
                damage_pct: 0.15,
                crit_multiplier: 0.25,
                ..PrefixBonuses::default()
            },
        ),
        prefix(
            "reinforced",
            "Reinforced",
            5.0,
            PrefixBonuses {
                defense_pct: 0.40,
                ..PrefixBonuses::default()
            },
        ),
        prefix(
            "masterwork",
            "Masterwork",
            2.0,
            PrefixBonuses {
                damage_pct: 0.35,
                defense_pct: 0.35,
                crit_chance: 0.03,
                ..PrefixBonuses::default()
            },
        ),
    ]
}

fn imbuement(id: &str, name: &str, effect: ImbuementEffect, rarity_class: Rarity) -> Imbuement {
    Imbuement {
        id: id.to_string(),
        name: name.to_string(),
        effect,
        rarity_class,
    }
}

pub fn imbuements() -> Vec<Imbuement> {
    vec![
        imbuement("leeching", "Leeching", ImbuementEffect::Lifesteal(0.05), Rarity::Uncommon),
        imbuement("caustic", "Caustic", ImbuementEffect::DamageOverTime(3.0), Rarity::Uncommon),
        imbuement("static", "Static", ImbuementEffect::StunChance(0.06), Rarity::Rare),
        imbuement(
            "volatile",
            "Volatile",
            ImbuementEffect::Explosive {
                chance: 0.08,
                magnitude: 0.5,
            },
            Rarity::Epic,
        ),
        imbuement("caffeinated", "Caffeinated", ImbuementEffect::ResourceRegen(0.10), Rarity::Common),
        imbuement("lucky", "Lucky", ImbuementEffect::LootRarity(0.03), Rarity::Rare),
        imbuement("synergistic", "Synergistic", ImbuementEffect::AllStats(0.05), Rarity::Legendary),
        imbuement("padded", "Padded", ImbuementEffect::DamageAbsorption(0.07), Rarity::Uncommon),
        imbuement("vampiric", "Vampiric", ImbuementEffect::Lifesteal(0.10), Rarity::Mythic),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_has_base_items() {
        let items = base_items();
        for category in ItemCategory::ALL {
            assert!(items.iter().any(|b| b.category == category), "{}", category.name());
        }
    }

    #[test]
    fn test_only_armor_has_slots() {
        for item in base_items() {
            assert_eq!(item.slot.is_some(), item.category == ItemCategory::Armor, "{}", item.id);
        }
    }

    #[test]
    fn test_ids_unique() {
        let items = base_items();
        let ids: HashSet<_> = items.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());

        let imbues = imbuements();
        let ids: HashSet<_> = imbues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), imbues.len());

        let pre = prefixes();
        let ids: HashSet<_> = pre.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), pre.len());
    }

    #[test]
    fn test_catalog_covers_mythic_count() {
        // Mythic items always carry three distinct imbuements.
        assert!(imbuements().len() >= 3);
    }

    #[test]
    fn test_brutal_prefix() {
        let brutal = prefixes().into_iter().find(|p| p.id == "brutal").unwrap();
        assert_eq!(brutal.bonuses.damage_pct, 0.25);
    }
}
