//! Built-in skill definitions.
//!
//! Costs are balance placeholders; the shapes (flat, linear, geometric,
//! table) are what the purchase logic relies on.

use super::types::{Capability, Coefficient, CostCurve, Skill, SkillEffect, SkillTree};

pub fn standard_skills() -> Vec<Skill> {
    vec![
        // Fortune
        Skill {
            id: "keen_eye",
            name: "Keen Eye",
            description: "You notice the good stuff in the supply closet first.",
            tree: SkillTree::Fortune,
            tier: 1,
            max_level: 5,
            min_player_level: 1,
            prerequisites: &[],
            cost: CostCurve::Linear { base: 1, step: 1 },
            effects: &[SkillEffect::PerLevel(Coefficient::RarityBonus, 0.02)],
        },
        Skill {
            id: "double_dip",
            name: "Double Dip",
            description: "Sometimes the vending machine drops two.",
            tree: SkillTree::Fortune,
            tier: 2,
            max_level: 5,
            min_player_level: 5,
            prerequisites: &["keen_eye"],
            cost: CostCurve::Linear { base: 2, step: 2 },
            effects: &[SkillEffect::PerLevel(Coefficient::DoubleChance, 0.03)],
        },
        Skill {
            id: "brand_loyalty",
            name: "Brand Loyalty",
            description: "Named gear finds its way to your desk.",
            tree: SkillTree::Fortune,
            tier: 2,
            max_level: 4,
            min_player_level: 8,
            prerequisites: &["keen_eye"],
            cost: CostCurve::Table(&[3, 4, 6, 9]),
            effects: &[SkillEffect::PerLevel(Coefficient::PrefixChance, 0.10)],
        },
        Skill {
            id: "lost_and_found",
            name: "Lost and Found",
            description: "Things nobody ordered start appearing.",
            tree: SkillTree::Fortune,
            tier: 3,
            max_level: 3,
            min_player_level: 15,
            prerequisites: &["double_dip", "brand_loyalty"],
            cost: CostCurve::Geometric { base: 5, growth: 1.6 },
            effects: &[
                SkillEffect::PerLevel(Coefficient::MultiSpawnChance, 0.04),
                SkillEffect::Unlock(Capability::AnomalyDrops),
            ],
        },
        Skill {
            id: "golden_parachute",
            name: "Golden Parachute",
            description: "Fortune favours those already at the top.",
            tree: SkillTree::Fortune,
            tier: 4,
            max_level: 3,
            min_player_level: 25,
            prerequisites: &["lost_and_found"],
            cost: CostCurve::Table(&[12, 18, 30]),
            effects: &[
                SkillEffect::Stepped(Coefficient::RarityBonus, &[0.05, 0.10, 0.20]),
                SkillEffect::PerLevel(Coefficient::ImbuementPower, 0.05),
            ],
        },
        // Productivity
        Skill {
            id: "coffee_run",
            name: "Coffee Run",
            description: "Caffeine converts directly into points.",
            tree: SkillTree::Productivity,
            tier: 1,
            max_level: 10,
            min_player_level: 1,
            prerequisites: &[],
            cost: CostCurve::Flat(1),
            effects: &[SkillEffect::PerLevel(Coefficient::PpMultiplier, 0.05)],
        },
        Skill {
            id: "ergonomic_chair",
            name: "Ergonomic Chair",
            description: "Less back pain, more work per calorie.",
            tree: SkillTree::Productivity,
            tier: 1,
            max_level: 5,
            min_player_level: 3,
            prerequisites: &[],
            cost: CostCurve::Linear { base: 1, step: 1 },
            effects: &[
                SkillEffect::PerLevel(Coefficient::EnergyEfficiency, 0.04),
                SkillEffect::PerLevel(Coefficient::EnergyCapacity, 5.0),
            ],
        },
        Skill {
            id: "power_nap",
            name: "Power Nap",
            description: "Twenty minutes under the desk.",
            tree: SkillTree::Productivity,
            tier: 2,
            max_level: 5,
            min_player_level: 6,
            prerequisites: &["ergonomic_chair"],
            cost: CostCurve::Linear { base: 2, step: 1 },
            effects: &[SkillEffect::PerLevel(Coefficient::EnergyRegen, 0.5)],
        },
        Skill {
            id: "inbox_zero",
            name: "Inbox Zero",
            description: "Paperwork files itself.",
            tree: SkillTree::Productivity,
            tier: 2,
            max_level: 1,
            min_player_level: 10,
            prerequisites: &["coffee_run"],
            cost: CostCurve::Flat(6),
            effects: &[SkillEffect::Unlock(Capability::AutoCollect)],
        },
        Skill {
            id: "work_from_home",
            name: "Work From Home",
            description: "Progress keeps trickling in while you're away.",
            tree: SkillTree::Productivity,
            tier: 3,
            max_level: 4,
            min_player_level: 14,
            prerequisites: &["power_nap", "inbox_zero"],
            cost: CostCurve::Geometric { base: 4, growth: 1.5 },
            effects: &[SkillEffect::Stepped(
                Coefficient::OfflineEfficiency,
                &[0.10, 0.25, 0.45, 0.70],
            )],
        },
        Skill {
            id: "overtime",
            name: "Overtime",
            description: "Burn energy faster for a bigger payout.",
            tree: SkillTree::Productivity,
            tier: 4,
            max_level: 1,
            min_player_level: 22,
            prerequisites: &["work_from_home"],
            cost: CostCurve::Flat(20),
            effects: &[
                SkillEffect::Unlock(Capability::OvertimeMode),
                SkillEffect::PerLevel(Coefficient::PpMultiplier, 0.25),
            ],
        },
        // Combat
        Skill {
            id: "sharpened_pencils",
            name: "Sharpened Pencils",
            description: "Every weapon hits a little harder.",
            tree: SkillTree::Combat,
            tier: 1,
            max_level: 5,
            min_player_level: 1,
            prerequisites: &[],
            cost: CostCurve::Linear { base: 1, step: 1 },
            effects: &[SkillEffect::PerLevel(Coefficient::DamageBonus, 0.05)],
        },
        Skill {
            id: "thick_cardigan",
            name: "Thick Cardigan",
            description: "The air conditioning can't hurt you now.",
            tree: SkillTree::Combat,
            tier: 1,
            max_level: 5,
            min_player_level: 1,
            prerequisites: &[],
            cost: CostCurve::Linear { base: 1, step: 1 },
            effects: &[SkillEffect::PerLevel(Coefficient::DefenseBonus, 0.05)],
        },
        Skill {
            id: "office_politics",
            name: "Office Politics",
            description: "Find the weak spot in any argument.",
            tree: SkillTree::Combat,
            tier: 2,
            max_level: 5,
            min_player_level: 7,
            prerequisites: &["sharpened_pencils"],
            cost: CostCurve::Linear { base: 2, step: 2 },
            effects: &[
                SkillEffect::PerLevel(Coefficient::CritChance, 0.02),
                SkillEffect::PerLevel(Coefficient::CritMultiplier, 0.10),
            ],
        },
        Skill {
            id: "quick_reflexes",
            name: "Quick Reflexes",
            description: "Dodge the meeting invite before it lands.",
            tree: SkillTree::Combat,
            tier: 3,
            max_level: 3,
            min_player_level: 12,
            prerequisites: &["office_politics", "thick_cardigan"],
            cost: CostCurve::Table(&[4, 7, 11]),
            effects: &[SkillEffect::Stepped(
                Coefficient::CooldownReduction,
                &[0.05, 0.10, 0.18],
            )],
        },
        // Research
        Skill {
            id: "night_classes",
            name: "Night Classes",
            description: "Learn faster from every task.",
            tree: SkillTree::Research,
            tier: 1,
            max_level: 5,
            min_player_level: 2,
            prerequisites: &[],
            cost: CostCurve::Linear { base: 1, step: 2 },
            effects: &[SkillEffect::PerLevel(Coefficient::XpMultiplier, 0.06)],
        },
        Skill {
            id: "recycling_program",
            name: "Recycling Program",
            description: "Broken gear turns back into materials.",
            tree: SkillTree::Research,
            tier: 2,
            max_level: 4,
            min_player_level: 9,
            prerequisites: &["night_classes"],
            cost: CostCurve::Linear { base: 2, step: 2 },
            effects: &[
                SkillEffect::PerLevel(Coefficient::MaterialYield, 0.08),
                SkillEffect::Unlock(Capability::AutoSalvage),
            ],
        },
        Skill {
            id: "toner_alchemy",
            name: "Toner Alchemy",
            description: "The printer has never been this fast.",
            tree: SkillTree::Research,
            tier: 2,
            max_level: 5,
            min_player_level: 9,
            prerequisites: &["night_classes"],
            cost: CostCurve::Flat(3),
            effects: &[SkillEffect::PerLevel(Coefficient::PrintSpeed, 0.10)],
        },
        Skill {
            id: "team_building",
            name: "Team Building",
            description: "Colleagues warm up to you a little faster.",
            tree: SkillTree::Research,
            tier: 3,
            max_level: 3,
            min_player_level: 16,
            prerequisites: &["toner_alchemy", "coffee_run"],
            cost: CostCurve::Geometric { base: 5, growth: 2.0 },
            effects: &[SkillEffect::PerLevel(Coefficient::ColleagueAffinity, 0.15)],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_tree_has_skills() {
        let skills = standard_skills();
        for tree in SkillTree::ALL {
            assert!(
                skills.iter().any(|s| s.tree == tree),
                "{} tree is empty",
                tree.name()
            );
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let skills = standard_skills();
        let ids: HashSet<_> = skills.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), skills.len());
    }

    #[test]
    fn test_reference_costs_are_non_decreasing() {
        for skill in standard_skills() {
            for level in 2..=skill.max_level {
                assert!(
                    skill.per_level_cost(level) >= skill.per_level_cost(level - 1),
                    "{} cost drops at level {}",
                    skill.id,
                    level
                );
            }
        }
    }

    #[test]
    fn test_effects_are_non_negative() {
        for skill in standard_skills() {
            for level in 0..=skill.max_level {
                for (field, value) in skill.per_level_effect(level).numeric_fields() {
                    assert!(value >= 0.0, "{}.{} negative at level {}", skill.id, field, level);
                }
            }
        }
    }

    #[test]
    fn test_stepped_tables_cover_max_level() {
        for skill in standard_skills() {
            for effect in skill.effects {
                if let SkillEffect::Stepped(_, values) = effect {
                    assert_eq!(values.len() as u32, skill.max_level, "{}", skill.id);
                }
            }
        }
    }
}
