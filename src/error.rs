//! Error types for the progression engine.
//!
//! Nothing in here is fatal. A `PurchaseRejection` is a declined action the
//! host shows as feedback, the other errors surface while building a skill
//! graph or loading roll tables.

use thiserror::Error;

/// Why a skill purchase was declined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseRejection {
    #[error("Skill is already at max level")]
    AlreadyMaxed,

    #[error("Not enough skill points: need {needed}, have {available}")]
    InsufficientPoints { needed: u64, available: u64 },

    #[error("Player level {current} is below the required level {required}")]
    LevelTooLow { required: u32, current: u32 },

    #[error("Prerequisite skill '{prerequisite}' has not been learned")]
    PrerequisiteUnmet { prerequisite: String },

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),
}

impl PurchaseRejection {
    /// Stable rejection code handed to the host.
    pub fn code(&self) -> &'static str {
        match self {
            PurchaseRejection::AlreadyMaxed => "ALREADY_MAXED",
            PurchaseRejection::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            PurchaseRejection::LevelTooLow { .. } => "LEVEL_TOO_LOW",
            PurchaseRejection::PrerequisiteUnmet { .. } => "PREREQUISITE_UNMET",
            PurchaseRejection::UnknownSkill(_) => "UNKNOWN_SKILL",
        }
    }
}

/// Structural problems found while building a [`SkillGraph`](crate::skills::SkillGraph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillGraphError {
    #[error("Duplicate skill id: {0}")]
    DuplicateSkill(String),

    #[error("Skill '{skill}' requires unknown skill '{prerequisite}'")]
    UnknownPrerequisite { skill: String, prerequisite: String },

    #[error("Skill '{skill}' (tier {tier}) requires '{prerequisite}' of higher tier {prerequisite_tier}")]
    PrerequisiteTierTooHigh {
        skill: String,
        tier: u8,
        prerequisite: String,
        prerequisite_tier: u8,
    },

    #[error("Skill '{0}' has a max level of zero")]
    ZeroMaxLevel(String),

    #[error("Prerequisite cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },
}

/// Failures while loading or validating [`LootTables`](crate::items::LootTables).
#[derive(Debug, Error)]
pub enum TablesError {
    #[error("Failed to read loot tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse loot tables: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Invalid loot tables: {0}")]
    Invalid(String),
}

/// A roll that could not produce an item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LootError {
    #[error("No base item defined for category {0}")]
    EmptyCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_codes() {
        assert_eq!(PurchaseRejection::AlreadyMaxed.code(), "ALREADY_MAXED");
        assert_eq!(
            PurchaseRejection::InsufficientPoints {
                needed: 5,
                available: 2
            }
            .code(),
            "INSUFFICIENT_POINTS"
        );
        assert_eq!(
            PurchaseRejection::LevelTooLow {
                required: 10,
                current: 3
            }
            .code(),
            "LEVEL_TOO_LOW"
        );
        assert_eq!(
            PurchaseRejection::PrerequisiteUnmet {
                prerequisite: "a".to_string()
            }
            .code(),
            "PREREQUISITE_UNMET"
        );
    }

    #[test]
    fn test_rejection_display_mentions_amounts() {
        let err = PurchaseRejection::InsufficientPoints {
            needed: 5,
            available: 2,
        };
        let text = err.to_string();
        assert!(text.contains('5'));
        assert!(text.contains('2'));
    }

    #[test]
    fn test_cycle_display() {
        let err = SkillGraphError::Cycle {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "Prerequisite cycle: a -> b -> a");
    }
}
