//! Skill purchase validation and the commit step that applies a grant.

use super::graph::SkillGraph;
use super::types::SkillLevels;
use crate::error::PurchaseRejection;
use serde::{Deserialize, Serialize};

/// Everything the validator looks at for one purchase attempt.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseRequest<'a> {
    pub purchased: &'a SkillLevels,
    pub available_points: u64,
    pub player_level: u32,
    pub skill_id: &'a str,
}

/// Authorization to raise one skill by a single level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseGrant {
    pub skill_id: String,
    pub new_level: u32,
    pub cost: u64,
}

/// State after a grant has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub levels: SkillLevels,
    pub remaining_points: u64,
}

/// Decide whether `request.skill_id` can go up one level right now.
///
/// Checks run in the order the player is told about them: max level first,
/// then player level, then prerequisites, then points. Only direct
/// prerequisites are consulted.
pub fn validate_purchase(
    graph: &SkillGraph,
    request: &PurchaseRequest<'_>,
) -> Result<PurchaseGrant, PurchaseRejection> {
    let skill = graph
        .get(request.skill_id)
        .ok_or_else(|| PurchaseRejection::UnknownSkill(request.skill_id.to_string()))?;

    let current = request.purchased.level(skill.id);
    if current >= skill.max_level {
        return Err(PurchaseRejection::AlreadyMaxed);
    }

    if request.player_level < skill.min_player_level {
        return Err(PurchaseRejection::LevelTooLow {
            required: skill.min_player_level,
            current: request.player_level,
        });
    }

    if let Some(missing) = skill
        .prerequisites
        .iter()
        .find(|p| request.purchased.level(p) == 0)
    {
        return Err(PurchaseRejection::PrerequisiteUnmet {
            prerequisite: missing.to_string(),
        });
    }

    let new_level = current + 1;
    let cost = skill.per_level_cost(new_level);
    if request.available_points < cost {
        return Err(PurchaseRejection::InsufficientPoints {
            needed: cost,
            available: request.available_points,
        });
    }

    Ok(PurchaseGrant {
        skill_id: skill.id.to_string(),
        new_level,
        cost,
    })
}

/// Apply a grant, producing the next levels map and point balance.
///
/// The inputs are left untouched so the caller can swap the whole record in
/// one step.
pub fn commit_purchase(levels: &SkillLevels, points: u64, grant: &PurchaseGrant) -> PurchaseOutcome {
    log::info!(
        "Purchased {} level {} for {} points",
        grant.skill_id,
        grant.new_level,
        grant.cost
    );
    PurchaseOutcome {
        levels: levels.with_level(&grant.skill_id, grant.new_level),
        remaining_points: points.saturating_sub(grant.cost),
    }
}

/// Validate and commit in one call.
pub fn try_purchase(
    graph: &SkillGraph,
    request: &PurchaseRequest<'_>,
) -> Result<(PurchaseGrant, PurchaseOutcome), PurchaseRejection> {
    let grant = validate_purchase(graph, request)?;
    let outcome = commit_purchase(request.purchased, request.available_points, &grant);
    Ok((grant, outcome))
}

/// Whether the next level of a skill could be bought with `points`,
/// ignoring every other condition.
pub fn can_afford(graph: &SkillGraph, levels: &SkillLevels, skill_id: &str, points: u64) -> bool {
    match graph.get(skill_id) {
        Some(skill) => {
            let current = levels.level(skill_id);
            current < skill.max_level && points >= skill.per_level_cost(current + 1)
        }
        None => false,
    }
}
