// Level scaling: 1 + (player_level - 1) * LEVEL_SCALING_PER_LEVEL
pub const LEVEL_SCALING_PER_LEVEL: f64 = 0.25;
pub const MIN_PLAYER_LEVEL: u32 = 1;

// Rarity bias from skills: weight moved out of Common, capped
pub const RARITY_BONUS_CAP: f64 = 0.35;
pub const MIN_COMMON_WEIGHT: f64 = 0.10;
// Share of the moved weight each tier above Common receives (Uncommon..Mythic)
pub const RARITY_BONUS_SPREAD: [f64; 5] = [0.40, 0.30, 0.17, 0.09, 0.04];

// Tolerance before a rarity table is reported as miscalibrated
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// Prefix bias from skills: fraction of the "none" weight removed, capped
pub const PREFIX_CHANCE_CAP: f64 = 0.80;

// Drop count: one base drop, +1 on a double roll, +1..=MULTI_SPAWN_MAX_EXTRA on a multi-spawn roll
pub const MULTI_SPAWN_MAX_EXTRA: u32 = 2;

// Skill points awarded per player level (simulator and host default)
pub const SKILL_POINTS_PER_LEVEL: u64 = 3;

// Hard ceiling on imbuements per item
pub const MAX_IMBUEMENTS_PER_ITEM: u32 = 3;
