#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic level generation system.
//!
//! Every campaign level, rogue layer and the test arena is derived from a
//! handful of tuned tables. Generation is a pure function of the request:
//! asking for the same level twice yields identical configurations.

mod templates;

use neural_break_core::{
    EnemyBudget, EnemyKind, EnemyQuota, LevelConfig, LevelId, LevelSelector, TOTAL_LEVELS,
};

use crate::templates::{
    TemplateEntry, RAMP_CURVES, RAMP_NAMES, ROGUE_TEMPLATES, SURPRISE_TEMPLATES, TEST_INTERVALS,
    TEST_QUOTA,
};

/// Campaign levels divisible by this value are themed surprise levels.
pub const SURPRISE_LEVEL_PERIOD: u32 = 5;

/// Number of distinct surprise templates.
pub const SURPRISE_TEMPLATE_COUNT: usize = SURPRISE_TEMPLATES.len();

/// Number of distinct rogue themes.
pub const ROGUE_THEME_COUNT: u32 = ROGUE_TEMPLATES.len() as u32;

/// Lowest fraction of the nominal spawn interval a campaign level may use.
pub const SPAWN_SCALE_FLOOR: f64 = 0.3;

const CAMPAIGN_DIFFICULTY_STEP: f64 = 0.03;
const CAMPAIGN_SPAWN_STEP: f64 = 0.008;
const ROGUE_DIFFICULTY_STEP: f64 = 0.15;

// Absorbs representation error so products such as 20 * 2.65 floor to 53.
const QUOTA_EPSILON: f64 = 1e-9;

/// Pure system that maps level requests onto [`LevelConfig`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct LevelGenerator;

impl LevelGenerator {
    /// Creates a new level generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Produces the configuration for the requested level.
    ///
    /// Campaign requests are clamped into `1..=TOTAL_LEVELS`. The rogue
    /// selector yields the first layer; later layers are available through
    /// [`LevelGenerator::rogue_level_config`].
    #[must_use]
    pub fn level_config(&self, selector: LevelSelector) -> LevelConfig {
        match selector {
            LevelSelector::Test => self.test_level_config(),
            LevelSelector::Rogue => self.rogue_level_config(1),
            LevelSelector::Campaign(level) => self.campaign_level_config(level),
        }
    }

    /// Produces the configuration of a campaign level after clamping it into range.
    #[must_use]
    pub fn campaign_level_config(&self, level: i64) -> LevelConfig {
        let level = clamp_level(level);
        match surprise_template_index(level) {
            Some(index) => surprise_level_config(level, index),
            None => ramp_level_config(level),
        }
    }

    /// Produces the configuration of a rogue layer. Layer zero is treated as layer one.
    #[must_use]
    pub fn rogue_level_config(&self, layer: u32) -> LevelConfig {
        let layer = layer.max(1);
        let template = &ROGUE_TEMPLATES[rogue_theme(layer) as usize - 1];
        let scale = rogue_difficulty_scale(layer);
        let quota_scale = if template.scaling.scales_quotas() {
            scale
        } else {
            1.0
        };
        let interval_divisor = if template.scaling.scales_intervals() {
            scale
        } else {
            1.0
        };

        let budget = budget_from_roster(template.roster, |entry| {
            EnemyQuota::new(
                scaled_quota(entry.kills, quota_scale),
                (entry.interval / interval_divisor) as f32,
            )
        });

        LevelConfig::new(
            LevelId::Rogue { layer },
            format!("LAYER {layer} - {}", template.title),
            budget,
        )
    }

    /// Produces the constant test arena configuration.
    #[must_use]
    pub fn test_level_config(&self) -> LevelConfig {
        let mut budget = EnemyBudget::default();
        for (kind, interval) in TEST_INTERVALS {
            budget[kind] = Some(EnemyQuota::new(TEST_QUOTA, interval));
        }
        LevelConfig::new(LevelId::Test, "TEST MODE", budget)
    }

    /// Produces every campaign level in order.
    #[must_use]
    pub fn level_table(&self) -> Vec<LevelConfig> {
        (1..=TOTAL_LEVELS)
            .map(|level| self.campaign_level_config(i64::from(level)))
            .collect()
    }
}

/// Clamps an arbitrary level request into `1..=TOTAL_LEVELS`.
#[must_use]
pub fn clamp_level(level: i64) -> u32 {
    let clamped = level.clamp(1, i64::from(TOTAL_LEVELS));
    u32::try_from(clamped).unwrap_or(TOTAL_LEVELS)
}

/// Returns the surprise template index for a campaign level, if the level is a surprise level.
#[must_use]
pub fn surprise_template_index(level: u32) -> Option<usize> {
    if level == 0 || level % SURPRISE_LEVEL_PERIOD != 0 {
        return None;
    }
    Some((level / SURPRISE_LEVEL_PERIOD) as usize % SURPRISE_TEMPLATE_COUNT)
}

/// Title of the surprise template at `index`, wrapping around the template table.
#[must_use]
pub fn surprise_title(index: usize) -> &'static str {
    SURPRISE_TEMPLATES[index % SURPRISE_TEMPLATE_COUNT].title
}

/// Enemy kinds a surprise template enables, in template order.
#[must_use]
pub fn surprise_roster(index: usize) -> Vec<EnemyKind> {
    SURPRISE_TEMPLATES[index % SURPRISE_TEMPLATE_COUNT]
        .roster
        .iter()
        .map(|entry| entry.kind)
        .collect()
}

/// Campaign level at which the provided kind starts appearing on normal levels.
#[must_use]
pub fn unlock_level(kind: EnemyKind) -> u32 {
    RAMP_CURVES
        .iter()
        .find(|curve| curve.kind == kind)
        .map_or(1, |curve| curve.unlock_level)
}

/// Rogue theme (1-based) used by the provided layer.
#[must_use]
pub fn rogue_theme(layer: u32) -> u32 {
    (layer.max(1) - 1) % ROGUE_THEME_COUNT + 1
}

/// Quota multiplier of a campaign level: `1 + (level - 1) * 0.03`.
#[must_use]
pub fn difficulty_scale(level: u32) -> f64 {
    1.0 + f64::from(level.saturating_sub(1)) * CAMPAIGN_DIFFICULTY_STEP
}

/// Interval multiplier of a campaign level: `max(0.3, 1 - (level - 1) * 0.008)`.
#[must_use]
pub fn spawn_scale(level: u32) -> f64 {
    (1.0 - f64::from(level.saturating_sub(1)) * CAMPAIGN_SPAWN_STEP).max(SPAWN_SCALE_FLOOR)
}

/// Difficulty multiplier of a rogue layer: `1 + (layer - 1) * 0.15`.
#[must_use]
pub fn rogue_difficulty_scale(layer: u32) -> f64 {
    1.0 + f64::from(layer.saturating_sub(1)) * ROGUE_DIFFICULTY_STEP
}

fn surprise_level_config(level: u32, index: usize) -> LevelConfig {
    let template = &SURPRISE_TEMPLATES[index];
    let quota_scale = difficulty_scale(level);
    let interval_scale = spawn_scale(level);

    let budget = budget_from_roster(template.roster, |entry| {
        EnemyQuota::new(
            scaled_quota(entry.kills, quota_scale),
            (entry.interval * interval_scale) as f32,
        )
    });

    LevelConfig::new(
        LevelId::Campaign(level),
        format!("LEVEL {level} - {}", template.title),
        budget,
    )
}

fn ramp_level_config(level: u32) -> LevelConfig {
    let steps = f64::from(level - 1);
    let quota_scale = difficulty_scale(level);
    let interval_scale = spawn_scale(level);

    let mut budget = EnemyBudget::default();
    for curve in RAMP_CURVES
        .iter()
        .filter(|curve| level >= curve.unlock_level)
    {
        let kills = curve.kills_base + curve.kills_per_level * steps;
        let interval =
            (curve.interval_base - curve.interval_per_level * steps).max(curve.interval_floor);
        budget[curve.kind] = Some(EnemyQuota::new(
            scaled_quota(kills, quota_scale),
            (interval * interval_scale) as f32,
        ));
    }

    let name = RAMP_NAMES[(level as usize - 1) % RAMP_NAMES.len()];
    LevelConfig::new(LevelId::Campaign(level), format!("{name} {level}"), budget)
}

fn budget_from_roster(
    roster: &[TemplateEntry],
    mut quota: impl FnMut(&TemplateEntry) -> EnemyQuota,
) -> EnemyBudget {
    let mut budget = EnemyBudget::default();
    for entry in roster {
        budget[entry.kind] = Some(quota(entry));
    }
    budget
}

/// Enabled kinds always require at least one kill.
fn scaled_quota(base: f64, scale: f64) -> u32 {
    let scaled = (base * scale + QUOTA_EPSILON).floor();
    if scaled < 1.0 {
        1
    } else {
        scaled.min(f64::from(u32::MAX)) as u32
    }
}
