use serde::Serialize;
use tracing::{debug, info};

use crate::factor_scorer::score_factor;
use crate::plant::{GrowthStage, Plant, MAX_HEALTH};
use crate::readings::ReadingSet;
use crate::sensor_ranges::{Factor, SensorRanges};

/// Health change per day per unit of score away from neutral
pub const HEALTH_SENSITIVITY: f64 = 50.0;
/// Health at or below this latches death
pub const DEATH_THRESHOLD: f64 = 0.1;
/// Growth at perfect health and environment, cm/day (~49.5 cm in 120 days)
pub const BASE_GROWTH_RATE_CM_PER_DAY: f64 = 0.4125;
/// Height lost per day once dead
pub const DEAD_DECAY_CM_PER_DAY: f64 = 0.05;
/// Fraction of height kept when the plant dies
pub const DEATH_SHRINK_FACTOR: f64 = 0.9;
/// Floor for a wilting dead plant
pub const MIN_DEAD_HEIGHT_CM: f64 = 0.2;
/// Floor for a living plant
pub const MIN_ALIVE_HEIGHT_CM: f64 = 0.5;

/// Age thresholds in days, highest first. The first match wins.
pub const STAGE_THRESHOLDS: [(f64, GrowthStage); 5] = [
    (100.0, GrowthStage::Fruiting),
    (70.0, GrowthStage::Flowering),
    (40.0, GrowthStage::Mature),
    (15.0, GrowthStage::Young),
    (5.0, GrowthStage::Sprout),
];

/// Stage of a living plant of the given age
pub fn stage_for_age(age_days: f64) -> GrowthStage {
    STAGE_THRESHOLDS
        .iter()
        .find(|(threshold, _)| age_days >= *threshold)
        .map(|(_, stage)| *stage)
        .unwrap_or(GrowthStage::Seed)
}

/// Per-factor suitability scores and their mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentScore {
    pub factor_scores: [(Factor, f64); 4],
    pub mean: f64,
}

impl EnvironmentScore {
    pub fn factor(&self, factor: Factor) -> f64 {
        self.factor_scores
            .iter()
            .find(|(f, _)| *f == factor)
            .map(|(_, score)| *score)
            .unwrap_or(0.0)
    }
}

/// Score all four factors against their ranges
pub fn score_environment(readings: &ReadingSet, ranges: &SensorRanges) -> EnvironmentScore {
    let factor_scores =
        Factor::ALL.map(|factor| (factor, score_factor(readings.get(factor), ranges.get(factor))));
    let mean = factor_scores.iter().map(|(_, score)| score).sum::<f64>() / factor_scores.len() as f64;

    EnvironmentScore {
        factor_scores,
        mean,
    }
}

/// What one call to [`step`] did to the plant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepOutcome {
    /// `None` when the plant was already dead and nothing was scored
    pub environment: Option<EnvironmentScore>,
    pub health_delta: f64,
    pub height_delta: f64,
    pub stage_before: GrowthStage,
    pub stage_after: GrowthStage,
    /// True only on the step that latched death
    pub died: bool,
}

impl StepOutcome {
    pub fn stage_changed(&self) -> bool {
        self.stage_before != self.stage_after
    }
}

/// Advance `plant` by `elapsed_days` under the given readings.
///
/// Negative or NaN `elapsed_days` is treated as zero. Never fails: missing
/// readings score neutral and degenerate ranges score 0.
pub fn step(
    plant: &mut Plant,
    elapsed_days: f64,
    readings: &ReadingSet,
    ranges: &SensorRanges,
) -> StepOutcome {
    let elapsed_days = if elapsed_days > 0.0 { elapsed_days } else { 0.0 };
    let stage_before = plant.growth_stage;
    let height_before = plant.height_cm;

    if plant.is_dead {
        plant.height_cm =
            (plant.height_cm - DEAD_DECAY_CM_PER_DAY * elapsed_days).max(MIN_DEAD_HEIGHT_CM);
        return StepOutcome {
            environment: None,
            health_delta: 0.0,
            height_delta: plant.height_cm - height_before,
            stage_before,
            stage_after: plant.growth_stage,
            died: false,
        };
    }

    plant.age_days += elapsed_days;

    let environment = score_environment(readings, ranges);
    let health_before = plant.health;
    let health_change = (environment.mean - 0.5) * HEALTH_SENSITIVITY * elapsed_days;
    // A neutral environment over unbounded time is 0 * inf
    if !health_change.is_nan() {
        plant.health = (plant.health + health_change).clamp(0.0, MAX_HEALTH);
    }

    if plant.health <= DEATH_THRESHOLD {
        plant.is_dead = true;
        plant.health = 0.0;
        plant.growth_stage = GrowthStage::Dead;
        plant.height_cm = (plant.height_cm * DEATH_SHRINK_FACTOR).max(MIN_DEAD_HEIGHT_CM);

        info!(
            plant = %plant.name,
            age_days = plant.age_days,
            environment_score = environment.mean,
            "Plant died"
        );

        return StepOutcome {
            environment: Some(environment),
            health_delta: plant.health - health_before,
            height_delta: plant.height_cm - height_before,
            stage_before,
            stage_after: GrowthStage::Dead,
            died: true,
        };
    }

    let growth_rate = BASE_GROWTH_RATE_CM_PER_DAY * environment.mean * (plant.health / MAX_HEALTH);
    plant.height_cm += growth_rate * elapsed_days;
    plant.height_cm = plant.height_cm.min(plant.max_height_cm).max(MIN_ALIVE_HEIGHT_CM);

    let target = stage_for_age(plant.age_days);
    if plant.growth_stage != target {
        debug!(
            plant = %plant.name,
            from = %plant.growth_stage,
            to = %target,
            age_days = plant.age_days,
            "Growth stage changed"
        );
        plant.growth_stage = target;
    }

    StepOutcome {
        environment: Some(environment),
        health_delta: plant.health - health_before,
        height_delta: plant.height_cm - height_before,
        stage_before,
        stage_after: plant.growth_stage,
        died: false,
    }
}
