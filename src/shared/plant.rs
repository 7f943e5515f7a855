use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PLANT_NAME: &str = "Crown of Thorns";
pub const DEFAULT_PLANT_TYPE: &str = "Shade";
pub const DEFAULT_MAX_HEIGHT_CM: f64 = 50.0;
pub const INITIAL_HEIGHT_CM: f64 = 0.5;
pub const MAX_HEALTH: f64 = 100.0;

const DAYS_PER_YEAR: f64 = 365.25;

// ============================================================================
// Growth stages
// ============================================================================

/// Lifecycle label derived from age, or `Dead`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seed,
    Sprout,
    Young,
    Mature,
    Flowering,
    Fruiting,
    Dead,
}

impl GrowthStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seed => "seed",
            GrowthStage::Sprout => "sprout",
            GrowthStage::Young => "young",
            GrowthStage::Mature => "mature",
            GrowthStage::Flowering => "flowering",
            GrowthStage::Fruiting => "fruiting",
            GrowthStage::Dead => "dead",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse health classification for dashboards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Thriving,
    Stressed,
    Unhealthy,
    Critical,
    Dead,
}

impl HealthBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthBand::Thriving => "thriving",
            HealthBand::Stressed => "stressed",
            HealthBand::Unhealthy => "unhealthy",
            HealthBand::Critical => "critical",
            HealthBand::Dead => "dead",
        }
    }
}

impl fmt::Display for HealthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Plant
// ============================================================================

/// The simulated organism. Mutated only by [`crate::growth_engine::step`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plant {
    pub name: String,
    pub plant_type: String,
    pub growth_stage: GrowthStage,
    pub age_days: f64,
    pub height_cm: f64,
    /// Percent, 0-100
    pub health: f64,
    /// One-way latch; a recovering environment never resurrects the plant
    pub is_dead: bool,
    pub max_height_cm: f64,
}

impl Default for Plant {
    fn default() -> Self {
        Self::new(DEFAULT_PLANT_NAME, DEFAULT_MAX_HEIGHT_CM)
    }
}

impl Plant {
    /// Fresh seed with full health. The height cap is raised to the seed
    /// height when smaller, so a living plant always fits under it.
    pub fn new(name: impl Into<String>, max_height_cm: f64) -> Self {
        Self {
            name: name.into(),
            plant_type: DEFAULT_PLANT_TYPE.to_string(),
            growth_stage: GrowthStage::Seed,
            age_days: 0.0,
            height_cm: INITIAL_HEIGHT_CM,
            health: MAX_HEALTH,
            is_dead: false,
            max_height_cm: max_height_cm.max(INITIAL_HEIGHT_CM),
        }
    }

    pub fn age_years(&self) -> f64 {
        self.age_days / DAYS_PER_YEAR
    }

    pub fn health_band(&self) -> HealthBand {
        if self.is_dead {
            HealthBand::Dead
        } else if self.health >= 75.0 {
            HealthBand::Thriving
        } else if self.health >= 50.0 {
            HealthBand::Stressed
        } else if self.health >= 25.0 {
            HealthBand::Unhealthy
        } else {
            HealthBand::Critical
        }
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] age={:.2}d height={:.1}cm health={:.1}% {}",
            self.name,
            self.growth_stage,
            self.age_days,
            self.height_cm,
            self.health,
            if self.is_dead { "dead" } else { "alive" }
        )
    }
}
