use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RangeError;

// ============================================================================
// Factors
// ============================================================================

/// Environmental factor tracked by the growth model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Temperature,
    AirHumidity,
    SoilMoisture,
    Light,
}

impl Factor {
    /// All tracked factors, in scoring order
    pub const ALL: [Factor; 4] = [
        Factor::Temperature,
        Factor::AirHumidity,
        Factor::SoilMoisture,
        Factor::Light,
    ];

    /// Stable key used in reading maps, range files and topic names
    pub fn key(&self) -> &'static str {
        match self {
            Factor::Temperature => "temperature",
            Factor::AirHumidity => "air_humidity",
            Factor::SoilMoisture => "soil_moisture",
            Factor::Light => "light",
        }
    }

    /// Inverse of [`Factor::key`]
    pub fn from_key(key: &str) -> Option<Factor> {
        Factor::ALL.into_iter().find(|factor| factor.key() == key)
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Ranges
// ============================================================================

/// Ideal and lethal bounds for one factor.
///
/// A valid range satisfies `letal_min <= ideal_min <= ideal_max <= letal_max`.
/// Construct through [`SensorRange::new`] to enforce that; the fields stay
/// public so the scorer can read them without accessors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorRange {
    pub ideal_min: f64,
    pub ideal_max: f64,
    pub letal_min: f64,
    pub letal_max: f64,
}

impl SensorRange {
    /// Build a range for `factor`, rejecting bounds out of order
    pub fn new(
        factor: Factor,
        ideal_min: f64,
        ideal_max: f64,
        letal_min: f64,
        letal_max: f64,
    ) -> Result<Self, RangeError> {
        let range = Self {
            ideal_min,
            ideal_max,
            letal_min,
            letal_max,
        };
        range.validate(factor)?;
        Ok(range)
    }

    /// Check finiteness and `letal_min <= ideal_min <= ideal_max <= letal_max`
    pub fn validate(&self, factor: Factor) -> Result<(), RangeError> {
        let bounds = [self.ideal_min, self.ideal_max, self.letal_min, self.letal_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(RangeError::NonFinite { factor });
        }

        if self.letal_min <= self.ideal_min
            && self.ideal_min <= self.ideal_max
            && self.ideal_max <= self.letal_max
        {
            Ok(())
        } else {
            Err(RangeError::InvertedBounds {
                factor,
                ideal_min: self.ideal_min,
                ideal_max: self.ideal_max,
                letal_min: self.letal_min,
                letal_max: self.letal_max,
            })
        }
    }

    /// True when `value` lies outside the lethal bounds
    pub fn is_lethal(&self, value: f64) -> bool {
        value < self.letal_min || value > self.letal_max
    }
}

/// Range configuration for all four factors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorRanges {
    temperature: SensorRange,
    air_humidity: SensorRange,
    soil_moisture: SensorRange,
    light: SensorRange,
}

impl Default for SensorRanges {
    fn default() -> Self {
        Self {
            temperature: SensorRange {
                ideal_min: 20.0,
                ideal_max: 28.0,
                letal_min: 10.0,
                letal_max: 35.0,
            },
            air_humidity: SensorRange {
                ideal_min: 60.0,
                ideal_max: 80.0,
                letal_min: 30.0,
                letal_max: 95.0,
            },
            // letal_min doubles as the auto-irrigation start point, ideal_max as the stop point
            soil_moisture: SensorRange {
                ideal_min: 400.0,
                ideal_max: 700.0,
                letal_min: 50.0,
                letal_max: 950.0,
            },
            light: SensorRange {
                ideal_min: 200.0,
                ideal_max: 500.0,
                letal_min: 50.0,
                letal_max: 800.0,
            },
        }
    }
}

impl SensorRanges {
    /// Build a full configuration, validating every factor
    pub fn new(
        temperature: SensorRange,
        air_humidity: SensorRange,
        soil_moisture: SensorRange,
        light: SensorRange,
    ) -> Result<Self, RangeError> {
        let ranges = Self {
            temperature,
            air_humidity,
            soil_moisture,
            light,
        };
        ranges.validate()?;
        Ok(ranges)
    }

    /// Range for one factor
    pub fn get(&self, factor: Factor) -> &SensorRange {
        match factor {
            Factor::Temperature => &self.temperature,
            Factor::AirHumidity => &self.air_humidity,
            Factor::SoilMoisture => &self.soil_moisture,
            Factor::Light => &self.light,
        }
    }

    fn get_mut(&mut self, factor: Factor) -> &mut SensorRange {
        match factor {
            Factor::Temperature => &mut self.temperature,
            Factor::AirHumidity => &mut self.air_humidity,
            Factor::SoilMoisture => &mut self.soil_moisture,
            Factor::Light => &mut self.light,
        }
    }

    /// Ranges in factor order
    pub fn iter(&self) -> impl Iterator<Item = (Factor, &SensorRange)> + '_ {
        Factor::ALL.into_iter().map(move |factor| (factor, self.get(factor)))
    }

    /// Check every factor; the error names the first bad one
    pub fn validate(&self) -> Result<(), RangeError> {
        self.iter().try_for_each(|(factor, range)| range.validate(factor))
    }

    /// Replace one factor's range. Leaves the configuration untouched on error.
    pub fn set(&mut self, factor: Factor, range: SensorRange) -> Result<(), RangeError> {
        range.validate(factor)?;
        *self.get_mut(factor) = range;
        Ok(())
    }

    /// Replace every factor's range at once. Nothing is committed unless all
    /// four ranges are valid.
    pub fn update(&mut self, new_ranges: SensorRanges) -> Result<(), RangeError> {
        new_ranges.validate()?;
        *self = new_ranges;
        Ok(())
    }
}
