use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::sensor_ranges::Factor;

/// Value substituted for a factor that has no reading yet
pub fn default_reading(factor: Factor) -> f64 {
    match factor {
        Factor::Temperature => 25.0,
        Factor::AirHumidity => 60.0,
        Factor::SoilMoisture => 500.0,
        Factor::Light => 500.0,
    }
}

/// Latest reading per sensor name. A missing key and a `None` value both mean
/// "no data".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ReadingSet {
    values: HashMap<String, Option<f64>>,
}

impl ReadingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reading set holding the default value for every factor
    pub fn with_defaults() -> Self {
        let mut readings = Self::new();
        readings.fill_missing_with_defaults();
        readings
    }

    /// Latest value, or `None` when the factor has no data
    pub fn get(&self, factor: Factor) -> Option<f64> {
        self.get_by_key(factor.key())
    }

    pub fn get_by_key(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied().flatten()
    }

    /// Record a value; `None` marks the factor as having no data
    pub fn set(&mut self, factor: Factor, value: Option<f64>) {
        self.values.insert(factor.key().to_string(), value);
    }

    /// Backfill every factor without data with its default reading.
    /// Returns the factors that were filled.
    pub fn fill_missing_with_defaults(&mut self) -> Vec<Factor> {
        let mut filled = Vec::new();
        for factor in Factor::ALL {
            if self.get(factor).is_none() {
                self.set(factor, Some(default_reading(factor)));
                filled.push(factor);
            }
        }
        filled
    }
}
