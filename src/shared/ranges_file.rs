use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::sensor_ranges::{Factor, SensorRange, SensorRanges};

/// On-disk shape: `{"sensor_ranges": {"temperature": {"ideal_min": 20, ...}, ...}}`
#[derive(Debug, Default, Deserialize)]
struct RangesFile {
    #[serde(default)]
    sensor_ranges: HashMap<String, PartialRange>,
}

#[derive(Serialize)]
struct RangesFileRef<'a> {
    sensor_ranges: &'a SensorRanges,
}

/// Range with every bound optional, for field-wise overrides
#[derive(Debug, Default, Deserialize)]
struct PartialRange {
    ideal_min: Option<f64>,
    ideal_max: Option<f64>,
    letal_min: Option<f64>,
    letal_max: Option<f64>,
}

impl PartialRange {
    fn merge_into(&self, base: SensorRange) -> SensorRange {
        SensorRange {
            ideal_min: self.ideal_min.unwrap_or(base.ideal_min),
            ideal_max: self.ideal_max.unwrap_or(base.ideal_max),
            letal_min: self.letal_min.unwrap_or(base.letal_min),
            letal_max: self.letal_max.unwrap_or(base.letal_max),
        }
    }
}

/// Parse a ranges document and merge it over the defaults.
///
/// Unknown factor keys are ignored. The merged configuration must validate.
pub fn parse_ranges(json: &str) -> Result<SensorRanges, ConfigError> {
    let file: RangesFile = serde_json::from_str(json)?;
    let mut ranges = SensorRanges::default();

    for (key, partial) in &file.sensor_ranges {
        match Factor::from_key(key) {
            Some(factor) => {
                let merged = partial.merge_into(*ranges.get(factor));
                ranges.set(factor, merged)?;
            }
            None => warn!(key = %key, "Ignoring unknown factor in ranges file"),
        }
    }

    Ok(ranges)
}

/// Load ranges from `path`.
///
/// A missing file yields the defaults. A file that is not valid JSON is
/// logged and also yields the defaults. Valid JSON describing invalid ranges
/// is an error.
pub fn load_ranges(path: &Path) -> Result<SensorRanges, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "No ranges file, using defaults");
            return Ok(SensorRanges::default());
        }
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    match parse_ranges(&contents) {
        Ok(ranges) => {
            info!(path = %path.display(), "Loaded sensor ranges");
            Ok(ranges)
        }
        Err(ConfigError::Serialization(e)) => {
            warn!(path = %path.display(), error = %e, "Could not decode ranges file, using defaults");
            Ok(SensorRanges::default())
        }
        Err(e) => Err(e),
    }
}

pub fn ranges_to_json(ranges: &SensorRanges) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(&RangesFileRef {
        sensor_ranges: ranges,
    })?)
}

/// Write all four ranges to `path`, validating first
pub fn save_ranges(path: &Path, ranges: &SensorRanges) -> Result<(), ConfigError> {
    ranges.validate()?;
    let json = ranges_to_json(ranges)?;
    std::fs::write(path, json).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    info!(path = %path.display(), "Saved sensor ranges");
    Ok(())
}
