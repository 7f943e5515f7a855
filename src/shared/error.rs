use thiserror::Error;

use crate::sensor_ranges::Factor;

/// Stable machine-readable error codes, one per error variant
pub mod error_codes {
    // Range configuration errors
    pub const INVERTED_BOUNDS: &str = "INVERTED_BOUNDS";
    pub const NON_FINITE_BOUND: &str = "NON_FINITE_BOUND";

    // Telemetry errors
    pub const UNKNOWN_TOPIC: &str = "UNKNOWN_TOPIC";
    pub const INVALID_PAYLOAD: &str = "INVALID_PAYLOAD";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";

    // Simulation errors
    pub const NON_POSITIVE_ADVANCE: &str = "NON_POSITIVE_ADVANCE";
    pub const INVALID_TICK_DAYS: &str = "INVALID_TICK_DAYS";
    pub const INVALID_MAX_HEIGHT: &str = "INVALID_MAX_HEIGHT";

    // Configuration errors
    pub const INVALID_ENV_VAR: &str = "INVALID_ENV_VAR";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const INVALID_RANGES: &str = "INVALID_RANGES";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
}

/// Range configuration violates `letal_min <= ideal_min <= ideal_max <= letal_max`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error(
        "invalid range for {factor}: expected letal_min <= ideal_min <= ideal_max <= letal_max, \
         got {letal_min} <= {ideal_min} <= {ideal_max} <= {letal_max}"
    )]
    InvertedBounds {
        factor: Factor,
        ideal_min: f64,
        ideal_max: f64,
        letal_min: f64,
        letal_max: f64,
    },

    #[error("range bounds for {factor} must be finite numbers")]
    NonFinite { factor: Factor },
}

impl RangeError {
    pub fn code(&self) -> &'static str {
        match self {
            RangeError::InvertedBounds { .. } => error_codes::INVERTED_BOUNDS,
            RangeError::NonFinite { .. } => error_codes::NON_FINITE_BOUND,
        }
    }

    pub fn factor(&self) -> Factor {
        match self {
            RangeError::InvertedBounds { factor, .. } | RangeError::NonFinite { factor } => *factor,
        }
    }
}

/// Errors decoding a device message
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("invalid payload '{payload}' on topic {topic}")]
    InvalidPayload { topic: String, payload: String },

    #[error("value {value} on topic {topic} is outside {min}..={max}")]
    OutOfRange {
        topic: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl TelemetryError {
    pub fn code(&self) -> &'static str {
        match self {
            TelemetryError::UnknownTopic(_) => error_codes::UNKNOWN_TOPIC,
            TelemetryError::InvalidPayload { .. } => error_codes::INVALID_PAYLOAD,
            TelemetryError::OutOfRange { .. } => error_codes::OUT_OF_RANGE,
        }
    }
}

/// Errors from session-level simulation requests
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("days to advance must be a positive number, got {0}")]
    NonPositiveAdvance(f64),

    #[error("tick size must be a positive number of days, got {0}")]
    InvalidTickDays(f64),

    #[error("max height must be a finite value of at least {min} cm, got {value}")]
    InvalidMaxHeight { value: f64, min: f64 },
}

impl SimulationError {
    pub fn code(&self) -> &'static str {
        match self {
            SimulationError::NonPositiveAdvance(_) => error_codes::NON_POSITIVE_ADVANCE,
            SimulationError::InvalidTickDays(_) => error_codes::INVALID_TICK_DAYS,
            SimulationError::InvalidMaxHeight { .. } => error_codes::INVALID_MAX_HEIGHT,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar { name: String, value: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sensor ranges: {0}")]
    InvalidRanges(#[from] RangeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidEnvVar { .. } => error_codes::INVALID_ENV_VAR,
            ConfigError::Io { .. } => error_codes::IO_ERROR,
            ConfigError::InvalidRanges(_) => error_codes::INVALID_RANGES,
            ConfigError::Serialization(_) => error_codes::SERIALIZATION_ERROR,
        }
    }
}
