// Declare modules at the root level
pub mod alerts;
pub mod device_state;
pub mod error;
pub mod factor_scorer;
pub mod greenhouse;
pub mod growth_engine;
pub mod plant;
pub mod ranges_file;
pub mod readings;
pub mod sensor_ranges;
pub mod telemetry;
pub mod time;

// Re-export everything under a shared namespace for external access
pub mod shared {
    pub use super::alerts;
    pub use super::device_state;
    pub use super::error;
    pub use super::factor_scorer;
    pub use super::greenhouse;
    pub use super::growth_engine;
    pub use super::plant;
    pub use super::ranges_file;
    pub use super::readings;
    pub use super::sensor_ranges;
    pub use super::telemetry;
    pub use super::time;
}

// Also re-export at root for convenience
pub use alerts::*;
pub use device_state::*;
pub use error::*;
pub use factor_scorer::*;
pub use greenhouse::*;
pub use growth_engine::*;
pub use plant::*;
pub use ranges_file::*;
pub use readings::*;
pub use sensor_ranges::*;
pub use telemetry::*;
pub use time::*;
