//! Simulation session: the single owner of all mutable greenhouse state.
//!
//! Every mutation goes through `&mut Greenhouse`, so the periodic tick and the
//! manual "advance N days" action cannot double-apply a step as long as the
//! caller keeps the session on one task.

use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::alerts::{derive_alerts, Alert};
use crate::device_state::{apply_device_update, DeviceState};
use crate::error::{RangeError, SimulationError, TelemetryError};
use crate::growth_engine::{score_environment, step, EnvironmentScore, StepOutcome};
use crate::plant::{HealthBand, Plant, DEFAULT_MAX_HEIGHT_CM, DEFAULT_PLANT_NAME, INITIAL_HEIGHT_CM};
use crate::readings::ReadingSet;
use crate::sensor_ranges::{Factor, SensorRange, SensorRanges};
use crate::telemetry::{TelemetryMessage, TopicCodec, DEFAULT_TOPIC_PREFIX};
use crate::time::Clock;

pub const DEFAULT_TICK_DAYS: f64 = 0.1;
pub const MAX_HEIGHT_HISTORY: usize = 150;
pub const MAX_WATER_HISTORY: usize = 10;

/// Session parameters fixed for the life of a [`Greenhouse`]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub plant_name: String,
    pub max_height_cm: f64,
    /// Simulated days per periodic tick
    pub tick_days: f64,
    pub topic_prefix: String,
}

impl SessionSettings {
    /// Reject settings the growth engine cannot honour
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.tick_days.is_finite() || self.tick_days <= 0.0 {
            return Err(SimulationError::InvalidTickDays(self.tick_days));
        }
        if !self.max_height_cm.is_finite() || self.max_height_cm < INITIAL_HEIGHT_CM {
            return Err(SimulationError::InvalidMaxHeight {
                value: self.max_height_cm,
                min: INITIAL_HEIGHT_CM,
            });
        }
        Ok(())
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            plant_name: DEFAULT_PLANT_NAME.to_string(),
            max_height_cm: DEFAULT_MAX_HEIGHT_CM,
            tick_days: DEFAULT_TICK_DAYS,
            topic_prefix: DEFAULT_TOPIC_PREFIX.to_string(),
        }
    }
}

/// Height sample taken after a step
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct HeightSample {
    pub age_days: f64,
    pub height_cm: f64,
}

/// Serializable view of the whole session
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub plant: Plant,
    pub health_band: HealthBand,
    pub age_years: f64,
    pub environment: EnvironmentScore,
    pub readings: ReadingSet,
    pub device: DeviceState,
    pub alerts: Vec<Alert>,
    pub alert_messages: Vec<&'static str>,
    pub started_at: String,
    pub last_updated_at: String,
}

pub struct Greenhouse {
    settings: SessionSettings,
    plant: Plant,
    ranges: SensorRanges,
    readings: ReadingSet,
    device: DeviceState,
    codec: TopicCodec,
    height_history: VecDeque<HeightSample>,
    water_history: VecDeque<f64>,
    clock: Box<dyn Clock>,
    started_at: String,
    last_updated_at: String,
}

impl Greenhouse {
    /// Start a session with a fresh seed. Rejects a tick size that is not a
    /// positive number of days and a max height below the seed height.
    pub fn new(
        settings: SessionSettings,
        ranges: SensorRanges,
        clock: Box<dyn Clock>,
    ) -> Result<Self, SimulationError> {
        settings.validate()?;
        let now = clock.now_rfc3339();
        Ok(Self {
            plant: Plant::new(settings.plant_name.clone(), settings.max_height_cm),
            codec: TopicCodec::new(settings.topic_prefix.clone()),
            settings,
            ranges,
            readings: ReadingSet::with_defaults(),
            device: DeviceState::default(),
            height_history: VecDeque::with_capacity(MAX_HEIGHT_HISTORY),
            water_history: VecDeque::with_capacity(MAX_WATER_HISTORY),
            clock,
            started_at: now.clone(),
            last_updated_at: now,
        })
    }

    /// The plant being simulated
    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    /// Active sensor ranges
    pub fn ranges(&self) -> &SensorRanges {
        &self.ranges
    }

    /// Latest reading per factor
    pub fn readings(&self) -> &ReadingSet {
        &self.readings
    }

    /// Last reported device state
    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    /// Topic codec for this session's prefix
    pub fn codec(&self) -> &TopicCodec {
        &self.codec
    }

    /// Settings the session was started with
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Periodic step by the configured tick size
    pub fn tick(&mut self) -> StepOutcome {
        self.run_step(self.settings.tick_days)
    }

    /// Manual advance by a user-chosen number of days
    pub fn advance_days(&mut self, days: f64) -> Result<StepOutcome, SimulationError> {
        if !days.is_finite() || days <= 0.0 {
            return Err(SimulationError::NonPositiveAdvance(days));
        }
        info!(days, plant = %self.plant.name, "Advancing simulation");
        Ok(self.run_step(days))
    }

    /// Replace the plant with a fresh seed and restore default readings,
    /// device state and histories. Ranges are kept.
    pub fn reset(&mut self) {
        self.plant = Plant::new(self.settings.plant_name.clone(), self.settings.max_height_cm);
        self.readings = ReadingSet::with_defaults();
        self.device = DeviceState::default();
        self.height_history.clear();
        self.water_history.clear();
        self.started_at = self.clock.now_rfc3339();
        self.last_updated_at = self.started_at.clone();
        info!(plant = %self.plant.name, "Plant reset");
    }

    /// Apply one device message. Rejected messages leave the session untouched.
    pub fn apply_message(&mut self, topic: &str, payload: &str) -> Result<(), TelemetryError> {
        match self.codec.decode(topic, payload)? {
            TelemetryMessage::Reading { factor, value } => {
                debug!(factor = %factor, value, "Reading updated");
                self.readings.set(factor, Some(value));
            }
            TelemetryMessage::Device(update) => {
                debug!(update = ?update, "Device state updated");
                apply_device_update(&mut self.device, update);
            }
        }
        Ok(())
    }

    /// Manual reading input; `None` marks the sensor as having no data
    pub fn set_reading(&mut self, factor: Factor, value: Option<f64>) {
        self.readings.set(factor, value);
    }

    /// Replace one factor's range; an invalid range leaves the current one
    pub fn set_range(&mut self, factor: Factor, range: SensorRange) -> Result<(), RangeError> {
        self.ranges.set(factor, range)?;
        info!(factor = %factor, "Sensor range updated");
        Ok(())
    }

    /// Replace all four ranges at once
    pub fn update_ranges(&mut self, ranges: SensorRanges) -> Result<(), RangeError> {
        self.ranges.update(ranges)?;
        info!("Sensor ranges updated");
        Ok(())
    }

    /// Alerts for the current readings, device state and plant
    pub fn alerts(&self) -> Vec<Alert> {
        derive_alerts(&self.plant, &self.readings, &self.ranges, &self.device)
    }

    /// Height history with ages re-based so the oldest kept sample is day 0
    pub fn height_history(&self) -> Vec<HeightSample> {
        let offset = self.height_history.front().map_or(0.0, |s| s.age_days);
        self.height_history
            .iter()
            .map(|sample| HeightSample {
                age_days: sample.age_days - offset,
                height_cm: sample.height_cm,
            })
            .collect()
    }

    /// Water level after each recent step, oldest first
    pub fn water_history(&self) -> Vec<f64> {
        self.water_history.iter().copied().collect()
    }

    /// Point-in-time copy of plant, readings, device state and alerts
    pub fn snapshot(&self) -> StatusSnapshot {
        let alerts = self.alerts();
        StatusSnapshot {
            plant: self.plant.clone(),
            health_band: self.plant.health_band(),
            age_years: self.plant.age_years(),
            environment: score_environment(&self.readings, &self.ranges),
            readings: self.readings.clone(),
            device: self.device.clone(),
            alert_messages: alerts.iter().map(Alert::message).collect(),
            alerts,
            started_at: self.started_at.clone(),
            last_updated_at: self.last_updated_at.clone(),
        }
    }

    fn run_step(&mut self, days: f64) -> StepOutcome {
        let outcome = step(&mut self.plant, days, &self.readings, &self.ranges);
        // Missing readings score neutral for this step, then take defaults
        let filled = self.readings.fill_missing_with_defaults();
        if !filled.is_empty() {
            debug!(factors = ?filled, "Backfilled missing readings with defaults");
        }
        self.record_history();
        self.last_updated_at = self.clock.now_rfc3339();
        outcome
    }

    fn record_history(&mut self) {
        self.height_history.push_back(HeightSample {
            age_days: self.plant.age_days,
            height_cm: self.plant.height_cm,
        });
        if self.height_history.len() > MAX_HEIGHT_HISTORY {
            self.height_history.pop_front();
        }

        self.water_history.push_back(self.device.water_level_pct);
        if self.water_history.len() > MAX_WATER_HISTORY {
            self.water_history.pop_front();
        }
    }
}
