//! Decoding of device telemetry and encoding of outbound actuator commands.
//!
//! Messages arrive as `(topic, payload)` pairs under a common prefix, e.g.
//! `greenhouse/temperature` with payload `23.4`. The transport that carries
//! them lives outside this crate.

use crate::device_state::DeviceStateUpdate;
use crate::error::TelemetryError;
use crate::sensor_ranges::Factor;

pub const DEFAULT_TOPIC_PREFIX: &str = "greenhouse";

const ON: &str = "ON";
const OFF: &str = "OFF";

/// A decoded device message
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryMessage {
    Reading { factor: Factor, value: f64 },
    Device(DeviceStateUpdate),
}

/// Maps topics to messages for one topic prefix
#[derive(Debug, Clone)]
pub struct TopicCodec {
    prefix: String,
}

impl Default for TopicCodec {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC_PREFIX)
    }
}

impl TopicCodec {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn topic(&self, suffix: &str) -> String {
        format!("{}/{}", self.prefix, suffix)
    }

    /// Every topic a client should subscribe to
    pub fn subscriptions(&self) -> Vec<String> {
        let mut topics: Vec<String> = Factor::ALL.iter().map(|f| self.topic(f.key())).collect();
        topics.extend(
            [
                "water_level",
                "pump_state",
                "alert_led",
                "status/wifi_connect",
                "status/auto_irrigation",
            ]
            .iter()
            .map(|suffix| self.topic(suffix)),
        );
        topics
    }

    pub fn decode(&self, topic: &str, payload: &str) -> Result<TelemetryMessage, TelemetryError> {
        let suffix = topic
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| TelemetryError::UnknownTopic(topic.to_string()))?;
        let payload = payload.trim();

        if let Some(factor) = Factor::from_key(suffix) {
            let value = parse_number(topic, payload)?;
            return Ok(TelemetryMessage::Reading { factor, value });
        }

        let update = match suffix {
            "water_level" => {
                let pct = parse_number(topic, payload)?;
                if !(0.0..=100.0).contains(&pct) {
                    return Err(TelemetryError::OutOfRange {
                        topic: topic.to_string(),
                        value: pct,
                        min: 0.0,
                        max: 100.0,
                    });
                }
                DeviceStateUpdate::WaterLevel(pct)
            }
            "pump_state" => DeviceStateUpdate::Pump(is_on(payload)),
            "alert_led" => DeviceStateUpdate::AlertLed(is_on(payload)),
            "status/auto_irrigation" => DeviceStateUpdate::AutoIrrigation(is_on(payload)),
            "status/wifi_connect" => DeviceStateUpdate::WifiStatus(payload.to_string()),
            _ => return Err(TelemetryError::UnknownTopic(topic.to_string())),
        };

        Ok(TelemetryMessage::Device(update))
    }

    pub fn encode(&self, command: Command) -> (String, &'static str) {
        let (suffix, on) = match command {
            Command::AlertLed(on) => ("control/alert_led", on),
            Command::Pump(on) => ("control/pump", on),
            Command::AutoIrrigation(on) => ("control/auto_irrigation", on),
        };
        (self.topic(suffix), if on { ON } else { OFF })
    }
}

/// Outbound actuator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AlertLed(bool),
    Pump(bool),
    AutoIrrigation(bool),
}

fn parse_number(topic: &str, payload: &str) -> Result<f64, TelemetryError> {
    payload
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TelemetryError::InvalidPayload {
            topic: topic.to_string(),
            payload: payload.to_string(),
        })
}

// Anything but an exact "ON" reads as off
fn is_on(payload: &str) -> bool {
    payload == ON
}
