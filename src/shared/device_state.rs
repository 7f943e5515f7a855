use serde::{Deserialize, Serialize};

pub const DEFAULT_WIFI_STATUS: &str = "unknown";
pub const FULL_TANK_PCT: f64 = 100.0;

/// Actuator and connectivity state last reported by the greenhouse device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceState {
    pub water_level_pct: f64,
    pub pump_active: bool,
    pub alert_led_active: bool,
    pub auto_irrigation_enabled: bool,
    pub wifi_status: String,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            water_level_pct: FULL_TANK_PCT,
            pump_active: false,
            alert_led_active: false,
            auto_irrigation_enabled: false,
            wifi_status: DEFAULT_WIFI_STATUS.to_string(),
        }
    }
}

/// One change to the device state, as decoded from a status topic
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceStateUpdate {
    WaterLevel(f64),
    Pump(bool),
    AlertLed(bool),
    AutoIrrigation(bool),
    WifiStatus(String),
}

pub fn apply_device_update(state: &mut DeviceState, update: DeviceStateUpdate) {
    match update {
        DeviceStateUpdate::WaterLevel(pct) => state.water_level_pct = pct,
        DeviceStateUpdate::Pump(active) => state.pump_active = active,
        DeviceStateUpdate::AlertLed(active) => state.alert_led_active = active,
        DeviceStateUpdate::AutoIrrigation(enabled) => state.auto_irrigation_enabled = enabled,
        DeviceStateUpdate::WifiStatus(status) => state.wifi_status = status,
    }
}
