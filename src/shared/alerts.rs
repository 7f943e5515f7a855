use serde::{Deserialize, Serialize};

use crate::device_state::DeviceState;
use crate::plant::Plant;
use crate::readings::ReadingSet;
use crate::sensor_ranges::{Factor, SensorRanges};

/// Condition worth surfacing to the operator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    /// A reading is outside its factor's lethal bounds
    OutOfLethalRange { factor: Factor },
    /// Auto-irrigation is on, soil is below the start point and the pump is off
    PumpShouldBeOn,
    /// Auto-irrigation is on, soil reached the stop point and the pump is still on
    PumpShouldBeOff,
    /// Auto-irrigation is on but there is no soil moisture reading
    NoSoilMoistureData,
    PlantDead,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::OutOfLethalRange {
                factor: Factor::Temperature,
            } => "Temperature out of range!",
            Alert::OutOfLethalRange {
                factor: Factor::AirHumidity,
            } => "Air humidity incorrect!",
            Alert::OutOfLethalRange {
                factor: Factor::SoilMoisture,
            } => "Soil moisture critical!",
            Alert::OutOfLethalRange {
                factor: Factor::Light,
            } => "Light level inadequate!",
            Alert::PumpShouldBeOn => "Auto irrigation: soil moisture low, pump should be ON.",
            Alert::PumpShouldBeOff => "Auto irrigation: soil moisture optimal, pump should be OFF.",
            Alert::NoSoilMoistureData => "Auto irrigation: no soil moisture data.",
            Alert::PlantDead => "Warning: the plant has died!",
        }
    }
}

/// Derive the current alert list.
///
/// A dead plant replaces every other alert with [`Alert::PlantDead`]. An
/// empty list means all is well.
pub fn derive_alerts(
    plant: &Plant,
    readings: &ReadingSet,
    ranges: &SensorRanges,
    device: &DeviceState,
) -> Vec<Alert> {
    if plant.is_dead {
        return vec![Alert::PlantDead];
    }

    let mut alerts: Vec<Alert> = Factor::ALL
        .into_iter()
        .filter(|factor| {
            readings
                .get(*factor)
                .is_some_and(|value| ranges.get(*factor).is_lethal(value))
        })
        .map(|factor| Alert::OutOfLethalRange { factor })
        .collect();

    if device.auto_irrigation_enabled {
        let soil = ranges.get(Factor::SoilMoisture);
        match readings.get(Factor::SoilMoisture) {
            Some(moisture) if moisture < soil.letal_min && !device.pump_active => {
                alerts.push(Alert::PumpShouldBeOn)
            }
            Some(moisture) if moisture >= soil.ideal_max && device.pump_active => {
                alerts.push(Alert::PumpShouldBeOff)
            }
            Some(_) => {}
            None => alerts.push(Alert::NoSoilMoistureData),
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(temp: f64, air: f64, soil: f64, light: f64) -> ReadingSet {
        let mut readings = ReadingSet::new();
        readings.set(Factor::Temperature, Some(temp));
        readings.set(Factor::AirHumidity, Some(air));
        readings.set(Factor::SoilMoisture, Some(soil));
        readings.set(Factor::Light, Some(light));
        readings
    }

    #[test]
    fn test_no_alerts_in_tolerable_conditions() {
        let alerts = derive_alerts(
            &Plant::default(),
            &readings(25.0, 60.0, 500.0, 500.0),
            &SensorRanges::default(),
            &DeviceState::default(),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_lethal_readings_raise_one_alert_each() {
        let alerts = derive_alerts(
            &Plant::default(),
            &readings(40.0, 20.0, 500.0, 900.0),
            &SensorRanges::default(),
            &DeviceState::default(),
        );

        assert_eq!(
            alerts,
            vec![
                Alert::OutOfLethalRange {
                    factor: Factor::Temperature
                },
                Alert::OutOfLethalRange {
                    factor: Factor::AirHumidity
                },
                Alert::OutOfLethalRange {
                    factor: Factor::Light
                },
            ]
        );
    }

    #[test]
    fn test_missing_readings_do_not_alert() {
        let alerts = derive_alerts(
            &Plant::default(),
            &ReadingSet::new(),
            &SensorRanges::default(),
            &DeviceState::default(),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_dead_plant_overrides_everything() {
        let mut plant = Plant::default();
        plant.is_dead = true;

        let alerts = derive_alerts(
            &plant,
            &readings(40.0, 20.0, 0.0, 900.0),
            &SensorRanges::default(),
            &DeviceState::default(),
        );

        assert_eq!(alerts, vec![Alert::PlantDead]);
    }

    #[test]
    fn test_auto_irrigation_dry_soil_pump_off() {
        let device = DeviceState {
            auto_irrigation_enabled: true,
            ..DeviceState::default()
        };

        let alerts = derive_alerts(
            &Plant::default(),
            &readings(25.0, 60.0, 30.0, 300.0),
            &SensorRanges::default(),
            &device,
        );

        assert_eq!(
            alerts,
            vec![
                Alert::OutOfLethalRange {
                    factor: Factor::SoilMoisture
                },
                Alert::PumpShouldBeOn,
            ]
        );
    }

    #[test]
    fn test_auto_irrigation_wet_soil_pump_on() {
        let device = DeviceState {
            auto_irrigation_enabled: true,
            pump_active: true,
            ..DeviceState::default()
        };

        let alerts = derive_alerts(
            &Plant::default(),
            &readings(25.0, 60.0, 700.0, 300.0),
            &SensorRanges::default(),
            &device,
        );

        assert_eq!(alerts, vec![Alert::PumpShouldBeOff]);
    }

    #[test]
    fn test_auto_irrigation_without_soil_reading() {
        let device = DeviceState {
            auto_irrigation_enabled: true,
            ..DeviceState::default()
        };

        let alerts = derive_alerts(
            &Plant::default(),
            &ReadingSet::new(),
            &SensorRanges::default(),
            &device,
        );

        assert_eq!(alerts, vec![Alert::NoSoilMoistureData]);
    }

    #[test]
    fn test_alert_messages_are_distinct() {
        let all = [
            Alert::OutOfLethalRange {
                factor: Factor::Temperature,
            },
            Alert::OutOfLethalRange {
                factor: Factor::AirHumidity,
            },
            Alert::OutOfLethalRange {
                factor: Factor::SoilMoisture,
            },
            Alert::OutOfLethalRange {
                factor: Factor::Light,
            },
            Alert::PumpShouldBeOn,
            Alert::PumpShouldBeOff,
            Alert::NoSoilMoistureData,
            Alert::PlantDead,
        ];
        let mut messages: Vec<_> = all.iter().map(|a| a.message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), all.len());
    }
}
