//! Shared proptest strategies for greenhouse domain types

#![allow(dead_code)]

use greenhouse_sim::plant::{GrowthStage, Plant};
use greenhouse_sim::readings::ReadingSet;
use greenhouse_sim::sensor_ranges::{Factor, SensorRange, SensorRanges};
use proptest::prelude::*;

/// Generate an ordered range: letal_min <= ideal_min <= ideal_max <= letal_max.
/// Gaps may be zero to cover degenerate bands.
pub fn sensor_range() -> impl Strategy<Value = SensorRange> {
    (
        -100.0f64..1000.0,
        prop_oneof![Just(0.0), 0.0f64..200.0],
        prop_oneof![Just(0.0), 0.0f64..200.0],
        prop_oneof![Just(0.0), 0.0f64..200.0],
    )
        .prop_map(|(letal_min, low_gap, ideal_width, high_gap)| {
            let ideal_min = letal_min + low_gap;
            let ideal_max = ideal_min + ideal_width;
            SensorRange {
                ideal_min,
                ideal_max,
                letal_min,
                letal_max: ideal_max + high_gap,
            }
        })
}

/// Generate a range whose ideal and lethal bounds are strictly separated
pub fn strict_sensor_range() -> impl Strategy<Value = SensorRange> {
    (-100.0f64..1000.0, 1.0f64..200.0, 1.0f64..200.0, 1.0f64..200.0).prop_map(
        |(letal_min, low_gap, ideal_width, high_gap)| {
            let ideal_min = letal_min + low_gap;
            let ideal_max = ideal_min + ideal_width;
            SensorRange {
                ideal_min,
                ideal_max,
                letal_min,
                letal_max: ideal_max + high_gap,
            }
        },
    )
}

/// Generate a full, valid range configuration
pub fn sensor_ranges() -> impl Strategy<Value = SensorRanges> {
    (sensor_range(), sensor_range(), sensor_range(), sensor_range()).prop_map(
        |(temperature, air_humidity, soil_moisture, light)| {
            SensorRanges::new(temperature, air_humidity, soil_moisture, light)
                .expect("generated ranges are ordered")
        },
    )
}

/// Generate any reading, including missing and non-finite values
pub fn reading() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        3 => prop::option::of(-2000.0f64..3000.0),
        1 => Just(Some(f64::NAN)),
        1 => Just(Some(f64::INFINITY)),
        1 => Just(Some(f64::NEG_INFINITY)),
    ]
}

/// Generate a reading set over the four factors
pub fn reading_set() -> impl Strategy<Value = ReadingSet> {
    (reading(), reading(), reading(), reading()).prop_map(|(temp, air, soil, light)| {
        let mut readings = ReadingSet::new();
        readings.set(Factor::Temperature, temp);
        readings.set(Factor::AirHumidity, air);
        readings.set(Factor::SoilMoisture, soil);
        readings.set(Factor::Light, light);
        readings
    })
}

/// Generate a living plant in a state reachable by the growth engine
pub fn living_plant() -> impl Strategy<Value = Plant> {
    (0.0f64..200.0, 0.5f64..50.0, 0.2f64..=100.0, 0.5f64..200.0).prop_map(
        |(age_days, height_cm, health, extra_height)| {
            let mut plant = Plant::new("Generated", 50.0 + extra_height);
            plant.age_days = age_days;
            plant.height_cm = height_cm;
            plant.health = health;
            plant.growth_stage = greenhouse_sim::growth_engine::stage_for_age(age_days);
            plant
        },
    )
}

/// Generate a dead plant
pub fn dead_plant() -> impl Strategy<Value = Plant> {
    (0.0f64..200.0, 0.2f64..50.0).prop_map(|(age_days, height_cm)| {
        let mut plant = Plant::default();
        plant.age_days = age_days;
        plant.height_cm = height_cm;
        plant.health = 0.0;
        plant.is_dead = true;
        plant.growth_stage = GrowthStage::Dead;
        plant
    })
}

/// Generate an elapsed-time delta in days, including an unbounded one
pub fn elapsed_days() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(0.1), Just(f64::INFINITY), 0.0f64..200.0]
}
