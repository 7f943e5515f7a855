//! Integration tests for the session driven through device topics

use greenhouse_sim::{
    error_codes, parse_ranges, ranges_to_json, Alert, Command, DeviceState, Factor, FixedClock,
    Greenhouse, SensorRanges, SessionSettings, TelemetryError,
};

fn session_with_prefix(prefix: &str) -> Greenhouse {
    let settings = SessionSettings {
        plant_name: "Basil".to_string(),
        max_height_cm: 30.0,
        topic_prefix: prefix.to_string(),
        ..SessionSettings::default()
    };
    Greenhouse::new(
        settings,
        SensorRanges::default(),
        Box::new(FixedClock::from_rfc3339("2024-09-10T06:30:00Z").unwrap()),
    )
    .unwrap()
}

#[test]
fn test_custom_prefix_routes_messages() {
    let mut gh = session_with_prefix("farm/gh2/");

    gh.apply_message("farm/gh2/light", "120").unwrap();
    gh.apply_message("farm/gh2/status/wifi_connect", "connected")
        .unwrap();

    assert_eq!(gh.readings().get(Factor::Light), Some(120.0));
    assert_eq!(gh.device().wifi_status, "connected");

    let err = gh.apply_message("greenhouse/light", "120").unwrap_err();
    assert_eq!(err.code(), error_codes::UNKNOWN_TOPIC);
}

#[test]
fn test_subscriptions_cover_every_inbound_topic() {
    let gh = session_with_prefix("greenhouse");
    let topics = gh.codec().subscriptions();

    assert_eq!(topics.len(), 9);
    for topic in &topics {
        let payload = if topic.ends_with("wifi_connect") { "ok" } else { "1" };
        assert!(
            gh.codec().decode(topic, payload).is_ok(),
            "subscribed topic {} was not decodable",
            topic
        );
    }
}

#[test]
fn test_water_level_bounds() {
    let mut gh = session_with_prefix("greenhouse");

    gh.apply_message("greenhouse/water_level", "0").unwrap();
    assert_eq!(gh.device().water_level_pct, 0.0);

    match gh.apply_message("greenhouse/water_level", "140") {
        Err(TelemetryError::OutOfRange { value, min, max, .. }) => {
            assert_eq!(value, 140.0);
            assert_eq!(min, 0.0);
            assert_eq!(max, 100.0);
        }
        other => panic!("Expected OutOfRange, got {:?}", other),
    }
    assert_eq!(gh.device().water_level_pct, 0.0);
}

#[test]
fn test_switch_payloads_only_accept_exact_on() {
    let mut gh = session_with_prefix("greenhouse");

    gh.apply_message("greenhouse/alert_led", "ON").unwrap();
    assert!(gh.device().alert_led_active);

    gh.apply_message("greenhouse/alert_led", "on").unwrap();
    assert!(!gh.device().alert_led_active);

    gh.apply_message("greenhouse/pump_state", "1").unwrap();
    assert!(!gh.device().pump_active);
}

#[test]
fn test_non_numeric_reading_is_rejected() {
    let mut gh = session_with_prefix("greenhouse");
    let before = gh.readings().clone();

    for payload in ["", "warm", "NaN", "inf"] {
        let err = gh
            .apply_message("greenhouse/temperature", payload)
            .unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_PAYLOAD);
    }

    assert_eq!(gh.readings(), &before);
}

#[test]
fn test_outbound_commands_use_session_prefix() {
    let gh = session_with_prefix("farm/gh2");

    assert_eq!(
        gh.codec().encode(Command::Pump(true)),
        ("farm/gh2/control/pump".to_string(), "ON")
    );
    assert_eq!(
        gh.codec().encode(Command::AlertLed(false)),
        ("farm/gh2/control/alert_led".to_string(), "OFF")
    );
    assert_eq!(
        gh.codec().encode(Command::AutoIrrigation(true)),
        ("farm/gh2/control/auto_irrigation".to_string(), "ON")
    );
}

#[test]
fn test_auto_irrigation_without_soil_data() {
    let mut gh = session_with_prefix("greenhouse");
    gh.set_reading(Factor::SoilMoisture, None);
    gh.apply_message("greenhouse/status/auto_irrigation", "ON")
        .unwrap();

    assert_eq!(gh.alerts(), vec![Alert::NoSoilMoistureData]);

    gh.tick();

    assert!(gh.alerts().is_empty());
    assert_eq!(gh.readings().get(Factor::SoilMoisture), Some(500.0));
}

#[test]
fn test_ranges_document_applies_to_session() {
    let mut gh = session_with_prefix("greenhouse");
    let ranges =
        parse_ranges(r#"{"sensor_ranges": {"temperature": {"letal_max": 26, "ideal_max": 24}}}"#)
            .unwrap();

    gh.update_ranges(ranges).unwrap();
    gh.apply_message("greenhouse/temperature", "27").unwrap();

    assert_eq!(
        gh.alerts(),
        vec![Alert::OutOfLethalRange {
            factor: Factor::Temperature
        }]
    );

    let reparsed = parse_ranges(&ranges_to_json(gh.ranges()).unwrap()).unwrap();
    assert_eq!(&reparsed, gh.ranges());
}

#[test]
fn test_snapshot_reflects_session() {
    let mut gh = session_with_prefix("greenhouse");
    gh.apply_message("greenhouse/water_level", "35").unwrap();
    gh.advance_days(20.0).unwrap();

    let snapshot = gh.snapshot();

    assert_eq!(snapshot.plant.name, "Basil");
    assert_eq!(snapshot.plant.max_height_cm, 30.0);
    assert_eq!(snapshot.environment.mean, 1.0);
    assert_eq!(snapshot.device.water_level_pct, 35.0);
    assert!(snapshot.alerts.is_empty());
    assert_eq!(snapshot.started_at, "2024-09-10T06:30:00Z");
    assert_eq!(gh.water_history(), vec![35.0]);

    gh.reset();
    assert_eq!(gh.device(), &DeviceState::default());
}
