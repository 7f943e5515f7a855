// Greenhouse simulator binary entry point

mod config;
mod console;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

use config::Config;
use console::{parse_line, ConsoleCommand, USAGE};
use greenhouse_sim::{load_ranges, ranges_to_json, save_ranges, Alert, Greenhouse, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let ranges = load_ranges(&config.ranges_file).context("Failed to load sensor ranges")?;

    info!(
        plant = %config.session.plant_name,
        tick_days = config.session.tick_days,
        tick_interval_ms = config.tick_interval.as_millis() as u64,
        ranges_file = %config.ranges_file.display(),
        "Greenhouse simulator starting"
    );

    let mut greenhouse = Greenhouse::new(
        config.session.clone(),
        ranges,
        Box::new(SystemClock::new()),
    )
    .context("Invalid session settings")?;
    info!(topics = ?greenhouse.codec().subscriptions(), "Expected device topics");
    println!("{}", USAGE);

    run(&mut greenhouse, &config).await;

    info!(plant = %greenhouse.plant(), "Greenhouse simulator stopped");
    Ok(())
}

/// Single task owning the session; ticks, console input and shutdown are
/// multiplexed here so steps never overlap.
async fn run(greenhouse: &mut Greenhouse, config: &Config) {
    let mut interval = tokio::time::interval(config.tick_interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_alerts: Vec<Alert> = Vec::new();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let outcome = greenhouse.tick();
                if outcome.died {
                    warn!(plant = %greenhouse.plant().name, "Plant died");
                }
                debug!(plant = %greenhouse.plant(), band = %greenhouse.plant().health_band(), "Tick");
                report_alert_changes(greenhouse, &mut last_alerts);
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        if !handle_line(greenhouse, config, &line) {
                            break;
                        }
                        report_alert_changes(greenhouse, &mut last_alerts);
                    }
                    Ok(None) => {
                        info!("Console closed, running until interrupted");
                        stdin_open = false;
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read console input");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, shutting down");
                break;
            }
        }
    }
}

/// Returns false when the user asked to quit
fn handle_line(greenhouse: &mut Greenhouse, config: &Config, line: &str) -> bool {
    let command = match parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return true,
        Err(message) => {
            println!("{}", message);
            return true;
        }
    };

    match command {
        ConsoleCommand::Advance(days) => match greenhouse.advance_days(days) {
            Ok(outcome) => {
                println!("{}", greenhouse.plant());
                if outcome.stage_changed() {
                    println!("stage: {} -> {}", outcome.stage_before, outcome.stage_after);
                }
            }
            Err(e) => println!("{}", e),
        },
        ConsoleCommand::Reset => {
            greenhouse.reset();
            println!("{}", greenhouse.plant());
        }
        ConsoleCommand::Status => match serde_json::to_string_pretty(&greenhouse.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "Failed to serialize status"),
        },
        ConsoleCommand::Ranges => match ranges_to_json(greenhouse.ranges()) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "Failed to serialize ranges"),
        },
        ConsoleCommand::SetRange { factor, range } => {
            match greenhouse.set_range(factor, range) {
                Ok(()) => {
                    if let Err(e) = save_ranges(&config.ranges_file, greenhouse.ranges()) {
                        error!(error = %e, code = e.code(), "Failed to save sensor ranges");
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        ConsoleCommand::Message { topic, payload } => {
            if let Err(e) = greenhouse.apply_message(&topic, &payload) {
                warn!(topic = %topic, code = e.code(), error = %e, "Dropped device message");
            }
        }
        ConsoleCommand::Publish(command) => {
            let (topic, payload) = greenhouse.codec().encode(command);
            info!(topic = %topic, payload, "Outbound command");
            println!("{} {}", topic, payload);
        }
        ConsoleCommand::Quit => return false,
    }

    true
}

fn report_alert_changes(greenhouse: &Greenhouse, last_alerts: &mut Vec<Alert>) {
    let alerts = greenhouse.alerts();
    if alerts == *last_alerts {
        return;
    }

    if alerts.is_empty() {
        info!("Status: all good in the greenhouse");
    } else {
        let messages: Vec<&str> = alerts.iter().map(Alert::message).collect();
        warn!(alerts = ?messages, "Greenhouse problems");
    }
    *last_alerts = alerts;
}
