use greenhouse_sim::sensor_ranges::{Factor, SensorRange};
use greenhouse_sim::telemetry::Command;

/// A line typed at the simulator prompt
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Advance(f64),
    Reset,
    Status,
    Ranges,
    SetRange { factor: Factor, range: SensorRange },
    Message { topic: String, payload: String },
    Publish(Command),
    Quit,
}

pub const USAGE: &str = "commands: advance <days> | reset | status | ranges | \
                         range <factor> <ideal_min> <ideal_max> <letal_min> <letal_max> | \
                         msg <topic> <payload> | cmd <pump|led|auto> <on|off> | quit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "advance" => {
            let days = rest
                .parse::<f64>()
                .map_err(|_| format!("advance needs a number of days, got '{}'", rest))?;
            ConsoleCommand::Advance(days)
        }
        "reset" => ConsoleCommand::Reset,
        "status" => ConsoleCommand::Status,
        "ranges" => ConsoleCommand::Ranges,
        "range" => parse_range(rest)?,
        "msg" => {
            let (topic, payload) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "msg needs a topic and a payload".to_string())?;
            ConsoleCommand::Message {
                topic: topic.to_string(),
                payload: payload.trim().to_string(),
            }
        }
        "cmd" => ConsoleCommand::Publish(parse_actuator(rest)?),
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(format!("unknown command '{}'; {}", other, USAGE)),
    };

    Ok(Some(command))
}

fn parse_range(rest: &str) -> Result<ConsoleCommand, String> {
    let mut parts = rest.split_whitespace();
    let key = parts.next().unwrap_or_default();
    let factor = Factor::from_key(key).ok_or_else(|| format!("unknown factor '{}'", key))?;

    let bounds = parts
        .map(|part| part.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| "range bounds must be numbers".to_string())?;
    let [ideal_min, ideal_max, letal_min, letal_max] = bounds[..] else {
        return Err("range needs exactly four bounds".to_string());
    };

    // Ordering is checked by the session so the error names the factor
    Ok(ConsoleCommand::SetRange {
        factor,
        range: SensorRange {
            ideal_min,
            ideal_max,
            letal_min,
            letal_max,
        },
    })
}

fn parse_actuator(rest: &str) -> Result<Command, String> {
    let mut parts = rest.split_whitespace();
    let target = parts.next().unwrap_or_default().to_ascii_lowercase();
    let on = match parts.next().map(|s| s.to_ascii_lowercase()).as_deref() {
        Some("on") => true,
        Some("off") => false,
        _ => return Err("cmd needs on or off".to_string()),
    };

    match target.as_str() {
        "pump" => Ok(Command::Pump(on)),
        "led" => Ok(Command::AlertLed(on)),
        "auto" => Ok(Command::AutoIrrigation(on)),
        other => Err(format!("unknown actuator '{}'", other)),
    }
}
