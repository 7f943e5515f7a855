use chrono::{DateTime, SecondsFormat, Utc};

/// Source of wall-clock time for session timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time as RFC3339 with a `Z` suffix, e.g. "2024-01-15T10:30:00Z"
    fn now_rfc3339(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Production clock backed by system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a chosen instant, for deterministic tests
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: DateTime<Utc>,
}

impl FixedClock {
    pub fn from_rfc3339(timestamp: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            timestamp: DateTime::parse_from_rfc3339(timestamp)?.with_timezone(&Utc),
        })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
