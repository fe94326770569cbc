use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerPhase;

/// Every state change of the countdown produces an Event.
/// Hosts render from snapshots; the CLI prints events as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// Button pressed after the countdown reached zero.
    TimerRestarted {
        total_ms: u64,
        at: DateTime<Utc>,
    },
    Ticked {
        remaining_ms: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
    /// The tick that brought the countdown to zero. The timer stays in
    /// the running flag until the button is pressed again.
    TimerFinished {
        total_ms: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: TimerPhase,
        is_running: bool,
        remaining_ms: u64,
        total_ms: u64,
        progress: f64,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Variant name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "TimerStarted",
            Event::TimerStopped { .. } => "TimerStopped",
            Event::TimerRestarted { .. } => "TimerRestarted",
            Event::Ticked { .. } => "Ticked",
            Event::TimerFinished { .. } => "TimerFinished",
            Event::StateSnapshot { .. } => "StateSnapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::TimerStopped {
            remaining_ms: 2500,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TimerStopped");
        assert_eq!(json["remaining_ms"], 2500);
        assert_eq!(event.kind(), "TimerStopped");
    }
}
