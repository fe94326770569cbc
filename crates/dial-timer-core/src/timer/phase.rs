use serde::{Deserialize, Serialize};

use crate::dial::Color;

/// What the button offers, derived from the countdown state.
///
/// Label and color are both read from this one value so they cannot
/// disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Stopped with time left.
    Idle,
    /// Counting down.
    Running,
    /// Reached zero; the next press restarts.
    Finished,
}

impl TimerPhase {
    /// `Finished` wins whenever nothing is left, whatever the running flag says.
    pub fn of(is_running: bool, remaining_ms: u64) -> Self {
        match (is_running, remaining_ms) {
            (_, 0) => TimerPhase::Finished,
            (true, _) => TimerPhase::Running,
            (false, _) => TimerPhase::Idle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerPhase::Idle => "Start",
            TimerPhase::Running => "Stop",
            TimerPhase::Finished => "Restart",
        }
    }

    pub fn color(self) -> Color {
        match self {
            TimerPhase::Running => Color::RED,
            TimerPhase::Idle | TimerPhase::Finished => Color::GREEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_offers_green_start() {
        let phase = TimerPhase::of(false, 3000);
        assert_eq!(phase, TimerPhase::Idle);
        assert_eq!(phase.label(), "Start");
        assert_eq!(phase.color(), Color::GREEN);
    }

    #[test]
    fn running_offers_red_stop() {
        let phase = TimerPhase::of(true, 1);
        assert_eq!(phase, TimerPhase::Running);
        assert_eq!(phase.label(), "Stop");
        assert_eq!(phase.color(), Color::RED);
    }

    #[test]
    fn zero_is_finished_whether_running_or_not() {
        for running in [true, false] {
            let phase = TimerPhase::of(running, 0);
            assert_eq!(phase, TimerPhase::Finished);
            assert_eq!(phase.label(), "Restart");
            assert_eq!(phase.color(), Color::GREEN);
        }
    }
}
