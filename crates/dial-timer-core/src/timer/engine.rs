//! Countdown state machine.
//!
//! The engine owns no thread and no clock. A driver calls `tick()` once per
//! elapsed [`TICK_MS`] while [`CountdownTimer::should_tick`] holds, and the
//! host calls `press()` when the button is pressed.
//!
//! ## Button transitions
//!
//! ```text
//! Idle --press--> Running --press--> Idle
//! Running --tick to 0--> Finished --press--> Running (full duration)
//! ```

use chrono::Utc;
use serde::Serialize;

use super::phase::TimerPhase;
use super::settings::TimerSettings;
use crate::error::ValidationError;
use crate::events::Event;

/// Length of one countdown step in milliseconds.
pub const TICK_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountdownTimer {
    total_time_ms: u64,
    remaining_ms: u64,
    is_running: bool,
}

impl CountdownTimer {
    /// Create a stopped timer with the full duration left.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_time_ms` is zero.
    pub fn new(total_time_ms: u64) -> Result<Self, ValidationError> {
        Self::from_settings(&TimerSettings::new(total_time_ms))
    }

    /// Create a stopped timer whose remaining time matches the configured
    /// initial progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings fail validation.
    pub fn from_settings(settings: &TimerSettings) -> Result<Self, ValidationError> {
        settings.validate()?;
        let total = settings.total_time_ms;
        let remaining = ((total as f64) * settings.initial_progress).round() as u64;
        Ok(Self {
            total_time_ms: total,
            remaining_ms: remaining.min(total),
            is_running: false,
        })
    }

    /// Rebuild a timer at an arbitrary point of its countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_time_ms` is zero or `remaining_ms`
    /// exceeds it.
    pub fn restore(
        total_time_ms: u64,
        remaining_ms: u64,
        is_running: bool,
    ) -> Result<Self, ValidationError> {
        let mut timer = Self::new(total_time_ms)?;
        if remaining_ms > total_time_ms {
            return Err(ValidationError::invalid(
                "remaining_ms",
                format!("{remaining_ms} exceeds total of {total_time_ms}"),
            ));
        }
        timer.remaining_ms = remaining_ms;
        timer.is_running = is_running;
        Ok(timer)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn total_time_ms(&self) -> u64 {
        self.total_time_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// 1.0 when full, 0.0 when finished.
    pub fn progress(&self) -> f64 {
        self.remaining_ms as f64 / self.total_time_ms as f64
    }

    /// Whole seconds left, truncated.
    pub fn seconds_left(&self) -> u64 {
        self.remaining_ms / 1000
    }

    pub fn phase(&self) -> TimerPhase {
        TimerPhase::of(self.is_running, self.remaining_ms)
    }

    /// Whether a tick would change anything.
    pub fn should_tick(&self) -> bool {
        self.is_running && self.remaining_ms > 0
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            is_running: self.is_running,
            remaining_ms: self.remaining_ms,
            total_ms: self.total_time_ms,
            progress: self.progress(),
            seconds_left: self.seconds_left(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Button handler: restart when finished, otherwise toggle running.
    pub fn press(&mut self) -> Event {
        let at = Utc::now();
        if self.remaining_ms == 0 {
            self.remaining_ms = self.total_time_ms;
            self.is_running = true;
            tracing::info!(total_ms = self.total_time_ms, "countdown restarted");
            return Event::TimerRestarted {
                total_ms: self.total_time_ms,
                at,
            };
        }

        self.is_running = !self.is_running;
        if self.is_running {
            tracing::info!(remaining_ms = self.remaining_ms, "countdown started");
            Event::TimerStarted {
                remaining_ms: self.remaining_ms,
                at,
            }
        } else {
            tracing::info!(remaining_ms = self.remaining_ms, "countdown stopped");
            Event::TimerStopped {
                remaining_ms: self.remaining_ms,
                at,
            }
        }
    }

    /// Apply one elapsed step. No-op unless [`should_tick`](Self::should_tick).
    ///
    /// Reaching zero does not clear the running flag.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.should_tick() {
            return None;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(TICK_MS);
        let at = Utc::now();
        tracing::debug!(remaining_ms = self.remaining_ms, "tick");

        if self.remaining_ms == 0 {
            tracing::info!(total_ms = self.total_time_ms, "countdown finished");
            return Some(Event::TimerFinished {
                total_ms: self.total_time_ms,
                at,
            });
        }
        Some(Event::Ticked {
            remaining_ms: self.remaining_ms,
            progress: self.progress(),
            at,
        })
    }
}
