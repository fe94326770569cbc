use serde::{Deserialize, Serialize};

use crate::dial::Color;
use crate::error::ValidationError;

/// Construction parameters for one timer view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub total_time_ms: u64,
    /// Starting fill of the dial, 0.0 ..= 1.0.
    pub initial_progress: f64,
    pub handle_color: Color,
    pub inactive_bar_color: Color,
    pub active_bar_color: Color,
    /// Bar width in host units; the marker is drawn three times as wide.
    pub stroke_width: f32,
    /// Pixels per host unit.
    pub density: f32,
}

impl TimerSettings {
    pub fn new(total_time_ms: u64) -> Self {
        Self {
            total_time_ms,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns an error if the duration is zero, the initial progress is
    /// outside 0.0 ..= 1.0, or a length is not a positive finite number.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_time_ms == 0 {
            return Err(ValidationError::invalid(
                "total_time_ms",
                "must be greater than zero",
            ));
        }
        if !(0.0..=1.0).contains(&self.initial_progress) {
            return Err(ValidationError::invalid(
                "initial_progress",
                format!("{} is outside 0.0..=1.0", self.initial_progress),
            ));
        }
        for (field, value) in [("stroke_width", self.stroke_width), ("density", self.density)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::invalid(
                    field,
                    format!("{value} must be a positive number"),
                ));
            }
        }
        Ok(())
    }

    pub fn stroke_width_px(&self) -> f32 {
        self.stroke_width * self.density
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            total_time_ms: 3000,
            initial_progress: 1.0,
            handle_color: Color::GREEN,
            inactive_bar_color: Color::DARK_GRAY,
            active_bar_color: Color::LEAF,
            stroke_width: 5.0,
            density: 1.0,
        }
    }
}
