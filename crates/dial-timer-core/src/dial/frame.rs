//! Per-frame drawing parameters.
//!
//! A [`Frame`] carries numbers and colors only; the surface that receives
//! it owns the actual arc, point and text primitives.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::geometry::{self, Point, Size, START_ANGLE_DEG, SWEEP_ANGLE_DEG};
use crate::timer::{CountdownTimer, TimerPhase, TimerSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    Butt,
    Round,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcDescriptor {
    pub color: Color,
    pub start_angle_deg: f32,
    pub sweep_angle_deg: f32,
    pub use_center: bool,
    /// Square bounding region the arc is inscribed in.
    pub bounds: Size,
    pub stroke_width_px: f32,
    pub cap: StrokeCap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDescriptor {
    pub position: Point,
    pub color: Color,
    pub stroke_width_px: f32,
    pub cap: StrokeCap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDescriptor {
    pub text: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonDescriptor {
    pub phase: TimerPhase,
    pub label: String,
    pub background: Color,
    pub text_color: Color,
}

/// Everything the rendering surface needs for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub inactive_arc: ArcDescriptor,
    pub active_arc: ArcDescriptor,
    pub marker: PointDescriptor,
    pub time: TextDescriptor,
    pub button: ButtonDescriptor,
}

impl Frame {
    pub fn build(timer: &CountdownTimer, settings: &TimerSettings, size: Size) -> Self {
        let progress = timer.progress();
        let stroke = settings.stroke_width_px();
        let arc = |color, sweep| ArcDescriptor {
            color,
            start_angle_deg: START_ANGLE_DEG,
            sweep_angle_deg: sweep,
            use_center: false,
            bounds: size,
            stroke_width_px: stroke,
            cap: StrokeCap::Round,
        };
        let phase = timer.phase();

        Self {
            inactive_arc: arc(settings.inactive_bar_color, SWEEP_ANGLE_DEG),
            active_arc: arc(settings.active_bar_color, geometry::active_sweep_deg(progress)),
            marker: PointDescriptor {
                position: geometry::marker_position(size, progress),
                color: settings.handle_color,
                stroke_width_px: stroke * 3.0,
                cap: StrokeCap::Round,
            },
            time: TextDescriptor {
                text: timer.seconds_left().to_string(),
                color: Color::WHITE,
            },
            button: ButtonDescriptor {
                phase,
                label: phase.label().to_string(),
                background: phase.color(),
                text_color: Color::BLACK,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_frame_shows_full_dial() {
        let settings = TimerSettings::default();
        let timer = CountdownTimer::from_settings(&settings).unwrap();
        let frame = Frame::build(&timer, &settings, Size::new(200, 200));

        assert_eq!(frame.inactive_arc.sweep_angle_deg, 250.0);
        assert_eq!(frame.active_arc.sweep_angle_deg, 250.0);
        assert_eq!(frame.active_arc.start_angle_deg, -215.0);
        assert_eq!(frame.active_arc.color, settings.active_bar_color);
        assert_eq!(frame.inactive_arc.color, settings.inactive_bar_color);
        assert_eq!(frame.active_arc.bounds, Size::new(200, 200));
        assert_eq!(frame.time.text, "3");
        assert_eq!(frame.button.label, "Start");
        assert_eq!(frame.button.background, Color::GREEN);
    }

    #[test]
    fn marker_is_three_bar_widths_wide() {
        let mut settings = TimerSettings::default();
        settings.density = 2.0;
        let timer = CountdownTimer::from_settings(&settings).unwrap();
        let frame = Frame::build(&timer, &settings, Size::new(100, 100));
        assert_eq!(frame.active_arc.stroke_width_px, 10.0);
        assert_eq!(frame.marker.stroke_width_px, 30.0);
        assert_eq!(frame.marker.cap, StrokeCap::Round);
    }

    #[test]
    fn running_frame_tracks_progress() {
        let settings = TimerSettings::new(2000);
        let mut timer = CountdownTimer::from_settings(&settings).unwrap();
        timer.press();
        for _ in 0..10 {
            timer.tick();
        }
        let frame = Frame::build(&timer, &settings, Size::new(200, 200));
        assert!((frame.active_arc.sweep_angle_deg - 125.0).abs() < 1e-3);
        assert_eq!(frame.time.text, "1");
        assert_eq!(frame.button.label, "Stop");
        assert_eq!(frame.button.background, Color::RED);
    }

    #[test]
    fn finished_frame_offers_restart() {
        let settings = TimerSettings::new(100);
        let mut timer = CountdownTimer::from_settings(&settings).unwrap();
        timer.press();
        timer.tick();
        let frame = Frame::build(&timer, &settings, Size::new(200, 200));
        assert_eq!(frame.active_arc.sweep_angle_deg, 0.0);
        assert_eq!(frame.time.text, "0");
        assert_eq!(frame.button.phase, TimerPhase::Finished);
        assert_eq!(frame.button.label, "Restart");
        assert_eq!(frame.button.background, Color::GREEN);
    }
}
