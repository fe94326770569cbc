use serde::{Deserialize, Serialize};

/// Both arcs begin here, in degrees, measured clockwise from 3 o'clock.
pub const START_ANGLE_DEG: f32 = -215.0;
/// Full sweep of the dial in degrees.
pub const SWEEP_ANGLE_DEG: f32 = 250.0;
/// Offset that puts the marker on the end of the active arc.
const MARKER_OFFSET_DEG: f32 = 145.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Pixel size of the region allotted to the dial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point {
            x: self.width as f32 / 2.0,
            y: self.height as f32 / 2.0,
        }
    }

    /// The dial radius follows the width.
    pub fn radius(self) -> f32 {
        self.width as f32 / 2.0
    }
}

/// Sweep of the active arc for a given progress.
pub fn active_sweep_deg(progress: f64) -> f32 {
    SWEEP_ANGLE_DEG * progress as f32
}

/// Angle of the marker in radians.
pub fn marker_angle_rad(progress: f64) -> f32 {
    (active_sweep_deg(progress) + MARKER_OFFSET_DEG).to_radians()
}

/// Where the handle sits on the circle for `progress`.
pub fn marker_position(size: Size, progress: f64) -> Point {
    let center = size.center();
    let r = size.radius();
    let beta = marker_angle_rad(progress);
    Point {
        x: center.x + r * beta.cos(),
        y: center.y + r * beta.sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: Point, b: Point) -> f32 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn marker_at_full_progress_ends_the_dial() {
        // 250 + 145 = 395 deg, i.e. 35 deg below the horizontal on the right.
        let size = Size::new(200, 200);
        let p = marker_position(size, 1.0);
        let expected = 35f32.to_radians();
        assert!((p.x - (100.0 + 100.0 * expected.cos())).abs() < 1e-3);
        assert!((p.y - (100.0 + 100.0 * expected.sin())).abs() < 1e-3);
    }

    #[test]
    fn marker_at_zero_progress_starts_the_dial() {
        let size = Size::new(200, 200);
        let p = marker_position(size, 0.0);
        let expected = 145f32.to_radians();
        assert!((p.x - (100.0 + 100.0 * expected.cos())).abs() < 1e-3);
        assert!((p.y - (100.0 + 100.0 * expected.sin())).abs() < 1e-3);
        // Left of center, below it (screen coordinates grow downward).
        assert!(p.x < 100.0 && p.y > 100.0);
    }

    #[test]
    fn marker_stays_on_circle() {
        let size = Size::new(320, 320);
        for i in 0..=20 {
            let p = marker_position(size, i as f64 / 20.0);
            assert!((distance(p, size.center()) - size.radius()).abs() < 1e-3);
        }
    }

    #[test]
    fn zero_size_collapses_to_origin() {
        let p = marker_position(Size::ZERO, 0.5);
        assert_eq!(p, Point { x: 0.0, y: 0.0 });
    }

    #[test]
    fn active_sweep_scales_linearly() {
        assert_eq!(active_sweep_deg(1.0), 250.0);
        assert_eq!(active_sweep_deg(0.0), 0.0);
        assert!((active_sweep_deg(0.5) - 125.0).abs() < 1e-4);
    }
}
