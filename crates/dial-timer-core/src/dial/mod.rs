mod color;
mod frame;
mod geometry;

pub use color::Color;
pub use frame::{ArcDescriptor, ButtonDescriptor, Frame, PointDescriptor, StrokeCap, TextDescriptor};
pub use geometry::{
    active_sweep_deg, marker_angle_rad, marker_position, Point, Size, START_ANGLE_DEG,
    SWEEP_ANGLE_DEG,
};
