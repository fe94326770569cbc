//! # Dial Timer Core Library
//!
//! Countdown logic behind a circular dial timer: one button that starts,
//! stops and restarts, an arc that empties as time runs out, and a handle
//! marker riding the end of the arc.
//!
//! ## Architecture
//!
//! - **Timer**: a clock-free state machine advanced in fixed 100 ms ticks
//! - **Dial**: pure geometry and per-frame drawing parameters
//! - **Driver**: a tokio task that arms one tick delay at a time and pushes
//!   frames into a host-provided [`Surface`]
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: Core timer state machine
//! - [`TimerDriver`]: Tick scheduling and rendering loop
//! - [`Frame`]: Everything a surface needs for one redraw
//! - [`Config`]: Application configuration management

pub mod dial;
pub mod driver;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use dial::{Color, Frame, Point, Size};
pub use driver::{Input, Surface, TimerDriver};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use storage::Config;
pub use timer::{CountdownTimer, TimerPhase, TimerSettings, TICK_MS};
