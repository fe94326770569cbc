mod engine;
mod phase;
mod settings;

pub use engine::{CountdownTimer, TICK_MS};
pub use phase::TimerPhase;
pub use settings::TimerSettings;
