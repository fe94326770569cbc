//! Async tick driver.
//!
//! Hosts one [`CountdownTimer`] on the current task and keeps at most one
//! single-shot delay of [`TICK_MS`] pending. The delay is armed only while
//! the timer can make progress and is re-armed every time the running flag
//! or the remaining time changes. A paused timer holds no delay at all.
//!
//! Teardown (an [`Input::Shutdown`], a closed input channel, or dropping the
//! `run` future) abandons the pending delay; the timer is not touched again.

use std::pin::Pin;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Sleep;

use crate::dial::{Frame, Size};
use crate::error::ValidationError;
use crate::events::Event;
use crate::timer::{CountdownTimer, TimerSettings, TICK_MS};

/// Events consumed from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The single button was pressed.
    Press,
    /// The allotted drawing region changed size. Affects rendering only.
    Resize(Size),
    Shutdown,
}

/// Rendering surface the driver pushes frames into.
pub trait Surface {
    fn present(&mut self, frame: &Frame);

    /// Called for every state-changing event, before the matching frame.
    fn on_event(&mut self, _event: &Event) {}
}

type PendingTick = Option<Pin<Box<Sleep>>>;

pub struct TimerDriver<S> {
    timer: CountdownTimer,
    settings: TimerSettings,
    size: Size,
    surface: S,
}

impl<S: Surface> TimerDriver<S> {
    /// # Errors
    ///
    /// Returns an error if the settings fail validation.
    pub fn new(settings: TimerSettings, size: Size, surface: S) -> Result<Self, ValidationError> {
        let timer = CountdownTimer::from_settings(&settings)?;
        Ok(Self {
            timer,
            settings,
            size,
            surface,
        })
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn frame(&self) -> Frame {
        Frame::build(&self.timer, &self.settings, self.size)
    }

    /// Drive the timer until teardown.
    pub async fn run(&mut self, mut inputs: mpsc::Receiver<Input>) {
        self.render();
        let mut pending = self.arm();

        loop {
            tokio::select! {
                input = inputs.recv() => match input {
                    Some(Input::Press) => {
                        let event = self.timer.press();
                        self.emit(&event);
                        // The press changed the state, so any in-flight delay
                        // belongs to the old state.
                        pending = self.arm();
                    }
                    Some(Input::Resize(size)) => {
                        tracing::debug!(width = size.width, height = size.height, "surface resized");
                        self.size = size;
                        self.render();
                    }
                    Some(Input::Shutdown) | None => {
                        if pending.is_some() {
                            tracing::debug!(remaining_ms = self.timer.remaining_ms(), "abandoning pending tick");
                        }
                        break;
                    }
                },
                () = elapsed(&mut pending) => {
                    if let Some(event) = self.timer.tick() {
                        self.emit(&event);
                    }
                    pending = self.arm();
                }
            }
        }
    }

    fn arm(&self) -> PendingTick {
        if self.timer.should_tick() {
            Some(Box::pin(tokio::time::sleep(Duration::from_millis(TICK_MS))))
        } else {
            tracing::debug!(
                running = self.timer.is_running(),
                remaining_ms = self.timer.remaining_ms(),
                "tick loop idle"
            );
            None
        }
    }

    fn emit(&mut self, event: &Event) {
        self.surface.on_event(event);
        self.render();
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.surface.present(&frame);
    }
}

/// Resolves when the pending delay elapses; never resolves if none is armed.
async fn elapsed(pending: &mut PendingTick) {
    match pending {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
