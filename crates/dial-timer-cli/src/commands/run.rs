use std::io::{IsTerminal, Write};
use std::sync::Arc;

use clap::Args;
use dial_timer_core::{Config, Event, Frame, Input, Size, Surface, TimerDriver};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Notify};

use super::parse_size;

const BAR_CELLS: usize = 25;

#[derive(Args)]
pub struct RunArgs {
    /// Total duration; defaults to the configured one
    #[arg(long)]
    total_ms: Option<u64>,
    /// Drawing region as WIDTHxHEIGHT; defaults to the configured surface
    #[arg(long, value_parser = parse_size)]
    size: Option<Size>,
    /// Press the button once before reading input
    #[arg(long)]
    start: bool,
    /// Exit as soon as the countdown reaches zero
    #[arg(long)]
    exit_on_finish: bool,
    /// Print every frame as a JSON line instead of a status line
    #[arg(long)]
    json: bool,
}

/// Renders frames to stdout.
struct TerminalSurface {
    json: bool,
    redraw_in_place: bool,
    finished: Arc<Notify>,
}

impl TerminalSurface {
    fn status_line(frame: &Frame) -> String {
        let filled = ((frame.active_arc.sweep_angle_deg / frame.inactive_arc.sweep_angle_deg)
            * BAR_CELLS as f32)
            .round() as usize;
        let filled = filled.min(BAR_CELLS);
        format!(
            "{:>4}s [{}{}] <{}>",
            frame.time.text,
            "#".repeat(filled),
            "-".repeat(BAR_CELLS - filled),
            frame.button.label
        )
    }
}

impl Surface for TerminalSurface {
    fn present(&mut self, frame: &Frame) {
        let mut out = std::io::stdout().lock();
        let written = if self.json {
            match serde_json::to_string(frame) {
                Ok(json) => writeln!(out, "{json}"),
                Err(e) => {
                    tracing::error!("cannot serialize frame: {e}");
                    return;
                }
            }
        } else if self.redraw_in_place {
            write!(out, "\r\x1b[2K{}", Self::status_line(frame))
        } else {
            writeln!(out, "{}", Self::status_line(frame))
        };
        if let Err(e) = written.and_then(|()| out.flush()) {
            tracing::warn!("cannot write frame: {e}");
        }
    }

    fn on_event(&mut self, event: &Event) {
        tracing::debug!(event = event.kind(), "timer event");
        if matches!(event, Event::TimerFinished { .. }) {
            self.finished.notify_one();
        }
    }
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    match line {
        "" | "p" | "press" => return Some(Input::Press),
        "q" | "quit" => return Some(Input::Shutdown),
        _ => {}
    }
    let (command, arg) = line.split_once(' ')?;
    match command {
        "s" | "size" => parse_size(arg.trim()).ok().map(Input::Resize),
        _ => None,
    }
}

/// Forward stdin and Ctrl-C to the driver until teardown is requested.
async fn pump_input(tx: mpsc::Sender<Input>, finished: Arc<Notify>, exit_on_finish: bool) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        let input = tokio::select! {
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_input(&line) {
                    Some(input) => input,
                    None => {
                        tracing::warn!("ignoring input '{}'", line.trim());
                        continue;
                    }
                },
                Ok(None) | Err(_) => {
                    // Keep running until Ctrl-C or the countdown ends.
                    stdin_open = false;
                    continue;
                }
            },
            _ = tokio::signal::ctrl_c() => Input::Shutdown,
            () = finished.notified(), if exit_on_finish => Input::Shutdown,
        };

        let shutdown = input == Input::Shutdown;
        if tx.send(input).await.is_err() || shutdown {
            return;
        }
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut settings = config.settings()?;
    if let Some(total) = args.total_ms {
        settings.total_time_ms = total;
    }
    let size = args.size.unwrap_or_else(|| config.surface_size());

    let finished = Arc::new(Notify::new());
    let surface = TerminalSurface {
        json: args.json,
        redraw_in_place: !args.json && std::io::stdout().is_terminal(),
        finished: Arc::clone(&finished),
    };
    let mut driver = TimerDriver::new(settings, size, surface)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let (tx, rx) = mpsc::channel(16);
        if args.start {
            tx.send(Input::Press).await?;
        }
        tokio::join!(
            driver.run(rx),
            pump_input(tx, finished, args.exit_on_finish)
        );
        Ok::<_, mpsc::error::SendError<Input>>(())
    })?;

    let timer = driver.timer();
    if !args.json && driver.surface().redraw_in_place {
        println!();
    }
    tracing::info!(
        remaining_ms = timer.remaining_ms(),
        running = timer.is_running(),
        "countdown torn down"
    );
    Ok(())
}
