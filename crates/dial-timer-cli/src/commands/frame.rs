use clap::Args;
use dial_timer_core::{Config, CountdownTimer, Frame};

use super::parse_size;

#[derive(Args)]
pub struct FrameArgs {
    /// Total duration; defaults to the configured one
    #[arg(long)]
    total_ms: Option<u64>,
    /// Time left; defaults to the full duration
    #[arg(long)]
    remaining_ms: Option<u64>,
    /// Whether the countdown is running
    #[arg(long)]
    running: bool,
    /// Drawing region as WIDTHxHEIGHT; defaults to the configured surface
    #[arg(long, value_parser = parse_size)]
    size: Option<dial_timer_core::Size>,
}

pub fn run(args: FrameArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut settings = config.settings()?;
    if let Some(total) = args.total_ms {
        settings.total_time_ms = total;
    }
    let total = settings.total_time_ms;
    let timer = CountdownTimer::restore(total, args.remaining_ms.unwrap_or(total), args.running)?;
    let size = args.size.unwrap_or_else(|| config.surface_size());

    let frame = Frame::build(&timer, &settings, size);
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}
