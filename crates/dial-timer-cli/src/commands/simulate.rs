use clap::Args;
use dial_timer_core::{Config, CountdownTimer, Event, Frame, Size};
use serde::Serialize;

use super::parse_size;

#[derive(Args)]
pub struct SimulateArgs {
    /// Steps separated by spaces or commas: `press`, `tick`, `tick:N`, `resize:WxH`
    script: String,
    /// Total duration; defaults to the configured one
    #[arg(long)]
    total_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Press,
    Tick(u32),
    Resize(Size),
}

#[derive(Serialize)]
struct Outcome {
    events: Vec<Event>,
    state: Event,
    frame: Frame,
}

fn parse_script(script: &str) -> Result<Vec<Step>, String> {
    script
        .split([' ', ','])
        .filter(|token| !token.is_empty())
        .map(|token| match token.split_once(':') {
            None if token == "press" => Ok(Step::Press),
            None if token == "tick" => Ok(Step::Tick(1)),
            Some(("tick", n)) => n
                .parse()
                .map(Step::Tick)
                .map_err(|_| format!("bad tick count in '{token}'")),
            Some(("resize", size)) => parse_size(size).map(Step::Resize),
            _ => Err(format!("unknown step '{token}'")),
        })
        .collect()
}

/// Apply `steps` in order and collect the emitted events.
///
/// A `tick:N` stops early once the timer no longer advances.
fn apply(timer: &mut CountdownTimer, size: &mut Size, steps: &[Step]) -> Vec<Event> {
    let mut events = Vec::new();
    for step in steps {
        match *step {
            Step::Press => events.push(timer.press()),
            Step::Tick(n) => events.extend((0..n).map_while(|_| timer.tick())),
            Step::Resize(new_size) => *size = new_size,
        }
    }
    events
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let steps = parse_script(&args.script)?;
    let config = Config::load()?;
    let mut settings = config.settings()?;
    if let Some(total) = args.total_ms {
        settings.total_time_ms = total;
    }
    let mut timer = CountdownTimer::from_settings(&settings)?;
    let mut size = config.surface_size();
    let events = apply(&mut timer, &mut size, &steps);

    let outcome = Outcome {
        events,
        state: timer.snapshot(),
        frame: Frame::build(&timer, &settings, size),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators() {
        let steps = parse_script("press, tick:5 press,tick resize:10x20").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Press,
                Step::Tick(5),
                Step::Press,
                Step::Tick(1),
                Step::Resize(Size::new(10, 20)),
            ]
        );
    }

    #[test]
    fn rejects_unknown_steps() {
        assert!(parse_script("press jump").is_err());
        assert!(parse_script("tick:many").is_err());
        assert!(parse_script("press:2").is_err());
    }

    #[test]
    fn empty_script_is_allowed() {
        assert!(parse_script("").unwrap().is_empty());
    }

    #[test]
    fn huge_tick_count_stops_at_zero() {
        let mut timer = CountdownTimer::restore(300, 300, false).unwrap();
        let mut size = Size::new(200, 200);
        let steps = parse_script("press tick:4294967295").unwrap();

        let events = apply(&mut timer, &mut size, &steps);

        // Started, two ticks, then the finishing tick.
        assert_eq!(events.len(), 4);
        assert!(matches!(events[3], Event::TimerFinished { .. }));
        assert_eq!(timer.remaining_ms(), 0);
        assert!(timer.is_running());
    }

    #[test]
    fn ticks_while_stopped_emit_nothing() {
        let mut timer = CountdownTimer::restore(3000, 3000, false).unwrap();
        let mut size = Size::new(200, 200);
        let steps = parse_script("tick:1000000000 resize:64x32").unwrap();

        assert!(apply(&mut timer, &mut size, &steps).is_empty());
        assert_eq!(timer.remaining_ms(), 3000);
        assert_eq!(size, Size::new(64, 32));
    }
}
