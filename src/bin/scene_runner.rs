//! Headless scene runner
//!
//! Loads a JSON scene configuration, runs it for a number of steps
//! through a [`Session`], and prints the throttled snapshots as JSON
//! lines. Stands in for the out-of-scope renderer when checking a
//! scene from the command line:
//!
//! ```text
//! scene-runner scene.json [steps]
//! ```

use std::process::ExitCode;
use std::time::Duration;
use std::{env, fs};

use springbox_engine::config::SimConfig;
use springbox_engine::session::{Command, Event, Session};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: scene-runner <scene.json> [steps]");
        return ExitCode::FAILURE;
    };
    let steps: u64 = match args.next().map(|s| s.parse()).transpose() {
        Ok(steps) => steps.unwrap_or(600),
        Err(err) => {
            eprintln!("invalid step count: {err}");
            return ExitCode::FAILURE;
        }
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("cannot read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config: SimConfig = match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("cannot parse {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let dt = config.dt;

    let mut session = Session::new();
    let mut events = Vec::new();
    if let Err(err) = session.handle(Command::Init(Box::new(config)), Duration::ZERO, &mut events)
    {
        eprintln!("scene rejected: {err}");
        return ExitCode::FAILURE;
    }
    session
        .handle(Command::Start, Duration::ZERO, &mut events)
        .expect("only init can fail");
    events.clear();

    // Drive the session on simulated time: tick i lands at i·dt, so
    // the snapshot throttle behaves exactly as it would under a real
    // timer running at the step cadence.
    for i in 1..=steps {
        let now = Duration::from_secs_f64(dt * i as f64);
        session.tick(now, &mut events);
        for event in events.drain(..) {
            if let Event::Snapshot(state) = event {
                match serde_json::to_string(&state) {
                    Ok(line) => println!("{line}"),
                    Err(err) => {
                        eprintln!("snapshot serialization failed: {err}");
                        return ExitCode::FAILURE;
                    }
                }
            }
        }
    }

    ExitCode::SUCCESS
}
