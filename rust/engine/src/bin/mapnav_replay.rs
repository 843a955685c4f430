// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Replay recorded motion samples through a navigation session
//!
//! Usage:
//!   mapnav-replay <floorplan.json> <samples.jsonl> --origin x,y --dest x,y [options]

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use mapnav_engine::{
    EngineConfig, MotionSample, NavigationSession, Point, StepOutcome,
};

struct Options {
    floor_plan: String,
    samples: String,
    origin: Point,
    destination: Destination,
    config: Option<String>,
}

enum Destination {
    Point(Point),
    Landmark(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,mapnav_engine=debug".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage();
        std::process::exit(1);
    });

    if let Err(e) = run(options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut origin = None;
    let mut destination = None;
    let mut config = None;

    let mut i = 3;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--origin", Some(v)) => origin = Some(parse_point(v)?),
            ("--dest", Some(v)) => destination = Some(Destination::Point(parse_point(v)?)),
            ("--landmark", Some(v)) => destination = Some(Destination::Landmark(v.clone())),
            ("--config", Some(v)) => config = Some(v.clone()),
            (flag @ ("--origin" | "--dest" | "--landmark" | "--config"), None) => {
                return Err(format!("Missing value for {}", flag));
            }
            (other, _) => return Err(format!("Unknown option: {}", other)),
        }
        i += 2;
    }

    Ok(Options {
        floor_plan: args[1].clone(),
        samples: args[2].clone(),
        origin: origin.ok_or("--origin is required")?,
        destination: destination.ok_or("--dest or --landmark is required")?,
        config,
    })
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("Expected x,y but got '{}'", value))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid coordinate '{}': {}", s, e))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let floor_plan = mapnav_floorplan::load_from_file(&options.floor_plan)?;
    let config = match &options.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let mut session = NavigationSession::new(Arc::new(floor_plan), config)?;
    session.set_origin(options.origin);
    match &options.destination {
        Destination::Point(point) => session.set_destination(*point),
        Destination::Landmark(label) => {
            session.set_destination_to_landmark(label)?;
        }
    }

    let reader = BufReader::new(File::open(&options.samples)?);
    let mut sample_count = 0usize;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: MotionSample = serde_json::from_str(&line)
            .map_err(|e| format!("{}:{}: {}", options.samples, line_no + 1, e))?;
        sample_count += 1;

        let update = session.on_sample(&sample)?;
        match update.outcome {
            StepOutcome::Committed(event) => println!(
                "step {:>4}  {:?}  -> ({:.3}, {:.3})  {}",
                event.counters.steps, event.quadrant, event.to.x, event.to.y, update.instruction
            ),
            StepOutcome::Rejected(event) => println!(
                "blocked    {:?}  at ({:.3}, {:.3})",
                event.quadrant, event.from.x, event.from.y
            ),
            StepOutcome::NoStep => {}
        }
    }

    tracing::info!(samples = sample_count, "Replay finished");

    let route = session.route()?;
    println!();
    println!("{}", session.status());
    println!("Route ({:?}):", route.strategy());
    for point in route.waypoints() {
        println!("  ({:.3}, {:.3})", point.x, point.y);
    }
    println!("{}", session.instruction()?);
    Ok(())
}

fn print_usage() {
    println!(
        r#"MapNav Replay
=============

Streams recorded motion samples (one JSON object per line) through a
navigation session and prints every step, the final route and instruction.

USAGE:
  mapnav-replay <floorplan.json> <samples.jsonl> [OPTIONS]

ARGUMENTS:
  <floorplan.json>      Map document with wall paths and landmarks
  <samples.jsonl>       {{"linear_acceleration":[..],"rotation_rate":[..],"heading":..}} per line

OPTIONS:
  --origin <x,y>        Start position in meters (required)
  --dest <x,y>          Destination in meters
  --landmark <label>    Destination by landmark label
  --config <path>       Engine config JSON (default: built-in tuning)
  -h, --help            Show this help

Set RUST_LOG to change log verbosity (default: info,mapnav_engine=debug)."#
    );
}
