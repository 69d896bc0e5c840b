/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use hexapod_stance::batch::{resolve_all, PoseLimits, PoseSampler};
use hexapod_stance::config::StanceConfig;
use hexapod_stance::hexapod::export::{to_json, write_json};
use hexapod_stance::{Pose, StanceError, StanceFlags};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with dimensions and named poses
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resolve only the pose with this name
    #[arg(long)]
    pose: Option<String>,

    /// Resolve this many random poses instead of the configured ones
    #[arg(long)]
    sample: Option<usize>,

    /// Seed for random poses
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Skip the ground solve
    #[arg(long)]
    no_gravity: bool,

    /// Lift dangling stances clear of the ground
    #[arg(long)]
    shifted_up: bool,

    /// Where to write the JSON snapshot, stdout when absent
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(stance_error) => {
            error!("{stance_error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), StanceError> {
    let config = match &args.config {
        Some(path) => StanceConfig::load(path)?,
        None => StanceConfig::default(),
    };
    let named: Vec<(String, Pose)> = match (args.sample, &args.pose) {
        (Some(count), _) => {
            let mut sampler = PoseSampler::new(args.seed, PoseLimits::default());
            sampler
                .samples(count)
                .into_iter()
                .enumerate()
                .map(|(index, pose)| (format!("sample-{index}"), pose))
                .collect()
        }
        (None, Some(name)) => vec![(name.clone(), config.pose(name)?)],
        (None, None) => config.poses().to_vec(),
    };
    let flags = StanceFlags {
        no_gravity: args.no_gravity,
        shifted_up: args.shifted_up,
        has_no_points: false,
    };
    let poses: Vec<Pose> = named.iter().map(|(_, pose)| *pose).collect();
    let stances = resolve_all(config.dimensions, &poses, flags);
    let exports: Vec<_> = named
        .into_iter()
        .zip(stances.iter())
        .map(|((name, _), stance)| stance.export(name))
        .collect();
    match &args.output {
        Some(path) => {
            write_json(&exports, path)?;
            info!("Saved: {:?}", path);
        }
        None => println!("{}", to_json(&exports)?),
    }
    Ok(())
}
