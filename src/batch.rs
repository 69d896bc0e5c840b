/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Many stances at once: resolving a whole list of poses in parallel, and
//! drawing reproducible random poses to feed it.

use log::info;
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::hexapod::stance::{Stance, StanceFlags};
use crate::hexapod::{Dimensions, LegPose, Pose};
use crate::units::{Degrees, Radians};

/// Resolve every pose against the same dimensions. Output order matches input order.
pub fn resolve_all(dimensions: Dimensions, poses: &[Pose], flags: StanceFlags) -> Vec<Stance> {
    let stances: Vec<Stance> = poses
        .par_iter()
        .map(|pose| Stance::new(dimensions, *pose, flags))
        .collect();
    let dangling = stances.iter().filter(|stance| stance.is_dangling()).count();
    info!("Resolved {} stances, {} dangling", stances.len(), dangling);
    stances
}

/// Largest magnitude each joint angle may take in a sampled pose.
#[derive(Debug, Clone, Copy)]
pub struct PoseLimits {
    pub alpha: Radians,
    pub beta: Radians,
    pub gamma: Radians,
}

impl Default for PoseLimits {
    fn default() -> Self {
        Self {
            alpha: Degrees(30.0).into(),
            beta: Degrees(45.0).into(),
            gamma: Degrees(45.0).into(),
        }
    }
}

pub struct PoseSampler {
    rng: ChaCha8Rng,
    limits: PoseLimits,
}

impl PoseSampler {
    pub fn new(seed: u64, limits: PoseLimits) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            limits,
        }
    }

    fn angle(&mut self, limit: Radians) -> f32 {
        if *limit <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-*limit..=*limit)
    }

    pub fn sample(&mut self) -> Pose {
        let PoseLimits { alpha, beta, gamma } = self.limits;
        Pose::from_fn(|_| LegPose::new(self.angle(alpha), self.angle(beta), self.angle(gamma)))
    }

    pub fn samples(&mut self, count: usize) -> Vec<Pose> {
        (0..count).map(|_| self.sample()).collect()
    }
}
