/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Static stance of a six-legged robot: from body dimensions and joint angles
//! to a body resting on the ground, its height, its ground contacts and how far
//! it twisted about its own vertical axis.

pub mod batch;
pub mod config;
pub mod hexapod;
pub mod units;

pub use hexapod::error::StanceError;
pub use hexapod::placement::{Placement, Rotation};
pub use hexapod::stance::{Stance, StanceFlags};
pub use hexapod::{
    Dimensions, GroundContact, LegPose, LegPosition, LocalAxes, Pose, DEFAULT_POSE,
    NEUTRAL_DIMENSIONS, POSITIONS, WORLD_AXES,
};
