/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::f32::consts::PI;
use std::ops::Index;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub mod body;
pub mod error;
pub mod export;
pub mod leg;
pub mod orientation;
pub mod placement;
pub mod stance;
pub mod twist;

#[cfg(test)]
mod tests;

/// Body hexagon plus the three segment lengths shared by every leg, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub front: f32,
    pub side: f32,
    pub middle: f32,
    pub coxia: f32,
    pub femur: f32,
    pub tibia: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDimensions {
    pub front: f32,
    pub side: f32,
    pub middle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegDimensions {
    pub coxia: f32,
    pub femur: f32,
    pub tibia: f32,
}

impl Dimensions {
    pub fn body(&self) -> BodyDimensions {
        let Dimensions { front, side, middle, .. } = *self;
        BodyDimensions { front, side, middle }
    }

    pub fn leg(&self) -> LegDimensions {
        let Dimensions { coxia, femur, tibia, .. } = *self;
        LegDimensions { coxia, femur, tibia }
    }

    pub fn named(&self) -> [(&'static str, f32); 6] {
        [
            ("front", self.front),
            ("side", self.side),
            ("middle", self.middle),
            ("coxia", self.coxia),
            ("femur", self.femur),
            ("tibia", self.tibia),
        ]
    }
}

impl LegDimensions {
    pub fn reach(&self) -> f32 {
        self.coxia + self.femur + self.tibia
    }
}

pub const NEUTRAL_DIMENSIONS: Dimensions = Dimensions {
    front: 100.0,
    side: 100.0,
    middle: 100.0,
    coxia: 50.0,
    femur: 80.0,
    tibia: 130.0,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum LegPosition {
    RightMiddle,
    RightFront,
    LeftFront,
    LeftMiddle,
    LeftBack,
    RightBack,
}

/// Canonical leg order, used wherever legs are laid out in sequence.
pub const POSITIONS: [LegPosition; 6] = [
    LegPosition::RightMiddle,
    LegPosition::RightFront,
    LegPosition::LeftFront,
    LegPosition::LeftMiddle,
    LegPosition::LeftBack,
    LegPosition::RightBack,
];

impl LegPosition {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction the leg points outward when alpha is zero, counterclockwise from +x.
    pub fn mounting_angle(self) -> f32 {
        use LegPosition::*;
        let degrees: f32 = match self {
            RightMiddle => 0.0,
            RightFront => 45.0,
            LeftFront => 135.0,
            LeftMiddle => 180.0,
            LeftBack => 225.0,
            RightBack => 315.0,
        };
        degrees * PI / 180.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegPose {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl LegPose {
    pub const ZERO: LegPose = LegPose {
        alpha: 0.0,
        beta: 0.0,
        gamma: 0.0,
    };

    pub const fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self { alpha, beta, gamma }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// One angle triple per leg position. Indexed by position, iterated in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose([LegPose; 6]);

pub const DEFAULT_POSE: Pose = Pose([LegPose::ZERO; 6]);

impl Pose {
    pub fn uniform(leg_pose: LegPose) -> Self {
        Self([leg_pose; 6])
    }

    pub fn from_fn(f: impl FnMut(LegPosition) -> LegPose) -> Self {
        Self(POSITIONS.map(f))
    }

    pub fn with_leg(mut self, position: LegPosition, leg_pose: LegPose) -> Self {
        self.0[position.index()] = leg_pose;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (LegPosition, LegPose)> + '_ {
        POSITIONS.iter().map(|&position| (position, self[position]))
    }

    pub fn all_alpha_zero(&self) -> bool {
        self.0.iter().all(|leg_pose| leg_pose.alpha == 0.0)
    }
}

impl Index<LegPosition> for Pose {
    type Output = LegPose;

    fn index(&self, position: LegPosition) -> &Self::Output {
        &self.0[position.index()]
    }
}

/// The body's own frame expressed as unit vectors in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalAxes {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

pub const WORLD_AXES: LocalAxes = LocalAxes {
    x: Vec3::X,
    y: Vec3::Y,
    z: Vec3::Z,
};

impl LocalAxes {
    pub fn is_orthonormal(&self, epsilon: f32) -> bool {
        let LocalAxes { x, y, z } = *self;
        [x, y, z].iter().all(|axis| (axis.length() - 1.0).abs() < epsilon)
            && x.dot(y).abs() < epsilon
            && y.dot(z).abs() < epsilon
            && z.dot(x).abs() < epsilon
    }
}

/// A leg point touching the ground, tagged with the leg it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    pub position: LegPosition,
    pub point: Vec3,
}
