/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use glam::{Mat3, Vec3};
use strum::Display;

use crate::hexapod::placement::Placement;
use crate::hexapod::{LegDimensions, LegPose, LegPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
pub enum LegJoint {
    BodyContact,
    Coxia,
    Femur,
    FootTip,
}

impl LegJoint {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Joints from the body contact outward.
const JOINTS: [LegJoint; 4] = [
    LegJoint::BodyContact,
    LegJoint::Coxia,
    LegJoint::Femur,
    LegJoint::FootTip,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub position: LegPosition,
    pub pose: LegPose,
    pub dimensions: LegDimensions,
    points: [Vec3; 4],
    ground_contact: LegJoint,
}

/// Forward kinematics for one leg attached at `attachment`.
pub fn build_leg(
    dimensions: LegDimensions,
    position: LegPosition,
    attachment: Vec3,
    pose: LegPose,
) -> Leg {
    let LegDimensions { coxia, femur, tibia } = dimensions;
    let LegPose { alpha, beta, gamma } = pose;
    let coxia_point = Vec3::new(coxia, 0.0, 0.0);
    let femur_point = coxia_point + femur * Vec3::new(beta.cos(), 0.0, beta.sin());
    let knee = beta + gamma;
    let foot_tip = femur_point + tibia * Vec3::new(knee.sin(), 0.0, -knee.cos());
    let swing = Mat3::from_rotation_z(alpha + position.mounting_angle());
    let points = [Vec3::ZERO, coxia_point, femur_point, foot_tip]
        .map(|local| swing * local + attachment);
    Leg {
        position,
        pose,
        dimensions,
        points,
        ground_contact: lowest_joint(&points),
    }
}

/// The joint most likely to touch the ground: the lowest one, with the joint
/// further out winning a tie. The body contact never qualifies.
fn lowest_joint(points: &[Vec3; 4]) -> LegJoint {
    JOINTS[1..]
        .iter()
        .rev()
        .fold(LegJoint::FootTip, |lowest, &joint| {
            if points[joint.index()].z < points[lowest.index()].z {
                joint
            } else {
                lowest
            }
        })
}

impl Leg {
    pub fn point(&self, joint: LegJoint) -> Vec3 {
        self.points[joint.index()]
    }

    pub fn points(&self) -> &[Vec3; 4] {
        &self.points
    }

    pub fn body_contact(&self) -> Vec3 {
        self.point(LegJoint::BodyContact)
    }

    pub fn foot_tip(&self) -> Vec3 {
        self.point(LegJoint::FootTip)
    }

    pub fn ground_contact_joint(&self) -> LegJoint {
        self.ground_contact
    }

    pub fn maybe_ground_contact_point(&self) -> Vec3 {
        self.point(self.ground_contact)
    }

    /// The same leg swung back to alpha zero, still hanging from the same attachment.
    pub fn unswung(&self) -> Leg {
        build_leg(
            self.dimensions,
            self.position,
            self.body_contact(),
            self.pose.with_alpha(0.0),
        )
    }
}

impl Placement for Leg {
    fn map_points(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Leg {
            points: self.points.map(f),
            ..self.clone()
        }
    }
}
