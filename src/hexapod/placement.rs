/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::ops::Mul;

use glam::{Mat3, Quat, Vec3};

use crate::hexapod::{GroundContact, LocalAxes};

/// A proper rotation. It can only be built from rotational sources, so it never
/// carries scale, shear or translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(Mat3);

impl Rotation {
    pub const IDENTITY: Rotation = Rotation(Mat3::IDENTITY);

    pub fn from_quat(quat: Quat) -> Self {
        Self(Mat3::from_quat(quat.normalize()))
    }

    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_quat(Quat::from_axis_angle(axis.normalize(), angle))
    }

    pub fn about_z(angle: f32) -> Self {
        Self(Mat3::from_rotation_z(angle))
    }

    /// The shortest rotation carrying direction `from` onto direction `to`.
    pub fn aligning(from: Vec3, to: Vec3) -> Self {
        Self::from_quat(Quat::from_rotation_arc(from.normalize(), to.normalize()))
    }

    pub fn matrix(&self) -> Mat3 {
        self.0
    }

    pub fn apply(&self, vector: Vec3) -> Vec3 {
        self.0 * vector
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Self::Output {
        Rotation(self.0 * rhs.0)
    }
}

impl Mul<Vec3> for Rotation {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self.apply(rhs)
    }
}

/// Rigid re-placement of something made of points. Implementors only say how to
/// push every stored point through a mapping; the clones come for free.
pub trait Placement: Sized {
    fn map_points(&self, f: impl Fn(Vec3) -> Vec3) -> Self;

    fn clone_trot(&self, rotation: &Rotation) -> Self {
        self.map_points(|point| rotation.apply(point))
    }

    fn clone_shift(&self, offset: Vec3) -> Self {
        self.map_points(|point| point + offset)
    }

    /// Rotate first, then translate.
    fn clone_trot_shift(&self, rotation: &Rotation, offset: Vec3) -> Self {
        self.map_points(|point| rotation.apply(point) + offset)
    }
}

impl Placement for GroundContact {
    fn map_points(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        GroundContact {
            position: self.position,
            point: f(self.point),
        }
    }
}

impl LocalAxes {
    /// Axes are directions, so only the rotational part of a placement reaches them.
    pub fn rotated(&self, rotation: &Rotation) -> Self {
        LocalAxes {
            x: rotation.apply(self.x),
            y: rotation.apply(self.y),
            z: rotation.apply(self.z),
        }
    }
}
