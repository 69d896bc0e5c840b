/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Finding the plane a flat-built hexapod would come to rest on.
//!
//! The legs arrive in the flat frame: body in z = 0, center of gravity at the
//! origin. Every trio of candidate contact points proposes a plane; the first
//! one that can actually carry the body wins.

use glam::Vec3;

use crate::hexapod::leg::{Leg, LegJoint};

/// How far (mm) a point may sit off the support plane and still count as on it.
pub const GROUND_TOLERANCE: f32 = 1.0;

const COLLINEAR_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct OrientationProperties {
    /// Unit normal of the support plane, pointing from the plane toward the body.
    pub n_axis: Vec3,
    /// Distance from the center of gravity down to the support plane.
    pub height: f32,
    /// Legs whose contact point lies on the plane, in canonical order.
    pub ground_legs: Vec<Leg>,
}

struct SupportPlane {
    normal: Vec3,
    height: f32,
}

impl SupportPlane {
    /// Plane through three points with its normal facing the origin, or
    /// nothing when the points are collinear.
    fn through(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        let length = cross.length();
        if length <= COLLINEAR_EPSILON * (b - a).length() * (c - a).length() {
            return None;
        }
        let mut normal = cross / length;
        if normal.dot(-a) < 0.0 {
            normal = -normal;
        }
        Some(Self {
            normal,
            height: normal.dot(-a),
        })
    }

    /// Signed distance above the plane, positive on the body's side.
    fn elevation(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.height
    }

    fn cog_projection(&self) -> Vec3 {
        -self.normal * self.height
    }
}

/// Inside-or-on-the-edge test for a point lying in the triangle's plane.
fn encloses(triangle: [Vec3; 3], point: Vec3) -> bool {
    let winding = (triangle[1] - triangle[0]).cross(triangle[2] - triangle[0]);
    let slack = COLLINEAR_EPSILON * winding.length();
    let winding = winding.normalize();
    (0..3).all(|i| {
        let (a, b) = (triangle[i], triangle[(i + 1) % 3]);
        winding.dot((b - a).cross(point - a)) >= -slack
    })
}

fn trios(count: usize) -> impl Iterator<Item = [usize; 3]> {
    (0..count).flat_map(move |i| {
        (i + 1..count).flat_map(move |j| (j + 1..count).map(move |k| [i, j, k]))
    })
}

/// Find the support plane under six flat-built legs, if the pose can stand at all.
pub fn compute_orientation_properties(legs: &[Leg]) -> Option<OrientationProperties> {
    let contacts: Vec<Vec3> = legs.iter().map(Leg::maybe_ground_contact_point).collect();
    let plane = trios(legs.len()).find_map(|trio| {
        let triangle = trio.map(|index| contacts[index]);
        let plane = SupportPlane::through(triangle[0], triangle[1], triangle[2])?;
        if plane.height <= GROUND_TOLERANCE || plane.normal.z <= 0.0 {
            return None;
        }
        if !encloses(triangle, plane.cog_projection()) {
            return None;
        }
        let undercut = legs.iter().any(|leg| {
            leg.points()[LegJoint::Coxia.index()..]
                .iter()
                .any(|&point| plane.elevation(point) < -GROUND_TOLERANCE)
        });
        (!undercut).then_some(plane)
    })?;
    let ground_legs = legs
        .iter()
        .filter(|leg| plane.elevation(leg.maybe_ground_contact_point()).abs() <= GROUND_TOLERANCE)
        .cloned()
        .collect();
    Some(OrientationProperties {
        n_axis: plane.normal,
        height: plane.height,
        ground_legs,
    })
}
