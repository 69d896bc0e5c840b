/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Rotation of the standing body about the vertical axis.
//!
//! Planted feet do not slide, so when the hips swing (alpha) the body turns
//! underneath them instead. All angles are counterclockwise about +z.

use glam::Vec3;

use crate::hexapod::leg::Leg;
use crate::hexapod::GroundContact;

/// Twists closer together than this (radians) are considered the same.
pub const TWIST_EPSILON: f32 = 1e-4;

fn signed_angle_z(from: Vec3, to: Vec3) -> f32 {
    let cross = from.x * to.y - from.y * to.x;
    let dot = from.x * to.x + from.y * to.y;
    if cross == 0.0 && dot == 0.0 {
        return 0.0;
    }
    cross.atan2(dot)
}

/// Angle that carries a flat-built leg's contact point back to where the
/// same joint sits when the leg is not swung.
pub fn leg_twist(leg: &Leg) -> f32 {
    let contact = leg.ground_contact_joint();
    signed_angle_z(leg.point(contact), leg.unswung().point(contact))
}

/// Closed-form twist, valid when every ground leg is swung by the same alpha
/// and the legs are geometrically alike.
pub fn simple_twist(ground_legs: &[Leg]) -> f32 {
    let Some(first) = ground_legs.first() else {
        return 0.0;
    };
    let alpha = first.pose.alpha;
    if alpha == 0.0 || ground_legs.iter().any(|leg| leg.pose.alpha != alpha) {
        return 0.0;
    }
    leg_twist(first)
}

/// Whether the simple twist could be wrong for these ground legs.
pub fn might_twist(ground_legs: &[Leg]) -> bool {
    let Some(first) = ground_legs.first() else {
        return false;
    };
    let twist = leg_twist(first);
    ground_legs.iter().any(|leg| {
        leg.pose != first.pose
            || leg.ground_contact_joint() != first.ground_contact_joint()
            || (leg_twist(leg) - twist).abs() > TWIST_EPSILON
    })
}

/// Least-squares rotation about +z that carries the `new` contact layout onto
/// the `old` one. Contacts are paired by leg position; unpaired ones are ignored.
pub fn complex_twist(old: &[GroundContact], new: &[GroundContact]) -> f32 {
    let (cross, dot) = new
        .iter()
        .filter_map(|current| {
            old.iter()
                .find(|reference| reference.position == current.position)
                .map(|reference| (current.point, reference.point))
        })
        .fold((0.0, 0.0), |(cross, dot), (from, to)| {
            (
                cross + from.x * to.y - from.y * to.x,
                dot + from.x * to.x + from.y * to.y,
            )
        });
    if cross == 0.0 && dot == 0.0 {
        return 0.0;
    }
    f32::atan2(cross, dot)
}
