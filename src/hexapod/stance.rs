/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use glam::Vec3;
use log::{debug, trace};

use crate::hexapod::body::{build_hexagon, Body};
use crate::hexapod::leg::{build_leg, Leg};
use crate::hexapod::orientation::{compute_orientation_properties, OrientationProperties};
use crate::hexapod::placement::{Placement, Rotation};
use crate::hexapod::twist::{complex_twist, might_twist, simple_twist};
use crate::hexapod::{
    BodyDimensions, Dimensions, GroundContact, LegDimensions, LegPosition, LocalAxes, Pose,
    DEFAULT_POSE, POSITIONS, WORLD_AXES,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StanceFlags {
    /// Skip the ground solve and leave the body dangling.
    pub no_gravity: bool,
    /// Lift a dangling body clear of the ground by one full leg length.
    pub shifted_up: bool,
    /// Produce an empty shell with no geometry at all.
    pub has_no_points: bool,
}

impl StanceFlags {
    pub fn no_gravity() -> Self {
        Self {
            no_gravity: true,
            ..Self::default()
        }
    }

    pub fn shifted_up(self) -> Self {
        Self {
            shifted_up: true,
            ..self
        }
    }
}

/// A hexapod resting on the ground (or dangling, when it cannot), fully placed in
/// world coordinates. Never changes after construction.
#[derive(Debug, Clone)]
pub struct Stance {
    dimensions: Dimensions,
    pose: Pose,
    twist_angle: f32,
    legs: Vec<Leg>,
    body: Body,
    local_axes: LocalAxes,
    ground_contacts: Vec<GroundContact>,
}

fn flat_legs(dimensions: &Dimensions, pose: &Pose, body: &Body) -> Vec<Leg> {
    POSITIONS
        .iter()
        .map(|&position| {
            build_leg(
                dimensions.leg(),
                position,
                body.vertex(position),
                pose[position],
            )
        })
        .collect()
}

/// Where the feet of the default pose meet the ground, in the flat frame.
fn reference_ground_contacts(dimensions: &Dimensions) -> Vec<GroundContact> {
    let body = build_hexagon(dimensions.body());
    flat_legs(dimensions, &DEFAULT_POSE, &body)
        .iter()
        .map(|leg| GroundContact {
            position: leg.position,
            point: leg.maybe_ground_contact_point(),
        })
        .collect()
}

impl Stance {
    pub fn new(dimensions: Dimensions, pose: Pose, flags: StanceFlags) -> Self {
        if flags.has_no_points {
            return Self::shell(dimensions, pose);
        }
        let body = build_hexagon(dimensions.body());
        let legs = flat_legs(&dimensions, &pose, &body);
        if flags.no_gravity {
            return Self::dangling(dimensions, pose, body, legs, flags.shifted_up);
        }
        let Some(orientation) = compute_orientation_properties(&legs) else {
            debug!("No stable support for {pose:?}, leaving the body dangling");
            return Self::dangling(dimensions, pose, body, legs, flags.shifted_up);
        };
        let aligned = Self::aligned(dimensions, pose, &body, &legs, &orientation);
        if pose.all_alpha_zero() {
            return aligned;
        }
        let mut twist_angle = simple_twist(&orientation.ground_legs);
        if might_twist(&orientation.ground_legs) {
            // replaces the simple twist outright
            twist_angle = complex_twist(
                &reference_ground_contacts(&dimensions),
                &aligned.ground_contacts,
            );
        }
        trace!("Twist angle {twist_angle:.5} rad");
        if twist_angle == 0.0 {
            aligned
        } else {
            aligned.twisted(twist_angle)
        }
    }

    pub fn standing(dimensions: Dimensions, pose: Pose) -> Self {
        Self::new(dimensions, pose, StanceFlags::default())
    }

    fn shell(dimensions: Dimensions, pose: Pose) -> Self {
        Self {
            dimensions,
            pose,
            twist_angle: 0.0,
            legs: Vec::new(),
            body: Body::default(),
            local_axes: WORLD_AXES,
            ground_contacts: Vec::new(),
        }
    }

    fn dangling(dimensions: Dimensions, pose: Pose, body: Body, legs: Vec<Leg>, shifted_up: bool) -> Self {
        let (body, legs) = if shifted_up {
            let lift = Vec3::Z * dimensions.leg().reach();
            (
                body.clone_shift(lift),
                legs.iter().map(|leg| leg.clone_shift(lift)).collect(),
            )
        } else {
            (body, legs)
        };
        Self {
            dimensions,
            pose,
            twist_angle: 0.0,
            legs,
            body,
            local_axes: WORLD_AXES,
            ground_contacts: Vec::new(),
        }
    }

    fn aligned(
        dimensions: Dimensions,
        pose: Pose,
        body: &Body,
        legs: &[Leg],
        orientation: &OrientationProperties,
    ) -> Self {
        let rotation = Rotation::aligning(orientation.n_axis, Vec3::Z);
        let lift = Vec3::Z * orientation.height;
        Self {
            dimensions,
            pose,
            twist_angle: 0.0,
            legs: legs
                .iter()
                .map(|leg| leg.clone_trot_shift(&rotation, lift))
                .collect(),
            body: body.clone_trot_shift(&rotation, lift),
            local_axes: WORLD_AXES.rotated(&rotation),
            ground_contacts: orientation
                .ground_legs
                .iter()
                .map(|leg| GroundContact {
                    position: leg.position,
                    point: rotation.apply(leg.maybe_ground_contact_point()) + lift,
                })
                .collect(),
        }
    }

    fn twisted(&self, twist_angle: f32) -> Self {
        Self {
            twist_angle,
            ..self.clone_trot(&Rotation::about_z(twist_angle))
        }
    }

    pub fn clone_trot(&self, rotation: &Rotation) -> Self {
        self.clone_trot_shift(rotation, Vec3::ZERO)
    }

    pub fn clone_shift(&self, offset: Vec3) -> Self {
        self.clone_trot_shift(&Rotation::IDENTITY, offset)
    }

    /// Rotate every point, then translate it. The local axes only rotate.
    pub fn clone_trot_shift(&self, rotation: &Rotation, offset: Vec3) -> Self {
        Self {
            dimensions: self.dimensions,
            pose: self.pose,
            twist_angle: self.twist_angle,
            legs: self
                .legs
                .iter()
                .map(|leg| leg.clone_trot_shift(rotation, offset))
                .collect(),
            body: self.body.clone_trot_shift(rotation, offset),
            local_axes: self.local_axes.rotated(rotation),
            ground_contacts: self
                .ground_contacts
                .iter()
                .map(|contact| contact.clone_trot_shift(rotation, offset))
                .collect(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn twist_angle(&self) -> f32 {
        self.twist_angle
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn leg(&self, position: LegPosition) -> Option<&Leg> {
        self.legs.get(position.index())
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn local_axes(&self) -> LocalAxes {
        self.local_axes
    }

    pub fn ground_contacts(&self) -> &[GroundContact] {
        &self.ground_contacts
    }

    pub fn distance_from_ground(&self) -> f32 {
        self.body.cog.z
    }

    pub fn cog_projection(&self) -> Vec3 {
        self.body.cog.with_z(0.0)
    }

    pub fn has_twisted(&self) -> bool {
        self.twist_angle != 0.0
    }

    pub fn body_dimensions(&self) -> BodyDimensions {
        self.dimensions.body()
    }

    pub fn leg_dimensions(&self) -> LegDimensions {
        self.dimensions.leg()
    }

    pub fn is_shell(&self) -> bool {
        self.legs.is_empty()
    }

    /// No ground support was found, or none was asked for.
    pub fn is_dangling(&self) -> bool {
        !self.is_shell() && self.ground_contacts.is_empty()
    }
}
