#![cfg(test)]

use std::f32::consts::{FRAC_PI_2, SQRT_2};

use glam::Vec3;
use strum::IntoEnumIterator;

use crate::hexapod::body::build_hexagon;
use crate::hexapod::leg::{build_leg, Leg, LegJoint};
use crate::hexapod::orientation::{compute_orientation_properties, GROUND_TOLERANCE};
use crate::hexapod::placement::{Placement, Rotation};
use crate::hexapod::stance::{Stance, StanceFlags};
use crate::hexapod::twist::{complex_twist, leg_twist, might_twist, simple_twist};
use crate::hexapod::{
    Dimensions, GroundContact, LegPose, LegPosition, Pose, DEFAULT_POSE, NEUTRAL_DIMENSIONS,
    POSITIONS, WORLD_AXES,
};

const EPSILON: f32 = 1e-3;

/// Front legs point along their vertex directions and every vertex is equally far out.
const SYMMETRIC_DIMENSIONS: Dimensions = Dimensions {
    front: 100.0,
    side: 100.0,
    middle: 100.0 * SQRT_2,
    coxia: 50.0,
    femur: 80.0,
    tibia: 130.0,
};

fn flat_legs(dimensions: &Dimensions, pose: &Pose) -> Vec<Leg> {
    let body = build_hexagon(dimensions.body());
    POSITIONS
        .iter()
        .map(|&position| build_leg(dimensions.leg(), position, body.vertex(position), pose[position]))
        .collect()
}

fn contacts_of(legs: &[Leg]) -> Vec<GroundContact> {
    legs.iter()
        .map(|leg| GroundContact {
            position: leg.position,
            point: leg.maybe_ground_contact_point(),
        })
        .collect()
}

fn close(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < EPSILON
}

fn tripod_lifted() -> Pose {
    let lifted = LegPose::new(0.0, 30f32.to_radians(), 0.0);
    Pose::from_fn(|position| match position {
        LegPosition::RightMiddle | LegPosition::LeftFront | LegPosition::LeftBack => lifted,
        _ => LegPose::ZERO,
    })
}

fn folded_up() -> Pose {
    Pose::uniform(LegPose::new(0.0, FRAC_PI_2, FRAC_PI_2))
}

fn leaning_right() -> Pose {
    DEFAULT_POSE.with_leg(
        LegPosition::RightMiddle,
        LegPose::new(0.0, -20f32.to_radians(), 0.0),
    )
}

// ============ Leg Tests ============

#[test]
fn test_position_names() {
    assert_eq!(LegPosition::LeftFront.to_string(), "leftFront");
    assert_eq!("rightBack".parse::<LegPosition>().unwrap(), LegPosition::RightBack);
    assert!("middle".parse::<LegPosition>().is_err());
    for (index, position) in LegPosition::iter().enumerate() {
        assert_eq!(position.index(), index);
        assert_eq!(POSITIONS[index], position);
    }
}

#[test]
fn test_neutral_leg_points() {
    let leg = build_leg(
        NEUTRAL_DIMENSIONS.leg(),
        LegPosition::RightMiddle,
        Vec3::new(100.0, 0.0, 0.0),
        LegPose::ZERO,
    );
    assert!(close(leg.body_contact(), Vec3::new(100.0, 0.0, 0.0)));
    assert!(close(leg.point(LegJoint::Coxia), Vec3::new(150.0, 0.0, 0.0)));
    assert!(close(leg.point(LegJoint::Femur), Vec3::new(230.0, 0.0, 0.0)));
    assert!(close(leg.foot_tip(), Vec3::new(230.0, 0.0, -130.0)));
    assert_eq!(leg.ground_contact_joint(), LegJoint::FootTip);
}

#[test]
fn test_leg_follows_mounting_angle() {
    let leg = build_leg(
        NEUTRAL_DIMENSIONS.leg(),
        LegPosition::RightFront,
        Vec3::new(100.0, 100.0, 0.0),
        LegPose::ZERO,
    );
    let out = 130.0 * std::f32::consts::FRAC_1_SQRT_2;
    assert!(close(leg.foot_tip(), Vec3::new(100.0 + out, 100.0 + out, -130.0)));
}

#[test]
fn test_alpha_swings_counterclockwise() {
    let leg = build_leg(
        NEUTRAL_DIMENSIONS.leg(),
        LegPosition::RightMiddle,
        Vec3::ZERO,
        LegPose::new(FRAC_PI_2, 0.0, 0.0),
    );
    assert!(close(leg.foot_tip(), Vec3::new(0.0, 130.0, -130.0)));
}

#[test]
fn test_knee_becomes_contact_when_foot_is_raised() {
    let leg = build_leg(
        NEUTRAL_DIMENSIONS.leg(),
        LegPosition::LeftMiddle,
        Vec3::new(-100.0, 0.0, 0.0),
        LegPose::new(0.0, -30f32.to_radians(), 150f32.to_radians()),
    );
    assert_eq!(leg.ground_contact_joint(), LegJoint::Femur);
    assert!(leg.maybe_ground_contact_point().z < leg.foot_tip().z);
}

#[test]
fn test_contact_tie_goes_to_outer_joint() {
    // coxia and femur both at z = 0, foot raised above them
    let leg = build_leg(
        NEUTRAL_DIMENSIONS.leg(),
        LegPosition::RightMiddle,
        Vec3::ZERO,
        LegPose::new(0.0, 0.0, 100f32.to_radians()),
    );
    assert_eq!(leg.ground_contact_joint(), LegJoint::Femur);
}

#[test]
fn test_leg_clones_keep_contact_joint() {
    let leg = build_leg(
        NEUTRAL_DIMENSIONS.leg(),
        LegPosition::LeftBack,
        Vec3::new(-100.0, -100.0, 0.0),
        LegPose::new(0.2, 0.1, -0.1),
    );
    let rotation = Rotation::from_axis_angle(Vec3::X, 0.5);
    let moved = leg.clone_trot_shift(&rotation, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(moved.ground_contact_joint(), leg.ground_contact_joint());
    assert_eq!(moved.pose, leg.pose);
    for (before, after) in leg.points().iter().zip(moved.points()) {
        assert!(close(rotation.apply(*before) + Vec3::new(1.0, 2.0, 3.0), *after));
    }
}

// ============ Body Tests ============

#[test]
fn test_hexagon_is_flat() {
    let body = build_hexagon(NEUTRAL_DIMENSIONS.body());
    assert!(body.vertices.iter().all(|vertex| vertex.z == 0.0));
    assert_eq!(body.vertex(LegPosition::RightMiddle), Vec3::new(100.0, 0.0, 0.0));
    assert_eq!(body.vertex(LegPosition::LeftBack), Vec3::new(-100.0, -100.0, 0.0));
    assert_eq!(body.head, Vec3::new(0.0, 100.0, 0.0));
    assert_eq!(body.cog, Vec3::ZERO);
}

#[test]
fn test_body_shift_moves_every_point() {
    let body = build_hexagon(NEUTRAL_DIMENSIONS.body()).clone_shift(Vec3::Z * 5.0);
    assert!(body.vertices.iter().all(|vertex| vertex.z == 5.0));
    assert_eq!(body.head.z, 5.0);
    assert_eq!(body.cog, Vec3::new(0.0, 0.0, 5.0));
}

// ============ Rotation Tests ============

#[test]
fn test_aligning_rotation() {
    let normal = Vec3::new(0.3, -0.2, 1.0).normalize();
    let rotation = Rotation::aligning(normal, Vec3::Z);
    assert!(close(rotation.apply(normal) * 1000.0, Vec3::Z * 1000.0));
    assert!((rotation.matrix().determinant() - 1.0).abs() < 1e-5);
}

#[test]
fn test_rotations_compose() {
    let quarter = Rotation::about_z(FRAC_PI_2);
    let half = quarter * quarter;
    assert!(close(half * Vec3::X, -Vec3::X));
    assert_eq!(Rotation::default(), Rotation::IDENTITY);
}

// ============ Orientation Tests ============

#[test]
fn test_neutral_orientation() {
    let legs = flat_legs(&NEUTRAL_DIMENSIONS, &DEFAULT_POSE);
    let orientation = compute_orientation_properties(&legs).expect("neutral pose stands");
    assert!(close(orientation.n_axis, Vec3::Z));
    assert!((orientation.height - 130.0).abs() < EPSILON);
    assert_eq!(orientation.ground_legs.len(), 6);
}

#[test]
fn test_tripod_orientation() {
    let legs = flat_legs(&NEUTRAL_DIMENSIONS, &tripod_lifted());
    let orientation = compute_orientation_properties(&legs).expect("tripod stands");
    let positions: Vec<LegPosition> = orientation.ground_legs.iter().map(|leg| leg.position).collect();
    assert_eq!(
        positions,
        vec![LegPosition::RightFront, LegPosition::LeftMiddle, LegPosition::RightBack]
    );
    assert!((orientation.height - 130.0).abs() < EPSILON);
}

#[test]
fn test_folded_legs_give_no_support() {
    let legs = flat_legs(&NEUTRAL_DIMENSIONS, &folded_up());
    assert!(compute_orientation_properties(&legs).is_none());
}

#[test]
fn test_low_leg_tilts_the_plane() {
    let legs = flat_legs(&NEUTRAL_DIMENSIONS, &leaning_right());
    let orientation = compute_orientation_properties(&legs).expect("leaning pose stands");
    assert!(orientation.n_axis.z < 1.0 - 1e-4);
    assert!(orientation
        .ground_legs
        .iter()
        .any(|leg| leg.position == LegPosition::RightMiddle));
    assert!((3..=6).contains(&orientation.ground_legs.len()));
}

// ============ Twist Tests ============

#[test]
fn test_simple_twist_needs_common_alpha() {
    assert_eq!(simple_twist(&[]), 0.0);
    let mixed = DEFAULT_POSE.with_leg(LegPosition::LeftFront, LegPose::new(0.2, 0.0, 0.0));
    assert_eq!(simple_twist(&flat_legs(&NEUTRAL_DIMENSIONS, &mixed)), 0.0);
    assert_eq!(simple_twist(&flat_legs(&NEUTRAL_DIMENSIONS, &DEFAULT_POSE)), 0.0);
}

#[test]
fn test_symmetric_legs_do_not_need_complex_twist() {
    let legs = flat_legs(&SYMMETRIC_DIMENSIONS, &Pose::uniform(LegPose::new(0.3, 0.0, 0.0)));
    assert!(!might_twist(&legs));
    let legs = flat_legs(&NEUTRAL_DIMENSIONS, &Pose::uniform(LegPose::new(0.3, 0.0, 0.0)));
    assert!(might_twist(&legs), "middle vertices sit closer in than front vertices");
}

#[test]
fn test_uneven_alpha_might_twist() {
    let pose = DEFAULT_POSE.with_leg(LegPosition::RightBack, LegPose::new(-0.4, 0.0, 0.0));
    assert!(might_twist(&flat_legs(&SYMMETRIC_DIMENSIONS, &pose)));
    assert!(!might_twist(&[]));
}

#[test]
fn test_leg_twist_opposes_alpha() {
    let legs = flat_legs(&SYMMETRIC_DIMENSIONS, &Pose::uniform(LegPose::new(0.3, 0.0, 0.0)));
    let expected = -f32::atan2(130.0 * 0.3f32.sin(), 100.0 * SQRT_2 + 130.0 * 0.3f32.cos());
    for leg in &legs {
        assert!((leg_twist(leg) - expected).abs() < 1e-4, "{}", leg.position);
    }
}

#[test]
fn test_complex_twist_recovers_rotation() {
    let new = contacts_of(&flat_legs(&NEUTRAL_DIMENSIONS, &tripod_lifted()));
    let rotation = Rotation::about_z(0.2);
    let old: Vec<GroundContact> = new.iter().map(|contact| contact.clone_trot(&rotation)).collect();
    assert!((complex_twist(&old, &new) - 0.2).abs() < 1e-5);
    assert!((complex_twist(&new, &old) + 0.2).abs() < 1e-5);
}

#[test]
fn test_complex_twist_ignores_unmatched_contacts() {
    let legs = flat_legs(&NEUTRAL_DIMENSIONS, &DEFAULT_POSE);
    let contacts = contacts_of(&legs);
    let (left, right) = contacts.split_at(3);
    assert_eq!(complex_twist(left, right), 0.0);
    assert_eq!(complex_twist(&[], &contacts), 0.0);
}

#[test]
fn test_simple_and_complex_twist_agree_when_symmetric() {
    let pose = Pose::uniform(LegPose::new(0.3, 0.0, 0.0));
    let legs = flat_legs(&SYMMETRIC_DIMENSIONS, &pose);
    let orientation = compute_orientation_properties(&legs).expect("symmetric pose stands");
    let simple = simple_twist(&orientation.ground_legs);
    let reference = contacts_of(&flat_legs(&SYMMETRIC_DIMENSIONS, &DEFAULT_POSE));
    let complex = complex_twist(&reference, &contacts_of(&orientation.ground_legs));
    assert!(simple != 0.0);
    assert!((simple - complex).abs() < 1e-4, "simple {simple} complex {complex}");
}

// ============ Stance Tests ============

#[test]
fn test_neutral_stance() {
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, DEFAULT_POSE);
    assert_eq!(stance.ground_contacts().len(), 6);
    assert_eq!(stance.twist_angle(), 0.0);
    assert!(!stance.has_twisted());
    assert!((stance.distance_from_ground() - 130.0).abs() < EPSILON);
    assert!(stance.ground_contacts().iter().all(|contact| contact.point.z.abs() < EPSILON));
    assert!(stance.local_axes().is_orthonormal(1e-5));
    assert!(close(stance.cog_projection(), Vec3::ZERO));
}

#[test]
fn test_legs_in_canonical_order() {
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, tripod_lifted());
    let positions: Vec<LegPosition> = stance.legs().iter().map(|leg| leg.position).collect();
    assert_eq!(positions, LegPosition::iter().collect::<Vec<_>>());
    assert_eq!(stance.leg(LegPosition::LeftBack).unwrap().position, LegPosition::LeftBack);
}

#[test]
fn test_folded_stance_dangles_flat() {
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, folded_up());
    assert!(stance.is_dangling());
    assert!(stance.ground_contacts().is_empty());
    assert_eq!(stance.twist_angle(), 0.0);
    assert_eq!(stance.local_axes(), WORLD_AXES);
    assert_eq!(*stance.body(), build_hexagon(NEUTRAL_DIMENSIONS.body()));
    assert_eq!(stance.legs(), flat_legs(&NEUTRAL_DIMENSIONS, &folded_up()).as_slice());
    assert_eq!(stance.distance_from_ground(), 0.0);
}

#[test]
fn test_no_gravity_skips_the_solve() {
    let stance = Stance::new(NEUTRAL_DIMENSIONS, DEFAULT_POSE, StanceFlags::no_gravity());
    assert!(stance.is_dangling());
    assert_eq!(stance.body().cog, Vec3::ZERO);
    assert_eq!(stance.legs(), flat_legs(&NEUTRAL_DIMENSIONS, &DEFAULT_POSE).as_slice());
}

#[test]
fn test_shifted_up_lifts_by_leg_length() {
    let stance = Stance::new(
        NEUTRAL_DIMENSIONS,
        DEFAULT_POSE,
        StanceFlags::no_gravity().shifted_up(),
    );
    assert_eq!(stance.distance_from_ground(), 260.0);
    assert_eq!(stance.distance_from_ground(), stance.body().cog.z);
    assert!(stance.legs().iter().all(|leg| leg.foot_tip().z == 130.0));
    let fallback = Stance::new(
        NEUTRAL_DIMENSIONS,
        folded_up(),
        StanceFlags::default().shifted_up(),
    );
    assert!(fallback.is_dangling());
    assert_eq!(fallback.distance_from_ground(), 260.0);
}

#[test]
fn test_shell_has_no_points() {
    let flags = StanceFlags {
        has_no_points: true,
        ..StanceFlags::default()
    };
    let stance = Stance::new(NEUTRAL_DIMENSIONS, DEFAULT_POSE, flags);
    assert!(stance.is_shell());
    assert!(!stance.is_dangling());
    assert!(stance.legs().is_empty());
    assert!(stance.ground_contacts().is_empty());
    assert_eq!(stance.local_axes(), WORLD_AXES);
}

#[test]
fn test_zero_alpha_never_twists() {
    for pose in [tripod_lifted(), leaning_right(), DEFAULT_POSE] {
        let stance = Stance::standing(NEUTRAL_DIMENSIONS, pose);
        assert_eq!(stance.twist_angle(), 0.0);
    }
}

#[test]
fn test_leaning_stance_tilts_local_axes() {
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, leaning_right());
    assert!(!stance.is_dangling());
    assert!(stance.local_axes().z.z < 1.0 - 1e-4);
    assert!(stance.local_axes().is_orthonormal(1e-4));
    assert!(stance.ground_contacts().iter().all(|contact| contact.point.z.abs() < 1e-2));
    for leg in stance.legs() {
        for point in &leg.points()[1..] {
            assert!(point.z > -GROUND_TOLERANCE - 1e-2, "{} below ground", leg.position);
        }
    }
}

#[test]
fn test_symmetric_stance_uses_simple_twist() {
    let pose = Pose::uniform(LegPose::new(0.3, 0.0, 0.0));
    let legs = flat_legs(&SYMMETRIC_DIMENSIONS, &pose);
    let stance = Stance::standing(SYMMETRIC_DIMENSIONS, pose);
    assert!(stance.has_twisted());
    assert!((stance.twist_angle() - leg_twist(&legs[0])).abs() < 1e-5);
    assert!(stance.twist_angle() < 0.0);
    assert!(stance.local_axes().is_orthonormal(1e-5));
}

#[test]
fn test_complex_twist_settles_the_feet() {
    let pose = DEFAULT_POSE.with_leg(LegPosition::LeftFront, LegPose::new(0.5, 0.0, 0.0));
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, pose);
    assert!(stance.has_twisted());
    let reference = contacts_of(&flat_legs(&NEUTRAL_DIMENSIONS, &DEFAULT_POSE));
    // already at the best fit, so nothing is left to correct
    assert!(complex_twist(&reference, stance.ground_contacts()).abs() < 1e-4);
}

#[test]
fn test_clone_trot_identity() {
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, leaning_right());
    let clone = stance.clone_trot(&Rotation::IDENTITY);
    assert!(close(clone.body().cog, stance.body().cog));
    for (a, b) in stance.legs().iter().zip(clone.legs()) {
        for (p, q) in a.points().iter().zip(b.points()) {
            assert!(close(*p, *q));
        }
    }
    for (a, b) in stance.ground_contacts().iter().zip(clone.ground_contacts()) {
        assert_eq!(a.position, b.position);
        assert!(close(a.point, b.point));
    }
}

#[test]
fn test_clone_shift_zero_is_identity() {
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, tripod_lifted());
    let clone = stance.clone_shift(Vec3::ZERO);
    assert_eq!(clone.body(), stance.body());
    assert_eq!(clone.legs(), stance.legs());
    assert_eq!(clone.ground_contacts(), stance.ground_contacts());
    assert_eq!(clone.local_axes(), stance.local_axes());
}

#[test]
fn test_clone_trot_turns_axes_and_keeps_height() {
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, DEFAULT_POSE);
    let quarter = Rotation::about_z(FRAC_PI_2);
    let turned = stance.clone_trot(&quarter);
    assert!(close(turned.local_axes().x, Vec3::Y));
    assert!((turned.distance_from_ground() - stance.distance_from_ground()).abs() < EPSILON);
    assert_eq!(turned.twist_angle(), stance.twist_angle());
    let back = turned.clone_trot(&Rotation::about_z(-FRAC_PI_2));
    assert!(close(back.body().head, stance.body().head));
}

#[test]
fn test_clone_shift_keeps_axes() {
    let stance = Stance::standing(NEUTRAL_DIMENSIONS, DEFAULT_POSE);
    let shifted = stance.clone_shift(Vec3::new(10.0, -5.0, 2.0));
    assert_eq!(shifted.local_axes(), stance.local_axes());
    assert!((shifted.distance_from_ground() - 132.0).abs() < EPSILON);
    assert!(close(shifted.cog_projection(), Vec3::new(10.0, -5.0, 0.0)));
    assert_eq!(shifted.body_dimensions(), NEUTRAL_DIMENSIONS.body());
    assert_eq!(shifted.leg_dimensions(), NEUTRAL_DIMENSIONS.leg());
}
