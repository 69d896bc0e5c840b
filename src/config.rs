/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::hexapod::error::StanceError;
use crate::hexapod::{Dimensions, LegPose, LegPosition, Pose, DEFAULT_POSE, NEUTRAL_DIMENSIONS, POSITIONS};
use crate::units::AngleUnit;

#[derive(Deserialize)]
struct ConfigFile {
    dimensions: Dimensions,
    #[serde(default)]
    angle_unit: AngleUnit,
    #[serde(default)]
    poses: BTreeMap<String, BTreeMap<LegPosition, LegPose>>,
}

/// Dimensions and named poses, checked and converted to radians.
#[derive(Debug, Clone, PartialEq)]
pub struct StanceConfig {
    pub dimensions: Dimensions,
    poses: Vec<(String, Pose)>,
}

impl Default for StanceConfig {
    fn default() -> Self {
        Self {
            dimensions: NEUTRAL_DIMENSIONS,
            poses: vec![("neutral".to_string(), DEFAULT_POSE)],
        }
    }
}

impl StanceConfig {
    pub fn load(path: &Path) -> Result<Self, StanceError> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded {} poses from {}", config.poses.len(), path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, StanceError> {
        let ConfigFile {
            dimensions,
            angle_unit,
            poses,
        } = serde_json::from_str(json)?;
        validate_dimensions(&dimensions)?;
        let poses = poses
            .into_iter()
            .map(|(name, legs)| {
                let pose = convert_pose(&name, &legs, angle_unit)?;
                Ok((name, pose))
            })
            .collect::<Result<Vec<_>, StanceError>>()?;
        Ok(Self { dimensions, poses })
    }

    pub fn poses(&self) -> &[(String, Pose)] {
        &self.poses
    }

    pub fn pose(&self, name: &str) -> Result<Pose, StanceError> {
        self.poses
            .iter()
            .find_map(|(pose_name, pose)| (pose_name == name).then_some(*pose))
            .ok_or_else(|| StanceError::UnknownPose(name.to_string()))
    }
}

fn validate_dimensions(dimensions: &Dimensions) -> Result<(), StanceError> {
    for (name, value) in dimensions.named() {
        // also rejects NaN
        if !(value > 0.0 && value.is_finite()) {
            return Err(StanceError::NonPositiveDimension { name, value });
        }
    }
    Ok(())
}

fn convert_pose(
    name: &str,
    legs: &BTreeMap<LegPosition, LegPose>,
    angle_unit: AngleUnit,
) -> Result<Pose, StanceError> {
    let mut pose = Pose::default();
    for position in POSITIONS {
        let LegPose { alpha, beta, gamma } =
            *legs.get(&position).ok_or_else(|| StanceError::MissingLeg {
                pose: name.to_string(),
                position,
            })?;
        let leg_pose = LegPose::new(
            *angle_unit.to_radians(alpha),
            *angle_unit.to_radians(beta),
            *angle_unit.to_radians(gamma),
        );
        pose = pose.with_leg(position, leg_pose);
    }
    Ok(pose)
}
