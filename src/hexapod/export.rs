/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::fs::File;
use std::io::Write;
use std::path::Path;

use glam::Vec3;
use serde::Serialize;

use crate::hexapod::error::StanceError;
use crate::hexapod::leg::Leg;
use crate::hexapod::stance::Stance;
use crate::hexapod::{Dimensions, LegPose, LegPosition};

#[derive(Serialize)]
pub struct StanceExport {
    /// Name of the pose this snapshot was resolved from
    pub name: String,
    pub dimensions: Dimensions,
    pub pose: Vec<LegPoseExport>,
    pub twist_angle: f32,
    pub distance_from_ground: f32,
    pub dangling: bool,
    pub legs: Vec<LegExport>,
    pub body: BodyExport,
    pub local_axes: AxesExport,
    pub ground_contacts: Vec<GroundContactExport>,
}

#[derive(Serialize)]
pub struct LegPoseExport {
    position: LegPosition,
    #[serde(flatten)]
    angles: LegPose,
}

#[derive(Serialize)]
pub struct LegExport {
    position: LegPosition,
    body_contact: [f32; 3],
    coxia: [f32; 3],
    femur: [f32; 3],
    foot_tip: [f32; 3],
    /// Which joint is taken to be the one touching the ground
    contact_joint: String,
}

#[derive(Serialize)]
pub struct BodyExport {
    vertices: Vec<[f32; 3]>,
    head: [f32; 3],
    cog: [f32; 3],
}

#[derive(Serialize)]
pub struct AxesExport {
    x: [f32; 3],
    y: [f32; 3],
    z: [f32; 3],
}

#[derive(Serialize)]
pub struct GroundContactExport {
    position: LegPosition,
    point: [f32; 3],
}

impl From<&Leg> for LegExport {
    fn from(leg: &Leg) -> Self {
        let [body_contact, coxia, femur, foot_tip] = (*leg.points()).map(|point| point.to_array());
        Self {
            position: leg.position,
            body_contact,
            coxia,
            femur,
            foot_tip,
            contact_joint: leg.ground_contact_joint().to_string(),
        }
    }
}

impl Stance {
    pub fn export(&self, name: impl Into<String>) -> StanceExport {
        let body = self.body();
        let axes = self.local_axes();
        StanceExport {
            name: name.into(),
            dimensions: self.dimensions(),
            pose: self
                .pose()
                .iter()
                .map(|(position, angles)| LegPoseExport { position, angles })
                .collect(),
            twist_angle: self.twist_angle(),
            distance_from_ground: self.distance_from_ground(),
            dangling: self.is_dangling(),
            legs: self.legs().iter().map(LegExport::from).collect(),
            body: BodyExport {
                vertices: body.vertices.iter().map(Vec3::to_array).collect(),
                head: body.head.to_array(),
                cog: body.cog.to_array(),
            },
            local_axes: AxesExport {
                x: axes.x.to_array(),
                y: axes.y.to_array(),
                z: axes.z.to_array(),
            },
            ground_contacts: self
                .ground_contacts()
                .iter()
                .map(|contact| GroundContactExport {
                    position: contact.position,
                    point: contact.point.to_array(),
                })
                .collect(),
        }
    }
}

pub fn to_json(exports: &[StanceExport]) -> Result<String, StanceError> {
    Ok(serde_json::to_string_pretty(exports)?)
}

pub fn write_json(exports: &[StanceExport], path: &Path) -> Result<(), StanceError> {
    let json = to_json(exports)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
