/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Angle units
//!
//! Joint angles live in radians inside the solver, but people write poses in
//! degrees. These wrappers keep the two from being mixed up at the edges.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Degrees(pub f32);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Radians(pub f32);

impl Deref for Degrees {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Radians {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Degrees> for Radians {
    fn from(degrees: Degrees) -> Self {
        Radians(degrees.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(radians: Radians) -> Self {
        Degrees(radians.0.to_degrees())
    }
}

/// How angles are written in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn to_radians(self, value: f32) -> Radians {
        match self {
            AngleUnit::Degrees => Degrees(value).into(),
            AngleUnit::Radians => Radians(value),
        }
    }
}
