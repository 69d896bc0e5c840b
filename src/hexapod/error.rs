/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::fmt;
use std::io;

use crate::hexapod::LegPosition;

/// Error types raised while turning outside input into dimensions and poses.
/// Stance resolution itself never fails.
#[derive(Debug)]
pub enum StanceError {
    /// A length that must be positive was zero, negative or not a number
    NonPositiveDimension { name: &'static str, value: f32 },
    /// A pose left out one of the six legs
    MissingLeg { pose: String, position: LegPosition },
    /// A pose was requested by a name the configuration does not have
    UnknownPose(String),
    /// Reading or writing a file failed
    Io(io::Error),
    /// A document was not valid JSON for what it was supposed to hold
    Json(serde_json::Error),
}

impl fmt::Display for StanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StanceError::NonPositiveDimension { name, value } => {
                write!(f, "Dimension {name} must be positive, got {value}")
            }
            StanceError::MissingLeg { pose, position } => {
                write!(f, "Pose {pose} has no angles for {position}")
            }
            StanceError::UnknownPose(name) => write!(f, "No pose named {name}"),
            StanceError::Io(error) => write!(f, "I/O error: {error}"),
            StanceError::Json(error) => write!(f, "JSON error: {error}"),
        }
    }
}

impl std::error::Error for StanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StanceError::Io(error) => Some(error),
            StanceError::Json(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for StanceError {
    fn from(error: io::Error) -> Self {
        StanceError::Io(error)
    }
}

impl From<serde_json::Error> for StanceError {
    fn from(error: serde_json::Error) -> Self {
        StanceError::Json(error)
    }
}
