/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use glam::Vec3;

use crate::hexapod::placement::Placement;
use crate::hexapod::{BodyDimensions, LegPosition};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub vertices: [Vec3; 6],
    pub head: Vec3,
    pub cog: Vec3,
}

/// The flat body: a hexagon in the z = 0 plane, center of gravity at the origin,
/// vertices in canonical leg order.
pub fn build_hexagon(dimensions: BodyDimensions) -> Body {
    let BodyDimensions { front, side, middle } = dimensions;
    Body {
        vertices: [
            Vec3::new(middle, 0.0, 0.0),
            Vec3::new(front, side, 0.0),
            Vec3::new(-front, side, 0.0),
            Vec3::new(-middle, 0.0, 0.0),
            Vec3::new(-front, -side, 0.0),
            Vec3::new(front, -side, 0.0),
        ],
        head: Vec3::new(0.0, side, 0.0),
        cog: Vec3::ZERO,
    }
}

impl Body {
    pub fn vertex(&self, position: LegPosition) -> Vec3 {
        self.vertices[position.index()]
    }
}

impl Placement for Body {
    fn map_points(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Body {
            vertices: self.vertices.map(&f),
            head: f(self.head),
            cog: f(self.cog),
        }
    }
}
