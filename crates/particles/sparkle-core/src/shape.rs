//! Point-cloud capability and the explicit-points shape.

use std::fmt;
use std::rc::Rc;

use crate::math::{Location, Vec3};
use crate::render::{ParticleOptions, Renderer};

/// Something that can be expressed as a list of offsets from a base position.
///
/// `sample` must return the same list every time it is called on an
/// unchanged shape.
pub trait Shape {
    fn sample(&self) -> Vec<Vec3>;

    /// Draw the shape at `base`. Drawing every sampled offset is the default.
    fn render(&self, base: &Location, options: &ParticleOptions, renderer: &mut dyn Renderer) {
        for point in self.sample() {
            renderer.draw(base.offset(point), options);
        }
    }
}

/// Shape handle shared between builders and running animations.
pub type SharedShape = Rc<dyn Shape>;

/// Shape backed by an explicit list of offsets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Vec3>,
}

impl PointCloud {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Vec3>> for PointCloud {
    fn from(points: Vec<Vec3>) -> Self {
        Self::new(points)
    }
}

impl From<Vec<[f64; 3]>> for PointCloud {
    fn from(points: Vec<[f64; 3]>) -> Self {
        Self::new(points.into_iter().map(Vec3::from).collect())
    }
}

impl Shape for PointCloud {
    fn sample(&self) -> Vec<Vec3> {
        self.points.clone()
    }
}

impl fmt::Display for PointCloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointCloud({} points)", self.points.len())
    }
}
