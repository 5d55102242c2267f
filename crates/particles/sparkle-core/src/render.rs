//! Rendering seam: the host decides what a drawn point looks like.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::Vec3;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Appearance of every point an animation draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
    /// Host particle kind, e.g. "flame" or "dust".
    pub particle: String,
    pub color: Option<Rgb>,
    pub size: f32,
    /// Random spread the host applies around each point.
    pub offset: Vec3,
    /// Particles spawned per point.
    pub count: u32,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            particle: "flame".to_string(),
            color: None,
            size: 1.0,
            offset: Vec3::ZERO,
            count: 1,
        }
    }
}

impl ParticleOptions {
    pub fn default_options() -> Self {
        Self::default()
    }

    /// Colored dust of the given size.
    pub fn of_color(color: Rgb, size: f32) -> Self {
        Self {
            particle: "dust".to_string(),
            color: Some(color),
            size,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn particle(mut self, particle: impl Into<String>) -> Self {
        self.particle = particle.into();
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// Host-side sink for drawn points.
pub trait Renderer {
    fn draw(&mut self, position: Vec3, options: &ParticleOptions);
}

/// Renderer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _position: Vec3, _options: &ParticleOptions) {}
}

/// One recorded draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    pub position: Vec3,
    pub options: ParticleOptions,
}

/// Renderer that appends every draw to a shared log. Clones share the log,
/// so a host can keep one clone and hand another to an animation.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    log: Rc<RefCell<Vec<DrawCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<DrawCall> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.log.borrow().clone()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.log.borrow().iter().map(|c| c.position).collect()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, position: Vec3, options: &ParticleOptions) {
        self.log.borrow_mut().push(DrawCall {
            position,
            options: options.clone(),
        });
    }
}
