use bevy::prelude::*;
use sparkle_core::{RecordingRenderer, Rgb};
use sparkle_tick::{ManualDriver, SharedDriver};

/// The driver every task of this app registers with. Tasks hold `Rc`
/// handles, so it lives in the world as a non-send resource.
pub struct SparkleDriver(pub ManualDriver);

impl SparkleDriver {
    /// Handle to pass to animation and sequence builders.
    pub fn shared(&self) -> SharedDriver {
        self.0.shared()
    }
}

/// Renderer that animations draw into; drained after each pulse.
#[derive(Default)]
pub struct ParticleBuffer(pub RecordingRenderer);

impl ParticleBuffer {
    pub fn renderer(&self) -> RecordingRenderer {
        self.0.clone()
    }
}

/// One point drawn during the last pulse.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedParticle {
    pub position: Vec3,
    pub particle: String,
    pub color: Option<Color>,
    pub size: f32,
    pub count: u32,
}

/// Points drawn by the most recent pulse, ready for a host render system.
#[derive(Resource, Default, Debug)]
pub struct RenderedParticles {
    pub particles: Vec<RenderedParticle>,
    /// Pulses delivered so far.
    pub pulses: u64,
}

pub(crate) fn to_color(rgb: Rgb) -> Color {
    Color::srgb_u8(rgb.r, rgb.g, rgb.b)
}
