//! Two-shape morph carried along a path.

use std::ops::Deref;
use std::rc::Rc;

use sparkle_tick::{SharedDriver, TaskBehavior, TaskBuilder, TaskCtl, TickTask};

use crate::config::PlaybackConfig;
use crate::error::Result;
use crate::frames::{morph_frames, FrameSet};
use crate::interp::Easing;
use crate::math::Location;
use crate::path::ParticlePath;
use crate::playback::Playback;
use crate::render::{NullRenderer, ParticleOptions, Renderer};
use crate::shape::{Shape, SharedShape};
use crate::shapes::Point;

/// Behaviour of a [`ShapeMorph`].
pub struct MorphRunner {
    playback: Playback,
    options: ParticleOptions,
    renderer: Box<dyn Renderer>,
}

impl MorphRunner {
    pub fn playback(&self) -> &Playback {
        &self.playback
    }
}

impl TaskBehavior for MorphRunner {
    fn on_start(&mut self, ctl: &mut TaskCtl<'_>) {
        self.playback.rewind();
        if self.playback.is_empty() {
            log::debug!("morph has no frames; stopping");
            ctl.stop();
        }
    }

    fn on_tick(&mut self, ctl: &mut TaskCtl<'_>) {
        let Some(cursor) = self.playback.advance() else {
            ctl.stop();
            return;
        };
        let Some(frame) = self.playback.frame(&cursor) else {
            return;
        };
        let visible = self.playback.visible(&cursor, frame.points.len());
        for point in &frame.points[..visible] {
            self.renderer.draw(frame.base.offset(*point), &self.options);
        }
    }
}

/// Point cloud interpolating from one shape to another.
#[derive(Clone)]
pub struct ShapeMorph(TickTask<MorphRunner>);

impl ShapeMorph {
    pub fn builder() -> MorphBuilder {
        MorphBuilder::default()
    }

    pub fn task(&self) -> &TickTask<MorphRunner> {
        &self.0
    }

    pub fn frame_count(&self) -> usize {
        self.0.inspect(|r| r.playback.len()).unwrap_or(0)
    }

    pub fn frame_index(&self) -> Option<usize> {
        self.0.inspect(|r| r.playback.index())
    }

    pub fn is_reversed(&self) -> Option<bool> {
        self.0.inspect(|r| r.playback.is_reversed())
    }
}

impl Deref for ShapeMorph {
    type Target = TickTask<MorphRunner>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

sparkle_tick::delegate_schedulable!(ShapeMorph);

/// Fluent construction of a [`ShapeMorph`].
pub struct MorphBuilder {
    from: SharedShape,
    to: SharedShape,
    path: ParticlePath,
    origin: Location,
    playback: PlaybackConfig,
    options: ParticleOptions,
    renderer: Box<dyn Renderer>,
    task: TaskBuilder,
}

impl Default for MorphBuilder {
    fn default() -> Self {
        Self {
            from: Rc::new(Point),
            to: Rc::new(Point),
            path: ParticlePath::none(),
            origin: Location::default(),
            playback: PlaybackConfig::default(),
            options: ParticleOptions::default(),
            renderer: Box::new(NullRenderer),
            task: TaskBuilder::new(),
        }
    }
}

impl MorphBuilder {
    pub fn from_shape(mut self, shape: impl Shape + 'static) -> Self {
        self.from = Rc::new(shape);
        self
    }

    pub fn to_shape(mut self, shape: impl Shape + 'static) -> Self {
        self.to = Rc::new(shape);
        self
    }

    pub fn path(mut self, path: ParticlePath) -> Self {
        self.path = path;
        self
    }

    /// Anchor of every frame when the path is static.
    pub fn origin(mut self, origin: Location) -> Self {
        self.origin = origin;
        self
    }

    pub fn playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }

    pub fn duration(mut self, duration: u32) -> Self {
        self.playback.duration = duration;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.playback.speed = speed;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.playback.looping = looping;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.playback.reverse = reverse;
        self
    }

    pub fn progressive_draw(mut self, progressive: bool) -> Self {
        self.playback.progressive_draw = progressive;
        self
    }

    /// Curve of the shape interpolation.
    pub fn interpolation(mut self, easing: Easing) -> Self {
        self.playback.easing = easing;
        self
    }

    pub fn particle(mut self, particle: impl Into<String>) -> Self {
        self.options.particle = particle.into();
        self
    }

    pub fn options(mut self, options: ParticleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn scheduling(mut self, configure: impl FnOnce(TaskBuilder) -> TaskBuilder) -> Self {
        self.task = configure(self.task);
        self
    }

    pub fn build(self, driver: &SharedDriver) -> Result<ShapeMorph> {
        self.playback.validate()?;
        let clouds = morph_frames(
            &self.from.sample(),
            &self.to.sample(),
            self.playback.duration,
            self.playback.easing,
        )?;
        let mut bases = self.path.generate_frames(self.playback.duration)?;
        if bases.is_empty() {
            bases = vec![self.origin; clouds.len()];
        }
        let frames = FrameSet::per_frame(clouds, bases);

        let mut task = self.task;
        self.playback.apply_to(&mut task, frames.len());
        let runner = MorphRunner {
            playback: Playback::new(frames, &self.playback),
            options: self.options,
            renderer: self.renderer,
        };
        Ok(ShapeMorph(task.build(driver, runner)))
    }
}
