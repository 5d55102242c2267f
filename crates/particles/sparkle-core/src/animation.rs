//! Single shape carried along a path.

use std::ops::Deref;
use std::rc::Rc;

use sparkle_tick::{SharedDriver, TaskBehavior, TaskBuilder, TaskCtl, TickTask};

use crate::config::PlaybackConfig;
use crate::error::Result;
use crate::frames::FrameSet;
use crate::interp::Easing;
use crate::math::Location;
use crate::path::ParticlePath;
use crate::playback::Playback;
use crate::render::{NullRenderer, ParticleOptions, Renderer};
use crate::shape::{Shape, SharedShape};
use crate::shapes::Point;

/// Behaviour of a [`ParticleAnimation`].
pub struct AnimationRunner {
    shape: SharedShape,
    playback: Playback,
    options: ParticleOptions,
    renderer: Box<dyn Renderer>,
}

impl AnimationRunner {
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn options(&self) -> &ParticleOptions {
        &self.options
    }
}

impl TaskBehavior for AnimationRunner {
    fn on_start(&mut self, ctl: &mut TaskCtl<'_>) {
        self.playback.rewind();
        if self.playback.is_empty() {
            log::debug!("animation has no frames; stopping");
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
        if self.playback.is_progressive() {
            let visible = self.playback.visible(&cursor, frame.points.len());
            for point in &frame.points[..visible] {
                self.renderer.draw(frame.base.offset(*point), &self.options);
            }
        } else {
            self.shape
                .render(&frame.base, &self.options, &mut *self.renderer);
        }
    }
}

/// One shape drawn at each base position of a path.
#[derive(Clone)]
pub struct ParticleAnimation(TickTask<AnimationRunner>);

impl ParticleAnimation {
    pub fn builder() -> AnimationBuilder {
        AnimationBuilder::default()
    }

    pub fn task(&self) -> &TickTask<AnimationRunner> {
        &self.0
    }

    pub fn frame_count(&self) -> usize {
        self.0.inspect(|r| r.playback.len()).unwrap_or(0)
    }

    /// Index of the next frame to draw.
    pub fn frame_index(&self) -> Option<usize> {
        self.0.inspect(|r| r.playback.index())
    }

    pub fn is_reversed(&self) -> Option<bool> {
        self.0.inspect(|r| r.playback.is_reversed())
    }
}

impl Deref for ParticleAnimation {
    type Target = TickTask<AnimationRunner>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

sparkle_tick::delegate_schedulable!(ParticleAnimation);

/// Fluent construction of a [`ParticleAnimation`].
pub struct AnimationBuilder {
    shape: SharedShape,
    path: ParticlePath,
    origin: Location,
    playback: PlaybackConfig,
    options: ParticleOptions,
    renderer: Box<dyn Renderer>,
    task: TaskBuilder,
}

impl Default for AnimationBuilder {
    fn default() -> Self {
        Self {
            shape: Rc::new(Point),
            path: ParticlePath::none(),
            origin: Location::default(),
            playback: PlaybackConfig::default(),
            options: ParticleOptions::default(),
            renderer: Box::new(NullRenderer),
            task: TaskBuilder::new(),
        }
    }
}

impl AnimationBuilder {
    pub fn shape(mut self, shape: impl Shape + 'static) -> Self {
        self.shape = Rc::new(shape);
        self
    }

    pub fn shared_shape(mut self, shape: SharedShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn path(mut self, path: ParticlePath) -> Self {
        self.path = path;
        self
    }

    /// Anchor used when the path is static.
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

    /// Stored with the playback settings. The path carries its own curve.
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

    /// Task-level settings: delay, start value, hooks, worker lane.
    pub fn scheduling(mut self, configure: impl FnOnce(TaskBuilder) -> TaskBuilder) -> Self {
        self.task = configure(self.task);
        self
    }

    pub fn build(self, driver: &SharedDriver) -> Result<ParticleAnimation> {
        self.playback.validate()?;
        let mut bases = self.path.generate_frames(self.playback.duration)?;
        if bases.is_empty() {
            bases.push(self.origin);
        }
        let frames = FrameSet::fixed(self.shape.sample(), bases);

        let mut task = self.task;
        self.playback.apply_to(&mut task, frames.len());
        let runner = AnimationRunner {
            shape: self.shape,
            playback: Playback::new(frames, &self.playback),
            options: self.options,
            renderer: self.renderer,
        };
        Ok(ParticleAnimation(task.build(driver, runner)))
    }
}
