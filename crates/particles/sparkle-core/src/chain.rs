//! Morph through an ordered list of shapes, with optional spin.

use std::borrow::Cow;
use std::ops::Deref;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use sparkle_tick::{SharedDriver, TaskBehavior, TaskBuilder, TaskCtl, TickTask};

use crate::config::PlaybackConfig;
use crate::error::{FxError, Result};
use crate::frames::{chain_frames, FrameSet};
use crate::interp::Easing;
use crate::math::{rotate_points, Location, Vec3};
use crate::path::ParticlePath;
use crate::playback::Playback;
use crate::render::{NullRenderer, ParticleOptions, Renderer};
use crate::shape::{Shape, SharedShape};

/// Spin applied to every drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation {
    pub turn: bool,
    /// Euler angles (radians) added before each drawn frame.
    pub per_tick: Vec3,
    /// Pivot, relative to the frame's base.
    pub pivot: Vec3,
}

/// Behaviour of a [`ChainMorph`].
pub struct ChainRunner {
    playback: Playback,
    options: ParticleOptions,
    renderer: Box<dyn Renderer>,
    rotation: Rotation,
    angle: Vec3,
}

impl ChainRunner {
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Accumulated rotation of the last drawn frame.
    pub fn angle(&self) -> Vec3 {
        self.angle
    }
}

impl TaskBehavior for ChainRunner {
    fn on_start(&mut self, ctl: &mut TaskCtl<'_>) {
        self.playback.rewind();
        self.angle = Vec3::ZERO;
        if self.playback.is_empty() {
            log::debug!("chain morph has no frames; stopping");
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
        let points = if self.rotation.turn {
            self.angle += self.rotation.per_tick;
            Cow::Owned(rotate_points(frame.points, self.angle, self.rotation.pivot))
        } else {
            Cow::Borrowed(frame.points)
        };
        let visible = self.playback.visible(&cursor, points.len());
        for point in &points[..visible] {
            self.renderer.draw(frame.base.offset(*point), &self.options);
        }
    }
}

/// Point cloud morphing through several shapes in order.
#[derive(Clone)]
pub struct ChainMorph(TickTask<ChainRunner>);

impl ChainMorph {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::default()
    }

    pub fn task(&self) -> &TickTask<ChainRunner> {
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

    pub fn angle(&self) -> Option<Vec3> {
        self.0.inspect(|r| r.angle)
    }

    pub fn set_turn(&self, turn: bool) {
        self.0.control(move |r, _| r.rotation.turn = turn);
    }

    pub fn set_rotation_per_tick(&self, per_tick: Vec3) {
        self.0.control(move |r, _| r.rotation.per_tick = per_tick);
    }

    pub fn set_rotation_origin(&self, pivot: Vec3) {
        self.0.control(move |r, _| r.rotation.pivot = pivot);
    }

    /// Overwrite the accumulated angle.
    pub fn set_rotation(&self, angle: Vec3) {
        self.0.control(move |r, _| r.angle = angle);
    }
}

impl Deref for ChainMorph {
    type Target = TickTask<ChainRunner>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

sparkle_tick::delegate_schedulable!(ChainMorph);

/// Fluent construction of a [`ChainMorph`].
pub struct ChainBuilder {
    /// Each shape with the ticks of the transition into it.
    shapes: Vec<(SharedShape, Option<u32>)>,
    path: ParticlePath,
    origin: Location,
    playback: PlaybackConfig,
    options: ParticleOptions,
    renderer: Box<dyn Renderer>,
    rotation: Rotation,
    task: TaskBuilder,
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            path: ParticlePath::none(),
            origin: Location::default(),
            playback: PlaybackConfig::default(),
            options: ParticleOptions::default(),
            renderer: Box::new(NullRenderer),
            rotation: Rotation::default(),
            task: TaskBuilder::new(),
        }
    }
}

impl ChainBuilder {
    /// Append a shape; its transition gets an even share of the duration.
    pub fn add_shape(mut self, shape: impl Shape + 'static) -> Self {
        self.shapes.push((Rc::new(shape), None));
        self
    }

    /// Append a shape reached after `ticks` steps from the previous one.
    pub fn add_shape_with(mut self, shape: impl Shape + 'static, ticks: u32) -> Self {
        if self.shapes.is_empty() {
            log::debug!("transition ticks on the first chain shape are ignored");
        }
        self.shapes.push((Rc::new(shape), Some(ticks)));
        self
    }

    pub fn add_shared(mut self, shape: SharedShape) -> Self {
        self.shapes.push((shape, None));
        self
    }

    pub fn path(mut self, path: ParticlePath) -> Self {
        self.path = path;
        self
    }

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

    pub fn turn(mut self, turn: bool) -> Self {
        self.rotation.turn = turn;
        self
    }

    pub fn rotation_per_tick(mut self, per_tick: Vec3) -> Self {
        self.rotation.per_tick = per_tick;
        self
    }

    pub fn rotation_origin(mut self, pivot: Vec3) -> Self {
        self.rotation.pivot = pivot;
        self
    }

    pub fn scheduling(mut self, configure: impl FnOnce(TaskBuilder) -> TaskBuilder) -> Self {
        self.task = configure(self.task);
        self
    }

    pub fn build(self, driver: &SharedDriver) -> Result<ChainMorph> {
        self.playback.validate()?;
        if self.shapes.is_empty() {
            return Err(FxError::degenerate("chain morph needs at least one shape"));
        }
        let samples: Vec<Vec<Vec3>> = self.shapes.iter().map(|(s, _)| s.sample()).collect();
        let transitions: Vec<Option<u32>> = self.shapes.iter().skip(1).map(|(_, t)| *t).collect();
        let clouds = chain_frames(
            &samples,
            &transitions,
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
        let runner = ChainRunner {
            playback: Playback::new(frames, &self.playback),
            options: self.options,
            renderer: self.renderer,
            rotation: self.rotation,
            angle: Vec3::ZERO,
        };
        Ok(ChainMorph(task.build(driver, runner)))
    }
}
