//! Lifecycle primitive driven by host heartbeats.
//!
//! A [`TickTask`] pairs scheduling state (counter, limit, rate divisor,
//! pause flag) with a [`TaskBehavior`] and optional per-event hooks. Hooks
//! fire before the behaviour for the same event.
//!
//! Calls made on a task while that task is inside one of its own callbacks
//! are queued and applied, in order, as soon as the callback's heartbeat
//! returns. This is what lets a looping one-item sequence restart its item
//! from the item's own end hook.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::TaskConfig;
use crate::driver::{Beat, HeartbeatRequest, Lane, SharedDriver};
use crate::ids::HeartbeatHandle;
use crate::state::TaskState;

/// Listener attached to one lifecycle event.
pub type Hook = Box<dyn FnMut(&mut TaskCtl<'_>)>;

/// Values readable from outside a task while it is busy.
#[derive(Debug, Default)]
struct Mirror {
    state: Cell<TaskState>,
    current: Cell<u64>,
}

/// Scheduling state owned by a task.
struct TaskCore {
    config: TaskConfig,
    current: u64,
    tick_counter: u64,
    state: TaskState,
    ended: bool,
    stop_requested: bool,
    finish_requested: bool,
    generation: u64,
    handle: Option<HeartbeatHandle>,
    mirror: Rc<Mirror>,
}

impl TaskCore {
    fn new(config: TaskConfig, mirror: Rc<Mirror>) -> Self {
        mirror.current.set(config.start_at);
        Self {
            current: config.start_at,
            config,
            tick_counter: 0,
            state: TaskState::Idle,
            ended: false,
            stop_requested: false,
            finish_requested: false,
            generation: 0,
            handle: None,
            mirror,
        }
    }

    fn set_state(&mut self, state: TaskState) {
        self.state = state;
        self.mirror.state.set(state);
    }

    fn set_current(&mut self, current: u64) {
        self.current = current;
        self.mirror.current.set(current);
    }

    fn reset(&mut self) {
        self.set_current(self.config.start_at);
        self.ended = false;
    }

    fn halting(&self) -> bool {
        self.stop_requested || self.finish_requested
    }
}

/// View of a task handed to its callbacks.
pub struct TaskCtl<'a> {
    core: &'a mut TaskCore,
}

impl<'a> TaskCtl<'a> {
    #[inline]
    pub fn current(&self) -> u64 {
        self.core.current
    }

    #[inline]
    pub fn limit(&self) -> Option<u64> {
        self.core.config.limit
    }

    #[inline]
    pub fn every(&self) -> u64 {
        self.core.config.every
    }

    #[inline]
    pub fn state(&self) -> TaskState {
        self.core.state
    }

    /// Restore the counter to its start value.
    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// Stop the task once the running callback returns. Later callbacks of
    /// the same heartbeat are skipped.
    pub fn stop(&mut self) {
        self.core.stop_requested = true;
    }

    /// End the run once the running callback returns: end callbacks fire
    /// (unless the limit already fired them) and the task stops.
    pub fn finish(&mut self) {
        self.core.finish_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.core.halting()
    }
}

/// Behaviour half of a task. Every method defaults to a no-op.
pub trait TaskBehavior: 'static {
    fn on_start(&mut self, _ctl: &mut TaskCtl<'_>) {}
    fn on_tick(&mut self, _ctl: &mut TaskCtl<'_>) {}
    fn on_pause(&mut self, _ctl: &mut TaskCtl<'_>) {}
    fn on_resume(&mut self, _ctl: &mut TaskCtl<'_>) {}
    fn on_stop(&mut self, _ctl: &mut TaskCtl<'_>) {}
    fn on_end(&mut self, _ctl: &mut TaskCtl<'_>) {}

    /// Called on every lifecycle transition, before the matching hooks.
    fn report_status(&mut self, _state: TaskState) {}
}

/// Plain counter with no behaviour of its own.
impl TaskBehavior for () {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Start,
    Tick,
    Pause,
    Resume,
    Stop,
    End,
}

/// Optional listeners, one per event.
#[derive(Default)]
pub struct Hooks {
    pub on_start: Option<Hook>,
    pub on_tick: Option<Hook>,
    pub on_pause: Option<Hook>,
    pub on_resume: Option<Hook>,
    pub on_stop: Option<Hook>,
    pub on_end: Option<Hook>,
}

impl Hooks {
    fn slot(&mut self, event: Event) -> Option<&mut Hook> {
        match event {
            Event::Start => self.on_start.as_mut(),
            Event::Tick => self.on_tick.as_mut(),
            Event::Pause => self.on_pause.as_mut(),
            Event::Resume => self.on_resume.as_mut(),
            Event::Stop => self.on_stop.as_mut(),
            Event::End => self.on_end.as_mut(),
        }
    }
}

struct TaskInner<B> {
    core: TaskCore,
    hooks: Hooks,
    behavior: B,
}

impl<B: TaskBehavior> TaskInner<B> {
    fn fire(&mut self, event: Event) {
        let TaskInner {
            core,
            hooks,
            behavior,
        } = self;
        let mut ctl = TaskCtl { core };
        if let Some(hook) = hooks.slot(event) {
            hook(&mut ctl);
            if event != Event::Stop && ctl.stop_requested() {
                return;
            }
        }
        match event {
            Event::Start => behavior.on_start(&mut ctl),
            Event::Tick => behavior.on_tick(&mut ctl),
            Event::Pause => behavior.on_pause(&mut ctl),
            Event::Resume => behavior.on_resume(&mut ctl),
            Event::Stop => behavior.on_stop(&mut ctl),
            Event::End => behavior.on_end(&mut ctl),
        }
    }

    fn transition(&mut self, state: TaskState) {
        self.core.set_state(state);
        self.behavior.report_status(state);
    }
}

type Edit<B> = Box<dyn FnOnce(&mut B, &mut TaskCtl<'_>)>;

enum Op<B> {
    Start,
    Stop,
    Pause,
    Resume,
    Reset,
    SetOnEnd(Hook),
    Edit(Edit<B>),
}

struct Shared<B> {
    inner: RefCell<TaskInner<B>>,
    queue: RefCell<VecDeque<Op<B>>>,
    mirror: Rc<Mirror>,
    driver: SharedDriver,
}

/// Shared handle to a scheduled task. Clones refer to the same task.
///
/// While running, the driver holds a clone, so a started task keeps going
/// after the caller drops its own handle.
pub struct TickTask<B: TaskBehavior> {
    shared: Rc<Shared<B>>,
}

impl<B: TaskBehavior> Clone for TickTask<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<B: TaskBehavior> fmt::Debug for TickTask<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickTask")
            .field("state", &self.state())
            .field("current", &self.current())
            .finish()
    }
}

/// Non-owning handle, used by callbacks that refer back to their owner.
pub struct WeakTask<B: TaskBehavior> {
    shared: Weak<Shared<B>>,
}

impl<B: TaskBehavior> Clone for WeakTask<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<B: TaskBehavior> Default for WeakTask<B> {
    fn default() -> Self {
        Self { shared: Weak::new() }
    }
}

impl<B: TaskBehavior> WeakTask<B> {
    pub fn upgrade(&self) -> Option<TickTask<B>> {
        self.shared.upgrade().map(|shared| TickTask { shared })
    }
}

impl<B: TaskBehavior> TickTask<B> {
    pub fn new(driver: &SharedDriver, mut config: TaskConfig, hooks: Hooks, behavior: B) -> Self {
        config.normalize();
        let mirror = Rc::new(Mirror::default());
        let core = TaskCore::new(config, Rc::clone(&mirror));
        Self {
            shared: Rc::new(Shared {
                inner: RefCell::new(TaskInner {
                    core,
                    hooks,
                    behavior,
                }),
                queue: RefCell::new(VecDeque::new()),
                mirror,
                driver: Rc::clone(driver),
            }),
        }
    }

    pub fn builder() -> TaskBuilder {
        TaskBuilder::new()
    }

    /// Begin (or restart) the task.
    pub fn start(&self) {
        self.dispatch(Op::Start);
    }

    /// Alias of [`TickTask::start`].
    pub fn play(&self) {
        self.start();
    }

    pub fn stop(&self) {
        self.dispatch(Op::Stop);
    }

    pub fn pause(&self) {
        self.dispatch(Op::Pause);
    }

    pub fn resume(&self) {
        self.dispatch(Op::Resume);
    }

    /// Restore the counter to its start value without touching run state.
    pub fn reset(&self) {
        self.dispatch(Op::Reset);
    }

    /// Replace the end hook.
    pub fn set_on_end(&self, hook: impl FnMut(&mut TaskCtl<'_>) + 'static) {
        self.dispatch(Op::SetOnEnd(Box::new(hook)));
    }

    /// Mutate the behaviour. A stop requested through the control view is
    /// applied right after `edit` returns.
    pub fn control(&self, edit: impl FnOnce(&mut B, &mut TaskCtl<'_>) + 'static) {
        self.dispatch(Op::Edit(Box::new(edit)));
    }

    /// Read the behaviour. Returns `None` while the task is inside one of
    /// its own callbacks.
    pub fn inspect<R>(&self, read: impl FnOnce(&B) -> R) -> Option<R> {
        self.shared
            .inner
            .try_borrow()
            .ok()
            .map(|inner| read(&inner.behavior))
    }

    /// Copy of the scheduling parameters, when not busy.
    pub fn config(&self) -> Option<TaskConfig> {
        self.shared
            .inner
            .try_borrow()
            .ok()
            .map(|inner| inner.core.config.clone())
    }

    #[inline]
    pub fn state(&self) -> TaskState {
        self.shared.mirror.state.get()
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.shared.mirror.current.get()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state() == TaskState::Paused
    }

    /// Running and not paused.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn downgrade(&self) -> WeakTask<B> {
        WeakTask {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn driver(&self) -> &SharedDriver {
        &self.shared.driver
    }

    fn dispatch(&self, op: Op<B>) {
        match self.shared.inner.try_borrow_mut() {
            Ok(mut inner) => self.apply(&mut inner, op),
            Err(_) => {
                self.shared.queue.borrow_mut().push_back(op);
                return;
            }
        }
        self.drain();
    }

    fn drain(&self) {
        loop {
            let Ok(mut inner) = self.shared.inner.try_borrow_mut() else {
                return;
            };
            let next = self.shared.queue.borrow_mut().pop_front();
            let Some(op) = next else {
                return;
            };
            self.apply(&mut inner, op);
        }
    }

    fn apply(&self, inner: &mut TaskInner<B>, op: Op<B>) {
        match op {
            Op::Start => self.start_now(inner),
            Op::Stop => self.stop_now(inner),
            Op::Pause => {
                if inner.core.state.can_pause() {
                    inner.transition(TaskState::Paused);
                    inner.fire(Event::Pause);
                    self.settle(inner);
                }
            }
            Op::Resume => {
                if inner.core.state.can_resume() {
                    inner.transition(TaskState::Running);
                    inner.fire(Event::Resume);
                    self.settle(inner);
                }
            }
            Op::Reset => inner.core.reset(),
            Op::SetOnEnd(hook) => inner.hooks.on_end = Some(hook),
            Op::Edit(edit) => {
                let TaskInner { core, behavior, .. } = &mut *inner;
                edit(behavior, &mut TaskCtl { core });
                self.settle(inner);
            }
        }
    }

    /// Apply a stop or finish requested from a callback. Returns true if
    /// the task stopped.
    fn settle(&self, inner: &mut TaskInner<B>) -> bool {
        if std::mem::take(&mut inner.core.finish_requested) {
            if !inner.core.ended && inner.core.state.is_running() {
                inner.core.ended = true;
                inner.fire(Event::End);
            }
            self.stop_now(inner);
            return true;
        }
        if std::mem::take(&mut inner.core.stop_requested) {
            self.stop_now(inner);
            return true;
        }
        false
    }

    fn start_now(&self, inner: &mut TaskInner<B>) {
        if inner.core.state.is_running() {
            self.stop_now(inner);
        }
        let core = &mut inner.core;
        core.stop_requested = false;
        core.finish_requested = false;
        core.ended = false;
        core.tick_counter = 0;
        core.generation += 1;
        core.set_current(core.config.start_at);
        log::debug!(
            "task start (start_at={}, limit={:?}, every={}, delay={})",
            core.config.start_at,
            core.config.limit,
            core.config.every,
            core.config.delay
        );
        inner.transition(TaskState::Running);
        inner.fire(Event::Start);
        if self.settle(inner) {
            return;
        }

        let request = HeartbeatRequest {
            delay: inner.core.config.delay,
            interval: 1,
            lane: if inner.core.config.run_on_worker {
                Lane::Worker
            } else {
                Lane::Primary
            },
        };
        let generation = inner.core.generation;
        let task = self.clone();
        let handle = self
            .shared
            .driver
            .register(request, Box::new(move || task.heartbeat(generation)));
        inner.core.handle = Some(handle);
    }

    fn stop_now(&self, inner: &mut TaskInner<B>) {
        if !inner.core.state.is_running() {
            return;
        }
        inner.transition(TaskState::Stopped);
        if let Some(handle) = inner.core.handle.take() {
            self.shared.driver.cancel(handle);
        }
        log::debug!("task stop at {}", inner.core.current);
        inner.fire(Event::Stop);
        inner.core.stop_requested = false;
        inner.core.finish_requested = false;
    }

    fn heartbeat(&self, generation: u64) -> Beat {
        if let Ok(mut inner) = self.shared.inner.try_borrow_mut() {
            if inner.core.generation == generation {
                self.tick(&mut inner);
            }
        }
        self.drain();
        let beat = match self.shared.inner.try_borrow() {
            Ok(inner) if inner.core.generation != generation => Beat::Done,
            Ok(inner) if !inner.core.state.is_running() => Beat::Done,
            _ => Beat::Continue,
        };
        beat
    }

    fn tick(&self, inner: &mut TaskInner<B>) {
        if !inner.core.state.is_active() {
            return;
        }
        inner.core.tick_counter += 1;
        if inner.core.tick_counter < inner.core.config.every {
            return;
        }
        inner.core.tick_counter = 0;
        let next = inner.core.current + 1;
        inner.core.set_current(next);
        log::trace!("task tick {next}");

        inner.fire(Event::Tick);
        if self.settle(inner) {
            return;
        }

        if !inner.core.ended && inner.core.config.limit_reached(inner.core.current) {
            inner.core.ended = true;
            log::debug!("task reached its limit at {}", inner.core.current);
            inner.fire(Event::End);
            if self.settle(inner) {
                return;
            }
            if inner.core.config.auto_stop {
                self.stop_now(inner);
            }
        }
    }
}

impl<B: TaskBehavior> crate::Schedulable for TickTask<B> {
    fn start(&self) {
        TickTask::start(self)
    }

    fn stop(&self) {
        TickTask::stop(self)
    }

    fn pause(&self) {
        TickTask::pause(self)
    }

    fn resume(&self) {
        TickTask::resume(self)
    }

    fn reset(&self) {
        TickTask::reset(self)
    }

    fn state(&self) -> TaskState {
        TickTask::state(self)
    }

    fn current(&self) -> u64 {
        TickTask::current(self)
    }

    fn set_on_end(&self, hook: Hook) {
        self.dispatch(Op::SetOnEnd(hook));
    }
}

/// Fluent construction of tasks.
#[derive(Default)]
pub struct TaskBuilder {
    config: TaskConfig,
    hooks: Hooks,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: TaskConfig) -> Self {
        Self {
            config,
            hooks: Hooks::default(),
        }
    }

    pub fn start_at(mut self, start_at: u64) -> Self {
        self.config.start_at = start_at;
        self
    }

    /// A limit of 0 means unbounded.
    pub fn limit(mut self, limit: u64) -> Self {
        self.config.limit = (limit > 0).then_some(limit);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.config.limit = None;
        self
    }

    pub fn delay(mut self, delay: u64) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn every(mut self, every: u64) -> Self {
        self.config.every = every;
        self
    }

    pub fn run_on_worker(mut self, run_on_worker: bool) -> Self {
        self.config.run_on_worker = run_on_worker;
        self
    }

    pub fn auto_stop(mut self, auto_stop: bool) -> Self {
        self.config.auto_stop = auto_stop;
        self
    }

    pub fn on_start(mut self, hook: impl FnMut(&mut TaskCtl<'_>) + 'static) -> Self {
        self.hooks.on_start = Some(Box::new(hook));
        self
    }

    pub fn on_tick(mut self, hook: impl FnMut(&mut TaskCtl<'_>) + 'static) -> Self {
        self.hooks.on_tick = Some(Box::new(hook));
        self
    }

    pub fn on_pause(mut self, hook: impl FnMut(&mut TaskCtl<'_>) + 'static) -> Self {
        self.hooks.on_pause = Some(Box::new(hook));
        self
    }

    pub fn on_resume(mut self, hook: impl FnMut(&mut TaskCtl<'_>) + 'static) -> Self {
        self.hooks.on_resume = Some(Box::new(hook));
        self
    }

    pub fn on_stop(mut self, hook: impl FnMut(&mut TaskCtl<'_>) + 'static) -> Self {
        self.hooks.on_stop = Some(Box::new(hook));
        self
    }

    pub fn on_end(mut self, hook: impl FnMut(&mut TaskCtl<'_>) + 'static) -> Self {
        self.hooks.on_end = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TaskConfig {
        &mut self.config
    }

    pub fn build<B: TaskBehavior>(self, driver: &SharedDriver, behavior: B) -> TickTask<B> {
        TickTask::new(driver, self.config, self.hooks, behavior)
    }

    /// Counter-only task, typically a delay.
    pub fn build_timer(self, driver: &SharedDriver) -> TickTask<()> {
        self.build(driver, ())
    }
}
