//! Ordered playback of tasks with optional gaps before and after each one.

use std::ops::Deref;
use std::rc::Rc;

use crate::driver::SharedDriver;
use crate::schedulable::Schedulable;
use crate::task::{TaskBehavior, TaskBuilder, TaskCtl, TickTask, WeakTask};

/// One step of a sequence.
#[derive(Clone)]
pub struct SequenceItem {
    task: Rc<dyn Schedulable>,
    delay_before: u64,
    delay_after: u64,
}

impl SequenceItem {
    pub fn new(task: impl Schedulable + 'static) -> Self {
        Self::from_shared(Rc::new(task))
    }

    pub fn from_shared(task: Rc<dyn Schedulable>) -> Self {
        Self {
            task,
            delay_before: 0,
            delay_after: 0,
        }
    }

    /// Heartbeats to wait before the task starts.
    pub fn delay_before(mut self, ticks: u64) -> Self {
        self.delay_before = ticks;
        self
    }

    /// Heartbeats to wait after the task ends.
    pub fn delay_after(mut self, ticks: u64) -> Self {
        self.delay_after = ticks;
        self
    }

    pub fn task(&self) -> &Rc<dyn Schedulable> {
        &self.task
    }
}

/// Behaviour of a sequence task: walks the items and chains their ends.
pub struct SequenceRunner {
    items: Vec<SequenceItem>,
    looping: bool,
    cursor: usize,
    delay: Option<TickTask<()>>,
    driver: SharedDriver,
    this: WeakTask<SequenceRunner>,
}

impl SequenceRunner {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    /// True while a gap before or after an item is counting down.
    pub fn is_waiting(&self) -> bool {
        self.delay.as_ref().is_some_and(|d| d.is_running())
    }

    fn start_current(&mut self, ctl: &mut TaskCtl<'_>) {
        if self.cursor >= self.items.len() {
            if self.looping && !self.items.is_empty() {
                self.cursor = 0;
            } else {
                log::debug!("sequence finished after {} items", self.items.len());
                ctl.finish();
                return;
            }
        }
        let index = self.cursor;
        let delay_before = self.items[index].delay_before;
        if delay_before > 0 {
            self.wait(delay_before, move |runner, _ctl| runner.launch(index));
        } else {
            self.launch(index);
        }
    }

    fn launch(&mut self, index: usize) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        let this = self.this.clone();
        let delay_after = item.delay_after;
        item.task.set_on_end(Box::new(move |_ctl: &mut TaskCtl<'_>| {
            if let Some(sequence) = this.upgrade() {
                sequence.control(move |runner, ctl| runner.finish_item(index, delay_after, ctl));
            }
        }));
        log::debug!("sequence starting item {index}");
        item.task.start();
    }

    fn finish_item(&mut self, index: usize, delay_after: u64, ctl: &mut TaskCtl<'_>) {
        // Ends from an item that is no longer current are ignored.
        if index != self.cursor || !ctl.state().is_running() {
            return;
        }
        if delay_after > 0 {
            self.wait(delay_after, |runner, ctl| runner.advance(ctl));
        } else {
            self.advance(ctl);
        }
    }

    fn advance(&mut self, ctl: &mut TaskCtl<'_>) {
        self.cursor += 1;
        self.start_current(ctl);
    }

    fn wait(&mut self, ticks: u64, then: impl FnOnce(&mut SequenceRunner, &mut TaskCtl<'_>) + 'static) {
        let this = self.this.clone();
        let mut then = Some(then);
        let timer = TaskBuilder::new()
            .limit(ticks)
            .on_end(move |_ctl| {
                let Some(then) = then.take() else {
                    return;
                };
                if let Some(sequence) = this.upgrade() {
                    sequence.control(move |runner, ctl| {
                        runner.delay = None;
                        if ctl.state().is_running() {
                            then(runner, ctl);
                        }
                    });
                }
            })
            .build_timer(&self.driver);
        if let Some(previous) = self.delay.replace(timer.clone()) {
            previous.stop();
        }
        timer.start();
    }
}

impl TaskBehavior for SequenceRunner {
    fn on_start(&mut self, ctl: &mut TaskCtl<'_>) {
        self.cursor = 0;
        if let Some(delay) = self.delay.take() {
            delay.stop();
        }
        if self.items.is_empty() {
            log::debug!("empty sequence ends immediately");
            ctl.finish();
            return;
        }
        self.start_current(ctl);
    }

    fn on_stop(&mut self, _ctl: &mut TaskCtl<'_>) {
        if let Some(delay) = self.delay.take() {
            delay.stop();
        }
        if let Some(item) = self.items.get(self.cursor) {
            item.task.stop();
        }
    }
}

/// Task that plays its items one after another.
#[derive(Clone)]
pub struct Sequence(TickTask<SequenceRunner>);

impl Sequence {
    pub fn builder() -> SequenceBuilder {
        SequenceBuilder::new()
    }

    pub fn task(&self) -> &TickTask<SequenceRunner> {
        &self.0
    }

    /// Index of the item being played or waited on.
    pub fn current_item(&self) -> Option<usize> {
        self.0.inspect(|runner| runner.cursor)
    }

    pub fn len(&self) -> usize {
        self.0.inspect(|runner| runner.items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Deref for Sequence {
    type Target = TickTask<SequenceRunner>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

crate::delegate_schedulable!(Sequence);

/// Fluent construction of a [`Sequence`].
pub struct SequenceBuilder {
    items: Vec<SequenceItem>,
    looping: bool,
    task: TaskBuilder,
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            looping: false,
            task: TaskBuilder::new(),
        }
    }

    pub fn add(self, task: impl Schedulable + 'static) -> Self {
        self.item(SequenceItem::new(task))
    }

    pub fn add_with_delay(self, task: impl Schedulable + 'static, delay_after: u64) -> Self {
        self.item(SequenceItem::new(task).delay_after(delay_after))
    }

    pub fn item(mut self, item: SequenceItem) -> Self {
        self.items.push(item);
        self
    }

    /// Start over from the first item after the last one ends.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Adjust task-level settings such as hooks, delay or lane. The limit,
    /// auto-stop and rate divisor of a sequence are fixed.
    pub fn scheduling(mut self, configure: impl FnOnce(TaskBuilder) -> TaskBuilder) -> Self {
        self.task = configure(self.task);
        self
    }

    pub fn build(self, driver: &SharedDriver) -> Sequence {
        let mut task = self.task;
        let config = task.config_mut();
        config.limit = None;
        config.auto_stop = false;
        config.every = 1;

        let runner = SequenceRunner {
            items: self.items,
            looping: self.looping,
            cursor: 0,
            delay: None,
            driver: Rc::clone(driver),
            this: WeakTask::default(),
        };
        let handle = task.build(driver, runner);
        let weak = handle.downgrade();
        handle.control(move |runner, _ctl| runner.this = weak);
        Sequence(handle)
    }
}
