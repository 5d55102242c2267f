use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sparkle_tick::{ManualDriver, Sequence, SequenceItem, TaskBuilder, TaskState, TickTask};

type Journal = Rc<RefCell<Vec<(String, u64)>>>;

/// Timer that logs `(name, pulse)` when it starts.
fn step(driver: &ManualDriver, journal: &Journal, name: &str, limit: u64) -> TickTask<()> {
    let journal = Rc::clone(journal);
    let clock = driver.clone();
    let name = name.to_string();
    TaskBuilder::new()
        .limit(limit)
        .on_start(move |_| journal.borrow_mut().push((name.clone(), clock.pulses())))
        .build_timer(&driver.shared())
}

fn names(journal: &Journal) -> Vec<String> {
    journal.borrow().iter().map(|(n, _)| n.clone()).collect()
}

fn started_at(journal: &Journal, name: &str) -> Option<u64> {
    journal
        .borrow()
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, pulse)| *pulse)
}

/// it should play items in order and wait `delay_after` heartbeats between them
#[test]
fn items_run_in_order_with_gap_after() {
    let driver = ManualDriver::default();
    let journal = Journal::default();
    let ended_at = Rc::new(Cell::new(0));
    let first = {
        let clock = driver.clone();
        let ended_at = Rc::clone(&ended_at);
        TaskBuilder::new()
            .limit(1)
            .on_stop(move |_| ended_at.set(clock.pulses()))
            .build_timer(&driver.shared())
    };
    let second = step(&driver, &journal, "second", 1);

    let sequence = Sequence::builder()
        .add_with_delay(first, 5)
        .add(second)
        .build(&driver.shared());
    sequence.start();

    driver.run(20);
    assert_eq!(ended_at.get(), 1);
    assert_eq!(started_at(&journal, "second"), Some(6));
    assert_eq!(sequence.state(), TaskState::Stopped);
}

/// it should wait `delay_before` heartbeats before starting an item
#[test]
fn gap_before_item() {
    let driver = ManualDriver::default();
    let journal = Journal::default();
    let sequence = Sequence::builder()
        .item(SequenceItem::new(step(&driver, &journal, "a", 2)).delay_before(3))
        .build(&driver.shared());

    sequence.start();
    assert!(sequence.inspect(|r| r.is_waiting()).unwrap_or(false));
    driver.run(2);
    assert!(journal.borrow().is_empty());
    driver.pulse();
    assert_eq!(started_at(&journal, "a"), Some(3));
}

/// it should restart a single looping item every time it ends
#[test]
fn looping_single_item_restarts() {
    let driver = ManualDriver::default();
    let journal = Journal::default();
    let sequence = Sequence::builder()
        .add(step(&driver, &journal, "only", 2))
        .looping(true)
        .build(&driver.shared());

    sequence.start();
    driver.run(6);
    assert_eq!(names(&journal).len(), 4);
    assert!(sequence.is_running());
    assert_eq!(sequence.current_item(), Some(0));
}

/// it should wrap to the first item when looping
#[test]
fn looping_wraps_to_first_item() {
    let driver = ManualDriver::default();
    let journal = Journal::default();
    let sequence = Sequence::builder()
        .add(step(&driver, &journal, "a", 1))
        .add(step(&driver, &journal, "b", 1))
        .looping(true)
        .build(&driver.shared());

    sequence.start();
    driver.run(3);
    assert_eq!(names(&journal), vec!["a", "b", "a", "b"]);
}

/// it should stop the current item and any pending gap when stopped
#[test]
fn stop_cancels_item_and_gap() {
    let driver = ManualDriver::default();
    let journal = Journal::default();
    let first = step(&driver, &journal, "a", 1);
    let sequence = Sequence::builder()
        .add_with_delay(first, 10)
        .add(step(&driver, &journal, "b", 1))
        .build(&driver.shared());

    sequence.start();
    driver.pulse();
    assert!(sequence.inspect(|r| r.is_waiting()).unwrap_or(false));

    sequence.stop();
    assert_eq!(driver.active(), 0);
    driver.run(20);
    assert_eq!(names(&journal), vec!["a"]);
}

/// it should stop a running item when the sequence stops
#[test]
fn stop_stops_running_item() {
    let driver = ManualDriver::default();
    let item = TaskBuilder::new().limit(50).build_timer(&driver.shared());
    let sequence = Sequence::builder()
        .add(item.clone())
        .build(&driver.shared());

    sequence.start();
    driver.run(3);
    assert!(item.is_running());
    sequence.stop();
    assert_eq!(item.state(), TaskState::Stopped);
}

/// it should end immediately when it has no items
#[test]
fn empty_sequence_ends_immediately() {
    let driver = ManualDriver::default();
    let ended = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ended);
    let sequence = Sequence::builder()
        .scheduling(|t| t.on_end(move |_| flag.set(true)))
        .build(&driver.shared());

    sequence.start();
    assert!(ended.get());
    assert_eq!(sequence.state(), TaskState::Stopped);
    assert_eq!(driver.active(), 0);
    assert!(sequence.is_empty());
}

/// it should play a nested sequence as a single item
#[test]
fn nested_sequence_chains() {
    let driver = ManualDriver::default();
    let journal = Journal::default();
    let inner = Sequence::builder()
        .add(step(&driver, &journal, "a", 1))
        .add(step(&driver, &journal, "b", 1))
        .build(&driver.shared());
    let outer = Sequence::builder()
        .add(inner)
        .add(step(&driver, &journal, "c", 1))
        .build(&driver.shared());

    outer.start();
    driver.run(10);
    assert_eq!(names(&journal), vec!["a", "b", "c"]);
    assert_eq!(outer.state(), TaskState::Stopped);
}

/// it should start over from the first item when restarted
#[test]
fn restart_begins_at_first_item() {
    let driver = ManualDriver::default();
    let journal = Journal::default();
    let sequence = Sequence::builder()
        .add(step(&driver, &journal, "a", 3))
        .add(step(&driver, &journal, "b", 3))
        .build(&driver.shared());

    sequence.start();
    driver.run(4);
    assert_eq!(sequence.current_item(), Some(1));
    sequence.start();
    assert_eq!(sequence.current_item(), Some(0));
    assert_eq!(names(&journal), vec!["a", "b", "a"]);
}
