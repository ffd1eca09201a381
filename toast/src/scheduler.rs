use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use log::*;

/// One-shot timers on the current thread.
///
/// Tasks due earlier run first. Tasks due at the same time run in the order
/// they were scheduled.
pub trait Scheduler: 'static {
    fn set_timeout(&self, delay: u32, task: Box<dyn FnOnce()>);
}

/// Scheduler driven by an explicit virtual clock, time only moves when told to.
///
/// Clones share the same clock and task list.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    timeline: Rc<RefCell<Timeline>>,
}

#[derive(Default)]
struct Timeline {
    now: u64,
    // (due, sequence) keeps equal due times in scheduling order
    seq: u64,
    tasks: BTreeMap<(u64, u64), Box<dyn FnOnce()>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.timeline.borrow().now
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.timeline.borrow().tasks.len()
    }

    /// Move the clock forward by `ms`, running every task that falls due on
    /// the way, including ones scheduled by tasks run during this call.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now() + ms;
        let ran = self.run_due(target);
        self.timeline.borrow_mut().now = target;
        ran
    }

    /// Run tasks until none are left, leaving the clock at the last due time
    pub fn run_until_idle(&self) -> usize {
        self.run_due(u64::MAX)
    }

    fn run_due(&self, until: u64) -> usize {
        let mut ran = 0;
        // The borrow must end before the task runs, tasks schedule more tasks
        while let Some(task) = self.pop_due(until) {
            task();
            ran += 1;
        }
        trace!("ran {} task(s), now = {}", ran, self.now());
        ran
    }

    fn pop_due(&self, until: u64) -> Option<Box<dyn FnOnce()>> {
        let mut timeline = self.timeline.borrow_mut();
        let entry = timeline.tasks.first_entry()?;
        let (due, _) = *entry.key();
        if due > until {
            return None;
        }
        let task = entry.remove();
        timeline.now = due;
        Some(task)
    }
}

impl Scheduler for VirtualScheduler {
    fn set_timeout(&self, delay: u32, task: Box<dyn FnOnce()>) {
        let mut timeline = self.timeline.borrow_mut();
        let due = timeline.now + delay as u64;
        let seq = timeline.seq;
        timeline.seq += 1;
        timeline.tasks.insert((due, seq), task);
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VirtualScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}
