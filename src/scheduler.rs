// ===============================
// src/scheduler.rs
// ===============================
//
// Timer abstraction. The app never touches ambient timers: it asks a
// Scheduler to fire a TimerTask later, and whoever drives the app feeds the
// fired tasks back into `Exchange::on_timer`.
//
// - VirtualScheduler: deterministic virtual clock (tests, `script` mode)
// - runtime::TokioScheduler: real timers on the current-thread runtime
//
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use ahash::AHashMap as HashMap;
use chrono::{DateTime, Utc};

use crate::domain::TimerTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub trait Scheduler: Clock {
    fn schedule_periodic(&mut self, period: Duration, task: TimerTask) -> TimerId;
    fn schedule_once(&mut self, delay: Duration, task: TimerTask) -> TimerId;
    /// Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

struct VirtualTimer {
    task: TimerTask,
    period: Option<Duration>,
}

/// Virtual time starting at `epoch`. Nothing fires until `pop_due` is asked
/// for it, so a test decides exactly how far the clock moves.
pub struct VirtualScheduler {
    epoch: DateTime<Utc>,
    elapsed: Duration,
    next_id: u64,
    seq: u64,
    // (due, insertion seq, id): equal deadlines fire in scheduling order
    queue: BinaryHeap<Reverse<(Duration, u64, TimerId)>>,
    timers: HashMap<TimerId, VirtualTimer>,
}

impl VirtualScheduler {
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            epoch,
            elapsed: Duration::ZERO,
            next_id: 0,
            seq: 0,
            queue: BinaryHeap::new(),
            timers: HashMap::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    fn insert(&mut self, delay: Duration, task: TimerTask, period: Option<Duration>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(id, VirtualTimer { task, period });
        self.enqueue(self.elapsed + delay, id);
        id
    }

    fn enqueue(&mut self, due: Duration, id: TimerId) {
        self.seq += 1;
        self.queue.push(Reverse((due, self.seq, id)));
    }

    /// Fires the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Periodic timers are re-armed one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerTask> {
        while let Some(Reverse((due, _, id))) = self.queue.peek().copied() {
            if due > until {
                return None;
            }
            self.queue.pop();
            let Some(timer) = self.timers.get(&id) else {
                // cancelled
                continue;
            };
            let (task, period) = (timer.task.clone(), timer.period);
            self.elapsed = self.elapsed.max(due);
            match period {
                Some(period) => self.enqueue(due + period, id),
                None => {
                    self.timers.remove(&id);
                }
            }
            return Some(task);
        }
        None
    }

    /// Moves the clock to `until` once everything due has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.elapsed = self.elapsed.max(until);
    }
}

impl Clock for VirtualScheduler {
    fn now(&self) -> DateTime<Utc> {
        self.epoch + chrono::Duration::from_std(self.elapsed).unwrap_or_else(|_| chrono::Duration::zero())
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_periodic(&mut self, period: Duration, task: TimerTask) -> TimerId {
        self.insert(period, task, Some(period))
    }

    fn schedule_once(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        self.insert(delay, task, None)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}
