//! Single-threaded one-shot timers.
//!
//! Tasks are plain payloads rather than callbacks: the owner schedules a value,
//! the game loop calls [`TimerQueue::advance`] once per frame and dispatches
//! whatever comes back. Dropping the [`TimerHandle`] cancels the task, so a
//! pending timer never outlives whoever holds its handle.

use std::cell::Cell;
use std::rc::Rc;

// Deadlines within this window of the clock count as reached.
const DEADLINE_EPSILON: f64 = 1e-6;

struct ScheduledTask<T> {
    sequence: u64,
    deadline: f64,
    payload: T,
    pending: Rc<Cell<bool>>,
}

/// Cancelable reference to a scheduled task. Cancels the task on drop.
#[derive(Debug)]
pub struct TimerHandle {
    pending: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.pending.set(false);
    }

    /// True until the task fires or is cancelled.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct TimerQueue<T> {
    now: f64,
    next_sequence: u64,
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_sequence: 0,
            tasks: Vec::new(),
        }
    }

    /// Seconds elapsed on this queue's clock.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule_once(&mut self, delay_seconds: f32, payload: T) -> TimerHandle {
        let delay = if delay_seconds.is_finite() {
            delay_seconds.max(0.0) as f64
        } else {
            0.0
        };

        let pending = Rc::new(Cell::new(true));
        self.tasks.push(ScheduledTask {
            sequence: self.next_sequence,
            deadline: self.now + delay,
            payload,
            pending: pending.clone(),
        });
        self.next_sequence += 1;

        TimerHandle { pending }
    }

    /// Advance the clock by `dt` seconds and return every live task whose
    /// deadline has been reached, earliest first.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt as f64;
        }

        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .filter(|task| task.pending.get())
            .partition(|task| task.deadline <= now + DEADLINE_EPSILON);
        self.tasks = waiting;

        due.sort_by(|a, b| {
            a.deadline
                .total_cmp(&b.deadline)
                .then(a.sequence.cmp(&b.sequence))
        });

        due.into_iter()
            .map(|task| {
                task.pending.set(false);
                task.payload
            })
            .collect()
    }

    /// Number of tasks that are still waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.pending.get()).count()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
