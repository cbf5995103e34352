//! Virtual-time task queue.
//!
//! The controller never sleeps or spawns threads. Delayed work (the start
//! delay, the countdown, hiding a mismatched pair) is scheduled here, and
//! the host moves time forward with [`TimerQueue::pop_due`]. A cancelled
//! task never fires, including a repeating task that was due more than once
//! inside the same advance.
//!
//! ```
//! use std::time::Duration;
//! use memory_match::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let tick = timers.schedule_repeating(Duration::from_secs(1), "tick");
//!
//! let until = Duration::from_millis(2500);
//! let mut fired = Vec::new();
//! while let Some((_, event)) = timers.pop_due(until) {
//!     fired.push(event);
//! }
//! assert_eq!(fired, ["tick", "tick"]);
//!
//! assert!(timers.cancel(tick));
//! assert!(timers.pop_due(Duration::from_secs(10)).is_none());
//! ```

use std::time::Duration;

use smallvec::SmallVec;

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Task<E> {
    id: TimerId,
    deadline: Duration,
    period: Option<Duration>,
    event: E,
}

/// Ordered queue of one-shot and repeating tasks over a virtual clock.
///
/// Tasks with equal deadlines fire in scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    next_id: u64,
    tasks: SmallVec<[Task<E>; 4]>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: SmallVec::new(),
        }
    }
}

impl<E: Clone> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `event` once after `delay`.
    pub fn schedule_once(&mut self, delay: Duration, event: E) -> TimerId {
        self.push(delay, None, event)
    }

    /// Run `event` every `period`, first after one full period.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn schedule_repeating(&mut self, period: Duration, event: E) -> TimerId {
        assert!(!period.is_zero(), "Repeating period must be non-zero");
        self.push(period, Some(period), event)
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            deadline: self.now + delay,
            period,
            event,
        });
        id
    }

    /// Cancel a task. Returns `false` if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Number of live tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pop the earliest task due at or before `until`.
    ///
    /// The clock moves to that task's deadline. Repeating tasks are
    /// rescheduled one period later before being returned, so the caller
    /// may cancel them while handling the event. When nothing is due the
    /// clock moves to `until` and `None` is returned.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, E)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i);

        let Some(idx) = idx else {
            self.now = self.now.max(until);
            return None;
        };

        let (id, deadline, period, event) = {
            let task = &self.tasks[idx];
            (task.id, task.deadline, task.period, task.event.clone())
        };
        self.now = self.now.max(deadline);
        match period {
            Some(period) => self.tasks[idx].deadline += period,
            None => {
                self.tasks.remove(idx);
            }
        }
        Some((id, event))
    }
}
