//! src/timer.rs
//!
//! One-shot deferred tasks for the single-threaded UI loop.
//!
//! Tasks are plain values; the main loop calls [`Scheduler::poll`] once per
//! frame and applies whatever became due. Nothing runs on another thread, and
//! dropping the scheduler drops every pending task with it.

use std::time::{Duration, Instant};

/// Handle returned by [`Scheduler::schedule`], used to cancel a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TaskHandle,
    due: Instant,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Queue `task` to fire once `delay` has passed since `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            due: now + delay,
            task,
        });
        handle
    }

    /// Drop a pending task. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Remove and return every task due at `now` with its handle, earliest
    /// first. Tasks with the same deadline come out in scheduling order.
    pub fn poll(&mut self, now: Instant) -> Vec<(TaskHandle, T)> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due, p.handle.0));
        due.into_iter().map(|p| (p.handle, p.task)).collect()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks<T>(due: Vec<(TaskHandle, T)>) -> Vec<T> {
        due.into_iter().map(|(_, task)| task).collect()
    }

    #[test]
    fn fires_only_after_delay() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let h = s.schedule(t0, Duration::from_millis(100), "a");

        assert!(s.poll(t0 + Duration::from_millis(99)).is_empty());
        assert_eq!(s.poll(t0 + Duration::from_millis(100)), vec![(h, "a")]);
        assert!(!s.cancel(h));
        assert!(s.is_empty());
        assert!(s.poll(t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_deadline_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(t0, Duration::from_millis(30), 3);
        s.schedule(t0, Duration::from_millis(10), 1);
        s.schedule(t0, Duration::from_millis(10), 2);
        s.schedule(t0, Duration::from_millis(90), 9);

        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(10)));
        assert_eq!(tasks(s.poll(t0 + Duration::from_millis(50))), vec![1, 2, 3]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let h = s.schedule(t0, Duration::from_millis(10), ());
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(s.poll(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn cancel_moves_next_deadline() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let early = s.schedule(t0, Duration::from_millis(10), 'x');
        s.schedule(t0, Duration::from_millis(40), 'y');
        assert!(s.cancel(early));
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(40)));
        assert_eq!(s.len(), 1);
    }
}
