use std::collections::BTreeMap;
use std::time::Duration;

use crate::host::Task;

/// Interval between animation frames on the virtual clock.
pub const FRAME: Duration = Duration::from_millis(16);

/// Virtual time plus the tasks waiting on it. Tasks due at the same instant
/// run in scheduling order.
#[derive(Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    pending: BTreeMap<(Duration, u64), Task>,
}

impl TimerQueue {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, delay: Duration, task: Task) {
        let key = (self.now + delay, self.seq);
        self.seq += 1;
        self.pending.insert(key, task);
    }

    /// Removes the earliest task due at or before `until` and moves the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let (&key, _) = self.pending.iter().next()?;
        if key.0 > until {
            return None;
        }
        let task = self.pending.remove(&key)?;
        self.now = self.now.max(key.0);
        Some(task)
    }

    pub fn finish_at(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn tasks_run_in_due_then_schedule_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut q = TimerQueue::default();
        for (delay, label) in [(30, "c"), (10, "a"), (10, "b")] {
            let log = Rc::clone(&log);
            q.schedule(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }

        let until = Duration::from_millis(20);
        while let Some(task) = q.pop_due(until) {
            task();
        }
        q.finish_at(until);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(q.now(), until);
        assert_eq!(q.len(), 1);
    }
}
