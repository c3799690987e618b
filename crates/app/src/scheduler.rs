//! Deterministic scheduler for deferred, cancellable tasks.
//!
//! Time only moves when [`TaskScheduler::advance`] is called, so the host
//! loop (or a test) fully controls when cooldowns expire and feedback is
//! cleaned up. Every task is keyed by the entity that owns it so teardown
//! can cancel whatever is still pending.

use std::collections::BTreeMap;
use std::time::Duration;

use healstation_domain::id::{NodeId, StationId};

/// Insertion counter; breaks ties between tasks due at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TaskId(u64);

/// Entity a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOwner {
    Station(StationId),
    /// A feedback billboard, identified by its root node.
    Feedback(NodeId),
}

/// Work to run once a task is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    RearmStation(StationId),
    DestroyFeedback(NodeId),
}

#[derive(Debug)]
struct Pending {
    owner: TaskOwner,
    task: ScheduledTask,
}

/// Single-threaded timer wheel keyed by due time then insertion order.
#[derive(Debug, Default)]
pub struct TaskScheduler {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TaskId), Pending>,
}

impl TaskScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `after` has elapsed from now.
    pub fn schedule(&mut self, owner: TaskOwner, after: Duration, task: ScheduledTask) {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(after);
        self.queue.insert((due, id), Pending { owner, task });
    }

    /// Drop every pending task owned by `owner`, returning how many were dropped.
    pub fn cancel_owner(&mut self, owner: TaskOwner) -> usize {
        let keys: Vec<(Duration, TaskId)> = self
            .queue
            .iter()
            .filter(|(_, pending)| pending.owner == owner)
            .map(|(key, _)| *key)
            .collect();
        for key in &keys {
            self.queue.remove(key);
        }
        keys.len()
    }

    /// Move time forward by `dt` and return the tasks that became due,
    /// earliest first. A task due exactly at the new time is included.
    pub fn advance(&mut self, dt: Duration) -> Vec<ScheduledTask> {
        self.now = self.now.saturating_add(dt);
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            due.push(entry.remove().task);
        }
        due
    }

    /// Remove and return every pending task regardless of due time.
    pub fn drain(&mut self) -> Vec<ScheduledTask> {
        std::mem::take(&mut self.queue)
            .into_values()
            .map(|pending| pending.task)
            .collect()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn pending_for(&self, owner: TaskOwner) -> usize {
        self.queue.values().filter(|p| p.owner == owner).count()
    }
}
