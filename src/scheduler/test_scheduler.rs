//! Virtual time scheduler for deterministic tests of time based operators.
//!
//! Time only moves when [`TestScheduler::advance_by`] is called; every task
//! due by then runs synchronously on the calling thread, earliest first and
//! in submission order for equal due times.

use std::{cmp::Ordering, collections::BinaryHeap};

use super::{Duration, Scheduler, TaskHandle};
use crate::{
  rc::{MutArc, RcDeref, RcDerefMut},
  subscription::Subscription,
};

#[derive(Default)]
struct TestSchedulerState {
  now: Duration,
  next_task_id: usize,
  task_queue: BinaryHeap<ScheduledTask>,
}

struct ScheduledTask {
  at: Duration,
  task_id: usize,
  task: Box<dyn FnOnce() + Send>,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.at == other.at && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .at
      .cmp(&self.at)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

/// Clones share one clock and one queue.
#[derive(Clone, Default)]
pub struct TestScheduler(MutArc<TestSchedulerState>);

impl TestScheduler {
  /// Virtual time elapsed since creation.
  pub fn now(&self) -> Duration { self.0.rc_deref().now }

  pub fn pending_tasks(&self) -> usize { self.0.rc_deref().task_queue.len() }

  /// Moves the clock forward by `duration`, running every task that becomes
  /// due, including tasks scheduled by the tasks that run.
  pub fn advance_by(&self, duration: Duration) {
    let target = self.now() + duration;
    loop {
      let task = {
        let mut state = self.0.rc_deref_mut();
        let due = state.task_queue.peek().map_or(false, |t| t.at <= target);
        let task = if due { state.task_queue.pop() } else { None };
        if let Some(task) = task.as_ref() {
          state.now = task.at;
        }
        task
      };
      match task {
        Some(task) => (task.task)(),
        None => break,
      }
    }
    self.0.rc_deref_mut().now = target;
  }

  /// Runs the tasks that are due right now without moving the clock.
  #[inline]
  pub fn run_due(&self) { self.advance_by(Duration::ZERO) }
}

impl Scheduler for TestScheduler {
  fn schedule_with<T>(&self, task: T, delay: Option<Duration>, handle: &TaskHandle)
  where
    T: FnOnce() + Send + 'static,
  {
    let c_handle = handle.clone();
    let task_id = {
      let mut state = self.0.rc_deref_mut();
      let task_id = state.next_task_id;
      state.next_task_id += 1;
      let at = state.now + delay.unwrap_or_default();
      state.task_queue.push(ScheduledTask {
        at,
        task_id,
        task: Box::new(move || {
          if !c_handle.is_closed() {
            task()
          }
        }),
      });
      task_id
    };

    let queue = self.0.clone();
    handle.set_cancel(move || {
      queue
        .rc_deref_mut()
        .task_queue
        .retain(|t| t.task_id != task_id);
    });
  }
}
