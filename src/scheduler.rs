//! Where and when scheduled work runs.
//!
//! Only the time based operators (`interval`, `delay`, `debounce`) hand work
//! to a scheduler; everything else runs synchronously on the emitting thread.

pub use std::time::Duration;
use std::{
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
  },
  thread::{self, ThreadId},
};

use crate::{
  observer::Observer,
  rc::{MutArc, RcDeref, RcDerefMut},
  subscription::Subscription,
};

pub mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(all(feature = "futures-scheduler", feature = "timer"))]
mod thread_pool_scheduler;
#[cfg(all(feature = "futures-scheduler", feature = "timer"))]
pub use thread_pool_scheduler::{SerialScheduler, ThreadPoolScheduler};

#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioScheduler;

pub trait Scheduler: Clone + Send + 'static {
  /// Runs `task` after `delay` (or as soon as possible) unless `handle` is
  /// closed by then. Implementors register a cancel hook on `handle` that
  /// drops the pending task.
  fn schedule_with<T>(&self, task: T, delay: Option<Duration>, handle: &TaskHandle)
  where
    T: FnOnce() + Send + 'static;

  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnOnce() + Send + 'static,
  {
    let handle = TaskHandle::default();
    let c_handle = handle.clone();
    self.schedule_with(
      move || {
        task();
        c_handle.finish();
      },
      delay,
      &handle,
    );
    handle
  }

  /// Runs `task` every `period`, first after `delay`. The task receives the
  /// zero based run count and keeps repeating while it returns true and the
  /// returned handle is not unsubscribed.
  fn schedule_repeating<T>(
    &self,
    task: T,
    period: Duration,
    delay: Option<Duration>,
  ) -> TaskHandle
  where
    T: FnMut(usize) -> bool + Send + 'static,
  {
    let handle = TaskHandle::default();
    repeat(self.clone(), handle.clone(), task, period, 0, delay);
    handle
  }
}

fn repeat<S, T>(
  scheduler: S,
  handle: TaskHandle,
  mut task: T,
  period: Duration,
  seq: usize,
  delay: Option<Duration>,
) where
  S: Scheduler,
  T: FnMut(usize) -> bool + Send + 'static,
{
  let c_scheduler = scheduler.clone();
  let c_handle = handle.clone();
  scheduler.schedule_with(
    move || {
      if task(seq) && !c_handle.is_closed() {
        repeat(c_scheduler, c_handle, task, period, seq + 1, Some(period));
      } else {
        c_handle.finish();
      }
    },
    delay,
    &handle,
  );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
  #[default]
  Pending,
  Finished,
  Cancelled,
}

type CancelHook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct TaskInner {
  state: TaskState,
  cancel: Option<CancelHook>,
}

/// Handle of a scheduled task. Unsubscribing it cancels the task if it has
/// not run yet; the scheduler drops the task instead of running it.
#[derive(Clone, Default)]
pub struct TaskHandle(MutArc<TaskInner>);

impl TaskHandle {
  pub fn state(&self) -> TaskState { self.0.rc_deref().state }

  /// Registers how the scheduler drops the pending task. Runs at once if the
  /// handle was already cancelled.
  pub fn set_cancel(&self, cancel: impl FnOnce() + Send + 'static) {
    let mut inner = self.0.rc_deref_mut();
    match inner.state {
      TaskState::Pending => inner.cancel = Some(Box::new(cancel)),
      TaskState::Cancelled => {
        drop(inner);
        cancel();
      }
      TaskState::Finished => {}
    }
  }

  pub(crate) fn finish(&self) {
    let mut inner = self.0.rc_deref_mut();
    if inner.state == TaskState::Pending {
      inner.state = TaskState::Finished;
      inner.cancel = None;
    }
  }
}

impl Subscription for TaskHandle {
  fn unsubscribe(self) {
    let cancel = {
      let mut inner = self.0.rc_deref_mut();
      if inner.state != TaskState::Pending {
        return;
      }
      inner.state = TaskState::Cancelled;
      inner.cancel.take()
    };
    if let Some(cancel) = cancel {
      tracing::trace!("scheduled task cancelled");
      cancel();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.state() != TaskState::Pending }
}

/// The observer of a time based operator, shared by the tasks that deliver
/// to it and the subscription that releases it.
///
/// Once `unsubscribe` returns, no delivery starts anymore: a delivery running
/// on another thread is waited for. Unsubscribing from inside a delivery on
/// the same thread returns at once and the observer is dropped when that
/// delivery ends.
pub struct ScheduledObserver<O>(Arc<ScheduledInner<O>>);

struct ScheduledInner<O> {
  observer: Mutex<Option<O>>,
  emitting_on: Mutex<Option<ThreadId>>,
  closed: AtomicBool,
  finished: AtomicBool,
}

impl<O> Clone for ScheduledObserver<O> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<O> ScheduledObserver<O> {
  pub fn new(observer: O) -> Self {
    Self(Arc::new(ScheduledInner {
      observer: Mutex::new(Some(observer)),
      emitting_on: Mutex::new(None),
      closed: AtomicBool::new(false),
      finished: AtomicBool::new(false),
    }))
  }

  /// `deliver` returns whether the observer is done afterwards.
  fn deliver(&self, deliver: impl FnOnce(&mut Option<O>) -> bool) {
    let inner = &*self.0;
    let mut slot = inner.observer.lock().unwrap_or_else(PoisonError::into_inner);
    if inner.closed.load(Ordering::SeqCst) || slot.is_none() {
      return;
    }
    self.set_emitting(Some(thread::current().id()));
    let done = deliver(&mut slot);
    self.set_emitting(None);
    if done {
      inner.finished.store(true, Ordering::SeqCst);
    }
    if done || inner.closed.load(Ordering::SeqCst) {
      let released = slot.take();
      drop(slot);
      drop(released);
    }
  }

  fn set_emitting(&self, thread: Option<ThreadId>) {
    *self.0.emitting_on.lock().unwrap_or_else(PoisonError::into_inner) = thread;
  }

  fn emitting_here(&self) -> bool {
    *self.0.emitting_on.lock().unwrap_or_else(PoisonError::into_inner)
      == Some(thread::current().id())
  }
}

impl<Item, Err, O> Observer<Item, Err> for ScheduledObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    self.deliver(|slot| match slot.as_mut() {
      Some(observer) => {
        observer.next(value);
        observer.is_finished()
      }
      None => true,
    })
  }

  fn error(self, err: Err) {
    self.deliver(|slot| {
      if let Some(observer) = slot.take() {
        observer.error(err);
      }
      true
    })
  }

  fn complete(self) {
    self.deliver(|slot| {
      if let Some(observer) = slot.take() {
        observer.complete();
      }
      true
    })
  }

  fn is_finished(&self) -> bool {
    self.0.closed.load(Ordering::SeqCst) || self.0.finished.load(Ordering::SeqCst)
  }
}

impl<O> Subscription for ScheduledObserver<O> {
  fn unsubscribe(self) {
    if self.0.closed.swap(true, Ordering::SeqCst) || self.emitting_here() {
      return;
    }
    let released = self
      .0
      .observer
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .take();
    drop(released);
  }

  #[inline]
  fn is_closed(&self) -> bool {
    self.0.closed.load(Ordering::SeqCst) || self.0.finished.load(Ordering::SeqCst)
  }
}
