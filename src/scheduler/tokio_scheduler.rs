use tokio::runtime::Handle;

use super::{Duration, Scheduler, TaskHandle};
use crate::subscription::Subscription;

/// Spawns tasks on a tokio runtime.
#[derive(Clone)]
pub struct TokioScheduler(Handle);

impl TokioScheduler {
  pub fn new(handle: Handle) -> Self { TokioScheduler(handle) }

  /// Scheduler for the runtime the caller is running in.
  ///
  /// # Panics
  ///
  /// When called outside of a tokio runtime.
  pub fn current() -> Self { TokioScheduler(Handle::current()) }
}

impl Scheduler for TokioScheduler {
  fn schedule_with<T>(&self, task: T, delay: Option<Duration>, handle: &TaskHandle)
  where
    T: FnOnce() + Send + 'static,
  {
    let c_handle = handle.clone();
    let join = self.0.spawn(async move {
      if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
      }
      if !c_handle.is_closed() {
        task();
      }
    });
    handle.set_cancel(move || join.abort());
  }
}
