use std::io;

use futures::{executor::ThreadPool, future::abortable};

use super::{Duration, Scheduler, TaskHandle};
use crate::subscription::Subscription;

/// Runs tasks concurrently on a pool of worker threads. Tasks that become
/// due together may run in any order.
#[derive(Clone)]
pub struct ThreadPoolScheduler {
  pool: ThreadPool,
}

impl ThreadPoolScheduler {
  pub fn new(pool_size: usize) -> io::Result<Self> {
    Self::with_name_prefix(pool_size, "rxtraining-pool-")
  }

  /// Worker threads are named `{prefix}{index}`.
  pub fn with_name_prefix(pool_size: usize, prefix: &str) -> io::Result<Self> {
    let pool = ThreadPool::builder()
      .pool_size(pool_size)
      .name_prefix(prefix)
      .create()?;
    Ok(ThreadPoolScheduler { pool })
  }
}

impl Scheduler for ThreadPoolScheduler {
  fn schedule_with<T>(&self, task: T, delay: Option<Duration>, handle: &TaskHandle)
  where
    T: FnOnce() + Send + 'static,
  {
    spawn_on(&self.pool, task, delay, handle)
  }
}

/// Runs tasks one at a time on a single worker thread. Tasks without a delay
/// run in submission order; delayed tasks run in the order they become due.
#[derive(Clone)]
pub struct SerialScheduler {
  pool: ThreadPool,
}

impl SerialScheduler {
  pub fn new() -> io::Result<Self> {
    let pool = ThreadPool::builder()
      .pool_size(1)
      .name_prefix("rxtraining-serial-")
      .create()?;
    Ok(SerialScheduler { pool })
  }
}

impl Scheduler for SerialScheduler {
  fn schedule_with<T>(&self, task: T, delay: Option<Duration>, handle: &TaskHandle)
  where
    T: FnOnce() + Send + 'static,
  {
    spawn_on(&self.pool, task, delay, handle)
  }
}

fn spawn_on<T>(pool: &ThreadPool, task: T, delay: Option<Duration>, handle: &TaskHandle)
where
  T: FnOnce() + Send + 'static,
{
  let c_handle = handle.clone();
  let (fut, abort_handle) = abortable(async move {
    if let Some(delay) = delay {
      futures_time::task::sleep(delay.into()).await;
    }
    if !c_handle.is_closed() {
      task();
    }
  });
  pool.spawn_ok(async move {
    // an aborted task simply never runs
    let _ = fut.await;
  });
  handle.set_cancel(move || abort_handle.abort());
}
