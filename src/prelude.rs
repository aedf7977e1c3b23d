pub use crate::{
  error::RxError,
  observable,
  observable::{Observable, ObservableExt},
  observer::*,
  of_sequence,
  ops::{box_it::BoxOp, combine_latest::CombineItem},
  rc::{MutArc, RcDeref, RcDerefMut},
  scheduler::{Duration, ScheduledObserver, Scheduler, TaskHandle, TaskState, TestScheduler},
  subject::*,
  subscription::*,
  type_hint::TypeHint,
};

#[cfg(all(feature = "futures-scheduler", feature = "timer"))]
pub use crate::scheduler::{SerialScheduler, ThreadPoolScheduler};
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioScheduler;
