//! # rxtraining: a small push-based reactive core
//!
//! Observables describe streams of values, observers consume them and
//! subscriptions cancel them. Operators are lazy: nothing runs until
//! `subscribe`, and every subscription is an independent run.
//!
//! ```rust
//! use rxtraining::prelude::*;
//!
//! let mut evens = vec![];
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| evens.push(v));
//! assert_eq!(evens, vec![0, 4, 8, 12, 16]);
//! ```
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] / [`ObservableExt`] | Producers and the operator methods |
//! | [`Observer`] | Consumes `next`, `error` and `complete` |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`PublishSubject`] / [`BehaviorSubject`] / [`ReplaySubject`] | Multicast observables you push into |
//! | [`Scheduler`] | Where `interval`, `delay` and `debounce` run their timers |
//!
//! ## Feature flags
//!
//! - **`futures-scheduler`** and **`timer`** (default): the futures thread
//!   pool backed `SerialScheduler` and `ThreadPoolScheduler`.
//! - **`tokio-scheduler`**: `TokioScheduler` on a tokio runtime.
//!
//! [`Observable`]: observable::Observable
//! [`ObservableExt`]: observable::ObservableExt
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`PublishSubject`]: subject::PublishSubject
//! [`BehaviorSubject`]: subject::BehaviorSubject
//! [`ReplaySubject`]: subject::ReplaySubject
//! [`Scheduler`]: scheduler::Scheduler

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod snippet;
pub mod subject;
pub mod subscription;
pub mod type_hint;

pub use prelude::*;
