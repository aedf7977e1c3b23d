//! Subjects are observables and observers at once: every value pushed in is
//! multicast to the observers currently subscribed.
//!
//! The three flavors share one implementation and differ only in what they
//! remember for late subscribers:
//!
//! - [`PublishSubject`] remembers nothing.
//! - [`BehaviorSubject`] remembers the last value, seeded at construction.
//! - [`ReplaySubject`] remembers the last `n` values.

use std::convert::Infallible;

use crate::{
  prelude::*,
  rc::{MutArc, RcDeref, RcDerefMut},
};

mod behavior_subject;
mod replay_subject;
mod subject_subscription;
mod subscribers;

pub use behavior_subject::LastValue;
pub use replay_subject::ReplayBuffer;
pub use subject_subscription::SubjectSubscription;
use subscribers::{ObserverSlot, Subscribers};

/// What a subject keeps to bring late subscribers up to date.
pub trait SubjectMemory<Item> {
  fn record(&mut self, value: &Item);

  /// The values a new subscriber receives before anything else. `terminated`
  /// tells whether the subject already received `error` or `complete`.
  fn replay(&self, terminated: bool) -> Vec<Item>;
}

/// Memory of a [`PublishSubject`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemory;

impl<Item> SubjectMemory<Item> for NoMemory {
  #[inline]
  fn record(&mut self, _: &Item) {}

  #[inline]
  fn replay(&self, _: bool) -> Vec<Item> { Vec::new() }
}

#[derive(Debug, Clone)]
pub(crate) enum Terminal<Err> {
  Error(Err),
  Completed,
}

struct SubjectState<Err, M> {
  terminal: Option<Terminal<Err>>,
  memory: M,
}

/// A cheap handle onto shared subject state; clones push to and subscribe
/// on the same subject.
pub struct Subject<Item, Err, M> {
  state: MutArc<SubjectState<Err, M>>,
  observers: MutArc<Subscribers<Item, Err>>,
  emitting: MutArc<()>,
}

pub type PublishSubject<Item, Err = Infallible> = Subject<Item, Err, NoMemory>;
pub type BehaviorSubject<Item, Err = Infallible> = Subject<Item, Err, LastValue<Item>>;
pub type ReplaySubject<Item, Err = Infallible> = Subject<Item, Err, ReplayBuffer<Item>>;

impl<Item, Err, M> Clone for Subject<Item, Err, M> {
  fn clone(&self) -> Self {
    Subject {
      state: self.state.clone(),
      observers: self.observers.clone(),
      emitting: self.emitting.clone(),
    }
  }
}

impl<Item, Err> Default for Subject<Item, Err, NoMemory> {
  fn default() -> Self { Subject::with_memory(NoMemory) }
}

impl<Item, Err, M> Subject<Item, Err, M> {
  pub(crate) fn with_memory(memory: M) -> Self {
    Subject {
      state: MutArc::own(SubjectState { terminal: None, memory }),
      observers: MutArc::own(Subscribers::default()),
      emitting: MutArc::own(()),
    }
  }

  /// Number of observers currently subscribed.
  pub fn subscribed_size(&self) -> usize { self.observers.rc_deref().len() }

  fn terminate(&self, terminal: Terminal<Err>)
  where
    Err: Clone,
  {
    let _emitting = self.emitting.rc_deref_mut();
    let slots = {
      let mut state = self.state.rc_deref_mut();
      if state.terminal.is_some() {
        tracing::warn!("subject already terminated, terminal event dropped");
        return;
      }
      state.terminal = Some(terminal.clone());
      self.observers.rc_deref_mut().take_all()
    };
    for slot in slots {
      slot.terminate(terminal.clone());
    }
  }
}

impl<Item, Err, M> Observer<Item, Err> for Subject<Item, Err, M>
where
  Item: Clone,
  Err: Clone,
  M: SubjectMemory<Item>,
{
  fn next(&mut self, value: Item) {
    let _emitting = self.emitting.rc_deref_mut();
    let slots = {
      let mut state = self.state.rc_deref_mut();
      if state.terminal.is_some() {
        tracing::warn!("subject already terminated, value dropped");
        return;
      }
      state.memory.record(&value);
      self.observers.rc_deref().snapshot()
    };

    let mut finished = vec![];
    let mut iter = slots.into_iter().peekable();
    while let Some((id, slot)) = iter.next() {
      if iter.peek().is_some() {
        if slot.deliver(value.clone()) {
          finished.push(id);
        }
      } else {
        if slot.deliver(value) {
          finished.push(id);
        }
        break;
      }
    }

    if !finished.is_empty() {
      let mut observers = self.observers.rc_deref_mut();
      for id in finished {
        observers.remove(id);
      }
    }
  }

  #[inline]
  fn error(self, err: Err) { self.terminate(Terminal::Error(err)) }

  #[inline]
  fn complete(self) { self.terminate(Terminal::Completed) }

  #[inline]
  fn is_finished(&self) -> bool { self.state.rc_deref().terminal.is_some() }
}

impl<Item, Err, M, O> Observable<Item, Err, O> for Subject<Item, Err, M>
where
  O: Observer<Item, Err> + Send + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
  M: SubjectMemory<Item>,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let slot = ObserverSlot::new(Box::new(observer));
    let closed = slot.closed.clone();
    let mut observer = slot.lock_observer();

    // Registering and reading the memory happen under the state lock, so no
    // value can be missed or seen twice. The slot stays locked until the
    // replay is out, so a concurrent push lands after it.
    let (id, replay, terminal) = {
      let state = self.state.rc_deref();
      let replay = state.memory.replay(state.terminal.is_some());
      match &state.terminal {
        Some(terminal) => (None, replay, Some(terminal.clone())),
        None => {
          let id = self.observers.rc_deref_mut().add(slot.clone());
          (Some(id), replay, None)
        }
      }
    };

    let finished = slot.deliver_all(&mut observer, replay);
    drop(observer);
    if let Some(terminal) = terminal {
      slot.terminate(terminal);
    } else if finished {
      if let Some(id) = id {
        self.observers.rc_deref_mut().remove(id);
      }
    }

    SubjectSubscription { id, closed, observers: self.observers }
  }
}

impl<Item, Err, M> ObservableExt<Item, Err> for Subject<Item, Err, M> {}
