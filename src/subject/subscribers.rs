use std::{
  collections::BTreeMap,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, MutexGuard,
  },
};

use super::Terminal;
use crate::{
  observer::{BoxedObserver, Observer},
  rc::{MutArc, RcDerefMut},
};

/// One subscribed observer. The slot lock is held while the observer runs,
/// so every observer sees its notifications one at a time and in order.
pub(crate) struct ObserverSlot<Item, Err> {
  pub(crate) closed: Arc<AtomicBool>,
  observer: MutArc<Option<BoxedObserver<'static, Item, Err>>>,
}

impl<Item, Err> Clone for ObserverSlot<Item, Err> {
  fn clone(&self) -> Self {
    ObserverSlot {
      closed: self.closed.clone(),
      observer: self.observer.clone(),
    }
  }
}

impl<Item, Err> ObserverSlot<Item, Err> {
  pub(crate) fn new(observer: BoxedObserver<'static, Item, Err>) -> Self {
    ObserverSlot {
      closed: Arc::new(AtomicBool::new(false)),
      observer: MutArc::own(Some(observer)),
    }
  }

  /// Hands `value` to the observer. Returns true when the observer will not
  /// take any more values and the slot should be dropped.
  pub(crate) fn deliver(&self, value: Item) -> bool {
    let mut observer = self.observer.rc_deref_mut();
    if self.closed.load(Ordering::Acquire) {
      return true;
    }
    let finished = match observer.as_mut() {
      Some(o) => {
        o.next(value);
        o.is_finished()
      }
      None => true,
    };
    if finished {
      self.closed.store(true, Ordering::Release);
      observer.take();
    }
    finished
  }

  /// Locks the observer. Holding the guard while the slot is registered keeps
  /// concurrent deliveries waiting until the replay went out.
  pub(crate) fn lock_observer(&self) -> MutexGuard<'_, Option<BoxedObserver<'static, Item, Err>>> {
    self.observer.rc_deref_mut()
  }

  /// Same as a series of [`ObserverSlot::deliver`] but through an already
  /// held lock, so nothing pushed concurrently can slip in between the values.
  pub(crate) fn deliver_all(
    &self,
    observer: &mut Option<BoxedObserver<'static, Item, Err>>,
    values: Vec<Item>,
  ) -> bool {
    for value in values {
      let finished = match observer.as_mut() {
        Some(o) => {
          o.next(value);
          o.is_finished()
        }
        None => true,
      };
      if finished {
        self.closed.store(true, Ordering::Release);
        observer.take();
        return true;
      }
    }
    false
  }

  pub(crate) fn terminate(self, terminal: Terminal<Err>) {
    let observer = self.observer.rc_deref_mut().take();
    self.closed.store(true, Ordering::Release);
    if let Some(observer) = observer {
      match terminal {
        Terminal::Error(err) => observer.error(err),
        Terminal::Completed => observer.complete(),
      }
    }
  }
}

/// The observers of a subject keyed by a stable id, so a subscription can
/// remove exactly its own observer.
pub(crate) struct Subscribers<Item, Err> {
  slots: BTreeMap<usize, ObserverSlot<Item, Err>>,
  next_id: usize,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Subscribers { slots: BTreeMap::new(), next_id: 0 } }
}

impl<Item, Err> Subscribers<Item, Err> {
  pub(crate) fn add(&mut self, slot: ObserverSlot<Item, Err>) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.slots.insert(id, slot);
    id
  }

  #[inline]
  pub(crate) fn remove(&mut self, id: usize) -> Option<ObserverSlot<Item, Err>> {
    self.slots.remove(&id)
  }

  /// Copies the slots out, so the list is not locked while observers run.
  pub(crate) fn snapshot(&self) -> Vec<(usize, ObserverSlot<Item, Err>)> {
    self
      .slots
      .iter()
      .map(|(id, slot)| (*id, slot.clone()))
      .collect()
  }

  pub(crate) fn take_all(&mut self) -> Vec<ObserverSlot<Item, Err>> {
    std::mem::take(&mut self.slots).into_values().collect()
  }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.slots.len() }
}
