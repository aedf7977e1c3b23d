use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use super::subscribers::Subscribers;
use crate::{
  rc::{MutArc, RcDerefMut},
  subscription::Subscription,
};

/// Subscription handle for a subject. Unsubscribing removes the observer
/// from the subject; a delivery already running on another thread finishes,
/// nothing after it reaches the observer.
pub struct SubjectSubscription<Item, Err> {
  pub(crate) id: Option<usize>,
  pub(crate) closed: Arc<AtomicBool>,
  pub(crate) observers: MutArc<Subscribers<Item, Err>>,
}

impl<Item, Err> Subscription for SubjectSubscription<Item, Err> {
  fn unsubscribe(self) {
    if self.closed.swap(true, Ordering::AcqRel) {
      return;
    }
    if let Some(id) = self.id {
      let slot = self.observers.rc_deref_mut().remove(id);
      drop(slot);
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) }
}
