use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::prelude::*;

pub trait RcDeref {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a>;
}

pub trait RcDerefMut {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a>;
}

/// Shared mutable state used by every operator that has to reach the same
/// data from more than one observer.
///
/// A poisoned lock is recovered: a panic in one user callback must not turn
/// every later emission into a panic as well.
#[derive(Default)]
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) }

  #[inline]
  fn lock(&self) -> MutexGuard<'_, T> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<T> RcDeref for MutArc<T> {
  type Target<'a>
  where
    Self: 'a,
  = MutexGuard<'a, T>;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a> { self.lock() }
}

impl<T> RcDerefMut for MutArc<T> {
  type Target<'a>
  where
    Self: 'a,
  = MutexGuard<'a, T>;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a> { self.lock() }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

// The observer is taken out of the cell by the first terminal event, so a
// shared observer can never see `next` after `error` or `complete`.
impl<Item, Err, O> Observer<Item, Err> for MutArc<Option<O>>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(observer) = self.rc_deref_mut().as_mut() {
      observer.next(value);
    }
  }

  fn error(self, err: Err) {
    let observer = self.rc_deref_mut().take();
    if let Some(observer) = observer {
      observer.error(err);
    }
  }

  fn complete(self) {
    let observer = self.rc_deref_mut().take();
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    self
      .rc_deref()
      .as_ref()
      .map_or(true, |observer| observer.is_finished())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn shared_observer_drops_after_terminal() {
    let values = MutArc::own(vec![]);
    let c_values = values.clone();
    let mut shared = MutArc::own(Some(ObserverAll::new(
      move |v: i32| c_values.rc_deref_mut().push(v),
      |_: ()| {},
      || {},
    )));
    let c_shared = shared.clone();

    shared.next(1);
    c_shared.complete();
    shared.next(2);

    assert!(shared.is_finished());
    assert_eq!(*values.rc_deref(), vec![1]);
  }

  #[test]
  fn ptr_eq() {
    let a = MutArc::own(1);
    let b = a.clone();
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&MutArc::own(1)));
  }
}
