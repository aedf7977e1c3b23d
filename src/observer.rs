use std::fmt::Debug;

use crate::error::report_unhandled;

/// An Observer is a consumer of values delivered by an Observable. One for
/// each type of notification delivered by the Observable: `next`, `error`,
/// and `complete`.
///
/// `error` and `complete` take the observer by value, so nothing can be
/// delivered to it after a terminal notification.
pub trait Observer<Item, Err> {
  fn next(&mut self, value: Item);

  fn error(self, err: Err);

  fn complete(self);

  /// Returns true once the observer will not accept any more values, so a
  /// synchronous producer can stop early.
  fn is_finished(&self) -> bool;
}

/// Object safe twin of [`Observer`], used wherever an observer has to be
/// stored behind a pointer.
pub trait DynObserver<Item, Err> {
  fn dyn_next(&mut self, value: Item);

  fn dyn_error(self: Box<Self>, err: Err);

  fn dyn_complete(self: Box<Self>);

  fn dyn_is_finished(&self) -> bool;
}

impl<Item, Err, O> DynObserver<Item, Err> for O
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn dyn_next(&mut self, value: Item) { self.next(value) }

  #[inline]
  fn dyn_error(self: Box<Self>, err: Err) { (*self).error(err) }

  #[inline]
  fn dyn_complete(self: Box<Self>) { (*self).complete() }

  #[inline]
  fn dyn_is_finished(&self) -> bool { self.is_finished() }
}

pub type BoxedObserver<'a, Item, Err> =
  Box<dyn DynObserver<Item, Err> + Send + 'a>;

impl<'a, Item, Err> Observer<Item, Err> for BoxedObserver<'a, Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).dyn_next(value) }

  #[inline]
  fn error(self, err: Err) { self.dyn_error(err) }

  #[inline]
  fn complete(self) { self.dyn_complete() }

  #[inline]
  fn is_finished(&self) -> bool { (**self).dyn_is_finished() }
}

/// Observer built from a `next` callback only. An error reaching it is
/// reported to the unhandled error hook instead of being dropped.
#[derive(Clone)]
pub struct ObserverN<N>(N);

impl<N> ObserverN<N> {
  #[inline]
  pub fn new(next: N) -> Self { ObserverN(next) }
}

impl<Item, Err, N> Observer<Item, Err> for ObserverN<N>
where
  N: FnMut(Item),
  Err: Debug,
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(value) }

  fn error(self, err: Err) { report_unhandled(&err) }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_finished(&self) -> bool { false }
}

/// Observer built from all three callbacks.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline]
  pub fn new(next: N, error: E, complete: C) -> Self {
    ObserverAll { next, error, complete }
  }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(self, err: Err) { (self.error)(err) }

  #[inline]
  fn complete(self) { (self.complete)() }

  #[inline]
  fn is_finished(&self) -> bool { false }
}

#[cfg(test)]
mod test {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use crate::{error, prelude::*};

  #[test]
  fn boxed_observer_forwards() {
    let mut values = vec![];
    let mut completed = false;
    {
      let mut boxed: BoxedObserver<i32, ()> = Box::new(ObserverAll::new(
        |v| values.push(v),
        |_| {},
        || completed = true,
      ));
      boxed.next(1);
      boxed.next(2);
      assert!(!boxed.is_finished());
      boxed.complete();
    }
    assert_eq!(values, vec![1, 2]);
    assert!(completed);
  }

  #[test]
  fn unhandled_error_reaches_hook() {
    let hits = Arc::new(AtomicUsize::new(0));
    let c_hits = hits.clone();
    error::set_unhandled_error_hook(move |err| {
      if format!("{err:?}") == "\"observer hook\"" {
        c_hits.fetch_add(1, Ordering::SeqCst);
      }
    });

    let subject: PublishSubject<i32, &'static str> = PublishSubject::default();
    subject.clone().subscribe(|_| {});
    subject.error("observer hook");

    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }
}
