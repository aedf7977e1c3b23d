use std::fmt::Debug;

use crate::prelude::*;

#[derive(Clone)]
pub struct DebugOp<S> {
  source: S,
  label: &'static str,
}

impl<S> DebugOp<S> {
  #[inline]
  pub(crate) fn new(source: S, label: &'static str) -> Self { Self { source, label } }
}

impl<Item, Err, O, S> Observable<Item, Err, O> for DebugOp<S>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, DebugObserver<O>>,
  Item: Debug,
  Err: Debug,
{
  type Unsub = DebugSubscription<S::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let label = self.label;
    tracing::debug!(label, "subscribed");
    let subscription = self
      .source
      .actual_subscribe(DebugObserver { observer, label });
    DebugSubscription { subscription, label }
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for DebugOp<S> where
  S: ObservableExt<Item, Err>
{
}

pub struct DebugObserver<O> {
  observer: O,
  label: &'static str,
}

impl<Item, Err, O> Observer<Item, Err> for DebugObserver<O>
where
  O: Observer<Item, Err>,
  Item: Debug,
  Err: Debug,
{
  fn next(&mut self, value: Item) {
    tracing::debug!(label = self.label, value = ?value, "next");
    self.observer.next(value)
  }

  fn error(self, err: Err) {
    tracing::debug!(label = self.label, error = ?err, "error");
    self.observer.error(err)
  }

  fn complete(self) {
    tracing::debug!(label = self.label, "completed");
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

pub struct DebugSubscription<U> {
  subscription: U,
  label: &'static str,
}

impl<U: Subscription> Subscription for DebugSubscription<U> {
  fn unsubscribe(self) {
    tracing::debug!(label = self.label, "disposed");
    self.subscription.unsubscribe()
  }

  #[inline]
  fn is_closed(&self) -> bool { self.subscription.is_closed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn transparent_to_the_stream() {
    let mut values = vec![];
    let mut completed = false;
    observable::from_iter(0..3)
      .debug("counter")
      .subscribe_all(|v| values.push(v), |_| {}, || completed = true);

    assert_eq!(values, vec![0, 1, 2]);
    assert!(completed);
  }
}
