use crate::prelude::*;

#[derive(Clone)]
pub struct TakeWhileOp<S, F> {
  source: S,
  predicate: F,
}

impl<S, F> TakeWhileOp<S, F> {
  #[inline]
  pub(crate) fn new(source: S, predicate: F) -> Self { Self { source, predicate } }
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for TakeWhileOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, TakeWhileObserver<O, F>>,
  S::Unsub: Send + 'static,
  F: FnMut(&Item) -> bool,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let upstream = MultiSubscription::default();
    let unsub = self.source.actual_subscribe(TakeWhileObserver {
      observer: Some(observer),
      predicate: self.predicate,
      upstream: upstream.clone(),
    });
    upstream.append(BoxSubscription::new(unsub));
    upstream
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for TakeWhileOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct TakeWhileObserver<O, F> {
  observer: Option<O>,
  predicate: F,
  upstream: MultiSubscription,
}

impl<Item, Err, O, F> Observer<Item, Err> for TakeWhileObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    if (self.predicate)(&value) {
      if let Some(observer) = self.observer.as_mut() {
        observer.next(value);
      }
    } else if let Some(observer) = self.observer.take() {
      observer.complete();
      self.upstream.clone().unsubscribe();
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(err)
    }
  }

  fn complete(self) {
    if let Some(observer) = self.observer {
      observer.complete()
    }
  }

  #[inline]
  fn is_finished(&self) -> bool {
    self.observer.as_ref().map_or(true, |o| o.is_finished())
  }
}

#[cfg(test)]
mod test {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use crate::prelude::*;

  #[test]
  fn stops_at_first_failure() {
    let mut values = vec![];
    let mut completed = 0;
    observable::from_iter([1, 2, 5, 1, 7])
      .take_while(|v| *v < 3)
      .subscribe_all(|v| values.push(v), |_| {}, || completed += 1);

    assert_eq!(values, vec![1, 2]);
    assert_eq!(completed, 1);
  }

  #[test]
  fn stops_an_infinite_source() {
    let mut values = vec![];
    observable::repeat(1, usize::MAX)
      .scan(0, |acc, v| acc + v)
      .take_while(|v| *v <= 3)
      .subscribe(|v| values.push(v));

    assert_eq!(values, vec![1, 2, 3]);
  }

  #[test]
  fn failing_item_releases_upstream() {
    let finalized = Arc::new(AtomicUsize::new(0));
    let c_finalized = finalized.clone();
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    subject
      .clone()
      .finalize(move || {
        c_finalized.fetch_add(1, Ordering::SeqCst);
      })
      .take_while(|v| *v < 3)
      .subscribe(|_| {});

    subject.next(1);
    subject.next(5);
    assert_eq!(finalized.load(Ordering::SeqCst), 1);
    assert_eq!(subject.subscribed_size(), 0);
  }
}
