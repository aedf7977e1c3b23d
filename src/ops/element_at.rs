use crate::prelude::*;

#[derive(Clone)]
pub struct ElementAtOp<S, Err> {
  source: S,
  index: usize,
  _hint: TypeHint<Err>,
}

impl<S, Err> ElementAtOp<S, Err> {
  #[inline]
  pub(crate) fn new(source: S, index: usize) -> Self {
    Self { source, index, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S> Observable<Item, RxError, O> for ElementAtOp<S, Err>
where
  O: Observer<Item, RxError>,
  S: Observable<Item, Err, ElementAtObserver<O>>,
  S::Unsub: Send + 'static,
  Err: Into<RxError>,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let upstream = MultiSubscription::default();
    let unsub = self.source.actual_subscribe(ElementAtObserver {
      observer: Some(observer),
      index: self.index,
      seen: 0,
      upstream: upstream.clone(),
    });
    upstream.append(BoxSubscription::new(unsub));
    upstream
  }
}

impl<Item, Err, S> ObservableExt<Item, RxError> for ElementAtOp<S, Err>
where
  S: ObservableExt<Item, Err>,
  Err: Into<RxError>,
{
}

pub struct ElementAtObserver<O> {
  observer: Option<O>,
  index: usize,
  seen: usize,
  upstream: MultiSubscription,
}

impl<Item, Err, O> Observer<Item, Err> for ElementAtObserver<O>
where
  O: Observer<Item, RxError>,
  Err: Into<RxError>,
{
  fn next(&mut self, value: Item) {
    if self.seen == self.index {
      if let Some(mut observer) = self.observer.take() {
        observer.next(value);
        observer.complete();
        self.upstream.clone().unsubscribe();
      }
    }
    self.seen += 1;
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(err.into())
    }
  }

  fn complete(self) {
    if let Some(observer) = self.observer {
      observer.error(RxError::ArgumentOutOfRange { index: self.index, len: self.seen })
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
  fn second_element() {
    let mut values = vec![];
    let mut completed = false;
    observable::from_iter(1..=10)
      .element_at(1)
      .subscribe_all(|v| values.push(v), |_| {}, || completed = true);

    assert_eq!(values, vec![2]);
    assert!(completed);
  }

  #[test]
  fn out_of_range() {
    let mut err = None;
    observable::from_iter(0..3)
      .element_at(5)
      .subscribe_all(|_| {}, |e| err = Some(e), || {});
    assert_eq!(err, Some(RxError::ArgumentOutOfRange { index: 5, len: 3 }));
  }

  #[test]
  fn found_element_releases_upstream() {
    let finalized = Arc::new(AtomicUsize::new(0));
    let c_finalized = finalized.clone();
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    subject
      .clone()
      .finalize(move || {
        c_finalized.fetch_add(1, Ordering::SeqCst);
      })
      .element_at(1)
      .subscribe(|_| {});

    subject.next(10);
    assert_eq!(finalized.load(Ordering::SeqCst), 0);
    subject.next(20);
    assert_eq!(finalized.load(Ordering::SeqCst), 1);
    assert_eq!(subject.subscribed_size(), 0);
  }
}
