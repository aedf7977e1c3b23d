use crate::prelude::*;

#[derive(Clone)]
pub struct MapErrOp<S, F, Err> {
  source: S,
  func: F,
  _hint: TypeHint<Err>,
}

impl<S, F, Err> MapErrOp<S, F, Err> {
  #[inline]
  pub(crate) fn new(source: S, func: F) -> Self {
    Self { source, func, _hint: TypeHint::new() }
  }
}

impl<Item, Err, B, O, S, F> Observable<Item, B, O> for MapErrOp<S, F, Err>
where
  O: Observer<Item, B>,
  S: Observable<Item, Err, MapErrObserver<O, F>>,
  F: FnOnce(Err) -> B,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(MapErrObserver { observer, func: self.func })
  }
}

impl<Item, Err, B, S, F> ObservableExt<Item, B> for MapErrOp<S, F, Err>
where
  S: ObservableExt<Item, Err>,
  F: FnOnce(Err) -> B,
{
}

pub struct MapErrObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, B, O, F> Observer<Item, Err> for MapErrObserver<O, F>
where
  O: Observer<Item, B>,
  F: FnOnce(Err) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error((self.func)(err)) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn converts_error() {
    let mut err = None;
    observable::throw::<i32, _>("bad")
      .map_err(|e| RxError::Other(e.to_owned()))
      .subscribe_all(|_| {}, |e| err = Some(e), || {});
    assert_eq!(err, Some(RxError::Other("bad".to_owned())));
  }

  #[test]
  fn infallible_joins_fallible() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut subject: PublishSubject<i32, RxError> = PublishSubject::default();
    observable::of(0)
      .map_err(RxError::from)
      .merge(subject.clone())
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    subject.next(1);
    assert_eq!(*values.lock().unwrap(), vec![0, 1]);
  }
}
