use crate::prelude::*;

#[derive(Clone)]
pub struct ScanOp<S, F, Acc, Item> {
  source: S,
  initial: Acc,
  binary_op: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Acc, Item> ScanOp<S, F, Acc, Item> {
  #[inline]
  pub(crate) fn new(source: S, initial: Acc, binary_op: F) -> Self {
    Self { source, initial, binary_op, _hint: TypeHint::new() }
  }
}

impl<Item, Acc, Err, O, S, F> Observable<Acc, Err, O> for ScanOp<S, F, Acc, Item>
where
  O: Observer<Acc, Err>,
  S: Observable<Item, Err, ScanObserver<O, F, Acc>>,
  F: FnMut(Acc, Item) -> Acc,
  Acc: Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ScanObserver {
      observer,
      binary_op: self.binary_op,
      acc: Some(self.initial),
    })
  }
}

impl<Item, Acc, Err, S, F> ObservableExt<Acc, Err> for ScanOp<S, F, Acc, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(Acc, Item) -> Acc,
{
}

pub struct ScanObserver<O, F, Acc> {
  observer: O,
  binary_op: F,
  // Only `None` while `binary_op` runs.
  acc: Option<Acc>,
}

impl<Item, Acc, Err, O, F> Observer<Item, Err> for ScanObserver<O, F, Acc>
where
  O: Observer<Acc, Err>,
  F: FnMut(Acc, Item) -> Acc,
  Acc: Clone,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      let acc = (self.binary_op)(acc, value);
      self.acc = Some(acc.clone());
      self.observer.next(acc);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
