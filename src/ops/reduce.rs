use crate::prelude::*;

#[derive(Clone)]
pub struct ReduceOp<S, F, Acc, Item> {
  source: S,
  initial: Acc,
  binary_op: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Acc, Item> ReduceOp<S, F, Acc, Item> {
  #[inline]
  pub(crate) fn new(source: S, initial: Acc, binary_op: F) -> Self {
    Self { source, initial, binary_op, _hint: TypeHint::new() }
  }
}

impl<Item, Acc, Err, O, S, F> Observable<Acc, Err, O> for ReduceOp<S, F, Acc, Item>
where
  O: Observer<Acc, Err>,
  S: Observable<Item, Err, ReduceObserver<O, F, Acc>>,
  F: FnMut(Acc, Item) -> Acc,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ReduceObserver {
      observer,
      binary_op: self.binary_op,
      acc: Some(self.initial),
    })
  }
}

impl<Item, Acc, Err, S, F> ObservableExt<Acc, Err> for ReduceOp<S, F, Acc, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(Acc, Item) -> Acc,
{
}

pub struct ReduceObserver<O, F, Acc> {
  observer: O,
  binary_op: F,
  acc: Option<Acc>,
}

impl<Item, Acc, Err, O, F> Observer<Item, Err> for ReduceObserver<O, F, Acc>
where
  O: Observer<Acc, Err>,
  F: FnMut(Acc, Item) -> Acc,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      self.acc = Some((self.binary_op)(acc, value));
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) {
    let Self { mut observer, acc, .. } = self;
    if let Some(acc) = acc {
      observer.next(acc);
    }
    observer.complete();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn sum_of_items() {
    let mut emitted = vec![];
    observable::from_iter(1..=5)
      .reduce(0, |acc, v| acc + v)
      .subscribe(|v| emitted.push(v));

    assert_eq!(emitted, vec![15]);
  }

  #[test]
  fn empty_source_emits_seed() {
    let mut emitted = vec![];
    let mut completed = false;
    observable::empty::<i32>()
      .reduce(100, |acc, v| acc + v)
      .subscribe_all(|v| emitted.push(v), |_| {}, || completed = true);

    assert_eq!(emitted, vec![100]);
    assert!(completed);
  }
}
