use crate::prelude::*;

#[derive(Clone)]
pub struct CollectOp<S, C, Item> {
  source: S,
  _hint: TypeHint<(C, Item)>,
}

impl<S, C, Item> CollectOp<S, C, Item> {
  #[inline]
  pub(crate) fn new(source: S) -> Self { Self { source, _hint: TypeHint::new() } }
}

impl<Item, Err, O, S, C> Observable<C, Err, O> for CollectOp<S, C, Item>
where
  O: Observer<C, Err>,
  S: Observable<Item, Err, CollectObserver<O, C>>,
  C: Default + Extend<Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(CollectObserver { observer, collection: C::default() })
  }
}

impl<Item, Err, S, C> ObservableExt<C, Err> for CollectOp<S, C, Item>
where
  S: ObservableExt<Item, Err>,
  C: Default + Extend<Item>,
{
}

pub struct CollectObserver<O, C> {
  observer: O,
  collection: C,
}

impl<Item, Err, O, C> Observer<Item, Err> for CollectObserver<O, C>
where
  O: Observer<C, Err>,
  C: Extend<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.collection.extend(Some(value)) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) {
    let Self { mut observer, collection } = self;
    observer.next(collection);
    observer.complete();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::collections::HashSet;

  use crate::prelude::*;

  #[test]
  fn collect_into_vec() {
    let mut emitted = vec![];
    observable::from_iter(["apple", "banana", "cherry"])
      .collect::<Vec<_>>()
      .subscribe(|v| emitted.push(v));

    assert_eq!(emitted, vec![vec!["apple", "banana", "cherry"]]);
  }

  #[test]
  fn collect_into_set() {
    let mut emitted = None;
    observable::from_iter([1, 2, 2, 3])
      .collect::<HashSet<_>>()
      .subscribe(|v| emitted = Some(v));

    assert_eq!(emitted, Some(HashSet::from([1, 2, 3])));
  }

  #[test]
  fn empty_source_emits_empty_collection() {
    let mut emitted = None;
    observable::empty::<i32>()
      .collect::<Vec<_>>()
      .subscribe(|v| emitted = Some(v));
    assert_eq!(emitted, Some(vec![]));
  }

  #[test]
  fn error_discards_collection() {
    let mut emitted = 0;
    let mut err = None;
    observable::throw::<i32, _>("failed")
      .collect::<Vec<_>>()
      .subscribe_all(|_| emitted += 1, |e| err = Some(e), || {});
    assert_eq!(emitted, 0);
    assert_eq!(err, Some("failed"));
  }
}
