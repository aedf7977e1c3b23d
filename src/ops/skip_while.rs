use crate::prelude::*;

#[derive(Clone)]
pub struct SkipWhileOp<S, F> {
  source: S,
  predicate: F,
}

impl<S, F> SkipWhileOp<S, F> {
  #[inline]
  pub(crate) fn new(source: S, predicate: F) -> Self { Self { source, predicate } }
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for SkipWhileOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, SkipWhileObserver<O, F>>,
  F: FnMut(&Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(SkipWhileObserver {
      observer,
      predicate: self.predicate,
      done_skipping: false,
    })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for SkipWhileOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct SkipWhileObserver<O, F> {
  observer: O,
  predicate: F,
  done_skipping: bool,
}

impl<Item, Err, O, F> Observer<Item, Err> for SkipWhileObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if !self.done_skipping && !(self.predicate)(&value) {
      self.done_skipping = true;
    }
    if self.done_skipping {
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn skips_leading_items_only() {
    let mut values = vec![];
    observable::from_iter([1, 2, 5, 1, 7])
      .skip_while(|v| *v < 3)
      .subscribe(|v| values.push(v));

    assert_eq!(values, vec![5, 1, 7]);
  }

  #[test]
  fn completes_after_skipping_everything() {
    let mut hits = 0;
    let mut completed = false;
    observable::from_iter(0..10)
      .skip_while(|_| true)
      .subscribe_all(|_| hits += 1, |_| {}, || completed = true);

    assert_eq!(hits, 0);
    assert!(completed);
  }
}
