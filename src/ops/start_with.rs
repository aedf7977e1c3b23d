use crate::prelude::*;

#[derive(Clone)]
pub struct StartWithOp<S, Item> {
  source: S,
  value: Item,
}

impl<S, Item> StartWithOp<S, Item> {
  #[inline]
  pub(crate) fn new(source: S, value: Item) -> Self { Self { source, value } }
}

impl<Item, Err, O, S> Observable<Item, Err, O> for StartWithOp<S, Item>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, O>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    observer.next(self.value);
    self.source.actual_subscribe(observer)
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for StartWithOp<S, Item> where
  S: ObservableExt<Item, Err>
{
}
