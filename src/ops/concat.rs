use crate::prelude::*;

#[derive(Clone)]
pub struct ConcatOp<S1, S2> {
  source1: S1,
  source2: S2,
}

impl<S1, S2> ConcatOp<S1, S2> {
  #[inline]
  pub(crate) fn new(source1: S1, source2: S2) -> Self { Self { source1, source2 } }
}

impl<Item, Err, O, S1, S2> Observable<Item, Err, O> for ConcatOp<S1, S2>
where
  O: Observer<Item, Err>,
  S1: Observable<Item, Err, ConcatObserver<O, S2>>,
  S1::Unsub: Send + 'static,
  S2: Observable<Item, Err, O>,
  S2::Unsub: Send + 'static,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let unsub = self.source1.actual_subscribe(ConcatObserver {
      observer,
      next_source: self.source2,
      subscription: subscription.clone(),
    });
    subscription.append(BoxSubscription::new(unsub));
    subscription
  }
}

impl<Item, Err, S1, S2> ObservableExt<Item, Err> for ConcatOp<S1, S2>
where
  S1: ObservableExt<Item, Err>,
  S2: ObservableExt<Item, Err>,
{
}

pub struct ConcatObserver<O, S> {
  observer: O,
  next_source: S,
  subscription: MultiSubscription,
}

impl<Item, Err, O, S> Observer<Item, Err> for ConcatObserver<O, S>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, O>,
  S::Unsub: Send + 'static,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) {
    if self.subscription.is_closed() {
      return;
    }
    let unsub = self.next_source.actual_subscribe(self.observer);
    self.subscription.append(BoxSubscription::new(unsub));
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
