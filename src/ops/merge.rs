use crate::prelude::*;

#[derive(Clone)]
pub struct MergeOp<S1, S2> {
  source1: S1,
  source2: S2,
}

impl<S1, S2> MergeOp<S1, S2> {
  #[inline]
  pub(crate) fn new(source1: S1, source2: S2) -> Self { Self { source1, source2 } }
}

impl<Item, Err, O, S1, S2> Observable<Item, Err, O> for MergeOp<S1, S2>
where
  O: Observer<Item, Err>,
  S1: Observable<Item, Err, MergeObserver<O>>,
  S1::Unsub: Send + 'static,
  S2: Observable<Item, Err, MergeObserver<O>>,
  S2::Unsub: Send + 'static,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let merge_observer = MergeObserver {
      data: MutArc::own(MergeData { observer: Some(observer), completed_one: false }),
      subscription: subscription.clone(),
    };
    let unsub = self.source1.actual_subscribe(merge_observer.clone());
    subscription.append(BoxSubscription::new(unsub));
    let unsub = self.source2.actual_subscribe(merge_observer);
    subscription.append(BoxSubscription::new(unsub));
    subscription
  }
}

impl<Item, Err, S1, S2> ObservableExt<Item, Err> for MergeOp<S1, S2>
where
  S1: ObservableExt<Item, Err>,
  S2: ObservableExt<Item, Err>,
{
}

struct MergeData<O> {
  observer: Option<O>,
  completed_one: bool,
}

pub struct MergeObserver<O> {
  data: MutArc<MergeData<O>>,
  subscription: MultiSubscription,
}

impl<O> Clone for MergeObserver<O> {
  fn clone(&self) -> Self {
    Self { data: self.data.clone(), subscription: self.subscription.clone() }
  }
}

impl<Item, Err, O> Observer<Item, Err> for MergeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(observer) = self.data.rc_deref_mut().observer.as_mut() {
      observer.next(value);
    }
  }

  fn error(self, err: Err) {
    let observer = self.data.rc_deref_mut().observer.take();
    if let Some(observer) = observer {
      observer.error(err);
      self.subscription.unsubscribe();
    }
  }

  fn complete(self) {
    let observer = {
      let mut data = self.data.rc_deref_mut();
      if data.completed_one {
        data.observer.take()
      } else {
        data.completed_one = true;
        None
      }
    };
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    self
      .data
      .rc_deref()
      .observer
      .as_ref()
      .map_or(true, |o| o.is_finished())
  }
}
