use crate::prelude::*;

trait DynObservable<Item, Err> {
  fn box_subscribe(self: Box<Self>, observer: BoxedObserver<'static, Item, Err>) -> BoxSubscription;
}

impl<Item, Err, S> DynObservable<Item, Err> for S
where
  S: Observable<Item, Err, BoxedObserver<'static, Item, Err>>,
  S::Unsub: Send + 'static,
{
  fn box_subscribe(self: Box<Self>, observer: BoxedObserver<'static, Item, Err>) -> BoxSubscription {
    BoxSubscription::new((*self).actual_subscribe(observer))
  }
}

/// An observable with its concrete type erased, so differently built streams
/// of the same item and error type can be stored or returned together.
pub struct BoxOp<Item, Err>(Box<dyn DynObservable<Item, Err> + Send>);

impl<Item, Err> BoxOp<Item, Err> {
  pub(crate) fn new<S>(source: S) -> Self
  where
    S: Observable<Item, Err, BoxedObserver<'static, Item, Err>> + Send + 'static,
    S::Unsub: Send + 'static,
  {
    BoxOp(Box::new(source))
  }
}

impl<Item, Err, O> Observable<Item, Err, O> for BoxOp<Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
{
  type Unsub = BoxSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { self.0.box_subscribe(Box::new(observer)) }
}

impl<Item, Err> ObservableExt<Item, Err> for BoxOp<Item, Err> {}
