use crate::prelude::*;

#[derive(Clone)]
pub struct DelayOp<S, SD> {
  source: S,
  delay: Duration,
  scheduler: SD,
}

impl<S, SD> DelayOp<S, SD> {
  #[inline]
  pub(crate) fn new(source: S, delay: Duration, scheduler: SD) -> Self {
    Self { source, delay, scheduler }
  }
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for DelayOp<S, SD>
where
  O: Observer<Item, Err> + Send + 'static,
  S: Observable<Item, Err, DelayObserver<O, SD>>,
  SD: Scheduler,
  Item: Send + 'static,
  Err: Send + 'static,
{
  type Unsub = ZipSubscription<S::Unsub, ZipSubscription<MultiSubscription, ScheduledObserver<O>>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Self { source, delay, scheduler } = self;
    let subscription = MultiSubscription::default();
    let observer = ScheduledObserver::new(observer);
    let delay_observer = DelayObserver {
      observer: observer.clone(),
      delay,
      scheduler,
      subscription: subscription.clone(),
    };
    let unsub = source.actual_subscribe(delay_observer);
    ZipSubscription::new(unsub, ZipSubscription::new(subscription, observer))
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for DelayOp<S, SD> where
  S: ObservableExt<Item, Err>
{
}

pub struct DelayObserver<O, SD> {
  observer: ScheduledObserver<O>,
  delay: Duration,
  scheduler: SD,
  // pending notifications, dropped on unsubscribe
  subscription: MultiSubscription,
}

impl<O, SD: Scheduler> DelayObserver<O, SD> {
  fn schedule(&self, task: impl FnOnce() + Send + 'static) {
    let handle = self.scheduler.schedule(task, Some(self.delay));
    self.subscription.append(BoxSubscription::new(handle));
  }
}

impl<Item, Err, O, SD> Observer<Item, Err> for DelayObserver<O, SD>
where
  O: Observer<Item, Err> + Send + 'static,
  SD: Scheduler,
  Item: Send + 'static,
  Err: Send + 'static,
{
  fn next(&mut self, value: Item) {
    let mut observer = self.observer.clone();
    self.schedule(move || observer.next(value));
  }

  fn error(self, err: Err) {
    let observer = self.observer.clone();
    self.schedule(move || observer.error(err));
  }

  fn complete(self) {
    let observer = self.observer.clone();
    self.schedule(move || observer.complete());
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
