use crate::prelude::*;

#[derive(Clone)]
pub struct SampleOp<S, T, TriggerItem> {
  source: S,
  trigger: T,
  _hint: TypeHint<TriggerItem>,
}

impl<S, T, TriggerItem> SampleOp<S, T, TriggerItem> {
  #[inline]
  pub(crate) fn new(source: S, trigger: T) -> Self {
    Self { source, trigger, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, T, TriggerItem> Observable<Item, Err, O> for SampleOp<S, T, TriggerItem>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, SampleSourceObserver<O, Item>>,
  S::Unsub: Send + 'static,
  T: Observable<TriggerItem, Err, SampleTriggerObserver<O, Item>>,
  T::Unsub: Send + 'static,
  Item: Clone,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let shared = Sampler {
      state: MutArc::own(SampleState { observer: Some(observer), latest: None }),
      subscription: subscription.clone(),
    };
    let unsub = self.source.actual_subscribe(SampleSourceObserver(shared.clone()));
    subscription.append(BoxSubscription::new(unsub));
    let unsub = self.trigger.actual_subscribe(SampleTriggerObserver(shared));
    subscription.append(BoxSubscription::new(unsub));
    subscription
  }
}

impl<Item, Err, S, T, TriggerItem> ObservableExt<Item, Err> for SampleOp<S, T, TriggerItem>
where
  S: ObservableExt<Item, Err>,
  T: ObservableExt<TriggerItem, Err>,
{
}

struct SampleState<O, Item> {
  observer: Option<O>,
  // kept after sampling, every trigger re-emits it
  latest: Option<Item>,
}

struct Sampler<O, Item> {
  state: MutArc<SampleState<O, Item>>,
  subscription: MultiSubscription,
}

impl<O, Item> Clone for Sampler<O, Item> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone(), subscription: self.subscription.clone() }
  }
}

impl<O, Item> Sampler<O, Item> {
  fn error<Err>(self, err: Err)
  where
    O: Observer<Item, Err>,
  {
    let observer = self.state.rc_deref_mut().observer.take();
    if let Some(observer) = observer {
      observer.error(err);
      self.subscription.unsubscribe();
    }
  }

  fn complete<Err>(self)
  where
    O: Observer<Item, Err>,
  {
    let observer = self.state.rc_deref_mut().observer.take();
    if let Some(observer) = observer {
      observer.complete();
      self.subscription.unsubscribe();
    }
  }

  fn is_finished<Err>(&self) -> bool
  where
    O: Observer<Item, Err>,
  {
    self
      .state
      .rc_deref()
      .observer
      .as_ref()
      .map_or(true, |o| o.is_finished())
  }
}

pub struct SampleSourceObserver<O, Item>(Sampler<O, Item>);

impl<Item, Err, O> Observer<Item, Err> for SampleSourceObserver<O, Item>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.0.state.rc_deref_mut().latest = Some(value); }

  fn error(self, err: Err) { self.0.error(err) }

  fn complete(self) { self.0.complete::<Err>() }

  fn is_finished(&self) -> bool { self.0.is_finished::<Err>() }
}

pub struct SampleTriggerObserver<O, Item>(Sampler<O, Item>);

impl<TriggerItem, Item, Err, O> Observer<TriggerItem, Err> for SampleTriggerObserver<O, Item>
where
  O: Observer<Item, Err>,
  Item: Clone,
{
  fn next(&mut self, _: TriggerItem) {
    let mut state = self.0.state.rc_deref_mut();
    if let Some(value) = state.latest.clone() {
      if let Some(observer) = state.observer.as_mut() {
        observer.next(value);
      }
    }
  }

  fn error(self, err: Err) { self.0.error(err) }

  fn complete(self) { self.0.complete::<Err>() }

  fn is_finished(&self) -> bool { self.0.is_finished::<Err>() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn emits_latest_on_trigger() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut source: PublishSubject<i32> = PublishSubject::default();
    let mut trigger: PublishSubject<()> = PublishSubject::default();

    source
      .clone()
      .sample(trigger.clone())
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    trigger.next(());
    source.next(1);
    source.next(2);
    trigger.next(());
    source.next(3);
    trigger.next(());
    trigger.next(());

    assert_eq!(*values.lock().unwrap(), vec![2, 3, 3]);
  }

  #[test]
  fn sample_on_interval() {
    let scheduler = TestScheduler::default();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::interval(Duration::from_millis(10), scheduler.clone())
      .sample(observable::interval(Duration::from_millis(25), scheduler.clone()))
      .take(3)
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    // at 50ms the trigger was scheduled first, so it sees the 40ms value
    scheduler.advance_by(Duration::from_millis(100));
    assert_eq!(*values.lock().unwrap(), vec![1, 3, 6]);
  }

  #[test]
  fn either_completion_completes() {
    let completed = Arc::new(Mutex::new(0));
    let c_completed = completed.clone();
    let source: PublishSubject<i32> = PublishSubject::default();
    let trigger: PublishSubject<()> = PublishSubject::default();
    source
      .clone()
      .sample(trigger.clone())
      .subscribe_all(|_| {}, |_| {}, move || *c_completed.lock().unwrap() += 1);

    trigger.complete();
    assert_eq!(*completed.lock().unwrap(), 1);
    assert_eq!(source.subscribed_size(), 0);
  }
}
