use crate::prelude::*;

#[derive(Clone)]
pub struct DebounceOp<S, SD> {
  source: S,
  duration: Duration,
  scheduler: SD,
}

impl<S, SD> DebounceOp<S, SD> {
  #[inline]
  pub(crate) fn new(source: S, duration: Duration, scheduler: SD) -> Self {
    Self { source, duration, scheduler }
  }
}

type SharedHandle = MutArc<Option<TaskHandle>>;

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for DebounceOp<S, SD>
where
  O: Observer<Item, Err> + Send + 'static,
  S: Observable<Item, Err, DebounceObserver<O, SD, Item>>,
  SD: Scheduler,
  Item: Send + 'static,
{
  type Unsub = ZipSubscription<S::Unsub, ZipSubscription<SharedHandle, ScheduledObserver<O>>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Self { source, duration, scheduler } = self;
    let task_handle = MutArc::own(None);
    let observer = ScheduledObserver::new(observer);
    let debounce_observer = DebounceObserver {
      observer: observer.clone(),
      duration,
      scheduler,
      trailing_value: MutArc::own(None),
      task_handle: task_handle.clone(),
    };
    let unsub = source.actual_subscribe(debounce_observer);
    ZipSubscription::new(unsub, ZipSubscription::new(task_handle, observer))
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for DebounceOp<S, SD> where
  S: ObservableExt<Item, Err>
{
}

pub struct DebounceObserver<O, SD, Item> {
  observer: ScheduledObserver<O>,
  scheduler: SD,
  duration: Duration,
  trailing_value: MutArc<Option<Item>>,
  task_handle: SharedHandle,
}

impl<O, SD, Item> DebounceObserver<O, SD, Item> {
  fn cancel_pending(&self) {
    let handle = self.task_handle.rc_deref_mut().take();
    if let Some(handle) = handle {
      handle.unsubscribe();
    }
  }
}

impl<Item, Err, O, SD> Observer<Item, Err> for DebounceObserver<O, SD, Item>
where
  O: Observer<Item, Err> + Send + 'static,
  SD: Scheduler,
  Item: Send + 'static,
{
  fn next(&mut self, value: Item) {
    *self.trailing_value.rc_deref_mut() = Some(value);
    self.cancel_pending();

    let mut observer = self.observer.clone();
    let trailing_value = self.trailing_value.clone();
    let handle = self.scheduler.schedule(
      move || {
        let value = trailing_value.rc_deref_mut().take();
        if let Some(value) = value {
          observer.next(value);
        }
      },
      Some(self.duration),
    );
    *self.task_handle.rc_deref_mut() = Some(handle);
  }

  fn error(self, err: Err) {
    self.cancel_pending();
    self.trailing_value.rc_deref_mut().take();
    self.observer.error(err)
  }

  fn complete(self) {
    self.cancel_pending();
    let value = self.trailing_value.rc_deref_mut().take();
    let mut observer = self.observer;
    if let Some(value) = value {
      observer.next(value);
    }
    observer.complete();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn emits_after_quiet_period() {
    let scheduler = TestScheduler::default();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    subject
      .clone()
      .debounce(Duration::from_millis(50), scheduler.clone())
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    subject.next(1);
    scheduler.advance_by(Duration::from_millis(20));
    subject.next(2);
    scheduler.advance_by(Duration::from_millis(20));
    subject.next(3);
    scheduler.advance_by(Duration::from_millis(49));
    assert!(values.lock().unwrap().is_empty());

    scheduler.advance_by(Duration::from_millis(1));
    assert_eq!(*values.lock().unwrap(), vec![3]);
    assert_eq!(scheduler.pending_tasks(), 0);
  }

  #[test]
  fn slow_source_passes_everything() {
    let scheduler = TestScheduler::default();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::interval(Duration::from_millis(30), scheduler.clone())
      .take(5)
      .debounce(Duration::from_millis(20), scheduler.clone())
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    scheduler.advance_by(Duration::from_secs(1));
    assert_eq!(*values.lock().unwrap(), vec![0, 1, 2, 3, 4]);
  }

  #[test]
  fn fast_source_keeps_only_last() {
    let scheduler = TestScheduler::default();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    subject
      .clone()
      .debounce(Duration::from_millis(30), scheduler.clone())
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    for i in 0..10 {
      subject.next(i);
      scheduler.advance_by(Duration::from_millis(20));
    }
    scheduler.advance_by(Duration::from_millis(100));
    assert_eq!(*values.lock().unwrap(), vec![9]);
  }

  #[test]
  fn complete_flushes_pending_value() {
    let scheduler = TestScheduler::default();
    let values = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let c_values = values.clone();
    let c_completed = completed.clone();
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    subject
      .clone()
      .debounce(Duration::from_millis(30), scheduler.clone())
      .subscribe_all(
        move |v| c_values.lock().unwrap().push(v),
        |_| {},
        move || *c_completed.lock().unwrap() = true,
      );

    subject.next(7);
    subject.complete();

    assert_eq!(*values.lock().unwrap(), vec![7]);
    assert!(*completed.lock().unwrap());
    assert_eq!(scheduler.pending_tasks(), 0);
  }

  #[test]
  fn unsubscribe_drops_pending_value() {
    let scheduler = TestScheduler::default();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    let subscription = subject
      .clone()
      .debounce(Duration::from_millis(30), scheduler.clone())
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    subject.next(1);
    subscription.unsubscribe();
    scheduler.advance_by(Duration::from_millis(100));

    assert!(values.lock().unwrap().is_empty());
    assert_eq!(subject.subscribed_size(), 0);
  }
}
