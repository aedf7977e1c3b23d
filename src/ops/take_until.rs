use crate::prelude::*;

#[derive(Clone)]
pub struct TakeUntilOp<S, N, NotifyItem> {
  source: S,
  notifier: N,
  _hint: TypeHint<NotifyItem>,
}

impl<S, N, NotifyItem> TakeUntilOp<S, N, NotifyItem> {
  #[inline]
  pub(crate) fn new(source: S, notifier: N) -> Self {
    Self { source, notifier, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, N, NotifyItem> Observable<Item, Err, O> for TakeUntilOp<S, N, NotifyItem>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, TakeUntilObserver<MutArc<Option<O>>>>,
  S::Unsub: Send + 'static,
  N: Observable<NotifyItem, Err, TakeUntilNotifierObserver<MutArc<Option<O>>, Item>>,
  N::Unsub: Send + 'static,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = MutArc::own(Some(observer));
    let subscription = MultiSubscription::default();

    let notifier_unsub = self.notifier.actual_subscribe(TakeUntilNotifierObserver {
      observer: observer.clone(),
      subscription: subscription.clone(),
      _hint: TypeHint::new(),
    });
    subscription.append(BoxSubscription::new(notifier_unsub));

    if !subscription.is_closed() {
      let source_unsub = self.source.actual_subscribe(TakeUntilObserver {
        observer,
        subscription: subscription.clone(),
      });
      subscription.append(BoxSubscription::new(source_unsub));
    }
    subscription
  }
}

impl<Item, Err, S, N, NotifyItem> ObservableExt<Item, Err> for TakeUntilOp<S, N, NotifyItem>
where
  S: ObservableExt<Item, Err>,
  N: ObservableExt<NotifyItem, Err>,
{
}

pub struct TakeUntilObserver<O> {
  observer: O,
  // holds the source and the notifier
  subscription: MultiSubscription,
}

impl<Item, Err, O> Observer<Item, Err> for TakeUntilObserver<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) {
    self.observer.error(err);
    self.subscription.unsubscribe();
  }

  fn complete(self) {
    self.observer.complete();
    self.subscription.unsubscribe();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Completes the downstream on the first notification and releases both the
/// source and the notifier.
pub struct TakeUntilNotifierObserver<O, Item> {
  observer: O,
  subscription: MultiSubscription,
  _hint: TypeHint<Item>,
}

impl<NotifyItem, Item, Err, O> Observer<NotifyItem, Err> for TakeUntilNotifierObserver<O, Item>
where
  O: Observer<Item, Err> + Clone,
{
  fn next(&mut self, _: NotifyItem) {
    self.observer.clone().complete();
    self.subscription.clone().unsubscribe();
  }

  fn error(self, err: Err) {
    self.observer.error(err);
    self.subscription.unsubscribe();
  }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn emits_until_notifier() {
    let values = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(0));
    let c_values = values.clone();
    let c_completed = completed.clone();
    let mut source: PublishSubject<i32> = PublishSubject::default();
    let mut notifier: PublishSubject<()> = PublishSubject::default();

    source.clone().take_until(notifier.clone()).subscribe_all(
      move |v| c_values.lock().unwrap().push(v),
      |_| {},
      move || *c_completed.lock().unwrap() += 1,
    );

    source.next(1);
    source.next(2);
    notifier.next(());
    source.next(3);

    assert_eq!(*values.lock().unwrap(), vec![1, 2]);
    assert_eq!(*completed.lock().unwrap(), 1);
    assert_eq!(source.subscribed_size(), 0);
  }

  #[test]
  fn source_completion_releases_notifier() {
    let source: PublishSubject<i32> = PublishSubject::default();
    let notifier: PublishSubject<()> = PublishSubject::default();

    source.clone().take_until(notifier.clone()).subscribe(|_| {});
    assert_eq!(notifier.subscribed_size(), 1);

    source.complete();
    assert_eq!(notifier.subscribed_size(), 0);
  }

  #[test]
  fn notification_releases_source() {
    let finalized = Arc::new(Mutex::new(0));
    let c_finalized = finalized.clone();
    let mut source: PublishSubject<i32> = PublishSubject::default();
    let mut notifier: PublishSubject<()> = PublishSubject::default();

    source
      .clone()
      .finalize(move || *c_finalized.lock().unwrap() += 1)
      .take_until(notifier.clone())
      .subscribe(|_| {});

    source.next(1);
    assert_eq!(*finalized.lock().unwrap(), 0);
    notifier.next(());

    assert_eq!(*finalized.lock().unwrap(), 1);
    assert_eq!(source.subscribed_size(), 0);
    assert_eq!(notifier.subscribed_size(), 0);
  }

  #[test]
  fn synchronous_notifier_skips_source() {
    let source: PublishSubject<i32> = PublishSubject::default();
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();

    source.clone().take_until(observable::of(())).subscribe_all(
      |_| {},
      |_| {},
      move || *c_completed.lock().unwrap() = true,
    );

    assert!(*completed.lock().unwrap());
    assert_eq!(source.subscribed_size(), 0);
  }
}
