use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use crate::prelude::*;

#[derive(Clone)]
pub struct SkipUntilOp<S, N, NotifyItem> {
  source: S,
  notifier: N,
  _hint: TypeHint<NotifyItem>,
}

impl<S, N, NotifyItem> SkipUntilOp<S, N, NotifyItem> {
  #[inline]
  pub(crate) fn new(source: S, notifier: N) -> Self {
    Self { source, notifier, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, N, NotifyItem> Observable<Item, Err, O> for SkipUntilOp<S, N, NotifyItem>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, SkipUntilObserver<MutArc<Option<O>>>>,
  S::Unsub: Send + 'static,
  N: Observable<NotifyItem, Err, SkipUntilNotifierObserver<MutArc<Option<O>>, Item>>,
  N::Unsub: Send + 'static,
{
  type Unsub = ZipSubscription<MultiSubscription, MultiSubscription>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = MutArc::own(Some(observer));
    let open = Arc::new(AtomicBool::new(false));
    let notifier = MultiSubscription::default();
    let source = MultiSubscription::default();

    let unsub = self.notifier.actual_subscribe(SkipUntilNotifierObserver {
      observer: observer.clone(),
      open: open.clone(),
      notifier: notifier.clone(),
      source: source.clone(),
      _hint: TypeHint::new(),
    });
    notifier.append(BoxSubscription::new(unsub));

    let unsub = self.source.actual_subscribe(SkipUntilObserver {
      observer,
      open,
      notifier: notifier.clone(),
    });
    source.append(BoxSubscription::new(unsub));
    ZipSubscription::new(notifier, source)
  }
}

impl<Item, Err, S, N, NotifyItem> ObservableExt<Item, Err> for SkipUntilOp<S, N, NotifyItem>
where
  S: ObservableExt<Item, Err>,
  N: ObservableExt<NotifyItem, Err>,
{
}

pub struct SkipUntilObserver<O> {
  observer: O,
  open: Arc<AtomicBool>,
  notifier: MultiSubscription,
}

impl<Item, Err, O> Observer<Item, Err> for SkipUntilObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.open.load(Ordering::Acquire) {
      self.observer.next(value);
    }
  }

  fn error(self, err: Err) {
    self.observer.error(err);
    self.notifier.unsubscribe();
  }

  fn complete(self) {
    self.observer.complete();
    self.notifier.unsubscribe();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Opens the gate on the first notification and lets the notifier go. A
/// notifier error fails the whole stream; a notifier completing without a
/// value keeps the gate shut.
pub struct SkipUntilNotifierObserver<O, Item> {
  observer: O,
  open: Arc<AtomicBool>,
  notifier: MultiSubscription,
  source: MultiSubscription,
  _hint: TypeHint<Item>,
}

impl<NotifyItem, Item, Err, O> Observer<NotifyItem, Err> for SkipUntilNotifierObserver<O, Item>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, _: NotifyItem) {
    if !self.open.swap(true, Ordering::AcqRel) {
      self.notifier.clone().unsubscribe();
    }
  }

  fn error(self, err: Err) {
    self.observer.error(err);
    self.notifier.unsubscribe();
    self.source.unsubscribe();
  }

  #[inline]
  fn complete(self) {}

  fn is_finished(&self) -> bool {
    self.open.load(Ordering::Acquire) || self.observer.is_finished()
  }
}
