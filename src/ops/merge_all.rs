use std::collections::VecDeque;

use crate::prelude::*;

#[derive(Clone)]
pub struct MergeAllOp<S, Inner> {
  source: S,
  concurrent: usize,
  _hint: TypeHint<Inner>,
}

impl<S, Inner> MergeAllOp<S, Inner> {
  #[inline]
  pub(crate) fn new(source: S, concurrent: usize) -> Self {
    // zero would park every inner observable forever
    Self { source, concurrent: concurrent.max(1), _hint: TypeHint::new() }
  }
}

impl<Inner, Item, Err, O, S> Observable<Item, Err, O> for MergeAllOp<S, Inner>
where
  O: Observer<Item, Err> + Send + 'static,
  S: Observable<Inner, Err, MergeAllOuterObserver<O, Item>>,
  S::Unsub: Send + 'static,
  Inner: Observable<Item, Err, MergeAllInnerObserver<O>> + Send + 'static,
  Inner::Unsub: Send + 'static,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let data = MutArc::own(Some(MergeData {
      observer,
      pending: VecDeque::new(),
      outer_completed: false,
      subscribed: 0,
      concurrent: self.concurrent,
    }));
    let outer = MergeAllOuterObserver {
      data,
      subscription: subscription.clone(),
      _hint: TypeHint::new(),
    };
    let unsub = self.source.actual_subscribe(outer);
    subscription.append(BoxSubscription::new(unsub));
    subscription
  }
}

impl<Inner, Item, Err, S> ObservableExt<Item, Err> for MergeAllOp<S, Inner>
where
  S: ObservableExt<Inner, Err>,
  Inner: ObservableExt<Item, Err>,
{
}

type SubscribeTask = Box<dyn FnOnce() + Send>;

struct MergeData<O> {
  observer: O,
  // inner observables waiting for a free slot, oldest first
  pending: VecDeque<SubscribeTask>,
  outer_completed: bool,
  subscribed: usize,
  concurrent: usize,
}

type SharedData<O> = MutArc<Option<MergeData<O>>>;

fn subscribe_inner<Inner, Item, Err, O>(
  inner: Inner,
  data: SharedData<O>,
  subscription: MultiSubscription,
) where
  O: Observer<Item, Err>,
  Inner: Observable<Item, Err, MergeAllInnerObserver<O>>,
  Inner::Unsub: Send + 'static,
{
  let unsub = inner.actual_subscribe(MergeAllInnerObserver {
    data,
    subscription: subscription.clone(),
  });
  subscription.append(BoxSubscription::new(unsub));
}

pub struct MergeAllOuterObserver<O, Item> {
  data: SharedData<O>,
  subscription: MultiSubscription,
  _hint: TypeHint<Item>,
}

impl<Inner, Item, Err, O> Observer<Inner, Err> for MergeAllOuterObserver<O, Item>
where
  O: Observer<Item, Err> + Send + 'static,
  Inner: Observable<Item, Err, MergeAllInnerObserver<O>> + Send + 'static,
  Inner::Unsub: Send + 'static,
{
  fn next(&mut self, value: Inner) {
    let mut guard = self.data.rc_deref_mut();
    let Some(data) = guard.as_mut() else { return };
    if data.subscribed < data.concurrent {
      data.subscribed += 1;
      drop(guard);
      subscribe_inner(value, self.data.clone(), self.subscription.clone());
    } else {
      let c_data = self.data.clone();
      let subscription = self.subscription.clone();
      data
        .pending
        .push_back(Box::new(move || subscribe_inner(value, c_data, subscription)));
    }
  }

  fn error(self, err: Err) {
    let data = self.data.rc_deref_mut().take();
    if let Some(data) = data {
      data.observer.error(err);
    }
    self.subscription.unsubscribe();
  }

  fn complete(self) {
    let data = {
      let mut guard = self.data.rc_deref_mut();
      match guard.as_mut() {
        Some(data) => {
          data.outer_completed = true;
          if data.subscribed == 0 {
            guard.take()
          } else {
            None
          }
        }
        None => None,
      }
    };
    if let Some(data) = data {
      data.observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    self
      .data
      .rc_deref()
      .as_ref()
      .map_or(true, |data| data.observer.is_finished())
  }
}

pub struct MergeAllInnerObserver<O> {
  data: SharedData<O>,
  subscription: MultiSubscription,
}

enum InnerDone<O> {
  Idle,
  SubscribeNext(SubscribeTask),
  Complete(O),
}

impl<Item, Err, O> Observer<Item, Err> for MergeAllInnerObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(data) = self.data.rc_deref_mut().as_mut() {
      data.observer.next(value)
    }
  }

  fn error(self, err: Err) {
    let data = self.data.rc_deref_mut().take();
    if let Some(data) = data {
      data.observer.error(err);
    }
    self.subscription.unsubscribe();
  }

  fn complete(self) {
    let done = {
      let mut guard = self.data.rc_deref_mut();
      match guard.as_mut() {
        None => InnerDone::Idle,
        Some(data) => {
          if let Some(task) = data.pending.pop_front() {
            InnerDone::SubscribeNext(task)
          } else {
            data.subscribed -= 1;
            if data.subscribed == 0 && data.outer_completed {
              guard
                .take()
                .map_or(InnerDone::Idle, |data| InnerDone::Complete(data.observer))
            } else {
              InnerDone::Idle
            }
          }
        }
      }
    };
    match done {
      InnerDone::Idle => {}
      InnerDone::SubscribeNext(task) => task(),
      InnerDone::Complete(observer) => observer.complete(),
    }
  }

  fn is_finished(&self) -> bool {
    self
      .data
      .rc_deref()
      .as_ref()
      .map_or(true, |data| data.observer.is_finished())
  }
}
