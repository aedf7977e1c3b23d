use crate::prelude::*;

#[derive(Clone)]
pub struct WithLatestFromOp<S1, S2, B> {
  source: S1,
  other: S2,
  _hint: TypeHint<B>,
}

impl<S1, S2, B> WithLatestFromOp<S1, S2, B> {
  #[inline]
  pub(crate) fn new(source: S1, other: S2) -> Self {
    Self { source, other, _hint: TypeHint::new() }
  }
}

impl<A, B, Err, O, S1, S2> Observable<(A, B), Err, O> for WithLatestFromOp<S1, S2, B>
where
  O: Observer<(A, B), Err>,
  S1: Observable<A, Err, WithLatestFromSourceObserver<O, B>>,
  S1::Unsub: Send + 'static,
  S2: Observable<B, Err, WithLatestFromOtherObserver<O, A, B>>,
  S2::Unsub: Send + 'static,
  B: Clone,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let state = MutArc::own(LatestState { observer: Some(observer), latest: None });

    // the other side goes first so its synchronous values are already there
    let unsub = self.other.actual_subscribe(WithLatestFromOtherObserver {
      state: state.clone(),
      subscription: subscription.clone(),
      _hint: TypeHint::new(),
    });
    subscription.append(BoxSubscription::new(unsub));
    let unsub = self
      .source
      .actual_subscribe(WithLatestFromSourceObserver { state, subscription: subscription.clone() });
    subscription.append(BoxSubscription::new(unsub));
    subscription
  }
}

impl<A, B, Err, S1, S2> ObservableExt<(A, B), Err> for WithLatestFromOp<S1, S2, B>
where
  S1: ObservableExt<A, Err>,
  S2: ObservableExt<B, Err>,
{
}

pub struct LatestState<O, B> {
  observer: Option<O>,
  latest: Option<B>,
}

fn fail<O, A, B, Err>(state: &MutArc<LatestState<O, B>>, subscription: MultiSubscription, err: Err)
where
  O: Observer<(A, B), Err>,
{
  let observer = state.rc_deref_mut().observer.take();
  if let Some(observer) = observer {
    observer.error(err);
    subscription.unsubscribe();
  }
}

fn finished<O, A, B, Err>(state: &MutArc<LatestState<O, B>>) -> bool
where
  O: Observer<(A, B), Err>,
{
  state
    .rc_deref()
    .observer
    .as_ref()
    .map_or(true, |o| o.is_finished())
}

pub struct WithLatestFromSourceObserver<O, B> {
  state: MutArc<LatestState<O, B>>,
  subscription: MultiSubscription,
}

impl<A, B, Err, O> Observer<A, Err> for WithLatestFromSourceObserver<O, B>
where
  O: Observer<(A, B), Err>,
  B: Clone,
{
  fn next(&mut self, value: A) {
    let mut state = self.state.rc_deref_mut();
    if let Some(latest) = state.latest.clone() {
      if let Some(observer) = state.observer.as_mut() {
        observer.next((value, latest));
      }
    }
  }

  fn error(self, err: Err) { fail::<O, A, B, Err>(&self.state, self.subscription, err) }

  fn complete(self) {
    let observer = self.state.rc_deref_mut().observer.take();
    if let Some(observer) = observer {
      observer.complete();
      self.subscription.unsubscribe();
    }
  }

  fn is_finished(&self) -> bool { finished::<O, A, B, Err>(&self.state) }
}

pub struct WithLatestFromOtherObserver<O, A, B> {
  state: MutArc<LatestState<O, B>>,
  subscription: MultiSubscription,
  _hint: TypeHint<A>,
}

// Completing only stops updates; the last value stays available.
impl<A, B, Err, O> Observer<B, Err> for WithLatestFromOtherObserver<O, A, B>
where
  O: Observer<(A, B), Err>,
{
  fn next(&mut self, value: B) { self.state.rc_deref_mut().latest = Some(value); }

  fn error(self, err: Err) { fail::<O, A, B, Err>(&self.state, self.subscription, err) }

  fn complete(self) {}

  fn is_finished(&self) -> bool { finished::<O, A, B, Err>(&self.state) }
}
