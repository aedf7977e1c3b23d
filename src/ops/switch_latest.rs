use crate::prelude::*;

#[derive(Clone)]
pub struct SwitchLatestOp<S, Inner> {
  source: S,
  _hint: TypeHint<Inner>,
}

impl<S, Inner> SwitchLatestOp<S, Inner> {
  #[inline]
  pub(crate) fn new(source: S) -> Self { Self { source, _hint: TypeHint::new() } }
}

impl<Inner, Item, Err, O, S> Observable<Item, Err, O> for SwitchLatestOp<S, Inner>
where
  O: Observer<Item, Err>,
  S: Observable<Inner, Err, SwitchOuterObserver<O, Item>>,
  Inner: Observable<Item, Err, SwitchInnerObserver<O>>,
  Inner::Unsub: Send + 'static,
{
  type Unsub = SwitchLatestSubscription<S::Unsub, O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let state = MutArc::own(SwitchState {
      observer: Some(observer),
      outer_completed: false,
      inner_active: false,
      inner: None,
      generation: 0,
    });
    let source = self.source.actual_subscribe(SwitchOuterObserver {
      state: state.clone(),
      _hint: TypeHint::new(),
    });
    SwitchLatestSubscription { source, state }
  }
}

impl<Inner, Item, Err, S> ObservableExt<Item, Err> for SwitchLatestOp<S, Inner>
where
  S: ObservableExt<Inner, Err>,
  Inner: ObservableExt<Item, Err>,
{
}

pub struct SwitchState<O> {
  observer: Option<O>,
  outer_completed: bool,
  inner_active: bool,
  inner: Option<BoxSubscription>,
  // bumped for every new inner observable; events of older ones are stale
  generation: usize,
}

pub struct SwitchOuterObserver<O, Item> {
  state: MutArc<SwitchState<O>>,
  _hint: TypeHint<Item>,
}

impl<Inner, Item, Err, O> Observer<Inner, Err> for SwitchOuterObserver<O, Item>
where
  O: Observer<Item, Err>,
  Inner: Observable<Item, Err, SwitchInnerObserver<O>>,
  Inner::Unsub: Send + 'static,
{
  fn next(&mut self, value: Inner) {
    let (previous, generation) = {
      let mut state = self.state.rc_deref_mut();
      if state.observer.is_none() {
        return;
      }
      state.generation += 1;
      state.inner_active = true;
      (state.inner.take(), state.generation)
    };
    if let Some(previous) = previous {
      previous.unsubscribe();
    }

    let unsub = value.actual_subscribe(SwitchInnerObserver {
      state: self.state.clone(),
      generation,
    });

    let mut state = self.state.rc_deref_mut();
    if state.generation == generation && state.inner_active {
      state.inner = Some(BoxSubscription::new(unsub));
    } else {
      drop(state);
      unsub.unsubscribe();
    }
  }

  fn error(self, err: Err) {
    let (observer, inner) = {
      let mut state = self.state.rc_deref_mut();
      (state.observer.take(), state.inner.take())
    };
    if let Some(inner) = inner {
      inner.unsubscribe();
    }
    if let Some(observer) = observer {
      observer.error(err);
    }
  }

  fn complete(self) {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      state.outer_completed = true;
      if state.inner_active {
        None
      } else {
        state.observer.take()
      }
    };
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    self
      .state
      .rc_deref()
      .observer
      .as_ref()
      .map_or(true, |o| o.is_finished())
  }
}

pub struct SwitchInnerObserver<O> {
  state: MutArc<SwitchState<O>>,
  generation: usize,
}

impl<Item, Err, O> Observer<Item, Err> for SwitchInnerObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    let mut state = self.state.rc_deref_mut();
    if state.generation == self.generation {
      if let Some(observer) = state.observer.as_mut() {
        observer.next(value);
      }
    }
  }

  fn error(self, err: Err) {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      if state.generation != self.generation {
        return;
      }
      state.inner_active = false;
      state.inner = None;
      state.observer.take()
    };
    if let Some(observer) = observer {
      observer.error(err);
    }
  }

  fn complete(self) {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      if state.generation != self.generation {
        return;
      }
      state.inner_active = false;
      state.inner = None;
      if state.outer_completed {
        state.observer.take()
      } else {
        None
      }
    };
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    let state = self.state.rc_deref();
    state.generation != self.generation
      || state.observer.as_ref().map_or(true, |o| o.is_finished())
  }
}

pub struct SwitchLatestSubscription<U, O> {
  source: U,
  state: MutArc<SwitchState<O>>,
}

impl<U: Subscription, O> Subscription for SwitchLatestSubscription<U, O> {
  fn unsubscribe(self) {
    self.source.unsubscribe();
    let (inner, observer) = {
      let mut state = self.state.rc_deref_mut();
      (state.inner.take(), state.observer.take())
    };
    if let Some(inner) = inner {
      inner.unsubscribe();
    }
    drop(observer);
  }

  // The state lock may be held by an emission, so only the outer source is
  // asked.
  #[inline]
  fn is_closed(&self) -> bool { self.source.is_closed() }
}
