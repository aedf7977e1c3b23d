use crate::prelude::*;

#[derive(Clone)]
pub struct CombineLatestOp<A, B, F, ItemA, ItemB> {
  a: A,
  b: B,
  binary_op: F,
  _hint: TypeHint<(ItemA, ItemB)>,
}

impl<A, B, F, ItemA, ItemB> CombineLatestOp<A, B, F, ItemA, ItemB> {
  #[inline]
  pub(crate) fn new(a: A, b: B, binary_op: F) -> Self {
    Self { a, b, binary_op, _hint: TypeHint::new() }
  }
}

type Combiner<O, F, ItemA, ItemB> = CombineLatestObserver<O, F, ItemA, ItemB>;

impl<ItemA, ItemB, Out, Err, O, A, B, F> Observable<Out, Err, O>
  for CombineLatestOp<A, B, F, ItemA, ItemB>
where
  O: Observer<Out, Err>,
  A: Observable<ItemA, Err, AObserver<Combiner<O, F, ItemA, ItemB>, ItemB>>,
  A::Unsub: Send + 'static,
  B: Observable<ItemB, Err, BObserver<Combiner<O, F, ItemA, ItemB>, ItemA>>,
  B::Unsub: Send + 'static,
  F: FnMut(ItemA, ItemB) -> Out,
  ItemA: Clone,
  ItemB: Clone,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let combiner = CombineLatestObserver {
      state: MutArc::own(CombineState {
        observer: Some(observer),
        binary_op: self.binary_op,
        a: None,
        b: None,
        completed_one: false,
      }),
      subscription: subscription.clone(),
    };
    let unsub = self
      .a
      .actual_subscribe(AObserver(combiner.clone(), TypeHint::new()));
    subscription.append(BoxSubscription::new(unsub));
    let unsub = self.b.actual_subscribe(BObserver(combiner, TypeHint::new()));
    subscription.append(BoxSubscription::new(unsub));
    subscription
  }
}

impl<ItemA, ItemB, Out, Err, A, B, F> ObservableExt<Out, Err>
  for CombineLatestOp<A, B, F, ItemA, ItemB>
where
  A: ObservableExt<ItemA, Err>,
  B: ObservableExt<ItemB, Err>,
  F: FnMut(ItemA, ItemB) -> Out,
{
}

/// A notification of either side of a two source operator.
pub enum CombineItem<A, B> {
  ItemA(A),
  ItemB(B),
}

struct CombineState<O, F, A, B> {
  observer: Option<O>,
  binary_op: F,
  a: Option<A>,
  b: Option<B>,
  completed_one: bool,
}

pub struct CombineLatestObserver<O, F, A, B> {
  state: MutArc<CombineState<O, F, A, B>>,
  subscription: MultiSubscription,
}

impl<O, F, A, B> Clone for CombineLatestObserver<O, F, A, B> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone(), subscription: self.subscription.clone() }
  }
}

impl<O, F, A, B, Out, Err> Observer<CombineItem<A, B>, Err> for CombineLatestObserver<O, F, A, B>
where
  O: Observer<Out, Err>,
  F: FnMut(A, B) -> Out,
  A: Clone,
  B: Clone,
{
  fn next(&mut self, value: CombineItem<A, B>) {
    let mut state = self.state.rc_deref_mut();
    match value {
      CombineItem::ItemA(v) => state.a = Some(v),
      CombineItem::ItemB(v) => state.b = Some(v),
    }
    if let (Some(a), Some(b)) = (state.a.clone(), state.b.clone()) {
      let value = (state.binary_op)(a, b);
      if let Some(observer) = state.observer.as_mut() {
        observer.next(value);
      }
    }
  }

  fn error(self, err: Err) {
    let observer = self.state.rc_deref_mut().observer.take();
    if let Some(observer) = observer {
      observer.error(err);
      self.subscription.unsubscribe();
    }
  }

  fn complete(self) {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      if state.completed_one {
        state.observer.take()
      } else {
        state.completed_one = true;
        None
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

pub struct AObserver<O, B>(O, TypeHint<B>);

impl<O, A, B, Err> Observer<A, Err> for AObserver<O, B>
where
  O: Observer<CombineItem<A, B>, Err>,
{
  #[inline]
  fn next(&mut self, value: A) { self.0.next(CombineItem::ItemA(value)); }

  #[inline]
  fn error(self, err: Err) { self.0.error(err) }

  #[inline]
  fn complete(self) { self.0.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.0.is_finished() }
}

pub struct BObserver<O, A>(O, TypeHint<A>);

impl<O, A, B, Err> Observer<B, Err> for BObserver<O, A>
where
  O: Observer<CombineItem<A, B>, Err>,
{
  #[inline]
  fn next(&mut self, value: B) { self.0.next(CombineItem::ItemB(value)); }

  #[inline]
  fn error(self, err: Err) { self.0.error(err) }

  #[inline]
  fn complete(self) { self.0.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.0.is_finished() }
}
