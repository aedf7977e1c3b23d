use std::collections::VecDeque;

use crate::prelude::*;

#[derive(Clone)]
pub struct ZipOp<A, B, F, ItemA, ItemB> {
  a: A,
  b: B,
  binary_op: F,
  _hint: TypeHint<(ItemA, ItemB)>,
}

impl<A, B, F, ItemA, ItemB> ZipOp<A, B, F, ItemA, ItemB> {
  #[inline]
  pub(crate) fn new(a: A, b: B, binary_op: F) -> Self {
    Self { a, b, binary_op, _hint: TypeHint::new() }
  }
}

impl<ItemA, ItemB, Out, Err, O, A, B, F> Observable<Out, Err, O> for ZipOp<A, B, F, ItemA, ItemB>
where
  O: Observer<Out, Err>,
  A: Observable<ItemA, Err, ZipAObserver<O, F, ItemA, ItemB>>,
  A::Unsub: Send + 'static,
  B: Observable<ItemB, Err, ZipBObserver<O, F, ItemA, ItemB>>,
  B::Unsub: Send + 'static,
  F: FnMut(ItemA, ItemB) -> Out,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let zipper = Zipper {
      state: MutArc::own(ZipState {
        observer: Some(observer),
        binary_op: self.binary_op,
        a: Side::default(),
        b: Side::default(),
      }),
      subscription: subscription.clone(),
    };
    let unsub = self.a.actual_subscribe(ZipAObserver(zipper.clone()));
    subscription.append(BoxSubscription::new(unsub));
    let unsub = self.b.actual_subscribe(ZipBObserver(zipper));
    subscription.append(BoxSubscription::new(unsub));
    subscription
  }
}

impl<ItemA, ItemB, Out, Err, A, B, F> ObservableExt<Out, Err> for ZipOp<A, B, F, ItemA, ItemB>
where
  A: ObservableExt<ItemA, Err>,
  B: ObservableExt<ItemB, Err>,
  F: FnMut(ItemA, ItemB) -> Out,
{
}

struct Side<T> {
  buffer: VecDeque<T>,
  completed: bool,
}

impl<T> Default for Side<T> {
  fn default() -> Self { Side { buffer: VecDeque::new(), completed: false } }
}

impl<T> Side<T> {
  // a completed side with nothing buffered can never pair again
  fn exhausted(&self) -> bool { self.completed && self.buffer.is_empty() }
}

struct ZipState<O, F, A, B> {
  observer: Option<O>,
  binary_op: F,
  a: Side<A>,
  b: Side<B>,
}

impl<O, F, A, B> ZipState<O, F, A, B> {
  fn emit_pairs<Out, Err>(&mut self)
  where
    O: Observer<Out, Err>,
    F: FnMut(A, B) -> Out,
  {
    while !self.a.buffer.is_empty() && !self.b.buffer.is_empty() {
      if let (Some(a), Some(b)) = (self.a.buffer.pop_front(), self.b.buffer.pop_front()) {
        let value = (self.binary_op)(a, b);
        if let Some(observer) = self.observer.as_mut() {
          observer.next(value);
        }
      }
    }
  }

  fn take_if_done(&mut self) -> Option<O> {
    if self.a.exhausted() || self.b.exhausted() {
      self.observer.take()
    } else {
      None
    }
  }
}

struct Zipper<O, F, A, B> {
  state: MutArc<ZipState<O, F, A, B>>,
  subscription: MultiSubscription,
}

impl<O, F, A, B> Clone for Zipper<O, F, A, B> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone(), subscription: self.subscription.clone() }
  }
}

impl<O, F, A, B> Zipper<O, F, A, B> {
  fn next_with<Out, Err>(&self, push: impl FnOnce(&mut ZipState<O, F, A, B>))
  where
    O: Observer<Out, Err>,
    F: FnMut(A, B) -> Out,
  {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      if state.observer.is_none() {
        return;
      }
      push(&mut *state);
      state.emit_pairs::<Out, Err>();
      state.take_if_done()
    };
    if let Some(observer) = observer {
      observer.complete();
      self.subscription.clone().unsubscribe();
    }
  }

  fn complete_with<Out, Err>(&self, mark: impl FnOnce(&mut ZipState<O, F, A, B>))
  where
    O: Observer<Out, Err>,
  {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      mark(&mut *state);
      state.take_if_done()
    };
    if let Some(observer) = observer {
      observer.complete();
      self.subscription.clone().unsubscribe();
    }
  }

  fn error<Out, Err>(&self, err: Err)
  where
    O: Observer<Out, Err>,
  {
    let observer = self.state.rc_deref_mut().observer.take();
    if let Some(observer) = observer {
      observer.error(err);
      self.subscription.clone().unsubscribe();
    }
  }

  fn is_finished<Out, Err>(&self) -> bool
  where
    O: Observer<Out, Err>,
  {
    self
      .state
      .rc_deref()
      .observer
      .as_ref()
      .map_or(true, |o| o.is_finished())
  }
}

pub struct ZipAObserver<O, F, A, B>(Zipper<O, F, A, B>);

impl<O, F, A, B, Out, Err> Observer<A, Err> for ZipAObserver<O, F, A, B>
where
  O: Observer<Out, Err>,
  F: FnMut(A, B) -> Out,
{
  fn next(&mut self, value: A) { self.0.next_with::<Out, Err>(|state| state.a.buffer.push_back(value)) }

  fn error(self, err: Err) { self.0.error::<Out, Err>(err) }

  fn complete(self) { self.0.complete_with::<Out, Err>(|state| state.a.completed = true) }

  fn is_finished(&self) -> bool { self.0.is_finished::<Out, Err>() }
}

pub struct ZipBObserver<O, F, A, B>(Zipper<O, F, A, B>);

impl<O, F, A, B, Out, Err> Observer<B, Err> for ZipBObserver<O, F, A, B>
where
  O: Observer<Out, Err>,
  F: FnMut(A, B) -> Out,
{
  fn next(&mut self, value: B) { self.0.next_with::<Out, Err>(|state| state.b.buffer.push_back(value)) }

  fn error(self, err: Err) { self.0.error::<Out, Err>(err) }

  fn complete(self) { self.0.complete_with::<Out, Err>(|state| state.b.completed = true) }

  fn is_finished(&self) -> bool { self.0.is_finished::<Out, Err>() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn pairs_by_index() {
    let mut values = vec![];
    let mut completed = false;
    observable::from_iter(0..5)
      .zip(observable::from_iter(["a", "b", "c"]), |n, s| format!("{s}{n}"))
      .subscribe_all(|v| values.push(v), |_| {}, || completed = true);

    assert_eq!(values, vec!["a0", "b1", "c2"]);
    assert!(completed);
  }

  #[test]
  fn waits_for_the_matching_element() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();

    left
      .clone()
      .zip(right.clone(), |l, r| format!("{l}{r}"))
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    left.next(1);
    left.next(2);
    right.next(3);

    assert_eq!(*values.lock().unwrap(), vec!["13"]);
  }

  #[test]
  fn completes_when_a_side_is_exhausted() {
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();

    left
      .clone()
      .zip(right.clone(), |l, r| l + r)
      .subscribe_all(|_| {}, |_| {}, move || *c_completed.lock().unwrap() = true);

    left.next(1);
    left.clone().complete();
    assert!(!*completed.lock().unwrap());

    right.next(2);
    assert!(*completed.lock().unwrap());
    assert_eq!(right.subscribed_size(), 0);
  }

  #[test]
  fn error_drops_buffered_items() {
    let values = Arc::new(Mutex::new(vec![]));
    let errors = Arc::new(Mutex::new(vec![]));
    let (c_values, c_errors) = (values.clone(), errors.clone());
    let mut left: PublishSubject<i32, &'static str> = PublishSubject::default();
    let mut right: PublishSubject<i32, &'static str> = PublishSubject::default();

    left.clone().zip(right.clone(), |l, r| (l, r)).subscribe_all(
      move |v| c_values.lock().unwrap().push(v),
      move |e| c_errors.lock().unwrap().push(e),
      || panic!("no completion after an error"),
    );
    left.next(1);
    left.next(2);
    right.next(10);
    left.clone().error("left failed");
    right.next(20);

    assert_eq!(*values.lock().unwrap(), vec![(1, 10)]);
    assert_eq!(*errors.lock().unwrap(), vec!["left failed"]);
    assert_eq!(right.subscribed_size(), 0);
  }
}
