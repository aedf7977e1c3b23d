use crate::prelude::*;

/// Creates an observable from a function that receives the observer.
///
/// The function owns the observer: it may emit synchronously or hand the
/// observer to another thread. The subscription it returns is the teardown
/// of this run; it is released on unsubscribe and after the function
/// delivered `error` or `complete`.
///
/// ```
/// use std::convert::Infallible;
/// use rxtraining::prelude::*;
///
/// observable::create(|mut subscriber: BoxedObserver<'static, i32, Infallible>| {
///   subscriber.next(1);
///   subscriber.next(2);
///   subscriber.complete();
/// })
/// .subscribe(|v| println!("{v}"));
/// ```
pub fn create<F, Item, Err, U>(subscribe: F) -> Create<F, Item, Err>
where
  F: FnOnce(BoxedObserver<'static, Item, Err>) -> U,
  U: Subscription + Send + 'static,
{
  Create { subscribe, _hint: TypeHint::new() }
}

#[derive(Clone)]
pub struct Create<F, Item, Err> {
  subscribe: F,
  _hint: TypeHint<(Item, Err)>,
}

impl<F, Item, Err, O, U> Observable<Item, Err, O> for Create<F, Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  F: FnOnce(BoxedObserver<'static, Item, Err>) -> U,
  U: Subscription + Send + 'static,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let teardown = MultiSubscription::default();
    let observer = CreateObserver { observer, teardown: teardown.clone() };
    let unsub = (self.subscribe)(Box::new(observer));
    teardown.append(BoxSubscription::new(unsub));
    teardown
  }
}

impl<F, Item, Err> ObservableExt<Item, Err> for Create<F, Item, Err> {}

/// Releases the teardown once the producer terminates.
pub struct CreateObserver<O> {
  observer: O,
  teardown: MultiSubscription,
}

impl<Item, Err, O> Observer<Item, Err> for CreateObserver<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) {
    self.observer.error(err);
    self.teardown.unsubscribe();
  }

  fn complete(self) {
    self.observer.complete();
    self.teardown.unsubscribe();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::{
    sync::{
      atomic::{AtomicBool, AtomicUsize, Ordering},
      mpsc, Arc, Mutex,
    },
    thread,
  };

  use crate::prelude::*;

  #[test]
  fn emits_then_completes() {
    let values = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(AtomicBool::new(false));
    let c_values = values.clone();
    let c_completed = completed.clone();

    observable::create(|mut subscriber: BoxedObserver<'static, i32, String>| {
      subscriber.next(1);
      subscriber.next(2);
      subscriber.complete();
    })
    .subscribe_all(
      move |v| c_values.lock().unwrap().push(v),
      |_| {},
      move || c_completed.store(true, Ordering::SeqCst),
    );

    assert_eq!(*values.lock().unwrap(), vec![1, 2]);
    assert!(completed.load(Ordering::SeqCst));
  }

  #[test]
  fn teardown_runs_on_unsubscribe() {
    let torn_down = Arc::new(AtomicBool::new(false));
    let c_torn_down = torn_down.clone();

    let subscription =
      observable::create(move |mut subscriber: BoxedObserver<'static, i32, String>| {
        subscriber.next(1);
        ClosureSubscription(move || c_torn_down.store(true, Ordering::SeqCst))
      })
      .subscribe(|_| {});
    assert!(!torn_down.load(Ordering::SeqCst));

    subscription.unsubscribe();
    assert!(torn_down.load(Ordering::SeqCst));
  }

  #[test]
  fn emit_from_another_thread() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let (tx, rx) = mpsc::channel();

    observable::create(|mut subscriber: BoxedObserver<'static, i32, String>| {
      thread::spawn(move || {
        subscriber.next(7);
        subscriber.complete();
      })
      .join()
      .unwrap();
    })
    .on_complete(move || tx.send(()).unwrap())
    .subscribe(move |v| c_values.lock().unwrap().push(v));

    rx.recv().unwrap();
    assert_eq!(*values.lock().unwrap(), vec![7]);
  }

  #[test]
  fn teardown_runs_after_complete() {
    let torn_down = Arc::new(AtomicUsize::new(0));
    let c_torn_down = torn_down.clone();
    let (go_tx, go_rx) = mpsc::channel::<()>();
    let (done_tx, done_rx) = mpsc::channel();

    let subscription =
      observable::create(move |mut subscriber: BoxedObserver<'static, i32, String>| {
        thread::spawn(move || {
          go_rx.recv().unwrap();
          subscriber.next(1);
          subscriber.complete();
        });
        ClosureSubscription(move || {
          c_torn_down.fetch_add(1, Ordering::SeqCst);
          done_tx.send(()).unwrap();
        })
      })
      .subscribe(|_| {});
    assert_eq!(torn_down.load(Ordering::SeqCst), 0);

    go_tx.send(()).unwrap();
    done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    subscription.unsubscribe();
    assert_eq!(torn_down.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn teardown_runs_once_after_synchronous_error() {
    let torn_down = Arc::new(AtomicUsize::new(0));
    let c_torn_down = torn_down.clone();
    let subscription =
      observable::create(move |subscriber: BoxedObserver<'static, i32, String>| {
        subscriber.error("boom".to_string());
        ClosureSubscription(move || {
          c_torn_down.fetch_add(1, Ordering::SeqCst);
        })
      })
      .subscribe_all(|_| {}, |_| {}, || {});

    assert_eq!(torn_down.load(Ordering::SeqCst), 1);
    assert!(subscription.is_closed());
    subscription.unsubscribe();
    assert_eq!(torn_down.load(Ordering::SeqCst), 1);
  }
}
