use crate::prelude::*;

#[derive(Clone)]
pub struct AmbOp<S1, S2> {
  source1: S1,
  source2: S2,
}

impl<S1, S2> AmbOp<S1, S2> {
  #[inline]
  pub(crate) fn new(source1: S1, source2: S2) -> Self { Self { source1, source2 } }
}

impl<Item, Err, O, S1, S2> Observable<Item, Err, O> for AmbOp<S1, S2>
where
  O: Observer<Item, Err>,
  S1: Observable<Item, Err, AmbObserver<O>>,
  S1::Unsub: Send + 'static,
  S2: Observable<Item, Err, AmbObserver<O>>,
  S2::Unsub: Send + 'static,
{
  type Unsub = AmbSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = MutArc::own(Some(observer));
    let race = MutArc::own(Race::default());

    let unsub = self.source1.actual_subscribe(AmbObserver {
      observer: observer.clone(),
      race: race.clone(),
      index: 0,
    });
    store_subscription(&race, 0, BoxSubscription::new(unsub));

    // the first source may already have won while subscribing
    if race.rc_deref().winner.is_none() {
      let unsub = self
        .source2
        .actual_subscribe(AmbObserver { observer, race: race.clone(), index: 1 });
      store_subscription(&race, 1, BoxSubscription::new(unsub));
    }
    AmbSubscription(race)
  }
}

impl<Item, Err, S1, S2> ObservableExt<Item, Err> for AmbOp<S1, S2>
where
  S1: ObservableExt<Item, Err>,
  S2: ObservableExt<Item, Err>,
{
}

#[derive(Default)]
pub struct Race {
  winner: Option<usize>,
  closed: bool,
  subscriptions: [Option<BoxSubscription>; 2],
}

fn store_subscription(race: &MutArc<Race>, index: usize, subscription: BoxSubscription) {
  let mut race = race.rc_deref_mut();
  if race.closed || race.winner.map_or(false, |w| w != index) {
    drop(race);
    subscription.unsubscribe();
  } else {
    race.subscriptions[index] = Some(subscription);
  }
}

pub struct AmbObserver<O> {
  observer: MutArc<Option<O>>,
  race: MutArc<Race>,
  index: usize,
}

impl<O> AmbObserver<O> {
  /// Claims the race for this source. Returns false when the other source
  /// already won.
  fn claim(&self) -> bool {
    let loser = {
      let mut race = self.race.rc_deref_mut();
      match race.winner {
        Some(winner) => return winner == self.index,
        None => {
          race.winner = Some(self.index);
          race.subscriptions[1 - self.index].take()
        }
      }
    };
    tracing::trace!(winner = self.index, "amb race decided");
    if let Some(loser) = loser {
      loser.unsubscribe();
    }
    true
  }

  fn close(&self) { self.race.rc_deref_mut().closed = true; }
}

impl<Item, Err, O> Observer<Item, Err> for AmbObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.claim() {
      self.observer.next(value);
    }
  }

  fn error(self, err: Err) {
    if self.claim() {
      self.close();
      self.observer.error(err);
    }
  }

  fn complete(self) {
    if self.claim() {
      self.close();
      self.observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    let lost = self
      .race
      .rc_deref()
      .winner
      .map_or(false, |w| w != self.index);
    lost || self.observer.is_finished()
  }
}

pub struct AmbSubscription(MutArc<Race>);

impl Subscription for AmbSubscription {
  fn unsubscribe(self) {
    let subscriptions = {
      let mut race = self.0.rc_deref_mut();
      race.closed = true;
      std::mem::take(&mut race.subscriptions)
    };
    for subscription in subscriptions.into_iter().flatten() {
      subscription.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn right_wins() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();

    left
      .clone()
      .amb(right.clone())
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    right.next(10);
    left.next(1);
    right.next(20);
    left.next(2);

    assert_eq!(*values.lock().unwrap(), vec![10, 20]);
    assert_eq!(left.subscribed_size(), 0);
    assert_eq!(right.subscribed_size(), 1);
  }

  #[test]
  fn synchronous_first_source_wins() {
    let mut values = vec![];
    observable::from_iter(1..=3)
      .amb(observable::from_iter(10..=13))
      .subscribe(|v| values.push(v));
    assert_eq!(values, vec![1, 2, 3]);
  }

  #[test]
  fn completion_also_wins() {
    let values = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let c_values = values.clone();
    let c_completed = completed.clone();
    let left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();

    left.clone().amb(right.clone()).subscribe_all(
      move |v| c_values.lock().unwrap().push(v),
      |_| {},
      move || *c_completed.lock().unwrap() = true,
    );
    left.complete();
    right.next(1);

    assert!(values.lock().unwrap().is_empty());
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn unsubscribe_releases_both() {
    let left: PublishSubject<i32> = PublishSubject::default();
    let right: PublishSubject<i32> = PublishSubject::default();
    let subscription = left.clone().amb(right.clone()).subscribe(|_| {});
    subscription.unsubscribe();

    assert_eq!(left.subscribed_size(), 0);
    assert_eq!(right.subscribed_size(), 0);
  }

  #[test]
  fn first_error_wins() {
    let values = Arc::new(Mutex::new(vec![]));
    let errors = Arc::new(Mutex::new(vec![]));
    let (c_values, c_errors) = (values.clone(), errors.clone());
    let left: PublishSubject<i32, &'static str> = PublishSubject::default();
    let mut right: PublishSubject<i32, &'static str> = PublishSubject::default();

    left.clone().amb(right.clone()).subscribe_all(
      move |v| c_values.lock().unwrap().push(v),
      move |e| c_errors.lock().unwrap().push(e),
      || panic!("no completion after an error"),
    );
    left.clone().error("left failed");
    right.next(1);

    assert!(values.lock().unwrap().is_empty());
    assert_eq!(*errors.lock().unwrap(), vec!["left failed"]);
    assert_eq!(right.subscribed_size(), 0);
  }
}
