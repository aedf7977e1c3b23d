use std::convert::Infallible;

use crate::prelude::*;

/// Creates an observable which will fire at `period` intervals on
/// `scheduler`, emitting 0, 1, 2, ... until it is unsubscribed.
///
/// The first value fires one `period` after subscribing. Unsubscribing drops
/// the tick already scheduled.
pub fn interval<SD>(period: Duration, scheduler: SD) -> IntervalObservable<SD>
where
  SD: Scheduler,
{
  IntervalObservable { period, scheduler }
}

#[derive(Clone)]
pub struct IntervalObservable<SD> {
  period: Duration,
  scheduler: SD,
}

impl<O, SD> Observable<usize, Infallible, O> for IntervalObservable<SD>
where
  O: Observer<usize, Infallible> + Send + 'static,
  SD: Scheduler,
{
  type Unsub = ZipSubscription<TaskHandle, ScheduledObserver<O>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = ScheduledObserver::new(observer);
    let mut c_observer = observer.clone();
    let handle = self.scheduler.schedule_repeating(
      move |seq| {
        c_observer.next(seq);
        !c_observer.is_finished()
      },
      self.period,
      Some(self.period),
    );
    ZipSubscription::new(handle, observer)
  }
}

impl<SD> ObservableExt<usize, Infallible> for IntervalObservable<SD> {}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn ticks_on_virtual_time() {
    let scheduler = TestScheduler::default();
    let ticks = Arc::new(Mutex::new(vec![]));
    let c_ticks = ticks.clone();
    observable::interval(Duration::from_millis(100), scheduler.clone())
      .subscribe(move |v| c_ticks.lock().unwrap().push(v));

    scheduler.advance_by(Duration::from_millis(99));
    assert!(ticks.lock().unwrap().is_empty());
    scheduler.advance_by(Duration::from_millis(401));
    assert_eq!(*ticks.lock().unwrap(), vec![0, 1, 2, 3, 4]);
  }

  #[test]
  fn unsubscribe_drops_scheduled_tick() {
    let scheduler = TestScheduler::default();
    let ticks = Arc::new(Mutex::new(vec![]));
    let c_ticks = ticks.clone();
    let subscription = observable::interval(Duration::from_millis(10), scheduler.clone())
      .subscribe(move |v| c_ticks.lock().unwrap().push(v));

    scheduler.advance_by(Duration::from_millis(25));
    assert_eq!(scheduler.pending_tasks(), 1);
    subscription.unsubscribe();
    assert_eq!(scheduler.pending_tasks(), 0);

    scheduler.advance_by(Duration::from_millis(100));
    assert_eq!(*ticks.lock().unwrap(), vec![0, 1]);
  }

  #[test]
  fn take_stops_the_timer() {
    let scheduler = TestScheduler::default();
    let ticks = Arc::new(Mutex::new(vec![]));
    let c_ticks = ticks.clone();
    observable::interval(Duration::from_millis(10), scheduler.clone())
      .take(3)
      .subscribe(move |v| c_ticks.lock().unwrap().push(v));

    scheduler.advance_by(Duration::from_millis(100));
    assert_eq!(*ticks.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(scheduler.pending_tasks(), 0);
  }

  #[cfg(all(feature = "futures-scheduler", feature = "timer"))]
  #[test]
  fn serial_scheduler_interval() {
    let scheduler = SerialScheduler::new().unwrap();
    let (tx, rx) = std::sync::mpsc::channel();
    observable::interval(Duration::from_millis(5), scheduler)
      .take(3)
      .on_complete(move || tx.send(()).unwrap())
      .subscribe(|_| {});
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
  }

  #[cfg(all(feature = "futures-scheduler", feature = "timer"))]
  #[test]
  fn no_tick_after_unsubscribe_returns() {
    let scheduler = ThreadPoolScheduler::new(4).unwrap();
    let ticks = Arc::new(Mutex::new(vec![]));
    let c_ticks = ticks.clone();
    let subscription = observable::interval(Duration::from_millis(1), scheduler)
      .subscribe(move |v| c_ticks.lock().unwrap().push(v));

    while ticks.lock().unwrap().len() < 3 {
      std::thread::sleep(Duration::from_millis(1));
    }
    subscription.unsubscribe();
    let seen = ticks.lock().unwrap().len();
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(ticks.lock().unwrap().len(), seen);
  }
}
