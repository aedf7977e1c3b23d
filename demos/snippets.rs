//! Walks through the creation, subject and operator snippets, printing what
//! every stream emits.
//!
//! ```sh
//! RUST_LOG=rxtraining=debug cargo run --example snippets
//! ```

use std::{
  collections::HashMap,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
  thread,
};

use rxtraining::{prelude::*, snippet::snippet};
use tracing_subscriber::EnvFilter;

fn basics() {
  snippet("Observable.from", || {
    let subscription = observable::from_iter([1, 2, 3, 4])
      .finalize(|| println!("Disposed"))
      .subscribe_all(|v| println!("{v}"), |_| {}, || println!("Completed"));
    subscription.unsubscribe();
  });

  snippet("Range", || {
    observable::range(1, 10).subscribe_all(|v| println!("{v}"), |_| {}, || println!("completed"));
  });

  snippet("Deferred", || {
    let value = Arc::new(AtomicUsize::new(0));
    let factory = observable::defer(move || {
      let v = value.fetch_add(1, Ordering::SeqCst) + 1;
      observable::of(v)
    });
    for _ in 1..=5 {
      factory
        .clone()
        .debug("deferred")
        .tap(|v| println!("Value: {}", v * 2))
        .subscribe(|v| println!("{v}"));
    }
  });

  snippet("Custom Single", || {
    let files = HashMap::from([("data", "Hello from a text file")]);
    let load = |name: &str| {
      observable::of_result(
        files
          .get(name)
          .map(|text| text.to_string())
          .ok_or_else(|| RxError::Other(format!("file not found: {name}"))),
      )
    };
    for name in ["data", "missing"] {
      load(name).subscribe_all(|text| println!("{text}"), |err| println!("{err}"), || {});
    }
  });
}

fn subjects() {
  snippet("PublishSubject", || {
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    subject.next(1);
    subject.clone().subscribe(|v| println!("{v}"));
    subject.next(2);
  });

  snippet("BehaviorSubject", || {
    let mut subject: BehaviorSubject<i32> = BehaviorSubject::new(1);
    subject.clone().subscribe(|v| println!("{v}"));
    subject.next(2);
  });

  snippet("ReplaySubject", || {
    let mut subject: ReplaySubject<i32> = ReplaySubject::new(3);
    (1..=4).for_each(|v| subject.next(v));
    subject.clone().subscribe(|v| println!("first: {v}"));
    subject.next(5);
    subject.clone().subscribe(|v| println!("second: {v}"));
  });

  snippet("Variable", || {
    let mut variable: BehaviorSubject<i32> = BehaviorSubject::new(1);
    variable.clone().subscribe(|v| println!("{v}"));
    variable.next(2);
    println!("value: {}", variable.value());
  });
}

fn filtering() {
  let one_to_ten = || of_sequence!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10);

  snippet("Filter", || {
    one_to_ten()
      .filter(|v| v % 2 == 0)
      .subscribe(|v| println!("{v}"));
  });

  snippet("Element at", || {
    one_to_ten().element_at(1).subscribe(|v| println!("{v}"));
  });

  snippet("Ignore elements", || {
    one_to_ten()
      .ignore_elements()
      .subscribe_all(|_| {}, |_| {}, || println!("Completed"));
  });

  snippet("Skip", || {
    one_to_ten().skip(5).subscribe(|v| println!("{v}"));
  });

  snippet("Skip while", || {
    one_to_ten()
      .skip_while(|v| *v < 5)
      .subscribe(|v| println!("{v}"));
  });

  snippet("Skip until", || {
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    let mut trigger: PublishSubject<&'static str> = PublishSubject::default();
    subject
      .clone()
      .skip_until(trigger.clone())
      .subscribe(|v| println!("{v}"));
    subject.next(1);
    subject.next(2);
    trigger.next("start");
    subject.next(3);
  });

  snippet("Take", || {
    one_to_ten().take(5).subscribe(|v| println!("{v}"));
  });

  snippet("Take while", || {
    one_to_ten()
      .take_while(|v| *v < 5)
      .subscribe(|v| println!("{v}"));
  });

  snippet("Take until", || {
    let mut subject: PublishSubject<i32> = PublishSubject::default();
    let mut trigger: PublishSubject<&'static str> = PublishSubject::default();
    subject
      .clone()
      .take_until(trigger.clone())
      .subscribe(|v| println!("{v}"));
    subject.next(1);
    subject.next(2);
    trigger.next("start");
    subject.next(3);
  });

  snippet("Distinct until changed", || {
    of_sequence!(1, 2, 2, 3, 4, 5, 6, 7, 8, 9, 10)
      .distinct_until_changed()
      .subscribe(|v| println!("{v}"));
  });
}

fn transforming() {
  let one_to_ten = || of_sequence!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10);

  snippet("To array", || {
    one_to_ten()
      .collect::<Vec<_>>()
      .subscribe(|v| println!("{v:?}"));
  });

  snippet("Map", || {
    one_to_ten().map(|v| v * 3).subscribe(|v| println!("{v}"));
  });

  snippet("Flat map on array", || {
    observable::of((1..=10).collect::<Vec<_>>())
      .flat_map(|v| observable::from_iter(v))
      .subscribe(|v| println!("{v}"));
  });

  snippet("Flat map", || {
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();
    let mut subject: PublishSubject<PublishSubject<i32>> = PublishSubject::default();
    subject
      .clone()
      .flat_map_latest(|o| o)
      .subscribe(|v| println!("{v}"));
    subject.next(left.clone());
    subject.next(right.clone());
    left.next(1);
    left.next(2);
    right.next(3);
    left.next(4);
    right.next(5);
  });

  snippet("Start with", || {
    one_to_ten().start_with(0).subscribe(|v| println!("{v}"));
  });

  snippet("Reduce", || {
    of_sequence!(1, 1, 1, 1, 1)
      .reduce(0, |acc, v| acc + v)
      .subscribe(|v| println!("{v}"));
  });

  snippet("Scan", || {
    of_sequence!(1, 1, 1, 1, 1)
      .scan(0, |acc, v| acc + v)
      .subscribe(|v| println!("{v}"));
  });
}

fn combining() {
  snippet("Concat", || {
    of_sequence!(1, 1, 1, 1, 1)
      .concat(of_sequence!(2, 2, 2, 2, 2))
      .subscribe(|v| println!("{v}"));
  });

  snippet("Concat map", || {
    let sequences = |key: &str| match key {
      "a" => of_sequence!(1, 3, 5, 7).box_it(),
      "b" => of_sequence!(2, 4, 6, 8).box_it(),
      _ => observable::empty().box_it(),
    };
    of_sequence!("a", "b")
      .concat_map(sequences)
      .subscribe(|v| println!("{v}"));
  });

  snippet("Merge", || {
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();
    left
      .clone()
      .merge(right.clone())
      .subscribe(|v| println!("{v}"));
    left.next(1);
    left.next(1);
    right.next(2);
    left.next(1);
  });

  snippet("Combine latest", || {
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();
    left
      .clone()
      .combine_latest(right.clone(), |l, r| format!("{l}{r}"))
      .subscribe(|v| println!("{v}"));
    left.next(1);
    left.next(2);
    right.next(3);
    left.next(4);
  });

  snippet("Zip", || {
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();
    left
      .clone()
      .zip(right.clone(), |l, r| format!("{l}{r}"))
      .subscribe(|v| println!("{v}"));
    left.next(1);
    left.next(2);
    right.next(3);
    left.next(4);
  });

  snippet("Sample", || {
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();
    left
      .clone()
      .sample(right.clone())
      .subscribe(|v| println!("{v}"));
    right.next(2);
    right.next(2);
    left.next(1);
    right.next(2);
    left.next(1);
    left.next(1);
  });

  snippet("Amb", || {
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();
    left
      .clone()
      .amb(right.clone())
      .subscribe(|v| println!("{v}"));
    right.next(2);
    left.next(1);
  });

  snippet("Switch latest", || {
    let mut left: PublishSubject<i32> = PublishSubject::default();
    let mut right: PublishSubject<i32> = PublishSubject::default();
    let mut subject: PublishSubject<PublishSubject<i32>> = PublishSubject::default();
    subject
      .clone()
      .switch_latest()
      .subscribe(|v| println!("{v}"));
    subject.next(left.clone());
    subject.next(right.clone());
    right.next(2);
    left.next(1);
    right.next(2);
    right.next(2);
    left.next(1);
  });
}

fn schedulers() -> std::io::Result<()> {
  let scheduler = SerialScheduler::new()?;
  snippet("Interval", || {
    let subscription = observable::interval(Duration::from_millis(300), scheduler)
      .subscribe(|v| println!("{v}"));
    thread::sleep(Duration::from_secs(2));
    subscription.unsubscribe();
  });
  Ok(())
}

fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  basics();
  subjects();
  filtering();
  transforming();
  combining();
  schedulers()
}
