use std::{
  convert::Infallible,
  iter::{Repeat, Take},
  ops::Range,
};

use crate::prelude::*;

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error.
/// Stops early once the observer is finished, so `take(n)` on an endless
/// iterator terminates.
///
/// # Arguments
///
/// * `iter` - An iterator to get all the values from.
///
/// # Examples
///
/// ```
/// use rxtraining::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3])
///   .subscribe(|v| {println!("{},", v)});
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableIter(iter)
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<O, Iter> Observable<Iter::Item, Infallible, O> for ObservableIter<Iter>
where
  Iter: IntoIterator,
  O: Observer<Iter::Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    for v in self.0 {
      if observer.is_finished() {
        return;
      }
      observer.next(v);
    }
    if !observer.is_finished() {
      observer.complete();
    }
  }
}

impl<Iter> ObservableExt<Iter::Item, Infallible> for ObservableIter<Iter> where
  Iter: IntoIterator
{
}

/// Creates an observable emitting `count` sequential integers starting at
/// `start`.
///
/// ```
/// use rxtraining::prelude::*;
///
/// let mut values = vec![];
/// observable::range(1, 3).subscribe(|v| values.push(v));
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
pub fn range(start: i64, count: usize) -> ObservableIter<Range<i64>> {
  from_iter(start..start + count as i64)
}

/// Creates an observable producing same value repeated N times.
///
/// Completes immediately after emitting N values. Never emits an error.
pub fn repeat<Item>(v: Item, n: usize) -> ObservableIter<Take<Repeat<Item>>>
where
  Item: Clone,
{
  from_iter(std::iter::repeat(v).take(n))
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn from_range() {
    let mut hit_count = 0;
    let mut completed = false;
    observable::from_iter(0..100)
      .on_complete(|| completed = true)
      .subscribe(|_| hit_count += 1);

    assert_eq!(hit_count, 100);
    assert!(completed);
  }

  #[test]
  fn from_vec() {
    let mut hit_count = 0;
    let mut completed = false;
    observable::from_iter(vec![0; 100])
      .on_complete(|| completed = true)
      .subscribe(|_| hit_count += 1);

    assert_eq!(hit_count, 100);
    assert!(completed);
  }

  #[test]
  fn stops_when_observer_finished() {
    let mut values = vec![];
    observable::from_iter(0..)
      .take(3)
      .subscribe(|v| values.push(v));
    assert_eq!(values, vec![0, 1, 2]);
  }

  #[test]
  fn range() {
    let mut values = vec![];
    observable::range(1, 10).subscribe(|v| values.push(v));
    assert_eq!(values, (1..=10).collect::<Vec<_>>());
  }

  #[test]
  fn repeat_three_times() {
    let mut hit_count = 0;
    let mut completed = false;
    observable::repeat(123, 3)
      .on_complete(|| completed = true)
      .subscribe(|v| {
        assert_eq!(v, 123);
        hit_count += 1;
      });
    assert_eq!(hit_count, 3);
    assert!(completed);
  }
}
