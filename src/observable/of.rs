use std::convert::Infallible;

use crate::prelude::*;

/// Creates an observable producing a single value.
///
/// Completes immediately after emitting the value given. Never emits an
/// error.
///
/// # Examples
///
/// ```
/// use rxtraining::prelude::*;
///
/// observable::of(123)
///   .subscribe(|v| {println!("{},", v)});
/// ```
pub fn of<Item>(v: Item) -> ObservableOf<Item> { ObservableOf(v) }

#[derive(Clone)]
pub struct ObservableOf<Item>(Item);

impl<Item, O> Observable<Item, Infallible, O> for ObservableOf<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    observer.next(self.0);
    observer.complete();
  }
}

impl<Item> ObservableExt<Item, Infallible> for ObservableOf<Item> {}

/// Creates an observable that emits the value if there is one, then
/// completes. `None` completes without emitting.
pub fn of_option<Item>(o: Option<Item>) -> OfOption<Item> { OfOption(o) }

#[derive(Clone)]
pub struct OfOption<Item>(Option<Item>);

impl<Item, O> Observable<Item, Infallible, O> for OfOption<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    if let Some(v) = self.0 {
      observer.next(v);
    }
    observer.complete();
  }
}

impl<Item> ObservableExt<Item, Infallible> for OfOption<Item> {}

/// Creates an observable that emits the `Ok` value and completes, or fails
/// with the `Err` value.
pub fn of_result<Item, Err>(r: Result<Item, Err>) -> OfResult<Item, Err> { OfResult(r) }

#[derive(Clone)]
pub struct OfResult<Item, Err>(Result<Item, Err>);

impl<Item, Err, O> Observable<Item, Err, O> for OfResult<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    match self.0 {
      Ok(v) => {
        observer.next(v);
        observer.complete();
      }
      Err(err) => observer.error(err),
    }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for OfResult<Item, Err> {}

/// Creates an observable from a sequence of expressions, emitted in order.
///
/// ```
/// use rxtraining::prelude::*;
///
/// let mut sum = 0;
/// of_sequence!(1, 2, 3).subscribe(|v| sum += v);
/// assert_eq!(sum, 6);
/// ```
#[macro_export]
macro_rules! of_sequence {
  ($($v:expr),* $(,)?) => {
    $crate::observable::from_iter([$($v),*])
  };
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn of() {
    let mut value = 0;
    let mut completed = false;
    observable::of(100)
      .on_complete(|| completed = true)
      .subscribe(|v| value = v);

    assert_eq!(value, 100);
    assert!(completed);
  }

  #[test]
  fn of_option() {
    let mut values = vec![];
    observable::of_option(Some(1)).subscribe(|v| values.push(v));
    observable::of_option(None).subscribe(|v| values.push(v));
    assert_eq!(values, vec![1]);
  }

  #[test]
  fn of_result() {
    let mut value = 0;
    let mut error = None;
    observable::of_result(Ok::<_, String>(3)).subscribe(|v| value = v);
    observable::of_result(Err::<i32, _>("file not found".to_owned()))
      .subscribe_all(|_| {}, |e| error = Some(e), || {});

    assert_eq!(value, 3);
    assert_eq!(error.as_deref(), Some("file not found"));
  }

  #[test]
  fn sequence_macro() {
    let mut values = vec![];
    of_sequence!(1, 2, 3,).subscribe(|v| values.push(v));
    assert_eq!(values, vec![1, 2, 3]);
  }
}
