use std::convert::Infallible;

use crate::prelude::*;

/// Creates an observable that emits no items, just terminates with an error.
///
/// # Arguments
///
/// * `e` - An error to emit and terminate with
pub fn throw<Item, Err>(e: Err) -> Throw<Item, Err> { Throw(e, TypeHint::new()) }

#[derive(Clone)]
pub struct Throw<Item, Err>(Err, TypeHint<Item>);

impl<Item, Err, O> Observable<Item, Err, O> for Throw<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.error(self.0) }
}

impl<Item, Err> ObservableExt<Item, Err> for Throw<Item, Err> {}

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
///
/// # Examples
/// ```
/// use rxtraining::prelude::*;
///
/// observable::empty()
///   .subscribe(|v: i32| {println!("{},", v)});
///
/// // Result: no thing printed
/// ```
pub fn empty<Item>() -> Empty<Item> { Empty(TypeHint::new()) }

#[derive(Clone)]
pub struct Empty<Item>(TypeHint<Item>);

impl<Item, O> Observable<Item, Infallible, O> for Empty<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.complete() }
}

impl<Item> ObservableExt<Item, Infallible> for Empty<Item> {}

/// Creates an observable that never emits anything.
///
/// Neither emits a value, nor completes, nor emits an error.
pub fn never<Item>() -> Never<Item> { Never(TypeHint::new()) }

#[derive(Clone)]
pub struct Never<Item>(TypeHint<Item>);

impl<Item, O> Observable<Item, Infallible, O> for Never<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, _: O) -> Self::Unsub {}
}

impl<Item> ObservableExt<Item, Infallible> for Never<Item> {}
