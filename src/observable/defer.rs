use crate::prelude::*;

/// Creates an observable that calls `factory` on every subscription and
/// subscribes to the observable it returns.
///
/// ```rust
/// # use rxtraining::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   observable::of("Hello!")
/// })
///   .subscribe(move |v| {
///     println!("{}", v);
///   });
/// // Prints: Hi!\nHello!\n
/// ```
pub fn defer<F, R>(factory: F) -> Defer<F>
where
  F: FnOnce() -> R,
{
  Defer(factory)
}

#[derive(Clone)]
pub struct Defer<F>(F);

impl<Item, Err, O, F, R> Observable<Item, Err, O> for Defer<F>
where
  F: FnOnce() -> R,
  R: Observable<Item, Err, O>,
{
  type Unsub = R::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    (self.0)().actual_subscribe(observer)
  }
}

impl<Item, Err, F, R> ObservableExt<Item, Err> for Defer<F>
where
  F: FnOnce() -> R,
  R: ObservableExt<Item, Err>,
{
}
