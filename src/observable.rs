use std::fmt::Debug;

use crate::{
  ops::{
    amb::AmbOp, box_it::BoxOp, collect::CollectOp, combine_latest::CombineLatestOp,
    concat::ConcatOp, debounce::DebounceOp, debug::DebugOp, delay::DelayOp,
    distinct_until_changed::DistinctUntilChangedOp, element_at::ElementAtOp,
    filter::FilterOp, finalize::FinalizeOp, ignore_elements::IgnoreElementsOp,
    map::MapOp, map_err::MapErrOp, merge::MergeOp, merge_all::MergeAllOp,
    on_complete::OnCompleteOp, on_error::OnErrorOp, reduce::ReduceOp, sample::SampleOp,
    scan::ScanOp, skip::SkipOp, skip_until::SkipUntilOp, skip_while::SkipWhileOp,
    start_with::StartWithOp, switch_latest::SwitchLatestOp, take::TakeOp,
    take_until::TakeUntilOp, take_while::TakeWhileOp, tap::TapOp,
    with_latest_from::WithLatestFromOp, zip::ZipOp,
  },
  prelude::*,
};

mod create;
pub use create::*;
mod defer;
pub use defer::*;
mod from_iter;
pub use from_iter::*;
mod interval;
pub use interval::*;
mod of;
pub use of::*;
mod trivial;
pub use trivial::*;

/// A producer of `Item`s for observers of type `O`.
///
/// An observable is a description: nothing happens until
/// `actual_subscribe` is called, and every call is an independent run. The
/// observable is consumed by subscribing, clone it to subscribe again.
pub trait Observable<Item, Err, O> {
  type Unsub: Subscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// The operator methods. Every observable implements this marker with the
/// item and error types it emits.
pub trait ObservableExt<Item, Err>: Sized {
  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  #[inline]
  fn map<B, F>(self, f: F) -> MapOp<Self, F, Item>
  where
    F: FnMut(Item) -> B,
  {
    MapOp::new(self, f)
  }

  /// Converts the error of the stream with `f`.
  #[inline]
  fn map_err<B, F>(self, f: F) -> MapErrOp<Self, F, Err>
  where
    F: FnOnce(Err) -> B,
  {
    MapErrOp::new(self, f)
  }

  /// Emit only those items from an Observable that pass a predicate test
  #[inline]
  fn filter<F>(self, filter: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    FilterOp::new(self, filter)
  }

  /// Emits only the item at zero based `index`, then completes. Errors with
  /// [`RxError::ArgumentOutOfRange`] if the source completes before.
  #[inline]
  fn element_at(self, index: usize) -> ElementAtOp<Self, Err>
  where
    Err: Into<RxError>,
  {
    ElementAtOp::new(self, index)
  }

  /// Ignore all `next` notifications, forward only the terminal one.
  #[inline]
  fn ignore_elements(self) -> IgnoreElementsOp<Self> { IgnoreElementsOp::new(self) }

  /// Ignore the first `count` values emitted by the source Observable.
  #[inline]
  fn skip(self, count: usize) -> SkipOp<Self> { SkipOp::new(self, count) }

  /// Emits only the first `count` values emitted by the source Observable,
  /// then completes without waiting for the source.
  #[inline]
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp::new(self, count) }

  /// Discards items while `predicate` holds; everything from the first
  /// failing item on is forwarded.
  #[inline]
  fn skip_while<F>(self, predicate: F) -> SkipWhileOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    SkipWhileOp::new(self, predicate)
  }

  /// Forwards items while `predicate` holds and completes at the first item
  /// that fails it.
  #[inline]
  fn take_while<F>(self, predicate: F) -> TakeWhileOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    TakeWhileOp::new(self, predicate)
  }

  /// Discards items until `notifier` emits its first value.
  #[inline]
  fn skip_until<N, NotifyItem>(self, notifier: N) -> SkipUntilOp<Self, N, NotifyItem>
  where
    N: ObservableExt<NotifyItem, Err>,
  {
    SkipUntilOp::new(self, notifier)
  }

  /// Forwards items until `notifier` emits its first value, then completes.
  #[inline]
  fn take_until<N, NotifyItem>(self, notifier: N) -> TakeUntilOp<Self, N, NotifyItem>
  where
    N: ObservableExt<NotifyItem, Err>,
  {
    TakeUntilOp::new(self, notifier)
  }

  /// Only emit when the current value is different than the last
  #[inline]
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self>
  where
    Item: PartialEq + Clone,
  {
    DistinctUntilChangedOp::new(self)
  }

  /// Gathers every item into one collection emitted when the source
  /// completes.
  #[inline]
  fn collect<C>(self) -> CollectOp<Self, C, Item>
  where
    C: Default + Extend<Item>,
  {
    CollectOp::new(self)
  }

  /// Emits every intermediate value of folding the items with `binary_op`,
  /// starting from `initial`.
  #[inline]
  fn scan<Acc, F>(self, initial: Acc, binary_op: F) -> ScanOp<Self, F, Acc, Item>
  where
    F: FnMut(Acc, Item) -> Acc,
    Acc: Clone,
  {
    ScanOp::new(self, initial, binary_op)
  }

  /// Folds the items with `binary_op` and emits only the final value when the
  /// source completes.
  #[inline]
  fn reduce<Acc, F>(self, initial: Acc, binary_op: F) -> ReduceOp<Self, F, Acc, Item>
  where
    F: FnMut(Acc, Item) -> Acc,
  {
    ReduceOp::new(self, initial, binary_op)
  }

  /// Flattens an observable of observables, subscribing at most `concurrent`
  /// inner observables at a time; the rest wait in arrival order.
  #[inline]
  fn merge_all(self, concurrent: usize) -> MergeAllOp<Self, Item> {
    MergeAllOp::new(self, concurrent)
  }

  /// Subscribes inner observables one after another.
  #[inline]
  fn concat_all(self) -> MergeAllOp<Self, Item> { self.merge_all(1) }

  /// Maps every item to an observable and interleaves all their items.
  #[inline]
  fn flat_map<V, F>(self, f: F) -> MergeAllOp<MapOp<Self, F, Item>, V>
  where
    F: FnMut(Item) -> V,
  {
    MergeAllOp::new(MapOp::new(self, f), usize::MAX)
  }

  /// Maps every item to an observable and emits their items strictly one
  /// observable after the other.
  #[inline]
  fn concat_map<V, F>(self, f: F) -> MergeAllOp<MapOp<Self, F, Item>, V>
  where
    F: FnMut(Item) -> V,
  {
    MergeAllOp::new(MapOp::new(self, f), 1)
  }

  /// Flattens an observable of observables, keeping only the most recent
  /// inner observable subscribed.
  #[inline]
  fn switch_latest(self) -> SwitchLatestOp<Self, Item> { SwitchLatestOp::new(self) }

  /// Maps every item to an observable and follows only the latest one.
  #[inline]
  fn flat_map_latest<V, F>(self, f: F) -> SwitchLatestOp<MapOp<Self, F, Item>, V>
  where
    F: FnMut(Item) -> V,
  {
    SwitchLatestOp::new(MapOp::new(self, f))
  }

  /// Emits `value` before subscribing to the source.
  #[inline]
  fn start_with(self, value: Item) -> StartWithOp<Self, Item> {
    StartWithOp::new(self, value)
  }

  /// Emits an item only after `duration` has passed without another item.
  /// The pending item is flushed when the source completes.
  #[inline]
  fn debounce<SD>(self, duration: Duration, scheduler: SD) -> DebounceOp<Self, SD>
  where
    SD: Scheduler,
  {
    DebounceOp::new(self, duration, scheduler)
  }

  /// Shifts every notification, the terminal one included, later by
  /// `delay`. Relative order holds on a serial or virtual time scheduler.
  #[inline]
  fn delay<SD>(self, delay: Duration, scheduler: SD) -> DelayOp<Self, SD>
  where
    SD: Scheduler,
  {
    DelayOp::new(self, delay, scheduler)
  }

  /// Emits every item of `self`, then, after it completed, every item of
  /// `other`.
  #[inline]
  fn concat<S>(self, other: S) -> ConcatOp<Self, S>
  where
    S: ObservableExt<Item, Err>,
  {
    ConcatOp::new(self, other)
  }

  /// Interleaves the items of both observables in arrival order.
  #[inline]
  fn merge<S>(self, other: S) -> MergeOp<Self, S>
  where
    S: ObservableExt<Item, Err>,
  {
    MergeOp::new(self, other)
  }

  /// Once both observables emitted, emits `binary_op` of their latest items
  /// every time either emits.
  #[inline]
  fn combine_latest<S, B, F, Out>(
    self,
    other: S,
    binary_op: F,
  ) -> CombineLatestOp<Self, S, F, Item, B>
  where
    S: ObservableExt<B, Err>,
    F: FnMut(Item, B) -> Out,
  {
    CombineLatestOp::new(self, other, binary_op)
  }

  /// Pairs the n-th items of both observables with `binary_op`.
  #[inline]
  fn zip<S, B, F, Out>(self, other: S, binary_op: F) -> ZipOp<Self, S, F, Item, B>
  where
    S: ObservableExt<B, Err>,
    F: FnMut(Item, B) -> Out,
  {
    ZipOp::new(self, other, binary_op)
  }

  /// Emits the latest item of the source every time `trigger` emits, if the
  /// source emitted anything yet.
  #[inline]
  fn sample<T, TriggerItem>(self, trigger: T) -> SampleOp<Self, T, TriggerItem>
  where
    T: ObservableExt<TriggerItem, Err>,
  {
    SampleOp::new(self, trigger)
  }

  /// Pairs every item with the latest item of `other`; items arriving before
  /// `other` emitted are dropped.
  #[inline]
  fn with_latest_from<S, B>(self, other: S) -> WithLatestFromOp<Self, S, B>
  where
    S: ObservableExt<B, Err>,
  {
    WithLatestFromOp::new(self, other)
  }

  /// Mirrors whichever of the two observables notifies first and
  /// unsubscribes the other one.
  #[inline]
  fn amb<S>(self, other: S) -> AmbOp<Self, S>
  where
    S: ObservableExt<Item, Err>,
  {
    AmbOp::new(self, other)
  }

  /// Calls `f` with every item before forwarding it.
  #[inline]
  fn tap<F>(self, f: F) -> TapOp<Self, F>
  where
    F: FnMut(&Item),
  {
    TapOp::new(self, f)
  }

  /// Logs every notification, the subscription and its disposal at debug
  /// level under `label`.
  #[inline]
  fn debug(self, label: &'static str) -> DebugOp<Self>
  where
    Item: Debug,
    Err: Debug,
  {
    DebugOp::new(self, label)
  }

  /// Calls `f` exactly once when the subscription ends, by a terminal
  /// notification or by unsubscribing, whichever comes first.
  #[inline]
  fn finalize<F>(self, f: F) -> FinalizeOp<Self, F>
  where
    F: FnOnce(),
  {
    FinalizeOp::new(self, f)
  }

  /// Calls `f` when the source completes, then forwards the completion.
  #[inline]
  fn on_complete<F>(self, f: F) -> OnCompleteOp<Self, F>
  where
    F: FnOnce(),
  {
    OnCompleteOp::new(self, f)
  }

  /// Handles the error with `f`; the resulting stream can no longer fail.
  #[inline]
  fn on_error<F>(self, f: F) -> OnErrorOp<Self, F, Err>
  where
    F: FnOnce(Err),
  {
    OnErrorOp::new(self, f)
  }

  /// Erases the concrete type, so observables built differently can be used
  /// in one place.
  #[inline]
  fn box_it(self) -> BoxOp<Item, Err>
  where
    Self: Observable<Item, Err, BoxedObserver<'static, Item, Err>> + Send + 'static,
    <Self as Observable<Item, Err, BoxedObserver<'static, Item, Err>>>::Unsub:
      Send + 'static,
  {
    BoxOp::new(self)
  }

  /// Subscribes with a `next` callback. Errors are reported to the unhandled
  /// error hook.
  fn subscribe<N>(
    self,
    next: N,
  ) -> SubscriptionWrapper<<Self as Observable<Item, Err, ObserverN<N>>>::Unsub>
  where
    N: FnMut(Item),
    Err: Debug,
    Self: Observable<Item, Err, ObserverN<N>>,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverN::new(next)))
  }

  /// Subscribes with callbacks for every kind of notification.
  fn subscribe_all<N, E, C>(
    self,
    next: N,
    error: E,
    complete: C,
  ) -> SubscriptionWrapper<<Self as Observable<Item, Err, ObserverAll<N, E, C>>>::Unsub>
  where
    N: FnMut(Item),
    E: FnOnce(Err),
    C: FnOnce(),
    Self: Observable<Item, Err, ObserverAll<N, E, C>>,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverAll::new(next, error, complete)))
  }
}
