use smallvec::SmallVec;

use crate::rc::{MutArc, RcDeref, RcDerefMut};

/// Subscription returns from `Observable.subscribe(Subscriber)` to allow
/// unsubscribing.
pub trait Subscription {
  /// This allows deregistering an stream before it has finished receiving all
  /// events (i.e. before onCompleted is called).
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;
}

impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<U: Subscription> Subscription for Option<U> {
  #[inline]
  fn unsubscribe(self) {
    if let Some(subscription) = self {
      subscription.unsubscribe()
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.as_ref().map_or(true, U::is_closed) }
}

/// Runs a closure as teardown logic.
pub struct ClosureSubscription<F>(pub F);

impl<F: FnOnce()> Subscription for ClosureSubscription<F> {
  #[inline]
  fn unsubscribe(self) { (self.0)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// A subscription that is filled in later and may be released by whoever
/// holds a clone first.
impl<U: Subscription> Subscription for MutArc<Option<U>> {
  fn unsubscribe(self) {
    let subscription = self.rc_deref_mut().take();
    if let Some(subscription) = subscription {
      subscription.unsubscribe()
    }
  }

  fn is_closed(&self) -> bool { self.rc_deref().as_ref().map_or(true, U::is_closed) }
}

/// Two subscriptions that are released together.
pub struct ZipSubscription<A, B> {
  a: A,
  b: B,
}

impl<A, B> ZipSubscription<A, B> {
  pub fn new(a: A, b: B) -> Self { Self { a, b } }
}

impl<A: Subscription, B: Subscription> Subscription for ZipSubscription<A, B> {
  fn unsubscribe(self) {
    self.a.unsubscribe();
    self.b.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.a.is_closed() && self.b.is_closed() }
}

trait DynSubscription {
  fn dyn_unsubscribe(self: Box<Self>);
  fn dyn_is_closed(&self) -> bool;
}

impl<U: Subscription> DynSubscription for U {
  #[inline]
  fn dyn_unsubscribe(self: Box<Self>) { (*self).unsubscribe() }

  #[inline]
  fn dyn_is_closed(&self) -> bool { self.is_closed() }
}

/// Type erased subscription, so subscriptions of different sources can live
/// in one container.
pub struct BoxSubscription(Box<dyn DynSubscription + Send>);

impl BoxSubscription {
  #[inline]
  pub fn new(subscription: impl Subscription + Send + 'static) -> Self {
    BoxSubscription(Box::new(subscription))
  }
}

impl Subscription for BoxSubscription {
  #[inline]
  fn unsubscribe(self) { self.0.dyn_unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.dyn_is_closed() }
}

/// A composite subscription: every child is released when it is released,
/// and a child appended after that is released immediately.
#[derive(Clone, Default)]
pub struct MultiSubscription(MutArc<Inner>);

#[derive(Default)]
struct Inner {
  closed: bool,
  teardown: SmallVec<[BoxSubscription; 1]>,
}

impl MultiSubscription {
  pub fn append(&self, subscription: BoxSubscription) {
    let mut inner = self.0.rc_deref_mut();
    if inner.closed {
      drop(inner);
      subscription.unsubscribe();
    } else {
      inner.teardown.retain(|v| !v.is_closed());
      inner.teardown.push(subscription);
    }
  }

  /// Number of children still held.
  pub fn teardown_size(&self) -> usize { self.0.rc_deref().teardown.len() }
}

impl Subscription for MultiSubscription {
  fn unsubscribe(self) {
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    for subscription in teardown {
      subscription.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}

/// Handle returned by the `subscribe` family of methods.
pub struct SubscriptionWrapper<U: Subscription>(pub(crate) U);

impl<U: Subscription> SubscriptionWrapper<U> {
  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<U> {
    SubscriptionGuard(Some(self.0))
  }

  /// Consumes the wrapper and returns the inner subscription.
  pub fn into_inner(self) -> U { self.0 }
}

impl<U: Subscription> Subscription for SubscriptionWrapper<U> {
  #[inline]
  fn unsubscribe(self) { self.0.unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// Implements the [must_use](
/// https://doc.rust-lang.org/reference/attributes/diagnostics.html
/// #the-must_use-attribute)
/// attribute
///
/// If you want to drop it immediately, wrap it in its own scope
#[must_use]
pub struct SubscriptionGuard<U: Subscription>(Option<U>);

impl<U: Subscription> SubscriptionGuard<U> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: U) -> SubscriptionGuard<U> {
    SubscriptionGuard(Some(subscription))
  }
}

impl<U: Subscription> Drop for SubscriptionGuard<U> {
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe()
    }
  }
}
