use super::{Subject, SubjectMemory};
use crate::rc::RcDeref;

/// Memory of a [`BehaviorSubject`](super::BehaviorSubject): the current
/// value. A terminated subject no longer hands it out.
#[derive(Debug, Clone)]
pub struct LastValue<Item>(Item);

impl<Item: Clone> SubjectMemory<Item> for LastValue<Item> {
  #[inline]
  fn record(&mut self, value: &Item) { self.0 = value.clone(); }

  fn replay(&self, terminated: bool) -> Vec<Item> {
    if terminated { vec![] } else { vec![self.0.clone()] }
  }
}

impl<Item, Err> Subject<Item, Err, LastValue<Item>> {
  #[inline]
  pub fn new(value: Item) -> Self { Subject::with_memory(LastValue(value)) }

  /// The most recently pushed value, or the seed.
  pub fn value(&self) -> Item
  where
    Item: Clone,
  {
    self.state.rc_deref().memory.0.clone()
  }
}
