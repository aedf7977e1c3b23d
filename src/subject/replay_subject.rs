use std::collections::VecDeque;

use super::{Subject, SubjectMemory};

/// Memory of a [`ReplaySubject`](super::ReplaySubject): the last `capacity`
/// values, oldest first. It is replayed even after the subject terminated.
#[derive(Debug, Clone)]
pub struct ReplayBuffer<Item> {
  capacity: usize,
  buffer: VecDeque<Item>,
}

impl<Item: Clone> SubjectMemory<Item> for ReplayBuffer<Item> {
  fn record(&mut self, value: &Item) {
    if self.capacity == 0 {
      return;
    }
    if self.buffer.len() == self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value.clone());
  }

  #[inline]
  fn replay(&self, _: bool) -> Vec<Item> { self.buffer.iter().cloned().collect() }
}

impl<Item, Err> Subject<Item, Err, ReplayBuffer<Item>> {
  pub fn new(buffer_size: usize) -> Self {
    Subject::with_memory(ReplayBuffer {
      capacity: buffer_size,
      buffer: VecDeque::with_capacity(buffer_size),
    })
  }
}
