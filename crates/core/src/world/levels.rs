//! First-in first-out level queue.

use std::collections::VecDeque;

use super::LevelQueue;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FifoLevelQueue {
    pending: VecDeque<u32>,
}

impl FifoLevelQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> impl Iterator<Item = u32> + '_ {
        self.pending.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl LevelQueue for FifoLevelQueue {
    fn queue_level(&mut self, level: u32) {
        self.pending.push_back(level);
    }

    fn has_queued_level(&self) -> bool {
        !self.pending.is_empty()
    }

    fn dequeue_level(&mut self) -> Option<u32> {
        self.pending.pop_front()
    }
}
