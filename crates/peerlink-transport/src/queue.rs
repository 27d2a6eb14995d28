//! Generic FIFO for buffered outbound/inbound items
//!
//! The host framework composes packets ahead of time and buffers them here
//! between ticks. The queue owns its elements; clearing releases each one
//! front to back without inspecting it.

use std::collections::VecDeque;

/// Ordered queue of pending items, cleared safely on teardown
#[derive(Debug, Clone)]
pub struct PendingQueue<T> {
    items: VecDeque<T>,
}

impl<T> PendingQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append an item at the back
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove and return the front item, if any
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove and discard every item, front to back
    ///
    /// Dropping each element is the only per-element cleanup; calling this
    /// on an empty queue is a no-op.
    pub fn clear(&mut self) {
        while self.items.pop_front().is_some() {}
    }
}

impl<T> Default for PendingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fifo_order() {
        let mut queue = PendingQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_clear_on_empty_queue_is_noop() {
        let mut queue: PendingQueue<Vec<u8>> = PendingQueue::new();
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_discards_every_item() {
        let mut queue = PendingQueue::new();
        let tracker = Rc::new(());
        for _ in 0..5 {
            queue.push(Rc::clone(&tracker));
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(Rc::strong_count(&tracker), 6);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        // Every queued element was dropped, not leaked.
        assert_eq!(Rc::strong_count(&tracker), 1);
    }
}
