use crate::snake::Direction;

const CAPACITY: usize = 5;

/// Bounded FIFO absorbing directional key presses between ticks. The tick
/// engine dequeues at most one entry per tick, so movement stays
/// deterministic under bursty input. A full queue drops the newest event;
/// older, already-buffered turns keep their order.
pub struct InputQueue {
    slots: [Option<Direction>; CAPACITY],
    oldest: usize,
    len: usize,
}

impl InputQueue {
    pub fn new() -> Self {
        InputQueue { slots: [None; CAPACITY], oldest: 0, len: 0 }
    }

    /// Appends at the back. Returns `false` when the queue is full and the
    /// event was dropped.
    pub fn enqueue(&mut self, dir: Direction) -> bool {
        if self.len == CAPACITY {
            return false;
        }

        self.slots[(self.oldest + self.len) % CAPACITY] = Some(dir);
        self.len += 1;
        true
    }

    /// Removes and returns the oldest buffered direction.
    pub fn dequeue(&mut self) -> Option<Direction> {
        if self.is_empty() {
            return None;
        }

        let dir = self.slots[self.oldest].take();
        self.oldest = (self.oldest + 1) % CAPACITY;
        self.len -= 1;
        dir
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
