/// Round-robin value pools
///
/// Cycles through a fixed ordered slice, wrapping modulo its length. State is never
/// reset, so a cursor carried across a whole file keeps its position between
/// product identifiers.

#[derive(Debug, Clone)]
pub struct RoundRobin<T: 'static> {
    pool: &'static [T],
    index: usize,
}

impl<T: Copy + 'static> RoundRobin<T> {
    /// Panics on an empty pool
    pub fn new(pool: &'static [T]) -> Self {
        assert!(!pool.is_empty(), "round-robin pool must not be empty");
        RoundRobin { pool, index: 0 }
    }

    /// Return the current value and advance
    pub fn next_value(&mut self) -> T {
        let value = self.pool[self.index];
        self.index = (self.index + 1) % self.pool.len();
        value
    }

    /// Value the next call will return
    pub fn peek(&self) -> T {
        self.pool[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
