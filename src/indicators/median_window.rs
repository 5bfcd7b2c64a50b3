/// Fixed-capacity ring buffer of recent samples with an on-demand median
///
/// Once full, each push overwrites the oldest entry, so memory stays at
/// `capacity` samples regardless of series length.
#[derive(Debug, Clone)]
pub struct MedianWindow {
    values: Vec<f64>,
    scratch: Vec<f64>,
    capacity: usize,
    next: usize,
}

impl MedianWindow {
    /// Create an empty window. A zero capacity is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: Vec::with_capacity(capacity),
            scratch: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() < self.capacity {
            self.values.push(value);
        } else {
            self.values[self.next] = value;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Median of the buffered samples; the mean of the two middle values for
    /// an even count. `None` while empty.
    pub fn median(&mut self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }

        self.scratch.clear();
        self.scratch.extend_from_slice(&self.values);
        self.scratch.sort_by(f64::total_cmp);

        let n = self.scratch.len();
        let mid = n / 2;
        if n % 2 == 0 {
            Some((self.scratch[mid - 1] + self.scratch[mid]) / 2.0)
        } else {
            Some(self.scratch[mid])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_has_no_median() {
        let mut window = MedianWindow::new(4);
        assert!(window.is_empty());
        assert_eq!(window.median(), None);
    }

    #[test]
    fn test_odd_and_even_median() {
        let mut window = MedianWindow::new(4);
        window.push(5.0);
        window.push(1.0);
        window.push(3.0);
        assert_eq!(window.median(), Some(3.0));

        window.push(10.0);
        assert!(window.is_full());
        assert_eq!(window.median(), Some(4.0));
    }

    #[test]
    fn test_oldest_entry_is_evicted() {
        let mut window = MedianWindow::new(3);
        for value in [100.0, 1.0, 2.0, 3.0] {
            window.push(value);
        }

        assert_eq!(window.len(), 3);
        // 100.0 fell out of the window
        assert_eq!(window.median(), Some(2.0));
    }

    #[test]
    fn test_memory_stays_bounded() {
        let mut window = MedianWindow::new(8);
        for i in 0..10_000 {
            window.push(i as f64);
        }

        assert_eq!(window.len(), 8);
        assert_eq!(window.capacity(), 8);
        assert_eq!(window.median(), Some(9995.5));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut window = MedianWindow::new(0);
        window.push(7.0);
        window.push(9.0);

        assert_eq!(window.capacity(), 1);
        assert_eq!(window.median(), Some(9.0));
    }
}
