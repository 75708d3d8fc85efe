//! Binary min-heap keyed by `f64` priority
//!
//! Ties are not ordered; callers must not rely on insertion order.

#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<(f64, T)>,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn insert(&mut self, item: T, priority: f64) {
        self.heap.push((priority, item));
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the item with the smallest priority
    pub fn extract_min(&mut self) -> Option<(T, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let (priority, item) = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((item, priority))
    }

    pub fn peek(&self) -> Option<(&T, f64)> {
        self.heap.first().map(|(priority, item)| (item, *priority))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].0 < self.heap[parent].0 {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < len && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
