//! A binary min-heap keyed by an `i32` priority.
//!
//! Unlike `std::collections::BinaryHeap`, the sift rules here are fixed:
//! an element only moves past a parent or child with a strictly larger key.
//! Ties therefore keep their structural order, which is deterministic for a
//! given insertion sequence. There is no decrease-key; callers push a fresh
//! entry and drop stale ones when they surface.

#[derive(Clone, Debug)]
struct HeapNode<T> {
    key: i32,
    item: T,
}

/// Priority queue returning the smallest key first.
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    nodes: Vec<HeapNode<T>>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Push `item` with priority `key`. O(log n).
    pub fn insert(&mut self, key: i32, item: T) {
        self.nodes.push(HeapNode { key, item });
        self.sift_up(self.nodes.len() - 1);
    }

    /// Remove and return the entry with the smallest key. O(log n).
    ///
    /// Returns `None` on an empty heap.
    pub fn extract_min(&mut self) -> Option<(i32, T)> {
        if self.nodes.is_empty() {
            return None;
        }
        let root = self.nodes.swap_remove(0);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some((root.key, root.item))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.nodes[i].key >= self.nodes[parent].key {
                break;
            }
            self.nodes.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut swap = None;

            if left < len && self.nodes[left].key < self.nodes[i].key {
                swap = Some(left);
            }
            if right < len {
                let beats = match swap {
                    None => self.nodes[right].key < self.nodes[i].key,
                    Some(l) => self.nodes[right].key < self.nodes[l].key,
                };
                if beats {
                    swap = Some(right);
                }
            }

            let Some(s) = swap else {
                break;
            };
            self.nodes.swap(i, s);
            i = s;
        }
    }
}
