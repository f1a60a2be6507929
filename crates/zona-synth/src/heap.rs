//! Priority-indexed binary heaps for placement and ordering searches.
//!
//! [`IndexedHeap`] is a max-heap over `(priority, element)` pairs with
//! unique elements. Opposed to `std::collections::BinaryHeap`, it allows
//! updating the priority of an element and erasing an element in
//! O(log n) time, via an auxiliary element-to-index map that is kept in
//! sync on every sift swap. Callers that want the smallest element on
//! top wrap their priorities in [`core::cmp::Reverse`].
//!
//! [`BoundedHeap`] adds a fixed capacity: pushing into a full heap
//! evicts the least-priority element (or rejects the pushed one, if it
//! is itself the least).

use core::cmp::Reverse;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A binary max-heap with unique elements and O(log n) priority update
/// and erase.
#[derive(Debug, Clone)]
pub struct IndexedHeap<P, T>
where
    P: Ord,
    T: Clone + Eq + Hash,
{
    entries: Vec<(P, T)>,
    index: FxHashMap<T, usize>,
}

impl<P, T> Default for IndexedHeap<P, T>
where
    P: Ord,
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, T> IndexedHeap<P, T>
where
    P: Ord,
    T: Clone + Eq + Hash,
{
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Number of elements in the heap.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the element is in the heap.
    pub fn contains(&self, element: &T) -> bool {
        self.index.contains_key(element)
    }

    /// The priority bound to an element, if present.
    pub fn priority_of(&self, element: &T) -> Option<&P> {
        self.index.get(element).map(|&i| &self.entries[i].0)
    }

    /// The greatest-priority entry. O(1).
    pub fn top(&self) -> Option<(&P, &T)> {
        self.entries.first().map(|(p, t)| (p, t))
    }

    /// Remove and return the greatest-priority entry. O(log n).
    pub fn pop(&mut self) -> Option<(P, T)> {
        let last = self.entries.len().checked_sub(1)?;
        self.entries.swap(0, last);
        let (priority, element) = self.entries.pop()?;
        self.index.remove(&element);
        if !self.entries.is_empty() {
            self.set_index(0);
            self.sift_down(0);
        }
        Some((priority, element))
    }

    /// Insert an element with the given priority. O(log n).
    ///
    /// If the element is already present its priority is rebound and the
    /// heap re-sifted; returns whether the element was newly inserted.
    pub fn push(&mut self, priority: P, element: T) -> bool {
        if self.contains(&element) {
            self.update(&element, priority);
            return false;
        }
        self.entries.push((priority, element));
        let i = self.entries.len() - 1;
        self.set_index(i);
        self.sift_up(i);
        true
    }

    /// Rebind the priority of an element. O(log n).
    ///
    /// Returns whether the element was present.
    pub fn update(&mut self, element: &T, priority: P) -> bool {
        let Some(&i) = self.index.get(element) else {
            return false;
        };
        self.entries[i].0 = priority;
        // sift up for a raised priority, down for a lowered one
        if self.sift_up(i) == i {
            self.sift_down(i);
        }
        true
    }

    /// Remove an element, returning its priority if it was present.
    /// O(log n).
    pub fn erase(&mut self, element: &T) -> Option<P> {
        let i = self.index.remove(element)?;
        let last = self.entries.len() - 1;
        self.entries.swap(i, last);
        let (priority, _) = self.entries.pop()?;
        if i < self.entries.len() {
            self.set_index(i);
            if self.sift_up(i) == i {
                self.sift_down(i);
            }
        }
        Some(priority)
    }

    /// Iterate over all entries in heap (not priority) order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &T)> {
        self.entries.iter().map(|(p, t)| (p, t))
    }

    fn set_index(&mut self, i: usize) {
        self.index.insert(self.entries[i].1.clone(), i);
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[i].0 > self.entries[parent].0 {
                self.entries.swap(i, parent);
                self.set_index(i);
                self.set_index(parent);
                i = parent;
            } else {
                break;
            }
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) -> usize {
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut largest = i;
            if left < self.entries.len() && self.entries[left].0 > self.entries[largest].0 {
                largest = left;
            }
            if right < self.entries.len() && self.entries[right].0 > self.entries[largest].0 {
                largest = right;
            }
            if largest == i {
                break;
            }
            self.entries.swap(i, largest);
            self.set_index(i);
            self.set_index(largest);
            i = largest;
        }
        i
    }
}

/// A max-heap with a fixed capacity that evicts its least-priority
/// element on overflow.
///
/// Implemented as two mirrored [`IndexedHeap`]s holding the same element
/// set: `max_heap` answers [`top`](Self::top), `min_heap` (priorities
/// wrapped in [`Reverse`]) identifies the eviction victim.
#[derive(Debug, Clone)]
pub struct BoundedHeap<P, T>
where
    P: Ord + Clone,
    T: Clone + Eq + Hash,
{
    max_size: usize,
    max_heap: IndexedHeap<P, T>,
    min_heap: IndexedHeap<Reverse<P>, T>,
}

impl<P, T> BoundedHeap<P, T>
where
    P: Ord + Clone,
    T: Clone + Eq + Hash,
{
    /// Create an empty heap holding at most `max_size` elements.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            max_heap: IndexedHeap::new(),
            min_heap: IndexedHeap::new(),
        }
    }

    /// The maximum number of elements the heap retains.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of elements in the heap.
    pub fn len(&self) -> usize {
        self.max_heap.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.max_heap.is_empty()
    }

    /// Whether the element is in the heap.
    pub fn contains(&self, element: &T) -> bool {
        self.max_heap.contains(element)
    }

    /// The greatest-priority entry. O(1).
    pub fn top(&self) -> Option<(&P, &T)> {
        self.max_heap.top()
    }

    /// Remove and return the greatest-priority entry. O(log n).
    pub fn pop(&mut self) -> Option<(P, T)> {
        let (priority, element) = self.max_heap.pop()?;
        self.min_heap.erase(&element);
        Some((priority, element))
    }

    /// Insert an element, evicting the least-priority element when the
    /// heap is full. O(log n).
    ///
    /// Returns whether the pushed element was retained. Pushing an
    /// element that is already present rebinds its priority (never
    /// evicts) and returns `true`.
    pub fn push(&mut self, priority: P, element: T) -> bool {
        self.min_heap
            .push(Reverse(priority.clone()), element.clone());
        if self.min_heap.len() > self.max_size {
            let evict = {
                // the least entry under the priority order
                let (Reverse(least_priority), least_element) =
                    self.min_heap.top().expect("min heap cannot be empty here");
                (least_priority != &priority || least_element != &element)
                    .then(|| least_element.clone())
            };
            let retained = if let Some(victim) = evict {
                self.max_heap.erase(&victim);
                self.max_heap.push(priority, element);
                true
            } else {
                // the pushed element is itself the least; drop it
                false
            };
            self.min_heap.pop();
            retained
        } else {
            self.max_heap.push(priority, element);
            true
        }
    }

    /// Rebind the priority of an element in both mirrored heaps.
    /// O(log n).
    ///
    /// Returns whether the element was present.
    pub fn update(&mut self, element: &T, priority: P) -> bool {
        let in_min = self.min_heap.update(element, Reverse(priority.clone()));
        let in_max = self.max_heap.update(element, priority);
        debug_assert_eq!(in_min, in_max);
        in_min && in_max
    }

    /// Remove an element, returning its priority if it was present.
    /// O(log n).
    pub fn erase(&mut self, element: &T) -> Option<P> {
        self.min_heap.erase(element);
        self.max_heap.erase(element)
    }

    /// Iterate over all entries in internal (not priority) order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &T)> {
        self.max_heap.iter()
    }
}
