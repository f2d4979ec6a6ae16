use std::cmp::Ordering;

use grid_util::point::Point;

use crate::error::PathError;

#[derive(Clone, Copy, Debug)]
struct Entry<C> {
    point: Point,
    priority: C,
}

impl<C: PartialOrd> Entry<C> {
    /// Heap order: priority first, then lexicographic `(x, y)` so that equal
    /// priorities extract in a reproducible order.
    fn precedes(&self, other: &Entry<C>) -> bool {
        match self.priority.partial_cmp(&other.priority) {
            Some(Ordering::Less) => true,
            Some(Ordering::Greater) => false,
            _ => (self.point.x, self.point.y) < (other.point.x, other.point.y),
        }
    }
}

/// [Frontier] is a mutable-priority min-queue over grid points: the set of
/// points whose shortest distance is not yet finalized, each keyed by its
/// current tentative distance. Membership is unique; re-inserting a present
/// point updates its priority in place.
///
/// Backed by a binary heap with an auxiliary slot table mapping the
/// linearized point index (`x + y * width`) to the point's heap position,
/// giving logarithmic insert, update, and extract instead of a full resort
/// per mutation.
#[derive(Clone, Debug)]
pub struct Frontier<C> {
    heap: Vec<Entry<C>>,
    slots: Vec<Option<usize>>,
    width: usize,
}

impl<C: PartialOrd + Copy> Frontier<C> {
    /// Creates an empty frontier for a `width` x `height` grid, reserving
    /// room for every point up front.
    pub fn new(width: usize, height: usize) -> Result<Frontier<C>, PathError> {
        let cells = width * height;
        let mut heap = Vec::new();
        heap.try_reserve_exact(cells)
            .map_err(|_| PathError::AllocationFailure)?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(cells)
            .map_err(|_| PathError::AllocationFailure)?;
        slots.resize(cells, None);
        Ok(Frontier { heap, slots, width })
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.slots[self.slot(point)].is_some()
    }

    /// Current priority of `point`, if it is a member.
    pub fn priority(&self, point: Point) -> Option<C> {
        self.slots[self.slot(point)].map(|i| self.heap[i].priority)
    }

    /// Inserts `point` with `priority`, or updates its priority if already a
    /// member. The relaxation loop only ever updates with an improvement;
    /// a worsening update is a logic error upstream.
    pub fn insert_or_update(&mut self, point: Point, priority: C) -> Result<(), PathError> {
        match self.slots[self.slot(point)] {
            Some(i) => {
                debug_assert!(
                    self.heap[i].priority.partial_cmp(&priority) != Some(Ordering::Less),
                    "frontier update must not worsen a priority"
                );
                self.heap[i].priority = priority;
                let i = self.sift_up(i);
                self.sift_down(i);
            }
            None => {
                if self.heap.len() == self.heap.capacity() {
                    self.heap
                        .try_reserve(1)
                        .map_err(|_| PathError::AllocationFailure)?;
                }
                let i = self.heap.len();
                self.heap.push(Entry { point, priority });
                self.slots[self.slot(point)] = Some(i);
                self.sift_up(i);
            }
        }
        Ok(())
    }

    /// Updates the priority of `point` if it is a member; a no-op otherwise.
    pub fn decrease_priority(&mut self, point: Point, priority: C) {
        if let Some(i) = self.slots[self.slot(point)] {
            self.heap[i].priority = priority;
            let i = self.sift_up(i);
            self.sift_down(i);
        }
    }

    /// Removes and returns the member with the least priority, together with
    /// that priority. Ties extract in lexicographic `(x, y)` order.
    pub fn extract_min(&mut self) -> Option<(Point, C)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let Entry { point, priority } = self.heap.pop()?;
        self.slots[self.slot(point)] = None;
        if !self.heap.is_empty() {
            self.slots[self.slot(self.heap[0].point)] = Some(0);
            self.sift_down(0);
        }
        Some((point, priority))
    }

    fn slot(&self, point: Point) -> usize {
        debug_assert!(point.x >= 0 && point.y >= 0);
        point.x as usize + point.y as usize * self.width
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.slot(self.heap[a].point)] = Some(a);
        self.slots[self.slot(self.heap[b].point)] = Some(b);
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.heap[i].precedes(&self.heap[parent]) {
                break;
            }
            self.swap_entries(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let child = if right < self.heap.len() && self.heap[right].precedes(&self.heap[left]) {
                right
            } else {
                left
            };
            if !self.heap[child].precedes(&self.heap[i]) {
                break;
            }
            self.swap_entries(i, child);
            i = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_priority_order() {
        let mut frontier: Frontier<f64> = Frontier::new(4, 4).unwrap();
        frontier.insert_or_update(Point::new(3, 0), 3.5).unwrap();
        frontier.insert_or_update(Point::new(0, 1), 0.25).unwrap();
        frontier.insert_or_update(Point::new(2, 2), 2.0).unwrap();
        frontier.insert_or_update(Point::new(1, 3), 1.75).unwrap();

        let order: Vec<Point> = std::iter::from_fn(|| frontier.extract_min().map(|(p, _)| p))
            .collect();
        assert_eq!(
            order,
            vec![
                Point::new(0, 1),
                Point::new(1, 3),
                Point::new(2, 2),
                Point::new(3, 0)
            ]
        );
    }

    #[test]
    fn membership_is_unique() {
        let mut frontier: Frontier<f64> = Frontier::new(2, 2).unwrap();
        frontier.insert_or_update(Point::new(1, 1), 5.0).unwrap();
        frontier.insert_or_update(Point::new(1, 1), 2.0).unwrap();
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.priority(Point::new(1, 1)), Some(2.0));
        assert_eq!(frontier.extract_min(), Some((Point::new(1, 1), 2.0)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn ties_break_lexicographically() {
        let mut frontier: Frontier<f64> = Frontier::new(3, 3).unwrap();
        frontier.insert_or_update(Point::new(2, 0), 1.0).unwrap();
        frontier.insert_or_update(Point::new(0, 2), 1.0).unwrap();
        frontier.insert_or_update(Point::new(1, 1), 1.0).unwrap();
        assert_eq!(frontier.extract_min(), Some((Point::new(0, 2), 1.0)));
        assert_eq!(frontier.extract_min(), Some((Point::new(1, 1), 1.0)));
        assert_eq!(frontier.extract_min(), Some((Point::new(2, 0), 1.0)));
    }

    #[test]
    fn update_reorders_member() {
        let mut frontier: Frontier<f64> = Frontier::new(3, 1).unwrap();
        frontier.insert_or_update(Point::new(0, 0), 1.0).unwrap();
        frontier.insert_or_update(Point::new(1, 0), 2.0).unwrap();
        frontier.insert_or_update(Point::new(2, 0), 3.0).unwrap();
        frontier.insert_or_update(Point::new(2, 0), 0.5).unwrap();
        assert_eq!(frontier.extract_min(), Some((Point::new(2, 0), 0.5)));
    }

    #[test]
    fn decrease_priority_of_absent_point_is_a_noop() {
        let mut frontier: Frontier<f64> = Frontier::new(2, 2).unwrap();
        frontier.insert_or_update(Point::new(0, 0), 1.0).unwrap();
        frontier.decrease_priority(Point::new(1, 1), 0.1);
        assert_eq!(frontier.len(), 1);
        assert!(!frontier.contains(Point::new(1, 1)));
    }

    #[test]
    fn decrease_priority_reorders_member() {
        let mut frontier: Frontier<f64> = Frontier::new(2, 2).unwrap();
        frontier.insert_or_update(Point::new(0, 0), 1.0).unwrap();
        frontier.insert_or_update(Point::new(1, 0), 2.0).unwrap();
        frontier.decrease_priority(Point::new(1, 0), 0.5);
        assert_eq!(frontier.extract_min(), Some((Point::new(1, 0), 0.5)));
    }

    #[test]
    fn extract_from_empty_returns_none() {
        let mut frontier: Frontier<f64> = Frontier::new(1, 1).unwrap();
        assert_eq!(frontier.extract_min(), None);
    }

    #[test]
    fn random_priorities_extract_sorted() {
        let mut frontier: Frontier<f64> = Frontier::new(16, 16).unwrap();
        // Deterministic pseudo-random fill without pulling a dev-dependency
        // into the unit test.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for y in 0..16 {
            for x in 0..16 {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                let priority = (seed % 1000) as f64 / 10.0;
                frontier
                    .insert_or_update(Point::new(x, y), priority)
                    .unwrap();
            }
        }
        let mut last = f64::NEG_INFINITY;
        while let Some((_, priority)) = frontier.extract_min() {
            assert!(priority >= last);
            last = priority;
        }
    }
}
