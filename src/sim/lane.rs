//! Scrolling entity lanes
//!
//! A lane is an x-ordered deque. Entities are appended at the back (further
//! right than everything already present) and only ever removed from the
//! front, so the ordering holds by construction and pruning never has to scan.

use std::collections::VecDeque;

/// Anything that occupies a horizontal span and scrolls with the world
pub trait Spanned {
    /// Leading (left) edge
    fn left(&self) -> f32;
    /// Horizontal extent
    fn width(&self) -> f32;
    /// Move by `dx` along x
    fn shift(&mut self, dx: f32);

    /// Trailing (right) edge
    fn right(&self) -> f32 {
        self.left() + self.width()
    }
}

#[derive(Debug, Clone)]
pub struct Lane<T> {
    items: VecDeque<T>,
}

impl<T> Default for Lane<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T: Spanned> Lane<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the back. The entity must start right of the current back.
    pub fn push_back(&mut self, item: T) {
        debug_assert!(
            self.items
                .back()
                .is_none_or(|back| back.left() < item.left()),
            "lane append out of x-order"
        );
        self.items.push_back(item);
    }

    /// Scroll every entity by `dx`
    pub fn shift_all(&mut self, dx: f32) {
        for item in &mut self.items {
            item.shift(dx);
        }
    }

    /// Drop the front entity if its trailing edge is left of `limit`.
    ///
    /// At most one entity leaves per call.
    pub fn prune_front(&mut self, limit: f32) -> Option<T> {
        if self.items.front().is_some_and(|front| front.right() < limit) {
            self.items.pop_front()
        } else {
            None
        }
    }

    /// Whether left edges are strictly increasing front to back
    pub fn is_x_ordered(&self) -> bool {
        self.items
            .iter()
            .zip(self.items.iter().skip(1))
            .all(|(a, b)| a.left() < b.left())
    }
}

impl<T> Lane<T> {
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Lane<T> {
    /// Snapshot in x-order
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
