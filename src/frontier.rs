// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct FrontierItem<T> {
    cost: f64,
    sequence: u64,
    value: T,
}

impl<T> PartialEq for FrontierItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierItem<T> {}

impl<T> PartialOrd for FrontierItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs (and earlier insertions) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-priority queue of values ordered by an `f64` cost.
///
/// Values with equal costs are popped in insertion order, which keeps
/// route search deterministic. The values themselves are never compared.
#[derive(Debug, Clone)]
pub struct Frontier<T> {
    heap: BinaryHeap<FrontierItem<T>>,
    next_sequence: u64,
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::default(),
            next_sequence: 0,
        }
    }
}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Adds a value with the given cost to the frontier.
    pub fn push(&mut self, cost: f64, value: T) {
        debug_assert!(!cost.is_nan());
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierItem {
            cost,
            sequence,
            value,
        });
    }

    /// Removes and returns the cheapest value, with its cost,
    /// or [None] if the frontier is empty.
    pub fn try_pop(&mut self) -> Option<(f64, T)> {
        self.heap.pop().map(|item| (item.cost, item.value))
    }

    /// Removes and returns the cheapest value, with its cost.
    ///
    /// # Panics
    ///
    /// Panics if the frontier is empty. Use [Frontier::try_pop]
    /// or check [Frontier::is_empty] first.
    pub fn pop(&mut self) -> (f64, T) {
        match self.try_pop() {
            Some(item) => item,
            None => panic!("pop from an empty frontier"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_cheapest_first() {
        let mut f = Frontier::new();
        f.push(3.0, "c");
        f.push(1.0, "a");
        f.push(2.0, "b");
        assert_eq!(f.len(), 3);

        assert_eq!(f.pop(), (1.0, "a"));
        assert_eq!(f.pop(), (2.0, "b"));
        assert_eq!(f.pop(), (3.0, "c"));
        assert!(f.is_empty());
        assert_eq!(f.try_pop(), None);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut f = Frontier::new();
        f.push(5.0, "first");
        f.push(1.0, "cheap");
        f.push(5.0, "second");
        f.push(5.0, "third");

        assert_eq!(f.pop(), (1.0, "cheap"));
        assert_eq!(f.pop(), (5.0, "first"));
        assert_eq!(f.pop(), (5.0, "second"));
        assert_eq!(f.pop(), (5.0, "third"));
    }

    #[test]
    fn ties_ignore_values() {
        // Values which would sort the other way must not affect the order
        let mut f = Frontier::new();
        f.push(0.5, vec!["Z", "Z"]);
        f.push(0.5, vec!["A"]);

        assert_eq!(f.pop().1, vec!["Z", "Z"]);
        assert_eq!(f.pop().1, vec!["A"]);
    }

    #[test]
    fn interleaved_push_and_pop() {
        let mut f = Frontier::new();
        f.push(2.0, 2);
        f.push(4.0, 4);
        assert_eq!(f.pop(), (2.0, 2));

        f.push(1.0, 1);
        f.push(4.0, 5);
        assert_eq!(f.pop(), (1.0, 1));
        assert_eq!(f.pop(), (4.0, 4));
        assert_eq!(f.pop(), (4.0, 5));
    }

    #[test]
    #[should_panic(expected = "pop from an empty frontier")]
    fn pop_empty_panics() {
        let mut f: Frontier<()> = Frontier::new();
        f.pop();
    }
}
