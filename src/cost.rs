// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::{earth_distance, Node};

/// Default price of flying one kilometer.
pub const DEFAULT_PRICE_PER_KM: f64 = 0.1;

/// Derives the cost of travelling directly between two [Nodes](Node).
///
/// Implementations must be deterministic, symmetric (`cost(a, b) == cost(b, a)`)
/// and return non-negative, finite values - otherwise [find_route](crate::find_route)
/// can't guarantee that it returns the cheapest route.
pub trait CostFunction {
    fn cost(&self, a: &Node, b: &Node) -> f64;
}

impl<F: CostFunction + ?Sized> CostFunction for &F {
    fn cost(&self, a: &Node, b: &Node) -> f64 {
        (**self).cost(a, b)
    }
}

/// Great-circle distance (see [earth_distance]) multiplied by a fixed price per kilometer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerKilometer {
    pub price_per_km: f64,
}

impl Default for PerKilometer {
    fn default() -> Self {
        Self {
            price_per_km: DEFAULT_PRICE_PER_KM,
        }
    }
}

impl CostFunction for PerKilometer {
    fn cost(&self, a: &Node, b: &Node) -> f64 {
        earth_distance(a.lat, a.lon, b.lat, b.lon) * self.price_per_km
    }
}

/// Straight-line distance on a plane, treating `lon` as x and `lat` as y,
/// multiplied by a fixed price per unit. Useful for synthetic grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euclidean {
    pub price_per_unit: f64,
}

impl CostFunction for Euclidean {
    fn cost(&self, a: &Node, b: &Node) -> f64 {
        (a.lon - b.lon).hypot(a.lat - b.lat) * self.price_per_unit
    }
}

/// Memoizes a [CostFunction] by unordered pairs of node ids.
///
/// Entries are only evicted through [CostCache::forget]. The table is guarded
/// by a mutex, and a missing entry is computed and inserted while the lock is
/// held, so the wrapped function runs at most once per pair, even when searches
/// share the cache across threads.
#[derive(Debug, Default)]
pub struct CostCache<F> {
    cost_fn: F,
    entries: Mutex<HashMap<(String, String), f64>>,
}

impl<F: CostFunction> CostCache<F> {
    pub fn new(cost_fn: F) -> Self {
        Self {
            cost_fn,
            entries: Mutex::default(),
        }
    }

    /// Returns the cached cost between `a` and `b`, computing it on first use.
    /// `(a, b)` and `(b, a)` share a single entry.
    pub fn get_or_compute(&self, a: &Node, b: &Node) -> f64 {
        let (first, second) = if a.id <= b.id { (a, b) } else { (b, a) };

        // Entries are write-once, so a poisoned table is still consistent.
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        *entries
            .entry((first.id.clone(), second.id.clone()))
            .or_insert_with(|| self.cost_fn.cost(first, second))
    }

    /// Returns the number of cached node pairs.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all cached costs of pairs involving the node with the provided id.
    pub fn forget(&mut self, id: &str) {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(a, b), _| a != id && b != id);
    }

    /// Returns the wrapped [CostFunction].
    pub fn cost_fn(&self) -> &F {
        &self.cost_fn
    }
}
