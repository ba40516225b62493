// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::BTreeSet;

use crate::{
    find_route, CostCache, CostFunction, Edge, Node, PerKilometer, Route, RouteError,
    SearchOptions,
};

/// Represents a network of [Nodes](Node) connected by undirected [Edges](Edge).
///
/// Edge costs are not stored - they are derived from node positions by a
/// [CostFunction] and memoized in a [CostCache] owned by the graph.
/// The cache is the only part of the graph mutated after loading, and it is
/// synchronized, so a `&Graph` may be shared by searches on multiple threads.
#[derive(Debug, Default)]
pub struct Graph<F = PerKilometer> {
    nodes: BTreeMap<String, Node>,
    neighbors: BTreeMap<String, BTreeSet<String>>,
    cache: CostCache<F>,
}

impl<F: CostFunction> Graph<F> {
    /// Creates an empty graph which prices edges with the provided [CostFunction].
    pub fn new(cost_fn: F) -> Self {
        Self {
            nodes: BTreeMap::default(),
            neighbors: BTreeMap::default(),
            cache: CostCache::new(cost_fn),
        }
    }

    /// Builds a graph from a registry of [Nodes](Node) and an iterable of [Edges](Edge).
    ///
    /// Self-loops and edges referring to unknown nodes are skipped - input data
    /// is allowed to mention nodes outside of the loaded subset.
    pub fn load<N, E>(nodes: N, edges: E, cost_fn: F) -> Self
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = Edge>,
    {
        let mut g = Self::new(cost_fn);
        nodes.into_iter().for_each(|node| g.insert_node(node));

        let mut skipped: usize = 0;
        for edge in edges {
            if !g.connect(&edge.from, &edge.to) {
                log::debug!("skipping edge {} - {}", edge.from, edge.to);
                skipped += 1;
            }
        }

        log::info!(
            "loaded {} nodes and {} edges ({} edges skipped)",
            g.len(),
            g.edge_count(),
            skipped,
        );
        g
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of (undirected) edges in the graph.
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.neighbors.values().map(BTreeSet::len).sum();
        directed / 2
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Creates or replaces a [Node] with `node.id`.
    ///
    /// Edges are preserved. If the node moves, cached costs of its edges are dropped.
    pub fn insert_node(&mut self, node: Node) {
        match self.nodes.entry(node.id.clone()) {
            Entry::Vacant(e) => {
                e.insert(node);
            }
            Entry::Occupied(mut e) => {
                let moved = e.get().lat != node.lat || e.get().lon != node.lon;
                e.insert(node);
                if moved {
                    self.cache.forget(e.key());
                }
            }
        }
    }

    /// Inserts an undirected edge between two nodes and returns `true`.
    ///
    /// Connecting already-connected nodes has no effect. Self-loops and
    /// edges referring to nodes missing from the graph are rejected: the graph
    /// is left unchanged and `false` is returned.
    pub fn connect(&mut self, a: &str, b: &str) -> bool {
        if a == b || !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
            return false;
        }

        self.neighbors
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.neighbors
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
        true
    }

    /// Iterates over ids of all nodes directly connected to `id`, in ascending order.
    /// Unknown nodes have no neighbors.
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.neighbors
            .get(id)
            .into_iter()
            .flat_map(|ids| ids.iter().map(String::as_str))
    }

    /// Checks whether there is an edge between two nodes.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.neighbors.get(a).is_some_and(|ids| ids.contains(b))
    }

    /// Gets the cost of an edge between two nodes, or [None] if the nodes
    /// are not directly connected.
    pub fn edge_cost(&self, a: &str, b: &str) -> Option<f64> {
        if !self.has_edge(a, b) {
            return None;
        }
        let a = self.nodes.get(a)?;
        let b = self.nodes.get(b)?;
        Some(self.cache.get_or_compute(a, b))
    }

    /// Returns the [CostCache] used to price this graph's edges.
    pub fn cache(&self) -> &CostCache<F> {
        &self.cache
    }

    /// Finds the cheapest [Route] between two nodes with [SearchOptions::default].
    /// See [find_route] for details.
    pub fn dijkstra(&self, from_id: &str, to_id: &str) -> Result<Route, RouteError> {
        find_route(self, from_id, to_id, &SearchOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::tests::Counting;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new("A", 0.0, 0.0),
            Node::new("B", 0.0, 1.0),
            Node::new("C", 0.0, 2.0),
            Node::new("D", 1.0, 2.0),
        ]
    }

    fn with_nodes() -> Graph {
        let mut g: Graph = Graph::default();
        nodes().into_iter().for_each(|n| g.insert_node(n));
        g
    }

    fn neighbors_of<F: CostFunction>(g: &Graph<F>, id: &str) -> Vec<String> {
        g.neighbors(id).map(str::to_string).collect()
    }

    #[test]
    fn connect_is_symmetric() {
        let mut g = with_nodes();
        assert!(g.connect("A", "B"));

        assert_eq!(neighbors_of(&g, "A"), vec!["B"]);
        assert_eq!(neighbors_of(&g, "B"), vec!["A"]);
        assert!(g.has_edge("A", "B"));
        assert!(g.has_edge("B", "A"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn connect_is_idempotent() {
        let mut once = with_nodes();
        once.connect("A", "B");

        let mut twice = with_nodes();
        assert!(twice.connect("A", "B"));
        assert!(twice.connect("B", "A"));
        assert!(twice.connect("A", "B"));

        for id in ["A", "B"] {
            assert_eq!(neighbors_of(&once, id), neighbors_of(&twice, id));
        }
        assert_eq!(twice.edge_count(), 1);
    }

    #[test]
    fn connect_ignores_self_loops() {
        let mut g = with_nodes();
        assert!(!g.connect("A", "A"));
        assert_eq!(neighbors_of(&g, "A"), Vec::<String>::new());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn connect_rejects_unknown_nodes() {
        let mut g = with_nodes();
        assert!(!g.connect("A", "XXX"));
        assert!(!g.connect("YYY", "B"));

        assert_eq!(neighbors_of(&g, "A"), Vec::<String>::new());
        assert_eq!(neighbors_of(&g, "XXX"), Vec::<String>::new());
        assert!(!g.has_edge("A", "XXX"));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn neighbors_of_unknown_node() {
        let g: Graph = Graph::default();
        assert_eq!(g.neighbors("XXX").count(), 0);
    }

    #[test]
    fn neighbors_are_sorted() {
        let mut g = with_nodes();
        g.connect("B", "D");
        g.connect("B", "A");
        g.connect("C", "B");
        assert_eq!(neighbors_of(&g, "B"), vec!["A", "C", "D"]);
    }

    #[test]
    fn load_skips_unknown_nodes() {
        let g = Graph::load(
            nodes(),
            vec![
                Edge::new("A", "B"),
                Edge::new("B", "C"),
                Edge::new("C", "XXX"),
                Edge::new("YYY", "A"),
            ],
            PerKilometer::default(),
        );

        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(neighbors_of(&g, "C"), vec!["B"]);
        assert_eq!(neighbors_of(&g, "XXX"), Vec::<String>::new());
        assert_eq!(neighbors_of(&g, "D"), Vec::<String>::new());
        assert!(g.get_node("XXX").is_none());
    }

    #[test]
    fn load_duplicate_edges() {
        let g = Graph::load(
            nodes(),
            vec![
                Edge::new("A", "B"),
                Edge::new("B", "A"),
                Edge::new("A", "B"),
            ],
            PerKilometer::default(),
        );
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn edge_cost() {
        let fare = Counting::new(PerKilometer::default());
        let g = Graph::load(
            nodes(),
            vec![Edge::new("A", "B"), Edge::new("B", "C")],
            &fare,
        );

        let ab = g.edge_cost("A", "B").unwrap();
        assert_eq!(ab, PerKilometer::default().cost(&nodes()[0], &nodes()[1]));
        assert_eq!(g.edge_cost("B", "A"), Some(ab));
        assert_eq!(fare.calls(), 1);

        assert_eq!(g.edge_cost("A", "C"), None);
        assert_eq!(g.edge_cost("A", "XXX"), None);
        assert_eq!(fare.calls(), 1);
        assert_eq!(g.cache().len(), 1);
    }

    #[test]
    fn moving_node_drops_cached_costs() {
        let fare = Counting::new(PerKilometer::default());
        let mut g = Graph::load(
            nodes(),
            vec![Edge::new("A", "B"), Edge::new("B", "C")],
            &fare,
        );
        let before = g.edge_cost("A", "B").unwrap();
        g.edge_cost("B", "C").unwrap();
        assert_eq!(g.cache().len(), 2);

        // Same position - cached costs stay valid
        g.insert_node(Node::new("A", 0.0, 0.0));
        assert_eq!(g.cache().len(), 2);

        let moved = Node::new("A", 0.0, -1.0);
        g.insert_node(moved.clone());
        assert_eq!(g.cache().len(), 1);

        let after = g.edge_cost("A", "B").unwrap();
        assert_eq!(after, PerKilometer::default().cost(&moved, &nodes()[1]));
        assert!(after > before);
        assert_eq!(fare.calls(), 3);
        assert!(g.has_edge("A", "B"));
    }

    #[test]
    fn iter_in_id_order() {
        let mut g: Graph = Graph::default();
        g.insert_node(Node::new("C", 0.0, 0.0));
        g.insert_node(Node::new("A", 0.0, 0.0));
        g.insert_node(Node::new("B", 0.0, 0.0));

        let ids: Vec<&str> = g.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(g.len(), 3);
    }
}
