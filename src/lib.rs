// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Cheapest direct-flight itineraries over [OpenFlights](https://openflights.org/data) data.
//!
//! Airports become [Nodes](Node) of an undirected [Graph], and direct flights become
//! its [Edges](Edge). Edge costs are not stored: they are derived from airport positions
//! by a [CostFunction] (by default, great-circle distance times a [fixed price per
//! kilometer](PerKilometer)) and memoized in a [CostCache] owned by the graph.
//! [find_route] runs Dijkstra's algorithm to find the cheapest itinerary between two airports.
//!
//! # Example
//!
//! ```no_run
//! let airports = faresearch::reader::airports_from_file(
//!     &faresearch::reader::Options::default(),
//!     "path/to/airports.dat",
//! ).expect("failed to load airports");
//! let flights = faresearch::reader::flights_from_file(
//!     &faresearch::reader::Options::default(),
//!     "path/to/routes.dat",
//! ).expect("failed to load routes");
//!
//! let g = faresearch::Graph::load(
//!     airports.iter().map(|a| a.node()),
//!     flights.iter().map(|f| f.edge()),
//!     faresearch::PerKilometer::default(),
//! );
//!
//! let route = g.dijkstra("WAW", "LAX").expect("failed to find route");
//! println!("{:.2}: {:?}", route.cost, route.path);
//! ```

mod cost;
mod distance;
mod frontier;
mod graph;
pub mod reader;
mod search;

pub use cost::{CostCache, CostFunction, Euclidean, PerKilometer, DEFAULT_PRICE_PER_KM};
pub use distance::earth_distance;
pub use frontier::Frontier;
pub use graph::Graph;
pub use search::{find_route, Route, RouteError, SearchOptions, DEFAULT_STEP_LIMIT};

/// Represents an element of the [Graph]: a uniquely-identified position on Earth.
///
/// `lat` and `lon` must be finite. For airports, `id` is the IATA code.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }
}

/// Represents an undirected connection between two [Nodes](Node).
///
/// No cost is stored - it is derived from node positions when needed.
/// `from` and `to` might not exist in a [Graph]; [Graph::load] silently ignores such edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
