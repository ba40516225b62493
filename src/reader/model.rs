// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Edge, Node};

/// An airport, as described by a row of `airports.dat`.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    /// IATA code, used as the [Node] id.
    pub code: String,
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    /// Converts the airport into a graph [Node].
    pub fn node(&self) -> Node {
        Node::new(self.code.clone(), self.lat, self.lon)
    }
}

/// A direct (non-stop) flight, as described by a row of `routes.dat`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flight {
    pub origin: String,
    pub destination: String,
}

impl Flight {
    /// Converts the flight into a graph [Edge].
    pub fn edge(&self) -> Edge {
        Edge::new(self.origin.clone(), self.destination.clone())
    }
}
