// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Statistics and fastest-way queries over a bus network.
//!
//! A [Catalogue] stores named stops, bus routes and road distances between stops,
//! and computes per-bus and per-stop statistics as buses are added. A [TransportRouter]
//! turns a complete catalogue into a time-weighted directed graph (on the first query)
//! and runs Dijkstra's algorithm to find the fastest way between two stops,
//! given a fixed wait time at every boarding and a fixed bus velocity.
//!
//! Networks may be loaded from JSON documents with the [json] module, or from
//! line-based text documents with the [text] module. The [render] module draws
//! a catalogue as an SVG map.
//!
//! # Example
//!
//! ```
//! use transit_catalogue::{Catalogue, Coordinates, ItineraryItem, TransportRouter};
//!
//! let mut catalogue = Catalogue::new();
//! let a = catalogue.add_stop("A", Coordinates::new(55.611087, 37.20829));
//! let b = catalogue.add_stop("B", Coordinates::new(55.595884, 37.209755));
//! catalogue.add_distance(a, b, 2000.0).unwrap();
//! catalogue.add_bus("14", vec![a, b, a], vec![a]).unwrap();
//!
//! let router = TransportRouter::new(&catalogue);
//! let way = router.best_way("A", "B").expect("B should be reachable from A");
//!
//! // 6 minutes of waiting, and 3 minutes of riding at 40 km/h
//! assert_eq!(way.total_time, 9.0);
//! assert!(matches!(way.items[1], ItineraryItem::Bus { bus_name: "14", span_count: 1, .. }));
//! ```

pub mod catalogue;
mod dijkstra;
mod distance;
mod graph;
pub mod json;
mod number;
pub mod render;
pub mod text;
mod transit;

pub use catalogue::{
    Bus, BusId, BusStats, Catalogue, CatalogueError, Distance, RouteSettings, Stop, StopId,
    StopStats,
};
pub use dijkstra::{RouteInfo, Router, SearchError, WEIGHT_EPSILON};
pub use distance::earth_distance;
pub use graph::Graph;
pub use number::format_number;
pub use transit::{
    build_transit_graph, EdgeAction, Itinerary, ItineraryItem, RouteError, StopVertices,
    TransitGraph, TransportRouter,
};

/// Identifies a vertex of a [Graph].
pub type VertexId = usize;

/// Identifies an [Edge] of a [Graph], in the order edges were added.
pub type EdgeId = usize;

/// Geographic position, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Represents a directed, weighted connection between two vertices of a [Graph].
///
/// `weight` must be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}
