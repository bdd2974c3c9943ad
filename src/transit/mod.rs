// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod builder;
mod router;

pub use builder::{build_transit_graph, EdgeAction, StopVertices, TransitGraph};
pub use router::{Itinerary, ItineraryItem, RouteError, TransportRouter};
