// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Bus, BusId, Catalogue, Edge, EdgeId, Graph, StopId, VertexId};

/// Pair of [Graph] vertices representing a single stop.
///
/// Rides end at the `outer` vertex. Getting from `outer` to `inner` requires
/// waiting for a bus; rides start at the `inner` vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopVertices {
    pub outer: VertexId,
    pub inner: VertexId,
}

/// What traversing a specific edge of a [TransitGraph] means for a rider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeAction {
    /// Waiting for a bus at a stop (outer to inner vertex).
    Wait { stop: StopId, time: f64 },

    /// Leaving a stop's boarding area without riding (inner to outer vertex, zero weight).
    Return { stop: StopId },

    /// Riding a bus across `span_count` consecutive stops, without a transfer.
    Ride {
        bus: BusId,
        span_count: usize,
        time: f64,
    },
}

/// Time-weighted directed graph of a transit network, with every edge labeled
/// with its [EdgeAction].
#[derive(Debug, Clone, PartialEq)]
pub struct TransitGraph {
    pub graph: Graph,

    /// Vertices of every stop, indexed by [StopId::index].
    pub stop_vertices: Vec<StopVertices>,

    /// Meaning of every edge, indexed by [EdgeId].
    pub actions: Vec<EdgeAction>,
}

impl TransitGraph {
    /// Returns the vertices of a stop.
    pub fn vertices(&self, stop: StopId) -> Option<StopVertices> {
        self.stop_vertices.get(stop.index()).cloned()
    }

    /// Returns the meaning of an edge.
    pub fn action(&self, edge: EdgeId) -> Option<EdgeAction> {
        self.actions.get(edge).cloned()
    }
}

/// Converts a complete [Catalogue] into a [TransitGraph].
///
/// Every stop gets two vertices (see [StopVertices]) linked with a wait edge
/// and a zero-weight return edge. Every bus gets a ride edge for every pair of
/// positions `i < j` on its route, so that continuing on the same bus never
/// involves another wait. Stops and buses are processed in insertion order,
/// hence the result is deterministic.
pub fn build_transit_graph(catalogue: &Catalogue) -> TransitGraph {
    let mut b = GraphBuilder::new(catalogue);
    b.add_stops();
    b.add_buses();
    b.finish()
}

/// Helper object used for storing state related to converting a [Catalogue]
/// into a [TransitGraph].
struct GraphBuilder<'a> {
    catalogue: &'a Catalogue,
    wait_time: f64,
    velocity: f64,
    g: Graph,
    stop_vertices: Vec<StopVertices>,
    actions: Vec<EdgeAction>,
}

impl<'a> GraphBuilder<'a> {
    fn new(catalogue: &'a Catalogue) -> Self {
        let settings = catalogue.route_settings();
        Self {
            catalogue,
            wait_time: settings.bus_wait_time,
            velocity: settings.bus_velocity,
            g: Graph::new(catalogue.stop_count() * 2),
            stop_vertices: Vec::with_capacity(catalogue.stop_count()),
            actions: Vec::default(),
        }
    }

    fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64, action: EdgeAction) {
        let id = self.g.add_edge(Edge { from, to, weight });
        debug_assert_eq!(id, self.actions.len());
        self.actions.push(action);
    }

    fn add_stops(&mut self) {
        let catalogue = self.catalogue;
        for (stop, _) in catalogue.stops() {
            let vertices = StopVertices {
                outer: stop.index() * 2,
                inner: stop.index() * 2 + 1,
            };
            self.stop_vertices.push(vertices);

            let wait_time = self.wait_time;
            self.add_edge(
                vertices.outer,
                vertices.inner,
                wait_time,
                EdgeAction::Wait {
                    stop,
                    time: wait_time,
                },
            );
            self.add_edge(
                vertices.inner,
                vertices.outer,
                0.0,
                EdgeAction::Return { stop },
            );
        }
    }

    fn add_buses(&mut self) {
        let catalogue = self.catalogue;
        for (id, bus) in catalogue.buses() {
            self.add_bus(id, bus);
        }
    }

    fn add_bus(&mut self, id: BusId, bus: &'a Bus) {
        let stops = &bus.stops;
        if stops.len() <= 1 {
            return;
        }

        for from_idx in 0..stops.len() - 1 {
            let from = self.stop_vertices[stops[from_idx].index()].inner;
            let mut distance = 0.0;

            for to_idx in from_idx + 1..stops.len() {
                distance += self
                    .catalogue
                    .distance(stops[to_idx - 1], stops[to_idx])
                    .road;

                let to = self.stop_vertices[stops[to_idx].index()].outer;
                let time = self.travel_time(distance);
                self.add_edge(
                    from,
                    to,
                    time,
                    EdgeAction::Ride {
                        bus: id,
                        span_count: to_idx - from_idx,
                        time,
                    },
                );
            }
        }
    }

    /// Converts a road distance in meters into travel time in minutes.
    fn travel_time(&self, meters: f64) -> f64 {
        meters / 1000.0 * 60.0 / self.velocity
    }

    fn finish(self) -> TransitGraph {
        log::debug!(
            "built transit graph: {} vertices, {} edges",
            self.g.vertex_count(),
            self.g.edge_count()
        );

        TransitGraph {
            graph: self.g,
            stop_vertices: self.stop_vertices,
            actions: self.actions,
        }
    }
}
