// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Edge, EdgeId, VertexId};

/// Represents a directed graph with non-negative edge weights
/// over a fixed number of vertices, numbered `0..vertex_count`.
///
/// Edges are identified by the order in which they were added, and
/// outgoing edges of every vertex are kept in ascending [EdgeId] order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::default(),
            outgoing: vec![Vec::default(); vertex_count],
            incoming: vec![Vec::default(); vertex_count],
        }
    }

    /// Returns the number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns an iterator over all [Edges](Edge) in the graph, in [EdgeId] order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Adds an [Edge] to the graph, returning its id.
    ///
    /// Both endpoints must exist and the weight must be finite and non-negative,
    /// as the shortest-path search relies on that.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        assert!(edge.from < self.vertex_count(), "invalid vertex: {}", edge.from);
        assert!(edge.to < self.vertex_count(), "invalid vertex: {}", edge.to);
        assert!(
            edge.weight.is_finite() && edge.weight >= 0.0,
            "invalid edge weight: {}",
            edge.weight
        );

        let id = self.edges.len();
        self.edges.push(edge);
        self.outgoing[edge.from].push(id);
        self.incoming[edge.to].push(id);
        id
    }

    /// Retrieves an [Edge] with the provided id.
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Gets the ids of all outgoing [Edges](Edge) from a vertex.
    pub fn get_edges(&self, from: VertexId) -> &[EdgeId] {
        self.outgoing
            .get(from)
            .map(|e| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the ids of all incoming [Edges](Edge) to a vertex.
    pub fn get_incoming_edges(&self, to: VertexId) -> &[EdgeId] {
        self.incoming
            .get(to)
            .map(|e| e.as_slice())
            .unwrap_or_default()
    }
}
