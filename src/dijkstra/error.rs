// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::VertexId;

/// Relative tolerance under which two path weights are considered equal
/// when choosing between several shortest paths.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Error conditions which may occur during [Router::build_route](crate::Router::build_route).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end vertex doesn't exist in a graph.
    InvalidVertex(VertexId),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVertex(vertex) => write!(f, "invalid vertex: {}", vertex),
        }
    }
}

impl std::error::Error for SearchError {}
