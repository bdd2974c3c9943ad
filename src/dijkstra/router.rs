// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::tree::ShortestPathTree;
use crate::{Edge, EdgeId, Graph, SearchError, VertexId, WEIGHT_EPSILON};

/// The result of a [Router::build_route] query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    /// Sum of weights of all edges on the route.
    pub weight: f64,

    /// Edges to traverse, in order.
    pub edges: Vec<EdgeId>,
}

/// Answers shortest-path queries over an immutable [Graph].
///
/// Shortest-path trees are computed lazily, once per source vertex,
/// and cached for subsequent queries. The cache is guarded by a mutex,
/// so a Router may be shared between threads.
#[derive(Debug)]
pub struct Router {
    graph: Graph,
    trees: Mutex<HashMap<VertexId, Arc<ShortestPathTree>>>,
}

impl Router {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            trees: Mutex::default(),
        }
    }

    /// Returns the underlying [Graph].
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Finds the lightest route between two vertices.
    ///
    /// Returns `Ok(None)` if `to` is not reachable from `from`. A route from a vertex
    /// to itself is always empty. If several routes share the lowest weight
    /// (up to [WEIGHT_EPSILON](crate::WEIGHT_EPSILON)), the one with the lexicographically
    /// smallest sequence of edge ids is returned, so answers are reproducible.
    pub fn build_route(
        &self,
        from: VertexId,
        to: VertexId,
    ) -> Result<Option<RouteInfo>, SearchError> {
        if from >= self.graph.vertex_count() {
            return Err(SearchError::InvalidVertex(from));
        }
        if to >= self.graph.vertex_count() {
            return Err(SearchError::InvalidVertex(to));
        }

        let tree = self.tree(from);
        let weight = tree.weight(to);
        if weight.is_infinite() {
            return Ok(None);
        }

        let edges = self.reconstruct_path(&tree, to);
        debug_assert!(edges.is_some(), "reachable vertex must have a tight path");
        Ok(edges.map(|edges| RouteInfo { weight, edges }))
    }

    /// Returns the cached shortest-path tree for `source`, building it if necessary.
    fn tree(&self, source: VertexId) -> Arc<ShortestPathTree> {
        let mut trees = self.trees.lock().unwrap_or_else(PoisonError::into_inner);
        trees
            .entry(source)
            .or_insert_with(|| {
                log::trace!("building shortest-path tree from vertex {}", source);
                Arc::new(ShortestPathTree::build(&self.graph, source))
            })
            .clone()
    }

    /// Checks if an edge lies on some shortest path from the tree's source.
    fn is_tight(tree: &ShortestPathTree, edge: &Edge) -> bool {
        let via = tree.weight(edge.from) + edge.weight;
        let direct = tree.weight(edge.to);
        via.is_finite() && (via - direct).abs() <= WEIGHT_EPSILON * direct.max(1.0)
    }

    /// Picks the lexicographically smallest sequence of tight edges
    /// leading from the tree's source to `to`.
    fn reconstruct_path(&self, tree: &ShortestPathTree, to: VertexId) -> Option<Vec<EdgeId>> {
        let g = &self.graph;

        // Mark all vertices which can reach `to` using only tight edges
        let mut leads_to_target = vec![false; g.vertex_count()];
        let mut pending = vec![to];
        leads_to_target[to] = true;
        while let Some(at) = pending.pop() {
            for edge in g
                .get_incoming_edges(at)
                .iter()
                .filter_map(|&id| g.get_edge(id))
            {
                if !leads_to_target[edge.from] && Self::is_tight(tree, edge) {
                    leads_to_target[edge.from] = true;
                    pending.push(edge.from);
                }
            }
        }

        // Walk from the source, always trying the smallest edge id first
        let mut visited = vec![false; g.vertex_count()];
        let mut path: Vec<EdgeId> = Vec::default();
        let mut stack: Vec<(VertexId, usize)> = vec![(tree.source(), 0)];
        visited[tree.source()] = true;

        while let Some((at, cursor)) = stack.last_mut() {
            let at = *at;
            if at == to {
                return Some(path);
            }

            match g.get_edges(at).get(*cursor) {
                Some(&edge_id) => {
                    *cursor += 1;
                    if let Some(edge) = g.get_edge(edge_id) {
                        if !visited[edge.to]
                            && leads_to_target[edge.to]
                            && Self::is_tight(tree, edge)
                        {
                            visited[edge.to] = true;
                            path.push(edge_id);
                            stack.push((edge.to, 0));
                        }
                    }
                }
                None => {
                    stack.pop();
                    path.pop();
                }
            }
        }

        None
    }
}
