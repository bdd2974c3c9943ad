// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

use crate::{Graph, VertexId};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: VertexId,
    weight: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for QueueItem {}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower weights are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.at.cmp(&self.at))
    }
}

/// Weights of the shortest paths from a single source vertex
/// to every vertex of a [Graph].
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ShortestPathTree {
    source: VertexId,
    weights: Vec<f64>,
}

impl ShortestPathTree {
    /// Runs [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
    /// from `source` over the whole graph.
    pub(super) fn build(g: &Graph, source: VertexId) -> Self {
        debug_assert!(source < g.vertex_count());

        let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
        let mut weights = vec![f64::INFINITY; g.vertex_count()];

        weights[source] = 0.0;
        queue.push(QueueItem {
            at: source,
            weight: 0.0,
        });

        while let Some(item) = queue.pop() {
            // Multiple items may be kept in the queue for the same vertex.
            if item.weight > weights[item.at] {
                continue;
            }

            for edge in g.get_edges(item.at).iter().filter_map(|&id| g.get_edge(id)) {
                let neighbor_weight = item.weight + edge.weight;
                if neighbor_weight < weights[edge.to] {
                    weights[edge.to] = neighbor_weight;
                    queue.push(QueueItem {
                        at: edge.to,
                        weight: neighbor_weight,
                    });
                }
            }
        }

        Self { source, weights }
    }

    pub(super) fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the weight of the shortest path to `to`,
    /// or [f64::INFINITY] if `to` is unreachable.
    pub(super) fn weight(&self, to: VertexId) -> f64 {
        self.weights.get(to).cloned().unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Edge;

    #[test]
    fn weights() {
        //   0 ──1──> 1 ──1──> 2
        //   └────────3────────┘
        //   3 (isolated)
        let mut g = Graph::new(4);
        g.add_edge(Edge { from: 0, to: 1, weight: 1.0 });
        g.add_edge(Edge { from: 1, to: 2, weight: 1.0 });
        g.add_edge(Edge { from: 0, to: 2, weight: 3.0 });

        let tree = ShortestPathTree::build(&g, 0);
        assert_eq!(tree.source(), 0);
        assert_eq!(tree.weight(0), 0.0);
        assert_eq!(tree.weight(1), 1.0);
        assert_eq!(tree.weight(2), 2.0);
        assert!(tree.weight(3).is_infinite());
        assert!(tree.weight(42).is_infinite());
    }

    #[test]
    fn edges_are_directed() {
        let mut g = Graph::new(2);
        g.add_edge(Edge { from: 1, to: 0, weight: 1.0 });

        let tree = ShortestPathTree::build(&g, 0);
        assert!(tree.weight(1).is_infinite());
    }
}
