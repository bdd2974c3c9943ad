// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::OnceLock;

use super::builder::{build_transit_graph, EdgeAction, StopVertices};
use crate::{Catalogue, Router, SearchError};

/// A single step of an [Itinerary].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItineraryItem<'a> {
    /// Wait for a bus at a stop, for `time` minutes.
    Wait { stop_name: &'a str, time: f64 },

    /// Ride a bus for `time` minutes, across `span_count` stops.
    Bus {
        bus_name: &'a str,
        span_count: usize,
        time: f64,
    },
}

/// The fastest way between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary<'a> {
    /// Total travel time, in minutes.
    pub total_time: f64,
    pub items: Vec<ItineraryItem<'a>>,
}

/// Reasons why [TransportRouter::find_way] can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("unknown stop: {0:?}")]
    UnknownStop(String),

    #[error("no route from {from:?} to {to:?}")]
    NoRoute { from: String, to: String },

    #[error("search: {0}")]
    Search(#[from] SearchError),
}

/// Everything computed on the first query.
#[derive(Debug)]
struct Built {
    router: Router,
    stop_vertices: Vec<StopVertices>,
    actions: Vec<EdgeAction>,
}

/// Finds the fastest ways between stops of a [Catalogue].
///
/// The transit graph is built lazily, exactly once, when the first query arrives.
/// The router borrows the catalogue, so the catalogue can't be modified
/// while the router is alive.
#[derive(Debug)]
pub struct TransportRouter<'a> {
    catalogue: &'a Catalogue,
    built: OnceLock<Built>,
}

impl<'a> TransportRouter<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self {
            catalogue,
            built: OnceLock::new(),
        }
    }

    /// Checks if the transit graph has already been built.
    pub fn is_built(&self) -> bool {
        self.built.get().is_some()
    }

    fn built(&self) -> &Built {
        self.built.get_or_init(|| {
            let tg = build_transit_graph(self.catalogue);
            Built {
                router: Router::new(tg.graph),
                stop_vertices: tg.stop_vertices,
                actions: tg.actions,
            }
        })
    }

    /// Finds the fastest way between two stops.
    ///
    /// Returns `None` both if any of the stops is unknown and if there is no way
    /// between them; use [TransportRouter::find_way] to tell these cases apart.
    pub fn best_way(&self, from: &str, to: &str) -> Option<Itinerary<'a>> {
        self.find_way(from, to).ok()
    }

    /// Finds the fastest way between two stops.
    ///
    /// A way from a stop to itself takes no time and has no items.
    pub fn find_way(&self, from: &str, to: &str) -> Result<Itinerary<'a>, RouteError> {
        let from_id = self
            .catalogue
            .stop_id(from)
            .ok_or_else(|| RouteError::UnknownStop(from.to_string()))?;
        let to_id = self
            .catalogue
            .stop_id(to)
            .ok_or_else(|| RouteError::UnknownStop(to.to_string()))?;

        let built = self.built();
        let route = built
            .router
            .build_route(
                built.stop_vertices[from_id.index()].outer,
                built.stop_vertices[to_id.index()].outer,
            )?
            .ok_or_else(|| RouteError::NoRoute {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        let items = route
            .edges
            .iter()
            .filter_map(|&edge| self.itinerary_item(built.actions[edge]))
            .collect();

        Ok(Itinerary {
            total_time: route.weight,
            items,
        })
    }

    fn itinerary_item(&self, action: EdgeAction) -> Option<ItineraryItem<'a>> {
        let catalogue = self.catalogue;
        match action {
            EdgeAction::Wait { stop, time } => Some(ItineraryItem::Wait {
                stop_name: &catalogue.stop(stop).name,
                time,
            }),
            EdgeAction::Return { .. } => None,
            EdgeAction::Ride {
                bus,
                span_count,
                time,
            } => Some(ItineraryItem::Bus {
                bus_name: &catalogue.bus(bus).name,
                span_count,
                time,
            }),
        }
    }
}
