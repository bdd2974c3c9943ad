// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading transit networks from JSON documents, and answering their stat requests.
//!
//! A document is a single object with the following keys:
//! - `base_requests`: stops (`{"type": "Stop", "name", "latitude", "longitude", "road_distances"}`)
//!   and buses (`{"type": "Bus", "name", "stops", "is_roundtrip"}`), in any order,
//! - `stat_requests`: `Bus`, `Stop`, `Route` and `Map` queries, each with an `id`,
//! - `render_settings`: appearance of the map, see [RenderSettings],
//! - `routing_settings`: `{"bus_wait_time", "bus_velocity"}`.
//!
//! Responses are written as a single JSON array, with one object per stat request
//! carrying its `request_id`.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::catalogue::expand_route;
use crate::render::{render_map, RenderSettings};
use crate::{Catalogue, CatalogueError, Coordinates, ItineraryItem, StopId, TransportRouter};

mod model;

pub use model::{RouteItem, StatRequest, StatResponse};

use model::{BaseRequest, InputDocument};

/// Error which can occur when loading a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error("unknown stop {0:?}")]
    UnknownStop(String),
}

/// Stat requests and render settings of a loaded document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Requests {
    pub stat_requests: Vec<StatRequest>,
    pub render_settings: RenderSettings,
}

/// Loads a document from a reader into a [Catalogue].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn load_from_io<R: io::Read>(
    catalogue: &mut Catalogue,
    reader: R,
) -> Result<Requests, Error> {
    let doc: InputDocument = serde_json::from_reader(io::BufReader::new(reader))?;
    load(catalogue, doc)
}

/// Loads a document from a file at the provided path into a [Catalogue].
pub fn load_from_file<P: AsRef<Path>>(
    catalogue: &mut Catalogue,
    path: P,
) -> Result<Requests, Error> {
    let f = File::open(path)?;
    load_from_io(catalogue, f)
}

/// Loads a document from a static buffer into a [Catalogue].
pub fn load_from_buffer(catalogue: &mut Catalogue, data: &[u8]) -> Result<Requests, Error> {
    let doc: InputDocument = serde_json::from_slice(data)?;
    load(catalogue, doc)
}

/// Adds stops first, then road distances, then buses, so base requests may be in any order.
fn load(catalogue: &mut Catalogue, doc: InputDocument) -> Result<Requests, Error> {
    for request in &doc.base_requests {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = request
        {
            catalogue.add_stop(name, Coordinates::new(*latitude, *longitude));
        }
    }

    for request in &doc.base_requests {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = request
        {
            let from = stop_id(catalogue, name)?;
            for (to, &road) in road_distances {
                let to = stop_id(catalogue, to)?;
                catalogue.add_distance(from, to, road)?;
            }
        }
    }

    for request in &doc.base_requests {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = request
        {
            let stops = stops
                .iter()
                .map(|s| stop_id(catalogue, s))
                .collect::<Result<Vec<_>, _>>()?;
            let edge_stops = match (stops.first(), stops.last()) {
                (Some(&first), Some(&last)) => vec![first, last],
                _ => vec![],
            };
            catalogue.add_bus(name, expand_route(&stops, *is_roundtrip), edge_stops)?;
        }
    }

    if let Some(settings) = doc.routing_settings {
        catalogue.set_route_settings(settings.into())?;
    }

    log::debug!(
        "loaded {} base requests and {} stat requests",
        doc.base_requests.len(),
        doc.stat_requests.len(),
    );

    Ok(Requests {
        stat_requests: doc.stat_requests,
        render_settings: doc.render_settings,
    })
}

fn stop_id(catalogue: &Catalogue, name: &str) -> Result<StopId, Error> {
    catalogue
        .stop_id(name)
        .ok_or_else(|| Error::UnknownStop(name.to_string()))
}

/// Answers a single [StatRequest].
pub fn respond<'a>(
    catalogue: &'a Catalogue,
    router: &TransportRouter<'a>,
    render_settings: &RenderSettings,
    request: &StatRequest,
) -> StatResponse<'a> {
    let request_id = request.id();
    let not_found = StatResponse::NotFound {
        request_id,
        error_message: "not found",
    };

    match request {
        StatRequest::Bus { name, .. } => match catalogue.get_bus_info(name) {
            Some(stats) => StatResponse::Bus {
                request_id,
                curvature: stats.curvature,
                route_length: stats.route_length as u64,
                stop_count: stats.stop_count,
                unique_stop_count: stats.unique_stop_count,
            },
            None => not_found,
        },

        StatRequest::Stop { name, .. } => match catalogue.get_stop_info(name) {
            Some(stats) => StatResponse::Stop {
                request_id,
                buses: stats.buses.iter().map(|s| s.as_str()).collect(),
            },
            None => not_found,
        },

        StatRequest::Route { from, to, .. } => match router.best_way(from, to) {
            Some(way) => StatResponse::Route {
                request_id,
                total_time: way.total_time,
                items: way.items.iter().map(route_item).collect(),
            },
            None => not_found,
        },

        StatRequest::Map { .. } => StatResponse::Map {
            request_id,
            map: render_map(catalogue, render_settings).to_string(),
        },
    }
}

fn route_item<'a>(item: &ItineraryItem<'a>) -> RouteItem<'a> {
    match *item {
        ItineraryItem::Wait { stop_name, time } => RouteItem::Wait { stop_name, time },
        ItineraryItem::Bus {
            bus_name,
            span_count,
            time,
        } => RouteItem::Bus {
            bus: bus_name,
            span_count,
            time,
        },
    }
}

/// Writes the responses to all stat requests as a pretty-printed JSON array.
pub fn write_responses<W: io::Write>(
    out: &mut W,
    catalogue: &Catalogue,
    router: &TransportRouter<'_>,
    requests: &Requests,
) -> io::Result<()> {
    let responses: Vec<StatResponse<'_>> = requests
        .stat_requests
        .iter()
        .map(|r| respond(catalogue, router, &requests.render_settings, r))
        .collect();
    serde_json::to_writer_pretty(&mut *out, &responses)?;
    writeln!(out)
}
