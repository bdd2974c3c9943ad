// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::render::RenderSettings;
use crate::RouteSettings;

#[derive(Debug, Deserialize)]
pub(super) struct InputDocument {
    #[serde(default)]
    pub(super) base_requests: Vec<BaseRequest>,

    #[serde(default)]
    pub(super) stat_requests: Vec<StatRequest>,

    #[serde(default)]
    pub(super) render_settings: RenderSettings,

    pub(super) routing_settings: Option<RoutingSettings>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub(super) enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, f64>,
    },

    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub(super) struct RoutingSettings {
    bus_wait_time: f64,
    bus_velocity: f64,
}

impl From<RoutingSettings> for RouteSettings {
    fn from(s: RoutingSettings) -> Self {
        Self {
            bus_wait_time: s.bus_wait_time,
            bus_velocity: s.bus_velocity,
        }
    }
}

/// A query from the `stat_requests` array of a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
    Map { id: i64 },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match *self {
            Self::Bus { id, .. } => id,
            Self::Stop { id, .. } => id,
            Self::Route { id, .. } => id,
            Self::Map { id } => id,
        }
    }
}

/// An answer to a [StatRequest], serialized as a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse<'a> {
    Bus {
        request_id: i64,
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },

    Stop {
        request_id: i64,
        buses: Vec<&'a str>,
    },

    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<RouteItem<'a>>,
    },

    Map {
        request_id: i64,
        map: String,
    },

    NotFound {
        request_id: i64,
        error_message: &'static str,
    },
}

/// A single step of a [StatResponse::Route].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem<'a> {
    Wait {
        stop_name: &'a str,
        time: f64,
    },

    Bus {
        bus: &'a str,
        span_count: usize,
        time: f64,
    },
}
