// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Coordinates, RouteSettings};

/// A single line of the base section of a document.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Command {
    /// `Stop NAME: LAT, LNG, 3900m to OTHER, ...`
    Stop {
        name: String,
        coordinates: Coordinates,
        distances: Vec<(String, f64)>,
    },

    /// `Bus NAME: A > B > A` or `Bus NAME: A - B`
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },

    /// `Routing: 6 min, 40 km/h`
    Routing(RouteSettings),
}

/// A query from the stat section of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatRequest {
    /// `Bus NAME` - statistics of a bus.
    Bus(String),

    /// `Stop NAME` - buses passing through a stop.
    Stop(String),

    /// `Route FROM > TO` - the fastest way between two stops.
    Route { from: String, to: String },
}
