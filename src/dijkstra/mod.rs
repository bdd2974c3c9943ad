// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod router;
mod tree;

pub use error::{SearchError, WEIGHT_EPSILON};
pub use router::{RouteInfo, Router};
