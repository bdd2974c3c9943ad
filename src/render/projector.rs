// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::svg::Point;
use super::EPSILON;
use crate::Coordinates;

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Maps geographic coordinates onto a `width` × `height` drawing surface,
/// keeping `padding` free on every side.
///
/// Longitude grows to the right and latitude grows upwards. Both axes share
/// a single scale, chosen so that all points fit.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    pub fn new<I>(points: I, width: f64, height: f64, padding: f64) -> Self
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut points = points.into_iter();
        let first = match points.next() {
            Some(p) => p,
            None => {
                return Self {
                    padding,
                    ..Self::default()
                }
            }
        };

        let (mut min_lng, mut max_lng) = (first.lng, first.lng);
        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        for p in points {
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
        }

        let width_zoom = if is_zero(max_lng - min_lng) {
            None
        } else {
            Some((width - 2.0 * padding) / (max_lng - min_lng))
        };
        let height_zoom = if is_zero(max_lat - min_lat) {
            None
        } else {
            Some((height - 2.0 * padding) / (max_lat - min_lat))
        };

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None) => w,
            (None, Some(h)) => h,
            (None, None) => 0.0,
        };

        Self {
            padding,
            min_lng,
            max_lat,
            zoom,
        }
    }

    pub fn project(&self, c: Coordinates) -> Point {
        Point::new(
            (c.lng - self.min_lng) * self.zoom + self.padding,
            (self.max_lat - c.lat) * self.zoom + self.padding,
        )
    }
}
