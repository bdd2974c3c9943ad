// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Drawing a [Catalogue] as an SVG map.
//!
//! The map consists of four layers, drawn in order: bus routes as polylines,
//! bus names at the ends of their routes, stops as circles, and stop names.
//! Buses are drawn in order of their names, taking consecutive colors from
//! [RenderSettings::color_palette]. Only stops served by at least one bus are drawn.

use serde::Deserialize;

use crate::{Bus, Catalogue, Coordinates, StopId};

mod projector;
mod svg;

pub use projector::SphereProjector;
pub use svg::{Color, Document, Element, Point, Style};

/// Coordinate differences smaller than this are treated as zero when projecting.
pub const EPSILON: f64 = 1e-6;

/// Appearance of a rendered map.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,

    pub stop_radius: f64,
    pub line_width: f64,

    pub bus_label_font_size: f64,
    pub bus_label_offset: [f64; 2],

    pub stop_label_font_size: f64,
    pub stop_label_offset: [f64; 2],

    pub underlayer_color: Color,
    pub underlayer_width: f64,

    /// Colors of consecutive buses, reused cyclically.
    /// With an empty palette, routes and bus names have no color.
    pub color_palette: Vec<Color>,
}

impl RenderSettings {
    fn bus_color(&self, index: usize) -> Color {
        if self.color_palette.is_empty() {
            Color::None
        } else {
            self.color_palette[index % self.color_palette.len()].clone()
        }
    }
}

/// Draws all buses and served stops of a [Catalogue].
pub fn render_map(catalogue: &Catalogue, settings: &RenderSettings) -> Document {
    let mut buses: Vec<&Bus> = catalogue
        .buses()
        .map(|(_, bus)| bus)
        .filter(|bus| !bus.stops.is_empty())
        .collect();
    buses.sort_by(|a, b| a.name.cmp(&b.name));

    let stops: Vec<(&str, Coordinates)> = catalogue
        .served_stops()
        .into_iter()
        .filter_map(|stop| stop.coordinates.map(|c| (stop.name.as_str(), c)))
        .collect();

    let projector = SphereProjector::new(
        stops.iter().map(|&(_, c)| c),
        settings.width,
        settings.height,
        settings.padding,
    );

    let r = MapRenderer {
        catalogue,
        settings,
        projector,
    };
    let mut doc = Document::new();
    r.add_routes(&mut doc, &buses);
    r.add_bus_names(&mut doc, &buses);
    r.add_stop_circles(&mut doc, &stops);
    r.add_stop_names(&mut doc, &stops);
    doc
}

struct MapRenderer<'a> {
    catalogue: &'a Catalogue,
    settings: &'a RenderSettings,
    projector: SphereProjector,
}

impl MapRenderer<'_> {
    fn project_stops<'b>(&'b self, stops: &'b [StopId]) -> impl Iterator<Item = Point> + 'b {
        stops
            .iter()
            .filter_map(|&id| self.catalogue.stop(id).coordinates)
            .map(|c| self.projector.project(c))
    }

    fn add_routes(&self, doc: &mut Document, buses: &[&Bus]) {
        for (i, bus) in buses.iter().enumerate() {
            doc.add(Element::Polyline {
                points: self.project_stops(&bus.stops).collect(),
                style: Style {
                    fill: Some(Color::None),
                    stroke: Some(self.settings.bus_color(i)),
                    stroke_width: Some(self.settings.line_width),
                    round_stroke: true,
                },
            });
        }
    }

    fn add_bus_names(&self, doc: &mut Document, buses: &[&Bus]) {
        for (i, bus) in buses.iter().enumerate() {
            let ends = match (bus.edge_stops.first(), bus.edge_stops.last()) {
                (Some(&first), Some(&last)) if first != last => vec![first, last],
                (Some(&first), _) => vec![first],
                _ => continue,
            };

            for position in self.project_stops(&ends) {
                doc.add(self.bus_label(&bus.name, position, self.underlayer_style()));
                doc.add(self.bus_label(
                    &bus.name,
                    position,
                    Style {
                        fill: Some(self.settings.bus_color(i)),
                        ..Style::default()
                    },
                ));
            }
        }
    }

    fn add_stop_circles(&self, doc: &mut Document, stops: &[(&str, Coordinates)]) {
        for &(_, c) in stops {
            doc.add(Element::Circle {
                center: self.projector.project(c),
                radius: self.settings.stop_radius,
                style: Style {
                    fill: Some(Color::Named("white".to_string())),
                    ..Style::default()
                },
            });
        }
    }

    fn add_stop_names(&self, doc: &mut Document, stops: &[(&str, Coordinates)]) {
        for &(name, c) in stops {
            let position = self.projector.project(c);
            doc.add(self.stop_label(name, position, self.underlayer_style()));
            doc.add(self.stop_label(
                name,
                position,
                Style {
                    fill: Some(Color::Named("black".to_string())),
                    ..Style::default()
                },
            ));
        }
    }

    fn underlayer_style(&self) -> Style {
        Style {
            fill: Some(self.settings.underlayer_color.clone()),
            stroke: Some(self.settings.underlayer_color.clone()),
            stroke_width: Some(self.settings.underlayer_width),
            round_stroke: true,
        }
    }

    fn bus_label(&self, name: &str, position: Point, style: Style) -> Element {
        let [dx, dy] = self.settings.bus_label_offset;
        Element::Text {
            position,
            offset: Point::new(dx, dy),
            font_size: self.settings.bus_label_font_size as u32,
            font_family: Some("Verdana"),
            font_weight: Some("bold"),
            data: name.to_string(),
            style,
        }
    }

    fn stop_label(&self, name: &str, position: Point, style: Style) -> Element {
        let [dx, dy] = self.settings.stop_label_offset;
        Element::Text {
            position,
            offset: Point::new(dx, dy),
            font_size: self.settings.stop_label_font_size as u32,
            font_family: Some("Verdana"),
            font_weight: None,
            data: name.to_string(),
            style,
        }
    }
}
