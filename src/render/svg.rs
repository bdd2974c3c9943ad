// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;

use serde::Deserialize;

use crate::format_number;

/// A position on the drawing surface.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A color, either named or given by its components.
///
/// Deserializes from a string (`"green"`), a 3-element array (`[255, 160, 0]`)
/// or a 4-element array with opacity (`[255, 160, 0, 0.85]`).
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Color {
    #[default]
    #[serde(skip)]
    None,
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Named(name) => write!(f, "{}", name),
            Self::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
            Self::Rgba(r, g, b, a) => write!(f, "rgba({},{},{},{})", r, g, b, format_number(*a)),
        }
    }
}

/// Presentation attributes shared by all shapes.
/// Attributes set to `None` are not written at all.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,

    /// Sets both stroke-linecap and stroke-linejoin to "round".
    pub round_stroke: bool,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(f, " fill=\"{}\"", fill)?;
        }
        if let Some(stroke) = &self.stroke {
            write!(f, " stroke=\"{}\"", stroke)?;
        }
        if let Some(width) = self.stroke_width {
            write!(f, " stroke-width=\"{}\"", format_number(width))?;
        }
        if self.round_stroke {
            write!(f, " stroke-linecap=\"round\" stroke-linejoin=\"round\"")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Circle {
        center: Point,
        radius: f64,
        style: Style,
    },

    Polyline {
        points: Vec<Point>,
        style: Style,
    },

    Text {
        position: Point,
        offset: Point,
        font_size: u32,
        font_family: Option<&'static str>,
        font_weight: Option<&'static str>,
        data: String,
        style: Style,
    },
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle {
                center,
                radius,
                style,
            } => write!(
                f,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
                format_number(center.x),
                format_number(center.y),
                format_number(*radius),
                style,
            ),

            Self::Polyline { points, style } => {
                write!(f, "<polyline points=\"")?;
                for (i, p) in points.iter().enumerate() {
                    let separator = if i == 0 { "" } else { " " };
                    write!(
                        f,
                        "{}{},{}",
                        separator,
                        format_number(p.x),
                        format_number(p.y)
                    )?;
                }
                write!(f, "\"{}/>", style)
            }

            Self::Text {
                position,
                offset,
                font_size,
                font_family,
                font_weight,
                data,
                style,
            } => {
                write!(
                    f,
                    "<text{} x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
                    style,
                    format_number(position.x),
                    format_number(position.y),
                    format_number(offset.x),
                    format_number(offset.y),
                    font_size,
                )?;
                if let Some(family) = font_family {
                    write!(f, " font-family=\"{}\"", family)?;
                }
                if let Some(weight) = font_weight {
                    write!(f, " font-weight=\"{}\"", weight)?;
                }
                write!(f, ">{}</text>", Escaped(data))
            }
        }
    }
}

/// Escapes XML special characters on display.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '&' => f.write_str("&amp;")?,
                _ => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// An SVG image, drawn in the order elements were added.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>")?;
        writeln!(f, "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">")?;
        for element in &self.elements {
            writeln!(f, "  {}", element)?;
        }
        write!(f, "</svg>")
    }
}
