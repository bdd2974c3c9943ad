// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading transit networks from text documents, and answering their stat requests.
//!
//! A document consists of a base section and an (optional) stat section, each
//! preceded by the number of lines it spans:
//!
//! ```text
//! 4
//! Stop Tolstopaltsevo: 55.611087, 37.20829, 3900m to Marushkino
//! Stop Marushkino: 55.595884, 37.209755
//! Bus 750: Tolstopaltsevo - Marushkino
//! Routing: 6 min, 40 km/h
//! 3
//! Bus 750
//! Stop Marushkino
//! Route Tolstopaltsevo > Marushkino
//! ```

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::{Catalogue, CatalogueError};

mod loader;
mod model;
mod parser;
mod stat;

pub use model::StatRequest;
pub use stat::write_response;

/// Format of the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed text
    Text,

    /// Force text with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    TextGz,

    /// Force text with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    TextBz2,
}

impl FileFormat {
    /// Guesses the format of a document from its first bytes.
    /// Never returns [FileFormat::Unknown].
    pub fn detect(header: &[u8]) -> Self {
        if header.starts_with(&[0x1F, 0x8B]) {
            Self::TextGz
        } else if header.starts_with(b"BZh") {
            Self::TextBz2
        } else {
            Self::Text
        }
    }
}

/// Error which can occur when loading a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {source}")]
    Catalogue {
        line: usize,
        #[source]
        source: CatalogueError,
    },

    #[error("line {line}: unknown stop {name:?}")]
    UnknownStop { line: usize, name: String },

    #[error("stop {0:?} is referenced, but never declared")]
    UndeclaredStop(String),

    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// Loads a document from a reader into a [Catalogue], returning its stat requests.
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn load_from_io<R: io::Read>(
    catalogue: &mut Catalogue,
    format: FileFormat,
    reader: R,
) -> Result<Vec<StatRequest>, Error> {
    match format {
        FileFormat::Unknown => {
            let mut b = io::BufReader::new(reader);
            let format = FileFormat::detect(b.fill_buf()?);
            log::debug!("detected input format: {:?}", format);
            load_known_format(catalogue, format, b)
        }
        _ => load_known_format(catalogue, format, reader),
    }
}

fn load_known_format<R: io::Read>(
    catalogue: &mut Catalogue,
    format: FileFormat,
    reader: R,
) -> Result<Vec<StatRequest>, Error> {
    match format {
        FileFormat::Unknown | FileFormat::Text => {
            loader::load(catalogue, io::BufReader::new(reader))
        }

        FileFormat::TextGz => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            loader::load(catalogue, io::BufReader::new(d))
        }

        FileFormat::TextBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            loader::load(catalogue, io::BufReader::new(d))
        }
    }
}

/// Loads a document from a file at the provided path into a [Catalogue],
/// returning its stat requests.
pub fn load_from_file<P: AsRef<Path>>(
    catalogue: &mut Catalogue,
    format: FileFormat,
    path: P,
) -> Result<Vec<StatRequest>, Error> {
    let f = File::open(path)?;
    load_from_io(catalogue, format, f)
}

/// Loads a document from a static buffer into a [Catalogue], returning its stat requests.
pub fn load_from_buffer(
    catalogue: &mut Catalogue,
    format: FileFormat,
    data: &[u8],
) -> Result<Vec<StatRequest>, Error> {
    let format = match format {
        FileFormat::Unknown => FileFormat::detect(data),
        _ => format,
    };

    if format == FileFormat::Text {
        // Fast path is available for in-memory text
        loader::load(catalogue, data)
    } else {
        load_known_format(catalogue, format, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransportRouter;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-4),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn check_simple_catalogue(c: &Catalogue, requests: &[StatRequest]) {
        assert_eq!(c.stop_count(), 10);
        assert_eq!(c.bus_count(), 3);
        assert_eq!(requests.len(), 8);

        let s256 = c.get_bus_info("256").unwrap();
        assert_eq!(s256.stop_count, 6);
        assert_eq!(s256.unique_stop_count, 5);
        assert_eq!(s256.route_length, 5950.0);
        assert_almost_eq!(s256.curvature, 1.36124);

        let s750 = c.get_bus_info("750").unwrap();
        assert_eq!(s750.stop_count, 7);
        assert_eq!(s750.unique_stop_count, 3);
        assert_eq!(s750.route_length, 27400.0);
        assert_almost_eq!(s750.curvature, 1.30853);

        assert_eq!(c.route_settings().bus_wait_time, 6.0);
        assert_eq!(c.route_settings().bus_velocity, 40.0);
    }

    #[test]
    fn test_load_text() {
        const DATA: &[u8] = include_bytes!("test_fixtures/simple.txt");

        let mut c = Catalogue::new();
        let requests = load_from_buffer(&mut c, FileFormat::Text, DATA).unwrap();
        check_simple_catalogue(&c, &requests);

        let router = TransportRouter::new(&c);
        let mut out: Vec<u8> = Vec::default();
        for request in &requests {
            let mut line: Vec<u8> = Vec::default();
            write_response(&mut line, &c, &router, request).unwrap();

            // Curvature depends on the exact Earth model - skip it
            let line = String::from_utf8(line).unwrap();
            let line = match line.find(" route length, ") {
                Some(idx) => format!("{} route length\n", &line[..idx]),
                None => line,
            };
            out.extend_from_slice(line.as_bytes());
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Bus 256: 6 stops on route, 5 unique stops, 5950 route length\n\
             Bus 750: 7 stops on route, 3 unique stops, 27400 route length\n\
             Bus 751: not found\n\
             Stop Samara: not found\n\
             Stop Prazhskaya: no buses\n\
             Stop Biryulyovo Zapadnoye: buses 256 828\n\
             Route Biryulyovo Zapadnoye > Universam: 9.6 min: wait at Biryulyovo Zapadnoye 6 min, bus 828 for 3.6 min (1 stop)\n\
             Route Biryulyovo Zapadnoye > Prazhskaya: not found\n"
        );
    }

    #[test]
    fn test_load_text_io() {
        const DATA: &[u8] = include_bytes!("test_fixtures/simple.txt");

        let mut c = Catalogue::new();
        let requests = load_from_io(&mut c, FileFormat::Unknown, DATA).unwrap();
        check_simple_catalogue(&c, &requests);
    }

    #[test]
    fn test_load_gz() {
        const DATA: &[u8] = include_bytes!("test_fixtures/simple.txt.gz");

        let mut c = Catalogue::new();
        let requests = load_from_buffer(&mut c, FileFormat::TextGz, DATA).unwrap();
        check_simple_catalogue(&c, &requests);
    }

    #[test]
    fn test_load_bz2() {
        const DATA: &[u8] = include_bytes!("test_fixtures/simple.txt.bz2");

        let mut c = Catalogue::new();
        let requests = load_from_buffer(&mut c, FileFormat::TextBz2, DATA).unwrap();
        check_simple_catalogue(&c, &requests);
    }

    #[test]
    fn test_detect_compression() {
        const GZ: &[u8] = include_bytes!("test_fixtures/simple.txt.gz");
        const BZ2: &[u8] = include_bytes!("test_fixtures/simple.txt.bz2");

        assert_eq!(FileFormat::detect(GZ), FileFormat::TextGz);
        assert_eq!(FileFormat::detect(BZ2), FileFormat::TextBz2);
        assert_eq!(FileFormat::detect(b"13\n"), FileFormat::Text);

        let mut c = Catalogue::new();
        let requests = load_from_io(&mut c, FileFormat::Unknown, GZ).unwrap();
        check_simple_catalogue(&c, &requests);

        let mut c = Catalogue::new();
        let requests = load_from_buffer(&mut c, FileFormat::Unknown, BZ2).unwrap();
        check_simple_catalogue(&c, &requests);
    }
}
