// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use super::model::{Command, StatRequest};
use super::parser::{parse_command, parse_stat_request};
use super::Error;
use crate::catalogue::expand_route;
use crate::{Catalogue, StopId};

struct PendingDistance {
    line: usize,
    from: StopId,
    to: StopId,
    road: f64,
}

struct PendingBus {
    line: usize,
    name: String,
    stops: Vec<String>,
    is_roundtrip: bool,
}

/// Helper object used for storing state related to loading base commands
/// into a [Catalogue].
///
/// Stops are added as soon as they are read, with placeholders for stops referenced
/// by distances before being declared. Distances and buses are only added by
/// [Loader::finish], once all stops are known.
pub(super) struct Loader<'a> {
    catalogue: &'a mut Catalogue,
    distances: Vec<PendingDistance>,
    buses: Vec<PendingBus>,
}

impl<'a> Loader<'a> {
    pub(super) fn new(catalogue: &'a mut Catalogue) -> Self {
        Self {
            catalogue,
            distances: Vec::default(),
            buses: Vec::default(),
        }
    }

    pub(super) fn add_line(&mut self, line: usize, text: &str) -> Result<(), Error> {
        let command = parse_command(text).map_err(|message| Error::Syntax { line, message })?;

        match command {
            Some(Command::Stop {
                name,
                coordinates,
                distances,
            }) => {
                let from = self.catalogue.add_stop(&name, coordinates);
                for (to, road) in distances {
                    let to = self.catalogue.add_stop_placeholder(&to);
                    self.distances.push(PendingDistance {
                        line,
                        from,
                        to,
                        road,
                    });
                }
            }

            Some(Command::Bus {
                name,
                stops,
                is_roundtrip,
            }) => self.buses.push(PendingBus {
                line,
                name,
                stops,
                is_roundtrip,
            }),

            Some(Command::Routing(settings)) => self
                .catalogue
                .set_route_settings(settings)
                .map_err(|source| Error::Catalogue { line, source })?,

            None => log::warn!("line {}: skipping unsupported command", line),
        }

        Ok(())
    }

    pub(super) fn finish(mut self) -> Result<(), Error> {
        if let Some((_, stop)) = self.catalogue.stops().find(|(_, s)| !s.is_placed()) {
            return Err(Error::UndeclaredStop(stop.name.clone()));
        }

        for d in &self.distances {
            self.catalogue
                .add_distance(d.from, d.to, d.road)
                .map_err(|source| Error::Catalogue {
                    line: d.line,
                    source,
                })?;
        }

        for bus in std::mem::take(&mut self.buses) {
            self.add_bus(&bus)?;
        }

        Ok(())
    }

    fn add_bus(&mut self, bus: &PendingBus) -> Result<(), Error> {
        let stops = bus
            .stops
            .iter()
            .map(|name| {
                self.catalogue.stop_id(name).ok_or_else(|| Error::UnknownStop {
                    line: bus.line,
                    name: name.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Both ends are kept, even if they are the same stop
        let edge_stops = match (stops.first(), stops.last()) {
            (Some(&first), Some(&last)) => vec![first, last],
            _ => vec![],
        };

        self.catalogue
            .add_bus(&bus.name, expand_route(&stops, bus.is_roundtrip), edge_stops)
            .map_err(|source| Error::Catalogue {
                line: bus.line,
                source,
            })?;
        Ok(())
    }
}

type Lines<R> = std::iter::Enumerate<io::Lines<R>>;

fn next_line<R: io::BufRead>(lines: &mut Lines<R>) -> Result<Option<(usize, String)>, Error> {
    match lines.next() {
        Some((i, Ok(text))) => Ok(Some((i + 1, text))),
        Some((_, Err(e))) => Err(Error::Io(e)),
        None => Ok(None),
    }
}

/// Reads a request count, skipping blank lines. Returns `None` at the end of input.
fn read_count<R: io::BufRead>(lines: &mut Lines<R>) -> Result<Option<usize>, Error> {
    while let Some((line, text)) = next_line(lines)? {
        if text.trim().is_empty() {
            continue;
        }
        return text
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| Error::Syntax {
                line,
                message: format!("invalid request count: {:?}", text.trim()),
            });
    }
    Ok(None)
}

/// Loads a whole document - base commands into the catalogue, and returns the stat requests.
pub(super) fn load<R: io::BufRead>(
    catalogue: &mut Catalogue,
    reader: R,
) -> Result<Vec<StatRequest>, Error> {
    let mut lines = reader.lines().enumerate();

    let base_count = read_count(&mut lines)?.ok_or(Error::UnexpectedEof)?;
    let mut loader = Loader::new(catalogue);
    for _ in 0..base_count {
        let (line, text) = next_line(&mut lines)?.ok_or(Error::UnexpectedEof)?;
        loader.add_line(line, &text)?;
    }
    loader.finish()?;

    let stat_count = match read_count(&mut lines)? {
        Some(count) => count,
        None => return Ok(vec![]),
    };

    let mut requests = Vec::with_capacity(stat_count);
    for _ in 0..stat_count {
        let (line, text) = next_line(&mut lines)?.ok_or(Error::UnexpectedEof)?;
        let request =
            parse_stat_request(&text).map_err(|message| Error::Syntax { line, message })?;
        requests.push(request);
    }
    Ok(requests)
}
