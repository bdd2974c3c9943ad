// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use super::model::StatRequest;
use crate::{
    format_number, BusStats, Catalogue, Itinerary, ItineraryItem, StopStats, TransportRouter,
};

/// Writes a single-line response to a [StatRequest].
pub fn write_response<W: io::Write>(
    out: &mut W,
    catalogue: &Catalogue,
    router: &TransportRouter<'_>,
    request: &StatRequest,
) -> io::Result<()> {
    match request {
        StatRequest::Bus(name) => {
            write!(out, "Bus {}: ", name)?;
            write_bus_stats(out, catalogue.get_bus_info(name))?;
        }
        StatRequest::Stop(name) => {
            write!(out, "Stop {}: ", name)?;
            write_stop_stats(out, catalogue.get_stop_info(name))?;
        }
        StatRequest::Route { from, to } => {
            write!(out, "Route {} > {}: ", from, to)?;
            write_itinerary(out, router.best_way(from, to).as_ref())?;
        }
    }
    writeln!(out)
}

fn write_bus_stats<W: io::Write>(out: &mut W, stats: Option<&BusStats>) -> io::Result<()> {
    match stats {
        None => write!(out, "not found"),
        Some(stats) => write!(
            out,
            "{} stops on route, {} unique stops, {} route length, {} curvature",
            stats.stop_count,
            stats.unique_stop_count,
            format_number(stats.route_length),
            format_number(stats.curvature),
        ),
    }
}

fn write_stop_stats<W: io::Write>(out: &mut W, stats: Option<&StopStats>) -> io::Result<()> {
    match stats {
        None => write!(out, "not found"),
        Some(stats) if stats.buses.is_empty() => write!(out, "no buses"),
        Some(stats) => {
            write!(out, "buses")?;
            for bus in &stats.buses {
                write!(out, " {}", bus)?;
            }
            Ok(())
        }
    }
}

fn write_itinerary<W: io::Write>(out: &mut W, way: Option<&Itinerary<'_>>) -> io::Result<()> {
    let way = match way {
        Some(way) => way,
        None => return write!(out, "not found"),
    };

    write!(out, "{} min", format_number(way.total_time))?;
    for (i, item) in way.items.iter().enumerate() {
        write!(out, "{}", if i == 0 { ": " } else { ", " })?;
        match *item {
            ItineraryItem::Wait { stop_name, time } => {
                write!(out, "wait at {} {} min", stop_name, format_number(time))?
            }
            ItineraryItem::Bus {
                bus_name,
                span_count,
                time,
            } => write!(
                out,
                "bus {} for {} min ({} {})",
                bus_name,
                format_number(time),
                span_count,
                if span_count == 1 { "stop" } else { "stops" },
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinates;

    fn respond(catalogue: &Catalogue, request: StatRequest) -> String {
        let router = TransportRouter::new(catalogue);
        let mut out: Vec<u8> = Vec::default();
        write_response(&mut out, catalogue, &router, &request).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn catalogue() -> Catalogue {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", Coordinates::new(55.611087, 37.20829));
        let b = c.add_stop("B", Coordinates::new(55.595884, 37.209755));
        let d = c.add_stop("C", Coordinates::new(55.632761, 37.333324));
        c.add_stop("Lonely", Coordinates::new(55.0, 37.0));
        c.add_distance(a, b, 1000.0).unwrap();
        c.add_distance(b, d, 2000.0).unwrap();
        c.add_bus("1", vec![a, b, d], vec![a, d]).unwrap();
        c.add_bus("0", vec![a, b], vec![a, b]).unwrap();
        c
    }

    #[test]
    fn bus_response() {
        let c = catalogue();
        let response = respond(&c, StatRequest::Bus("1".to_string()));
        assert!(
            response.starts_with("Bus 1: 3 stops on route, 3 unique stops, 3000 route length, "),
            "got {:?}",
            response
        );
        assert!(response.ends_with(" curvature\n"));
        assert_eq!(
            respond(&c, StatRequest::Bus("2".to_string())),
            "Bus 2: not found\n"
        );
    }

    #[test]
    fn stop_response() {
        let c = catalogue();
        assert_eq!(
            respond(&c, StatRequest::Stop("B".to_string())),
            "Stop B: buses 0 1\n"
        );
        assert_eq!(
            respond(&c, StatRequest::Stop("Lonely".to_string())),
            "Stop Lonely: no buses\n"
        );
        assert_eq!(
            respond(&c, StatRequest::Stop("X".to_string())),
            "Stop X: not found\n"
        );
    }

    #[test]
    fn route_response() {
        let c = catalogue();
        let route = |from: &str, to: &str| {
            respond(
                &c,
                StatRequest::Route {
                    from: from.to_string(),
                    to: to.to_string(),
                },
            )
        };

        assert_eq!(
            route("A", "C"),
            "Route A > C: 10.5 min: wait at A 6 min, bus 1 for 4.5 min (2 stops)\n"
        );
        // Both buses ride A-B equally fast, bus 1 was added first
        assert_eq!(
            route("A", "B"),
            "Route A > B: 7.5 min: wait at A 6 min, bus 1 for 1.5 min (1 stop)\n"
        );
        assert_eq!(route("B", "B"), "Route B > B: 0 min\n");
        assert_eq!(route("C", "A"), "Route C > A: not found\n");
        assert_eq!(route("A", "X"), "Route A > X: not found\n");
    }
}
