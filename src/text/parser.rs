// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::model::{Command, StatRequest};
use crate::{Coordinates, RouteSettings};

/// Parses a line from the base section of a document.
///
/// Returns `Ok(None)` for blank lines and commands of unknown kinds.
pub(super) fn parse_command(line: &str) -> Result<Option<Command>, String> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (head, body) = line
        .split_once(':')
        .ok_or_else(|| "missing ':'".to_string())?;
    let head = head.trim();
    let (kind, name) = head.split_once(' ').unwrap_or((head, ""));
    let name = name.trim();

    match kind {
        "Stop" => parse_stop(non_empty_name(name)?, body).map(Some),
        "Bus" => parse_bus(non_empty_name(name)?, body).map(Some),
        "Routing" => parse_routing(body).map(Some),
        _ => Ok(None),
    }
}

fn non_empty_name(name: &str) -> Result<&str, String> {
    if name.is_empty() {
        Err("missing name".to_string())
    } else {
        Ok(name)
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number: {:?}", s.trim()))
}

fn parse_stop(name: &str, body: &str) -> Result<Command, String> {
    let mut parts = body.split(',');
    let lat = parse_number(parts.next().unwrap_or_default())?;
    let lng = parse_number(parts.next().ok_or_else(|| "missing longitude".to_string())?)?;

    let distances = parts
        .map(parse_distance)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Command::Stop {
        name: name.to_string(),
        coordinates: Coordinates::new(lat, lng),
        distances,
    })
}

/// Parses `3900m to Other Stop`.
fn parse_distance(s: &str) -> Result<(String, f64), String> {
    let (distance, to) = s
        .split_once(" to ")
        .ok_or_else(|| format!("invalid distance: {:?}", s.trim()))?;
    let distance = distance
        .trim()
        .strip_suffix('m')
        .ok_or_else(|| format!("distance without unit: {:?}", distance.trim()))?;
    let to = non_empty_name(to.trim())?;
    Ok((to.to_string(), parse_number(distance)?))
}

fn parse_bus(name: &str, body: &str) -> Result<Command, String> {
    let is_roundtrip = body.contains('>');
    let separator = if is_roundtrip { '>' } else { '-' };

    let stops = body
        .split(separator)
        .map(|stop| non_empty_name(stop.trim()).map(|s| s.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Command::Bus {
        name: name.to_string(),
        stops,
        is_roundtrip,
    })
}

/// Parses `6 min, 40 km/h`.
fn parse_routing(body: &str) -> Result<Command, String> {
    let (wait, velocity) = body
        .split_once(',')
        .ok_or_else(|| "expected wait time and velocity".to_string())?;
    let wait = wait
        .trim()
        .strip_suffix("min")
        .ok_or_else(|| format!("wait time without unit: {:?}", wait.trim()))?;
    let velocity = velocity
        .trim()
        .strip_suffix("km/h")
        .ok_or_else(|| format!("velocity without unit: {:?}", velocity.trim()))?;

    Ok(Command::Routing(RouteSettings {
        bus_wait_time: parse_number(wait)?,
        bus_velocity: parse_number(velocity)?,
    }))
}

/// Parses a line from the stat section of a document.
pub(super) fn parse_stat_request(line: &str) -> Result<StatRequest, String> {
    let line = line.trim();
    let (kind, rest) = line
        .split_once(' ')
        .ok_or_else(|| format!("invalid request: {:?}", line))?;
    let rest = non_empty_name(rest.trim())?;

    match kind {
        "Bus" => Ok(StatRequest::Bus(rest.to_string())),
        "Stop" => Ok(StatRequest::Stop(rest.to_string())),
        "Route" => {
            let (from, to) = rest
                .split_once('>')
                .ok_or_else(|| "expected 'FROM > TO'".to_string())?;
            Ok(StatRequest::Route {
                from: non_empty_name(from.trim())?.to_string(),
                to: non_empty_name(to.trim())?.to_string(),
            })
        }
        _ => Err(format!("unknown request: {:?}", kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop() {
        assert_eq!(
            parse_command("Stop Marushkino: 55.595884, 37.209755, 9900m to Rasskazovka, 100m to Marushkino"),
            Ok(Some(Command::Stop {
                name: "Marushkino".to_string(),
                coordinates: Coordinates::new(55.595884, 37.209755),
                distances: vec![
                    ("Rasskazovka".to_string(), 9900.0),
                    ("Marushkino".to_string(), 100.0),
                ],
            }))
        );
    }

    #[test]
    fn stop_with_spaces_in_name() {
        assert_eq!(
            parse_command("  Stop   Rossoshanskaya ulitsa :55.595579,37.605757"),
            Ok(Some(Command::Stop {
                name: "Rossoshanskaya ulitsa".to_string(),
                coordinates: Coordinates::new(55.595579, 37.605757),
                distances: vec![],
            }))
        );
    }

    #[test]
    fn invalid_stops() {
        assert!(parse_command("Stop A: 55.5").is_err());
        assert!(parse_command("Stop A: north, 37.2").is_err());
        assert!(parse_command("Stop A: 55.5, 37.2, 100 to B").is_err());
        assert!(parse_command("Stop A: 55.5, 37.2, 100m from B").is_err());
        assert!(parse_command("Stop: 55.5, 37.2").is_err());
        assert!(parse_command("Stop A 55.5 37.2").is_err());
    }

    #[test]
    fn roundtrip_bus() {
        assert_eq!(
            parse_command("Bus 256: Biryulyovo Zapadnoye > Biryusinka > Biryulyovo Zapadnoye"),
            Ok(Some(Command::Bus {
                name: "256".to_string(),
                stops: vec![
                    "Biryulyovo Zapadnoye".to_string(),
                    "Biryusinka".to_string(),
                    "Biryulyovo Zapadnoye".to_string(),
                ],
                is_roundtrip: true,
            }))
        );
    }

    #[test]
    fn linear_bus() {
        assert_eq!(
            parse_command("Bus 750 express: Tolstopaltsevo - Marushkino - Rasskazovka"),
            Ok(Some(Command::Bus {
                name: "750 express".to_string(),
                stops: vec![
                    "Tolstopaltsevo".to_string(),
                    "Marushkino".to_string(),
                    "Rasskazovka".to_string(),
                ],
                is_roundtrip: false,
            }))
        );
        assert!(parse_command("Bus 1: A - - B").is_err());
    }

    #[test]
    fn routing() {
        assert_eq!(
            parse_command("Routing: 6 min, 40 km/h"),
            Ok(Some(Command::Routing(RouteSettings {
                bus_wait_time: 6.0,
                bus_velocity: 40.0,
            })))
        );
        assert!(parse_command("Routing: 6, 40").is_err());
        assert!(parse_command("Routing: 6 min").is_err());
    }

    #[test]
    fn skipped_lines() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("Tram 1: A > B > A"), Ok(None));
    }

    #[test]
    fn stat_requests() {
        assert_eq!(
            parse_stat_request("Bus 256"),
            Ok(StatRequest::Bus("256".to_string()))
        );
        assert_eq!(
            parse_stat_request("Stop Biryulyovo Zapadnoye "),
            Ok(StatRequest::Stop("Biryulyovo Zapadnoye".to_string()))
        );
        assert_eq!(
            parse_stat_request("Route Universam > Biryusinka"),
            Ok(StatRequest::Route {
                from: "Universam".to_string(),
                to: "Biryusinka".to_string(),
            })
        );
        assert!(parse_stat_request("Bus").is_err());
        assert!(parse_stat_request("Route A").is_err());
        assert!(parse_stat_request("Tram 1").is_err());
    }
}
