// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_set::BTreeSet;
use std::collections::hash_map::{Entry, HashMap};
use std::collections::HashSet;

use crate::{earth_distance, Coordinates};

/// Opaque handle to a [Stop] owned by a [Catalogue].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(usize);

impl StopId {
    /// Position of the stop in [Catalogue::stops].
    pub fn index(self) -> usize {
        self.0
    }
}

/// Opaque handle to a [Bus] owned by a [Catalogue].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusId(usize);

impl BusId {
    /// Position of the bus in [Catalogue::buses].
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named point served by buses.
///
/// A stop may be created as a placeholder, without coordinates, when it is
/// referenced before being declared. Its coordinates are assigned exactly once,
/// by the first [Catalogue::add_stop] call with its name.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coordinates: Option<Coordinates>,
}

impl Stop {
    /// Checks if the stop's coordinates are known.
    pub fn is_placed(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// A named bus route.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub name: String,

    /// Full traversal of the route. Round trips end at their first stop,
    /// other routes are expanded to an out-and-back sequence (see [expand_route]).
    pub stops: Vec<StopId>,

    /// Endpoints of the route, only used for display purposes.
    pub edge_stops: Vec<StopId>,
}

/// Distances between an ordered pair of stops, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    /// Great-circle distance, computed from coordinates.
    pub geo: f64,

    /// Road distance, as provided by [Catalogue::add_distance].
    pub road: f64,
}

/// Statistics of a [Bus], computed when it is added to a [Catalogue].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusStats {
    /// Number of stops on the route, including repeats.
    pub stop_count: usize,

    /// Number of distinct stops on the route.
    pub unique_stop_count: usize,

    /// Sum of road distances between consecutive stops, in meters.
    pub route_length: f64,

    /// Sum of great-circle distances between consecutive stops, in meters.
    pub geo_length: f64,

    /// Ratio of `route_length` to `geo_length`.
    ///
    /// [f64::INFINITY] if `geo_length` is zero, but `route_length` is not;
    /// 1.0 if both are zero.
    pub curvature: f64,
}

/// Names of buses passing through a [Stop], sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StopStats {
    pub buses: BTreeSet<String>,
}

/// Parameters of the travel time model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSettings {
    /// Time spent waiting for a bus at every boarding, in minutes.
    pub bus_wait_time: f64,

    /// Speed of all buses, in kilometers per hour.
    pub bus_velocity: f64,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}

/// Errors returned when data added to a [Catalogue] is inconsistent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogueError {
    #[error("bus {0:?} already exists")]
    DuplicateBus(String),

    #[error("bus {0:?} has no stops")]
    EmptyRoute(String),

    #[error("no distance from {from:?} to {to:?}")]
    MissingDistance { from: String, to: String },

    #[error("stop {0:?} has no coordinates")]
    UnplacedStop(String),

    #[error("invalid road distance from {from:?} to {to:?}: {distance}")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    #[error("invalid route settings: wait time {bus_wait_time} min, velocity {bus_velocity} km/h")]
    InvalidRouteSettings {
        bus_wait_time: f64,
        bus_velocity: f64,
    },
}

/// Expands a list of stops, as given for a bus, into its full traversal.
///
/// Round trips are returned unchanged (they are expected to end at their first stop),
/// while other routes are traversed there and back again: `A B C` becomes `A B C B A`.
pub fn expand_route<T: Clone>(stops: &[T], is_roundtrip: bool) -> Vec<T> {
    let mut route = stops.to_vec();
    if !is_roundtrip {
        route.extend(stops.iter().rev().skip(1).cloned());
    }
    route
}

/// Owns all [Stops](Stop) and [Buses](Bus) of a transit network,
/// together with road distances and derived statistics.
///
/// Records are only ever appended, so [StopId] and [BusId] handles stay valid
/// for the catalogue's lifetime.
#[derive(Debug, Default, Clone)]
pub struct Catalogue {
    stops: Vec<Stop>,
    stop_ids: HashMap<String, StopId>,
    stop_stats: Vec<StopStats>,

    buses: Vec<Bus>,
    bus_ids: HashMap<String, BusId>,
    bus_stats: Vec<BusStats>,

    distances: HashMap<(StopId, StopId), Distance>,
    route_settings: RouteSettings,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [Stop] with the provided coordinates, returning its handle.
    ///
    /// If a stop with that name already exists, its handle is returned instead.
    /// A placeholder (see [Catalogue::add_stop_placeholder]) gets its coordinates assigned,
    /// while coordinates of an already placed stop are never changed (first write wins).
    pub fn add_stop(&mut self, name: &str, coordinates: Coordinates) -> StopId {
        match self.stop_ids.get(name) {
            Some(&id) => {
                let stop = &mut self.stops[id.0];
                match stop.coordinates {
                    None => stop.coordinates = Some(coordinates),
                    Some(existing) if existing != coordinates => log::warn!(
                        "stop {:?} is already at {:?}, ignoring {:?}",
                        name,
                        existing,
                        coordinates
                    ),
                    Some(_) => {}
                }
                id
            }
            None => self.insert_stop(name, Some(coordinates)),
        }
    }

    /// Creates a [Stop] without coordinates, for stops referenced before being declared.
    /// Returns the handle of an existing stop, if there is one with that name.
    pub fn add_stop_placeholder(&mut self, name: &str) -> StopId {
        match self.stop_ids.get(name) {
            Some(&id) => id,
            None => self.insert_stop(name, None),
        }
    }

    fn insert_stop(&mut self, name: &str, coordinates: Option<Coordinates>) -> StopId {
        let id = StopId(self.stops.len());
        self.stops.push(Stop {
            name: name.to_string(),
            coordinates,
        });
        self.stop_stats.push(StopStats::default());
        self.stop_ids.insert(name.to_string(), id);
        id
    }

    /// Returns the number of stops in the catalogue.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns an iterator over all stops, in insertion order.
    pub fn stops(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops.iter().enumerate().map(|(i, s)| (StopId(i), s))
    }

    /// Retrieves a [Stop] by its handle.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    /// Finds the handle of a [Stop] with the provided name.
    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_ids.get(name).cloned()
    }

    /// Finds a [Stop] with the provided name.
    pub fn get_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| self.stop(id))
    }

    /// Returns the [StopStats] of a stop with the provided name.
    pub fn get_stop_info(&self, name: &str) -> Option<&StopStats> {
        self.stop_id(name).map(|id| &self.stop_stats[id.0])
    }

    /// Returns all stops visited by at least one bus, sorted by name.
    pub fn served_stops(&self) -> Vec<&Stop> {
        let mut served: Vec<&Stop> = self
            .stops
            .iter()
            .zip(self.stop_stats.iter())
            .filter(|(_, stats)| !stats.buses.is_empty())
            .map(|(stop, _)| stop)
            .collect();
        served.sort_by(|a, b| a.name.cmp(&b.name));
        served
    }

    /// Records the road distance (in meters) from one stop to another.
    ///
    /// If no distance in the opposite direction was recorded yet, it is set to the same value.
    /// That default is not kept in sync - a later call for the opposite direction overrides it.
    /// Both stops must have coordinates.
    pub fn add_distance(
        &mut self,
        from: StopId,
        to: StopId,
        road: f64,
    ) -> Result<(), CatalogueError> {
        if !road.is_finite() || road < 0.0 {
            return Err(CatalogueError::InvalidDistance {
                from: self.stop(from).name.clone(),
                to: self.stop(to).name.clone(),
                distance: road,
            });
        }

        let from_coordinates = self.placed_coordinates(from)?;
        let to_coordinates = self.placed_coordinates(to)?;
        let distance = Distance {
            geo: earth_distance(from_coordinates, to_coordinates),
            road,
        };

        self.distances.insert((from, to), distance);
        if from != to {
            if let Entry::Vacant(e) = self.distances.entry((to, from)) {
                e.insert(distance);
            }
        }
        Ok(())
    }

    fn placed_coordinates(&self, id: StopId) -> Result<Coordinates, CatalogueError> {
        let stop = self.stop(id);
        stop
            .coordinates
            .ok_or_else(|| CatalogueError::UnplacedStop(stop.name.clone()))
    }

    /// Returns the [Distance] from one stop to another, if it was recorded.
    pub fn try_distance(&self, from: StopId, to: StopId) -> Option<Distance> {
        self.distances.get(&(from, to)).cloned()
    }

    /// Returns the [Distance] from one stop to another.
    ///
    /// Panics if no such distance was recorded; callers may only ask for
    /// pairs of consecutive stops of some bus.
    pub fn distance(&self, from: StopId, to: StopId) -> Distance {
        match self.try_distance(from, to) {
            Some(d) => d,
            None => panic!(
                "no distance from {:?} to {:?}",
                self.stop(from).name,
                self.stop(to).name
            ),
        }
    }

    /// Adds a [Bus] visiting `stops` in order, and computes its [BusStats].
    ///
    /// Distances between all consecutive stops must already be recorded.
    pub fn add_bus(
        &mut self,
        name: &str,
        stops: Vec<StopId>,
        edge_stops: Vec<StopId>,
    ) -> Result<BusId, CatalogueError> {
        if self.bus_ids.contains_key(name) {
            return Err(CatalogueError::DuplicateBus(name.to_string()));
        }
        if stops.is_empty() {
            return Err(CatalogueError::EmptyRoute(name.to_string()));
        }

        let stats = self.compute_bus_stats(&stops)?;

        let id = BusId(self.buses.len());
        for stop in &stops {
            self.stop_stats[stop.0].buses.insert(name.to_string());
        }
        self.buses.push(Bus {
            name: name.to_string(),
            stops,
            edge_stops,
        });
        self.bus_stats.push(stats);
        self.bus_ids.insert(name.to_string(), id);
        Ok(id)
    }

    fn compute_bus_stats(&self, stops: &[StopId]) -> Result<BusStats, CatalogueError> {
        let mut route_length = 0.0;
        let mut geo_length = 0.0;

        for pair in stops.windows(2) {
            let d = self
                .try_distance(pair[0], pair[1])
                .ok_or_else(|| CatalogueError::MissingDistance {
                    from: self.stop(pair[0]).name.clone(),
                    to: self.stop(pair[1]).name.clone(),
                })?;
            route_length += d.road;
            geo_length += d.geo;
        }

        let curvature = if geo_length > 0.0 {
            route_length / geo_length
        } else if route_length > 0.0 {
            f64::INFINITY
        } else {
            1.0
        };

        Ok(BusStats {
            stop_count: stops.len(),
            unique_stop_count: stops.iter().collect::<HashSet<_>>().len(),
            route_length,
            geo_length,
            curvature,
        })
    }

    /// Returns the number of buses in the catalogue.
    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Returns an iterator over all buses, in insertion order.
    pub fn buses(&self) -> impl Iterator<Item = (BusId, &Bus)> {
        self.buses.iter().enumerate().map(|(i, b)| (BusId(i), b))
    }

    /// Retrieves a [Bus] by its handle.
    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.0]
    }

    /// Finds a [Bus] with the provided name.
    pub fn get_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_ids.get(name).map(|&id| self.bus(id))
    }

    /// Returns the [BusStats] of a bus with the provided name.
    pub fn get_bus_info(&self, name: &str) -> Option<&BusStats> {
        self.bus_ids.get(name).map(|&id| &self.bus_stats[id.0])
    }

    /// Sets the parameters of the travel time model. The wait time must be
    /// non-negative and the velocity must be positive.
    pub fn set_route_settings(&mut self, settings: RouteSettings) -> Result<(), CatalogueError> {
        let valid_wait = settings.bus_wait_time.is_finite() && settings.bus_wait_time >= 0.0;
        let valid_velocity = settings.bus_velocity.is_finite() && settings.bus_velocity > 0.0;
        if !valid_wait || !valid_velocity {
            return Err(CatalogueError::InvalidRouteSettings {
                bus_wait_time: settings.bus_wait_time,
                bus_velocity: settings.bus_velocity,
            });
        }

        self.route_settings = settings;
        Ok(())
    }

    pub fn route_settings(&self) -> RouteSettings {
        self.route_settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-6),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn simple_catalogue() -> (Catalogue, StopId, StopId, StopId) {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", Coordinates::new(55.611087, 37.20829));
        let b = c.add_stop("B", Coordinates::new(55.595884, 37.209755));
        let d = c.add_stop("C", Coordinates::new(55.632761, 37.333324));
        c.add_distance(a, b, 3900.0).unwrap();
        c.add_distance(b, d, 9900.0).unwrap();
        c.add_distance(d, b, 100.0).unwrap();
        (c, a, b, d)
    }

    #[test]
    fn add_stop_returns_existing() {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", Coordinates::new(1.0, 2.0));
        let again = c.add_stop("A", Coordinates::new(1.0, 2.0));

        assert_eq!(a, again);
        assert_eq!(c.stop_count(), 1);
        assert_eq!(c.get_stop("A"), Some(c.stop(a)));
        assert_eq!(c.stop_id("A"), Some(a));
    }

    #[test]
    fn add_stop_first_write_wins() {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", Coordinates::new(1.0, 2.0));
        c.add_stop("A", Coordinates::new(3.0, 4.0));

        assert_eq!(c.stop(a).coordinates, Some(Coordinates::new(1.0, 2.0)));
    }

    #[test]
    fn placeholder_stop() {
        let mut c = Catalogue::new();
        let a = c.add_stop_placeholder("A");
        assert!(!c.stop(a).is_placed());
        assert_eq!(c.add_stop_placeholder("A"), a);

        let placed = c.add_stop("A", Coordinates::new(1.0, 2.0));
        assert_eq!(placed, a);
        assert_eq!(c.stop(a).coordinates, Some(Coordinates::new(1.0, 2.0)));
        assert_eq!(c.stop_count(), 1);
    }

    #[test]
    fn distance_to_placeholder() {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", Coordinates::new(1.0, 2.0));
        let b = c.add_stop_placeholder("B");

        assert_eq!(
            c.add_distance(a, b, 100.0),
            Err(CatalogueError::UnplacedStop("B".to_string()))
        );
        assert_eq!(c.try_distance(a, b), None);
    }

    #[test]
    fn invalid_distance() {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", Coordinates::new(1.0, 2.0));
        let b = c.add_stop("B", Coordinates::new(1.0, 2.1));

        assert!(matches!(
            c.add_distance(a, b, -5.0),
            Err(CatalogueError::InvalidDistance { .. })
        ));
        assert!(c.add_distance(a, b, f64::NAN).is_err());
    }

    #[test]
    fn reverse_distance_default() {
        let (c, a, b, _) = simple_catalogue();
        assert_eq!(c.distance(a, b).road, 3900.0);
        assert_eq!(c.distance(b, a).road, 3900.0);
        assert_eq!(c.distance(a, b).geo, c.distance(b, a).geo);
    }

    #[test]
    fn reverse_distance_override() {
        let (c, _, b, d) = simple_catalogue();
        assert_eq!(c.distance(b, d).road, 9900.0);
        assert_eq!(c.distance(d, b).road, 100.0);
    }

    #[test]
    fn reverse_default_is_not_kept_in_sync() {
        let (mut c, a, b, _) = simple_catalogue();
        c.add_distance(a, b, 4000.0).unwrap();
        assert_eq!(c.distance(a, b).road, 4000.0);
        assert_eq!(c.distance(b, a).road, 3900.0);
    }

    #[test]
    #[should_panic]
    fn missing_distance() {
        let (c, a, _, d) = simple_catalogue();
        c.distance(a, d);
    }

    #[test]
    fn bus_stats() {
        let (mut c, a, b, d) = simple_catalogue();
        let route = expand_route(&[a, b, d], false);
        c.add_bus("1", route, vec![a, d]).unwrap();

        let stats = c.get_bus_info("1").unwrap();
        assert_eq!(stats.stop_count, 5);
        assert_eq!(stats.unique_stop_count, 3);
        assert_almost_eq!(stats.route_length, 3900.0 + 9900.0 + 100.0 + 3900.0);

        let geo = 2.0 * (c.distance(a, b).geo + c.distance(b, d).geo);
        assert_almost_eq!(stats.geo_length, geo);
        assert_almost_eq!(stats.curvature, stats.route_length / geo);
        assert!(stats.curvature >= 1.0);
    }

    #[test]
    fn stop_stats() {
        let (mut c, a, b, d) = simple_catalogue();
        c.add_bus("2", vec![a, b, a], vec![a]).unwrap();
        c.add_bus("1", vec![b, d], vec![b, d]).unwrap();

        let buses = |name: &str| {
            c.get_stop_info(name)
                .unwrap()
                .buses
                .iter()
                .cloned()
                .collect::<Vec<_>>()
        };
        assert_eq!(buses("A"), vec!["2"]);
        assert_eq!(buses("B"), vec!["1", "2"]);
        assert_eq!(buses("C"), vec!["1"]);
        assert!(c.get_stop_info("D").is_none());
    }

    #[test]
    fn served_stops() {
        let (mut c, a, b, _) = simple_catalogue();
        c.add_stop("Z", Coordinates::new(0.0, 0.0));
        c.add_bus("1", vec![b, a], vec![b, a]).unwrap();

        let names: Vec<&str> = c.served_stops().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn bus_lookup() {
        let (mut c, a, b, _) = simple_catalogue();
        let id = c.add_bus("1", vec![a, b], vec![a, b]).unwrap();

        assert_eq!(c.bus(id).name, "1");
        assert_eq!(c.get_bus("1").map(|b| b.stops.len()), Some(2));
        assert!(c.get_bus("2").is_none());
        assert!(c.get_bus_info("2").is_none());
        assert_eq!(c.bus_count(), 1);
    }

    #[test]
    fn duplicate_bus() {
        let (mut c, a, b, _) = simple_catalogue();
        c.add_bus("1", vec![a, b], vec![a, b]).unwrap();
        assert_eq!(
            c.add_bus("1", vec![b, a], vec![b, a]),
            Err(CatalogueError::DuplicateBus("1".to_string()))
        );
    }

    #[test]
    fn bus_without_distance() {
        let (mut c, a, _, d) = simple_catalogue();
        assert_eq!(
            c.add_bus("1", vec![a, d], vec![a, d]),
            Err(CatalogueError::MissingDistance {
                from: "A".to_string(),
                to: "C".to_string()
            })
        );
        assert!(c.get_bus("1").is_none());
        assert!(c.get_stop_info("A").unwrap().buses.is_empty());
    }

    #[test]
    fn empty_bus() {
        let (mut c, _, _, _) = simple_catalogue();
        assert_eq!(
            c.add_bus("1", vec![], vec![]),
            Err(CatalogueError::EmptyRoute("1".to_string()))
        );
    }

    #[test]
    fn single_stop_bus() {
        let (mut c, a, _, _) = simple_catalogue();
        c.add_bus("1", vec![a], vec![a]).unwrap();

        let stats = c.get_bus_info("1").unwrap();
        assert_eq!(stats.stop_count, 1);
        assert_eq!(stats.unique_stop_count, 1);
        assert_eq!(stats.route_length, 0.0);
        assert_eq!(stats.curvature, 1.0);
    }

    #[test]
    fn curvature_of_coincident_stops() {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", Coordinates::new(1.0, 1.0));
        let b = c.add_stop("B", Coordinates::new(1.0, 1.0));
        c.add_distance(a, b, 250.0).unwrap();
        c.add_bus("1", vec![a, b], vec![a, b]).unwrap();

        let stats = c.get_bus_info("1").unwrap();
        assert_eq!(stats.geo_length, 0.0);
        assert_eq!(stats.curvature, f64::INFINITY);
    }

    #[test]
    fn route_settings() {
        let mut c = Catalogue::new();
        assert_eq!(c.route_settings(), RouteSettings::default());

        let settings = RouteSettings {
            bus_wait_time: 2.0,
            bus_velocity: 30.0,
        };
        c.set_route_settings(settings).unwrap();
        assert_eq!(c.route_settings(), settings);

        assert!(c
            .set_route_settings(RouteSettings {
                bus_wait_time: 2.0,
                bus_velocity: 0.0,
            })
            .is_err());
        assert!(c
            .set_route_settings(RouteSettings {
                bus_wait_time: -1.0,
                bus_velocity: 30.0,
            })
            .is_err());
        assert_eq!(c.route_settings(), settings);
    }

    #[test]
    fn expand_routes() {
        assert_eq!(expand_route(&[1, 2, 3], false), vec![1, 2, 3, 2, 1]);
        assert_eq!(expand_route(&[1, 2, 3, 1], true), vec![1, 2, 3, 1]);
        assert_eq!(expand_route(&[1], false), vec![1]);
        assert_eq!(expand_route::<i32>(&[], false), Vec::<i32>::new());
    }
}
