use buswatch::{
    routes::{self, Route, Stop, find_nearest},
    shared::Coordinate,
};

fn stops(points: &[(&str, f64, f64)]) -> Vec<Stop> {
    points
        .iter()
        .map(|(name, latitude, longitude)| Stop::new(*name, Coordinate::new(*latitude, *longitude)))
        .collect()
}

#[test]
fn nearest_picks_closer_stop_test() {
    let stops = stops(&[("A", 0.0, 0.0), ("B", 10.0, 10.0)]);
    let near_a = find_nearest(&Coordinate::new(1.0, 1.0), &stops).unwrap();
    assert_eq!(near_a.name, "A");
    let near_b = find_nearest(&Coordinate::new(9.0, 9.0), &stops).unwrap();
    assert_eq!(near_b.name, "B");
}

#[test]
fn nearest_tie_goes_to_first_stop_test() {
    let forward = stops(&[("A", 0.0, 0.0), ("B", 10.0, 10.0)]);
    let rider = Coordinate::new(5.0, 5.0);
    assert_eq!(find_nearest(&rider, &forward).unwrap().name, "A");

    let backward = stops(&[("B", 10.0, 10.0), ("A", 0.0, 0.0)]);
    assert_eq!(find_nearest(&rider, &backward).unwrap().name, "B");
}

#[test]
fn nearest_uses_raw_degrees_test() {
    // One degree of longitude and one of latitude count the same.
    let stops = stops(&[("North", 1.0, 0.0), ("East", 0.0, 0.9)]);
    let nearest = find_nearest(&Coordinate::new(0.0, 0.0), &stops).unwrap();
    assert_eq!(nearest.name, "East");
}

#[test]
fn nearest_returns_stop_coordinate_test() {
    let stops = stops(&[("A", 12.9, 77.5), ("B", 13.1, 77.7)]);
    let nearest = find_nearest(&Coordinate::new(13.0, 77.69), &stops).unwrap();
    assert_eq!(nearest.coordinate, Coordinate::new(13.1, 77.7));
}

#[test]
fn nearest_without_stops_fails_test() {
    let result = find_nearest(&Coordinate::new(0.0, 0.0), &[]);
    assert!(matches!(result, Err(routes::Error::NoStopsAvailable)));
}

#[test]
fn nearest_over_route_stops_test() {
    let route = Route::new("R1", stops(&[("A", 0.0, 0.0), ("B", 10.0, 10.0), ("C", 20.0, 20.0)]))
        .unwrap();
    let nearest = find_nearest(&Coordinate::new(18.0, 18.0), route.stops()).unwrap();
    assert_eq!(nearest.name, "C");
}

#[test]
fn nearest_rejects_non_finite_rider_test() {
    let stops = stops(&[("A", 0.0, 0.0), ("B", 10.0, 10.0)]);
    for rider in [
        Coordinate::new(f64::NAN, 0.0),
        Coordinate::new(0.0, f64::INFINITY),
    ] {
        let result = find_nearest(&rider, &stops);
        assert!(matches!(result, Err(routes::Error::InvalidLocation(_))));
    }
}
