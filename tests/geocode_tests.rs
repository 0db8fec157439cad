use buswatch::{
    geocode::{self, Geocoder, LocationIq, LocationIqPlace},
    shared::Coordinate,
};

const PLACES: &str = r#"[
    {"place_id": "1", "lat": "12.9716", "lon": "77.5946", "display_name": "Bengaluru, Karnataka"},
    {"place_id": "2", "lat": "12.2958", "lon": "76.6394", "display_name": "Mysuru, Karnataka"},
    {"place_id": "3", "lat": "north", "lon": "76.0", "display_name": "Nowhere"}
]"#;

#[test]
fn locationiq_places_parse_test() {
    let places: Vec<LocationIqPlace> = serde_json::from_str(PLACES).unwrap();
    assert_eq!(places.len(), 3);
    assert_eq!(
        places[0].coordinate().unwrap(),
        Coordinate::new(12.9716, 77.5946)
    );
}

#[test]
fn malformed_coordinates_are_rejected_test() {
    let places: Vec<LocationIqPlace> = serde_json::from_str(PLACES).unwrap();
    assert!(matches!(
        places[2].coordinate(),
        Err(geocode::Error::Malformed(_))
    ));

    let suggestions: Vec<_> = places
        .into_iter()
        .filter_map(LocationIqPlace::into_suggestion)
        .collect();
    let names: Vec<_> = suggestions
        .iter()
        .map(|suggestion| suggestion.display_name.as_str())
        .collect();
    assert_eq!(names, ["Bengaluru, Karnataka", "Mysuru, Karnataka"]);
    assert_eq!(suggestions[1].coordinate, Coordinate::new(12.2958, 76.6394));
}

#[test]
fn place_without_display_name_test() {
    let place: LocationIqPlace = serde_json::from_str(r#"{"lat": "1.5", "lon": "2.5"}"#).unwrap();
    let suggestion = place.into_suggestion().unwrap();
    assert_eq!(suggestion.display_name, "");
    assert_eq!(suggestion.coordinate, Coordinate::new(1.5, 2.5));
}

#[tokio::test]
async fn empty_autocomplete_query_skips_lookup_test() {
    // Nothing listens here, so any request would fail.
    let geocoder = LocationIq::new(
        "key",
        "http://127.0.0.1:9/search.php",
        "http://127.0.0.1:9/autocomplete.php",
    );
    assert!(geocoder.autocomplete("", 5).await.unwrap().is_empty());
    assert!(geocoder.autocomplete("   ", 5).await.unwrap().is_empty());
}
