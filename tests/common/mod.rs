#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use buswatch::{
    eta::{self, EtaProvider},
    geocode::{self, Geocoder, PlaceSuggestion},
    shared::geo::Coordinate,
};

/// How the fake routing service answers for one origin.
#[derive(Debug, Clone, Copy)]
pub enum Answer {
    Seconds(f64),
    NoRoute,
    Status(u16),
    Hang,
}

/// Routing service fake keyed by the origin coordinate.
#[derive(Default)]
pub struct FakeEta {
    answers: Vec<(Coordinate, Answer)>,
    calls: AtomicUsize,
    destinations: Mutex<Vec<Coordinate>>,
}

impl FakeEta {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn answer(mut self, from: Coordinate, answer: Answer) -> Self {
        self.answers.push((from, answer));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn destinations(&self) -> Vec<Coordinate> {
        self.destinations.lock().unwrap().clone()
    }
}

#[async_trait]
impl EtaProvider for FakeEta {
    async fn driving_duration(&self, from: Coordinate, to: Coordinate) -> Result<f64, eta::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.destinations.lock().unwrap().push(to);
        let answer = self
            .answers
            .iter()
            .find(|(origin, _)| *origin == from)
            .map(|(_, answer)| *answer)
            .unwrap_or(Answer::NoRoute);
        match answer {
            Answer::Seconds(seconds) => Ok(seconds),
            Answer::NoRoute => Err(eta::Error::NoRoute),
            Answer::Status(code) => Err(eta::Error::Status(code)),
            Answer::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(0.0)
            }
        }
    }
}

/// Geocoder fake that only knows the places it was given.
#[derive(Default)]
pub struct FakeGeocoder {
    places: HashMap<String, Coordinate>,
}

impl FakeGeocoder {
    pub fn new(places: &[(&str, Coordinate)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|(name, coordinate)| (name.to_string(), *coordinate))
                .collect(),
        }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, place: &str) -> Result<Coordinate, geocode::Error> {
        self.places
            .get(place)
            .copied()
            .ok_or_else(|| geocode::Error::Unresolvable(place.to_string()))
    }

    async fn autocomplete(
        &self,
        _query: &str,
        _limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, geocode::Error> {
        Ok(Vec::new())
    }
}

/// A fresh, empty directory for one test.
pub fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "buswatch-{name}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
