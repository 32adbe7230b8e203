use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use serde::Deserialize;

use crate::api::envelope::ApiEnvelope;
use crate::config;

/// One option in the geographic hierarchy. Every level of the reference
/// service (country, state, LGA, city, city region) returns the same shape.
#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct GeoOption {
    pub code: String,
    pub name: String,
}

/// Per-dropdown request sequencing. A lookup takes a ticket before sending
/// and checks it is still the newest before applying the response, so a slow
/// earlier fetch can never overwrite the result of a later one.
#[derive(Clone, PartialEq)]
pub struct RequestSeq {
    counter: Rc<Cell<u64>>,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self { counter: Rc::new(Cell::new(0)) }
    }

    pub fn begin(&self) -> u64 {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.counter.get() == ticket
    }
}

impl Default for RequestSeq {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_options(path: String) -> Result<Vec<GeoOption>, String> {
    match Request::get(&path).send().await {
        Ok(response) => {
            if response.ok() {
                match response.json::<ApiEnvelope<Vec<GeoOption>>>().await {
                    Ok(envelope) => envelope.into_result("No geographic data returned"),
                    Err(_) => Err("Failed to parse geographic data".to_string()),
                }
            } else {
                Err("Failed to load geographic data".to_string())
            }
        }
        Err(_) => Err("Network error loading geographic data".to_string()),
    }
}

pub async fn fetch_countries() -> Result<Vec<GeoOption>, String> {
    fetch_options(format!("{}/api/geo/countries", config::get_backend_url())).await
}

pub async fn fetch_states(country: &str) -> Result<Vec<GeoOption>, String> {
    fetch_options(format!(
        "{}/api/geo/states?country={}",
        config::get_backend_url(),
        country
    ))
    .await
}

pub async fn fetch_lgas(country: &str, state: &str) -> Result<Vec<GeoOption>, String> {
    fetch_options(format!(
        "{}/api/geo/lgas?country={}&state={}",
        config::get_backend_url(),
        country,
        state
    ))
    .await
}

pub async fn fetch_cities(country: &str, state: &str, lga: Option<&str>) -> Result<Vec<GeoOption>, String> {
    let mut path = format!(
        "{}/api/geo/cities?country={}&state={}",
        config::get_backend_url(),
        country,
        state
    );
    if let Some(lga) = lga {
        path.push_str(&format!("&lga={}", lga));
    }
    fetch_options(path).await
}

pub async fn fetch_city_regions(country: &str, state: &str, city: &str) -> Result<Vec<GeoOption>, String> {
    fetch_options(format!(
        "{}/api/geo/city-regions?country={}&state={}&city={}",
        config::get_backend_url(),
        country,
        state,
        city
    ))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_wins() {
        let seq = RequestSeq::new();
        let first = seq.begin();
        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn clones_share_the_counter() {
        let seq = RequestSeq::new();
        let seen_by_handler = seq.clone();
        let ticket = seq.begin();
        assert!(seen_by_handler.is_current(ticket));
        seq.begin();
        assert!(!seen_by_handler.is_current(ticket));
    }
}
