use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named sub-area of a city; the finest pricing/verification granularity.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct CityRegion {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub country_code: String,
    pub state_code: String,
    pub lga_code: String,
    pub city_code: String,
    pub fee: f64,
}

pub fn validate_region_name(name: &str) -> Option<String> {
    let len = name.trim().chars().count();
    if len < 2 {
        Some("Region name must be at least 2 characters".to_string())
    } else if len > 100 {
        Some("Region name must be at most 100 characters".to_string())
    } else {
        None
    }
}

pub fn validate_region_fee(value: &str) -> Option<String> {
    match value.parse::<f64>() {
        Ok(fee) if fee > 0.0 => None,
        Ok(_) => Some("Fee must be greater than zero".to_string()),
        Err(_) => Some("Enter a valid fee".to_string()),
    }
}

/// A city region always carries the full address chain down to its city.
pub fn validate_region(
    name: &str,
    country: &str,
    state: &str,
    lga: &str,
    city: &str,
    fee: &str,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if let Some(message) = validate_region_name(name) {
        errors.insert("name".to_string(), message);
    }
    if country.is_empty() {
        errors.insert("country".to_string(), "Select a country".to_string());
    }
    if state.is_empty() {
        errors.insert("state".to_string(), "Select a state".to_string());
    }
    if lga.is_empty() {
        errors.insert("lga".to_string(), "Select an LGA".to_string());
    }
    if city.is_empty() {
        errors.insert("city".to_string(), "Select a city".to_string());
    }
    if let Some(message) = validate_region_fee(fee) {
        errors.insert("fee".to_string(), message);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_bounds() {
        assert!(validate_region_name("G").is_some());
        assert!(validate_region_name("GRA Phase 2").is_none());
        assert!(validate_region_name(&"x".repeat(101)).is_some());
    }

    #[test]
    fn full_chain_is_required() {
        let errors = validate_region("GRA", "NG", "LA", "", "IKJ", "7500");
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("lga"));

        let errors = validate_region("GRA", "NG", "LA", "IKD", "IKJ", "7500");
        assert!(errors.is_empty());
    }

    #[test]
    fn fee_must_parse_positive() {
        assert!(validate_region_fee("0").is_some());
        assert!(validate_region_fee("7500").is_none());
    }
}
