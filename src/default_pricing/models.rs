use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Geographic granularity of a default pricing rule. The level is never
/// stored by the backend; it is implied by which optional scope fields are
/// populated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PricingLevel {
    Country,
    State,
    Lga,
    City,
}

impl PricingLevel {
    pub const ALL: [PricingLevel; 4] = [
        PricingLevel::Country,
        PricingLevel::State,
        PricingLevel::Lga,
        PricingLevel::City,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PricingLevel::Country => "Country",
            PricingLevel::State => "State",
            PricingLevel::Lga => "LGA",
            PricingLevel::City => "City",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingLevel::Country => "country",
            PricingLevel::State => "state",
            PricingLevel::Lga => "lga",
            PricingLevel::City => "city",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "country" => Some(PricingLevel::Country),
            "state" => Some(PricingLevel::State),
            "lga" => Some(PricingLevel::Lga),
            "city" => Some(PricingLevel::City),
            _ => None,
        }
    }

    pub fn requires_state(&self) -> bool {
        !matches!(self, PricingLevel::Country)
    }

    pub fn requires_lga(&self) -> bool {
        matches!(self, PricingLevel::Lga | PricingLevel::City)
    }

    pub fn requires_city(&self) -> bool {
        matches!(self, PricingLevel::City)
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct DefaultPricing {
    #[serde(default)]
    pub id: Option<String>,
    pub country_code: String,
    pub country_name: String,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub lga_code: Option<String>,
    #[serde(default)]
    pub lga_name: Option<String>,
    #[serde(default)]
    pub city_code: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    pub default_fee: f64,
    pub is_active: bool,
}

impl DefaultPricing {
    /// The most specific populated field decides the level.
    pub fn level(&self) -> PricingLevel {
        if self.city_code.as_deref().map_or(false, |c| !c.is_empty()) {
            PricingLevel::City
        } else if self.lga_code.as_deref().map_or(false, |c| !c.is_empty()) {
            PricingLevel::Lga
        } else if self.state_code.as_deref().map_or(false, |c| !c.is_empty()) {
            PricingLevel::State
        } else {
            PricingLevel::Country
        }
    }

    pub fn scope_label(&self) -> String {
        let mut parts = vec![self.country_name.clone()];
        if let Some(state) = self.state_name.as_deref().filter(|s| !s.is_empty()) {
            parts.push(state.to_string());
        }
        if let Some(lga) = self.lga_name.as_deref().filter(|s| !s.is_empty()) {
            parts.push(lga.to_string());
        }
        if let Some(city) = self.city_name.as_deref().filter(|s| !s.is_empty()) {
            parts.push(city.to_string());
        }
        parts.join(" / ")
    }
}

pub fn validate_default_fee(value: &str) -> Option<String> {
    match value.parse::<f64>() {
        Ok(fee) if fee > 0.0 => None,
        Ok(_) => Some("Default fee must be greater than zero".to_string()),
        Err(_) => Some("Enter a valid default fee".to_string()),
    }
}

/// Level-aware whole-form check. Only the fields the chosen level demands
/// are required; the others are not sent on save.
pub fn validate_entry(
    level: PricingLevel,
    country: &str,
    state: &str,
    lga: &str,
    city: &str,
    fee: &str,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if country.is_empty() {
        errors.insert("country".to_string(), "Select a country".to_string());
    }
    if level.requires_state() && state.is_empty() {
        errors.insert("state".to_string(), "Select a state".to_string());
    }
    if level.requires_lga() && lga.is_empty() {
        errors.insert("lga".to_string(), "Select an LGA".to_string());
    }
    if level.requires_city() && city.is_empty() {
        errors.insert("city".to_string(), "Select a city".to_string());
    }
    if let Some(message) = validate_default_fee(fee) {
        errors.insert("default_fee".to_string(), message);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> DefaultPricing {
        DefaultPricing {
            id: None,
            country_code: "NG".to_string(),
            country_name: "Nigeria".to_string(),
            state_code: None,
            state_name: None,
            lga_code: None,
            lga_name: None,
            city_code: None,
            city_name: None,
            default_fee: 5000.0,
            is_active: true,
        }
    }

    #[test]
    fn level_follows_most_specific_field() {
        let mut e = entry();
        assert_eq!(e.level(), PricingLevel::Country);
        e.state_code = Some("LA".to_string());
        assert_eq!(e.level(), PricingLevel::State);
        e.lga_code = Some("IKD".to_string());
        assert_eq!(e.level(), PricingLevel::Lga);
        e.city_code = Some("IKJ".to_string());
        assert_eq!(e.level(), PricingLevel::City);
    }

    #[test]
    fn empty_strings_do_not_count_as_populated() {
        let mut e = entry();
        e.state_code = Some(String::new());
        assert_eq!(e.level(), PricingLevel::Country);
    }

    #[test]
    fn fee_must_be_positive() {
        assert!(validate_default_fee("0").is_some());
        assert!(validate_default_fee("-10").is_some());
        assert!(validate_default_fee("abc").is_some());
        assert!(validate_default_fee("2500").is_none());
    }

    #[test]
    fn required_fields_track_the_level() {
        let errors = validate_entry(PricingLevel::Country, "NG", "", "", "", "1000");
        assert!(errors.is_empty());

        let errors = validate_entry(PricingLevel::City, "NG", "LA", "", "", "1000");
        assert!(errors.contains_key("lga"));
        assert!(errors.contains_key("city"));

        let errors = validate_entry(PricingLevel::City, "NG", "LA", "IKD", "IKJ", "1000");
        assert!(errors.is_empty());
    }
}
