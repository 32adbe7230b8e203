use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::packages::models::SubscriptionPackage;

static PROMO_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,20}$").expect("promo code pattern"));

pub fn validate_title(title: &str) -> Option<String> {
    let len = title.trim().chars().count();
    if len < 2 {
        Some("Title must be at least 2 characters".to_string())
    } else if len > 100 {
        Some("Title must be at most 100 characters".to_string())
    } else {
        None
    }
}

pub fn validate_description(description: &str) -> Option<String> {
    if description.trim().chars().count() < 10 {
        Some("Description must be at least 10 characters".to_string())
    } else {
        None
    }
}

/// Checked at insertion time so the list never holds a duplicate.
pub fn validate_new_feature(entry: &str, existing: &[String]) -> Option<String> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return Some("Feature cannot be empty".to_string());
    }
    if trimmed.chars().count() > 200 {
        return Some("Feature must be at most 200 characters".to_string());
    }
    if existing.iter().any(|f| f == trimmed) {
        return Some("Feature already exists".to_string());
    }
    None
}

pub fn validate_feature_list(features: &[String]) -> Option<String> {
    if features.is_empty() {
        Some("Add at least one feature".to_string())
    } else {
        None
    }
}

pub fn validate_promo_code(code: &str) -> Option<String> {
    if code.is_empty() {
        return None;
    }
    if PROMO_CODE.is_match(code) {
        None
    } else {
        Some("Promo code must be 3-20 letters, digits, hyphens or underscores".to_string())
    }
}

pub fn validate_discount(discount: Option<f64>) -> Option<String> {
    match discount {
        Some(d) if !(0.0..=100.0).contains(&d) => {
            Some("Discount must be between 0 and 100".to_string())
        }
        _ => None,
    }
}

/// Both dates are the raw `YYYY-MM-DD` values from the date inputs. `today`
/// is passed in rather than read from the clock so the rule is testable.
pub fn validate_promo_dates(start: &str, end: &str, today: NaiveDate) -> Option<String> {
    if start.is_empty() && end.is_empty() {
        return None;
    }
    let start_date = match NaiveDate::parse_from_str(start, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => return Some("Enter a valid promo start date".to_string()),
    };
    let end_date = match NaiveDate::parse_from_str(end, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => return Some("Enter a valid promo end date".to_string()),
    };
    if start_date > end_date {
        return Some("Promo start date must be on or before the end date".to_string());
    }
    if start_date < today {
        return Some("Promo start date cannot be in the past".to_string());
    }
    None
}

pub fn validate_max_users(value: &str) -> Option<String> {
    match value.parse::<u32>() {
        Ok(n) if (1..=10_000).contains(&n) => None,
        _ => Some("Max users must be between 1 and 10000".to_string()),
    }
}

/// Runs every field validator and collects failures keyed by field name.
/// Per-service problems are keyed `service-{index}`. Submission is blocked
/// while the map is non-empty.
pub fn validate_package(package: &SubscriptionPackage, today: NaiveDate) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if let Some(message) = validate_title(&package.title) {
        errors.insert("title".to_string(), message);
    }
    if let Some(message) = validate_description(&package.description) {
        errors.insert("description".to_string(), message);
    }
    if package.services.is_empty() {
        errors.insert("services".to_string(), "Select at least one service".to_string());
    }
    for (index, service) in package.services.iter().enumerate() {
        if service.prices.for_cycle(service.cycle) <= 0.0 {
            errors.insert(
                format!("service-{}", index),
                format!("{} has no price for the selected cycle", service.name),
            );
        }
    }
    if let Some(message) = validate_promo_code(&package.promo_code) {
        errors.insert("promo_code".to_string(), message);
    }
    if let Some(message) = validate_discount(package.discount_percentage) {
        errors.insert("discount_percentage".to_string(), message);
    }
    if let Some(message) =
        validate_promo_dates(&package.promo_starts_at, &package.promo_ends_at, today)
    {
        errors.insert("promo_dates".to_string(), message);
    }
    if let Some(message) = validate_max_users(&package.max_users.to_string()) {
        errors.insert("max_users".to_string(), message);
    }
    if let Some(message) = validate_feature_list(&package.features) {
        errors.insert("features".to_string(), message);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::models::{BillingCycle, CyclePrices, SelectedService};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn title_length_bounds() {
        assert!(validate_title("a").is_some());
        assert!(validate_title("ab").is_none());
        assert!(validate_title(&"x".repeat(100)).is_none());
        assert!(validate_title(&"x".repeat(101)).is_some());
    }

    #[test]
    fn description_minimum_length() {
        assert!(validate_description("too short").is_some());
        assert!(validate_description("long enough description").is_none());
    }

    #[test]
    fn duplicate_feature_is_rejected_and_list_unchanged() {
        let mut features = vec!["Priority support".to_string()];
        let error = validate_new_feature("Priority support", &features);
        assert_eq!(error, Some("Feature already exists".to_string()));
        if error.is_none() {
            features.push("Priority support".to_string());
        }
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn feature_entry_bounds() {
        assert!(validate_new_feature("", &[]).is_some());
        assert!(validate_new_feature(&"x".repeat(201), &[]).is_some());
        assert!(validate_new_feature("Unlimited listings", &[]).is_none());
    }

    #[test]
    fn promo_code_pattern() {
        assert!(validate_promo_code("").is_none());
        assert!(validate_promo_code("ab").is_some());
        assert!(validate_promo_code("SAVE-20_2026").is_none());
        assert!(validate_promo_code("has space").is_some());
        assert!(validate_promo_code(&"A".repeat(21)).is_some());
    }

    #[test]
    fn discount_range() {
        assert!(validate_discount(Some(-1.0)).is_some());
        assert!(validate_discount(Some(101.0)).is_some());
        assert!(validate_discount(Some(0.0)).is_none());
        assert!(validate_discount(Some(100.0)).is_none());
        assert!(validate_discount(None).is_none());
    }

    #[test]
    fn promo_dates_ordering_and_past() {
        assert!(validate_promo_dates("", "", today()).is_none());
        assert!(validate_promo_dates("2026-09-01", "2026-08-01", today()).is_some());
        assert!(validate_promo_dates("2026-08-01", "2026-09-01", today()).is_some());
        assert!(validate_promo_dates("2026-08-07", "2026-09-01", today()).is_none());
        assert!(validate_promo_dates("2026-08-07", "2026-08-07", today()).is_none());
    }

    #[test]
    fn max_users_range() {
        assert!(validate_max_users("0").is_some());
        assert!(validate_max_users("10001").is_some());
        assert!(validate_max_users("not a number").is_some());
        assert!(validate_max_users("1").is_none());
        assert!(validate_max_users("10000").is_none());
    }

    #[test]
    fn full_form_collects_per_service_errors() {
        let mut package = SubscriptionPackage {
            title: "Growth".to_string(),
            description: "Everything a growing business needs".to_string(),
            services: vec![SelectedService {
                id: "verify".to_string(),
                name: "Verification".to_string(),
                prices: CyclePrices { monthly: 0.0, quarterly: 100.0, yearly: 300.0 },
                cycle: BillingCycle::Monthly,
            }],
            features: vec!["Verified badge".to_string()],
            ..Default::default()
        };
        let errors = validate_package(&package, today());
        assert!(errors.contains_key("service-0"));

        package.services[0].cycle = BillingCycle::Quarterly;
        assert!(validate_package(&package, today()).is_empty());
    }
}
