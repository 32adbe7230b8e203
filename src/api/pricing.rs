use gloo_net::http::Request;
use serde::Deserialize;

use crate::api::envelope::ApiEnvelope;
use crate::config;

// Applied whenever the backend has no rule for a location or cannot be
// reached. The source label tells the two cases apart in the UI.
pub const DEFAULT_VERIFICATION_FEE: f64 = 5000.0;
pub const DEFAULT_PRICING_SOURCE: &str = "Default System Pricing";
pub const ERROR_FALLBACK_SOURCE: &str = "Default System Pricing (Error Fallback)";

/// Most specific location values known to the caller. The backend owns the
/// specificity ordering (city region > city > LGA > state > country); we only
/// forward whatever is populated.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LocationQuery {
    pub country: String,
    pub state: String,
    pub lga: Option<String>,
    pub city: String,
    pub city_region: Option<String>,
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct ResolvedFee {
    pub fee: f64,
    pub source: String,
}

pub enum LookupOutcome {
    Found(ResolvedFee),
    NoRule,
    Failed,
}

/// Collapses a lookup outcome into the fee the location gets. Pure so the
/// fallback policy is testable without a browser.
pub fn settle(outcome: LookupOutcome) -> ResolvedFee {
    match outcome {
        LookupOutcome::Found(resolved) => resolved,
        LookupOutcome::NoRule => ResolvedFee {
            fee: DEFAULT_VERIFICATION_FEE,
            source: DEFAULT_PRICING_SOURCE.to_string(),
        },
        LookupOutcome::Failed => ResolvedFee {
            fee: DEFAULT_VERIFICATION_FEE,
            source: ERROR_FALLBACK_SOURCE.to_string(),
        },
    }
}

fn query_string(query: &LocationQuery) -> String {
    let mut params = format!(
        "country={}&state={}&city={}",
        query.country, query.state, query.city
    );
    if let Some(lga) = &query.lga {
        params.push_str(&format!("&lga={}", lga));
    }
    if let Some(region) = &query.city_region {
        params.push_str(&format!("&city_region={}", region));
    }
    params
}

/// Single round-trip to the verification pricing endpoint. Never errors;
/// the fallback policy absorbs empty and failed lookups.
pub async fn resolve_verification_fee(query: &LocationQuery) -> ResolvedFee {
    let url = format!(
        "{}/api/pricing/location-verification?{}",
        config::get_backend_url(),
        query_string(query)
    );
    let outcome = match Request::get(&url).send().await {
        Ok(response) => {
            if response.ok() {
                match response.json::<ApiEnvelope<ResolvedFee>>().await {
                    Ok(envelope) => match (envelope.success, envelope.data) {
                        (true, Some(resolved)) => LookupOutcome::Found(resolved),
                        _ => LookupOutcome::NoRule,
                    },
                    Err(_) => LookupOutcome::Failed,
                }
            } else {
                LookupOutcome::Failed
            }
        }
        Err(_) => LookupOutcome::Failed,
    };
    settle(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_fee_is_used_as_is() {
        let resolved = settle(LookupOutcome::Found(ResolvedFee {
            fee: 12500.0,
            source: "Lagos/Ikeja City Region".to_string(),
        }));
        assert_eq!(resolved.fee, 12500.0);
        assert_eq!(resolved.source, "Lagos/Ikeja City Region");
    }

    #[test]
    fn missing_rule_falls_back_to_default() {
        let resolved = settle(LookupOutcome::NoRule);
        assert_eq!(resolved.fee, DEFAULT_VERIFICATION_FEE);
        assert_eq!(resolved.source, DEFAULT_PRICING_SOURCE);
    }

    #[test]
    fn failed_lookup_is_labelled_distinctly() {
        let resolved = settle(LookupOutcome::Failed);
        assert_eq!(resolved.fee, DEFAULT_VERIFICATION_FEE);
        assert_eq!(resolved.source, ERROR_FALLBACK_SOURCE);
        assert_ne!(resolved.source, DEFAULT_PRICING_SOURCE);
    }

    #[test]
    fn optional_levels_are_forwarded_only_when_present() {
        let mut query = LocationQuery {
            country: "NG".to_string(),
            state: "LA".to_string(),
            lga: None,
            city: "IKJ".to_string(),
            city_region: None,
        };
        assert_eq!(query_string(&query), "country=NG&state=LA&city=IKJ");

        query.lga = Some("IKD".to_string());
        query.city_region = Some("GRA".to_string());
        assert_eq!(
            query_string(&query),
            "country=NG&state=LA&city=IKJ&lga=IKD&city_region=GRA"
        );
    }
}
