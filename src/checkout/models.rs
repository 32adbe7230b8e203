use serde::{Deserialize, Serialize};

use crate::api::pricing::ResolvedFee;
use crate::packages::models::BillingCycle;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Registered,
    Unregistered,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Unverified,
}

/// Organization profile collected on the wizard's second step.
/// `verification_status` only means anything for public profiles.
#[derive(Clone, PartialEq, Debug)]
pub struct OrganizationProfile {
    pub business_type: Option<BusinessType>,
    pub is_public_profile: Option<bool>,
    pub verification_status: VerificationStatus,
}

impl Default for OrganizationProfile {
    fn default() -> Self {
        Self {
            business_type: None,
            is_public_profile: None,
            verification_status: VerificationStatus::Unverified,
        }
    }
}

impl OrganizationProfile {
    pub fn is_complete(&self) -> bool {
        self.business_type.is_some() && self.is_public_profile.is_some()
    }

    pub fn is_public(&self) -> bool {
        self.is_public_profile == Some(true)
    }

    pub fn is_verified(&self) -> bool {
        self.is_public() && self.verification_status == VerificationStatus::Verified
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Headquarters,
    Branch,
}

impl LocationKind {
    pub fn label(&self) -> &'static str {
        match self {
            LocationKind::Headquarters => "Headquarters",
            LocationKind::Branch => "Branch",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum MediaKind {
    Image,
    Video,
}

/// Gallery entry: either a file picked in this session (kept as its object
/// URL until upload) or a URL that already exists on the backend.
#[derive(Clone, PartialEq, Debug)]
pub enum MediaItem {
    Upload { name: String, object_url: String, kind: MediaKind },
    Existing { url: String, kind: MediaKind },
}

// Verified organizations get the larger gallery.
pub const GALLERY_LIMIT_UNVERIFIED: usize = 3;
pub const GALLERY_LIMIT_VERIFIED: usize = 10;

pub fn gallery_limit(status: VerificationStatus) -> usize {
    match status {
        VerificationStatus::Verified => GALLERY_LIMIT_VERIFIED,
        VerificationStatus::Unverified => GALLERY_LIMIT_UNVERIFIED,
    }
}

/// One physical business location being assembled in the wizard. `id` is a
/// client-side counter so UI state stays attached to the right draft when
/// earlier drafts are removed.
#[derive(Clone, PartialEq, Debug)]
pub struct LocationDraft {
    pub id: u64,
    pub kind: LocationKind,
    pub brand_name: String,
    pub country_code: String,
    pub country_name: String,
    pub state_code: String,
    pub state_name: String,
    pub lga_code: String,
    pub lga_name: String,
    pub city_code: String,
    pub city_name: String,
    pub city_region_code: String,
    pub city_region_name: String,
    pub house_number: String,
    pub street: String,
    pub landmark: String,
    pub city_region_fee: Option<f64>,
    pub pricing_source: Option<String>,
    pub media: Vec<MediaItem>,
    /// UI-transient: whether this draft has round-tripped to the backend.
    pub saved: bool,
}

impl LocationDraft {
    pub fn new(id: u64, kind: LocationKind) -> Self {
        Self {
            id,
            kind,
            brand_name: String::new(),
            country_code: String::new(),
            country_name: String::new(),
            state_code: String::new(),
            state_name: String::new(),
            lga_code: String::new(),
            lga_name: String::new(),
            city_code: String::new(),
            city_name: String::new(),
            city_region_code: String::new(),
            city_region_name: String::new(),
            house_number: String::new(),
            street: String::new(),
            landmark: String::new(),
            city_region_fee: None,
            pricing_source: None,
            media: Vec::new(),
            saved: false,
        }
    }

    pub fn has_fee(&self) -> bool {
        self.city_region_fee.is_some()
    }

    /// Applies a resolved fee only if none is present. Manual entries and
    /// earlier resolutions win permanently; there is deliberately no path
    /// that re-resolves over an existing fee.
    pub fn apply_resolved_fee(&mut self, resolved: ResolvedFee) -> bool {
        if self.has_fee() {
            return false;
        }
        self.city_region_fee = Some(resolved.fee);
        self.pricing_source = Some(resolved.source);
        true
    }

    pub fn set_manual_fee(&mut self, fee: f64) {
        self.city_region_fee = Some(fee);
        self.pricing_source = Some("Manual Entry".to_string());
    }

    /// Fields the save action refuses to proceed without.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.brand_name.trim().is_empty() {
            missing.push("brand name");
        }
        if self.country_code.is_empty() {
            missing.push("country");
        }
        if self.state_code.is_empty() {
            missing.push("state");
        }
        if self.city_code.is_empty() {
            missing.push("city");
        }
        if self.house_number.trim().is_empty() {
            missing.push("house number");
        }
        if self.street.trim().is_empty() {
            missing.push("street");
        }
        missing
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct SelectedPackage {
    pub package_id: String,
    pub title: String,
    pub cycle: BillingCycle,
    pub price: f64,
}

/// Everything the wizard accumulates across its steps.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CheckoutData {
    pub selected: Vec<SelectedPackage>,
    pub profile: OrganizationProfile,
    pub locations: Vec<LocationDraft>,
    pub next_location_id: u64,
}

impl CheckoutData {
    pub fn allocate_location_id(&mut self) -> u64 {
        let id = self.next_location_id;
        self.next_location_id += 1;
        id
    }

    pub fn total_verification_fees(&self) -> f64 {
        self.locations
            .iter()
            .filter_map(|location| location.city_region_fee)
            .sum()
    }

    pub fn subscription_total(&self) -> f64 {
        self.selected.iter().map(|package| package.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::pricing::{DEFAULT_PRICING_SOURCE, DEFAULT_VERIFICATION_FEE};

    fn resolved(fee: f64, source: &str) -> ResolvedFee {
        ResolvedFee { fee, source: source.to_string() }
    }

    #[test]
    fn resolution_fills_an_empty_fee() {
        let mut draft = LocationDraft::new(0, LocationKind::Headquarters);
        assert!(draft.apply_resolved_fee(resolved(DEFAULT_VERIFICATION_FEE, DEFAULT_PRICING_SOURCE)));
        assert_eq!(draft.city_region_fee, Some(DEFAULT_VERIFICATION_FEE));
        assert_eq!(draft.pricing_source.as_deref(), Some(DEFAULT_PRICING_SOURCE));
    }

    #[test]
    fn existing_fee_is_never_overwritten() {
        let mut draft = LocationDraft::new(0, LocationKind::Headquarters);
        draft.set_manual_fee(9000.0);
        assert!(!draft.apply_resolved_fee(resolved(4000.0, "City Rule")));
        assert_eq!(draft.city_region_fee, Some(9000.0));
        assert_eq!(draft.pricing_source.as_deref(), Some("Manual Entry"));
    }

    #[test]
    fn resolved_fee_survives_later_resolution_attempts() {
        let mut draft = LocationDraft::new(0, LocationKind::Branch);
        assert!(draft.apply_resolved_fee(resolved(7500.0, "Ikeja City Region")));
        // User picks a different city afterwards; the fee must stand.
        draft.city_code = "SUR".to_string();
        assert!(!draft.apply_resolved_fee(resolved(3000.0, "Surulere City Rule")));
        assert_eq!(draft.city_region_fee, Some(7500.0));
        assert_eq!(draft.pricing_source.as_deref(), Some("Ikeja City Region"));
    }

    #[test]
    fn required_field_listing() {
        let mut draft = LocationDraft::new(0, LocationKind::Headquarters);
        draft.brand_name = "Acme Stores".to_string();
        draft.country_code = "NG".to_string();
        draft.state_code = "LA".to_string();
        let missing = draft.missing_required_fields();
        assert_eq!(missing, vec!["city", "house number", "street"]);
    }

    #[test]
    fn location_ids_are_stable_under_removal() {
        let mut data = CheckoutData::default();
        let a = data.allocate_location_id();
        let b = data.allocate_location_id();
        data.locations.push(LocationDraft::new(a, LocationKind::Headquarters));
        data.locations.push(LocationDraft::new(b, LocationKind::Branch));
        data.locations.retain(|location| location.id != a);
        let c = data.allocate_location_id();
        assert_ne!(c, b);
        assert_eq!(data.locations[0].id, b);
    }

    #[test]
    fn gallery_capacity_tracks_verification() {
        assert!(gallery_limit(VerificationStatus::Verified) > gallery_limit(VerificationStatus::Unverified));
    }

    #[test]
    fn totals_sum_only_present_fees() {
        let mut data = CheckoutData::default();
        let a = data.allocate_location_id();
        let b = data.allocate_location_id();
        let mut first = LocationDraft::new(a, LocationKind::Headquarters);
        first.set_manual_fee(5000.0);
        let second = LocationDraft::new(b, LocationKind::Branch);
        data.locations.push(first);
        data.locations.push(second);
        assert_eq!(data.total_verification_fees(), 5000.0);
    }
}
