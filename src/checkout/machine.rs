use std::fmt;

use crate::checkout::models::{CheckoutData, LocationKind};

/// The five wizard steps. Transitions go through [`advance`] and [`back`]
/// only, so every precondition lives in one place.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CheckoutStep {
    Packages,
    Profile,
    Locations,
    LocationPayment,
    Payment,
}

impl CheckoutStep {
    pub fn title(&self) -> &'static str {
        match self {
            CheckoutStep::Packages => "Choose Packages",
            CheckoutStep::Profile => "Organization Profile",
            CheckoutStep::Locations => "Business Locations",
            CheckoutStep::LocationPayment => "Verification Payment",
            CheckoutStep::Payment => "Payment",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StepError {
    NoPackageSelected,
    ProfileIncomplete,
    NoLocation,
    UnverifiedLocationLimit,
    UnverifiedNeedsHeadquarters,
    LocationIncomplete(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::NoPackageSelected => {
                write!(f, "Select at least one package and billing cycle to continue")
            }
            StepError::ProfileIncomplete => {
                write!(f, "Choose a business type and profile visibility to continue")
            }
            StepError::NoLocation => write!(f, "Add at least one business location to continue"),
            StepError::UnverifiedLocationLimit => write!(
                f,
                "Unverified organizations can register exactly one location. Remove the extra locations or verify your organization first"
            ),
            StepError::UnverifiedNeedsHeadquarters => write!(
                f,
                "Unverified organizations must register their headquarters as the single location"
            ),
            StepError::LocationIncomplete(fields) => {
                write!(f, "Complete the required location fields: {}", fields)
            }
        }
    }
}

/// Validates the current step against the accumulated data and returns the
/// next step. Branches: private profiles skip location entry entirely;
/// unverified organizations skip the verification payment.
pub fn advance(step: CheckoutStep, data: &CheckoutData) -> Result<CheckoutStep, StepError> {
    match step {
        CheckoutStep::Packages => {
            if data.selected.is_empty() {
                Err(StepError::NoPackageSelected)
            } else {
                Ok(CheckoutStep::Profile)
            }
        }
        CheckoutStep::Profile => {
            if !data.profile.is_complete() {
                Err(StepError::ProfileIncomplete)
            } else if data.profile.is_public() {
                Ok(CheckoutStep::Locations)
            } else {
                Ok(CheckoutStep::Payment)
            }
        }
        CheckoutStep::Locations => {
            check_locations(data)?;
            if data.profile.is_verified() {
                Ok(CheckoutStep::LocationPayment)
            } else {
                Ok(CheckoutStep::Payment)
            }
        }
        CheckoutStep::LocationPayment => Ok(CheckoutStep::Payment),
        CheckoutStep::Payment => Ok(CheckoutStep::Payment),
    }
}

/// The immediate predecessor on the realized path for this organization.
pub fn back(step: CheckoutStep, data: &CheckoutData) -> Option<CheckoutStep> {
    match step {
        CheckoutStep::Packages => None,
        CheckoutStep::Profile => Some(CheckoutStep::Packages),
        CheckoutStep::Locations => Some(CheckoutStep::Profile),
        CheckoutStep::LocationPayment => Some(CheckoutStep::Locations),
        CheckoutStep::Payment => {
            if !data.profile.is_public() {
                Some(CheckoutStep::Profile)
            } else if data.profile.is_verified() {
                Some(CheckoutStep::LocationPayment)
            } else {
                Some(CheckoutStep::Locations)
            }
        }
    }
}

/// Location gate shared by [`advance`] and the save action: unverified
/// organizations get exactly one headquarters location, and every saved
/// draft must carry its required fields.
pub fn check_locations(data: &CheckoutData) -> Result<(), StepError> {
    if data.locations.is_empty() {
        return Err(StepError::NoLocation);
    }
    if !data.profile.is_verified() {
        if data.locations.len() > 1 {
            return Err(StepError::UnverifiedLocationLimit);
        }
        if data.locations[0].kind != LocationKind::Headquarters {
            return Err(StepError::UnverifiedNeedsHeadquarters);
        }
    }
    for location in &data.locations {
        let missing = location.missing_required_fields();
        if !missing.is_empty() {
            return Err(StepError::LocationIncomplete(missing.join(", ")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::models::{
        BusinessType, LocationDraft, OrganizationProfile, SelectedPackage, VerificationStatus,
    };
    use crate::packages::models::BillingCycle;

    fn package() -> SelectedPackage {
        SelectedPackage {
            package_id: "starter".to_string(),
            title: "Starter".to_string(),
            cycle: BillingCycle::Monthly,
            price: 15000.0,
        }
    }

    fn complete_location(id: u64, kind: LocationKind) -> LocationDraft {
        let mut draft = LocationDraft::new(id, kind);
        draft.brand_name = "Acme Stores".to_string();
        draft.country_code = "NG".to_string();
        draft.state_code = "LA".to_string();
        draft.city_code = "IKJ".to_string();
        draft.house_number = "12b".to_string();
        draft.street = "Allen Avenue".to_string();
        draft
    }

    fn data(public: bool, status: VerificationStatus) -> CheckoutData {
        CheckoutData {
            selected: vec![package()],
            profile: OrganizationProfile {
                business_type: Some(BusinessType::Registered),
                is_public_profile: Some(public),
                verification_status: status,
            },
            locations: Vec::new(),
            next_location_id: 0,
        }
    }

    fn walk(mut data: CheckoutData, add_locations: usize) -> Vec<CheckoutStep> {
        for i in 0..add_locations {
            data.locations.push(complete_location(i as u64, LocationKind::Headquarters));
        }
        let mut path = vec![CheckoutStep::Packages];
        let mut step = CheckoutStep::Packages;
        while step != CheckoutStep::Payment {
            step = advance(step, &data).unwrap();
            path.push(step);
        }
        path
    }

    #[test]
    fn public_verified_path_includes_location_payment() {
        let path = walk(data(true, VerificationStatus::Verified), 1);
        assert_eq!(
            path,
            vec![
                CheckoutStep::Packages,
                CheckoutStep::Profile,
                CheckoutStep::Locations,
                CheckoutStep::LocationPayment,
                CheckoutStep::Payment,
            ]
        );
    }

    #[test]
    fn public_unverified_path_skips_location_payment() {
        let path = walk(data(true, VerificationStatus::Unverified), 1);
        assert_eq!(
            path,
            vec![
                CheckoutStep::Packages,
                CheckoutStep::Profile,
                CheckoutStep::Locations,
                CheckoutStep::Payment,
            ]
        );
    }

    #[test]
    fn private_path_skips_locations_entirely() {
        let path = walk(data(false, VerificationStatus::Unverified), 0);
        assert_eq!(
            path,
            vec![CheckoutStep::Packages, CheckoutStep::Profile, CheckoutStep::Payment]
        );
    }

    #[test]
    fn empty_selection_blocks_the_first_transition() {
        let mut d = data(true, VerificationStatus::Verified);
        d.selected.clear();
        assert_eq!(
            advance(CheckoutStep::Packages, &d),
            Err(StepError::NoPackageSelected)
        );
    }

    #[test]
    fn incomplete_profile_blocks() {
        let mut d = data(true, VerificationStatus::Verified);
        d.profile.business_type = None;
        assert_eq!(
            advance(CheckoutStep::Profile, &d),
            Err(StepError::ProfileIncomplete)
        );
    }

    #[test]
    fn unverified_org_with_two_locations_is_blocked() {
        let mut d = data(true, VerificationStatus::Unverified);
        d.locations.push(complete_location(0, LocationKind::Headquarters));
        d.locations.push(complete_location(1, LocationKind::Branch));
        assert_eq!(
            advance(CheckoutStep::Locations, &d),
            Err(StepError::UnverifiedLocationLimit)
        );
    }

    #[test]
    fn unverified_org_single_location_must_be_headquarters() {
        let mut d = data(true, VerificationStatus::Unverified);
        d.locations.push(complete_location(0, LocationKind::Branch));
        assert_eq!(
            advance(CheckoutStep::Locations, &d),
            Err(StepError::UnverifiedNeedsHeadquarters)
        );
    }

    #[test]
    fn verified_org_may_have_branches() {
        let mut d = data(true, VerificationStatus::Verified);
        d.locations.push(complete_location(0, LocationKind::Headquarters));
        d.locations.push(complete_location(1, LocationKind::Branch));
        assert_eq!(
            advance(CheckoutStep::Locations, &d),
            Ok(CheckoutStep::LocationPayment)
        );
    }

    #[test]
    fn incomplete_location_reports_missing_fields() {
        let mut d = data(true, VerificationStatus::Verified);
        let mut draft = complete_location(0, LocationKind::Headquarters);
        draft.street = String::new();
        d.locations.push(draft);
        match advance(CheckoutStep::Locations, &d) {
            Err(StepError::LocationIncomplete(fields)) => assert!(fields.contains("street")),
            other => panic!("expected LocationIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn back_follows_the_realized_path() {
        let verified = data(true, VerificationStatus::Verified);
        assert_eq!(
            back(CheckoutStep::Payment, &verified),
            Some(CheckoutStep::LocationPayment)
        );

        let unverified = data(true, VerificationStatus::Unverified);
        assert_eq!(
            back(CheckoutStep::Payment, &unverified),
            Some(CheckoutStep::Locations)
        );

        let private = data(false, VerificationStatus::Unverified);
        assert_eq!(back(CheckoutStep::Payment, &private), Some(CheckoutStep::Profile));
        assert_eq!(back(CheckoutStep::Packages, &private), None);
    }
}
