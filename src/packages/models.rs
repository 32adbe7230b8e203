use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    pub const ALL: [BillingCycle; 3] =
        [BillingCycle::Monthly, BillingCycle::Quarterly, BillingCycle::Yearly];

    pub fn label(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::Yearly => "Yearly",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Yearly => "yearly",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "monthly" => Some(BillingCycle::Monthly),
            "quarterly" => Some(BillingCycle::Quarterly),
            "yearly" => Some(BillingCycle::Yearly),
            _ => None,
        }
    }
}

/// Independent price per billing cycle, as served by the catalog.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct CyclePrices {
    pub monthly: f64,
    pub quarterly: f64,
    pub yearly: f64,
}

impl CyclePrices {
    pub fn for_cycle(&self, cycle: BillingCycle) -> f64 {
        match cycle {
            BillingCycle::Monthly => self.monthly,
            BillingCycle::Quarterly => self.quarterly,
            BillingCycle::Yearly => self.yearly,
        }
    }
}

/// A platform service included in a package, with the cycle the admin chose
/// for it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SelectedService {
    pub id: String,
    pub name: String,
    pub prices: CyclePrices,
    pub cycle: BillingCycle,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SubscriptionPackage {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub services: Vec<SelectedService>,
    pub total_price: f64,
    pub promo_code: String,
    pub discount_percentage: Option<f64>,
    pub promo_starts_at: String,
    pub promo_ends_at: String,
    pub max_users: u32,
    pub features: Vec<String>,
    pub note: String,
    pub is_active: bool,
}

impl Default for SubscriptionPackage {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            services: Vec::new(),
            total_price: 0.0,
            promo_code: String::new(),
            discount_percentage: None,
            promo_starts_at: String::new(),
            promo_ends_at: String::new(),
            max_users: 1,
            features: Vec::new(),
            note: String::new(),
            is_active: true,
        }
    }
}

/// Sum of each service's price at its chosen cycle, minus the discount.
/// Callers must re-run this whenever services or the discount change.
pub fn compute_total(services: &[SelectedService], discount_percentage: Option<f64>) -> f64 {
    let subtotal: f64 = services
        .iter()
        .map(|service| service.prices.for_cycle(service.cycle))
        .sum();
    match discount_percentage {
        Some(discount) => subtotal * (1.0 - discount / 100.0),
        None => subtotal,
    }
}

pub fn format_amount(amount: f64) -> String {
    let whole = amount.round() as i64;
    let mut digits = whole.abs().to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            tail
        } else {
            format!("{},{}", tail, grouped)
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{},{}", digits, grouped)
    };
    if whole < 0 {
        format!("-₦{}", grouped)
    } else {
        format!("₦{}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(monthly: f64, quarterly: f64, yearly: f64, cycle: BillingCycle) -> SelectedService {
        SelectedService {
            id: "svc".to_string(),
            name: "Service".to_string(),
            prices: CyclePrices { monthly, quarterly, yearly },
            cycle,
        }
    }

    #[test]
    fn total_uses_each_services_chosen_cycle() {
        let services = vec![
            service(1000.0, 2700.0, 10000.0, BillingCycle::Monthly),
            service(500.0, 1400.0, 5200.0, BillingCycle::Yearly),
        ];
        assert_eq!(compute_total(&services, None), 6200.0);
    }

    #[test]
    fn discount_scales_the_subtotal() {
        let services = vec![service(2000.0, 5400.0, 20000.0, BillingCycle::Quarterly)];
        assert_eq!(compute_total(&services, Some(25.0)), 5400.0 * 0.75);
    }

    #[test]
    fn discount_bounds_behave() {
        let services = vec![service(100.0, 270.0, 1000.0, BillingCycle::Monthly)];
        assert_eq!(compute_total(&services, Some(0.0)), 100.0);
        assert_eq!(compute_total(&services, Some(100.0)), 0.0);
    }

    #[test]
    fn changing_selection_changes_the_total() {
        let mut services = vec![service(1000.0, 2700.0, 10000.0, BillingCycle::Monthly)];
        let before = compute_total(&services, Some(10.0));
        services[0].cycle = BillingCycle::Quarterly;
        let after = compute_total(&services, Some(10.0));
        assert_eq!(before, 900.0);
        assert_eq!(after, 2430.0);
    }

    #[test]
    fn empty_selection_totals_zero() {
        assert_eq!(compute_total(&[], Some(50.0)), 0.0);
    }

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(format_amount(5000.0), "₦5,000");
        assert_eq!(format_amount(1250000.0), "₦1,250,000");
        assert_eq!(format_amount(999.0), "₦999");
    }
}
