use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{LimitValue, TierName};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Website type id from the catalog
    pub website_type: String,
    pub tier: TierName,
    /// Current metric values, replacing the type's included baselines
    #[serde(default)]
    pub scale: IndexMap<String, u64>,
    /// Selected tier-scoped add-on ids
    #[serde(default)]
    pub addon_ids: Vec<String>,
    /// Selected global add-on ids
    #[serde(default)]
    pub global_addon_ids: Vec<String>,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    /// Requested discount categories (annual is implied by the cycle)
    #[serde(default)]
    pub discount_types: Vec<DiscountType>,
    /// Target currency code; absent quotes in the base currency
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Nonprofit,
    Education,
    Startup,
    Launch,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Final monthly price after discounts and display rounding
    pub monthly: Decimal,
    /// Final annual price, rounded independently of `monthly`
    pub annual: Decimal,
    /// What one month costs when prepaying the rounded annual price
    pub effective_monthly_under_annual: Decimal,
    pub setup_cost: Decimal,
    /// Currency the amounts are quoted in
    pub currency: String,
    pub breakdown: PriceBreakdown,
    pub delivery_days: u32,
    pub limits: IndexMap<String, LimitValue>,
    pub features: Vec<String>,
}

/// Pre-discount, pre-rounding components, quoted in the target currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_monthly: Decimal,
    pub scale_additions: Decimal,
    pub type_addons_monthly: Decimal,
    pub global_addons_monthly: Decimal,
    pub type_addons_setup: Decimal,
    pub global_addons_setup: Decimal,
    pub discount_percent: u32,
    pub discount_amount: Decimal,
}

/// One chargeable scale overage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleCalculation {
    pub metric: String,
    /// Included baseline
    pub base: u64,
    /// Requested quantity
    pub current: u64,
    pub additional_units: u64,
    pub cost_per_unit: Decimal,
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AddonsCost {
    pub monthly: Decimal,
    pub setup: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscountOutcome {
    pub percent: u32,
    pub amount: Decimal,
}
