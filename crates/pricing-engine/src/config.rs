use anyhow::{Context, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root pricing configuration document.
///
/// An immutable value: engine functions borrow it and never mutate it.
/// Callers own the lifecycle (load once, share by reference or `Arc`).
/// Every field is defaulted so a partial document still deserializes and
/// `validate_config` can report what is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Currency all stored prices are denominated in (e.g. "INR")
    #[serde(default)]
    pub base_currency: String,

    /// Multiplier from the base currency, keyed by currency code
    #[serde(default)]
    pub exchange_rates: IndexMap<String, Decimal>,

    #[serde(default)]
    pub rounding_policy: RoundingPolicy,

    #[serde(default)]
    pub discount_rules: DiscountRules,

    /// Add-ons purchasable with any website type (id unique within the set)
    #[serde(default)]
    pub global_addons: Vec<Addon>,

    /// Website-type catalog, keyed by type id
    #[serde(default)]
    pub website_types: IndexMap<String, WebsiteType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// "psychological" | "none"
    pub strategy: String,
    /// Advisory: preferred endings per magnitude band. The band behavior is
    /// derived from amount magnitude, not from this table.
    #[serde(default = "default_endings")]
    pub endings: Vec<u32>,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        RoundingPolicy {
            strategy: "psychological".into(),
            endings: default_endings(),
        }
    }
}

fn default_endings() -> Vec<u32> {
    vec![9, 99, 999]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRules {
    /// Percent granted for annual billing (implied by the billing cycle)
    #[serde(default)]
    pub annual_percent: u32,
    #[serde(default)]
    pub nonprofit_percent: u32,
    #[serde(default)]
    pub education_percent: u32,
    #[serde(default)]
    pub startup_percent: u32,
    #[serde(default)]
    pub launch: LaunchWindow,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchWindow {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub percent: u32,
    /// Last calendar day the promotion applies (inclusive). Absent means
    /// the window never matches, regardless of `active`.
    #[serde(default)]
    pub until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub monthly_price: Decimal,
    #[serde(default)]
    pub setup_cost: Decimal,
    /// Billing unit, e.g. "per site", "per 1000 emails"
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteType {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scale: ScaleConfig,
    /// Keyed by tier name; a complete type carries all three
    #[serde(default)]
    pub tiers: IndexMap<TierName, TierConfig>,
}

/// The fixed tier ladder. Order matters for the price-ordering check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierName {
    Essential,
    Professional,
    Ultimate,
}

impl TierName {
    pub const ALL: [TierName; 3] = [
        TierName::Essential,
        TierName::Professional,
        TierName::Ultimate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TierName::Essential => "essential",
            TierName::Professional => "professional",
            TierName::Ultimate => "ultimate",
        }
    }
}

impl std::fmt::Display for TierName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierConfig {
    #[serde(default)]
    pub monthly_base_price: Decimal,
    #[serde(default)]
    pub setup_cost: Decimal,
    /// Estimated delivery window in days, copied verbatim into results
    #[serde(default)]
    pub delivery_days: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub limits: IndexMap<String, LimitValue>,
    /// Tier-scoped add-on catalog (id unique within the set)
    #[serde(default)]
    pub addons: Vec<Addon>,
}

/// A cap value in a tier's `limits` table: a quantity, an on/off feature
/// flag, or free text such as "unlimited".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitValue {
    Count(u64),
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Baseline included quantity per metric
    #[serde(default)]
    pub base: IndexMap<String, u64>,
    #[serde(default)]
    pub modifiers: Vec<ScaleModifier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleModifier {
    pub metric: String,
    /// Purchase increment in metric units; must be > 0
    pub step: u64,
    pub monthly_price_add_per_step: Decimal,
}

impl PricingConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid pricing config (json)")
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("invalid pricing config (yaml)")
    }

    /// Load a config document from disk. `.yaml`/`.yml` parse as YAML,
    /// anything else as JSON.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading pricing config {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    pub fn website_type(&self, id: &str) -> Option<&WebsiteType> {
        self.website_types.get(id)
    }
}

impl WebsiteType {
    pub fn tier(&self, name: TierName) -> Option<&TierConfig> {
        self.tiers.get(&name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let cfg = PricingConfig::from_json_str(
            r#"{
                "baseCurrency": "INR",
                "exchangeRates": { "USD": 0.012 },
                "websiteTypes": {
                    "business": {
                        "label": "Business",
                        "tiers": {
                            "essential": { "monthlyBasePrice": 4999, "setupCost": 9999, "deliveryDays": 7 }
                        }
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.base_currency, "INR");
        assert_eq!(cfg.rounding_policy.strategy, "psychological");
        let t = cfg.website_type("business").unwrap();
        let tier = t.tier(TierName::Essential).unwrap();
        assert_eq!(tier.monthly_base_price, Decimal::from(4999));
        assert_eq!(tier.delivery_days, 7);
        assert!(t.tier(TierName::Ultimate).is_none());
    }

    #[test]
    fn yaml_and_json_agree() {
        let json = PricingConfig::from_json_str(
            r#"{ "baseCurrency": "INR", "discountRules": { "annualPercent": 20 } }"#,
        )
        .unwrap();
        let yaml = PricingConfig::from_yaml_str(
            "baseCurrency: INR\ndiscountRules:\n  annualPercent: 20\n",
        )
        .unwrap();
        assert_eq!(json.discount_rules.annual_percent, 20);
        assert_eq!(
            json.discount_rules.annual_percent,
            yaml.discount_rules.annual_percent
        );
    }

    #[test]
    fn limits_accept_mixed_shapes() {
        let cfg = PricingConfig::from_json_str(
            r#"{
                "baseCurrency": "INR",
                "websiteTypes": {
                    "blog": {
                        "label": "Blog",
                        "tiers": {
                            "essential": {
                                "monthlyBasePrice": 999,
                                "limits": { "pages": 10, "customDomain": true, "storage": "5 GB" }
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap();
        let tier = cfg.website_types["blog"].tiers[&TierName::Essential].clone();
        assert_eq!(tier.limits["pages"], LimitValue::Count(10));
        assert_eq!(tier.limits["customDomain"], LimitValue::Flag(true));
        assert_eq!(tier.limits["storage"], LimitValue::Text("5 GB".into()));
    }

    #[test]
    fn launch_window_parses_date() {
        let cfg = PricingConfig::from_json_str(
            r#"{
                "baseCurrency": "INR",
                "discountRules": {
                    "launch": { "active": true, "percent": 10, "until": "2026-12-31" }
                }
            }"#,
        )
        .unwrap();
        let launch = cfg.discount_rules.launch;
        assert!(launch.active);
        assert_eq!(
            launch.until,
            Some(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
        );
    }
}
