use serde::Serialize;

use crate::config::{PricingConfig, TierName};

/// Outcome of a configuration check: hard errors flip `is_valid`,
/// warnings only accumulate. Advisory — the calculator never consults it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Static consistency checks over a loaded configuration document.
///
/// Errors: missing base currency, empty exchange-rate table, empty
/// website-type catalog, a type missing one of the three tiers, a global
/// add-on without id or label. Warnings: tier prices not strictly
/// increasing essential < professional < ultimate, and scale modifiers
/// with a zero step (which the calculator skips).
pub fn validate_config(cfg: &PricingConfig) -> ConfigReport {
    let mut errors = vec![];
    let mut warnings = vec![];

    if cfg.base_currency.is_empty() {
        errors.push("baseCurrency is missing".to_string());
    }
    if cfg.exchange_rates.is_empty() {
        errors.push("exchangeRates table is empty".to_string());
    }
    if cfg.website_types.is_empty() {
        errors.push("websiteTypes catalog is empty".to_string());
    }

    for (i, a) in cfg.global_addons.iter().enumerate() {
        if a.id.is_empty() {
            errors.push(format!("global addon #{i} has no id"));
        }
        if a.label.is_empty() {
            errors.push(format!("global addon #{i} ({}) has no label", a.id));
        }
    }

    for (id, wt) in &cfg.website_types {
        for name in TierName::ALL {
            if wt.tier(name).is_none() {
                errors.push(format!("website type '{id}' is missing tier '{name}'"));
            }
        }
        if let (Some(e), Some(p), Some(u)) = (
            wt.tier(TierName::Essential),
            wt.tier(TierName::Professional),
            wt.tier(TierName::Ultimate),
        ) {
            if !(e.monthly_base_price < p.monthly_base_price
                && p.monthly_base_price < u.monthly_base_price)
            {
                warnings.push(format!(
                    "website type '{id}' tier prices are not strictly increasing \
                     (essential {} / professional {} / ultimate {})",
                    e.monthly_base_price, p.monthly_base_price, u.monthly_base_price
                ));
            }
        }
        for m in &wt.scale.modifiers {
            if m.step == 0 {
                warnings.push(format!(
                    "website type '{id}' scale modifier '{}' has step 0 and will never bill",
                    m.metric
                ));
            }
        }
    }

    ConfigReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn valid_config() -> PricingConfig {
        PricingConfig::from_json_str(
            r#"{
                "baseCurrency": "INR",
                "exchangeRates": { "USD": 0.012 },
                "globalAddons": [
                    { "id": "seo", "label": "SEO pack", "monthlyPrice": 999, "setupCost": 0 }
                ],
                "websiteTypes": {
                    "business": {
                        "label": "Business",
                        "tiers": {
                            "essential": { "monthlyBasePrice": 4999 },
                            "professional": { "monthlyBasePrice": 9999 },
                            "ultimate": { "monthlyBasePrice": 19999 }
                        }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn well_formed_config_passes() {
        let report = validate_config(&valid_config());
        assert!(report.is_valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn empty_document_reports_all_hard_errors() {
        let cfg = PricingConfig::from_json_str("{}").unwrap();
        let report = validate_config(&cfg);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn missing_tier_is_an_error() {
        let mut cfg = valid_config();
        cfg.website_types
            .get_mut("business")
            .unwrap()
            .tiers
            .shift_remove(&TierName::Professional);
        let report = validate_config(&cfg);
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("professional"));
    }

    #[test]
    fn addon_without_label_is_an_error() {
        let mut cfg = valid_config();
        cfg.global_addons[0].label.clear();
        let report = validate_config(&cfg);
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("no label"));
    }

    #[test]
    fn unordered_tier_prices_warn_but_stay_valid() {
        let mut cfg = valid_config();
        cfg.website_types
            .get_mut("business")
            .unwrap()
            .tiers
            .get_mut(&TierName::Professional)
            .unwrap()
            .monthly_base_price = Decimal::from(29_999);
        let report = validate_config(&cfg);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("not strictly increasing"));
    }

    #[test]
    fn zero_step_modifier_warns() {
        let mut cfg = valid_config();
        cfg.website_types
            .get_mut("business")
            .unwrap()
            .scale
            .modifiers
            .push(crate::config::ScaleModifier {
                metric: "monthlyVisits".into(),
                step: 0,
                monthly_price_add_per_step: Decimal::from(500),
            });
        let report = validate_config(&cfg);
        assert!(report.is_valid);
        assert!(report.warnings[0].contains("step 0"));
    }
}
