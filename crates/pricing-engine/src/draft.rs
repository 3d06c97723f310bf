use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::{CalculationInput, CalculationResult};
use crate::config::{PricingConfig, TierName};
use crate::engine::calculate_price;
use crate::PricingError;

/// One editable field of the configuration. A closed set: the admin
/// preview tooling edits numbers through these operations instead of
/// patching arbitrary paths into the document.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ConfigEdit {
    #[serde(rename_all = "camelCase")]
    TierMonthlyPrice {
        website_type: String,
        tier: TierName,
        value: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    TierSetupCost {
        website_type: String,
        tier: TierName,
        value: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    TierDeliveryDays {
        website_type: String,
        tier: TierName,
        value: u32,
    },
    #[serde(rename_all = "camelCase")]
    ScaleStep {
        website_type: String,
        metric: String,
        value: u64,
    },
    #[serde(rename_all = "camelCase")]
    ScalePricePerStep {
        website_type: String,
        metric: String,
        value: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    ExchangeRate { currency: String, value: Decimal },
    #[serde(rename_all = "camelCase")]
    DiscountPercent { rule: DiscountRuleField, value: u32 },
    #[serde(rename_all = "camelCase")]
    LaunchWindow {
        active: bool,
        percent: u32,
        until: Option<NaiveDate>,
    },
    #[serde(rename_all = "camelCase")]
    GlobalAddonMonthlyPrice { addon_id: String, value: Decimal },
    #[serde(rename_all = "camelCase")]
    TierAddonMonthlyPrice {
        website_type: String,
        tier: TierName,
        addon_id: String,
        value: Decimal,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountRuleField {
    Annual,
    Nonprofit,
    Education,
    Startup,
}

/// A private, editable copy of the configuration for live previews.
/// The shared configuration is never touched; drafts are discarded after
/// the preview, so concurrent calculations always see the canonical
/// document.
#[derive(Debug, Clone)]
pub struct ConfigDraft {
    config: PricingConfig,
}

impl ConfigDraft {
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Apply one edit, failing on references to types, tiers, metrics,
    /// currencies, or add-ons the draft does not contain.
    pub fn apply(&mut self, edit: &ConfigEdit) -> Result<(), PricingError> {
        match edit {
            ConfigEdit::TierMonthlyPrice {
                website_type,
                tier,
                value,
            } => self.tier_mut(website_type, *tier)?.monthly_base_price = *value,
            ConfigEdit::TierSetupCost {
                website_type,
                tier,
                value,
            } => self.tier_mut(website_type, *tier)?.setup_cost = *value,
            ConfigEdit::TierDeliveryDays {
                website_type,
                tier,
                value,
            } => self.tier_mut(website_type, *tier)?.delivery_days = *value,
            ConfigEdit::ScaleStep {
                website_type,
                metric,
                value,
            } => self.modifier_mut(website_type, metric)?.step = *value,
            ConfigEdit::ScalePricePerStep {
                website_type,
                metric,
                value,
            } => self.modifier_mut(website_type, metric)?.monthly_price_add_per_step = *value,
            ConfigEdit::ExchangeRate { currency, value } => {
                self.config.exchange_rates.insert(currency.clone(), *value);
            }
            ConfigEdit::DiscountPercent { rule, value } => {
                let rules = &mut self.config.discount_rules;
                match rule {
                    DiscountRuleField::Annual => rules.annual_percent = *value,
                    DiscountRuleField::Nonprofit => rules.nonprofit_percent = *value,
                    DiscountRuleField::Education => rules.education_percent = *value,
                    DiscountRuleField::Startup => rules.startup_percent = *value,
                }
            }
            ConfigEdit::LaunchWindow {
                active,
                percent,
                until,
            } => {
                let launch = &mut self.config.discount_rules.launch;
                launch.active = *active;
                launch.percent = *percent;
                launch.until = *until;
            }
            ConfigEdit::GlobalAddonMonthlyPrice { addon_id, value } => {
                let addon = self
                    .config
                    .global_addons
                    .iter_mut()
                    .find(|a| &a.id == addon_id)
                    .ok_or_else(|| PricingError::UnknownReference {
                        what: format!("global addon '{addon_id}'"),
                    })?;
                addon.monthly_price = *value;
            }
            ConfigEdit::TierAddonMonthlyPrice {
                website_type,
                tier,
                addon_id,
                value,
            } => {
                let tier_cfg = self.tier_mut(website_type, *tier)?;
                let addon = tier_cfg
                    .addons
                    .iter_mut()
                    .find(|a| &a.id == addon_id)
                    .ok_or_else(|| PricingError::UnknownReference {
                        what: format!("addon '{addon_id}' in tier '{tier}' of '{website_type}'"),
                    })?;
                addon.monthly_price = *value;
            }
        }
        Ok(())
    }

    pub fn apply_all(&mut self, edits: &[ConfigEdit]) -> Result<(), PricingError> {
        for e in edits {
            self.apply(e)?;
        }
        Ok(())
    }

    /// Price an input against the draft.
    pub fn preview(&self, input: &CalculationInput) -> Result<CalculationResult, PricingError> {
        calculate_price(&self.config, input)
    }

    fn tier_mut(
        &mut self,
        website_type: &str,
        tier: TierName,
    ) -> Result<&mut crate::config::TierConfig, PricingError> {
        let wt = self
            .config
            .website_types
            .get_mut(website_type)
            .ok_or_else(|| PricingError::UnknownWebsiteType {
                id: website_type.to_string(),
            })?;
        wt.tiers.get_mut(&tier).ok_or(PricingError::UnknownTier {
            website_type: website_type.to_string(),
            tier,
        })
    }

    fn modifier_mut(
        &mut self,
        website_type: &str,
        metric: &str,
    ) -> Result<&mut crate::config::ScaleModifier, PricingError> {
        let wt = self
            .config
            .website_types
            .get_mut(website_type)
            .ok_or_else(|| PricingError::UnknownWebsiteType {
                id: website_type.to_string(),
            })?;
        wt.scale
            .modifiers
            .iter_mut()
            .find(|m| m.metric == metric)
            .ok_or_else(|| PricingError::UnknownReference {
                what: format!("scale metric '{metric}' on '{website_type}'"),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BillingCycle;
    use indexmap::IndexMap;

    fn config() -> PricingConfig {
        crate::engine::tests::test_config()
    }

    fn input() -> CalculationInput {
        CalculationInput {
            website_type: "business".into(),
            tier: TierName::Professional,
            scale: IndexMap::new(),
            addon_ids: vec![],
            global_addon_ids: vec![],
            billing_cycle: BillingCycle::Monthly,
            discount_types: vec![],
            region: None,
        }
    }

    #[test]
    fn edited_draft_prices_differently() {
        let cfg = config();
        let mut draft = ConfigDraft::new(&cfg);
        draft
            .apply(&ConfigEdit::TierMonthlyPrice {
                website_type: "business".into(),
                tier: TierName::Professional,
                value: Decimal::from(12_500),
            })
            .unwrap();
        let edited = draft.preview(&input()).unwrap();
        assert_eq!(edited.breakdown.base_monthly, Decimal::from(12_500));
    }

    #[test]
    fn shared_config_is_untouched() {
        let cfg = config();
        let mut draft = ConfigDraft::new(&cfg);
        draft
            .apply(&ConfigEdit::DiscountPercent {
                rule: DiscountRuleField::Annual,
                value: 40,
            })
            .unwrap();
        assert_eq!(draft.config().discount_rules.annual_percent, 40);
        assert_eq!(cfg.discount_rules.annual_percent, 20);
    }

    #[test]
    fn unknown_references_fail() {
        let cfg = config();
        let mut draft = ConfigDraft::new(&cfg);
        let err = draft
            .apply(&ConfigEdit::TierMonthlyPrice {
                website_type: "spaceship".into(),
                tier: TierName::Essential,
                value: Decimal::ONE,
            })
            .unwrap_err();
        assert!(matches!(err, PricingError::UnknownWebsiteType { .. }));

        let err = draft
            .apply(&ConfigEdit::GlobalAddonMonthlyPrice {
                addon_id: "no-such".into(),
                value: Decimal::ONE,
            })
            .unwrap_err();
        assert!(matches!(err, PricingError::UnknownReference { .. }));
    }

    #[test]
    fn edits_deserialize_from_tagged_json() {
        let edit: ConfigEdit = serde_json::from_str(
            r#"{ "op": "scaleStep", "websiteType": "business", "metric": "monthlyVisits", "value": 50000 }"#,
        )
        .unwrap();
        let mut draft = ConfigDraft::new(&config());
        draft.apply(&edit).unwrap();
        assert_eq!(
            draft.config().website_types["business"].scale.modifiers[0].step,
            50_000
        );
    }
}
