use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::api::{
    AddonsCost, BillingCycle, CalculationInput, CalculationResult, DiscountOutcome, DiscountType,
    PriceBreakdown, ScaleCalculation,
};
use crate::config::{Addon, DiscountRules, PricingConfig, ScaleConfig};
use crate::rounding::{round_for_display, round_money};
use crate::PricingError;

/// Hard ceiling on the combined discount percentage, however many
/// discount sources stack.
pub const MAX_DISCOUNT_PERCENT: u32 = 50;

// ---------------------------------------------------------------------------
// Scale calculator
// ---------------------------------------------------------------------------

/// One record per modifier whose current value exceeds the included
/// baseline. Metrics at or below baseline produce no record; metrics with
/// no matching modifier are ignored. Overage is billed in whole steps,
/// rounded up.
pub fn calculate_scale_additions(
    scale: &ScaleConfig,
    current_values: &IndexMap<String, u64>,
) -> Vec<ScaleCalculation> {
    let mut out = vec![];
    for m in &scale.modifiers {
        // A zero step cannot be billed; the validator flags it.
        if m.step == 0 {
            continue;
        }
        let base = scale.base.get(&m.metric).copied().unwrap_or(0);
        let current = current_values.get(&m.metric).copied().unwrap_or(base);
        if current <= base {
            continue;
        }
        let additional_units = (current - base).div_ceil(m.step);
        let total_cost = Decimal::from(additional_units) * m.monthly_price_add_per_step;
        out.push(ScaleCalculation {
            metric: m.metric.clone(),
            base,
            current,
            additional_units,
            cost_per_unit: m.monthly_price_add_per_step,
            total_cost,
        });
    }
    out
}

// ---------------------------------------------------------------------------
// Add-on aggregator
// ---------------------------------------------------------------------------

/// Sum monthly and setup cost for the selected ids against one catalog.
/// Ids with no catalog entry are skipped, so stale client-side selections
/// never fail a calculation.
pub fn calculate_addons_cost(catalog: &[Addon], selected_ids: &[String]) -> AddonsCost {
    let mut cost = AddonsCost::default();
    for id in selected_ids {
        if let Some(a) = catalog.iter().find(|a| &a.id == id) {
            cost.monthly += a.monthly_price;
            cost.setup += a.setup_cost;
        }
    }
    cost
}

// ---------------------------------------------------------------------------
// Discount resolver
// ---------------------------------------------------------------------------

/// Resolve the combined discount against `base_price` as of `today`.
///
/// Annual billing contributes its percent implicitly; each requested type
/// contributes its configured percent; launch contributes only while the
/// window is active and `today` is on or before `until`. The sum is
/// clamped at [`MAX_DISCOUNT_PERCENT`] before the amount is computed, so
/// rounding happens once on the aggregate.
pub fn calculate_discounts_on(
    rules: &DiscountRules,
    base_price: Decimal,
    discounts: &[DiscountType],
    cycle: BillingCycle,
    today: NaiveDate,
) -> DiscountOutcome {
    let mut percent: u32 = 0;
    if cycle == BillingCycle::Annual {
        percent += rules.annual_percent;
    }
    for d in discounts {
        percent += match d {
            DiscountType::Nonprofit => rules.nonprofit_percent,
            DiscountType::Education => rules.education_percent,
            DiscountType::Startup => rules.startup_percent,
            DiscountType::Launch => {
                let in_window = rules.launch.active
                    && rules.launch.until.map(|u| today <= u).unwrap_or(false);
                if in_window {
                    rules.launch.percent
                } else {
                    0
                }
            }
        };
    }
    let percent = percent.min(MAX_DISCOUNT_PERCENT);
    let amount = round_money(base_price * Decimal::from(percent) / Decimal::from(100));
    DiscountOutcome { percent, amount }
}

/// [`calculate_discounts_on`] evaluated against today's date.
pub fn calculate_discounts(
    rules: &DiscountRules,
    base_price: Decimal,
    discounts: &[DiscountType],
    cycle: BillingCycle,
) -> DiscountOutcome {
    calculate_discounts_on(rules, base_price, discounts, cycle, Utc::now().date_naive())
}

// ---------------------------------------------------------------------------
// Currency converter
// ---------------------------------------------------------------------------

/// Convert a base-currency amount into the requested region's currency.
/// Identity for the base currency itself and for codes with no registered
/// rate; otherwise multiply and round half-up to whole units.
pub fn convert_currency(cfg: &PricingConfig, amount: Decimal, region: Option<&str>) -> Decimal {
    let Some(code) = region else {
        return amount;
    };
    if code == cfg.base_currency {
        return amount;
    }
    match cfg.exchange_rates.get(code) {
        Some(rate) => round_money(amount * rate),
        None => amount,
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Price one configuration as of `today`. Pure: same inputs, same result.
///
/// Pipeline order matters and is fixed: base + scale + add-ons accumulate
/// in the base currency, the running totals convert to the target
/// currency, discounts apply to the converted monthly, the annual total
/// is the discounted monthly times twelve, and display rounding runs
/// independently over monthly, annual, and setup.
pub fn calculate_price_on(
    cfg: &PricingConfig,
    input: &CalculationInput,
    today: NaiveDate,
) -> Result<CalculationResult, PricingError> {
    let wt = cfg
        .website_type(&input.website_type)
        .ok_or_else(|| PricingError::UnknownWebsiteType {
            id: input.website_type.clone(),
        })?;
    let tier = wt.tier(input.tier).ok_or_else(|| PricingError::UnknownTier {
        website_type: input.website_type.clone(),
        tier: input.tier,
    })?;

    let scale_records = calculate_scale_additions(&wt.scale, &input.scale);
    let scale_total: Decimal = scale_records.iter().map(|r| r.total_cost).sum();

    let type_addons = calculate_addons_cost(&tier.addons, &input.addon_ids);
    let global_addons = calculate_addons_cost(&cfg.global_addons, &input.global_addon_ids);

    let monthly_base = tier.monthly_base_price
        + scale_total
        + type_addons.monthly
        + global_addons.monthly;
    let setup_base = tier.setup_cost + type_addons.setup + global_addons.setup;

    let region = input.region.as_deref();
    let monthly = convert_currency(cfg, monthly_base, region);
    let setup = convert_currency(cfg, setup_base, region);

    let discount = calculate_discounts_on(
        &cfg.discount_rules,
        monthly,
        &input.discount_types,
        input.billing_cycle,
        today,
    );
    let discounted_monthly = monthly - discount.amount;
    let annual = discounted_monthly * Decimal::from(12);

    let policy = &cfg.rounding_policy;
    let rounded_monthly = round_for_display(policy, discounted_monthly);
    let rounded_annual = round_for_display(policy, annual);
    let rounded_setup = round_for_display(policy, setup);
    let effective_monthly_under_annual = match input.billing_cycle {
        BillingCycle::Annual => round_money(rounded_annual / Decimal::from(12)),
        BillingCycle::Monthly => rounded_monthly,
    };

    Ok(CalculationResult {
        monthly: rounded_monthly,
        annual: rounded_annual,
        effective_monthly_under_annual,
        setup_cost: rounded_setup,
        currency: region.unwrap_or(&cfg.base_currency).to_string(),
        breakdown: PriceBreakdown {
            base_monthly: convert_currency(cfg, tier.monthly_base_price, region),
            scale_additions: convert_currency(cfg, scale_total, region),
            type_addons_monthly: convert_currency(cfg, type_addons.monthly, region),
            global_addons_monthly: convert_currency(cfg, global_addons.monthly, region),
            type_addons_setup: convert_currency(cfg, type_addons.setup, region),
            global_addons_setup: convert_currency(cfg, global_addons.setup, region),
            discount_percent: discount.percent,
            discount_amount: discount.amount,
        },
        delivery_days: tier.delivery_days,
        limits: tier.limits.clone(),
        features: tier.features.clone(),
    })
}

/// [`calculate_price_on`] evaluated against today's date.
pub fn calculate_price(
    cfg: &PricingConfig,
    input: &CalculationInput,
) -> Result<CalculationResult, PricingError> {
    calculate_price_on(cfg, input, Utc::now().date_naive())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
