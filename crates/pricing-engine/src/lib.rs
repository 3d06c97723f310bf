//! pricing-engine — WPaaS pricing calculation engine.
//!
//! A pure library: every function is a deterministic transformation over
//! an immutable [`PricingConfig`] and a per-call input. No global state,
//! no file IO, no clock reads outside the thin `*_on`-wrapper seam.
//! Callers load the configuration once and pass it into every call.
//!
//! Pipeline (see `engine::calculate_price_on`): resolve type and tier →
//! scale overages → add-ons → currency conversion → discounts → annual
//! total → psychological rounding.

pub mod api;
pub mod config;
pub mod draft;
pub mod engine;
pub mod format;
pub mod rounding;
pub mod validate;

use thiserror::Error;

pub use api::{
    AddonsCost, BillingCycle, CalculationInput, CalculationResult, DiscountOutcome, DiscountType,
    PriceBreakdown, ScaleCalculation,
};
pub use config::{Addon, PricingConfig, TierConfig, TierName, WebsiteType};
pub use draft::{ConfigDraft, ConfigEdit};
pub use engine::{
    calculate_addons_cost, calculate_discounts, calculate_discounts_on, calculate_price,
    calculate_price_on, calculate_scale_additions, convert_currency, MAX_DISCOUNT_PERCENT,
};
pub use format::format_price;
pub use rounding::{apply_psychological_rounding, round_for_display, round_money};
pub use validate::{validate_config, ConfigReport};

/// Calculation failures. Unknown add-on ids and scale metrics are not
/// errors (they contribute nothing); these are the cases the caller must
/// surface instead of substituting a fallback price.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("unknown website type: {id}")]
    UnknownWebsiteType { id: String },

    #[error("website type '{website_type}' has no tier '{tier}'")]
    UnknownTier {
        website_type: String,
        tier: TierName,
    },

    /// A draft edit named something the configuration does not contain.
    #[error("unknown reference: {what}")]
    UnknownReference { what: String },
}
