use std::sync::Arc;

use pricing_engine::{validate_config, PricingConfig};

use crate::store::{FsStore, SubmissionStore};

// ---------------------------------------------------------------------------
// AppState — shared resources for every request handler
//
// The pricing configuration is loaded once and shared read-only. Form
// submissions and quotes persist through the SubmissionStore trait; the
// calculate path never touches the store.
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct Config {
    pub pricing_path: String,
    pub data_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            pricing_path: std::env::var("WPAAS_PRICING_PATH")
                .unwrap_or_else(|_| "./configs/pricing.json".into()),
            data_dir: std::env::var("WPAAS_DATA_DIR")
                .unwrap_or_else(|_| "./data/submissions".into()),
        }
    }
}

pub struct AppState {
    pub cfg: Config,
    pub pricing: Arc<PricingConfig>,
    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Arc<Self>> {
        let cfg = Config::from_env();

        let pricing = PricingConfig::from_path(&cfg.pricing_path)?;

        // Advisory check: log everything, abort nothing.
        let report = validate_config(&pricing);
        for w in &report.warnings {
            tracing::warn!("pricing config: {w}");
        }
        for e in &report.errors {
            tracing::error!("pricing config: {e}");
        }
        tracing::info!(
            "pricing config loaded from {} ({} website types, valid={})",
            cfg.pricing_path,
            pricing.website_types.len(),
            report.is_valid
        );

        let store: Arc<dyn SubmissionStore> = Arc::new(FsStore::new(&cfg.data_dir));
        tracing::info!("submission store: fs ({})", cfg.data_dir);

        Ok(Arc::new(Self {
            cfg,
            pricing: Arc::new(pricing),
            store,
        }))
    }
}
