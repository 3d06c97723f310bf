//! `wpaas` CLI — price WPaaS website configurations from the terminal.
//!
//! Usage:
//!   wpaas price    --config <pricing.json> --input <json|file|-> [--date YYYY-MM-DD]
//!   wpaas types    --config <pricing.json>
//!   wpaas validate --config <pricing.json>
//!   wpaas format   --amount <n> [--currency <code>]
//!   wpaas quote    --input <json|file|-> [--base <url>]
//!
//! `price`, `types`, `validate`, and `format` run the engine locally;
//! `quote` submits the input to a running portal's /v1/quotes.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::PathBuf;

use pricing_engine::{
    calculate_price_on, format_price, validate_config, CalculationInput, PricingConfig, TierName,
};

#[derive(Parser)]
#[command(name = "wpaas", version, about = "WPaaS pricing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a calculation input against a local config document
    Price {
        /// Pricing config document (.json or .yaml)
        #[arg(long)]
        config: PathBuf,
        /// Calculation input: inline JSON, a file path, or - for stdin
        #[arg(long)]
        input: String,
        /// Evaluate launch-window discounts as of this date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List website types and their tier prices
    Types {
        #[arg(long)]
        config: PathBuf,
    },
    /// Check a config document and print the report; exit 1 on hard errors
    Validate {
        #[arg(long)]
        config: PathBuf,
    },
    /// Format an amount the way the engine displays it
    Format {
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "INR")]
        currency: String,
    },
    /// Submit a calculation input to a running portal as a quote
    Quote {
        /// Calculation input: inline JSON, a file path, or - for stdin
        #[arg(long)]
        input: String,
        /// Portal base URL (default: $WPAAS_BASE_URL or http://127.0.0.1:8080)
        #[arg(long)]
        base: Option<String>,
    },
}

/// Read a JSON payload from `-` (stdin), a file path, or inline text.
fn read_input(spec: &str) -> Result<String> {
    if spec == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    if std::path::Path::new(spec).exists() {
        return std::fs::read_to_string(spec).with_context(|| format!("reading {spec}"));
    }
    Ok(spec.to_string())
}

fn parse_input(spec: &str) -> Result<CalculationInput> {
    let text = read_input(spec)?;
    serde_json::from_str(&text).context("invalid calculation input")
}

fn portal_base(base: Option<String>) -> String {
    base.or_else(|| std::env::var("WPAAS_BASE_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:8080".into())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Price {
            config,
            input,
            date,
        } => {
            let cfg = PricingConfig::from_path(&config)?;
            let input = parse_input(&input)?;
            let today = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let result = calculate_price_on(&cfg, &input, today)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Types { config } => {
            let cfg = PricingConfig::from_path(&config)?;
            for (id, wt) in &cfg.website_types {
                println!("{id} - {}", wt.label);
                for name in TierName::ALL {
                    if let Some(t) = wt.tier(name) {
                        println!(
                            "  {:<12} {}/mo  (setup {}, ~{} days)",
                            name.as_str(),
                            format_price(t.monthly_base_price, &cfg.base_currency),
                            format_price(t.setup_cost, &cfg.base_currency),
                            t.delivery_days
                        );
                    }
                }
            }
        }
        Commands::Validate { config } => {
            let cfg = PricingConfig::from_path(&config)?;
            let report = validate_config(&cfg);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_valid {
                std::process::exit(1);
            }
        }
        Commands::Format { amount, currency } => {
            println!("{}", format_price(amount, &currency));
        }
        Commands::Quote { input, base } => {
            let payload: serde_json::Value = serde_json::from_str(&read_input(&input)?)
                .context("invalid calculation input")?;
            let url = format!("{}/v1/quotes", portal_base(base));
            let resp = reqwest::Client::new()
                .post(&url)
                .json(&payload)
                .send()
                .await?
                .error_for_status()
                .map_err(|e| anyhow!("portal: {e}"))?;
            let v: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
