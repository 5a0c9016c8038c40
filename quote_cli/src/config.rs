//! Shop configuration read from `quote.toml`.
//!
//! ```toml
//! currency = "EUR"
//! vat_percentage = 20.0
//! validity_days = 30
//!
//! [pricing]
//! waste_percentage = 10.0
//! profit_multiplier = 1.5
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use quote_core::calculations::PricingDefaults;
use quote_core::offer::OfferSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// ISO 4217 currency code
    pub currency: String,

    /// VAT rate in percent
    pub vat_percentage: f64,

    /// Days an offer holds
    pub validity_days: u32,

    /// Waste allowance and markup
    pub pricing: PricingDefaults,
}

impl Default for CliConfig {
    fn default() -> Self {
        let settings = OfferSettings::default();
        CliConfig {
            currency: settings.currency,
            vat_percentage: settings.vat_percentage,
            validity_days: settings.validity_days,
            pricing: settings.pricing,
        }
    }
}

impl CliConfig {
    /// Offer settings carrying this configuration
    pub fn offer_settings(&self) -> OfferSettings {
        OfferSettings {
            currency: self.currency.clone(),
            vat_percentage: self.vat_percentage,
            validity_days: self.validity_days,
            pricing: self.pricing,
        }
    }
}

/// Load the configuration file; a missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<CliConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(CliConfig::default());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let cfg = parse_config(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    info!(path = %path.display(), currency = %cfg.currency, "loaded configuration");
    Ok(cfg)
}

pub fn parse_config(text: &str) -> anyhow::Result<CliConfig> {
    let cfg: CliConfig = toml::from_str(text)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

fn validate_config(cfg: &CliConfig) -> anyhow::Result<()> {
    if cfg.currency.trim().is_empty() {
        bail!("currency cannot be empty");
    }
    if !cfg.vat_percentage.is_finite() || !(0.0..=100.0).contains(&cfg.vat_percentage) {
        bail!("vat_percentage must be between 0 and 100, got {}", cfg.vat_percentage);
    }
    if !cfg.pricing.waste_percentage.is_finite() || cfg.pricing.waste_percentage < 0.0 {
        bail!(
            "pricing.waste_percentage cannot be negative, got {}",
            cfg.pricing.waste_percentage
        );
    }
    if !cfg.pricing.profit_multiplier.is_finite() || cfg.pricing.profit_multiplier <= 0.0 {
        bail!(
            "pricing.profit_multiplier must be positive, got {}",
            cfg.pricing.profit_multiplier
        );
    }
    Ok(())
}
