use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quote_core::offer::{Offer, OfferSummary};
use tracing::info;

use crate::config::CliConfig;

pub fn execute(file: &Path, json: bool, config: &CliConfig) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read offer {}", file.display()))?;
    let offer = parse_offer(&text, config)?;

    let summary = offer.price()?;
    info!(
        offer = %summary.offer_number,
        lines = summary.lines.len(),
        total = summary.total,
        "offer priced"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&offer, &summary);
    }
    Ok(())
}

/// Parse an offer; files without a `settings` table take the configured ones.
fn parse_offer(text: &str, config: &CliConfig) -> Result<Offer> {
    let mut offer = Offer::from_json(text)?;

    let has_settings = serde_json::from_str::<serde_json::Value>(text)
        .map(|value| value.get("settings").is_some())
        .unwrap_or(false);
    if !has_settings {
        offer.settings = config.offer_settings();
    }
    Ok(offer)
}

fn print_summary(offer: &Offer, summary: &OfferSummary) {
    let currency = &summary.currency;

    println!("═══════════════════════════════════════════════════════════════");
    println!("  OFFER {}", summary.offer_number);
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("Customer:    {}", offer.meta.customer.company_name);
    if let Some(number) = &offer.meta.customer.registration_number {
        println!("Reg. no.:    {}", number);
    }
    println!("Prepared by: {}", offer.meta.prepared_by);
    println!("Valid until: {}", summary.valid_until.format("%Y-%m-%d"));
    println!();
    println!(
        "{:<4} {:<24} {:<12} {:>6} {:>12} {:>12}",
        "No.", "Item", "Material", "Qty", "Unit", "Total"
    );
    for (i, line) in summary.lines.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:<12} {:>6} {:>12.2} {:>12.2}",
            i + 1,
            line.label,
            line.material.code(),
            line.quantity,
            line.breakdown.final_price,
            line.line_total
        );
    }
    println!();
    println!("{:>60} {:>12.2} {}", "Subtotal:", summary.subtotal, currency);
    println!(
        "{:>60} {:>12.2} {}",
        format!("VAT {}%:", summary.vat_percentage),
        summary.vat_amount,
        currency
    );
    println!("{:>60} {:>12.2} {}", "TOTAL:", summary.total, currency);
    println!();
    println!("Shipping weight: {:.2} kg", summary.total_weight_kg);
}
