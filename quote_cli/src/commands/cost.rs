use std::fs;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use quote_core::calculations::{compute_cost, CostingInput, CostingResult};
use quote_core::materials::SheetMaterial;
use serde::Serialize;
use tracing::debug;

use crate::cli::CostArgs;
use crate::config::CliConfig;

#[derive(Serialize)]
struct CostReport<'a> {
    input: &'a CostingInput,
    result: &'a CostingResult,
}

pub fn execute(args: &CostArgs, config: &CliConfig) -> Result<()> {
    let input = if let Some(path) = &args.input {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid costing input in {}", path.display()))?
    } else if args.interactive {
        prompt_input(args, config)?
    } else {
        input_from_flags(args, config)?
    };

    debug!(?input, "computing cost");
    let result = compute_cost(&input)?;

    if args.json {
        let report = CostReport {
            input: &input,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_breakdown(&input, &result, &config.currency);
    }
    Ok(())
}

fn input_from_flags(args: &CostArgs, config: &CliConfig) -> Result<CostingInput> {
    let material = SheetMaterial::from_str_flexible(&args.material)?;
    let required = |value: Option<f64>, flag: &str| {
        value.with_context(|| format!("--{} is required (or use --input / --interactive)", flag))
    };

    Ok(CostingInput {
        width_mm: required(args.width, "width")?,
        height_mm: required(args.height, "height")?,
        depth_mm: required(args.depth, "depth")?,
        thickness_mm: required(args.thickness, "thickness")?,
        quantity: args.quantity,
        material_price: args
            .material_price
            .unwrap_or_else(|| material.list_price_per_m2_mm()),
        waste_percentage: args.waste.unwrap_or(config.pricing.waste_percentage),
        profit_multiplier: args.multiplier.unwrap_or(config.pricing.profit_multiplier),
        extra_options_cost: args.extras,
        material_density: args.density.unwrap_or_else(|| material.density_kg_per_m2_mm()),
    })
}

fn prompt_input(args: &CostArgs, config: &CliConfig) -> Result<CostingInput> {
    let material = SheetMaterial::from_str_flexible(&args.material)?;
    println!("Costing a {} piece", material);
    println!();

    Ok(CostingInput {
        width_mm: prompt_f64("Width (mm) [1000]: ", 1000.0),
        height_mm: prompt_f64("Height (mm) [500]: ", 500.0),
        depth_mm: prompt_f64("Depth (mm) [10]: ", 10.0),
        thickness_mm: prompt_f64("Thickness (mm) [3]: ", 3.0),
        quantity: prompt_u32("Quantity [1]: ", 1),
        material_price: prompt_f64(
            &format!("Material price per m²·mm [{}]: ", material.list_price_per_m2_mm()),
            material.list_price_per_m2_mm(),
        ),
        waste_percentage: prompt_f64(
            &format!("Waste (%) [{}]: ", config.pricing.waste_percentage),
            config.pricing.waste_percentage,
        ),
        profit_multiplier: prompt_f64(
            &format!("Profit multiplier [{}]: ", config.pricing.profit_multiplier),
            config.pricing.profit_multiplier,
        ),
        extra_options_cost: prompt_f64("Extra options per piece [0]: ", 0.0),
        material_density: material.density_kg_per_m2_mm(),
    })
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    read_answer(prompt).map_or(default, |answer| parse_or(&answer, default))
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    read_answer(prompt).map_or(default, |answer| parse_or(&answer, default))
}

fn read_answer(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input)
}

/// Parse a typed answer; blank or unparsable answers keep the default.
fn parse_or<T: FromStr>(answer: &str, default: T) -> T {
    answer.trim().parse().unwrap_or(default)
}

fn print_breakdown(input: &CostingInput, result: &CostingResult, currency: &str) {
    println!("═══════════════════════════════════════");
    println!("  COST BREAKDOWN");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!(
        "  Piece:      {} x {} x {} mm, {} mm sheet",
        input.width_mm, input.height_mm, input.depth_mm, input.thickness_mm
    );
    println!("  Quantity:   {}", input.quantity);
    println!("  Material:   {:.2} {}/m²·mm, {:.2} kg/m²·mm", input.material_price, currency, input.material_density);
    println!();
    println!("Per piece:");
    println!("  Area:       {:.2} m²", result.area_m2);
    println!("  Weight:     {:.2} kg", result.weight_per_piece_kg);
    println!("  Material:   {:>10.2} {}", result.material_cost, currency);
    println!("  Waste:      {:>10.2} {}  ({}%)", result.waste_cost, currency, input.waste_percentage);
    println!("  Extras:     {:>10.2} {}", result.extras_cost, currency);
    println!("  Cost:       {:>10.2} {}", result.cost_without_margin, currency);
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  PRICE: {:.2} {} per piece (x{})",
        result.final_price, currency, input.profit_multiplier
    );
    println!("  Total weight: {:.2} kg", result.total_weight_kg);
    println!("═══════════════════════════════════════");
}
