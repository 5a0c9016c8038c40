use anyhow::Result;
use quote_core::materials::SheetMaterial;
use serde::Serialize;

use crate::config::CliConfig;

#[derive(Serialize)]
struct CatalogEntry {
    code: &'static str,
    name: &'static str,
    density_kg_per_m2_mm: f64,
    list_price_per_m2_mm: f64,
}

pub fn execute(json: bool, config: &CliConfig) -> Result<()> {
    let entries: Vec<CatalogEntry> = SheetMaterial::ALL
        .iter()
        .map(|m| CatalogEntry {
            code: m.code(),
            name: m.display_name(),
            density_kg_per_m2_mm: m.density_kg_per_m2_mm(),
            list_price_per_m2_mm: m.list_price_per_m2_mm(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "{:<12} {:<22} {:>14} {:>18}",
        "Code", "Material", "kg/m²·mm", format!("{}/m²·mm", config.currency)
    );
    for entry in &entries {
        println!(
            "{:<12} {:<22} {:>14.2} {:>18.2}",
            entry.code, entry.name, entry.density_kg_per_m2_mm, entry.list_price_per_m2_mm
        );
    }
    Ok(())
}
