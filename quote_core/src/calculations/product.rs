//! # Product Configuration
//!
//! What a customer actually picks in the order form: the box dimensions, a
//! catalog material, a quantity and any extra options. A `ProductConfig`
//! resolves into a [`CostingInput`] once the shop's pricing defaults (waste
//! allowance and markup) are known.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::product::{PricingDefaults, ProductConfig, ProductOption};
//! use quote_core::materials::SheetMaterial;
//!
//! let config = ProductConfig::new("Display case", 1000.0, 500.0, 10.0, 3.0, 2)
//!     .with_material(SheetMaterial::CastAcrylicClear)
//!     .with_option(ProductOption::new("Edge polishing", 20.0));
//!
//! let result = config.compute(&PricingDefaults::default()).unwrap();
//! assert_eq!(result.final_price, 284.93);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::costing::{compute_cost, CostingInput, CostingResult};
use crate::errors::{CalcError, CalcResult};
use crate::materials::SheetMaterial;
use crate::rounding::round2;

/// Shop-wide pricing parameters applied to every product.
///
/// Missing fields fall back to the defaults (10% waste, 1.5 markup).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingDefaults {
    /// Offcut allowance in percent of material cost
    pub waste_percentage: f64,

    /// Markup factor on cost (1.5 = +50%)
    pub profit_multiplier: f64,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        PricingDefaults {
            waste_percentage: 10.0,
            profit_multiplier: 1.5,
        }
    }
}

/// An extra option priced per piece (polishing, engraving, hinges, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option name shown on the offer
    pub name: String,

    /// Cost added to each piece
    pub unit_cost: f64,
}

impl ProductOption {
    pub fn new(name: impl Into<String>, unit_cost: f64) -> Self {
        ProductOption {
            name: name.into(),
            unit_cost,
        }
    }
}

/// A configured product, as submitted from the order form.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Display case",
///   "width_mm": 1000.0,
///   "height_mm": 500.0,
///   "depth_mm": 10.0,
///   "thickness_mm": 3.0,
///   "quantity": 2,
///   "material": "PMMA-CLEAR",
///   "options": [{ "name": "Edge polishing", "unit_cost": 20.0 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    /// User label for this product (e.g., "Display case")
    pub label: String,

    /// External width in mm
    pub width_mm: f64,

    /// External height in mm
    pub height_mm: f64,

    /// External depth in mm
    pub depth_mm: f64,

    /// Sheet thickness in mm
    pub thickness_mm: f64,

    /// Number of pieces
    pub quantity: u32,

    /// Catalog material
    #[serde(default)]
    pub material: SheetMaterial,

    /// Negotiated price per (m²·mm); the catalog list price when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_price: Option<f64>,

    /// Selected extra options
    #[serde(default)]
    pub options: Vec<ProductOption>,
}

impl ProductConfig {
    /// Create a clear-acrylic product with no options.
    pub fn new(
        label: impl Into<String>,
        width_mm: f64,
        height_mm: f64,
        depth_mm: f64,
        thickness_mm: f64,
        quantity: u32,
    ) -> Self {
        ProductConfig {
            label: label.into(),
            width_mm,
            height_mm,
            depth_mm,
            thickness_mm,
            quantity,
            material: SheetMaterial::default(),
            material_price: None,
            options: Vec::new(),
        }
    }

    /// Set the material (builder pattern)
    pub fn with_material(mut self, material: SheetMaterial) -> Self {
        self.material = material;
        self
    }

    /// Override the catalog price (builder pattern)
    pub fn with_material_price(mut self, price: f64) -> Self {
        self.material_price = Some(price);
        self
    }

    /// Add an extra option (builder pattern)
    pub fn with_option(mut self, option: ProductOption) -> Self {
        self.options.push(option);
        self
    }

    /// Material price in effect for this product
    pub fn effective_material_price(&self) -> f64 {
        self.material_price
            .unwrap_or_else(|| self.material.list_price_per_m2_mm())
    }

    /// Sum of the selected options for one piece
    pub fn extra_options_cost(&self) -> f64 {
        round2(self.options.iter().map(|o| o.unit_cost).sum())
    }

    /// Resolve into engine input using the shop's pricing defaults.
    pub fn to_costing_input(&self, pricing: &PricingDefaults) -> CostingInput {
        CostingInput {
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            depth_mm: self.depth_mm,
            thickness_mm: self.thickness_mm,
            quantity: self.quantity,
            material_price: self.effective_material_price(),
            waste_percentage: pricing.waste_percentage,
            profit_multiplier: pricing.profit_multiplier,
            extra_options_cost: self.extra_options_cost(),
            material_density: self.material.density_kg_per_m2_mm(),
        }
    }

    /// Check each selected option before the costs are summed.
    ///
    /// The first bad option is reported as `options[<i>].unit_cost`.
    pub fn validate_options(&self) -> CalcResult<()> {
        for (i, option) in self.options.iter().enumerate() {
            let reason = if !option.unit_cost.is_finite() {
                "Option cost must be a finite number"
            } else if option.unit_cost < 0.0 {
                "Option cost cannot be negative"
            } else {
                continue;
            };
            return Err(CalcError::invalid_input(
                format!("options[{}].unit_cost", i),
                option.unit_cost.to_string(),
                reason,
            ));
        }
        Ok(())
    }

    /// Resolve and cost in one step.
    pub fn compute(&self, pricing: &PricingDefaults) -> CalcResult<CostingResult> {
        self.validate_options()?;
        compute_cost(&self.to_costing_input(pricing))
    }
}
