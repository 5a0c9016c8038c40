//! # Piece Costing
//!
//! Converts the dimensions and material of one box-shaped piece into a
//! cost and price breakdown.
//!
//! ## Units
//!
//! - Dimensions and sheet thickness: millimetres
//! - Area: square metres (all six faces of the box)
//! - Material price: currency per m² per mm of thickness
//! - Material density: kg per m² per mm of thickness
//!
//! Thickness multiplies area directly in millimetres. For acrylic a density
//! of 1.19 kg/(m²·mm) is the same as 1190 kg/m³.
//!
//! ## Rounding
//!
//! Every figure is rounded to 2 decimals as soon as it is computed, and
//! later steps build on the rounded figures. The cost before margin is the
//! sum of the rounded material, waste and extras costs. Area is the one
//! exception: the unrounded area feeds weight and material cost, and only
//! the returned `area_m2` is rounded.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::costing::{compute_cost, CostingInput};
//!
//! let input = CostingInput {
//!     width_mm: 1000.0,
//!     height_mm: 500.0,
//!     depth_mm: 10.0,
//!     thickness_mm: 3.0,
//!     quantity: 2,
//!     material_price: 50.0,
//!     waste_percentage: 10.0,
//!     profit_multiplier: 1.5,
//!     extra_options_cost: 20.0,
//!     material_density: 1.19,
//! };
//!
//! let result = compute_cost(&input).unwrap();
//! assert_eq!(result.area_m2, 1.03);
//! assert_eq!(result.cost_without_margin, 189.95);
//! assert_eq!(result.final_price, 284.93);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rounding::{round2_decimal, to_decimal, to_f64};

/// Square millimetres in one square metre
pub const MM2_PER_M2: u32 = 1_000_000;

/// Largest accepted width, height or depth (1 km)
pub const MAX_DIMENSION_MM: f64 = 1_000_000.0;

/// Largest accepted sheet thickness (10 m)
pub const MAX_THICKNESS_MM: f64 = 10_000.0;

/// Largest accepted number of pieces
pub const MAX_QUANTITY: u32 = 1_000_000;

/// Largest accepted material price per (m²·mm)
pub const MAX_MATERIAL_PRICE: f64 = 1_000_000.0;

/// Largest accepted waste allowance, in percent
pub const MAX_WASTE_PERCENTAGE: f64 = 1_000.0;

/// Largest accepted profit multiplier
pub const MAX_PROFIT_MULTIPLIER: f64 = 100.0;

/// Largest accepted cost of extra options per piece
pub const MAX_EXTRA_OPTIONS_COST: f64 = 1_000_000_000.0;

/// Largest accepted material density per (m²·mm)
pub const MAX_MATERIAL_DENSITY: f64 = 10_000.0;

/// Input parameters for costing one piece.
///
/// JSON accepts both the snake_case field names and the camelCase names
/// used by the order form (`materialPrice`, `wastePercentage`, ...).
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_mm": 1000.0,
///   "height_mm": 500.0,
///   "depth_mm": 10.0,
///   "thickness_mm": 3.0,
///   "quantity": 2,
///   "material_price": 50.0,
///   "waste_percentage": 10.0,
///   "profit_multiplier": 1.5,
///   "extra_options_cost": 20.0,
///   "material_density": 1.19
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostingInput {
    /// External width of the piece in mm
    #[serde(alias = "width")]
    pub width_mm: f64,

    /// External height of the piece in mm
    #[serde(alias = "height")]
    pub height_mm: f64,

    /// External depth of the piece in mm
    #[serde(alias = "depth")]
    pub depth_mm: f64,

    /// Sheet thickness in mm
    #[serde(alias = "thickness")]
    pub thickness_mm: f64,

    /// Number of pieces ordered
    pub quantity: u32,

    /// Material price per m² per mm of thickness
    #[serde(alias = "materialPrice")]
    pub material_price: f64,

    /// Allowance for offcuts, in percent of the material cost
    #[serde(alias = "wastePercentage")]
    pub waste_percentage: f64,

    /// Markup factor on the cost (1.0 = no markup, 1.5 = +50%)
    #[serde(alias = "profitMultiplier")]
    pub profit_multiplier: f64,

    /// Cost of the selected extra options for one piece
    #[serde(alias = "extraOptionsCost")]
    pub extra_options_cost: f64,

    /// Material density in kg per m² per mm of thickness
    #[serde(alias = "materialDensity")]
    pub material_density: f64,
}

/// Validated input in decimal form
struct DecimalInput {
    width: Decimal,
    height: Decimal,
    depth: Decimal,
    thickness: Decimal,
    quantity: Decimal,
    material_price: Decimal,
    waste_percentage: Decimal,
    profit_multiplier: Decimal,
    extra_options_cost: Decimal,
    material_density: Decimal,
}

impl CostingInput {
    /// Validate input parameters.
    ///
    /// Fields are checked in declaration order and the first failure is
    /// returned as `CalcError::InvalidInput` naming the field.
    pub fn validate(&self) -> CalcResult<()> {
        self.to_decimal_input().map(|_| ())
    }

    /// Total surface area of the six faces in mm² (unrounded)
    pub fn area_mm2(&self) -> f64 {
        2.0 * (self.width_mm * self.height_mm
            + self.width_mm * self.depth_mm
            + self.height_mm * self.depth_mm)
    }

    fn to_decimal_input(&self) -> CalcResult<DecimalInput> {
        let width = positive("width_mm", "Width", self.width_mm, MAX_DIMENSION_MM)?;
        let height = positive("height_mm", "Height", self.height_mm, MAX_DIMENSION_MM)?;
        let depth = positive("depth_mm", "Depth", self.depth_mm, MAX_DIMENSION_MM)?;
        let thickness = positive("thickness_mm", "Thickness", self.thickness_mm, MAX_THICKNESS_MM)?;

        if self.quantity < 1 {
            return Err(CalcError::invalid_input(
                "quantity",
                self.quantity.to_string(),
                "Quantity must be at least 1",
            ));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(CalcError::invalid_input(
                "quantity",
                self.quantity.to_string(),
                format!("Quantity must not exceed {}", MAX_QUANTITY),
            ));
        }

        let material_price = non_negative(
            "material_price",
            "Material price",
            self.material_price,
            MAX_MATERIAL_PRICE,
        )?;
        let waste_percentage = non_negative(
            "waste_percentage",
            "Waste percentage",
            self.waste_percentage,
            MAX_WASTE_PERCENTAGE,
        )?;
        let profit_multiplier = positive(
            "profit_multiplier",
            "Profit multiplier",
            self.profit_multiplier,
            MAX_PROFIT_MULTIPLIER,
        )?;
        let extra_options_cost = non_negative(
            "extra_options_cost",
            "Extra options cost",
            self.extra_options_cost,
            MAX_EXTRA_OPTIONS_COST,
        )?;
        let material_density = non_negative(
            "material_density",
            "Material density",
            self.material_density,
            MAX_MATERIAL_DENSITY,
        )?;

        Ok(DecimalInput {
            width,
            height,
            depth,
            thickness,
            quantity: Decimal::from(self.quantity),
            material_price,
            waste_percentage,
            profit_multiplier,
            extra_options_cost,
            material_density,
        })
    }
}

fn finite(field: &str, label: &str, value: f64) -> CalcResult<Decimal> {
    to_decimal(value).ok_or_else(|| {
        CalcError::invalid_input(field, value.to_string(), format!("{} must be a finite number", label))
    })
}

fn positive(field: &str, label: &str, value: f64, max: f64) -> CalcResult<Decimal> {
    let decimal = finite(field, label, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{} must be positive", label),
        ));
    }
    at_most(field, label, value, max)?;
    Ok(decimal)
}

fn non_negative(field: &str, label: &str, value: f64, max: f64) -> CalcResult<Decimal> {
    let decimal = finite(field, label, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{} cannot be negative", label),
        ));
    }
    at_most(field, label, value, max)?;
    Ok(decimal)
}

fn at_most(field: &str, label: &str, value: f64, max: f64) -> CalcResult<()> {
    if value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{} must not exceed {}", label, max),
        ));
    }
    Ok(())
}

/// Cost and price breakdown for one piece.
///
/// All figures are rounded to 2 decimals. Costs and the final price are per
/// piece; `total_weight_kg` covers the whole quantity.
///
/// ## JSON Example
///
/// ```json
/// {
///   "area_m2": 1.03,
///   "weight_per_piece_kg": 3.68,
///   "total_weight_kg": 7.36,
///   "material_cost": 154.5,
///   "waste_cost": 15.45,
///   "extras_cost": 20.0,
///   "cost_without_margin": 189.95,
///   "final_price": 284.93
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostingResult {
    /// Total surface area of the six faces (m²)
    pub area_m2: f64,

    /// Mass of one piece (kg)
    pub weight_per_piece_kg: f64,

    /// Mass of all pieces (kg)
    pub total_weight_kg: f64,

    /// Raw material cost of one piece
    pub material_cost: f64,

    /// Offcut allowance on the material cost
    pub waste_cost: f64,

    /// Extra options for one piece
    pub extras_cost: f64,

    /// material + waste + extras
    pub cost_without_margin: f64,

    /// Sale price of one piece after markup
    pub final_price: f64,
}

impl CostingResult {
    /// Markup earned on one piece
    pub fn margin(&self) -> f64 {
        crate::rounding::round2(self.final_price - self.cost_without_margin)
    }
}

/// Compute the cost breakdown of one piece.
///
/// # Arguments
///
/// * `input` - Piece dimensions, material and pricing parameters
///
/// # Returns
///
/// * `Ok(CostingResult)` - The rounded breakdown
/// * `Err(CalcError::InvalidInput)` - If any field is out of range
pub fn compute_cost(input: &CostingInput) -> CalcResult<CostingResult> {
    let d = input.to_decimal_input()?;

    // Six faces of the box
    let area_mm2 = Decimal::TWO * (d.width * d.height + d.width * d.depth + d.height * d.depth);
    let area_m2 = area_mm2 / Decimal::from(MM2_PER_M2);

    let weight_per_piece = round2_decimal(area_m2 * d.thickness * d.material_density);
    let total_weight = round2_decimal(weight_per_piece * d.quantity);

    let material_cost = round2_decimal(area_m2 * d.thickness * d.material_price);
    let waste_cost = round2_decimal(material_cost * d.waste_percentage / Decimal::ONE_HUNDRED);
    let extras_cost = round2_decimal(d.extra_options_cost);

    let cost_without_margin = round2_decimal(material_cost + waste_cost + extras_cost);
    let final_price = round2_decimal(cost_without_margin * d.profit_multiplier);

    Ok(CostingResult {
        area_m2: to_f64(round2_decimal(area_m2)),
        weight_per_piece_kg: to_f64(weight_per_piece),
        total_weight_kg: to_f64(total_weight),
        material_cost: to_f64(material_cost),
        waste_cost: to_f64(waste_cost),
        extras_cost: to_f64(extras_cost),
        cost_without_margin: to_f64(cost_without_margin),
        final_price: to_f64(final_price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> CostingInput {
        CostingInput {
            width_mm: 1000.0,
            height_mm: 500.0,
            depth_mm: 10.0,
            thickness_mm: 3.0,
            quantity: 2,
            material_price: 50.0,
            waste_percentage: 10.0,
            profit_multiplier: 1.5,
            extra_options_cost: 20.0,
            material_density: 1.19,
        }
    }

    #[test]
    fn test_reference_breakdown() {
        let result = compute_cost(&reference_input()).unwrap();

        // 2 * (500000 + 10000 + 5000) mm² = 1.03 m²
        assert_eq!(result.area_m2, 1.03);
        // 1.03 * 3 * 1.19 = 3.6771
        assert_eq!(result.weight_per_piece_kg, 3.68);
        assert_eq!(result.total_weight_kg, 7.36);
        assert_eq!(result.material_cost, 154.5);
        assert_eq!(result.waste_cost, 15.45);
        assert_eq!(result.extras_cost, 20.0);
        assert_eq!(result.cost_without_margin, 189.95);
        // 189.95 * 1.5 = 284.925
        assert_eq!(result.final_price, 284.93);
        assert_eq!(result.margin(), 94.98);
    }

    #[test]
    fn test_area_mm2() {
        assert_eq!(reference_input().area_mm2(), 1_030_000.0);
    }

    #[test]
    fn test_total_weight_uses_rounded_piece_weight() {
        let mut input = reference_input();
        input.quantity = 3;
        let result = compute_cost(&input).unwrap();
        // 3.68 * 3, not 3.6771 * 3 = 11.0313
        assert_eq!(result.total_weight_kg, 11.04);
    }

    #[test]
    fn test_area_is_rounded_only_on_output() {
        let input = CostingInput {
            width_mm: 333.0,
            height_mm: 333.0,
            depth_mm: 333.0,
            thickness_mm: 10.0,
            quantity: 1,
            material_price: 10.0,
            waste_percentage: 0.0,
            profit_multiplier: 1.0,
            extra_options_cost: 0.0,
            material_density: 0.0,
        };
        let result = compute_cost(&input).unwrap();
        // area = 6 * 110889 / 1e6 = 0.665334 m²
        assert_eq!(result.area_m2, 0.67);
        // 0.665334 * 10 * 10 = 66.5334, not 0.67 * 100 = 67.00
        assert_eq!(result.material_cost, 66.53);
    }

    #[test]
    fn test_zero_waste_and_extras() {
        let mut input = reference_input();
        input.waste_percentage = 0.0;
        input.extra_options_cost = 0.0;
        let result = compute_cost(&input).unwrap();
        assert_eq!(result.waste_cost, 0.0);
        assert_eq!(result.extras_cost, 0.0);
        assert_eq!(result.cost_without_margin, result.material_cost);
    }

    #[test]
    fn test_multiplier_of_one_keeps_cost() {
        let mut input = reference_input();
        input.profit_multiplier = 1.0;
        let result = compute_cost(&input).unwrap();
        assert_eq!(result.final_price, result.cost_without_margin);
        assert_eq!(result.margin(), 0.0);
    }

    #[test]
    fn test_extras_are_rounded() {
        let mut input = reference_input();
        input.extra_options_cost = 12.345;
        let result = compute_cost(&input).unwrap();
        assert_eq!(result.extras_cost, 12.35);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut input = reference_input();
        input.quantity = 0;
        let err = compute_cost(&input).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    fn rejected_field(mutate: impl FnOnce(&mut CostingInput)) -> Option<String> {
        let mut input = reference_input();
        mutate(&mut input);
        compute_cost(&input).err().and_then(|e| e.field().map(str::to_string))
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        assert_eq!(rejected_field(|i| i.width_mm = 0.0).as_deref(), Some("width_mm"));
        assert_eq!(rejected_field(|i| i.height_mm = -1.0).as_deref(), Some("height_mm"));
        assert_eq!(rejected_field(|i| i.depth_mm = 0.0).as_deref(), Some("depth_mm"));
        assert_eq!(rejected_field(|i| i.thickness_mm = -3.0).as_deref(), Some("thickness_mm"));
    }

    #[test]
    fn test_negative_costs_rejected() {
        assert_eq!(rejected_field(|i| i.material_price = -0.01).as_deref(), Some("material_price"));
        assert_eq!(rejected_field(|i| i.waste_percentage = -5.0).as_deref(), Some("waste_percentage"));
        assert_eq!(rejected_field(|i| i.extra_options_cost = -1.0).as_deref(), Some("extra_options_cost"));
        assert_eq!(rejected_field(|i| i.material_density = -1.19).as_deref(), Some("material_density"));
        assert_eq!(rejected_field(|i| i.profit_multiplier = 0.0).as_deref(), Some("profit_multiplier"));
    }

    #[test]
    fn test_zero_price_and_density_allowed() {
        let result = compute_cost(&{
            let mut input = reference_input();
            input.material_price = 0.0;
            input.material_density = 0.0;
            input
        })
        .unwrap();
        assert_eq!(result.material_cost, 0.0);
        assert_eq!(result.weight_per_piece_kg, 0.0);
        assert_eq!(result.cost_without_margin, 20.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(rejected_field(|i| i.width_mm = f64::NAN).as_deref(), Some("width_mm"));
        assert_eq!(
            rejected_field(|i| i.material_price = f64::INFINITY).as_deref(),
            Some("material_price")
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            rejected_field(|i| i.thickness_mm = MAX_THICKNESS_MM + 1.0).as_deref(),
            Some("thickness_mm")
        );
        assert_eq!(rejected_field(|i| i.quantity = MAX_QUANTITY + 1).as_deref(), Some("quantity"));
    }

    #[test]
    fn test_first_invalid_field_reported() {
        let field = rejected_field(|i| {
            i.width_mm = -1.0;
            i.quantity = 0;
        });
        assert_eq!(field.as_deref(), Some("width_mm"));
    }

    #[test]
    fn test_form_field_aliases() {
        let json = r#"{
            "width": 1000, "height": 500, "depth": 10, "thickness": 3,
            "quantity": 2, "materialPrice": 50, "wastePercentage": 10,
            "profitMultiplier": 1.5, "extraOptionsCost": 20, "materialDensity": 1.19
        }"#;
        let input: CostingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, reference_input());
    }

    #[test]
    fn test_result_serialization() {
        let result = compute_cost(&reference_input()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"final_price\":284.93"));
        let roundtrip: CostingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
