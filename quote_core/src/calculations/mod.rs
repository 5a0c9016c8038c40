//! # Costing Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function `Input -> Result<*Result, CalcError>`
//!
//! ## Available Calculations
//!
//! - [`costing`] - Cost and price breakdown of one box-shaped piece
//! - [`product`] - Catalog-based product configuration feeding [`costing`]

pub mod costing;
pub mod product;

// Re-export commonly used types
pub use costing::{compute_cost, CostingInput, CostingResult};
pub use product::{PricingDefaults, ProductConfig, ProductOption};
