//! # quote_core - Cut-to-Size Costing Engine
//!
//! `quote_core` turns a configured sheet-material product (box dimensions,
//! material, options, quantity) into a cost and price breakdown, and totals
//! those breakdowns into customer offers. All inputs and outputs are
//! JSON-serializable so a form, a document renderer or a mailer can consume
//! them directly.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Exact money**: Currency and weight figures are rounded on decimals
//! - **Rich Errors**: Validation errors name the offending field
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::calculations::{compute_cost, CostingInput};
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
//! assert_eq!(result.final_price, 284.93);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Costing engine and product configuration
//! - [`rounding`] - Two-decimal rounding used by every figure
//! - [`materials`] - Sheet material catalog
//! - [`offer`] - Customer offers and their priced summaries
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod offer;
pub mod rounding;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute_cost, CostingInput, CostingResult};
pub use errors::{CalcError, CalcResult};
pub use offer::{CustomerInfo, Offer, OfferSettings, OfferSummary};
pub use rounding::round2;
