//! # Materials Catalog
//!
//! Sheet materials the shop cuts, with the density and default list price
//! the costing engine needs.
//!
//! Both figures are per square metre per millimetre of sheet thickness, the
//! same composite unit the engine multiplies by (area m² × thickness mm).
//! A density of 1.19 kg/(m²·mm) equals 1190 kg/m³.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::materials::SheetMaterial;
//!
//! let material = SheetMaterial::from_str_flexible("plexiglass").unwrap();
//! assert_eq!(material, SheetMaterial::CastAcrylicClear);
//! assert_eq!(material.density_kg_per_m2_mm(), 1.19);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Sheet materials available for cut-to-size products
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetMaterial {
    /// Clear cast acrylic (PMMA, "plexiglass")
    #[default]
    #[serde(rename = "PMMA-CLEAR")]
    CastAcrylicClear,
    /// Opal (light-diffusing) cast acrylic
    #[serde(rename = "PMMA-OPAL")]
    CastAcrylicOpal,
    /// Extruded acrylic
    #[serde(rename = "PMMA-XT")]
    ExtrudedAcrylic,
    /// Polycarbonate
    #[serde(rename = "PC")]
    Polycarbonate,
    /// Glycol-modified PET
    #[serde(rename = "PETG")]
    Petg,
}

impl SheetMaterial {
    /// All materials for UI selection
    pub const ALL: [SheetMaterial; 5] = [
        SheetMaterial::CastAcrylicClear,
        SheetMaterial::CastAcrylicOpal,
        SheetMaterial::ExtrudedAcrylic,
        SheetMaterial::Polycarbonate,
        SheetMaterial::Petg,
    ];

    /// Catalog code (e.g., "PMMA-CLEAR", "PC")
    pub fn code(&self) -> &'static str {
        match self {
            SheetMaterial::CastAcrylicClear => "PMMA-CLEAR",
            SheetMaterial::CastAcrylicOpal => "PMMA-OPAL",
            SheetMaterial::ExtrudedAcrylic => "PMMA-XT",
            SheetMaterial::Polycarbonate => "PC",
            SheetMaterial::Petg => "PETG",
        }
    }

    /// Parse from catalog codes and common trade names
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_'], "-").as_str() {
            "PMMA-CLEAR" | "PMMA" | "ACRYLIC" | "PLEXIGLASS" | "PLEXI" | "CAST-ACRYLIC" => {
                Ok(SheetMaterial::CastAcrylicClear)
            }
            "PMMA-OPAL" | "OPAL" | "OPAL-ACRYLIC" => Ok(SheetMaterial::CastAcrylicOpal),
            "PMMA-XT" | "XT" | "EXTRUDED-ACRYLIC" => Ok(SheetMaterial::ExtrudedAcrylic),
            "PC" | "POLYCARBONATE" => Ok(SheetMaterial::Polycarbonate),
            "PETG" | "PET-G" => Ok(SheetMaterial::Petg),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SheetMaterial::CastAcrylicClear => "Cast acrylic, clear",
            SheetMaterial::CastAcrylicOpal => "Cast acrylic, opal",
            SheetMaterial::ExtrudedAcrylic => "Extruded acrylic",
            SheetMaterial::Polycarbonate => "Polycarbonate",
            SheetMaterial::Petg => "PETG",
        }
    }

    /// Density in kg per m² per mm of thickness
    pub fn density_kg_per_m2_mm(&self) -> f64 {
        match self {
            SheetMaterial::CastAcrylicClear
            | SheetMaterial::CastAcrylicOpal
            | SheetMaterial::ExtrudedAcrylic => 1.19,
            SheetMaterial::Polycarbonate => 1.20,
            SheetMaterial::Petg => 1.27,
        }
    }

    /// Default list price per m² per mm of thickness
    pub fn list_price_per_m2_mm(&self) -> f64 {
        match self {
            SheetMaterial::CastAcrylicClear => 50.0,
            SheetMaterial::CastAcrylicOpal => 55.0,
            SheetMaterial::ExtrudedAcrylic => 38.0,
            SheetMaterial::Polycarbonate => 62.0,
            SheetMaterial::Petg => 34.0,
        }
    }
}

impl std::fmt::Display for SheetMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
