//! # Offers
//!
//! An `Offer` collects the products quoted to one customer and prices them
//! into an [`OfferSummary`] that document and mail collaborators render.
//!
//! ## Structure
//!
//! ```text
//! Offer
//! ├── meta: OfferMetadata (version, offer number, customer, timestamps)
//! ├── settings: OfferSettings (currency, VAT, validity, pricing defaults)
//! └── items: HashMap<Uuid, ProductConfig> (all quoted products)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::ProductConfig;
//! use quote_core::offer::{CustomerInfo, Offer};
//!
//! let mut offer = Offer::new("Sales Desk", "Q-2025-014", CustomerInfo::new("Acme Retail"));
//! offer.add_item(ProductConfig::new("Display case", 1000.0, 500.0, 10.0, 3.0, 2));
//!
//! let summary = offer.price().unwrap();
//! assert_eq!(summary.lines.len(), 1);
//! assert!(summary.total > summary.subtotal);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::{CostingResult, PricingDefaults, ProductConfig};
use crate::errors::{CalcError, CalcResult};
use crate::materials::SheetMaterial;
use crate::rounding::{round2_decimal, to_decimal, to_f64};

/// Current schema version for offer JSON
pub const SCHEMA_VERSION: &str = "0.1.0";

/// An offer to one customer.
///
/// Items are stored in a flat UUID-keyed map so a line can be edited or
/// removed without disturbing the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    /// Offer metadata (version, number, customer)
    pub meta: OfferMetadata,

    /// Currency, VAT and pricing parameters
    #[serde(default)]
    pub settings: OfferSettings,

    /// All quoted products, keyed by UUID
    #[serde(default)]
    pub items: HashMap<Uuid, ProductConfig>,
}

impl Offer {
    /// Create a new empty offer.
    ///
    /// # Arguments
    ///
    /// * `prepared_by` - Name of the salesperson
    /// * `offer_number` - Offer reference (e.g., "Q-2025-014")
    /// * `customer` - Customer details
    pub fn new(
        prepared_by: impl Into<String>,
        offer_number: impl Into<String>,
        customer: CustomerInfo,
    ) -> Self {
        let now = Utc::now();
        Offer {
            meta: OfferMetadata {
                version: SCHEMA_VERSION.to_string(),
                offer_number: offer_number.into(),
                prepared_by: prepared_by.into(),
                customer,
                created: now,
                modified: now,
            },
            settings: OfferSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a product to the offer.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: ProductConfig) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a product by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<ProductConfig> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a product by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&ProductConfig> {
        self.items.get(id)
    }

    /// Get a mutable reference to a product by UUID.
    ///
    /// Marks the offer as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut ProductConfig> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Last day the quoted prices hold
    pub fn valid_until(&self) -> DateTime<Utc> {
        self.meta.created + Duration::days(i64::from(self.settings.validity_days))
    }

    /// Whether the offer has lapsed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.valid_until()
    }

    /// Price every item and total the offer.
    ///
    /// Lines are ordered by label. Each line total is the rounded unit price
    /// times the quantity; VAT is applied once to the subtotal.
    ///
    /// # Returns
    ///
    /// * `Ok(OfferSummary)` - Priced lines and totals
    /// * `Err(CalcError::MissingField)` - The offer has no items
    /// * `Err(CalcError::InvalidInput)` - An item or the VAT rate is invalid;
    ///   item fields are reported as `"<label>.<field>"`
    pub fn price(&self) -> CalcResult<OfferSummary> {
        if self.items.is_empty() {
            return Err(CalcError::missing_field("items"));
        }
        self.settings.validate()?;

        let mut entries: Vec<(&Uuid, &ProductConfig)> = self.items.iter().collect();
        entries.sort_by(|a, b| a.1.label.cmp(&b.1.label).then_with(|| a.0.cmp(b.0)));

        let mut lines = Vec::with_capacity(entries.len());
        let mut subtotal = Decimal::ZERO;
        let mut total_weight = Decimal::ZERO;

        for (id, item) in entries {
            let breakdown = item
                .compute(&self.settings.pricing)
                .map_err(|e| e.in_context(&item.label))?;

            let line_total = round2_decimal(exact(breakdown.final_price) * Decimal::from(item.quantity));
            subtotal += line_total;
            total_weight += exact(breakdown.total_weight_kg);

            debug!(
                offer = %self.meta.offer_number,
                item = %item.label,
                unit_price = breakdown.final_price,
                quantity = item.quantity,
                "priced offer line"
            );

            lines.push(OfferLine {
                id: *id,
                label: item.label.clone(),
                material: item.material,
                quantity: item.quantity,
                breakdown,
                line_total: to_f64(line_total),
            });
        }

        let vat_amount = round2_decimal(subtotal * exact(self.settings.vat_percentage) / Decimal::ONE_HUNDRED);
        let total = subtotal + vat_amount;

        debug!(
            offer = %self.meta.offer_number,
            lines = lines.len(),
            total = %total,
            "priced offer"
        );

        Ok(OfferSummary {
            offer_number: self.meta.offer_number.clone(),
            currency: self.settings.currency.clone(),
            lines,
            subtotal: to_f64(subtotal),
            vat_percentage: self.settings.vat_percentage,
            vat_amount: to_f64(vat_amount),
            total: to_f64(total),
            total_weight_kg: to_f64(round2_decimal(total_weight)),
            valid_until: self.valid_until(),
        })
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }

    /// Parse an offer from JSON and check its schema version.
    ///
    /// # Returns
    ///
    /// * `Ok(Offer)` - Successfully parsed offer
    /// * `Err(CalcError::VersionMismatch)` - Version is incompatible
    /// * `Err(CalcError::SerializationError)` - Invalid JSON
    pub fn from_json(json: &str) -> CalcResult<Offer> {
        let offer: Offer = serde_json::from_str(json)
            .map_err(|e| CalcError::serialization(format!("Invalid offer JSON: {}", e)))?;
        validate_version(&offer.meta.version)?;
        Ok(offer)
    }
}

/// Rounded figures are finite by construction
fn exact(value: f64) -> Decimal {
    to_decimal(value).unwrap_or_default()
}

/// Offer metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Offer reference number
    pub offer_number: String,

    /// Salesperson who prepared the offer
    pub prepared_by: String,

    /// Customer the offer is addressed to
    pub customer: CustomerInfo,

    /// When the offer was created
    pub created: DateTime<Utc>,

    /// When the offer was last modified
    pub modified: DateTime<Utc>,
}

/// Customer details, usually pre-filled from a company registry lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Registered company name
    pub company_name: String,

    /// Company registration or tax number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Contact email the offer is sent to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CustomerInfo {
    pub fn new(company_name: impl Into<String>) -> Self {
        CustomerInfo {
            company_name: company_name.into(),
            ..Default::default()
        }
    }
}

/// Offer-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSettings {
    /// ISO 4217 currency code (e.g., "EUR")
    pub currency: String,

    /// VAT rate in percent, applied to the subtotal
    pub vat_percentage: f64,

    /// Days the quoted prices hold
    pub validity_days: u32,

    /// Waste allowance and markup for every item
    pub pricing: PricingDefaults,
}

impl OfferSettings {
    /// Validate the VAT rate.
    pub fn validate(&self) -> CalcResult<()> {
        let vat = self.vat_percentage;
        if !vat.is_finite() || !(0.0..=100.0).contains(&vat) {
            return Err(CalcError::invalid_input(
                "settings.vat_percentage",
                vat.to_string(),
                "VAT must be between 0 and 100 percent",
            ));
        }
        Ok(())
    }
}

impl Default for OfferSettings {
    fn default() -> Self {
        OfferSettings {
            currency: "EUR".to_string(),
            vat_percentage: 20.0,
            validity_days: 30,
            pricing: PricingDefaults::default(),
        }
    }
}

/// One priced line of an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferLine {
    /// Item UUID in the offer
    pub id: Uuid,

    /// Item label
    pub label: String,

    /// Material the item is cut from
    pub material: SheetMaterial,

    /// Number of pieces
    pub quantity: u32,

    /// Per-piece breakdown from the costing engine
    pub breakdown: CostingResult,

    /// Unit price × quantity
    pub line_total: f64,
}

/// Priced offer, ready for a document or mail collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSummary {
    pub offer_number: String,
    pub currency: String,
    pub lines: Vec<OfferLine>,

    /// Sum of line totals, before VAT
    pub subtotal: f64,
    pub vat_percentage: f64,
    pub vat_amount: f64,

    /// Subtotal plus VAT
    pub total: f64,

    /// Shipping weight of all pieces (kg)
    pub total_weight_kg: f64,

    pub valid_until: DateTime<Utc>,
}

/// Validate that an offer version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts = parse_version(file_version).ok_or_else(mismatch)?;
    let current_parts = parse_version(SCHEMA_VERSION).ok_or_else(mismatch)?;

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

/// Dotted numeric version; `None` if any part is not a number.
fn parse_version(version: &str) -> Option<Vec<u32>> {
    version
        .split('.')
        .map(|p| p.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::ProductOption;

    fn sample_offer() -> Offer {
        let mut offer = Offer::new("Sales Desk", "Q-2025-014", CustomerInfo::new("Acme Retail"));
        offer.add_item(
            ProductConfig::new("Display case", 1000.0, 500.0, 10.0, 3.0, 2)
                .with_option(ProductOption::new("Edge polishing", 20.0)),
        );
        offer.add_item(
            ProductConfig::new("Lid", 200.0, 200.0, 5.0, 4.0, 4).with_material(SheetMaterial::Petg),
        );
        offer
    }

    #[test]
    fn test_offer_creation() {
        let offer = Offer::new("Sales Desk", "Q-1", CustomerInfo::new("Acme Retail"));
        assert_eq!(offer.meta.prepared_by, "Sales Desk");
        assert_eq!(offer.meta.customer.company_name, "Acme Retail");
        assert_eq!(offer.meta.version, SCHEMA_VERSION);
        assert_eq!(offer.settings, OfferSettings::default());
    }

    #[test]
    fn test_add_remove_item() {
        let mut offer = Offer::new("Sales Desk", "Q-1", CustomerInfo::new("Acme Retail"));
        let id = offer.add_item(ProductConfig::new("Box", 100.0, 100.0, 100.0, 3.0, 1));
        assert_eq!(offer.item_count(), 1);
        assert!(offer.get_item(&id).is_some());

        offer.get_item_mut(&id).unwrap().quantity = 5;
        assert_eq!(offer.get_item(&id).unwrap().quantity, 5);

        assert!(offer.remove_item(&id).is_some());
        assert_eq!(offer.item_count(), 0);
        assert!(offer.remove_item(&id).is_none());
    }

    #[test]
    fn test_price_offer() {
        let summary = sample_offer().price().unwrap();

        assert_eq!(summary.currency, "EUR");
        assert_eq!(summary.lines.len(), 2);

        // Sorted by label
        let case = &summary.lines[0];
        assert_eq!(case.label, "Display case");
        assert_eq!(case.breakdown.final_price, 284.93);
        assert_eq!(case.line_total, 569.86);

        // 0.084 m² * 4 mm * 34 = 11.424 -> 11.42, waste 1.14, cost 12.56, * 1.5
        let lid = &summary.lines[1];
        assert_eq!(lid.label, "Lid");
        assert_eq!(lid.breakdown.cost_without_margin, 12.56);
        assert_eq!(lid.breakdown.final_price, 18.84);
        assert_eq!(lid.line_total, 75.36);

        assert_eq!(summary.subtotal, 645.22);
        // 645.22 * 0.20 = 129.044
        assert_eq!(summary.vat_amount, 129.04);
        assert_eq!(summary.total, 774.26);
        // 7.36 + 4 * 0.43
        assert_eq!(summary.total_weight_kg, 9.08);
    }

    #[test]
    fn test_empty_offer_rejected() {
        let offer = Offer::new("Sales Desk", "Q-1", CustomerInfo::new("Acme Retail"));
        assert_eq!(offer.price().unwrap_err(), CalcError::missing_field("items"));
    }

    #[test]
    fn test_invalid_item_reported_with_label() {
        let mut offer = sample_offer();
        offer.add_item(ProductConfig::new("Shelf", 300.0, 0.0, 200.0, 5.0, 1));
        let err = offer.price().unwrap_err();
        assert_eq!(err.field(), Some("Shelf.height_mm"));
    }

    #[test]
    fn test_invalid_vat_rejected() {
        let mut offer = sample_offer();
        offer.settings.vat_percentage = -1.0;
        let err = offer.price().unwrap_err();
        assert_eq!(err.field(), Some("settings.vat_percentage"));
    }

    #[test]
    fn test_zero_vat() {
        let mut offer = sample_offer();
        offer.settings.vat_percentage = 0.0;
        let summary = offer.price().unwrap();
        assert_eq!(summary.vat_amount, 0.0);
        assert_eq!(summary.total, summary.subtotal);
    }

    #[test]
    fn test_validity() {
        let offer = sample_offer();
        assert_eq!(offer.valid_until(), offer.meta.created + Duration::days(30));
        assert!(!offer.is_expired_at(offer.meta.created));
        assert!(offer.is_expired_at(offer.meta.created + Duration::days(31)));
    }

    #[test]
    fn test_json_roundtrip() {
        let offer = sample_offer();
        let json = offer.to_json().unwrap();
        assert!(json.contains("Acme Retail"));
        assert!(json.contains("PMMA-CLEAR"));

        let roundtrip = Offer::from_json(&json).unwrap();
        assert_eq!(roundtrip.item_count(), 2);
        assert_eq!(roundtrip.price().unwrap().total, 774.26);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Offer::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_from_json_rejects_newer_schema() {
        let mut offer = sample_offer();
        offer.meta.version = "0.2.0".to_string();
        let json = serde_json::to_string(&offer).unwrap();
        let err = Offer::from_json(&json).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
        assert!(validate_version("").is_err());
    }

    #[test]
    fn test_version_with_non_numeric_part_rejected() {
        for version in ["x.0.1", "0.x.1", "0.1.beta", "0..1"] {
            let err = validate_version(version).unwrap_err();
            assert_eq!(
                err,
                CalcError::VersionMismatch {
                    file_version: version.to_string(),
                    expected_version: SCHEMA_VERSION.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_negative_option_reported_with_label() {
        let mut offer = sample_offer();
        offer.add_item(
            ProductConfig::new("Shelf", 300.0, 200.0, 200.0, 5.0, 1)
                .with_option(ProductOption::new("Polishing", 30.0))
                .with_option(ProductOption::new("Discount", -10.0)),
        );
        let err = offer.price().unwrap_err();
        assert_eq!(err.field(), Some("Shelf.options[1].unit_cost"));
    }
}
