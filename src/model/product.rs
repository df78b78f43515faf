//! Represents one product row in the inventory.
//!
//! # Resource Actor
//! This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
//!
//! See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])
//! - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use uuid::Uuid;

/// Expiry alert window given to new products, in days.
pub const DEFAULT_EXPIRY_ALERT_DAYS: u32 = 7;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unit of measure for a product's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "pcs")]
    Pieces,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "liter")]
    Liter,
    #[serde(rename = "meter")]
    Meter,
    #[serde(rename = "box")]
    Box,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Pieces,
        Unit::Kilogram,
        Unit::Liter,
        Unit::Meter,
        Unit::Box,
    ];

    /// The short code used in storage and on the command line.
    pub fn code(self) -> &'static str {
        match self {
            Unit::Pieces => "pcs",
            Unit::Kilogram => "kg",
            Unit::Liter => "liter",
            Unit::Meter => "meter",
            Unit::Box => "box",
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit '{0}' (expected pcs, kg, liter, meter or box)")]
pub struct UnknownUnit(pub String);

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.code() == wanted)
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub previous_qty: f64,
    pub current_qty: f64,
    pub unit: Unit,
    pub last_changed: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub expiry_alert_days: u32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with an empty history, stamped at `now`.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (normally assigned by the actor)
    /// * `name` - Display name, stored trimmed
    /// * `now` - Creation time; also the initial `last_changed`
    pub fn new(id: ProductId, name: impl AsRef<str>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.as_ref().trim().to_string(),
            previous_qty: 0.0,
            current_qty: 0.0,
            unit: Unit::default(),
            last_changed: now,
            expiry_date: None,
            expiry_alert_days: DEFAULT_EXPIRY_ALERT_DAYS,
            created_at: now,
        }
    }

    /// Applies a quantity change while keeping the one-step history.
    ///
    /// The old `current_qty` moves to `previous_qty`, the new value is clamped at
    /// zero, and `last_changed` is refreshed.
    pub fn record_quantity(&mut self, new_qty: f64, now: DateTime<Utc>) {
        self.previous_qty = self.current_qty;
        self.current_qty = new_qty.max(0.0);
        self.last_changed = now;
    }

    /// Case-insensitive substring match on the name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Payload for adding a product. Only the name is user supplied.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
}

/// Edits that never touch the quantity history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub expiry_alert_days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_new_product_defaults() {
        let product = Product::new(ProductId::random(), "  Basmati Rice ", at(100));
        assert_eq!(product.name, "Basmati Rice");
        assert_eq!(product.unit, Unit::Pieces);
        assert_eq!(product.expiry_alert_days, 7);
        assert_eq!(product.previous_qty, 0.0);
        assert_eq!(product.current_qty, 0.0);
        assert_eq!(product.created_at, product.last_changed);
        assert!(product.expiry_date.is_none());
    }

    #[test]
    fn test_record_quantity_keeps_one_step_history_and_clamps() {
        let mut product = Product::new(ProductId::random(), "Sugar", at(0));
        product.record_quantity(12.0, at(10));
        product.record_quantity(-4.0, at(20));

        assert_eq!(product.previous_qty, 12.0);
        assert_eq!(product.current_qty, 0.0);
        assert_eq!(product.last_changed, at(20));
        assert_eq!(product.created_at, at(0));
    }

    #[test]
    fn test_unit_codes_round_trip_through_from_str() {
        for unit in Unit::ALL {
            assert_eq!(unit.code().parse::<Unit>().unwrap(), unit);
        }
        assert_eq!(" KG ".parse::<Unit>().unwrap(), Unit::Kilogram);
        assert!("dozen".parse::<Unit>().is_err());
    }

    #[test]
    fn test_serialized_shape_matches_storage_format() {
        let mut product = Product::new(ProductId::random(), "Milk", at(0));
        product.unit = Unit::Liter;
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["unit"], "liter");
        assert_eq!(json["expiryAlertDays"], 7);
        assert!(json["expiryDate"].is_null());
        assert!(json.get("previousQty").is_some());
        assert!(json.get("lastChanged").is_some());
    }

    #[test]
    fn test_matches_is_case_insensitive_and_blank_matches_all() {
        let product = Product::new(ProductId::random(), "Toor Dal", at(0));
        assert!(product.matches("dal"));
        assert!(product.matches("TOOR"));
        assert!(product.matches("   "));
        assert!(!product.matches("rice"));
    }
}
