//! # Row Highlight Classification
//!
//! Decides which alert, if any, a product row should show. The checks run in a
//! fixed order and the first match wins:
//!
//! 1. **Expiry**: expired, or expiring within the product's own alert window.
//! 2. **Low stock**: the last change dropped the quantity by at least
//!    `low_stock_percent` of its previous value.
//! 3. **Stale**: the quantity has not changed for `no_change_days` days.
//!
//! [`classify`] takes "now" as an argument and reads nothing else, so it is pure.
//! [`classify_now`] is the convenience wrapper that reads the wall clock once.

use crate::model::{Product, Settings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Why a product row is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertTag {
    Expiring,
    LowStock,
    Stale,
}

impl AlertTag {
    /// Translation key for the tag's label.
    pub fn label_key(self) -> &'static str {
        match self {
            AlertTag::Expiring => "alertExpiring",
            AlertTag::LowStock => "alertLowStock",
            AlertTag::Stale => "alertStale",
        }
    }
}

impl Display for AlertTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertTag::Expiring => "expiring",
            AlertTag::LowStock => "low-stock",
            AlertTag::Stale => "stale",
        };
        f.write_str(name)
    }
}

/// Background colour a presentation layer paints a row with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowColor {
    Red,
    Yellow,
    Blue,
    Default,
}

impl RowColor {
    pub fn for_tag(tag: Option<AlertTag>) -> Self {
        match tag {
            Some(AlertTag::Expiring) => RowColor::Red,
            Some(AlertTag::LowStock) => RowColor::Yellow,
            Some(AlertTag::Stale) => RowColor::Blue,
            None => RowColor::Default,
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            RowColor::Red => "#FFCDD2",
            RowColor::Yellow => "#FFF9C4",
            RowColor::Blue => "#BBDEFB",
            RowColor::Default => "#FFFFFF",
        }
    }
}

/// Signed, fractional number of days from `from` to `to`.
fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

fn expiry_check(product: &Product, now: DateTime<Utc>) -> Option<AlertTag> {
    let expiry = product.expiry_date?;
    let days_until_expiry = days_between(now, expiry);
    // Negative means already expired; that is flagged too.
    (days_until_expiry <= f64::from(product.expiry_alert_days)).then_some(AlertTag::Expiring)
}

fn low_stock_check(product: &Product, settings: &Settings) -> Option<AlertTag> {
    if settings.low_stock_percent == 0 || product.previous_qty <= 0.0 {
        return None;
    }
    let drop_percent =
        (product.previous_qty - product.current_qty) / product.previous_qty * 100.0;
    // A restock gives a negative drop and never qualifies.
    (drop_percent >= f64::from(settings.low_stock_percent)).then_some(AlertTag::LowStock)
}

fn stale_check(product: &Product, settings: &Settings, now: DateTime<Utc>) -> Option<AlertTag> {
    if settings.no_change_days == 0 {
        return None;
    }
    let days_since_change = days_between(product.last_changed, now);
    (days_since_change >= f64::from(settings.no_change_days)).then_some(AlertTag::Stale)
}

/// Classifies one product against the shared thresholds at instant `now`.
pub fn classify(product: &Product, settings: &Settings, now: DateTime<Utc>) -> Option<AlertTag> {
    expiry_check(product, now)
        .or_else(|| low_stock_check(product, settings))
        .or_else(|| stale_check(product, settings, now))
}

/// [`classify`] at the current wall-clock time.
pub fn classify_now(product: &Product, settings: &Settings) -> Option<AlertTag> {
    classify(product, settings, Utc::now())
}

/// Classifies a whole list at one shared instant. Output order follows input order.
pub fn classify_all(
    products: &[Product],
    settings: &Settings,
    now: DateTime<Utc>,
) -> Vec<Option<AlertTag>> {
    products
        .iter()
        .map(|product| classify(product, settings, now))
        .collect()
}
