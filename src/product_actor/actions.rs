//! Custom actions for the Product actor.
//!
//! Every quantity mutation goes through an action so the one-step history
//! (`previous_qty`, `current_qty`, `last_changed`) is maintained in one place:
//! [`Product::record_quantity`](crate::model::Product::record_quantity).
//!
//! See [`impl ActorEntity for Product`](crate::model::Product#impl-ActorEntity-for-Product)
//! for the handler.

use chrono::{DateTime, Utc};

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Adds one unit.
    Increment,
    /// Removes one unit. Does nothing when the quantity is already zero.
    Decrement,
    /// Replaces the quantity with a directly entered value, clamped at zero.
    ///
    /// # Errors
    /// Fails with `InvalidQuantity` for NaN or infinite values.
    SetQuantity(f64),
    /// Sets or clears the expiry date. Quantity history is untouched.
    SetExpiry(Option<DateTime<Utc>>),
}

/// The quantity history after a quantity action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityChange {
    pub previous_qty: f64,
    pub current_qty: f64,
    /// False when the action was a no-op (decrement at zero).
    pub changed: bool,
}

/// Results from ProductActions.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Result from Increment, Decrement and SetQuantity.
    Quantity(QuantityChange),
    /// Result from SetExpiry: the expiry date now stored.
    Expiry(Option<DateTime<Utc>>),
}
