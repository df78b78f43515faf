//! ActorEntity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] implementation that lets [`Product`] be
//! managed by the generic [`ResourceActor`](resource_actor::ResourceActor).
//!
//! The actor's context is a [`SharedClock`]: every timestamp a product receives
//! (`created_at`, `last_changed`) is read from it.

use super::actions::{ProductAction, ProductActionResult, QuantityChange};
use super::error::ProductError;
use crate::clock::SharedClock;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

fn validated_name(name: &str) -> Result<String, ProductError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProductError::InvalidName);
    }
    Ok(name.to_string())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = SharedClock;
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Builds an empty product. Timestamps are replaced in `on_create`.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        let name = validated_name(&params.name)?;
        Ok(Self::new(id, name, Utc::now()))
    }

    async fn on_create(&mut self, clock: &SharedClock) -> Result<(), ProductError> {
        let now = clock.now();
        self.created_at = now;
        self.last_changed = now;
        Ok(())
    }

    /// Applies edits that never touch the quantity history.
    ///
    /// # Fields Updated
    /// - `name`: trimmed, must stay non-empty
    /// - `unit`
    /// - `expiry_alert_days`
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _clock: &SharedClock,
    ) -> Result<(), ProductError> {
        // Validate before touching anything so a bad name leaves the product as it was.
        let name = update.name.as_deref().map(validated_name).transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(days) = update.expiry_alert_days {
            self.expiry_alert_days = days;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        clock: &SharedClock,
    ) -> Result<ProductActionResult, ProductError> {
        let changed = match action {
            ProductAction::Increment => {
                self.record_quantity(self.current_qty + 1.0, clock.now());
                true
            }
            ProductAction::Decrement => {
                if self.current_qty > 0.0 {
                    self.record_quantity(self.current_qty - 1.0, clock.now());
                    true
                } else {
                    false
                }
            }
            ProductAction::SetQuantity(qty) => {
                if !qty.is_finite() {
                    return Err(ProductError::InvalidQuantity(qty));
                }
                self.record_quantity(qty, clock.now());
                true
            }
            ProductAction::SetExpiry(expiry) => {
                self.expiry_date = expiry;
                return Ok(ProductActionResult::Expiry(expiry));
            }
        };

        Ok(ProductActionResult::Quantity(QuantityChange {
            previous_qty: self.previous_qty,
            current_qty: self.current_qty,
            changed,
        }))
    }
}
