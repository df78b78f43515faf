//! # Stockroom
//!
//! > **Inventory tracking for small shops, with alerts that tell you which shelf to look at.**
//!
//! Every product keeps a one-step quantity history (previous and current), an
//! optional expiry date and the time of its last quantity change. From those, the
//! [`highlight`] classifier decides whether a row is **expiring**, **low on stock**
//! or **stale**, in that order of precedence.
//!
//! ## 🏗️ Architecture
//!
//! Each collection (products, accounts) lives in its own
//! [`ResourceActor`](resource_actor::ResourceActor): a Tokio task that owns the data
//! and processes requests one at a time. Callers talk to it through typed clients
//! and never see the channels.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`highlight`], [`model`])
//! - **Role**: Plain records and the pure row classifier.
//! - **Key items**: [`classify`](highlight::classify), [`Product`](model::Product),
//!   [`Settings`](model::Settings).
//!
//! ### 2. The Actors ([`product_actor`], [`account_actor`])
//! - **Role**: [`ActorEntity`](resource_actor::ActorEntity) implementations. Quantity
//!   changes are actions so the history rule lives in one place.
//!
//! ### 3. The Interface ([`clients`], [`auth`], [`settings`])
//! - **Role**: Typed APIs over the actors plus the session and threshold services.
//! - **Key items**: [`ProductClient`](clients::ProductClient),
//!   [`AuthService`](auth::AuthService), [`SettingsStore`](settings::SettingsStore).
//!
//! ### 4. The Plumbing ([`storage`], [`i18n`], [`clock`], [`config`])
//! - **Role**: JSON key-value persistence, English/Hindi labels, an injectable
//!   time source, runtime configuration.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - **Role**: Starts both actors against one store and shuts them down.
//! - **Key items**: [`InventorySystem`](lifecycle::InventorySystem).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! stockroom signup --owner-name Asha --shop-name "Asha Stores" \
//!     --shop-address "12 MG Road" --shop-category grocery \
//!     --email asha@example.com --password secret
//! stockroom add "Toor Dal"
//! stockroom set-qty 3f2a 10
//! RUST_LOG=debug stockroom list
//! ```

pub mod account_actor;
pub mod auth;
pub mod clients;
pub mod clock;
pub mod config;
pub mod highlight;
pub mod i18n;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod settings;
pub mod storage;
