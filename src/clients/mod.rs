//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).

pub mod account_client;
pub mod product_client;

pub use account_client::*;
pub use product_client::*;
