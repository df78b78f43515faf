//! Plain data records shared by the actors, the classifier and the CLI.

pub mod account;
pub mod product;
pub mod settings;

pub use account::*;
pub use product::*;
pub use settings::*;
