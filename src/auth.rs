//! Credentials, token caching, and sandbox provisioning.

pub mod authenticator;
pub mod sandbox;
pub mod secret;
pub mod token;

pub use authenticator::*;
pub use sandbox::*;
pub use secret::*;
pub use token::*;
