//! Credential resolution: identifiers, secrets, OCI config files, strategies, and the
//! session handle they produce.

pub mod file;
pub mod id;
pub mod identity;
pub mod secret;
pub mod session;
pub mod strategy;

pub use id::*;
pub use identity::*;
pub use secret::*;
pub use session::*;
pub use strategy::*;
