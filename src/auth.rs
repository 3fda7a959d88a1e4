//! Credential models shared by the client and the token stores.

pub mod credential;
pub mod secret;

pub use credential::*;
pub use secret::*;
