//! Credential records, redacted secrets, and the on-disk location an authenticator manages.

pub mod location;
pub mod record;
pub mod secret;

pub use location::*;
pub use record::*;
pub use secret::*;
