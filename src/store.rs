//! Read contract for persisted credential records plus the built-in backends.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, credential::CredentialRecord};

/// Source of the current credential record.
///
/// The freshness policy only reads through this contract; writes belong to the authenticator.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Loads and parses the current record.
	fn load(&self) -> Result<CredentialRecord, ReadFailure>;

	/// Human-readable location used in diagnostics.
	fn describe(&self) -> String;
}

/// Reasons a credential record could not be obtained.
///
/// The policy never propagates these; they only surface through
/// [`Freshness`](crate::policy::Freshness).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ReadFailure {
	/// Nothing has been persisted yet.
	#[error("No credential record exists at {location}.")]
	Missing {
		/// Store location.
		location: String,
	},
	/// The backend failed while reading.
	#[error("Failed to read {location}: {message}.")]
	Io {
		/// Store location.
		location: String,
		/// Human-readable error payload.
		message: String,
	},
	/// The payload is not a valid credential record (bad JSON, missing `token`, wrong types).
	#[error("Credential record at {location} is malformed: {message}.")]
	Malformed {
		/// Store location.
		location: String,
		/// Human-readable error payload, including the offending field path when known.
		message: String,
	},
}
impl ReadFailure {
	/// Returns `true` if the payload existed but could not be parsed.
	pub fn is_malformed(&self) -> bool {
		matches!(self, Self::Malformed { .. })
	}
}
