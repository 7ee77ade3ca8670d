//! Thread-safe in-memory [`CredentialStore`] for tests, demos, and authenticators that keep
//! credentials in-process.

// self
use crate::{
	_prelude::*,
	credential::CredentialRecord,
	store::{CredentialStore, ReadFailure},
};

/// Single-slot record holder shared across clones.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<Option<CredentialRecord>>>);
impl MemoryStore {
	/// Creates a store that already holds `record`.
	pub fn with_record(record: CredentialRecord) -> Self {
		Self(Arc::new(RwLock::new(Some(record))))
	}

	/// Replaces the held record.
	pub fn save(&self, record: CredentialRecord) {
		*self.0.write() = Some(record);
	}

	/// Drops the held record, returning it.
	pub fn clear(&self) -> Option<CredentialRecord> {
		self.0.write().take()
	}

	/// Returns a copy of the held record without going through the [`CredentialStore`] contract.
	pub fn snapshot(&self) -> Option<CredentialRecord> {
		self.0.read().clone()
	}
}
impl CredentialStore for MemoryStore {
	fn load(&self) -> Result<CredentialRecord, ReadFailure> {
		self.snapshot().ok_or_else(|| ReadFailure::Missing { location: self.describe() })
	}

	fn describe(&self) -> String {
		"memory".into()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn clones_share_the_slot() {
		let store = MemoryStore::default();
		let clone = store.clone();

		assert_eq!(store.load(), Err(ReadFailure::Missing { location: "memory".into() }));

		clone.save(CredentialRecord::new("abc", 42.0));

		assert_eq!(store.load().map(|r| r.token.expose().to_owned()), Ok("abc".into()));
		assert!(store.clear().is_some());
		assert!(clone.snapshot().is_none());
	}
}
