//! Persisted credential record and its expiry arithmetic.

// self
use crate::{_prelude::*, credential::TokenSecret};

/// Persisted bearer token plus its absolute expiry.
///
/// The authenticator owns the on-disk format; only `token` and `expires_at` carry meaning here.
/// Everything else in the JSON object is kept in [`extra`](Self::extra) untouched.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
	/// Bearer token; callers must avoid logging it.
	pub token: TokenSecret,
	/// Expiry as Unix seconds. Missing values read as `0`, which is always stale.
	#[serde(default)]
	pub expires_at: f64,
	/// Additional authenticator-owned fields.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}
impl CredentialRecord {
	/// Creates a record with no extra fields.
	pub fn new(token: impl Into<String>, expires_at: f64) -> Self {
		Self { token: TokenSecret::new(token), expires_at, extra: BTreeMap::new() }
	}

	/// Creates a record expiring at the provided instant.
	pub fn expiring_at(token: impl Into<String>, instant: OffsetDateTime) -> Self {
		Self::new(token, unix_seconds(instant))
	}

	/// Attaches an authenticator-owned field.
	pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
		self.extra.insert(key.into(), value);

		self
	}

	/// Fractional seconds remaining until expiry at `now`; negative once expired.
	pub fn remaining_at(&self, now: OffsetDateTime) -> f64 {
		self.expires_at - unix_seconds(now)
	}

	/// Whole seconds remaining until expiry at `now`, rounded toward negative infinity.
	pub fn seconds_left_at(&self, now: OffsetDateTime) -> i64 {
		self.remaining_at(now).floor() as i64
	}

	/// Expiry as an [`OffsetDateTime`], if it falls inside the representable range.
	pub fn expires_at_datetime(&self) -> Option<OffsetDateTime> {
		if !self.expires_at.is_finite() {
			return None;
		}

		let nanos = (self.expires_at * 1_000_000_000.0) as i128;

		OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
	}
}
impl Debug for CredentialRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialRecord")
			.field("token", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.field("extra", &self.extra.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Converts an instant into fractional Unix seconds.
pub(crate) fn unix_seconds(instant: OffsetDateTime) -> f64 {
	instant.unix_timestamp_nanos() as f64 / 1_000_000_000.0
}
