//! Freshness verdicts and refresh status computed from a store read.

// self
use crate::{_prelude::*, credential::CredentialRecord, store::ReadFailure};

/// Safety margin before real expiry inside which a credential is no longer handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshThreshold(Duration);
impl RefreshThreshold {
	/// Five minutes.
	pub const DEFAULT: Self = Self(Duration::seconds(300));

	/// Creates a threshold; negative margins clamp to zero.
	pub fn new(margin: Duration) -> Self {
		Self(if margin.is_negative() { Duration::ZERO } else { margin })
	}

	/// Returns the margin as a [`Duration`].
	pub const fn as_duration(self) -> Duration {
		self.0
	}

	/// Returns the margin in whole seconds.
	pub const fn whole_seconds(self) -> i64 {
		self.0.whole_seconds()
	}

	/// Returns the margin in fractional seconds.
	pub fn as_seconds_f64(self) -> f64 {
		self.0.as_seconds_f64()
	}
}
impl Default for RefreshThreshold {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Detailed verdict on the stored credential at a given instant.
#[derive(Clone, Debug, PartialEq)]
pub enum Freshness {
	/// Expires more than the threshold from now; safe to hand out.
	Usable {
		/// The record that was read.
		record: CredentialRecord,
		/// Whole seconds until expiry.
		seconds_left: i64,
	},
	/// Already expired or expiring within the threshold.
	Expired {
		/// The record that was read.
		record: CredentialRecord,
		/// Whole seconds until expiry; negative once past expiry.
		seconds_left: i64,
	},
	/// No record could be read (missing file, I/O failure).
	Unreadable(ReadFailure),
	/// A payload exists but is not a valid record.
	Malformed(ReadFailure),
}
impl Freshness {
	/// Classifies a store read at `now` against `threshold`.
	pub fn evaluate(
		read: Result<CredentialRecord, ReadFailure>,
		now: OffsetDateTime,
		threshold: RefreshThreshold,
	) -> Self {
		match read {
			Ok(record) => {
				let seconds_left = record.seconds_left_at(now);

				if record.remaining_at(now) > threshold.as_seconds_f64() {
					Self::Usable { record, seconds_left }
				} else {
					Self::Expired { record, seconds_left }
				}
			},
			Err(failure) if failure.is_malformed() => Self::Malformed(failure),
			Err(failure) => Self::Unreadable(failure),
		}
	}

	/// Boolean collapse of the verdict.
	pub fn is_usable(&self) -> bool {
		matches!(self, Self::Usable { .. })
	}

	/// The record, when one could be read.
	pub fn record(&self) -> Option<&CredentialRecord> {
		match self {
			Self::Usable { record, .. } | Self::Expired { record, .. } => Some(record),
			Self::Unreadable(_) | Self::Malformed(_) => None,
		}
	}

	/// Consumes the verdict and returns the record, when one could be read.
	pub fn into_record(self) -> Option<CredentialRecord> {
		match self {
			Self::Usable { record, .. } | Self::Expired { record, .. } => Some(record),
			Self::Unreadable(_) | Self::Malformed(_) => None,
		}
	}

	/// Stable label suitable for log fields.
	pub const fn label(&self) -> &'static str {
		match self {
			Self::Usable { .. } => "usable",
			Self::Expired { .. } => "expired",
			Self::Unreadable(_) => "unreadable",
			Self::Malformed(_) => "malformed",
		}
	}
}

/// Result of [`check_refresh_status`](crate::policy::TokenFreshnessPolicy::check_refresh_status).
///
/// Seconds are floored before the comparison, while [`Freshness`] compares the exact remainder.
/// With a fraction of a second past the threshold left (300.5 s by default) the record is still
/// usable, yet this status already reports `needs_refresh` with `300` seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefreshStatus {
	/// `true` once expiry is within the threshold (inclusive) or no record is available.
	pub needs_refresh: bool,
	/// Whole seconds until expiry; `0` without a record, negative once expired.
	pub seconds_until_expiry: i64,
}
impl RefreshStatus {
	/// Computes the status for an optional record at `now`.
	pub fn evaluate(
		record: Option<&CredentialRecord>,
		now: OffsetDateTime,
		threshold: RefreshThreshold,
	) -> Self {
		match record {
			None => Self { needs_refresh: true, seconds_until_expiry: 0 },
			Some(record) => {
				let seconds_left = record.seconds_left_at(now);

				Self {
					needs_refresh: seconds_left <= threshold.whole_seconds(),
					seconds_until_expiry: seconds_left,
				}
			},
		}
	}
}
impl From<RefreshStatus> for (bool, i64) {
	fn from(status: RefreshStatus) -> Self {
		(status.needs_refresh, status.seconds_until_expiry)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn now() -> OffsetDateTime {
		macros::datetime!(2025-03-01 08:00 UTC)
	}

	fn record_in(seconds: f64) -> CredentialRecord {
		CredentialRecord::new("abc", now().unix_timestamp() as f64 + seconds)
	}

	#[test]
	fn threshold_clamps_negative_margins() {
		assert_eq!(RefreshThreshold::default().whole_seconds(), 300);
		assert_eq!(RefreshThreshold::new(Duration::seconds(-5)).as_duration(), Duration::ZERO);
	}

	#[test]
	fn usable_only_strictly_beyond_threshold() {
		let threshold = RefreshThreshold::DEFAULT;

		for seconds in [300.5, 301.0, 1_000.0, 86_400.0] {
			assert!(
				Freshness::evaluate(Ok(record_in(seconds)), now(), threshold).is_usable(),
				"{seconds} seconds left should be usable."
			);
		}
		for seconds in [300.0, 299.9, 100.0, 0.0, -1.0, -86_400.0] {
			let verdict = Freshness::evaluate(Ok(record_in(seconds)), now(), threshold);

			assert!(!verdict.is_usable(), "{seconds} seconds left should not be usable.");
			assert_eq!(verdict.label(), "expired");
			assert!(verdict.record().is_some());
		}
	}

	#[test]
	fn read_failures_map_to_distinct_verdicts() {
		let missing = ReadFailure::Missing { location: "memory".into() };
		let malformed =
			ReadFailure::Malformed { location: "memory".into(), message: "expected value".into() };
		let threshold = RefreshThreshold::DEFAULT;

		assert_eq!(
			Freshness::evaluate(Err(missing.clone()), now(), threshold),
			Freshness::Unreadable(missing)
		);

		let verdict = Freshness::evaluate(Err(malformed.clone()), now(), threshold);

		assert_eq!(verdict, Freshness::Malformed(malformed));
		assert!(verdict.into_record().is_none());
	}

	#[test]
	fn refresh_status_boundaries() {
		let threshold = RefreshThreshold::DEFAULT;
		let status = |seconds: f64| {
			let record = record_in(seconds);

			<(bool, i64)>::from(RefreshStatus::evaluate(Some(&record), now(), threshold))
		};

		assert_eq!(status(301.0), (false, 301));
		assert_eq!(status(300.0), (true, 300));
		assert_eq!(status(-42.0), (true, -42));
		assert_eq!(status(-0.25), (true, -1));
		assert_eq!(<(bool, i64)>::from(RefreshStatus::evaluate(None, now(), threshold)), (true, 0));
	}

	#[test]
	fn fractional_second_past_threshold_is_usable_but_due() {
		let threshold = RefreshThreshold::DEFAULT;
		let record = record_in(300.5);
		let status = RefreshStatus::evaluate(Some(&record), now(), threshold);

		assert!(Freshness::evaluate(Ok(record.clone()), now(), threshold).is_usable());
		assert_eq!(status, RefreshStatus { needs_refresh: true, seconds_until_expiry: 300 });
	}
}
