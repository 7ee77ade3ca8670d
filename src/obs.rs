//! Optional observability hooks for refreshes and searches.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `tokenkeeper.operation` with the `operation` and `stage`
//!   fields, plus debug events at refresh decisions.
//! - Enable `metrics` to increment the `tokenkeeper_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Emits a debug event when tracing is enabled; compiles away otherwise.
macro_rules! trace_debug {
	($($arg:tt)*) => {
		#[cfg(feature = "tracing")]
		{
			::tracing::debug!($($arg)*);
		}
	};
}
pub(crate) use trace_debug;

/// Operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Refresh triggered because the cached record was stale, missing, or unreadable.
	StaleRefresh,
	/// Refresh requested explicitly, bypassing the freshness check.
	ForcedRefresh,
	/// `web_search` tool invocation.
	WebSearch,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::StaleRefresh => "stale_refresh",
			OperationKind::ForcedRefresh => "forced_refresh",
			OperationKind::WebSearch => "web_search",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to the operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated (or rendered) back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(OperationKind::StaleRefresh.to_string(), "stale_refresh");
		assert_eq!(OperationKind::ForcedRefresh.as_str(), "forced_refresh");
		assert_eq!(OperationKind::WebSearch.as_str(), "web_search");
		assert_eq!(OperationOutcome::Failure.to_string(), "failure");
	}
}
