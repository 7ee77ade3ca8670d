// self
use crate::obs::{OperationKind, OperationOutcome};

/// Counter incremented once per attempt, success and failure.
pub const OPERATION_TOTAL: &str = "tokenkeeper_operation_total";

/// Bumps [`OPERATION_TOTAL`] for `kind`/`outcome`. Without the `metrics` feature this does nothing.
pub fn record_outcome(kind: OperationKind, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		let (operation, outcome) = (kind.as_str(), outcome.as_str());

		metrics::counter!(OPERATION_TOTAL, "operation" => operation, "outcome" => outcome)
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Maps a finished call to [`OperationOutcome::Success`] or [`OperationOutcome::Failure`] and
/// records it.
pub fn record_result<T, E>(kind: OperationKind, result: &Result<T, E>) {
	record_outcome(
		kind,
		if result.is_ok() { OperationOutcome::Success } else { OperationOutcome::Failure },
	);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_is_safe_without_a_recorder() {
		assert_eq!(OPERATION_TOTAL, "tokenkeeper_operation_total");

		record_outcome(OperationKind::ForcedRefresh, OperationOutcome::Attempt);
		record_result::<(), &str>(OperationKind::WebSearch, &Err("timeout"));
	}
}
