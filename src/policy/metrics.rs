// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::_prelude::*;

/// Thread-safe counters describing how a policy produced its tokens.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	cache_hits: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
}
impl RefreshMetrics {
	/// Returns the number of times the authenticator was invoked.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of tokens served from a fresh cached record.
	pub fn cache_hits(&self) -> u64 {
		self.cache_hits.load(Ordering::Relaxed)
	}

	/// Returns the number of authenticator calls that produced a token.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of authenticator calls that failed.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Point-in-time copy of every counter.
	pub fn snapshot(&self) -> RefreshSnapshot {
		RefreshSnapshot {
			attempts: self.attempts(),
			cache_hits: self.cache_hits(),
			successes: self.successes(),
			failures: self.failures(),
		}
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_cache_hit(&self) {
		self.cache_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}

/// Plain copy of [`RefreshMetrics`], suitable for logging or export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSnapshot {
	/// Authenticator invocations.
	pub attempts: u64,
	/// Tokens served from the cached record.
	pub cache_hits: u64,
	/// Authenticator calls that produced a token.
	pub successes: u64,
	/// Authenticator calls that failed.
	pub failures: u64,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn snapshot_copies_counters() {
		let metrics = RefreshMetrics::default();

		metrics.record_cache_hit();
		metrics.record_attempt();
		metrics.record_failure();
		metrics.record_attempt();
		metrics.record_success();

		assert_eq!(
			metrics.snapshot(),
			RefreshSnapshot { attempts: 2, cache_hits: 1, successes: 1, failures: 1 }
		);
	}
}
