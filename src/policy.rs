//! Proactive token-freshness policy wrapped around an external authenticator.
//!
//! [`TokenFreshnessPolicy`] answers two questions: "is the cached credential still usable" and
//! "give me a usable credential". A record counts as usable only while it expires more than the
//! [`RefreshThreshold`] (five minutes by default) from now, so callers refresh before the
//! provider starts rejecting the token rather than after. Read failures never escape; they become
//! [`Freshness::Unreadable`] / [`Freshness::Malformed`] verdicts. Refreshes run behind a
//! single-flight guard: callers that lose the race re-read the store once the winner has
//! persisted its record and reuse it instead of calling the authenticator again.

mod freshness;
mod metrics;

pub use freshness::*;
pub use metrics::{RefreshMetrics, RefreshSnapshot};

// self
use crate::{
	_prelude::*,
	authenticator::CredentialAuthenticator,
	credential::{CredentialRecord, TokenSecret},
	error::AcquisitionError,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	store::{CredentialStore, FileStore},
};

/// Stateful facade deciding when the wrapped authenticator has to run.
///
/// Cloning is cheap; clones share the refresh guard and the counters, so one policy can be built
/// at startup and handed to every consumer.
#[derive(Clone)]
pub struct TokenFreshnessPolicy {
	authenticator: Arc<dyn CredentialAuthenticator>,
	store: Arc<dyn CredentialStore>,
	threshold: RefreshThreshold,
	refresh_guard: Arc<AsyncMutex<()>>,
	metrics: Arc<RefreshMetrics>,
}
impl TokenFreshnessPolicy {
	/// Creates a policy that reads the JSON record at the authenticator's configured location.
	pub fn new(authenticator: Arc<dyn CredentialAuthenticator>) -> Self {
		let store = Arc::new(FileStore::new(authenticator.location().api_key_file.clone()));

		Self::with_store(authenticator, store)
	}

	/// Creates a policy that reads through a caller-provided store.
	pub fn with_store(
		authenticator: Arc<dyn CredentialAuthenticator>,
		store: Arc<dyn CredentialStore>,
	) -> Self {
		Self {
			authenticator,
			store,
			threshold: RefreshThreshold::DEFAULT,
			refresh_guard: Default::default(),
			metrics: Default::default(),
		}
	}

	/// Overrides the safety margin (defaults to 300 seconds).
	pub fn with_refresh_threshold(mut self, margin: Duration) -> Self {
		self.threshold = RefreshThreshold::new(margin);

		self
	}

	/// Wrapped authenticator.
	pub fn authenticator(&self) -> &Arc<dyn CredentialAuthenticator> {
		&self.authenticator
	}

	/// Store the policy reads from.
	pub fn store(&self) -> &Arc<dyn CredentialStore> {
		&self.store
	}

	/// Active safety margin.
	pub fn threshold(&self) -> RefreshThreshold {
		self.threshold
	}

	/// Counters shared by every clone of this policy.
	pub fn metrics(&self) -> &RefreshMetrics {
		&self.metrics
	}

	/// Reads the store and classifies the record at the current instant.
	pub fn freshness(&self) -> Freshness {
		self.freshness_at(OffsetDateTime::now_utc())
	}

	/// Reads the store and classifies the record at `now`.
	pub fn freshness_at(&self, now: OffsetDateTime) -> Freshness {
		Freshness::evaluate(self.store.load(), now, self.threshold)
	}

	/// Returns `true` iff a well-formed record expires more than the threshold from now.
	#[doc(alias = "is_token_usable")]
	pub fn is_usable(&self) -> bool {
		self.freshness().is_usable()
	}

	/// Same as [`is_usable`](Self::is_usable) at a fixed instant.
	pub fn is_usable_at(&self, now: OffsetDateTime) -> bool {
		self.freshness_at(now).is_usable()
	}

	/// Returns the parsed record, or `None` when it is missing or malformed.
	#[doc(alias = "token_info")]
	pub fn current_record(&self) -> Option<CredentialRecord> {
		self.store.load().ok()
	}

	/// Reports whether a refresh is due and how many whole seconds remain.
	#[doc(alias = "needs_refresh")]
	pub fn check_refresh_status(&self) -> RefreshStatus {
		self.check_refresh_status_at(OffsetDateTime::now_utc())
	}

	/// Same as [`check_refresh_status`](Self::check_refresh_status) at a fixed instant.
	pub fn check_refresh_status_at(&self, now: OffsetDateTime) -> RefreshStatus {
		RefreshStatus::evaluate(self.current_record().as_ref(), now, self.threshold)
	}

	/// Returns the cached token while it is usable; otherwise refreshes through the authenticator.
	///
	/// Concurrent callers that find the record stale queue on the refresh guard; only the first
	/// one reaches the authenticator as long as it persists a usable record.
	#[doc(alias = "ensure_valid_token")]
	pub async fn ensure_valid(&self) -> Result<TokenSecret> {
		const KIND: OperationKind = OperationKind::StaleRefresh;

		if let Freshness::Usable { record, .. } = self.freshness() {
			self.metrics.record_cache_hit();

			return Ok(record.token);
		}

		let span = OperationSpan::new(KIND, "ensure_valid");

		span.instrument(async move {
			let _singleflight = self.refresh_guard.lock().await;

			// Re-read: the previous guard holder may have refreshed already.
			let freshness = self.freshness();

			if let Freshness::Usable { record, .. } = &freshness {
				self.metrics.record_cache_hit();

				return Ok(record.token.clone());
			}

			obs::trace_debug!(state = freshness.label(), "cached credential is stale; refreshing");

			self.acquire(KIND).await
		})
		.await
	}

	/// Invokes the authenticator unconditionally and returns the token it produced.
	#[doc(alias = "refresh")]
	pub async fn force_refresh(&self) -> Result<TokenSecret> {
		const KIND: OperationKind = OperationKind::ForcedRefresh;

		let span = OperationSpan::new(KIND, "force_refresh");

		span.instrument(async move {
			let _singleflight = self.refresh_guard.lock().await;

			self.acquire(KIND).await
		})
		.await
	}

	async fn acquire(&self, kind: OperationKind) -> Result<TokenSecret> {
		obs::record_outcome(kind, OperationOutcome::Attempt);
		self.metrics.record_attempt();

		let result = self.authenticator.acquire_or_refresh().await.and_then(|token| {
			if token.is_blank() { Err(AcquisitionError::EmptyToken) } else { Ok(token) }
		});

		match &result {
			Ok(_) => self.metrics.record_success(),
			Err(_e) => {
				obs::trace_debug!(error = %_e, "authenticator failed to produce a token");

				self.metrics.record_failure();
			},
		}

		obs::record_result(kind, &result);

		result.map_err(Error::from)
	}
}
impl Debug for TokenFreshnessPolicy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenFreshnessPolicy")
			.field("location", self.authenticator.location())
			.field("store", &self.store.describe())
			.field("threshold", &self.threshold)
			.finish()
	}
}
