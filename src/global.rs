//! Process-wide policy handle with lazy, race-free construction.
//!
//! Prefer building a [`TokenFreshnessPolicy`] at startup and passing clones around. The global
//! accessor exists for consumers that cannot thread a handle through, such as a provider adapter
//! that only knows it needs "the" token.

// std
use std::sync::OnceLock;
// self
use crate::{_prelude::*, credential::TokenSecret, policy::TokenFreshnessPolicy};

static GLOBAL: LazyPolicy = LazyPolicy::new();

/// Write-once cell holding a policy; construction runs at most once even under contention.
#[derive(Debug, Default)]
pub struct LazyPolicy(OnceLock<TokenFreshnessPolicy>);
impl LazyPolicy {
	/// Creates an empty cell.
	pub const fn new() -> Self {
		Self(OnceLock::new())
	}

	/// Returns the held policy, building it with `init` on first access.
	pub fn get_or_init<F>(&self, init: F) -> &TokenFreshnessPolicy
	where
		F: FnOnce() -> TokenFreshnessPolicy,
	{
		self.0.get_or_init(init)
	}

	/// Returns the held policy, if any.
	pub fn get(&self) -> Option<&TokenFreshnessPolicy> {
		self.0.get()
	}

	/// Stores `policy` unless the cell is already populated.
	pub fn install(&self, policy: TokenFreshnessPolicy) -> Result<&TokenFreshnessPolicy> {
		self.0.set(policy).map_err(|_| Error::PolicyAlreadyInstalled)?;

		self.0.get().ok_or(Error::PolicyUninitialized)
	}

	/// Ensures a usable token through the held policy.
	pub async fn ensure_token(&self) -> Result<TokenSecret> {
		self.get().ok_or(Error::PolicyUninitialized)?.ensure_valid().await
	}
}

/// Returns the process-wide policy, building it with `init` on first call.
pub fn get_policy_or_init<F>(init: F) -> &'static TokenFreshnessPolicy
where
	F: FnOnce() -> TokenFreshnessPolicy,
{
	GLOBAL.get_or_init(init)
}

/// Returns the process-wide policy if it has been built or installed.
pub fn get_policy() -> Option<&'static TokenFreshnessPolicy> {
	GLOBAL.get()
}

/// Installs the process-wide policy at startup.
pub fn install(policy: TokenFreshnessPolicy) -> Result<&'static TokenFreshnessPolicy> {
	GLOBAL.install(policy)
}

/// Convenience for `get_policy()?.ensure_valid()`.
///
/// Nothing is built on demand here because there is no default authenticator. Call [`install`]
/// or [`get_policy_or_init`] first; otherwise this fails with [`Error::PolicyUninitialized`].
pub async fn ensure_token() -> Result<TokenSecret> {
	GLOBAL.ensure_token().await
}
