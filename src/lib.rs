//! Proactive credential freshness for device-flow authenticators: a fixed safety margin, a
//! single-flight refresh guard, and a process-wide policy handle, plus a SearXNG-backed
//! `web_search` tool adapter.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod authenticator;
pub mod credential;
pub mod error;
pub mod global;
#[cfg(feature = "reqwest")] pub mod http;
pub mod obs;
pub mod policy;
pub mod search;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// std
	use std::{
		env, process,
		path::PathBuf,
		sync::atomic::{AtomicUsize, Ordering},
	};
	// self
	use crate::{
		authenticator::{AcquireFuture, CredentialAuthenticator},
		credential::{CredentialLocation, CredentialRecord, TokenSecret},
		error::AcquisitionError,
		policy::TokenFreshnessPolicy,
		store::{CredentialStore, MemoryStore},
	};

	/// Builds a SearXNG client that accepts the self-signed certificates produced by `httpmock`
	/// during tests.
	#[cfg(feature = "reqwest")]
	pub fn test_searxng_client(endpoint: Url) -> crate::http::SearxngHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure reqwest client for tests.");

		crate::http::SearxngHttpClient::with_client(client, endpoint)
	}

	/// Returns a unique temp-file path for file-store fixtures.
	pub fn temp_credential_path(label: &str) -> PathBuf {
		let unique = format!(
			"tokenkeeper_{label}_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	/// Unix timestamp (seconds) offset from the current clock.
	pub fn unix_in(seconds: i64) -> f64 {
		(OffsetDateTime::now_utc() + Duration::seconds(seconds)).unix_timestamp() as f64
	}

	/// Scripted authenticator that persists a fresh record into a [`MemoryStore`] and counts calls.
	#[derive(Debug)]
	pub struct ScriptedAuthenticator {
		location: CredentialLocation,
		store: Arc<MemoryStore>,
		calls: AtomicUsize,
		lifetime: Duration,
		fail_with: Option<String>,
	}
	impl ScriptedAuthenticator {
		/// Issues `issued-<n>` tokens valid for one hour.
		pub fn new(store: Arc<MemoryStore>) -> Self {
			Self {
				location: CredentialLocation::new(env::temp_dir().join("tokenkeeper-scripted")),
				store,
				calls: AtomicUsize::new(0),
				lifetime: Duration::hours(1),
				fail_with: None,
			}
		}

		/// Makes every acquisition fail with the provided message.
		pub fn failing(mut self, message: impl Into<String>) -> Self {
			self.fail_with = Some(message.into());

			self
		}

		/// Overrides the lifetime of issued tokens.
		pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
			self.lifetime = lifetime;

			self
		}

		/// Number of times `acquire_or_refresh` ran.
		pub fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}
	impl CredentialAuthenticator for ScriptedAuthenticator {
		fn location(&self) -> &CredentialLocation {
			&self.location
		}

		fn acquire_or_refresh(&self) -> AcquireFuture<'_> {
			Box::pin(async move {
				let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

				if let Some(message) = &self.fail_with {
					return Err(AcquisitionError::authenticator(ScriptedFailure(message.clone())));
				}

				let expires_at =
					(OffsetDateTime::now_utc() + self.lifetime).unix_timestamp() as f64;
				let token = format!("issued-{call}");

				self.store.save(CredentialRecord::new(token.clone(), expires_at));

				Ok(TokenSecret::new(token))
			})
		}
	}

	/// Error raised by [`ScriptedAuthenticator::failing`].
	#[derive(Debug, ThisError)]
	#[error("{0}")]
	pub struct ScriptedFailure(pub String);

	/// Builds a policy over a memory store seeded with `record`, returning the collaborators.
	pub fn scripted_policy(
		record: Option<CredentialRecord>,
	) -> (TokenFreshnessPolicy, Arc<ScriptedAuthenticator>, Arc<MemoryStore>) {
		let store = Arc::new(MemoryStore::default());

		if let Some(record) = record {
			store.save(record);
		}

		let authenticator = Arc::new(ScriptedAuthenticator::new(store.clone()));
		let store_handle: Arc<dyn CredentialStore> = store.clone();
		let policy = TokenFreshnessPolicy::with_store(authenticator.clone(), store_handle);

		(policy, authenticator, store)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use color_eyre as _;
#[cfg(all(test, not(feature = "reqwest")))] use httpmock as _;
