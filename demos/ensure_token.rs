//! Wraps a toy device-flow authenticator with the freshness policy and shows a cold start, a
//! cached hit, and a forced refresh against a JSON credential file.

// std
use std::{
	env, fs,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use color_eyre::Result;
use time::{Duration, OffsetDateTime};
// self
use tokenkeeper::{
	authenticator::{AcquireFuture, CredentialAuthenticator},
	credential::{CredentialLocation, CredentialRecord, TokenSecret},
	error::AcquisitionError,
	global,
	policy::TokenFreshnessPolicy,
	store::FileStore,
};

/// Pretends to complete a device flow and persists a 30-minute token.
struct DemoAuthenticator {
	location: CredentialLocation,
	issued: AtomicUsize,
}
impl CredentialAuthenticator for DemoAuthenticator {
	fn location(&self) -> &CredentialLocation {
		&self.location
	}

	fn acquire_or_refresh(&self) -> AcquireFuture<'_> {
		Box::pin(async move {
			let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
			let token = format!("demo-token-{n}");
			let record = CredentialRecord::expiring_at(
				&token,
				OffsetDateTime::now_utc() + Duration::minutes(30),
			);

			println!("authenticator: issuing {token}");

			FileStore::new(&self.location.api_key_file)
				.persist(&record)
				.map_err(AcquisitionError::authenticator)?;

			Ok(TokenSecret::new(token))
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let token_dir = env::temp_dir().join("tokenkeeper-demo");
	let authenticator = Arc::new(DemoAuthenticator {
		location: CredentialLocation::new(&token_dir),
		issued: AtomicUsize::new(0),
	});
	let policy = global::install(
		TokenFreshnessPolicy::new(authenticator).with_refresh_threshold(Duration::minutes(5)),
	)?;

	let _ = fs::remove_file(&policy.authenticator().location().api_key_file);

	println!("cold start: {:?}", policy.check_refresh_status());
	println!("token: {}", global::ensure_token().await?.expose());
	println!("after acquisition: {:?}", policy.check_refresh_status());
	println!("cached token: {}", global::ensure_token().await?.expose());
	println!("forced token: {}", policy.force_refresh().await?.expose());
	println!("counters: {:?}", policy.metrics().snapshot());

	fs::remove_dir_all(&token_dir)?;

	Ok(())
}
