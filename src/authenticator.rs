//! Capability contract for the external authenticator that acquires and refreshes credentials.

// self
use crate::{
	_prelude::*,
	credential::{CredentialLocation, TokenSecret},
	error::AcquisitionError,
};

/// Boxed future returned by [`CredentialAuthenticator::acquire_or_refresh`].
pub type AcquireFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TokenSecret, AcquisitionError>> + 'a + Send>>;

/// Authenticator wrapped by the freshness policy.
///
/// Implementations own the whole exchange (device flow, token endpoint calls, persistence). The
/// policy only decides *when* to call them.
pub trait CredentialAuthenticator
where
	Self: Send + Sync,
{
	/// Where the authenticator persists its credential record.
	fn location(&self) -> &CredentialLocation;

	/// Runs whatever exchange is needed and returns a usable token.
	///
	/// The new record must be persisted at [`location`](Self::location) before the future
	/// resolves, so subsequent freshness checks observe it.
	fn acquire_or_refresh(&self) -> AcquireFuture<'_>;
}
