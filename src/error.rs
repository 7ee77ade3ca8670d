//! Crate-level error types shared by the freshness policy, the global accessor, and the search
//! adapter.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Store read failures never show up here; the policy folds them into
/// [`Freshness`](crate::policy::Freshness) instead.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The authenticator could not produce a token.
	#[error(transparent)]
	Acquisition(#[from] AcquisitionError),
	/// Search adapter failure.
	#[error(transparent)]
	Search(#[from] SearchError),

	/// No process-wide policy has been built or installed yet.
	#[error("No token freshness policy has been initialized.")]
	PolicyUninitialized,
	/// A process-wide policy already exists.
	#[error("A token freshness policy is already installed.")]
	PolicyAlreadyInstalled,
}

/// Failures raised while acquiring or refreshing a credential.
#[derive(Debug, ThisError)]
pub enum AcquisitionError {
	/// The wrapped authenticator failed (network, auth rejected, persistence).
	#[error("Authenticator failed to acquire a token.")]
	Authenticator {
		/// Authenticator-specific failure.
		#[source]
		source: BoxError,
	},
	/// The authenticator finished without producing a token.
	#[error("Authenticator returned an empty token.")]
	EmptyToken,
}
impl AcquisitionError {
	/// Wraps an authenticator-specific failure.
	pub fn authenticator(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Authenticator { source: Box::new(src) }
	}
}

/// Failures raised by the web-search adapter.
#[derive(Debug, ThisError)]
pub enum SearchError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Configured endpoint cannot be parsed.
	#[error("Search endpoint is invalid.")]
	InvalidEndpoint(#[from] url::ParseError),
	/// Underlying HTTP client reported a network failure.
	#[error("{source}")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Search endpoint answered with a non-success status.
	#[error("Search endpoint returned status {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
	},
	/// Search endpoint responded with JSON that could not be parsed.
	#[error("Search endpoint returned malformed JSON: {source}")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl SearchError {
	/// Wraps a transport's builder failure.
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}

	/// Returns `true` when the failure happened at the HTTP layer (transport or status).
	pub fn is_http(&self) -> bool {
		matches!(self, Self::Transport { .. } | Self::Status { .. })
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for SearchError {
	fn from(e: ReqwestError) -> Self {
		match e.status() {
			Some(status) => Self::Status { status: status.as_u16() },
			None => Self::transport(e),
		}
	}
}
