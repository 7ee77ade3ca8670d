//! Resolution of the directory and file an authenticator persists credentials to.

// std
use std::{
	env,
	ffi::OsString,
	path::{Path, PathBuf},
};
// self
use crate::_prelude::*;

/// Environment variable overriding the credential directory.
pub const TOKEN_DIR_ENV: &str = "GITHUB_COPILOT_TOKEN_DIR";
/// Environment variable overriding the credential file name.
pub const API_KEY_FILE_ENV: &str = "GITHUB_COPILOT_API_KEY_FILE";
/// Credential file name used when no override is set.
pub const DEFAULT_API_KEY_FILE: &str = "api-key.json";

/// Directory + file pair an authenticator reads and writes its credential record at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialLocation {
	/// Directory holding every file the authenticator manages.
	pub token_dir: PathBuf,
	/// Credential record read by the freshness policy.
	pub api_key_file: PathBuf,
}
impl CredentialLocation {
	/// Uses `token_dir` with the default credential file name.
	pub fn new(token_dir: impl Into<PathBuf>) -> Self {
		let token_dir = token_dir.into();
		let api_key_file = token_dir.join(DEFAULT_API_KEY_FILE);

		Self { token_dir, api_key_file }
	}

	/// Overrides the credential file name (relative names land inside `token_dir`).
	pub fn with_api_key_file(mut self, file: impl AsRef<Path>) -> Self {
		self.api_key_file = self.token_dir.join(file);

		self
	}

	/// Resolves the location from `GITHUB_COPILOT_TOKEN_DIR` / `GITHUB_COPILOT_API_KEY_FILE`,
	/// falling back to `~/.config/litellm/github_copilot/api-key.json`. Without a home directory
	/// the same layout is rooted at the system temp dir.
	pub fn from_env() -> Self {
		Self::resolve(env::var_os(TOKEN_DIR_ENV), env::var_os(API_KEY_FILE_ENV), dirs::home_dir())
	}

	fn resolve(
		token_dir: Option<OsString>,
		api_key_file: Option<OsString>,
		home: Option<PathBuf>,
	) -> Self {
		let token_dir = token_dir.filter(|v| !v.is_empty()).map(PathBuf::from).unwrap_or_else(|| {
			let root = home.unwrap_or_else(env::temp_dir);

			root.join(".config").join("litellm").join("github_copilot")
		});
		let location = Self::new(token_dir);

		match api_key_file.filter(|v| !v.is_empty()) {
			Some(file) => location.with_api_key_file(file),
			None => location,
		}
	}
}
impl Default for CredentialLocation {
	fn default() -> Self {
		Self::from_env()
	}
}
