//! JSON-file [`CredentialStore`] matching the layout device-flow authenticators persist.

// std
use std::{
	ffi::OsString,
	fs::{self, File},
	io::{self, ErrorKind, Write},
	path::{Path, PathBuf},
	process,
	sync::atomic::{AtomicU64, Ordering},
};
// self
use crate::{
	_prelude::*,
	credential::CredentialRecord,
	store::{CredentialStore, ReadFailure},
};

/// Reads the credential record from a JSON file on every call.
///
/// Nothing is cached in memory: the authenticator may rewrite the file at any time, and each
/// freshness check must observe the latest contents.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
}
impl FileStore {
	/// Points the store at `path`. The file does not need to exist yet.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Path of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Atomically replaces the file with `record` (write temp, sync, rename).
	///
	/// Each call writes its own `<file>.<pid>.<nanos>.<seq>.tmp` sibling, so concurrent writers
	/// never share a temp file; the last rename wins. Intended for authenticator implementations;
	/// the policy itself never writes.
	pub fn persist(&self, record: &CredentialRecord) -> io::Result<()> {
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}

		let serialized = serde_json::to_vec_pretty(record)?;
		let tmp_path = self.tmp_path();
		let written = File::create(&tmp_path).and_then(|mut file| {
			file.write_all(&serialized)?;
			file.sync_all()
		});

		match written.and_then(|_| fs::rename(&tmp_path, &self.path)) {
			Ok(()) => Ok(()),
			Err(e) => {
				let _ = fs::remove_file(&tmp_path);

				Err(e)
			},
		}
	}

	fn tmp_path(&self) -> PathBuf {
		static SEQUENCE: AtomicU64 = AtomicU64::new(0);

		let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();

		name.push(format!(
			".{}.{}.{}.tmp",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
			SEQUENCE.fetch_add(1, Ordering::Relaxed),
		));

		self.path.with_file_name(name)
	}
}
impl CredentialStore for FileStore {
	fn load(&self) -> Result<CredentialRecord, ReadFailure> {
		let bytes = match fs::read(&self.path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound =>
				return Err(ReadFailure::Missing { location: self.describe() }),
			Err(e) =>
				return Err(ReadFailure::Io {
					location: self.describe(),
					message: format!("Failed to read: {e}"),
				}),
		};

		let malformed =
			|message: String| ReadFailure::Malformed { location: self.describe(), message };
		let mut de = serde_json::Deserializer::from_slice(&bytes);
		let record: CredentialRecord =
			serde_path_to_error::deserialize(&mut de).map_err(|e| malformed(e.to_string()))?;

		de.end().map_err(|e| malformed(e.to_string()))?;

		Ok(record)
	}

	fn describe(&self) -> String {
		self.path.display().to_string()
	}
}
