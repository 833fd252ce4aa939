//! File-backed [`CredentialStore`] that survives process restarts.
//!
//! The pair is kept as a single JSON object (`access_token`, `refresh_token`) and replaced with
//! a write-then-rename so a crash never leaves one token updated without the other.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::CredentialPair,
	store::{CredentialStore, StoreError},
};

/// Persists the credential pair to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<Option<CredentialPair>>>,
}
impl FileStore {
	/// Opens (or prepares) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<Option<CredentialPair>, StoreError> {
		let bytes = match fs::read(path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) =>
				return Err(StoreError::Backend {
					message: format!("Failed to read {}: {e}", path.display()),
				}),
		};

		if bytes.is_empty() {
			return Ok(None);
		}

		serde_json::from_slice(&bytes).map(Some).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist(&self, pair: &CredentialPair) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized = serde_json::to_vec_pretty(pair).map_err(|e| StoreError::Serialization {
			message: format!("Failed to serialize credentials: {e}"),
		})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn remove(&self) -> Result<(), StoreError> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StoreError::Backend {
				message: format!("Failed to remove {}: {e}", self.path.display()),
			}),
		}
	}
}
impl CredentialStore for FileStore {
	fn load(&self) -> Option<CredentialPair> {
		self.inner.read().clone()
	}

	fn save(&self, pair: &CredentialPair) -> Result<(), StoreError> {
		let mut guard = self.inner.write();

		self.persist(pair)?;
		*guard = Some(pair.clone());

		Ok(())
	}

	fn clear(&self) -> Result<(), StoreError> {
		let mut guard = self.inner.write();

		self.remove()?;
		*guard = None;

		Ok(())
	}
}
