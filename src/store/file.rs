//! Simple file-backed [`TokenStore`] for desktop shells and command-line tools.

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
	store::{self, StoreError, StoreFuture, TokenStore},
};

/// Persists the credential entry to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<Option<Vec<u8>>>>,
}
impl FileStore {
	/// Opens (or prepares) a store at the provided path, eagerly loading an existing entry.
	///
	/// A corrupted file is kept in memory as-is and loads as `None` until the next save.
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

	fn load_snapshot(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
		match fs::read(path) {
			Ok(bytes) if bytes.is_empty() => Ok(None),
			Ok(bytes) => Ok(Some(bytes)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(StoreError::Backend {
				message: format!("Failed to read {}: {e}", path.display()),
			}),
		}
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist(&self, serialized: &[u8]) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(serialized).map_err(|e| StoreError::Backend {
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
impl TokenStore for FileStore {
	fn load(&self) -> StoreFuture<'_, Option<CredentialPair>> {
		Box::pin(async move {
			let guard = self.inner.read();

			Ok(guard.as_deref().and_then(|bytes| store::decode_entry("file", bytes)))
		})
	}

	fn save(&self, pair: CredentialPair) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let serialized = store::encode_entry(&pair)?;
			let mut guard = self.inner.write();

			self.persist(&serialized)?;
			*guard = Some(serialized);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			self.remove()?;
			guard.take();

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{
		env, process,
		time::{SystemTime, UNIX_EPOCH},
	};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path() -> PathBuf {
		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.expect("System clock should be after the Unix epoch.")
			.as_nanos();

		env::temp_dir()
			.join(format!("homecare_file_store_{}_{nanos}", process::id()))
			.join("session.json")
	}

	fn pair() -> CredentialPair {
		CredentialPair::new("Bearer access-file", "Bearer refresh-file")
			.expect("Failed to build file-store credential fixture.")
	}

	#[test]
	fn save_and_reload_round_trip() {
		let path = temp_path();
		let store = FileStore::open(&path).expect("Failed to open file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		assert!(rt.block_on(store.load()).expect("Empty store should load.").is_none());

		rt.block_on(store.save(pair())).expect("Failed to save credential pair to file store.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store.");
		let loaded = rt
			.block_on(reopened.load())
			.expect("Failed to load credential pair from file store.")
			.expect("File store lost credential pair after reopen.");

		assert_eq!(loaded, pair());

		rt.block_on(reopened.clear()).expect("Failed to clear file store.");

		assert!(!path.exists());
		assert!(rt.block_on(reopened.load()).expect("Cleared store should load.").is_none());
	}

	#[test]
	fn corrupted_file_loads_as_absent() {
		let path = temp_path();

		FileStore::ensure_parent_exists(&path).expect("Failed to create temporary directory.");
		fs::write(&path, b"{\"accessToken\":").expect("Failed to write corrupted fixture.");

		let store = FileStore::open(&path).expect("Corrupted entries must not fail open.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		assert!(rt.block_on(store.load()).expect("Corrupted entry should load.").is_none());

		rt.block_on(store.save(pair())).expect("Saving over a corrupted entry should succeed.");

		assert_eq!(
			CredentialPair::decode(&fs::read(&path).expect("Failed to read saved entry.")).ok(),
			Some(pair())
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store entry {}: {e}", path.display())
		});
	}
}
