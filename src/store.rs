//! Storage contracts and built-in store implementations for the session credential pair.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::CredentialPair, obs};

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for the process-wide credential pair.
///
/// Implementations hold one JSON entry. An entry that is missing, malformed, or half-written
/// must load as `None`; errors are reserved for backend failures.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Loads the stored pair, if a usable one exists.
	fn load(&self) -> StoreFuture<'_, Option<CredentialPair>>;

	/// Persists or replaces the stored pair.
	fn save(&self, pair: CredentialPair) -> StoreFuture<'_, ()>;

	/// Removes the stored pair.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Decodes a raw entry, discarding (and logging) anything that is not a complete pair.
pub(crate) fn decode_entry(store: &'static str, bytes: &[u8]) -> Option<CredentialPair> {
	match CredentialPair::decode(bytes) {
		Ok(pair) => Some(pair),
		Err(err) => {
			obs::credential_entry_discarded(store, &err);

			None
		},
	}
}

pub(crate) fn encode_entry(pair: &CredentialPair) -> Result<Vec<u8>, StoreError> {
	pair.encode().map_err(|e| StoreError::Serialization {
		message: format!("Failed to encode credential pair: {e}"),
	})
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_client_error_with_source() {
		let store_error = StoreError::Backend { message: "disk unavailable".into() };
		let client_error: Error = store_error.clone().into();

		assert!(matches!(client_error, Error::Storage(_)));
		assert!(client_error.to_string().contains("disk unavailable"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn decode_entry_discards_partial_pairs() {
		assert!(decode_entry("test", b"{\"accessToken\":\"Bearer a\"}").is_none());
		assert!(decode_entry("test", b"[1,2,3]").is_none());
		assert!(
			decode_entry("test", b"{\"accessToken\":\"Bearer a\",\"refreshToken\":\"Bearer r\"}")
				.is_some()
		);
	}
}
