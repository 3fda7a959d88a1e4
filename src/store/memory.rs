//! Thread-safe in-memory [`TokenStore`] implementation for embedding, local development, and tests.

// self
use crate::{
	_prelude::*,
	auth::CredentialPair,
	store::{self, StoreError, StoreFuture, TokenStore},
};

type Entry = Arc<RwLock<Option<Vec<u8>>>>;

/// In-process store holding the raw JSON entry, mirroring a browser key-value slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Entry);
impl MemoryStore {
	/// Seeds the store with a valid pair.
	pub fn with_credentials(pair: &CredentialPair) -> Result<Self, StoreError> {
		Ok(Self::with_raw_entry(store::encode_entry(pair)?))
	}

	/// Seeds the store with arbitrary bytes, e.g. a corrupted or half-written entry.
	pub fn with_raw_entry(raw: impl Into<Vec<u8>>) -> Self {
		Self(Arc::new(RwLock::new(Some(raw.into()))))
	}

	/// Returns a copy of the raw entry currently stored.
	pub fn raw_entry(&self) -> Option<Vec<u8>> {
		self.0.read().clone()
	}

	fn load_now(entry: &Entry) -> Option<CredentialPair> {
		let guard = entry.read();

		guard.as_deref().and_then(|bytes| store::decode_entry("memory", bytes))
	}
}
impl TokenStore for MemoryStore {
	fn load(&self) -> StoreFuture<'_, Option<CredentialPair>> {
		let entry = self.0.clone();

		Box::pin(async move { Ok(Self::load_now(&entry)) })
	}

	fn save(&self, pair: CredentialPair) -> StoreFuture<'_, ()> {
		let entry = self.0.clone();

		Box::pin(async move {
			let bytes = store::encode_entry(&pair)?;

			*entry.write() = Some(bytes);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let entry = self.0.clone();

		Box::pin(async move {
			entry.write().take();

			Ok(())
		})
	}
}
