//! HomeCare marketplace client core: a bearer-token HTTP client that recovers from expired
//! sessions with one coalesced refresh, plus the district distance-fee pricing used at checkout.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod pricing;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::ReqwestAuthClient,
		config::ClientConfig,
		http::ReqwestTransport,
		store::{MemoryStore, TokenStore},
	};

	/// Builds a [`ClientConfig`] pointing at `refresh_url`, accepting plain HTTP mock servers.
	pub fn test_client_config(refresh_url: &str) -> ClientConfig {
		ClientConfig::builder()
			.refresh_endpoint(
				Url::parse(refresh_url).expect("Failed to parse mock refresh endpoint URL."),
			)
			.allow_insecure_http(true)
			.build()
			.expect("Failed to build test client configuration.")
	}

	/// Constructs a [`ReqwestAuthClient`] backed by an in-memory store and the reqwest transport
	/// used across integration tests.
	pub fn build_reqwest_test_client(refresh_url: &str) -> (ReqwestAuthClient, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let client = build_reqwest_test_client_with_store(refresh_url, store_backend.clone());

		(client, store_backend)
	}

	/// Constructs a [`ReqwestAuthClient`] over a caller-seeded [`MemoryStore`].
	pub fn build_reqwest_test_client_with_store(
		refresh_url: &str,
		store_backend: Arc<MemoryStore>,
	) -> ReqwestAuthClient {
		let store: Arc<dyn TokenStore> = store_backend;

		ReqwestAuthClient::with_transport(
			store,
			test_client_config(refresh_url),
			ReqwestTransport::default(),
		)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
