// self
use homecare_client::{
	auth::CredentialPair,
	store::{MemoryStore, TokenStore},
};

fn pair(access: &str, refresh: &str) -> CredentialPair {
	CredentialPair::new(access, refresh).expect("Credential fixture should be valid.")
}

#[tokio::test]
async fn save_replaces_both_tokens_together() {
	let store = MemoryStore::default();

	store.save(pair("Bearer a1", "Bearer r1")).await.expect("First save should succeed.");
	store.save(pair("Bearer a2", "Bearer r2")).await.expect("Second save should succeed.");

	let loaded = store
		.load()
		.await
		.expect("Loading from the memory store should succeed.")
		.expect("Saved pair should remain present.");

	assert_eq!(loaded, pair("Bearer a2", "Bearer r2"));

	let raw = String::from_utf8(store.raw_entry().expect("Entry should be present."))
		.expect("Entry should be UTF-8 JSON.");

	assert!(raw.contains("\"accessToken\":\"Bearer a2\""));
	assert!(raw.contains("\"refreshToken\":\"Bearer r2\""));
}

#[tokio::test]
async fn clones_share_one_entry() {
	let store = MemoryStore::default();
	let view = store.clone();

	store.save(pair("Bearer a1", "Bearer r1")).await.expect("Save should succeed.");

	assert!(view.load().await.expect("Load should succeed.").is_some());

	view.clear().await.expect("Clear should succeed.");

	assert_eq!(store.load().await.expect("Load should succeed."), None);
	assert_eq!(store.raw_entry(), None);
}

#[tokio::test]
async fn partial_and_blank_entries_load_as_absent() {
	for raw in [
		"{\"accessToken\":\"Bearer a1\"}",
		"{\"refreshToken\":\"Bearer r1\"}",
		"{\"accessToken\":\"\",\"refreshToken\":\"Bearer r1\"}",
		"[]",
	] {
		let store = MemoryStore::with_raw_entry(raw);

		assert_eq!(store.load().await.expect("Load should not fail on bad entries."), None, "{raw}");
		assert_eq!(store.raw_entry().as_deref(), Some(raw.as_bytes()));
	}
}

#[tokio::test]
async fn clearing_an_empty_store_is_a_no_op() {
	let store = MemoryStore::default();

	store.clear().await.expect("Clearing an empty store should succeed.");

	assert_eq!(store.load().await.expect("Load should succeed."), None);
}
