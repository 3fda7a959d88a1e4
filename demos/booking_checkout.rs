//! Demonstrates a checkout against a mock HomeCare API: the first booking call hits an expired
//! session, the client refreshes once and retries, and the total includes the distance fee.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use homecare_client::{
	client::ReqwestAuthClient,
	config::ClientConfig,
	http::{ApiRequest, ReqwestTransport},
	pricing::{BookingPrice, DistrictFeeResolver},
	reqwest::Client,
	store::{MemoryStore, TokenStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let expired = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/bookings").header("authorization", "Bearer stale-access");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh").header("authorization", "Bearer demo-refresh");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"fresh-access\",\"refresh_token\":\"fresh-refresh\"}",
			);
		})
		.await;
	let booked = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/bookings").header("authorization", "Bearer fresh-access");
			then.status(201).header("content-type", "application/json").body("{\"id\":\"bk-42\"}");
		})
		.await;
	let config = ClientConfig::builder()
		.refresh_endpoint(Url::parse(&server.url("/auth/refresh"))?)
		.allow_insecure_http(true)
		.build()?;
	let store: Arc<dyn TokenStore> = Arc::new(MemoryStore::default());
	let transport =
		ReqwestTransport::from_builder(Client::builder().user_agent("homecare-checkout-demo"))?;
	let client = ReqwestAuthClient::with_transport(store, config, transport);

	client.sign_in("stale-access", "demo-refresh").await?;

	let quote = DistrictFeeResolver::standard().resolve("Sikhottabong", "hadxaifong");
	let price = BookingPrice::compose(150_000, quote)?;

	println!("Distance fee: {} LAK ({}).", price.distance_fee, price.distance_reason);
	println!("Total due: {} LAK.", price.total);

	let request = ApiRequest::post(Url::parse(&server.url("/v1/bookings"))?).json(&price)?;
	let response = client.send(request).await?;

	println!("Booking created with status {}: {}.", response.status, response.text());
	println!("Refresh attempts: {}.", client.refresh_metrics.attempts());

	expired.assert_async().await;
	refresh.assert_async().await;
	booked.assert_async().await;

	Ok(())
}
