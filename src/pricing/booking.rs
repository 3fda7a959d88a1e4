//! Order totals that include the distance fee.

// self
use crate::{
	_prelude::*,
	pricing::{FeeQuote, FeeReason},
};

/// Failures raised while composing a booking price.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PricingError {
	/// Provider or customer location is incomplete; checkout must not proceed.
	#[error("Provider or customer location is missing; checkout is blocked.")]
	MissingLocation,
	/// The total does not fit the amount type.
	#[error("Booking total overflows.")]
	Overflow,
}

/// Service amount plus distance fee, in LAK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPrice {
	/// Amount charged for the service itself.
	pub service_amount: u64,
	/// Distance fee line.
	pub distance_fee: u32,
	/// Reason shown next to the distance fee.
	pub distance_reason: FeeReason,
	/// Amount due.
	pub total: u64,
}
impl BookingPrice {
	/// Merges `quote` into `service_amount`, refusing quotes that lack location data.
	pub fn compose(service_amount: u64, quote: FeeQuote) -> Result<Self, PricingError> {
		if quote.requires_location() {
			return Err(PricingError::MissingLocation);
		}

		let total =
			service_amount.checked_add(u64::from(quote.fee)).ok_or(PricingError::Overflow)?;

		Ok(Self { service_amount, distance_fee: quote.fee, distance_reason: quote.reason, total })
	}
}
