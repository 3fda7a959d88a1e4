//! Distance-fee resolution.

// self
use crate::{
	_prelude::*,
	pricing::{
		District,
		table::{Route, STANDARD_ROUTES},
	},
};

/// Distance band derived from a tabulated fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTier {
	/// Below 15,000.
	Nearby,
	/// 15,000 up to 20,000.
	Medium,
	/// 20,000 up to 25,000.
	Far,
	/// 25,000 and above.
	VeryFar,
}
impl DistanceTier {
	/// Classifies a tabulated fee.
	pub const fn from_fee(fee: u32) -> Self {
		match fee {
			25_000.. => DistanceTier::VeryFar,
			20_000.. => DistanceTier::Far,
			15_000.. => DistanceTier::Medium,
			_ => DistanceTier::Nearby,
		}
	}

	/// Human-readable label.
	pub const fn label(self) -> &'static str {
		match self {
			DistanceTier::Nearby => "Nearby district",
			DistanceTier::Medium => "Medium distance",
			DistanceTier::Far => "Far distance",
			DistanceTier::VeryFar => "Very far distance",
		}
	}
}

/// Why a quote carries its fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeReason {
	/// Provider or customer district is empty or unknown; checkout must be blocked.
	MissingLocation,
	/// Provider and customer share a district.
	SameLocation,
	/// Tabulated route.
	Distance(DistanceTier),
	/// The route is not tabulated and carries no fee.
	NoRoute,
}
impl Display for FeeReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			FeeReason::MissingLocation => f.write_str("Missing location data"),
			FeeReason::SameLocation => f.write_str("Same location"),
			FeeReason::Distance(tier) => f.write_str(tier.label()),
			FeeReason::NoRoute => f.write_str("No distance fee for this route"),
		}
	}
}

/// Distance fee line for one booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
	/// Fee amount in LAK.
	pub fee: u32,
	/// Reason shown next to the fee.
	pub reason: FeeReason,
}
impl FeeQuote {
	const fn free(reason: FeeReason) -> Self {
		Self { fee: 0, reason }
	}

	/// Returns `true` when the quote is a data-completeness signal rather than a price.
	pub fn requires_location(&self) -> bool {
		matches!(self.reason, FeeReason::MissingLocation)
	}
}

/// Prices the distance component of a booking from a literal route table.
#[derive(Clone, Copy, Debug)]
pub struct DistrictFeeResolver {
	routes: &'static [Route],
}
impl DistrictFeeResolver {
	/// Resolver over the standard Vientiane table.
	pub const fn standard() -> Self {
		Self { routes: STANDARD_ROUTES }
	}

	/// Resolver over another literal table.
	pub const fn with_routes(routes: &'static [Route]) -> Self {
		Self { routes }
	}

	/// Resolves the fee between two district identifiers (case-insensitive).
	///
	/// An empty or unknown identifier yields fee 0 with [`FeeReason::MissingLocation`].
	pub fn resolve(&self, provider_district: &str, customer_district: &str) -> FeeQuote {
		match (provider_district.parse::<District>(), customer_district.parse::<District>()) {
			(Ok(provider), Ok(customer)) => self.resolve_districts(provider, customer),
			_ => FeeQuote::free(FeeReason::MissingLocation),
		}
	}

	/// Resolves the fee for the ordered pair; the direction is never normalized.
	pub fn resolve_districts(&self, provider: District, customer: District) -> FeeQuote {
		if provider == customer {
			return FeeQuote::free(FeeReason::SameLocation);
		}

		match self.route_fee(provider, customer) {
			Some(fee) => FeeQuote { fee, reason: FeeReason::Distance(DistanceTier::from_fee(fee)) },
			None => FeeQuote::free(FeeReason::NoRoute),
		}
	}

	fn route_fee(&self, from: District, to: District) -> Option<u32> {
		self.routes.iter().find(|route| route.from == from && route.to == to).map(|route| route.fee)
	}
}
impl Default for DistrictFeeResolver {
	fn default() -> Self {
		Self::standard()
	}
}

/// Resolves against the standard table; see [`DistrictFeeResolver::resolve`].
pub fn resolve(provider_district: &str, customer_district: &str) -> FeeQuote {
	DistrictFeeResolver::standard().resolve(provider_district, customer_district)
}
