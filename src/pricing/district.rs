//! The seven Vientiane districts used as pricing zones.

// self
use crate::_prelude::*;

/// Errors returned when a district identifier cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum DistrictError {
	/// The identifier was empty or whitespace.
	#[error("District identifier is empty.")]
	Empty,
	/// The identifier does not name one of the seven districts.
	#[error("Unknown district `{value}`.")]
	Unknown {
		/// Identifier as supplied.
		value: String,
	},
}

/// Administrative district of Vientiane Capital.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum District {
	/// Chanthabouly.
	Chanthabouly,
	/// Sikhottabong.
	Sikhottabong,
	/// Xaysetha.
	Xaysetha,
	/// Sisattanak.
	Sisattanak,
	/// Naxaithong.
	Naxaithong,
	/// Xaytany.
	Xaytany,
	/// Hadxaifong.
	Hadxaifong,
}
impl District {
	/// Every district, in declaration order.
	pub const ALL: [District; 7] = [
		District::Chanthabouly,
		District::Sikhottabong,
		District::Xaysetha,
		District::Sisattanak,
		District::Naxaithong,
		District::Xaytany,
		District::Hadxaifong,
	];

	/// Lowercase identifier used on the wire and in the route table.
	pub const fn as_str(self) -> &'static str {
		match self {
			District::Chanthabouly => "chanthabouly",
			District::Sikhottabong => "sikhottabong",
			District::Xaysetha => "xaysetha",
			District::Sisattanak => "sisattanak",
			District::Naxaithong => "naxaithong",
			District::Xaytany => "xaytany",
			District::Hadxaifong => "hadxaifong",
		}
	}

	/// Human-readable district name.
	pub const fn display_name(self) -> &'static str {
		match self {
			District::Chanthabouly => "Chanthabouly",
			District::Sikhottabong => "Sikhottabong",
			District::Xaysetha => "Xaysetha",
			District::Sisattanak => "Sisattanak",
			District::Naxaithong => "Naxaithong",
			District::Xaytany => "Xaytany",
			District::Hadxaifong => "Hadxaifong",
		}
	}
}
impl Display for District {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for District {
	type Err = DistrictError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let view = s.trim();

		if view.is_empty() {
			return Err(DistrictError::Empty);
		}

		District::ALL
			.into_iter()
			.find(|district| district.as_str().eq_ignore_ascii_case(view))
			.ok_or_else(|| DistrictError::Unknown { value: s.to_owned() })
	}
}
