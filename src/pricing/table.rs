//! Literal distance-fee routes, in LAK.
//!
//! Rows are keyed by (provider district, customer district). Several routes differ by
//! direction and a few are absent; both are business rules and must stay as tabulated.

// self
use crate::{
	_prelude::*,
	pricing::District::{
		self, Chanthabouly as Chan, Hadxaifong as Hadx, Naxaithong as Naxa, Sikhottabong as Sikh,
		Sisattanak as Sisa, Xaysetha as Xays, Xaytany as Xayt,
	},
};

/// One tabulated route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
	/// Provider district.
	pub from: District,
	/// Customer district.
	pub to: District,
	/// Distance fee for this direction.
	pub fee: u32,
}
impl Route {
	/// Creates a route.
	pub const fn new(from: District, to: District, fee: u32) -> Self {
		Self { from, to, fee }
	}
}

/// Standard Vientiane route table.
pub static STANDARD_ROUTES: &[Route] = &[
	// Chanthabouly
	Route::new(Chan, Sisa, 10_000),
	Route::new(Chan, Xays, 10_000),
	Route::new(Chan, Sikh, 10_000),
	Route::new(Chan, Xayt, 15_000),
	Route::new(Chan, Hadx, 15_000),
	Route::new(Chan, Naxa, 20_000),
	// Sisattanak
	Route::new(Sisa, Chan, 10_000),
	Route::new(Sisa, Xays, 10_000),
	Route::new(Sisa, Hadx, 10_000),
	Route::new(Sisa, Sikh, 15_000),
	Route::new(Sisa, Xayt, 15_000),
	Route::new(Sisa, Naxa, 20_000),
	// Xaysetha
	Route::new(Xays, Chan, 10_000),
	Route::new(Xays, Sisa, 10_000),
	Route::new(Xays, Xayt, 10_000),
	Route::new(Xays, Sikh, 15_000),
	Route::new(Xays, Hadx, 15_000),
	Route::new(Xays, Naxa, 20_000),
	// Sikhottabong
	Route::new(Sikh, Chan, 10_000),
	Route::new(Sikh, Naxa, 10_000),
	Route::new(Sikh, Sisa, 15_000),
	Route::new(Sikh, Xays, 15_000),
	Route::new(Sikh, Xayt, 20_000),
	Route::new(Sikh, Hadx, 20_000),
	// Xaytany
	Route::new(Xayt, Xays, 10_000),
	Route::new(Xayt, Chan, 15_000),
	Route::new(Xayt, Sisa, 15_000),
	Route::new(Xayt, Naxa, 15_000),
	Route::new(Xayt, Sikh, 20_000),
	Route::new(Xayt, Hadx, 20_000),
	// Naxaithong
	Route::new(Naxa, Sikh, 10_000),
	Route::new(Naxa, Chan, 20_000),
	Route::new(Naxa, Xayt, 20_000),
	Route::new(Naxa, Hadx, 25_000),
	// Hadxaifong
	Route::new(Hadx, Sisa, 10_000),
	Route::new(Hadx, Chan, 15_000),
	Route::new(Hadx, Xays, 15_000),
	Route::new(Hadx, Xayt, 20_000),
	Route::new(Hadx, Sikh, 25_000),
];
