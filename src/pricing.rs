//! Cross-district distance-fee pricing for bookings.
//!
//! [`DistrictFeeResolver`] prices the distance component of a booking from a literal route table
//! keyed by the ordered (provider district, customer district) pair. The table is hand-authored
//! business data: it is neither symmetric nor total, and lookups never infer missing routes.
//! [`BookingPrice`] merges the resolved fee into the order total.

pub mod booking;
pub mod district;
pub mod quote;
pub mod table;

pub use booking::*;
pub use district::*;
pub use quote::*;
pub use table::Route;
