mod helpers;
mod price;
mod secret;

pub use helpers::{parse_boolean_flag, parse_millis, parse_positive};
pub use price::{Price, PriceConversionError};
pub use secret::Secret;
