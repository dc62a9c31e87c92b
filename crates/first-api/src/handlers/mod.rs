//! HTTP request handlers for First API.

pub mod forecast;
pub mod health;
pub mod me;
pub mod peer;
pub mod token;

pub use forecast::get_forecast;
pub use health::health_check;
pub use me::get_me;
pub use peer::{forecast_from_peer, me_from_peer};
pub use token::validate_token;
