//! HTTP request handlers for Second API.

pub mod forecast;
pub mod health;
pub mod me;
pub mod token;

pub use forecast::get_forecast;
pub use health::health_check;
pub use me::get_me;
pub use token::validate_token;
