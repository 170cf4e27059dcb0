pub mod error;
pub mod geocode;
pub mod geoip;
pub mod weather;

pub use error::ApiError;
