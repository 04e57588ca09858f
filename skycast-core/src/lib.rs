//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - HTTP clients for the weather, prayer-times, and geo-IP endpoints
//! - Shared domain models and error types
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geolocate;
pub mod glyph;
pub mod model;
pub mod prayer;
pub mod source;
pub mod wttr;

pub use config::Config;
pub use error::{GeolocateError, PrayerError, WeatherError};
pub use geolocate::IpLocator;
pub use model::{GeoCoordinate, PrayerTimes, WeatherReading};
pub use prayer::AladhanClient;
pub use source::{PositionSource, PrayerSource, WeatherSource};
pub use wttr::WttrClient;
