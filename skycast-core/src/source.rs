//! Lookup seams, so the display controller can be exercised against fakes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::{GeolocateError, PrayerError, WeatherError},
    model::{GeoCoordinate, PrayerTimes, WeatherReading},
};

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// `city` must be non-empty after trimming; callers check before invoking.
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherReading, WeatherError>;

    async fn fetch_by_coordinates(
        &self,
        coord: GeoCoordinate,
    ) -> Result<WeatherReading, WeatherError>;
}

#[async_trait]
pub trait PrayerSource: Send + Sync {
    async fn fetch_timings(
        &self,
        coord: GeoCoordinate,
        date: NaiveDate,
    ) -> Result<PrayerTimes, PrayerError>;
}

/// Single-resolution position lookup: resolves exactly once, with either a
/// coordinate pair or one classified failure.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn locate(&self) -> Result<GeoCoordinate, GeolocateError>;
}
