use serde::{Deserialize, Serialize};

/// A pair of WGS84 coordinates, passed by value between the locator and the
/// weather client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Normalized snapshot of current conditions for one location at lookup time.
///
/// Built from a single upstream JSON document and consumed by a single render.
/// Temperatures are whole degrees Celsius with no embedded sign formatting;
/// the display layer decides how to print them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city_name: String,
    pub country_name: String,
    pub temperature_c: i32,
    pub feels_like_c: i32,
    pub description: String,
    pub condition_code: String,
    pub wind_speed_kmh: f64,
    pub humidity_percent: u8,
    pub latitude: f64,
    pub longitude: f64,
}

impl WeatherReading {
    pub fn coordinates(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

/// The six canonical daily prayer timestamps for one coordinate and date.
///
/// Times are kept as the upstream `HH:MM` strings; nothing downstream does
/// arithmetic on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}
