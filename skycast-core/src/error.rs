use thiserror::Error;

/// Failures of a weather lookup. The message is what the error banner shows,
/// so every variant renders as a complete human-readable sentence.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Weather endpoint answered with a non-success status.
    #[error("City not found")]
    NotFound,

    /// Successful response but no `current_condition` record to read.
    #[error("No weather data in response")]
    NoData,

    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("Could not fetch weather: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures of a prayer-times lookup. These never reach the user; the
/// controller hides the prayer card and moves on.
#[derive(Debug, Error)]
pub enum PrayerError {
    /// Prayer endpoint answered with a non-success status.
    #[error("Prayer times lookup failed")]
    Lookup,

    /// Body arrived but `code != 200` or `data.timings` was missing.
    #[error("No prayer timings in response")]
    NoData,

    #[error("Could not fetch prayer times: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures of the geo-IP position lookup, each mapped to one fixed
/// user-facing message.
#[derive(Debug, Error)]
pub enum GeolocateError {
    /// Lookup is switched off in the config.
    #[error("Location lookup is not enabled")]
    Unsupported,

    /// The service refused us (403/429).
    #[error("Location request was denied")]
    Denied,

    /// The service answered but could not produce a position.
    #[error("Location is unavailable")]
    Unavailable,

    #[error("Location request timed out")]
    Timeout,

    /// Anything else, including transport failures.
    #[error("Could not determine location")]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_messages_are_user_facing() {
        assert_eq!(WeatherError::NotFound.to_string(), "City not found");
        assert_eq!(WeatherError::NoData.to_string(), "No weather data in response");
    }

    #[test]
    fn geolocate_messages_are_distinct() {
        let messages = [
            GeolocateError::Unsupported.to_string(),
            GeolocateError::Denied.to_string(),
            GeolocateError::Unavailable.to_string(),
            GeolocateError::Timeout.to_string(),
            GeolocateError::Other.to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
