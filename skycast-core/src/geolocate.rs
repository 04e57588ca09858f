//! Geo-IP position lookup. One request, one resolution: the caller awaits a
//! single coordinate pair or a single classified failure.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::GeoIpConfig, error::GeolocateError, model::GeoCoordinate, source::PositionSource,
};

#[derive(Debug, Clone)]
pub struct IpLocator {
    enabled: bool,
    url: Url,
    http: Client,
}

impl IpLocator {
    pub fn new(cfg: &GeoIpConfig) -> Result<Self> {
        let url = Url::parse(&cfg.url)
            .with_context(|| format!("Invalid geo-IP lookup URL: {}", cfg.url))?;

        Ok(Self {
            enabled: cfg.enabled,
            url,
            http: Client::new(),
        })
    }
}

#[async_trait]
impl PositionSource for IpLocator {
    /// Ask the geo-IP service where this host is.
    async fn locate(&self) -> Result<GeoCoordinate, GeolocateError> {
        if !self.enabled {
            return Err(GeolocateError::Unsupported);
        }

        debug!(url = %self.url, "requesting position");

        let res = self.http.get(self.url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                GeolocateError::Timeout
            } else {
                GeolocateError::Other
            }
        })?;

        match res.status() {
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                return Err(GeolocateError::Denied);
            }
            status if !status.is_success() => return Err(GeolocateError::Other),
            _ => {}
        }

        let body = res.text().await.map_err(|_| GeolocateError::Other)?;
        parse_position(&body)
    }
}

/// Read an ip-api.com answer. A well-formed "fail" answer means the service
/// could not position us; everything else unreadable is the generic failure.
pub fn parse_position(body: &str) -> Result<GeoCoordinate, GeolocateError> {
    let envelope: GeoIpEnvelope =
        serde_json::from_str(body).map_err(|_| GeolocateError::Other)?;

    if envelope.status != "success" {
        warn!(message = envelope.message.as_deref().unwrap_or(""), "position lookup failed");
        return Err(GeolocateError::Unavailable);
    }

    match (envelope.lat, envelope.lon) {
        (Some(lat), Some(lon)) => Ok(GeoCoordinate::new(lat, lon)),
        _ => Err(GeolocateError::Unavailable),
    }
}

#[derive(Debug, Deserialize)]
struct GeoIpEnvelope {
    #[serde(default)]
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeoIpConfig;

    #[test]
    fn parses_a_successful_position() {
        let body = r#"{"status": "success", "lat": 48.8566, "lon": 2.3522}"#;
        let coord = parse_position(body).expect("parses");

        assert_eq!(coord.latitude, 48.8566);
        assert_eq!(coord.longitude, 2.3522);
    }

    #[test]
    fn fail_status_is_unavailable() {
        let body = r#"{"status": "fail", "message": "private range"}"#;
        assert!(matches!(parse_position(body), Err(GeolocateError::Unavailable)));
    }

    #[test]
    fn success_without_coordinates_is_unavailable() {
        let body = r#"{"status": "success"}"#;
        assert!(matches!(parse_position(body), Err(GeolocateError::Unavailable)));
    }

    #[test]
    fn garbage_body_is_the_generic_failure() {
        assert!(matches!(parse_position("<html>"), Err(GeolocateError::Other)));
    }

    #[tokio::test]
    async fn disabled_lookup_reports_unsupported() {
        let cfg = GeoIpConfig {
            enabled: false,
            ..GeoIpConfig::default()
        };
        let locator = IpLocator::new(&cfg).expect("constructs");

        assert!(matches!(locator.locate().await, Err(GeolocateError::Unsupported)));
    }
}
