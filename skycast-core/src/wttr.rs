//! Client for the wttr.in current-conditions endpoint (`?format=j1`).

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{GeoCoordinate, WeatherReading},
    source::WeatherSource,
};

#[derive(Debug, Clone)]
pub struct WttrClient {
    base: Url,
    http: Client,
}

impl WttrClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid weather base URL: {base_url}"))?;

        Ok(Self {
            base,
            http: Client::new(),
        })
    }

    /// One GET against `{base}/{location}?format=j1`, where `location` is
    /// either a city name or a `lat,lon` pair. The path segment push takes
    /// care of percent-encoding city names.
    async fn fetch(&self, location: &str) -> Result<WeatherReading, WeatherError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| WeatherError::NotFound)?
            .push(location);
        url.query_pairs_mut().append_pair("format", "j1");

        debug!(%url, "requesting weather");

        let res = self.http.get(url).send().await?;

        if !res.status().is_success() {
            return Err(WeatherError::NotFound);
        }

        let body = res.text().await?;
        parse_reading(&body)
    }
}

#[async_trait]
impl WeatherSource for WttrClient {
    async fn fetch_by_city(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        self.fetch(city).await
    }

    async fn fetch_by_coordinates(
        &self,
        coord: GeoCoordinate,
    ) -> Result<WeatherReading, WeatherError> {
        self.fetch(&coord.to_string()).await
    }
}

/// Extract a normalized reading from a `format=j1` body.
///
/// Any missing or unreadable required field collapses to `NoData`; the caller
/// only ever sees one error with a displayable message.
pub fn parse_reading(body: &str) -> Result<WeatherReading, WeatherError> {
    let envelope: WttrEnvelope = serde_json::from_str(body).map_err(|_| WeatherError::NoData)?;

    let current = envelope
        .current_condition
        .into_iter()
        .next()
        .ok_or(WeatherError::NoData)?;
    let area = envelope
        .nearest_area
        .into_iter()
        .next()
        .ok_or(WeatherError::NoData)?;

    // Prefer the localized description when the API sent a non-empty one.
    let description = current
        .lang_ru
        .as_ref()
        .and_then(|values| values.first())
        .map(|v| v.value.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| current.weather_desc.first().map_or("", |v| v.value.as_str()))
        .to_string();

    Ok(WeatherReading {
        city_name: first_value(&area.area_name).ok_or(WeatherError::NoData)?,
        country_name: first_value(&area.country).ok_or(WeatherError::NoData)?,
        temperature_c: parse_whole_degrees(&current.temp_c).ok_or(WeatherError::NoData)?,
        feels_like_c: parse_whole_degrees(&current.feels_like_c).ok_or(WeatherError::NoData)?,
        description,
        condition_code: current.weather_code,
        wind_speed_kmh: current
            .windspeed_kmph
            .parse()
            .map_err(|_| WeatherError::NoData)?,
        humidity_percent: current.humidity.parse().map_err(|_| WeatherError::NoData)?,
        latitude: area.latitude.as_f64().ok_or(WeatherError::NoData)?,
        longitude: area.longitude.as_f64().ok_or(WeatherError::NoData)?,
    })
}

/// Whole degrees out of an upstream temperature string. Takes the integer
/// part, so "17" and "17.6" both read as 17.
fn parse_whole_degrees(raw: &str) -> Option<i32> {
    let value: f64 = raw.trim().parse().ok()?;
    Some(value.trunc() as i32)
}

fn first_value(values: &[ValueField]) -> Option<String> {
    values.first().map(|v| v.value.clone())
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: String,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<ValueField>,
    #[serde(default)]
    lang_ru: Option<Vec<ValueField>>,
    #[serde(rename = "weatherCode")]
    weather_code: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    humidity: String,
}

/// The API has been seen sending coordinates both as a bare string and as a
/// one-element `[{"value": ...}]` array; accept either shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoordField {
    Bare(String),
    Number(f64),
    Wrapped(Vec<ValueField>),
}

impl CoordField {
    fn as_f64(&self) -> Option<f64> {
        match self {
            CoordField::Bare(s) => s.trim().parse().ok(),
            CoordField::Number(n) => Some(*n),
            CoordField::Wrapped(values) => values.first()?.value.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NearestArea {
    #[serde(rename = "areaName", default)]
    area_name: Vec<ValueField>,
    #[serde(default)]
    country: Vec<ValueField>,
    latitude: CoordField,
    longitude: CoordField,
}

#[derive(Debug, Deserialize)]
struct WttrEnvelope {
    #[serde(default)]
    current_condition: Vec<CurrentCondition>,
    #[serde(default)]
    nearest_area: Vec<NearestArea>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(temp: &str, lang_ru: Option<&str>, lat_json: &str, lon_json: &str) -> String {
        let lang_ru = match lang_ru {
            Some(text) => format!(r#""lang_ru": [{{"value": "{text}"}}],"#),
            None => String::new(),
        };

        format!(
            r#"{{
                "current_condition": [{{
                    "temp_C": "{temp}",
                    "FeelsLikeC": "15",
                    "weatherDesc": [{{"value": "Sunny"}}],
                    {lang_ru}
                    "weatherCode": "113",
                    "windspeedKmph": "14",
                    "humidity": "71"
                }}],
                "nearest_area": [{{
                    "areaName": [{{"value": "Paris"}}],
                    "country": [{{"value": "France"}}],
                    "latitude": {lat_json},
                    "longitude": {lon_json}
                }}]
            }}"#
        )
    }

    #[test]
    fn parses_a_complete_reading() {
        let body = fixture("18", None, r#""48.857""#, r#""2.351""#);
        let reading = parse_reading(&body).expect("parses");

        assert_eq!(reading.city_name, "Paris");
        assert_eq!(reading.country_name, "France");
        assert_eq!(reading.temperature_c, 18);
        assert_eq!(reading.feels_like_c, 15);
        assert_eq!(reading.description, "Sunny");
        assert_eq!(reading.condition_code, "113");
        assert_eq!(reading.wind_speed_kmh, 14.0);
        assert_eq!(reading.humidity_percent, 71);
        assert_eq!(reading.latitude, 48.857);
        assert_eq!(reading.longitude, 2.351);
    }

    #[test]
    fn prefers_nonempty_localized_description() {
        let body = fixture("18", Some("Солнечно"), r#""48.857""#, r#""2.351""#);
        let reading = parse_reading(&body).expect("parses");

        assert_eq!(reading.description, "Солнечно");
    }

    #[test]
    fn empty_localized_description_falls_back_to_default() {
        let body = fixture("18", Some(""), r#""48.857""#, r#""2.351""#);
        let reading = parse_reading(&body).expect("parses");

        assert_eq!(reading.description, "Sunny");
    }

    #[test]
    fn accepts_wrapped_coordinate_arrays() {
        let body = fixture(
            "18",
            None,
            r#"[{"value": "48.857"}]"#,
            r#"[{"value": "2.351"}]"#,
        );
        let reading = parse_reading(&body).expect("parses");

        assert_eq!(reading.latitude, 48.857);
        assert_eq!(reading.longitude, 2.351);
    }

    #[test]
    fn negative_and_fractional_temperatures_normalize_to_whole_degrees() {
        let body = fixture("-3", None, r#""48.857""#, r#""2.351""#);
        assert_eq!(parse_reading(&body).expect("parses").temperature_c, -3);

        let body = fixture("17.6", None, r#""48.857""#, r#""2.351""#);
        assert_eq!(parse_reading(&body).expect("parses").temperature_c, 17);
    }

    #[test]
    fn missing_current_condition_is_no_data() {
        let body = r#"{"current_condition": [], "nearest_area": []}"#;
        assert!(matches!(parse_reading(body), Err(WeatherError::NoData)));
    }

    #[test]
    fn malformed_json_is_no_data() {
        assert!(matches!(parse_reading("not json"), Err(WeatherError::NoData)));
    }
}
