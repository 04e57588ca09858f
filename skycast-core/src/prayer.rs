//! Client for the AlAdhan daily-timings endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::PrayerError,
    model::{GeoCoordinate, PrayerTimes},
    source::PrayerSource,
};

#[derive(Debug, Clone)]
pub struct AladhanClient {
    base: Url,
    method: u8,
    http: Client,
}

impl AladhanClient {
    pub fn new(base_url: &str, method: u8) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid prayer base URL: {base_url}"))?;

        Ok(Self {
            base,
            method,
            http: Client::new(),
        })
    }
}

#[async_trait]
impl PrayerSource for AladhanClient {
    /// GET `{base}/v1/timings/{D-M-YYYY}?latitude=..&longitude=..&method=..`.
    /// Day and month are not zero-padded; that is the form the API documents.
    async fn fetch_timings(
        &self,
        coord: GeoCoordinate,
        date: NaiveDate,
    ) -> Result<PrayerTimes, PrayerError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| PrayerError::Lookup)?
            .push("v1")
            .push("timings")
            .push(&date.format("%-d-%-m-%Y").to_string());
        url.query_pairs_mut()
            .append_pair("latitude", &coord.latitude.to_string())
            .append_pair("longitude", &coord.longitude.to_string())
            .append_pair("method", &self.method.to_string());

        debug!(%url, "requesting prayer times");

        let res = self.http.get(url).send().await?;

        if !res.status().is_success() {
            return Err(PrayerError::Lookup);
        }

        let body = res.text().await?;
        parse_timings(&body)
    }
}

/// Pull the six timings out of an AlAdhan envelope. The endpoint doubles its
/// HTTP status inside the body, so `code` must also read 200.
pub fn parse_timings(body: &str) -> Result<PrayerTimes, PrayerError> {
    let envelope: AladhanEnvelope = serde_json::from_str(body).map_err(|_| PrayerError::NoData)?;

    if envelope.code != 200 {
        return Err(PrayerError::NoData);
    }

    let timings = envelope
        .data
        .and_then(|data| data.timings)
        .ok_or(PrayerError::NoData)?;

    Ok(PrayerTimes {
        fajr: timings.fajr,
        sunrise: timings.sunrise,
        dhuhr: timings.dhuhr,
        asr: timings.asr,
        maghrib: timings.maghrib,
        isha: timings.isha,
    })
}

#[derive(Debug, Deserialize)]
struct AladhanTimings {
    #[serde(rename = "Fajr")]
    fajr: String,
    #[serde(rename = "Sunrise")]
    sunrise: String,
    #[serde(rename = "Dhuhr")]
    dhuhr: String,
    #[serde(rename = "Asr")]
    asr: String,
    #[serde(rename = "Maghrib")]
    maghrib: String,
    #[serde(rename = "Isha")]
    isha: String,
}

#[derive(Debug, Deserialize)]
struct AladhanData {
    timings: Option<AladhanTimings>,
}

#[derive(Debug, Deserialize)]
struct AladhanEnvelope {
    #[serde(default)]
    code: u16,
    data: Option<AladhanData>,
}
