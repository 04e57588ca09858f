//! Drives one lookup cycle against the view model.
//!
//! Overlapping lookups are allowed and nothing in flight is cancelled, but a
//! response only touches the view if its request generation is still the
//! latest. Stale responses are discarded instead of racing on the display.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use tokio::sync::Mutex;
use tracing::debug;

use skycast_core::{GeoCoordinate, PositionSource, PrayerSource, WeatherSource};

use crate::view::{View, WeatherCard};

/// What triggered the lookup: a typed/picked city or a coordinate pair.
#[derive(Debug, Clone)]
pub enum LookupSource {
    City(String),
    Coordinates(GeoCoordinate),
}

/// Fallback banner text for a weather failure whose message is empty.
const GENERIC_WEATHER_ERROR: &str = "Could not fetch weather";

pub struct Controller<W, P> {
    weather: W,
    prayer: P,
    view: Mutex<View>,
    generation: AtomicU64,
}

impl<W: WeatherSource, P: PrayerSource> Controller<W, P> {
    pub fn new(weather: W, prayer: P) -> Self {
        Self {
            weather,
            prayer,
            view: Mutex::new(View::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current view state.
    pub async fn view(&self) -> View {
        self.view.lock().await.clone()
    }

    /// Run one full lookup: weather, then (best-effort) prayer times for the
    /// returned coordinates. Loading is cleared last on every path.
    pub async fn on_weather_requested(&self, source: LookupSource) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut view = self.view.lock().await;
            view.loading = true;
            view.error = None;
            view.weather = None;
        }

        let result = match &source {
            LookupSource::City(city) => self.weather.fetch_by_city(city).await,
            LookupSource::Coordinates(coord) => self.weather.fetch_by_coordinates(*coord).await,
        };

        match result {
            Ok(reading) => {
                let coord = reading.coordinates();
                let applied = {
                    let mut view = self.view.lock().await;
                    if self.is_current(generation) {
                        view.weather = Some(WeatherCard::from_reading(&reading));
                        view.error = None;
                        true
                    } else {
                        false
                    }
                };

                // Prayer times are an enhancement: fetched only for a reading
                // that actually made it to the display, and any failure just
                // hides the card.
                if applied {
                    self.fetch_prayer_times(coord, generation).await;
                }
            }
            Err(err) => {
                let mut view = self.view.lock().await;
                if self.is_current(generation) {
                    let message = err.to_string();
                    view.error = Some(if message.is_empty() {
                        GENERIC_WEATHER_ERROR.to_string()
                    } else {
                        message
                    });
                    view.weather = None;
                    view.prayer = None;
                }
            }
        }

        let mut view = self.view.lock().await;
        if self.is_current(generation) {
            view.loading = false;
        }
    }

    /// Resolve the host position once, then look up weather there. Failures
    /// land in the error banner; the locating indicator is restored on every
    /// path.
    pub async fn locate_and_fetch<L: PositionSource>(&self, locator: &L) {
        {
            let mut view = self.view.lock().await;
            view.locating = true;
        }

        let located = locator.locate().await;

        {
            let mut view = self.view.lock().await;
            view.locating = false;
        }

        match located {
            Ok(coord) => {
                self.on_weather_requested(LookupSource::Coordinates(coord))
                    .await;
            }
            Err(err) => {
                let mut view = self.view.lock().await;
                view.error = Some(err.to_string());
            }
        }
    }

    async fn fetch_prayer_times(&self, coord: GeoCoordinate, generation: u64) {
        let today = Local::now().date_naive();

        match self.prayer.fetch_timings(coord, today).await {
            Ok(times) => {
                let mut view = self.view.lock().await;
                if self.is_current(generation) {
                    view.prayer = Some(times);
                }
            }
            Err(err) => {
                debug!(error = %err, "prayer lookup failed, hiding card");
                let mut view = self.view.lock().await;
                if self.is_current(generation) {
                    view.prayer = None;
                }
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
