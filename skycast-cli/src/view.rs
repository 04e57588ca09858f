//! View model for one lookup cycle.
//!
//! Everything the terminal shows lives in an explicit [`View`] struct owned by
//! the controller; nothing reads display state from ambient scope. Fields are
//! pre-formatted strings so a render is a straight dump of the struct.

use skycast_core::{PrayerTimes, WeatherReading, glyph};

/// Signed temperature text: positive values get a `+` prefix, zero and
/// negative values print bare.
pub fn format_signed(t: i32) -> String {
    if t > 0 { format!("+{t}") } else { t.to_string() }
}

/// The weather card, as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub city: String,
    pub country: String,
    pub temperature: String,
    pub description: String,
    pub glyph: &'static str,
    pub wind: String,
    pub humidity: String,
    pub feels_like: String,
}

impl WeatherCard {
    pub fn from_reading(reading: &WeatherReading) -> Self {
        Self {
            city: reading.city_name.clone(),
            country: reading.country_name.clone(),
            temperature: format_signed(reading.temperature_c),
            description: reading.description.clone(),
            glyph: glyph::glyph_for(&reading.condition_code),
            wind: format!("{} km/h", reading.wind_speed_kmh),
            humidity: format!("{}%", reading.humidity_percent),
            feels_like: format!("{}°C", format_signed(reading.feels_like_c)),
        }
    }
}

/// Visible page state. At most one of `weather` and `error` is set once a
/// lookup has completed.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub loading: bool,
    pub locating: bool,
    pub error: Option<String>,
    pub weather: Option<WeatherCard>,
    pub prayer: Option<PrayerTimes>,
}

impl View {
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.locating {
            out.push_str("📍 Locating...\n");
        }
        if self.loading {
            out.push_str("⏳ Loading...\n");
        }

        if let Some(message) = &self.error {
            out.push_str(&format!("❌ {message}\n"));
        }

        if let Some(card) = &self.weather {
            out.push_str(&format!("{}  {}, {}\n", card.glyph, card.city, card.country));
            out.push_str(&format!("   {}°C, {}\n", card.temperature, card.description));
            out.push_str(&format!(
                "   💨 {}   💧 {}   feels like {}\n",
                card.wind, card.humidity, card.feels_like
            ));
        }

        if let Some(times) = &self.prayer {
            out.push_str("🕌 Prayer times\n");
            out.push_str(&format!("   Fajr     {}\n", times.fajr));
            out.push_str(&format!("   Sunrise  {}\n", times.sunrise));
            out.push_str(&format!("   Dhuhr    {}\n", times.dhuhr));
            out.push_str(&format!("   Asr      {}\n", times.asr));
            out.push_str(&format!("   Maghrib  {}\n", times.maghrib));
            out.push_str(&format!("   Isha     {}\n", times.isha));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reading() -> WeatherReading {
        WeatherReading {
            city_name: "Paris".to_string(),
            country_name: "France".to_string(),
            temperature_c: 18,
            feels_like_c: 17,
            description: "Sunny".to_string(),
            condition_code: "113".to_string(),
            wind_speed_kmh: 14.0,
            humidity_percent: 71,
            latitude: 48.857,
            longitude: 2.351,
        }
    }

    #[test]
    fn positive_temperatures_get_a_plus_prefix() {
        assert_eq!(format_signed(5), "+5");
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(-3), "-3");
    }

    #[test]
    fn card_formats_all_fields() {
        let card = WeatherCard::from_reading(&reading());

        assert_eq!(card.city, "Paris");
        assert_eq!(card.country, "France");
        assert_eq!(card.temperature, "+18");
        assert_eq!(card.glyph, "☀️");
        assert_eq!(card.wind, "14 km/h");
        assert_eq!(card.humidity, "71%");
        assert_eq!(card.feels_like, "+17°C");
    }

    #[test]
    fn unknown_condition_code_renders_the_fallback_glyph() {
        let mut r = reading();
        r.condition_code = "777".to_string();

        assert_eq!(WeatherCard::from_reading(&r).glyph, "🌡️");
    }

    #[test]
    fn card_roundtrips_the_normalized_values() {
        let r = reading();
        let card = WeatherCard::from_reading(&r);

        // Reading the displayed fields back must reproduce the reading exactly.
        assert_eq!(card.temperature.trim_start_matches('+').parse::<i32>().unwrap(), r.temperature_c);
        let feels: i32 = card
            .feels_like
            .trim_end_matches("°C")
            .trim_start_matches('+')
            .parse()
            .unwrap();
        assert_eq!(feels, r.feels_like_c);
        let wind: f64 = card.wind.trim_end_matches(" km/h").parse().unwrap();
        assert_eq!(wind, r.wind_speed_kmh);
        let humidity: u8 = card.humidity.trim_end_matches('%').parse().unwrap();
        assert_eq!(humidity, r.humidity_percent);
    }

    #[test]
    fn fractional_wind_speed_keeps_its_precision() {
        let mut r = reading();
        r.wind_speed_kmh = 13.5;

        assert_eq!(WeatherCard::from_reading(&r).wind, "13.5 km/h");
    }

    #[test]
    fn render_shows_error_banner_without_weather_card() {
        let view = View {
            error: Some("City not found".to_string()),
            ..View::default()
        };
        let rendered = view.render();

        assert!(rendered.contains("❌ City not found"));
        assert!(!rendered.contains("°C"));
    }
}
