//! wttr.in condition-code → emoji table.

/// Returns the display glyph for a wttr.in weather code.
///
/// Codes are compared as the ordered text the API sends. Anything the table
/// does not know renders as a generic thermometer.
pub fn glyph_for(code: &str) -> &'static str {
    match code {
        "113" => "☀️",
        "116" => "⛅",
        "119" | "122" => "☁️",
        "143" | "248" | "260" => "🌫️",
        "176" | "182" | "185" | "263" | "266" | "281" | "284" | "293" | "296" | "299" | "302"
        | "305" | "308" | "311" | "314" | "350" | "353" | "356" | "359" | "374" | "377" => "🌧️",
        "179" | "317" | "320" | "323" | "326" | "362" | "365" | "368" => "🌨️",
        "227" | "230" | "329" | "332" | "335" | "338" | "371" => "❄️",
        "200" | "386" | "389" | "392" | "395" => "⛈️",
        _ => "🌡️",
    }
}
