//! Wire types exchanged with the controller.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Label shown for a timestamp we cannot parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// One time-stamped temperature reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Timestamp as sent by the controller.
    pub datetime: String,
    /// Temperature in °C.
    pub temperature: f64,
    /// Presence sensor state at the time of the reading, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<bool>,
}

impl Sample {
    /// Time-of-day label for the chart's x axis.
    pub fn time_of_day(&self) -> String {
        format_time_of_day(&self.datetime)
    }
}

/// Format a controller timestamp as `HH:MM:SS`.
///
/// Timestamps with an offset are shown in local time. Naive timestamps are
/// shown as written, since the controller stamps them in its own local time.
pub fn format_time_of_day(raw: &str) -> String {
    const TIME: &str = "%H:%M:%S";

    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIME).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(TIME).to_string();
        }
    }
    if let Ok(t) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return t.format(TIME).to_string();
    }
    INVALID_DATE.to_string()
}

/// Settings pushed to the controller.
///
/// Values are the raw form strings; nothing is validated or converted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Target temperature.
    pub user_temp: String,
    /// Light level or switch-on time.
    pub user_light: String,
    /// How long the light stays on.
    pub light_duration: String,
}

/// A settings value the controller may report as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

/// The controller's current settings, as returned by `/settings`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceSettings {
    /// Temperature that switches the fan on.
    #[serde(default)]
    pub user_temp: Option<SettingValue>,
    /// Time the light switches on.
    #[serde(default)]
    pub user_light: Option<SettingValue>,
    /// Time the light switches off.
    #[serde(default)]
    pub light_time_off: Option<SettingValue>,
}

impl DeviceSettings {
    /// Rows for display, with `-` for values the controller did not report.
    pub fn rows(&self) -> [(&'static str, String); 3] {
        let show = |v: &Option<SettingValue>| {
            v.as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        [
            ("Fan trigger", show(&self.user_temp)),
            ("Light on", show(&self.user_light)),
            ("Light off", show(&self.light_time_off)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sample_decodes_controller_payload() {
        let json = r#"[
            {"temperature": 24.5, "presence": true, "datetime": "2024-05-01T12:34:56.123456"},
            {"temperature": 25.0, "datetime": "2024-05-01T12:35:01"}
        ]"#;
        let samples: Vec<Sample> = serde_json::from_str(json).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].presence, Some(true));
        assert_eq!(samples[1].presence, None);
        assert_eq!(samples[1].temperature, 25.0);
    }

    #[test]
    fn test_naive_timestamps_keep_wall_clock() {
        assert_eq!(format_time_of_day("2024-05-01T12:34:56.123456"), "12:34:56");
        assert_eq!(format_time_of_day("2024-05-01T07:00:00"), "07:00:00");
        assert_eq!(format_time_of_day("2024-05-01 23:59:59"), "23:59:59");
        assert_eq!(format_time_of_day("18:30:00"), "18:30:00");
    }

    #[test]
    fn test_offset_timestamps_convert_to_local() {
        let expected = Local
            .from_utc_datetime(
                &NaiveDateTime::parse_from_str("2024-05-01T10:00:00", "%Y-%m-%dT%H:%M:%S")
                    .unwrap(),
            )
            .format("%H:%M:%S")
            .to_string();

        assert_eq!(format_time_of_day("2024-05-01T10:00:00Z"), expected);
    }

    #[test]
    fn test_garbage_timestamp() {
        assert_eq!(format_time_of_day("yesterday"), INVALID_DATE);
        assert_eq!(format_time_of_day(""), INVALID_DATE);
    }

    #[test]
    fn test_settings_serialize_as_strings() {
        let settings = Settings {
            user_temp: "72".to_string(),
            user_light: "80".to_string(),
            light_duration: "60".to_string(),
        };
        let value = serde_json::to_value(&settings).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"user_temp": "72", "user_light": "80", "light_duration": "60"})
        );
    }

    #[test]
    fn test_device_settings_tolerates_shape() {
        let json = r#"{"user_temp": 25.0, "user_light": "18:30:00", "light_time_off": "22:30:00", "_id": "1"}"#;
        let device: DeviceSettings = serde_json::from_str(json).unwrap();
        let rows = device.rows();

        assert_eq!(rows[0], ("Fan trigger", "25".to_string()));
        assert_eq!(rows[1].1, "18:30:00");

        let sparse: DeviceSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(sparse.rows()[2].1, "-");
    }
}
