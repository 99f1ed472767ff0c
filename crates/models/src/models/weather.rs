use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Severity shared by weather and harvest alerts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Advisory,
    Warning,
    Severe,
}

/// Observed conditions at the farm's location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct WeatherConditions {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub wind_speed_kph: f64,
    pub precipitation_mm: f64,
    pub conditions: String,
    pub observed_at: DateTime<Utc>,
}

/// An active weather alert for the farm's coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct WeatherAlert {
    pub id: String,
    pub severity: AlertSeverity,
    pub headline: String,
    pub message: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// One day of forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct WeatherForecast {
    pub date: NaiveDate,
    pub high_c: f64,
    pub low_c: f64,
    pub precipitation_probability: f64,
    pub conditions: String,
}

/// The weather slice of the dashboard view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct WeatherData {
    pub current: Option<WeatherConditions>,
    #[serde(default)]
    pub alerts: Vec<WeatherAlert>,
    #[serde(default)]
    pub forecast: Vec<WeatherForecast>,
}

/// Success payload of `GET /api/weather/current`: the current conditions,
/// optionally carrying a short embedded forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(flatten)]
    pub conditions: WeatherConditions,
    #[serde(default)]
    pub forecast: Vec<WeatherForecast>,
}

/// Success payload of `GET /api/weather/alerts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlertsResponse {
    #[serde(default)]
    pub alerts: Vec<WeatherAlert>,
}
