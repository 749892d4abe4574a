/*
 *  weather.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Current temperature from OpenWeatherMap, rendered as board text
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{OPENWEATHERMAP_URL, WEATHER_ERROR_TEXT, WEATHER_TIMEOUT_SECS};
use crate::glyphs::DEGREE_SIGN;

// Custom error type for weather API operations.
// These stay inside this module; callers only ever see board text.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("OpenWeatherMap returned HTTP {0}")]
    Status(u16),
    #[error("JSON deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("Missing weather data: {0}")]
    MissingData(&'static str),
    #[error("Weather not configured: {0}")]
    NotConfigured(&'static str),
}

/// `F = (K - 273.15) * 9/5 + 32`
pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - 273.15) * 9.0 / 5.0 + 32.0
}

/// Whole degrees with the degree mark, e.g. `72°F`.
pub fn format_fahrenheit(kelvin: f64) -> String {
    let f = kelvin_to_fahrenheit(kelvin).round() as i64;
    format!("{}{}F", f, DEGREE_SIGN)
}

/// Pull `main.temp` (Kelvin) out of a current-conditions response.
pub fn parse_kelvin(body: &str) -> Result<f64, WeatherError> {
    let json: Value = serde_json::from_str(body)?;
    json.get("main")
        .and_then(|m| m.get("temp"))
        .and_then(Value::as_f64)
        .ok_or(WeatherError::MissingData("main.temp"))
}

// Main Weather client
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    zip: String,
}

impl WeatherClient {
    /// US five digit `zip` and an OpenWeatherMap `api_key`.
    pub fn new(api_key: &str, zip: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(WEATHER_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: OPENWEATHERMAP_URL.to_string(),
            api_key: api_key.trim().to_string(),
            zip: zip.trim().to_string(),
        })
    }

    /// Point at a different endpoint (local stubs in tests).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.zip.is_empty()
    }

    async fn fetch_kelvin(&self) -> Result<f64, WeatherError> {
        if self.api_key.is_empty() {
            return Err(WeatherError::NotConfigured("api_key"));
        }
        if self.zip.is_empty() {
            return Err(WeatherError::NotConfigured("zip"));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("zip", format!("{},us", self.zip)), ("appid", self.api_key.clone())])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        debug!("Weather response: {} bytes", body.len());
        parse_kelvin(&body)
    }

    /// Current temperature as board text, or `ERROR` on any failure.
    ///
    /// The sentinel is displayed like any other message, so a failed lookup
    /// and a message that happens to read `ERROR` look the same on the board.
    pub async fn current_temperature(&self) -> String {
        match self.fetch_kelvin().await {
            Ok(kelvin) => format_fahrenheit(kelvin),
            Err(e @ WeatherError::NotConfigured(_)) => {
                warn!("{}", e);
                WEATHER_ERROR_TEXT.to_string()
            }
            Err(e) => {
                error!("Weather lookup failed: {}", e);
                WEATHER_ERROR_TEXT.to_string()
            }
        }
    }
}
