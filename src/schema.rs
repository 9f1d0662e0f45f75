//! API request schemas and validation
//!
//! Each tool endpoint accepts a small JSON body. Parsing and validation
//! failures are client errors: the handler answers HTTP 200 with
//! `success: false` and the validation message.

use crate::error::CaptureError;
use crate::screenshots::AnimationFormat;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Body of `POST /tools/full-page-screenshot/api`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPageScreenshotRequest {
    pub website: String,
    #[serde(default)]
    pub device_name: Option<String>,
}

/// Body of `POST /tools/screenshots-for-dimensions/api`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScreenshotsRequest {
    pub website: String,
}

/// Body of `POST /tools/scrolling-screenshots/api`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollingScreenshotsRequest {
    pub website: String,
    #[serde(default)]
    pub device: Option<String>,
    pub format: AnimationFormat,
}

/// Parse a JSON request body into a schema type.
pub fn parse_request<T: DeserializeOwned>(body: &str) -> Result<T, CaptureError> {
    serde_json::from_str(body).map_err(|e| CaptureError::MalformedRequest(e.to_string()))
}

/// The target website must be a syntactically valid absolute http(s) URL.
pub fn validate_website(website: &str) -> Result<Url, CaptureError> {
    let parsed = Url::parse(website)
        .map_err(|e| CaptureError::InvalidUrl(format!("{website}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(CaptureError::InvalidUrl(format!(
            "{website}: unsupported scheme '{other}'"
        ))),
    }
}

impl FullPageScreenshotRequest {
    pub fn validate(&self) -> Result<(), CaptureError> {
        validate_website(&self.website)?;
        // Unknown device names deliberately pass: the endpoint falls back
        // to the full-page preset.
        Ok(())
    }
}

impl DimensionScreenshotsRequest {
    pub fn validate(&self) -> Result<(), CaptureError> {
        validate_website(&self.website)?;
        Ok(())
    }
}

impl ScrollingScreenshotsRequest {
    pub fn validate(&self) -> Result<(), CaptureError> {
        validate_website(&self.website)?;
        if let Some(device) = &self.device {
            if crate::devices::find(device).is_none() {
                return Err(CaptureError::UnknownDevice(device.clone()));
            }
        }
        Ok(())
    }
}
