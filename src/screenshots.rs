//! Screenshot request building
//!
//! Maps device presets onto provider capture options, applies the cache
//! key/TTL policy, and produces signed URLs. This is the only logic the
//! service owns: rendering, storage and caching all live behind the
//! provider's signed-URL scheme.

use crate::devices::{self, DevicePreset};
use crate::signer::{CaptureOptions, RenderClient};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache key for the demo capture; served for 30 days.
pub const EXAMPLE_CACHE_KEY: &str = "example";
pub const EXAMPLE_CACHE_TTL_SECS: u64 = 2_592_000;

/// TTL for everything else; keys are request-unique, so the provider
/// re-renders per request and discards after 4 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 14_400;

/// Output container for animated scrolling captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationFormat {
    Mp4,
    Gif,
    Webm,
}

impl AnimationFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationFormat::Mp4 => "mp4",
            AnimationFormat::Gif => "gif",
            AnimationFormat::Webm => "webm",
        }
    }
}

impl std::fmt::Display for AnimationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnimationFormat {
    type Err = crate::error::CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mp4" => Ok(AnimationFormat::Mp4),
            "gif" => Ok(AnimationFormat::Gif),
            "webm" => Ok(AnimationFormat::Webm),
            other => Err(crate::error::CaptureError::InvalidFormat(other.to_string())),
        }
    }
}

/// A rendered capture descriptor: the signed URL plus the echoed preset.
///
/// Constructed per request, returned to the caller, and discarded; the
/// asset itself is served directly by the provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub url: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<AnimationFormat>,
}

/// Builds cache-aware, signed capture requests from device presets.
pub struct ScreenshotService {
    client: RenderClient,
    example_url: String,
    cache_key_seq: AtomicU64,
}

impl ScreenshotService {
    pub fn new(client: RenderClient, example_url: &str) -> Self {
        Self {
            client,
            example_url: example_url.to_string(),
            cache_key_seq: AtomicU64::new(0),
        }
    }

    /// Cache key and TTL for a target URL.
    ///
    /// The demo URL maps to a fixed key with a long TTL so the landing
    /// page stays cheap to re-serve. Any other URL gets a request-unique
    /// key, which disables cross-request caching; the sequence suffix
    /// keeps two requests in the same millisecond distinct.
    fn cache_policy(&self, target_url: &str) -> (String, u64) {
        if target_url == self.example_url {
            (EXAMPLE_CACHE_KEY.to_string(), EXAMPLE_CACHE_TTL_SECS)
        } else {
            let sequence = self.cache_key_seq.fetch_add(1, Ordering::Relaxed);
            let key = format!("{}-{}", chrono::Utc::now().timestamp_millis(), sequence);
            (key, DEFAULT_CACHE_TTL_SECS)
        }
    }

    /// Capture options for a preset, with the shared render defaults.
    ///
    /// Full-page presets pass the flag and omit the viewport; everything
    /// else passes explicit dimensions (0 renders as provider auto).
    pub fn build_options(&self, target_url: &str, preset: &DevicePreset) -> CaptureOptions {
        let (cache_key, cache_ttl) = self.cache_policy(target_url);

        let options = CaptureOptions::url(target_url)
            .block_chats(true)
            .block_cookie_banners(true)
            .block_ads(true)
            .cache(true)
            .block_banners_by_heuristics(false)
            .cache_key(&cache_key)
            .cache_ttl(cache_ttl)
            .reduced_motion(true)
            .device_scale_factor(preset.device_scale_factor.unwrap_or(1.0));

        if preset.has_fixed_viewport() {
            options
                .viewport_width(preset.viewport_width)
                .viewport_height(preset.viewport_height)
        } else {
            options.full_page(true)
        }
    }

    /// Signed capture URL for a single preset.
    pub fn signed_url(&self, target_url: &str, preset: &DevicePreset) -> String {
        self.client.signed_url(&self.build_options(target_url, preset))
    }

    /// Capture descriptor for a single preset.
    pub fn capture(&self, target_url: &str, preset: &DevicePreset) -> Screenshot {
        Screenshot {
            url: self.signed_url(target_url, preset),
            viewport_width: preset.viewport_width,
            viewport_height: preset.viewport_height,
            device: preset.name.to_string(),
            format: None,
        }
    }

    /// One capture per catalog device (the screenshots-for-dimensions tool).
    pub fn capture_all(&self, target_url: &str) -> Vec<Screenshot> {
        devices::CATALOG
            .iter()
            .map(|preset| self.capture(target_url, preset))
            .collect()
    }

    /// Whole-page capture; any preset is forced into full-page mode.
    pub fn capture_full_page(&self, target_url: &str, preset: DevicePreset) -> Screenshot {
        self.capture(target_url, &preset.into_full_page())
    }

    /// Animated scrolling capture for one preset.
    pub fn capture_scrolling(
        &self,
        target_url: &str,
        preset: &DevicePreset,
        format: AnimationFormat,
    ) -> Screenshot {
        let options = self
            .build_options(target_url, preset)
            .scenario("scroll")
            .format(format.as_str());

        Screenshot {
            url: self.client.signed_url(&options),
            viewport_width: preset.viewport_width,
            viewport_height: preset.viewport_height,
            device: preset.name.to_string(),
            format: Some(format),
        }
    }

    /// Scrolling captures across the whole catalog.
    pub fn capture_scrolling_all(&self, target_url: &str, format: AnimationFormat) -> Vec<Screenshot> {
        devices::CATALOG
            .iter()
            .map(|preset| self.capture_scrolling(target_url, preset, format))
            .collect()
    }

    pub fn example_url(&self) -> &str {
        &self.example_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::FULL_PAGE;

    fn test_service() -> ScreenshotService {
        ScreenshotService::new(
            RenderClient::new("access", "secret", "https://api.example.test/take"),
            "https://example.com",
        )
    }

    #[test]
    fn test_example_url_uses_fixed_cache_key() {
        let service = test_service();
        let options = service.build_options("https://example.com", &FULL_PAGE);

        assert_eq!(options.get("cache_key"), Some(EXAMPLE_CACHE_KEY));
        assert_eq!(options.get("cache_ttl"), Some("2592000"));
    }

    #[test]
    fn test_other_urls_get_unique_cache_keys() {
        let service = test_service();
        let first = service.build_options("https://rust-lang.org", &FULL_PAGE);
        let second = service.build_options("https://rust-lang.org", &FULL_PAGE);

        assert_eq!(first.get("cache_ttl"), Some("14400"));
        assert_eq!(second.get("cache_ttl"), Some("14400"));
        assert_ne!(first.get("cache_key"), second.get("cache_key"));
    }

    #[test]
    fn test_full_page_omits_viewport() {
        let service = test_service();
        let options = service.build_options("https://rust-lang.org", &FULL_PAGE);

        assert_eq!(options.get("full_page"), Some("true"));
        assert_eq!(options.get("viewport_width"), None);
        assert_eq!(options.get("viewport_height"), None);
    }

    #[test]
    fn test_fixed_viewport_passes_dimensions() {
        let service = test_service();
        let desktop = crate::devices::find("Desktop").unwrap();
        let options = service.build_options("https://rust-lang.org", &desktop);

        assert_eq!(options.get("viewport_width"), Some("1920"));
        assert_eq!(options.get("viewport_height"), Some("1080"));
        assert_eq!(options.get("full_page"), None);
    }

    #[test]
    fn test_device_scale_factor_defaults_to_one() {
        let service = test_service();
        let options = service.build_options("https://rust-lang.org", &FULL_PAGE);

        assert_eq!(options.get("device_scale_factor"), Some("1"));
    }

    #[test]
    fn test_capture_echoes_device_name() {
        let service = test_service();
        let ipad = crate::devices::find("iPad").unwrap();
        let screenshot = service.capture("https://rust-lang.org", &ipad);

        assert_eq!(screenshot.device, "iPad");
        assert_eq!(screenshot.viewport_width, 768);
        assert_eq!(screenshot.viewport_height, 1024);
        assert!(screenshot.format.is_none());
    }

    #[test]
    fn test_capture_all_covers_catalog() {
        let service = test_service();
        let screenshots = service.capture_all("https://rust-lang.org");

        assert_eq!(screenshots.len(), crate::devices::CATALOG.len());
        for (screenshot, preset) in screenshots.iter().zip(crate::devices::CATALOG) {
            assert_eq!(screenshot.device, preset.name);
        }
    }

    #[test]
    fn test_full_page_capture_forces_flag() {
        let service = test_service();
        let desktop = crate::devices::find("Desktop").unwrap();
        let screenshot = service.capture_full_page("https://rust-lang.org", desktop);

        assert_eq!(screenshot.device, "Desktop");
        assert!(screenshot.url.contains("full_page=true"));
        assert!(!screenshot.url.contains("viewport_width"));
    }

    #[test]
    fn test_scrolling_capture_sets_scenario_and_format() {
        let service = test_service();
        let desktop = crate::devices::find("Desktop").unwrap();
        let screenshot =
            service.capture_scrolling("https://rust-lang.org", &desktop, AnimationFormat::Gif);

        assert_eq!(screenshot.format, Some(AnimationFormat::Gif));
        assert!(screenshot.url.contains("scenario=scroll"));
        assert!(screenshot.url.contains("format=gif"));
    }

    #[test]
    fn test_screenshot_serializes_camel_case() {
        let service = test_service();
        let desktop = crate::devices::find("Desktop").unwrap();
        let json = serde_json::to_value(service.capture("https://rust-lang.org", &desktop)).unwrap();

        assert!(json.get("viewportWidth").is_some());
        assert!(json.get("viewportHeight").is_some());
        assert!(json.get("format").is_none());
    }
}
