//! Capture option serialization and signed URL generation
//!
//! The rendering provider accepts its options as a query string and
//! authenticates requests with an HMAC-SHA256 signature over that string,
//! appended as the final `signature` parameter. Signing is purely local;
//! no network round-trip happens here.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// Fluent builder for the provider's capture options.
///
/// Parameters are serialized in call order, which matters: the signature
/// is computed over the exact query string the URL carries.
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    params: Vec<(&'static str, String)>,
}

impl CaptureOptions {
    /// Start a new option set for the given target URL.
    pub fn url(target: &str) -> Self {
        Self {
            params: vec![("url", target.to_string())],
        }
    }

    fn with(mut self, key: &'static str, value: String) -> Self {
        self.params.push((key, value));
        self
    }

    pub fn block_ads(self, on: bool) -> Self {
        self.with("block_ads", on.to_string())
    }

    pub fn block_chats(self, on: bool) -> Self {
        self.with("block_chats", on.to_string())
    }

    pub fn block_cookie_banners(self, on: bool) -> Self {
        self.with("block_cookie_banners", on.to_string())
    }

    pub fn block_banners_by_heuristics(self, on: bool) -> Self {
        self.with("block_banners_by_heuristics", on.to_string())
    }

    pub fn cache(self, on: bool) -> Self {
        self.with("cache", on.to_string())
    }

    pub fn cache_key(self, key: &str) -> Self {
        self.with("cache_key", key.to_string())
    }

    pub fn cache_ttl(self, seconds: u64) -> Self {
        self.with("cache_ttl", seconds.to_string())
    }

    pub fn reduced_motion(self, on: bool) -> Self {
        self.with("reduced_motion", on.to_string())
    }

    pub fn device_scale_factor(self, factor: f64) -> Self {
        self.with("device_scale_factor", factor.to_string())
    }

    pub fn viewport_width(self, pixels: u32) -> Self {
        self.with("viewport_width", pixels.to_string())
    }

    pub fn viewport_height(self, pixels: u32) -> Self {
        self.with("viewport_height", pixels.to_string())
    }

    pub fn full_page(self, on: bool) -> Self {
        self.with("full_page", on.to_string())
    }

    /// Provider scenario, e.g. `scroll` for animated scrolling captures.
    pub fn scenario(self, scenario: &str) -> Self {
        self.with("scenario", scenario.to_string())
    }

    /// Output format. Stills default to the provider's format when unset;
    /// animated captures pass `mp4`, `gif` or `webm`.
    pub fn format(self, format: &str) -> Self {
        self.with("format", format.to_string())
    }

    /// First value recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize all parameters, percent-encoded, in call order.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// Credentials for the rendering provider plus the take-endpoint base URL.
///
/// One instance lives in the shared application state for the lifetime of
/// the process; it is never mutated after construction.
#[derive(Clone)]
pub struct RenderClient {
    access_key: String,
    secret_key: String,
    api_base_url: String,
}

impl RenderClient {
    pub fn new(access_key: &str, secret_key: &str, api_base_url: &str) -> Self {
        Self {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            api_base_url: api_base_url.trim_end_matches('?').to_string(),
        }
    }

    /// Produce a time-limited, provider-authenticated URL for the options.
    ///
    /// The query is the serialized options followed by `access_key`; the
    /// signature is the lowercase hex HMAC-SHA256 of that query under the
    /// secret key, appended as the final parameter.
    pub fn signed_url(&self, options: &CaptureOptions) -> String {
        let mut query = options.to_query();
        let mut tail = form_urlencoded::Serializer::new(String::new());
        tail.append_pair("access_key", &self.access_key);
        query.push('&');
        query.push_str(&tail.finish());

        let signature = self.sign(&query);
        format!("{}?{}&signature={}", self.api_base_url, query, signature)
    }

    fn sign(&self, query: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

// Keep credentials out of debug logs.
impl std::fmt::Debug for RenderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderClient")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
