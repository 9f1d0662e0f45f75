//! # Screenshot Signer
//!
//! A stateless service that turns `(target URL, device preset)` pairs into
//! provider-signed, time-limited screenshot URLs. Rendering is delegated
//! entirely to an external screenshot API reached through its signed-URL
//! scheme; this service never fetches or proxies image bytes, it only maps
//! presets onto capture options and signs the resulting query string with
//! HMAC-SHA256.
//!
//! ## Features
//!
//! - **Device preset catalog**: fixed viewport presets plus a synthetic
//!   full-page preset
//! - **Cache-aware requests**: demo captures share a long-lived cache key,
//!   user captures get request-unique keys with a short TTL
//! - **Local signing**: HMAC-SHA256 over the canonical query string, no
//!   network round-trip
//! - **HTTP API**: JSON tool endpoints plus health and Prometheus metrics
//! - **CLI**: sign URLs, list presets and validate configuration without
//!   running the server
//!
//! ## Quick Start
//!
//! ```rust
//! use screenshot_signer::{devices, RenderClient, ScreenshotService};
//!
//! let client = RenderClient::new("access", "secret", "https://api.screenshotone.com/take");
//! let service = ScreenshotService::new(client, "https://example.com");
//!
//! let screenshot = service.capture("https://example.com", &devices::FULL_PAGE);
//! println!("Signed URL: {}", screenshot.url);
//! ```
//!
//! ## CLI Usage
//!
//! ### Server
//! ```bash
//! screenshot-signer serve --port 8080
//! ```
//!
//! ### One-off signing
//! ```bash
//! screenshot-signer sign --url https://example.com --device "iPhone 14"
//! ```

/// Configuration and provider credentials
pub mod config;

/// Error types and classification
pub mod error;

/// Device preset catalog
pub mod devices;

/// Capture options and signed URL generation
pub mod signer;

/// Cache policy and preset-to-request mapping
pub mod screenshots;

/// API request schemas and validation
pub mod schema;

/// HTTP API server
pub mod server;

/// Command-line interface implementation
pub mod cli;

/// Metrics registration and Prometheus exposition
pub mod metrics;


pub use cli::*;
pub use config::*;
pub use devices::{DevicePreset, CATALOG, FULL_PAGE};
pub use error::*;
pub use metrics::*;
pub use schema::*;
pub use screenshots::*;
pub use server::*;
pub use signer::*;
