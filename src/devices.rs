//! Device preset catalog
//!
//! A fixed set of named viewport presets used by every capture endpoint,
//! plus a synthetic full-page preset with no fixed viewport.

use serde::Serialize;

/// A named, fixed combination of viewport dimensions, scale factor, and
/// full-page flag.
///
/// A width or height of 0 means "unset"; the rendering provider treats it
/// as auto. Exactly one of {fixed viewport, full-page} is meaningfully
/// active per preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DevicePreset {
    pub name: &'static str,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Device pixel ratio. `None` falls back to 1 at request-build time.
    pub device_scale_factor: Option<f64>,
    pub full_page: bool,
}

impl DevicePreset {
    /// Copy of this preset with full-page capture forced on.
    ///
    /// The full-page API route accepts any catalog device but always
    /// renders the whole page, so the fixed viewport is dropped.
    pub fn into_full_page(mut self) -> Self {
        self.full_page = true;
        self
    }

    pub fn has_fixed_viewport(&self) -> bool {
        !self.full_page
    }
}

/// Synthetic preset for whole-page captures. Carries no fixed viewport.
pub const FULL_PAGE: DevicePreset = DevicePreset {
    name: "Full Page",
    viewport_width: 0,
    viewport_height: 0,
    device_scale_factor: None,
    full_page: true,
};

/// Fixed-viewport presets offered by the device selectors.
pub const CATALOG: &[DevicePreset] = &[
    DevicePreset {
        name: "Desktop",
        viewport_width: 1920,
        viewport_height: 1080,
        device_scale_factor: Some(1.0),
        full_page: false,
    },
    DevicePreset {
        name: "Laptop",
        viewport_width: 1366,
        viewport_height: 768,
        device_scale_factor: Some(1.0),
        full_page: false,
    },
    DevicePreset {
        name: "iPad",
        viewport_width: 768,
        viewport_height: 1024,
        device_scale_factor: Some(2.0),
        full_page: false,
    },
    DevicePreset {
        name: "iPhone 14",
        viewport_width: 390,
        viewport_height: 844,
        device_scale_factor: Some(3.0),
        full_page: false,
    },
];

/// Look up a catalog preset by its exact name.
pub fn find(name: &str) -> Option<DevicePreset> {
    CATALOG.iter().copied().find(|d| d.name == name)
}

/// Resolve an optional device name, falling back to the full-page preset
/// when the name is absent or unknown.
pub fn find_or_full_page(name: Option<&str>) -> DevicePreset {
    name.and_then(find).unwrap_or(FULL_PAGE)
}
