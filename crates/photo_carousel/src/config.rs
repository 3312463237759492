use bevy::prelude::*;

use crate::profile::{ProfileTable, SettleTable};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub profiles: ProfileTable,
    pub settle: SettleTable,
    /// Largest step count a single navigation request may ask for.
    pub max_request_steps: i32,
    /// Largest settle target rapid navigation can accumulate.
    pub max_accumulated_steps: f32,
    /// Autoplay stays quiet this long after a navigation request.
    pub idle_after_navigate_ms: f64,
    /// ... after a pointer press on the stage.
    pub idle_after_pointer_ms: f64,
    /// ... after opening the lightbox.
    pub idle_after_lightbox_ms: f64,
    pub autoplay_interval_ms: u64,
    /// Releases that travelled less than this are treated as taps.
    pub tap_slop_px: f32,
    pub lightbox: LightboxConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            profiles: ProfileTable::default(),
            settle: SettleTable::default(),
            max_request_steps: 3,
            max_accumulated_steps: 12.0,
            idle_after_navigate_ms: 3500.0,
            idle_after_pointer_ms: 4000.0,
            idle_after_lightbox_ms: 5000.0,
            autoplay_interval_ms: 4200,
            tap_slop_px: 6.0,
            lightbox: LightboxConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightboxConfig {
    pub swipe_threshold_px: f32,
    pub swipe_flick_px_ms: f32,
    /// Width fraction of the left/right tap strips.
    pub nav_zone_fraction: f32,
    /// Size of the close button in the top-right corner.
    pub close_button: Vec2,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 70.0,
            swipe_flick_px_ms: 0.65,
            nav_zone_fraction: 0.2,
            close_button: Vec2::new(120.0, 64.0),
        }
    }
}
