//! Per-device drag feel.
//!
//! The numbers are tuned by hand for a particular feel; they have no physical
//! derivation and live in [`crate::config::CarouselConfig`] as defaults.

pub use gallery_helpers::input::PointerKind;

/// Viewports at or below this width get the easier touch basis.
pub const NARROW_VIEWPORT_PX: f32 = 440.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragProfile {
    /// Fraction of the layout basis that counts as one slide of drag.
    pub basis_scale: f32,
    /// Projected slides needed to commit a move.
    pub threshold: f32,
    /// Pointer speed (px/ms) that commits regardless of distance.
    pub flick_velocity: f32,
    /// Slide speed above which extra steps are granted.
    pub flick_slides_per_sec: f32,
    /// Pointer speed (px/ms) below which velocity has no direction.
    pub velocity_deadzone: f32,
    pub velocity_window_ms: f64,
    /// Seconds of momentum added to the release position.
    pub momentum_seconds: f32,
    pub snap_bias: f32,
    /// Maximum slides shown while dragging.
    pub max_preview: f32,
    /// Per-frame smoothing toward the dragged position.
    pub follow_lerp: f32,
    pub max_steps: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileHints {
    pub is_ios: bool,
    pub trackpad_like: bool,
}

/// iOS adjustments applied on top of the touch profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IosTouchAdjust {
    pub threshold_delta: f32,
    pub velocity_window_ms: f64,
    pub momentum_boost: f32,
    pub follow_lerp: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileTable {
    pub touch_narrow: DragProfile,
    pub touch_wide: DragProfile,
    pub ios: IosTouchAdjust,
    pub pen: DragProfile,
    pub trackpad: DragProfile,
    pub mouse: DragProfile,
}

impl Default for ProfileTable {
    fn default() -> Self {
        let touch_wide = DragProfile {
            basis_scale: 0.76,
            threshold: 0.17,
            flick_velocity: 0.32,
            flick_slides_per_sec: 1.12,
            velocity_deadzone: 0.045,
            velocity_window_ms: 90.0,
            momentum_seconds: 0.21,
            snap_bias: 0.12,
            max_preview: 2.15,
            follow_lerp: 0.78,
            max_steps: 2,
        };
        Self {
            touch_narrow: DragProfile {
                basis_scale: 0.71,
                threshold: 0.14,
                ..touch_wide
            },
            touch_wide,
            ios: IosTouchAdjust {
                threshold_delta: -0.01,
                velocity_window_ms: 110.0,
                momentum_boost: 0.03,
                follow_lerp: 0.84,
            },
            pen: DragProfile {
                basis_scale: 0.84,
                threshold: 0.19,
                flick_velocity: 0.4,
                flick_slides_per_sec: 1.2,
                velocity_deadzone: 0.04,
                velocity_window_ms: 85.0,
                momentum_seconds: 0.18,
                snap_bias: 0.1,
                max_preview: 2.3,
                follow_lerp: 0.72,
                max_steps: 2,
            },
            trackpad: DragProfile {
                basis_scale: 0.84,
                threshold: 0.2,
                flick_velocity: 0.4,
                flick_slides_per_sec: 1.06,
                velocity_deadzone: 0.03,
                velocity_window_ms: 96.0,
                momentum_seconds: 0.19,
                snap_bias: 0.1,
                max_preview: 2.45,
                follow_lerp: 0.74,
                max_steps: 3,
            },
            mouse: DragProfile {
                basis_scale: 0.9,
                threshold: 0.22,
                flick_velocity: 0.5,
                flick_slides_per_sec: 1.28,
                velocity_deadzone: 0.035,
                velocity_window_ms: 80.0,
                momentum_seconds: 0.16,
                snap_bias: 0.08,
                max_preview: 2.8,
                follow_lerp: 0.66,
                max_steps: 3,
            },
        }
    }
}

impl ProfileTable {
    pub fn select(&self, kind: PointerKind, viewport_width: f32, hints: ProfileHints) -> DragProfile {
        match kind {
            PointerKind::Touch => {
                let narrow = viewport_width > 0.0 && viewport_width <= NARROW_VIEWPORT_PX;
                let base = if narrow {
                    self.touch_narrow
                } else {
                    self.touch_wide
                };
                if !hints.is_ios {
                    return base;
                }
                DragProfile {
                    threshold: base.threshold + self.ios.threshold_delta,
                    velocity_window_ms: self.ios.velocity_window_ms,
                    momentum_seconds: base.momentum_seconds + self.ios.momentum_boost,
                    follow_lerp: self.ios.follow_lerp,
                    ..base
                }
            }
            PointerKind::Pen => self.pen,
            PointerKind::Mouse if hints.trackpad_like => self.trackpad,
            PointerKind::Mouse => self.mouse,
        }
    }
}

/// Spring constants used while settling after a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleProfile {
    pub stiffness: f32,
    pub damping: f32,
    /// Fraction of the release speed handed to the spring.
    pub velocity_gain: f32,
    pub max_seed_velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleTable {
    pub touch: SettleProfile,
    pub pen: SettleProfile,
    pub mouse: SettleProfile,
    /// Buttons, keys, slot taps and autoplay.
    pub navigate: SettleProfile,
}

impl Default for SettleTable {
    fn default() -> Self {
        Self {
            touch: SettleProfile {
                stiffness: 40.0,
                damping: 12.5,
                velocity_gain: 0.5,
                max_seed_velocity: 4.8,
            },
            pen: SettleProfile {
                stiffness: 42.0,
                damping: 13.0,
                velocity_gain: 0.46,
                max_seed_velocity: 5.2,
            },
            mouse: SettleProfile {
                stiffness: 46.0,
                damping: 14.5,
                velocity_gain: 0.42,
                max_seed_velocity: 5.8,
            },
            navigate: SettleProfile {
                stiffness: 44.0,
                damping: 14.0,
                velocity_gain: 0.0,
                max_seed_velocity: 0.0,
            },
        }
    }
}

impl SettleTable {
    pub const fn for_pointer(&self, kind: PointerKind) -> SettleProfile {
        match kind {
            PointerKind::Touch => self.touch,
            PointerKind::Pen => self.pen,
            PointerKind::Mouse => self.mouse,
        }
    }
}
