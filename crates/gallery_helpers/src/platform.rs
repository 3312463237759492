//! Browser capability probes.
//!
//! Every probe is optional: when an API is missing (no `matchMedia`, no
//! canvas element, native build) the hint keeps its default and nothing fails.

use bevy::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::CANVAS_SELECTOR;

pub const DEFAULT_ARIA_LABEL: &str = "Customer photo gallery";

#[cfg(target_arch = "wasm32")]
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformHints {
    /// iPhone, iPad (including iPadOS reporting as a Mac) or iPod.
    pub is_ios: bool,
    pub prefers_reduced_motion: bool,
}

pub struct PlatformPlugin;

impl Plugin for PlatformPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlatformHints>()
            .add_systems(Startup, probe_platform);
    }
}

fn probe_platform(mut hints: ResMut<PlatformHints>) {
    *hints = detect_hints();
    apply_carousel_aria(DEFAULT_ARIA_LABEL);
    watch_reduced_motion();
    info!("Platform hints: {:?}", *hints);
}

/// Matches the user agent against iOS devices.
///
/// iPadOS 13+ reports a desktop Mac platform, so a `MacIntel` platform with
/// more than one touch point counts too.
pub fn is_ios_like(user_agent: &str, platform: &str, max_touch_points: i32) -> bool {
    ["iPad", "iPhone", "iPod"]
        .iter()
        .any(|device| user_agent.contains(device))
        || (platform == "MacIntel" && max_touch_points > 1)
}

#[cfg(target_arch = "wasm32")]
fn detect_hints() -> PlatformHints {
    let Some(window) = web_sys::window() else {
        return PlatformHints::default();
    };
    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default();
    let platform = navigator.platform().unwrap_or_default();

    let prefers_reduced_motion = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|media| media.matches());

    PlatformHints {
        is_ios: is_ios_like(&user_agent, &platform, navigator.max_touch_points()),
        prefers_reduced_motion,
    }
}

#[cfg(not(target_arch = "wasm32"))]
const fn detect_hints() -> PlatformHints {
    PlatformHints {
        is_ios: false,
        prefers_reduced_motion: false,
    }
}

/// Forwards `prefers-reduced-motion` changes through the host message queue.
#[cfg(target_arch = "wasm32")]
fn watch_reduced_motion() {
    let Some(media) = web_sys::window()
        .and_then(|window| window.match_media(REDUCED_MOTION_QUERY).ok().flatten())
    else {
        return;
    };

    let closure = Closure::wrap(Box::new(move |event: web_sys::MediaQueryListEvent| {
        crate::push_host_message(crate::HostMessage::ReducedMotion {
            enabled: event.matches(),
        });
    }) as Box<dyn FnMut(web_sys::MediaQueryListEvent)>);

    if let Err(err) =
        media.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
    {
        warn!("Reduced motion changes will not be tracked: {err:?}");
        return;
    }

    closure.forget(); // Lives for the lifetime of the page
}

#[cfg(not(target_arch = "wasm32"))]
const fn watch_reduced_motion() {}

/// Marks the gallery canvas as a focusable carousel group for assistive tech.
#[cfg(target_arch = "wasm32")]
pub fn apply_carousel_aria(label: &str) {
    let Some(canvas) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.query_selector(CANVAS_SELECTOR).ok().flatten())
    else {
        return;
    };

    for (name, value) in [
        ("role", "group"),
        ("aria-roledescription", "carousel"),
        ("aria-label", label),
        ("tabindex", "0"),
    ] {
        if let Err(err) = canvas.set_attribute(name, value) {
            warn!("Could not set {name} on {CANVAS_SELECTOR}: {err:?}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn apply_carousel_aria(label: &str) {
    debug!("{CANVAS_SELECTOR} aria-label: {label}");
}
