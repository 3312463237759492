use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Logical size of the primary window, the gallery's "viewport".
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        }
    }
}

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportSize>();
        #[cfg(target_arch = "wasm32")]
        app.add_systems(PreUpdate, handle_browser_resize.before(track_viewport));
        app.add_systems(PreUpdate, track_viewport);
    }
}

fn track_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    // Only write on change so `is_changed` can drive re-measurement.
    if (viewport.width - width).abs() > f32::EPSILON
        || (viewport.height - height).abs() > f32::EPSILON
    {
        *viewport = ViewportSize { width, height };
        debug!("Viewport resized to {width}x{height}");
    }
}

#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(mut primary_query: Query<&mut Window, With<PrimaryWindow>>) {
    let Some(wasm_window) = web_sys::window() else {
        return;
    };
    let (Ok(inner_width), Ok(inner_height)) = (wasm_window.inner_width(), wasm_window.inner_height())
    else {
        return;
    };
    let (Some(target_width), Some(target_height)) = (inner_width.as_f64(), inner_height.as_f64())
    else {
        return;
    };
    let target_width = target_width as f32;
    let target_height = target_height as f32;

    // Surfaces larger than the max texture size fail to configure on WebGL2.
    const MAX_EXTENT: f32 = 2048.0;

    for mut window in &mut primary_query {
        if (window.resolution.width() - target_width).abs() > f32::EPSILON
            || (window.resolution.height() - target_height).abs() > f32::EPSILON
        {
            window
                .resolution
                .set(target_width.min(MAX_EXTENT), target_height.min(MAX_EXTENT));
        }
    }
}
