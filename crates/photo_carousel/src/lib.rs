use bevy::prelude::*;

use crate::autoplay::AutoplayPlugin;
use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::input::InputPlugin;
use crate::marquee::MarqueePlugin;
use crate::photo::{PhotoList, demo_photos};
use crate::view::ViewPlugin;

pub mod autoplay;
pub mod carousel;
pub mod config;
mod host;
pub mod input;
pub mod layout;
pub mod lightbox;
pub mod marquee;
pub mod motion;
pub mod photo;
pub mod profile;
pub mod slots;
pub mod velocity;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-frame order: input, then motion, then autoplay, then drawing.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum CarouselSet {
    Input,
    Motion,
    Autoplay,
    View,
}

/// Milliseconds on the app clock; every carousel timestamp uses it.
pub fn now_ms(time: &Time) -> f64 {
    time.elapsed_secs_f64() * 1000.0
}

pub fn run() {
    let mut app = gallery_helpers::get_default_app::<host::CarouselHost>(
        env!("CARGO_PKG_NAME"),
        VERSION,
    );

    #[cfg(not(target_arch = "wasm32"))]
    app.insert_resource(gallery_helpers::SimulatedPhotos(demo_photos()));

    app.add_plugins(CarouselPlugin).run();
}

pub struct CarouselPlugin;

impl Plugin for CarouselPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<CarouselConfig>()
            .cloned()
            .unwrap_or_default();
        let photos = PhotoList::new(demo_photos()).unwrap_or_default();
        let carousel = Carousel::new(photos.len(), 0, config.clone());

        app.insert_resource(config)
            .insert_resource(photos)
            .insert_resource(carousel)
            .configure_sets(
                Update,
                (
                    CarouselSet::Input,
                    CarouselSet::Motion,
                    CarouselSet::Autoplay,
                    CarouselSet::View,
                )
                    .chain(),
            )
            .add_plugins((InputPlugin, MarqueePlugin, AutoplayPlugin, ViewPlugin))
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, advance_motion.in_set(CarouselSet::Motion));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn advance_motion(time: Res<Time>, mut carousel: ResMut<Carousel>) {
    if carousel.is_moving() {
        carousel.frame(now_ms(&time));
    }
}
