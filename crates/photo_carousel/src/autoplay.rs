use std::time::Duration;

use bevy::prelude::*;

use crate::CarouselSet;
use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::now_ms;

/// The inputs that decide whether autoplay may run at all.
///
/// Any change restarts the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayGate {
    pub reduced_motion: bool,
    pub len: usize,
    pub hovered: bool,
    pub dragging: bool,
    pub lightbox_open: bool,
}

impl AutoplayGate {
    pub const fn of(carousel: &Carousel) -> Self {
        Self {
            reduced_motion: carousel.reduced_motion(),
            len: carousel.len(),
            hovered: carousel.hovered(),
            dragging: carousel.is_dragging(),
            lightbox_open: carousel.lightbox_open(),
        }
    }

    /// Whether the interval runs; blockers like hover only skip ticks.
    pub const fn armed(&self) -> bool {
        !self.reduced_motion && self.len > 0
    }
}

#[derive(Resource, Debug, Clone)]
pub struct AutoplayTimer {
    timer: Timer,
    gate: Option<AutoplayGate>,
}

impl AutoplayTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval, TimerMode::Repeating),
            gate: None,
        }
    }

    /// Advances the interval and reports whether the carousel should move on.
    pub fn tick(&mut self, delta: Duration, carousel: &Carousel, now_ms: f64) -> bool {
        let gate = AutoplayGate::of(carousel);
        if self.gate != Some(gate) {
            self.gate = Some(gate);
            self.timer.reset();
        }
        if !gate.armed() {
            return false;
        }
        self.timer.tick(delta);
        self.timer.just_finished() && carousel.autoplay_allowed(now_ms)
    }
}

impl FromWorld for AutoplayTimer {
    fn from_world(world: &mut World) -> Self {
        let interval_ms = world
            .get_resource::<CarouselConfig>()
            .map_or_else(
                || CarouselConfig::default().autoplay_interval_ms,
                |config| config.autoplay_interval_ms,
            );
        Self::new(Duration::from_millis(interval_ms))
    }
}

pub struct AutoplayPlugin;

impl Plugin for AutoplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutoplayTimer>()
            .add_systems(Update, advance_autoplay.in_set(CarouselSet::Autoplay));
    }
}

fn advance_autoplay(time: Res<Time>, mut timer: ResMut<AutoplayTimer>, mut carousel: ResMut<Carousel>) {
    let now = now_ms(&time);
    if timer.tick(time.delta(), &carousel, now) {
        debug!("Autoplay advancing from photo {}", carousel.active_index());
        carousel.navigate_by(1, now);
    }
}
