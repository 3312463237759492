//! Turns window input into carousel, lightbox and marquee calls.

use std::collections::HashMap;

use bevy::input::mouse::{MouseButtonInput, MouseWheel};
use bevy::input::touch::TouchInput;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use gallery_helpers::input::{
    PointerEvent, PointerId, PointerPhase, read_pointer_events, wheel_delta_px,
};
use gallery_helpers::platform::PlatformHints;
use gallery_helpers::viewport::ViewportSize;

use crate::carousel::{Carousel, CarouselKey};
use crate::layout::GalleryLayout;
use crate::marquee::{MarqueeConfig, ReviewMarquee};
use crate::slots::{hit_test, visible_slots};
use crate::{CarouselSet, now_ms};

/// Which surface a pressed pointer belongs to until it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Lightbox,
    Nav(i32),
    Marquee,
    Stage,
}

/// Everything a pointer event may act on.
pub struct PointerTargets<'a> {
    pub carousel: &'a mut Carousel,
    pub marquee: &'a mut ReviewMarquee,
    pub marquee_config: &'a MarqueeConfig,
    pub layout: &'a GalleryLayout,
    pub is_ios: bool,
}

/// Keeps each pointer on the surface it pressed, so a drag that leaves the
/// stage keeps steering the carousel.
#[derive(Debug, Default)]
pub struct PointerRouter {
    routes: HashMap<PointerId, Route>,
}

impl PointerRouter {
    pub fn dispatch(&mut self, event: PointerEvent, now_ms: f64, targets: &mut PointerTargets<'_>) {
        match event.phase {
            PointerPhase::Down => self.press(event, now_ms, targets),
            PointerPhase::Move => self.drag(event, now_ms, targets),
            PointerPhase::Up | PointerPhase::Cancel => self.release(event, now_ms, targets),
        }
    }

    fn press(&mut self, event: PointerEvent, now_ms: f64, targets: &mut PointerTargets<'_>) {
        let PointerEvent { id, kind, position, .. } = event;
        let layout = targets.layout;

        let route = if targets.carousel.lightbox_open() {
            targets.carousel.lightbox_pointer_down(id, position.x, now_ms);
            Route::Lightbox
        } else if let Some(direction) = layout.nav_hit(position) {
            Route::Nav(direction)
        } else if layout.in_marquee(position) {
            targets.marquee.pointer_down(id, position.x, now_ms);
            Route::Marquee
        } else if layout.in_stage(position)
            && targets.carousel.pointer_down(
                id,
                kind,
                position.x,
                now_ms,
                layout.viewport.x,
                targets.is_ios,
            )
        {
            Route::Stage
        } else {
            return;
        };
        self.routes.insert(id, route);
    }

    fn drag(&self, event: PointerEvent, now_ms: f64, targets: &mut PointerTargets<'_>) {
        let Some(route) = self.routes.get(&event.id) else {
            return;
        };
        let x = event.position.x;
        match route {
            Route::Lightbox => targets.carousel.lightbox_pointer_move(event.id, x),
            Route::Marquee => targets
                .marquee
                .pointer_move(event.id, x, now_ms, targets.marquee_config),
            Route::Stage => {
                targets
                    .carousel
                    .pointer_move(event.id, x, now_ms, targets.layout.viewport.x);
            }
            Route::Nav(_) => {}
        }
    }

    fn release(&mut self, event: PointerEvent, now_ms: f64, targets: &mut PointerTargets<'_>) {
        let Some(route) = self.routes.remove(&event.id) else {
            return;
        };
        let released = event.phase == PointerPhase::Up;
        let layout = targets.layout;
        let carousel = &mut *targets.carousel;

        match route {
            Route::Lightbox if released => {
                carousel.lightbox_pointer_up(event.id, event.position, layout.viewport, now_ms);
            }
            Route::Lightbox => {
                carousel.lightbox_pointer_cancel(event.id, now_ms);
            }
            Route::Nav(direction) => {
                if released && layout.nav_hit(event.position) == Some(direction) {
                    carousel.navigate_by(direction, now_ms);
                }
            }
            Route::Marquee => targets.marquee.pointer_up(event.id),
            Route::Stage => {
                let Some(outcome) = carousel.finish_drag(event.id, event.position.x, now_ms) else {
                    return;
                };
                if !released || outcome.travel_px >= carousel.config().tap_slop_px {
                    return;
                }
                let slots = visible_slots(carousel, &layout.stage);
                if let Some(slot) = hit_test(&slots, layout.to_stage(event.position), &layout.stage) {
                    carousel.click_slot(slot.steps_to_center, slot.is_center, now_ms);
                }
            }
        }
    }
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalleryLayout>().add_systems(
            Update,
            (
                relayout,
                follow_platform_hints,
                route_pointers,
                track_hover,
                handle_keys,
                handle_wheel,
            )
                .chain()
                .in_set(CarouselSet::Input),
        );
    }
}

fn relayout(
    viewport: Res<ViewportSize>,
    marquee_config: Res<MarqueeConfig>,
    mut layout: ResMut<GalleryLayout>,
    mut carousel: ResMut<Carousel>,
) {
    if !viewport.is_changed() && !marquee_config.is_changed() {
        return;
    }
    *layout = GalleryLayout::measure(
        Vec2::new(viewport.width, viewport.height),
        marquee_config.strip_height,
    );
    carousel.set_basis(layout.stage.basis());
    debug!("Stage measured: {:?}", layout.stage);
}

fn follow_platform_hints(hints: Res<PlatformHints>, mut carousel: ResMut<Carousel>) {
    if hints.is_changed() && carousel.reduced_motion() != hints.prefers_reduced_motion {
        carousel.set_reduced_motion(hints.prefers_reduced_motion);
    }
}

fn route_pointers(
    mut cursor_moves: EventReader<CursorMoved>,
    mut mouse_buttons: EventReader<MouseButtonInput>,
    mut touches: EventReader<TouchInput>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    layout: Res<GalleryLayout>,
    hints: Res<PlatformHints>,
    marquee_config: Res<MarqueeConfig>,
    mut carousel: ResMut<Carousel>,
    mut marquee: ResMut<ReviewMarquee>,
    mut router: Local<PointerRouter>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let events = read_pointer_events(&mut cursor_moves, &mut mouse_buttons, &mut touches, window);
    if events.is_empty() {
        return;
    }

    let now = now_ms(&time);
    let mut targets = PointerTargets {
        carousel: &mut carousel,
        marquee: &mut marquee,
        marquee_config: &marquee_config,
        layout: &layout,
        is_ios: hints.is_ios,
    };
    for event in events {
        router.dispatch(event, now, &mut targets);
    }
}

/// Mouse hover pauses autoplay and the marquee drift. Touch never hovers.
fn track_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<GalleryLayout>,
    mut carousel: ResMut<Carousel>,
    mut marquee: ResMut<ReviewMarquee>,
) {
    let cursor = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position);

    let over_stage = cursor.is_some_and(|point| layout.in_stage(point));
    if carousel.hovered() != over_stage {
        carousel.set_hovered(over_stage);
    }
    let over_marquee = cursor.is_some_and(|point| layout.in_marquee(point));
    if !marquee.is_dragging() && marquee.is_paused() != over_marquee {
        marquee.set_hovered(over_marquee);
    }
}

pub fn carousel_key(key: KeyCode) -> Option<CarouselKey> {
    match key {
        KeyCode::ArrowLeft => Some(CarouselKey::Left),
        KeyCode::ArrowRight => Some(CarouselKey::Right),
        KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => Some(CarouselKey::Activate),
        KeyCode::Escape => Some(CarouselKey::Escape),
        _ => None,
    }
}

fn handle_keys(keys: Res<ButtonInput<KeyCode>>, time: Res<Time>, mut carousel: ResMut<Carousel>) {
    let now = now_ms(&time);
    for key in keys.get_just_pressed().filter_map(|&key| carousel_key(key)) {
        carousel.key(key, now);
    }
}

fn handle_wheel(
    mut wheels: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<GalleryLayout>,
    config: Res<MarqueeConfig>,
    mut marquee: ResMut<ReviewMarquee>,
) {
    let over_marquee = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .is_some_and(|point| layout.in_marquee(point));
    for wheel in wheels.read() {
        if over_marquee {
            marquee.wheel(wheel_delta_px(wheel), &config);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;
    use gallery_helpers::input::PointerKind;

    use super::*;
    use crate::config::CarouselConfig;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    struct Fixture {
        router: PointerRouter,
        carousel: Carousel,
        marquee: ReviewMarquee,
        marquee_config: MarqueeConfig,
        layout: GalleryLayout,
    }

    impl Fixture {
        fn new(len: usize) -> Self {
            let layout = GalleryLayout::measure(Vec2::new(1280.0, 900.0), 164.0);
            let mut carousel = Carousel::new(len, 0, CarouselConfig::default());
            carousel.set_basis(layout.stage.basis());
            Self {
                router: PointerRouter::default(),
                carousel,
                marquee: ReviewMarquee::default(),
                marquee_config: MarqueeConfig::default(),
                layout,
            }
        }

        fn send(&mut self, phase: PointerPhase, position: Vec2, now_ms: f64) {
            let mut targets = PointerTargets {
                carousel: &mut self.carousel,
                marquee: &mut self.marquee,
                marquee_config: &self.marquee_config,
                layout: &self.layout,
                is_ios: false,
            };
            let event = PointerEvent {
                id: PointerId::Mouse,
                kind: PointerKind::Mouse,
                phase,
                position,
            };
            self.router.dispatch(event, now_ms, &mut targets);
        }

        fn tap(&mut self, position: Vec2, now_ms: f64) {
            self.send(PointerPhase::Down, position, now_ms);
            self.send(PointerPhase::Up, position, now_ms + 90.0);
        }

        fn settle(&mut self, mut now: f64) {
            for _ in 0..2000 {
                if !self.carousel.is_moving() {
                    return;
                }
                now += FRAME_MS;
                self.carousel.frame(now);
            }
        }
    }

    #[test]
    fn tapping_the_centre_opens_the_lightbox() {
        let mut fixture = Fixture::new(5);
        let centre = fixture.layout.stage_center();
        fixture.tap(centre, 0.0);
        assert!(fixture.carousel.lightbox_open(), "centre tap opens the lightbox");

        // The close button sits in the top-right corner of the overlay.
        fixture.tap(Vec2::new(1260.0, 20.0), 500.0);
        assert!(!fixture.carousel.lightbox_open(), "close button tapped");
    }

    #[test]
    fn tapping_a_side_slot_brings_it_to_centre() {
        let mut fixture = Fixture::new(5);
        let right = fixture.layout.stage_center() + Vec2::new(300.0, 0.0);
        fixture.tap(right, 0.0);
        assert!(!fixture.carousel.lightbox_open(), "side tap does not open the lightbox");
        fixture.settle(90.0);
        assert_eq!(fixture.carousel.active_index(), 1, "right neighbour centred");
    }

    #[test]
    fn nav_buttons_step_the_carousel() {
        let mut fixture = Fixture::new(5);
        let prev = fixture.layout.nav_button(-1).center();
        fixture.tap(prev, 0.0);
        fixture.settle(90.0);
        assert_eq!(fixture.carousel.active_index(), 4, "prev wraps to the last photo");
        assert!(!fixture.carousel.lightbox_open(), "button taps never reach the slots");
    }

    #[test]
    fn drag_release_is_not_a_tap() {
        let mut fixture = Fixture::new(5);
        let start = fixture.layout.stage_center();
        fixture.send(PointerPhase::Down, start, 0.0);
        for step in 1..=4 {
            let t = f64::from(step) * 100.0;
            fixture.send(PointerPhase::Move, start - Vec2::new(110.0 * step as f32, 0.0), t);
        }
        fixture.send(PointerPhase::Up, start - Vec2::new(440.0, 0.0), 600.0);
        assert!(!fixture.carousel.lightbox_open(), "long drag does not open the lightbox");
        fixture.settle(600.0);
        assert_ne!(fixture.carousel.active_index(), 0, "drag moved the carousel");
    }

    #[test]
    fn slow_drag_with_several_moves_per_frame_snaps_back() {
        // A 125 Hz mouse at 0.15 px/ms reports two moves in every 16 ms frame.
        let mut fixture = Fixture::new(5);
        let start = fixture.layout.stage_center();
        fixture.send(PointerPhase::Down, start, 0.0);
        let mut now = 0.0;
        let mut x = start.x;
        for _ in 0..12 {
            now += 16.0;
            for _ in 0..2 {
                x -= 1.2;
                fixture.send(PointerPhase::Move, Vec2::new(x, start.y), now);
            }
        }
        fixture.send(PointerPhase::Up, Vec2::new(x, start.y), now);

        fixture.settle(now);
        assert_eq!(fixture.carousel.active_index(), 0, "short slow drag returns home");
        assert!(!fixture.carousel.lightbox_open(), "a drag is not a tap");
    }

    #[test]
    fn cancelled_lightbox_swipe_pages_photos() {
        let mut fixture = Fixture::new(5);
        fixture.tap(fixture.layout.stage_center(), 0.0);
        assert!(fixture.carousel.lightbox_open(), "lightbox open");

        let y = fixture.layout.viewport.y / 2.0;
        fixture.send(PointerPhase::Down, Vec2::new(700.0, y), 500.0);
        fixture.send(PointerPhase::Move, Vec2::new(500.0, y), 650.0);
        fixture.send(PointerPhase::Cancel, Vec2::new(500.0, y), 800.0);

        assert_eq!(fixture.carousel.active_index(), 1, "interrupted swipe shows the next photo");
        assert!(fixture.carousel.lightbox_open(), "still open");
    }

    #[test]
    fn marquee_presses_do_not_drag_the_stage() {
        let mut fixture = Fixture::new(5);
        let strip = Vec2::new(640.0, fixture.layout.marquee_center_y());
        fixture.send(PointerPhase::Down, strip, 0.0);
        assert!(fixture.marquee.is_dragging(), "marquee owns the pointer");
        assert!(!fixture.carousel.is_dragging(), "stage untouched");
        fixture.send(PointerPhase::Up, strip, 50.0);
        assert!(!fixture.marquee.is_dragging(), "released");
    }

    #[test]
    fn keys_map_to_carousel_keys() {
        assert_eq!(carousel_key(KeyCode::Space), Some(CarouselKey::Activate), "space activates");
        assert_eq!(carousel_key(KeyCode::KeyA), None, "letters ignored");
    }

    #[test]
    fn arrow_key_system_navigates() {
        let mut world = World::new();
        world.insert_resource(Carousel::new(4, 0, CarouselConfig::default()));
        world.insert_resource(Time::<()>::default());
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ArrowRight);
        world.insert_resource(keys);

        world.run_system_once(handle_keys).expect("system runs");
        assert!(world.resource::<Carousel>().is_settling(), "right arrow starts a settle");
    }

    #[test]
    fn relayout_updates_the_drag_basis() {
        let mut world = World::new();
        world.insert_resource(Carousel::new(4, 0, CarouselConfig::default()));
        world.insert_resource(ViewportSize {
            width: 390.0,
            height: 844.0,
        });
        world.init_resource::<MarqueeConfig>();
        world.init_resource::<GalleryLayout>();

        world.run_system_once(relayout).expect("system runs");
        let layout = *world.resource::<GalleryLayout>();
        assert!((layout.stage.card_width - 250.0).abs() < 1e-4, "phone card clamps up");
        assert!(
            (world.resource::<Carousel>().basis_px() - layout.stage.basis()).abs() < 1e-4,
            "carousel uses the measured basis"
        );
    }
}
