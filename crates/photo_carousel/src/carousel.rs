//! The carousel controller: a committed centre index plus a continuous offset
//! driven by drags and the settle spring.
//!
//! All state changes happen in event handlers or in [`Carousel::frame`],
//! which the app calls once per rendered frame. Timestamps are milliseconds
//! on a single monotonic clock.

use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use gallery_helpers::input::PointerId;

use crate::config::CarouselConfig;
use crate::lightbox::{Lightbox, LightboxAction, SwipeOutcome};
use crate::motion::{DragSession, Motion, MotionPhase, ReleasePlan, Spring, plan_release};
use crate::profile::{PointerKind, SettleProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselKey {
    Left,
    Right,
    /// Enter or Space.
    Activate,
    Escape,
}

/// `(index + delta) mod len`, or 0 for an empty gallery.
pub fn wrap_index(index: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as i64 + delta).rem_euclid(len as i64) as usize
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    pub kind: PointerKind,
    pub plan: ReleasePlan,
    pub travel_px: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct Carousel {
    len: usize,
    active_index: usize,
    offset: f32,
    motion: Motion,
    hovered: bool,
    lightbox: Option<Lightbox>,
    reduced_motion: bool,
    idle_until_ms: f64,
    /// Pixel distance of one slide at full drag strength.
    basis_px: f32,
    config: CarouselConfig,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(0, 0, CarouselConfig::default())
    }
}

impl Carousel {
    pub fn new(len: usize, initial_index: i64, config: CarouselConfig) -> Self {
        Self {
            len,
            active_index: wrap_index(0, initial_index, len),
            offset: 0.0,
            motion: Motion::Idle,
            hovered: false,
            lightbox: None,
            reduced_motion: false,
            idle_until_ms: 0.0,
            basis_px: 1.0,
            config,
        }
    }

    /// Swaps in a new photo list; any motion or open lightbox is dropped.
    pub fn replace_items(&mut self, len: usize, initial_index: Option<i64>) {
        self.len = len;
        self.active_index = wrap_index(0, initial_index.unwrap_or(0), len);
        self.teardown();
    }

    /// Returns to a resting state, cancelling drag, settle and lightbox.
    pub fn teardown(&mut self) {
        self.motion = Motion::Idle;
        self.offset = 0.0;
        self.lightbox = None;
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// In-progress motion in slides, relative to [`Self::active_index`].
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    pub const fn phase(&self) -> MotionPhase {
        self.motion.phase()
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragging(_))
    }

    pub const fn is_settling(&self) -> bool {
        matches!(self.motion, Motion::Settling(_))
    }

    pub const fn is_moving(&self) -> bool {
        !matches!(self.motion, Motion::Idle)
    }

    pub const fn hovered(&self) -> bool {
        self.hovered
    }

    pub const fn lightbox_open(&self) -> bool {
        self.lightbox.is_some()
    }

    pub const fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub const fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub const fn idle_until_ms(&self) -> f64 {
        self.idle_until_ms
    }

    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub const fn basis_px(&self) -> f32 {
        self.basis_px
    }

    pub fn set_basis(&mut self, basis_px: f32) {
        self.basis_px = basis_px.max(1.0);
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Entering reduced motion lands any running settle immediately.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if !enabled {
            return;
        }
        if let Motion::Settling(spring) = &self.motion {
            let pending = spring.target().round() as i64;
            self.commit(pending);
            self.offset = 0.0;
            self.motion = Motion::Idle;
        }
    }

    fn commit(&mut self, steps: i64) {
        self.active_index = wrap_index(self.active_index, steps, self.len);
    }

    fn push_idle(&mut self, now_ms: f64, duration_ms: f64) {
        self.idle_until_ms = now_ms + duration_ms;
    }

    /// Starts a drag. Ignored while another pointer owns the stage.
    pub fn pointer_down(
        &mut self,
        pointer_id: PointerId,
        kind: PointerKind,
        x: f32,
        now_ms: f64,
        viewport_width: f32,
        is_ios: bool,
    ) -> bool {
        if self.len == 0 || self.lightbox.is_some() || self.is_dragging() {
            return false;
        }
        // Cancel the settle but keep the offset, the drag eases from there.
        self.motion = Motion::Dragging(DragSession::new(
            pointer_id,
            kind,
            x,
            now_ms,
            viewport_width,
            is_ios,
        ));
        self.push_idle(now_ms, self.config.idle_after_pointer_ms);
        true
    }

    pub fn pointer_move(&mut self, pointer_id: PointerId, x: f32, now_ms: f64, viewport_width: f32) -> bool {
        let Motion::Dragging(session) = &mut self.motion else {
            return false;
        };
        if session.pointer_id != pointer_id {
            return false;
        }
        session.record_move(x, now_ms, viewport_width, &self.config.profiles);
        true
    }

    /// Ends the drag owned by `pointer_id`; release and cancel behave the same.
    pub fn finish_drag(&mut self, pointer_id: PointerId, x: f32, now_ms: f64) -> Option<DragOutcome> {
        let Motion::Dragging(session) = &mut self.motion else {
            return None;
        };
        if session.pointer_id != pointer_id {
            return None;
        }

        session.pending_dx = x - session.start_x;
        session.travel_px = session.travel_px.max(session.pending_dx.abs());
        let profile = session.profile(&self.config.profiles);
        let velocity = session
            .samples
            .velocity_px_ms(now_ms, profile.velocity_window_ms);
        let plan = plan_release(session.pending_dx, velocity, self.basis_px, &profile);
        let outcome = DragOutcome {
            kind: session.kind,
            plan,
            travel_px: session.travel_px,
        };
        debug!(
            "Drag released ({}): dx {:.1}px, {:.2} slides/s, target {}",
            outcome.kind, session.pending_dx, plan.velocity_slides_per_sec, plan.target_steps
        );

        self.motion = Motion::Idle;
        let settle = self.config.settle.for_pointer(outcome.kind);
        self.navigate_to_steps(plan.target_steps, Some(plan.seed_velocity(&settle)), settle, now_ms);
        Some(outcome)
    }

    /// Advances drag following or the settle spring by one frame.
    ///
    /// Returns the whole slides committed to the active index this frame.
    pub fn frame(&mut self, now_ms: f64) -> i32 {
        match &mut self.motion {
            Motion::Idle => 0,
            Motion::Dragging(session) => {
                let profile = session.profile(&self.config.profiles);
                let target = session.follow_target(self.basis_px, &profile);
                self.offset += (target - self.offset) * profile.follow_lerp;
                0
            }
            Motion::Settling(spring) => {
                let step = spring.step(self.offset, now_ms);
                self.offset = step.offset;
                if step.done {
                    self.motion = Motion::Idle;
                }
                self.commit(i64::from(step.committed));
                step.committed
            }
        }
    }

    /// Moves by `delta` slides, adding to any settle already under way so
    /// rapid presses are never dropped.
    pub fn navigate_by(&mut self, delta: i32, now_ms: f64) {
        if self.len == 0 || self.is_dragging() {
            return;
        }
        self.push_idle(now_ms, self.config.idle_after_navigate_ms);
        let max = self.config.max_request_steps;
        let delta = delta.clamp(-max, max);

        if self.reduced_motion {
            self.land(delta);
            return;
        }

        let profile = self.config.settle.navigate;
        let limit = self.config.max_accumulated_steps;
        match &mut self.motion {
            Motion::Settling(spring) => {
                spring.retune(&profile);
                spring.set_target((spring.target() + delta as f32).clamp(-limit, limit));
            }
            _ => {
                self.motion = Motion::Settling(Spring::new(
                    (delta as f32).clamp(-limit, limit),
                    0.0,
                    &profile,
                ));
            }
        }
    }

    /// Settles to exactly `steps` away from the current index, replacing any
    /// pending target. `seed_velocity` keeps the spring's own when `None`.
    pub fn navigate_to_steps(
        &mut self,
        steps: i32,
        seed_velocity: Option<f32>,
        profile: SettleProfile,
        now_ms: f64,
    ) {
        if self.len == 0 || self.is_dragging() {
            return;
        }
        self.push_idle(now_ms, self.config.idle_after_navigate_ms);
        let max = self.config.max_request_steps;
        let steps = steps.clamp(-max, max);

        if self.reduced_motion {
            self.land(steps);
            return;
        }

        match &mut self.motion {
            Motion::Settling(spring) => {
                spring.retune(&profile);
                if let Some(velocity) = seed_velocity {
                    spring.set_velocity(velocity);
                }
                spring.set_target(steps as f32);
            }
            _ => {
                self.motion = Motion::Settling(Spring::new(
                    steps as f32,
                    seed_velocity.unwrap_or(0.0),
                    &profile,
                ));
            }
        }
    }

    /// Reduced-motion navigation: commit now, no animation.
    fn land(&mut self, steps: i32) {
        self.commit(i64::from(steps));
        self.offset = 0.0;
        self.motion = Motion::Idle;
    }

    /// A tap on a slot: the centre opens the lightbox, others come to centre.
    pub fn click_slot(&mut self, steps_to_center: i32, is_center: bool, now_ms: f64) {
        if is_center {
            self.open_lightbox(now_ms);
        } else {
            let profile = self.config.settle.navigate;
            self.navigate_to_steps(steps_to_center, None, profile, now_ms);
        }
    }

    pub fn key(&mut self, key: CarouselKey, now_ms: f64) {
        if self.lightbox.is_some() {
            match key {
                CarouselKey::Escape => self.close_lightbox(),
                CarouselKey::Left => self.lightbox_navigate(-1),
                CarouselKey::Right => self.lightbox_navigate(1),
                CarouselKey::Activate => {}
            }
            return;
        }
        match key {
            CarouselKey::Left => self.navigate_by(-1, now_ms),
            CarouselKey::Right => self.navigate_by(1, now_ms),
            CarouselKey::Activate => self.open_lightbox(now_ms),
            CarouselKey::Escape => {}
        }
    }

    pub fn open_lightbox(&mut self, now_ms: f64) {
        if self.len == 0 || self.lightbox.is_some() || self.is_dragging() {
            return;
        }
        info!("Lightbox opened at photo {}", self.active_index);
        self.lightbox = Some(Lightbox::new(self.config.lightbox));
        self.push_idle(now_ms, self.config.idle_after_lightbox_ms);
    }

    pub fn close_lightbox(&mut self) {
        if self.lightbox.take().is_some() {
            info!("Lightbox closed at photo {}", self.active_index);
        }
    }

    /// Lightbox paging is immediate, there is no spring behind it.
    pub fn lightbox_navigate(&mut self, delta: i32) {
        if self.lightbox.is_some() {
            self.commit(i64::from(delta));
        }
    }

    pub fn lightbox_pointer_down(&mut self, pointer_id: PointerId, x: f32, now_ms: f64) {
        if let Some(lightbox) = self.lightbox.as_mut() {
            lightbox.pointer_down(pointer_id, x, now_ms);
        }
    }

    pub fn lightbox_pointer_move(&mut self, pointer_id: PointerId, x: f32) {
        if let Some(lightbox) = self.lightbox.as_mut() {
            lightbox.pointer_move(pointer_id, x);
        }
    }

    /// A cancelled lightbox gesture can still swipe, but never taps.
    pub fn lightbox_pointer_cancel(&mut self, pointer_id: PointerId, now_ms: f64) -> Option<LightboxAction> {
        let lightbox = self.lightbox.as_mut()?;
        let SwipeOutcome::Navigate(delta) = lightbox.pointer_cancel(pointer_id, now_ms) else {
            return None;
        };
        self.lightbox_navigate(delta);
        Some(LightboxAction::Navigate(delta))
    }

    /// Finishes a lightbox gesture and applies what it meant.
    pub fn lightbox_pointer_up(
        &mut self,
        pointer_id: PointerId,
        position: Vec2,
        viewport: Vec2,
        now_ms: f64,
    ) -> Option<LightboxAction> {
        let lightbox = self.lightbox.as_mut()?;
        let action = match lightbox.pointer_up(pointer_id, position.x, now_ms) {
            SwipeOutcome::Navigate(delta) => Some(LightboxAction::Navigate(delta)),
            SwipeOutcome::Tap { .. } => lightbox.tap_action(position, viewport),
            SwipeOutcome::None => None,
        };
        match action {
            Some(LightboxAction::Close) => self.close_lightbox(),
            Some(LightboxAction::Navigate(delta)) => self.lightbox_navigate(delta),
            None => {}
        }
        action
    }

    /// Whether an autoplay tick at `now_ms` may advance the carousel.
    pub fn autoplay_allowed(&self, now_ms: f64) -> bool {
        !self.reduced_motion
            && self.len > 0
            && !self.hovered
            && !self.is_dragging()
            && self.lightbox.is_none()
            && now_ms >= self.idle_until_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: usize = 5000;

    /// Effective mouse drag basis of 150 px.
    const MOUSE_BASIS: f32 = 150.0 / 0.9;

    fn carousel(len: usize, initial: i64) -> Carousel {
        let mut carousel = Carousel::new(len, initial, CarouselConfig::default());
        carousel.set_basis(MOUSE_BASIS);
        carousel
    }

    /// Runs frames until the carousel rests, checking the settle invariants.
    fn settle(carousel: &mut Carousel, now: &mut f64) {
        for _ in 0..MAX_FRAMES {
            if !carousel.is_moving() {
                break;
            }
            *now += FRAME_MS;
            let committed = carousel.frame(*now);
            if committed != 0 {
                assert!(carousel.offset().abs() < 1.0, "offset renormalized after commit");
            }
            assert!(
                carousel.is_empty() || carousel.active_index() < carousel.len(),
                "index stays in range"
            );
        }
        assert!(!carousel.is_moving(), "carousel came to rest");
        assert!(carousel.offset().abs() < f32::EPSILON, "offset reset to exactly zero");
    }

    fn drag(carousel: &mut Carousel, points: &[(f32, f64)], release: (f32, f64)) -> Option<DragOutcome> {
        let (&(x0, t0), rest) = points.split_first()?;
        carousel.pointer_down(PointerId::Mouse, PointerKind::Mouse, x0, t0, 1280.0, false);
        for &(x, t) in rest {
            carousel.pointer_move(PointerId::Mouse, x, t, 1280.0);
            carousel.frame(t);
        }
        carousel.finish_drag(PointerId::Mouse, release.0, release.1)
    }

    #[test]
    fn wrap_index_handles_negatives_and_empties() {
        assert_eq!(wrap_index(0, -1, 5), 4, "wraps backwards");
        assert_eq!(wrap_index(3, 12, 5), 0, "wraps forwards");
        assert_eq!(wrap_index(0, 7, 0), 0, "empty gallery");
        assert_eq!(Carousel::new(4, -1, CarouselConfig::default()).active_index(), 3, "negative initial index");
    }

    #[test]
    fn navigation_sums_modulo_len() {
        let mut now = 0.0;
        let mut carousel = carousel(7, 3);
        for delta in [1, -2, 3, 3] {
            carousel.navigate_by(delta, now);
        }
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), (3 + 5) % 7, "accumulated presses all land");

        for delta in [-1, 2, -3] {
            carousel.navigate_by(delta, now);
            for _ in 0..10 {
                now += FRAME_MS;
                carousel.frame(now);
            }
        }
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), (8 - 2) % 7, "interleaved presses land too");
    }

    #[test]
    fn rapid_presses_cap_the_pending_target() {
        let mut now = 0.0;
        let mut carousel = carousel(20, 0);
        for _ in 0..20 {
            carousel.navigate_by(1, now);
        }
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), 12, "pending target clamped to 12");
    }

    #[test]
    fn single_request_is_clamped_to_three_steps() {
        let mut now = 0.0;
        let mut carousel = carousel(10, 0);
        carousel.navigate_by(8, now);
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), 3, "clamped request");
    }

    #[test]
    fn mouse_drag_of_one_and_a_third_slides_commits_one() {
        let mut now = 600.0;
        let mut carousel = carousel(5, 0);
        let outcome = drag(
            &mut carousel,
            &[(0.0, 0.0), (-50.0, 100.0), (-100.0, 200.0), (-150.0, 300.0), (-200.0, 400.0)],
            (-200.0, now),
        );
        assert_eq!(outcome.map(|outcome| outcome.plan.target_steps), Some(1), "one step planned");
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), 1, "index advanced to 1");
    }

    #[test]
    fn small_slow_drag_returns_home() {
        let mut now = 500.0;
        let mut carousel = carousel(5, 2);
        drag(&mut carousel, &[(400.0, 0.0), (390.0, 150.0), (380.0, 300.0)], (380.0, now));
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), 2, "snapped back to the same photo");
    }

    #[test]
    fn flick_commits_even_against_net_displacement() {
        let mut now = 220.0;
        let mut carousel = carousel(5, 0);
        // Net displacement is +6 px (backwards) but the pointer is moving
        // forward at 1 px/ms when released.
        let outcome = drag(
            &mut carousel,
            &[(0.0, 0.0), (30.0, 200.0), (22.0, 208.0), (14.0, 216.0)],
            (6.0, now),
        );
        let plan = outcome.map(|outcome| outcome.plan);
        assert!(plan.is_some_and(|plan| plan.flick), "release counts as a flick");
        assert!(plan.is_some_and(|plan| plan.target_steps >= 1), "at least one step forward");
        settle(&mut carousel, &mut now);
        assert_ne!(carousel.active_index(), 0, "flick moved the gallery");
    }

    #[test]
    fn reduced_motion_navigates_synchronously() {
        let mut carousel = carousel(5, 0);
        carousel.set_reduced_motion(true);

        carousel.navigate_by(2, 0.0);
        assert_eq!(carousel.active_index(), 2, "committed at once");
        assert!(!carousel.is_moving(), "no animation scheduled");

        carousel.click_slot(-1, false, 0.0);
        assert_eq!(carousel.active_index(), 1, "slot tap committed at once");
        assert!(carousel.offset().abs() < f32::EPSILON, "offset stays zero");
    }

    #[test]
    fn enabling_reduced_motion_lands_running_settle() {
        let mut carousel = carousel(6, 0);
        carousel.navigate_by(2, 0.0);
        carousel.frame(FRAME_MS);
        carousel.set_reduced_motion(true);
        assert_eq!(carousel.active_index(), 2, "pending steps committed");
        assert!(!carousel.is_moving(), "spring dropped");
    }

    #[test]
    fn single_photo_never_moves() {
        let mut now = 500.0;
        let mut carousel = carousel(1, 0);
        carousel.key(CarouselKey::Right, now);
        carousel.key(CarouselKey::Left, now);
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), 0, "arrow keys keep index 0");

        now += 600.0;
        drag(&mut carousel, &[(0.0, now - 400.0), (-300.0, now - 200.0)], (-300.0, now));
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), 0, "drags keep index 0");
    }

    #[test]
    fn empty_gallery_ignores_everything() {
        let mut carousel = carousel(0, 3);
        assert!(
            !carousel.pointer_down(PointerId::Mouse, PointerKind::Mouse, 0.0, 0.0, 1280.0, false),
            "no drag on an empty gallery"
        );
        carousel.navigate_by(1, 0.0);
        carousel.open_lightbox(0.0);
        assert!(!carousel.is_moving(), "no settle");
        assert!(!carousel.lightbox_open(), "no lightbox");
        assert!(!carousel.autoplay_allowed(1e9), "no autoplay");
    }

    #[test]
    fn second_pointer_is_ignored_while_dragging() {
        let mut carousel = carousel(5, 0);
        assert!(
            carousel.pointer_down(PointerId::Touch(1), PointerKind::Touch, 200.0, 0.0, 390.0, false),
            "first finger captured"
        );
        assert!(
            !carousel.pointer_down(PointerId::Touch(2), PointerKind::Touch, 50.0, 10.0, 390.0, false),
            "second finger rejected"
        );
        assert!(!carousel.pointer_move(PointerId::Touch(2), -400.0, 20.0, 390.0), "foreign move ignored");
        assert!(carousel.finish_drag(PointerId::Touch(2), -400.0, 30.0).is_none(), "foreign release ignored");
        assert!(carousel.is_dragging(), "first finger still owns the drag");
    }

    #[test]
    fn pointer_down_cancels_settle_but_keeps_offset() {
        let mut carousel = carousel(5, 0);
        carousel.navigate_by(1, 0.0);
        for i in 1..=6 {
            carousel.frame(f64::from(i) * FRAME_MS);
        }
        let offset = carousel.offset();
        assert!(offset > 0.0, "spring moved the stage");

        carousel.pointer_down(PointerId::Mouse, PointerKind::Mouse, 0.0, 200.0, 1280.0, false);
        assert!(carousel.is_dragging(), "drag replaced the settle");
        assert!((carousel.offset() - offset).abs() < f32::EPSILON, "offset kept");
    }

    #[test]
    fn keys_route_to_lightbox_when_open() {
        let mut carousel = carousel(4, 0);
        carousel.key(CarouselKey::Activate, 0.0);
        assert!(carousel.lightbox_open(), "enter opens the lightbox");
        assert!((carousel.idle_until_ms() - 5000.0).abs() < f64::EPSILON, "idle pushed 5 s");

        carousel.key(CarouselKey::Left, 10.0);
        assert_eq!(carousel.active_index(), 3, "lightbox pages immediately");
        assert!(!carousel.is_moving(), "no spring in the lightbox");

        carousel.key(CarouselKey::Escape, 20.0);
        assert!(!carousel.lightbox_open(), "escape closes");
    }

    #[test]
    fn centre_tap_opens_lightbox_and_side_tap_navigates() {
        let mut now = 0.0;
        let mut carousel = carousel(6, 0);
        carousel.click_slot(0, true, now);
        assert!(carousel.lightbox_open(), "centre opens the lightbox");
        carousel.close_lightbox();

        carousel.click_slot(-2, false, now);
        settle(&mut carousel, &mut now);
        assert_eq!(carousel.active_index(), 4, "slot two to the left came to centre");
    }

    #[test]
    fn lightbox_swipe_pages_photos() {
        let mut carousel = carousel(3, 0);
        carousel.open_lightbox(0.0);
        let viewport = Vec2::new(800.0, 600.0);

        carousel.lightbox_pointer_down(PointerId::Touch(4), 500.0, 100.0);
        carousel.lightbox_pointer_move(PointerId::Touch(4), 380.0);
        let action = carousel.lightbox_pointer_up(PointerId::Touch(4), Vec2::new(380.0, 300.0), viewport, 400.0);
        assert_eq!(action, Some(LightboxAction::Navigate(1)), "swipe left");
        assert_eq!(carousel.active_index(), 1, "next photo shown");

        carousel.lightbox_pointer_down(PointerId::Mouse, 780.0, 500.0);
        let action = carousel.lightbox_pointer_up(PointerId::Mouse, Vec2::new(780.0, 10.0), viewport, 900.0);
        assert_eq!(action, Some(LightboxAction::Close), "close button tapped");
        assert!(!carousel.lightbox_open(), "lightbox closed");
    }

    #[test]
    fn autoplay_respects_idle_and_blockers() {
        let mut carousel = carousel(5, 0);
        carousel.navigate_by(1, 1000.0);
        assert!(!carousel.autoplay_allowed(4000.0), "still idle after navigation");
        assert!(carousel.autoplay_allowed(4500.0), "idle window elapsed");

        carousel.set_hovered(true);
        assert!(!carousel.autoplay_allowed(1e9), "hover blocks");
        carousel.set_hovered(false);

        carousel.teardown();
        carousel.pointer_down(PointerId::Mouse, PointerKind::Mouse, 0.0, 2000.0, 1280.0, false);
        assert!(!carousel.autoplay_allowed(1e9), "drag blocks");
        carousel.finish_drag(PointerId::Mouse, 0.0, 2100.0);
        carousel.teardown();

        carousel.open_lightbox(3000.0);
        assert!(!carousel.autoplay_allowed(1e9), "lightbox blocks");
        carousel.close_lightbox();

        carousel.set_reduced_motion(true);
        assert!(!carousel.autoplay_allowed(1e9), "reduced motion blocks");
    }

    #[test]
    fn replacing_items_resets_state() {
        let mut carousel = carousel(5, 0);
        carousel.navigate_by(1, 0.0);
        carousel.open_lightbox(0.0);
        carousel.replace_items(3, Some(4));
        assert_eq!(carousel.active_index(), 1, "initial index wrapped into the new list");
        assert!(!carousel.is_moving(), "settle cancelled");
        assert!(!carousel.lightbox_open(), "lightbox closed");
    }
}
