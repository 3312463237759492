use bevy::math::Vec2;
use gallery_helpers::input::PointerId;

use crate::config::LightboxConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Close,
    Navigate(i32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Swipe {
    pointer_id: PointerId,
    start_x: f32,
    start_ms: f64,
    dx: f32,
}

/// Full-screen viewer state. It has its own, simpler swipe handling.
#[derive(Debug, Clone, PartialEq)]
pub struct Lightbox {
    config: LightboxConfig,
    swipe: Option<Swipe>,
}

/// What a finished lightbox gesture turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeOutcome {
    Navigate(i32),
    /// Released without swiping; `x` is the release position for tap zones.
    Tap { x: f32 },
    None,
}

impl Lightbox {
    pub const fn new(config: LightboxConfig) -> Self {
        Self {
            config,
            swipe: None,
        }
    }

    pub fn pointer_down(&mut self, pointer_id: PointerId, x: f32, now_ms: f64) {
        if self.swipe.is_some() {
            return;
        }
        self.swipe = Some(Swipe {
            pointer_id,
            start_x: x,
            start_ms: now_ms,
            dx: 0.0,
        });
    }

    pub fn pointer_move(&mut self, pointer_id: PointerId, x: f32) {
        if let Some(swipe) = self.swipe.as_mut().filter(|swipe| swipe.pointer_id == pointer_id) {
            swipe.dx = x - swipe.start_x;
        }
    }

    pub fn pointer_up(&mut self, pointer_id: PointerId, x: f32, now_ms: f64) -> SwipeOutcome {
        let Some(swipe) = self.take_swipe(pointer_id) else {
            return SwipeOutcome::None;
        };
        self.swipe_delta(swipe, x, now_ms)
            .map_or(SwipeOutcome::Tap { x }, SwipeOutcome::Navigate)
    }

    /// Ends the swipe like a release, at the last tracked move. A cancelled
    /// gesture is never a tap.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId, now_ms: f64) -> SwipeOutcome {
        self.take_swipe(pointer_id)
            .and_then(|swipe| self.swipe_delta(swipe, swipe.start_x + swipe.dx, now_ms))
            .map_or(SwipeOutcome::None, SwipeOutcome::Navigate)
    }

    fn take_swipe(&mut self, pointer_id: PointerId) -> Option<Swipe> {
        let swipe = self.swipe.filter(|swipe| swipe.pointer_id == pointer_id)?;
        self.swipe = None;
        Some(swipe)
    }

    /// Navigation earned by a swipe ending at `x`, if it was long or fast enough.
    fn swipe_delta(&self, swipe: Swipe, x: f32, now_ms: f64) -> Option<i32> {
        let dx = x - swipe.start_x;
        let dt = (now_ms - swipe.start_ms).max(1.0) as f32;
        let vx = dx / dt;

        let swiped =
            dx.abs() > self.config.swipe_threshold_px || vx.abs() > self.config.swipe_flick_px_ms;
        // Swiping right reveals the previous photo.
        swiped.then_some(if dx > 0.0 { -1 } else { 1 })
    }

    /// Tap targets: the close button, then the left and right edge strips.
    pub fn tap_action(&self, position: Vec2, viewport: Vec2) -> Option<LightboxAction> {
        let close = self.config.close_button;
        if position.x >= viewport.x - close.x && position.y <= close.y {
            return Some(LightboxAction::Close);
        }
        let strip = viewport.x * self.config.nav_zone_fraction;
        if position.x <= strip {
            Some(LightboxAction::Navigate(-1))
        } else if position.x >= viewport.x - strip {
            Some(LightboxAction::Navigate(1))
        } else {
            None
        }
    }

    pub const fn is_swiping(&self) -> bool {
        self.swipe.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightbox() -> Lightbox {
        Lightbox::new(LightboxConfig::default())
    }

    #[test]
    fn long_swipe_navigates_opposite_to_drag() {
        let mut lightbox = lightbox();
        lightbox.pointer_down(PointerId::Touch(1), 300.0, 0.0);
        lightbox.pointer_move(PointerId::Touch(1), 200.0);
        assert_eq!(
            lightbox.pointer_up(PointerId::Touch(1), 200.0, 600.0),
            SwipeOutcome::Navigate(1),
            "swipe left shows the next photo"
        );

        lightbox.pointer_down(PointerId::Touch(2), 100.0, 1000.0);
        assert_eq!(
            lightbox.pointer_up(PointerId::Touch(2), 190.0, 1600.0),
            SwipeOutcome::Navigate(-1),
            "swipe right shows the previous photo"
        );
    }

    #[test]
    fn quick_short_flick_navigates() {
        let mut lightbox = lightbox();
        lightbox.pointer_down(PointerId::Mouse, 400.0, 0.0);
        // 40 px in 50 ms is 0.8 px/ms.
        assert_eq!(
            lightbox.pointer_up(PointerId::Mouse, 360.0, 50.0),
            SwipeOutcome::Navigate(1),
            "flick beats the distance threshold"
        );
    }

    #[test]
    fn slow_short_drag_is_a_tap() {
        let mut lightbox = lightbox();
        lightbox.pointer_down(PointerId::Mouse, 400.0, 0.0);
        assert_eq!(
            lightbox.pointer_up(PointerId::Mouse, 390.0, 500.0),
            SwipeOutcome::Tap { x: 390.0 },
            "no navigation"
        );
    }

    #[test]
    fn other_pointers_are_ignored() {
        let mut lightbox = lightbox();
        lightbox.pointer_down(PointerId::Touch(1), 300.0, 0.0);
        lightbox.pointer_down(PointerId::Touch(2), 0.0, 0.0);
        assert_eq!(
            lightbox.pointer_up(PointerId::Touch(2), 900.0, 10.0),
            SwipeOutcome::None,
            "second finger does not own the swipe"
        );
        assert!(lightbox.is_swiping(), "first finger still swiping");
        assert_eq!(
            lightbox.pointer_cancel(PointerId::Touch(1), 400.0),
            SwipeOutcome::None,
            "cancel without a swipe is not a tap"
        );
        assert!(!lightbox.is_swiping(), "cancel drops the swipe");
    }

    #[test]
    fn cancelled_swipe_still_navigates() {
        let mut lightbox = lightbox();
        lightbox.pointer_down(PointerId::Touch(3), 700.0, 0.0);
        lightbox.pointer_move(PointerId::Touch(3), 500.0);
        assert_eq!(
            lightbox.pointer_cancel(PointerId::Touch(3), 800.0),
            SwipeOutcome::Navigate(1),
            "an interrupted 200 px swipe counts"
        );
        assert!(!lightbox.is_swiping(), "gesture ended");
    }

    #[test]
    fn tap_zones() {
        let lightbox = lightbox();
        let viewport = Vec2::new(1000.0, 800.0);
        assert_eq!(
            lightbox.tap_action(Vec2::new(950.0, 20.0), viewport),
            Some(LightboxAction::Close),
            "close button"
        );
        assert_eq!(
            lightbox.tap_action(Vec2::new(50.0, 400.0), viewport),
            Some(LightboxAction::Navigate(-1)),
            "left strip"
        );
        assert_eq!(
            lightbox.tap_action(Vec2::new(950.0, 400.0), viewport),
            Some(LightboxAction::Navigate(1)),
            "right strip"
        );
        assert_eq!(lightbox.tap_action(Vec2::new(500.0, 400.0), viewport), None, "photo");
    }
}
