//! Screen regions of the gallery in window coordinates (top-left origin, y down).

use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;
use gallery_helpers::viewport::ViewportSize;

use crate::marquee::MarqueeConfig;
use crate::slots::StageLayout;

const NAV_BUTTON_SIZE: Vec2 = Vec2::new(84.0, 44.0);
const NAV_BUTTON_MARGIN: f32 = 20.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GalleryLayout {
    pub viewport: Vec2,
    pub stage: StageLayout,
    pub marquee_top: f32,
    pub marquee_height: f32,
}

impl Default for GalleryLayout {
    fn default() -> Self {
        let viewport = ViewportSize::default();
        Self::measure(
            Vec2::new(viewport.width, viewport.height),
            MarqueeConfig::default().strip_height,
        )
    }
}

impl GalleryLayout {
    /// The stage takes the full width at the top; the marquee sits below it.
    pub fn measure(viewport: Vec2, marquee_height: f32) -> Self {
        let stage = StageLayout::measure(viewport.x, viewport.y);
        Self {
            viewport,
            stage,
            marquee_top: stage.height,
            marquee_height,
        }
    }

    pub fn stage_center(&self) -> Vec2 {
        Vec2::new(self.viewport.x / 2.0, self.stage.height / 2.0)
    }

    /// Window point relative to the stage centre, y still down.
    pub fn to_stage(&self, point: Vec2) -> Vec2 {
        point - self.stage_center()
    }

    /// Window point to 2D world coordinates of a camera centred on the window.
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.viewport.x / 2.0, self.viewport.y / 2.0 - point.y)
    }

    pub fn marquee_center_y(&self) -> f32 {
        self.marquee_top + self.marquee_height / 2.0
    }

    pub fn in_stage(&self, point: Vec2) -> bool {
        Rect::new(0.0, 0.0, self.viewport.x, self.stage.height).contains(point)
    }

    pub fn in_marquee(&self, point: Vec2) -> bool {
        Rect::new(
            0.0,
            self.marquee_top,
            self.viewport.x,
            self.marquee_top + self.marquee_height,
        )
        .contains(point)
    }

    /// Prev (-1) or Next (+1) button rectangle at the stage edges.
    pub fn nav_button(&self, direction: i32) -> Rect {
        let center_y = self.stage.height / 2.0;
        let half = NAV_BUTTON_SIZE / 2.0;
        let center_x = if direction < 0 {
            NAV_BUTTON_MARGIN + half.x
        } else {
            self.viewport.x - NAV_BUTTON_MARGIN - half.x
        };
        Rect::from_center_half_size(Vec2::new(center_x, center_y), half)
    }

    pub fn nav_hit(&self, point: Vec2) -> Option<i32> {
        [-1, 1]
            .into_iter()
            .find(|&direction| self.nav_button(direction).contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GalleryLayout {
        GalleryLayout::measure(Vec2::new(1280.0, 900.0), 164.0)
    }

    #[test]
    fn marquee_sits_below_the_stage() {
        let layout = layout();
        assert!((layout.marquee_top - 688.0).abs() < 1e-4, "stage height first");
        assert!(layout.in_stage(Vec2::new(640.0, 300.0)), "stage point");
        assert!(layout.in_marquee(Vec2::new(640.0, 760.0)), "marquee point");
        assert!(!layout.in_stage(Vec2::new(640.0, 760.0)), "regions do not overlap");
    }

    #[test]
    fn world_coordinates_are_centred_and_y_up() {
        let layout = layout();
        assert_eq!(layout.to_world(Vec2::new(640.0, 450.0)), Vec2::ZERO, "window centre");
        assert_eq!(layout.to_world(Vec2::ZERO), Vec2::new(-640.0, 450.0), "top-left corner");
        assert_eq!(layout.to_stage(Vec2::new(640.0, 344.0)), Vec2::ZERO, "stage centre");
    }

    #[test]
    fn nav_buttons_hug_the_edges() {
        let layout = layout();
        assert_eq!(layout.nav_hit(Vec2::new(40.0, 344.0)), Some(-1), "prev button");
        assert_eq!(layout.nav_hit(Vec2::new(1240.0, 344.0)), Some(1), "next button");
        assert_eq!(layout.nav_hit(Vec2::new(640.0, 344.0)), None, "centre of the stage");
    }
}
