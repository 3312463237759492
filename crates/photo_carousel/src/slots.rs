//! Five-slot layout derived from the carousel each frame.

use bevy::math::{Rect, Vec2};

use crate::carousel::{Carousel, wrap_index};

/// Slots rendered on each side of the centre.
pub const SIDE_SLOTS: i32 = 2;

/// Virtual positions closer than this to 0 count as the centre slot.
const CENTER_EPSILON: f32 = 0.45;

/// Share of centre emphasis borrowed by side slots while moving.
const MOTION_SOFTEN: f32 = 0.34;

/// Stage geometry, all in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageLayout {
    pub width: f32,
    pub height: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub near_x: f32,
    pub far_x: f32,
}

impl Default for StageLayout {
    fn default() -> Self {
        Self::measure(1280.0, 900.0)
    }
}

impl StageLayout {
    pub fn measure(container_width: f32, viewport_height: f32) -> Self {
        let width = if container_width > 0.0 {
            container_width
        } else {
            1.0
        };
        let card_width = (width * 0.38).clamp(250.0, 520.0);
        let card_height = (card_width * 1.25).round();
        let near_x = (card_width * 0.64).round();
        let far_x = (card_width * 1.12).round();
        let height = (card_height + 80.0)
            .max((viewport_height * 0.72).clamp(520.0, 860.0))
            .round();
        Self {
            width,
            height,
            card_width,
            card_height,
            near_x,
            far_x,
        }
    }

    /// Pixel distance of one slide; drag and release math divide by this.
    pub fn basis(&self) -> f32 {
        self.near_x.max(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Keyframe {
    scale: f32,
    y: f32,
    brightness: f32,
    blur: f32,
    opacity: f32,
}

const fn keyframe(scale: f32, y: f32, brightness: f32, blur: f32, opacity: f32) -> Keyframe {
    Keyframe {
        scale,
        y,
        brightness,
        blur,
        opacity,
    }
}

// rel -2 ..= 2
const KEYFRAMES: [Keyframe; 5] = [
    keyframe(0.58, 6.0, 0.65, 2.0, 0.78),
    keyframe(0.72, 6.0, 0.82, 1.0, 0.9),
    keyframe(1.0, -8.0, 1.0, 0.0, 1.0),
    keyframe(0.72, 6.0, 0.82, 1.0, 0.9),
    keyframe(0.58, 6.0, 0.65, 2.0, 0.78),
];

const CENTER_KEYFRAME: Keyframe = KEYFRAMES[SIDE_SLOTS as usize];

fn keyframe_at(rel: f32) -> Keyframe {
    KEYFRAMES
        .get((rel as i32 + SIDE_SLOTS) as usize)
        .copied()
        .unwrap_or(CENTER_KEYFRAME)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (b - a).mul_add(t, a)
}

/// Visual parameters of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    /// Horizontal offset from the stage centre.
    pub x: f32,
    /// Vertical offset, positive is down.
    pub y: f32,
    pub scale: f32,
    pub brightness: f32,
    pub blur: f32,
    pub opacity: f32,
    pub shadow: f32,
    pub z_index: i32,
}

/// Interpolated style for a virtual position in slides from the centre.
pub fn style_at(pos: f32, layout: &StageLayout, moving: bool) -> SlotStyle {
    let clamped = pos.clamp(-2.0, 2.0);
    let lower = clamped.floor();
    let upper = clamped.ceil();
    let alpha = if (upper - lower).abs() < f32::EPSILON {
        0.0
    } else {
        clamped - lower
    };
    let a = keyframe_at(lower);
    let b = keyframe_at(upper);

    let abs = clamped.abs();
    let basis = layout.basis();
    let distance = if abs <= 1.0 {
        basis * abs
    } else {
        (layout.far_x - basis).mul_add((abs - 1.0).clamp(0.0, 1.0), basis)
    };
    let x = distance.copysign(clamped);

    let shadow = if abs <= 1.0 {
        0.22f32.mul_add(-abs, 1.0)
    } else {
        0.18f32.mul_add(-(abs - 1.0).clamp(0.0, 1.0), 0.78)
    };
    let z_index = 100 - (abs * 12.0).round() as i32;

    let soften = if moving { MOTION_SOFTEN } else { 0.0 };
    let scale = lerp(a.scale, b.scale, alpha);
    let brightness = lerp(a.brightness, b.brightness, alpha);
    let blur = lerp(a.blur, b.blur, alpha);
    let opacity = lerp(a.opacity, b.opacity, alpha);

    SlotStyle {
        x,
        y: lerp(a.y, b.y, alpha),
        scale: ((1.0 - scale) * soften).mul_add(0.2, scale),
        brightness: ((1.0 - brightness) * soften).mul_add(0.45, brightness),
        blur: blur * soften.mul_add(-0.42, 1.0),
        opacity: ((1.0 - opacity) * soften).mul_add(0.28, opacity),
        shadow,
        z_index,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotView {
    /// Slot position in the ring, -2 ..= 2.
    pub rel: i32,
    /// Photo shown in this slot.
    pub item_index: usize,
    pub style: SlotStyle,
    pub is_center: bool,
    /// Centre emphasis is only drawn at rest.
    pub emphasized: bool,
    /// Navigation steps that would bring this slot's photo to the centre.
    pub steps_to_center: i32,
}

impl SlotView {
    /// Card rectangle relative to the stage centre, y down.
    pub fn rect(&self, layout: &StageLayout) -> Rect {
        let size = Vec2::new(layout.card_width, layout.card_height) * self.style.scale;
        Rect::from_center_size(Vec2::new(self.style.x, self.style.y), size)
    }
}

pub fn slot_views(
    len: usize,
    active_index: usize,
    offset: f32,
    moving: bool,
    layout: &StageLayout,
) -> Vec<SlotView> {
    if len == 0 {
        return Vec::new();
    }
    let shift = offset.trunc();
    let local = offset - shift;
    let shift = shift as i32;
    let base = wrap_index(active_index, i64::from(shift), len);

    (-SIDE_SLOTS..=SIDE_SLOTS)
        .map(|rel| {
            let virtual_pos = rel as f32 - local;
            let is_center = virtual_pos.abs() < CENTER_EPSILON;
            SlotView {
                rel,
                item_index: wrap_index(base, i64::from(rel), len),
                style: style_at(virtual_pos, layout, moving),
                is_center,
                emphasized: is_center && !moving,
                steps_to_center: shift + rel,
            }
        })
        .collect()
}

pub fn visible_slots(carousel: &Carousel, layout: &StageLayout) -> Vec<SlotView> {
    slot_views(
        carousel.len(),
        carousel.active_index(),
        carousel.offset(),
        carousel.is_moving(),
        layout,
    )
}

/// Topmost slot whose card contains `point` (stage-centre relative, y down).
pub fn hit_test<'a>(slots: &'a [SlotView], point: Vec2, layout: &StageLayout) -> Option<&'a SlotView> {
    slots
        .iter()
        .filter(|slot| slot.rect(layout).contains(point))
        .max_by_key(|slot| slot.style.z_index)
}
