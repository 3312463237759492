use bevy::input::ButtonState;
use bevy::input::mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel};
use bevy::input::touch::{ForceTouch, TouchInput, TouchPhase};
use bevy::prelude::*;
use strum::Display;

/// Pixels per wheel "line" when the platform reports line deltas.
const LINE_HEIGHT_PX: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PointerKind {
    Touch,
    Pen,
    Mouse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A mouse or touch event in window coordinates (logical px, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerKind,
    pub phase: PointerPhase,
    pub position: Vec2,
}

/// Stylus touches carry an altitude angle, fingers do not.
pub fn touch_kind(force: Option<ForceTouch>) -> PointerKind {
    match force {
        Some(ForceTouch::Calibrated {
            altitude_angle: Some(_),
            ..
        }) => PointerKind::Pen,
        _ => PointerKind::Touch,
    }
}

pub fn touch_pointer_event(touch: &TouchInput) -> PointerEvent {
    let phase = match touch.phase {
        TouchPhase::Started => PointerPhase::Down,
        TouchPhase::Moved => PointerPhase::Move,
        TouchPhase::Ended => PointerPhase::Up,
        TouchPhase::Canceled => PointerPhase::Cancel,
    };
    PointerEvent {
        id: PointerId::Touch(touch.id),
        kind: touch_kind(touch.force),
        phase,
        position: touch.position,
    }
}

/// Drains this frame's mouse and touch events into one pointer stream.
///
/// Cursor moves come first so a press reported in the same frame sees the
/// latest position.
pub fn read_pointer_events(
    cursor_moves: &mut EventReader<CursorMoved>,
    mouse_buttons: &mut EventReader<MouseButtonInput>,
    touches: &mut EventReader<TouchInput>,
    window: &Window,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();

    for moved in cursor_moves.read() {
        events.push(PointerEvent {
            id: PointerId::Mouse,
            kind: PointerKind::Mouse,
            phase: PointerPhase::Move,
            position: moved.position,
        });
    }

    for button in mouse_buttons.read() {
        if button.button != MouseButton::Left {
            continue;
        }
        let Some(position) = window.cursor_position() else {
            continue;
        };
        let phase = match button.state {
            ButtonState::Pressed => PointerPhase::Down,
            ButtonState::Released => PointerPhase::Up,
        };
        events.push(PointerEvent {
            id: PointerId::Mouse,
            kind: PointerKind::Mouse,
            phase,
            position,
        });
    }

    events.extend(touches.read().map(touch_pointer_event));
    events
}

/// Wheel delta in browser convention: positive x scrolls right, positive y
/// scrolls down.
pub fn wheel_delta_px(wheel: &MouseWheel) -> Vec2 {
    let scale = match wheel.unit {
        MouseScrollUnit::Line => LINE_HEIGHT_PX,
        MouseScrollUnit::Pixel => 1.0,
    };
    Vec2::new(-wheel.x, -wheel.y) * scale
}
