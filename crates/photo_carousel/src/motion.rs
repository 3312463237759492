//! Continuous offset motion: drag tracking and the settle spring.

use gallery_helpers::input::PointerId;
use strum::Display;

use crate::profile::{DragProfile, PointerKind, ProfileHints, ProfileTable, SettleProfile};
use crate::velocity::{PointerSample, SampleBuffer};

const MIN_DT_SECS: f32 = 0.008;
const MAX_DT_SECS: f32 = 0.05;
const REST_DISTANCE: f32 = 0.001;
const REST_VELOCITY: f32 = 0.02;
const RESISTANCE: f32 = 0.85;
const VELOCITY_POWER_GAIN: f32 = 0.42;

/// Sign that is zero at zero, unlike `f32::signum`.
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rubber-bands drags beyond one slide and caps them at `max_preview`.
pub fn apply_drag_resistance(raw_slides: f32, max_preview: f32) -> f32 {
    let abs = raw_slides.abs();
    if abs <= 1.0 {
        return raw_slides;
    }
    let beyond = abs - 1.0;
    let resisted = 1.0 + beyond / beyond.mul_add(RESISTANCE, 1.0);
    (sign(raw_slides) * resisted).clamp(-max_preview, max_preview)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MotionPhase {
    Idle,
    Dragging,
    Settling,
}

#[derive(Debug, Clone)]
pub enum Motion {
    Idle,
    Dragging(DragSession),
    Settling(Spring),
}

impl Motion {
    pub const fn phase(&self) -> MotionPhase {
        match self {
            Self::Idle => MotionPhase::Idle,
            Self::Dragging(_) => MotionPhase::Dragging,
            Self::Settling(_) => MotionPhase::Settling,
        }
    }
}

/// One pointer gesture on the stage, from press to release.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub pointer_id: PointerId,
    pub kind: PointerKind,
    pub start_x: f32,
    pub pending_dx: f32,
    pub samples: SampleBuffer,
    pub viewport_width: f32,
    pub is_ios: bool,
    pub trackpad_like: bool,
    pub velocity_px_ms: f32,
    /// Largest distance from `start_x` seen during the gesture.
    pub travel_px: f32,
}

impl DragSession {
    pub fn new(
        pointer_id: PointerId,
        kind: PointerKind,
        x: f32,
        now_ms: f64,
        viewport_width: f32,
        is_ios: bool,
    ) -> Self {
        Self {
            pointer_id,
            kind,
            start_x: x,
            pending_dx: 0.0,
            samples: SampleBuffer::new(PointerSample { x, t_ms: now_ms }),
            viewport_width,
            is_ios,
            trackpad_like: false,
            velocity_px_ms: 0.0,
            travel_px: 0.0,
        }
    }

    pub const fn hints(&self) -> ProfileHints {
        ProfileHints {
            is_ios: self.is_ios,
            trackpad_like: self.trackpad_like,
        }
    }

    pub fn profile(&self, table: &ProfileTable) -> DragProfile {
        table.select(self.kind, self.viewport_width, self.hints())
    }

    pub fn record_move(&mut self, x: f32, now_ms: f64, viewport_width: f32, table: &ProfileTable) {
        self.viewport_width = viewport_width;
        self.samples.push(PointerSample { x, t_ms: now_ms });
        if self.kind == PointerKind::Mouse {
            self.trackpad_like = self.samples.is_trackpad_like();
        }
        let profile = self.profile(table);
        self.velocity_px_ms = self
            .samples
            .velocity_px_ms(now_ms, profile.velocity_window_ms);
        self.pending_dx = x - self.start_x;
        self.travel_px = self.travel_px.max(self.pending_dx.abs());
    }

    /// Offset the stage should ease toward this frame.
    pub fn follow_target(&self, basis_px: f32, profile: &DragProfile) -> f32 {
        let drag_basis = (basis_px * profile.basis_scale).max(1.0);
        apply_drag_resistance(-self.pending_dx / drag_basis, profile.max_preview)
    }
}

/// Where a released drag should settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleasePlan {
    /// Signed whole slides to move; 0 snaps back.
    pub target_steps: i32,
    pub velocity_slides_per_sec: f32,
    pub projected_slides: f32,
    pub flick: bool,
}

impl ReleasePlan {
    pub fn seed_velocity(&self, settle: &SettleProfile) -> f32 {
        if self.target_steps == 0 {
            return 0.0;
        }
        (self.velocity_slides_per_sec * settle.velocity_gain)
            .clamp(-settle.max_seed_velocity, settle.max_seed_velocity)
    }
}

/// Projects the release with momentum and decides how many slides it earns.
///
/// A fast flick commits at least one step even when the distance alone is
/// below the threshold.
pub fn plan_release(dx: f32, velocity_px_ms: f32, basis_px: f32, profile: &DragProfile) -> ReleasePlan {
    let release_basis = (basis_px * profile.basis_scale).max(1.0);
    let raw_slides = -dx / release_basis;
    let velocity_slides_per_sec = (-velocity_px_ms * 1000.0) / release_basis;
    let projected_slides = velocity_slides_per_sec.mul_add(profile.momentum_seconds, raw_slides);

    let flick = velocity_px_ms.abs() > profile.flick_velocity;
    let far_enough = projected_slides.abs() > profile.threshold;
    let velocity_direction = if velocity_px_ms.abs() >= profile.velocity_deadzone {
        sign(-velocity_px_ms)
    } else {
        0.0
    };
    let projected_direction = sign(projected_slides);
    let direction = if far_enough {
        projected_direction
    } else {
        velocity_direction
    };

    let mut steps = 0;
    if far_enough || flick {
        let snap_base = profile.snap_bias.mul_add(projected_direction, projected_slides);
        let velocity_power = (velocity_slides_per_sec.abs() - profile.flick_slides_per_sec).max(0.0)
            * VELOCITY_POWER_GAIN;
        let base_steps = (snap_base.abs() + velocity_power).round() as i32;
        let flick_strong = velocity_slides_per_sec.abs() > profile.flick_slides_per_sec;
        let min_flick_step = i32::from(flick_strong);
        steps = base_steps.max(min_flick_step).clamp(1, profile.max_steps.max(1));
    }

    ReleasePlan {
        target_steps: direction as i32 * steps,
        velocity_slides_per_sec,
        projected_slides,
        flick,
    }
}

/// Result of one spring integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringStep {
    /// New offset, always inside (-1, 1).
    pub offset: f32,
    /// Whole slides crossed during this step.
    pub committed: i32,
    pub done: bool,
}

/// Damped spring pulling the offset toward an integer slide target.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    target: f32,
    velocity: f32,
    stiffness: f32,
    damping: f32,
    last_ms: Option<f64>,
}

impl Spring {
    pub const fn new(target: f32, velocity: f32, profile: &SettleProfile) -> Self {
        Self {
            target,
            velocity,
            stiffness: profile.stiffness,
            damping: profile.damping,
            last_ms: None,
        }
    }

    /// Remaining slides to travel, relative to the current index.
    pub const fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    pub fn retune(&mut self, profile: &SettleProfile) {
        self.stiffness = profile.stiffness;
        self.damping = profile.damping;
    }

    pub fn step(&mut self, offset: f32, now_ms: f64) -> SpringStep {
        let last = self.last_ms.unwrap_or(now_ms);
        let dt = (((now_ms - last) / 1000.0) as f32).clamp(MIN_DT_SECS, MAX_DT_SECS);
        self.last_ms = Some(now_ms);

        self.velocity += (self.target - offset) * self.stiffness * dt;
        self.velocity *= (-self.damping * dt).exp();
        let mut next = self.velocity.mul_add(dt, offset);

        // The spring is overdamped, so without this it creeps toward a whole
        // target forever and never crosses it.
        if (self.target - next).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY {
            next = self.target;
        }

        let committed = if next.abs() >= 1.0 { next.trunc() } else { 0.0 };
        next -= committed;
        self.target -= committed;

        let done = self.target.abs() < REST_DISTANCE
            && next.abs() < REST_DISTANCE
            && self.velocity.abs() < REST_VELOCITY;
        if done {
            self.target = 0.0;
            self.velocity = 0.0;
        }

        SpringStep {
            offset: if done { 0.0 } else { next },
            committed: committed as i32,
            done,
        }
    }
}
