//! Review strip under the carousel: two copies of the photo cards drifting
//! left in a seamless loop. It can be dragged, flung and wheeled.

use bevy::prelude::*;
use gallery_helpers::input::PointerId;

use crate::CarouselSet;
use crate::layout::GalleryLayout;
use crate::view::PhotoTextures;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MarqueeConfig {
    pub card_size: Vec2,
    pub gap: f32,
    pub strip_height: f32,
    /// Leftward drift in px per frame.
    pub drift_px: f32,
    /// Momentum below this (px per frame) stops and drift resumes.
    pub momentum_floor: f32,
    pub momentum_decay: f32,
    pub drag_gain: f32,
    pub momentum_gain: f32,
    pub wheel_gain: f32,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            card_size: Vec2::new(112.0, 140.0),
            gap: 14.0,
            strip_height: 164.0,
            drift_px: 0.24,
            momentum_floor: 0.02,
            momentum_decay: 0.94,
            drag_gain: 1.1,
            momentum_gain: 1.35,
            wheel_gain: 0.45,
        }
    }
}

impl MarqueeConfig {
    /// Distance from one card to the next.
    pub fn pitch(&self) -> f32 {
        self.card_size.x + self.gap
    }
}

/// Nominal frame length that turns px/ms into px per frame.
const FRAME_MS: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct MarqueeDrag {
    pointer_id: PointerId,
    last_x: f32,
    last_ms: f64,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ReviewMarquee {
    offset: f32,
    momentum: f32,
    /// Width of one card set; the strip wraps after this distance.
    set_width: f32,
    hovered: bool,
    drag: Option<MarqueeDrag>,
}

impl ReviewMarquee {
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    pub const fn momentum(&self) -> f32 {
        self.momentum
    }

    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// A drag counts as hovering until release.
    pub const fn is_paused(&self) -> bool {
        self.hovered || self.drag.is_some()
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn set_width(&mut self, width: f32) {
        self.set_width = width;
        self.wrap();
    }

    fn wrap(&mut self) {
        let limit = self.set_width.max(1.0);
        // Keeps the offset in [-limit, 0).
        self.offset = self.offset.rem_euclid(limit) - limit;
    }

    pub fn tick(&mut self, config: &MarqueeConfig) {
        if self.drag.is_none() {
            if self.momentum.abs() > config.momentum_floor {
                self.offset += self.momentum;
                self.momentum *= config.momentum_decay;
            } else {
                self.momentum = 0.0;
                if !self.hovered {
                    self.offset -= config.drift_px;
                }
            }
        }
        self.wrap();
    }

    pub fn pointer_down(&mut self, pointer_id: PointerId, x: f32, now_ms: f64) {
        if self.drag.is_some() {
            return;
        }
        self.drag = Some(MarqueeDrag {
            pointer_id,
            last_x: x,
            last_ms: now_ms,
        });
        self.momentum = 0.0;
    }

    pub fn pointer_move(&mut self, pointer_id: PointerId, x: f32, now_ms: f64, config: &MarqueeConfig) {
        let Some(drag) = self.drag.as_mut().filter(|drag| drag.pointer_id == pointer_id) else {
            return;
        };
        let dt = (now_ms - drag.last_ms).max(1.0) as f32;
        let delta = x - drag.last_x;
        drag.last_x = x;
        drag.last_ms = now_ms;

        self.offset += delta * config.drag_gain;
        self.momentum = delta / dt * FRAME_MS * config.momentum_gain;
    }

    pub fn pointer_up(&mut self, pointer_id: PointerId) {
        if self.drag.is_some_and(|drag| drag.pointer_id == pointer_id) {
            self.drag = None;
            self.hovered = false;
        }
    }

    /// `delta` in browser wheel convention; the dominant axis wins.
    pub fn wheel(&mut self, delta: Vec2, config: &MarqueeConfig) {
        let dominant = if delta.x.abs() > delta.y.abs() {
            delta.x
        } else {
            delta.y
        };
        self.offset -= dominant * config.wheel_gain;
    }
}

#[derive(Component)]
pub struct MarqueeStrip;

#[derive(Component)]
struct MarqueeCard;

pub struct MarqueePlugin;

impl Plugin for MarqueePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MarqueeConfig>()
            .init_resource::<ReviewMarquee>()
            .add_systems(Startup, spawn_strip)
            .add_systems(Update, tick_marquee.in_set(CarouselSet::Motion))
            .add_systems(
                Update,
                (rebuild_cards, position_strip).chain().in_set(CarouselSet::View),
            );
    }
}

fn spawn_strip(mut commands: Commands) {
    commands.spawn((MarqueeStrip, Transform::default(), Visibility::default()));
}

fn tick_marquee(mut marquee: ResMut<ReviewMarquee>, config: Res<MarqueeConfig>) {
    marquee.tick(&config);
}

fn rebuild_cards(
    mut commands: Commands,
    textures: Res<PhotoTextures>,
    config: Res<MarqueeConfig>,
    mut marquee: ResMut<ReviewMarquee>,
    strips: Query<Entity, With<MarqueeStrip>>,
    cards: Query<Entity, With<MarqueeCard>>,
) {
    if !textures.is_changed() {
        return;
    }
    for card in &cards {
        commands.entity(card).despawn_recursive();
    }

    let count = textures.len();
    let set_width = count as f32 * config.pitch();
    marquee.set_width(set_width);

    let Ok(strip) = strips.get_single() else {
        return;
    };
    commands.entity(strip).with_children(|parent| {
        // The second copy fills the gap while the first scrolls out.
        for copy in 0..2 {
            for (index, image) in textures.iter().enumerate() {
                let x = (copy * count + index) as f32 * config.pitch() + config.card_size.x / 2.0;
                parent
                    .spawn((
                        MarqueeCard,
                        Sprite::from_color(Color::srgb(0.93, 0.89, 0.84), config.card_size + 6.0),
                        Transform::from_xyz(x, 0.0, 0.0),
                    ))
                    .with_children(|card| {
                        card.spawn((
                            Sprite {
                                image: image.clone(),
                                custom_size: Some(config.card_size),
                                ..default()
                            },
                            Transform::from_xyz(0.0, 0.0, 0.01),
                        ));
                    });
            }
        }
    });
}

fn position_strip(
    marquee: Res<ReviewMarquee>,
    layout: Res<GalleryLayout>,
    mut strips: Query<&mut Transform, With<MarqueeStrip>>,
) {
    let origin = layout.to_world(Vec2::new(0.0, layout.marquee_center_y()));
    for mut transform in &mut strips {
        transform.translation = Vec3::new(origin.x + marquee.offset(), origin.y, 5.0);
    }
}
