//! Sprites for the stage, the nav buttons and the lightbox overlay.

use bevy::prelude::*;
use gallery_helpers::scroll_lock::{DocumentBody, ScrollLock};

use crate::CarouselSet;
use crate::carousel::Carousel;
use crate::layout::GalleryLayout;
use crate::photo::PhotoList;
use crate::slots::{SIDE_SLOTS, SlotView, visible_slots};

const FRAME_COLOR: Color = Color::srgb(0.93, 0.89, 0.84);
const EMPHASIS_COLOR: Color = Color::srgb(0.85, 0.7, 0.45);
const BUTTON_COLOR: Color = Color::srgba(0.1, 0.08, 0.09, 0.8);
const OVERLAY_COLOR: Color = Color::srgba(0.02, 0.02, 0.02, 0.94);

/// Aspect ratio (w / h) assumed until an image has loaded.
const FALLBACK_ASPECT: f32 = 4.0 / 5.0;
/// Fraction of the viewport the lightbox photo may fill.
const LIGHTBOX_FILL: f32 = 0.86;

const STAGE_Z: f32 = 0.0;
const NAV_Z: f32 = 20.0;
const LIGHTBOX_Z: f32 = 40.0;

/// Image handles for the photo list, in list order.
#[derive(Resource, Debug, Clone, Default)]
pub struct PhotoTextures(Vec<Handle<Image>>);

impl PhotoTextures {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Handle<Image>> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle<Image>> {
        self.0.iter()
    }
}

/// Page scroll is locked while the lightbox is open.
#[derive(Resource, Debug, Default)]
pub struct BodyScrollLock(Option<ScrollLock<DocumentBody>>);

impl BodyScrollLock {
    pub const fn is_held(&self) -> bool {
        self.0.is_some()
    }

    pub fn sync(&mut self, locked: bool) {
        if locked && self.0.is_none() {
            self.0 = Some(ScrollLock::acquire(DocumentBody));
        } else if !locked {
            self.0 = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotLayer {
    Shadow,
    Frame,
    Photo,
}

#[derive(Component, Debug, Clone, Copy)]
struct SlotPart {
    rel: i32,
    layer: SlotLayer,
}

#[derive(Component, Debug, Clone, Copy)]
struct NavButton(i32);

#[derive(Component)]
struct LightboxOverlay;

#[derive(Component)]
struct LightboxPhoto;

#[derive(Component)]
struct LightboxCaption;

#[derive(Component)]
struct LightboxClose;

pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhotoTextures>()
            .init_resource::<BodyScrollLock>()
            .add_systems(Startup, (spawn_stage, spawn_nav_buttons, spawn_lightbox))
            .add_systems(
                Update,
                (
                    load_photo_textures,
                    render_slots,
                    render_nav_buttons,
                    render_lightbox,
                    sync_body_scroll_lock,
                )
                    .chain()
                    .in_set(CarouselSet::View),
            )
            .add_systems(Last, teardown_on_exit);
    }
}

fn spawn_stage(mut commands: Commands) {
    for rel in -SIDE_SLOTS..=SIDE_SLOTS {
        for layer in [SlotLayer::Shadow, SlotLayer::Frame, SlotLayer::Photo] {
            commands.spawn((
                SlotPart { rel, layer },
                Sprite::default(),
                Transform::default(),
                Visibility::Hidden,
            ));
        }
    }
}

fn spawn_nav_buttons(mut commands: Commands) {
    for (direction, label) in [(-1, "Prev"), (1, "Next")] {
        commands
            .spawn((
                NavButton(direction),
                Sprite::from_color(BUTTON_COLOR, Vec2::ONE),
                Transform::default(),
            ))
            .with_children(|button| {
                button.spawn((
                    Text2d::new(label),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(FRAME_COLOR),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            });
    }
}

fn spawn_lightbox(mut commands: Commands) {
    commands
        .spawn((
            LightboxOverlay,
            Sprite::from_color(OVERLAY_COLOR, Vec2::ONE),
            Transform::from_xyz(0.0, 0.0, LIGHTBOX_Z),
            Visibility::Hidden,
        ))
        .with_children(|overlay| {
            overlay.spawn((LightboxPhoto, Sprite::default(), Transform::from_xyz(0.0, 0.0, 0.1)));
            overlay.spawn((
                LightboxCaption,
                Text2d::default(),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(FRAME_COLOR),
                Transform::from_xyz(0.0, 0.0, 0.2),
            ));
            overlay.spawn((
                LightboxClose,
                Text2d::new("Close"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(FRAME_COLOR),
                Transform::from_xyz(0.0, 0.0, 0.2),
            ));
        });
}

fn load_photo_textures(
    photos: Res<PhotoList>,
    asset_server: Res<AssetServer>,
    mut textures: ResMut<PhotoTextures>,
) {
    if !photos.is_changed() {
        return;
    }
    textures.0 = photos
        .iter()
        .map(|photo| asset_server.load(photo.src.clone()))
        .collect();
    debug!("Loading {} photo textures", textures.len());
}

/// Shade of a slot photo: brightness scales the colour, opacity its alpha.
fn photo_tint(view: &SlotView) -> Color {
    let brightness = view.style.brightness;
    Color::srgba(brightness, brightness, brightness, view.style.opacity)
}

fn render_slots(
    carousel: Res<Carousel>,
    layout: Res<GalleryLayout>,
    textures: Res<PhotoTextures>,
    mut parts: Query<(&SlotPart, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let views = visible_slots(&carousel, &layout.stage);
    let card = Vec2::new(layout.stage.card_width, layout.stage.card_height);
    let center = layout.stage_center();

    for (part, mut sprite, mut transform, mut visibility) in &mut parts {
        let Some(view) = views.iter().find(|view| view.rel == part.rel) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        *visibility = Visibility::Inherited;

        let size = card * view.style.scale;
        let position = layout.to_world(center + Vec2::new(view.style.x, view.style.y));
        let z = STAGE_Z + view.style.z_index as f32 / 10.0;

        match part.layer {
            SlotLayer::Shadow => {
                sprite.color = Color::srgba(0.0, 0.0, 0.0, 0.38 * view.style.shadow);
                sprite.custom_size = Some(size + 26.0);
                transform.translation = (position - Vec2::new(0.0, 16.0)).extend(z - 0.02);
            }
            SlotLayer::Frame => {
                sprite.color = if view.emphasized {
                    EMPHASIS_COLOR
                } else {
                    FRAME_COLOR.with_alpha(view.style.opacity)
                };
                sprite.custom_size = Some(size + 10.0);
                transform.translation = position.extend(z - 0.01);
            }
            SlotLayer::Photo => {
                if let Some(image) = textures.get(view.item_index) {
                    if sprite.image != *image {
                        sprite.image = image.clone();
                    }
                }
                sprite.color = photo_tint(view);
                sprite.custom_size = Some(size);
                transform.translation = position.extend(z);
            }
        }
    }
}

fn render_nav_buttons(
    layout: Res<GalleryLayout>,
    carousel: Res<Carousel>,
    mut buttons: Query<(&NavButton, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    for (button, mut sprite, mut transform, mut visibility) in &mut buttons {
        let rect = layout.nav_button(button.0);
        sprite.custom_size = Some(rect.size());
        transform.translation = layout.to_world(rect.center()).extend(NAV_Z);
        *visibility = if carousel.is_empty() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
    }
}

/// Largest size with the image's aspect ratio that fits in `bounds`.
pub fn contain(aspect: f32, bounds: Vec2) -> Vec2 {
    let aspect = if aspect > 0.0 { aspect } else { FALLBACK_ASPECT };
    if bounds.x / bounds.y > aspect {
        Vec2::new(bounds.y * aspect, bounds.y)
    } else {
        Vec2::new(bounds.x, bounds.x / aspect)
    }
}

fn render_lightbox(
    carousel: Res<Carousel>,
    photos: Res<PhotoList>,
    layout: Res<GalleryLayout>,
    textures: Res<PhotoTextures>,
    images: Res<Assets<Image>>,
    mut overlay: Query<(&mut Sprite, &mut Visibility), (With<LightboxOverlay>, Without<LightboxPhoto>)>,
    mut photo: Query<&mut Sprite, (With<LightboxPhoto>, Without<LightboxOverlay>)>,
    mut caption: Query<(&mut Text2d, &mut Transform), (With<LightboxCaption>, Without<LightboxClose>)>,
    mut close: Query<&mut Transform, (With<LightboxClose>, Without<LightboxCaption>)>,
) {
    let open = carousel.lightbox_open();
    for (mut sprite, mut visibility) in &mut overlay {
        *visibility = if open {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        sprite.custom_size = Some(layout.viewport);
    }
    if !open {
        return;
    }

    let index = carousel.active_index();
    let texture = textures.get(index);
    let aspect = texture
        .and_then(|handle| images.get(handle))
        .map_or(FALLBACK_ASPECT, |image| {
            let size = image.size_f32();
            size.x / size.y.max(1.0)
        });
    for mut sprite in &mut photo {
        if let Some(handle) = texture {
            if sprite.image != *handle {
                sprite.image = handle.clone();
            }
        }
        sprite.custom_size = Some(contain(aspect, layout.viewport * LIGHTBOX_FILL));
    }

    let half = layout.viewport / 2.0;
    for (mut text, mut transform) in &mut caption {
        let alt = photos.get(index).map_or("", |photo| photo.alt_text());
        text.0 = format!("{} / {}  {alt}", index + 1, carousel.len());
        transform.translation = Vec3::new(0.0, 24.0 - half.y, 0.2);
    }
    let close_at = carousel.config().lightbox.close_button / 2.0;
    for mut transform in &mut close {
        transform.translation = Vec3::new(half.x - close_at.x, half.y - close_at.y, 0.2);
    }
}

fn sync_body_scroll_lock(carousel: Res<Carousel>, mut lock: ResMut<BodyScrollLock>) {
    let open = carousel.lightbox_open();
    if open != lock.is_held() {
        lock.sync(open);
    }
}

fn teardown_on_exit(
    mut exits: EventReader<AppExit>,
    mut carousel: ResMut<Carousel>,
    mut lock: ResMut<BodyScrollLock>,
) {
    if exits.read().next().is_none() {
        return;
    }
    info!("Gallery shutting down");
    carousel.teardown();
    lock.sync(false);
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::config::CarouselConfig;

    #[test]
    fn contain_fits_either_axis() {
        let wide = contain(2.0, Vec2::new(1000.0, 800.0));
        assert_eq!(wide, Vec2::new(1000.0, 500.0), "width bound");
        let tall = contain(0.5, Vec2::new(1000.0, 800.0));
        assert_eq!(tall, Vec2::new(400.0, 800.0), "height bound");
        let unknown = contain(0.0, Vec2::new(1000.0, 800.0));
        assert!(unknown.abs_diff_eq(Vec2::new(640.0, 800.0), 1e-3), "4:5 fallback");
    }

    #[test]
    fn scroll_lock_follows_the_lightbox() {
        let mut world = World::new();
        let mut carousel = Carousel::new(3, 0, CarouselConfig::default());
        carousel.open_lightbox(0.0);
        world.insert_resource(carousel);
        world.init_resource::<BodyScrollLock>();

        world
            .run_system_once(sync_body_scroll_lock)
            .expect("system runs");
        assert!(world.resource::<BodyScrollLock>().is_held(), "locked while open");

        world.resource_mut::<Carousel>().close_lightbox();
        world
            .run_system_once(sync_body_scroll_lock)
            .expect("system runs");
        assert!(!world.resource::<BodyScrollLock>().is_held(), "released on close");
    }

    #[test]
    fn exit_tears_the_gallery_down() {
        let mut world = World::new();
        let mut carousel = Carousel::new(3, 0, CarouselConfig::default());
        carousel.open_lightbox(0.0);
        carousel.navigate_by(1, 0.0);
        world.insert_resource(carousel);
        world.init_resource::<BodyScrollLock>();
        world.resource_mut::<BodyScrollLock>().sync(true);
        world.init_resource::<Events<AppExit>>();
        world.send_event(AppExit::Success);

        world
            .run_system_once(teardown_on_exit)
            .expect("system runs");
        let carousel = world.resource::<Carousel>();
        assert!(!carousel.lightbox_open(), "lightbox closed");
        assert!(!carousel.is_moving(), "motion stopped");
        assert!(!world.resource::<BodyScrollLock>().is_held(), "scroll lock dropped");
    }
}
