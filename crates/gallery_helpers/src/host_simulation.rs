use bevy::prelude::*;

use crate::photo::PhotoItem;
use crate::platform::PlatformHints;
use crate::{GALLERY_MESSAGE_QUEUE, GalleryMessage, HostMessage, push_host_message};

/// Photo list the simulated host page sends on `R`.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimulatedPhotos(pub Vec<PhotoItem>);

/// Status line shown while running natively.
#[derive(Component)]
pub struct SimulationStatus;

/// Stands in for the host page when running natively.
///
/// `M` toggles reduced motion, `R` resends [`SimulatedPhotos`].
pub struct HostSimulation;

impl Plugin for HostSimulation {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulatedPhotos>()
            .add_systems(Startup, spawn_status)
            .add_systems(Update, (simulate_host, update_status));
    }
}

fn spawn_status(mut commands: Commands) {
    commands.spawn((
        SimulationStatus,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(8.0),
            ..default()
        },
    ));
}

fn simulate_host(
    keycode: Res<ButtonInput<KeyCode>>,
    hints: Res<PlatformHints>,
    photos: Res<SimulatedPhotos>,
) {
    if keycode.just_pressed(KeyCode::KeyM) {
        push_host_message(HostMessage::ReducedMotion {
            enabled: !hints.prefers_reduced_motion,
        });
    } else if keycode.just_pressed(KeyCode::KeyR) {
        push_host_message(HostMessage::Photos {
            items: photos.0.clone(),
            initial_index: None,
        });
    }

    let messages: Vec<_> = GALLERY_MESSAGE_QUEUE.lock().drain(..).collect();
    for message in messages {
        match message {
            GalleryMessage::Ready => info!("Gallery ready"),
        }
    }
}

fn update_status(
    hints: Res<PlatformHints>,
    mut status: Query<&mut Text, With<SimulationStatus>>,
) {
    if !hints.is_changed() {
        return;
    }
    let reduced = if hints.prefers_reduced_motion { "on" } else { "off" };
    for mut text in &mut status {
        text.0 = format!("[M] reduced motion: {reduced}   [R] reload photos");
    }
}
