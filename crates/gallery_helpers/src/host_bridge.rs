use std::sync::{Arc, LazyLock};

use bevy::prelude::*;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::MessageEvent;

use crate::photo::PhotoItem;
use crate::platform;

/// Messages the host page posts into the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    Photos {
        items: Vec<PhotoItem>,
        #[serde(default)]
        initial_index: Option<i64>,
    },
    ReducedMotion {
        enabled: bool,
    },
    AriaLabel {
        label: String,
    },
}

/// Messages the gallery posts back to the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GalleryMessage {
    Ready,
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("could not decode host message: {0}")]
    Decode(String),

    #[error("parent window not found")]
    ParentUnavailable,

    #[error("could not post gallery message: {0}")]
    Post(String),
}

pub static HOST_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<HostMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(not(target_arch = "wasm32"))]
pub static GALLERY_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<GalleryMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

pub fn push_host_message(message: HostMessage) {
    HOST_MESSAGE_QUEUE.lock().push(message);
}

#[cfg(target_arch = "wasm32")]
fn decode_host_message(value: JsValue) -> Result<HostMessage, BridgeError> {
    serde_wasm_bindgen::from_value(value).map_err(|err| BridgeError::Decode(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
pub fn listen_host_messages() {
    let Some(window) = web_sys::window() else {
        error!("No global window, host messages disabled");
        return;
    };
    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        match decode_host_message(event.data()) {
            Ok(message) => push_host_message(message),
            // Pages post unrelated messages too (devtools, extensions).
            Err(err) => debug!("{err}"),
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Err(err) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to add message event listener: {err:?}");
        return;
    }

    closure.forget(); // Lives for the lifetime of the page
}

#[cfg(not(target_arch = "wasm32"))]
pub fn send_gallery_message(message: GalleryMessage) {
    GALLERY_MESSAGE_QUEUE.lock().push(message);
}

#[cfg(target_arch = "wasm32")]
pub fn send_gallery_message(message: GalleryMessage) {
    if let Err(err) = post_to_parent(&message) {
        error!("{message:?} not sent: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn post_to_parent(message: &GalleryMessage) -> Result<(), BridgeError> {
    let window = web_sys::window().ok_or(BridgeError::ParentUnavailable)?;
    let value = serde_wasm_bindgen::to_value(message)
        .map_err(|err| BridgeError::Post(err.to_string()))?;
    let parent = window
        .parent()
        .ok()
        .flatten()
        .ok_or(BridgeError::ParentUnavailable)?;
    parent
        .post_message(&value, "*")
        .map_err(|err| BridgeError::Post(format!("{err:?}")))
}

/// Applies host messages that need the gallery's own state.
///
/// Implemented by the app crate; not meant to be called directly.
pub trait HostMessageHandler: Send + Sync + Default + 'static {
    fn photos(world: &mut World, items: Vec<PhotoItem>, initial_index: Option<i64>);
    fn reduced_motion(world: &mut World, enabled: bool);
}

fn process_host_messages<T: HostMessageHandler>(world: &mut World) {
    let messages = HOST_MESSAGE_QUEUE.lock().drain(..).collect::<Vec<_>>();
    dispatch_host_messages::<T>(world, messages);
}

fn dispatch_host_messages<T: HostMessageHandler>(world: &mut World, messages: Vec<HostMessage>) {
    for message in messages {
        match message {
            HostMessage::Photos {
                items,
                initial_index,
            } => {
                info!("Host sent {} photos", items.len());
                T::photos(world, items, initial_index);
            }
            HostMessage::ReducedMotion { enabled } => {
                info!("Host set reduced motion: {enabled}");
                if let Some(mut hints) = world.get_resource_mut::<platform::PlatformHints>() {
                    hints.prefers_reduced_motion = enabled;
                }
                T::reduced_motion(world, enabled);
            }
            HostMessage::AriaLabel { label } => platform::apply_carousel_aria(&label),
        }
    }
}

fn ready() {
    send_gallery_message(GalleryMessage::Ready);
}

#[derive(Default)]
pub struct HostBridgePlugin<T: HostMessageHandler>(core::marker::PhantomData<T>);

impl<T: HostMessageHandler> Plugin for HostBridgePlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, process_host_messages::<T>);
        #[cfg(target_arch = "wasm32")]
        {
            app.add_systems(Startup, listen_host_messages);
        }
        app.add_systems(PostStartup, ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder;

    #[derive(Resource, Default)]
    struct Received {
        photos: usize,
        initial_index: Option<i64>,
        reduced_motion: Option<bool>,
    }

    impl HostMessageHandler for Recorder {
        fn photos(world: &mut World, items: Vec<PhotoItem>, initial_index: Option<i64>) {
            let mut received = world.resource_mut::<Received>();
            received.photos = items.len();
            received.initial_index = initial_index;
        }

        fn reduced_motion(world: &mut World, enabled: bool) {
            world.resource_mut::<Received>().reduced_motion = Some(enabled);
        }
    }

    #[test]
    fn queued_messages_reach_the_handler() {
        let mut world = World::new();
        world.init_resource::<Received>();
        world.init_resource::<platform::PlatformHints>();

        let messages = vec![
            HostMessage::Photos {
                items: vec![
                    PhotoItem::new("a", "gallery/a.jpg", ""),
                    PhotoItem::new("b", "gallery/b.jpg", ""),
                ],
                initial_index: Some(1),
            },
            HostMessage::ReducedMotion { enabled: true },
        ];

        dispatch_host_messages::<Recorder>(&mut world, messages);

        let received = world.resource::<Received>();
        assert_eq!(received.photos, 2, "photo list forwarded");
        assert_eq!(received.initial_index, Some(1), "initial index forwarded");
        assert_eq!(received.reduced_motion, Some(true), "reduced motion forwarded");
        assert!(
            world.resource::<platform::PlatformHints>().prefers_reduced_motion,
            "platform hints follow the host"
        );
    }
}
