use bevy::log::{info, warn};
use bevy::prelude::World;
use gallery_helpers::HostMessageHandler;
use gallery_helpers::photo::PhotoItem;

use crate::carousel::Carousel;
use crate::photo::PhotoList;

#[derive(Default, Clone, Copy)]
pub struct CarouselHost;

impl HostMessageHandler for CarouselHost {
    fn photos(world: &mut World, items: Vec<PhotoItem>, initial_index: Option<i64>) {
        let list = match PhotoList::new(items) {
            Ok(list) => list,
            Err(err) => {
                warn!("Rejected photo list, keeping the current one: {err}");
                return;
            }
        };
        let len = list.len();
        world.insert_resource(list);
        if let Some(mut carousel) = world.get_resource_mut::<Carousel>() {
            carousel.replace_items(len, initial_index);
            info!("Showing {len} photos from photo {}", carousel.active_index());
        }
    }

    fn reduced_motion(world: &mut World, enabled: bool) {
        if let Some(mut carousel) = world.get_resource_mut::<Carousel>() {
            carousel.set_reduced_motion(enabled);
        }
    }
}
