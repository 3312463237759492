use std::collections::HashSet;

use bevy::prelude::*;
use gallery_helpers::photo::PhotoItem;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("photo at position {position} has an empty id")]
    MissingId { position: usize },
    #[error("photo `{id}` has an empty source")]
    MissingSource { id: String },
    #[error("photo id `{0}` appears more than once")]
    DuplicateId(String),
}

/// The ordered, validated photos the carousel shows.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct PhotoList {
    items: Vec<PhotoItem>,
}

impl PhotoList {
    pub fn new(items: Vec<PhotoItem>) -> Result<Self, PhotoError> {
        let mut seen = HashSet::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(PhotoError::MissingId { position });
            }
            if item.src.trim().is_empty() {
                return Err(PhotoError::MissingSource {
                    id: item.id.clone(),
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(PhotoError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoItem> {
        self.items.iter()
    }

    pub fn items(&self) -> &[PhotoItem] {
        &self.items
    }
}

/// Photos bundled with the app for native runs and until the host sends its own.
pub fn demo_photos() -> Vec<PhotoItem> {
    [
        ("look-01", "Soft brow lamination"),
        ("look-02", "Classic lash lift"),
        ("look-03", "Brow tint and shape"),
        ("look-04", ""),
        ("look-05", "Hybrid lash set"),
        ("look-06", "Natural brow sculpt"),
        ("look-07", ""),
        ("look-08", "Lash lift with tint"),
    ]
    .into_iter()
    .map(|(id, alt)| PhotoItem::new(id, format!("gallery/{id}.jpg"), alt))
    .collect()
}
