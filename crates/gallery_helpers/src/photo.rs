use serde::{Deserialize, Serialize};

/// Alt text used when a host page leaves `alt` empty.
pub const DEFAULT_ALT: &str = "Customer photo";

/// One gallery photo as the host page describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoItem {
    pub id: String,
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl PhotoItem {
    pub fn new(id: impl Into<String>, src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            alt: alt.into(),
        }
    }

    pub fn alt_text(&self) -> &str {
        if self.alt.trim().is_empty() {
            DEFAULT_ALT
        } else {
            &self.alt
        }
    }
}
