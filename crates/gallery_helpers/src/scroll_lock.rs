//! Page scroll lock held while a modal overlay is open.

/// Something with an `overflow` style the lock can override.
pub trait OverflowTarget {
    fn overflow(&self) -> Option<String>;
    fn set_overflow(&self, value: &str);
}

/// Hides page overflow for as long as it is alive and restores the previous
/// value on drop.
#[derive(Debug)]
pub struct ScrollLock<T: OverflowTarget> {
    target: T,
    previous: Option<String>,
}

impl<T: OverflowTarget> ScrollLock<T> {
    pub fn acquire(target: T) -> Self {
        let previous = target.overflow();
        target.set_overflow("hidden");
        Self { target, previous }
    }
}

impl<T: OverflowTarget> Drop for ScrollLock<T> {
    fn drop(&mut self) {
        self.target
            .set_overflow(self.previous.as_deref().unwrap_or_default());
    }
}

/// The host document's `<body>`; a no-op outside the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentBody;

#[cfg(target_arch = "wasm32")]
impl DocumentBody {
    fn style() -> Option<web_sys::CssStyleDeclaration> {
        Some(web_sys::window()?.document()?.body()?.style())
    }
}

#[cfg(target_arch = "wasm32")]
impl OverflowTarget for DocumentBody {
    fn overflow(&self) -> Option<String> {
        Self::style()?.get_property_value("overflow").ok()
    }

    fn set_overflow(&self, value: &str) {
        if let Some(style) = Self::style() {
            if let Err(err) = style.set_property("overflow", value) {
                bevy::log::warn!("Could not set body overflow: {err:?}");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl OverflowTarget for DocumentBody {
    fn overflow(&self) -> Option<String> {
        None
    }

    fn set_overflow(&self, _value: &str) {}
}
