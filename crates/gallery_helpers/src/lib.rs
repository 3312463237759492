mod app;
pub use app::*;

pub mod input;
pub mod photo;
pub mod platform;
pub mod scroll_lock;
pub mod viewport;

mod host_bridge;
pub use host_bridge::*;

#[cfg(not(target_arch = "wasm32"))]
mod host_simulation;
#[cfg(not(target_arch = "wasm32"))]
pub use host_simulation::*;
