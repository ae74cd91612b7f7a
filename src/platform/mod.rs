//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/frame deltas
//! - Storage (LocalStorage on web, files on native)
//! - Logging setup

pub mod storage;
pub mod time;

pub use storage::{MemoryStorage, Storage, StorageError};
pub use time::{FrameClock, FrameDelta};

/// Route `log` output to the browser console (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// Route `log` output to stderr, honoring `RUST_LOG` (native)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
