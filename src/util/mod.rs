use std::sync::atomic::{AtomicU64, Ordering};

pub mod assets;
pub mod config;
pub mod persistence;
pub mod version;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique key such as `toast-7`, used for keyed lists in the UI.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}
