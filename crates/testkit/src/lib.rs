#![warn(missing_docs)]
//! Shared test surfaces: canonical JSON snapshots, sample add-on documents
//! and scratch directories.

pub mod fixtures;
mod snapshot;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub use snapshot::*;

/// A fresh path under the system temp dir, unique per call.
///
/// The directory is not created.
pub fn scratch_dir(prefix: &str) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let serial = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("{prefix}-{}-{nanos}-{serial}", std::process::id()))
}
