//! Best-effort course save/load
//!
//! Fire-and-forget persistence outside the per-tick loop: failures are
//! logged and surfaced as a boolean/absent result, never retried.

use super::CourseFile;
use crate::platform::Storage;

fn storage_key(id: &str) -> String {
    format!("course/{id}")
}

/// Persist a course. Returns false on serialization or storage failure.
pub fn save(storage: &mut dyn Storage, id: &str, course: &CourseFile) -> bool {
    let json = match serde_json::to_string(course) {
        Ok(json) => json,
        Err(err) => {
            log::error!("Failed to serialize course '{id}': {err}");
            return false;
        }
    };
    let ok = storage.set(&storage_key(id), &json);
    if ok {
        log::info!("Saved course '{id}' ({} bytes)", json.len());
    } else {
        log::error!("Storage rejected course '{id}'");
    }
    ok
}

/// Load a course; None covers both absence and corruption.
pub fn load(storage: &dyn Storage, id: &str) -> Option<CourseFile> {
    let json = storage.get(&storage_key(id))?;
    match serde_json::from_str(&json) {
        Ok(course) => Some(course),
        Err(err) => {
            log::error!("Corrupt course '{id}': {err}");
            None
        }
    }
}
