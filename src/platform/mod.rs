//! Platform boundaries
//!
//! The simulation never touches real storage or browser navigation directly.
//! These traits keep the core testable and renderer-agnostic; a web build
//! would back them with LocalStorage and `window.location`.

use std::collections::HashMap;

/// Key/value storage for course save/load. Best effort, no retries.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns false if the write could not be completed.
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory storage (native runs and tests)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.items.insert(key.to_string(), value.to_string());
        true
    }
}

/// One-shot session navigation (portal exits)
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

/// Logs the navigation target instead of leaving the session (native/demo)
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&mut self, url: &str) {
        log::info!("Portal navigation -> {url}");
    }
}

/// Records navigations for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &str) {
        self.visited.push(url.to_string());
    }
}
