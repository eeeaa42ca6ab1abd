//! In-process caches.
//!
//! Two independent single-slot stores sit in front of the document backend
//! for singleton-style resources. Both are owned by the application state so
//! handlers receive them by injection and tests can construct and reset them
//! directly. A second distinct key overwrites rather than coexists with the
//! first; the cached resources are effectively global, so one slot is enough.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

/// TTL applied to settings-like data.
pub const SETTINGS_TTL: Duration = Duration::from_secs(5 * 60);

/// Single-slot cache whose entry expires after a fixed TTL.
///
/// An expired or empty slot reports a miss; the caller repopulates it
/// explicitly after fetching fresh data.
pub struct TtlSlot {
    ttl: Duration,
    slot: Mutex<Option<TtlEntry>>,
}

struct TtlEntry {
    value: Value,
    written_at: Instant,
}

impl TtlSlot {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Option<Value> {
        let slot = self.slot.lock().unwrap();
        slot.as_ref()
            .filter(|entry| entry.written_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub fn put(&self, value: Value) {
        let mut slot = self.slot.lock().unwrap();
        *slot = Some(TtlEntry {
            value,
            written_at: Instant::now(),
        });
    }

    pub fn clear(&self) {
        let mut slot = self.slot.lock().unwrap();
        *slot = None;
    }
}

/// Single-slot cache validated by the key that produced the payload.
///
/// No TTL: staleness is controlled purely by explicit `clear` calls from
/// mutating handlers.
pub struct KeyedSlot {
    slot: Mutex<Option<KeyedEntry>>,
}

struct KeyedEntry {
    key: String,
    value: Value,
    written_at: Instant,
}

impl KeyedSlot {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let slot = self.slot.lock().unwrap();
        let entry = slot.as_ref().filter(|entry| entry.key == key)?;
        tracing::debug!(
            "cache hit for {} (age {:?})",
            entry.key,
            entry.written_at.elapsed()
        );
        Some(entry.value.clone())
    }

    pub fn put(&self, key: &str, value: Value) {
        let mut slot = self.slot.lock().unwrap();
        *slot = Some(KeyedEntry {
            key: key.to_string(),
            value,
            written_at: Instant::now(),
        });
    }

    pub fn clear(&self) {
        let mut slot = self.slot.lock().unwrap();
        *slot = None;
    }
}

impl Default for KeyedSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide cache set.
pub struct Caches {
    /// Email settings payload, time-boxed
    pub settings: TtlSlot,
    /// Privacy policy payload, invalidated by mutating routes
    pub policy: KeyedSlot,
}

impl Caches {
    pub fn new() -> Self {
        Self {
            settings: TtlSlot::new(SETTINGS_TTL),
            policy: KeyedSlot::new(),
        }
    }
}

impl Default for Caches {
    fn default() -> Self {
        Self::new()
    }
}
