//! Preference-store contract consumed by the theme registry
//!
//! The registry persists a single string value (the active theme tag) and
//! reacts to changes of that key. Hosts can hand the registry any
//! [`PrefStore`] implementation; [`SledPrefs`] is the durable default and
//! [`MemoryPrefs`] backs tests and ephemeral setups.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::kv::{KvConfig, KvError, KvStore};

/// Preference-store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying key-value store failure
    #[error("key-value store error: {0}")]
    Kv(#[from] KvError),

    /// Failure reported by a host-provided backend
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for preference-store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Change notification delivered to subscribers of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChange {
    /// The key that was written
    pub key: String,
    /// The new value, or `None` when the key was removed
    pub value: Option<String>,
}

/// Callback invoked when a subscribed key changes
pub type ChangeListener = Arc<dyn Fn(&KeyChange) + Send + Sync>;

/// Opaque handle identifying a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// String key-value store with last-write-wins semantics and per-key
/// change notifications.
///
/// `put` must be durable before the next `get` from the same process and
/// must notify the key's subscribers after the write. Dispatch happens
/// synchronously on the writer's thread; the writer does not wait for
/// subscribers beyond their synchronous return.
pub trait PrefStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key` and notify the key's subscribers
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Register `listener` for changes of `key`
    fn subscribe(&self, key: &str, listener: ChangeListener) -> SubscriptionId;

    /// Drop a subscription; unknown or stale ids are ignored
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Listener registry shared by the store implementations
#[derive(Default)]
struct ListenerHub {
    next_id: AtomicU64,
    listeners: RwLock<HashMap<u64, (String, ChangeListener)>>,
}

impl ListenerHub {
    fn add(&self, key: &str, listener: ChangeListener) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .write()
            .insert(id, (key.to_string(), listener));
        SubscriptionId(id)
    }

    fn remove(&self, id: SubscriptionId) {
        self.listeners.write().remove(&id.0);
    }

    fn notify(&self, change: &KeyChange) {
        // Listeners are cloned out of the lock so a callback may
        // subscribe or unsubscribe without deadlocking.
        let matching: Vec<ChangeListener> = self
            .listeners
            .read()
            .values()
            .filter(|(key, _)| *key == change.key)
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in matching {
            listener(change);
        }
    }
}

/// In-memory preference store
///
/// No durability; intended for tests and ephemeral hosts.
#[derive(Default)]
pub struct MemoryPrefs {
    values: RwLock<HashMap<String, String>>,
    hub: ListenerHub,
}

impl MemoryPrefs {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefs {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        debug!(key, value, "preference written");
        self.hub.notify(&KeyChange {
            key: key.to_string(),
            value: Some(value.to_string()),
        });
        Ok(())
    }

    fn subscribe(&self, key: &str, listener: ChangeListener) -> SubscriptionId {
        self.hub.add(key, listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.hub.remove(id);
    }
}

/// Durable preference store backed by [`KvStore`]
pub struct SledPrefs {
    kv: KvStore,
    hub: ListenerHub,
}

impl SledPrefs {
    /// Wrap an already-open key-value store
    pub fn new(kv: KvStore) -> Self {
        Self { kv, hub: ListenerHub::default() }
    }

    /// Open a durable store with the given configuration
    pub fn open(config: KvConfig) -> Result<Self> {
        Ok(Self::new(KvStore::open(config)?))
    }

    /// Create a temporary store (for testing)
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(KvStore::in_memory()?))
    }
}

impl PrefStore for SledPrefs {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.kv.get::<String>(key)?)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.kv.set(key, &value)?;
        debug!(key, value, "preference written");
        self.hub.notify(&KeyChange {
            key: key.to_string(),
            value: Some(value.to_string()),
        });
        Ok(())
    }

    fn subscribe(&self, key: &str, listener: ChangeListener) -> SubscriptionId {
        self.hub.add(key, listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.hub.remove(id);
    }
}
