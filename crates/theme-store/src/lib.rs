//! Persistence layer for multitheme
//!
//! This crate provides the key-value preference store the theme registry
//! persists its active-theme tag into, together with the change-notification
//! contract that drives surface recreation after a theme switch.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod prefs;

pub use kv::{KvConfig, KvError, KvStore};
pub use prefs::{
    ChangeListener, KeyChange, MemoryPrefs, PrefStore, SledPrefs, StoreError, SubscriptionId,
};
