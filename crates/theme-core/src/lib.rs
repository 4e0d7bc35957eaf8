//! Theme registry and state engine for multitheme
//!
//! This crate lets a host register a catalogue of named themes, designate
//! one as active, persist that selection across restarts, and drive
//! dependent surfaces to re-render after a switch.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use theme_core::{Preset, ThemeBuilder, ThemeRegistry};
//! use theme_store::MemoryPrefs;
//!
//! let store = Arc::new(MemoryPrefs::new());
//! let registry = ThemeRegistry::new();
//!
//! ThemeBuilder::new(store)
//!     .add_preset(Preset::Red, false).unwrap()
//!     .add_preset(Preset::Blue, true).unwrap()
//!     .initialize(&registry).unwrap();
//!
//! assert_eq!(registry.active_theme().unwrap().tag(), "Blue");
//! registry.change_theme_to_preset(Preset::Red).unwrap();
//! assert_eq!(registry.active_theme().unwrap().tag(), "Red");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod error;
pub mod registry;
pub mod render;
pub mod theme;

pub use builder::ThemeBuilder;
pub use error::{Result, ThemeError};
pub use registry::{ThemeRegistry, SAVED_TAG_KEY};
pub use render::ThemedSurface;
pub use theme::{
    parse_hex_color, rgb_to_hex, Color, ColorResolver, Preset, StyleHandle, Theme,
    ATTR_COLOR_ACCENT, ATTR_COLOR_PRIMARY, ATTR_COLOR_PRIMARY_DARK,
};
