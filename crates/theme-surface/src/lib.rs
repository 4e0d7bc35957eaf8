//! Surface-side consumers of the theme registry
//!
//! This crate couples a UI surface's show/hide lifecycle to persisted theme
//! changes ([`SurfaceBinder`]) and provides a toolkit-free presentation
//! model for a theme chooser list ([`ChooserModel`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binder;
pub mod chooser;

pub use binder::{should_recreate, RecreateHandler, SurfaceBinder};
pub use chooser::{ChooserModel, ChooserRow};
