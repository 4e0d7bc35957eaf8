//! Boundary to the host's rendering layer

use crate::theme::{Color, StyleHandle};

/// A unit of UI presentation the registry can style
///
/// Style handles are generally immutable once a surface is constructed in
/// the host toolkit, so re-skinning a live surface goes through
/// destroy-and-recreate (see the surface binder), never through a second
/// `apply_style` call on the same instance.
pub trait ThemedSurface {
    /// Resolve and apply `style` to this surface
    fn apply_style(&mut self, style: &StyleHandle);

    /// Attach a task/recents descriptor built from the host's icon and the
    /// active theme's primary color. Best-effort.
    fn set_descriptor(&mut self, icon: &[u8], primary: Option<Color>);
}
