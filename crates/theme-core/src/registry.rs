//! Process-wide theme registry
//!
//! The registry owns the installed catalogue, the active theme and the
//! persistence adapter handle. It starts uninitialized; one successful
//! [`ThemeRegistry::install`] (normally reached through
//! [`ThemeBuilder::initialize`]) makes it queryable for the rest of the
//! process lifetime. There is no de-initialization.
//!
//! The composition root owns a single instance, typically behind an `Arc`,
//! and hands it to every consumer. Tests construct a fresh registry per
//! case instead of resetting shared state.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use theme_store::PrefStore;

use crate::builder::ThemeBuilder;
use crate::error::{Result, ThemeError};
use crate::render::ThemedSurface;
use crate::theme::{Preset, StyleHandle, Theme};

/// Persistence key holding the active theme tag
pub const SAVED_TAG_KEY: &str = "multitheme.saved_tag";

struct Installed {
    themes: Vec<Theme>,
    icon: Option<Vec<u8>>,
    store: Arc<dyn PrefStore>,
    active: Theme,
}

/// Registry of installed themes and the persisted active selection
#[derive(Default)]
pub struct ThemeRegistry {
    inner: RwLock<Option<Installed>>,
}

impl ThemeRegistry {
    /// Create an uninitialized registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`ThemeRegistry::install`] has succeeded
    pub fn is_initialized(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Install the catalogue accumulated by `builder`
    ///
    /// Adopts the persisted tag when it resolves to a catalogue theme;
    /// otherwise adopts the builder's default and re-persists it. At most
    /// one call may succeed per registry.
    pub fn install(&self, builder: ThemeBuilder) -> Result<()> {
        let mut slot = self.inner.write();
        if slot.is_some() {
            return Err(ThemeError::AlreadyInitialized);
        }
        if builder.themes.is_empty() {
            return Err(ThemeError::EmptyCatalogue);
        }

        let ThemeBuilder { themes, default_tag, icon, store } = builder;

        let restored = store
            .get(SAVED_TAG_KEY)?
            .and_then(|tag| themes.iter().find(|t| t.tag() == tag).cloned());

        let active = match restored {
            Some(theme) => {
                info!(tag = %theme.tag(), "restoring theme with saved tag");
                theme
            }
            None => {
                // A direct install may carry a default tag the catalogue
                // does not contain; the first theme covers that too.
                let fallback = themes
                    .iter()
                    .find(|t| t.tag() == default_tag)
                    .or_else(|| themes.first())
                    .cloned()
                    .ok_or(ThemeError::EmptyCatalogue)?;
                info!(tag = %fallback.tag(), "saved tag missing or unknown, adopting the default");
                store.put(SAVED_TAG_KEY, fallback.tag())?;
                fallback
            }
        };

        *slot = Some(Installed { themes, icon, store, active });
        Ok(())
    }

    /// The installed catalogue, in insertion order
    pub fn themes(&self) -> Result<Vec<Theme>> {
        let guard = self.inner.read();
        let inner = guard.as_ref().ok_or(ThemeError::NotInitialized)?;
        Ok(inner.themes.clone())
    }

    /// Look up a theme by tag
    ///
    /// A miss is a diagnostic event, never an error.
    pub fn theme(&self, tag: &str) -> Result<Option<Theme>> {
        let guard = self.inner.read();
        let inner = guard.as_ref().ok_or(ThemeError::NotInitialized)?;
        let found = inner.themes.iter().find(|t| t.tag() == tag).cloned();
        if found.is_none() {
            info!(tag, "theme with tag not found");
        }
        Ok(found)
    }

    /// Look up a theme by style handle
    pub fn theme_by_style(&self, style: &StyleHandle) -> Result<Option<Theme>> {
        let guard = self.inner.read();
        let inner = guard.as_ref().ok_or(ThemeError::NotInitialized)?;
        let found = inner.themes.iter().find(|t| t.style() == style).cloned();
        if found.is_none() {
            info!(style = %style, "theme with style handle not found");
        }
        Ok(found)
    }

    /// The currently active theme
    pub fn active_theme(&self) -> Result<Theme> {
        let guard = self.inner.read();
        let inner = guard.as_ref().ok_or(ThemeError::NotInitialized)?;
        Ok(inner.active.clone())
    }

    /// Tag persisted by the last theme change
    ///
    /// Reads straight from the adapter, bypassing the in-memory active
    /// theme, so callers can detect external mutation of the stored value.
    pub fn saved_tag(&self) -> Result<Option<String>> {
        let guard = self.inner.read();
        let inner = guard.as_ref().ok_or(ThemeError::NotInitialized)?;
        Ok(inner.store.get(SAVED_TAG_KEY)?)
    }

    /// Persistence adapter handle, for change subscriptions
    pub fn store(&self) -> Result<Arc<dyn PrefStore>> {
        let guard = self.inner.read();
        let inner = guard.as_ref().ok_or(ThemeError::NotInitialized)?;
        Ok(Arc::clone(&inner.store))
    }

    /// Switch the active theme
    ///
    /// Targets outside the catalogue and targets whose tag equals the
    /// currently persisted tag are no-ops. Returns whether a change was
    /// persisted; the persistence write is the sole trigger for downstream
    /// change notifications.
    pub fn change_theme(&self, theme: &Theme) -> Result<bool> {
        let (member, store) = {
            let mut guard = self.inner.write();
            let inner = guard.as_mut().ok_or(ThemeError::NotInitialized)?;

            let Some(member) = inner.themes.iter().find(|t| *t == theme).cloned() else {
                warn!(theme = %theme, "changing theme failed: not in the catalogue");
                return Ok(false);
            };

            if inner.store.get(SAVED_TAG_KEY)?.as_deref() == Some(member.tag()) {
                debug!(tag = %member.tag(), "theme already persisted, nothing to change");
                return Ok(false);
            }

            inner.active = member.clone();
            (member, Arc::clone(&inner.store))
        };

        // The write (and the notifications it fires) runs outside the
        // registry lock so listeners may query the registry.
        info!(theme = %member, "changing theme");
        store.put(SAVED_TAG_KEY, member.tag())?;
        Ok(true)
    }

    /// Resolve a tag and switch to it; unknown tags are a no-op
    pub fn change_theme_by_tag(&self, tag: &str) -> Result<bool> {
        match self.theme(tag)? {
            Some(theme) => self.change_theme(&theme),
            None => Ok(false),
        }
    }

    /// Resolve a style handle and switch to it; unknown handles are a no-op
    pub fn change_theme_by_style(&self, style: &StyleHandle) -> Result<bool> {
        match self.theme_by_style(style)? {
            Some(theme) => self.change_theme(&theme),
            None => Ok(false),
        }
    }

    /// Switch to a predefined theme, when it is part of the catalogue
    pub fn change_theme_to_preset(&self, preset: Preset) -> Result<bool> {
        self.change_theme_by_tag(preset.tag())
    }

    /// Apply the active theme to `surface`
    ///
    /// Applies the style handle and, when an icon was configured, attaches
    /// a task descriptor combining the icon with the active theme's primary
    /// color. Idempotent per call; nothing is stored.
    pub fn apply_to(&self, surface: &mut dyn ThemedSurface) -> Result<()> {
        let (active, icon) = {
            let guard = self.inner.read();
            let inner = guard.as_ref().ok_or(ThemeError::NotInitialized)?;
            (inner.active.clone(), inner.icon.clone())
        };

        surface.apply_style(active.style());
        if let Some(icon) = icon {
            surface.set_descriptor(&icon, active.color_primary());
        }
        debug!(theme = %active, "theme applied to surface");
        Ok(())
    }
}
