//! Builder-driven initialization of the theme registry

use std::sync::Arc;

use tracing::{debug, info, warn};

use theme_store::PrefStore;

use crate::error::{Result, ThemeError};
use crate::registry::ThemeRegistry;
use crate::theme::{Preset, StyleHandle, Theme};

/// Accumulates a candidate theme catalogue before the registry goes live
///
/// One builder per initialization attempt; [`ThemeBuilder::initialize`]
/// consumes it. A builder given no themes at all is populated with the full
/// predefined catalogue, defaulting to [`Preset::Indigo`].
pub struct ThemeBuilder {
    pub(crate) themes: Vec<Theme>,
    pub(crate) default_tag: String,
    pub(crate) icon: Option<Vec<u8>>,
    pub(crate) store: Arc<dyn PrefStore>,
}

impl ThemeBuilder {
    /// Create a builder over the given persistence adapter
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        Self {
            themes: Vec::new(),
            default_tag: Preset::default().tag().to_string(),
            icon: None,
            store,
        }
    }

    /// Append `theme` to the catalogue
    ///
    /// Fails when the tag or the style handle is already present.
    /// `is_default` makes this theme's tag the default.
    pub fn add_theme(mut self, theme: Theme, is_default: bool) -> Result<Self> {
        self.check_duplicates(&theme)?;
        if is_default {
            self.default_tag = theme.tag().to_string();
        }
        debug!(theme = %theme, "theme added to list");
        self.themes.push(theme);
        Ok(self)
    }

    /// Convenience: build a [`Theme`] from parts and append it
    pub fn add_theme_parts(
        self,
        tag: impl Into<String>,
        style: impl Into<StyleHandle>,
        is_default: bool,
    ) -> Result<Self> {
        self.add_theme(Theme::new(tag, style), is_default)
    }

    /// Append one of the predefined themes
    pub fn add_preset(self, preset: Preset, is_default: bool) -> Result<Self> {
        self.add_theme(preset.to_theme(), is_default)
    }

    /// Set the default tag
    ///
    /// Existence is not validated here; a tag matching no theme at
    /// [`ThemeBuilder::initialize`] time falls back to the first entry.
    pub fn set_default(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Use a predefined theme as the default
    pub fn set_default_preset(self, preset: Preset) -> Self {
        self.set_default(preset.tag())
    }

    /// Icon blob attached to surface descriptors, stored verbatim
    pub fn use_icon(mut self, icon: impl Into<Vec<u8>>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Override the persistence adapter
    pub fn set_store(mut self, store: Arc<dyn PrefStore>) -> Self {
        self.store = store;
        self
    }

    /// Validate the accumulated catalogue and install it into `registry`
    ///
    /// An empty catalogue is populated with the full predefined list. A
    /// default tag matching no theme in the final list falls back to the
    /// first theme's tag with a warning.
    pub fn initialize(mut self, registry: &ThemeRegistry) -> Result<()> {
        if self.themes.is_empty() {
            info!("no themes were added, initializing with the predefined catalogue");
            for preset in Preset::ALL {
                self = self.add_theme(preset.to_theme(), false)?;
            }
        }

        if !self.themes.iter().any(|t| t.tag() == self.default_tag) {
            if let Some(first) = self.themes.first() {
                warn!(
                    default = %self.default_tag,
                    fallback = %first.tag(),
                    "default tag not in catalogue, falling back to the first theme"
                );
                self.default_tag = first.tag().to_string();
            }
        }

        registry.install(self)
    }

    fn check_duplicates(&self, theme: &Theme) -> Result<()> {
        if self.themes.iter().any(|t| t.tag() == theme.tag()) {
            return Err(ThemeError::DuplicateTag(theme.tag().to_string()));
        }
        if self.themes.iter().any(|t| t.style() == theme.style()) {
            return Err(ThemeError::DuplicateStyle(theme.style().clone()));
        }
        Ok(())
    }
}
