//! Presentation model for a theme chooser list
//!
//! Toolkit-free counterpart of a theme picker screen: a snapshot of the
//! catalogue in presentation order, each row carrying what a list widget
//! needs to render a swatch, plus the mapping from a row activation back to
//! a theme change. Consumes only the registry's read and change API.

use theme_core::{Color, Result, StyleHandle, ThemeRegistry};

/// One selectable row of the chooser
#[derive(Debug, Clone, PartialEq)]
pub struct ChooserRow {
    /// Theme tag, shown as the row label
    pub tag: String,
    /// Style handle of the row's theme
    pub style: StyleHandle,
    /// Swatch color, when the theme can resolve its primary color
    pub primary: Option<Color>,
    /// Whether this row represents the active theme
    pub is_active: bool,
}

/// Snapshot of the catalogue in presentation order
#[derive(Debug, Clone, PartialEq)]
pub struct ChooserModel {
    rows: Vec<ChooserRow>,
}

impl ChooserModel {
    /// Build the model from the registry's read API
    pub fn load(registry: &ThemeRegistry) -> Result<Self> {
        let active = registry.active_theme()?;
        let rows = registry
            .themes()?
            .iter()
            .map(|theme| ChooserRow {
                tag: theme.tag().to_string(),
                style: theme.style().clone(),
                primary: theme.color_primary(),
                is_active: *theme == active,
            })
            .collect();
        Ok(Self { rows })
    }

    /// Rows in catalogue order
    pub fn rows(&self) -> &[ChooserRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the model has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Activate the row at `index`
    ///
    /// Out-of-range selections are ignored. Returns whether a theme change
    /// was persisted; the model itself is a stale snapshot afterwards and
    /// should be reloaded by whoever re-renders the list.
    pub fn select(&self, registry: &ThemeRegistry, index: usize) -> Result<bool> {
        match self.rows.get(index) {
            Some(row) => registry.change_theme_by_tag(&row.tag),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use theme_core::{ColorResolver, Theme, ThemeBuilder};
    use theme_store::MemoryPrefs;

    struct StaticPalette;

    impl ColorResolver for StaticPalette {
        fn resolve(&self, style: &StyleHandle, attr: &str) -> Option<Color> {
            if attr != theme_core::ATTR_COLOR_PRIMARY {
                return None;
            }
            match style.as_str() {
                "style/red" => Some("#F44336".to_string()),
                "style/blue" => Some("#2196F3".to_string()),
                _ => None,
            }
        }
    }

    fn registry() -> ThemeRegistry {
        let palette: Arc<dyn ColorResolver> = Arc::new(StaticPalette);
        let registry = ThemeRegistry::new();
        ThemeBuilder::new(Arc::new(MemoryPrefs::new()))
            .add_theme(
                Theme::with_resolver("Red", "style/red", Arc::clone(&palette)),
                true,
            )
            .unwrap()
            .add_theme(Theme::with_resolver("Blue", "style/blue", palette), false)
            .unwrap()
            .initialize(&registry)
            .unwrap();
        registry
    }

    #[test]
    fn test_load_rows_in_order_with_active_flag() {
        let registry = registry();
        let model = ChooserModel::load(&registry).unwrap();

        assert_eq!(model.len(), 2);
        assert!(!model.is_empty());

        let rows = model.rows();
        assert_eq!(rows[0].tag, "Red");
        assert_eq!(rows[0].primary, Some("#F44336".to_string()));
        assert!(rows[0].is_active);

        assert_eq!(rows[1].tag, "Blue");
        assert_eq!(rows[1].primary, Some("#2196F3".to_string()));
        assert!(!rows[1].is_active);
    }

    #[test]
    fn test_select_changes_theme() {
        let registry = registry();
        let model = ChooserModel::load(&registry).unwrap();

        assert!(model.select(&registry, 1).unwrap());
        assert_eq!(registry.active_theme().unwrap().tag(), "Blue");

        let reloaded = ChooserModel::load(&registry).unwrap();
        assert!(reloaded.rows()[1].is_active);
        assert!(!reloaded.rows()[0].is_active);
    }

    #[test]
    fn test_select_active_row_is_noop() {
        let registry = registry();
        let model = ChooserModel::load(&registry).unwrap();

        assert!(!model.select(&registry, 0).unwrap());
        assert_eq!(registry.active_theme().unwrap().tag(), "Red");
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let registry = registry();
        let model = ChooserModel::load(&registry).unwrap();

        assert!(!model.select(&registry, 99).unwrap());
        assert_eq!(registry.active_theme().unwrap().tag(), "Red");
    }
}
