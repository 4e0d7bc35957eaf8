//! Theme entity and the predefined catalogue
//!
//! A theme is an opaque identifier pair: a human-readable tag and a style
//! handle the host's rendering layer resolves into concrete visual
//! attributes. Styling itself stays on the host side; the library only
//! carries an optional [`ColorResolver`] capability so callers can ask a
//! theme for named colors such as its primary swatch.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A color represented as an RGB hex string (e.g., "#3F51B5")
pub type Color = String;

/// Parse a hex color string into RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB components to a hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> Color {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Attribute name for a theme's primary color
pub const ATTR_COLOR_PRIMARY: &str = "colorPrimary";

/// Attribute name for the darker variant of the primary color
pub const ATTR_COLOR_PRIMARY_DARK: &str = "colorPrimaryDark";

/// Attribute name for a theme's accent color
pub const ATTR_COLOR_ACCENT: &str = "colorAccent";

/// Opaque style identifier resolved by the host's rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleHandle(String);

impl StyleHandle {
    /// Create a style handle from a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StyleHandle {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StyleHandle {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Resolves named style attributes to concrete colors
pub trait ColorResolver: Send + Sync {
    /// Resolve `attr` for `style`, or `None` when the attribute is unknown
    fn resolve(&self, style: &StyleHandle, attr: &str) -> Option<Color>;
}

/// Immutable theme descriptor
///
/// Equality and hashing consider only `(tag, style)`; the resolver is a
/// capability, not part of the theme's identity.
#[derive(Clone)]
pub struct Theme {
    tag: String,
    style: StyleHandle,
    resolver: Option<Arc<dyn ColorResolver>>,
}

impl Theme {
    /// Create a theme without color-resolution capability
    pub fn new(tag: impl Into<String>, style: impl Into<StyleHandle>) -> Self {
        Self { tag: tag.into(), style: style.into(), resolver: None }
    }

    /// Create a theme that can resolve named attribute colors
    pub fn with_resolver(
        tag: impl Into<String>,
        style: impl Into<StyleHandle>,
        resolver: Arc<dyn ColorResolver>,
    ) -> Self {
        Self { tag: tag.into(), style: style.into(), resolver: Some(resolver) }
    }

    /// Unique human-readable identifier
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Style handle resolved by the rendering layer
    pub fn style(&self) -> &StyleHandle {
        &self.style
    }

    /// Resolve a named attribute color, when a resolver is attached
    pub fn attr_color(&self, attr: &str) -> Option<Color> {
        self.resolver
            .as_ref()
            .and_then(|resolver| resolver.resolve(&self.style, attr))
    }

    /// The theme's primary color
    pub fn color_primary(&self) -> Option<Color> {
        self.attr_color(ATTR_COLOR_PRIMARY)
    }

    /// The darker variant of the primary color
    pub fn color_primary_dark(&self) -> Option<Color> {
        self.attr_color(ATTR_COLOR_PRIMARY_DARK)
    }

    /// The theme's accent color
    pub fn color_accent(&self) -> Option<Color> {
        self.attr_color(ATTR_COLOR_ACCENT)
    }
}

impl PartialEq for Theme {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.style == other.style
    }
}

impl Eq for Theme {}

impl Hash for Theme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        self.style.hash(state);
    }
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("tag", &self.tag)
            .field("style", &self.style)
            .finish()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Theme {{ tag: '{}', style: '{}' }}", self.tag, self.style)
    }
}

/// Predefined catalogue of twenty named themes shipped by the library
///
/// Used to populate a builder that was given no themes, in the canonical
/// order of [`Preset::ALL`]. [`Preset::Indigo`] is the documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Preset {
    /// Red theme
    Red,
    /// Pink theme
    Pink,
    /// Purple theme
    Purple,
    /// Deep purple theme
    DeepPurple,
    /// Indigo theme (the default)
    #[default]
    Indigo,
    /// Blue theme
    Blue,
    /// Light blue theme
    LightBlue,
    /// Cyan theme
    Cyan,
    /// Teal theme
    Teal,
    /// Green theme
    Green,
    /// Light green theme
    LightGreen,
    /// Lime theme
    Lime,
    /// Yellow theme
    Yellow,
    /// Amber theme
    Amber,
    /// Orange theme
    Orange,
    /// Deep orange theme
    DeepOrange,
    /// Brown theme
    Brown,
    /// Grey theme
    Grey,
    /// Blue grey theme
    BlueGrey,
    /// Black theme
    Black,
}

impl Preset {
    /// All presets in canonical catalogue order
    pub const ALL: [Preset; 20] = [
        Preset::Red,
        Preset::Pink,
        Preset::Purple,
        Preset::DeepPurple,
        Preset::Indigo,
        Preset::Blue,
        Preset::LightBlue,
        Preset::Cyan,
        Preset::Teal,
        Preset::Green,
        Preset::LightGreen,
        Preset::Lime,
        Preset::Yellow,
        Preset::Amber,
        Preset::Orange,
        Preset::DeepOrange,
        Preset::Brown,
        Preset::Grey,
        Preset::BlueGrey,
        Preset::Black,
    ];

    /// Human-readable theme tag
    pub fn tag(self) -> &'static str {
        match self {
            Preset::Red => "Red",
            Preset::Pink => "Pink",
            Preset::Purple => "Purple",
            Preset::DeepPurple => "Deep Purple",
            Preset::Indigo => "Indigo",
            Preset::Blue => "Blue",
            Preset::LightBlue => "Light Blue",
            Preset::Cyan => "Cyan",
            Preset::Teal => "Teal",
            Preset::Green => "Green",
            Preset::LightGreen => "Light Green",
            Preset::Lime => "Lime",
            Preset::Yellow => "Yellow",
            Preset::Amber => "Amber",
            Preset::Orange => "Orange",
            Preset::DeepOrange => "Deep Orange",
            Preset::Brown => "Brown",
            Preset::Grey => "Grey",
            Preset::BlueGrey => "Blue Grey",
            Preset::Black => "Black",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Preset::Red => "red",
            Preset::Pink => "pink",
            Preset::Purple => "purple",
            Preset::DeepPurple => "deep_purple",
            Preset::Indigo => "indigo",
            Preset::Blue => "blue",
            Preset::LightBlue => "light_blue",
            Preset::Cyan => "cyan",
            Preset::Teal => "teal",
            Preset::Green => "green",
            Preset::LightGreen => "light_green",
            Preset::Lime => "lime",
            Preset::Yellow => "yellow",
            Preset::Amber => "amber",
            Preset::Orange => "orange",
            Preset::DeepOrange => "deep_orange",
            Preset::Brown => "brown",
            Preset::Grey => "grey",
            Preset::BlueGrey => "blue_grey",
            Preset::Black => "black",
        }
    }

    /// Style handle under the library's namespace
    pub fn style(self) -> StyleHandle {
        StyleHandle::new(format!("multitheme/{}", self.slug()))
    }

    /// Build the concrete [`Theme`] for this preset
    pub fn to_theme(self) -> Theme {
        Theme::new(self.tag(), self.style())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedResolver(Color);

    impl ColorResolver for FixedResolver {
        fn resolve(&self, _style: &StyleHandle, attr: &str) -> Option<Color> {
            (attr == ATTR_COLOR_PRIMARY).then(|| self.0.clone())
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#000000"), Some((0, 0, 0)));
        assert_eq!(parse_hex_color("#3F51B5"), Some((63, 81, 181)));
        assert_eq!(parse_hex_color("3F51B5"), Some((63, 81, 181)));
        assert_eq!(parse_hex_color("#FF"), None); // Too short
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(255, 255, 255), "#FFFFFF");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
        assert_eq!(rgb_to_hex(63, 81, 181), "#3F51B5");
    }

    #[test]
    fn test_theme_equality_by_tag_and_style() {
        let plain = Theme::new("Red", "style/red");
        let resolved =
            Theme::with_resolver("Red", "style/red", Arc::new(FixedResolver("#F44336".into())));
        let other_style = Theme::new("Red", "style/crimson");

        assert_eq!(plain, resolved);
        assert_ne!(plain, other_style);
    }

    #[test]
    fn test_attr_color_without_resolver() {
        let theme = Theme::new("Red", "style/red");
        assert_eq!(theme.color_primary(), None);
        assert_eq!(theme.color_accent(), None);
    }

    #[test]
    fn test_attr_color_with_resolver() {
        let theme =
            Theme::with_resolver("Red", "style/red", Arc::new(FixedResolver("#F44336".into())));

        assert_eq!(theme.color_primary(), Some("#F44336".to_string()));
        assert_eq!(theme.color_primary_dark(), None);
    }

    #[test]
    fn test_theme_display() {
        let theme = Theme::new("Red", "style/red");
        assert_eq!(theme.to_string(), "Theme { tag: 'Red', style: 'style/red' }");
    }

    #[test]
    fn test_preset_catalogue_size_and_order() {
        assert_eq!(Preset::ALL.len(), 20);
        assert_eq!(Preset::ALL[0], Preset::Red);
        assert_eq!(Preset::ALL[4], Preset::Indigo);
        assert_eq!(Preset::ALL[19], Preset::Black);
    }

    #[test]
    fn test_preset_tags_unique() {
        let tags: HashSet<&str> = Preset::ALL.iter().map(|p| p.tag()).collect();
        assert_eq!(tags.len(), Preset::ALL.len());
    }

    #[test]
    fn test_preset_styles_unique() {
        let styles: HashSet<StyleHandle> = Preset::ALL.iter().map(|p| p.style()).collect();
        assert_eq!(styles.len(), Preset::ALL.len());
    }

    #[test]
    fn test_preset_default_is_indigo() {
        assert_eq!(Preset::default(), Preset::Indigo);
        assert_eq!(Preset::default().tag(), "Indigo");
    }

    #[test]
    fn test_preset_to_theme() {
        let theme = Preset::DeepPurple.to_theme();
        assert_eq!(theme.tag(), "Deep Purple");
        assert_eq!(theme.style().as_str(), "multitheme/deep_purple");
    }

    #[test]
    fn test_style_handle_serde() {
        let style = StyleHandle::new("multitheme/teal");
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, "\"multitheme/teal\"");

        let parsed: StyleHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, style);
    }
}
