//! Couples a surface's lifecycle to persisted theme changes
//!
//! A surface is styled once, at creation; host toolkits generally cannot
//! restyle a live surface. The binder therefore records the tag the surface
//! was created with and, while the surface is visible, watches the
//! persisted active-tag key. A change to a different tag issues a single
//! recreate command; the rebuilt surface gets a fresh binder with a fresh
//! bound tag, which is what stops duplicate notifications from looping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use theme_core::{Result, ThemeRegistry, ThemedSurface, SAVED_TAG_KEY};
use theme_store::{KeyChange, SubscriptionId};

/// Command handler invoked when the bound surface must be rebuilt
///
/// Recreation means destroy-and-recreate by the surface's owner, never an
/// in-place restyle.
pub type RecreateHandler = Arc<dyn Fn() + Send + Sync>;

/// Pure decision: does `change` require recreating a surface bound to
/// `bound_tag`?
pub fn should_recreate(bound_tag: &str, change: &KeyChange) -> bool {
    change.key == SAVED_TAG_KEY && change.value.as_deref() != Some(bound_tag)
}

/// Binds one surface instance to the theme it was created with
///
/// Lifecycle: [`SurfaceBinder::bind`] at surface creation, then
/// [`SurfaceBinder::on_resume`] / [`SurfaceBinder::on_pause`] as the
/// surface becomes visible and hidden. Once a recreate command has been
/// issued the binder is spent; the replacement surface binds anew.
pub struct SurfaceBinder {
    registry: Arc<ThemeRegistry>,
    bound_tag: String,
    subscription: Option<SubscriptionId>,
    recreating: Arc<AtomicBool>,
}

impl SurfaceBinder {
    /// Apply the active theme to `surface` and record its creation-time tag
    pub fn bind(registry: Arc<ThemeRegistry>, surface: &mut dyn ThemedSurface) -> Result<Self> {
        registry.apply_to(surface)?;
        let bound_tag = match registry.saved_tag()? {
            Some(tag) => tag,
            None => registry.active_theme()?.tag().to_string(),
        };
        debug!(tag = %bound_tag, "surface bound to theme");
        Ok(Self {
            registry,
            bound_tag,
            subscription: None,
            recreating: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Tag the surface was created with
    pub fn bound_tag(&self) -> &str {
        &self.bound_tag
    }

    /// Whether the binder is currently listening for changes
    pub fn is_bound(&self) -> bool {
        self.subscription.is_some()
    }

    /// Whether this binder has already issued its recreate command
    pub fn is_recreating(&self) -> bool {
        self.recreating.load(Ordering::SeqCst)
    }

    /// The surface became visible: subscribe for persisted-tag changes
    ///
    /// Also catches up on a change that happened while the surface was not
    /// listening, issuing the recreate command immediately. Calling this on
    /// an already-bound binder is a no-op.
    pub fn on_resume(&mut self, handler: RecreateHandler) -> Result<()> {
        if self.subscription.is_some() {
            return Ok(());
        }

        let store = self.registry.store()?;
        let bound = self.bound_tag.clone();
        let latch = Arc::clone(&self.recreating);
        let on_mismatch = Arc::clone(&handler);
        let id = store.subscribe(
            SAVED_TAG_KEY,
            Arc::new(move |change: &KeyChange| {
                if should_recreate(&bound, change) && !latch.swap(true, Ordering::SeqCst) {
                    debug!(key = %change.key, "persisted theme diverged, recreating surface");
                    on_mismatch();
                }
            }),
        );
        self.subscription = Some(id);

        if let Some(saved) = self.registry.saved_tag()? {
            if saved != self.bound_tag && !self.recreating.swap(true, Ordering::SeqCst) {
                debug!(
                    bound = %self.bound_tag,
                    saved = %saved,
                    "theme changed while surface was hidden, recreating surface"
                );
                handler();
            }
        }
        Ok(())
    }

    /// The surface is no longer visible: stop listening
    pub fn on_pause(&mut self) -> Result<()> {
        if let Some(id) = self.subscription.take() {
            self.registry.store()?.unsubscribe(id);
        }
        Ok(())
    }
}

impl Drop for SurfaceBinder {
    fn drop(&mut self) {
        let _ = self.on_pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use theme_core::{Color, StyleHandle, ThemeBuilder};
    use theme_store::{MemoryPrefs, PrefStore};

    #[derive(Default)]
    struct FakeSurface {
        styles: Vec<StyleHandle>,
    }

    impl ThemedSurface for FakeSurface {
        fn apply_style(&mut self, style: &StyleHandle) {
            self.styles.push(style.clone());
        }

        fn set_descriptor(&mut self, _icon: &[u8], _primary: Option<Color>) {}
    }

    fn registry(store: Arc<MemoryPrefs>) -> Arc<ThemeRegistry> {
        let registry = ThemeRegistry::new();
        ThemeBuilder::new(store)
            .add_theme_parts("Red", "style/red", true)
            .unwrap()
            .add_theme_parts("Blue", "style/blue", false)
            .unwrap()
            .initialize(&registry)
            .unwrap();
        Arc::new(registry)
    }

    fn counting_handler() -> (RecreateHandler, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        let handler: RecreateHandler = Arc::new(move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        (handler, count)
    }

    #[test]
    fn test_should_recreate_decision() {
        let blue = KeyChange { key: SAVED_TAG_KEY.to_string(), value: Some("Blue".to_string()) };
        let red = KeyChange { key: SAVED_TAG_KEY.to_string(), value: Some("Red".to_string()) };
        let removed = KeyChange { key: SAVED_TAG_KEY.to_string(), value: None };
        let other = KeyChange { key: "other.key".to_string(), value: Some("Blue".to_string()) };

        assert!(should_recreate("Red", &blue));
        assert!(!should_recreate("Red", &red));
        assert!(should_recreate("Red", &removed));
        assert!(!should_recreate("Red", &other));
    }

    #[test]
    fn test_bind_applies_theme_and_records_tag() {
        let registry = registry(Arc::new(MemoryPrefs::new()));
        let mut surface = FakeSurface::default();

        let binder = SurfaceBinder::bind(Arc::clone(&registry), &mut surface).unwrap();

        assert_eq!(surface.styles, vec![StyleHandle::new("style/red")]);
        assert_eq!(binder.bound_tag(), "Red");
        assert!(!binder.is_bound());
    }

    #[test]
    fn test_resume_and_pause_toggle_subscription() {
        let registry = registry(Arc::new(MemoryPrefs::new()));
        let mut surface = FakeSurface::default();
        let mut binder = SurfaceBinder::bind(registry, &mut surface).unwrap();
        let (handler, _count) = counting_handler();

        binder.on_resume(handler.clone()).unwrap();
        assert!(binder.is_bound());

        // Redundant resume keeps the existing subscription.
        binder.on_resume(handler).unwrap();
        assert!(binder.is_bound());

        binder.on_pause().unwrap();
        assert!(!binder.is_bound());
        binder.on_pause().unwrap();
    }

    #[test]
    fn test_change_while_bound_triggers_one_recreate() {
        let store = Arc::new(MemoryPrefs::new());
        let registry = registry(Arc::clone(&store));
        let mut surface = FakeSurface::default();
        let mut binder = SurfaceBinder::bind(Arc::clone(&registry), &mut surface).unwrap();
        let (handler, count) = counting_handler();

        binder.on_resume(handler).unwrap();
        registry.change_theme_by_tag("Blue").unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(binder.is_recreating());

        // A duplicate write of the same tag is absorbed by the latch.
        store.put(SAVED_TAG_KEY, "Blue").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_change_while_paused_recreates_on_resume() {
        let registry = registry(Arc::new(MemoryPrefs::new()));
        let mut surface = FakeSurface::default();
        let mut binder = SurfaceBinder::bind(Arc::clone(&registry), &mut surface).unwrap();
        let (handler, count) = counting_handler();

        binder.on_resume(handler.clone()).unwrap();
        binder.on_pause().unwrap();

        registry.change_theme_by_tag("Blue").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);

        binder.on_resume(handler).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rebound_surface_ignores_duplicate_notification() {
        let store = Arc::new(MemoryPrefs::new());
        let registry = registry(Arc::clone(&store));
        let mut surface = FakeSurface::default();
        let mut binder = SurfaceBinder::bind(Arc::clone(&registry), &mut surface).unwrap();
        let (handler, count) = counting_handler();

        binder.on_resume(handler).unwrap();
        registry.change_theme_by_tag("Blue").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // The owner reacts by destroying the surface and binding a new one.
        drop(binder);
        let mut replacement = FakeSurface::default();
        let mut rebound = SurfaceBinder::bind(Arc::clone(&registry), &mut replacement).unwrap();
        assert_eq!(rebound.bound_tag(), "Blue");

        let (handler, rebound_count) = counting_handler();
        rebound.on_resume(handler).unwrap();

        // A redundant write of the already-adopted tag changes nothing.
        store.put(SAVED_TAG_KEY, "Blue").unwrap();
        assert_eq!(rebound_count.load(Ordering::SeqCst), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = Arc::new(MemoryPrefs::new());
        let registry = registry(Arc::clone(&store));
        let mut surface = FakeSurface::default();
        let mut binder = SurfaceBinder::bind(Arc::clone(&registry), &mut surface).unwrap();
        let (handler, count) = counting_handler();

        binder.on_resume(handler).unwrap();
        drop(binder);

        registry.change_theme_by_tag("Blue").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
