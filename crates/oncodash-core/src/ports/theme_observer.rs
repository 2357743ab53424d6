//! Observer port for resolved-theme changes.

use crate::domain::ResolvedTheme;

/// Receives the resolved theme whenever the resolver recomputes it.
///
/// The presentation layer implements this to toggle its global dark-mode
/// flag. Implementations must not call back into the resolver.
pub trait ThemeObserver: Send + Sync {
    fn on_theme_resolved(&self, theme: ResolvedTheme);
}

impl<F> ThemeObserver for F
where
    F: Fn(ResolvedTheme) + Send + Sync,
{
    fn on_theme_resolved(&self, theme: ResolvedTheme) {
        self(theme);
    }
}
