//! Color schemes and theme switching
//!
//! Two built-in palettes (dark, light). The controller resolves the active
//! mode at startup - explicit stored preference first, then the system hint,
//! then dark - and owns the toggle/persist cycle. The system hint is behind
//! a trait so tests can substitute a fixed answer.

use ratatui::style::Color;

use crate::prefs::PreferenceStore;

/// The persisted theme identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

/// All colors used by the renderers
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub nav_active_fg: Color,
    pub nav_active_bg: Color,
    pub heading: Color,
    pub gauge_filled: Color,
    pub gauge_empty: Color,
    /// Rain glyph colors from head to tail
    pub rain_head: Color,
    pub rain_body: Color,
    pub rain_tail: Color,
    pub toast_info: Color,
    pub toast_success: Color,
    pub toast_error: Color,
    pub toast_warning: Color,
    pub field_error: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(12, 14, 18),
            foreground: Color::Rgb(220, 223, 228),
            muted: Color::Rgb(110, 118, 129),
            accent: Color::Rgb(97, 175, 239),
            nav_active_fg: Color::Rgb(12, 14, 18),
            nav_active_bg: Color::Rgb(97, 175, 239),
            heading: Color::Rgb(229, 192, 123),
            gauge_filled: Color::Rgb(152, 195, 121),
            gauge_empty: Color::Rgb(50, 56, 66),
            rain_head: Color::Rgb(190, 255, 190),
            rain_body: Color::Rgb(70, 190, 90),
            rain_tail: Color::Rgb(30, 90, 45),
            toast_info: Color::Rgb(97, 175, 239),
            toast_success: Color::Rgb(152, 195, 121),
            toast_error: Color::Rgb(224, 108, 117),
            toast_warning: Color::Rgb(229, 192, 123),
            field_error: Color::Rgb(224, 108, 117),
            status_fg: Color::Rgb(12, 14, 18),
            status_bg: Color::Rgb(110, 118, 129),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 248),
            foreground: Color::Rgb(40, 44, 52),
            muted: Color::Rgb(130, 135, 143),
            accent: Color::Rgb(1, 132, 188),
            nav_active_fg: Color::Rgb(250, 250, 248),
            nav_active_bg: Color::Rgb(1, 132, 188),
            heading: Color::Rgb(152, 104, 1),
            gauge_filled: Color::Rgb(80, 161, 79),
            gauge_empty: Color::Rgb(220, 222, 224),
            rain_head: Color::Rgb(40, 120, 60),
            rain_body: Color::Rgb(120, 190, 140),
            rain_tail: Color::Rgb(200, 225, 205),
            toast_info: Color::Rgb(1, 132, 188),
            toast_success: Color::Rgb(80, 161, 79),
            toast_error: Color::Rgb(202, 18, 67),
            toast_warning: Color::Rgb(152, 104, 1),
            field_error: Color::Rgb(202, 18, 67),
            status_fg: Color::Rgb(250, 250, 248),
            status_bg: Color::Rgb(130, 135, 143),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

/// Source of the OS/terminal light-dark hint
pub trait SystemTheme {
    /// `None` when the environment gives no readable answer
    fn preferred_mode(&self) -> Option<ThemeMode>;
}

/// Reads the `COLORFGBG` hint terminals export ("fg;bg", bg 0-6 or 8 = dark)
pub struct TerminalBackground;

impl TerminalBackground {
    fn parse_colorfgbg(value: &str) -> Option<ThemeMode> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match bg {
            0..=6 | 8 => Some(ThemeMode::Dark),
            7 | 9..=15 => Some(ThemeMode::Light),
            _ => None,
        }
    }
}

impl SystemTheme for TerminalBackground {
    fn preferred_mode(&self) -> Option<ThemeMode> {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Self::parse_colorfgbg(&v))
    }
}

/// Owns the active theme and the toggle/persist cycle
pub struct ThemeController {
    mode: ThemeMode,
    theme: Theme,
    /// Whether a stored preference exists (as opposed to following the system)
    explicit: bool,
}

impl ThemeController {
    /// Resolve the startup theme: stored preference, else system hint, else dark
    pub fn initialize(prefs: &dyn PreferenceStore, system: &dyn SystemTheme) -> Self {
        let stored = prefs.load_theme();
        let mode = stored
            .or_else(|| system.preferred_mode())
            .unwrap_or(ThemeMode::Dark);
        tracing::debug!(theme = mode.as_str(), explicit = stored.is_some(), "theme resolved");
        Self {
            mode,
            theme: Theme::for_mode(mode),
            explicit: stored.is_some(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Flip the theme, persist it, and return the new mode for the caller to
    /// announce. From here on the user preference overrides the system.
    pub fn toggle(&mut self, prefs: &mut dyn PreferenceStore) -> ThemeMode {
        self.set(self.mode.toggled());
        self.explicit = true;
        prefs.store_theme(self.mode);
        self.mode
    }

    /// Follow a system light/dark change, but only while the user has never
    /// chosen explicitly.
    pub fn system_preference_changed(&mut self, new_mode: ThemeMode) {
        if self.explicit {
            return;
        }
        self.set(new_mode);
    }

    fn set(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.theme = Theme::for_mode(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;

    struct FixedSystem(Option<ThemeMode>);

    impl SystemTheme for FixedSystem {
        fn preferred_mode(&self) -> Option<ThemeMode> {
            self.0
        }
    }

    #[test]
    fn test_initialize_defaults_to_dark() {
        let prefs = MemoryPreferences::default();
        let controller = ThemeController::initialize(&prefs, &FixedSystem(None));
        assert_eq!(controller.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_initialize_follows_system_without_stored_preference() {
        let prefs = MemoryPreferences::default();
        let controller = ThemeController::initialize(&prefs, &FixedSystem(Some(ThemeMode::Light)));
        assert_eq!(controller.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_stored_preference_beats_system() {
        let mut prefs = MemoryPreferences::default();
        prefs.store_theme(ThemeMode::Dark);
        let controller = ThemeController::initialize(&prefs, &FixedSystem(Some(ThemeMode::Light)));
        assert_eq!(controller.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let mut prefs = MemoryPreferences::default();
        let mut controller = ThemeController::initialize(&prefs, &FixedSystem(None));

        let mode = controller.toggle(&mut prefs);
        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(prefs.load_theme(), Some(ThemeMode::Light));

        controller.toggle(&mut prefs);
        assert_eq!(prefs.load_theme(), Some(ThemeMode::Dark));
    }

    #[test]
    fn test_system_change_ignored_after_explicit_toggle() {
        let mut prefs = MemoryPreferences::default();
        let mut controller = ThemeController::initialize(&prefs, &FixedSystem(None));

        // Still following the system: change applies
        controller.system_preference_changed(ThemeMode::Light);
        assert_eq!(controller.mode(), ThemeMode::Light);

        controller.toggle(&mut prefs); // user override (back to dark)
        controller.system_preference_changed(ThemeMode::Light);
        assert_eq!(controller.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(
            TerminalBackground::parse_colorfgbg("15;0"),
            Some(ThemeMode::Dark)
        );
        assert_eq!(
            TerminalBackground::parse_colorfgbg("0;15"),
            Some(ThemeMode::Light)
        );
        assert_eq!(
            TerminalBackground::parse_colorfgbg("default;default"),
            None
        );
    }
}
