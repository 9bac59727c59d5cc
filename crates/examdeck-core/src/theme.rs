//! Light/dark theme preference.
//!
//! The stored value wins; when nothing (or an empty string) is stored, the
//! platform's color-scheme preference decides.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

/// Preference key the theme is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark-mode",
            Self::Light => "light-mode",
        }
    }

    /// Anything other than `"dark-mode"` is light.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark-mode" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Key/value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in the `preferences` table.
pub struct SqlitePreferences {
    conn: Connection,
}

impl SqlitePreferences {
    /// Wrap a connection whose schema was set up by [`crate::db::init_db`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory preferences, used when no database is available.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: std::collections::HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Theme to start with.
pub fn load_theme(prefs: &dyn PreferenceStore, platform_prefers_dark: bool) -> Result<Theme> {
    let theme = match prefs.get(THEME_KEY)? {
        Some(value) if !value.is_empty() => Theme::from_stored(&value),
        _ if platform_prefers_dark => Theme::Dark,
        _ => Theme::Light,
    };
    debug!(theme = theme.as_str(), "theme loaded");
    Ok(theme)
}

/// Flip the theme and persist the new value.
pub fn toggle_theme(prefs: &mut dyn PreferenceStore, current: Theme) -> Result<Theme> {
    let next = current.toggled();
    prefs.set(THEME_KEY, next.as_str())?;
    debug!(theme = next.as_str(), "theme toggled");
    Ok(next)
}

/// Guess the terminal's color scheme from `COLORFGBG` (`"fg;bg"`).
/// Backgrounds 0-6 and 8 are dark; unset means dark.
pub fn platform_prefers_dark(colorfgbg: Option<&str>) -> bool {
    let Some(value) = colorfgbg else {
        return true;
    };
    match value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(bg) => bg <= 6 || bg == 8,
        None => true,
    }
}
