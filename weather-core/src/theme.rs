use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Host color-scheme preference, read from the terminal's `COLORFGBG`.
    pub fn from_environment() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); ANSI background
    /// colors 0-6 and 8 are dark.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());

        match background {
            Some(0..=6 | 8) => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme '{s}'. Supported themes: light, dark.")),
        }
    }
}

/// Theme preference persisted through a [`Store`] on every change.
pub struct ThemeSetting {
    theme: Theme,
    store: Box<dyn Store<Theme>>,
}

impl ThemeSetting {
    /// Load the stored theme, falling back to `fallback` on first run.
    pub fn load(store: Box<dyn Store<Theme>>, fallback: Theme) -> Self {
        let theme = store.load().unwrap_or(fallback);
        Self { theme, store }
    }

    pub fn get(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(err) = self.store.save(&theme) {
            tracing::warn!(error = %err, "Failed to persist theme preference");
        }
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggle());
        self.theme
    }
}

impl std::fmt::Debug for ThemeSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSetting").field("theme", &self.theme).finish_non_exhaustive()
    }
}
