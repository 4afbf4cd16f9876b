//! Color theme and the one piece of persisted state: the dark-mode flag,
//! read at startup and written on toggle. I/O failures degrade to the default
//! theme with a warning, never abort.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Dark,
    Light,
}

#[derive(Serialize, Deserialize)]
struct Preference {
    dark_mode: bool,
}

pub fn load_mode(path: &Path) -> Mode {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<Preference>(&raw) {
            Ok(pref) if pref.dark_mode => Mode::Dark,
            Ok(_) => Mode::Light,
            Err(e) => {
                warn!("Malformed theme preference at {}: {}. Using dark.", path.display(), e);
                Mode::Dark
            }
        },
        // First run or unreadable file; dark is the default.
        Err(_) => Mode::Dark,
    }
}

pub fn save_mode(path: &Path, mode: Mode) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let pref = Preference { dark_mode: mode == Mode::Dark };
    let raw = serde_json::to_string_pretty(&pref)?;
    fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub mode: Mode,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub up: Color,
    pub down: Color,
}

impl Theme {
    pub fn from_mode(mode: Mode) -> Self {
        match mode {
            Mode::Dark => Self {
                mode,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::Yellow,
                up: Color::Green,
                down: Color::Red,
            },
            Mode::Light => Self {
                mode,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                highlight: Color::Magenta,
                up: Color::Green,
                down: Color::Red,
            },
        }
    }

    pub fn toggled(self) -> Self {
        match self.mode {
            Mode::Dark => Self::from_mode(Mode::Light),
            Mode::Light => Self::from_mode(Mode::Dark),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_pref_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("coinpulse-theme-{}-{}.json", tag, std::process::id()))
    }

    #[test]
    fn test_mode_round_trip() {
        let path = temp_pref_path("roundtrip");
        save_mode(&path, Mode::Light).unwrap();
        assert_eq!(load_mode(&path), Mode::Light);
        save_mode(&path, Mode::Dark).unwrap();
        assert_eq!(load_mode(&path), Mode::Dark);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_defaults_to_dark() {
        let path = temp_pref_path("missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(load_mode(&path), Mode::Dark);
    }

    #[test]
    fn test_malformed_file_defaults_to_dark() {
        let path = temp_pref_path("malformed");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(load_mode(&path), Mode::Dark);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_toggle_flips_mode() {
        let theme = Theme::from_mode(Mode::Dark);
        assert_eq!(theme.toggled().mode, Mode::Light);
        assert_eq!(theme.toggled().toggled().mode, Mode::Dark);
    }
}
