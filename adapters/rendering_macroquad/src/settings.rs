use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};

const SUPPORTED_SETTINGS_VERSION: u32 = 1;

/// Window preferences loaded from an optional `settings.toml` file.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct WindowSettings {
    /// Overrides the window title when present.
    pub window_title: Option<String>,
    /// Overrides vertical synchronisation when present.
    pub vsync: Option<bool>,
    /// Overrides frame timing output when present.
    pub show_fps: Option<bool>,
}

#[derive(Debug, serde::Deserialize)]
struct SettingsFile {
    version: u32,
    #[serde(default)]
    window: WindowSettings,
}

impl WindowSettings {
    /// Returns the default settings path relative to the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from("settings.toml")
    }

    /// Loads settings from the provided path, returning `None` when the file
    /// does not exist.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        parse_settings(&contents).map(Some)
    }
}

fn parse_settings(contents: &str) -> Result<WindowSettings> {
    let file: SettingsFile =
        toml::from_str(contents).context("failed to parse settings toml contents")?;
    if file.version != SUPPORTED_SETTINGS_VERSION {
        bail!(
            "unsupported settings version {}; expected {}",
            file.version,
            SUPPORTED_SETTINGS_VERSION
        );
    }

    Ok(file.window)
}
