//! Persisted reader settings.
//!
//! Settings are stored as JSON next to the enabled flag:
//!
//! ```json
//! {
//!   "isEnabled": false,
//!   "settings": {
//!     "fixationPoint": 3,
//!     "dimOpacity": 0.5,
//!     "gradientTheme": "none",
//!     "autoMarkdown": true
//!   }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bionic::FixationLevel;
use crate::error::{Error, Result};
use crate::theme::GradientTheme;

/// Reader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Fixation level, 1-5
    pub fixation_point: u8,

    /// Opacity of dimmed word suffixes, 0.0-1.0
    pub dim_opacity: f32,

    /// Gradient theme name
    pub gradient_theme: String,

    /// Render raw Markdown files automatically
    pub auto_markdown: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixation_point: 3,
            dim_opacity: 0.5,
            gradient_theme: GradientTheme::None.name().to_string(),
            auto_markdown: true,
        }
    }
}

impl Settings {
    /// Check every field is within range.
    ///
    /// Unknown theme names are rejected here even though the applier
    /// tolerates them, so the settings file never accumulates typos.
    pub fn validate(&self) -> Result<()> {
        FixationLevel::new(self.fixation_point)?;
        if !(0.0..=1.0).contains(&self.dim_opacity) {
            return Err(Error::InvalidOpacity(self.dim_opacity));
        }
        if GradientTheme::from_name(&self.gradient_theme).is_none() {
            return Err(Error::UnknownTheme(self.gradient_theme.clone()));
        }
        Ok(())
    }

    /// Fixation level, clamped into range.
    pub fn fixation(&self) -> FixationLevel {
        FixationLevel::clamped(self.fixation_point)
    }

    /// Gradient theme; unknown names map to `none`.
    pub fn theme(&self) -> GradientTheme {
        GradientTheme::from_name(&self.gradient_theme).unwrap_or_default()
    }

    /// Apply a partial update.
    pub fn merge(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.fixation_point {
            self.fixation_point = v;
        }
        if let Some(v) = patch.dim_opacity {
            self.dim_opacity = v;
        }
        if let Some(v) = &patch.gradient_theme {
            self.gradient_theme = v.clone();
        }
        if let Some(v) = patch.auto_markdown {
            self.auto_markdown = v;
        }
    }

    /// Copy with a partial update applied.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        let mut next = self.clone();
        next.merge(patch);
        next
    }
}

/// A partial settings update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixation_point: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dim_opacity: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_markdown: Option<bool>,
}

impl SettingsPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixation level.
    pub fn with_fixation_point(mut self, value: u8) -> Self {
        self.fixation_point = Some(value);
        self
    }

    /// Set the dim opacity.
    pub fn with_dim_opacity(mut self, value: f32) -> Self {
        self.dim_opacity = Some(value);
        self
    }

    /// Set the gradient theme name.
    pub fn with_gradient_theme(mut self, value: impl Into<String>) -> Self {
        self.gradient_theme = Some(value.into());
        self
    }

    /// Set automatic Markdown rendering.
    pub fn with_auto_markdown(mut self, value: bool) -> Self {
        self.auto_markdown = Some(value);
        self
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Everything persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredState {
    /// Whether the reader was left enabled
    pub is_enabled: bool,

    /// Reader settings
    pub settings: Settings,
}

/// JSON file holding a [`StoredState`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state. A missing file yields defaults.
    pub fn load(&self) -> Result<StoredState> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("settings: {} not found, using defaults", self.path.display());
                return Ok(StoredState::default());
            }
            Err(e) => return Err(e.into()),
        };
        let state: StoredState = serde_json::from_str(&text)
            .map_err(|e| Error::Settings(format!("{}: {}", self.path.display(), e)))?;
        Ok(state)
    }

    /// Write the state, creating parent directories as needed.
    pub fn save(&self, state: &StoredState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        log::debug!("settings: saved {}", self.path.display());
        Ok(())
    }

    /// Write defaults unless the file already exists. Returns true if written.
    pub fn install(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&StoredState::default())?;
        Ok(true)
    }

    /// Validate and persist a settings update, keeping the enabled flag.
    pub fn update(&self, patch: &SettingsPatch) -> Result<StoredState> {
        let mut state = self.load()?;
        let next = state.settings.merged(patch);
        next.validate()?;
        state.settings = next;
        self.save(&state)?;
        Ok(state)
    }

    /// Persist only the enabled flag.
    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        let mut state = self.load()?;
        state.is_enabled = enabled;
        self.save(&state)
    }
}
