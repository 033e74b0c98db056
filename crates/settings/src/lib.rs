use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strip::{DismissibleList, StripError, TrackGeometry, DEFAULT_SNAP_BACK_SECS};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io at {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("settings json at {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
    #[error(transparent)]
    Geometry(#[from] StripError),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

pub fn app_config_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
    base.join("dismiss_strip")
}

pub fn settings_path() -> PathBuf { app_config_dir().join("settings.json") }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripSettings {
    pub geometry: TrackGeometry,
    pub snap_back_secs: f64,
    pub cell_color: String,
    pub background_color: String,
    pub window_title: String,
}

impl Default for StripSettings {
    fn default() -> Self {
        Self {
            geometry: TrackGeometry::default(),
            snap_back_secs: DEFAULT_SNAP_BACK_SECS,
            cell_color: "#ffff00".into(),
            background_color: "#0000ff".into(),
            window_title: "Dismissible Strip".into(),
        }
    }
}

impl StripSettings {
    /// Missing file means defaults; a file that exists must parse and
    /// validate.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(SettingsError::Io { path: path.to_path_buf(), source }),
        };
        let settings: Self = serde_json::from_str(&text).map_err(|source| SettingsError::Json { path: path.to_path_buf(), source })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like `load_or_default` but never fails; bad files are reported and
    /// replaced by defaults.
    pub fn load_lenient(path: &Path) -> Self {
        match Self::load_or_default(path) {
            Ok(s) => s,
            Err(err) => {
                warn!("falling back to default settings: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| SettingsError::Io { path: dir.to_path_buf(), source })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Json { path: path.to_path_buf(), source })?;
        fs::write(path, json).map_err(|source| SettingsError::Io { path: path.to_path_buf(), source })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.geometry.validate()?;
        if !self.snap_back_secs.is_finite() || self.snap_back_secs < 0.0 {
            return Err(SettingsError::Invalid(format!("snap_back_secs must be >= 0, got {}", self.snap_back_secs)));
        }
        for (name, value) in [("cell_color", &self.cell_color), ("background_color", &self.background_color)] {
            if parse_hex_color(value).is_none() {
                return Err(SettingsError::Invalid(format!("{name} is not a #rrggbb color: {value:?}")));
            }
        }
        Ok(())
    }

    pub fn build_list(&self) -> DismissibleList { DismissibleList::new(self.geometry).with_snap_back_secs(self.snap_back_secs) }
}

pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let trimmed = hex.trim_start_matches('#');
    if trimmed.len() != 6 { return None; }
    let v = u32::from_str_radix(trimmed, 16).ok()?;
    Some([((v >> 16) & 0xff) as u8, ((v >> 8) & 0xff) as u8, (v & 0xff) as u8])
}
