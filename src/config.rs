//! Camera configuration document
//!
//! Models the static camera configuration that assigns logical functions to
//! known device identifiers. The document is read from JSON (the layout the
//! automotive camera config ships with) or TOML, and can be written back in
//! either format.
//!
//! ```json
//! {
//!   "cameras": [
//!     { "cameraId": "/dev/video10", "function": "reverse,park", "yaw": 180.0 },
//!     { "deviceId": "/dev/video11", "functions": ["front"] }
//!   ]
//! }
//! ```

use crate::errors::ConfigLoadError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the camera config lives on a vehicle image
pub const DEFAULT_CONFIG_PATH: &str = "/system/etc/automotive/evs_support_lib/camera_config.json";

/// Serialization format of a config document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is treated as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Input handed to [`CapabilityRegistry::initialize`](crate::registry::CapabilityRegistry::initialize)
#[derive(Debug, Clone)]
pub enum ConfigSource {
    Path(PathBuf),
    Json(String),
    Toml(String),
}

impl ConfigSource {
    pub fn path<P: Into<PathBuf>>(path: P) -> Self {
        ConfigSource::Path(path.into())
    }

    /// Read and parse the source into a config document.
    pub fn read(&self) -> Result<CameraConfigFile, ConfigLoadError> {
        match self {
            ConfigSource::Path(path) => CameraConfigFile::load_from_file(path),
            ConfigSource::Json(text) => CameraConfigFile::from_json_str(text),
            ConfigSource::Toml(text) => CameraConfigFile::from_toml_str(text),
        }
    }
}

impl Default for ConfigSource {
    fn default() -> Self {
        ConfigSource::Path(PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

/// Root of the config document. Sections other than `cameras` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraConfigFile {
    #[serde(alias = "devices", default)]
    pub cameras: Vec<CameraRecord>,
}

/// One `cameras` record as written in the file.
///
/// Required fields are optional here so that a missing one is reported with
/// the record's index instead of a bare serde message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    #[serde(
        rename = "deviceId",
        alias = "cameraId",
        alias = "device_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_id: Option<String>,
    #[serde(alias = "functions", default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionTags>,
    #[serde(flatten)]
    pub placement: CameraPlacement,
}

/// `function` may be a single tag string or a list of tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionTags {
    One(String),
    Many(Vec<String>),
}

impl FunctionTags {
    /// Non-empty tags in written order, kept verbatim
    pub fn tags(&self) -> Vec<String> {
        let raw: Vec<&String> = match self {
            FunctionTags::One(tag) => vec![tag],
            FunctionTags::Many(tags) => tags.iter().collect(),
        };
        raw.into_iter()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect()
    }
}

/// Mounting metadata for a camera. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPlacement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaw: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll: Option<f32>,
    /// Horizontal field of view in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hfov: Option<f32>,
    /// Vertical field of view in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vfov: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hflip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vflip: Option<bool>,
}

impl CameraPlacement {
    pub fn is_empty(&self) -> bool {
        *self == CameraPlacement::default()
    }
}

impl CameraConfigFile {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigLoadError> {
        serde_json::from_str(text).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigLoadError> {
        toml::from_str(text).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Load a config document, picking the parser from the file extension.
    ///
    /// A missing file is an error: there is no default camera assignment.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigLoadError::NotFound(path.to_path_buf()),
            _ => ConfigLoadError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let config = match ConfigFormat::from_path(path) {
            ConfigFormat::Toml => Self::from_toml_str(&contents)?,
            ConfigFormat::Json => Self::from_json_str(&contents)?,
        };

        log::info!(
            "Loaded camera configuration from {:?} ({} records)",
            path,
            config.cameras.len()
        );
        Ok(config)
    }

    /// Save the document, as TOML for `.toml` paths and pretty JSON otherwise
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigLoadError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ConfigLoadError::Write(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let text = match ConfigFormat::from_path(path) {
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigLoadError::Write(format!("Failed to serialize config: {}", e)))?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigLoadError::Write(format!("Failed to serialize config: {}", e)))?,
        };

        fs::write(path, text).map_err(|e| ConfigLoadError::Write(e.to_string()))?;

        log::info!("Saved camera configuration to {:?}", path);
        Ok(())
    }

    /// Check every record carries a device id and a function field
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        for (index, record) in self.cameras.iter().enumerate() {
            match record.device_id.as_deref() {
                None | Some("") => {
                    return Err(ConfigLoadError::Invalid {
                        index,
                        reason: "missing deviceId".to_string(),
                    })
                }
                Some(_) => {}
            }
            if record.function.is_none() {
                return Err(ConfigLoadError::Invalid {
                    index,
                    reason: "missing function".to_string(),
                });
            }
        }
        Ok(())
    }
}
