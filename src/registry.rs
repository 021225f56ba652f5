//! Capability registry
//!
//! Load-once mapping from device identifier to the logical functions the
//! device is assigned. Entries keep the order of the config document.

use crate::config::{CameraConfigFile, CameraPlacement, ConfigSource};
use crate::errors::ConfigLoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One statically configured device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCapabilityEntry {
    pub device_id: String,
    pub functions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<CameraPlacement>,
}

impl DeviceCapabilityEntry {
    pub fn new<I, S>(device_id: impl Into<String>, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            device_id: device_id.into(),
            functions: functions.into_iter().map(Into::into).collect(),
            placement: None,
        }
    }

    pub fn with_placement(mut self, placement: CameraPlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// True when `function` occurs inside any assigned tag.
    ///
    /// Containment, not equality: "reverse" serves a "reverse-assist" tag.
    /// An entry without tags serves nothing.
    pub fn serves(&self, function: &str) -> bool {
        self.functions.iter().any(|tag| tag.contains(function))
    }
}

/// Immutable set of configured devices.
///
/// Either fully populated by [`initialize`](Self::initialize) or empty. An
/// empty registry resolves nothing, so callers must check the result of
/// `initialize` to tell a failed load from a config with no cameras.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    entries: Vec<DeviceCapabilityEntry>,
    initialized: bool,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry straight from a config source
    pub fn load(source: &ConfigSource) -> Result<Self, ConfigLoadError> {
        let mut registry = Self::new();
        registry.initialize(source)?;
        Ok(registry)
    }

    /// Build a registry from already-parsed entries.
    ///
    /// Applies the same duplicate and tag policy as a config load.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DeviceCapabilityEntry>,
    {
        Self {
            entries: dedup_entries(entries.into_iter().map(normalize_entry)),
            initialized: true,
        }
    }

    /// Populate the registry from `source`.
    ///
    /// On failure the registry stays empty. A registry that is already
    /// initialized rejects the call and keeps its entries.
    pub fn initialize(&mut self, source: &ConfigSource) -> Result<(), ConfigLoadError> {
        if self.initialized {
            log::warn!("Ignoring repeated capability registry initialization");
            return Err(ConfigLoadError::AlreadyInitialized);
        }

        match source.read().and_then(|file| entries_from_file(&file)) {
            Ok(entries) => {
                log::info!("Capability registry loaded with {} devices", entries.len());
                self.entries = entries;
                self.initialized = true;
                Ok(())
            }
            Err(e) => {
                log::error!("Missing or improper camera configuration: {}", e);
                self.entries.clear();
                Err(e)
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Entries in config order
    pub fn entries(&self) -> &[DeviceCapabilityEntry] {
        &self.entries
    }

    pub fn find(&self, device_id: &str) -> Option<&DeviceCapabilityEntry> {
        self.entries.iter().find(|entry| entry.device_id == device_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entries_from_file(file: &CameraConfigFile) -> Result<Vec<DeviceCapabilityEntry>, ConfigLoadError> {
    file.validate()?;

    let entries = file.cameras.iter().filter_map(|record| {
        let device_id = record.device_id.clone()?;
        let functions = record.function.as_ref()?.tags();
        let placement = (!record.placement.is_empty()).then(|| record.placement.clone());
        Some(DeviceCapabilityEntry {
            device_id,
            functions,
            placement,
        })
    });

    Ok(dedup_entries(entries))
}

fn normalize_entry(mut entry: DeviceCapabilityEntry) -> DeviceCapabilityEntry {
    entry.functions = entry
        .functions
        .into_iter()
        .filter(|tag| !tag.is_empty())
        .collect();
    entry
}

// First occurrence of a device id wins.
fn dedup_entries<I>(entries: I) -> Vec<DeviceCapabilityEntry>
where
    I: IntoIterator<Item = DeviceCapabilityEntry>,
{
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for entry in entries {
        if !seen.insert(entry.device_id.clone()) {
            log::warn!(
                "Duplicate camera id {} in configuration, keeping first entry",
                entry.device_id
            );
            continue;
        }
        if entry.functions.is_empty() {
            log::debug!("Camera {} has no assigned functions", entry.device_id);
        }
        kept.push(entry);
    }
    kept
}
