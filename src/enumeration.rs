//! Device enumeration seam
//!
//! The enumeration service is an external process reached by name. Here it is
//! a synchronous call returning the currently visible devices in the order
//! the service reports them.

use crate::errors::EnumerationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Well-known name of the camera enumeration service
pub const DEFAULT_ENUMERATOR_SERVICE: &str = "EvsEnumeratorV1_0";

/// A device currently visible to the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumeratedDevice {
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EnumeratedDevice {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl From<&str> for EnumeratedDevice {
    fn from(device_id: &str) -> Self {
        Self::new(device_id)
    }
}

impl From<String> for EnumeratedDevice {
    fn from(device_id: String) -> Self {
        Self::new(device_id)
    }
}

/// Source of the live device list
pub trait DeviceEnumerator: Send + Sync {
    /// Currently visible cameras, in service order
    fn camera_list(&self) -> Result<Vec<EnumeratedDevice>, EnumerationError>;
}

/// Enumerator over a fixed device list
#[derive(Debug, Clone, Default)]
pub struct StaticEnumerator {
    devices: Vec<EnumeratedDevice>,
}

impl StaticEnumerator {
    pub fn new<I, D>(devices: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<EnumeratedDevice>,
    {
        Self {
            devices: devices.into_iter().map(Into::into).collect(),
        }
    }
}

impl DeviceEnumerator for StaticEnumerator {
    fn camera_list(&self) -> Result<Vec<EnumeratedDevice>, EnumerationError> {
        Ok(self.devices.clone())
    }
}

/// Name-keyed lookup of enumeration services
#[derive(Clone, Default)]
pub struct EnumeratorDirectory {
    services: HashMap<String, Arc<dyn DeviceEnumerator>>,
}

impl EnumeratorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, enumerator: Arc<dyn DeviceEnumerator>) {
        let name = name.into();
        log::debug!("Registering enumeration service {}", name);
        self.services.insert(name, enumerator);
    }

    pub fn get_service(&self, name: &str) -> Result<Arc<dyn DeviceEnumerator>, EnumerationError> {
        self.services
            .get(name)
            .cloned()
            .ok_or_else(|| EnumerationError::ServiceUnavailable(name.to_string()))
    }

    pub fn service_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for EnumeratorDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumeratorDirectory")
            .field("services", &self.service_names())
            .finish()
    }
}
