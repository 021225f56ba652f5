use crate::enumeration::{DeviceEnumerator, EnumeratedDevice};
use crate::errors::EnumerationError;
use nokhwa::utils::ApiBackend;

/// Lists cameras through nokhwa's platform backend.
///
/// Device ids are the backend camera index rendered as a string, so config
/// entries for this enumerator use ids like `"0"`.
#[derive(Debug, Clone)]
pub struct NativeEnumerator {
    backend: ApiBackend,
}

impl NativeEnumerator {
    pub fn new() -> Self {
        Self {
            backend: ApiBackend::Auto,
        }
    }
}

impl Default for NativeEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceEnumerator for NativeEnumerator {
    fn camera_list(&self) -> Result<Vec<EnumeratedDevice>, EnumerationError> {
        let cameras = nokhwa::query(self.backend.clone())
            .map_err(|e| EnumerationError::Backend(format!("Failed to query cameras: {}", e)))?;

        Ok(cameras
            .into_iter()
            .map(|info| EnumeratedDevice::new(info.index().to_string()).with_name(info.human_name()))
            .collect())
    }
}
