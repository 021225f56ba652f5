//! One-call helpers for applications that only need a camera id.
//!
//! Each call loads the configuration, acquires the enumeration service,
//! lists cameras and resolves. Any failure along the way is logged and
//! yields `None`.

use crate::config::ConfigSource;
use crate::enumeration::{EnumeratorDirectory, DEFAULT_ENUMERATOR_SERVICE};
use crate::registry::CapabilityRegistry;
use crate::resolver::Resolver;

/// Function tag of the rear-view camera
pub const REVERSE_FUNCTION: &str = "reverse";

/// Camera serving the reverse function. The first one wins if several do.
pub fn rear_camera_id(config: &ConfigSource, directory: &EnumeratorDirectory) -> Option<String> {
    camera_id_for_function(config, directory, DEFAULT_ENUMERATOR_SERVICE, REVERSE_FUNCTION)
}

pub fn camera_id_for_function(
    config: &ConfigSource,
    directory: &EnumeratorDirectory,
    service_name: &str,
    function: &str,
) -> Option<String> {
    let registry = match CapabilityRegistry::load(config) {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("Missing or improper camera configuration: {}", e);
            return None;
        }
    };

    log::info!("Acquiring enumeration service {}", service_name);
    let enumerator = match directory.get_service(service_name) {
        Ok(enumerator) => enumerator,
        Err(e) => {
            log::error!("{}", e);
            return None;
        }
    };

    log::debug!("Requesting camera list");
    Resolver::new(&registry).resolve_from(enumerator.as_ref(), function)
}
