//! Resolution of a logical function to a live device
//!
//! Walks the enumerated devices in the order the enumeration service
//! reported them and returns the first one whose configured functions
//! contain the requested tag. Registry order never decides the winner.

use crate::enumeration::{DeviceEnumerator, EnumeratedDevice};
use crate::registry::CapabilityRegistry;

/// Id of the first enumerated device configured to serve `target_function`.
///
/// Enumerated devices without a registry entry are skipped. Returns `None`
/// when nothing qualifies, including for an empty list or an empty registry.
pub fn resolve_device_for_function<'d>(
    enumerated_devices: &'d [EnumeratedDevice],
    target_function: &str,
    registry: &CapabilityRegistry,
) -> Option<&'d str> {
    for device in enumerated_devices {
        log::debug!("Found camera {}", device.device_id);

        let Some(entry) = registry.find(&device.device_id) else {
            continue;
        };

        if entry.serves(target_function) {
            log::debug!(
                "Camera {} is matched with {} function",
                device.device_id,
                target_function
            );
            return Some(device.device_id.as_str());
        }
    }
    None
}

/// Borrowed view over a registry for repeated lookups
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r CapabilityRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r CapabilityRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r CapabilityRegistry {
        self.registry
    }

    pub fn resolve<'d>(&self, devices: &'d [EnumeratedDevice], function: &str) -> Option<&'d str> {
        resolve_device_for_function(devices, function, self.registry)
    }

    /// Ask `enumerator` for the live list and resolve against it.
    ///
    /// An enumeration failure is handled like an empty list.
    pub fn resolve_from(&self, enumerator: &dyn DeviceEnumerator, function: &str) -> Option<String> {
        let devices = live_devices(enumerator);
        self.resolve(&devices, function).map(str::to_string)
    }

    /// [`candidates`](Self::candidates) over a fresh list from `enumerator`,
    /// with the same failure handling as [`resolve_from`](Self::resolve_from)
    pub fn candidates_from(&self, enumerator: &dyn DeviceEnumerator, function: &str) -> Vec<String> {
        let devices = live_devices(enumerator);
        self.candidates(&devices, function)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Every enumerated device that would qualify, in enumeration order
    pub fn candidates<'d>(&self, devices: &'d [EnumeratedDevice], function: &str) -> Vec<&'d str> {
        devices
            .iter()
            .filter(|device| {
                self.registry
                    .find(&device.device_id)
                    .is_some_and(|entry| entry.serves(function))
            })
            .map(|device| device.device_id.as_str())
            .collect()
    }
}

fn live_devices(enumerator: &dyn DeviceEnumerator) -> Vec<EnumeratedDevice> {
    let devices = match enumerator.camera_list() {
        Ok(devices) => devices,
        Err(e) => {
            log::warn!("Camera enumeration failed: {}", e);
            Vec::new()
        }
    };
    log::info!("Camera list received {} cameras", devices.len());
    devices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::StaticEnumerator;
    use crate::errors::EnumerationError;
    use crate::registry::DeviceCapabilityEntry;

    fn devices(ids: &[&str]) -> Vec<EnumeratedDevice> {
        ids.iter().copied().map(EnumeratedDevice::from).collect()
    }

    fn registry() -> CapabilityRegistry {
        CapabilityRegistry::from_entries([
            DeviceCapabilityEntry::new("A", ["parking", "reverse"]),
            DeviceCapabilityEntry::new("B", ["front"]),
        ])
    }

    #[test]
    fn test_enumeration_order_picks_only_qualifier() {
        let registry = registry();
        let list = devices(&["B", "A"]);
        assert_eq!(resolve_device_for_function(&list, "reverse", &registry), Some("A"));
    }

    #[test]
    fn test_first_match_over_specificity() {
        let registry = CapabilityRegistry::from_entries([
            DeviceCapabilityEntry::new("A", ["reverse-assist"]),
            DeviceCapabilityEntry::new("C", ["reverse"]),
        ]);
        assert_eq!(
            resolve_device_for_function(&devices(&["A", "C"]), "reverse", &registry),
            Some("A")
        );
        assert_eq!(
            resolve_device_for_function(&devices(&["C", "A"]), "reverse", &registry),
            Some("C")
        );
    }

    #[test]
    fn test_unconfigured_devices_are_skipped() {
        let registry = registry();
        let list = devices(&["X", "Y", "A"]);
        assert_eq!(resolve_device_for_function(&list, "parking", &registry), Some("A"));
    }

    #[test]
    fn test_no_match_is_none() {
        let registry = registry();
        assert_eq!(resolve_device_for_function(&devices(&["A", "B"]), "left", &registry), None);
        assert_eq!(resolve_device_for_function(&[], "reverse", &registry), None);
        assert_eq!(
            resolve_device_for_function(&devices(&["A"]), "reverse", &CapabilityRegistry::new()),
            None
        );
    }

    #[test]
    fn test_candidates_lists_all_in_enumeration_order() {
        let registry = CapabilityRegistry::from_entries([
            DeviceCapabilityEntry::new("A", ["reverse-assist"]),
            DeviceCapabilityEntry::new("C", ["reverse"]),
            DeviceCapabilityEntry::new("D", ["front"]),
        ]);
        let resolver = Resolver::new(&registry);
        let list = devices(&["D", "C", "Z", "A"]);
        assert_eq!(resolver.candidates(&list, "reverse"), vec!["C", "A"]);
        assert_eq!(resolver.resolve(&list, "reverse"), Some("C"));
    }

    struct Failing;

    impl DeviceEnumerator for Failing {
        fn camera_list(&self) -> Result<Vec<EnumeratedDevice>, EnumerationError> {
            Err(EnumerationError::ServiceUnavailable("EvsEnumeratorV1_0".to_string()))
        }
    }

    #[test]
    fn test_resolve_from_enumerator() {
        let registry = registry();
        let resolver = Resolver::new(&registry);

        let enumerator = StaticEnumerator::new(["B", "A"]);
        assert_eq!(resolver.resolve_from(&enumerator, "reverse"), Some("A".to_string()));
        assert_eq!(resolver.resolve_from(&Failing, "reverse"), None);
    }

    #[test]
    fn test_candidates_from_enumerator_failure_is_empty() {
        let registry = registry();
        let resolver = Resolver::new(&registry);

        let enumerator = StaticEnumerator::new(["A", "B"]);
        assert_eq!(resolver.candidates_from(&enumerator, "parking"), vec!["A".to_string()]);
        assert!(resolver.candidates_from(&Failing, "parking").is_empty());
    }

    #[test]
    fn test_empty_target_matches_first_tagged_device() {
        let registry = CapabilityRegistry::from_entries([
            DeviceCapabilityEntry::new("untagged", Vec::<String>::new()),
            DeviceCapabilityEntry::new("A", ["parking"]),
            DeviceCapabilityEntry::new("B", ["front"]),
        ]);
        let list = devices(&["X", "untagged", "B", "A"]);
        assert_eq!(resolve_device_for_function(&list, "", &registry), Some("B"));
        assert_eq!(resolve_device_for_function(&devices(&["untagged"]), "", &registry), None);
    }
}
