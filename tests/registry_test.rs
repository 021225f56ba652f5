//! Tests for loading the capability registry from on-disk configs
//!
//! Covers both config formats, source-order fidelity, and the
//! all-or-nothing load contract.

use camrole::config::{CameraConfigFile, CameraPlacement, CameraRecord, FunctionTags};
use camrole::{CapabilityRegistry, ConfigLoadError, ConfigSource};
use std::fs;
use tempfile::tempdir;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_entries_follow_source_order() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "camera_config.json",
            r#"{
                "cameras": [
                    { "cameraId": "/dev/video3", "function": "left" },
                    { "cameraId": "/dev/video1", "function": "reverse,park" },
                    { "cameraId": "/dev/video2", "functions": ["front", "surround"] }
                ]
            }"#,
        );

        let mut registry = CapabilityRegistry::new();
        assert!(registry.initialize(&ConfigSource::path(&path)).is_ok());
        assert!(registry.is_initialized());

        let ids: Vec<&str> = registry.entries().iter().map(|e| e.device_id.as_str()).collect();
        assert_eq!(ids, vec!["/dev/video3", "/dev/video1", "/dev/video2"]);
        assert_eq!(registry.entries()[1].functions, vec!["reverse,park".to_string()]);
        assert_eq!(
            registry.entries()[2].functions,
            vec!["front".to_string(), "surround".to_string()]
        );
    }

    #[test]
    fn test_toml_config() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "cameras.toml",
            r#"
            [[cameras]]
            deviceId = "rear"
            function = "reverse"

            [[cameras]]
            deviceId = "nose"
            function = ["front", "parking"]
            "#,
        );

        let registry = CapabilityRegistry::load(&ConfigSource::path(&path)).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.find("nose").unwrap().serves("parking"));
    }

    #[test]
    fn test_empty_camera_list_is_valid() {
        let registry =
            CapabilityRegistry::load(&ConfigSource::Json(r#"{ "cameras": [] }"#.to_string())).unwrap();
        assert!(registry.is_initialized());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let mut registry = CapabilityRegistry::new();
        let result = registry.initialize(&ConfigSource::path(dir.path().join("absent.json")));
        assert!(matches!(result, Err(ConfigLoadError::NotFound(_))));
        assert!(registry.is_empty());
        assert!(!registry.is_initialized());
    }

    #[test]
    fn test_unreadable_source() {
        // A directory exists but cannot be read as a file
        let dir = tempdir().unwrap();
        let result = CapabilityRegistry::load(&ConfigSource::path(dir.path()));
        assert!(matches!(result, Err(ConfigLoadError::Read { .. })));
    }

    #[test]
    fn test_structurally_invalid_record() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "camera_config.json",
            r#"{ "cameras": [ { "cameraId": "a", "function": "reverse" }, { "hfov": 90.0 } ] }"#,
        );
        let mut registry = CapabilityRegistry::new();
        match registry.initialize(&ConfigSource::path(&path)) {
            Err(ConfigLoadError::Invalid { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected invalid record error, got {:?}", other),
        }
        assert!(registry.entries().is_empty());
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let registry = CapabilityRegistry::load(&ConfigSource::Json(
            r#"{ "cameras": [
                { "cameraId": "a", "function": "front" },
                { "cameraId": "a", "function": "reverse" }
            ] }"#
                .to_string(),
        ))
        .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.find("a").unwrap().serves("front"));
        assert!(!registry.find("a").unwrap().serves("reverse"));
    }

    #[test]
    fn test_blank_function_never_matches() {
        let registry = CapabilityRegistry::load(&ConfigSource::Json(
            r#"{ "cameras": [ { "cameraId": "a", "function": "" } ] }"#.to_string(),
        ))
        .unwrap();
        let entry = registry.find("a").unwrap();
        assert!(entry.functions.is_empty());
        assert!(!entry.serves(""));
    }
}

#[cfg(test)]
mod round_trip_tests {
    use super::*;

    #[test]
    fn test_saved_config_reloads_into_same_registry() {
        let file = CameraConfigFile {
            cameras: vec![
                CameraRecord {
                    device_id: Some("/dev/video10".to_string()),
                    function: Some(FunctionTags::One("reverse".to_string())),
                    placement: CameraPlacement {
                        yaw: Some(180.0),
                        hfov: Some(125.0),
                        hflip: Some(true),
                        ..CameraPlacement::default()
                    },
                },
                CameraRecord {
                    device_id: Some("/dev/video11".to_string()),
                    function: Some(FunctionTags::Many(vec!["front".to_string()])),
                    placement: CameraPlacement::default(),
                },
            ],
        };

        let dir = tempdir().unwrap();
        for name in ["saved.json", "saved.toml"] {
            let path = dir.path().join(name);
            file.save_to_file(&path).unwrap();

            let registry = CapabilityRegistry::load(&ConfigSource::path(&path)).unwrap();
            assert_eq!(registry.len(), 2);
            let rear = &registry.entries()[0];
            assert_eq!(rear.device_id, "/dev/video10");
            assert_eq!(rear.placement.as_ref().unwrap().hflip, Some(true));
            assert!(registry.entries()[1].placement.is_none());
        }
    }
}
