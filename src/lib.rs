//! camrole: resolve logical camera roles to live device identifiers
//!
//! A static camera configuration assigns logical functions ("reverse",
//! "front", ...) to known device ids. At run time the enumeration service
//! reports which cameras are actually present. This crate reconciles the two
//! and answers "which camera serves this function right now".
//!
//! # Features
//! - Load-once capability registry from JSON or TOML camera configs
//! - First-match resolution over the live enumeration order
//! - Pluggable enumeration services, looked up by name
//! - Optional native enumeration through the platform camera stack (`native`)
//!
//! # Usage
//! ```rust
//! use camrole::{CapabilityRegistry, ConfigSource, EnumeratedDevice};
//!
//! let source = ConfigSource::Json(
//!     r#"{ "cameras": [ { "cameraId": "/dev/video10", "function": "reverse" } ] }"#.to_string(),
//! );
//! let registry = CapabilityRegistry::load(&source).expect("valid camera config");
//!
//! let live = vec![EnumeratedDevice::new("/dev/video2"), EnumeratedDevice::new("/dev/video10")];
//! let camera = camrole::resolve_device_for_function(&live, "reverse", &registry);
//! assert_eq!(camera, Some("/dev/video10"));
//! ```
pub mod config;
pub mod enumeration;
pub mod errors;
pub mod platform;
pub mod registry;
pub mod resolver;
pub mod support;

// Re-exports for convenience
pub use config::{CameraConfigFile, ConfigSource, DEFAULT_CONFIG_PATH};
pub use enumeration::{
    DeviceEnumerator, EnumeratedDevice, EnumeratorDirectory, StaticEnumerator,
    DEFAULT_ENUMERATOR_SERVICE,
};
pub use errors::{ConfigLoadError, EnumerationError};
pub use registry::{CapabilityRegistry, DeviceCapabilityEntry};
pub use resolver::{resolve_device_for_function, Resolver};
pub use support::{rear_camera_id, REVERSE_FUNCTION};

/// Initialize logging for the resolver
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "camrole=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
        native_enumeration: cfg!(feature = "native"),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub native_enumeration: bool,
}
