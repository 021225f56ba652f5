//! Platform-backed enumeration
//!
//! With the `native` feature the platform camera stack (V4L2, AVFoundation,
//! Media Foundation via nokhwa) serves as the enumeration service.

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "native")]
pub use native::NativeEnumerator;

use crate::enumeration::{EnumeratorDirectory, DEFAULT_ENUMERATOR_SERVICE};

/// Directory with the platform enumerator registered under the default
/// service name. Empty when built without the `native` feature.
pub fn default_directory() -> EnumeratorDirectory {
    #[allow(unused_mut)]
    let mut directory = EnumeratorDirectory::new();
    #[cfg(feature = "native")]
    directory.register(
        DEFAULT_ENUMERATOR_SERVICE,
        std::sync::Arc::new(NativeEnumerator::new()),
    );
    #[cfg(not(feature = "native"))]
    log::debug!(
        "{} not available: built without the native feature",
        DEFAULT_ENUMERATOR_SERVICE
    );
    directory
}
