//! Built-in product variable catalog
//!
//! The default schema shipped with the crate: the feature groups a product
//! may toggle to inject flags and link dependencies into compiled targets.

use crate::schema::{Channel, VariableSchema};

/// Build the default product variable schema
///
/// Callers construct this once at startup and share it by reference with
/// [`crate::Resolver`] and [`crate::ActionEmitter`].
pub fn default_schema() -> VariableSchema {
    VariableSchema::builder()
        // Vendor init library linked whole into the init binary.
        .group("vendor-init-lib")
        .string_list("whole-static-libs", &[], Channel::Libraries)
        // Library shims preloaded for proprietary blobs.
        .group("shim-libs")
        .string_list("cppflags", &[], Channel::Flags)
        // Fingerprint-on-display support in surfaceflinger.
        .group("surfaceflinger-fod-lib")
        .string_list("cflags", &[], Channel::Flags)
        .string_list("whole-static-libs", &[], Channel::Libraries)
        // Devices shipping prebuilt dynamic partition images.
        .group("prebuilt-dynamic-partitions")
        .boolean(
            "cflags-enabled",
            false,
            Channel::Flags,
            &["-DPREBUILT_DYNAMIC_PARTITIONS"],
        )
        .build()
        .expect("builtin product schema is consistent")
}
