//! Product variable configuration propagation
//!
//! This crate lets a build graph conditionally inject compiler flags and
//! link dependencies into compiled targets from sparse, partially-specified
//! product configuration.
//!
//! # Overview
//!
//! The system is organized into a small pipeline of pure components:
//!
//! - [`schema`]: the closed set of feature groups and typed settings with
//!   declared defaults
//! - [`overrides`]: the sparse, serializable per-invocation override snapshot
//! - [`resolver`]: merges overrides onto defaults into a total configuration
//! - [`emitter`]: walks the resolved configuration into ordered flag and
//!   library build actions
//! - [`catalog`]: the built-in default product schema
//!
//! Data flows one way: sparse overrides -> [`Resolver`] -> resolved
//! configuration -> [`ActionEmitter`] -> ordered build actions consumed by
//! the module graph. Every step is strict about unknown keys and value
//! kinds, and every output is ordered by schema declaration, so equal
//! inputs produce byte-identical results across invocations and process
//! restarts.
//!
//! # Quick Start
//!
//! ```rust
//! use prodvar::{catalog, ActionEmitter, OverrideConfig, Resolver};
//!
//! let schema = catalog::default_schema();
//!
//! let overrides = OverrideConfig::builder()
//!     .string_list("vendor-init-lib", "whole-static-libs", &["libfoo", "libbar"])
//!     .boolean("prebuilt-dynamic-partitions", "cflags-enabled", true)
//!     .build();
//!
//! let resolved = Resolver::new(&schema).resolve(&overrides).unwrap();
//!
//! let emitter = ActionEmitter::new(&schema);
//! assert_eq!(
//!     emitter.emit_libraries(&resolved, "vendor-init-lib").unwrap(),
//!     vec!["libfoo", "libbar"]
//! );
//! assert_eq!(
//!     emitter.emit_flags(&resolved, "prebuilt-dynamic-partitions").unwrap(),
//!     vec!["-DPREBUILT_DYNAMIC_PARTITIONS"]
//! );
//! ```
//!
//! # Serialization
//!
//! Overrides and resolved configurations round-trip through JSON and TOML,
//! so one process can author or resolve configuration and another consume
//! it. The serialized form keeps "absent" and "explicitly empty" distinct:
//!
//! ```rust
//! use prodvar::OverrideConfig;
//!
//! let overrides = OverrideConfig::from_json(
//!     r#"{"vendor-init-lib": {"whole-static-libs": []}}"#,
//! ).unwrap();
//!
//! // The empty list is a present override, not an inherited default.
//! assert!(!overrides.is_empty());
//! ```

pub mod catalog;
pub mod emitter;
pub mod error;
pub mod overrides;
pub mod resolver;
pub mod schema;

pub use emitter::{ActionEmitter, BuildAction};
pub use error::{Error, Result};
pub use overrides::{OverrideConfig, OverrideConfigBuilder};
pub use resolver::{ResolvedConfig, Resolver};
pub use schema::{
    Channel, FeatureGroup, SchemaBuilder, Setting, SettingKind, SettingValue, VariableSchema,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ActionEmitter, BuildAction, Channel, Error, OverrideConfig, OverrideConfigBuilder,
        ResolvedConfig, Resolver, Result, Setting, SettingKind, SettingValue, VariableSchema,
    };
}
