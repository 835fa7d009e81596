//! Confsync - single-writer, file-backed configuration store.
//!
//! Keeps an in-memory configuration synchronized with one file:
//!
//! - Change detection from file size and modification time
//! - Optimistic versioning that rejects diverging files and writes memory back
//! - No-op suppression for saves that do not change content
//! - Optional AES-OFB obfuscation of the file at rest
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use confsync::{Document, Manager};
//!
//! let mut manager: Manager<Document> =
//!     Manager::new("/tmp/app.toml").with_obfuscation_key("0123456789abcdef");
//!
//! let mut config = manager.init()?;
//! config.set_by_path("server.port", toml::Value::Integer(8080))?;
//! manager.save(config)?;
//!
//! // Poll from your own timer:
//! if manager.reload()? {
//!     println!("Config changed on disk: {:?}", manager.current()?);
//! }
//! # Ok::<(), confsync::ConfigError>(())
//! ```

/// Configuration value contract, serializers, and schema-less documents.
pub mod config;

/// File synchronization, change detection and optimistic versioning.
pub mod config_store;

/// Optional obfuscation of configuration bytes at rest.
pub mod obfuscation;

/// Command-line interface for inspecting and editing store files.
pub mod cli;

/// Logging setup for the command-line tool.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use config::{Document, JsonSerializer, Serializer, TomlSerializer, VersionedConfig};
pub use config_store::{ConfigError, Manager};
pub use obfuscation::{ObfuscationKey, Transform};
