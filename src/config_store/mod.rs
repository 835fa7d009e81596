//! File-backed configuration store with change detection and optimistic versioning.
//!
//! A [`Manager`] owns one configuration value and the file it is persisted to.
//! `reload` adopts external edits when the file's size or modification time
//! moves, and rejects files whose version diverged from memory by writing the
//! in-memory value back. `save` writes only real content changes and bumps the
//! version by one.

mod arbiter;
mod disk;
mod error;
mod manager;
mod observer;
mod snapshot;


pub use error::ConfigError;
pub use manager::Manager;
pub use observer::{SyncEvent, SyncObserver, TracingObserver};
pub use snapshot::FileSnapshot;
