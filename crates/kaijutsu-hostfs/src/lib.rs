//! # kaijutsu-hostfs
//!
//! Exposes a host directory tree through the storage adapter interface.
//!
//! - [`HostFs`] - Handle bound to one base directory
//! - [`FsOps`] - Operations every adapter provides
//! - [`FsError`] - Closed error vocabulary shared across adapters
//! - [`HostFsConfig`] - RON-backed adapter configuration
//!
//! ## Design Decisions
//!
//! - **Stateless handle**: nothing is held open between calls; every
//!   operation opens, acts, and closes.
//! - **Lexical resolution**: paths are joined onto the base without
//!   sanitization, so `..` can leave the base.
//! - **One mapping point**: native errors become [`FsError`] at the syscall
//!   site and never escape unmapped.

mod config;
mod error;
mod host;
mod ops;
pub mod path;
mod remove;
mod types;

pub use config::{ConfigError, HostFsConfig};
pub use error::{FsError, FsResult};
pub use host::HostFs;
pub use ops::FsOps;
pub use types::Stat;
