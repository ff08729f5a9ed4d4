//! # cni-install-sync
//!
//! Installs binaries from a source directory into host target directories.
//!
//! Call [`copy_binaries`] with a [`SyncRequest`](cni_install_core::SyncRequest)
//! and an [`InstallLog`]; [`TracingLog`] forwards to the `log` facade.

pub mod binaries;
pub mod error;
pub mod fs_ops;
pub mod log;

pub use binaries::copy_binaries;
pub use error::SyncError;
pub use log::{InstallLog, TracingLog};
