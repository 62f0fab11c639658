// SPDX-License-Identifier: MIT

//! Platform isolation resources shared by every sandboxed launch.
//!
//! `GlobalData` is created once when the service starts, optionally forcing
//! the isolated desktop and the `LoadLibraryW` addresses to be built right
//! away so configuration problems surface before any work is accepted.
//! After that, the `PlatformResources` accessors hand out the desktop name
//! and the addresses when a child process is being prepared.

pub mod desktop;
pub mod error;
pub mod global;
pub mod host;
pub mod options;
pub mod probe;

#[cfg(target_os = "windows")]
mod windows;

pub use desktop::{IsolatedDesktop, ObjectHandle};
pub use error::{PlatformError, ProbeError};
pub use global::{GlobalData, PlatformResources, ResourceFactory};
pub use host::HostFactory;
pub use options::GlobalDataOptions;
pub use probe::ProbeRunner;
