// SPDX-License-Identifier: MIT

//! The factory backed by the host operating system.

use super::{
    desktop::IsolatedDesktop,
    error::Result,
    global::ResourceFactory,
    probe::ProbeRunner,
};

#[cfg(not(target_os = "windows"))]
use super::error::PlatformError;

/// Creates resources with the real OS facilities.
#[derive(Debug, Clone, Default)]
pub struct HostFactory {
    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    probe: ProbeRunner,
}

impl HostFactory {
    /// Use a different probe than the one bundled into this build.
    pub fn with_probe(probe: ProbeRunner) -> Self {
        HostFactory { probe }
    }
}

#[cfg(target_os = "windows")]
impl ResourceFactory for HostFactory {
    fn create_desktop(&self) -> Result<IsolatedDesktop> {
        super::windows::station::create_isolated_desktop()
    }

    fn load_library_address_64(&self) -> Result<usize> {
        super::windows::loader::load_library_address()
    }

    fn load_library_address_32(&self) -> Result<usize> {
        Ok(self.probe.run()?)
    }
}

#[cfg(not(target_os = "windows"))]
impl ResourceFactory for HostFactory {
    fn create_desktop(&self) -> Result<IsolatedDesktop> {
        Err(PlatformError::Unsupported("isolated desktop"))
    }

    fn load_library_address_64(&self) -> Result<usize> {
        Err(PlatformError::Unsupported("LoadLibraryW resolution"))
    }

    fn load_library_address_32(&self) -> Result<usize> {
        Err(PlatformError::Unsupported("32-bit LoadLibraryW resolution"))
    }
}
