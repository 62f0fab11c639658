// SPDX-License-Identifier: MIT

//! Windows based errors.

use crate::platform::error::{PlatformError, Result};

/// Tags a `windows` crate failure with the call that produced it.
pub trait WinResultExt<T> {
    fn security(self, operation: &'static str) -> Result<T>;
    fn host_library(self, operation: &'static str) -> Result<T>;
}

impl<T> WinResultExt<T> for windows::core::Result<T> {
    fn security(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| PlatformError::security_object(operation, e))
    }

    fn host_library(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| PlatformError::host_library(operation, e))
    }
}
