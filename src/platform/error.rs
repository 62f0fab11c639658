// SPDX-License-Identifier: MIT

//! Common error type.
//!
//! Every variant is cheap to clone, because a failed resource slot hands the
//! same error to every later caller.

use std::{io, num::ParseIntError, sync::Arc};

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    /// An accessor was called without a constructed `GlobalData`.
    #[error("no global data")]
    NoGlobalData,

    /// The resource does not exist on this operating system.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// Creating, switching or securing a window station or desktop failed.
    #[error("{operation} failed: {source}")]
    SecurityObject {
        operation: &'static str,
        #[source]
        source: Arc<io::Error>,
    },

    /// The host's system library or its loader entry point could not be found.
    #[error("{operation} failed: {source}")]
    HostLibrary {
        operation: &'static str,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("bitness probe: {0}")]
    Probe(#[from] ProbeError),

    #[error("global data lock poisoned")]
    LockPoisoned,
}

impl PlatformError {
    pub fn security_object(operation: &'static str, source: impl Into<io::Error>) -> Self {
        PlatformError::SecurityObject {
            operation,
            source: Arc::new(source.into()),
        }
    }

    pub fn host_library(operation: &'static str, source: impl Into<io::Error>) -> Self {
        PlatformError::HostLibrary {
            operation,
            source: Arc::new(source.into()),
        }
    }
}

/// Failures of the bitness probe runner.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("probe executable was not bundled into this build")]
    NotBundled,

    #[error("could not extract the probe: {0}")]
    TempFile(#[source] Arc<io::Error>),

    #[error("could not run the probe: {0}")]
    Launch(#[source] Arc<io::Error>),

    #[error("probe exited with {status}: {output:?}")]
    Exit { status: String, output: String },

    #[error("probe output {output:?} is not an address: {source}")]
    Parse {
        output: String,
        #[source]
        source: ParseIntError,
    },
}

impl ProbeError {
    pub(crate) fn temp_file(e: io::Error) -> Self {
        ProbeError::TempFile(Arc::new(e))
    }

    pub(crate) fn launch(e: io::Error) -> Self {
        ProbeError::Launch(Arc::new(e))
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
