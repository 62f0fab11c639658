// SPDX-License-Identifier: MIT

//! Runs the bundled bitness probe.
//!
//! A 64-bit process cannot ask the loader where `LoadLibraryW` lives for a
//! 32-bit image.  Instead, a tiny 32-bit program is written to a temporary
//! file, executed, and its standard output is read back as the address.

use std::{
    borrow::Cow,
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, warn};

use super::error::ProbeError;

/// The probe executable, bundled by the build script.  Empty when the build
/// was not given one.
static BUNDLED_PROBE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/detect32.bin"));

#[cfg(target_os = "windows")]
const EXEC_SUFFIX: &str = ".exe";

#[cfg(not(target_os = "windows"))]
const EXEC_SUFFIX: &str = "";

/// Extracts a probe program to a temporary file and runs it.
#[derive(Debug, Clone)]
pub struct ProbeRunner {
    binary: Cow<'static, [u8]>,
    dir: Option<PathBuf>,
}

impl ProbeRunner {
    /// The probe bundled into this build.
    pub fn bundled() -> Self {
        ProbeRunner {
            binary: Cow::Borrowed(BUNDLED_PROBE),
            dir: None,
        }
    }

    /// Run an arbitrary program image instead of the bundled probe.
    pub fn from_bytes(binary: impl Into<Vec<u8>>) -> Self {
        ProbeRunner {
            binary: Cow::Owned(binary.into()),
            dir: None,
        }
    }

    /// Extract into `dir` rather than the system temporary directory.
    pub fn extract_in(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Extract, execute and parse.  The extracted file is removed before
    /// this returns, whatever the outcome.
    pub fn run(&self) -> Result<usize, ProbeError> {
        if self.binary.is_empty() {
            return Err(ProbeError::NotBundled);
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("detect32bit.").suffix(EXEC_SUFFIX);
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ProbeError::temp_file)?;
        file.write_all(&self.binary).map_err(ProbeError::temp_file)?;
        file.flush().map_err(ProbeError::temp_file)?;

        // Close the write handle, keeping only the path; dropping it deletes the file.
        let path = file.into_temp_path();
        make_executable(&path).map_err(ProbeError::temp_file)?;
        debug!("running bitness probe {}", path.display());

        let output = Command::new(&*path).output().map_err(ProbeError::launch)?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if let Err(e) = path.close() {
            warn!("could not remove the bitness probe: {}", e);
        }

        if !output.status.success() {
            return Err(ProbeError::Exit {
                status: output.status.to_string(),
                output: text,
            });
        }
        parse_probe_output(&text)
    }
}

impl Default for ProbeRunner {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Resolve the 32-bit `LoadLibraryW` address with the bundled probe.
pub fn resolve_32bit_load_library_address() -> Result<usize, ProbeError> {
    ProbeRunner::bundled().run()
}

/// Parse the probe's output as a base 10 address.
pub fn parse_probe_output(text: &str) -> Result<usize, ProbeError> {
    text.trim()
        .parse::<usize>()
        .map_err(|source| ProbeError::Parse {
            output: text.to_string(),
            source,
        })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
