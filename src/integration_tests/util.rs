//! Utility helpers for running the tests.

use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

#[cfg(unix)]
use crate::ProbeRunner;

/// Tests that spawn probes take this lock.  A probe file still open for
/// writing can leak into another test's fork and make the exec fail with
/// "text file busy".
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

pub fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A scratch directory under the build's target directory, where executing
/// files is allowed even when the system temp directory is mounted noexec.
pub fn scratch_dir() -> tempfile::TempDir {
    let mut base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    base.push("target");
    base.push("probe-tests");
    std::fs::create_dir_all(&base).unwrap();
    tempfile::Builder::new().prefix("run.").tempdir_in(&base).unwrap()
}

/// A probe stub that prints `output` and exits with `code`.
#[cfg(unix)]
pub fn script_probe(output: &str, code: i32, dir: &tempfile::TempDir) -> ProbeRunner {
    let script = format!("#!/bin/sh\nprintf '%s' '{output}'\nexit {code}\n");
    ProbeRunner::from_bytes(script.into_bytes()).extract_in(dir.path())
}

/// Count the entries left in a directory.
pub fn entries(dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}
