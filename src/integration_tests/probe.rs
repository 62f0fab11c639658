//! The probe runner against stub programs.

use crate::{ProbeError, ProbeRunner};

use super::util;

#[cfg(unix)]
#[test]
fn reads_address_from_stdout() {
    let _lock = util::spawn_lock();
    let dir = util::scratch_dir();
    let probe = util::script_probe("1234567\n", 0, &dir);
    assert_eq!(probe.run().unwrap(), 1234567);
    assert_eq!(util::entries(&dir), 0, "probe file was left behind");
}

#[cfg(unix)]
#[test]
fn non_numeric_output_is_a_parse_error() {
    let _lock = util::spawn_lock();
    let dir = util::scratch_dir();
    let probe = util::script_probe("not-a-number", 0, &dir);
    match probe.run() {
        Err(ProbeError::Parse { output, .. }) => assert_eq!(output, "not-a-number"),
        other => panic!("expected a parse error, got {:?}", other),
    }
    assert_eq!(util::entries(&dir), 0, "probe file was left behind");
}

#[cfg(unix)]
#[test]
fn failing_probe_reports_exit_and_output() {
    let _lock = util::spawn_lock();
    let dir = util::scratch_dir();
    let probe = util::script_probe("kernel32 not loaded", 3, &dir);
    match probe.run() {
        Err(ProbeError::Exit { output, .. }) => assert_eq!(output, "kernel32 not loaded"),
        other => panic!("expected an exit error, got {:?}", other),
    }
    assert_eq!(util::entries(&dir), 0, "probe file was left behind");
}

#[cfg(unix)]
#[test]
fn stderr_is_part_of_the_output() {
    let _lock = util::spawn_lock();
    let dir = util::scratch_dir();
    let script = "#!/bin/sh\nprintf '42' >&2\n";
    let probe = ProbeRunner::from_bytes(script).extract_in(dir.path());
    assert_eq!(probe.run().unwrap(), 42);
}

/// Depending on the OS this fails to launch, exits non-zero, or prints nothing.
#[test]
fn garbage_image_fails() {
    let _lock = util::spawn_lock();
    let dir = util::scratch_dir();
    let probe = ProbeRunner::from_bytes(vec![0u8; 64]).extract_in(dir.path());
    assert!(probe.run().is_err());
    assert_eq!(util::entries(&dir), 0, "probe file was left behind");
}

#[test]
fn missing_extract_dir_is_a_temp_file_error() {
    let dir = util::scratch_dir();
    let probe = ProbeRunner::from_bytes("#!/bin/sh\n").extract_in(dir.path().join("missing"));
    assert!(matches!(probe.run(), Err(ProbeError::TempFile(_))));
}
