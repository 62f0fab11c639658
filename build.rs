// SPDX-License-Identifier: MIT

//! Bundles the 32-bit entry point probe into the library.
//!
//! The probe is built separately (see `probe-bin/detect32`) for the
//! `i686-pc-windows-msvc` target, and its path is handed to this build through
//! the `DESKTOP_JAIL_PROBE_EXE` environment variable.  Without it, an empty
//! placeholder is bundled and the runtime reports the probe as not bundled.

use std::{env, fs, path::PathBuf};

const PROBE_ENV: &str = "DESKTOP_JAIL_PROBE_EXE";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={PROBE_ENV}");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo always sets OUT_DIR"));
    let dest = out_dir.join("detect32.bin");

    match env::var_os(PROBE_ENV) {
        Some(src) => {
            let src = PathBuf::from(src);
            println!("cargo:rerun-if-changed={}", src.display());
            fs::copy(&src, &dest).unwrap_or_else(|e| {
                panic!("could not bundle probe {}: {}", src.display(), e)
            });
        }
        None => {
            let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
            if target_os == "windows" {
                println!(
                    "cargo:warning={PROBE_ENV} is not set; 32-bit LoadLibraryW resolution will be unavailable"
                );
            }
            fs::write(&dest, []).expect("could not write the probe placeholder");
        }
    }
}
