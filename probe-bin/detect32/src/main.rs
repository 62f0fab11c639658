// SPDX-License-Identifier: MIT

//! Reports the address of `kernel32!LoadLibraryW` as seen by this process.
//!
//! Built for `i686-pc-windows-msvc` and bundled into `desktop-jail`, which
//! runs it to learn the entry point that 32-bit children will see.
//! The only output is the address in base 10.

#[cfg(windows)]
fn main() {
    use std::process::exit;
    use windows_sys::Win32::System::LibraryLoader::{GetModuleHandleA, GetProcAddress};

    let kernel32 = unsafe { GetModuleHandleA(c"kernel32".as_ptr().cast()) };
    if kernel32.is_null() {
        eprintln!("kernel32 not loaded");
        exit(2);
    }
    match unsafe { GetProcAddress(kernel32, c"LoadLibraryW".as_ptr().cast()) } {
        Some(f) => print!("{}", f as usize),
        None => {
            eprintln!("LoadLibraryW not found");
            exit(3);
        }
    }
}

#[cfg(not(windows))]
fn main() {
    eprintln!("detect32 only runs on Windows");
    std::process::exit(1);
}
