// SPDX-License-Identifier: MIT

//! Native `LoadLibraryW` lookup.

use windows::{
    Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress},
    core::{s, w},
};

use super::error::WinResultExt;
use crate::platform::error::Result;

/// Address of `kernel32!LoadLibraryW` in this (64-bit) process.  kernel32 is
/// mapped at the same address in every process of a boot session, so this is
/// valid for 64-bit children too.
pub fn load_library_address() -> Result<usize> {
    let module = unsafe { GetModuleHandleW(w!("kernel32")) }.host_library("GetModuleHandleW")?;
    match unsafe { GetProcAddress(module, s!("LoadLibraryW")) } {
        Some(f) => Ok(f as usize),
        None => Err(windows::core::Error::from_thread()).host_library("GetProcAddress"),
    }
}
