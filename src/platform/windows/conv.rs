// SPDX-License-Identifier: MIT

//! Various type conversion routines.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;

/// Convert the OS string into a null-terminated wide (16-bit) C string.
pub fn as_c_str_w(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

/// Read a wide string out of a buffer, stopping at the first null.
pub fn from_wide_buf(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}
