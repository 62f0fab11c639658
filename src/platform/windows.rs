// SPDX-License-Identifier: MIT

//! Window station, desktop and loader plumbing for Windows.
//!
//! Background on why judged programs get their own desktop:
//!   https://learn.microsoft.com/windows/win32/winstation/window-stations-and-desktops
//! The Chromium sandbox does the same for its renderer processes:
//!   https://github.com/chromium/chromium/blob/main/docs/design/sandbox.md

mod acl;
mod conv;
mod error;
pub(crate) mod loader;
pub(crate) mod station;
