// SPDX-License-Identifier: MIT

//! Grants access on window stations and desktops.
//!
//! Sandboxed children run with a restricted token, which no longer matches the
//! creator's entry in the default DACL.  Adding an entry for the world SID lets
//! them attach to the isolated desktop anyway.

use std::ptr;

use windows::{
    Win32::{
        Foundation::{HANDLE, HLOCAL, LocalFree},
        Security::{
            self, ACL, DACL_SECURITY_INFORMATION, NO_INHERITANCE, PSECURITY_DESCRIPTOR, PSID,
            Authorization::{
                EXPLICIT_ACCESS_W, GRANT_ACCESS, GetSecurityInfo, NO_MULTIPLE_TRUSTEE,
                SE_WINDOW_OBJECT, SetEntriesInAclW, SetSecurityInfo, TRUSTEE_IS_SID,
                TRUSTEE_IS_WELL_KNOWN_GROUP, TRUSTEE_W,
            },
        },
    },
    core::PWSTR,
};

const STANDARD_RIGHTS_REQUIRED: u32 = 0x000F_0000;

/// Every window station specific right, plus the standard ones.
pub const WINSTA_ALL_ACCESS: u32 = 0x0000_037F | STANDARD_RIGHTS_REQUIRED;

/// Every desktop specific right, plus the standard ones.
pub const DESKTOP_ALL_ACCESS: u32 = 0x0000_01FF | STANDARD_RIGHTS_REQUIRED;

/// A SID built in a buffer this struct owns.
pub struct WellKnownSid {
    buf: Vec<u8>,
}

impl WellKnownSid {
    /// `S-1-1-0`, the "Everyone" group.
    pub fn everyone() -> windows::core::Result<Self> {
        let mut buf = vec![0u8; Security::SECURITY_MAX_SID_SIZE as usize];
        let mut size = buf.len() as u32;
        unsafe {
            Security::CreateWellKnownSid(
                Security::WinWorldSid,
                None,
                Some(PSID(buf.as_mut_ptr() as _)),
                &mut size,
            )?;
        }
        buf.truncate(size as usize);
        Ok(WellKnownSid { buf })
    }

    fn psid(&self) -> PSID {
        PSID(self.buf.as_ptr() as *mut _)
    }
}

/// Add an access-allowed entry for `sid` to the DACL of a window station or
/// desktop handle, keeping the existing entries.
pub fn grant_access(handle: HANDLE, sid: &WellKnownSid, access: u32) -> windows::core::Result<()> {
    unsafe {
        let mut old_dacl: *mut ACL = ptr::null_mut();
        let mut sd = PSECURITY_DESCRIPTOR::default();
        GetSecurityInfo(
            handle,
            SE_WINDOW_OBJECT,
            DACL_SECURITY_INFORMATION,
            None,
            None,
            Some(&mut old_dacl),
            None,
            Some(&mut sd),
        )
        .ok()?;

        let entry = EXPLICIT_ACCESS_W {
            grfAccessPermissions: access,
            grfAccessMode: GRANT_ACCESS,
            grfInheritance: NO_INHERITANCE,
            Trustee: TRUSTEE_W {
                pMultipleTrustee: ptr::null_mut(),
                MultipleTrusteeOperation: NO_MULTIPLE_TRUSTEE,
                TrusteeForm: TRUSTEE_IS_SID,
                TrusteeType: TRUSTEE_IS_WELL_KNOWN_GROUP,
                ptstrName: PWSTR(sid.psid().0 as *mut u16),
            },
        };

        // The new ACL is a merged copy; old_dacl points into sd, so free sd only after.
        let mut new_dacl: *mut ACL = ptr::null_mut();
        let merged = SetEntriesInAclW(Some(&[entry]), Some(old_dacl), &mut new_dacl);
        if !sd.is_invalid() {
            let _ = LocalFree(Some(HLOCAL(sd.0)));
        }
        merged.ok()?;

        let set = SetSecurityInfo(
            handle,
            SE_WINDOW_OBJECT,
            DACL_SECURITY_INFORMATION,
            None,
            None,
            Some(new_dacl as *const ACL),
            None,
        );
        if !new_dacl.is_null() {
            let _ = LocalFree(Some(HLOCAL(new_dacl as *mut _)));
        }
        set.ok()
    }
}
