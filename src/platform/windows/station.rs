// SPDX-License-Identifier: MIT

//! Creates the isolated window station and desktop.
//!
//! A desktop can only be created inside the calling process's current window
//! station, so creation temporarily switches the process over to the new
//! station and switches it back afterwards.

use std::{
    ffi::{OsStr, c_void},
    mem,
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::{debug, error};
use windows::{
    Win32::{
        Foundation::{ERROR_INSUFFICIENT_BUFFER, GENERIC_ALL, HANDLE},
        Security::SECURITY_ATTRIBUTES,
        System::{
            StationsAndDesktops::{
                CloseWindowStation, CreateDesktopW, CreateWindowStationW, DESKTOP_CONTROL_FLAGS,
                GetProcessWindowStation, GetThreadDesktop, GetUserObjectInformationW, HDESK,
                HWINSTA, SetProcessWindowStation, SetThreadDesktop, UOI_NAME,
            },
            SystemServices::MAXIMUM_ALLOWED,
            Threading::GetCurrentThreadId,
        },
    },
    core::{BOOL, PCWSTR},
};

use super::{
    acl::{self, DESKTOP_ALL_ACCESS, WINSTA_ALL_ACCESS, WellKnownSid},
    conv::{as_c_str_w, from_wide_buf},
    error::WinResultExt,
};
use crate::platform::{
    desktop::{IsolatedDesktop, ObjectHandle, compose_desktop_name, thread_object_name},
    error::Result,
};

/// Serializes every temporary switch of the process window station.
static STATION_SWITCH: Mutex<()> = Mutex::new(());

/// Holds the station switch lock and restores the original window station
/// and thread desktop when released, on every exit path.
struct StationSwitch {
    original_station: HWINSTA,
    original_desktop: HDESK,
    _binding: MutexGuard<'static, ()>,
}

impl StationSwitch {
    fn bind(thread_id: u32) -> Result<Self> {
        // The lock guards no data, so a panic elsewhere does not invalidate it.
        // Both originals are read under the lock, so another thread's temporary
        // station is never mistaken for the real one.
        let binding = STATION_SWITCH
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let original_station =
            unsafe { GetProcessWindowStation() }.security("GetProcessWindowStation")?;
        let original_desktop = unsafe { GetThreadDesktop(thread_id) }.security("GetThreadDesktop")?;
        Ok(StationSwitch {
            original_station,
            original_desktop,
            _binding: binding,
        })
    }

    fn activate(&self, station: HWINSTA) -> Result<()> {
        unsafe { SetProcessWindowStation(station) }.security("SetProcessWindowStation")
    }
}

impl Drop for StationSwitch {
    fn drop(&mut self) {
        unsafe {
            if let Err(e) = SetProcessWindowStation(self.original_station) {
                error!("could not restore the process window station: {:?}", e);
            }
            if let Err(e) = SetThreadDesktop(self.original_desktop) {
                error!("could not restore the thread desktop: {:?}", e);
            }
        }
    }
}

/// Security attributes whose handle is inheritable, with the default DACL.
fn inherit_sa() -> SECURITY_ATTRIBUTES {
    SECURITY_ATTRIBUTES {
        nLength: mem::size_of::<SECURITY_ATTRIBUTES>() as u32,
        lpSecurityDescriptor: std::ptr::null_mut(),
        bInheritHandle: BOOL::from(true),
    }
}

/// Create the window station and desktop pair used by sandboxed children.
pub fn create_isolated_desktop() -> Result<IsolatedDesktop> {
    let thread_id = unsafe { GetCurrentThreadId() };

    let switch = StationSwitch::bind(thread_id)?;
    let sa = inherit_sa();
    let station_name = as_c_str_w(OsStr::new(&thread_object_name("w", thread_id)));
    let station = unsafe {
        CreateWindowStationW(PCWSTR(station_name.as_ptr()), 0, MAXIMUM_ALLOWED, Some(&sa))
    }
    .security("CreateWindowStationW")?;

    let populated = populate_station(&switch, station, thread_id, &sa);
    drop(switch);

    let (desktop, name) = match populated {
        Ok(v) => v,
        Err(e) => {
            // The original station is current again, so this one can be closed.
            if let Err(close_err) = unsafe { CloseWindowStation(station) } {
                error!("could not close the abandoned window station: {:?}", close_err);
            }
            return Err(e);
        }
    };
    debug!("created isolated desktop {}", name);

    grant_everyone(station, desktop);

    Ok(IsolatedDesktop::new(
        ObjectHandle::from_raw(station.0 as usize),
        ObjectHandle::from_raw(desktop.0 as usize),
        name,
    ))
}

/// With `station` made current, create the desktop and compose its full name.
fn populate_station(
    switch: &StationSwitch,
    station: HWINSTA,
    thread_id: u32,
    sa: &SECURITY_ATTRIBUTES,
) -> Result<(HDESK, String)> {
    switch.activate(station)?;
    let station_name = object_name(HANDLE(station.0))?;

    let short_name = thread_object_name("c", thread_id);
    let desktop_name = as_c_str_w(OsStr::new(&short_name));
    let desktop = unsafe {
        CreateDesktopW(
            PCWSTR(desktop_name.as_ptr()),
            PCWSTR::null(),
            None,
            DESKTOP_CONTROL_FLAGS(0),
            GENERIC_ALL.0,
            Some(sa),
        )
    }
    .security("CreateDesktopW")?;

    Ok((desktop, compose_desktop_name(&station_name, &short_name)))
}

/// The object name of a window station or desktop.
fn object_name(handle: HANDLE) -> Result<String> {
    let mut needed: u32 = 0;
    // First call: get the expected size.
    match unsafe { GetUserObjectInformationW(handle, UOI_NAME, None, 0, Some(&mut needed)) } {
        Ok(()) => return Ok(String::new()),
        Err(e) => {
            if e.code() != ERROR_INSUFFICIENT_BUFFER.to_hresult() {
                return Err(e).security("GetUserObjectInformationW");
            }
        }
    }

    let mut buf = vec![0u16; (needed as usize).div_ceil(2)];
    unsafe {
        GetUserObjectInformationW(
            handle,
            UOI_NAME,
            Some(buf.as_mut_ptr() as *mut c_void),
            (buf.len() * 2) as u32,
            Some(&mut needed),
        )
    }
    .security("GetUserObjectInformationW")?;
    Ok(from_wide_buf(&buf))
}

/// Let restricted-token children attach.  Failures are logged only: the
/// objects still work for children running as the same user.
fn grant_everyone(station: HWINSTA, desktop: HDESK) {
    let everyone = match WellKnownSid::everyone() {
        Ok(sid) => sid,
        Err(e) => {
            error!("CreateWellKnownSid failed: {:?}", e);
            return;
        }
    };
    if let Err(e) = acl::grant_access(HANDLE(station.0), &everyone, WINSTA_ALL_ACCESS) {
        error!("could not grant Everyone access to the window station: {:?}", e);
    }
    if let Err(e) = acl::grant_access(HANDLE(desktop.0), &everyone, DESKTOP_ALL_ACCESS) {
        error!("could not grant Everyone access to the desktop: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    /// Concurrent creations must all leave the process on its original station.
    #[test]
    fn concurrent_creation_restores_original_station() {
        let original = unsafe { GetProcessWindowStation() }.unwrap();

        let names: Vec<String> = thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| create_isolated_desktop().unwrap().name().to_string()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(unsafe { GetProcessWindowStation() }.unwrap().0, original.0);
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len(), "desktop names collided: {:?}", names);
    }
}
