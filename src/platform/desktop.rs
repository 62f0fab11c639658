// SPDX-License-Identifier: MIT

//! The isolated window station and desktop pair.

/// A raw window station or desktop handle.
///
/// This deliberately has no `Drop`.  The objects must outlive every sandboxed
/// child attached to them, so the handles stay open until the process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectHandle(usize);

impl ObjectHandle {
    pub const fn from_raw(raw: usize) -> Self {
        ObjectHandle(raw)
    }

    pub const fn as_raw(&self) -> usize {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// One window station plus the desktop created inside it.
///
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct IsolatedDesktop {
    window_station: ObjectHandle,
    desktop: ObjectHandle,
    name: String,
}

impl IsolatedDesktop {
    pub fn new(window_station: ObjectHandle, desktop: ObjectHandle, name: String) -> Self {
        IsolatedDesktop {
            window_station,
            desktop,
            name,
        }
    }

    pub fn window_station(&self) -> ObjectHandle {
        self.window_station
    }

    pub fn desktop(&self) -> ObjectHandle {
        self.desktop
    }

    /// Full `station\desktop` name, as passed in `STARTUPINFO.lpDesktop`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Object name derived from a thread id, such as `w4242`.
pub fn thread_object_name(prefix: &str, thread_id: u32) -> String {
    format!("{prefix}{thread_id}")
}

pub fn compose_desktop_name(station_name: &str, desktop_name: &str) -> String {
    format!("{station_name}\\{desktop_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_composition() {
        assert_eq!(compose_desktop_name("w12345", "c12345"), r"w12345\c12345");
    }

    #[test]
    fn thread_names() {
        assert_eq!(thread_object_name("w", 12345), "w12345");
        assert_eq!(thread_object_name("c", 0), "c0");
    }

    #[test]
    fn handles_are_plain_values() {
        let d = IsolatedDesktop::new(
            ObjectHandle::from_raw(0x10),
            ObjectHandle::from_raw(0x20),
            compose_desktop_name("w1", "c1"),
        );
        let copy = d.clone();
        assert_eq!(copy.window_station().as_raw(), 0x10);
        assert_eq!(copy.desktop().as_raw(), 0x20);
        assert_eq!(copy.name(), r"w1\c1");
        assert!(!d.desktop().is_null());
        assert!(ObjectHandle::default().is_null());
    }
}
