// SPDX-License-Identifier: MIT

//! Process-wide, lazily resolved sandbox resources.
//!
//! Each resource lives in its own slot, but all slots share one lock.  A slot
//! is resolved at most once: the first outcome, success or failure, is what
//! every later caller sees.  A failed slot is never retried; construct a new
//! `GlobalData` if a retry is really wanted.

use std::sync::{Arc, Mutex};

use log::{debug, warn};

use super::{
    desktop::IsolatedDesktop,
    error::{PlatformError, Result},
    host::HostFactory,
    options::GlobalDataOptions,
};

/// Creates the resources that `GlobalData` caches.
pub trait ResourceFactory: Send + Sync {
    fn create_desktop(&self) -> Result<IsolatedDesktop>;

    /// Address of `LoadLibraryW` for 64-bit (native) children.
    fn load_library_address_64(&self) -> Result<usize>;

    /// Address of `LoadLibraryW` for 32-bit children.
    fn load_library_address_32(&self) -> Result<usize>;
}

/// The read side used when preparing a sandboxed child.
pub trait PlatformResources {
    /// Name to pass as the child's desktop, as `station\desktop`.
    fn desktop_name(&self) -> Result<String>;

    fn load_library_address_64(&self) -> Result<usize>;

    fn load_library_address_32(&self) -> Result<usize>;
}

enum Slot<T> {
    Unresolved,
    Ready(T),
    Failed(PlatformError),
}

impl<T: Clone> Slot<T> {
    fn get_or_resolve<F>(&mut self, what: &str, resolve: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        match self {
            Slot::Ready(v) => Ok(v.clone()),
            Slot::Failed(e) => {
                warn!("{} failed earlier and will not be retried: {}", what, e);
                Err(e.clone())
            }
            Slot::Unresolved => {
                debug!("resolving {}", what);
                let resolved = resolve();
                *self = match &resolved {
                    Ok(v) => Slot::Ready(v.clone()),
                    Err(e) => Slot::Failed(e.clone()),
                };
                resolved
            }
        }
    }
}

struct Slots {
    desktop: Slot<IsolatedDesktop>,
    load_library_64: Slot<usize>,
    load_library_32: Slot<usize>,
}

/// Shared sandbox resources for the life of the process.
pub struct GlobalData {
    factory: Box<dyn ResourceFactory>,
    slots: Mutex<Slots>,
}

impl GlobalData {
    /// Build the global data against the host operating system, creating the
    /// requested resources right away.
    pub fn create(options: GlobalDataOptions) -> Result<Self> {
        Self::with_factory(options, HostFactory::default())
    }

    /// Build the global data against the given factory.  Any failure of an
    /// eagerly requested resource fails the whole construction.
    pub fn with_factory<F>(options: GlobalDataOptions, factory: F) -> Result<Self>
    where
        F: ResourceFactory + 'static,
    {
        let mut slots = Slots {
            desktop: Slot::Unresolved,
            load_library_64: Slot::Unresolved,
            load_library_32: Slot::Unresolved,
        };
        if options.need_desktop {
            let desktop = factory.create_desktop()?;
            debug!("created isolated desktop {}", desktop.name());
            slots.desktop = Slot::Ready(desktop);
        }
        if options.need_load_library {
            slots.load_library_64 = Slot::Ready(factory.load_library_address_64()?);
            slots.load_library_32 = Slot::Ready(factory.load_library_address_32()?);
        }
        Ok(GlobalData {
            factory: Box::new(factory),
            slots: Mutex::new(slots),
        })
    }

    /// Global data that resolves everything on first use.
    pub fn lazy<F>(factory: F) -> Self
    where
        F: ResourceFactory + 'static,
    {
        GlobalData {
            factory: Box::new(factory),
            slots: Mutex::new(Slots {
                desktop: Slot::Unresolved,
                load_library_64: Slot::Unresolved,
                load_library_32: Slot::Unresolved,
            }),
        }
    }

    /// The isolated desktop, created on first call.
    pub fn isolated_desktop(&self) -> Result<IsolatedDesktop> {
        let mut slots = self.slots.lock().map_err(|_| PlatformError::LockPoisoned)?;
        slots
            .desktop
            .get_or_resolve("isolated desktop", || self.factory.create_desktop())
    }
}

impl PlatformResources for GlobalData {
    fn desktop_name(&self) -> Result<String> {
        self.isolated_desktop().map(|d| d.name().to_string())
    }

    fn load_library_address_64(&self) -> Result<usize> {
        let mut slots = self.slots.lock().map_err(|_| PlatformError::LockPoisoned)?;
        slots
            .load_library_64
            .get_or_resolve("64-bit LoadLibraryW", || self.factory.load_library_address_64())
    }

    fn load_library_address_32(&self) -> Result<usize> {
        let mut slots = self.slots.lock().map_err(|_| PlatformError::LockPoisoned)?;
        slots
            .load_library_32
            .get_or_resolve("32-bit LoadLibraryW", || self.factory.load_library_address_32())
    }
}

// A missing instance answers every accessor with `NoGlobalData`.
impl<T: PlatformResources> PlatformResources for Option<T> {
    fn desktop_name(&self) -> Result<String> {
        match self {
            Some(v) => v.desktop_name(),
            None => Err(PlatformError::NoGlobalData),
        }
    }

    fn load_library_address_64(&self) -> Result<usize> {
        match self {
            Some(v) => v.load_library_address_64(),
            None => Err(PlatformError::NoGlobalData),
        }
    }

    fn load_library_address_32(&self) -> Result<usize> {
        match self {
            Some(v) => v.load_library_address_32(),
            None => Err(PlatformError::NoGlobalData),
        }
    }
}

impl<T: PlatformResources + ?Sized> PlatformResources for &T {
    fn desktop_name(&self) -> Result<String> {
        (**self).desktop_name()
    }

    fn load_library_address_64(&self) -> Result<usize> {
        (**self).load_library_address_64()
    }

    fn load_library_address_32(&self) -> Result<usize> {
        (**self).load_library_address_32()
    }
}

impl<T: PlatformResources + ?Sized> PlatformResources for Arc<T> {
    fn desktop_name(&self) -> Result<String> {
        (**self).desktop_name()
    }

    fn load_library_address_64(&self) -> Result<usize> {
        (**self).load_library_address_64()
    }

    fn load_library_address_32(&self) -> Result<usize> {
        (**self).load_library_address_32()
    }
}
