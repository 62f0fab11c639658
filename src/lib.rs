//! # desktop-jail
//!
//! Bootstraps the isolated window station and desktop that sandboxed judge
//! processes run under, and resolves the `LoadLibraryW` entry points used to
//! inject a helper library into 64-bit and 32-bit children.

pub mod platform;

pub use platform::{
    GlobalData, GlobalDataOptions, HostFactory, IsolatedDesktop, ObjectHandle, PlatformError,
    PlatformResources, ProbeError, ProbeRunner, ResourceFactory,
};
