//! The host factory through the public constructor.

use crate::{GlobalData, GlobalDataOptions, PlatformResources};

#[cfg(not(target_os = "windows"))]
use crate::PlatformError;

#[cfg(not(target_os = "windows"))]
#[test]
fn eager_desktop_is_unsupported_off_windows() {
    let res = GlobalData::create(GlobalDataOptions {
        need_desktop: true,
        need_load_library: false,
    });
    assert!(matches!(res, Err(PlatformError::Unsupported(_))));
}

#[cfg(not(target_os = "windows"))]
#[test]
fn lazy_host_data_caches_unsupported() {
    let data = GlobalData::create(GlobalDataOptions::default()).unwrap();
    assert!(matches!(data.desktop_name(), Err(PlatformError::Unsupported(_))));
    assert!(matches!(data.desktop_name(), Err(PlatformError::Unsupported(_))));
    assert!(matches!(
        data.load_library_address_64(),
        Err(PlatformError::Unsupported(_))
    ));
    assert!(matches!(
        data.load_library_address_32(),
        Err(PlatformError::Unsupported(_))
    ));
}

/// Creates a real window station and desktop on the test machine.
#[cfg(target_os = "windows")]
#[test]
fn creates_isolated_desktop() {
    let data = GlobalData::create(GlobalDataOptions {
        need_desktop: true,
        need_load_library: false,
    })
    .unwrap();
    let name = data.desktop_name().unwrap();
    let (station, desktop) = name.split_once('\\').expect("station\\desktop");
    assert!(station.starts_with('w'), "unexpected station name {}", station);
    assert!(desktop.starts_with('c'), "unexpected desktop name {}", desktop);
    assert_eq!(data.desktop_name().unwrap(), name);

    let desktop = data.isolated_desktop().unwrap();
    assert!(!desktop.window_station().is_null());
    assert!(!desktop.desktop().is_null());
}

#[cfg(target_os = "windows")]
#[test]
fn resolves_native_load_library() {
    let data = GlobalData::create(GlobalDataOptions::default()).unwrap();
    let addr = data.load_library_address_64().unwrap();
    assert_ne!(addr, 0);
    assert_eq!(data.load_library_address_64().unwrap(), addr);
}
