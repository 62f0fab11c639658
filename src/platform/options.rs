// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Controls which resources `GlobalData::create` builds before returning.
///
/// Anything not requested here is still available later; it is created on
/// the first accessor call instead.  Requesting it up front makes an
/// environment problem (no rights to create a window station, a probe that
/// cannot run) fail the service start rather than the first submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalDataOptions {
    /// Create the isolated desktop immediately.
    pub need_desktop: bool,

    /// Resolve both the 64-bit and the 32-bit `LoadLibraryW` addresses immediately.
    pub need_load_library: bool,
}

impl GlobalDataOptions {
    /// Request every resource eagerly.
    pub fn all() -> Self {
        GlobalDataOptions {
            need_desktop: true,
            need_load_library: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GlobalDataOptions;

    #[test]
    fn missing_fields_default_to_lazy() {
        let opts: GlobalDataOptions = serde_json::from_str(r#"{"need_desktop": true}"#).unwrap();
        assert_eq!(
            opts,
            GlobalDataOptions {
                need_desktop: true,
                need_load_library: false,
            }
        );
        let opts: GlobalDataOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, GlobalDataOptions::default());
    }
}
