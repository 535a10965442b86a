//! Device enumeration.
//!
//! Discovery is stateless: every call opens a fresh session with the native
//! layer, drains it, and drops it. Two consequences the host has to live
//! with:
//! - ordering is whatever the collaborator enumerates (typically
//!   discovery-time order) and is not guaranteed stable across calls;
//! - an attach or detach between two calls can shift indices, so resolving
//!   the same index twice may name different devices. Documented race, not
//!   defended against.

use crate::native::NativeBackend;
use crate::registry::Registry;
use log::warn;

impl<B: NativeBackend> Registry<B> {
    /// Device paths currently known to the system.
    ///
    /// All connected devices are listed, but only the first
    /// [`MAX_DEVICES`](crate::registry::MAX_DEVICES) indices can be opened.
    /// Returns an empty list (with a diagnostic) when no discovery session
    /// can be created.
    pub fn list(&self) -> Vec<String> {
        match self.backend.monitor() {
            Some(monitor) => monitor.collect(),
            None => {
                warn!("list: cannot create device monitor");
                Vec::new()
            }
        }
    }

    /// Re-run enumeration and return the `index`-th path (1-based).
    pub(crate) fn path_at_index(&self, index: usize) -> Option<String> {
        if index == 0 {
            return None;
        }
        self.backend.monitor()?.nth(index - 1)
    }
}
