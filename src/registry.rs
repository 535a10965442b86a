//! The fixed-capacity device registry.
//!
//! [`Registry`] owns a bounded array of slots plus the native backend, and
//! hands devices out to the host as 1-based integer handles. It is the
//! central shared state of the crate; every session, poll and reader
//! operation resolves its handle here first.
//!
//! # Handles
//! - Handle space is `1..=MAX_DEVICES`; `0` and anything above the capacity
//!   never resolve.
//! - An out-of-range or closed handle is not an error: operations degrade to
//!   their neutral value (`None`, empty mask, no-op).
//!
//! # Concurrency
//! The registry carries no locking of its own. It assumes a single-threaded
//! host; concurrent callers must wrap it in their own synchronization.

use crate::motion::MotionCache;
use crate::native::{NativeBackend, NativeDevice};

/// Maximum number of simultaneously open devices. Discovery can list more,
/// but only the first `MAX_DEVICES` enumeration indices are openable.
pub const MAX_DEVICES: usize = 10;

/// 1-based index identifying a device slot to the host.
pub type Handle = usize;

/// An open device: the native handle and its poll descriptor, stored
/// together so they can only appear and disappear as one.
pub(crate) struct OpenDevice<D: NativeDevice> {
    pub(crate) device: D,
    pub(crate) descriptor: D::Waiter,
}

/// One possibly-open device slot.
pub(crate) struct Slot<D: NativeDevice> {
    /// `Some` iff the slot is open.
    pub(crate) open: Option<OpenDevice<D>>,
    /// Survives removal teardown (inert until the slot is reopened).
    pub(crate) motion: MotionCache,
}

impl<D: NativeDevice> Slot<D> {
    fn empty() -> Self {
        Self {
            open: None,
            motion: MotionCache::default(),
        }
    }
}

/// Fixed-capacity registry of device slots over a native backend.
pub struct Registry<B: NativeBackend> {
    pub(crate) backend: B,
    pub(crate) slots: [Slot<B::Device>; MAX_DEVICES],
}

impl<B: NativeBackend> Registry<B> {
    /// Create a registry with all slots empty.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            slots: std::array::from_fn(|_| Slot::empty()),
        }
    }

    /// Resolve a handle to its slot, or `None` when out of range.
    pub(crate) fn slot(&self, handle: Handle) -> Option<&Slot<B::Device>> {
        if (1..=MAX_DEVICES).contains(&handle) {
            Some(&self.slots[handle - 1])
        } else {
            None
        }
    }

    pub(crate) fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<B::Device>> {
        if (1..=MAX_DEVICES).contains(&handle) {
            Some(&mut self.slots[handle - 1])
        } else {
            None
        }
    }

    /// Resolve a handle to its open device, `None` when out of range or
    /// closed.
    pub(crate) fn open_device(&self, handle: Handle) -> Option<&OpenDevice<B::Device>> {
        self.slot(handle)?.open.as_ref()
    }

    pub(crate) fn open_device_mut(&mut self, handle: Handle) -> Option<&mut OpenDevice<B::Device>> {
        self.slot_mut(handle)?.open.as_mut()
    }

    /// Whether `handle` currently refers to an open slot.
    #[inline]
    pub fn is_open(&self, handle: Handle) -> bool {
        self.open_device(handle).is_some()
    }
}
