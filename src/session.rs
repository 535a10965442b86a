//! Device session operations: open, close, and per-device control.
//!
//! Everything here follows the permissive boundary policy: an invalid or
//! closed handle yields the documented neutral value, native failures are
//! logged and surfaced as `None`, and nothing on a host-reachable path
//! panics.

use crate::motion::MotionCache;
use crate::native::{Capabilities, NativeBackend, NativeDevice};
use crate::registry::{Handle, OpenDevice, Registry, MAX_DEVICES};
use log::warn;

impl<B: NativeBackend> Registry<B> {
    /// Open the device at enumeration `index` (1-based) and return its
    /// handle, which is the index itself.
    ///
    /// Returns `None` when the index is out of range, enumeration has no
    /// path at that position, the slot is already open, or the native
    /// connect/open calls fail. A connection created before a later step
    /// fails is released before returning. Each device can only be opened
    /// once; re-opening an open slot fails without touching it.
    pub fn open(&mut self, index: usize) -> Option<Handle> {
        if index < 1 || index > MAX_DEVICES {
            warn!("open: cannot find device #{index}");
            return None;
        }
        let Some(path) = self.path_at_index(index) else {
            warn!("open: cannot find device #{index}");
            return None;
        };
        if self.slots[index - 1].open.is_some() {
            return None;
        }
        let mut device = match self.backend.connect(&path) {
            Ok(device) => device,
            Err(err) => {
                warn!("open: cannot connect to '{path}': {err}");
                return None;
            }
        };
        // Request everything the device currently reports, plus write access
        // for LEDs and rumble.
        let caps = device.available() | Capabilities::WRITABLE;
        if let Err(err) = device.open(caps) {
            warn!("open: cannot open interface '{path}': {err}");
            return None;
        }
        // Best effort: without the watch we miss extension hot-plug, but the
        // device itself is usable.
        if let Err(err) = device.watch(true) {
            warn!("open: cannot initialize hotplug watch on '{path}': {err}");
        }
        let descriptor = device.waiter();
        let slot = &mut self.slots[index - 1];
        slot.motion = MotionCache::default();
        slot.open = Some(OpenDevice { device, descriptor });
        Some(index)
    }

    /// Close the device behind `handle`. Idempotent; never fails. A closed
    /// or out-of-range handle is a no-op.
    pub fn close(&mut self, handle: Handle) {
        let Some(slot) = self.slot_mut(handle) else {
            return;
        };
        if let Some(mut open) = slot.open.take() {
            let opened = open.device.opened();
            open.device.close(opened);
        }
    }

    /// Capability families the device currently reports as attached.
    /// Empty for an invalid or closed handle.
    pub fn info(&self, handle: Handle) -> Capabilities {
        match self.open_device(handle) {
            Some(open) => open.device.available(),
            None => Capabilities::empty(),
        }
    }

    /// Battery capacity (0..=100).
    ///
    /// An invalid or closed handle reads as `Some(0)`; a failed read on an
    /// open device reads as `None`. The two are distinguishable only by
    /// handle validity. Long-standing surface behavior, kept as is.
    pub fn battery(&self, handle: Handle) -> Option<u8> {
        let Some(open) = self.open_device(handle) else {
            return Some(0);
        };
        match open.device.battery() {
            Ok(capacity) => Some(capacity),
            Err(err) => {
                warn!("battery: cannot read battery capacity: {err}");
                None
            }
        }
    }

    /// The four LED states as a bitmask (bit 0 = LED 1).
    ///
    /// Any single failed LED read aborts the whole query and returns `None`.
    /// An invalid or closed handle reads as `Some(0)`, mirroring
    /// [`battery`](Self::battery).
    pub fn leds(&self, handle: Handle) -> Option<u8> {
        let Some(open) = self.open_device(handle) else {
            return Some(0);
        };
        let mut mask = 0u8;
        for i in 0..4u8 {
            match open.device.led(i + 1) {
                Ok(true) => mask |= 1 << i,
                Ok(false) => {}
                Err(err) => {
                    warn!("leds: cannot read LED state: {err}");
                    return None;
                }
            }
        }
        Some(mask)
    }

    /// Set the four LED states from a bitmask (bit 0 = LED 1).
    ///
    /// LEDs are written independently; the first failure aborts the
    /// remaining writes, so partial application is possible. No-op for an
    /// invalid or closed handle.
    pub fn set_leds(&mut self, handle: Handle, mask: u8) {
        let Some(open) = self.open_device_mut(handle) else {
            return;
        };
        for i in 0..4u8 {
            let on = mask & (1 << i) != 0;
            if let Err(err) = open.device.set_led(i + 1, on) {
                warn!("set_leds: cannot write LED state: {err}");
                return;
            }
        }
    }

    /// Switch the rumble motor on or off. Best effort; a failure is logged
    /// and never surfaced.
    pub fn rumble(&mut self, handle: Handle, on: bool) {
        let Some(open) = self.open_device_mut(handle) else {
            return;
        };
        if let Err(err) = open.device.rumble(on) {
            warn!("rumble: cannot set rumble motor state: {err}");
        }
    }
}
