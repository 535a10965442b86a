//! The poll-and-cache engine.
//!
//! One [`Registry::poll`] call blocks until the slot's descriptor is ready,
//! then drains every immediately available native event:
//! - **key-class** events (core/classic/pro/nunchuk/drums/guitar buttons)
//!   are discrete and rare, so exactly one is returned per call and anything
//!   queued behind it is left for the next call;
//! - **motion-class** events are coalesced into the slot's cache ("latest
//!   value wins") and never returned; read them back through the accessors
//!   in [`motion`](crate::motion);
//! - **watch** events trigger a reopen for the currently attached
//!   capability families, so extensions picked up at runtime start
//!   reporting;
//! - a **gone** event tears the slot down and is returned to the host as a
//!   distinguishable value carrying its raw type code.
//!
//! Call this at regular intervals; it is both the key-event source and the
//! thing that keeps the motion cache current.

use crate::native::{DeviceWaiter, EventKind, NativeBackend, NativeDevice, NativeEvent, WaitStatus};
use crate::registry::{Handle, Registry, MAX_DEVICES};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// What a single poll call surfaced to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollEvent {
    /// A button transition: key code plus state (0 = up, 1 = down,
    /// 2 = auto-repeat).
    Key { code: u32, state: u32 },
    /// The device was removed. `kind` is the raw event type code; the slot
    /// is closed by the time the host sees this.
    Removed { kind: u32 },
}

impl<B: NativeBackend> Registry<B> {
    /// Poll the device behind `handle` for one key or lifecycle event,
    /// updating the motion cache as a side effect.
    ///
    /// Blocks until the device descriptor becomes ready (signal interrupts
    /// are retried, not surfaced). Returns `None` for an invalid or closed
    /// handle, on a wait or read failure, or when the drain finishes without
    /// a key-class event; the host cannot tell those apart and is not meant
    /// to.
    pub fn poll(&mut self, handle: Handle) -> Option<PollEvent> {
        if !(1..=MAX_DEVICES).contains(&handle) {
            return None;
        }
        let slot = &mut self.slots[handle - 1];

        loop {
            match slot.open.as_mut()?.descriptor.wait() {
                WaitStatus::Ready => break,
                WaitStatus::Interrupted => continue,
                WaitStatus::Failed(err) => {
                    warn!("poll: cannot wait on device #{handle} (err {err})");
                    return None;
                }
            }
        }

        loop {
            let event = {
                let open = slot.open.as_mut()?;
                match open.device.dispatch() {
                    Ok(Some(event)) => event,
                    // Drained dry without a qualifying event.
                    Ok(None) => return None,
                    Err(err) => {
                        warn!("poll: read failed on device #{handle}: {err}");
                        return None;
                    }
                }
            };
            match event {
                NativeEvent::Key { code, state, .. } => {
                    // One key event per call; whatever is queued behind it
                    // stays queued.
                    return Some(PollEvent::Key { code, state });
                }
                NativeEvent::Watch => {
                    if let Some(open) = slot.open.as_mut() {
                        let caps = open.device.available();
                        match open.device.open(caps) {
                            Ok(()) => info!("poll: hotplug event on device #{handle}"),
                            Err(err) => {
                                warn!("poll: cannot reopen device #{handle}: {err}")
                            }
                        }
                    }
                }
                NativeEvent::Gone => {
                    // Handle and descriptor go together; the cache stays but
                    // is unreachable until the slot is reopened.
                    slot.open = None;
                    info!("poll: device #{handle} was removed");
                    return Some(PollEvent::Removed {
                        kind: EventKind::Gone.code(),
                    });
                }
                NativeEvent::Accel(sample) => slot.motion.accel = sample,
                NativeEvent::Ir(points) => slot.motion.ir = points,
                NativeEvent::MotionPlus(sample) => slot.motion.motion_plus = sample,
                NativeEvent::NunchukMove { stick, accel } => {
                    slot.motion.nunchuk_stick = stick;
                    slot.motion.nunchuk_accel = accel;
                }
                NativeEvent::ClassicMove(sticks) | NativeEvent::ProMove(sticks) => {
                    slot.motion.stick = sticks;
                }
                NativeEvent::BalanceBoard(weights) => slot.motion.board = weights,
                NativeEvent::Other(_) => {}
            }
        }
    }
}
