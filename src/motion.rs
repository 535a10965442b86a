//! Cached motion state and its read-side accessors.
//!
//! Motion samples arrive far faster than a scripting host can usefully
//! consume per-event, so [`Registry::poll`](crate::registry::Registry) folds
//! them into per-slot "latest value" fields instead of queueing them. The
//! accessors here snapshot those fields into flat value sequences.
//!
//! # Semantics
//! - Reads are idempotent: a value stays put until a newer event of the same
//!   kind overwrites it during a later poll.
//! - Every accessor is gated on the slot being open *and* the connection
//!   being opened for the required capability family; otherwise it returns
//!   `None`.

use crate::native::{Capabilities, NativeBackend, NativeDevice};
use crate::registry::{Handle, Registry};
use serde::{Deserialize, Serialize};

/// A two-axis sample (sticks, IR points).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abs2 {
    pub x: i32,
    pub y: i32,
}

/// A three-axis sample (accelerometers, gyroscope).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abs3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Abs2 {
    #[inline]
    pub fn xy(self) -> [i32; 2] {
        [self.x, self.y]
    }
}

impl Abs3 {
    #[inline]
    pub fn xyz(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Last-seen motion samples for one slot.
///
/// Zeroed when the slot is opened; mutated only by the poll engine.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MotionCache {
    pub(crate) accel: Abs3,
    pub(crate) motion_plus: Abs3,
    pub(crate) nunchuk_accel: Abs3,
    pub(crate) nunchuk_stick: Abs2,
    pub(crate) ir: [Abs2; 4],
    // Classic and pro controller stick samples share this slot. Splitting
    // them is an open question; kept shared on purpose.
    pub(crate) stick: [Abs2; 2],
    pub(crate) board: [i32; 4],
}

impl<B: NativeBackend> Registry<B> {
    /// Cache access gated on open state and the opened capability mask.
    fn gated(&self, handle: Handle, gate: Capabilities) -> Option<&MotionCache> {
        let slot = self.slot(handle)?;
        let open = slot.open.as_ref()?;
        if open.device.opened().contains(gate) {
            Some(&slot.motion)
        } else {
            None
        }
    }

    /// Core accelerometer, `[x, y, z]`.
    pub fn accel(&self, handle: Handle) -> Option<[i32; 3]> {
        Some(self.gated(handle, Capabilities::CORE)?.accel.xyz())
    }

    /// The four tracked IR points as `[x0, y0, x1, y1, x2, y2, x3, y3]`.
    pub fn ir(&self, handle: Handle) -> Option<[i32; 8]> {
        let ir = self.gated(handle, Capabilities::CORE)?.ir;
        Some([
            ir[0].x, ir[0].y, ir[1].x, ir[1].y, ir[2].x, ir[2].y, ir[3].x, ir[3].y,
        ])
    }

    /// Motion-plus gyroscope, `[x, y, z]`. Needs an opened motion-plus
    /// (built into newer remotes, also available as an extension).
    pub fn motion_plus(&self, handle: Handle) -> Option<[i32; 3]> {
        Some(self.gated(handle, Capabilities::MOTION_PLUS)?.motion_plus.xyz())
    }

    /// Nunchuk accelerometer, `[x, y, z]`.
    pub fn nunchuk_accel(&self, handle: Handle) -> Option<[i32; 3]> {
        Some(self.gated(handle, Capabilities::NUNCHUK)?.nunchuk_accel.xyz())
    }

    /// Nunchuk joystick, `[x, y]`.
    pub fn nunchuk_stick(&self, handle: Handle) -> Option<[i32; 2]> {
        Some(self.gated(handle, Capabilities::NUNCHUK)?.nunchuk_stick.xy())
    }

    /// Classic/pro controller sticks as `[x0, y0, x1, y1]`. Both controller
    /// families feed the same cache slot.
    pub fn pro_stick(&self, handle: Handle) -> Option<[i32; 4]> {
        let stick = self.gated(handle, Capabilities::CORE)?.stick;
        Some([stick[0].x, stick[0].y, stick[1].x, stick[1].y])
    }

    /// Balance board edge weights, one value per edge.
    pub fn board(&self, handle: Handle) -> Option<[i32; 4]> {
        Some(self.gated(handle, Capabilities::CORE)?.board)
    }
}
