//! The native collaborator boundary.
//!
//! The kernel-level device protocol (HID report parsing, event framing,
//! sysfs discovery) lives in an external library. This module models exactly
//! the surface the rest of the crate consumes from it:
//! - [`NativeBackend`] — discovery sessions and per-path connections
//! - [`NativeDevice`] — one open device connection (capabilities, events,
//!   battery/LED/rumble)
//! - [`DeviceWaiter`] — the single waitable descriptor of an open device
//!
//! Events are decoded into the tagged [`NativeEvent`] enum once, at this
//! boundary; everything above it matches on variants, never on raw codes.

use crate::motion::{Abs2, Abs3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

bitflags::bitflags! {
    /// Device feature families, kernel interface numbering.
    ///
    /// A device's *available* mask lists the families currently attached
    /// (extensions come and go at runtime); its *opened* mask lists the
    /// families the connection was opened for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u32 {
        const CORE               = 0x0001;
        const ACCEL              = 0x0002;
        const IR                 = 0x0004;
        const MOTION_PLUS        = 0x0100;
        const NUNCHUK            = 0x0200;
        const CLASSIC_CONTROLLER = 0x0400;
        const BALANCE_BOARD      = 0x0800;
        const PRO_CONTROLLER     = 0x1000;
        const DRUMS              = 0x2000;
        const GUITAR             = 0x4000;
        /// Request write access (LEDs, rumble) when opening.
        const WRITABLE           = 0x1_0000;
    }
}

/// Event type codes, kernel interface numbering.
///
/// [`NativeEvent`] is the decoded form; the raw code is still part of the
/// host surface because a removal is reported to the host by its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum EventKind {
    Key = 0,
    Accel = 1,
    Ir = 2,
    BalanceBoard = 3,
    MotionPlus = 4,
    ProControllerKey = 5,
    ProControllerMove = 6,
    Watch = 7,
    ClassicControllerKey = 8,
    ClassicControllerMove = 9,
    NunchukKey = 10,
    NunchukMove = 11,
    DrumsKey = 12,
    DrumsMove = 13,
    GuitarKey = 14,
    GuitarMove = 15,
    Gone = 16,
}

impl EventKind {
    /// Raw event type code as reported by the native layer.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Which controller a key event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeySource {
    Core,
    Classic,
    Pro,
    Nunchuk,
    Drums,
    Guitar,
}

/// One native event, decoded at the boundary.
///
/// Key variants carry the key code and state (0 = up, 1 = down,
/// 2 = auto-repeat). Motion variants carry the raw sample payload; guitar and
/// drum *move* payloads are not decoded and arrive as [`NativeEvent::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEvent {
    Key {
        source: KeySource,
        code: u32,
        state: u32,
    },
    /// Device availability changed (extension plugged/unplugged).
    Watch,
    /// Device was physically removed.
    Gone,
    Accel(Abs3),
    /// Up to four tracked IR points.
    Ir([Abs2; 4]),
    MotionPlus(Abs3),
    NunchukMove {
        stick: Abs2,
        accel: Abs3,
    },
    ClassicMove([Abs2; 2]),
    ProMove([Abs2; 2]),
    /// Four edge weights.
    BalanceBoard([i32; 4]),
    /// Anything this crate does not decode; carries the raw type code.
    Other(u32),
}

/// Failure code carried across the native boundary (errno-style, negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("native call failed (err {0})")]
pub struct NativeError(pub i32);

/// Outcome of blocking on a device descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// The descriptor is readable; events can be dispatched.
    Ready,
    /// The wait was interrupted by a signal. Not an error; retry.
    Interrupted,
    /// The wait itself failed with the given code.
    Failed(i32),
}

/// The single waitable descriptor of one open device.
///
/// Blocks the calling thread with no timeout; hosts wanting multi-device
/// responsiveness drive each handle from their own scheduling loop.
pub trait DeviceWaiter {
    fn wait(&mut self) -> WaitStatus;
}

/// One open device connection.
///
/// Dropping the value releases the underlying native handle.
pub trait NativeDevice {
    type Waiter: DeviceWaiter;

    /// Open the connection for the given capability set. May be called again
    /// on an already-open connection to pick up newly attached extensions.
    fn open(&mut self, caps: Capabilities) -> Result<(), NativeError>;

    /// Close the given capability set.
    fn close(&mut self, caps: Capabilities);

    /// Capability families the device currently reports as attached.
    fn available(&self) -> Capabilities;

    /// Capability families the connection is currently opened for.
    fn opened(&self) -> Capabilities;

    /// Enable or disable hot-plug watch notifications.
    fn watch(&mut self, enable: bool) -> Result<(), NativeError>;

    /// The waitable descriptor for this connection.
    fn waiter(&self) -> Self::Waiter;

    /// Dispatch the next pending event. `Ok(None)` means no event is
    /// currently available (would block).
    fn dispatch(&mut self) -> Result<Option<NativeEvent>, NativeError>;

    /// Battery capacity, 0..=100.
    fn battery(&self) -> Result<u8, NativeError>;

    /// Read one LED state; `led` is 1-based (1..=4).
    fn led(&self, led: u8) -> Result<bool, NativeError>;

    /// Write one LED state; `led` is 1-based (1..=4).
    fn set_led(&mut self, led: u8, on: bool) -> Result<(), NativeError>;

    /// Switch the rumble motor on or off.
    fn rumble(&mut self, on: bool) -> Result<(), NativeError>;
}

/// Entry point into the native layer: discovery plus connection.
pub trait NativeBackend {
    /// A discovery session yielding device paths in the collaborator's
    /// enumeration order. Exhausting or dropping the iterator ends the
    /// session.
    type Monitor: Iterator<Item = String>;
    type Device: NativeDevice;

    /// Start a discovery session. `None` means total enumeration failure.
    fn monitor(&self) -> Option<Self::Monitor>;

    /// Connect to the device at `path`.
    fn connect(&self, path: &str) -> Result<Self::Device, NativeError>;
}
