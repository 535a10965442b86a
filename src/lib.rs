//! wiipoll — handle-based polling front end for Wii-remote-style motion
//! controllers.
//!
//! Devices are identified by 1-based handles into a fixed-capacity
//! [`Registry`]; [`Registry::list`] reports what the system knows about.
//! An opened device is polled for key events with [`Registry::poll`], which
//! also keeps the device's motion data (accelerometer, gyroscope, IR,
//! nunchuk, sticks, balance board) cached as a side effect. Remotes generate
//! far more motion events than a scripting host wants to see one by one, so
//! hosts keep polling for keys and read the motion snapshots they need at
//! their own pace through the accessors in [`motion`].
//!
//! The kernel-level device protocol is not implemented here: it sits behind
//! the [`NativeBackend`]/[`NativeDevice`] traits in [`native`], and the
//! registry works against whatever implementation it is constructed with.
//!
//! Guitar and drum *key* events are reported like any other; their motion
//! payloads are not decoded.

pub mod discover;
pub mod motion;
pub mod native;
pub mod poll;
pub mod registry;
pub mod session;

pub use motion::{Abs2, Abs3};
pub use native::{
    Capabilities, DeviceWaiter, EventKind, KeySource, NativeBackend, NativeDevice, NativeError,
    NativeEvent, WaitStatus,
};
pub use poll::PollEvent;
pub use registry::{Handle, Registry, MAX_DEVICES};
