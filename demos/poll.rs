//! Host-loop walkthrough against a scripted backend.
//!
//! There is no in-crate protocol backend (the kernel-level device layer is an
//! external collaborator), so this demo wires the registry to a tiny canned
//! one: a single remote that presses and releases a button, streams a few
//! accelerometer samples, and then disappears. The loop below is the shape a
//! real host embedding would use.
//!
//! Run with `RUST_LOG=info cargo run --example poll` to see the diagnostics.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wiipoll::{
    Abs3, Capabilities, DeviceWaiter, NativeBackend, NativeDevice, NativeError, NativeEvent,
    PollEvent, Registry, WaitStatus,
};

/// One pre-recorded device: events are handed out in order (a `None` entry
/// marks a would-block pause), then the device reports itself gone.
struct CannedDevice {
    events: Rc<RefCell<VecDeque<Option<NativeEvent>>>>,
    opened: Capabilities,
}

struct CannedWaiter;

impl DeviceWaiter for CannedWaiter {
    fn wait(&mut self) -> WaitStatus {
        WaitStatus::Ready
    }
}

impl NativeDevice for CannedDevice {
    type Waiter = CannedWaiter;

    fn open(&mut self, caps: Capabilities) -> Result<(), NativeError> {
        self.opened = caps;
        Ok(())
    }
    fn close(&mut self, caps: Capabilities) {
        self.opened.remove(caps);
    }
    fn available(&self) -> Capabilities {
        Capabilities::CORE | Capabilities::ACCEL
    }
    fn opened(&self) -> Capabilities {
        self.opened
    }
    fn watch(&mut self, _enable: bool) -> Result<(), NativeError> {
        Ok(())
    }
    fn waiter(&self) -> CannedWaiter {
        CannedWaiter
    }
    fn dispatch(&mut self) -> Result<Option<NativeEvent>, NativeError> {
        Ok(self.events.borrow_mut().pop_front().flatten())
    }
    fn battery(&self) -> Result<u8, NativeError> {
        Ok(72)
    }
    fn led(&self, led: u8) -> Result<bool, NativeError> {
        Ok(led == 1)
    }
    fn set_led(&mut self, _led: u8, _on: bool) -> Result<(), NativeError> {
        Ok(())
    }
    fn rumble(&mut self, _on: bool) -> Result<(), NativeError> {
        Ok(())
    }
}

struct CannedBackend {
    events: Rc<RefCell<VecDeque<Option<NativeEvent>>>>,
}

impl NativeBackend for CannedBackend {
    type Monitor = std::vec::IntoIter<String>;
    type Device = CannedDevice;

    fn monitor(&self) -> Option<Self::Monitor> {
        Some(vec!["/sys/devices/wii/demo".to_string()].into_iter())
    }
    fn connect(&self, _path: &str) -> Result<CannedDevice, NativeError> {
        Ok(CannedDevice {
            events: self.events.clone(),
            opened: Capabilities::empty(),
        })
    }
}

fn main() {
    env_logger::init();

    let script: VecDeque<Option<NativeEvent>> = VecDeque::from(vec![
        Some(NativeEvent::Key {
            source: wiipoll::KeySource::Core,
            code: 305,
            state: 1,
        }),
        Some(NativeEvent::Accel(Abs3 { x: 12, y: -4, z: 100 })),
        Some(NativeEvent::Accel(Abs3 { x: 14, y: -2, z: 98 })),
        None, // nothing more this round; the host reads motion instead
        Some(NativeEvent::Key {
            source: wiipoll::KeySource::Core,
            code: 305,
            state: 0,
        }),
        Some(NativeEvent::Gone),
    ]);
    let backend = CannedBackend {
        events: Rc::new(RefCell::new(script)),
    };

    let mut registry = Registry::new(backend);

    // 1) Enumerate and open the first device.
    for (i, path) in registry.list().iter().enumerate() {
        println!("device #{}: {}", i + 1, path);
    }
    let Some(handle) = registry.open(1) else {
        eprintln!("cannot open device #1");
        return;
    };
    println!(
        "opened handle {handle}, caps {:?}, battery {}%",
        registry.info(handle),
        registry.battery(handle).unwrap_or(0)
    );
    registry.set_leds(handle, 0b0001);

    // 2) Poll for key events; motion data accumulates on the side.
    loop {
        match registry.poll(handle) {
            Some(PollEvent::Key { code, state }) => {
                println!("key {code} -> state {state}");
            }
            Some(PollEvent::Removed { kind }) => {
                println!("device removed (event type {kind})");
                break;
            }
            None => {
                // No key this round; read the freshest motion snapshot.
                if let Some([x, y, z]) = registry.accel(handle) {
                    println!("accel x={x} y={y} z={z}");
                }
            }
        }
        if !registry.is_open(handle) {
            break;
        }
    }
    registry.close(handle);
}
