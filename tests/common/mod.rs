#![allow(dead_code)] // not every test target touches every scripting knob

//! Scripted native backend for driving the registry in tests.
//!
//! Each device path maps to a shared [`DeviceScript`]: tests preload events,
//! wait outcomes and failure injections, run registry operations, then
//! inspect what the "native layer" saw.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use wiipoll::{
    Capabilities, DeviceWaiter, NativeBackend, NativeDevice, NativeError, NativeEvent, WaitStatus,
};

pub const DEV_PATH: &str = "/sys/devices/wii/dev1";

/// Everything one scripted device knows and records.
pub struct DeviceScript {
    pub available: Capabilities,
    pub opened: Capabilities,
    /// Next `open()` call fails while this is set.
    pub open_fail: bool,
    /// Capability masks passed to `open()`, in order.
    pub open_calls: Vec<Capabilities>,
    pub watch_fail: bool,
    pub watch_calls: Vec<bool>,
    pub events: VecDeque<NativeEvent>,
    /// One-shot dispatch failure code.
    pub dispatch_fail: Option<i32>,
    /// Wait outcomes, front first; empty means `Ready`.
    pub wait_plan: VecDeque<WaitStatus>,
    pub battery: u8,
    pub battery_fail: bool,
    pub leds: [bool; 4],
    /// 1-based LED whose read fails.
    pub led_read_fail: Option<u8>,
    /// 1-based LED whose write fails.
    pub led_write_fail: Option<u8>,
    pub rumble: bool,
    pub rumble_fail: bool,
    pub closed_with: Option<Capabilities>,
    /// Connections handed out.
    pub connects: usize,
    /// Native handles released (device values dropped).
    pub releases: usize,
}

impl DeviceScript {
    pub fn new(available: Capabilities) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            available,
            opened: Capabilities::empty(),
            open_fail: false,
            open_calls: Vec::new(),
            watch_fail: false,
            watch_calls: Vec::new(),
            events: VecDeque::new(),
            dispatch_fail: None,
            wait_plan: VecDeque::new(),
            battery: 0,
            battery_fail: false,
            leds: [false; 4],
            led_read_fail: None,
            led_write_fail: None,
            rumble: false,
            rumble_fail: false,
            closed_with: None,
            connects: 0,
            releases: 0,
        }))
    }
}

pub struct MockBackend {
    pub paths: RefCell<Vec<String>>,
    pub devices: HashMap<String, Rc<RefCell<DeviceScript>>>,
    pub monitor_fails: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            paths: RefCell::new(Vec::new()),
            devices: HashMap::new(),
            monitor_fails: false,
        }
    }

    /// Backend listing one device at `DEV_PATH` with the given capabilities.
    pub fn with_device(available: Capabilities) -> (Self, Rc<RefCell<DeviceScript>>) {
        let mut backend = Self::new();
        let script = DeviceScript::new(available);
        backend.paths.borrow_mut().push(DEV_PATH.to_string());
        backend.devices.insert(DEV_PATH.to_string(), script.clone());
        (backend, script)
    }
}

pub struct MockDevice {
    script: Rc<RefCell<DeviceScript>>,
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.script.borrow_mut().releases += 1;
    }
}

impl NativeDevice for MockDevice {
    type Waiter = MockWaiter;

    fn open(&mut self, caps: Capabilities) -> Result<(), NativeError> {
        let mut s = self.script.borrow_mut();
        s.open_calls.push(caps);
        if s.open_fail {
            return Err(NativeError(-5));
        }
        s.opened = caps;
        Ok(())
    }

    fn close(&mut self, caps: Capabilities) {
        let mut s = self.script.borrow_mut();
        s.closed_with = Some(caps);
        let remaining = s.opened.difference(caps);
        s.opened = remaining;
    }

    fn available(&self) -> Capabilities {
        self.script.borrow().available
    }

    fn opened(&self) -> Capabilities {
        self.script.borrow().opened
    }

    fn watch(&mut self, enable: bool) -> Result<(), NativeError> {
        let mut s = self.script.borrow_mut();
        s.watch_calls.push(enable);
        if s.watch_fail {
            Err(NativeError(-22))
        } else {
            Ok(())
        }
    }

    fn waiter(&self) -> MockWaiter {
        MockWaiter {
            script: self.script.clone(),
        }
    }

    fn dispatch(&mut self) -> Result<Option<NativeEvent>, NativeError> {
        let mut s = self.script.borrow_mut();
        if let Some(code) = s.dispatch_fail.take() {
            return Err(NativeError(code));
        }
        Ok(s.events.pop_front())
    }

    fn battery(&self) -> Result<u8, NativeError> {
        let s = self.script.borrow();
        if s.battery_fail {
            Err(NativeError(-5))
        } else {
            Ok(s.battery)
        }
    }

    fn led(&self, led: u8) -> Result<bool, NativeError> {
        let s = self.script.borrow();
        if s.led_read_fail == Some(led) {
            return Err(NativeError(-5));
        }
        Ok(s.leds[usize::from(led) - 1])
    }

    fn set_led(&mut self, led: u8, on: bool) -> Result<(), NativeError> {
        let mut s = self.script.borrow_mut();
        if s.led_write_fail == Some(led) {
            return Err(NativeError(-5));
        }
        s.leds[usize::from(led) - 1] = on;
        Ok(())
    }

    fn rumble(&mut self, on: bool) -> Result<(), NativeError> {
        let mut s = self.script.borrow_mut();
        if s.rumble_fail {
            return Err(NativeError(-5));
        }
        s.rumble = on;
        Ok(())
    }
}

pub struct MockWaiter {
    script: Rc<RefCell<DeviceScript>>,
}

impl DeviceWaiter for MockWaiter {
    fn wait(&mut self) -> WaitStatus {
        self.script
            .borrow_mut()
            .wait_plan
            .pop_front()
            .unwrap_or(WaitStatus::Ready)
    }
}

impl NativeBackend for MockBackend {
    type Monitor = std::vec::IntoIter<String>;
    type Device = MockDevice;

    fn monitor(&self) -> Option<Self::Monitor> {
        if self.monitor_fails {
            return None;
        }
        Some(self.paths.borrow().clone().into_iter())
    }

    fn connect(&self, path: &str) -> Result<MockDevice, NativeError> {
        match self.devices.get(path) {
            Some(script) => {
                script.borrow_mut().connects += 1;
                Ok(MockDevice {
                    script: script.clone(),
                })
            }
            None => Err(NativeError(-19)),
        }
    }
}
