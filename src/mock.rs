//! Hand-written embedded-hal mocks shared by the unit tests.
//!
//! Every mock appends to one `Journal` so tests can assert the relative order of bus writes,
//! pin toggles, supply switches, sleeps and PHY calls.

use crate::format::BusFormat;
use crate::mipi::{DphyConfig, Phy, PhyMode, PhyStep};
use crate::power::Switch;
use crate::regmap::RegisterBlock;
use crate::sensor::ImageSensor;
use embedded_hal::blocking::{delay::DelayMs, i2c};
use embedded_hal::digital::v2::OutputPin;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    I2cWrite(u16, u8),
    I2cRead(u16),
    Pin(&'static str, bool),
    Switch(&'static str, bool),
    Sleep(u32),
    RegWrite(&'static str, u32, u32),
    RegRead(&'static str, u32),
    Phy(&'static str),
    Sensor(&'static str),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MockError {
    Nack,
    Injected,
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    /// Position of the first matching event.
    pub fn position(&self, event: Event) -> Option<usize> {
        self.events().iter().position(|e| *e == event)
    }

    /// Register writes recorded under `tag`, in order.
    pub fn reg_writes(&self, tag: &str) -> Vec<(u32, u32)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::RegWrite(t, offset, value) if t == tag => Some((offset, value)),
                _ => None,
            })
            .collect()
    }

    /// Sensor bus writes, in order.
    pub fn i2c_writes(&self) -> Vec<(u16, u8)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::I2cWrite(addr, value) => Some((addr, value)),
                _ => None,
            })
            .collect()
    }
}

pub fn journal() -> Journal {
    Journal::default()
}

#[derive(Default)]
struct I2cState {
    addresses: Vec<u8>,
    regs: HashMap<u16, u8>,
    stuck: HashMap<u16, u8>,
    fail_writes: Vec<u16>,
    fail_reads: Vec<u16>,
    pointer: u16,
    transfers: Vec<(u8, Vec<u8>)>,
}

/// A sensor on the bus with a 16-bit register file. Clones share the device.
#[derive(Clone)]
pub struct MockI2c {
    state: Arc<Mutex<I2cState>>,
    log: Journal,
}

impl MockI2c {
    pub fn new(address: u8, log: &Journal) -> Self {
        let state = I2cState {
            addresses: vec![address],
            ..Default::default()
        };
        MockI2c {
            state: Arc::new(Mutex::new(state)),
            log: log.clone(),
        }
    }

    /// Also acknowledge transactions at `address`.
    pub fn answer_at(&self, address: u8) {
        self.state.lock().unwrap().addresses.push(address);
    }

    pub fn set(&self, addr: u16, value: u8) {
        self.state.lock().unwrap().regs.insert(addr, value);
    }

    pub fn get(&self, addr: u16) -> u8 {
        let state = self.state.lock().unwrap();
        state
            .stuck
            .get(&addr)
            .or_else(|| state.regs.get(&addr))
            .copied()
            .unwrap_or(0)
    }

    /// Register ignores writes and always reads `value`.
    pub fn stuck_at(&self, addr: u16, value: u8) {
        self.state.lock().unwrap().stuck.insert(addr, value);
    }

    pub fn fail_writes_to(&self, addr: u16) {
        self.state.lock().unwrap().fail_writes.push(addr);
    }

    pub fn fail_reads_of(&self, addr: u16) {
        self.state.lock().unwrap().fail_reads.push(addr);
    }

    pub fn heal(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_writes.clear();
        state.fail_reads.clear();
    }

    /// Successful write transactions, any device address.
    pub fn transfers(&self) -> Vec<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.transfers.iter().map(|(_, buf)| buf.clone()).collect()
    }

    /// Successful write transactions sent to `address`.
    pub fn transfers_to(&self, address: u8) -> Vec<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state
            .transfers
            .iter()
            .filter(|(dev, _)| *dev == address)
            .map(|(_, buf)| buf.clone())
            .collect()
    }
}

impl i2c::Write for MockI2c {
    type Error = MockError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        if !state.addresses.contains(&address) || bytes.len() < 2 {
            return Err(MockError::Nack);
        }

        let addr = u16::from_be_bytes([bytes[0], bytes[1]]);
        if bytes.len() > 2 && state.fail_writes.contains(&addr) {
            return Err(MockError::Injected);
        }

        state.pointer = addr;
        for (i, value) in bytes[2..].iter().enumerate() {
            let reg = addr + i as u16;
            state.regs.insert(reg, *value);
            self.log.push(Event::I2cWrite(reg, *value));
        }
        state.transfers.push((address, bytes.to_vec()));

        Ok(())
    }
}

impl i2c::Read for MockI2c {
    type Error = MockError;

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        let pointer = {
            let state = self.state.lock().unwrap();
            if !state.addresses.contains(&address) {
                return Err(MockError::Nack);
            }
            if state.fail_reads.contains(&state.pointer) {
                return Err(MockError::Injected);
            }
            state.pointer
        };

        for (i, byte) in buffer.iter_mut().enumerate() {
            let reg = pointer + i as u16;
            *byte = self.get(reg);
            self.log.push(Event::I2cRead(reg));
        }

        Ok(())
    }
}

/// Control line; logs its level.
pub struct MockPin {
    name: &'static str,
    log: Journal,
    fail: bool,
}

impl MockPin {
    pub fn new(name: &'static str, log: &Journal) -> Self {
        MockPin {
            name,
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(name: &'static str, log: &Journal) -> Self {
        MockPin {
            fail: true,
            ..MockPin::new(name, log)
        }
    }

    fn set(&mut self, level: bool) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError::Injected);
        }
        self.log.push(Event::Pin(self.name, level));
        Ok(())
    }
}

impl OutputPin for MockPin {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

/// Supply rail or clock gate.
pub struct MockSwitch {
    name: &'static str,
    log: Journal,
    fail_enable: bool,
    fail_disable: bool,
}

impl MockSwitch {
    pub fn new(name: &'static str, log: &Journal) -> Self {
        MockSwitch {
            name,
            log: log.clone(),
            fail_enable: false,
            fail_disable: false,
        }
    }

    pub fn failing_enable(name: &'static str, log: &Journal) -> Self {
        MockSwitch {
            fail_enable: true,
            ..MockSwitch::new(name, log)
        }
    }

    pub fn failing_disable(name: &'static str, log: &Journal) -> Self {
        MockSwitch {
            fail_disable: true,
            ..MockSwitch::new(name, log)
        }
    }
}

impl Switch for MockSwitch {
    type Error = MockError;

    fn enable(&mut self) -> Result<(), Self::Error> {
        if self.fail_enable {
            return Err(MockError::Injected);
        }
        self.log.push(Event::Switch(self.name, true));
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        if self.fail_disable {
            return Err(MockError::Injected);
        }
        self.log.push(Event::Switch(self.name, false));
        Ok(())
    }
}

pub struct MockDelay {
    log: Journal,
}

impl MockDelay {
    pub fn new(log: &Journal) -> Self {
        MockDelay { log: log.clone() }
    }
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::Sleep(ms));
    }
}

/// 32-bit register block. Clones share the same memory.
#[derive(Clone)]
pub struct MockRegs {
    tag: &'static str,
    mem: Arc<Mutex<HashMap<u32, u32>>>,
    log: Journal,
}

impl MockRegs {
    pub fn new(tag: &'static str, log: &Journal) -> Self {
        MockRegs {
            tag,
            mem: Arc::new(Mutex::new(HashMap::new())),
            log: log.clone(),
        }
    }

    pub fn set(&self, offset: u32, value: u32) {
        self.mem.lock().unwrap().insert(offset, value);
    }

    pub fn get(&self, offset: u32) -> u32 {
        self.mem.lock().unwrap().get(&offset).copied().unwrap_or(0)
    }
}

impl RegisterBlock for MockRegs {
    fn read(&mut self, offset: u32) -> u32 {
        self.log.push(Event::RegRead(self.tag, offset));
        self.get(offset)
    }

    fn write(&mut self, offset: u32, value: u32) {
        self.log.push(Event::RegWrite(self.tag, offset, value));
        self.set(offset, value);
    }
}

pub struct MockPhy {
    log: Journal,
    fail_at: Option<PhyStep>,
    pub config: Option<DphyConfig>,
}

impl MockPhy {
    pub fn new(log: &Journal) -> Self {
        MockPhy {
            log: log.clone(),
            fail_at: None,
            config: None,
        }
    }

    pub fn failing_at(step: PhyStep, log: &Journal) -> Self {
        MockPhy {
            fail_at: Some(step),
            ..MockPhy::new(log)
        }
    }

    fn step(&mut self, step: PhyStep, name: &'static str) -> Result<(), MockError> {
        self.log.push(Event::Phy(name));
        if self.fail_at == Some(step) {
            return Err(MockError::Injected);
        }
        Ok(())
    }
}

impl Phy for MockPhy {
    type Error = MockError;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.step(PhyStep::Reset, "reset")
    }

    fn set_mode(&mut self, _mode: PhyMode) -> Result<(), Self::Error> {
        self.step(PhyStep::SetMode, "set_mode")
    }

    fn configure(&mut self, config: &DphyConfig) -> Result<(), Self::Error> {
        self.config = Some(*config);
        self.step(PhyStep::Configure, "configure")
    }

    fn power_on(&mut self) -> Result<(), Self::Error> {
        self.step(PhyStep::PowerOn, "power_on")
    }

    fn power_off(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Phy("power_off"));
        Ok(())
    }
}

/// Upstream sensor with a fixed pixel rate.
pub struct MockSensor {
    log: Journal,
    pixel_rate: u64,
    pub fail_start: bool,
    pub fail_stop: bool,
    pub streaming: bool,
}

impl MockSensor {
    pub fn new(pixel_rate: u64, log: &Journal) -> Self {
        MockSensor {
            log: log.clone(),
            pixel_rate,
            fail_start: false,
            fail_stop: false,
            streaming: false,
        }
    }
}

impl ImageSensor for MockSensor {
    type Mode = ();
    type Error = MockError;

    fn identify(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn configure(&mut self, _mode: &'static (), _format: BusFormat) -> Result<(), Self::Error> {
        self.log.push(Event::Sensor("configure"));
        Ok(())
    }

    fn set_streaming(&mut self, enable: bool) -> Result<(), Self::Error> {
        self.log
            .push(Event::Sensor(if enable { "stream_on" } else { "stream_off" }));
        if (enable && self.fail_start) || (!enable && self.fail_stop) {
            return Err(MockError::Injected);
        }
        self.streaming = enable;
        Ok(())
    }

    fn pixel_rate(&self) -> u64 {
        self.pixel_rate
    }
}
