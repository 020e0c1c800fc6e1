//! Sensor power sequencing.
//!
//! A sequence is a static list of named steps. `PowerControl` runs it in order and, if a step
//! fails, tears down exactly what was brought up before reporting the failing step.

use core::fmt;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;
use log::{debug, error, warn};

/// A supply regulator or clock gate.
pub trait Switch {
    type Error: fmt::Debug;

    fn enable(&mut self) -> Result<(), Self::Error>;
    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Active-high control lines (asserted = pin high). Boards with inverted wiring invert in their
/// `OutputPin`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Line {
    Reset,
    Powerdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rail {
    Dovdd,
    Avdd,
    Dvdd,
    Afvdd,
    ExtClk,
}

impl Rail {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        match self {
            Rail::Dovdd => 0,
            Rail::Avdd => 1,
            Rail::Dvdd => 2,
            Rail::Afvdd => 3,
            Rail::ExtClk => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowerStep {
    Assert(Line),
    Release(Line),
    Enable(Rail),
    /// Sleep in milliseconds.
    Settle(u32),
}

/// Control lines and switches of one sensor. Missing lines and rails are skipped.
pub struct PowerControl<PIN, SW> {
    reset: Option<PIN>,
    powerdown: Option<PIN>,
    rails: [Option<SW>; Rail::COUNT],
    /// Rails in the order they were enabled.
    enabled: Vec<Rail, { Rail::COUNT }>,
    powered: bool,
}

impl<PIN, SW, PE> PowerControl<PIN, SW>
where
    PIN: OutputPin<Error = PE>,
    PE: fmt::Debug,
    SW: Switch,
{
    pub fn new(reset: Option<PIN>, powerdown: Option<PIN>) -> Self {
        PowerControl {
            reset,
            powerdown,
            rails: [None, None, None, None, None],
            enabled: Vec::new(),
            powered: false,
        }
    }

    /// Attach the switch for `rail`.
    pub fn with_rail(mut self, rail: Rail, switch: SW) -> Self {
        self.rails[rail.index()] = Some(switch);
        self
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    fn line(&mut self, line: Line) -> Option<&mut PIN> {
        match line {
            Line::Reset => self.reset.as_mut(),
            Line::Powerdown => self.powerdown.as_mut(),
        }
    }

    fn run<D: DelayMs<u32>>(&mut self, step: PowerStep, delay: &mut D) -> Result<(), ()> {
        match step {
            PowerStep::Assert(line) | PowerStep::Release(line) => {
                let assert = step == PowerStep::Assert(line);
                if let Some(pin) = self.line(line) {
                    let res = if assert {
                        pin.set_high()
                    } else {
                        pin.set_low()
                    };
                    res.map_err(|e| error!("power: {:?} failed: {:?}", step, e))?;
                }
            }
            PowerStep::Enable(rail) => {
                if self.enabled.contains(&rail) {
                    return Ok(());
                }
                if let Some(switch) = self.rails[rail.index()].as_mut() {
                    switch
                        .enable()
                        .map_err(|e| error!("power: {:?} failed: {:?}", step, e))?;
                    self.enabled.push(rail).map_err(|_| ())?;
                }
            }
            PowerStep::Settle(ms) => delay.delay_ms(ms),
        }

        Ok(())
    }

    /// Run `steps` in order. On failure everything enabled so far is torn down and the failing
    /// step is returned.
    pub fn power_on<D: DelayMs<u32>>(
        &mut self,
        steps: &[PowerStep],
        delay: &mut D,
    ) -> Result<(), PowerStep> {
        for step in steps {
            if self.run(*step, delay).is_err() {
                self.power_off();
                return Err(*step);
            }
        }

        self.powered = true;
        debug!("power: on after {} steps", steps.len());

        Ok(())
    }

    /// Hold the sensor in powerdown and reset, then disable rails in reverse enable order.
    /// Failures are logged and teardown continues.
    pub fn power_off(&mut self) {
        for line in [Line::Powerdown, Line::Reset].iter() {
            if let Some(pin) = self.line(*line) {
                if let Err(e) = pin.set_high() {
                    warn!("power: asserting {:?} failed: {:?}", line, e);
                }
            }
        }

        while let Some(rail) = self.enabled.pop() {
            if let Some(switch) = self.rails[rail.index()].as_mut() {
                if let Err(e) = switch.disable() {
                    warn!("power: disabling {:?} failed: {:?}", rail, e);
                }
            }
        }

        self.powered = false;
    }
}
