//! Image sensor drivers.
//!
//! Each driver owns its bus, delay and power handles and walks the same phases:
//!
//! ```text
//! Unpowered --power_on--> PoweredStandby --configure--> ConfiguredStandby <--stream--> Streaming
//! ```
//!
//! `configure` is refused while streaming and `power_off` always lands in `Unpowered`.

#[cfg(feature = "ov4689")]
pub mod ov4689;
#[cfg(feature = "ov8865")]
pub mod ov8865;

use crate::clock::ClockError;
use crate::format::BusFormat;
use crate::power::PowerStep;
use crate::sccb::{MapError, SccbError, SequenceError};
use core::fmt;
use log::debug;
use std::sync::{Mutex, PoisonError};
use thiserror::Error as ThisError;

/// What the link and ISP layers need from a sensor.
pub trait ImageSensor {
    /// Static mode descriptor of the sensor's catalog.
    type Mode: 'static;
    type Error: fmt::Debug;

    /// Check the chip id.
    fn identify(&mut self) -> Result<(), Self::Error>;
    /// Program `mode` with `format` on the bus. Refused while streaming.
    fn configure(&mut self, mode: &'static Self::Mode, format: BusFormat)
        -> Result<(), Self::Error>;
    fn set_streaming(&mut self, enable: bool) -> Result<(), Self::Error>;
    /// Pixels per second on the bus, zero when unknown.
    fn pixel_rate(&self) -> u64;
}

/// Sensor driver errors.
#[derive(Debug, ThisError)]
pub enum Error<E: fmt::Debug> {
    #[error("bus error: {0}")]
    Bus(SccbError<E>),
    #[error("unexpected chip id {found:#x}, expected {expected:#x}")]
    UnexpectedDevice { expected: u32, found: u32 },
    #[error("power sequence failed at {0:?}")]
    PowerSequence(PowerStep),
    #[error("sensor is streaming")]
    Busy,
    #[error("sensor is not powered")]
    NotPowered,
    #[error("no mode configured")]
    NotConfigured,
    #[error("unsupported mode")]
    UnsupportedMode,
    #[error("index out of range")]
    OutOfRange,
    #[error("clock: {0}")]
    Clock(ClockError),
}

impl<E: fmt::Debug> From<SccbError<E>> for Error<E> {
    fn from(err: SccbError<E>) -> Self {
        Error::Bus(err)
    }
}

impl<E: fmt::Debug> From<SequenceError<E>> for Error<E> {
    fn from(err: SequenceError<E>) -> Self {
        debug!("sensor: sequence stopped after {} writes", err.written);
        Error::Bus(err.error)
    }
}

impl<E: fmt::Debug> From<ClockError> for Error<E> {
    fn from(err: ClockError) -> Self {
        Error::Clock(err)
    }
}

impl<E: fmt::Debug> From<MapError> for Error<E> {
    fn from(err: MapError) -> Self {
        Error::Bus(err.into())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Unpowered,
    PoweredStandby,
    ConfiguredStandby,
    Streaming,
}

/// Format on the sensor's source pad.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Format {
    pub width: u32,
    pub height: u32,
    pub code: BusFormat,
}

/// Runtime state of one sensor: phase, selected mode and format, and whether streaming
/// should come back after resume.
#[derive(Debug)]
pub struct SensorState<M: 'static> {
    phase: Phase,
    mode: &'static M,
    format: BusFormat,
    resume_streaming: bool,
}

impl<M> SensorState<M> {
    pub fn new(mode: &'static M, format: BusFormat) -> Self {
        SensorState {
            phase: Phase::Unpowered,
            mode,
            format,
            resume_streaming: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> &'static M {
        self.mode
    }

    pub fn format(&self) -> BusFormat {
        self.format
    }

    pub fn is_powered(&self) -> bool {
        self.phase != Phase::Unpowered
    }

    pub fn is_streaming(&self) -> bool {
        self.phase == Phase::Streaming
    }

    pub fn check_configure<E: fmt::Debug>(&self) -> Result<(), Error<E>> {
        match self.phase {
            Phase::Streaming => Err(Error::Busy),
            Phase::Unpowered => Err(Error::NotPowered),
            Phase::PoweredStandby | Phase::ConfiguredStandby => Ok(()),
        }
    }

    pub fn check_stream_on<E: fmt::Debug>(&self) -> Result<(), Error<E>> {
        match self.phase {
            Phase::ConfiguredStandby | Phase::Streaming => Ok(()),
            Phase::PoweredStandby => Err(Error::NotConfigured),
            Phase::Unpowered => Err(Error::NotPowered),
        }
    }

    /// Record a selection without touching hardware.
    pub fn select(&mut self, mode: &'static M, format: BusFormat) {
        self.mode = mode;
        self.format = format;
    }

    pub fn powered_on(&mut self) {
        self.phase = Phase::PoweredStandby;
    }

    pub fn configured(&mut self, mode: &'static M, format: BusFormat) {
        self.select(mode, format);
        self.phase = Phase::ConfiguredStandby;
    }

    pub fn streaming(&mut self, on: bool) {
        self.phase = if on {
            Phase::Streaming
        } else {
            Phase::ConfiguredStandby
        };
    }

    pub fn powered_off(&mut self) {
        self.phase = Phase::Unpowered;
    }

    /// Remember whether streaming was active when going to sleep.
    pub fn suspended(&mut self, was_streaming: bool) {
        self.resume_streaming = was_streaming;
        self.phase = Phase::Unpowered;
    }

    pub fn take_resume_streaming(&mut self) -> bool {
        core::mem::replace(&mut self.resume_streaming, false)
    }
}

/// A device behind its serialization lock. Every operation holds the lock for its whole
/// duration, including bus transfers and settle delays.
pub struct Locked<T> {
    inner: Mutex<T>,
}

impl<T> Locked<T> {
    pub fn new(device: T) -> Self {
        Locked {
            inner: Mutex::new(device),
        }
    }

    /// Run `f` with exclusive access. A panic in an earlier holder does not make the device
    /// unusable; its phase still reflects the last completed transition.
    pub fn with<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn into_inner(self) -> T {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockError;
    use std::sync::Arc;
    use std::thread;

    static MODE_A: u8 = 0;
    static MODE_B: u8 = 1;

    type TestError = Error<MockError>;

    #[test]
    fn configure_is_refused_while_streaming() {
        let mut state = SensorState::new(&MODE_A, BusFormat::Sbggr10);
        state.powered_on();
        state.configured(&MODE_A, BusFormat::Sbggr10);
        state.streaming(true);

        assert!(matches!(
            state.check_configure::<MockError>(),
            Err(TestError::Busy)
        ));
        assert_eq!(state.phase(), Phase::Streaming);
    }

    #[test]
    fn stream_on_requires_a_configured_mode() {
        let mut state = SensorState::new(&MODE_A, BusFormat::Sbggr10);
        assert!(matches!(
            state.check_stream_on::<MockError>(),
            Err(TestError::NotPowered)
        ));

        state.powered_on();
        assert!(matches!(
            state.check_stream_on::<MockError>(),
            Err(TestError::NotConfigured)
        ));

        state.configured(&MODE_B, BusFormat::Sbggr8);
        assert!(state.check_stream_on::<MockError>().is_ok());
    }

    #[test]
    fn stream_round_trip_keeps_selection() {
        let mut state = SensorState::new(&MODE_A, BusFormat::Sbggr10);
        state.powered_on();
        state.configured(&MODE_B, BusFormat::Sbggr8);

        state.streaming(true);
        state.streaming(false);

        assert_eq!(state.phase(), Phase::ConfiguredStandby);
        assert_eq!(*state.mode(), MODE_B);
        assert_eq!(state.format(), BusFormat::Sbggr8);
    }

    #[test]
    fn resume_flag_is_consumed_once() {
        let mut state = SensorState::new(&MODE_A, BusFormat::Sbggr10);
        state.suspended(true);

        assert_eq!(state.phase(), Phase::Unpowered);
        assert!(state.take_resume_streaming());
        assert!(!state.take_resume_streaming());
    }

    #[test]
    fn locked_serializes_callers() {
        let device = Arc::new(Locked::new(0u32));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let device = Arc::clone(&device);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        device.with(|count| *count += 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(device.with(|count| *count), 4000);
    }

    #[test]
    fn locked_survives_a_panicking_holder() {
        let device = Arc::new(Locked::new(7u32));
        let clone = Arc::clone(&device);

        let _ = thread::spawn(move || clone.with(|_| panic!("holder died"))).join();

        assert_eq!(device.with(|value| *value), 7);
    }
}
