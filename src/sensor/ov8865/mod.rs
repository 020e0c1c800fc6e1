//! OV8865 driver.
//!
//! One 10-bit Bayer format, seven modes, 30 fps everywhere and 90 fps at 800x600 only. Mode and
//! rate changes made while the sensor is configured are recorded and applied at the next stream
//! on. Output is gated through MIPI_CTRL rather than the standby bit.

mod settings;

use super::{Error, Format, ImageSensor, Phase, SensorState};
use crate::format::BusFormat;
use crate::mode::{self, FrameInterval, FrameSize, Register as Timing};
use crate::power::{Line, PowerControl, PowerStep, Rail, Switch};
use crate::sccb::{RegValue, Sccb};
use core::fmt;
use embedded_hal::blocking::{delay::DelayMs, i2c};
use embedded_hal::digital::v2::OutputPin;
use log::{debug, error, info, warn};

pub const XCLK_MIN_HZ: u64 = 6_000_000;
pub const XCLK_MAX_HZ: u64 = 27_000_000;

/// Address the sensor answers at after power-on.
pub const DEFAULT_ADDRESS: u8 = 0x36;

const CHIP_ID: u32 = 0x00_8865;

/// Active pixel array.
pub const PIXEL_ARRAY: (u32, u32) = (3264, 2448);

/// Register addresses.
struct Register;

impl Register {
    pub const PLL_CTRL2: u16 = 0x0302;
    pub const PLL_CTRL3: u16 = 0x0303;
    pub const PLL_CTRL4: u16 = 0x0304;
    pub const PLL_CTRLE: u16 = 0x030e;
    pub const PLL_CTRLF: u16 = 0x030f;
    pub const PLL_CTRL1E: u16 = 0x031e;
    pub const SLAVE_ID: u16 = 0x3004;
    pub const CHIP_ID: u16 = 0x300a;
    pub const MIPI_CTRL: u16 = 0x3018;
    pub const CLOCK_SEL: u16 = 0x3020;
    pub const SRB_HOST_INPUT: u16 = 0x3106;
    pub const AEC_PK_MANUAL: u16 = 0x3503;
}

const MIPI_ON: u8 = 0x72;
const MIPI_OFF: u8 = 0x62;

/// AEC_PK_MANUAL bit 2: manual gain.
const MANUAL_GAIN: u8 = 1 << 2;

/// PLL1: multiplier 0x1e, M divider 0, MIPI divider 3.
const PLL: [RegValue; 5] = [
    RegValue::new(Register::PLL_CTRL2, 0x1e),
    RegValue::new(Register::PLL_CTRL3, 0x00),
    RegValue::new(Register::PLL_CTRL4, 0x03),
    RegValue::new(Register::PLL_CTRL1E, 0x0c),
    RegValue::new(Register::CLOCK_SEL, 0x93),
];

const PLL2_SYS_DIVIDER: u8 = 0x00;
const SCLK_DIVIDER: u8 = 0x01;

pub const FORMATS: [BusFormat; 1] = [BusFormat::Srggb10];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameRate {
    Fps30,
    Fps90,
}

const FRAME_RATES: [FrameInterval; 2] = [FrameInterval::from_fps(30), FrameInterval::from_fps(90)];

impl FrameRate {
    pub fn fps(self) -> u32 {
        self.interval().denominator
    }

    pub fn interval(self) -> FrameInterval {
        match self {
            FrameRate::Fps30 => FRAME_RATES[0],
            FrameRate::Fps90 => FRAME_RATES[1],
        }
    }

    fn from_interval(fi: FrameInterval) -> Self {
        if fi == FRAME_RATES[1] {
            FrameRate::Fps90
        } else {
            FrameRate::Fps30
        }
    }
}

/// One capture mode: active size, totals and the SCLK PLL setting.
#[derive(Debug)]
pub struct Ov8865Mode {
    pub width: u32,
    pub hts: u32,
    pub height: u32,
    pub vts: u32,
    /// PLL_CTRLF value.
    pub sclk_pll: u8,
    pub settings: &'static [RegValue],
}

impl Ov8865Mode {
    /// The output must fit the array, halved for binned readout, leave vertical blanking and
    /// keep its sizes even. The settings table must not touch what `write_mode` and streaming
    /// own.
    pub fn check(&self, array: (u32, u32)) -> bool {
        let binned = self.settings == &settings::BINNED[..];
        let (max_w, max_h) = if binned {
            (array.0 / 2, array.1 / 2)
        } else {
            array
        };
        let owned = |addr: u16| {
            (Timing::X_OUTPUT_SIZE..=Timing::VTS + 1).contains(&addr)
                || addr == Register::MIPI_CTRL
        };

        self.width <= max_w
            && self.height <= max_h
            && self.width % 2 == 0
            && self.height % 2 == 0
            && self.vts > self.height
            && !self.settings.iter().any(|r| owned(r.addr))
    }
}

impl FrameSize for Ov8865Mode {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

pub static MODES: [Ov8865Mode; 7] = [
    Ov8865Mode {
        width: 3264,
        hts: 1944,
        height: 2448,
        vts: 2470,
        sclk_pll: 0x04,
        settings: &settings::QUXGA,
    },
    Ov8865Mode {
        width: 3264,
        hts: 2582,
        height: 1836,
        vts: 1858,
        sclk_pll: 0x04,
        settings: &settings::CROPPED,
    },
    Ov8865Mode {
        width: 1920,
        hts: 2582,
        height: 1080,
        vts: 1858,
        sclk_pll: 0x04,
        settings: &settings::CROPPED,
    },
    Ov8865Mode {
        width: 1280,
        hts: 1923,
        height: 720,
        vts: 1248,
        sclk_pll: 0x09,
        settings: &settings::BINNED,
    },
    Ov8865Mode {
        width: 1600,
        hts: 1923,
        height: 1200,
        vts: 1248,
        sclk_pll: 0x09,
        settings: &settings::BINNED,
    },
    Ov8865Mode {
        width: 800,
        hts: 1250,
        height: 600,
        vts: 640,
        sclk_pll: 0x09,
        settings: &settings::BINNED,
    },
    Ov8865Mode {
        width: 640,
        hts: 2582,
        height: 480,
        vts: 1858,
        sclk_pll: 0x04,
        settings: &settings::CROPPED,
    },
];

/// Clock before supplies, reset released last.
const POWER_ON: [PowerStep; 10] = [
    PowerStep::Assert(Line::Powerdown),
    PowerStep::Assert(Line::Reset),
    PowerStep::Enable(Rail::ExtClk),
    PowerStep::Release(Line::Powerdown),
    PowerStep::Enable(Rail::Avdd),
    PowerStep::Enable(Rail::Dovdd),
    PowerStep::Enable(Rail::Dvdd),
    PowerStep::Enable(Rail::Afvdd),
    PowerStep::Release(Line::Reset),
    PowerStep::Settle(10),
];

/// Nearest mode for a rate. With `nearest` unset the size must match exactly.
fn find_mode(
    rate: FrameRate,
    width: u32,
    height: u32,
    nearest: bool,
) -> Option<&'static Ov8865Mode> {
    let mode = mode::find_nearest(&MODES, width, height)?;
    if !nearest && (mode.width != width || mode.height != height) {
        return None;
    }

    // 90 fps only at SVGA
    if rate == FrameRate::Fps90 && !(mode.width == 800 && mode.height == 600) {
        return None;
    }

    Some(mode)
}

/// Snap a requested interval to 30 or 90 fps and check a mode of exactly `width`x`height`
/// supports it.
fn try_frame_interval(
    requested: FrameInterval,
    width: u32,
    height: u32,
) -> Option<(FrameRate, FrameInterval)> {
    let interval = mode::nearest_interval(&FRAME_RATES, requested)?;
    let rate = FrameRate::from_interval(interval);
    find_mode(rate, width, height, false)?;

    Some((rate, interval))
}

#[derive(Clone, Copy, Debug)]
pub struct Ov8865Config {
    pub xclk_hz: u64,
    pub lanes: u8,
    /// 7-bit bus address, programmed at every power-on when not the default.
    pub address: u8,
    /// Hold auto-gain off while a mode is written.
    pub auto_gain: bool,
}

impl Default for Ov8865Config {
    fn default() -> Self {
        Ov8865Config {
            xclk_hz: 24_000_000,
            lanes: 4,
            address: DEFAULT_ADDRESS,
            auto_gain: true,
        }
    }
}

/// OV8865 driver.
pub struct Ov8865<I2C, D, PIN, SW> {
    i2c: I2C,
    sccb: Sccb<I2C>,
    delay: D,
    power: PowerControl<PIN, SW>,
    config: Ov8865Config,
    state: SensorState<Ov8865Mode>,
    rate: FrameRate,
    /// Selection differs from what the registers hold.
    pending: bool,
}

impl<I2C, D, PIN, SW, E, PE> Ov8865<I2C, D, PIN, SW>
where
    I2C: i2c::Read<Error = E> + i2c::Write<Error = E>,
    D: DelayMs<u32>,
    PIN: OutputPin<Error = PE>,
    PE: fmt::Debug,
    SW: Switch,
    E: fmt::Debug,
{
    pub fn new(
        i2c: I2C,
        delay: D,
        power: PowerControl<PIN, SW>,
        config: Ov8865Config,
    ) -> Result<Self, Error<E>> {
        if config.xclk_hz < XCLK_MIN_HZ || config.xclk_hz > XCLK_MAX_HZ {
            error!("ov8865: xclk {} Hz out of range", config.xclk_hz);
            return Err(Error::OutOfRange);
        }
        if !matches!(config.lanes, 1 | 2 | 4) {
            error!("ov8865: unsupported lane count {}", config.lanes);
            return Err(Error::OutOfRange);
        }

        let sccb = Sccb::new(&i2c, DEFAULT_ADDRESS);
        Ok(Ov8865 {
            i2c,
            sccb,
            delay,
            power,
            config,
            state: SensorState::new(&MODES[0], FORMATS[0]),
            rate: FrameRate::Fps30,
            pending: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn mode(&self) -> &'static Ov8865Mode {
        self.state.mode()
    }

    /// Power on and move the sensor to its configured bus address.
    pub fn power_on(&mut self) -> Result<(), Error<E>> {
        if self.state.is_powered() {
            return Ok(());
        }

        self.power
            .power_on(&POWER_ON, &mut self.delay)
            .map_err(|step| {
                error!("ov8865: power on failed at {:?}", step);
                Error::PowerSequence(step)
            })?;

        // Power loss puts the sensor back at its default address
        self.sccb = Sccb::new(&self.i2c, DEFAULT_ADDRESS);
        if let Err(e) = self
            .sccb
            .reassign(&mut self.i2c, Register::SLAVE_ID, self.config.address)
        {
            error!("ov8865: moving to {:#04x} failed: {}", self.config.address, e);
            self.power.power_off();
            return Err(e.into());
        }

        self.state.powered_on();
        Ok(())
    }

    pub fn power_off(&mut self) {
        if !self.state.is_powered() {
            return;
        }

        self.power.power_off();
        self.state.powered_off();
        debug!("ov8865: powered off");
    }

    /// Power on, identify, load the init table and program the selected mode.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.power_on()?;

        if let Err(e) = self.identify().and_then(|_| self.restore()) {
            error!("ov8865: init failed: {}", e);
            self.power_off();
            return Err(e);
        }

        Ok(())
    }

    fn restore(&mut self) -> Result<(), Error<E>> {
        self.sccb
            .write_sequence(&mut self.i2c, &mut self.delay, &settings::INIT)?;

        let (mode, format) = (self.state.mode(), self.state.format());
        self.configure(mode, format)
    }

    pub fn suspend(&mut self) {
        let was_streaming = self.state.is_streaming();
        if was_streaming {
            if let Err(e) = self.set_streaming(false) {
                warn!("ov8865: stream off before suspend failed: {}", e);
            }
        }

        self.power_off();
        self.state.suspended(was_streaming);
    }

    pub fn resume(&mut self) -> Result<(), Error<E>> {
        let restream = self.state.take_resume_streaming();
        self.init()?;

        if restream {
            if let Err(e) = self.set_streaming(true) {
                error!("ov8865: restarting stream failed: {}", e);
                self.power_off();
                return Err(e);
            }
        }

        Ok(())
    }

    fn set_auto_gain(&mut self, on: bool) -> Result<(), Error<E>> {
        let bits = if on { 0 } else { MANUAL_GAIN };
        self.sccb
            .update_bits(&mut self.i2c, Register::AEC_PK_MANUAL, MANUAL_GAIN, bits)?;
        Ok(())
    }

    fn write_mode(&mut self, mode: &'static Ov8865Mode) -> Result<(), Error<E>> {
        let sclk = [
            RegValue::new(Register::PLL_CTRLF, mode.sclk_pll),
            RegValue::new(Register::PLL_CTRLE, PLL2_SYS_DIVIDER),
            RegValue::new(Register::SRB_HOST_INPUT, SCLK_DIVIDER),
        ];
        for seq in [&PLL[..], &sclk[..], mode.settings].iter() {
            self.sccb.write_sequence(&mut self.i2c, &mut self.delay, seq)?;
        }

        let timings = [
            (Timing::X_OUTPUT_SIZE, mode.width),
            (Timing::Y_OUTPUT_SIZE, mode.height),
            (Timing::HTS, mode.hts),
            (Timing::VTS, mode.vts),
        ];
        for (addr, val) in timings.iter() {
            self.sccb.write16(&mut self.i2c, *addr, *val as u16)?;
        }

        Ok(())
    }

    pub fn enumerate_formats(&self, index: usize) -> Result<BusFormat, Error<E>> {
        FORMATS.get(index).copied().ok_or(Error::OutOfRange)
    }

    pub fn enumerate_sizes(&self, index: usize) -> Result<(u32, u32), Error<E>> {
        mode::enumerate(&MODES, index)
            .map(|m| (m.width, m.height))
            .ok_or(Error::OutOfRange)
    }

    /// `index` walks the 30/90 fps rates; a rate the size cannot run at is unsupported.
    pub fn enumerate_frame_intervals(
        &self,
        index: usize,
        width: u32,
        height: u32,
    ) -> Result<FrameInterval, Error<E>> {
        let requested = FRAME_RATES.get(index).ok_or(Error::OutOfRange)?;

        try_frame_interval(*requested, width, height)
            .map(|(_, fi)| fi)
            .ok_or(Error::UnsupportedMode)
    }

    pub fn format(&self) -> Format {
        let mode = self.state.mode();
        Format {
            width: mode.width,
            height: mode.height,
            code: self.state.format(),
        }
    }

    pub fn set_format(&mut self, requested: Format) -> Result<Format, Error<E>> {
        if self.state.is_streaming() {
            return Err(Error::Busy);
        }

        let mode = find_mode(self.rate, requested.width, requested.height, true)
            .ok_or(Error::UnsupportedMode)?;
        self.select(mode)?;

        Ok(self.format())
    }

    /// Record a selection. Applied immediately when powered but unconfigured, deferred to
    /// stream on when configured.
    fn select(&mut self, mode: &'static Ov8865Mode) -> Result<(), Error<E>> {
        let format = FORMATS[0];
        match self.state.phase() {
            Phase::PoweredStandby => self.configure(mode, format),
            // The rate has no register of its own, only pixel_rate follows it
            Phase::ConfiguredStandby if core::ptr::eq(mode, self.state.mode()) => Ok(()),
            Phase::ConfiguredStandby => {
                self.state.select(mode, format);
                self.pending = true;
                Ok(())
            }
            Phase::Unpowered | Phase::Streaming => {
                self.state.select(mode, format);
                Ok(())
            }
        }
    }

    pub fn frame_interval(&self) -> FrameInterval {
        self.rate.interval()
    }

    pub fn set_frame_interval(
        &mut self,
        requested: FrameInterval,
    ) -> Result<FrameInterval, Error<E>> {
        if self.state.is_streaming() {
            return Err(Error::Busy);
        }

        let current = self.state.mode();
        let (rate, interval) = try_frame_interval(requested, current.width, current.height)
            .ok_or(Error::UnsupportedMode)?;

        self.rate = rate;
        self.select(current)?;

        Ok(interval)
    }
}

impl<I2C, D, PIN, SW, E, PE> ImageSensor for Ov8865<I2C, D, PIN, SW>
where
    I2C: i2c::Read<Error = E> + i2c::Write<Error = E>,
    D: DelayMs<u32>,
    PIN: OutputPin<Error = PE>,
    PE: fmt::Debug,
    SW: Switch,
    E: fmt::Debug,
{
    type Mode = Ov8865Mode;
    type Error = Error<E>;

    fn identify(&mut self) -> Result<(), Error<E>> {
        if !self.state.is_powered() {
            return Err(Error::NotPowered);
        }

        let found = self.sccb.read_be(&mut self.i2c, Register::CHIP_ID, 3)?;
        if found != CHIP_ID {
            error!("ov8865: unexpected chip id {:#08x}", found);
            return Err(Error::UnexpectedDevice {
                expected: CHIP_ID,
                found,
            });
        }

        info!("ov8865: found at {:#04x}", self.sccb.address());
        Ok(())
    }

    /// Auto-gain is held off while the PLL, sensor core and timing registers change.
    fn configure(
        &mut self,
        mode: &'static Ov8865Mode,
        format: BusFormat,
    ) -> Result<(), Error<E>> {
        self.state.check_configure()?;
        if !FORMATS.contains(&format) {
            return Err(Error::UnsupportedMode);
        }

        if self.config.auto_gain {
            self.set_auto_gain(false)?;
        }

        let res = self.write_mode(mode);

        if self.config.auto_gain {
            if let Err(e) = self.set_auto_gain(true) {
                warn!("ov8865: restoring auto-gain failed: {}", e);
            }
        }

        if let Err(e) = res {
            error!("ov8865: configure failed: {}", e);
            self.state.powered_on();
            return Err(e);
        }

        debug!("ov8865: {}x{} configured", mode.width, mode.height);
        self.state.configured(mode, format);
        self.pending = false;

        Ok(())
    }

    /// Pending changes are written before the MIPI output is ungated.
    fn set_streaming(&mut self, enable: bool) -> Result<(), Error<E>> {
        if enable == self.state.is_streaming() {
            return Ok(());
        }

        if enable {
            self.state.check_stream_on()?;
            if self.pending {
                let (mode, format) = (self.state.mode(), self.state.format());
                self.configure(mode, format)?;
            }
        }

        let val = if enable { MIPI_ON } else { MIPI_OFF };
        self.sccb.write(&mut self.i2c, Register::MIPI_CTRL, val)?;
        self.state.streaming(enable);

        Ok(())
    }

    /// HTS x VTS x fps of the selected mode.
    fn pixel_rate(&self) -> u64 {
        let mode = self.state.mode();
        u64::from(mode.hts) * u64::from(mode.vts) * u64::from(self.rate.fps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{journal, Event, Journal, MockDelay, MockI2c, MockPin, MockSwitch};

    type Sensor = Ov8865<MockI2c, MockDelay, MockPin, MockSwitch>;

    fn sensor(log: &Journal, config: Ov8865Config) -> (Sensor, MockI2c) {
        let i2c = MockI2c::new(DEFAULT_ADDRESS, log);
        i2c.answer_at(config.address);
        i2c.set(0x300a, 0x00);
        i2c.set(0x300b, 0x88);
        i2c.set(0x300c, 0x65);

        let power = PowerControl::new(
            Some(MockPin::new("reset", log)),
            Some(MockPin::new("pwdn", log)),
        )
        .with_rail(Rail::Avdd, MockSwitch::new("avdd", log))
        .with_rail(Rail::Dovdd, MockSwitch::new("dovdd", log))
        .with_rail(Rail::Dvdd, MockSwitch::new("dvdd", log))
        .with_rail(Rail::Afvdd, MockSwitch::new("afvdd", log))
        .with_rail(Rail::ExtClk, MockSwitch::new("xclk", log));

        let dev = Ov8865::new(i2c.clone(), MockDelay::new(log), power, config).unwrap();
        (dev, i2c)
    }

    fn reg16(i2c: &MockI2c, addr: u16) -> u16 {
        u16::from_be_bytes([i2c.get(addr), i2c.get(addr + 1)])
    }

    #[test]
    fn catalog_fits_the_array() {
        for mode in MODES.iter() {
            assert!(mode.check(PIXEL_ARRAY), "{}x{}", mode.width, mode.height);
        }

        let oversized = Ov8865Mode {
            width: 1920,
            ..MODES[3]
        };
        assert!(!oversized.check(PIXEL_ARRAY));
    }

    #[test]
    fn rate_only_change_needs_no_reprogramming() {
        let log = journal();
        let (mut dev, _) = sensor(&log, Ov8865Config::default());
        dev.init().unwrap();
        dev.set_format(Format {
            width: 800,
            height: 600,
            code: BusFormat::Srggb10,
        })
        .unwrap();
        dev.set_streaming(true).unwrap();
        dev.set_streaming(false).unwrap();
        log.clear();

        let got = dev.set_frame_interval(FrameInterval::from_fps(90)).unwrap();

        assert_eq!(got, FrameInterval::from_fps(90));
        assert!(log.i2c_writes().is_empty());
        assert!(!dev.pending);
        assert_eq!(dev.pixel_rate(), 1250 * 640 * 90);
    }

    #[test]
    fn ninety_fps_only_at_svga() {
        assert!(find_mode(FrameRate::Fps90, 800, 600, false).is_some());
        assert!(find_mode(FrameRate::Fps90, 640, 480, false).is_none());
        assert!(find_mode(FrameRate::Fps30, 650, 490, false).is_none());
        assert_eq!(
            find_mode(FrameRate::Fps30, 650, 490, true).map(|m| m.width),
            Some(640)
        );
    }

    #[test]
    fn frame_interval_negotiation() {
        assert_eq!(
            try_frame_interval(FrameInterval::new(0, 0), 800, 600),
            Some((FrameRate::Fps90, FrameInterval::from_fps(90)))
        );
        // 60 fps is equally far from both rates
        assert_eq!(
            try_frame_interval(FrameInterval::from_fps(60), 800, 600),
            Some((FrameRate::Fps30, FrameInterval::from_fps(30)))
        );
        assert_eq!(
            try_frame_interval(FrameInterval::from_fps(75), 800, 600),
            Some((FrameRate::Fps90, FrameInterval::from_fps(90)))
        );
        assert_eq!(
            try_frame_interval(FrameInterval::from_fps(120), 1920, 1080),
            None
        );
    }

    #[test]
    fn power_on_gates_the_clock_before_the_supplies() {
        let log = journal();
        let (mut dev, _) = sensor(&log, Ov8865Config::default());

        dev.power_on().unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Pin("pwdn", true),
                Event::Pin("reset", true),
                Event::Switch("xclk", true),
                Event::Pin("pwdn", false),
                Event::Switch("avdd", true),
                Event::Switch("dovdd", true),
                Event::Switch("dvdd", true),
                Event::Switch("afvdd", true),
                Event::Pin("reset", false),
                Event::Sleep(10),
            ]
        );
    }

    #[test]
    fn rejects_out_of_range_xclk() {
        let log = journal();
        let config = Ov8865Config {
            xclk_hz: 5_000_000,
            ..Default::default()
        };
        let power: PowerControl<MockPin, MockSwitch> = PowerControl::new(None, None);

        let res = Ov8865::new(
            MockI2c::new(DEFAULT_ADDRESS, &log),
            MockDelay::new(&log),
            power,
            config,
        );

        assert!(matches!(res, Err(Error::OutOfRange)));
    }

    #[test]
    fn custom_address_is_programmed_through_the_default_one() {
        let log = journal();
        let config = Ov8865Config {
            address: 0x10,
            ..Default::default()
        };
        let (mut dev, i2c) = sensor(&log, config);

        dev.init().unwrap();

        assert_eq!(i2c.transfers_to(DEFAULT_ADDRESS), vec![vec![0x30, 0x04, 0x20]]);
        assert!(!i2c.transfers_to(0x10).is_empty());
        assert_eq!(dev.phase(), Phase::ConfiguredStandby);
    }

    #[test]
    fn wrong_chip_is_fatal() {
        let log = journal();
        let (mut dev, i2c) = sensor(&log, Ov8865Config::default());
        i2c.set(0x300c, 0x56);

        assert!(matches!(
            dev.init(),
            Err(Error::UnexpectedDevice {
                expected: 0x8865,
                found: 0x8856
            })
        ));
        assert_eq!(dev.phase(), Phase::Unpowered);
    }

    #[test]
    fn init_loads_table_then_mode_with_auto_gain_held() {
        let log = journal();
        let (mut dev, i2c) = sensor(&log, Ov8865Config::default());

        dev.init().unwrap();

        let writes = log.i2c_writes();
        assert_eq!(writes[0], (0x0103, 0x01));
        assert!(log.position(Event::Sleep(16)).is_some());

        let hold = writes
            .iter()
            .position(|w| *w == (0x3503, MANUAL_GAIN))
            .unwrap();
        let pll = writes.iter().position(|w| *w == (0x0302, 0x1e)).unwrap();
        assert!(hold < pll);
        assert_eq!(writes.last(), Some(&(0x3503, 0x00)));

        assert_eq!(reg16(&i2c, 0x3808), 3264);
        assert_eq!(reg16(&i2c, 0x380a), 2448);
        assert_eq!(reg16(&i2c, 0x380c), 1944);
        assert_eq!(reg16(&i2c, 0x380e), 2470);
        assert_eq!(i2c.get(0x030f), 0x04);
    }

    #[test]
    fn configured_changes_wait_for_stream_on() {
        let log = journal();
        let (mut dev, i2c) = sensor(&log, Ov8865Config::default());
        dev.init().unwrap();
        log.clear();

        let got = dev
            .set_format(Format {
                width: 1600,
                height: 1200,
                code: BusFormat::Sbggr8,
            })
            .unwrap();

        assert_eq!(got.code, BusFormat::Srggb10);
        assert!(log.i2c_writes().is_empty());
        assert_eq!(reg16(&i2c, 0x3808), 3264);

        dev.set_streaming(true).unwrap();

        assert_eq!(reg16(&i2c, 0x3808), 1600);
        assert_eq!(i2c.get(0x030f), 0x09);
        assert_eq!(log.i2c_writes().last(), Some(&(0x3018, MIPI_ON)));
        assert_eq!(dev.phase(), Phase::Streaming);
    }

    #[test]
    fn stream_toggles_mipi_ctrl() {
        let log = journal();
        let (mut dev, i2c) = sensor(&log, Ov8865Config::default());
        dev.init().unwrap();

        dev.set_streaming(true).unwrap();
        assert_eq!(i2c.get(0x3018), MIPI_ON);
        assert!(matches!(
            dev.configure(&MODES[2], BusFormat::Srggb10),
            Err(Error::Busy)
        ));
        assert!(matches!(
            dev.set_frame_interval(FrameInterval::from_fps(30)),
            Err(Error::Busy)
        ));

        dev.set_streaming(false).unwrap();
        assert_eq!(i2c.get(0x3018), MIPI_OFF);
        assert_eq!(dev.phase(), Phase::ConfiguredStandby);
    }

    #[test]
    fn pixel_rate_follows_mode_and_rate() {
        let log = journal();
        let (mut dev, _) = sensor(&log, Ov8865Config::default());

        assert_eq!(dev.pixel_rate(), 1944 * 2470 * 30);

        dev.set_format(Format {
            width: 800,
            height: 600,
            code: BusFormat::Srggb10,
        })
        .unwrap();
        let fi = dev.set_frame_interval(FrameInterval::from_fps(90)).unwrap();

        assert_eq!(fi, FrameInterval::from_fps(90));
        assert_eq!(dev.pixel_rate(), 1250 * 640 * 90);
    }

    #[test]
    fn ninety_fps_is_refused_off_svga() {
        let log = journal();
        let (mut dev, _) = sensor(&log, Ov8865Config::default());

        assert!(matches!(
            dev.set_frame_interval(FrameInterval::from_fps(90)),
            Err(Error::UnsupportedMode)
        ));
        assert_eq!(dev.frame_interval(), FrameInterval::from_fps(30));
        assert!(matches!(
            dev.enumerate_frame_intervals(1, 1920, 1080),
            Err(Error::UnsupportedMode)
        ));
        assert_eq!(
            dev.enumerate_frame_intervals(1, 800, 600).unwrap(),
            FrameInterval::from_fps(90)
        );
        assert!(matches!(
            dev.enumerate_frame_intervals(2, 800, 600),
            Err(Error::OutOfRange)
        ));
    }
}
