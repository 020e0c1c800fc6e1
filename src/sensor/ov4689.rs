//! OV4689 driver.
//!
//! All modes run the pixel clock at 84 MHz from a 24 MHz reference; only the PLL multiplier and
//! bit divider change between 8-bit and 10-bit output.

use super::{Error, Format, ImageSensor, Phase, SensorState};
use crate::clock::{
    self, ClockError, ClockRates, PLL1_NATIVE_10BIT, PLL1_NATIVE_8BIT, PLL2_NATIVE,
};
use crate::format::BusFormat;
use crate::mode::{self, Axis, FrameInterval, FrameSize, Increment, Mode};
use crate::power::{Line, PowerControl, PowerStep, Rail, Switch};
use crate::sccb::Sccb;
use core::fmt;
use embedded_hal::blocking::{delay::DelayMs, i2c};
use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;
use log::{debug, error, info, warn};

/// The PLL tables are only validated against this reference.
pub const EXTCLK_HZ: u64 = 24_000_000;

/// SCLK and PCLK of every mode.
pub const PCLK_HZ: u64 = 84_000_000;

/// Active pixel array.
pub const PIXEL_ARRAY: (u16, u16) = (2624, 1956);

const CHIP_ID: u32 = 0x4688;

/// Register addresses.
struct Register;

impl Register {
    pub const SW_STANDBY: u16 = 0x0100;
    pub const SW_RESET: u16 = 0x0103;
    pub const CHIP_ID_H: u16 = 0x300a;
}

/// SW_STANDBY bit 0: streaming.
const STREAM_ON: u8 = 1 << 0;

/// SW_RESET bit 0: self-clearing reset.
const SOFT_RESET: u8 = 1 << 0;

/// Supported output formats, default first.
pub const FORMATS: [BusFormat; 2] = [BusFormat::Sbggr10, BusFormat::Sbggr8];

/// DOVDD before AVDD before DVDD, clock only once the supplies are up.
const POWER_ON: [PowerStep; 10] = [
    PowerStep::Assert(Line::Reset),
    PowerStep::Assert(Line::Powerdown),
    PowerStep::Enable(Rail::Dovdd),
    PowerStep::Enable(Rail::Avdd),
    PowerStep::Enable(Rail::Dvdd),
    PowerStep::Settle(5),
    PowerStep::Enable(Rail::ExtClk),
    PowerStep::Release(Line::Reset),
    PowerStep::Release(Line::Powerdown),
    PowerStep::Settle(20),
];

const fn axis(crop_start: u16, offset: u16, output: u16, crop_end: u16, total: u16) -> Axis {
    Axis {
        crop_start,
        offset,
        output,
        crop_end,
        total,
    }
}

const INC_2: Increment = Increment { odd: 3, even: 1 };
const INC_4: Increment = Increment { odd: 7, even: 1 };

const fn interval(fps: u32) -> [FrameInterval; 2] {
    [FrameInterval::from_fps(fps), FrameInterval::from_fps(fps)]
}

const MODE_COUNT: usize = 6;

/// Mode catalog, full resolution first.
pub static MODES: [Mode; MODE_COUNT] = [
    Mode {
        x: axis(16, 0, 2592, 2607, 2816),
        y: axis(6, 0, 1944, 1949, 1984),
        binning_x: false,
        binning_y: false,
        inc_x: Increment::FULL,
        inc_y: Increment::FULL,
        frame_interval: interval(15),
        pll1: [&PLL1_NATIVE_8BIT, &PLL1_NATIVE_10BIT],
        pll2: &PLL2_NATIVE,
    },
    Mode {
        x: axis(512, 0, 1600, 2111, 2816),
        y: axis(378, 0, 1200, 1577, 1984),
        binning_x: false,
        binning_y: false,
        inc_x: Increment::FULL,
        inc_y: Increment::FULL,
        frame_interval: interval(15),
        pll1: [&PLL1_NATIVE_8BIT, &PLL1_NATIVE_10BIT],
        pll2: &PLL2_NATIVE,
    },
    Mode {
        x: axis(352, 0, 1920, 2271, 2816),
        y: axis(438, 0, 1080, 1517, 1984),
        binning_x: false,
        binning_y: false,
        inc_x: Increment::FULL,
        inc_y: Increment::FULL,
        frame_interval: interval(15),
        pll1: [&PLL1_NATIVE_8BIT, &PLL1_NATIVE_10BIT],
        pll2: &PLL2_NATIVE,
    },
    Mode {
        x: axis(16, 8, 1280, 2607, 1912),
        y: axis(6, 6, 960, 1949, 1496),
        binning_x: true,
        binning_y: false,
        inc_x: INC_2,
        inc_y: INC_2,
        frame_interval: interval(30),
        pll1: [&PLL1_NATIVE_8BIT, &PLL1_NATIVE_10BIT],
        pll2: &PLL2_NATIVE,
    },
    Mode {
        x: axis(16, 8, 1280, 2607, 1912),
        y: axis(254, 2, 720, 1701, 1496),
        binning_x: true,
        binning_y: false,
        inc_x: INC_2,
        inc_y: INC_2,
        frame_interval: interval(30),
        pll1: [&PLL1_NATIVE_8BIT, &PLL1_NATIVE_10BIT],
        pll2: &PLL2_NATIVE,
    },
    Mode {
        x: axis(0, 8, 640, 2623, 1896),
        y: axis(0, 2, 480, 1953, 984),
        binning_x: true,
        binning_y: false,
        inc_x: INC_4,
        inc_y: INC_4,
        frame_interval: interval(30),
        pll1: [&PLL1_NATIVE_8BIT, &PLL1_NATIVE_10BIT],
        pll2: &PLL2_NATIVE,
    },
];

#[derive(Clone, Copy, Debug)]
pub struct Ov4689Config {
    pub extclk_hz: u64,
    /// Data lanes: 1, 2 or 4.
    pub lanes: u8,
    /// 7-bit bus address.
    pub address: u8,
    /// Read every timing register back after writing it.
    pub verify_writes: bool,
}

impl Default for Ov4689Config {
    fn default() -> Self {
        Ov4689Config {
            extclk_hz: EXTCLK_HZ,
            lanes: 4,
            address: 0x36,
            verify_writes: false,
        }
    }
}

/// OV4689 driver.
pub struct Ov4689<I2C, D, PIN, SW> {
    i2c: I2C,
    sccb: Sccb<I2C>,
    delay: D,
    power: PowerControl<PIN, SW>,
    config: Ov4689Config,
    state: SensorState<Mode>,
}

impl<I2C, D, PIN, SW, E, PE> Ov4689<I2C, D, PIN, SW>
where
    I2C: i2c::Read<Error = E> + i2c::Write<Error = E>,
    D: DelayMs<u32>,
    PIN: OutputPin<Error = PE>,
    PE: fmt::Debug,
    SW: Switch,
    E: fmt::Debug,
{
    /// Create the driver. The sensor stays unpowered until `init`.
    pub fn new(
        i2c: I2C,
        delay: D,
        power: PowerControl<PIN, SW>,
        config: Ov4689Config,
    ) -> Result<Self, Error<E>> {
        if config.extclk_hz != EXTCLK_HZ {
            error!("ov4689: unsupported EXTCLK {} Hz", config.extclk_hz);
            return Err(ClockError::UnsupportedReference(config.extclk_hz).into());
        }
        if !matches!(config.lanes, 1 | 2 | 4) {
            error!("ov4689: unsupported lane count {}", config.lanes);
            return Err(Error::OutOfRange);
        }

        let sccb = Sccb::new(&i2c, config.address);
        Ok(Ov4689 {
            i2c,
            sccb,
            delay,
            power,
            config,
            state: SensorState::new(&MODES[0], FORMATS[0]),
        })
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn mode(&self) -> &'static Mode {
        self.state.mode()
    }

    /// Run the power-on sequence into `PoweredStandby`.
    pub fn power_on(&mut self) -> Result<(), Error<E>> {
        if self.state.is_powered() {
            return Ok(());
        }

        self.power
            .power_on(&POWER_ON, &mut self.delay)
            .map_err(|step| {
                error!("ov4689: power on failed at {:?}", step);
                Error::PowerSequence(step)
            })?;
        self.state.powered_on();

        Ok(())
    }

    /// Best-effort power down; always ends `Unpowered`.
    pub fn power_off(&mut self) {
        if !self.state.is_powered() {
            return;
        }

        self.power.power_off();
        self.state.powered_off();
        debug!("ov4689: powered off");
    }

    /// Power on, identify and program the selected mode. Powers back off on failure.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.power_on()?;

        let (mode, format) = (self.state.mode(), self.state.format());
        if let Err(e) = self.identify().and_then(|_| self.configure(mode, format)) {
            error!("ov4689: init failed: {}", e);
            self.power_off();
            return Err(e);
        }

        Ok(())
    }

    /// Stop streaming and cut power, remembering whether to restream on resume.
    pub fn suspend(&mut self) {
        let was_streaming = self.state.is_streaming();
        if was_streaming {
            if let Err(e) = self.set_streaming(false) {
                warn!("ov4689: stream off before suspend failed: {}", e);
            }
        }

        self.power_off();
        self.state.suspended(was_streaming);
    }

    /// Full reinitialization; registers do not survive power loss.
    pub fn resume(&mut self) -> Result<(), Error<E>> {
        let restream = self.state.take_resume_streaming();
        self.init()?;

        if restream {
            if let Err(e) = self.set_streaming(true) {
                error!("ov4689: restarting stream failed: {}", e);
                self.power_off();
                return Err(e);
            }
        }

        Ok(())
    }

    fn set_standby(&mut self, standby: bool) -> Result<(), Error<E>> {
        let val = if standby { 0 } else { STREAM_ON };
        self.sccb.write(&mut self.i2c, Register::SW_STANDBY, val)?;
        Ok(())
    }

    fn rates(&self) -> Result<ClockRates, ClockError> {
        let tree = self
            .state
            .mode()
            .clock_tree(self.state.format().bits_per_pixel())
            .ok_or(ClockError::Unsatisfiable { target: PCLK_HZ })?;
        tree.rates(self.config.extclk_hz)
    }

    /// MIPI clock lane frequency, zero when the clock tree does not resolve.
    pub fn link_frequency(&self) -> u64 {
        self.rates().map(|rates| rates.mipi_clk).unwrap_or(0)
    }

    fn write_mode(&mut self, mode: &'static Mode, format: BusFormat) -> Result<(), Error<E>> {
        let tree = mode
            .clock_tree(format.bits_per_pixel())
            .ok_or(Error::UnsupportedMode)?;
        let (tree, rates) = clock::select(self.config.extclk_hz, PCLK_HZ, &[tree])?;
        debug!(
            "ov4689: {}x{} {:?}, {:?}",
            mode.width(),
            mode.height(),
            format,
            rates
        );

        let timings = mode.register_map()?;
        self.sccb
            .apply_config(&mut self.i2c, &timings, self.config.verify_writes)?;

        let binning = mode.binning_writes();
        let plls = tree.field_writes()?;
        for field in binning.iter().chain(plls.iter()) {
            self.sccb.write_field(&mut self.i2c, field)?;
        }

        Ok(())
    }

    fn supported(format: BusFormat) -> Result<BusFormat, Error<E>> {
        if FORMATS.contains(&format) {
            Ok(format)
        } else {
            Err(Error::UnsupportedMode)
        }
    }

    pub fn enumerate_formats(&self, index: usize) -> Result<BusFormat, Error<E>> {
        FORMATS.get(index).copied().ok_or(Error::OutOfRange)
    }

    pub fn enumerate_sizes(&self, index: usize) -> Result<(u32, u32), Error<E>> {
        mode::enumerate(&MODES, index)
            .map(|m| (m.width(), m.height()))
            .ok_or(Error::OutOfRange)
    }

    pub fn enumerate_frame_intervals(
        &self,
        index: usize,
        width: u32,
        height: u32,
        format: BusFormat,
    ) -> Result<FrameInterval, Error<E>> {
        let bits_per_pixel = Self::supported(format)?.bits_per_pixel();

        MODES
            .iter()
            .filter(|m| m.width() == width && m.height() == height)
            .filter_map(|m| m.interval(bits_per_pixel))
            .nth(index)
            .ok_or(Error::OutOfRange)
    }

    pub fn format(&self) -> Format {
        let mode = self.state.mode();
        Format {
            width: mode.width(),
            height: mode.height(),
            code: self.state.format(),
        }
    }

    /// Adjust a requested format to what the sensor can do, without applying it. Unknown codes
    /// fall back to the default format, sizes snap to the nearest mode.
    pub fn try_format(&self, requested: Format) -> Format {
        let (mode, code) = Self::nearest(requested);
        Format {
            width: mode.width(),
            height: mode.height(),
            code,
        }
    }

    fn nearest(requested: Format) -> (&'static Mode, BusFormat) {
        let code = Self::supported(requested.code).unwrap_or(FORMATS[0]);
        let mode = mode::find_nearest(&MODES, requested.width, requested.height)
            .unwrap_or(&MODES[0]);
        (mode, code)
    }

    /// Select the nearest mode and format. Programs the sensor right away when powered.
    pub fn set_format(&mut self, requested: Format) -> Result<Format, Error<E>> {
        if self.state.is_streaming() {
            return Err(Error::Busy);
        }

        let (mode, code) = Self::nearest(requested);
        self.select(mode, code)?;

        Ok(self.format())
    }

    fn select(&mut self, mode: &'static Mode, format: BusFormat) -> Result<(), Error<E>> {
        let unchanged = core::ptr::eq(mode, self.state.mode()) && format == self.state.format();
        match self.state.phase() {
            Phase::Unpowered => {
                self.state.select(mode, format);
                Ok(())
            }
            Phase::ConfiguredStandby if unchanged => Ok(()),
            _ => self.configure(mode, format),
        }
    }

    pub fn frame_interval(&self) -> FrameInterval {
        let mode = self.state.mode();
        let index = Mode::depth_index(self.state.format().bits_per_pixel()).unwrap_or(0);
        mode.frame_interval[index]
    }

    /// Pick the nearest declared rate among the modes of the current size.
    pub fn set_frame_interval(
        &mut self,
        requested: FrameInterval,
    ) -> Result<FrameInterval, Error<E>> {
        if self.state.is_streaming() {
            return Err(Error::Busy);
        }

        let current = self.state.mode();
        let bits_per_pixel = self.state.format().bits_per_pixel();
        let candidates: Vec<(&'static Mode, FrameInterval), MODE_COUNT> = MODES
            .iter()
            .filter(|m| m.width() == current.width() && m.height() == current.height())
            .filter_map(|m| m.interval(bits_per_pixel).map(|fi| (m, fi)))
            .collect();
        let choices: Vec<FrameInterval, MODE_COUNT> =
            candidates.iter().map(|(_, fi)| *fi).collect();

        let chosen = mode::nearest_interval(&choices, requested).ok_or(Error::UnsupportedMode)?;
        let mode = candidates
            .iter()
            .find(|(_, fi)| *fi == chosen)
            .map(|(m, _)| *m)
            .ok_or(Error::UnsupportedMode)?;
        self.select(mode, self.state.format())?;

        Ok(chosen)
    }
}

impl<I2C, D, PIN, SW, E, PE> ImageSensor for Ov4689<I2C, D, PIN, SW>
where
    I2C: i2c::Read<Error = E> + i2c::Write<Error = E>,
    D: DelayMs<u32>,
    PIN: OutputPin<Error = PE>,
    PE: fmt::Debug,
    SW: Switch,
    E: fmt::Debug,
{
    type Mode = Mode;
    type Error = Error<E>;

    /// Soft reset into standby, then compare the chip id.
    fn identify(&mut self) -> Result<(), Error<E>> {
        if !self.state.is_powered() {
            return Err(Error::NotPowered);
        }

        self.sccb
            .write(&mut self.i2c, Register::SW_RESET, SOFT_RESET)?;
        self.set_standby(true)?;
        // Reset dropped whatever mode was programmed
        self.state.powered_on();

        let found = self.sccb.read_be(&mut self.i2c, Register::CHIP_ID_H, 2)?;
        if found != CHIP_ID {
            error!("ov4689: unexpected chip id {:#06x}", found);
            return Err(Error::UnexpectedDevice {
                expected: CHIP_ID,
                found,
            });
        }

        info!("ov4689: found at {:#04x}", self.sccb.address());
        Ok(())
    }

    fn configure(&mut self, mode: &'static Mode, format: BusFormat) -> Result<(), Error<E>> {
        self.state.check_configure()?;
        Self::supported(format)?;

        if let Err(e) = self.write_mode(mode, format) {
            error!("ov4689: configure failed: {}", e);
            // Registers now hold a partial mode
            self.state.powered_on();
            return Err(e);
        }

        self.state.configured(mode, format);
        Ok(())
    }

    /// Stream on requires a configured mode; both directions are idempotent.
    fn set_streaming(&mut self, enable: bool) -> Result<(), Error<E>> {
        if enable == self.state.is_streaming() {
            return Ok(());
        }

        if enable {
            self.state.check_stream_on()?;
        }

        self.set_standby(!enable)?;
        self.state.streaming(enable);
        debug!("ov4689: streaming {}", enable);

        Ok(())
    }

    /// MIPI_SCLK spread over the lanes, in pixels.
    fn pixel_rate(&self) -> u64 {
        let bits_per_pixel = u64::from(self.state.format().bits_per_pixel());
        self.rates()
            .map(|rates| rates.mipi_sclk * u64::from(self.config.lanes) / bits_per_pixel)
            .unwrap_or(0)
    }
}
