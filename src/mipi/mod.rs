//! MIPI CSI-2 link bring-up.
//!
//! `MipiLink` pairs a CSI-2 receiver with its D-PHY and drives both together with the
//! upstream sensor:
//!
//! ```text
//! link_up:   PHY reset -> set mode -> configure -> power on -> receiver setup -> receiver enable -> sensor on
//! link_down: sensor off -> receiver disable -> PHY power off
//! ```
//!
//! A failed bring-up always ends in `Idle` with the PHY powered off if it was ever powered on.

mod dphy;
pub mod sun6i;
pub mod sun8i_a83t;

pub use dphy::DphyConfig;

use crate::format::{BusFormat, DataType};
use crate::sensor::ImageSensor;
use core::fmt;
use log::{debug, error, warn};
use thiserror::Error as ThisError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PhyMode {
    MipiDphyRx,
    MipiDphyTx,
}

/// Bring-up stages of the physical layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PhyStep {
    Reset,
    SetMode,
    Configure,
    PowerOn,
}

/// A D-PHY handle.
pub trait Phy {
    type Error: fmt::Debug;

    fn reset(&mut self) -> Result<(), Self::Error>;
    fn set_mode(&mut self, mode: PhyMode) -> Result<(), Self::Error>;
    fn configure(&mut self, config: &DphyConfig) -> Result<(), Self::Error>;
    fn power_on(&mut self) -> Result<(), Self::Error>;
    fn power_off(&mut self) -> Result<(), Self::Error>;
}

/// A CSI-2 receiver controller.
pub trait Csi2Receiver {
    /// Media bus formats the receiver can unpack.
    fn formats(&self) -> &'static [BusFormat];

    /// Register setup needed after every power up, before anything else.
    fn init(&mut self) {}

    /// Program lane count and the virtual channel map. Leaves the receiver disabled.
    fn setup(&mut self, lanes: u8, data_type: DataType);

    fn enable(&mut self);
    fn disable(&mut self);
}

/// Virtual channel and data type word shared by the Allwinner receivers. VC n goes to internal
/// channel n so VC 0 only ever lands on channel 0; the data type filter is set on channel 0.
pub fn channel_map(data_type: DataType) -> u32 {
    let vc = |ch: u32, vc: u32| (vc & 0x3) << (ch * 8 + 6);
    let dt = |ch: u32, dt: u8| (u32::from(dt) & 0x3f) << (ch * 8);

    vc(3, 3) | vc(2, 2) | vc(1, 1) | vc(0, 0) | dt(0, data_type.code())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkState {
    Idle,
    PhyConfigured,
    Linked,
}

/// Parameters of the running link, computed on every bring-up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LinkConfig {
    pub lanes: u8,
    pub data_type: DataType,
    pub bits_per_pixel: u8,
    pub pixel_rate: u64,
    pub dphy: DphyConfig,
}

impl LinkConfig {
    /// Bits per second on each data lane.
    pub fn lane_bit_rate(&self) -> u64 {
        self.dphy.hs_clk_rate
    }

    pub fn ddr_clock_hz(&self) -> u64 {
        self.dphy.ddr_clock_hz()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum LinkError {
    #[error("link is already up")]
    Busy,
    #[error("receiver cannot take {0:?}")]
    UnsupportedFormat(BusFormat),
    #[error("invalid lane count {0}")]
    InvalidLaneCount(u8),
    #[error("sensor reports no pixel rate")]
    NoPixelRate,
    #[error("d-phy failed at {0:?}")]
    Phy(PhyStep),
    #[error("sensor failed to start streaming")]
    UpstreamStream,
    #[error("d-phy is not prepared")]
    NotPrepared,
}

/// A receiver and its PHY.
pub struct MipiLink<R, P> {
    receiver: R,
    phy: P,
    state: LinkState,
    config: Option<LinkConfig>,
}

impl<R, P> MipiLink<R, P>
where
    R: Csi2Receiver,
    P: Phy,
{
    pub fn new(receiver: R, phy: P) -> Self {
        MipiLink {
            receiver,
            phy,
            state: LinkState::Idle,
            config: None,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Configuration of the running link.
    pub fn config(&self) -> Option<&LinkConfig> {
        self.config.as_ref()
    }

    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    pub fn phy(&self) -> &P {
        &self.phy
    }

    fn phy_step(&mut self, step: PhyStep, dphy: &DphyConfig) -> Result<(), LinkError> {
        let res = match step {
            PhyStep::Reset => self.phy.reset(),
            PhyStep::SetMode => self.phy.set_mode(PhyMode::MipiDphyRx),
            PhyStep::Configure => self.phy.configure(dphy),
            PhyStep::PowerOn => self.phy.power_on(),
        };

        res.map_err(|e| {
            error!("mipi: d-phy {:?} failed: {:?}", step, e);
            LinkError::Phy(step)
        })
    }

    fn phy_power_off(&mut self) {
        if let Err(e) = self.phy.power_off() {
            warn!("mipi: d-phy power off failed: {:?}", e);
        }
    }

    /// Power the D-PHY for `format` over `lanes` at the rate `sensor` reports. Leaves the link
    /// `PhyConfigured`, or `Idle` on failure.
    pub fn prepare<S: ImageSensor>(
        &mut self,
        sensor: &S,
        format: BusFormat,
        lanes: u8,
    ) -> Result<LinkConfig, LinkError> {
        if self.state != LinkState::Idle {
            return Err(LinkError::Busy);
        }
        if !self.receiver.formats().contains(&format) {
            error!("mipi: unsupported format {:?}", format);
            return Err(LinkError::UnsupportedFormat(format));
        }

        let pixel_rate = sensor.pixel_rate();
        if pixel_rate == 0 {
            error!("mipi: zero pixel rate from the sensor");
            return Err(LinkError::NoPixelRate);
        }
        if !(1..=4).contains(&lanes) {
            return Err(LinkError::InvalidLaneCount(lanes));
        }

        let bits_per_pixel = format.bits_per_pixel();
        let dphy = DphyConfig::from_pixel_rate(pixel_rate, bits_per_pixel, lanes)
            .ok_or(LinkError::NoPixelRate)?;
        let config = LinkConfig {
            lanes,
            data_type: format.data_type(),
            bits_per_pixel,
            pixel_rate,
            dphy,
        };
        debug!(
            "mipi: {} pixels/s, {} bits/pixel, {} lanes, {} Hz clock",
            pixel_rate,
            bits_per_pixel,
            lanes,
            config.ddr_clock_hz()
        );

        self.receiver.init();

        let steps = [
            PhyStep::Reset,
            PhyStep::SetMode,
            PhyStep::Configure,
            PhyStep::PowerOn,
        ];
        for step in steps.iter() {
            if let Err(e) = self.phy_step(*step, &dphy) {
                if *step == PhyStep::PowerOn {
                    self.phy_power_off();
                }
                return Err(e);
            }
        }

        self.state = LinkState::PhyConfigured;
        self.config = Some(config);
        debug!("mipi: d-phy up");

        Ok(config)
    }

    /// Set up and enable the receiver on a prepared link, then start `sensor`. A failure tears
    /// the whole link down.
    pub fn start<S: ImageSensor>(&mut self, sensor: &mut S) -> Result<LinkConfig, LinkError> {
        let config = match (self.state, self.config) {
            (LinkState::PhyConfigured, Some(config)) => config,
            (LinkState::Linked, _) => return Err(LinkError::Busy),
            _ => return Err(LinkError::NotPrepared),
        };

        self.receiver.setup(config.lanes, config.data_type);
        self.receiver.enable();

        if let Err(e) = sensor.set_streaming(true) {
            error!("mipi: sensor stream on failed: {:?}", e);
            self.receiver.disable();
            self.phy_power_off();
            self.state = LinkState::Idle;
            self.config = None;
            return Err(LinkError::UpstreamStream);
        }

        self.state = LinkState::Linked;
        debug!("mipi: link up");

        Ok(config)
    }

    /// Bring the link up for `format` over `lanes` and start `sensor`.
    pub fn link_up<S: ImageSensor>(
        &mut self,
        sensor: &mut S,
        format: BusFormat,
        lanes: u8,
    ) -> Result<LinkConfig, LinkError> {
        self.prepare(sensor, format, lanes)?;
        self.start(sensor)
    }

    /// Stop `sensor` and tear the link down. Teardown continues past a sensor failure. A link
    /// that was only prepared just powers the D-PHY off.
    pub fn link_down<S: ImageSensor>(&mut self, sensor: &mut S) {
        match self.state {
            LinkState::Idle => return,
            LinkState::PhyConfigured => {}
            LinkState::Linked => {
                if let Err(e) = sensor.set_streaming(false) {
                    warn!("mipi: sensor stream off failed: {:?}", e);
                }
                self.receiver.disable();
            }
        }
        self.phy_power_off();

        self.state = LinkState::Idle;
        self.config = None;
        debug!("mipi: link down");
    }
}

#[cfg(test)]
mod tests {
    use super::sun6i::Sun6iCsi2;
    use super::*;
    use crate::mock::{journal, Event, Journal, MockPhy, MockRegs, MockSensor};

    type Link = MipiLink<Sun6iCsi2<MockRegs>, MockPhy>;

    fn link(log: &Journal, phy: MockPhy) -> (Link, MockRegs) {
        let regs = MockRegs::new("csi", log);
        (MipiLink::new(Sun6iCsi2::new(regs.clone()), phy), regs)
    }

    #[test]
    fn channel_map_isolates_vc0() {
        // VC 3,2,1,0 in bits 31:30, 23:22, 15:14, 7:6; RAW10 in bits 5:0
        assert_eq!(channel_map(DataType::Raw10), 0xc080_402b);
        assert_eq!(channel_map(DataType::Raw8) & 0x3f, 0x2a);
    }

    #[test]
    fn zero_pixel_rate_touches_nothing() {
        let log = journal();
        let (mut link, _) = link(&log, MockPhy::new(&log));
        let mut sensor = MockSensor::new(0, &log);

        assert_eq!(
            link.link_up(&mut sensor, BusFormat::Sbggr10, 2),
            Err(LinkError::NoPixelRate)
        );
        assert_eq!(link.state(), LinkState::Idle);
        assert!(log.events().is_empty());
    }

    #[test]
    fn bring_up_order() {
        let log = journal();
        let (mut link, _) = link(&log, MockPhy::new(&log));
        let mut sensor = MockSensor::new(126_000_000, &log);

        let config = link.link_up(&mut sensor, BusFormat::Sbggr10, 2).unwrap();

        assert_eq!(config.lane_bit_rate(), 630_000_000);
        assert_eq!(config.ddr_clock_hz(), 315_000_000);
        assert_eq!(link.state(), LinkState::Linked);
        assert_eq!(link.phy().config.map(|c| c.lanes), Some(2));

        let events = log.events();
        let at = |e: Event| events.iter().position(|x| *x == e).unwrap();
        assert!(at(Event::Phy("reset")) < at(Event::Phy("set_mode")));
        assert!(at(Event::Phy("set_mode")) < at(Event::Phy("configure")));
        assert!(at(Event::Phy("configure")) < at(Event::Phy("power_on")));
        assert!(at(Event::Phy("power_on")) < at(Event::RegWrite("csi", 0x8, 0xc080_402b)));
        assert_eq!(events.last(), Some(&Event::Sensor("stream_on")));
    }

    #[test]
    fn phy_power_on_failure_rolls_back() {
        let log = journal();
        let (mut link, _) = link(&log, MockPhy::failing_at(PhyStep::PowerOn, &log));
        let mut sensor = MockSensor::new(84_000_000, &log);

        assert_eq!(
            link.link_up(&mut sensor, BusFormat::Sbggr8, 4),
            Err(LinkError::Phy(PhyStep::PowerOn))
        );
        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(log.events().last(), Some(&Event::Phy("power_off")));
        assert!(log.reg_writes("csi").is_empty());
        assert!(!sensor.streaming);
    }

    #[test]
    fn early_phy_failure_skips_power_off() {
        let log = journal();
        let (mut link, _) = link(&log, MockPhy::failing_at(PhyStep::Configure, &log));
        let mut sensor = MockSensor::new(84_000_000, &log);

        assert_eq!(
            link.link_up(&mut sensor, BusFormat::Sbggr8, 4),
            Err(LinkError::Phy(PhyStep::Configure))
        );
        assert_eq!(log.position(Event::Phy("power_on")), None);
        assert_eq!(log.position(Event::Phy("power_off")), None);
    }

    #[test]
    fn sensor_start_failure_unwinds_receiver_and_phy() {
        let log = journal();
        let (mut link, regs) = link(&log, MockPhy::new(&log));
        let mut sensor = MockSensor::new(84_000_000, &log);
        sensor.fail_start = true;

        assert_eq!(
            link.link_up(&mut sensor, BusFormat::Sbggr10, 2),
            Err(LinkError::UpstreamStream)
        );
        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(regs.get(0x0) & 1, 0);
        assert_eq!(log.events().last(), Some(&Event::Phy("power_off")));
    }

    #[test]
    fn teardown_is_reverse_and_best_effort() {
        let log = journal();
        let (mut link, regs) = link(&log, MockPhy::new(&log));
        let mut sensor = MockSensor::new(84_000_000, &log);
        link.link_up(&mut sensor, BusFormat::Sbggr10, 2).unwrap();
        assert_eq!(
            link.link_up(&mut sensor, BusFormat::Sbggr10, 2),
            Err(LinkError::Busy)
        );
        sensor.fail_stop = true;
        log.clear();

        link.link_down(&mut sensor);

        let events = log.events();
        assert_eq!(events.first(), Some(&Event::Sensor("stream_off")));
        assert_eq!(events.last(), Some(&Event::Phy("power_off")));
        assert_eq!(regs.get(0x0) & 1, 0);
        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(link.config(), None);

        log.clear();
        link.link_down(&mut sensor);
        assert!(log.events().is_empty());
    }

    #[test]
    fn prepared_link_waits_for_start() {
        let log = journal();
        let (mut link, regs) = link(&log, MockPhy::new(&log));
        let mut sensor = MockSensor::new(126_000_000, &log);
        assert_eq!(link.start(&mut sensor), Err(LinkError::NotPrepared));

        let config = link.prepare(&sensor, BusFormat::Sbggr10, 2).unwrap();

        assert_eq!(link.state(), LinkState::PhyConfigured);
        assert_eq!(link.config(), Some(&config));
        assert_eq!(log.events().last(), Some(&Event::Phy("power_on")));
        assert!(log.reg_writes("csi").is_empty());
        assert_eq!(
            link.prepare(&sensor, BusFormat::Sbggr10, 2),
            Err(LinkError::Busy)
        );

        assert_eq!(link.start(&mut sensor), Ok(config));
        assert_eq!(link.state(), LinkState::Linked);
        assert_eq!(regs.get(0x0) & 1, 1);
        assert!(sensor.streaming);
        assert_eq!(link.start(&mut sensor), Err(LinkError::Busy));
    }

    #[test]
    fn prepared_link_down_only_powers_off_the_phy() {
        let log = journal();
        let (mut link, _) = link(&log, MockPhy::new(&log));
        let mut sensor = MockSensor::new(126_000_000, &log);
        link.prepare(&sensor, BusFormat::Sbggr10, 2).unwrap();
        log.clear();

        link.link_down(&mut sensor);

        assert_eq!(log.events(), vec![Event::Phy("power_off")]);
        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(link.config(), None);
    }

    #[test]
    fn rejects_bad_format_and_lanes() {
        let log = journal();
        let (mut link, _) = link(&log, MockPhy::new(&log));
        let mut sensor = MockSensor::new(84_000_000, &log);

        assert_eq!(
            link.link_up(&mut sensor, BusFormat::Uyvy8, 2),
            Err(LinkError::UnsupportedFormat(BusFormat::Uyvy8))
        );
        assert_eq!(
            link.link_up(&mut sensor, BusFormat::Sbggr10, 5),
            Err(LinkError::InvalidLaneCount(5))
        );
        assert!(log.events().is_empty());
    }
}
