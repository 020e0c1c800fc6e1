//! Allwinner A31 MIPI CSI-2 receiver and the legacy D-PHY register window.

use super::{channel_map, Csi2Receiver, DphyConfig, Phy, PhyMode};
use crate::format::{BusFormat, DataType};
use crate::regmap::RegisterBlock;
use log::debug;
use thiserror::Error as ThisError;

struct Register;

impl Register {
    pub const CTL: u32 = 0x00;
    pub const CFG: u32 = 0x04;
    pub const VCDT_RX: u32 = 0x08;
    pub const VERSION: u32 = 0x3c;
}

const CTL_RESET_N: u32 = 1 << 31;
const CTL_VERSION_EN: u32 = 1 << 30;
const CTL_UNPK_EN: u32 = 1 << 1;
const CTL_EN: u32 = 1 << 0;

const fn cfg_channel_mode(channels: u32) -> u32 {
    ((channels - 1) << 8) & 0x300
}

const fn cfg_lane_count(lanes: u32) -> u32 {
    (lanes - 1) & 0x3
}

pub const FORMATS: [BusFormat; 8] = [
    BusFormat::Sbggr8,
    BusFormat::Sgbrg8,
    BusFormat::Sgrbg8,
    BusFormat::Srggb8,
    BusFormat::Sbggr10,
    BusFormat::Sgbrg10,
    BusFormat::Sgrbg10,
    BusFormat::Srggb10,
];

/// A31 CSI-2 receiver.
pub struct Sun6iCsi2<R> {
    regs: R,
    version: Option<u32>,
}

impl<R: RegisterBlock> Sun6iCsi2<R> {
    pub fn new(regs: R) -> Self {
        Sun6iCsi2 {
            regs,
            version: None,
        }
    }

    /// Controller version, read during the last setup.
    pub fn version(&self) -> Option<u32> {
        self.version
    }
}

impl<R: RegisterBlock> Csi2Receiver for Sun6iCsi2<R> {
    fn formats(&self) -> &'static [BusFormat] {
        &FORMATS
    }

    /// Reset is released with the version register enabled, which is then turned off again.
    /// Capture is unreliable without this toggle and a delay does not replace it.
    fn setup(&mut self, lanes: u8, data_type: DataType) {
        self.regs.write(
            Register::CTL,
            CTL_RESET_N | CTL_VERSION_EN | CTL_UNPK_EN,
        );
        let version = self.regs.read(Register::VERSION);
        self.regs.update_bits(Register::CTL, CTL_VERSION_EN, 0);
        debug!("sun6i-csi2: version {:04x}", version);
        self.version = Some(version);

        self.regs.write(
            Register::CFG,
            cfg_channel_mode(1) | cfg_lane_count(lanes.into()),
        );
        self.regs.write(Register::VCDT_RX, channel_map(data_type));
    }

    fn enable(&mut self) {
        self.regs.update_bits(Register::CTL, CTL_EN, CTL_EN);
    }

    fn disable(&mut self) {
        self.regs.update_bits(Register::CTL, CTL_EN, 0);
    }
}

/// Offset of the D-PHY window inside the CSI block.
const DPHY_OFFSET: u32 = 0x1000;

struct DphyRegister;

impl DphyRegister {
    pub const CTRL: u32 = DPHY_OFFSET + 0x004;
    pub const RX_PKT_NUM: u32 = DPHY_OFFSET + 0x008;
    pub const DPHY_CTRL: u32 = DPHY_OFFSET + 0x010;
    pub const RSVD1: u32 = DPHY_OFFSET + 0x018;
    pub const RSVD2: u32 = DPHY_OFFSET + 0x01c;
    pub const RX_CFG0: u32 = DPHY_OFFSET + 0x028;
    pub const RX_CFG1: u32 = DPHY_OFFSET + 0x02c;
    pub const RX_CFG2: u32 = DPHY_OFFSET + 0x030;
    pub const CFG: u32 = DPHY_OFFSET + 0x100;
    pub const VCDT1: u32 = DPHY_OFFSET + 0x104;
    pub const INT_EN: u32 = DPHY_OFFSET + 0x10c;
    pub const INT_STA: u32 = DPHY_OFFSET + 0x110;
}

/// Register image written on reset. Zero first, then the value, as the vendor sequence does.
const DEFAULTS: [(u32, u32); 19] = [
    (DphyRegister::CTRL, 0),
    (DphyRegister::CTRL, 0xb8c3_9bec),
    (DphyRegister::RX_PKT_NUM, 0),
    (DphyRegister::RX_PKT_NUM, 0xb8d2_57f8),
    (DphyRegister::DPHY_CTRL, 0),
    (DphyRegister::DPHY_CTRL, 0xb8df_698e),
    (DphyRegister::RSVD1, 0),
    (DphyRegister::RSVD1, 0xb8c8_a30c),
    (DphyRegister::RSVD2, 0),
    (DphyRegister::RSVD2, 0xb8df_8ad7),
    (DphyRegister::RX_CFG0, 0),
    (DphyRegister::RX_CFG1, 0),
    (DphyRegister::RX_CFG2, 0),
    (DphyRegister::RX_PKT_NUM, 0),
    (DphyRegister::VCDT1, 0),
    (DphyRegister::INT_EN, 0),
    (DphyRegister::INT_STA, 0),
    (DphyRegister::CFG, 0),
    (DphyRegister::CFG, 0xb8c6_4f24),
];

/// D-PHY lane bring-up, then the analog setting.
const DPHY_INIT: [(u32, u32); 10] = [
    (DphyRegister::DPHY_CTRL, 0x0000_0000),
    (DphyRegister::DPHY_CTRL, 0x0000_0000),
    (DphyRegister::DPHY_CTRL, 0x0000_0100),
    (DphyRegister::DPHY_CTRL, 0x0000_0100),
    (DphyRegister::DPHY_CTRL, 0x0000_0100),
    (DphyRegister::DPHY_CTRL, 0x0000_0100),
    (DphyRegister::DPHY_CTRL, 0x8000_0100),
    (DphyRegister::DPHY_CTRL, 0x8000_8100),
    (DphyRegister::DPHY_CTRL, 0x8000_8000),
    (DphyRegister::RX_CFG2, 0xa020_0000),
];

const CTL_INIT: [(u32, u32); 2] = [
    (DphyRegister::CTRL, 0x8000_0000),
    (DphyRegister::CFG, 0x1220_0000),
];

const CFG_SYNC_EN: u32 = 1 << 31;
const CFG_N_LANE: u32 = 0x30;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum DphyError {
    #[error("unsupported mode {0:?}")]
    UnsupportedMode(PhyMode),
    #[error("invalid lane count {0}")]
    InvalidLaneCount(u8),
    #[error("powered on before configure")]
    NotConfigured,
}

/// Receive-only D-PHY behind the legacy CSI register window.
pub struct Sun6iDphy<R> {
    regs: R,
    lanes: Option<u8>,
}

impl<R: RegisterBlock> Sun6iDphy<R> {
    pub fn new(regs: R) -> Self {
        Sun6iDphy { regs, lanes: None }
    }

    fn write_all(&mut self, seq: &[(u32, u32)]) {
        for (offset, value) in seq {
            self.regs.write(*offset, *value);
        }
    }
}

impl<R: RegisterBlock> Phy for Sun6iDphy<R> {
    type Error = DphyError;

    fn reset(&mut self) -> Result<(), DphyError> {
        self.write_all(&DEFAULTS);
        self.lanes = None;
        Ok(())
    }

    fn set_mode(&mut self, mode: PhyMode) -> Result<(), DphyError> {
        match mode {
            PhyMode::MipiDphyRx => Ok(()),
            PhyMode::MipiDphyTx => Err(DphyError::UnsupportedMode(mode)),
        }
    }

    fn configure(&mut self, config: &DphyConfig) -> Result<(), DphyError> {
        if !(1..=4).contains(&config.lanes) {
            return Err(DphyError::InvalidLaneCount(config.lanes));
        }

        self.lanes = Some(config.lanes);
        Ok(())
    }

    fn power_on(&mut self) -> Result<(), DphyError> {
        let lanes = self.lanes.ok_or(DphyError::NotConfigured)?;

        self.write_all(&DPHY_INIT);
        self.write_all(&CTL_INIT);
        self.regs.update_bits(
            DphyRegister::CFG,
            CFG_N_LANE,
            u32::from(lanes - 1) << 4,
        );
        debug!("sun6i-dphy: {} lanes up", lanes);

        Ok(())
    }

    fn power_off(&mut self) -> Result<(), DphyError> {
        self.regs.update_bits(DphyRegister::CFG, CFG_SYNC_EN, 0);
        self.regs.write(DphyRegister::DPHY_CTRL, 0);
        Ok(())
    }
}
