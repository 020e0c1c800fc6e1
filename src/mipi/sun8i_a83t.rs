//! Allwinner A83T MIPI CSI-2 receiver.

use super::{channel_map, Csi2Receiver};
use crate::format::{BusFormat, DataType};
use crate::regmap::RegisterBlock;
use log::debug;

struct Register;

impl Register {
    pub const VERSION: u32 = 0x000;
    pub const CTRL: u32 = 0x004;
    pub const RX_PKT_NUM: u32 = 0x008;
    pub const DPHY_CTRL: u32 = 0x010;
    pub const RSVD1: u32 = 0x018;
    pub const RSVD2: u32 = 0x01c;
    pub const CFG: u32 = 0x100;
    pub const VCDT0: u32 = 0x104;
}

const CTRL_RESET_N: u32 = 1 << 31;

const CFG_SYNC_EN: u32 = 1 << 31;
const CFG_UNPKT_EN: u32 = 1 << 28;

const fn cfg_sync_dly_cycle(cycles: u32) -> u32 {
    (cycles << 18) & 0x007c_0000
}

const fn cfg_n_channel(channels: u32) -> u32 {
    ((channels - 1) << 16) & 0x0003_0000
}

const fn cfg_n_lane(lanes: u32) -> u32 {
    ((lanes - 1) << 4) & 0x30
}

/// Power-up values. Without them capture fails with unsolicited interrupts; the two reserved
/// registers hold a hardware lock value.
const INIT: [(u32, u32); 6] = [
    (Register::CTRL, 0xb8c3_9bec),
    (Register::RX_PKT_NUM, 0xb8d2_57f8),
    (Register::DPHY_CTRL, 0xb8df_698e),
    (Register::RSVD1, 0xb8c8_a30c),
    (Register::RSVD2, 0xb8df_8ad7),
    (Register::CFG, 0xb8c6_4f24),
];

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

pub struct A83tCsi2<R> {
    regs: R,
}

impl<R: RegisterBlock> A83tCsi2<R> {
    pub fn new(regs: R) -> Self {
        A83tCsi2 { regs }
    }
}

impl<R: RegisterBlock> Csi2Receiver for A83tCsi2<R> {
    fn formats(&self) -> &'static [BusFormat] {
        &FORMATS
    }

    fn init(&mut self) {
        for (offset, value) in INIT.iter() {
            self.regs.write(*offset, 0);
            self.regs.write(*offset, *value);
        }
    }

    fn setup(&mut self, lanes: u8, data_type: DataType) {
        self.regs.write(Register::CTRL, CTRL_RESET_N);
        let version = self.regs.read(Register::VERSION);
        debug!("a83t-csi2: version {:04x}", version);

        self.regs.write(
            Register::CFG,
            CFG_UNPKT_EN | cfg_sync_dly_cycle(8) | cfg_n_channel(1) | cfg_n_lane(lanes.into()),
        );
        self.regs.write(Register::VCDT0, channel_map(data_type));
    }

    fn enable(&mut self) {
        self.regs.update_bits(Register::CFG, CFG_SYNC_EN, CFG_SYNC_EN);
    }

    fn disable(&mut self) {
        self.regs.update_bits(Register::CFG, CFG_SYNC_EN, 0);
        self.regs.write(Register::CTRL, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{journal, MockRegs};

    #[test]
    fn init_writes_zero_then_magic() {
        let log = journal();
        let regs = MockRegs::new("a83t", &log);
        let mut csi = A83tCsi2::new(regs.clone());

        csi.init();

        let writes = log.reg_writes("a83t");
        assert_eq!(writes.len(), 12);
        assert_eq!(writes[0], (0x004, 0));
        assert_eq!(writes[1], (0x004, 0xb8c3_9bec));
        assert_eq!(writes[9], (0x01c, 0xb8df_8ad7));
        assert_eq!(regs.get(0x100), 0xb8c6_4f24);
    }

    #[test]
    fn setup_and_stream_gate() {
        let log = journal();
        let regs = MockRegs::new("a83t", &log);
        let mut csi = A83tCsi2::new(regs.clone());

        csi.setup(4, DataType::Raw10);
        // UNPKT_EN | SYNC_DLY(8) | one channel | four lanes
        assert_eq!(regs.get(0x100), 0x1020_0030);
        assert_eq!(regs.get(0x104), 0xc080_402b);
        assert_eq!(regs.get(0x004), CTRL_RESET_N);

        csi.enable();
        assert_eq!(regs.get(0x100), 0x9020_0030);

        csi.disable();
        assert_eq!(regs.get(0x100), 0x1020_0030);
        assert_eq!(regs.get(0x004), 0);
    }
}
