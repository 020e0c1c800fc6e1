//! Allwinner ISP frontend.
//!
//! The ISP reads its per-frame parameters from a DMA buffer (the load buffer) laid out like its
//! own register window. `program` seeds that buffer from the live registers, writes the
//! capture parameters into it and only then raises PARA_READY; `start_capture` refuses to run
//! before that. Completion is reported by the interrupt half, `IspIrq`, through a shared
//! `CaptureStatus`.

use crate::format::{BayerOrder, BusFormat};
use crate::regmap::RegisterBlock;
use log::{debug, error};
use std::convert::TryFrom;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error as ThisError;

struct Register;

impl Register {
    pub const FE_CFG: u32 = 0x0000;
    pub const FE_CTRL: u32 = 0x0004;
    pub const FE_INT_EN: u32 = 0x0008;
    pub const FE_INT_STA: u32 = 0x000c;
    pub const FE_INT_LINE_NUM: u32 = 0x0018;
    pub const REG_LOAD_ADDR: u32 = 0x0020;
    pub const REG_SAVE_ADDR: u32 = 0x0024;
    pub const LUT_TABLE_ADDR: u32 = 0x0028;
    pub const DRC_TABLE_ADDR: u32 = 0x002c;
    pub const STATS_ADDR: u32 = 0x0030;
    pub const MODULE_EN: u32 = 0x0040;
    pub const MODE: u32 = 0x0044;
    pub const IN_CFG: u32 = 0x0048;
    pub const IN_LUMA_RGB_ADDR0: u32 = 0x004c;
    pub const IN_CHROMA_ADDR0: u32 = 0x0050;
    pub const AE_SIZE: u32 = 0x0064;
    pub const AE_POS: u32 = 0x0068;
    pub const OB_SIZE: u32 = 0x0078;
    pub const OB_VALID: u32 = 0x007c;
    pub const OB_SRC0_VALID_START: u32 = 0x0080;
    pub const OB_SPRITE: u32 = 0x0088;
    pub const BAYER_OFFSET0: u32 = 0x00e0;
    pub const BAYER_OFFSET1: u32 = 0x00e4;
    pub const BAYER_GAIN0: u32 = 0x00e8;
    pub const BAYER_GAIN1: u32 = 0x00ec;
    pub const MCH_SIZE_CFG: u32 = 0x01e0;
    pub const MCH_SCALE_CFG: u32 = 0x01e4;
    pub const MCH_CFG: u32 = 0x01f0;
    pub const MCH_Y_ADDR0: u32 = 0x01f8;
    pub const MCH_U_ADDR0: u32 = 0x01fc;
}

/// Size of the register window mirrored into the load buffer.
pub const PARAMS_LEN: u32 = 0x240;

pub const LUT_TABLE_SIZE: usize = 0xe00;
pub const DRC_TABLE_SIZE: usize = 0x600;
pub const STATS_SIZE: usize = 0x2100;
pub const REG_BUFFER_SIZE: usize = 0x1000;

/// Where DRAM starts in the CPU address map. The ISP addresses DRAM from zero.
pub const DRAM_BASE: u64 = 0x4000_0000;

const FE_CFG_EN: u32 = 1 << 0;
const SRC_MODE_DRAM: u32 = 0;

const fn fe_cfg_src0_mode(mode: u32) -> u32 {
    (mode << 8) & 0x300
}

const FE_CTRL_VCAP_EN: u32 = 1 << 1;
const FE_CTRL_PARA_READY: u32 = 1 << 2;

const FE_INT_STA_FINISH: u32 = 1 << 0;
const FE_INT_ALL: u32 = 0xff;
const INT_LINE: u32 = 4;

const MODULE_EN_SRC0: u32 = 1 << 31;

const fn mode_value(input: u32, yuv_seq: u32, sharp: u32, hist: u32) -> u32 {
    (input & 0x7)
        | ((yuv_seq << 3) & 0x18)
        | ((sharp << 17) & (1 << 17))
        | ((hist << 20) & 0x30_0000)
}

/// Two fields: `width` in the low half (`mask` bits), `height` from bit 16.
const fn size_value(width: u32, height: u32, mask: u32) -> u32 {
    (width & mask) | ((height & mask) << 16)
}

const fn mch_cfg_value(mode: u32, stride_y: u32, stride_uv: u32) -> u32 {
    const MCH_CFG_EN: u32 = 1 << 0;
    MCH_CFG_EN
        | ((mode << 2) & 0x1c)
        | ((stride_y << 8) & 0x7_ff00)
        | ((stride_uv << 20) & 0x7ff0_0000)
}

/// Bayer offsets and unity gains.
const BAYER: [(u32, u32); 4] = [
    (Register::BAYER_OFFSET0, 0x0020_0020),
    (Register::BAYER_OFFSET1, 0x0020_0020),
    (Register::BAYER_GAIN0, 0x0100_0100),
    (Register::BAYER_GAIN1, 0x0000_0100),
];

/// CSI block enable. Bit 1 is set alongside the enable bit by the vendor sequence.
const CSI_EN: u32 = 0x0;
const CSI_EN_VALUE: u32 = (1 << 0) | (1 << 1);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum InputFormat {
    Yuv420 = 0,
    Yuv422 = 1,
    RawBggr = 4,
    RawRggb = 5,
    RawGbrg = 6,
    RawGrbg = 7,
}

impl InputFormat {
    /// Raw input matching the Bayer order of `format`.
    pub fn from_bus(format: BusFormat) -> Option<Self> {
        Some(match format.bayer_order()? {
            BayerOrder::Bggr => InputFormat::RawBggr,
            BayerOrder::Rggb => InputFormat::RawRggb,
            BayerOrder::Gbrg => InputFormat::RawGbrg,
            BayerOrder::Grbg => InputFormat::RawGrbg,
        })
    }
}

/// ISP bus addresses of the auxiliary DMA tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IspMemory {
    pub reg_load: u32,
    pub reg_save: u32,
    pub lut_table: u32,
    pub drc_table: u32,
    pub stats: u32,
}

/// ISP view of a CPU physical DRAM address.
pub fn isp_address(phys: u64) -> Option<u32> {
    let addr = phys.checked_sub(DRAM_BASE)?;
    if addr & 0x3 != 0 {
        return None;
    }
    u32::try_from(addr).ok()
}

/// Luma and chroma plane addresses of one buffer, as seen by the ISP.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Planes {
    pub luma: u32,
    pub chroma: u32,
}

/// One frame's geometry and buffers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CaptureSetup {
    pub width: u32,
    pub height: u32,
    pub input: InputFormat,
    pub src: Planes,
    pub dst: Planes,
}

impl CaptureSetup {
    pub const MAX_WIDTH: u32 = 4096;
    pub const MAX_HEIGHT: u32 = 4096;

    /// Input stride is programmed in units of 16 pixels and the AE window is half size.
    pub fn is_valid(&self) -> bool {
        self.width >= 16
            && self.width <= CaptureSetup::MAX_WIDTH
            && self.width % 16 == 0
            && self.height >= 2
            && self.height <= CaptureSetup::MAX_HEIGHT
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum IspError {
    #[error("invalid capture geometry {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },
    #[error("capture is running")]
    Busy,
    #[error("parameters are not ready")]
    NotReady,
    #[error("capture did not complete in time")]
    CaptureTimeout,
}

/// Interrupt status shared between the frontend and its interrupt handler.
#[derive(Debug, Default)]
pub struct CaptureStatus {
    pending: Mutex<u32>,
    cond: Condvar,
}

impl CaptureStatus {
    pub fn new() -> Self {
        CaptureStatus::default()
    }

    /// Record `bits` and wake waiters.
    pub fn notify(&self, bits: u32) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending |= bits;
        self.cond.notify_all();
    }

    pub fn clear(&self) {
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = 0;
    }

    /// Wait until any bit of `mask` is pending, consume those bits and return them. `None`
    /// after `timeout`.
    pub fn wait_for(&self, mask: u32, timeout: Duration) -> Option<u32> {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut pending, _) = self
            .cond
            .wait_timeout_while(pending, timeout, |bits| *bits & mask == 0)
            .unwrap_or_else(PoisonError::into_inner);

        let hit = *pending & mask;
        if hit == 0 {
            return None;
        }
        *pending &= !mask;
        Some(hit)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrontendState {
    Idle,
    ParamsReady,
    Capturing,
}

/// The configuration half: ISP registers `R`, CSI enable block `C` and the load buffer `M`.
pub struct IspFrontend<R, C, M> {
    regs: R,
    csi: C,
    params: M,
    memory: IspMemory,
    status: Arc<CaptureStatus>,
    state: FrontendState,
}

impl<R, C, M> IspFrontend<R, C, M>
where
    R: RegisterBlock,
    C: RegisterBlock,
    M: RegisterBlock,
{
    pub fn new(regs: R, csi: C, params: M, memory: IspMemory) -> Self {
        IspFrontend {
            regs,
            csi,
            params,
            memory,
            status: Arc::new(CaptureStatus::new()),
            state: FrontendState::Idle,
        }
    }

    pub fn state(&self) -> FrontendState {
        self.state
    }

    /// Handle for the interrupt half.
    pub fn status(&self) -> Arc<CaptureStatus> {
        Arc::clone(&self.status)
    }

    fn frontend_config(&mut self) {
        self.regs
            .write(Register::FE_CFG, FE_CFG_EN | fe_cfg_src0_mode(SRC_MODE_DRAM));
    }

    /// Write the frame parameters into the load buffer, then raise PARA_READY.
    pub fn program(&mut self, setup: &CaptureSetup) -> Result<(), IspError> {
        if self.state == FrontendState::Capturing {
            return Err(IspError::Busy);
        }
        if !setup.is_valid() {
            error!("isp: invalid geometry {}x{}", setup.width, setup.height);
            return Err(IspError::InvalidGeometry {
                width: setup.width,
                height: setup.height,
            });
        }

        let (width, height) = (setup.width, setup.height);

        self.csi.write(CSI_EN, CSI_EN_VALUE);
        self.frontend_config();

        let tables = [
            (Register::REG_LOAD_ADDR, self.memory.reg_load),
            (Register::REG_SAVE_ADDR, self.memory.reg_save),
            (Register::LUT_TABLE_ADDR, self.memory.lut_table),
            (Register::DRC_TABLE_ADDR, self.memory.drc_table),
            (Register::STATS_ADDR, self.memory.stats),
        ];
        for (reg, addr) in tables.iter() {
            self.regs.write(*reg, *addr >> 2);
        }

        // Start from the live register state
        for offset in (0..PARAMS_LEN).step_by(4) {
            let value = self.regs.read(offset);
            self.params.write(offset, value);
        }

        let params = [
            (Register::MODULE_EN, MODULE_EN_SRC0),
            (
                Register::AE_SIZE,
                size_value((width >> 1) - 1, (height >> 1) - 1, 0x7ff),
            ),
            (Register::AE_POS, 0),
            (Register::OB_SIZE, size_value(width, height, 0x3fff)),
            (Register::OB_VALID, size_value(width, height, 0x1fff)),
            (Register::OB_SRC0_VALID_START, 0),
            (Register::OB_SPRITE, size_value(width, height, 0x1fff)),
            BAYER[0],
            BAYER[1],
            BAYER[2],
            BAYER[3],
            (Register::MODE, mode_value(setup.input as u32, 0, 1, 2)),
            (Register::IN_CFG, (width / 16) & 0x7ff),
            (Register::IN_LUMA_RGB_ADDR0, setup.src.luma >> 2),
            (Register::IN_CHROMA_ADDR0, setup.src.chroma >> 2),
            (Register::MCH_SIZE_CFG, size_value(width, height, 0x1fff)),
            // Unity scale, no weight shift
            (Register::MCH_SCALE_CFG, 1 | (1 << 16)),
            (Register::MCH_CFG, mch_cfg_value(0, width / 4, width / 4)),
            (Register::MCH_Y_ADDR0, setup.dst.luma >> 2),
            (Register::MCH_U_ADDR0, setup.dst.chroma >> 2),
        ];
        for (offset, value) in params.iter() {
            self.params.write(*offset, *value);
        }

        self.frontend_config();
        self.regs
            .update_bits(Register::FE_CTRL, FE_CTRL_PARA_READY, FE_CTRL_PARA_READY);

        self.state = FrontendState::ParamsReady;
        debug!("isp: {}x{} programmed", width, height);

        Ok(())
    }

    /// Arm the interrupts and enable video capture.
    pub fn start_capture(&mut self) -> Result<(), IspError> {
        if self.state != FrontendState::ParamsReady {
            return Err(IspError::NotReady);
        }

        self.status.clear();
        self.regs.write(Register::FE_INT_LINE_NUM, INT_LINE);
        self.regs.write(Register::FE_INT_STA, FE_INT_ALL);
        self.regs.write(Register::FE_INT_EN, FE_INT_ALL);
        self.regs
            .update_bits(Register::FE_CTRL, FE_CTRL_VCAP_EN, FE_CTRL_VCAP_EN);

        self.state = FrontendState::Capturing;
        Ok(())
    }

    pub fn stop_capture(&mut self) {
        self.regs.update_bits(Register::FE_CTRL, FE_CTRL_VCAP_EN, 0);
        self.regs.write(Register::FE_INT_EN, 0);
        self.state = FrontendState::Idle;
    }

    /// Block until the frame completes. Capture is stopped either way.
    pub fn wait_complete(&mut self, timeout: Duration) -> Result<(), IspError> {
        if self.state != FrontendState::Capturing {
            return Err(IspError::NotReady);
        }

        let done = self.status.wait_for(FE_INT_STA_FINISH, timeout);
        self.stop_capture();

        match done {
            Some(_) => {
                debug!("isp: capture complete");
                Ok(())
            }
            None => {
                error!("isp: capture timed out after {:?}", timeout);
                Err(IspError::CaptureTimeout)
            }
        }
    }

    /// Program, start and wait for one frame.
    pub fn run(&mut self, setup: &CaptureSetup, timeout: Duration) -> Result<(), IspError> {
        self.program(setup)?;
        self.start_capture()?;
        self.wait_complete(timeout)
    }

    /// Log the live register window.
    pub fn dump(&mut self) {
        debug!("isp: register dump");
        for offset in (0..PARAMS_LEN).step_by(4) {
            debug!("isp: [{:04x}] {:#x}", offset, self.regs.read(offset));
        }
    }
}

/// Interrupt half. Owns its own handle to the ISP registers and never touches configuration.
pub struct IspIrq<R> {
    regs: R,
    status: Arc<CaptureStatus>,
}

impl<R: RegisterBlock> IspIrq<R> {
    pub fn new(regs: R, status: Arc<CaptureStatus>) -> Self {
        IspIrq { regs, status }
    }

    /// Acknowledge pending interrupts and wake waiters. `false` when nothing was pending.
    pub fn handle(&mut self) -> bool {
        let status = self.regs.read(Register::FE_INT_STA);
        if status == 0 {
            return false;
        }

        self.regs.write(Register::FE_INT_STA, status);
        self.status.notify(status);
        true
    }
}
