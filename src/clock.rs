//! OmniVision PLL clock trees.
//!
//! ```text
//! PLL1:
//!  EXTCLK -> pll_pre_div -> pll_mul -> sys_div -+-> mipi_div -> MIPI_SCLK -> /2 -> MIPI_CLK
//!                                               |
//!                                               +-> root_div -> bit_div -> sclk_div -> SCLK
//!                                                                                      |
//!                                                                        mipi_div -> PCLK
//! PLL2:
//!  EXTCLK -> plls_pre_div -> plls_div_r -> plls_mul -> plls_sys_div -> sel_div -> ADCLK
//! ```
//!
//! Every stage stores a register field value, and some field values stand for fractional
//! ratios. Rates are computed with exact rationals so a tree either produces whole-Hz clocks or
//! is rejected.

use crate::sccb::FieldWrite;
use log::warn;
use thiserror::Error as ThisError;

/// Clock tree errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum ClockError {
    #[error("unsupported reference clock {0} Hz")]
    UnsupportedReference(u64),
    #[error("{stage:?} value {value} out of domain")]
    OutOfDomain { stage: Stage, value: u32 },
    #[error("{stage:?} output is not a whole number of Hz")]
    NonInteger { stage: Stage },
    #[error("no clock tree reaches {target} Hz")]
    Unsatisfiable { target: u64 },
}

/// Exact non-negative rational.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ratio {
    num: u64,
    den: u64,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Ratio {
    pub const ONE: Ratio = Ratio { num: 1, den: 1 };

    pub fn new(num: u64, den: u64) -> Self {
        let g = gcd(num, den).max(1);
        Ratio {
            num: num / g,
            den: den / g,
        }
    }

    pub fn integer(value: u64) -> Self {
        Ratio { num: value, den: 1 }
    }

    pub fn num(self) -> u64 {
        self.num
    }

    pub fn den(self) -> u64 {
        self.den
    }

    pub fn times(self, other: Ratio) -> Ratio {
        // Cross-reduce first to keep the products small
        let a = Ratio::new(self.num, other.den);
        let b = Ratio::new(other.num, self.den);
        Ratio::new(a.num * b.num, a.den * b.den)
    }

    pub fn divided_by(self, other: Ratio) -> Ratio {
        self.times(Ratio {
            num: other.den,
            den: other.num,
        })
    }

    /// Whole-number value, or `NonInteger` blamed on `stage`.
    fn to_hz(self, stage: Stage) -> Result<u64, ClockError> {
        if self.den == 1 {
            Ok(self.num)
        } else {
            Err(ClockError::NonInteger { stage })
        }
    }
}

/// A register bit field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    pub addr: u16,
    pub shift: u8,
    pub width: u8,
}

impl Field {
    const fn new(addr: u16, shift: u8, width: u8) -> Self {
        Field { addr, shift, width }
    }

    pub fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) << self.shift) as u8
    }
}

/// Named clock tree stages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    PllPreDiv,
    PllMul,
    SysDiv,
    MipiDiv,
    RootDiv,
    BitDiv,
    SclkDiv,
    PllsPreDiv,
    PllsDivR,
    PllsMul,
    PllsSysDiv,
    SelDiv,
}

impl Stage {
    pub fn field(self) -> Field {
        match self {
            Stage::PllPreDiv => Field::new(0x3037, 0, 4),
            Stage::PllMul => Field::new(0x3036, 0, 8),
            Stage::SysDiv => Field::new(0x3035, 4, 4),
            Stage::MipiDiv => Field::new(0x3035, 0, 4),
            Stage::RootDiv => Field::new(0x3037, 4, 1),
            Stage::BitDiv => Field::new(0x3034, 0, 4),
            Stage::SclkDiv => Field::new(0x3106, 2, 2),
            Stage::PllsPreDiv => Field::new(0x303d, 4, 2),
            Stage::PllsDivR => Field::new(0x303d, 2, 1),
            Stage::PllsMul => Field::new(0x303b, 0, 5),
            Stage::PllsSysDiv => Field::new(0x303c, 0, 4),
            Stage::SelDiv => Field::new(0x303d, 0, 2),
        }
    }

    fn out_of_domain(self, value: u32) -> ClockError {
        ClockError::OutOfDomain { stage: self, value }
    }

    /// Register field value for a configured value. `BitDiv` is configured by bits per pixel,
    /// `SclkDiv` and `PllsDivR` by their divider, everything else by the field value itself.
    pub fn encode(self, value: u32) -> Result<u8, ClockError> {
        let field = match self {
            Stage::PllPreDiv if value <= 8 => value,
            Stage::PllMul if (4..=252).contains(&value) && (value <= 127 || value % 2 == 0) => {
                value
            }
            Stage::SysDiv | Stage::MipiDiv | Stage::PllsSysDiv if value <= 15 => value,
            Stage::RootDiv if value <= 1 => value,
            Stage::BitDiv => match value {
                8 => 0x8,
                10 => 0xa,
                1..=15 => value,
                _ => return Err(self.out_of_domain(value)),
            },
            Stage::SclkDiv => match value {
                1 => 0,
                2 => 1,
                4 => 2,
                8 => 3,
                _ => return Err(self.out_of_domain(value)),
            },
            Stage::PllsPreDiv | Stage::SelDiv if value <= 3 => value,
            Stage::PllsDivR if (1..=2).contains(&value) => value - 1,
            Stage::PllsMul if (1..=31).contains(&value) => value,
            _ => return Err(self.out_of_domain(value)),
        };

        Ok(field as u8)
    }

    /// Factor the stage applies to its input clock.
    pub fn factor(self, value: u32) -> Result<Ratio, ClockError> {
        let field = u64::from(self.encode(value)?);
        let divider = match self {
            Stage::PllMul | Stage::PllsMul => return Ok(Ratio::integer(field)),
            Stage::PllPreDiv => match field {
                0 => Ratio::ONE,
                5 => Ratio::new(3, 2),
                7 => Ratio::new(5, 2),
                v => Ratio::integer(v),
            },
            Stage::SysDiv | Stage::MipiDiv | Stage::PllsSysDiv => match field {
                0 => Ratio::integer(16),
                v => Ratio::integer(v),
            },
            Stage::RootDiv => Ratio::integer(field + 1),
            Stage::BitDiv => match value {
                8 => Ratio::integer(2),
                10 => Ratio::new(5, 2),
                _ => Ratio::ONE,
            },
            Stage::SclkDiv | Stage::PllsDivR => Ratio::integer(value.into()),
            Stage::PllsPreDiv => match field {
                0 => Ratio::ONE,
                1 => Ratio::new(3, 2),
                2 => Ratio::integer(2),
                _ => Ratio::integer(3),
            },
            Stage::SelDiv => match field {
                0 | 1 => Ratio::ONE,
                2 => Ratio::integer(2),
                _ => Ratio::new(5, 2),
            },
        };

        Ok(Ratio::ONE.divided_by(divider))
    }
}

/// System PLL configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pll1Config {
    pub pll_pre_div: u32,
    pub pll_mul: u32,
    pub sys_div: u32,
    pub root_div: u32,
    pub sclk_div: u32,
    pub mipi_div: u32,
}

/// ADC PLL configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pll2Config {
    pub plls_pre_div: u32,
    pub plls_div_r: u32,
    pub plls_mul: u32,
    pub sys_div: u32,
    pub sel_div: u32,
}

/// 24 MHz in, 84 MHz SCLK/PCLK out for 8-bit output.
pub const PLL1_NATIVE_8BIT: Pll1Config = Pll1Config {
    pll_pre_div: 3,
    pll_mul: 84,
    sys_div: 2,
    root_div: 1,
    sclk_div: 1,
    mipi_div: 1,
};

/// 24 MHz in, 84 MHz SCLK/PCLK out for 10-bit output.
pub const PLL1_NATIVE_10BIT: Pll1Config = Pll1Config {
    pll_pre_div: 3,
    pll_mul: 105,
    sys_div: 2,
    root_div: 1,
    sclk_div: 1,
    mipi_div: 1,
};

/// 24 MHz in, 200 MHz ADCLK out.
pub const PLL2_NATIVE: Pll2Config = Pll2Config {
    plls_pre_div: 3,
    plls_div_r: 1,
    plls_mul: 25,
    sys_div: 1,
    sel_div: 1,
};

/// Fields that share one register, merged into a single masked write.
const FIELD_GROUPS: [&[Stage]; 8] = [
    &[Stage::PllPreDiv, Stage::RootDiv],
    &[Stage::PllMul],
    &[Stage::SysDiv, Stage::MipiDiv],
    &[Stage::BitDiv],
    &[Stage::SclkDiv],
    &[Stage::PllsPreDiv, Stage::PllsDivR, Stage::SelDiv],
    &[Stage::PllsMul],
    &[Stage::PllsSysDiv],
];

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClockRates {
    pub sclk: u64,
    pub pclk: u64,
    pub mipi_sclk: u64,
    pub mipi_clk: u64,
    pub adclk: u64,
}

/// Both PLLs plus the bit depth feeding the bit divider.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClockTree {
    pub pll1: &'static Pll1Config,
    pub pll2: &'static Pll2Config,
    pub bits_per_pixel: u8,
}

impl ClockTree {
    pub fn value(&self, stage: Stage) -> u32 {
        match stage {
            Stage::PllPreDiv => self.pll1.pll_pre_div,
            Stage::PllMul => self.pll1.pll_mul,
            Stage::SysDiv => self.pll1.sys_div,
            Stage::MipiDiv => self.pll1.mipi_div,
            Stage::RootDiv => self.pll1.root_div,
            Stage::BitDiv => self.bits_per_pixel.into(),
            Stage::SclkDiv => self.pll1.sclk_div,
            Stage::PllsPreDiv => self.pll2.plls_pre_div,
            Stage::PllsDivR => self.pll2.plls_div_r,
            Stage::PllsMul => self.pll2.plls_mul,
            Stage::PllsSysDiv => self.pll2.sys_div,
            Stage::SelDiv => self.pll2.sel_div,
        }
    }

    fn factor(&self, stage: Stage) -> Result<Ratio, ClockError> {
        stage.factor(self.value(stage))
    }

    /// Compute every derived clock from the reference clock.
    pub fn rates(&self, ext_hz: u64) -> Result<ClockRates, ClockError> {
        let ext = Ratio::integer(ext_hz);

        let pll = ext
            .times(self.factor(Stage::PllPreDiv)?)
            .times(self.factor(Stage::PllMul)?)
            .times(self.factor(Stage::SysDiv)?);

        let mipi_sclk = pll.times(self.factor(Stage::MipiDiv)?).to_hz(Stage::MipiDiv)?;
        let mipi_clk = Ratio::new(mipi_sclk, 2).to_hz(Stage::MipiDiv)?;

        let sclk = pll
            .times(self.factor(Stage::RootDiv)?)
            .times(self.factor(Stage::BitDiv)?)
            .times(self.factor(Stage::SclkDiv)?)
            .to_hz(Stage::SclkDiv)?;
        let pclk = Ratio::integer(sclk)
            .times(self.factor(Stage::MipiDiv)?)
            .to_hz(Stage::MipiDiv)?;

        let adclk = ext
            .times(self.factor(Stage::PllsPreDiv)?)
            .times(self.factor(Stage::PllsDivR)?)
            .times(self.factor(Stage::PllsMul)?)
            .times(self.factor(Stage::PllsSysDiv)?)
            .times(self.factor(Stage::SelDiv)?)
            .to_hz(Stage::SelDiv)?;

        Ok(ClockRates {
            sclk,
            pclk,
            mipi_sclk,
            mipi_clk,
            adclk,
        })
    }

    /// Masked register writes programming this tree, one per register.
    pub fn field_writes(&self) -> Result<[FieldWrite; 8], ClockError> {
        let mut writes = [FieldWrite {
            addr: 0,
            mask: 0,
            bits: 0,
        }; 8];

        for (write, group) in writes.iter_mut().zip(FIELD_GROUPS.iter()) {
            for stage in group.iter() {
                let field = stage.field();
                let value = stage.encode(self.value(*stage))?;
                write.addr = field.addr;
                write.mask |= field.mask();
                write.bits |= (value << field.shift) & field.mask();
            }
        }

        Ok(writes)
    }
}

/// Static-table resolver: the first candidate whose PCLK equals the target wins.
pub fn select(
    ext_hz: u64,
    target_pclk: u64,
    candidates: &[ClockTree],
) -> Result<(ClockTree, ClockRates), ClockError> {
    for tree in candidates {
        match tree.rates(ext_hz) {
            Ok(rates) if rates.pclk == target_pclk => return Ok((*tree, rates)),
            Ok(_) => {}
            Err(e) => warn!("clock: skipping candidate {:?}: {}", tree.pll1, e),
        }
    }

    Err(ClockError::Unsatisfiable {
        target: target_pclk,
    })
}
