//! Capture mode catalogs.
//!
//! Sensors describe each supported geometry as static data. Selection never mutates a mode: the
//! helpers here only pick an entry out of a catalog.

use crate::clock::{ClockTree, Pll1Config, Pll2Config};
use crate::sccb::{insert_be, FieldWrite, MapError, RegMap};
use core::convert::TryFrom;

/// Anything with an output size.
pub trait FrameSize {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Seconds per frame as a fraction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameInterval {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameInterval {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        FrameInterval {
            numerator,
            denominator,
        }
    }

    pub const fn from_fps(fps: u32) -> Self {
        FrameInterval::new(1, fps)
    }

    /// Frame rate rounded to the nearest integer. Zero for a zero numerator.
    pub fn fps(&self) -> u32 {
        if self.numerator == 0 {
            return 0;
        }
        let numerator = u64::from(self.numerator);
        let rounded = (u64::from(self.denominator) + numerator / 2) / numerator;
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }
}

fn distance(a: u32, b: u32) -> u32 {
    if a > b {
        a - b
    } else {
        b - a
    }
}

/// Nearest mode by `|dw| + |dh|`; ties go to the earlier entry.
pub fn find_nearest<M: FrameSize>(modes: &[M], width: u32, height: u32) -> Option<&M> {
    let mut best = None;
    let mut best_error = u32::MAX;

    for mode in modes {
        let error = distance(mode.width(), width).saturating_add(distance(mode.height(), height));
        if error < best_error {
            best = Some(mode);
            best_error = error;
        }
    }

    best
}

/// Catalog entry at `index`.
pub fn enumerate<M>(modes: &[M], index: usize) -> Option<&M> {
    modes.get(index)
}

/// Nearest declared frame rate; ties go to the earlier entry. A zero numerator asks for the
/// fastest rate.
pub fn nearest_interval(
    choices: &[FrameInterval],
    requested: FrameInterval,
) -> Option<FrameInterval> {
    if requested.numerator == 0 {
        return choices.iter().copied().max_by_key(|fi| fi.fps());
    }

    let fps = requested.fps();
    let mut best = None;
    let mut best_error = u32::MAX;
    for choice in choices {
        let error = distance(choice.fps(), fps);
        if error < best_error {
            best = Some(*choice);
            best_error = error;
        }
    }

    best
}

/// Timing registers shared by the OmniVision sensors.
pub(crate) struct Register;

impl Register {
    pub const X_ADDR_START: u16 = 0x3800;
    pub const Y_ADDR_START: u16 = 0x3802;
    pub const X_ADDR_END: u16 = 0x3804;
    pub const Y_ADDR_END: u16 = 0x3806;
    pub const X_OUTPUT_SIZE: u16 = 0x3808;
    pub const Y_OUTPUT_SIZE: u16 = 0x380a;
    pub const HTS: u16 = 0x380c;
    pub const VTS: u16 = 0x380e;
    pub const X_OFFSET: u16 = 0x3810;
    pub const Y_OFFSET: u16 = 0x3812;
    pub const X_INC: u16 = 0x3814;
    pub const Y_INC: u16 = 0x3815;
    pub const FORMAT1: u16 = 0x3820;
    pub const FORMAT2: u16 = 0x3821;
}

/// Binning enable, bit 0 of FORMAT1 (vertical) and FORMAT2 (horizontal).
const BINNING: u8 = 1 << 0;

/// One axis of a sensor-array window.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Axis {
    pub crop_start: u16,
    pub offset: u16,
    pub output: u16,
    pub crop_end: u16,
    /// HTS for x, VTS for y.
    pub total: u16,
}

impl Axis {
    /// The crop window must cover the output plus symmetric offsets once sub-sampled, and the
    /// total must leave room for blanking. Sub-sampled windows may carry a few spare lines.
    pub fn is_consistent(&self, skip: u16, array: u16) -> bool {
        if self.crop_end < self.crop_start || self.crop_end >= array || skip == 0 {
            return false;
        }

        let span = u32::from(self.crop_end - self.crop_start + 1);
        let needed = u32::from(self.output) + 2 * u32::from(self.offset);
        span / u32::from(skip) >= needed && self.total > self.output
    }
}

/// Odd/even pixel increments of a sub-sampled readout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Increment {
    pub odd: u8,
    pub even: u8,
}

impl Increment {
    pub const FULL: Increment = Increment { odd: 1, even: 1 };

    /// Array pixels consumed per output pixel.
    pub fn skip(self) -> u16 {
        (u16::from(self.odd) + u16::from(self.even)) / 2
    }

    fn value(self) -> u8 {
        (self.odd << 4) | (self.even & 0x0f)
    }
}

/// A windowed OmniVision capture mode. Per-depth entries are indexed 8-bit first, then 10-bit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mode {
    pub x: Axis,
    pub y: Axis,
    pub binning_x: bool,
    pub binning_y: bool,
    pub inc_x: Increment,
    pub inc_y: Increment,
    pub frame_interval: [FrameInterval; 2],
    pub pll1: [&'static Pll1Config; 2],
    pub pll2: &'static Pll2Config,
}

impl FrameSize for Mode {
    fn width(&self) -> u32 {
        self.x.output.into()
    }

    fn height(&self) -> u32 {
        self.y.output.into()
    }
}

impl Mode {
    /// Index into the per-depth tables.
    pub fn depth_index(bits_per_pixel: u8) -> Option<usize> {
        match bits_per_pixel {
            8 => Some(0),
            10 => Some(1),
            _ => None,
        }
    }

    pub fn clock_tree(&self, bits_per_pixel: u8) -> Option<ClockTree> {
        let index = Mode::depth_index(bits_per_pixel)?;
        Some(ClockTree {
            pll1: self.pll1[index],
            pll2: self.pll2,
            bits_per_pixel,
        })
    }

    pub fn interval(&self, bits_per_pixel: u8) -> Option<FrameInterval> {
        Mode::depth_index(bits_per_pixel).map(|index| self.frame_interval[index])
    }

    /// Check both window axes against a sensor array of `array` pixels.
    pub fn check(&self, array: (u16, u16)) -> bool {
        self.x.is_consistent(self.inc_x.skip(), array.0)
            && self.y.is_consistent(self.inc_y.skip(), array.1)
    }

    /// Timing register image for the window, output size, totals, offsets and increments.
    pub fn register_map(&self) -> Result<RegMap, MapError> {
        let mut map = RegMap::new();

        insert_be(&mut map, Register::X_ADDR_START, self.x.crop_start.into(), 2)?;
        insert_be(&mut map, Register::Y_ADDR_START, self.y.crop_start.into(), 2)?;
        insert_be(&mut map, Register::X_ADDR_END, self.x.crop_end.into(), 2)?;
        insert_be(&mut map, Register::Y_ADDR_END, self.y.crop_end.into(), 2)?;
        insert_be(&mut map, Register::X_OUTPUT_SIZE, self.x.output.into(), 2)?;
        insert_be(&mut map, Register::Y_OUTPUT_SIZE, self.y.output.into(), 2)?;
        insert_be(&mut map, Register::HTS, self.x.total.into(), 2)?;
        insert_be(&mut map, Register::VTS, self.y.total.into(), 2)?;
        insert_be(&mut map, Register::X_OFFSET, self.x.offset.into(), 2)?;
        insert_be(&mut map, Register::Y_OFFSET, self.y.offset.into(), 2)?;
        map.insert(Register::X_INC, self.inc_x.value())
            .map_err(|_| MapError::Full)?;
        map.insert(Register::Y_INC, self.inc_y.value())
            .map_err(|_| MapError::Full)?;

        Ok(map)
    }

    /// Binning bits live next to unrelated flip/mirror bits, so they are masked writes.
    pub fn binning_writes(&self) -> [FieldWrite; 2] {
        let bit = |on: bool| if on { BINNING } else { 0 };
        [
            FieldWrite {
                addr: Register::FORMAT1,
                mask: BINNING,
                bits: bit(self.binning_y),
            },
            FieldWrite {
                addr: Register::FORMAT2,
                mask: BINNING,
                bits: bit(self.binning_x),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Size(u32, u32);

    impl FrameSize for Size {
        fn width(&self) -> u32 {
            self.0
        }

        fn height(&self) -> u32 {
            self.1
        }
    }

    const SIZES: [Size; 4] = [
        Size(1920, 1080),
        Size(1280, 720),
        Size(1300, 700),
        Size(640, 480),
    ];

    #[test]
    fn exact_match_wins() {
        assert_eq!(find_nearest(&SIZES, 640, 480), Some(&SIZES[3]));
        assert_eq!(find_nearest(&SIZES, 1920, 1080), Some(&SIZES[0]));
    }

    #[test]
    fn nearest_is_deterministic_and_ties_go_first() {
        // 1290x710 is 20 away from both 1280x720 and 1300x700
        let first = find_nearest(&SIZES, 1290, 710);
        assert_eq!(first, Some(&SIZES[1]));
        assert_eq!(find_nearest(&SIZES, 1290, 710), first);
    }

    #[test]
    fn empty_catalog_has_no_nearest() {
        let empty: [Size; 0] = [];
        assert_eq!(find_nearest(&empty, 640, 480), None);
        assert_eq!(enumerate(&SIZES, 4), None);
        assert_eq!(enumerate(&SIZES, 1), Some(&SIZES[1]));
    }

    #[test]
    fn nearest_interval_rounds_and_breaks_ties_early() {
        let choices = [FrameInterval::from_fps(30), FrameInterval::from_fps(90)];

        assert_eq!(
            nearest_interval(&choices, FrameInterval::new(1, 60)),
            Some(choices[0])
        );
        assert_eq!(
            nearest_interval(&choices, FrameInterval::new(1001, 75000)),
            Some(choices[1])
        );
        assert_eq!(
            nearest_interval(&choices, FrameInterval::new(0, 1)),
            Some(choices[1])
        );
    }

    #[test]
    fn axis_window_accounts_for_subsampling() {
        let x = Axis {
            crop_start: 16,
            offset: 8,
            output: 1280,
            crop_end: 2607,
            total: 1912,
        };

        assert!(x.is_consistent(2, 2624));
        assert!(!x.is_consistent(4, 2624));
        assert!(!x.is_consistent(2, 2600));
    }

    #[test]
    fn skipped_window_may_have_spare_lines() {
        // 640x480 readout: 1954 rows skipped by 4 leave 488 for 484 needed
        let y = Axis {
            crop_start: 0,
            offset: 2,
            output: 480,
            crop_end: 1953,
            total: 984,
        };

        assert!(y.is_consistent(4, 1956));
        assert!(!y.is_consistent(8, 1956));
    }

    #[test]
    fn huge_denominators_do_not_overflow() {
        let choices = [FrameInterval::from_fps(30), FrameInterval::from_fps(90)];
        let requested = FrameInterval::new(3, u32::MAX);

        assert_eq!(requested.fps(), 1_431_655_765);
        assert_eq!(FrameInterval::new(1, u32::MAX).fps(), u32::MAX);
        assert_eq!(nearest_interval(&choices, requested), Some(choices[1]));
    }
}
