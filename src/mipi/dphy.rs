//! Default D-PHY timings.

const PSEC_PER_SEC: u64 = 1_000_000_000_000;

/// D-PHY timing parameters. Durations are in picoseconds except `init` and `wakeup`
/// (microseconds) and `clk_pre` (UI).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DphyConfig {
    pub clk_miss: u64,
    pub clk_post: u64,
    pub clk_pre: u64,
    pub clk_prepare: u64,
    pub clk_settle: u64,
    pub clk_term_en: u64,
    pub clk_trail: u64,
    pub clk_zero: u64,
    pub d_term_en: u64,
    pub eot: u64,
    pub hs_exit: u64,
    pub hs_prepare: u64,
    pub hs_zero: u64,
    pub hs_settle: u64,
    pub hs_skip: u64,
    pub hs_trail: u64,
    pub init: u64,
    pub lpx: u64,
    pub ta_get: u64,
    pub ta_go: u64,
    pub ta_sure: u64,
    pub wakeup: u64,
    /// Lane bit rate in bits per second. The DDR clock on the wire runs at half of it.
    pub hs_clk_rate: u64,
    pub lanes: u8,
}

impl DphyConfig {
    /// Timings for a link carrying `pixel_rate` pixels/s of `bits_per_pixel` over `lanes`.
    /// `None` when nothing would be transferred.
    pub fn from_pixel_rate(pixel_rate: u64, bits_per_pixel: u8, lanes: u8) -> Option<Self> {
        if lanes == 0 {
            return None;
        }

        let hs_clk_rate = pixel_rate * u64::from(bits_per_pixel) / u64::from(lanes);
        if hs_clk_rate == 0 {
            return None;
        }

        // Unit interval, rounded up
        let ui = (PSEC_PER_SEC + hs_clk_rate - 1) / hs_clk_rate;
        let lpx = 50_000;

        Some(DphyConfig {
            clk_miss: 0,
            clk_post: 60_000 + 52 * ui,
            clk_pre: 8,
            clk_prepare: 38_000,
            clk_settle: 95_000,
            clk_term_en: 0,
            clk_trail: 60_000,
            clk_zero: 262_000,
            d_term_en: 0,
            eot: 0,
            hs_exit: 100_000,
            hs_prepare: 40_000 + 4 * ui,
            hs_zero: 105_000 + 6 * ui,
            hs_settle: 85_000 + 6 * ui,
            hs_skip: 40_000,
            hs_trail: core::cmp::max(4 * 8 * ui, 60_000 + 4 * 4 * ui),
            init: 100,
            lpx,
            ta_get: 5 * lpx,
            ta_go: 4 * lpx,
            ta_sure: 2 * lpx,
            wakeup: 1_000,
            hs_clk_rate,
            lanes,
        })
    }

    /// Frequency of the clock lane.
    pub fn ddr_clock_hz(&self) -> u64 {
        self.hs_clk_rate / 2
    }
}
