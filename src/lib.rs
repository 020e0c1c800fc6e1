//! Register-level drivers for MIPI CSI-2 camera pipelines: OmniVision image sensors, Allwinner
//! CSI-2 receivers and D-PHY, and the Allwinner ISP frontend.

/// Sensor PLL trees and the static clock table lookup.
pub mod clock;
/// Media bus formats and CSI-2 data types.
pub mod format;
/// ISP frontend programming and completion handling.
#[cfg(feature = "isp")]
pub mod isp;
/// MIPI CSI-2 link bring-up, receivers and D-PHY.
pub mod mipi;
/// Capture mode catalogs and nearest-match selection.
pub mod mode;
/// Supply, clock and control line sequencing.
pub mod power;
/// 32-bit memory-mapped register blocks.
pub mod regmap;
/// Serial Camera Control Bus register access.
pub mod sccb;
/// Sensor state machine and concrete sensor drivers.
pub mod sensor;

#[cfg(test)]
mod mock;
