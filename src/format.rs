//! Media bus formats and their MIPI CSI-2 data types.

use enumn::N;

/// Media bus format codes, as used on the sensor source pad.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, N)]
#[repr(u32)]
pub enum BusFormat {
    Rgb565 = 0x1017,
    Rgb888 = 0x100a,
    Uyvy8 = 0x2006,
    Uyvy10 = 0x2018,
    Sbggr8 = 0x3001,
    Sgbrg8 = 0x3013,
    Sgrbg8 = 0x3002,
    Srggb8 = 0x3014,
    Sbggr10 = 0x3007,
    Sgbrg10 = 0x300e,
    Sgrbg10 = 0x300a,
    Srggb10 = 0x300f,
    Sbggr12 = 0x3008,
    Sgbrg12 = 0x3010,
    Sgrbg12 = 0x3011,
    Srggb12 = 0x3012,
}

/// CSI-2 packet data types.
#[derive(Clone, Copy, Debug, Eq, PartialEq, N)]
#[repr(u8)]
pub enum DataType {
    Yuv422 = 0x1e,
    Yuv422_10 = 0x1f,
    Rgb565 = 0x22,
    Rgb888 = 0x24,
    Raw8 = 0x2a,
    Raw10 = 0x2b,
    Raw12 = 0x2c,
}

/// Colour filter layout of a Bayer format, first row first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BayerOrder {
    Bggr,
    Gbrg,
    Grbg,
    Rggb,
}

impl BusFormat {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        BusFormat::n(code)
    }

    pub fn bits_per_pixel(self) -> u8 {
        use BusFormat::*;
        match self {
            Sbggr8 | Sgbrg8 | Sgrbg8 | Srggb8 => 8,
            Sbggr10 | Sgbrg10 | Sgrbg10 | Srggb10 => 10,
            Sbggr12 | Sgbrg12 | Sgrbg12 | Srggb12 => 12,
            Uyvy8 | Rgb565 => 16,
            Uyvy10 => 20,
            Rgb888 => 24,
        }
    }

    pub fn data_type(self) -> DataType {
        use BusFormat::*;
        match self {
            Sbggr8 | Sgbrg8 | Sgrbg8 | Srggb8 => DataType::Raw8,
            Sbggr10 | Sgbrg10 | Sgrbg10 | Srggb10 => DataType::Raw10,
            Sbggr12 | Sgbrg12 | Sgrbg12 | Srggb12 => DataType::Raw12,
            Uyvy8 => DataType::Yuv422,
            Uyvy10 => DataType::Yuv422_10,
            Rgb565 => DataType::Rgb565,
            Rgb888 => DataType::Rgb888,
        }
    }

    /// `None` for non-Bayer formats.
    pub fn bayer_order(self) -> Option<BayerOrder> {
        use BusFormat::*;
        match self {
            Sbggr8 | Sbggr10 | Sbggr12 => Some(BayerOrder::Bggr),
            Sgbrg8 | Sgbrg10 | Sgbrg12 => Some(BayerOrder::Gbrg),
            Sgrbg8 | Sgrbg10 | Sgrbg12 => Some(BayerOrder::Grbg),
            Srggb8 | Srggb10 | Srggb12 => Some(BayerOrder::Rggb),
            Uyvy8 | Uyvy10 | Rgb565 | Rgb888 => None,
        }
    }
}

impl DataType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_media_bus_numbering() {
        assert_eq!(BusFormat::Sbggr10.code(), 0x3007);
        assert_eq!(BusFormat::from_code(0x300f), Some(BusFormat::Srggb10));
        assert_eq!(BusFormat::from_code(0x3000), None);
        assert_eq!(DataType::n(0x2b), Some(DataType::Raw10));
    }

    #[test]
    fn bayer_formats_map_to_raw_data_types() {
        assert_eq!(BusFormat::Sbggr8.data_type(), DataType::Raw8);
        assert_eq!(BusFormat::Sgrbg10.data_type(), DataType::Raw10);
        assert_eq!(BusFormat::Srggb12.data_type().code(), 0x2c);
        assert_eq!(BusFormat::Uyvy8.data_type().code(), 0x1e);
        assert_eq!(BusFormat::Rgb888.bits_per_pixel(), 24);
    }

    #[test]
    fn bayer_order_ignores_depth() {
        assert_eq!(BusFormat::Sgbrg12.bayer_order(), Some(BayerOrder::Gbrg));
        assert_eq!(BusFormat::Sgbrg8.bayer_order(), Some(BayerOrder::Gbrg));
        assert_eq!(BusFormat::Rgb565.bayer_order(), None);
    }
}
