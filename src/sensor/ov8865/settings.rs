//! OV8865 register tables.
//!
//! Vendor sequences; the values are not documented beyond their addresses.

use crate::sccb::RegValue;

/// Loaded once after power-on: soft reset (16 ms), standby, then the sensor core setup for the
/// full 3264x2448 readout.
pub const INIT: [RegValue; 308] = [
    RegValue::with_delay(0x0103, 0x01, 16),
    RegValue::new(0x0100, 0x00),
    RegValue::new(0x0100, 0x00),
    RegValue::new(0x0100, 0x00),
    RegValue::new(0x0100, 0x00),
    RegValue::new(0x3638, 0xff),
    RegValue::new(0x3638, 0xff),
    RegValue::new(0x3015, 0x01),
    RegValue::new(0x3022, 0x01),
    RegValue::new(0x3031, 0x0a),
    RegValue::new(0x3305, 0xf1),
    RegValue::new(0x3308, 0x00),
    RegValue::new(0x3309, 0x28),
    RegValue::new(0x330a, 0x00),
    RegValue::new(0x330b, 0x20),
    RegValue::new(0x330c, 0x00),
    RegValue::new(0x330d, 0x00),
    RegValue::new(0x330e, 0x00),
    RegValue::new(0x330f, 0x40),
    RegValue::new(0x3307, 0x04),
    RegValue::new(0x3604, 0x04),
    RegValue::new(0x3602, 0x30),
    RegValue::new(0x3605, 0x00),
    RegValue::new(0x3607, 0x20),
    RegValue::new(0x3608, 0x11),
    RegValue::new(0x3609, 0x68),
    RegValue::new(0x360a, 0x40),
    RegValue::new(0x360c, 0xdd),
    RegValue::new(0x360e, 0x0c),
    RegValue::new(0x3610, 0x07),
    RegValue::new(0x3612, 0x86),
    RegValue::new(0x3613, 0x58),
    RegValue::new(0x3614, 0x28),
    RegValue::new(0x3617, 0x40),
    RegValue::new(0x3618, 0x5a),
    RegValue::new(0x3619, 0x9b),
    RegValue::new(0x361c, 0x00),
    RegValue::new(0x361d, 0x60),
    RegValue::new(0x3631, 0x60),
    RegValue::new(0x3633, 0x10),
    RegValue::new(0x3634, 0x10),
    RegValue::new(0x3635, 0x10),
    RegValue::new(0x3636, 0x10),
    RegValue::new(0x3641, 0x55),
    RegValue::new(0x3646, 0x86),
    RegValue::new(0x3647, 0x27),
    RegValue::new(0x364a, 0x1b),
    RegValue::new(0x3500, 0x00),
    RegValue::new(0x3501, 0x4c),
    RegValue::new(0x3502, 0x00),
    RegValue::new(0x3503, 0x00),
    RegValue::new(0x3508, 0x02),
    RegValue::new(0x3509, 0x00),
    RegValue::new(0x3700, 0x24),
    RegValue::new(0x3701, 0x0c),
    RegValue::new(0x3702, 0x28),
    RegValue::new(0x3703, 0x19),
    RegValue::new(0x3704, 0x14),
    RegValue::new(0x3705, 0x00),
    RegValue::new(0x3706, 0x38),
    RegValue::new(0x3707, 0x04),
    RegValue::new(0x3708, 0x24),
    RegValue::new(0x3709, 0x40),
    RegValue::new(0x370a, 0x00),
    RegValue::new(0x370b, 0xb8),
    RegValue::new(0x370c, 0x04),
    RegValue::new(0x3718, 0x12),
    RegValue::new(0x3719, 0x31),
    RegValue::new(0x3712, 0x42),
    RegValue::new(0x3714, 0x12),
    RegValue::new(0x371e, 0x19),
    RegValue::new(0x371f, 0x40),
    RegValue::new(0x3720, 0x05),
    RegValue::new(0x3721, 0x05),
    RegValue::new(0x3724, 0x02),
    RegValue::new(0x3725, 0x02),
    RegValue::new(0x3726, 0x06),
    RegValue::new(0x3728, 0x05),
    RegValue::new(0x3729, 0x02),
    RegValue::new(0x372a, 0x03),
    RegValue::new(0x372b, 0x53),
    RegValue::new(0x372c, 0xa3),
    RegValue::new(0x372d, 0x53),
    RegValue::new(0x372e, 0x06),
    RegValue::new(0x372f, 0x10),
    RegValue::new(0x3730, 0x01),
    RegValue::new(0x3731, 0x06),
    RegValue::new(0x3732, 0x14),
    RegValue::new(0x3733, 0x10),
    RegValue::new(0x3734, 0x40),
    RegValue::new(0x3736, 0x20),
    RegValue::new(0x373a, 0x02),
    RegValue::new(0x373b, 0x0c),
    RegValue::new(0x373c, 0x0a),
    RegValue::new(0x373e, 0x03),
    RegValue::new(0x3755, 0x40),
    RegValue::new(0x3758, 0x00),
    RegValue::new(0x3759, 0x4c),
    RegValue::new(0x375a, 0x06),
    RegValue::new(0x375b, 0x13),
    RegValue::new(0x375c, 0x40),
    RegValue::new(0x375d, 0x02),
    RegValue::new(0x375e, 0x00),
    RegValue::new(0x375f, 0x14),
    RegValue::new(0x3767, 0x1c),
    RegValue::new(0x3768, 0x04),
    RegValue::new(0x3769, 0x20),
    RegValue::new(0x376c, 0xc0),
    RegValue::new(0x376d, 0xc0),
    RegValue::new(0x376a, 0x08),
    RegValue::new(0x3761, 0x00),
    RegValue::new(0x3762, 0x00),
    RegValue::new(0x3763, 0x00),
    RegValue::new(0x3766, 0xff),
    RegValue::new(0x376b, 0x42),
    RegValue::new(0x3772, 0x23),
    RegValue::new(0x3773, 0x02),
    RegValue::new(0x3774, 0x16),
    RegValue::new(0x3775, 0x12),
    RegValue::new(0x3776, 0x08),
    RegValue::new(0x37a0, 0x44),
    RegValue::new(0x37a1, 0x3d),
    RegValue::new(0x37a2, 0x3d),
    RegValue::new(0x37a3, 0x01),
    RegValue::new(0x37a4, 0x00),
    RegValue::new(0x37a5, 0x08),
    RegValue::new(0x37a6, 0x00),
    RegValue::new(0x37a7, 0x44),
    RegValue::new(0x37a8, 0x58),
    RegValue::new(0x37a9, 0x58),
    RegValue::new(0x3760, 0x00),
    RegValue::new(0x376f, 0x01),
    RegValue::new(0x37aa, 0x44),
    RegValue::new(0x37ab, 0x2e),
    RegValue::new(0x37ac, 0x2e),
    RegValue::new(0x37ad, 0x33),
    RegValue::new(0x37ae, 0x0d),
    RegValue::new(0x37af, 0x0d),
    RegValue::new(0x37b0, 0x00),
    RegValue::new(0x37b1, 0x00),
    RegValue::new(0x37b2, 0x00),
    RegValue::new(0x37b3, 0x42),
    RegValue::new(0x37b4, 0x42),
    RegValue::new(0x37b5, 0x33),
    RegValue::new(0x37b6, 0x00),
    RegValue::new(0x37b7, 0x00),
    RegValue::new(0x37b8, 0x00),
    RegValue::new(0x37b9, 0xff),
    RegValue::new(0x3800, 0x00),
    RegValue::new(0x3801, 0x0c),
    RegValue::new(0x3802, 0x00),
    RegValue::new(0x3803, 0x0c),
    RegValue::new(0x3804, 0x0c),
    RegValue::new(0x3805, 0xd3),
    RegValue::new(0x3806, 0x09),
    RegValue::new(0x3807, 0xa3),
    RegValue::new(0x3810, 0x00),
    RegValue::new(0x3811, 0x04),
    RegValue::new(0x3813, 0x04),
    RegValue::new(0x3814, 0x03),
    RegValue::new(0x3815, 0x01),
    RegValue::new(0x3820, 0x00),
    RegValue::new(0x3821, 0x67),
    RegValue::new(0x382a, 0x03),
    RegValue::new(0x382b, 0x01),
    RegValue::new(0x3830, 0x08),
    RegValue::new(0x3836, 0x02),
    RegValue::new(0x3837, 0x18),
    RegValue::new(0x3841, 0xff),
    RegValue::new(0x3846, 0x88),
    RegValue::new(0x3d85, 0x06),
    RegValue::new(0x3d8c, 0x75),
    RegValue::new(0x3d8d, 0xef),
    RegValue::new(0x3f08, 0x0b),
    RegValue::new(0x4000, 0xf1),
    RegValue::new(0x4001, 0x14),
    RegValue::new(0x4005, 0x10),
    RegValue::new(0x400b, 0x0c),
    RegValue::new(0x400d, 0x10),
    RegValue::new(0x401b, 0x00),
    RegValue::new(0x401d, 0x00),
    RegValue::new(0x4020, 0x01),
    RegValue::new(0x4021, 0x20),
    RegValue::new(0x4022, 0x01),
    RegValue::new(0x4023, 0x9f),
    RegValue::new(0x4024, 0x03),
    RegValue::new(0x4025, 0xe0),
    RegValue::new(0x4026, 0x04),
    RegValue::new(0x4027, 0x5f),
    RegValue::new(0x4028, 0x00),
    RegValue::new(0x4029, 0x02),
    RegValue::new(0x402a, 0x04),
    RegValue::new(0x402b, 0x04),
    RegValue::new(0x402c, 0x02),
    RegValue::new(0x402d, 0x02),
    RegValue::new(0x402e, 0x08),
    RegValue::new(0x402f, 0x02),
    RegValue::new(0x401f, 0x00),
    RegValue::new(0x4034, 0x3f),
    RegValue::new(0x4300, 0xff),
    RegValue::new(0x4301, 0x00),
    RegValue::new(0x4302, 0x0f),
    RegValue::new(0x4500, 0x40),
    RegValue::new(0x4503, 0x10),
    RegValue::new(0x4601, 0x74),
    RegValue::new(0x481f, 0x32),
    RegValue::new(0x4837, 0x16),
    RegValue::new(0x4850, 0x10),
    RegValue::new(0x4851, 0x32),
    RegValue::new(0x4b00, 0x2a),
    RegValue::new(0x4b0d, 0x00),
    RegValue::new(0x4d00, 0x04),
    RegValue::new(0x4d01, 0x18),
    RegValue::new(0x4d02, 0xc3),
    RegValue::new(0x4d03, 0xff),
    RegValue::new(0x4d04, 0xff),
    RegValue::new(0x4d05, 0xff),
    RegValue::new(0x5000, 0x96),
    RegValue::new(0x5001, 0x01),
    RegValue::new(0x5002, 0x08),
    RegValue::new(0x5901, 0x00),
    RegValue::new(0x5e00, 0x00),
    RegValue::new(0x5e01, 0x41),
    RegValue::new(0x0100, 0x01),
    RegValue::new(0x5b00, 0x02),
    RegValue::new(0x5b01, 0xd0),
    RegValue::new(0x5b02, 0x03),
    RegValue::new(0x5b03, 0xff),
    RegValue::new(0x5b05, 0x6c),
    RegValue::new(0x5780, 0xfc),
    RegValue::new(0x5781, 0xdf),
    RegValue::new(0x5782, 0x3f),
    RegValue::new(0x5783, 0x08),
    RegValue::new(0x5784, 0x0c),
    RegValue::new(0x5786, 0x20),
    RegValue::new(0x5787, 0x40),
    RegValue::new(0x5788, 0x08),
    RegValue::new(0x5789, 0x08),
    RegValue::new(0x578a, 0x02),
    RegValue::new(0x578b, 0x01),
    RegValue::new(0x578c, 0x01),
    RegValue::new(0x578d, 0x0c),
    RegValue::new(0x578e, 0x02),
    RegValue::new(0x578f, 0x01),
    RegValue::new(0x5790, 0x01),
    RegValue::new(0x5800, 0x1d),
    RegValue::new(0x5801, 0x0e),
    RegValue::new(0x5802, 0x0c),
    RegValue::new(0x5803, 0x0c),
    RegValue::new(0x5804, 0x0f),
    RegValue::new(0x5805, 0x22),
    RegValue::new(0x5806, 0x0a),
    RegValue::new(0x5807, 0x06),
    RegValue::new(0x5808, 0x05),
    RegValue::new(0x5809, 0x05),
    RegValue::new(0x580a, 0x07),
    RegValue::new(0x580b, 0x0a),
    RegValue::new(0x580c, 0x06),
    RegValue::new(0x580d, 0x02),
    RegValue::new(0x580e, 0x00),
    RegValue::new(0x580f, 0x00),
    RegValue::new(0x5810, 0x03),
    RegValue::new(0x5811, 0x07),
    RegValue::new(0x5812, 0x06),
    RegValue::new(0x5813, 0x02),
    RegValue::new(0x5814, 0x00),
    RegValue::new(0x5815, 0x00),
    RegValue::new(0x5816, 0x03),
    RegValue::new(0x5817, 0x07),
    RegValue::new(0x5818, 0x09),
    RegValue::new(0x5819, 0x06),
    RegValue::new(0x581a, 0x04),
    RegValue::new(0x581b, 0x04),
    RegValue::new(0x581c, 0x06),
    RegValue::new(0x581d, 0x0a),
    RegValue::new(0x581e, 0x19),
    RegValue::new(0x581f, 0x0d),
    RegValue::new(0x5820, 0x0b),
    RegValue::new(0x5821, 0x0b),
    RegValue::new(0x5822, 0x0e),
    RegValue::new(0x5823, 0x22),
    RegValue::new(0x5824, 0x23),
    RegValue::new(0x5825, 0x28),
    RegValue::new(0x5826, 0x29),
    RegValue::new(0x5827, 0x27),
    RegValue::new(0x5828, 0x13),
    RegValue::new(0x5829, 0x26),
    RegValue::new(0x582a, 0x33),
    RegValue::new(0x582b, 0x32),
    RegValue::new(0x582c, 0x33),
    RegValue::new(0x582d, 0x16),
    RegValue::new(0x582e, 0x14),
    RegValue::new(0x582f, 0x30),
    RegValue::new(0x5830, 0x31),
    RegValue::new(0x5831, 0x30),
    RegValue::new(0x5832, 0x15),
    RegValue::new(0x5833, 0x26),
    RegValue::new(0x5834, 0x23),
    RegValue::new(0x5835, 0x21),
    RegValue::new(0x5836, 0x23),
    RegValue::new(0x5837, 0x05),
    RegValue::new(0x5838, 0x36),
    RegValue::new(0x5839, 0x27),
    RegValue::new(0x583a, 0x28),
    RegValue::new(0x583b, 0x26),
    RegValue::new(0x583c, 0x24),
    RegValue::new(0x583d, 0xdf),
    RegValue::new(0x0100, 0x01),
];

/// Full array readout, 3264x2448.
pub const QUXGA: [RegValue; 96] = [
    RegValue::with_delay(0x0100, 0x00, 5),
    RegValue::new(0x3501, 0x98),
    RegValue::new(0x3502, 0x60),
    RegValue::new(0x3700, 0x48),
    RegValue::new(0x3701, 0x18),
    RegValue::new(0x3702, 0x50),
    RegValue::new(0x3703, 0x32),
    RegValue::new(0x3704, 0x28),
    RegValue::new(0x3706, 0x70),
    RegValue::new(0x3707, 0x08),
    RegValue::new(0x3708, 0x48),
    RegValue::new(0x3709, 0x80),
    RegValue::new(0x370a, 0x01),
    RegValue::new(0x370b, 0x70),
    RegValue::new(0x370c, 0x07),
    RegValue::new(0x3718, 0x14),
    RegValue::new(0x3712, 0x44),
    RegValue::new(0x371e, 0x31),
    RegValue::new(0x371f, 0x7f),
    RegValue::new(0x3720, 0x0a),
    RegValue::new(0x3721, 0x0a),
    RegValue::new(0x3724, 0x04),
    RegValue::new(0x3725, 0x04),
    RegValue::new(0x3726, 0x0c),
    RegValue::new(0x3728, 0x0a),
    RegValue::new(0x3729, 0x03),
    RegValue::new(0x372a, 0x06),
    RegValue::new(0x372b, 0xa6),
    RegValue::new(0x372c, 0xa6),
    RegValue::new(0x372d, 0xa6),
    RegValue::new(0x372e, 0x0c),
    RegValue::new(0x372f, 0x20),
    RegValue::new(0x3730, 0x02),
    RegValue::new(0x3731, 0x0c),
    RegValue::new(0x3732, 0x28),
    RegValue::new(0x3736, 0x30),
    RegValue::new(0x373a, 0x04),
    RegValue::new(0x373b, 0x18),
    RegValue::new(0x373c, 0x14),
    RegValue::new(0x373e, 0x06),
    RegValue::new(0x375a, 0x0c),
    RegValue::new(0x375b, 0x26),
    RegValue::new(0x375d, 0x04),
    RegValue::new(0x375f, 0x28),
    RegValue::new(0x3767, 0x1e),
    RegValue::new(0x3772, 0x46),
    RegValue::new(0x3773, 0x04),
    RegValue::new(0x3774, 0x2c),
    RegValue::new(0x3775, 0x13),
    RegValue::new(0x3776, 0x10),
    RegValue::new(0x37a0, 0x88),
    RegValue::new(0x37a1, 0x7a),
    RegValue::new(0x37a2, 0x7a),
    RegValue::new(0x37a3, 0x02),
    RegValue::new(0x37a5, 0x09),
    RegValue::new(0x37a7, 0x88),
    RegValue::new(0x37a8, 0xb0),
    RegValue::new(0x37a9, 0xb0),
    RegValue::new(0x37aa, 0x88),
    RegValue::new(0x37ab, 0x5c),
    RegValue::new(0x37ac, 0x5c),
    RegValue::new(0x37ad, 0x55),
    RegValue::new(0x37ae, 0x19),
    RegValue::new(0x37af, 0x19),
    RegValue::new(0x37b3, 0x84),
    RegValue::new(0x37b4, 0x84),
    RegValue::new(0x37b5, 0x66),
    RegValue::new(0x3813, 0x02),
    RegValue::new(0x3814, 0x01),
    RegValue::new(0x3821, 0x46),
    RegValue::new(0x382a, 0x01),
    RegValue::new(0x382b, 0x01),
    RegValue::new(0x3830, 0x04),
    RegValue::new(0x3836, 0x01),
    RegValue::new(0x3846, 0x48),
    RegValue::new(0x3f08, 0x16),
    RegValue::new(0x4000, 0xf1),
    RegValue::new(0x4001, 0x04),
    RegValue::new(0x4020, 0x02),
    RegValue::new(0x4021, 0x40),
    RegValue::new(0x4022, 0x03),
    RegValue::new(0x4023, 0x3f),
    RegValue::new(0x4024, 0x07),
    RegValue::new(0x4025, 0xc0),
    RegValue::new(0x4026, 0x08),
    RegValue::new(0x4027, 0xbf),
    RegValue::new(0x402a, 0x04),
    RegValue::new(0x402b, 0x04),
    RegValue::new(0x402c, 0x02),
    RegValue::new(0x402d, 0x02),
    RegValue::new(0x402e, 0x08),
    RegValue::new(0x4500, 0x68),
    RegValue::new(0x4601, 0x10),
    RegValue::new(0x5002, 0x08),
    RegValue::new(0x5901, 0x00),
    RegValue::new(0x0100, 0x01),
];

/// Full-width cropped readout shared by 3264x1836, 1920x1080 and 640x480.
pub const CROPPED: [RegValue; 96] = [
    RegValue::with_delay(0x0100, 0x00, 5),
    RegValue::new(0x3501, 0x72),
    RegValue::new(0x3502, 0x20),
    RegValue::new(0x3700, 0x48),
    RegValue::new(0x3701, 0x18),
    RegValue::new(0x3702, 0x50),
    RegValue::new(0x3703, 0x32),
    RegValue::new(0x3704, 0x28),
    RegValue::new(0x3706, 0x70),
    RegValue::new(0x3707, 0x08),
    RegValue::new(0x3708, 0x48),
    RegValue::new(0x3709, 0x80),
    RegValue::new(0x370a, 0x01),
    RegValue::new(0x370b, 0x70),
    RegValue::new(0x370c, 0x07),
    RegValue::new(0x3718, 0x14),
    RegValue::new(0x3712, 0x44),
    RegValue::new(0x371e, 0x31),
    RegValue::new(0x371f, 0x7f),
    RegValue::new(0x3720, 0x0a),
    RegValue::new(0x3721, 0x0a),
    RegValue::new(0x3724, 0x04),
    RegValue::new(0x3725, 0x04),
    RegValue::new(0x3726, 0x0c),
    RegValue::new(0x3728, 0x0a),
    RegValue::new(0x3729, 0x03),
    RegValue::new(0x372a, 0x06),
    RegValue::new(0x372b, 0xa6),
    RegValue::new(0x372c, 0xa6),
    RegValue::new(0x372d, 0xa6),
    RegValue::new(0x372e, 0x0c),
    RegValue::new(0x372f, 0x20),
    RegValue::new(0x3730, 0x02),
    RegValue::new(0x3731, 0x0c),
    RegValue::new(0x3732, 0x28),
    RegValue::new(0x3736, 0x30),
    RegValue::new(0x373a, 0x04),
    RegValue::new(0x373b, 0x18),
    RegValue::new(0x373c, 0x14),
    RegValue::new(0x373e, 0x06),
    RegValue::new(0x375a, 0x0c),
    RegValue::new(0x375b, 0x26),
    RegValue::new(0x375d, 0x04),
    RegValue::new(0x375f, 0x28),
    RegValue::new(0x3767, 0x1e),
    RegValue::new(0x3772, 0x46),
    RegValue::new(0x3773, 0x04),
    RegValue::new(0x3774, 0x2c),
    RegValue::new(0x3775, 0x13),
    RegValue::new(0x3776, 0x10),
    RegValue::new(0x37a0, 0x88),
    RegValue::new(0x37a1, 0x7a),
    RegValue::new(0x37a2, 0x7a),
    RegValue::new(0x37a3, 0x02),
    RegValue::new(0x37a5, 0x09),
    RegValue::new(0x37a7, 0x88),
    RegValue::new(0x37a8, 0xb0),
    RegValue::new(0x37a9, 0xb0),
    RegValue::new(0x37aa, 0x88),
    RegValue::new(0x37ab, 0x5c),
    RegValue::new(0x37ac, 0x5c),
    RegValue::new(0x37ad, 0x55),
    RegValue::new(0x37ae, 0x19),
    RegValue::new(0x37af, 0x19),
    RegValue::new(0x37b3, 0x84),
    RegValue::new(0x37b4, 0x84),
    RegValue::new(0x37b5, 0x66),
    RegValue::new(0x3813, 0x02),
    RegValue::new(0x3814, 0x01),
    RegValue::new(0x3821, 0x46),
    RegValue::new(0x382a, 0x01),
    RegValue::new(0x382b, 0x01),
    RegValue::new(0x3830, 0x04),
    RegValue::new(0x3836, 0x01),
    RegValue::new(0x3846, 0x48),
    RegValue::new(0x3f08, 0x16),
    RegValue::new(0x4000, 0xf1),
    RegValue::new(0x4001, 0x04),
    RegValue::new(0x4020, 0x02),
    RegValue::new(0x4021, 0x40),
    RegValue::new(0x4022, 0x03),
    RegValue::new(0x4023, 0x3f),
    RegValue::new(0x4024, 0x07),
    RegValue::new(0x4025, 0xc0),
    RegValue::new(0x4026, 0x08),
    RegValue::new(0x4027, 0xbf),
    RegValue::new(0x402a, 0x04),
    RegValue::new(0x402b, 0x04),
    RegValue::new(0x402c, 0x02),
    RegValue::new(0x402d, 0x02),
    RegValue::new(0x402e, 0x08),
    RegValue::new(0x4500, 0x68),
    RegValue::new(0x4601, 0x10),
    RegValue::new(0x5002, 0x08),
    RegValue::new(0x5901, 0x00),
    RegValue::new(0x0100, 0x01),
];

/// 2x2 binned readout shared by 1600x1200, 1280x720 and 800x600.
pub const BINNED: [RegValue; 96] = [
    RegValue::with_delay(0x0100, 0x00, 5),
    RegValue::new(0x3501, 0x26),
    RegValue::new(0x3502, 0x00),
    RegValue::new(0x3700, 0x24),
    RegValue::new(0x3701, 0x0c),
    RegValue::new(0x3702, 0x28),
    RegValue::new(0x3703, 0x19),
    RegValue::new(0x3704, 0x14),
    RegValue::new(0x3706, 0x38),
    RegValue::new(0x3707, 0x04),
    RegValue::new(0x3708, 0x24),
    RegValue::new(0x3709, 0x40),
    RegValue::new(0x370a, 0x00),
    RegValue::new(0x370b, 0xb8),
    RegValue::new(0x370c, 0x04),
    RegValue::new(0x3718, 0x12),
    RegValue::new(0x3712, 0x42),
    RegValue::new(0x371e, 0x19),
    RegValue::new(0x371f, 0x40),
    RegValue::new(0x3720, 0x05),
    RegValue::new(0x3721, 0x05),
    RegValue::new(0x3724, 0x02),
    RegValue::new(0x3725, 0x02),
    RegValue::new(0x3726, 0x06),
    RegValue::new(0x3728, 0x05),
    RegValue::new(0x3729, 0x02),
    RegValue::new(0x372a, 0x03),
    RegValue::new(0x372b, 0x53),
    RegValue::new(0x372c, 0xa3),
    RegValue::new(0x372d, 0x53),
    RegValue::new(0x372e, 0x06),
    RegValue::new(0x372f, 0x10),
    RegValue::new(0x3730, 0x01),
    RegValue::new(0x3731, 0x06),
    RegValue::new(0x3732, 0x14),
    RegValue::new(0x3736, 0x20),
    RegValue::new(0x373a, 0x02),
    RegValue::new(0x373b, 0x0c),
    RegValue::new(0x373c, 0x0a),
    RegValue::new(0x373e, 0x03),
    RegValue::new(0x375a, 0x06),
    RegValue::new(0x375b, 0x13),
    RegValue::new(0x375d, 0x02),
    RegValue::new(0x375f, 0x14),
    RegValue::new(0x3767, 0x18),
    RegValue::new(0x3772, 0x23),
    RegValue::new(0x3773, 0x02),
    RegValue::new(0x3774, 0x16),
    RegValue::new(0x3775, 0x12),
    RegValue::new(0x3776, 0x08),
    RegValue::new(0x37a0, 0x44),
    RegValue::new(0x37a1, 0x3d),
    RegValue::new(0x37a2, 0x3d),
    RegValue::new(0x37a3, 0x01),
    RegValue::new(0x37a5, 0x08),
    RegValue::new(0x37a7, 0x44),
    RegValue::new(0x37a8, 0x58),
    RegValue::new(0x37a9, 0x58),
    RegValue::new(0x37aa, 0x44),
    RegValue::new(0x37ab, 0x2e),
    RegValue::new(0x37ac, 0x2e),
    RegValue::new(0x37ad, 0x33),
    RegValue::new(0x37ae, 0x0d),
    RegValue::new(0x37af, 0x0d),
    RegValue::new(0x37b3, 0x42),
    RegValue::new(0x37b4, 0x42),
    RegValue::new(0x37b5, 0x33),
    RegValue::new(0x3813, 0x04),
    RegValue::new(0x3814, 0x03),
    RegValue::new(0x3821, 0x6f),
    RegValue::new(0x382a, 0x05),
    RegValue::new(0x382b, 0x03),
    RegValue::new(0x3830, 0x08),
    RegValue::new(0x3836, 0x02),
    RegValue::new(0x3846, 0x88),
    RegValue::new(0x3f08, 0x0b),
    RegValue::new(0x4000, 0xf1),
    RegValue::new(0x4001, 0x14),
    RegValue::new(0x4020, 0x01),
    RegValue::new(0x4021, 0x20),
    RegValue::new(0x4022, 0x01),
    RegValue::new(0x4023, 0x9f),
    RegValue::new(0x4024, 0x03),
    RegValue::new(0x4025, 0xe0),
    RegValue::new(0x4026, 0x04),
    RegValue::new(0x4027, 0x5f),
    RegValue::new(0x402a, 0x02),
    RegValue::new(0x402b, 0x02),
    RegValue::new(0x402c, 0x00),
    RegValue::new(0x402d, 0x00),
    RegValue::new(0x402e, 0x04),
    RegValue::new(0x4500, 0x40),
    RegValue::new(0x4601, 0x50),
    RegValue::new(0x5002, 0x0c),
    RegValue::new(0x5901, 0x04),
    RegValue::new(0x0100, 0x01),
];
