// BCH codes protecting format & version info
//------------------------------------------------------------------------------

// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const G15: u32 = 0b101_0011_0111;

// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const G18: u32 = 0b1_1111_0010_0101;

pub const G15_MASK: u32 = 0b101_0100_0001_0010;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

/// Number of significant bits in `num`.
pub fn bch_digit(num: u32) -> u32 {
    u32::BITS - num.leading_zeros()
}

// Remainder of `data` shifted past the generator's degree, divided by the generator
fn bch_remainder(data: u32, gen: u32) -> u32 {
    let gen_digit = bch_digit(gen);
    let mut rem = data << (gen_digit - 1);
    while bch_digit(rem) >= gen_digit {
        rem ^= gen << (bch_digit(rem) - gen_digit);
    }
    rem
}

/// 15 bit format info for the 5 bit (ec level, mask) field.
pub fn format_info(data: u32) -> u32 {
    debug_assert!(data < 1 << 5, "Format data exceeds 5 bits: {data}");
    ((data << 10) | bch_remainder(data, G15)) ^ G15_MASK
}

/// 18 bit version info for a 6 bit version number.
pub fn version_info(version: u32) -> u32 {
    debug_assert!(version < 1 << 6, "Version exceeds 6 bits: {version}");
    (version << 12) | bch_remainder(version, G18)
}
