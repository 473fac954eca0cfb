use encoding_rs::WINDOWS_1252;

use crate::common::bit_buffer::BitBuffer;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Version;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Byte = 0b0100,
    Terminator = 0b0000,
}

pub const MODE_BITS: usize = 4;

pub static PADDING_CODEWORDS: [u8; 2] = [0xEC, 0x11];

// Segment
//------------------------------------------------------------------------------

/// Byte mode segment: mode indicator, character count and payload.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Segment {
    pub mode: Mode,
    pub data: Vec<u8>,
}

impl Segment {
    pub fn new(data: &[u8]) -> Self {
        Self { mode: Mode::Byte, data: data.to_vec() }
    }

    pub fn bit_len(&self, ver: Version) -> usize {
        MODE_BITS + ver.char_cnt_bits() + (self.data.len() << 3)
    }

    pub fn write(&self, ver: Version, out: &mut BitBuffer) -> QRResult<()> {
        let len_bits = ver.char_cnt_bits();
        let char_cnt = self.data.len();
        let max_cnt = (1 << len_bits) - 1;
        if char_cnt > max_cnt {
            let capacity = MODE_BITS + len_bits + (max_cnt << 3);
            return Err(QRError::CapacityOverflow { bits: self.bit_len(ver), capacity });
        }

        out.put(self.mode as u8, MODE_BITS);
        out.put(char_cnt as u16, len_bits);
        for &b in &self.data {
            out.put(b, 8);
        }
        Ok(())
    }
}

#[cfg(test)]
mod segment_tests {
    use super::Segment;
    use crate::common::bit_buffer::BitBuffer;
    use crate::common::error::QRError;
    use crate::common::metadata::Version;

    #[test]
    fn test_bit_len() {
        let seg = Segment::new(b"HELLO");
        assert_eq!(seg.bit_len(Version::new(1).unwrap()), 52);
        assert_eq!(seg.bit_len(Version::new(10).unwrap()), 60);
        assert_eq!(seg.bit_len(Version::new(40).unwrap()), 60);
    }

    #[test]
    fn test_write_v1() {
        let mut bb = BitBuffer::new();
        Segment::new(b"Hi").write(Version::new(1).unwrap(), &mut bb).unwrap();
        assert_eq!(bb.len(), 28);
        assert_eq!(bb.data(), &[0b0100_0000, 0b0010_0100, 0b1000_0110, 0b1001_0000]);
    }

    #[test]
    fn test_write_v10() {
        let mut bb = BitBuffer::new();
        Segment::new(b"a").write(Version::new(10).unwrap(), &mut bb).unwrap();
        assert_eq!(bb.len(), 28);
        assert_eq!(bb.data(), &[0b0100_0000, 0b0000_0000, 0b0001_0110, 0b0001_0000]);
    }

    #[test]
    fn test_write_char_count_overflow() {
        let mut bb = BitBuffer::new();
        let res = Segment::new(&[0; 256]).write(Version::new(9).unwrap(), &mut bb);
        assert!(matches!(res, Err(QRError::CapacityOverflow { .. })));
        assert!(bb.is_empty());
    }
}

// Charset
//------------------------------------------------------------------------------

pub static UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Transcoding from text into the byte mode payload.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Charset {
    /// UTF-8, prefixed with a byte order mark when the text is not pure ASCII.
    #[default]
    Utf8,
    /// Single byte ISO-8859-1. C1 controls and characters past U+00FF are
    /// rejected, so the windows-1252 extras never reach the payload.
    Latin1,
}

impl Charset {
    pub fn encode(self, text: &str) -> QRResult<Vec<u8>> {
        if text.is_empty() {
            return Err(QRError::EmptyData);
        }

        match self {
            Self::Utf8 => {
                let mut res = Vec::with_capacity(text.len() + UTF8_BOM.len());
                if !text.is_ascii() {
                    res.extend_from_slice(&UTF8_BOM);
                }
                res.extend_from_slice(text.as_bytes());
                Ok(res)
            }
            Self::Latin1 => {
                if text.chars().any(|c| matches!(c as u32, 0x80..=0x9F | 0x100..=u32::MAX)) {
                    return Err(QRError::InvalidChar);
                }
                let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
                if had_errors {
                    return Err(QRError::InvalidChar);
                }
                Ok(bytes.into_owned())
            }
        }
    }
}
