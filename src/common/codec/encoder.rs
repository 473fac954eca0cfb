use tracing::debug;

use super::types::{Mode, Segment, MODE_BITS, PADDING_CODEWORDS};
use crate::common::bit_buffer::BitBuffer;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Version;

// Encoder
//------------------------------------------------------------------------------

/// Frames segments into exactly `data_codewords` bytes: segments, terminator,
/// zero bits up to a byte boundary, then alternating pad codewords.
pub fn encode_data(segs: &[Segment], ver: Version, data_codewords: usize) -> QRResult<BitBuffer> {
    let capacity = data_codewords << 3;
    let mut bb = BitBuffer::with_capacity(capacity);
    for seg in segs {
        seg.write(ver, &mut bb)?;
    }

    if bb.len() > capacity {
        return Err(QRError::CapacityOverflow { bits: bb.len(), capacity });
    }
    debug!("Encoded {} of {capacity} data bits", bb.len());

    push_terminator(&mut bb, capacity);
    push_padding_bits(&mut bb);
    push_padding_codewords(&mut bb, capacity);

    debug_assert_eq!(bb.len(), capacity, "Encoded data doesn't fill capacity");
    Ok(bb)
}

// Writer for encoded data
//------------------------------------------------------------------------------

fn push_terminator(out: &mut BitBuffer, capacity: usize) {
    if out.len() + MODE_BITS <= capacity {
        out.put(Mode::Terminator as u8, MODE_BITS);
    }
}

fn push_padding_bits(out: &mut BitBuffer) {
    while out.len() & 7 != 0 {
        out.put_bit(false);
    }
}

fn push_padding_codewords(out: &mut BitBuffer, capacity: usize) {
    debug_assert!(out.len() & 7 == 0, "Bit offset should be zero before padding codewords");

    let remain_byte_capacity = capacity.saturating_sub(out.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.put(pc, 8);
    });
}
