mod block;

pub use block::*;

use std::ops::Deref;

use super::error::QRResult;
use super::poly::Polynomial;

// ECC: Error Correction Codeword generator
//------------------------------------------------------------------------------

/// Error correction codewords of one block: the remainder of `block * x^ec_len`
/// divided by the generator, left padded with zeros to exactly `ec_len` bytes.
pub fn ecc(block: &[u8], gen: &Polynomial) -> QRResult<Vec<u8>> {
    let ec_len = gen.len() - 1;
    let rem = Polynomial::new(block, ec_len).modulo(gen)?;

    let mut res = vec![0u8; ec_len];
    res[ec_len - rem.len()..].copy_from_slice(rem.coeffs());
    Ok(res)
}

/// Splits data codewords into blocks, appends ecc and interleaves into the final
/// codeword sequence: all data column-major, then all ecc column-major.
pub fn compute_codewords(data: &[u8], blocks: &[ECBlock]) -> QRResult<Vec<u8>> {
    debug_assert_eq!(
        data.len(),
        blocks.iter().map(|b| b.data_len).sum::<usize>(),
        "Data len doesn't match total size of blocks"
    );

    let mut data_blocks = Vec::with_capacity(blocks.len());
    let mut ecc_blocks = Vec::with_capacity(blocks.len());
    let mut gen: Option<Polynomial> = None;
    let mut offset = 0;
    for b in blocks {
        let chunk = &data[offset..offset + b.data_len];
        offset += b.data_len;

        let g = match gen.take() {
            Some(g) if g.len() == b.ec_len() + 1 => g,
            _ => Polynomial::generator(b.ec_len()),
        };
        ecc_blocks.push(ecc(chunk, &g)?);
        data_blocks.push(chunk);
        gen = Some(g);
    }

    let mut res = interleave(&data_blocks);
    res.extend(interleave(&ecc_blocks));
    Ok(res)
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

#[cfg(test)]
mod ec_tests {
    use super::{compute_codewords, ec_blocks, ecc, interleave};
    use crate::common::metadata::{ECLevel, Version};
    use crate::common::poly::Polynomial;

    #[test]
    fn test_ecc_1() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", &Polynomial::generator(10));
        assert_eq!(&*res.unwrap(), b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_ecc_2() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", &Polynomial::generator(13));
        assert_eq!(&*res.unwrap(), b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_ecc_3() {
        let res = ecc(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", &Polynomial::generator(18));
        assert_eq!(&*res.unwrap(), b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_ecc_zero_block() {
        let res = ecc(&[0; 9], &Polynomial::generator(17)).unwrap();
        assert_eq!(res, vec![0; 17]);
    }

    #[test]
    fn test_compute_codewords_single_block() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let blocks = ec_blocks(Version::new(1).unwrap(), ECLevel::M).unwrap();
        let res = compute_codewords(msg, &blocks).unwrap();
        assert_eq!(&res[..16], msg);
        assert_eq!(&res[16..], b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17");
    }

    #[test]
    fn test_compute_codewords_mixed_blocks() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec: [&[u8]; 4] = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let blocks = ec_blocks(Version::new(5).unwrap(), ECLevel::Q).unwrap();
        let res = compute_codewords(msg, &blocks).unwrap();
        assert_eq!(res.len(), 134);

        let data_blocks = [&msg[..15], &msg[15..30], &msg[30..46], &msg[46..]];
        assert_eq!(&res[..62], &*interleave(&data_blocks));
        assert_eq!(&res[62..], &*interleave(&expected_ec));
        // Longer blocks contribute their last data codeword after the others run out
        assert_eq!(res[60], msg[45]);
        assert_eq!(res[61], msg[61]);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }
}
