use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ECBlock {
    // Data codewords
    pub data_len: usize,
    // Data + ecc codewords
    pub total_len: usize,
}

impl ECBlock {
    pub fn ec_len(&self) -> usize {
        self.total_len - self.data_len
    }
}

/// Block partition for a version and ec level. Shorter blocks come first; the
/// remaining blocks hold one extra data codeword.
pub fn ec_blocks(version: Version, ecl: ECLevel) -> QRResult<Vec<ECBlock>> {
    let v = *version as usize;
    let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[ecl as usize][v];
    let block_cnt = NUM_EC_BLOCKS[ecl as usize][v];
    if ecc_per_block <= 0 || block_cnt <= 0 {
        return Err(QRError::InvalidVersion);
    }
    let (ecc_per_block, block_cnt) = (ecc_per_block as usize, block_cnt as usize);

    let total = version.total_codewords();
    let short_cnt = block_cnt - total % block_cnt;
    let short_len = total / block_cnt;

    let blocks = (0..block_cnt)
        .map(|i| {
            let total_len = if i < short_cnt { short_len } else { short_len + 1 };
            ECBlock { data_len: total_len - ecc_per_block, total_len }
        })
        .collect();
    Ok(blocks)
}

pub fn data_codewords(version: Version, ecl: ECLevel) -> QRResult<usize> {
    Ok(ec_blocks(version, ecl)?.iter().map(|b| b.data_len).sum())
}

#[cfg(test)]
mod block_tests {
    use test_case::test_case;

    use super::{data_codewords, ec_blocks, ECBlock};
    use crate::common::metadata::{ECLevel, Version};

    fn blk(data_len: usize, total_len: usize) -> ECBlock {
        ECBlock { data_len, total_len }
    }

    #[test]
    fn test_single_block() {
        let blocks = ec_blocks(Version::new(1).unwrap(), ECLevel::H).unwrap();
        assert_eq!(blocks, vec![blk(9, 26)]);
    }

    #[test]
    fn test_mixed_blocks() {
        let blocks = ec_blocks(Version::new(5).unwrap(), ECLevel::Q).unwrap();
        assert_eq!(blocks, vec![blk(15, 33), blk(15, 33), blk(16, 34), blk(16, 34)]);
        let blocks = ec_blocks(Version::new(7).unwrap(), ECLevel::H).unwrap();
        assert_eq!(blocks.len(), 5);
        assert_eq!(&blocks[..4], &[blk(13, 39); 4]);
        assert_eq!(blocks[4], blk(14, 40));
    }

    #[test]
    fn test_totals_match_capacity() {
        for v in 1..=40 {
            let ver = Version::new(v).unwrap();
            for ecl in ECLevel::ALL {
                let blocks = ec_blocks(ver, ecl).unwrap();
                let total: usize = blocks.iter().map(|b| b.total_len).sum();
                assert_eq!(total, ver.total_codewords(), "Version {v}, {ecl:?}");
                let ec_len = blocks[0].ec_len();
                assert!(blocks.iter().all(|b| b.ec_len() == ec_len));

                // Byte capacity leaves room for mode and length fields
                let data_bits = data_codewords(ver, ecl).unwrap() * 8;
                let needed = 4 + ver.char_cnt_bits() + ver.byte_capacity(ecl) * 8;
                assert!(needed <= data_bits, "Version {v}, {ecl:?}");
                assert!(needed + 8 > data_bits, "Version {v}, {ecl:?}");
            }
        }
    }

    #[test_case(1, ECLevel::L, 19)]
    #[test_case(1, ECLevel::H, 9)]
    #[test_case(10, ECLevel::M, 216)]
    #[test_case(27, ECLevel::Q, 808)]
    #[test_case(40, ECLevel::L, 2956)]
    #[test_case(40, ECLevel::H, 1276)]
    fn test_data_codewords(v: usize, ecl: ECLevel, exp: usize) {
        assert_eq!(data_codewords(Version::new(v).unwrap(), ecl).unwrap(), exp);
    }
}

// Global constants
//------------------------------------------------------------------------------

// Index: [ec level][version]
static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static NUM_EC_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];
