use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks every cell in data placement order: two-column strips from the right
/// edge, alternating upwards and downwards, right cell before left cell. The
/// vertical timing column is never visited. Callers skip cells that are
/// already taken by function patterns.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    // 0 for the right cell of the strip, 1 for the left one
    sub: i16,
    step: i16,
    width: i16,
}

const VERT_TIMING_COL: i16 = 6;

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, sub: 0, step: -1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        if self.c <= 0 {
            return None;
        }
        let res = (self.r, self.c - self.sub);

        if self.sub == 0 {
            self.sub = 1;
            return Some(res);
        }

        self.sub = 0;
        let next_r = self.r + self.step;
        if (0..self.width).contains(&next_r) {
            self.r = next_r;
        } else {
            self.step = -self.step;
            self.c -= 2;
            if self.c == VERT_TIMING_COL {
                self.c -= 1;
            }
        }
        Some(res)
    }
}
