use std::ops::Deref;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const COUNT: u8 = 8;

    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < Self::COUNT {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskPattern)
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Row `r`, column `c`
mod mask_functions {
    pub fn checkerboard(r: i32, c: i32) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i32, _: i32) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i32, c: i32) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i32, c: i32) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i32, c: i32) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i32, c: i32) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i32, c: i32) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i32, c: i32) -> bool {
        (((r * c) % 3) + ((r + c) & 1)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i32, i32) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Builds a trial symbol for every mask and returns the one with the lowest
/// penalty. Ties keep the lower mask index.
pub fn select_best_mask(qr: &QR) -> QRResult<MaskPattern> {
    let score = |mask: MaskPattern| -> QRResult<(MaskPattern, f64)> {
        let mut trial = qr.clone();
        trial.make_impl(true, mask)?;
        let pen = compute_total_penalty(&trial);
        trace!("Mask {} penalty {pen}", *mask);
        Ok((mask, pen))
    };

    #[cfg(feature = "parallel")]
    let scores = MaskPattern::all().collect::<Vec<_>>().into_par_iter().map(score);
    #[cfg(not(feature = "parallel"))]
    let scores = MaskPattern::all().map(score);

    let scores = scores.collect::<QRResult<Vec<_>>>()?;
    scores
        .into_iter()
        .fold(None, |best: Option<(MaskPattern, f64)>, (mask, pen)| match best {
            Some((_, best_pen)) if best_pen <= pen => best,
            _ => Some((mask, pen)),
        })
        .map(|(mask, _)| mask)
        .ok_or(QRError::InvalidMaskPattern)
}

// Penalty
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> f64 {
    let run_pen = compute_run_penalty(qr, true) + compute_run_penalty(qr, false);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen =
        compute_finder_pattern_penalty(qr, true) + compute_finder_pattern_penalty(qr, false);
    (run_pen + blk_pen + fp_pen) as f64 + compute_balance_penalty(qr)
}

fn line_color(qr: &QR, is_hor: bool, line: i16, i: i16) -> Color {
    if is_hor {
        *qr.get(line, i)
    } else {
        *qr.get(i, line)
    }
}

// Every maximal run of 5 or more same coloured modules adds 3 + (len - 5)
fn compute_run_penalty(qr: &QR, is_hor: bool) -> u32 {
    let w = qr.width() as i16;
    let mut pen = 0;
    for line in 0..w {
        let mut last = line_color(qr, is_hor, line, 0);
        let mut run_len = 1;
        for i in 1..w {
            let clr = line_color(qr, is_hor, line, i);
            if clr == last {
                run_len += 1;
                continue;
            }
            if run_len >= 5 {
                pen += run_len - 2;
            }
            last = clr;
            run_len = 1;
        }
        if run_len >= 5 {
            pen += run_len - 2;
        }
    }
    pen
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];

    let mut pen = 0;
    let w = qr.width() as i16;
    for line in 0..w {
        for j in 0..w - 6 {
            if (j..j + 7).map(|i| line_color(qr, is_hor, line, i)).eq(PATTERN.iter().copied()) {
                pen += 40;
            }
        }
    }
    pen
}

fn compute_balance_penalty(qr: &QR) -> f64 {
    let dark_cnt = qr.count_dark_modules() as f64;
    let w = qr.width() as f64;
    let ratio = (100.0 * dark_cnt / (w * w) - 50.0).abs() / 5.0;
    10.0 * ratio
}
