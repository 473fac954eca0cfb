use std::ops::Deref;

use tracing::debug;

use crate::common::{
    bch::{FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN},
    codec::{encode_data, Segment},
    ec::{compute_codewords, data_codewords, ec_blocks},
    error::{QRError, QRResult},
    iter::EncRegionIter,
    mask::{select_best_mask, MaskPattern},
    metadata::{Color, ECLevel, Version},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// A QR symbol under construction.
///
/// Data is appended as byte mode segments with [`QR::add_data`]; [`QR::make`]
/// lays out the module matrix. Until a build succeeds the symbol has no
/// modules: [`QR::module_count`] is zero and every [`QR::is_dark`] query is
/// out of bounds.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    segments: Vec<Segment>,
    // Interleaved data and ecc codewords, dropped whenever data changes
    codewords: Option<Vec<u8>>,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(version: usize, ecl: ECLevel) -> QRResult<Self> {
        Ok(Self::with_version(Version::new(version)?, ecl))
    }

    pub fn with_version(ver: Version, ecl: ECLevel) -> Self {
        Self {
            grid: Vec::new(),
            w: ver.width(),
            ver,
            ecl,
            segments: Vec::new(),
            codewords: None,
            mask: None,
        }
    }

    /// Appends a byte mode segment. Takes effect on the next build.
    pub fn add_data(&mut self, data: &[u8]) {
        self.segments.push(Segment::new(data));
        self.codewords = None;
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn is_built(&self) -> bool {
        !self.grid.is_empty()
    }

    /// Side length of the built matrix, zero before a successful build.
    pub fn module_count(&self) -> usize {
        if self.is_built() {
            self.w
        } else {
            0
        }
    }

    pub fn is_dark(&self, row: usize, col: usize) -> QRResult<bool> {
        let width = self.module_count();
        if row >= width || col >= width {
            return Err(QRError::IndexOutOfBounds { row, col, width });
        }
        Ok(matches!(*self.grid[row * width + col], Color::Dark))
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => {
                format!("{{ Version: {}, Ec level: {:?}, Mask: {} }}", *self.ver, self.ecl, *m)
            }
            None => format!("{{ Version: {}, Ec level: {:?}, Mask: None }}", *self.ver, self.ecl),
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.w
    }

    #[cfg(test)]
    pub(crate) fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub(crate) fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub(crate) fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }

    pub(crate) fn reset_grid(&mut self) {
        self.grid.clear();
        self.grid.resize(self.w * self.w, Module::Empty);
    }

    fn clear(&mut self) {
        self.grid = Vec::new();
        self.mask = None;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 pattern centred at (r, c) along with its separator
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    // Skipped where a finder pattern already covers the centre
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        if self.get(r, c) != Module::Empty {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i16 - 9;
        self.draw_line(6, 8, 6, last);
        self.draw_line(8, 6, last, 6);
    }

    // Alternates dark on even indices, leaving cells that are already set
    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        let is_hor = r1 == r2;
        let range = if is_hor { c1..=c2 } else { r1..=r2 };
        for k in range {
            let (r, c) = if is_hor { (r1, k) } else { (k, c1) };
            if self.get(r, c) == Module::Empty {
                self.set(r, c, Module::Func(Color::from(k & 1 == 0)));
            }
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use crate::builder::QR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_timing_pattern_1() {
        let mut qr = QR::with_version(Version::new(1).unwrap(), ECLevel::L);
        qr.reset_grid();
        qr.draw_timing_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........fFfFf........\n\
             .....................\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
    }
}

#[cfg(test)]
mod all_function_patterns_test {
    use crate::builder::QR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_all_function_patterns() {
        let mut qr = QR::with_version(Version::new(3).unwrap(), ECLevel::L);
        qr.reset_grid();
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.............Ffffffff\n\
             fFFFFFfF.............FfFFFFFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFFFFFfF.............FfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFF.............FFFFFFFF\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f.............fffff....\n\
             FFFFFFFF............fFFFf....\n\
             fffffffF............fFfFf....\n\
             fFFFFFfF............fFFFf....\n\
             fFfffFfF............fffff....\n\
             fFfffFfF.....................\n\
             fFfffFfF.....................\n\
             fFFFFFfF.....................\n\
             fffffffF.....................\n"
        );
    }
}

// Format & version info
//------------------------------------------------------------------------------

impl QR {
    // Trial builds write every format bit light, including the dark module
    fn draw_format_info(&mut self, test: bool, mask: MaskPattern) {
        let format_info = if test { 0 } else { self.ecl.format_info(mask) };
        let (off, on) = (Module::Format(Color::Light), Module::Format(Color::Dark));
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_SIDE);
        self.set(-8, 8, Module::Format(Color::from(!test)));
    }

    // Bit i sits at (i / 3, w - 11 + i % 3) and its transpose
    fn draw_version_info(&mut self, test: bool) {
        if !self.ver.has_version_info() {
            return;
        }
        let ver_info = if test { 0 } else { self.ver.info() };
        for i in 0..VERSION_INFO_BIT_LEN {
            let module = Module::Version(Color::from((ver_info >> i) & 1 == 1));
            let (a, b) = ((i / 3) as i16, (i % 3) as i16 - 11);
            self.set(a, b, module);
            self.set(b, a, module);
        }
    }

    // Most significant bit goes to the first coordinate
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off_clr);
            } else {
                self.set(*r, *c, on_clr);
            }
            mask >>= 1;
        }
    }
}

#[cfg(test)]
mod qr_info_tests {
    use crate::builder::QR;
    use crate::common::metadata::{ECLevel, Version};
    use crate::common::mask::MaskPattern;

    #[test]
    fn test_version_info_7() {
        let mut qr = QR::with_version(Version::new(7).unwrap(), ECLevel::L);
        qr.reset_grid();
        qr.draw_version_info(false);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ..................................VVv........\n\
             ..................................VvV........\n\
             ..................................VvV........\n\
             ..................................Vvv........\n\
             ..................................vvv........\n\
             ..................................VVV........\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             VVVVvV.......................................\n\
             VvvvvV.......................................\n\
             vVVvvV.......................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n"
        );
    }

    #[test]
    fn test_trial_format_info() {
        let mut qr = QR::with_version(Version::new(1).unwrap(), ECLevel::L);
        qr.reset_grid();
        qr.draw_format_info(true, MaskPattern::new(0).unwrap());
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             .....................\n\
             ........M............\n\
             MMMMMM.MM....MMMMMMMM\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n"
        );
    }

    #[test]
    fn test_all_function_patterns_and_qr_info() {
        let mut qr = QR::with_version(Version::new(7).unwrap(), ECLevel::L);
        qr.reset_grid();
        qr.draw_all_function_patterns();
        qr.draw_version_info(false);
        qr.draw_format_info(true, MaskPattern::new(0).unwrap());
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM.........................VVvFfffffff\n\
             fFFFFFfFM.........................VvVFfFFFFFf\n\
             fFfffFfFM.........................VvVFfFfffFf\n\
             fFfffFfFM.........................VvvFfFfffFf\n\
             fFfffFfFM...........fffff.........vvvFfFfffFf\n\
             fFFFFFfFM...........fFFFf.........VVVFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFM...........fFFFf............FFFFFFFF\n\
             MMMMMMfMM...........fffff............MMMMMMMM\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             VVVVvVf......................................\n\
             VvvvvVF......................................\n\
             vVVvvVf.............fffff...........fffff....\n\
             FFFFFFFFM...........fFFFf...........fFFFf....\n\
             fffffffFM...........fFfFf...........fFfFf....\n\
             fFFFFFfFM...........fFFFf...........fFFFf....\n\
             fFfffFfFM...........fffff...........fffff....\n\
             fFfffFfFM....................................\n\
             fFfffFfFM....................................\n\
             fFFFFFfFM....................................\n\
             fffffffFM....................................\n"
        );
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    fn compute_codewords(&self) -> QRResult<Vec<u8>> {
        let blocks = ec_blocks(self.ver, self.ecl)?;
        let data_len = data_codewords(self.ver, self.ecl)?;

        debug!("Encoding {} segments into {data_len} data codewords...", self.segments.len());
        let data = encode_data(&self.segments, self.ver, data_len)?;

        debug!("Computing error correction for {} blocks...", blocks.len());
        compute_codewords(data.data(), &blocks)
    }

    fn prepare_codewords(&mut self) -> QRResult<()> {
        if self.codewords.is_none() {
            self.codewords = Some(self.compute_codewords()?);
        }
        Ok(())
    }

    // Places codeword bits MSB first into free cells, masking each one. Cells
    // left after the stream runs out stay light and unmasked.
    fn draw_payload(&mut self, codewords: &[u8], mask: MaskPattern) {
        let mask_fn = mask.mask_function();
        let mut bits = codewords.iter().flat_map(|&b| (0..8).rev().map(move |i| (b >> i) & 1 == 1));
        for (r, c) in EncRegionIter::new(self.ver) {
            if self.get(r, c) != Module::Empty {
                continue;
            }
            let clr = match bits.next() {
                Some(bit) => Color::from(bit ^ mask_fn(r as i32, c as i32)),
                None => Color::Light,
            };
            self.set(r, c, Module::Data(clr));
        }
        debug_assert!(bits.next().is_none(), "Codewords exceed encoding region");
    }

    /// Lays out the full matrix with the given mask. Trial builds leave the
    /// format and version areas light.
    pub(crate) fn make_impl(&mut self, test: bool, mask: MaskPattern) -> QRResult<()> {
        let codewords = match self.codewords.take() {
            Some(cw) => cw,
            None => self.compute_codewords()?,
        };

        self.reset_grid();
        self.draw_all_function_patterns();
        self.draw_format_info(test, mask);
        self.draw_version_info(test);
        self.draw_payload(&codewords, mask);
        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after build");

        self.codewords = Some(codewords);
        self.mask = Some(mask);
        Ok(())
    }

    fn make_with(&mut self, mask: Option<MaskPattern>) -> QRResult<()> {
        self.prepare_codewords()?;
        let mask = match mask {
            Some(m) => m,
            None => {
                debug!("Evaluating masks...");
                select_best_mask(self)?
            }
        };
        debug!("Applying mask {}...", *mask);
        self.make_impl(false, mask)
    }

    /// Builds the matrix with the mask of lowest penalty. On failure the
    /// symbol is left without modules.
    pub fn make(&mut self) -> QRResult<()> {
        let res = self.make_with(None);
        if res.is_err() {
            self.clear();
        }
        res
    }

    /// Builds the matrix with a fixed mask, skipping the mask search.
    pub fn make_with_mask(&mut self, mask: MaskPattern) -> QRResult<()> {
        let res = self.make_with(Some(mask));
        if res.is_err() {
            self.clear();
        }
        res
    }
}


// Global constants
//------------------------------------------------------------------------------

// Row 8, most significant bit first
static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

// Column 8, most significant bit first
static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];
