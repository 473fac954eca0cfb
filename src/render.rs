//! Backends that paint a built [`QR`] onto some surface.
//!
//! Every backend reads the symbol through [`QR::module_count`] and
//! [`QR::is_dark`] only. [`Drawing`] picks a backend from a [`RenderMode`].

use image::{Rgb, RgbImage};

use crate::builder::QR;
use crate::common::error::{QRError, QRResult};

pub trait Canvas {
    /// Paints `qr`, replacing whatever the canvas held before.
    fn draw(&mut self, qr: &QR) -> QRResult<()>;

    /// Resets the canvas to its empty state.
    fn clear(&mut self);
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RenderOptions {
    /// Target width in pixels. Svg output scales; text output ignores it.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    pub dark: Rgb<u8>,
    pub light: Rgb<u8>,
    /// Quiet zone on each side, in modules.
    pub quiet_zone: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            dark: Rgb([0, 0, 0]),
            light: Rgb([255, 255, 255]),
            quiet_zone: 4,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RenderMode {
    Image,
    Svg,
    Text,
}

fn built_count(qr: &QR) -> QRResult<usize> {
    match qr.module_count() {
        0 => Err(QRError::NotBuilt),
        n => Ok(n),
    }
}

// Image
//------------------------------------------------------------------------------

pub struct ImageCanvas {
    opts: RenderOptions,
    img: RgbImage,
}

impl ImageCanvas {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts, img: RgbImage::from_pixel(opts.width, opts.height, opts.light) }
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    /// Pixel side of one module: the symbol and its quiet zone fit the
    /// shorter side, never smaller than one pixel.
    pub fn module_size(&self, module_count: usize) -> u32 {
        let total = module_count as u32 + 2 * self.opts.quiet_zone;
        (self.opts.width.min(self.opts.height) / total).max(1)
    }
}

impl Canvas for ImageCanvas {
    fn draw(&mut self, qr: &QR) -> QRResult<()> {
        let n = built_count(qr)?;
        let RenderOptions { width, height, dark, light, quiet_zone } = self.opts;
        let module_sz = self.module_size(n);
        let total_sz = (n as u32 + 2 * quiet_zone) * module_sz;

        // Centre the symbol, quiet zone included
        let off_x = width.saturating_sub(total_sz) / 2 + quiet_zone * module_sz;
        let off_y = height.saturating_sub(total_sz) / 2 + quiet_zone * module_sz;

        self.img = RgbImage::from_pixel(width, height, light);
        for r in 0..n {
            for c in 0..n {
                if !qr.is_dark(r, c)? {
                    continue;
                }
                let (x0, y0) = (off_x + c as u32 * module_sz, off_y + r as u32 * module_sz);
                for y in y0..(y0 + module_sz).min(height) {
                    for x in x0..(x0 + module_sz).min(width) {
                        self.img.put_pixel(x, y, dark);
                    }
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.img = RgbImage::from_pixel(self.opts.width, self.opts.height, self.opts.light);
    }
}

// Svg
//------------------------------------------------------------------------------

pub struct SvgCanvas {
    opts: RenderOptions,
    svg: String,
}

fn hex(clr: Rgb<u8>) -> String {
    let Rgb([r, g, b]) = clr;
    format!("#{r:02x}{g:02x}{b:02x}")
}

impl SvgCanvas {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts, svg: String::new() }
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }
}

impl Canvas for SvgCanvas {
    fn draw(&mut self, qr: &QR) -> QRResult<()> {
        let n = built_count(qr)?;
        let RenderOptions { width, height, dark, light, quiet_zone } = self.opts;
        let total = n as u32 + 2 * quiet_zone;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
             version=\"1.1\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {total} {total}\" \
             shape-rendering=\"crispEdges\">"
        );
        svg.push_str(&format!(
            "<defs><rect id=\"m\" width=\"1\" height=\"1\" fill=\"{}\"/></defs>",
            hex(dark)
        ));
        svg.push_str(&format!(
            "<rect width=\"{total}\" height=\"{total}\" fill=\"{}\"/>",
            hex(light)
        ));
        for r in 0..n {
            for c in 0..n {
                if qr.is_dark(r, c)? {
                    let (x, y) = (c as u32 + quiet_zone, r as u32 + quiet_zone);
                    svg.push_str(&format!("<use xlink:href=\"#m\" x=\"{x}\" y=\"{y}\"/>"));
                }
            }
        }
        svg.push_str("</svg>");

        self.svg = svg;
        Ok(())
    }

    fn clear(&mut self) {
        self.svg.clear();
    }
}

// Text
//------------------------------------------------------------------------------

/// Terminal rendering, two characters per module so cells come out square.
/// Light modules are drawn as full blocks for dark terminal backgrounds.
pub struct TextCanvas {
    opts: RenderOptions,
    text: String,
}

impl TextCanvas {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts, text: String::new() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Canvas for TextCanvas {
    fn draw(&mut self, qr: &QR) -> QRResult<()> {
        let n = built_count(qr)?;
        let qz = self.opts.quiet_zone as usize;
        let total = n + 2 * qz;

        let mut text = String::with_capacity(total * (total * 2 * 3 + 1));
        for i in 0..total {
            for j in 0..total {
                let in_symbol = (qz..qz + n).contains(&i) && (qz..qz + n).contains(&j);
                let is_dark = in_symbol && qr.is_dark(i - qz, j - qz)?;
                text.push_str(if is_dark { "  " } else { "██" });
            }
            text.push('\n');
        }

        self.text = text;
        Ok(())
    }

    fn clear(&mut self) {
        self.text.clear();
    }
}

// Drawing
//------------------------------------------------------------------------------

/// A canvas chosen at runtime by [`RenderMode`].
pub enum Drawing {
    Image(ImageCanvas),
    Svg(SvgCanvas),
    Text(TextCanvas),
}

impl Drawing {
    pub fn new(mode: RenderMode, opts: RenderOptions) -> Self {
        match mode {
            RenderMode::Image => Self::Image(ImageCanvas::new(opts)),
            RenderMode::Svg => Self::Svg(SvgCanvas::new(opts)),
            RenderMode::Text => Self::Text(TextCanvas::new(opts)),
        }
    }

    pub fn mode(&self) -> RenderMode {
        match self {
            Self::Image(_) => RenderMode::Image,
            Self::Svg(_) => RenderMode::Svg,
            Self::Text(_) => RenderMode::Text,
        }
    }
}

impl Canvas for Drawing {
    fn draw(&mut self, qr: &QR) -> QRResult<()> {
        match self {
            Self::Image(c) => c.draw(qr),
            Self::Svg(c) => c.draw(qr),
            Self::Text(c) => c.draw(qr),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Image(c) => c.clear(),
            Self::Svg(c) => c.clear(),
            Self::Text(c) => c.clear(),
        }
    }
}
