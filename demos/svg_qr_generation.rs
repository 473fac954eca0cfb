use std::error::Error;
use std::fs;

use qrforge::{Canvas, ECLevel, QRBuilder, RenderOptions, SvgCanvas};

fn main() -> Result<(), Box<dyn Error>> {
    let qr = QRBuilder::new("https://example.com/\u{1f30f}").ec_level(ECLevel::M).build()?;

    let mut canvas = SvgCanvas::new(RenderOptions::default());
    canvas.draw(&qr)?;
    fs::write("qr.svg", canvas.svg())?;

    println!("SVG QR code saved to: qr.svg ({})", qr.metadata());
    Ok(())
}
