use std::error::Error;

use qrforge::{Canvas, ImageCanvas, QRBuilder, RenderOptions};

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - provide only text, all other settings are automatically chosen
    let qr = QRBuilder::new("Hello, World!").build()?;

    // Paint onto a 256x256 image and save
    let mut canvas = ImageCanvas::new(RenderOptions::default());
    canvas.draw(&qr)?;
    canvas.image().save("simple_qr.png")?;

    println!("Simple QR code saved to: simple_qr.png");
    Ok(())
}
