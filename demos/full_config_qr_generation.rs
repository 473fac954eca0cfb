use std::error::Error;

use image::Rgb;
use qrforge::{
    Canvas, Charset, Drawing, ECLevel, MaskPattern, QRBuilder, RenderMode, RenderOptions, Version,
};

fn main() -> Result<(), Box<dyn Error>> {
    let text = "This example shows all available configuration options for QR code generation.";

    let qr = QRBuilder::new(text)
        .version(Version::new(6)?)     // QR version (size) - if not provided, finds smallest version to fit text
        .ec_level(ECLevel::Q)          // Error correction level - if not provided, defaults to ECLevel::H
        .charset(Charset::Latin1)      // Text transcoding - if not provided, defaults to Charset::Utf8
        .mask(MaskPattern::new(2)?)    // Mask pattern - if not provided, finds best mask based on penalty score
        .build()?;

    let opts = RenderOptions {
        width: 512,
        height: 512,
        dark: Rgb([20, 40, 120]),
        light: Rgb([250, 250, 240]),
        quiet_zone: 4,
    };
    let mut drawing = Drawing::new(RenderMode::Image, opts);
    drawing.draw(&qr)?;
    if let Drawing::Image(canvas) = drawing {
        canvas.image().save("configured_qr.png")?;
    }

    println!("Configured QR code saved to: configured_qr.png");
    println!("QR metadata: {}", qr.metadata());

    Ok(())
}
