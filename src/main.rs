use std::env;
use std::error::Error;

use qrforge::{Canvas, ECLevel, QRBuilder, RenderOptions, TextCanvas};

fn main() -> Result<(), Box<dyn Error>> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let text = if args.is_empty() { "Hello, world! 🌏".to_string() } else { args.join(" ") };

    let qr = QRBuilder::new(&text).ec_level(ECLevel::M).build()?;

    let mut canvas = TextCanvas::new(RenderOptions { quiet_zone: 2, ..Default::default() });
    canvas.draw(&qr)?;
    println!("{}", canvas.text());
    println!("{}", qr.metadata());

    Ok(())
}
