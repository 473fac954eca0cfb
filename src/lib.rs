//! # qrforge
//!
//! A QR Code Model 2 encoder with Reed-Solomon error correction, written for
//! byte mode payloads.
//!
//! ## Features
//!
//! - **Symbol construction**: versions 1 to 40 at error correction levels L, M, Q and H
//! - **Automatic choices**: smallest fitting version and lowest-penalty mask pattern
//! - **Text transcoding**: UTF-8 (with byte order mark for non-ASCII text) or Latin-1
//! - **Rendering**: raster images, SVG documents and terminal text through one [`Canvas`] trait
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust,no_run
//! use qrforge::{Canvas, ImageCanvas, QRBuilder, RenderOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only text, all other settings are automatically chosen
//! let qr = QRBuilder::new("Hello, World!").build()?;
//!
//! let mut canvas = ImageCanvas::new(RenderOptions::default());
//! canvas.draw(&qr)?;
//! canvas.image().save("simple_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrforge::{Charset, ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, World!")
//!     .version(Version::new(2)?)        // if not provided, finds smallest version to fit text
//!     .ec_level(ECLevel::M)             // if not provided, defaults to ECLevel::H
//!     .charset(Charset::Utf8)           // if not provided, defaults to Charset::Utf8
//!     .mask(MaskPattern::new(3)?)       // if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! assert_eq!(qr.module_count(), 25);
//! # Ok(())
//! # }
//! ```
//!
//! ### Low level symbol
//!
//! ```rust
//! use qrforge::{ECLevel, QR};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut qr = QR::new(1, ECLevel::H)?;
//! qr.add_data(b"HELLO");
//! qr.make()?;
//!
//! assert_eq!(qr.module_count(), 21);
//! assert!(qr.is_dark(0, 0)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Cargo features
//! - `parallel`: scores the eight mask candidates on the rayon thread pool. Output is
//!   identical to the sequential search.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::{QRBuilder, QR};
pub use common::codec::Charset;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
pub use render::{Canvas, Drawing, ImageCanvas, RenderMode, RenderOptions, SvgCanvas, TextCanvas};
