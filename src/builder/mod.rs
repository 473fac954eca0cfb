mod qr;

pub use qr::QR;
#[cfg(test)]
pub(crate) use qr::Module;

use tracing::debug;

use crate::common::{
    codec::Charset,
    error::QRResult,
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};

/// Turns text into a finished [`QR`].
///
/// Unset options are chosen automatically: the smallest version that holds the
/// text and the mask with the lowest penalty. Error correction defaults to
/// [`ECLevel::H`].
pub struct QRBuilder<'a> {
    text: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    charset: Charset,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, version: None, ec_level: ECLevel::H, charset: Charset::Utf8, mask: None }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn charset(&mut self, charset: Charset) -> &mut Self {
        self.charset = charset;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!(
                "{{ Version: {}, Ec level: {:?}, Charset: {:?} }}",
                *v, self.ec_level, self.charset
            ),
            None => format!(
                "{{ Version: None, Ec level: {:?}, Charset: {:?} }}",
                self.ec_level, self.charset
            ),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}...", self.metadata());

        let data = self.charset.encode(self.text)?;
        let version = match self.version {
            Some(v) => v,
            None => {
                debug!("Finding smallest version for {} bytes...", data.len());
                Version::from_byte_len(data.len(), self.ec_level)?
            }
        };

        let mut qr = QR::with_version(version, self.ec_level);
        qr.add_data(&data);
        match self.mask {
            Some(m) => qr.make_with_mask(m)?,
            None => qr.make()?,
        }

        let total_modules = qr.module_count() * qr.module_count();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "QR generated: {}, Dark cells: {dark_modules}, Light cells: {}, Balance: {}%",
            qr.metadata(),
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }
}
