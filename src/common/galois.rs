use super::error::{QRError, QRResult};

// Galois field GF(2^8) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

pub static GF: GaloisField = GaloisField::new();

#[derive(Debug)]
pub struct GaloisField {
    exp: [u8; 256],
    log: [u8; 256],
}

impl GaloisField {
    const fn new() -> Self {
        let mut exp = [0u8; 256];
        let mut i = 0;
        while i < 8 {
            exp[i] = 1 << i;
            i += 1;
        }
        while i < 256 {
            exp[i] = exp[i - 4] ^ exp[i - 5] ^ exp[i - 6] ^ exp[i - 8];
            i += 1;
        }

        let mut log = [0u8; 256];
        let mut i = 0;
        while i < 255 {
            log[exp[i] as usize] = i as u8;
            i += 1;
        }

        Self { exp, log }
    }

    pub fn log(&self, x: u8) -> QRResult<i32> {
        if x == 0 {
            return Err(QRError::LogOfZero);
        }
        Ok(self.log[x as usize] as i32)
    }

    // Exponent is periodic with period 255
    pub fn exp(&self, n: i32) -> u8 {
        self.exp[n.rem_euclid(255) as usize]
    }

    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp(self.log[a as usize] as i32 + self.log[b as usize] as i32)
    }
}
