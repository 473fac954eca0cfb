use super::error::QRResult;
use super::galois::GF;

// Polynomial over GF(256), highest degree coefficient first
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<u8>,
}

impl Polynomial {
    /// Strips leading zero coefficients, then multiplies by x^shift.
    pub fn new(coeffs: &[u8], shift: usize) -> Self {
        let offset = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len());
        let len = coeffs.len() - offset + shift;
        let mut res = Vec::with_capacity(len);
        res.extend_from_slice(&coeffs[offset..]);
        res.resize(len, 0);
        Self { coeffs: res }
    }

    /// Reed-Solomon generator polynomial (x - a^0)(x - a^1)...(x - a^(degree-1)).
    pub fn generator(degree: usize) -> Self {
        (0..degree as i32)
            .fold(Self::new(&[1], 0), |acc, i| acc.multiply(&Self::new(&[1, GF.exp(i)], 0)))
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[u8] {
        &self.coeffs
    }

    pub fn multiply(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::new(&[], 0);
        }

        let mut res = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                res[i + j] ^= GF.mul(a, b);
            }
        }
        Self::new(&res, 0)
    }

    /// Remainder of synthetic division by `divisor`.
    ///
    /// Fails with [`QRError::LogOfZero`](super::error::QRError::LogOfZero) if the divisor
    /// has a zero leading coefficient.
    pub fn modulo(&self, divisor: &Self) -> QRResult<Self> {
        debug_assert!(!divisor.is_empty(), "Division by empty polynomial");

        let mut rem = self.clone();
        while !divisor.is_empty() && rem.len() >= divisor.len() {
            // Only a shifted zero polynomial can lead with zero
            if rem.coeffs[0] == 0 {
                rem = Self::new(&rem.coeffs, 0);
                continue;
            }

            let ratio = GF.log(rem.coeffs[0])? - GF.log(divisor.coeffs[0])?;
            let mut num = rem.coeffs.clone();
            for (n, &d) in num.iter_mut().zip(divisor.coeffs.iter()) {
                if d != 0 {
                    *n ^= GF.exp(GF.log(d)? + ratio);
                }
            }
            rem = Self::new(&num, 0);
        }
        Ok(rem)
    }
}
