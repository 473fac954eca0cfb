use std::fmt::Display;
use std::mem;

use num_traits::PrimInt;

// Bit buffer
//------------------------------------------------------------------------------

/// Append-only bit sequence packed MSB first into bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    // Bit length
    len: usize,
}

impl BitBuffer {
    #[cfg(test)]
    pub fn new() -> Self {
        Self { data: Vec::new(), len: 0 }
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reads bit `index`; callers stay below [`BitBuffer::len`].
    #[cfg(test)]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "Bit index {index} beyond length {}", self.len);
        (self.data[index >> 3] >> (7 - (index & 7))) & 1 == 1
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.get(i))
    }
}

// Push bits for bit buffer
//------------------------------------------------------------------------------

impl BitBuffer {
    /// Appends the low `size` bits of `bits`, most significant first.
    pub fn put<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Cannot push {size} bits from a {max_bits} bit value");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.put_bit((bits >> i) & T::one() == T::one());
        }
    }

    pub fn put_bit(&mut self, bit: bool) {
        let pos = self.len >> 3;
        if self.data.len() <= pos {
            self.data.push(0);
        }

        if bit {
            self.data[pos] |= 0b1000_0000 >> (self.len & 7);
        }

        self.len += 1;
    }
}
