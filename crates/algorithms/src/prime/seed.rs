//! Fixed-width seeds for the Shawe-Taylor construction

use core::fmt;

use num_bigint_dig::BigUint;

use crate::error::{validate, Result};

/// Big-endian bit string that is advanced by integer addition
///
/// FIPS 186-4 treats seeds as integers when it writes `seed + i`. The width of
/// the seed never changes: additions wrap modulo `2^(8 * len)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Seed(Vec<u8>);

impl Seed {
    /// Wrap `bytes` as a seed; empty seeds are rejected
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        validate::parameter(!bytes.is_empty(), "seed", "must not be empty")?;
        Ok(Seed(bytes))
    }

    /// Big-endian bytes of the seed
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Width in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed seed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Width in bits
    pub fn bit_len(&self) -> usize {
        self.0.len() * 8
    }

    /// True when the most significant bit is set
    pub fn top_bit_set(&self) -> bool {
        self.0.first().map_or(false, |b| b & 0x80 != 0)
    }

    /// `seed + i mod 2^(8 * len)`
    pub fn offset(&self, i: u64) -> Seed {
        let mut out = self.0.clone();
        let mut carry = i as u128;

        for byte in out.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let sum = *byte as u128 + (carry & 0xff);
            *byte = sum as u8;
            carry = (carry >> 8) + (sum >> 8);
        }

        Seed(out)
    }

    /// The seed read as an unsigned integer
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", hex::encode(&self.0))
    }
}
