//! `Value` — the universal 4-byte element type.
//!
//! Every container in this crate stores `Value`s. A `Value` is a bare 32-bit
//! payload with no runtime tag; the caller tracks which interpretation (signed
//! integer, IEEE-754 float, or raw handle) is currently live, exactly as with a
//! C union. Reinterpretation is pure bit-casting and never fails.
//!
//! The handle interpretation replaces what would be a pointer in a
//! pointer-based design: callers store indices into their own side tables.

use core::fmt;
use serde::{Deserialize, Serialize};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// A 32-bit payload carrying an int, a float, or a raw handle.
///
/// Equality and hashing are bitwise: `from_float(f)` values compare by bit
/// pattern, so two NaNs with identical bits are equal and `0.0 != -0.0`.
#[repr(transparent)]
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, FromZeroes, FromBytes, AsBytes, Serialize,
    Deserialize,
)]
pub struct Value(u32);

impl Value {
    /// Wraps a signed integer.
    #[inline]
    pub const fn from_int(i: i32) -> Self {
        Self(i as u32)
    }

    /// Reads the payload as a signed integer.
    #[inline]
    pub const fn as_int(self) -> i32 {
        self.0 as i32
    }

    /// Wraps a single-precision float.
    #[inline]
    pub fn from_float(f: f32) -> Self {
        Self(f.to_bits())
    }

    /// Reads the payload as a single-precision float.
    #[inline]
    pub fn as_float(self) -> f32 {
        f32::from_bits(self.0)
    }

    /// Wraps a raw 32-bit handle.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Reads the raw 32-bit payload.
    #[inline]
    pub const fn as_bits(self) -> u32 {
        self.0
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(i: i32) -> Self {
        Self::from_int(i)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(f: f32) -> Self {
        Self::from_float(f)
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // No tag to consult; show the raw bits.
        write!(f, "Value({:#010x})", self.0)
    }
}
