//! Argument and return kinds, and the 32-bit words that carry them.
//!
//! Every value crossing the harness boundary is a raw `u32` bit pattern.
//! The kinds say how to read it: as `i32`, as `u32`, or as the bits of an
//! IEEE-754 single float.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Float bit reinterpretation
// ============================================================================

/// IEEE-754 sign bit.
pub const SIGN_BIT: u32 = 0x8000_0000;
/// Bits of the smallest normalized positive float.
pub const SMALLEST_NORM: u32 = 0x0080_0000;
/// Bits of `1.0f32`.
pub const ONE: u32 = 0x3F80_0000;
/// Bits of the largest normalized float with the top exponent cleared.
pub const LARGEST_NORM: u32 = 0x7F00_0000;
/// Bits of `+inf`.
pub const INFINITY: u32 = 0x7F80_0000;
/// Bits of the canonical quiet NaN.
pub const QUIET_NAN: u32 = 0x7FC0_0000;

/// Read a bit pattern as a single-precision float.
pub fn bits_to_f32(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Bit pattern of a single-precision float.
pub fn f32_to_bits(value: f32) -> u32 {
    value.to_bits()
}

// ============================================================================
// Machine representations
// ============================================================================

/// Machine representation of a word at the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Repr {
    I32,
    U32,
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repr::I32 => f.write_str("i32"),
            Repr::U32 => f.write_str("u32"),
        }
    }
}

/// A 32-bit machine word a puzzle function can take or return.
pub trait Word: Copy + 'static {
    const REPR: Repr;

    fn from_bits(bits: u32) -> Self;

    fn to_bits(self) -> u32;
}

impl Word for i32 {
    const REPR: Repr = Repr::I32;

    fn from_bits(bits: u32) -> Self {
        bits as i32
    }

    fn to_bits(self) -> u32 {
        self as u32
    }
}

impl Word for u32 {
    const REPR: Repr = Repr::U32;

    fn from_bits(bits: u32) -> Self {
        bits
    }

    fn to_bits(self) -> u32 {
        self
    }
}

// ============================================================================
// Declared kinds
// ============================================================================

/// How an argument slot's bits are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgKind {
    SignedInt,
    UnsignedInt,
    /// `u32` holding the bits of an `f32`
    FloatBits,
}

impl ArgKind {
    pub fn repr(self) -> Repr {
        match self {
            ArgKind::SignedInt => Repr::I32,
            ArgKind::UnsignedInt | ArgKind::FloatBits => Repr::U32,
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::SignedInt => f.write_str("int"),
            ArgKind::UnsignedInt => f.write_str("unsigned"),
            ArgKind::FloatBits => f.write_str("float_bits"),
        }
    }
}

/// How a puzzle's result bits are interpreted. Float results travel as bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnKind {
    SignedInt,
    UnsignedInt,
}

impl ReturnKind {
    pub fn repr(self) -> Repr {
        match self {
            ReturnKind::SignedInt => Repr::I32,
            ReturnKind::UnsignedInt => Repr::U32,
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnKind::SignedInt => f.write_str("int"),
            ReturnKind::UnsignedInt => f.write_str("unsigned"),
        }
    }
}

// ============================================================================
// Diagnostic values
// ============================================================================

/// A concrete word tagged with its representation, for diagnostics.
///
/// Renders as `decimal[0xhex]`, the decimal part signed or unsigned per
/// `repr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub bits: u32,
    pub repr: Repr,
}

impl Value {
    pub fn new(bits: u32, repr: Repr) -> Self {
        Self { bits, repr }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            Repr::I32 => write!(f, "{}[0x{:x}]", self.bits as i32, self.bits),
            Repr::U32 => write!(f, "{}[0x{:x}]", self.bits, self.bits),
        }
    }
}
