//! Candidate implementations under test.
//!
//! Straight-line bit manipulation only: no loops, and no branches in the
//! integer puzzles. Shifts use the wrapping forms so that pinned arguments
//! outside a puzzle's declared bounds produce a value instead of a panic.

const EVEN_BITS: i32 = 0x5555_5555;
const ODD_BITS: i32 = 0xAAAA_AAAAu32 as i32;

const SIGN: u32 = 0x8000_0000;
const EXP_MASK: u32 = 0x7F80_0000;
const FRAC_MASK: u32 = 0x007F_FFFF;
const EXP_ONE: u32 = 0x0080_0000;

pub fn bit_xor(x: i32, y: i32) -> i32 {
    !(!(x & !y) & !(!x & y))
}

pub fn bit_and(x: i32, y: i32) -> i32 {
    !(!x | !y)
}

pub fn all_odd_bits(x: i32) -> i32 {
    ((x & ODD_BITS) ^ ODD_BITS == 0) as i32
}

pub fn float_is_equal(uf: u32, ug: u32) -> u32 {
    let abs_f = uf & !SIGN;
    let abs_g = ug & !SIGN;
    if abs_f > EXP_MASK || abs_g > EXP_MASK {
        return 0;
    }
    if abs_f | abs_g == 0 {
        return 1;
    }
    (uf == ug) as u32
}

pub fn any_even_bit(x: i32) -> i32 {
    (x & EVEN_BITS != 0) as i32
}

pub fn is_positive(x: i32) -> i32 {
    let negative = (x >> 31) & 1;
    let nonzero = ((x | x.wrapping_neg()) >> 31) & 1;
    (negative ^ 1) & nonzero
}

pub fn replace_byte(x: i32, n: i32, c: i32) -> i32 {
    let shift = (n << 3) as u32;
    let mask = 0xFFi32.wrapping_shl(shift);
    (x & !mask) | c.wrapping_shl(shift)
}

pub fn is_less(x: i32, y: i32) -> i32 {
    let sx = (x >> 31) & 1;
    let sy = (y >> 31) & 1;
    let differ = sx ^ sy;
    let diff_negative = (x.wrapping_sub(y) >> 31) & 1;
    (differ & sx) | ((differ ^ 1) & diff_negative)
}

pub fn rotate_left(x: i32, n: i32) -> i32 {
    let u = x as u32;
    let n = n as u32;
    (u.wrapping_shl(n) | (u >> 1).wrapping_shr(31u32.wrapping_sub(n))) as i32
}

pub fn bit_mask(highbit: i32, lowbit: i32) -> i32 {
    let upper = 2i32.wrapping_shl(highbit as u32).wrapping_sub(1);
    let lower = (-1i32).wrapping_shl(lowbit as u32);
    upper & lower
}

pub fn float_scale2(uf: u32) -> u32 {
    let sign = uf & SIGN;
    let exp = uf & EXP_MASK;

    if exp == EXP_MASK {
        // inf or NaN
        return uf;
    }
    if exp == 0 {
        // denormal; a carry out of the fraction lands in the exponent
        return sign | ((uf & FRAC_MASK) << 1);
    }
    if exp == EXP_MASK - EXP_ONE {
        return sign | EXP_MASK;
    }
    uf + EXP_ONE
}

pub fn is_power2(x: i32) -> i32 {
    let single_bit = (x & x.wrapping_sub(1) == 0) as i32;
    single_bit & is_positive(x)
}
