//! Reference implementations.
//!
//! Written for obviousness, not speed: loops over bit positions and native
//! float arithmetic. These define correct behaviour for the candidates in
//! [`crate::solutions`].

use puzzle_harness::kinds::{bits_to_f32, f32_to_bits};

pub fn bit_xor(x: i32, y: i32) -> i32 {
    x ^ y
}

pub fn bit_and(x: i32, y: i32) -> i32 {
    x & y
}

/// 1 if every odd-numbered bit is set.
pub fn all_odd_bits(x: i32) -> i32 {
    for i in (1..32).step_by(2) {
        if x & (1i32 << i) == 0 {
            return 0;
        }
    }
    1
}

/// IEEE equality: NaN is unequal to everything, `+0 == -0`.
pub fn float_is_equal(uf: u32, ug: u32) -> u32 {
    (bits_to_f32(uf) == bits_to_f32(ug)) as u32
}

/// 1 if any even-numbered bit is set.
pub fn any_even_bit(x: i32) -> i32 {
    for i in (0..32).step_by(2) {
        if x & (1i32 << i) != 0 {
            return 1;
        }
    }
    0
}

pub fn is_positive(x: i32) -> i32 {
    (x > 0) as i32
}

/// Replace byte `n` (0 = least significant) of `x` with `c`.
pub fn replace_byte(x: i32, n: i32, c: i32) -> i32 {
    match n {
        0 => (x & 0xFFFF_FF00u32 as i32) | c,
        1 => (x & 0xFFFF_00FFu32 as i32) | c.wrapping_shl(8),
        2 => (x & 0xFF00_FFFFu32 as i32) | c.wrapping_shl(16),
        _ => (x & 0x00FF_FFFF) | c.wrapping_shl(24),
    }
}

pub fn is_less(x: i32, y: i32) -> i32 {
    (x < y) as i32
}

/// Rotate left by `n`, one bit at a time. Negative counts rotate by zero.
pub fn rotate_left(x: i32, n: i32) -> i32 {
    let steps = n.max(0) as u32 % 32;
    let mut u = x as u32;
    for _ in 0..steps {
        u = (u << 1) | (u >> 31);
    }
    u as i32
}

/// Mask with bits `lowbit..=highbit` set; 0 when `lowbit > highbit`.
pub fn bit_mask(highbit: i32, lowbit: i32) -> i32 {
    let mut result = 0i32;
    for i in lowbit.max(0)..=highbit.min(31) {
        result |= 1i32 << i;
    }
    result
}

/// `2 * f` at bit level. NaN comes back unchanged.
pub fn float_scale2(uf: u32) -> u32 {
    let f = bits_to_f32(uf);
    if f.is_nan() {
        return uf;
    }
    f32_to_bits(f * 2.0)
}

/// 1 if `x` is a positive power of two.
pub fn is_power2(x: i32) -> i32 {
    for i in 0..31 {
        if x == 1i32 << i {
            return 1;
        }
    }
    0
}
