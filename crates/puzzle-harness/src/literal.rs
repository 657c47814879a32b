//! Numeric literals for pinned arguments.
//!
//! A token containing `.`, or `e`/`E` before any `x`/`X`, is a float and
//! becomes its IEEE-754 bit pattern. Anything else is an integer in C
//! `strtol(_, _, 0)` style: optional sign, `0x` hex, leading-zero octal, or
//! decimal. Integers are accepted on `[-2^31, 2^32 - 1]` so that both signed
//! and unsigned spellings of a word work.

use crate::kinds::f32_to_bits;
use crate::{HarnessError, Result};

const MIN_LITERAL: i64 = i32::MIN as i64;
const MAX_LITERAL: i64 = u32::MAX as i64;

/// Parse a CLI token into a 32-bit word.
pub fn parse_literal(token: &str) -> Result<u32> {
    let invalid = || HarnessError::InvalidLiteral(token.to_string());

    if looks_like_float(token) {
        let value: f32 = token.parse().map_err(|_| invalid())?;
        return Ok(f32_to_bits(value));
    }

    let value = parse_integer(token).ok_or_else(invalid)?;
    if !(MIN_LITERAL..=MAX_LITERAL).contains(&value) {
        return Err(invalid());
    }
    Ok(value as u32)
}

fn looks_like_float(token: &str) -> bool {
    let mut hex = false;
    let mut float = false;
    for c in token.chars() {
        match c {
            'x' | 'X' => hex = true,
            'e' | 'E' if !hex => float = true,
            '.' => float = true,
            _ => {}
        }
    }
    float
}

fn parse_integer(token: &str) -> Option<i64> {
    let (negative, unsigned) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
