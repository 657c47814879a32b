//! The puzzle table.
//!
//! Order here is the order `btest` runs and reports in.

use crate::{oracle, solutions};
use puzzle_harness::prelude::*;

const INT: ArgSpec = ArgSpec::any_signed();
const FLOAT: ArgSpec = ArgSpec::float_bits();
const BIT_INDEX: ArgSpec = ArgSpec::signed(0, 31);
const BYTE_INDEX: ArgSpec = ArgSpec::signed(0, 3);
const BYTE: ArgSpec = ArgSpec::signed(0, 255);

type Unary = fn(i32) -> i32;
type Binary = fn(i32, i32) -> i32;
type Ternary = fn(i32, i32, i32) -> i32;

static BIT_XOR: FnPair<Binary> = FnPair::new(oracle::bit_xor, solutions::bit_xor);
static BIT_AND: FnPair<Binary> = FnPair::new(oracle::bit_and, solutions::bit_and);
static ALL_ODD_BITS: FnPair<Unary> = FnPair::new(oracle::all_odd_bits, solutions::all_odd_bits);
static FLOAT_IS_EQUAL: FnPair<fn(u32, u32) -> u32> =
    FnPair::new(oracle::float_is_equal, solutions::float_is_equal);
static ANY_EVEN_BIT: FnPair<Unary> = FnPair::new(oracle::any_even_bit, solutions::any_even_bit);
static IS_POSITIVE: FnPair<Unary> = FnPair::new(oracle::is_positive, solutions::is_positive);
static REPLACE_BYTE: FnPair<Ternary> = FnPair::new(oracle::replace_byte, solutions::replace_byte);
static IS_LESS: FnPair<Binary> = FnPair::new(oracle::is_less, solutions::is_less);
static ROTATE_LEFT: FnPair<Binary> = FnPair::new(oracle::rotate_left, solutions::rotate_left);
static BIT_MASK: FnPair<Binary> = FnPair::new(oracle::bit_mask, solutions::bit_mask);
static FLOAT_SCALE2: FnPair<fn(u32) -> u32> =
    FnPair::new(oracle::float_scale2, solutions::float_scale2);
static IS_POWER2: FnPair<Unary> = FnPair::new(oracle::is_power2, solutions::is_power2);

pub static PUZZLES: [PuzzleDescriptor; 12] = [
    PuzzleDescriptor {
        name: "bitXor",
        arity: 2,
        args: &[INT, INT],
        returns: ReturnKind::SignedInt,
        fns: &BIT_XOR,
    },
    PuzzleDescriptor {
        name: "bitAnd",
        arity: 2,
        args: &[INT, INT],
        returns: ReturnKind::SignedInt,
        fns: &BIT_AND,
    },
    PuzzleDescriptor {
        name: "allOddBits",
        arity: 1,
        args: &[INT],
        returns: ReturnKind::SignedInt,
        fns: &ALL_ODD_BITS,
    },
    PuzzleDescriptor {
        name: "floatIsEqual",
        arity: 2,
        args: &[FLOAT, FLOAT],
        returns: ReturnKind::UnsignedInt,
        fns: &FLOAT_IS_EQUAL,
    },
    PuzzleDescriptor {
        name: "anyEvenBit",
        arity: 1,
        args: &[INT],
        returns: ReturnKind::SignedInt,
        fns: &ANY_EVEN_BIT,
    },
    PuzzleDescriptor {
        name: "isPositive",
        arity: 1,
        args: &[INT],
        returns: ReturnKind::SignedInt,
        fns: &IS_POSITIVE,
    },
    PuzzleDescriptor {
        name: "replaceByte",
        arity: 3,
        args: &[INT, BYTE_INDEX, BYTE],
        returns: ReturnKind::SignedInt,
        fns: &REPLACE_BYTE,
    },
    PuzzleDescriptor {
        name: "isLess",
        arity: 2,
        args: &[INT, INT],
        returns: ReturnKind::SignedInt,
        fns: &IS_LESS,
    },
    PuzzleDescriptor {
        name: "rotateLeft",
        arity: 2,
        args: &[INT, BIT_INDEX],
        returns: ReturnKind::SignedInt,
        fns: &ROTATE_LEFT,
    },
    PuzzleDescriptor {
        name: "bitMask",
        arity: 2,
        args: &[BIT_INDEX, BIT_INDEX],
        returns: ReturnKind::SignedInt,
        fns: &BIT_MASK,
    },
    PuzzleDescriptor {
        name: "floatScale2",
        arity: 1,
        args: &[FLOAT],
        returns: ReturnKind::UnsignedInt,
        fns: &FLOAT_SCALE2,
    },
    PuzzleDescriptor {
        name: "isPower2",
        arity: 1,
        args: &[INT],
        returns: ReturnKind::SignedInt,
        fns: &IS_POWER2,
    },
];

/// Every puzzle, in run order.
pub fn registry() -> Registry {
    Registry::new(&PUZZLES)
}
