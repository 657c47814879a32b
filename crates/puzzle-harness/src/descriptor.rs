//! Puzzle descriptors and the typed call adapter.
//!
//! A puzzle's oracle and candidate are plain function pointers such as
//! `fn(i32, i32) -> i32` or `fn(u32) -> u32`. [`Shape`] is implemented once,
//! generically, for every supported pointer type; it knows the arity and
//! word representations and invokes the function from raw `u32` bits.
//! [`FnPair`] erases the concrete shape behind [`Compare`] so a static
//! registry can hold heterogeneous puzzles side by side.

use crate::kinds::{ArgKind, Repr, ReturnKind, Value, Word};
use crate::{HarnessError, Result, MAX_ARITY};
use std::fmt;

// ============================================================================
// Argument specs
// ============================================================================

/// One argument slot: its kind and inclusive bounds.
///
/// Bounds are held as `i64` so that signed and unsigned slots compare
/// exactly; use the constructors rather than filling the fields directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub kind: ArgKind,
    pub min: i64,
    pub max: i64,
}

impl ArgSpec {
    /// Signed slot over `[min, max]`.
    pub const fn signed(min: i32, max: i32) -> Self {
        Self {
            kind: ArgKind::SignedInt,
            min: min as i64,
            max: max as i64,
        }
    }

    /// Signed slot over the whole `i32` range.
    pub const fn any_signed() -> Self {
        Self::signed(i32::MIN, i32::MAX)
    }

    /// Unsigned slot over `[min, max]`.
    pub const fn unsigned(min: u32, max: u32) -> Self {
        Self {
            kind: ArgKind::UnsignedInt,
            min: min as i64,
            max: max as i64,
        }
    }

    /// Float bit-pattern slot. Always spans every `u32`.
    pub const fn float_bits() -> Self {
        Self {
            kind: ArgKind::FloatBits,
            min: 0,
            max: u32::MAX as i64,
        }
    }

    /// Number of values in `[min, max]`.
    pub fn domain_size(&self) -> u64 {
        (self.max - self.min + 1) as u64
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn kind_range(&self) -> (i64, i64) {
        match self.kind.repr() {
            Repr::I32 => (i32::MIN as i64, i32::MAX as i64),
            Repr::U32 => (0, u32::MAX as i64),
        }
    }

    fn is_well_formed(&self) -> bool {
        let (lo, hi) = self.kind_range();
        lo <= self.min && self.min <= self.max && self.max <= hi
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// Parameter and return representations of a function pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Repr>,
    pub returns: Repr,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(Repr::to_string).collect();
        write!(f, "fn({}) -> {}", params.join(", "), self.returns)
    }
}

/// A function pointer type the harness can call from raw bits.
pub trait Shape: Copy + Send + Sync + 'static {
    const ARITY: usize;

    fn params() -> Vec<Repr>;

    fn returns() -> Repr;

    /// Call with `args.len() == Self::ARITY` raw words.
    fn invoke(self, args: &[u32]) -> u32;
}

impl<R: Word> Shape for fn() -> R {
    const ARITY: usize = 0;

    fn params() -> Vec<Repr> {
        Vec::new()
    }

    fn returns() -> Repr {
        R::REPR
    }

    fn invoke(self, _args: &[u32]) -> u32 {
        self().to_bits()
    }
}

impl<A: Word, R: Word> Shape for fn(A) -> R {
    const ARITY: usize = 1;

    fn params() -> Vec<Repr> {
        vec![A::REPR]
    }

    fn returns() -> Repr {
        R::REPR
    }

    fn invoke(self, args: &[u32]) -> u32 {
        self(A::from_bits(args[0])).to_bits()
    }
}

impl<A: Word, B: Word, R: Word> Shape for fn(A, B) -> R {
    const ARITY: usize = 2;

    fn params() -> Vec<Repr> {
        vec![A::REPR, B::REPR]
    }

    fn returns() -> Repr {
        R::REPR
    }

    fn invoke(self, args: &[u32]) -> u32 {
        self(A::from_bits(args[0]), B::from_bits(args[1])).to_bits()
    }
}

impl<A: Word, B: Word, C: Word, R: Word> Shape for fn(A, B, C) -> R {
    const ARITY: usize = 3;

    fn params() -> Vec<Repr> {
        vec![A::REPR, B::REPR, C::REPR]
    }

    fn returns() -> Repr {
        R::REPR
    }

    fn invoke(self, args: &[u32]) -> u32 {
        self(
            A::from_bits(args[0]),
            B::from_bits(args[1]),
            C::from_bits(args[2]),
        )
        .to_bits()
    }
}

// ============================================================================
// Oracle/candidate pairs
// ============================================================================

/// Raw results of one oracle/candidate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub expected: u32,
    pub actual: u32,
}

impl Comparison {
    pub fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

/// Object-safe view of an oracle/candidate pair.
pub trait Compare: Sync {
    fn signature(&self) -> Signature;

    fn compare(&self, args: &[u32]) -> Comparison;
}

/// Oracle and candidate sharing one shape.
#[derive(Clone, Copy)]
pub struct FnPair<S> {
    reference: S,
    candidate: S,
}

impl<S: Shape> FnPair<S> {
    pub const fn new(reference: S, candidate: S) -> Self {
        Self {
            reference,
            candidate,
        }
    }
}

impl<S: Shape> Compare for FnPair<S> {
    fn signature(&self) -> Signature {
        Signature {
            params: S::params(),
            returns: S::returns(),
        }
    }

    fn compare(&self, args: &[u32]) -> Comparison {
        Comparison {
            expected: self.reference.invoke(args),
            actual: self.candidate.invoke(args),
        }
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// Static description of one puzzle.
#[derive(Clone, Copy)]
pub struct PuzzleDescriptor {
    pub name: &'static str,
    pub arity: usize,
    pub args: &'static [ArgSpec],
    pub returns: ReturnKind,
    pub fns: &'static dyn Compare,
}

impl PuzzleDescriptor {
    /// Check the declaration against itself and against the function pair.
    pub fn validate(&self) -> Result<()> {
        if self.arity == 0 || self.arity > MAX_ARITY {
            return Err(HarnessError::UnsupportedArity {
                puzzle: self.name.to_string(),
                arity: self.arity,
            });
        }
        if self.args.len() != self.arity {
            return Err(HarnessError::ArgCountMismatch {
                puzzle: self.name.to_string(),
                arity: self.arity,
                listed: self.args.len(),
            });
        }

        let actual = self.fns.signature();
        let declared = self.declared_signature();
        if actual != declared {
            return Err(HarnessError::SignatureMismatch {
                puzzle: self.name.to_string(),
                declared: declared.to_string(),
                actual: actual.to_string(),
            });
        }

        for (slot, spec) in self.args.iter().enumerate() {
            if !spec.is_well_formed() {
                return Err(HarnessError::InvalidBounds {
                    puzzle: self.name.to_string(),
                    slot: slot + 1,
                    kind: spec.kind,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }

    /// Signature implied by the declared kinds.
    pub fn declared_signature(&self) -> Signature {
        Signature {
            params: self.args.iter().map(|a| a.kind.repr()).collect(),
            returns: self.returns.repr(),
        }
    }

    /// Diagnostic value for `bits` in argument `slot`.
    pub fn arg_value(&self, slot: usize, bits: u32) -> Value {
        Value::new(bits, self.args[slot].kind.repr())
    }

    /// Diagnostic value for result `bits`.
    pub fn return_value(&self, bits: u32) -> Value {
        Value::new(bits, self.returns.repr())
    }

    /// Human-readable signature, e.g. `bitAnd(int, int) -> int`.
    pub fn describe(&self) -> String {
        let args: Vec<String> = self.args.iter().map(|a| a.kind.to_string()).collect();
        format!("{}({}) -> {}", self.name, args.join(", "), self.returns)
    }
}

impl fmt::Debug for PuzzleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleDescriptor")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("args", &self.args)
            .field("returns", &self.returns)
            .field("fns", &self.fns.signature())
            .finish()
    }
}
