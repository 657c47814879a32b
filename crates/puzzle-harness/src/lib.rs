//! Puzzle Harness
//!
//! Checks candidate implementations of small fixed-arity 32-bit functions
//! against trusted oracles. Each argument slot is sampled (exhaustively when
//! the domain is small, at its boundaries and interior otherwise, and at the
//! structurally interesting IEEE-754 regions for float bit patterns), the
//! cross product of the samples is evaluated, and the first disagreement is
//! reported.
//!
//! # Usage
//!
//! ```rust
//! use puzzle_harness::prelude::*;
//!
//! fn and_oracle(x: i32, y: i32) -> i32 {
//!     x & y
//! }
//!
//! fn and_candidate(x: i32, y: i32) -> i32 {
//!     !(!x | !y)
//! }
//!
//! static PUZZLES: &[PuzzleDescriptor] = &[PuzzleDescriptor {
//!     name: "bitAnd",
//!     arity: 2,
//!     args: &[ArgSpec::any_signed(), ArgSpec::any_signed()],
//!     returns: ReturnKind::SignedInt,
//!     fns: &FnPair::new(and_oracle as fn(i32, i32) -> i32, and_candidate),
//! }];
//!
//! let registry = Registry::new(PUZZLES);
//! let mut runner = PuzzleRunner::new(HarnessConfig::new().base_budget(1_000).seed(7));
//! let results = runner.run_all(&registry).unwrap();
//! assert!(results[0].passed);
//! ```

use thiserror::Error;

pub mod descriptor;
pub mod kinds;
pub mod literal;
pub mod registry;
pub mod reports;
pub mod runner;
pub mod sampler;

pub mod prelude {
    pub use crate::descriptor::{ArgSpec, Compare, FnPair, PuzzleDescriptor, Shape};
    pub use crate::kinds::{bits_to_f32, f32_to_bits, ArgKind, Repr, ReturnKind, Value, Word};
    pub use crate::literal::parse_literal;
    pub use crate::registry::Registry;
    pub use crate::runner::{HarnessConfig, Mismatch, PuzzleResult, PuzzleRunner, TestOutcome};
    pub use crate::sampler::{DomainSampler, SampleSet};
    pub use crate::{HarnessError, Result};
}

/// Largest number of arguments a puzzle may take.
pub const MAX_ARITY: usize = 3;

/// Configuration and usage faults. A candidate disagreeing with its oracle is
/// not an error; see [`runner::TestOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("puzzle '{puzzle}' takes {arity} arguments; only 1 to {max} are supported", max = MAX_ARITY)]
    UnsupportedArity { puzzle: String, arity: usize },
    #[error("puzzle '{puzzle}' declares arity {arity} but lists {listed} argument specs")]
    ArgCountMismatch {
        puzzle: String,
        arity: usize,
        listed: usize,
    },
    #[error("puzzle '{puzzle}' is declared as {declared} but its functions are {actual}")]
    SignatureMismatch {
        puzzle: String,
        declared: String,
        actual: String,
    },
    #[error("puzzle '{puzzle}' argument {slot} has invalid {kind} bounds [{min}, {max}]")]
    InvalidBounds {
        puzzle: String,
        slot: usize,
        kind: kinds::ArgKind,
        min: i64,
        max: i64,
    },
    #[error("puzzle name '{0}' is registered more than once")]
    DuplicateName(String),
    #[error("no puzzle with name '{0}' found")]
    NotFound(String),
    #[error("malformed numeric literal '{0}'")]
    InvalidLiteral(String),
    #[error("base budget must be at least 1, got {0}")]
    InvalidBudget(u32),
    #[error("puzzle '{puzzle}' takes {arity} arguments but {pinned} were supplied")]
    TooManyPinned {
        puzzle: String,
        arity: usize,
        pinned: usize,
    },
}

pub type Result<T> = std::result::Result<T, HarnessError>;
