//! Bit Puzzles
//!
//! Twelve 32-bit manipulation puzzles, each with a loop-and-compare oracle in
//! [`oracle`] and a straight-line candidate in [`solutions`], registered for
//! the `btest` checker.
//!
//! ```rust
//! use bit_puzzles::registry;
//! use puzzle_harness::prelude::*;
//!
//! let mut runner = PuzzleRunner::new(HarnessConfig::new().base_budget(2_000).seed(1));
//! let result = runner.run_named(&registry(), "bitMask", &[]).unwrap();
//! assert!(result.passed);
//! assert_eq!(result.cases_run, 32 * 32);
//! ```

pub mod oracle;
pub mod registry;
pub mod solutions;

pub use registry::{registry, PUZZLES};
