//! Puzzle runner
//!
//! Samples every argument slot of a puzzle, walks the cross product of the
//! samples (first slot outermost) and stops at the first tuple where the
//! candidate disagrees with the oracle.

use crate::descriptor::PuzzleDescriptor;
use crate::kinds::Value;
use crate::registry::Registry;
use crate::sampler::{budget_for_arity, DomainSampler, SampleSet};
use crate::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Base sample budget for a one-argument puzzle.
pub const DEFAULT_BASE_BUDGET: u32 = 500_000;

/// Ranges with at most `EXHAUSTIVE_FACTOR * base_budget` values are enumerated
/// in full.
pub const EXHAUSTIVE_FACTOR: u32 = 13;

/// Harness configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Budget for one-argument puzzles; square/cube root for two/three
    pub base_budget: u32,
    /// Multiplier on `base_budget` giving the exhaustive-enumeration limit
    pub exhaustive_factor: u32,
    /// Seed for the interior scatter (None = OS entropy)
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_budget: DEFAULT_BASE_BUDGET,
            exhaustive_factor: EXHAUSTIVE_FACTOR,
            seed: None,
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_budget(mut self, n: u32) -> Self {
        self.base_budget = n;
        self
    }

    pub fn exhaustive_factor(mut self, k: u32) -> Self {
        self.exhaustive_factor = k;
        self
    }

    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }

    pub fn exhaustive_limit(&self) -> u64 {
        self.base_budget as u64 * self.exhaustive_factor as u64
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// First disagreement between oracle and candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub puzzle: String,
    pub inputs: Vec<Value>,
    pub expected: Value,
    pub actual: Value,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<String> = self.inputs.iter().map(Value::to_string).collect();
        write!(
            f,
            "Test {}({}) failed...\n...Gives {}. Should be {}",
            self.puzzle,
            inputs.join(", "),
            self.actual,
            self.expected
        )
    }
}

/// Result of checking one puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Pass { cases: u64 },
    Fail { cases: u64, mismatch: Mismatch },
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, TestOutcome::Pass { .. })
    }

    /// Tuples evaluated, including the failing one.
    pub fn cases(&self) -> u64 {
        match self {
            TestOutcome::Pass { cases } | TestOutcome::Fail { cases, .. } => *cases,
        }
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            TestOutcome::Pass { .. } => None,
            TestOutcome::Fail { mismatch, .. } => Some(mismatch),
        }
    }
}

/// Serializable per-puzzle record for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleResult {
    /// Puzzle name
    pub name: String,
    /// Tuples evaluated
    pub cases_run: u64,
    /// Whether the candidate agreed on every tuple
    pub passed: bool,
    /// First disagreement, if any
    pub failure: Option<Mismatch>,
    /// Wall time in ms
    pub duration_ms: u64,
}

impl PuzzleResult {
    pub fn from_outcome(name: &str, outcome: TestOutcome, duration: Duration) -> Self {
        let cases_run = outcome.cases();
        let passed = outcome.passed();
        let failure = match outcome {
            TestOutcome::Pass { .. } => None,
            TestOutcome::Fail { mismatch, .. } => Some(mismatch),
        };
        Self {
            name: name.to_string(),
            cases_run,
            passed,
            failure,
            duration_ms: duration.as_millis() as u64,
        }
    }

    /// One-line status, e.g. `PASS  bitAnd (250000 cases, 12 ms)`.
    pub fn summary_line(&self) -> String {
        format!(
            "{}  {} ({} cases, {} ms)",
            if self.passed { "PASS" } else { "FAIL" },
            self.name,
            self.cases_run,
            self.duration_ms
        )
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Drives sampling and comparison for one or many puzzles.
pub struct PuzzleRunner {
    config: HarnessConfig,
    sampler: DomainSampler,
}

impl PuzzleRunner {
    pub fn new(config: HarnessConfig) -> Self {
        let sampler = DomainSampler::new(config.exhaustive_limit(), config.seed);
        Self { config, sampler }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Check one puzzle. `pinned[i] = Some(v)` fixes slot `i` to `v`.
    ///
    /// Configuration faults come back as `Err`; a disagreeing candidate is
    /// `Ok(TestOutcome::Fail { .. })`.
    pub fn run(
        &mut self,
        descriptor: &PuzzleDescriptor,
        pinned: &[Option<u32>],
    ) -> Result<TestOutcome> {
        if self.config.base_budget == 0 {
            return Err(HarnessError::InvalidBudget(self.config.base_budget));
        }
        descriptor.validate()?;
        if pinned.len() > descriptor.arity {
            return Err(HarnessError::TooManyPinned {
                puzzle: descriptor.name.to_string(),
                arity: descriptor.arity,
                pinned: pinned.len(),
            });
        }

        let sets = self.sample_sets(descriptor, pinned)?;
        Ok(check_cross_product(descriptor, &sets))
    }

    /// Check the puzzle called `name`, timing it.
    pub fn run_named(
        &mut self,
        registry: &Registry,
        name: &str,
        pinned: &[Option<u32>],
    ) -> Result<PuzzleResult> {
        let descriptor = registry.find(name)?;
        self.run_timed(descriptor, pinned)
    }

    /// Check every registered puzzle in registry order.
    ///
    /// A failing puzzle does not stop the batch. The whole registry is
    /// validated before anything runs, so a configuration fault yields no
    /// partial results.
    pub fn run_all(&mut self, registry: &Registry) -> Result<Vec<PuzzleResult>> {
        registry.validate()?;

        let mut results = Vec::with_capacity(registry.len());
        for descriptor in registry.iter() {
            results.push(self.run_timed(descriptor, &[])?);
        }

        let failed = results.iter().filter(|r| !r.passed).count();
        info!(puzzles = results.len(), failed, "suite finished");
        Ok(results)
    }

    fn run_timed(
        &mut self,
        descriptor: &PuzzleDescriptor,
        pinned: &[Option<u32>],
    ) -> Result<PuzzleResult> {
        let start = Instant::now();
        let outcome = self.run(descriptor, pinned)?;
        let result = PuzzleResult::from_outcome(descriptor.name, outcome, start.elapsed());

        match &result.failure {
            None => info!(
                puzzle = descriptor.name,
                cases = result.cases_run,
                duration_ms = result.duration_ms,
                "passed"
            ),
            Some(mismatch) => warn!(
                puzzle = descriptor.name,
                cases = result.cases_run,
                "{}",
                mismatch
            ),
        }
        Ok(result)
    }

    fn sample_sets(
        &mut self,
        descriptor: &PuzzleDescriptor,
        pinned: &[Option<u32>],
    ) -> Result<Vec<SampleSet>> {
        let budget = budget_for_arity(self.config.base_budget, descriptor.arity).ok_or_else(
            || HarnessError::UnsupportedArity {
                puzzle: descriptor.name.to_string(),
                arity: descriptor.arity,
            },
        )?;

        let sets: Vec<SampleSet> = descriptor
            .args
            .iter()
            .enumerate()
            .map(|(slot, spec)| match pinned.get(slot).copied().flatten() {
                Some(value) => SampleSet::pinned(value),
                None => self.sampler.sample(spec, budget),
            })
            .collect();

        let sizes: Vec<usize> = sets.iter().map(SampleSet::len).collect();
        debug!(puzzle = descriptor.name, budget, sizes = ?sizes, "sampled argument slots");
        Ok(sets)
    }
}

/// Walk the cross product of `sets` in slot order, first slot outermost.
///
/// Every set is non-empty: a pinned slot holds one value and a sampled slot
/// at least one step's worth once the budget is positive.
fn check_cross_product(descriptor: &PuzzleDescriptor, sets: &[SampleSet]) -> TestOutcome {
    debug_assert!(sets.iter().all(|set| !set.is_empty()));

    let mut indices = vec![0usize; sets.len()];
    let mut args = vec![0u32; sets.len()];
    let mut cases = 0u64;

    loop {
        for (slot, set) in sets.iter().enumerate() {
            args[slot] = set.values()[indices[slot]];
        }

        let comparison = descriptor.fns.compare(&args);
        cases += 1;
        if !comparison.matches() {
            let inputs = args
                .iter()
                .enumerate()
                .map(|(slot, &bits)| descriptor.arg_value(slot, bits))
                .collect();
            return TestOutcome::Fail {
                cases,
                mismatch: Mismatch {
                    puzzle: descriptor.name.to_string(),
                    inputs,
                    expected: descriptor.return_value(comparison.expected),
                    actual: descriptor.return_value(comparison.actual),
                },
            };
        }

        // Advance the innermost slot, carrying outward
        let mut slot = sets.len();
        loop {
            if slot == 0 {
                return TestOutcome::Pass { cases };
            }
            slot -= 1;
            indices[slot] += 1;
            if indices[slot] < sets[slot].len() {
                break;
            }
            indices[slot] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ArgSpec, FnPair};
    use crate::kinds::{Repr, ReturnKind};

    fn and(x: i32, y: i32) -> i32 {
        x & y
    }

    fn or(x: i32, y: i32) -> i32 {
        x | y
    }

    fn rotl_oracle(x: i32, n: i32) -> i32 {
        (x as u32).rotate_left(n as u32 % 32) as i32
    }

    fn rotl_candidate(x: i32, n: i32) -> i32 {
        let u = x as u32;
        (u.wrapping_shl(n as u32) | (u >> 1).wrapping_shr(31u32.wrapping_sub(n as u32))) as i32
    }

    fn pick(x: i32, y: i32, z: i32) -> i32 {
        x ^ y ^ z
    }

    fn pick_wrong(x: i32, y: i32, z: i32) -> i32 {
        if x == 1 && y == 2 && z >= 0 {
            0
        } else {
            x ^ y ^ z
        }
    }

    fn constant() -> i32 {
        1
    }

    const INT: ArgSpec = ArgSpec::any_signed();
    const SHIFT: ArgSpec = ArgSpec::signed(0, 31);
    const SMALL: ArgSpec = ArgSpec::signed(0, 3);

    const AND_OK: FnPair<fn(i32, i32) -> i32> = FnPair::new(and, and);
    const AND_AS_OR: FnPair<fn(i32, i32) -> i32> = FnPair::new(and, or);
    const ROTL: FnPair<fn(i32, i32) -> i32> = FnPair::new(rotl_oracle, rotl_candidate);
    const PICK: FnPair<fn(i32, i32, i32) -> i32> = FnPair::new(pick, pick_wrong);
    const CONSTANT: FnPair<fn() -> i32> = FnPair::new(constant, constant);

    const BIT_AND: PuzzleDescriptor = PuzzleDescriptor {
        name: "bitAnd",
        arity: 2,
        args: &[INT, INT],
        returns: ReturnKind::SignedInt,
        fns: &AND_OK,
    };

    const BIT_AND_BROKEN: PuzzleDescriptor = PuzzleDescriptor {
        name: "bitAnd",
        arity: 2,
        args: &[INT, INT],
        returns: ReturnKind::SignedInt,
        fns: &AND_AS_OR,
    };

    const ROTATE_LEFT: PuzzleDescriptor = PuzzleDescriptor {
        name: "rotateLeft",
        arity: 2,
        args: &[INT, SHIFT],
        returns: ReturnKind::SignedInt,
        fns: &ROTL,
    };

    const PICK3: PuzzleDescriptor = PuzzleDescriptor {
        name: "pick",
        arity: 3,
        args: &[SMALL, SMALL, SMALL],
        returns: ReturnKind::SignedInt,
        fns: &PICK,
    };

    const NULLARY: PuzzleDescriptor = PuzzleDescriptor {
        name: "constant",
        arity: 0,
        args: &[],
        returns: ReturnKind::SignedInt,
        fns: &CONSTANT,
    };

    fn runner() -> PuzzleRunner {
        PuzzleRunner::new(HarnessConfig::new().base_budget(2_500).seed(1))
    }

    #[test]
    fn test_config_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_budget, 500_000);
        assert_eq!(config.exhaustive_limit(), 6_500_000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_correct_candidate_passes() {
        let outcome = runner().run(&BIT_AND, &[]).unwrap();
        assert!(outcome.passed());
        // 50 per slot, 5 values per step
        assert_eq!(outcome.cases(), 250 * 250);
    }

    #[test]
    fn test_wrong_candidate_reports_first_mismatch() {
        let outcome = runner().run(&BIT_AND_BROKEN, &[]).unwrap();
        let mismatch = outcome.mismatch().expect("or is not and");
        let x = mismatch.inputs[0].bits as i32;
        let y = mismatch.inputs[1].bits as i32;
        assert_eq!(mismatch.expected.bits as i32, x & y);
        assert_eq!(mismatch.actual.bits as i32, x | y);
        // (MIN, MIN) agrees; (MIN, MAX) is the first disagreement
        assert_eq!((x, y), (i32::MIN, i32::MAX));
        assert_eq!(outcome.cases(), 2);
    }

    #[test]
    fn test_pinned_arguments_bypass_sampling() {
        let outcome = runner().run(&BIT_AND_BROKEN, &[Some(5), Some(3)]).unwrap();
        let mismatch = outcome.mismatch().unwrap();
        assert_eq!(mismatch.inputs, vec![Value::new(5, Repr::I32), Value::new(3, Repr::I32)]);
        assert_eq!(mismatch.expected.bits, 1);
        assert_eq!(mismatch.actual.bits, 7);
        assert_eq!(
            mismatch.to_string(),
            "Test bitAnd(5[0x5], 3[0x3]) failed...\n...Gives 7[0x7]. Should be 1[0x1]"
        );
    }

    #[test]
    fn test_pinning_first_slot_keeps_second_sampled() {
        let outcome = runner().run(&ROTATE_LEFT, &[Some(1)]).unwrap();
        assert!(outcome.passed());
        assert_eq!(outcome.cases(), 32);

        let outcome = runner().run(&ROTATE_LEFT, &[Some(1), Some(4)]).unwrap();
        assert_eq!(outcome, TestOutcome::Pass { cases: 1 });
    }

    #[test]
    fn test_pinning_later_slot_only() {
        let outcome = runner().run(&ROTATE_LEFT, &[None, Some(31)]).unwrap();
        assert!(outcome.passed());
        assert_eq!(outcome.cases(), 250);
    }

    #[test]
    fn test_too_many_pinned_is_fault() {
        let err = runner()
            .run(&ROTATE_LEFT, &[Some(1), Some(2), Some(3)])
            .unwrap_err();
        assert_eq!(
            err,
            HarnessError::TooManyPinned {
                puzzle: "rotateLeft".to_string(),
                arity: 2,
                pinned: 3
            }
        );
    }

    #[test]
    fn test_cross_product_order_is_first_slot_outermost() {
        // every slot exhaustive over [0, 3]; first failure is x=1, y=2, z=0
        let outcome = runner().run(&PICK3, &[]).unwrap();
        let mismatch = outcome.mismatch().unwrap();
        let inputs: Vec<u32> = mismatch.inputs.iter().map(|v| v.bits).collect();
        assert_eq!(inputs, vec![1, 2, 0]);
        assert_eq!(outcome.cases(), 16 + 2 * 4 + 1);
    }

    #[test]
    fn test_nullary_descriptor_is_fault() {
        let err = runner().run(&NULLARY, &[]).unwrap_err();
        assert!(matches!(err, HarnessError::UnsupportedArity { arity: 0, .. }));
    }

    #[test]
    fn test_run_all_continues_past_failures() {
        static PUZZLES: [PuzzleDescriptor; 3] = [BIT_AND_BROKEN, ROTATE_LEFT, BIT_AND];
        let registry = Registry::new(&PUZZLES);
        let results = runner().run_all(&registry).unwrap();
        assert_eq!(results.len(), 3);
        assert!(!results[0].passed);
        assert!(results[0].failure.is_some());
        assert!(results[1].passed);
        assert!(results[2].passed);
        assert!(results[1].summary_line().starts_with("PASS  rotateLeft"));
    }

    #[test]
    fn test_run_all_aborts_on_fault() {
        static PUZZLES: [PuzzleDescriptor; 2] = [BIT_AND, NULLARY];
        let registry = Registry::new(&PUZZLES);
        assert!(runner().run_all(&registry).is_err());
    }

    #[test]
    fn test_run_all_validates_before_running() {
        // duplicates are only visible to the registry as a whole
        static PUZZLES: [PuzzleDescriptor; 3] = [BIT_AND, ROTATE_LEFT, BIT_AND];
        let registry = Registry::new(&PUZZLES);
        assert_eq!(
            runner().run_all(&registry).unwrap_err(),
            HarnessError::DuplicateName("bitAnd".to_string())
        );
    }

    #[test]
    fn test_zero_budget_is_fault() {
        let mut runner = PuzzleRunner::new(HarnessConfig::new().base_budget(0).seed(1));
        assert_eq!(
            runner.run(&PICK3, &[]).unwrap_err(),
            HarnessError::InvalidBudget(0)
        );
        // pinning every slot does not sidestep the check
        assert_eq!(
            runner.run(&BIT_AND, &[Some(1), Some(2)]).unwrap_err(),
            HarnessError::InvalidBudget(0)
        );

        static PUZZLES: [PuzzleDescriptor; 1] = [ROTATE_LEFT];
        let registry = Registry::new(&PUZZLES);
        assert!(runner.run_all(&registry).is_err());
    }

    #[test]
    fn test_smallest_budget_still_hits_bounds() {
        let mut runner = PuzzleRunner::new(HarnessConfig::new().base_budget(1).seed(1));
        let outcome = runner.run(&BIT_AND_BROKEN, &[]).unwrap();
        // one step per slot: min, max, 0, 0, random
        let inputs: Vec<i32> = outcome
            .mismatch()
            .unwrap()
            .inputs
            .iter()
            .map(|v| v.bits as i32)
            .collect();
        assert_eq!(inputs, vec![i32::MIN, i32::MAX]);
    }

    #[test]
    fn test_run_named_not_found() {
        static PUZZLES: [PuzzleDescriptor; 1] = [BIT_AND];
        let registry = Registry::new(&PUZZLES);
        let err = runner().run_named(&registry, "bitOr", &[]).unwrap_err();
        assert_eq!(err, HarnessError::NotFound("bitOr".to_string()));

        let result = runner().run_named(&registry, "bitAnd", &[]).unwrap();
        assert!(result.passed);
        assert_eq!(result.name, "bitAnd");
    }
}
