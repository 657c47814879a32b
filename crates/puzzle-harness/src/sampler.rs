//! Domain sampling for puzzle argument slots
//!
//! Three policies, picked per slot:
//!
//! - **float bits**: any `FloatBits` slot, whatever its bounds. Walks
//!   outward from zero, the normal/denormal boundary, one, and the largest
//!   normal, in both signs, then appends the infinities and NaNs.
//! - **exhaustive**: the slot's range holds at most `exhaustive_limit` values.
//! - **boundary/random**: everything else. Both ends of the range, the
//!   neighbourhood of zero, and a thin uniform scatter through the interior.

use crate::descriptor::ArgSpec;
use crate::kinds::{ArgKind, INFINITY, LARGEST_NORM, ONE, QUIET_NAN, SIGN_BIT, SMALLEST_NORM};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Float policy never walks further than half an exponent's spread.
pub const FLOAT_BUDGET_CAP: u32 = 1 << 23;

/// Values emitted per float-policy iteration.
pub const FLOAT_VALUES_PER_STEP: usize = 12;

// ============================================================================
// Sample sets
// ============================================================================

/// Concrete values chosen for one argument slot of one puzzle run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet {
    values: Vec<u32>,
}

impl SampleSet {
    /// A slot pinned to a single caller-supplied value.
    pub fn pinned(value: u32) -> Self {
        Self {
            values: vec![value],
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }
}

impl From<Vec<u32>> for SampleSet {
    fn from(values: Vec<u32>) -> Self {
        Self { values }
    }
}

// ============================================================================
// Budget scaling
// ============================================================================

/// Per-slot budget that keeps `budget^arity` close to `base`.
///
/// `None` when the arity is outside `1..=MAX_ARITY`.
///
/// [`MAX_ARITY`]: crate::MAX_ARITY
pub fn budget_for_arity(base: u32, arity: usize) -> Option<u32> {
    match arity {
        1 => Some(base),
        2 | 3 => Some(integer_root(base, arity as u32)),
        _ => None,
    }
}

/// `floor(value^(1/n))`, exact even where the float root rounds up.
fn integer_root(value: u32, n: u32) -> u32 {
    let value = value as u64;
    let mut root = (value as f64).powf(1.0 / n as f64).floor() as u64;
    while root > 0 && root.pow(n) > value {
        root -= 1;
    }
    while (root + 1).pow(n) <= value {
        root += 1;
    }
    root as u32
}

// ============================================================================
// Sampler
// ============================================================================

/// Generates [`SampleSet`]s. Owns the RNG for the random component.
pub struct DomainSampler {
    exhaustive_limit: u64,
    rng: StdRng,
}

impl DomainSampler {
    /// `seed = None` draws the interior scatter from OS entropy.
    pub fn new(exhaustive_limit: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            exhaustive_limit,
            rng,
        }
    }

    /// Sample one slot with a per-slot `budget`.
    pub fn sample(&mut self, spec: &ArgSpec, budget: u32) -> SampleSet {
        match spec.kind {
            ArgKind::FloatBits => float_bits(budget),
            _ if spec.domain_size() <= self.exhaustive_limit => exhaustive(spec),
            _ => self.boundary(spec, budget),
        }
    }

    fn boundary(&mut self, spec: &ArgSpec, budget: u32) -> SampleSet {
        let (min, max) = (spec.min, spec.max);
        let steps = (budget as u64).min(spec.domain_size()) as i64;
        let mut values = Vec::with_capacity(steps as usize * 5);

        for i in 0..steps {
            values.push(min + i);
            values.push(max - i);

            if spec.contains(i) {
                values.push(i);
            }
            if spec.contains(-i) {
                values.push(-i);
            }

            let weight: f64 = self.rng.gen();
            let offset = ((max - min) as f64 * weight).floor() as i64;
            values.push(min + offset.min(max - min));
        }

        values.into_iter().map(|v| v as u32).collect::<Vec<_>>().into()
    }
}

/// Every value of `spec`'s range, ascending.
pub fn exhaustive(spec: &ArgSpec) -> SampleSet {
    (spec.min..=spec.max)
        .map(|v| v as u32)
        .collect::<Vec<_>>()
        .into()
}

/// Float bit-pattern sampling around the structurally distinct regions.
pub fn float_bits(budget: u32) -> SampleSet {
    let budget = budget.min(FLOAT_BUDGET_CAP);
    let mut values = Vec::with_capacity(budget as usize * FLOAT_VALUES_PER_STEP + 4);

    for i in 0..budget {
        // Denorms around zero
        values.push(i);
        values.push(SIGN_BIT | i);

        // Normal/denormal transition
        values.push(SMALLEST_NORM + i);
        values.push(SMALLEST_NORM - i);
        values.push(SIGN_BIT | (SMALLEST_NORM + i));
        values.push(SIGN_BIT | (SMALLEST_NORM - i));

        // Around one
        values.push(ONE + i);
        values.push(ONE - i);
        values.push(SIGN_BIT | (ONE + i));
        values.push(SIGN_BIT | (ONE - i));

        // Below the largest normal
        values.push(LARGEST_NORM - i);
        values.push(SIGN_BIT | (LARGEST_NORM - i));
    }

    values.push(INFINITY);
    values.push(SIGN_BIT | INFINITY);
    values.push(QUIET_NAN);
    values.push(SIGN_BIT | QUIET_NAN);

    values.into()
}
