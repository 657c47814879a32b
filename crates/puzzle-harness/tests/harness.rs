//! Harness behaviour through the public API only.

use puzzle_harness::prelude::*;
use puzzle_harness::reports::{OutputFormat, SuiteReport};

fn is_positive(x: i32) -> i32 {
    (x > 0) as i32
}

fn is_non_negative(x: i32) -> i32 {
    (x >= 0) as i32
}

fn popcount(x: u32) -> u32 {
    x.count_ones()
}

fn popcount_loop(mut x: u32) -> u32 {
    let mut n = 0;
    while x != 0 {
        n += x & 1;
        x >>= 1;
    }
    n
}

fn truncate(uf: u32) -> i32 {
    bits_to_f32(uf) as i32
}

const INT: ArgSpec = ArgSpec::any_signed();
const WORD: ArgSpec = ArgSpec::unsigned(0, u32::MAX);
const FLOAT: ArgSpec = ArgSpec::float_bits();

static IS_POSITIVE: FnPair<fn(i32) -> i32> = FnPair::new(is_positive, is_non_negative);
static POPCOUNT: FnPair<fn(u32) -> u32> = FnPair::new(popcount, popcount_loop);
static TRUNCATE: FnPair<fn(u32) -> i32> = FnPair::new(truncate, truncate);

static PUZZLES: [PuzzleDescriptor; 3] = [
    PuzzleDescriptor {
        name: "isPositive",
        arity: 1,
        args: &[INT],
        returns: ReturnKind::SignedInt,
        fns: &IS_POSITIVE,
    },
    PuzzleDescriptor {
        name: "popcount",
        arity: 1,
        args: &[WORD],
        returns: ReturnKind::UnsignedInt,
        fns: &POPCOUNT,
    },
    PuzzleDescriptor {
        name: "truncate",
        arity: 1,
        args: &[FLOAT],
        returns: ReturnKind::SignedInt,
        fns: &TRUNCATE,
    },
];

#[test]
fn test_first_mismatch_is_reported() {
    let registry = Registry::new(&PUZZLES);
    assert_eq!(registry.validate(), Ok(()));

    let mut runner = PuzzleRunner::new(HarnessConfig::new().base_budget(1_000).seed(3));
    let results = runner.run_all(&registry).unwrap();

    // MIN, MAX, then 0 where the candidate first disagrees
    let failed = &results[0];
    assert!(!failed.passed);
    assert_eq!(failed.cases_run, 3);
    assert_eq!(
        failed.failure.as_ref().unwrap().to_string(),
        "Test isPositive(0[0x0]) failed...\n...Gives 1[0x1]. Should be 0[0x0]"
    );

    // later puzzles still run
    assert!(results[1].passed);
    assert!(results[2].passed);

    let report = SuiteReport::new(results);
    assert!(!report.all_passed());
    let text = report.render(OutputFormat::Text);
    assert!(text.contains("FAIL  isPositive (3 cases"));
    assert!(text.contains("PASS  popcount"));
}

#[test]
fn test_unsigned_bounds_stay_unsigned() {
    let spec = ArgSpec::unsigned(1_000, 3_000_000_000);
    let mut sampler = DomainSampler::new(1_000, Some(9));
    let samples = sampler.sample(&spec, 100);

    assert_eq!(samples.len(), 100 * 3);
    for bits in samples.iter() {
        assert!((1_000..=3_000_000_000).contains(&bits), "{}", bits);
    }
    assert!(samples.values().contains(&3_000_000_000));
}

#[test]
fn test_seeded_runs_repeat() {
    let spec = INT;
    let a = DomainSampler::new(0, Some(11)).sample(&spec, 50);
    let b = DomainSampler::new(0, Some(11)).sample(&spec, 50);
    assert_eq!(a, b);
}
