//! Arithmetic problem generation.
//!
//! Two modes:
//! - free practice: one independent problem per call, with grade-level bounds
//!   (sums below 20, non-negative differences, 1-12 times tables);
//! - test batches: a fixed number of problems that all share one fixed
//!   second operand, with the other operand drawn from a per-operation pool.
//!
//! Every function takes the random source as an argument. Seed a
//! [`rand::rngs::StdRng`] to get reproducible sequences.

use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::model::{Operation, Problem, TestBatch};

/// Number of problems in a test-mode batch.
pub const TEST_BATCH_SIZE: usize = 16;

/// Largest batch [`BatchSpec::with_size`] may ask for.
pub const MAX_BATCH_SIZE: usize = 100;

/// Smallest fixed operand a test batch accepts.
pub const FIXED_OPERAND_MIN: i32 = 1;

/// Largest fixed operand a test batch accepts.
pub const FIXED_OPERAND_MAX: i32 = 9;

/// Upper bound of the varying operand (and of sums) in test batches.
const BATCH_CEILING: i32 = 20;

// ---------------------------------------------------------------------------
// Free practice
// ---------------------------------------------------------------------------

/// Addition with both operands at least 1 and a sum strictly below 20.
pub fn generate_addition_problem<R: Rng + ?Sized>(rng: &mut R) -> Problem {
    let first = rng.gen_range(1..=18);
    let second = rng.gen_range(1..=19 - first);
    Problem::new(Operation::Addition, first, second)
}

/// Subtraction with operands below 20 and a non-negative difference.
pub fn generate_subtraction_problem<R: Rng + ?Sized>(rng: &mut R) -> Problem {
    let first = rng.gen_range(1..=19);
    let second = rng.gen_range(0..=first);
    Problem::new(Operation::Subtraction, first, second)
}

/// Times-table multiplication, both factors in 1..=12.
pub fn generate_multiplication_problem<R: Rng + ?Sized>(rng: &mut R) -> Problem {
    let first = rng.gen_range(1..=12);
    let second = rng.gen_range(1..=12);
    Problem::new(Operation::Multiplication, first, second)
}

/// Generate one free-practice problem for the given operation.
pub fn generate_problem<R: Rng + ?Sized>(operation: Operation, rng: &mut R) -> Problem {
    match operation {
        Operation::Addition => generate_addition_problem(rng),
        Operation::Subtraction => generate_subtraction_problem(rng),
        Operation::Multiplication => generate_multiplication_problem(rng),
    }
}

// ---------------------------------------------------------------------------
// Test batches
// ---------------------------------------------------------------------------

/// How repeated varying operands are handled within one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniquenessPolicy {
    /// Draw without replacement, reshuffling the pool once it runs out.
    /// Values only repeat when the pool is smaller than the batch.
    #[default]
    Spread,
    /// Every varying operand is distinct; a pool smaller than the batch is an error.
    Strict,
    /// Independent uniform draws; repeats are allowed.
    Independent,
}

impl fmt::Display for UniquenessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniquenessPolicy::Spread => write!(f, "spread"),
            UniquenessPolicy::Strict => write!(f, "strict"),
            UniquenessPolicy::Independent => write!(f, "independent"),
        }
    }
}

impl FromStr for UniquenessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spread" => Ok(UniquenessPolicy::Spread),
            "strict" | "unique" => Ok(UniquenessPolicy::Strict),
            "independent" | "repeat" => Ok(UniquenessPolicy::Independent),
            other => Err(format!("unknown uniqueness policy: {other}")),
        }
    }
}

/// Parameters of a fixed-operand batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSpec {
    pub operation: Operation,
    /// The operand held constant across the batch (the second operand).
    pub fixed_operand: i32,
    pub size: usize,
    pub policy: UniquenessPolicy,
}

impl BatchSpec {
    /// A standard 16-problem batch with the default policy.
    pub fn new(operation: Operation, fixed_operand: i32) -> Self {
        Self {
            operation,
            fixed_operand,
            size: TEST_BATCH_SIZE,
            policy: UniquenessPolicy::default(),
        }
    }

    /// Library override of the batch length, up to [`MAX_BATCH_SIZE`].
    /// Test mode always uses [`TEST_BATCH_SIZE`].
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_policy(mut self, policy: UniquenessPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Values the varying operand may take for a given operation and fixed operand.
///
/// - addition: `1..=20 - fixed`, so sums never exceed 20
/// - subtraction: `fixed..=20`, so differences are never negative
/// - multiplication: `1..=20`
pub fn varying_pool(operation: Operation, fixed_operand: i32) -> RangeInclusive<i32> {
    match operation {
        Operation::Addition => 1..=BATCH_CEILING - fixed_operand,
        Operation::Subtraction => fixed_operand..=BATCH_CEILING,
        Operation::Multiplication => 1..=BATCH_CEILING,
    }
}

/// Generate a fixed-operand test batch.
///
/// The fixed operand must lie in `1..=9`. Under [`UniquenessPolicy::Strict`]
/// the pool must hold at least `spec.size` values, otherwise this fails with
/// [`GeneratorError::PoolTooSmall`] rather than searching forever.
pub fn generate_test_batch<R: Rng + ?Sized>(
    spec: &BatchSpec,
    rng: &mut R,
) -> Result<TestBatch, GeneratorError> {
    if !(FIXED_OPERAND_MIN..=FIXED_OPERAND_MAX).contains(&spec.fixed_operand) {
        tracing::warn!(
            operation = %spec.operation,
            operand = spec.fixed_operand,
            "rejecting fixed operand"
        );
        return Err(GeneratorError::FixedOperandOutOfRange {
            operand: spec.fixed_operand,
            min: FIXED_OPERAND_MIN,
            max: FIXED_OPERAND_MAX,
        });
    }
    if spec.size == 0 {
        return Err(GeneratorError::EmptyBatch);
    }
    if spec.size > MAX_BATCH_SIZE {
        return Err(GeneratorError::BatchTooLarge {
            requested: spec.size,
            max: MAX_BATCH_SIZE,
        });
    }

    let pool: Vec<i32> = varying_pool(spec.operation, spec.fixed_operand).collect();
    if pool.is_empty() || (spec.policy == UniquenessPolicy::Strict && pool.len() < spec.size) {
        tracing::warn!(
            operation = %spec.operation,
            pool = pool.len(),
            requested = spec.size,
            "pool too small for a distinct batch"
        );
        return Err(GeneratorError::PoolTooSmall {
            pool: pool.len(),
            requested: spec.size,
        });
    }

    let varying = match spec.policy {
        UniquenessPolicy::Spread => draw_spread(&pool, spec.size, rng),
        UniquenessPolicy::Strict => draw_distinct(&pool, spec.size, rng),
        UniquenessPolicy::Independent => (0..spec.size)
            .map(|_| pool[rng.gen_range(0..pool.len())])
            .collect(),
    };

    let problems = varying
        .into_iter()
        .map(|v| Problem::new(spec.operation, v, spec.fixed_operand))
        .collect();

    tracing::debug!(
        operation = %spec.operation,
        fixed = spec.fixed_operand,
        size = spec.size,
        policy = %spec.policy,
        "generated test batch"
    );

    Ok(TestBatch {
        operation: spec.operation,
        fixed_operand: spec.fixed_operand,
        problems,
    })
}

/// 16 addition problems of the form `n + fixed`.
pub fn generate_addition_test_batch<R: Rng + ?Sized>(
    fixed_operand: i32,
    rng: &mut R,
) -> Result<TestBatch, GeneratorError> {
    generate_test_batch(&BatchSpec::new(Operation::Addition, fixed_operand), rng)
}

/// 16 subtraction problems of the form `n - fixed`.
pub fn generate_subtraction_test_batch<R: Rng + ?Sized>(
    fixed_operand: i32,
    rng: &mut R,
) -> Result<TestBatch, GeneratorError> {
    generate_test_batch(&BatchSpec::new(Operation::Subtraction, fixed_operand), rng)
}

/// 16 multiplication problems of the form `n × fixed`, all `n` distinct.
pub fn generate_multiplication_test_batch<R: Rng + ?Sized>(
    fixed_operand: i32,
    rng: &mut R,
) -> Result<TestBatch, GeneratorError> {
    generate_test_batch(&BatchSpec::new(Operation::Multiplication, fixed_operand), rng)
}

fn draw_spread<R: Rng + ?Sized>(pool: &[i32], size: usize, rng: &mut R) -> Vec<i32> {
    let mut out = Vec::with_capacity(size);
    let mut deck = pool.to_vec();
    while out.len() < size {
        deck.shuffle(rng);
        let take = (size - out.len()).min(deck.len());
        out.extend_from_slice(&deck[..take]);
    }
    out
}

// Rejection sampling; the caller has checked that the pool can fill the batch.
fn draw_distinct<R: Rng + ?Sized>(pool: &[i32], size: usize, rng: &mut R) -> Vec<i32> {
    let mut used = HashSet::with_capacity(size);
    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        let value = pool[rng.gen_range(0..pool.len())];
        if used.insert(value) {
            out.push(value);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Owned generator
// ---------------------------------------------------------------------------

/// A generator that owns its random source.
#[derive(Debug, Clone)]
pub struct Generator<R> {
    rng: R,
}

impl Generator<StdRng> {
    /// Deterministic generator: the same seed yields the same problems.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, otherwise from the operating system.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Next free-practice problem.
    pub fn problem(&mut self, operation: Operation) -> Problem {
        generate_problem(operation, &mut self.rng)
    }

    /// A fixed-operand batch.
    pub fn batch(&mut self, spec: &BatchSpec) -> Result<TestBatch, GeneratorError> {
        generate_test_batch(spec, &mut self.rng)
    }

    /// Access to the underlying random source (e.g. for word selection).
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
