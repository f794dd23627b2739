//! Generator error types.
//!
//! Invalid batch configurations are reported as typed errors so callers can
//! tell a bad request apart from an I/O failure.

use thiserror::Error;

/// Errors returned by fixed-operand batch generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// The fixed operand is outside the supported range.
    #[error("fixed operand {operand} is out of range (expected {min}..={max})")]
    FixedOperandOutOfRange { operand: i32, min: i32, max: i32 },

    /// Strict uniqueness was requested but the pool holds fewer values than the batch needs.
    #[error("only {pool} distinct operands available, cannot fill a batch of {requested}")]
    PoolTooSmall { pool: usize, requested: usize },

    /// A batch of zero problems was requested.
    #[error("batch size must be at least 1")]
    EmptyBatch,

    /// More problems were requested than a single batch may hold.
    #[error("batch size {requested} exceeds the maximum of {max}")]
    BatchTooLarge { requested: usize, max: usize },
}

impl GeneratorError {
    /// Returns `true` if the request could succeed under a different uniqueness policy.
    pub fn is_policy_conflict(&self) -> bool {
        matches!(self, GeneratorError::PoolTooSmall { .. })
    }
}
