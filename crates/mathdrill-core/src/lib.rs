//! mathdrill-core: problem generation, grading, and progress statistics.
//!
//! This crate defines the data model and the drill logic that the
//! `mathdrill` CLI builds on: arithmetic problem generation for study and
//! test modes, test grading, study-session tracking, spelling checks, and
//! progress statistics over finished sessions.

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod report;
pub mod scoring;
pub mod session;
pub mod spelling;
pub mod statistics;
pub mod traits;

pub use error::GeneratorError;
pub use generator::{BatchSpec, Generator, UniquenessPolicy, TEST_BATCH_SIZE};
pub use model::{Attempt, GameModule, Mode, Operation, Problem, SessionRecord, TestBatch};
