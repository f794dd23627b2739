//! Core data model types for mathdrill.
//!
//! These are the fundamental types shared by the generator, grading, session
//! tracking, and statistics modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Arithmetic operations that can be drilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
}

impl Operation {
    /// All operations, in menu order.
    pub const ALL: [Operation; 3] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
    ];

    /// The operator symbol used when rendering a problem.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
        }
    }

    /// Apply the operation to two operands.
    pub fn apply(&self, a: i32, b: i32) -> i32 {
        match self {
            Operation::Addition => a + b,
            Operation::Subtraction => a - b,
            Operation::Multiplication => a * b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Addition => write!(f, "addition"),
            Operation::Subtraction => write!(f, "subtraction"),
            Operation::Multiplication => write!(f, "multiplication"),
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "addition" | "add" | "+" => Ok(Operation::Addition),
            "subtraction" | "sub" | "-" => Ok(Operation::Subtraction),
            "multiplication" | "mul" | "times" | "x" | "×" => Ok(Operation::Multiplication),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

/// A single arithmetic fact: `first_operand <op> second_operand = result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Problem {
    pub first_operand: i32,
    pub second_operand: i32,
    /// Always `operation.apply(first_operand, second_operand)`.
    pub result: i32,
    pub operation: Operation,
}

impl Problem {
    /// Build a problem, computing its result from the operands.
    pub fn new(operation: Operation, first_operand: i32, second_operand: i32) -> Self {
        Self {
            first_operand,
            second_operand,
            result: operation.apply(first_operand, second_operand),
            operation,
        }
    }

    /// Check a typed answer against the result.
    ///
    /// The answer is trimmed and must parse as an integer; blank or
    /// non-numeric input is never correct.
    pub fn check_answer(&self, answer: &str) -> bool {
        answer
            .trim()
            .parse::<i32>()
            .is_ok_and(|value| value == self.result)
    }
}

/// Renders as `"3 × 5"`, the form logged with each attempt.
impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.first_operand,
            self.operation.symbol(),
            self.second_operand
        )
    }
}

/// A fixed-operand batch of problems for test mode.
///
/// The fixed operand is always the second operand of every problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestBatch {
    pub operation: Operation,
    pub fixed_operand: i32,
    pub problems: Vec<Problem>,
}

impl TestBatch {
    /// Number of problems in the batch.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// The operands that vary across the batch, in problem order.
    pub fn varying_operands(&self) -> Vec<i32> {
        self.problems.iter().map(|p| p.first_operand).collect()
    }
}

/// The module a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameModule {
    Addition,
    Subtraction,
    Multiplication,
    Spelling,
}

impl From<Operation> for GameModule {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Addition => GameModule::Addition,
            Operation::Subtraction => GameModule::Subtraction,
            Operation::Multiplication => GameModule::Multiplication,
        }
    }
}

impl fmt::Display for GameModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameModule::Addition => write!(f, "addition"),
            GameModule::Subtraction => write!(f, "subtraction"),
            GameModule::Multiplication => write!(f, "multiplication"),
            GameModule::Spelling => write!(f, "spelling"),
        }
    }
}

/// Study (free practice) or test (fixed-operand batch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Study,
    Test,
}

/// One answer submitted for one problem, as handed to an attempt recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Rendered problem, e.g. `"7 + 8"` or a spelling word.
    pub problem: String,
    pub expected_answer: String,
    pub user_answer: String,
    pub correct: bool,
    /// 1 for the first try at this problem, 2 for the second, and so on.
    pub attempt_number: u32,
    pub timestamp: DateTime<Utc>,
}

/// A finished (or abandoned) practice session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub id: String,
    pub module: GameModule,
    #[serde(default)]
    pub mode: Mode,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: u64,
    pub correct_count: u32,
    pub total_attempts: u32,
    #[serde(default)]
    pub completed: bool,
}
