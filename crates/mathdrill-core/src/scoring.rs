//! Test-mode grading.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{Attempt, Problem, TestBatch};

/// One problem of a test batch with the answer that was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedProblem {
    pub problem: Problem,
    /// Trimmed answer; empty when left blank.
    pub user_answer: String,
    pub correct: bool,
}

/// Result of grading a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub graded: Vec<GradedProblem>,
    pub correct_count: usize,
    pub total: usize,
}

/// Grade a batch against answers given in problem order.
///
/// Missing answers are treated as blank; extra answers are ignored.
pub fn grade_batch<S: AsRef<str>>(batch: &TestBatch, answers: &[S]) -> TestOutcome {
    let graded: Vec<GradedProblem> = batch
        .problems
        .iter()
        .enumerate()
        .map(|(i, problem)| {
            let user_answer = answers
                .get(i)
                .map(|a| a.as_ref().trim().to_string())
                .unwrap_or_default();
            GradedProblem {
                correct: problem.check_answer(&user_answer),
                problem: *problem,
                user_answer,
            }
        })
        .collect();

    let correct_count = graded.iter().filter(|g| g.correct).count();
    let total = graded.len();
    tracing::debug!(correct_count, total, "graded test batch");

    TestOutcome {
        graded,
        correct_count,
        total,
    }
}

impl TestOutcome {
    /// Rounded percentage of correct answers, 0 for an empty batch.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct_count as f64 / self.total as f64 * 100.0).round() as u32
    }

    /// Encouragement message for the score.
    pub fn verdict(&self) -> &'static str {
        match self.percentage() {
            100 => "Perfect Score!",
            90..=99 => "Excellent Work!",
            80..=89 => "Great Job!",
            70..=79 => "Good Effort!",
            _ => "Keep Practicing!",
        }
    }

    /// Problems answered wrongly or left blank.
    pub fn incorrect(&self) -> impl Iterator<Item = &GradedProblem> {
        self.graded.iter().filter(|g| !g.correct)
    }

    /// Number of problems that received any answer.
    pub fn answered(&self) -> usize {
        self.graded.iter().filter(|g| !g.user_answer.is_empty()).count()
    }

    /// One first-try attempt per problem, ready for an attempt recorder.
    pub fn attempts(&self) -> Vec<Attempt> {
        let timestamp = Utc::now();
        self.graded
            .iter()
            .map(|g| Attempt {
                problem: g.problem.to_string(),
                expected_answer: g.problem.result.to_string(),
                user_answer: g.user_answer.clone(),
                correct: g.correct,
                attempt_number: 1,
                timestamp,
            })
            .collect()
    }
}
