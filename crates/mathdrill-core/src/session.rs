//! Study-mode session state.
//!
//! Tracks correct answers and attempts for one free-practice session and
//! forwards every answer to an [`AttemptRecorder`].

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Attempt, GameModule, Mode, Operation, Problem, SessionRecord};
use crate::traits::AttemptRecorder;

/// Correct answers needed to finish a study session.
pub const DEFAULT_STUDY_GOAL: u32 = 25;

/// A free-practice session in progress.
#[derive(Debug, Clone)]
pub struct StudySession {
    id: Uuid,
    operation: Operation,
    goal: u32,
    started_at: DateTime<Utc>,
    correct_count: u32,
    total_attempts: u32,
    /// Tries on the current problem, including the one being submitted.
    attempt_number: u32,
}

impl StudySession {
    pub fn new(operation: Operation, goal: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation,
            goal: goal.max(1),
            started_at: Utc::now(),
            correct_count: 0,
            total_attempts: 0,
            attempt_number: 1,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    /// Attempt number the next submission will carry.
    pub fn attempt_number(&self) -> u32 {
        self.attempt_number
    }

    pub fn is_complete(&self) -> bool {
        self.correct_count >= self.goal
    }

    /// Check an answer, record it, and update the counters.
    ///
    /// Returns whether the answer was correct. A correct answer moves on to a
    /// new problem, so the attempt number resets to 1.
    pub fn submit(
        &mut self,
        problem: &Problem,
        answer: &str,
        recorder: &mut dyn AttemptRecorder,
    ) -> Result<bool> {
        let correct = problem.check_answer(answer);
        let attempt = Attempt {
            problem: problem.to_string(),
            expected_answer: problem.result.to_string(),
            user_answer: answer.trim().to_string(),
            correct,
            attempt_number: self.attempt_number,
            timestamp: Utc::now(),
        };
        recorder.record(&attempt)?;

        self.total_attempts += 1;
        if correct {
            self.correct_count += 1;
            self.attempt_number = 1;
        } else {
            self.attempt_number += 1;
        }

        tracing::debug!(
            problem = %problem,
            correct,
            progress = self.correct_count,
            goal = self.goal,
            "answer submitted"
        );
        Ok(correct)
    }

    /// Close the session and produce its record.
    pub fn finish(&self, duration: Duration) -> SessionRecord {
        SessionRecord {
            id: self.id.to_string(),
            module: GameModule::from(self.operation),
            mode: Mode::Study,
            started_at: self.started_at,
            completed_at: Some(Utc::now()),
            duration_seconds: duration.as_secs(),
            correct_count: self.correct_count,
            total_attempts: self.total_attempts,
            completed: self.is_complete(),
        }
    }
}
