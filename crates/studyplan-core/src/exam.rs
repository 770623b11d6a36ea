//! Simulated exams and their attempts.
//!
//! The scheduler only needs to know whether an exam was already attempted
//! and how long it is expected to take. Grading lives here as well so that
//! an attempt outcome can be produced from a raw answer sheet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default estimate per question, in minutes.
pub const DEFAULT_MINUTES_PER_QUESTION: u32 = 3;

/// A simulated test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub question_count: u32,
    /// Points per question number; questions not listed are worth 1.0
    #[serde(default)]
    pub question_values: BTreeMap<u32, f64>,
    /// Correct answer per question number
    #[serde(default)]
    pub answer_key: BTreeMap<u32, String>,
    /// Minimum percentage (0-100) needed to pass
    #[serde(default)]
    pub passing_score: f64,
    /// A wrong answer cancels the value of the question
    #[serde(default)]
    pub penalize_wrong: bool,
}

/// Result of grading an answer sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamOutcome {
    pub correct: u32,
    pub wrong: u32,
    pub blank: u32,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub passed: bool,
}

/// A finished attempt at an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamAttempt {
    pub id: String,
    pub exam_id: String,
    #[serde(default)]
    pub outcome: Option<ExamOutcome>,
}

impl Exam {
    pub fn new(id: impl Into<String>, title: impl Into<String>, question_count: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            question_count,
            question_values: BTreeMap::new(),
            answer_key: BTreeMap::new(),
            passing_score: 0.0,
            penalize_wrong: false,
        }
    }

    pub fn estimated_minutes(&self, minutes_per_question: u32) -> u32 {
        self.question_count.saturating_mul(minutes_per_question)
    }

    fn value_of(&self, question: u32) -> f64 {
        self.question_values.get(&question).copied().unwrap_or(1.0)
    }

    pub fn max_score(&self) -> f64 {
        (1..=self.question_count).map(|q| self.value_of(q)).sum()
    }

    /// Grade an answer sheet keyed by question number.
    ///
    /// Questions without an answer (or with a blank one) score zero. Questions
    /// missing from the answer key cannot be graded and count as blank.
    pub fn grade(&self, answers: &BTreeMap<u32, String>) -> ExamOutcome {
        let mut correct = 0;
        let mut wrong = 0;
        let mut blank = 0;
        let mut score = 0.0;

        for question in 1..=self.question_count {
            let given = answers
                .get(&question)
                .map(|a| a.trim())
                .filter(|a| !a.is_empty());
            let expected = self.answer_key.get(&question).map(|a| a.trim());

            match (given, expected) {
                (Some(given), Some(expected)) if given.eq_ignore_ascii_case(expected) => {
                    correct += 1;
                    score += self.value_of(question);
                }
                (Some(_), Some(_)) => {
                    wrong += 1;
                    if self.penalize_wrong {
                        score -= self.value_of(question);
                    }
                }
                _ => blank += 1,
            }
        }

        let max_score = self.max_score();
        let percentage = if max_score > 0.0 {
            score / max_score * 100.0
        } else {
            0.0
        };

        ExamOutcome {
            correct,
            wrong,
            blank,
            score,
            max_score,
            percentage,
            passed: percentage >= self.passing_score,
        }
    }

    /// Grade and wrap the result in an attempt record.
    pub fn attempt(&self, attempt_id: impl Into<String>, answers: &BTreeMap<u32, String>) -> ExamAttempt {
        ExamAttempt {
            id: attempt_id.into(),
            exam_id: self.id.clone(),
            outcome: Some(self.grade(answers)),
        }
    }
}
