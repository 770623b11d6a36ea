//! Learner progress snapshot: completed goals and exam attempts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::exam::ExamAttempt;
use crate::plan::Plan;

/// Completion state read by the scheduler. Order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub completed_goals: HashSet<String>,
    #[serde(default)]
    pub attempts: Vec<ExamAttempt>,
}

/// Completion figures for one discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineProgress {
    pub discipline_id: String,
    pub discipline_name: String,
    pub completed_goals: usize,
    pub total_goals: usize,
    pub percentage: f64,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed<I, S>(goal_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completed_goals: goal_ids.into_iter().map(Into::into).collect(),
            attempts: Vec::new(),
        }
    }

    pub fn is_goal_completed(&self, goal_id: &str) -> bool {
        self.completed_goals.contains(goal_id)
    }

    /// True if any attempt exists for the exam.
    pub fn has_attempt(&self, exam_id: &str) -> bool {
        self.attempts.iter().any(|a| a.exam_id == exam_id)
    }

    pub fn complete_goal(&mut self, goal_id: impl Into<String>) {
        self.completed_goals.insert(goal_id.into());
    }

    pub fn record_attempt(&mut self, attempt: ExamAttempt) {
        self.attempts.push(attempt);
    }

    /// Per-discipline completion, in plan order.
    pub fn discipline_summary(&self, plan: &Plan) -> Vec<DisciplineProgress> {
        plan.disciplines
            .iter()
            .map(|discipline| {
                let total_goals = discipline.goals().count();
                let completed_goals = discipline
                    .goals()
                    .filter(|(_, goal)| self.is_goal_completed(&goal.id))
                    .count();
                let percentage = if total_goals == 0 {
                    0.0
                } else {
                    completed_goals as f64 / total_goals as f64 * 100.0
                };
                DisciplineProgress {
                    discipline_id: discipline.id.clone(),
                    discipline_name: discipline.name.clone(),
                    completed_goals,
                    total_goals,
                    percentage,
                }
            })
            .collect()
    }
}
