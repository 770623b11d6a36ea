//! Study plan structure: disciplines, subjects, goals and study cycles.
//!
//! A plan is an ordered tree `Discipline -> Subject -> Goal` plus an ordered
//! list of [`Cycle`]s that tell the scheduler in which order to visit the
//! disciplines. Disciplines can be grouped into [`Folder`]s, and a cycle item
//! can reference a whole folder at once.

mod goal;

pub use goal::{DocumentRef, FlashcardSet, Goal, GoalType, SubLesson};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::exam::Exam;

/// How the scheduler advances from one cycle to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CycleSystem {
    /// Stay on a cycle until all of its content is exhausted
    #[default]
    Continuous,
    /// One pass per cycle, then move on; wrap around after the last cycle
    Rotating,
}

/// A subject inside a discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

/// A discipline (e.g. "Matemática").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Discipline {
    /// Iterate `(subject, goal)` pairs in plan order.
    pub fn goals(&self) -> impl Iterator<Item = (&Subject, &Goal)> {
        self.subjects
            .iter()
            .flat_map(|subject| subject.goals.iter().map(move |goal| (subject, goal)))
    }
}

/// Named group of disciplines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

fn default_subjects_per_visit() -> u32 {
    1
}

/// One entry of a study cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CycleItem {
    Discipline {
        discipline_id: String,
        #[serde(default = "default_subjects_per_visit")]
        subjects_per_visit: u32,
    },
    /// Expanded into one discipline item per discipline in the folder
    Folder {
        folder_id: String,
        #[serde(default = "default_subjects_per_visit")]
        subjects_per_visit: u32,
    },
    Exam { exam_id: String },
    /// Unrecognised item type; never scheduled, never blocks a cycle
    #[serde(other)]
    Unknown,
}

impl CycleItem {
    pub fn discipline(id: impl Into<String>, subjects_per_visit: u32) -> Self {
        Self::Discipline {
            discipline_id: id.into(),
            subjects_per_visit,
        }
    }

    pub fn folder(id: impl Into<String>, subjects_per_visit: u32) -> Self {
        Self::Folder {
            folder_id: id.into(),
            subjects_per_visit,
        }
    }

    pub fn exam(id: impl Into<String>) -> Self {
        Self::Exam { exam_id: id.into() }
    }
}

/// An ordered rotation of cycle items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<CycleItem>,
}

/// A complete study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub disciplines: Vec<Discipline>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub cycles: Vec<Cycle>,
    #[serde(default)]
    pub cycle_system: CycleSystem,
}

impl Plan {
    pub fn discipline(&self, id: &str) -> Option<&Discipline> {
        self.disciplines.iter().find(|d| d.id == id)
    }

    /// Disciplines belonging to a folder, in plan order.
    pub fn disciplines_in_folder<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> impl Iterator<Item = &'a Discipline> + 'a {
        self.disciplines
            .iter()
            .filter(move |d| d.folder_id.as_deref() == Some(folder_id))
    }

    pub fn goal_count(&self) -> usize {
        self.disciplines.iter().map(|d| d.goals().count()).sum()
    }

    /// Collect every structural problem in the plan.
    ///
    /// The scheduler tolerates all of these; this is for tooling that wants
    /// to report them.
    pub fn lint(&self, exams: &[Exam]) -> Vec<ValidationError> {
        let mut issues = Vec::new();

        let mut discipline_ids = HashSet::new();
        let mut goal_ids = HashSet::new();
        for discipline in &self.disciplines {
            if !discipline_ids.insert(discipline.id.as_str()) {
                issues.push(ValidationError::DuplicateId {
                    kind: "discipline",
                    id: discipline.id.clone(),
                });
            }
            for (_, goal) in discipline.goals() {
                if !goal_ids.insert(goal.id.as_str()) {
                    issues.push(ValidationError::DuplicateId {
                        kind: "goal",
                        id: goal.id.clone(),
                    });
                }
            }
        }

        for cycle in &self.cycles {
            for item in &cycle.items {
                match item {
                    CycleItem::Discipline {
                        discipline_id,
                        subjects_per_visit,
                    } => {
                        if !discipline_ids.contains(discipline_id.as_str()) {
                            issues.push(ValidationError::UnknownReference {
                                cycle: cycle.id.clone(),
                                kind: "discipline",
                                id: discipline_id.clone(),
                            });
                        }
                        if *subjects_per_visit == 0 {
                            issues.push(zero_target(&cycle.id, discipline_id));
                        }
                    }
                    CycleItem::Folder {
                        folder_id,
                        subjects_per_visit,
                    } => {
                        if !self.folders.iter().any(|f| &f.id == folder_id) {
                            issues.push(ValidationError::UnknownReference {
                                cycle: cycle.id.clone(),
                                kind: "folder",
                                id: folder_id.clone(),
                            });
                        }
                        if *subjects_per_visit == 0 {
                            issues.push(zero_target(&cycle.id, folder_id));
                        }
                    }
                    CycleItem::Exam { exam_id } => {
                        if !exams.iter().any(|e| &e.id == exam_id) {
                            issues.push(ValidationError::UnknownReference {
                                cycle: cycle.id.clone(),
                                kind: "exam",
                                id: exam_id.clone(),
                            });
                        }
                    }
                    CycleItem::Unknown => {}
                }
            }
        }

        issues
    }

    /// Fail on the first structural problem.
    pub fn validate(&self, exams: &[Exam]) -> Result<(), ValidationError> {
        match self.lint(exams).into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }
}

fn zero_target(cycle: &str, target: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("{cycle}.{target}.subjects_per_visit"),
        message: "must be at least 1".to_string(),
    }
}
