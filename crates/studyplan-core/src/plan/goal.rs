//! Goals: the smallest unit of study content in a plan.

use serde::{Deserialize, Serialize};

/// Kind of study activity a goal represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Video or live lesson
    Lesson,
    /// Reading material (PDF, book chapter)
    Reading,
    /// Question set / exercise list
    Questions,
    Review,
    Summary,
    #[default]
    #[serde(other)]
    Other,
}

impl GoalType {
    pub fn is_lesson(&self) -> bool {
        matches!(self, Self::Lesson)
    }
}

/// A part of a lesson (e.g. one video of a lesson playlist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubLesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub duration_minutes: u32,
}

/// Flashcard deck attached to a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub id: String,
    #[serde(default)]
    pub card_count: u32,
}

/// Document linked to a goal (usually the lesson PDF).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A single study goal. Read-only from the scheduler's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    #[serde(default, rename = "type")]
    pub goal_type: GoalType,
    pub title: String,
    /// Declared duration (lesson length, expected effort)
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub questions: Option<u32>,
    #[serde(default)]
    pub sub_lessons: Vec<SubLesson>,
    #[serde(default)]
    pub flashcards: Option<FlashcardSet>,
    #[serde(default)]
    pub document: Option<DocumentRef>,
}

impl Goal {
    /// Create a goal with no duration inputs.
    pub fn new(id: impl Into<String>, goal_type: GoalType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            goal_type,
            title: title.into(),
            duration_minutes: None,
            pages: None,
            questions: None,
            sub_lessons: Vec::new(),
            flashcards: None,
            document: None,
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn with_questions(mut self, questions: u32) -> Self {
        self.questions = Some(questions);
        self
    }

    pub fn with_sub_lesson(mut self, sub: SubLesson) -> Self {
        self.sub_lessons.push(sub);
        self
    }

    /// Sum of sub-lesson durations, if the goal has any sub-lessons.
    pub fn sub_lesson_minutes(&self) -> Option<u32> {
        if self.sub_lessons.is_empty() {
            None
        } else {
            Some(
                self.sub_lessons
                    .iter()
                    .map(|s| s.duration_minutes)
                    .fold(0, u32::saturating_add),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_goal_type_falls_back_to_other() {
        let goal: Goal =
            serde_json::from_str(r#"{"id":"g1","type":"mind_map","title":"Map"}"#).unwrap();
        assert_eq!(goal.goal_type, GoalType::Other);
    }

    #[test]
    fn goal_type_defaults_to_other_when_missing() {
        let goal: Goal = serde_json::from_str(r#"{"id":"g1","title":"Untyped"}"#).unwrap();
        assert_eq!(goal.goal_type, GoalType::Other);
        assert!(goal.sub_lessons.is_empty());
    }

    #[test]
    fn sub_lesson_minutes_sums_parts() {
        let goal = Goal::new("g1", GoalType::Lesson, "Lesson 1")
            .with_sub_lesson(SubLesson {
                id: "a".into(),
                title: "Part A".into(),
                duration_minutes: 12,
            })
            .with_sub_lesson(SubLesson {
                id: "b".into(),
                title: "Part B".into(),
                duration_minutes: 8,
            });
        assert_eq!(goal.sub_lesson_minutes(), Some(20));
        assert_eq!(Goal::new("g2", GoalType::Lesson, "x").sub_lesson_minutes(), None);
    }

    #[test]
    fn sub_lesson_minutes_saturate() {
        let part = |id: &str| SubLesson {
            id: id.into(),
            title: id.into(),
            duration_minutes: u32::MAX,
        };
        let goal = Goal::new("g1", GoalType::Lesson, "Long")
            .with_sub_lesson(part("a"))
            .with_sub_lesson(part("b"));
        assert_eq!(goal.sub_lesson_minutes(), Some(u32::MAX));
    }
}
