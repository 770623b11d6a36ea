//! Scheduler output: a date-keyed agenda of study items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::exam::Exam;
use crate::plan::Goal;
use crate::progress::Progress;

/// What a scheduled item points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduledContent {
    Goal {
        goal: Goal,
        discipline_id: String,
        discipline_name: String,
        subject_id: String,
        subject_name: String,
    },
    Exam {
        exam: Exam,
        /// Expected time to solve; the item itself takes the rest of the day
        estimated_minutes: u32,
    },
}

/// One entry of the agenda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub duration_minutes: u32,
    pub cycle_id: String,
    pub content: ScheduledContent,
}

impl ScheduledItem {
    pub(crate) fn goal(
        date: NaiveDate,
        cycle_id: &str,
        goal: &Goal,
        discipline: (&str, &str),
        subject: (&str, &str),
        duration_minutes: u32,
    ) -> Self {
        let (discipline_id, discipline_name) = discipline;
        let (subject_id, subject_name) = subject;
        Self {
            id: format!("{date}:{cycle_id}:{discipline_id}:{}", goal.id),
            date,
            title: goal.title.clone(),
            duration_minutes,
            cycle_id: cycle_id.to_string(),
            content: ScheduledContent::Goal {
                goal: goal.clone(),
                discipline_id: discipline_id.to_string(),
                discipline_name: discipline_name.to_string(),
                subject_id: subject_id.to_string(),
                subject_name: subject_name.to_string(),
            },
        }
    }

    pub(crate) fn exam(
        date: NaiveDate,
        cycle_id: &str,
        exam: &Exam,
        duration_minutes: u32,
        estimated_minutes: u32,
    ) -> Self {
        Self {
            id: format!("{date}:exam:{}", exam.id),
            date,
            title: exam.title.clone(),
            duration_minutes,
            cycle_id: cycle_id.to_string(),
            content: ScheduledContent::Exam {
                exam: exam.clone(),
                estimated_minutes,
            },
        }
    }

    pub fn is_exam(&self) -> bool {
        matches!(self.content, ScheduledContent::Exam { .. })
    }

    pub fn goal_id(&self) -> Option<&str> {
        match &self.content {
            ScheduledContent::Goal { goal, .. } => Some(&goal.id),
            ScheduledContent::Exam { .. } => None,
        }
    }

    pub fn exam_id(&self) -> Option<&str> {
        match &self.content {
            ScheduledContent::Exam { exam, .. } => Some(&exam.id),
            ScheduledContent::Goal { .. } => None,
        }
    }

    pub fn discipline_name(&self) -> Option<&str> {
        match &self.content {
            ScheduledContent::Goal {
                discipline_name, ..
            } => Some(discipline_name),
            ScheduledContent::Exam { .. } => None,
        }
    }

    pub fn subject_name(&self) -> Option<&str> {
        match &self.content {
            ScheduledContent::Goal { subject_name, .. } => Some(subject_name),
            ScheduledContent::Exam { .. } => None,
        }
    }

    /// Completion is looked up at render time, never stored in the agenda.
    pub fn is_completed(&self, progress: &Progress) -> bool {
        match &self.content {
            ScheduledContent::Goal { goal, .. } => progress.is_goal_completed(&goal.id),
            ScheduledContent::Exam { exam, .. } => progress.has_attempt(&exam.id),
        }
    }
}

/// Date-ordered mapping from day to that day's items.
///
/// Days without items are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Agenda {
    days: BTreeMap<NaiveDate, Vec<ScheduledItem>>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a day's items. Returns false (and stores nothing) for an empty day.
    ///
    /// Items whose id already exists on that date are dropped.
    pub fn insert_day(&mut self, date: NaiveDate, items: Vec<ScheduledItem>) -> bool {
        if items.is_empty() {
            return false;
        }
        let day = self.days.entry(date).or_default();
        for item in items {
            if !day.iter().any(|existing| existing.id == item.id) {
                day.push(item);
            }
        }
        true
    }

    pub fn items_on(&self, date: NaiveDate) -> &[ScheduledItem] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[ScheduledItem])> {
        self.days.iter().map(|(date, items)| (*date, items.as_slice()))
    }

    pub fn items(&self) -> impl Iterator<Item = &ScheduledItem> {
        self.days.values().flatten()
    }

    /// Number of days with at least one item.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_minutes(&self) -> u64 {
        self.items().map(|item| u64::from(item.duration_minutes)).sum()
    }

    /// Planned minutes per discipline name. Exams are grouped under their title.
    pub fn minutes_by_discipline(&self) -> BTreeMap<String, u64> {
        let mut totals = BTreeMap::new();
        for item in self.items() {
            let key = item.discipline_name().unwrap_or(&item.title).to_string();
            *totals.entry(key).or_insert(0) += u64::from(item.duration_minutes);
        }
        totals
    }

    /// Items on dates in `[from, until)`.
    pub fn range(&self, from: NaiveDate, until: NaiveDate) -> impl Iterator<Item = (NaiveDate, &[ScheduledItem])> {
        self.days
            .range(from..until)
            .map(|(date, items)| (*date, items.as_slice()))
    }
}
