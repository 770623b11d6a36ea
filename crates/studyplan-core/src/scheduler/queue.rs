//! Per-discipline goal queues.

use std::collections::HashMap;

use crate::plan::{Discipline, Goal, Plan, Subject};

/// A goal together with the subject and discipline it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct QueuedGoal<'a> {
    pub goal: &'a Goal,
    pub subject: &'a Subject,
    pub discipline: &'a Discipline,
}

/// All goals of one discipline, flattened across its subjects in plan order.
#[derive(Debug, Clone)]
pub struct DisciplineQueue<'a> {
    goals: Vec<QueuedGoal<'a>>,
}

impl<'a> DisciplineQueue<'a> {
    pub fn new(discipline: &'a Discipline) -> Self {
        let goals = discipline
            .goals()
            .map(|(subject, goal)| QueuedGoal {
                goal,
                subject,
                discipline,
            })
            .collect();
        Self { goals }
    }

    pub fn get(&self, position: usize) -> Option<&QueuedGoal<'a>> {
        self.goals.get(position)
    }

    /// Goals at or after `position`.
    pub fn remaining(&self, position: usize) -> &[QueuedGoal<'a>] {
        self.goals.get(position..).unwrap_or(&[])
    }
}

/// Build one queue per discipline, keyed by discipline id.
///
/// If two disciplines share an id the first one wins.
pub fn build_queues(plan: &Plan) -> HashMap<&str, DisciplineQueue<'_>> {
    let mut queues = HashMap::with_capacity(plan.disciplines.len());
    for discipline in &plan.disciplines {
        queues
            .entry(discipline.id.as_str())
            .or_insert_with(|| DisciplineQueue::new(discipline));
    }
    queues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::GoalType;

    fn subject(id: &str, goals: &[&str]) -> Subject {
        Subject {
            id: id.into(),
            name: id.to_uppercase(),
            goals: goals
                .iter()
                .map(|g| Goal::new(*g, GoalType::Lesson, *g))
                .collect(),
        }
    }

    #[test]
    fn queue_flattens_subjects_in_order() {
        let discipline = Discipline {
            id: "mat".into(),
            name: "Matemática".into(),
            folder_id: None,
            subjects: vec![subject("s1", &["a", "b"]), subject("s2", &[]), subject("s3", &["c"])],
        };
        let queue = DisciplineQueue::new(&discipline);
        let ids: Vec<_> = queue.remaining(0).iter().map(|q| q.goal.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(queue.get(2).map(|q| q.subject.id.as_str()), Some("s3"));
        assert_eq!(queue.get(0).map(|q| q.discipline.name.as_str()), Some("Matemática"));
        assert!(queue.remaining(7).is_empty());
    }
}
