//! Cycle item expansion and exhaustion checks.

use std::collections::HashMap;

use super::queue::DisciplineQueue;
use crate::plan::{Cycle, CycleItem, Plan};
use crate::progress::Progress;

/// A cycle item after folder expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcreteItem<'a> {
    Discipline {
        discipline_id: &'a str,
        subjects_per_visit: u32,
    },
    Exam {
        exam_id: &'a str,
    },
}

/// Expand a cycle's items, replacing each folder with its disciplines.
///
/// Folder members come out in plan order and inherit the folder item's
/// subject target. Unknown item types are dropped.
pub fn expand_items<'a>(plan: &'a Plan, cycle: &'a Cycle) -> Vec<ConcreteItem<'a>> {
    let mut expanded = Vec::with_capacity(cycle.items.len());
    for item in &cycle.items {
        match item {
            CycleItem::Discipline {
                discipline_id,
                subjects_per_visit,
            } => expanded.push(ConcreteItem::Discipline {
                discipline_id,
                subjects_per_visit: *subjects_per_visit,
            }),
            CycleItem::Folder {
                folder_id,
                subjects_per_visit,
            } => expanded.extend(plan.disciplines_in_folder(folder_id).map(|discipline| {
                ConcreteItem::Discipline {
                    discipline_id: discipline.id.as_str(),
                    subjects_per_visit: *subjects_per_visit,
                }
            })),
            CycleItem::Exam { exam_id } => expanded.push(ConcreteItem::Exam { exam_id }),
            CycleItem::Unknown => {}
        }
    }
    expanded
}

/// True when no goal at or after `pointer` is still pending.
///
/// A missing queue (dangling discipline reference) has nothing to offer.
pub fn is_discipline_exhausted(
    queue: Option<&DisciplineQueue<'_>>,
    pointer: usize,
    progress: &Progress,
) -> bool {
    match queue {
        Some(queue) => queue
            .remaining(pointer)
            .iter()
            .all(|queued| progress.is_goal_completed(&queued.goal.id)),
        None => true,
    }
}

/// True when every expanded item of the cycle has no remaining work.
///
/// `exam_pending` answers whether an exam still has to be taken; it must
/// return false for exams that are unknown or already attempted.
pub fn is_cycle_exhausted<'a>(
    items: &[ConcreteItem<'a>],
    queues: &HashMap<&'a str, DisciplineQueue<'a>>,
    pointers: &HashMap<&'a str, usize>,
    progress: &Progress,
    exam_pending: impl Fn(&str) -> bool,
) -> bool {
    items.iter().all(|item| match item {
        ConcreteItem::Exam { exam_id } => !exam_pending(exam_id),
        ConcreteItem::Discipline { discipline_id, .. } => is_discipline_exhausted(
            queues.get(discipline_id),
            pointers.get(discipline_id).copied().unwrap_or(0),
            progress,
        ),
    })
}
