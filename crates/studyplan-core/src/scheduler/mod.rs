//! Study-plan scheduler.
//!
//! Walks a plan's cycles day by day and fills each available day of the
//! routine with goals (or a single exam) until the day's minutes run out:
//! - Discipline queues are flattened once per run, with one pointer each
//! - Cycle and item cursors carry over between days, so a visit cut short by
//!   the budget resumes on the next available day
//! - Completed goals and attempted exams are skipped, never scheduled
//! - The first item of a day is always placed, even if it overruns the budget
//!
//! The scheduler is a pure function of its [`ScheduleRequest`]: no I/O, and
//! all cursor state lives inside one [`StudyScheduler::build_agenda`] call.

mod agenda;
mod cycle;
mod queue;

pub use agenda::{Agenda, ScheduledContent, ScheduledItem};
pub use cycle::{expand_items, is_cycle_exhausted, is_discipline_exhausted, ConcreteItem};
pub use queue::{build_queues, DisciplineQueue, QueuedGoal};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use crate::duration::{resolve_minutes, DurationRule, DurationTable, LearnerLevel};
use crate::exam::{Exam, DEFAULT_MINUTES_PER_QUESTION};
use crate::plan::{CycleSystem, Plan};
use crate::progress::Progress;
use crate::routine::Routine;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of calendar days to plan, starting at the start date
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Allocation steps allowed per day before the day is truncated
    #[serde(default = "default_max_steps_per_day")]
    pub max_steps_per_day: u32,
    /// An exam that is not the first item of the day needs more than this
    #[serde(default = "default_exam_min_remaining_minutes")]
    pub exam_min_remaining_minutes: u32,
    #[serde(default = "default_minutes_per_question")]
    pub minutes_per_question: u32,
}

fn default_horizon_days() -> u32 {
    90
}
fn default_max_steps_per_day() -> u32 {
    500
}
fn default_exam_min_remaining_minutes() -> u32 {
    60
}
fn default_minutes_per_question() -> u32 {
    DEFAULT_MINUTES_PER_QUESTION
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            max_steps_per_day: default_max_steps_per_day(),
            exam_min_remaining_minutes: default_exam_min_remaining_minutes(),
            minutes_per_question: default_minutes_per_question(),
        }
    }
}

/// Inputs of one scheduling run. All snapshots are read-only.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleRequest<'a> {
    pub plan: &'a Plan,
    pub routine: &'a Routine,
    pub start_date: NaiveDate,
    pub progress: &'a Progress,
    pub exams: &'a [Exam],
    pub level: LearnerLevel,
    pub paused: bool,
}

impl<'a> ScheduleRequest<'a> {
    pub fn new(
        plan: &'a Plan,
        routine: &'a Routine,
        start_date: NaiveDate,
        progress: &'a Progress,
    ) -> Self {
        Self {
            plan,
            routine,
            start_date,
            progress,
            exams: &[],
            level: LearnerLevel::default(),
            paused: false,
        }
    }

    pub fn with_exams(mut self, exams: &'a [Exam]) -> Self {
        self.exams = exams;
        self
    }

    pub fn with_level(mut self, level: LearnerLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }
}

/// Builds study agendas from plans.
pub struct StudyScheduler<R = DurationTable> {
    config: SchedulerConfig,
    rule: R,
}

impl StudyScheduler {
    /// Create a new scheduler with default config and duration table
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            rule: DurationTable::default(),
        }
    }
}

impl Default for StudyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DurationRule> StudyScheduler<R> {
    /// Replace the duration rule.
    pub fn with_rule<T: DurationRule>(self, rule: T) -> StudyScheduler<T> {
        StudyScheduler {
            config: self.config,
            rule,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Produce the agenda for the configured horizon.
    ///
    /// Returns an empty agenda when the plan is paused, has no cycles, or the
    /// routine has no available weekday.
    pub fn build_agenda(&self, request: &ScheduleRequest<'_>) -> Agenda {
        let mut agenda = Agenda::new();
        if request.paused {
            debug!(plan = %request.plan.id, "plan is paused, nothing to schedule");
            return agenda;
        }
        if request.plan.cycles.is_empty() {
            debug!(plan = %request.plan.id, "plan has no cycles");
            return agenda;
        }
        if !request.routine.has_availability() {
            debug!(plan = %request.plan.id, "routine has no available day");
            return agenda;
        }

        let mut run = Run::new(&self.config, &self.rule, *request);
        run.skip_exhausted_cycles();

        for offset in 0..self.config.horizon_days {
            if run.finished {
                break;
            }
            let Some(date) = request
                .start_date
                .checked_add_days(Days::new(u64::from(offset)))
            else {
                break;
            };
            let available = request.routine.minutes_for(date.weekday());
            if available == 0 {
                continue;
            }
            let items = run.allocate_day(date, available);
            agenda.insert_day(date, items);
        }

        debug!(
            plan = %request.plan.id,
            days = agenda.len(),
            minutes = agenda.total_minutes(),
            "agenda built"
        );
        agenda
    }
}

/// Cursor state carried across days.
#[derive(Debug, Clone, Default)]
struct Cursor<'a> {
    cycle_index: usize,
    item_index: usize,
    pointers: HashMap<&'a str, usize>,
}

/// Working budget of the day being filled.
struct Day {
    date: NaiveDate,
    remaining: i64,
    items: Vec<ScheduledItem>,
}

impl Day {
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

enum Step {
    /// Keep allocating; `progressed` is false when no item was placed and no
    /// pointer moved
    Continue { progressed: bool },
    EndOfDay,
}

enum VisitEnd {
    Drained,
    TargetMet,
    OutOfTime,
}

struct Run<'s, 'a, R> {
    config: &'s SchedulerConfig,
    rule: &'s R,
    request: ScheduleRequest<'a>,
    queues: HashMap<&'a str, DisciplineQueue<'a>>,
    exams: HashMap<&'a str, &'a Exam>,
    cycles: Vec<Vec<ConcreteItem<'a>>>,
    cursor: Cursor<'a>,
    /// Distinct cursor positions; more idle steps than this means a loop
    position_count: usize,
    finished: bool,
}

impl<'s, 'a, R: DurationRule> Run<'s, 'a, R> {
    fn new(config: &'s SchedulerConfig, rule: &'s R, request: ScheduleRequest<'a>) -> Self {
        let plan = request.plan;
        let cycles: Vec<_> = plan
            .cycles
            .iter()
            .map(|cycle| expand_items(plan, cycle))
            .collect();
        let position_count = cycles.iter().map(|items| items.len() + 1).sum::<usize>() + 1;

        let mut exams = HashMap::with_capacity(request.exams.len());
        for exam in request.exams {
            exams.entry(exam.id.as_str()).or_insert(exam);
        }

        Self {
            config,
            rule,
            request,
            queues: build_queues(plan),
            exams,
            cycles,
            cursor: Cursor::default(),
            position_count,
            finished: false,
        }
    }

    fn exam_pending(&self, exam_id: &str) -> bool {
        self.exams.contains_key(exam_id) && !self.request.progress.has_attempt(exam_id)
    }

    fn cycle_exhausted(&self, cycle_index: usize) -> bool {
        self.cycles.get(cycle_index).map_or(true, |items| {
            is_cycle_exhausted(
                items,
                &self.queues,
                &self.cursor.pointers,
                self.request.progress,
                |id| self.exam_pending(id),
            )
        })
    }

    /// Continuous plans start at the first cycle that still has work.
    fn skip_exhausted_cycles(&mut self) {
        if self.request.plan.cycle_system != CycleSystem::Continuous {
            return;
        }
        while self.cursor.cycle_index < self.cycles.len()
            && self.cycle_exhausted(self.cursor.cycle_index)
        {
            self.cursor.cycle_index += 1;
        }
        if self.cursor.cycle_index > 0 {
            debug!(skipped = self.cursor.cycle_index, "skipped exhausted cycles");
        }
    }

    fn allocate_day(&mut self, date: NaiveDate, available: u32) -> Vec<ScheduledItem> {
        let mut day = Day {
            date,
            remaining: i64::from(available),
            items: Vec::new(),
        };
        let mut steps = 0;
        let mut idle_steps = 0;

        while !self.finished && day.remaining > 0 {
            if steps >= self.config.max_steps_per_day {
                warn!(
                    %date,
                    steps,
                    cycle = self.cursor.cycle_index,
                    item = self.cursor.item_index,
                    "daily step limit reached, truncating the day; check the plan's cycles"
                );
                break;
            }
            steps += 1;

            match self.step(&mut day) {
                Step::Continue { progressed: true } => idle_steps = 0,
                Step::Continue { progressed: false } => {
                    idle_steps += 1;
                    if idle_steps > self.position_count {
                        debug!(%date, "no cycle item has work left, ending the run");
                        self.finished = true;
                    }
                }
                Step::EndOfDay => break,
            }
        }

        debug!(%date, items = day.items.len(), remaining = day.remaining, "day allocated");
        day.items
    }

    fn step(&mut self, day: &mut Day) -> Step {
        let rotating = self.request.plan.cycle_system == CycleSystem::Rotating;

        if self.cursor.cycle_index >= self.cycles.len() {
            if !rotating {
                debug!("all cycles exhausted, plan complete");
                self.finished = true;
                return Step::EndOfDay;
            }
            self.cursor.cycle_index = 0;
            self.cursor.item_index = 0;
        }

        let cycle_index = self.cursor.cycle_index;
        let item_count = self.cycles[cycle_index].len();
        if self.cursor.item_index >= item_count {
            if rotating || self.cycle_exhausted(cycle_index) {
                self.cursor.cycle_index += 1;
            }
            self.cursor.item_index = 0;
            return Step::Continue { progressed: false };
        }

        let item = self.cycles[cycle_index][self.cursor.item_index];
        match item {
            ConcreteItem::Exam { exam_id } => self.visit_exam(exam_id, day),
            ConcreteItem::Discipline {
                discipline_id,
                subjects_per_visit,
            } => self.visit_discipline(discipline_id, subjects_per_visit, day),
        }
    }

    fn visit_exam(&mut self, exam_id: &'a str, day: &mut Day) -> Step {
        let exam = match self.exams.get(exam_id) {
            Some(exam) if !self.request.progress.has_attempt(exam_id) => *exam,
            _ => {
                self.cursor.item_index += 1;
                return Step::Continue { progressed: false };
            }
        };

        let room_left = day.remaining > i64::from(self.config.exam_min_remaining_minutes);
        if !day.is_empty() && !room_left {
            return Step::EndOfDay;
        }

        let duration = u32::try_from(day.remaining).unwrap_or(0);
        let cycle_id = &self.request.plan.cycles[self.cursor.cycle_index].id;
        trace!(date = %day.date, exam = exam_id, duration, "exam placed");
        day.items.push(ScheduledItem::exam(
            day.date,
            cycle_id,
            exam,
            duration,
            exam.estimated_minutes(self.config.minutes_per_question),
        ));
        day.remaining = 0;
        self.cursor.item_index += 1;
        Step::Continue { progressed: true }
    }

    /// Advance one discipline by up to `subjects_per_visit` distinct subjects.
    ///
    /// Consecutive goals of the same subject count once toward the target.
    fn visit_discipline(
        &mut self,
        discipline_id: &'a str,
        subjects_per_visit: u32,
        day: &mut Day,
    ) -> Step {
        let target = subjects_per_visit.max(1);
        let Some(queue) = self.queues.get(discipline_id) else {
            self.cursor.item_index += 1;
            return Step::Continue { progressed: false };
        };
        let progress = self.request.progress;
        let cycle_id = &self.request.plan.cycles[self.cursor.cycle_index].id;
        let pointer = self.cursor.pointers.entry(discipline_id).or_insert(0);

        let mut subjects_advanced = 0;
        let mut last_subject: Option<&'a str> = None;
        let mut progressed = false;

        let end = loop {
            let Some(queued) = queue.get(*pointer).copied() else {
                break VisitEnd::Drained;
            };
            if progress.is_goal_completed(&queued.goal.id) {
                *pointer += 1;
                progressed = true;
                continue;
            }

            let subject: &'a str = &queued.subject.id;
            let new_subject = last_subject != Some(subject);
            if new_subject && subjects_advanced >= target {
                break VisitEnd::TargetMet;
            }

            let minutes = resolve_minutes(self.rule, queued.goal, self.request.level);
            if day.remaining < i64::from(minutes) && !day.is_empty() {
                break VisitEnd::OutOfTime;
            }

            trace!(
                date = %day.date,
                discipline = discipline_id,
                goal = %queued.goal.id,
                minutes,
                "goal placed"
            );
            day.items.push(ScheduledItem::goal(
                day.date,
                cycle_id,
                queued.goal,
                (queued.discipline.id.as_str(), queued.discipline.name.as_str()),
                (queued.subject.id.as_str(), queued.subject.name.as_str()),
                minutes,
            ));
            day.remaining -= i64::from(minutes);
            *pointer += 1;
            progressed = true;
            if new_subject {
                subjects_advanced += 1;
                last_subject = Some(subject);
            }
        };

        match end {
            VisitEnd::Drained | VisitEnd::TargetMet => {
                self.cursor.item_index += 1;
                Step::Continue { progressed }
            }
            VisitEnd::OutOfTime => Step::EndOfDay,
        }
    }
}
