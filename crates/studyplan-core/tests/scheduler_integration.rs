//! Integration tests for the study-plan scheduler.

use chrono::{Days, NaiveDate, Weekday};
use studyplan_core::{
    Cycle, CycleItem, CycleSystem, Discipline, Exam, ExamAttempt, Folder, Goal, GoalType,
    LearnerLevel, Plan, Progress, Routine, ScheduleRequest, StudyScheduler, Subject,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    monday() + Days::new(offset)
}

fn thirty_minutes(_: &Goal, _: LearnerLevel) -> u32 {
    30
}

fn single_subject(id: &str, name: &str, goal_ids: &[&str]) -> Discipline {
    Discipline {
        id: id.into(),
        name: name.into(),
        folder_id: None,
        subjects: vec![Subject {
            id: format!("{id}-1"),
            name: format!("{name} I"),
            goals: goal_ids
                .iter()
                .map(|g| Goal::new(*g, GoalType::Lesson, format!("Aula {g}")))
                .collect(),
        }],
    }
}

fn plan_with(disciplines: Vec<Discipline>, cycles: Vec<Vec<CycleItem>>, system: CycleSystem) -> Plan {
    Plan {
        id: "plano".into(),
        name: "Plano de estudos".into(),
        disciplines,
        folders: vec![],
        cycles: cycles
            .into_iter()
            .enumerate()
            .map(|(i, items)| Cycle {
                id: format!("c{i}"),
                name: format!("Ciclo {}", i + 1),
                items,
            })
            .collect(),
        cycle_system: system,
    }
}

fn matematica_plan() -> Plan {
    plan_with(
        vec![single_subject("mat", "Matemática", &["m1", "m2", "m3"])],
        vec![vec![CycleItem::discipline("mat", 1)]],
        CycleSystem::Continuous,
    )
}

fn ids_on(agenda: &studyplan_core::Agenda, date: NaiveDate) -> Vec<&str> {
    agenda
        .items_on(date)
        .iter()
        .map(|i| i.goal_id().or(i.exam_id()).unwrap_or_default())
        .collect()
}

#[test]
fn test_matematica_scenario() {
    let plan = matematica_plan();
    let routine = Routine::default().with_day(Weekday::Mon, 60);
    let progress = Progress::new();
    let scheduler = StudyScheduler::new().with_rule(thirty_minutes);

    let agenda = scheduler.build_agenda(&ScheduleRequest::new(&plan, &routine, monday(), &progress));

    assert_eq!(ids_on(&agenda, day(0)), vec!["m1", "m2"]);
    assert_eq!(ids_on(&agenda, day(7)), vec!["m3"]);
    assert_eq!(agenda.len(), 2);

    let first = &agenda.items_on(day(0))[0];
    assert_eq!(first.discipline_name(), Some("Matemática"));
    assert_eq!(first.subject_name(), Some("Matemática I"));
    assert_eq!(first.duration_minutes, 30);
    assert_eq!(first.id, "2026-10-12:c0:mat:m1");
}

#[test]
fn test_agenda_is_deterministic() {
    let plan = matematica_plan();
    let routine = Routine::uniform(45);
    let progress = Progress::with_completed(["m2"]);
    let request = ScheduleRequest::new(&plan, &routine, monday(), &progress);
    let scheduler = StudyScheduler::new();

    assert_eq!(scheduler.build_agenda(&request), scheduler.build_agenda(&request));
}

#[test]
fn test_paused_plan_has_empty_agenda() {
    let plan = matematica_plan();
    let routine = Routine::uniform(240);
    let progress = Progress::new();
    let request = ScheduleRequest::new(&plan, &routine, monday(), &progress).with_paused(true);

    assert!(StudyScheduler::new().build_agenda(&request).is_empty());
}

#[test]
fn test_no_availability_has_empty_agenda() {
    let plan = matematica_plan();
    let routine = Routine::default();
    let progress = Progress::new();
    let request = ScheduleRequest::new(&plan, &routine, monday(), &progress);

    assert!(StudyScheduler::new().build_agenda(&request).is_empty());
}

#[test]
fn test_huge_daily_budget_still_schedules() {
    let plan = matematica_plan();
    let routine = Routine::default()
        .with_day(Weekday::Mon, u32::MAX)
        .with_day(Weekday::Tue, 1);
    let progress = Progress::new();
    let scheduler = StudyScheduler::new().with_rule(thirty_minutes);

    let agenda = scheduler.build_agenda(&ScheduleRequest::new(&plan, &routine, monday(), &progress));
    assert_eq!(ids_on(&agenda, day(0)), vec!["m1", "m2", "m3"]);
    assert_eq!(agenda.len(), 1);
}

#[test]
fn test_plan_without_cycles_has_empty_agenda() {
    let mut plan = matematica_plan();
    plan.cycles.clear();
    let routine = Routine::uniform(60);
    let progress = Progress::new();

    assert!(StudyScheduler::new()
        .build_agenda(&ScheduleRequest::new(&plan, &routine, monday(), &progress))
        .is_empty());
}

#[test]
fn test_completed_goals_are_never_scheduled() {
    let plan = matematica_plan();
    let routine = Routine::uniform(60);
    let progress = Progress::with_completed(["m1", "m3"]);
    let agenda = StudyScheduler::new()
        .with_rule(thirty_minutes)
        .build_agenda(&ScheduleRequest::new(&plan, &routine, monday(), &progress));

    let scheduled: Vec<_> = agenda.items().filter_map(|i| i.goal_id()).collect();
    assert_eq!(scheduled, vec!["m2"]);
}

#[test]
fn test_attempted_exam_is_never_scheduled() {
    let plan = plan_with(
        vec![single_subject("mat", "Matemática", &["m1"])],
        vec![vec![CycleItem::exam("sim1"), CycleItem::discipline("mat", 1)]],
        CycleSystem::Rotating,
    );
    let exams = vec![Exam::new("sim1", "Simulado 1", 40)];
    let routine = Routine::uniform(180);
    let mut progress = Progress::new();
    progress.record_attempt(ExamAttempt {
        id: "t1".into(),
        exam_id: "sim1".into(),
        outcome: None,
    });

    let request = ScheduleRequest::new(&plan, &routine, monday(), &progress).with_exams(&exams);
    let agenda = StudyScheduler::new().build_agenda(&request);
    assert!(agenda.items().all(|i| i.exam_id() != Some("sim1")));
    assert_eq!(ids_on(&agenda, day(0)), vec!["m1"]);
}

#[test]
fn test_pending_exam_monopolizes_its_day() {
    let plan = plan_with(
        vec![single_subject("mat", "Matemática", &["m1", "m2", "m3"])],
        vec![vec![CycleItem::exam("sim1"), CycleItem::discipline("mat", 1)]],
        CycleSystem::Continuous,
    );
    let exams = vec![Exam::new("sim1", "Simulado 1", 40)];
    let routine = Routine::uniform(60);
    let progress = Progress::new();
    let request = ScheduleRequest::new(&plan, &routine, monday(), &progress).with_exams(&exams);
    let agenda = StudyScheduler::new().with_rule(thirty_minutes).build_agenda(&request);

    let first_day = agenda.items_on(day(0));
    assert_eq!(first_day.len(), 1);
    assert!(first_day[0].is_exam());
    assert_eq!(first_day[0].duration_minutes, 60);
    for (_, items) in agenda.days() {
        if let Some(pos) = items.iter().position(|i| i.is_exam()) {
            assert_eq!(pos, items.len() - 1, "nothing is placed after an exam");
        }
    }
}

#[test]
fn test_first_item_always_fits() {
    let goals: Vec<String> = (0..120).map(|i| format!("g{i}")).collect();
    let goal_refs: Vec<&str> = goals.iter().map(String::as_str).collect();
    let plan = plan_with(
        vec![single_subject("dir", "Direito", &goal_refs)],
        vec![vec![CycleItem::discipline("dir", 1)]],
        CycleSystem::Continuous,
    );
    let routine = Routine::uniform(20);
    let progress = Progress::new();
    let agenda = StudyScheduler::new()
        .with_rule(thirty_minutes)
        .build_agenda(&ScheduleRequest::new(&plan, &routine, monday(), &progress));

    assert_eq!(agenda.len(), 90);
    for (_, items) in agenda.days() {
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].duration_minutes, 30);
    }
}

#[test]
fn test_horizon_is_ninety_days() {
    let goals: Vec<String> = (0..500).map(|i| format!("g{i}")).collect();
    let goal_refs: Vec<&str> = goals.iter().map(String::as_str).collect();
    let plan = plan_with(
        vec![single_subject("dir", "Direito", &goal_refs)],
        vec![vec![CycleItem::discipline("dir", 1)]],
        CycleSystem::Rotating,
    );
    let routine = Routine::uniform(60);
    let progress = Progress::new();
    let agenda = StudyScheduler::new()
        .build_agenda(&ScheduleRequest::new(&plan, &routine, monday(), &progress));

    let dates: Vec<_> = agenda.dates().collect();
    assert_eq!(dates.first(), Some(&monday()));
    assert_eq!(dates.last(), Some(&day(89)));
    assert!(dates.iter().all(|d| *d >= monday() && *d < day(90)));
}

#[test]
fn test_unavailable_days_are_omitted() {
    let plan = matematica_plan();
    let routine = Routine::default()
        .with_day(Weekday::Tue, 30)
        .with_day(Weekday::Thu, 30);
    let progress = Progress::new();
    let agenda = StudyScheduler::new()
        .with_rule(thirty_minutes)
        .build_agenda(&ScheduleRequest::new(&plan, &routine, monday(), &progress));

    assert_eq!(agenda.dates().collect::<Vec<_>>(), vec![day(1), day(3), day(8)]);
}

#[test]
fn test_exhausted_first_cycle_continuous_vs_rotating() {
    let disciplines = vec![
        single_subject("port", "Português", &["p1", "p2"]),
        single_subject("mat", "Matemática", &["m1", "m2", "m3"]),
    ];
    let cycles = vec![
        vec![CycleItem::discipline("port", 1)],
        vec![CycleItem::discipline("mat", 1)],
    ];
    let continuous = plan_with(disciplines.clone(), cycles.clone(), CycleSystem::Continuous);
    let rotating = plan_with(disciplines, cycles, CycleSystem::Rotating);
    let routine = Routine::uniform(60);
    let progress = Progress::with_completed(["p1", "p2"]);
    let scheduler = StudyScheduler::new().with_rule(thirty_minutes);

    let a = scheduler.build_agenda(&ScheduleRequest::new(&continuous, &routine, monday(), &progress));
    let b = scheduler.build_agenda(&ScheduleRequest::new(&rotating, &routine, monday(), &progress));

    for agenda in [&a, &b] {
        assert!(agenda.items().all(|i| i.cycle_id == "c1"));
        assert_eq!(ids_on(agenda, day(0)), vec!["m1", "m2"]);
        assert_eq!(ids_on(agenda, day(1)), vec!["m3"]);
    }
}

#[test]
fn test_folder_items_visit_member_disciplines_in_plan_order() {
    let mut fis = single_subject("fis", "Física", &["f1"]);
    fis.folder_id = Some("exatas".into());
    let mut mat = single_subject("mat", "Matemática", &["m1"]);
    mat.folder_id = Some("exatas".into());
    let port = single_subject("port", "Português", &["p1"]);

    let mut plan = plan_with(
        vec![mat, port, fis],
        vec![vec![CycleItem::folder("exatas", 1), CycleItem::discipline("port", 1)]],
        CycleSystem::Continuous,
    );
    plan.folders.push(Folder {
        id: "exatas".into(),
        name: "Exatas".into(),
    });
    let routine = Routine::uniform(90);
    let progress = Progress::new();
    let agenda = StudyScheduler::new()
        .with_rule(thirty_minutes)
        .build_agenda(&ScheduleRequest::new(&plan, &routine, monday(), &progress));

    assert_eq!(ids_on(&agenda, day(0)), vec!["m1", "f1", "p1"]);
}

#[test]
fn test_plan_loaded_from_json() {
    let plan: Plan = serde_json::from_str(
        r#"{
            "id": "p",
            "name": "Concurso",
            "cycle_system": "rotating",
            "disciplines": [
                {"id": "mat", "name": "Matemática", "subjects": [
                    {"id": "fr", "name": "Frações", "goals": [
                        {"id": "g1", "type": "lesson", "title": "Aula 1",
                         "sub_lessons": [{"id": "a", "title": "Parte 1", "duration_minutes": 20}]},
                        {"id": "g2", "type": "questions", "title": "Lista 1", "questions": 10}
                    ]}
                ]}
            ],
            "cycles": [{"id": "c1", "items": [{"type": "discipline", "discipline_id": "mat"}]}]
        }"#,
    )
    .unwrap();
    let routine: Routine = serde_json::from_str(r#"{"monday": 60}"#).unwrap();
    let progress = Progress::new();
    let request = ScheduleRequest::new(&plan, &routine, monday(), &progress)
        .with_level(LearnerLevel::Intermediate);
    let agenda = StudyScheduler::new().build_agenda(&request);

    // lesson: 20 min x 1.5 pace; questions: 10 x 3 min
    let minutes: Vec<_> = agenda.items_on(day(0)).iter().map(|i| i.duration_minutes).collect();
    assert_eq!(minutes, vec![30, 30]);
}
