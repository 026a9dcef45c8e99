use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};

use skillpath::engine::{Engine, ProgressionEvent, ProgressionRules};
use skillpath::{GraphIndex, LearnerState, MasteryLevel, Skill};

fn engine_ab() -> Engine {
    let index = GraphIndex::build(vec![
        Skill::new("a", "Active Listening").with_estimated_time("45 min"),
        Skill::new("b", "Giving Feedback")
            .with_prerequisites(["a"])
            .with_estimated_time("1-2 hours"),
    ])
    .unwrap();
    Engine::new(index, ProgressionRules::default())
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
}

fn assess(engine: &Engine, state: &LearnerState, id: &str, level: MasteryLevel) -> LearnerState {
    engine
        .apply(
            state,
            &ProgressionEvent::MasteryAssessed {
                skill_id: id.to_string(),
                level,
                confidence: 75,
            },
            now(),
        )
        .state
}

#[test]
fn recommend_unlocks_dependent_after_practice() {
    let engine = engine_ab();
    let state = LearnerState::new("learner");

    let first: Vec<_> = engine.recommend(&state, 5).into_iter().map(|r| r.skill_id).collect();
    assert_eq!(first, vec!["a"]);

    let practiced = assess(&engine, &state, "a", MasteryLevel::Practiced);
    let next: Vec<_> = engine
        .recommend(&practiced, 5)
        .into_iter()
        .map(|r| r.skill_id)
        .collect();
    assert!(next.contains(&"b".to_string()));
}

#[test]
fn pathway_to_goal_sums_time() {
    let engine = engine_ab();
    let pathway = engine.synthesize(&LearnerState::new("learner"), "b").unwrap();

    assert_eq!(pathway.skill_ids(), vec!["a", "b"]);
    // 45 minutes plus the upper bound of "1-2 hours"
    assert_eq!(pathway.total_time, Duration::from_secs(45 * 60 + 2 * 3600));
}

#[test]
fn pathway_unknown_goal_is_none() {
    let engine = engine_ab();
    assert!(engine.synthesize(&LearnerState::new("learner"), "c").is_none());
}

#[test]
fn first_scenario_completion_is_idempotent() {
    let engine = engine_ab();
    let event = ProgressionEvent::ScenarioCompleted {
        scenario_id: "s1".to_string(),
    };
    let state = LearnerState::new("learner");

    let once = engine.apply(&state, &event, now());
    assert_eq!(once.experience_gained(), 50 + 25);
    assert_eq!(
        once.state.badges().iter().filter(|b| b.id == "first-scenario").count(),
        1
    );

    let twice = engine.apply(&once.state, &event, now());
    assert!(twice.is_noop());
    assert_eq!(twice.state, once.state);
}

#[test]
fn streak_extends_from_yesterday_once_per_day() {
    let engine = engine_ab();
    let yesterday = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let state = engine
        .apply(
            &LearnerState::new("learner"),
            &ProgressionEvent::StreakTick { today: yesterday },
            now(),
        )
        .state;
    let previous = state.streak().current;

    let ticked = engine
        .apply(&state, &ProgressionEvent::StreakTick { today }, now())
        .state;
    assert_eq!(ticked.streak().current, previous + 1);

    let again = engine.apply(&ticked, &ProgressionEvent::StreakTick { today }, now());
    assert!(again.is_noop());
    assert_eq!(again.state.streak().current, previous + 1);
}

#[test]
fn streak_crosses_month_boundary() {
    let engine = engine_ab();
    let mut state = LearnerState::new("learner");
    for (month, day) in [(2, 28), (2, 29), (3, 1)] {
        let today = NaiveDate::from_ymd_opt(2024, month, day).unwrap();
        state = engine
            .apply(&state, &ProgressionEvent::StreakTick { today }, now())
            .state;
    }
    assert_eq!(state.streak().current, 3);
    assert!(state.has_badge("streak-3"));
}

#[test]
fn goals_steer_recommendations() {
    let index = GraphIndex::build(vec![
        Skill::new("budgeting", "Budgeting"),
        Skill::new("coaching", "Coaching"),
        Skill::new("delegation", "Delegation").with_prerequisites(["coaching"]),
    ])
    .unwrap();
    let engine = Engine::new(index, ProgressionRules::default());
    let state = LearnerState::new("learner").with_goals(["delegation"]);

    let recs = engine.recommend(&state, 1);
    assert_eq!(recs[0].skill_id, "coaching");
    assert_eq!(recs[0].reasons[0], "required for your goal: Delegation");
}
