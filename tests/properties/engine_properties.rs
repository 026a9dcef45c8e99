use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use skillpath::engine::{Engine, ProgressionEvent, ProgressionRules};
use skillpath::error::SkillpathError;
use skillpath::{GraphIndex, LearnerState, MasteryLevel, Skill, SkillLevel};

/// Acyclic catalog: skill `i` may only require skills `j < i`.
fn arb_dag(max: usize) -> impl Strategy<Value = Vec<Skill>> {
    (1..=max)
        .prop_flat_map(|n| {
            let edges = prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..3), n);
            let levels = prop::collection::vec(0..3_usize, n);
            (Just(n), edges, levels)
        })
        .prop_map(|(n, edges, levels)| {
            (0..n)
                .map(|i| {
                    let mut prereqs: Vec<String> = if i == 0 {
                        Vec::new()
                    } else {
                        edges[i].iter().map(|ix| skill_id(ix.index(i))).collect()
                    };
                    prereqs.sort();
                    prereqs.dedup();
                    Skill::new(skill_id(i), format!("Skill {i}"))
                        .with_level(SkillLevel::all()[levels[i]])
                        .with_prerequisites(prereqs)
                        .with_estimated_time(format!("{} min", 10 + i))
                })
                .collect()
        })
}

fn skill_id(i: usize) -> String {
    format!("s{i:03}")
}

fn arb_mastery() -> impl Strategy<Value = MasteryLevel> {
    prop_oneof![
        Just(MasteryLevel::Unseen),
        Just(MasteryLevel::InProgress),
        Just(MasteryLevel::Practiced),
        Just(MasteryLevel::Mastered),
    ]
}

fn at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// Engine plus a learner with random mastery over the catalog.
fn arb_world() -> impl Strategy<Value = (Engine, LearnerState)> {
    arb_dag(24)
        .prop_flat_map(|skills| {
            let n = skills.len();
            (
                Just(skills),
                prop::collection::vec(arb_mastery(), n),
                prop::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(|(skills, mastery, goals)| {
            let ids: Vec<String> = skills.iter().map(|s| s.id.clone()).collect();
            let engine = Engine::new(GraphIndex::build(skills).unwrap(), ProgressionRules::default());
            let goal_ids: Vec<String> = ids
                .iter()
                .zip(&goals)
                .filter(|&(_, &is_goal)| is_goal)
                .map(|(id, _)| id.clone())
                .collect();
            let events: Vec<ProgressionEvent> = ids
                .iter()
                .zip(mastery)
                .filter(|(_, level)| *level != MasteryLevel::Unseen)
                .map(|(id, level)| ProgressionEvent::MasteryAssessed {
                    skill_id: id.clone(),
                    level,
                    confidence: 60,
                })
                .collect();
            let state = engine
                .apply_all(&LearnerState::new("prop").with_goals(goal_ids), &events, at())
                .state;
            (engine, state)
        })
}

proptest! {
    #[test]
    fn back_edge_makes_catalog_cyclic(skills in arb_dag(16)) {
        // Making a prerequisite depend on its own dependent closes a cycle.
        let last = skills.len() - 1;
        let index = GraphIndex::build(skills.clone()).unwrap();
        let closure = index.prerequisite_closure(&skill_id(last)).unwrap();
        prop_assume!(!closure.is_empty());
        let target = closure.iter().next().unwrap().to_string();

        let mut skills = skills;
        let victim = skills.iter_mut().find(|s| s.id == target).unwrap();
        victim.prerequisites.push(skill_id(last));

        let is_cycle = matches!(
            GraphIndex::build(skills),
            Err(SkillpathError::CyclicPrerequisite { .. })
        );
        prop_assert!(is_cycle);
    }

    #[test]
    fn unknown_prerequisite_is_dangling(skills in arb_dag(16), pick in any::<prop::sample::Index>()) {
        let mut skills = skills;
        let i = pick.index(skills.len());
        skills[i].prerequisites.push("missing".to_string());
        let is_dangling = matches!(
            GraphIndex::build(skills),
            Err(SkillpathError::DanglingPrerequisite { .. })
        );
        prop_assert!(is_dangling);
    }

    #[test]
    fn recommendations_are_eligible_and_bounded((engine, state) in arb_world(), count in 0..10_usize) {
        let recs = engine.recommend(&state, count);
        prop_assert!(recs.len() <= count);

        let mut seen = std::collections::HashSet::new();
        for rec in &recs {
            prop_assert!(seen.insert(rec.skill_id.clone()));
            prop_assert!(!rec.reasons.is_empty());
            prop_assert!(state.mastery_level(&rec.skill_id) < MasteryLevel::Mastered);
            for prereq in engine.index().prerequisites(&rec.skill_id).unwrap() {
                prop_assert!(state.mastery_level(&prereq.id) >= MasteryLevel::Practiced);
            }
        }

        // Same inputs, same answer
        prop_assert_eq!(recs, engine.recommend(&state, count));
    }

    #[test]
    fn pathway_is_topological_and_deterministic(
        (engine, state) in arb_world(),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = engine.index();
        let goal = skill_id(pick.index(index.len()));
        let pathway = engine.synthesize(&state, &goal).unwrap();
        let ids = pathway.skill_ids();

        prop_assert!(!ids.is_empty());
        if state.mastery_level(&goal) < MasteryLevel::Practiced {
            prop_assert_eq!(ids.last().copied(), Some(goal.as_str()));
        }

        let position: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        prop_assert_eq!(position.len(), ids.len());

        for id in &ids {
            if *id != goal {
                prop_assert!(state.mastery_level(id) < MasteryLevel::Practiced);
            }
            for prereq in index.prerequisites(id).unwrap() {
                if let Some(&p) = position.get(prereq.id.as_str()) {
                    prop_assert!(p < position[id]);
                }
            }
        }

        prop_assert_eq!(&pathway, &engine.synthesize(&state, &goal).unwrap());
    }

    #[test]
    fn scenario_completion_is_idempotent(ids in prop::collection::vec("[a-z]{1,6}", 1..12)) {
        let engine = Engine::new(GraphIndex::build(Vec::new()).unwrap(), ProgressionRules::default());
        let events: Vec<ProgressionEvent> = ids
            .iter()
            .map(|id| ProgressionEvent::ScenarioCompleted { scenario_id: id.clone() })
            .collect();

        let once = engine.apply_all(&LearnerState::new("prop"), &events, at());
        let twice = engine.apply_all(&once.state, &events, at());

        prop_assert!(twice.is_noop());
        prop_assert_eq!(&twice.state, &once.state);

        let mut distinct = ids.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(once.state.completed_scenarios().len(), distinct.len());
    }

    #[test]
    fn consecutive_ticks_count_days(days in 1..60_i64) {
        let engine = Engine::new(GraphIndex::build(Vec::new()).unwrap(), ProgressionRules::default());
        let start = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let events: Vec<ProgressionEvent> = (0..days)
            .map(|offset| ProgressionEvent::StreakTick { today: start + chrono::Duration::days(offset) })
            .collect();

        let state = engine.apply_all(&LearnerState::new("prop"), &events, at()).state;
        let expected = u32::try_from(days).unwrap();
        prop_assert_eq!(state.streak().current, expected);
        prop_assert_eq!(state.streak().longest, expected);
        prop_assert_eq!(state.has_badge("streak-7"), days >= 7);
    }
}
