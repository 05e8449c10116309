use pretty_assertions::assert_eq;
use vocab_graph::DependencyGraphBuilder;
use vocab_model::{CefrLevel, VocabularyCollection, VocabularyRecord};
use vocab_progression::{LearningUnitScheduler, ProgressionError, ProgressionProfile};

const CORE_SKILLS: [&str; 6] = [
    "essential_vocabulary",
    "basic_grammar",
    "listening_comprehension",
    "speaking_practice",
    "reading_skills",
    "writing_ability",
];

fn tagged(term: &str, level: CefrLevel, tags: &[&str]) -> VocabularyRecord {
    VocabularyRecord::new(term, "", level).with_tags(tags.iter().copied())
}

fn greeting_dataset() -> Vec<VocabularyRecord> {
    vec![
        tagged("здравей", CefrLevel::A1, &["greeting"]),
        tagged("добро утро", CefrLevel::A1, &["greeting"]),
        tagged("довиждане", CefrLevel::A1, &["greeting"]),
        tagged("чао", CefrLevel::A1, &["greeting"]),
        tagged("добре дошли", CefrLevel::A2, &["greeting"]),
        tagged("приятно ми е", CefrLevel::A2, &["greeting"]),
        tagged("честито", CefrLevel::A2, &["greeting"]),
    ]
}

#[test]
fn greeting_units_are_ordered_by_level_dependency() {
    let records = greeting_dataset();
    let path = LearningUnitScheduler::default()
        .optimize(&records)
        .expect("acyclic dataset");

    let ids: Vec<&str> = path.units.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["A1:greeting", "A2:greeting"]);

    let a1 = path.unit("A1:greeting").unwrap();
    let a2 = path.unit("A2:greeting").unwrap();
    assert_eq!(a1.terms.len(), 4);
    assert_eq!(a2.terms.len(), 3);
    assert!(a1.prerequisites.is_empty());
    for term in a1.taught_terms() {
        assert!(a2.prerequisites.contains(term), "missing prerequisite {term}");
    }
    assert!(path.position("A1:greeting") < path.position("A2:greeting"));
}

#[test]
fn input_order_does_not_flip_dependency_direction() {
    let mut records = greeting_dataset();
    records.reverse();
    let path = LearningUnitScheduler::default().optimize(&records).unwrap();
    let ids: Vec<&str> = path.units.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["A1:greeting", "A2:greeting"]);
}

#[test]
fn total_duration_is_thirty_minutes_per_unit() {
    let mut records = greeting_dataset();
    records.extend([
        tagged("хляб", CefrLevel::A1, &["food"]),
        tagged("сирене", CefrLevel::A1, &["food"]),
        tagged("вода", CefrLevel::A1, &["food"]),
    ]);
    let path = LearningUnitScheduler::default().optimize(&records).unwrap();
    assert_eq!(path.units.len(), 3);
    assert_eq!(path.total_minutes, 30 * 3);
    assert_eq!(path.review_schedule.len(), 3);
}

#[test]
fn empty_vocabulary_yields_core_skills_only() {
    let collection = VocabularyCollection::from_slice(br#"{"vocabulary": []}"#).unwrap();
    let graph = DependencyGraphBuilder::new().build(collection.records());
    let path = LearningUnitScheduler::default()
        .schedule(collection.records(), &graph)
        .unwrap();

    assert!(path.units.is_empty());
    assert_eq!(path.total_minutes, 0);
    assert!(path.review_schedule.is_empty());
    assert_eq!(path.skill_order, CORE_SKILLS.to_vec());
}

#[test]
fn mutually_dependent_units_fail_with_both_ids() {
    let records = vec![
        tagged("x1", CefrLevel::A1, &["x"]).with_related_forms(["y1"]),
        tagged("x2", CefrLevel::A1, &["x"]),
        tagged("x3", CefrLevel::A1, &["x"]),
        tagged("y1", CefrLevel::A1, &["y"]).with_related_forms(["x1"]),
        tagged("y2", CefrLevel::A1, &["y"]),
        tagged("y3", CefrLevel::A1, &["y"]),
    ];
    let err = LearningUnitScheduler::default()
        .optimize(&records)
        .expect_err("units x and y need each other");

    assert!(matches!(err, ProgressionError::CyclicDependency { .. }));
    let mut members: Vec<&str> = err.cycle_units().iter().map(String::as_str).collect();
    members.sort_unstable();
    assert_eq!(members, vec!["A1:x", "A1:y"]);

    let message = err.to_string();
    assert!(message.contains("A1:x") && message.contains("A1:y"), "{message}");
}

#[test]
fn group_of_two_never_becomes_a_unit() {
    let records = vec![
        tagged("a", CefrLevel::B1, &["work"]),
        tagged("b", CefrLevel::B1, &["work"]),
    ];
    let path = LearningUnitScheduler::default().optimize(&records).unwrap();
    assert!(path.units.is_empty());

    let mut records = records;
    records.push(tagged("c", CefrLevel::B1, &["work"]));
    let path = LearningUnitScheduler::default().optimize(&records).unwrap();
    assert_eq!(path.units.len(), 1);
}

#[test]
fn repeated_tag_does_not_inflate_group_size() {
    let mut a = tagged("a", CefrLevel::A1, &["pair"]);
    a.tags.extend(["pair".to_string(), "pair".to_string()]);
    let records = vec![a, tagged("b", CefrLevel::A1, &["pair"])];

    let path = LearningUnitScheduler::default().optimize(&records).unwrap();
    assert!(path.units.is_empty());
    assert_eq!(path.total_minutes, 0);
}

#[test]
fn explicit_empty_tag_list_joins_fallback_focus() {
    let collection = VocabularyCollection::from_slice(
        r#"[
            {"bg": "и", "level": "A1", "tags": []},
            {"bg": "но", "level": "A1", "tags": []},
            {"bg": "или", "level": "A1"}
        ]"#
        .as_bytes(),
    )
    .unwrap();
    let path = LearningUnitScheduler::default()
        .optimize(collection.records())
        .unwrap();

    let ids: Vec<&str> = path.units.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["A1:general"]);
    assert_eq!(path.units[0].terms.len(), 3);
}

#[test]
fn oversized_unit_minutes_are_rejected_before_scheduling() {
    let err = ProgressionProfile::from_bytes(
        "huge",
        br#"{"unit_minutes": 4000000000}"#,
        Some("default"),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("unit_minutes"));
}

#[test]
fn skill_order_appends_mastery_per_focus_area() {
    let mut records = greeting_dataset();
    records.extend([
        tagged("хляб", CefrLevel::A1, &["food"]),
        tagged("сирене", CefrLevel::A1, &["food"]),
        tagged("вода", CefrLevel::A1, &["food"]),
    ]);
    let path = LearningUnitScheduler::default().optimize(&records).unwrap();

    let mut expected: Vec<String> = CORE_SKILLS.iter().map(|s| s.to_string()).collect();
    expected.push("food_mastery".to_string());
    expected.push("greeting_mastery".to_string());
    assert_eq!(path.skill_order, expected);
}

#[test]
fn custom_profile_changes_sizes_and_offsets() {
    let profile = ProgressionProfile::from_bytes(
        "weekly",
        br#"{"min_unit_terms": 2, "unit_minutes": 45, "review_days": [2, 9]}"#,
        Some("default"),
    )
    .unwrap();
    let records = vec![
        tagged("a", CefrLevel::A1, &["pair"]),
        tagged("b", CefrLevel::A1, &["pair"]),
    ];
    let path = LearningUnitScheduler::new(profile).optimize(&records).unwrap();
    assert_eq!(path.profile, "weekly");
    assert_eq!(path.total_minutes, 45);
    let days: Vec<u32> = path.review_schedule[0]
        .checkpoints
        .iter()
        .map(|c| c.day)
        .collect();
    assert_eq!(days, vec![2, 9]);
}

#[test]
fn export_document_carries_learning_path() {
    let path = LearningUnitScheduler::default()
        .optimize(&greeting_dataset())
        .unwrap();
    let export = serde_json::to_value(path.to_export().unwrap()).unwrap();
    let learning_path = &export["learning_path"];

    assert_eq!(learning_path["total_duration"], 60);
    assert_eq!(learning_path["units"][0]["level"], "A1");
    assert_eq!(learning_path["units"][0]["focus_area"], "greeting");
    assert_eq!(learning_path["units"][0]["estimated_time"], 30);
    assert_eq!(learning_path["units"][1]["prerequisites"].as_array().unwrap().len(), 4);
    assert_eq!(learning_path["units"][0]["terms"][0]["bg"], "здравей");
    for (unit, doc) in path.units.iter().zip(learning_path["units"].as_array().unwrap()) {
        assert_eq!(doc["terms"].as_array().unwrap().len(), unit.terms.len());
    }
    assert_eq!(
        learning_path["review_schedule"][0]["checkpoints"][3]["label"],
        "day_14"
    );
    assert_eq!(learning_path["skill_building_order"][6], "greeting_mastery");
}
