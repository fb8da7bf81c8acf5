//! End-to-end evaluation cycles through the public API

use chrono::{DateTime, Duration, FixedOffset};
use std::io::Write;

use engagement_agent::{EngagementEngine, IcpScorer, NudgeEngine};
use engagement_config::Settings;
use engagement_core::{
    BehaviorSnapshot, IcpScoringStrategy, IcpTier, NudgeHistory, ProfileInput, ResponseTier,
    TriggerType, UnlockedSet,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("engagement=debug")
        .with_test_writer()
        .try_init();
}

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

#[test]
fn test_ideal_profile_breakdown() {
    let profile = ProfileInput::parse(
        "15-50",
        "6-10",
        &["agency-cost", "scaling-problem"],
        "ecommerce",
    )
    .unwrap();

    let breakdown = IcpScorer::new().score(&profile);
    assert_eq!(breakdown.team_size_score, 30);
    assert_eq!(breakdown.channels_score, 25);
    assert_eq!(breakdown.pain_points_score, 25);
    assert_eq!(breakdown.industry_score, 20);
    assert_eq!(breakdown.total_score, 100);
    assert_eq!(breakdown.tier, IcpTier::Primary);

    let json = serde_json::to_value(&breakdown).unwrap();
    assert_eq!(json["tier"], "primary");
}

#[test]
fn test_unknown_band_rejected_at_boundary() {
    assert!(ProfileInput::parse("2-4", "6-10", &[], "ecommerce").is_err());
}

#[test]
fn test_calculator_prompt_eligibility() {
    let engine = NudgeEngine::new();
    let snapshot = BehaviorSnapshot {
        time_on_site_seconds: 150,
        calculator_completed: false,
        ..BehaviorSnapshot::new(at("2024-06-11T10:00:00+02:00"))
    }
    .with_module("content-engine")
    .with_module("ad-builder");

    let prompt = engine.trigger("calculator_prompt").unwrap();
    let completed = engine.trigger("calculator_completed").unwrap();
    assert!(engine.check_trigger(prompt, &snapshot, &NudgeHistory::new()).is_ok());
    assert!(engine.check_trigger(completed, &snapshot, &NudgeHistory::new()).is_err());
}

#[test]
fn test_session_walkthrough() {
    init_tracing();
    let engine = EngagementEngine::from_settings(&Settings::default()).unwrap();
    let start = at("2024-06-11T10:00:00+02:00");

    let mut history = NudgeHistory::new();
    let mut unlocked = UnlockedSet::new();

    // Minute 1: first module
    let snapshot = BehaviorSnapshot {
        time_on_site_seconds: 60,
        ..BehaviorSnapshot::new(start + Duration::minutes(1))
    }
    .with_module("content-engine");

    let outcome = engine.evaluate(None, &snapshot, &history, &unlocked);
    let nudge = outcome.nudge.clone().unwrap();
    assert_eq!(nudge.trigger_id, "first_module_viewed");
    assert_eq!(nudge.trigger_type, TriggerType::Milestone);
    history = engine.record_nudge_shown(&nudge, &history, snapshot.captured_at_utc());
    unlocked = outcome.unlocked;
    assert!(unlocked.contains("first_steps"));

    // Minute 3: second module, calculator prompt
    let snapshot = BehaviorSnapshot {
        time_on_site_seconds: 180,
        ..BehaviorSnapshot::new(start + Duration::minutes(3))
    }
    .with_module("content-engine")
    .with_module("ad-builder");

    let outcome = engine.evaluate(None, &snapshot, &history, &unlocked);
    let nudge = outcome.nudge.clone().unwrap();
    assert_eq!(nudge.trigger_id, "calculator_prompt");
    assert_eq!(outcome.next_action.unwrap().id, "open_calculator");
    history = engine.record_nudge_shown(&nudge, &history, snapshot.captured_at_utc());
    unlocked = outcome.unlocked;

    // Minute 5: same state, prompt still cooling down
    let snapshot = BehaviorSnapshot {
        time_on_site_seconds: 300,
        ..BehaviorSnapshot::new(start + Duration::minutes(5))
    }
    .with_module("content-engine")
    .with_module("ad-builder");
    let outcome = engine.evaluate(None, &snapshot, &history, &unlocked);
    assert_ne!(
        outcome.nudge.as_ref().map(|n| n.trigger_id.as_str()),
        Some("calculator_prompt")
    );

    // Minute 9: calculator done with a strong profile
    let profile = ProfileInput::parse("5-15", "6-10", &["agency-cost", "low-roi"], "saas").unwrap();
    let snapshot = BehaviorSnapshot {
        time_on_site_seconds: 540,
        calculator_completed: true,
        ..BehaviorSnapshot::new(start + Duration::minutes(9))
    }
    .with_module("content-engine")
    .with_module("ad-builder")
    .with_module("analytics");

    let outcome = engine.evaluate(Some(&profile), &snapshot, &history, &unlocked);
    assert_eq!(outcome.icp.as_ref().unwrap().total_score, 25 + 25 + 25 + 15);
    assert_eq!(outcome.nudge.unwrap().trigger_id, "calculator_completed");
    assert_eq!(outcome.next_action.unwrap().id, "schedule_demo");
    let new_ids: Vec<_> = outcome.new_achievements.iter().map(|a| a.id).collect();
    assert_eq!(new_ids, vec!["number_cruncher", "explorer", "perfect_fit"]);
    assert!(outcome.achievement_progress.total_points >= 185);
}

#[test]
fn test_pricing_question_direct_answer() {
    let engine = EngagementEngine::from_settings(&Settings::default()).unwrap();
    let snapshot = BehaviorSnapshot::new(at("2024-06-11T10:00:00+02:00"));

    let outcome = engine.answer("hoeveel kost het platform", &snapshot, 3);
    let matched = outcome.matched.unwrap();
    assert_eq!(matched.question_id, "pricing_cost");
    assert!(matched.confidence >= 0.5);
    assert_eq!(outcome.tier, ResponseTier::DirectAnswer);
}

#[test]
fn test_escalation_request() {
    let engine = EngagementEngine::from_settings(&Settings::default()).unwrap();
    let snapshot = BehaviorSnapshot::new(at("2024-06-11T10:00:00+02:00"));

    let outcome = engine.answer("Ik wil graag met iemand spreken", &snapshot, 3);
    assert_eq!(outcome.tier, ResponseTier::Escalation);
    assert!(!outcome.consult_llm);
}

#[test]
fn test_from_settings_with_custom_files() {
    let mut domain = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        domain,
        r#"
nudges:
  overrides:
    first_module_viewed:
      enabled: false
icp:
  thresholds:
    primary: 80
    secondary: 60
"#
    )
    .unwrap();

    let mut knowledge = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        knowledge,
        r#"
version: "test"
categories:
  - category: pricing
    entries:
      - id: only_entry
        question: "Wat kost het?"
        keywords: [kosten]
        answer: "Vanaf 499 euro per maand."
"#
    )
    .unwrap();

    let settings = Settings {
        domain_config_path: Some(domain.path().display().to_string()),
        knowledge_base_path: Some(knowledge.path().display().to_string()),
        ..Settings::default()
    };
    let engine = EngagementEngine::from_settings(&settings).unwrap();

    let snapshot = BehaviorSnapshot::new(at("2024-06-11T10:00:00+02:00")).with_module("analytics");
    let outcome = engine.evaluate(None, &snapshot, &NudgeHistory::new(), &UnlockedSet::new());
    assert!(outcome.nudge.is_none());

    let profile = ProfileInput::parse("15-50", "3-5", &["no-strategy"], "agency").unwrap();
    // 30 + 20 + 5 + 10 = 65: secondary under the raised thresholds
    assert_eq!(engine.score_profile(&profile).tier, IcpTier::Secondary);

    let answer = engine.answer("wat zijn de kosten", &snapshot, 0);
    assert_eq!(answer.matched.unwrap().question_id, "only_entry");
}

#[test]
fn test_from_settings_missing_knowledge_file() {
    let settings = Settings {
        knowledge_base_path: Some("/nonexistent/kb.yaml".to_string()),
        ..Settings::default()
    };
    assert!(EngagementEngine::from_settings(&settings).is_err());
}
