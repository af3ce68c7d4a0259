//! End-to-end pipeline runs over fake providers: one engine, scripted
//! generation outcomes, seeded in-memory index.

use civica_core::config::PipelineConfig;
use civica_core::constants::RETRIEVAL_PASSES_PER_TURN;
use civica_core::models::{TraceStage, Turn, UserContext};
use civica_pipeline::synthesize::fallback::CLOSING_REPLY;
use civica_pipeline::AdvisoryEngine;
use test_fixtures::{FailingGenerator, FailingIndex, HashEmbedder, ScriptedGenerator};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("civica_pipeline=debug")
        .try_init();
}

fn profile() -> UserContext {
    UserContext {
        age: Some(25),
        region: Some("Seoul".to_string()),
        employment_status: Some("job seeker".to_string()),
        ..Default::default()
    }
}

#[test]
fn retrieve_path_recommends_a_program() {
    init_tracing();
    // Calls in order: classification, query rewrite, synthesis.
    let generator = ScriptedGenerator::new()
        .push_ok(r#"{"next_action": "retrieve", "reasoning": "asks for programs"}"#)
        .push_ok("youth savings account Seoul age 25")
        .push_ok("The Youth Savings Match fits you: Seoul residents aged 19-34 qualify.");
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&embedder);
    let engine = AdvisoryEngine::new(&generator, &embedder, &index, PipelineConfig::default());

    let outcome = engine.process_turn("I'm 25 and want to start saving. Any programs?", profile());

    assert!(outcome.reply.contains("Youth Savings Match"));
    assert!(outcome.failure.is_none());
    assert_eq!(generator.call_count(), 3);
    let retrieval_passes = outcome
        .trace
        .iter()
        .filter(|e| e.stage == TraceStage::Retriever)
        .count();
    assert_eq!(retrieval_passes, RETRIEVAL_PASSES_PER_TURN);
    // Engine start, router, retriever, synthesizer.
    let stages: Vec<TraceStage> = outcome.trace.iter().map(|e| e.stage).collect();
    assert_eq!(
        stages,
        vec![
            TraceStage::Engine,
            TraceStage::Router,
            TraceStage::Retriever,
            TraceStage::Synthesizer,
        ]
    );
}

#[test]
fn retrieval_caps_candidates_at_top_k() {
    let generator = ScriptedGenerator::new()
        .push_ok(r#"{"next_action": "retrieve"}"#)
        .push_ok("savings")
        .push_ok("Here are some options.");
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&embedder);
    let config = PipelineConfig {
        top_k: 2,
        ..Default::default()
    };
    let engine = AdvisoryEngine::new(&generator, &embedder, &index, config);

    let outcome = engine.process_turn("recommend savings programs", profile());
    let retriever_entry = outcome
        .trace
        .iter()
        .find(|e| e.stage == TraceStage::Retriever)
        .expect("retriever ran");
    assert_eq!(retriever_entry.detail["hits"], 2);
}

#[test]
fn farewell_short_circuits_to_canned_closing() {
    let generator = ScriptedGenerator::new()
        .push_ok(r#"{"next_action": "end", "reasoning": "user is done"}"#);
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&HashEmbedder::new(8));
    let engine = AdvisoryEngine::new(&generator, &embedder, &index, PipelineConfig::default());

    let outcome = engine.process_turn("thanks, bye!", profile());

    assert_eq!(outcome.reply, CLOSING_REPLY);
    assert!(outcome.failure.is_none());
    // Only the classification call; retrieval and synthesis never run.
    assert_eq!(generator.call_count(), 1);
    assert_eq!(embedder.call_count(), 0);
}

#[test]
fn index_outage_still_answers() {
    let generator = ScriptedGenerator::new()
        .push_ok(r#"{"next_action": "retrieve"}"#)
        .push_ok("savings Seoul")
        .push_ok("I couldn't find matching programs right now; try broadening the request.");
    let embedder = HashEmbedder::new(8);
    let engine =
        AdvisoryEngine::new(&generator, &embedder, &FailingIndex, PipelineConfig::default());

    let outcome = engine.process_turn("recommend a savings program", profile());

    assert!(!outcome.reply.is_empty());
    // The retrieval error is surfaced as a diagnostic, not a failure reply.
    assert!(outcome.failure.as_deref().unwrap().starts_with("retrieval:"));
    let retriever_entry = outcome
        .trace
        .iter()
        .find(|e| e.stage == TraceStage::Retriever)
        .expect("retriever ran");
    assert_eq!(retriever_entry.action, "search_failed");
}

#[test]
fn index_and_generation_outage_yields_the_empty_template() {
    let generator = ScriptedGenerator::new()
        .push_ok(r#"{"next_action": "retrieve"}"#)
        .push_ok("savings Seoul")
        .push_err("upstream 503");
    let embedder = HashEmbedder::new(8);
    let engine =
        AdvisoryEngine::new(&generator, &embedder, &FailingIndex, PipelineConfig::default());

    let outcome = engine.process_turn("recommend a savings program", profile());

    assert_eq!(
        outcome.reply,
        civica_pipeline::synthesize::fallback::without_candidates()
    );
    assert!(outcome.failure.is_some());
}

#[test]
fn synthesis_outage_after_retrieval_names_the_top_candidate() {
    let generator = ScriptedGenerator::new()
        .push_ok(r#"{"next_action": "retrieve"}"#)
        .push_ok("youth savings")
        .push_err("upstream 503");
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&embedder);
    let engine = AdvisoryEngine::new(&generator, &embedder, &index, PipelineConfig::default());

    let outcome = engine.process_turn("youth savings match seoul", profile());

    // Deterministic fallback names the closest retrieved program.
    assert!(
        outcome.reply.contains("Youth Savings Match")
            || outcome.reply.contains("Student Scholarship Fund")
            || outcome.reply.contains("First Home Deposit Loan")
    );
    assert!(outcome.failure.as_deref().unwrap().starts_with("synthesis:"));
}

#[test]
fn total_provider_outage_still_answers() {
    init_tracing();
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&embedder);
    let engine =
        AdvisoryEngine::new(&FailingGenerator, &embedder, &index, PipelineConfig::default());

    let outcome = engine.process_turn("recommend a program", profile());

    // Classification failure degrades to respond; synthesis failure
    // degrades to the empty-candidates template.
    assert!(!outcome.reply.is_empty());
    assert!(outcome
        .failure
        .as_deref()
        .unwrap()
        .starts_with("intent classification:"));
}

#[test]
fn empty_history_closes_without_provider_calls() {
    let generator = ScriptedGenerator::new();
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&HashEmbedder::new(8));
    let engine = AdvisoryEngine::new(&generator, &embedder, &index, PipelineConfig::default());

    let outcome = engine.process_history(Vec::new(), UserContext::default());

    assert_eq!(outcome.reply, CLOSING_REPLY);
    assert_eq!(generator.call_count(), 0);
    assert_eq!(embedder.call_count(), 0);
}

#[test]
fn trailing_assistant_turn_closes_without_provider_calls() {
    let generator = ScriptedGenerator::new();
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&embedder);
    let engine = AdvisoryEngine::new(&generator, &embedder, &index, PipelineConfig::default());

    let history = vec![Turn::user("hello"), Turn::assistant("hi, how can I help?")];
    let outcome = engine.process_history(history, UserContext::default());

    assert_eq!(outcome.reply, CLOSING_REPLY);
    assert_eq!(generator.call_count(), 0);
}

#[test]
fn conversational_path_skips_retrieval() {
    let generator = ScriptedGenerator::new()
        .push_ok(r#"{"next_action": "respond", "reasoning": "smalltalk"}"#)
        .push_ok("I help you find government support programs. Ask away!");
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&HashEmbedder::new(8));
    let engine = AdvisoryEngine::new(&generator, &embedder, &index, PipelineConfig::default());

    let outcome = engine.process_turn("what can you do?", profile());

    assert!(outcome.reply.contains("support programs"));
    assert_eq!(embedder.call_count(), 0);
    assert!(outcome
        .trace
        .iter()
        .all(|e| e.stage != TraceStage::Retriever));
}

#[test]
fn malformed_classification_degrades_to_respond() {
    let generator = ScriptedGenerator::new()
        .push_ok("Sure! I think the user wants program recommendations.")
        .push_ok("Let me know which programs interest you.");
    let embedder = HashEmbedder::new(8);
    let index = test_fixtures::seeded_index(&HashEmbedder::new(8));
    let engine = AdvisoryEngine::new(&generator, &embedder, &index, PipelineConfig::default());

    let outcome = engine.process_turn("recommend something", profile());

    assert!(!outcome.reply.is_empty());
    assert!(outcome
        .failure
        .as_deref()
        .unwrap()
        .starts_with("intent classification:"));
    // No retrieval on the degraded path.
    assert_eq!(embedder.call_count(), 0);
}
