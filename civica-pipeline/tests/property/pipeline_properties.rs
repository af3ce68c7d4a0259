//! Property coverage for the always-answer invariant: whatever the user
//! says and whichever providers are down, the engine returns a non-empty
//! reply and never panics.

use proptest::prelude::*;

use civica_core::config::PipelineConfig;
use civica_core::models::UserContext;
use civica_core::traits::{IEmbeddingProvider, ITextGenerator, IVectorIndex};
use civica_pipeline::AdvisoryEngine;
use test_fixtures::{
    seeded_index, FailingEmbedder, FailingGenerator, FailingIndex, HashEmbedder, ScriptedGenerator,
};

fn scripted_generator(decision: &str) -> ScriptedGenerator {
    // Classification, rewrite, synthesis, plus slack for degraded paths.
    ScriptedGenerator::new()
        .push_ok(decision.to_string())
        .push_ok("rewritten query")
        .push_ok("Here is a program suggestion for you.")
        .push_ok("Here is a program suggestion for you.")
}

fn decision_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(r#"{"next_action": "retrieve"}"#.to_string()),
        Just(r#"{"next_action": "respond"}"#.to_string()),
        Just(r#"{"next_action": "end"}"#.to_string()),
        Just(r#"{"next_action": "escalate_to_human"}"#.to_string()),
        Just("not json".to_string()),
        Just(String::new()),
    ]
}

proptest! {
    #[test]
    fn always_answers(
        message in ".{0,120}",
        decision in decision_strategy(),
        generator_down in any::<bool>(),
        embedder_down in any::<bool>(),
        index_down in any::<bool>(),
        age in proptest::option::of(0u32..120),
    ) {
        let generator: Box<dyn ITextGenerator> = if generator_down {
            Box::new(FailingGenerator)
        } else {
            Box::new(scripted_generator(&decision))
        };
        let hash_embedder = HashEmbedder::new(8);
        let embedder: &dyn IEmbeddingProvider = if embedder_down {
            &FailingEmbedder
        } else {
            &hash_embedder
        };
        let seeded = seeded_index(&HashEmbedder::new(8));
        let index: &dyn IVectorIndex = if index_down { &FailingIndex } else { &seeded };

        let user_context = UserContext { age, ..Default::default() };
        let engine = AdvisoryEngine::new(
            generator.as_ref(),
            embedder,
            index,
            PipelineConfig::default(),
        );

        let outcome = engine.process_turn(&message, user_context);

        prop_assert!(!outcome.reply.trim().is_empty());
        prop_assert!(!outcome.trace.is_empty());
    }

    #[test]
    fn candidate_count_never_exceeds_top_k(top_k in 1usize..10) {
        let generator = scripted_generator(r#"{"next_action": "retrieve"}"#);
        let embedder = HashEmbedder::new(8);
        let index = seeded_index(&embedder);
        let config = PipelineConfig { top_k, ..Default::default() };
        let engine = AdvisoryEngine::new(&generator, &embedder, &index, config);

        let outcome = engine.process_turn("recommend programs", UserContext::default());
        let hits = outcome
            .trace
            .iter()
            .find(|e| e.action == "search_completed")
            .and_then(|e| e.detail["hits"].as_u64())
            .unwrap_or(0);
        prop_assert!(hits as usize <= top_k);
    }
}
