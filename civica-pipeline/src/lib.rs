//! # civica-pipeline
//!
//! The multi-stage retrieval-augmented orchestration pipeline. Takes one
//! user utterance plus profile context, classifies intent, optionally
//! retrieves candidate program records by vector similarity, and always
//! produces a non-empty reply — every remote failure is absorbed at the
//! stage where it occurs.

pub mod eligibility;
pub mod engine;
pub mod retrieve;
pub mod router;
pub mod synthesize;

pub use engine::{route, AdvisoryEngine, NextStage, Responded, Retrieved, Routed};
