//! In-memory fakes for the three provider contracts, plus seed program
//! records. Used by tests across crates to exercise the pipeline without
//! network access.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use civica_core::errors::{CivicaResult, ProviderError};
use civica_core::models::{ProgramRecord, SearchHit, Turn};
use civica_core::traits::{IEmbeddingProvider, ITextGenerator, IVectorIndex, SimilarityMetric};

/// A generation fake that replays a scripted sequence of outcomes.
///
/// Each call pops the front of the script: `Ok` yields that text, `Err`
/// yields a transport error with that message. An exhausted script fails,
/// which keeps tests honest about how many calls a path makes.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push_ok(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .push_back(Ok(text.into()));
        self
    }

    pub fn push_err(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .push_back(Err(message.into()));
        self
    }

    /// How many generation calls were made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ITextGenerator for ScriptedGenerator {
    fn generate(&self, _system_instruction: &str, _turns: &[Turn]) -> CivicaResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().expect("script lock").pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ProviderError::Transport {
                provider: "scripted-generator".to_string(),
                message,
            }
            .into()),
            None => Err(ProviderError::Transport {
                provider: "scripted-generator".to_string(),
                message: "script exhausted: unexpected generation call".to_string(),
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "scripted-generator"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// A generator that fails every call with a timeout.
pub struct FailingGenerator;

impl ITextGenerator for FailingGenerator {
    fn generate(&self, _system_instruction: &str, _turns: &[Turn]) -> CivicaResult<String> {
        Err(ProviderError::Timeout {
            provider: "failing-generator".to_string(),
            timeout_secs: 30,
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing-generator"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Deterministic embedder: folds bytes into a small fixed-dimension
/// vector. Similar strings do not embed similarly; tests that care about
/// neighbor ordering should seed `InMemoryIndex` with explicit vectors.
pub struct HashEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IEmbeddingProvider for HashEmbedder {
    fn embed(&self, text: &str) -> CivicaResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % self.dimensions] += f32::from(byte) / 255.0;
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hash-embedder"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// An embedder that fails every call.
pub struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> CivicaResult<Vec<f32>> {
        Err(ProviderError::QuotaExhausted {
            provider: "failing-embedder".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "failing-embedder"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// In-memory cosine-distance index over seeded records.
///
/// Reports raw scores as cosine distances (`metric() == Cosine`), so
/// tests exercise the `1 − d` normalization path. Ties keep insertion
/// order via stable sort.
pub struct InMemoryIndex {
    entries: Vec<(ProgramRecord, Vec<f32>)>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, record: ProgramRecord, embedding: Vec<f32>) {
        self.entries.push((record, embedding));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

impl IVectorIndex for InMemoryIndex {
    fn search(&self, query_vector: &[f32], top_k: usize) -> CivicaResult<Vec<SearchHit>> {
        let mut scored: Vec<(f64, &ProgramRecord)> = self
            .entries
            .iter()
            .map(|(record, embedding)| (cosine_distance(query_vector, embedding), record))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(distance, record)| SearchHit {
                record_id: record.id.clone(),
                raw_score: distance,
                payload: record.clone(),
            })
            .collect())
    }

    fn metric(&self) -> SimilarityMetric {
        SimilarityMetric::Cosine
    }

    fn name(&self) -> &str {
        "in-memory-index"
    }
}

/// An index that fails every search with a timeout.
pub struct FailingIndex;

impl IVectorIndex for FailingIndex {
    fn search(&self, _query_vector: &[f32], _top_k: usize) -> CivicaResult<Vec<SearchHit>> {
        Err(ProviderError::Timeout {
            provider: "failing-index".to_string(),
            timeout_secs: 30,
        }
        .into())
    }

    fn metric(&self) -> SimilarityMetric {
        SimilarityMetric::Cosine
    }

    fn name(&self) -> &str {
        "failing-index"
    }
}

/// Three seed program records covering distinct categories and regions.
pub fn seed_records() -> Vec<ProgramRecord> {
    vec![
        ProgramRecord {
            id: "PRG-001".to_string(),
            title: "Youth Savings Match".to_string(),
            description: "Matched savings account for young adults building an emergency fund. \
                          The government matches monthly deposits up to a capped amount."
                .to_string(),
            category: "finance".to_string(),
            region: "Seoul".to_string(),
            eligibility_age_min: Some(19),
            eligibility_age_max: Some(34),
            eligibility_regions: vec!["Seoul".to_string()],
            application_url: "https://programs.example/youth-savings".to_string(),
        },
        ProgramRecord {
            id: "PRG-002".to_string(),
            title: "Student Scholarship Fund".to_string(),
            description: "Tuition assistance for enrolled university students with demonstrated \
                          financial need."
                .to_string(),
            category: "education".to_string(),
            region: "nationwide".to_string(),
            eligibility_age_min: Some(18),
            eligibility_age_max: Some(29),
            eligibility_regions: vec![],
            application_url: "https://programs.example/scholarship".to_string(),
        },
        ProgramRecord {
            id: "PRG-003".to_string(),
            title: "First Home Deposit Loan".to_string(),
            description: "Low-interest deposit loan for first-time renters and buyers.".to_string(),
            category: "housing".to_string(),
            region: "Busan".to_string(),
            eligibility_age_min: Some(19),
            eligibility_age_max: Some(39),
            eligibility_regions: vec!["Busan".to_string()],
            application_url: "https://programs.example/home-deposit".to_string(),
        },
    ]
}

/// Build an index whose entries were embedded with the given embedder,
/// so queries embedded the same way land on plausible neighbors.
pub fn seeded_index(embedder: &dyn IEmbeddingProvider) -> InMemoryIndex {
    let mut index = InMemoryIndex::new();
    for record in seed_records() {
        let text = format!("{} {}", record.title, record.description);
        let embedding = embedder.embed(&text).expect("fixture embedding");
        index.insert(record, embedding);
    }
    index
}
