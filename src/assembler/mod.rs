//! Quiz Assembler
//!
//! Orchestrates the analyzer, the distributor, and the generators into a
//! finished quiz. Two modes:
//!
//! - **Flat** (`generate_quiz`): round-robins question type and concept
//!   across the requested slots, ignoring performance data.
//! - **Adaptive** (`generate_adaptive_quiz`): classifies the learner's
//!   history, allocates weakness-first, generates per-category question
//!   cycles, then globally shuffles and re-sequences ids before attaching
//!   target difficulty, estimated time, and remediation level.
//!
//! Slots whose generator declines (malformed concept) are skipped, so a
//! returned quiz may be shorter than requested. Categories with empty
//! concept pools contribute nothing; there is no backfill.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::analyzer::{analyze_performance, ConceptStanding, PerformanceAnalysis};
use crate::distribution::allocate_questions;
use crate::generators;
use crate::text::excerpt;
use crate::types::{difficulty_label, Focus, Question, QuestionType, Topic, UserModel};

/// Question-type cycle for weakness remediation
const WEAK_TYPES: [QuestionType; 4] = [
    QuestionType::MultipleChoice,
    QuestionType::TrueFalse,
    QuestionType::FillBlank,
    QuestionType::ShortAnswer,
];

/// Question-type cycle for advancement
const ADVANCEMENT_TYPES: [QuestionType; 3] = [
    QuestionType::Explain,
    QuestionType::MultipleChoice,
    QuestionType::ShortAnswer,
];

// ==================== Engine ====================

/// Quiz generation engine owning the randomness source.
///
/// All shuffles, template draws, and coin flips go through the engine's
/// `ChaCha8Rng`, so `with_seed` makes generation fully reproducible.
pub struct QuizEngine {
    rng: ChaCha8Rng,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEngine {
    /// Create an engine seeded from system time.
    pub fn new() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Create an engine with a fixed seed (for reproducible generation).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Flat mode: cycle question type and concept round-robin across
    /// `question_count` slots, ignoring performance data.
    pub fn generate_quiz(&mut self, topic: &Topic, question_count: usize) -> Vec<Question> {
        if topic.concepts.is_empty() || question_count == 0 {
            return Vec::new();
        }

        let mut questions = Vec::with_capacity(question_count);
        for slot in 0..question_count {
            let question_type = QuestionType::ALL[slot % QuestionType::ALL.len()];
            let concept = &topic.concepts[slot % topic.concepts.len()];
            if let Some(question) = generators::generate(
                question_type,
                concept,
                &topic.concepts,
                &topic.name,
                &mut self.rng,
            ) {
                questions.push(question);
            }
        }

        assign_ids(&mut questions);
        debug!(
            topic = %topic.name,
            requested = question_count,
            generated = questions.len(),
            "flat quiz assembled"
        );
        questions
    }

    /// Adaptive mode: analyzer → distributor → per-category generation →
    /// global shuffle → re-id → post-shuffle metadata.
    pub fn generate_adaptive_quiz(
        &mut self,
        topic: &Topic,
        user: &UserModel,
        question_count: usize,
    ) -> Vec<Question> {
        if topic.concepts.is_empty() || question_count == 0 {
            return Vec::new();
        }

        let analysis = analyze_performance(user, &topic.concepts);
        let allocation = allocate_questions(&analysis, question_count);
        debug!(
            topic = %topic.name,
            weakness = allocation.weakness,
            review = allocation.review,
            advancement = allocation.advancement,
            proficiency = analysis.overall_proficiency,
            "adaptive allocation"
        );

        let mut questions = Vec::with_capacity(question_count);
        questions.extend(self.category_questions(
            topic,
            &analysis.weaknesses,
            &WEAK_TYPES,
            allocation.weakness,
            Focus::WeaknessRemediation,
        ));
        questions.extend(self.category_questions(
            topic,
            &analysis.needs_review,
            &QuestionType::ALL,
            allocation.review,
            Focus::Review,
        ));
        questions.extend(self.category_questions(
            topic,
            &analysis.strengths,
            &ADVANCEMENT_TYPES,
            allocation.advancement,
            Focus::Advancement,
        ));

        questions.shuffle(&mut self.rng);
        assign_ids(&mut questions);
        attach_adaptive_metadata(&mut questions, &analysis);

        debug!(
            topic = %topic.name,
            requested = question_count,
            generated = questions.len(),
            "adaptive quiz assembled"
        );
        questions
    }

    /// Generate `count` questions for one category, cycling both the
    /// concept pool and the type cycle. An empty pool yields nothing.
    fn category_questions(
        &mut self,
        topic: &Topic,
        pool: &[ConceptStanding],
        cycle: &[QuestionType],
        count: usize,
        focus: Focus,
    ) -> Vec<Question> {
        if pool.is_empty() {
            return Vec::new();
        }

        let mut questions = Vec::with_capacity(count);
        for slot in 0..count {
            let standing = &pool[slot % pool.len()];
            let question_type = cycle[slot % cycle.len()];
            if let Some(mut question) = generators::generate(
                question_type,
                &standing.concept,
                &topic.concepts,
                &topic.name,
                &mut self.rng,
            ) {
                question.focus = Some(focus);
                question.concept_difficulty =
                    Some(difficulty_label(standing.concept.difficulty).to_string());
                if focus == Focus::WeaknessRemediation {
                    question.hints = Some(weakness_hints(standing));
                }
                questions.push(question);
            }
        }
        questions
    }
}

// ==================== Post-Shuffle Metadata ====================

/// Sequential ids `q_1..q_n` in final order.
fn assign_ids(questions: &mut [Question]) {
    for (index, question) in questions.iter_mut().enumerate() {
        question.id = format!("q_{}", index + 1);
    }
}

/// Attach target difficulty, estimated time, and remediation level. Target
/// difficulty keys off the weakest/first entry of each bucket: one below for
/// weaknesses (floor 1), as-is for review, one above for strengths (cap 5).
fn attach_adaptive_metadata(questions: &mut [Question], analysis: &PerformanceAnalysis) {
    let weakness_target = analysis
        .weaknesses
        .first()
        .map(|s| s.concept.difficulty.saturating_sub(1).max(1));
    let review_target = analysis.needs_review.first().map(|s| s.concept.difficulty);
    let advancement_target = analysis
        .strengths
        .first()
        .map(|s| (s.concept.difficulty + 1).min(5));

    for question in questions {
        let Some(focus) = question.focus else { continue };
        question.target_difficulty = match focus {
            Focus::WeaknessRemediation => weakness_target,
            Focus::Review => review_target,
            Focus::Advancement => advancement_target,
        };
        question.estimated_time = Some(question.question_type.estimated_time_secs());
        question.remediation_level = Some(focus.remediation_level());
    }
}

/// Study hints scaled to mastery severity: everyone gets the definition
/// pointer; near-zero mastery also gets the key idea spelled out.
fn weakness_hints(standing: &ConceptStanding) -> Vec<String> {
    let mut hints = vec![format!(
        "Revisit the definition of {}.",
        standing.concept.concept
    )];
    if standing.mastery_level < 0.2 {
        hints.push(format!(
            "Key idea: {}",
            excerpt(&standing.concept.definition, 80)
        ));
        hints.push("Break the definition into parts and restate each in your own words.".to_string());
    } else {
        hints.push("Compare this concept with the ones you already know well.".to_string());
    }
    hints
}

// ==================== Tests ====================
