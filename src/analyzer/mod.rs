//! Performance Analyzer
//!
//! Folds a learner's study history into per-concept performance records and
//! classifies every concept as weak, needs-review, or strong.
//!
//! Matching between history entries and concepts is a case-insensitive
//! substring test in both directions. A history entry whose topic is a
//! substring of several concept names (or vice versa) updates all of them;
//! this mirrors the grading contract and is intentionally not disambiguated.
//!
//! Unseen concepts keep a neutral prior (`averageScore = 0.5`, zero
//! attempts) and land in the needs-review bucket, never in weak or strong.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    Concept, UserModel, HISTORY_CORRECT_THRESHOLD, NEUTRAL_PRIOR, STRONG_MASTERY_CUTOFF,
    WEAK_ATTEMPTS_GATE, WEAK_MASTERY_CUTOFF, WEAK_REVIEW_CUTOFF,
};

// ==================== Data Structures ====================

/// Accumulated performance for one concept, rebuilt on every call
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub attempts: u32,
    pub correct: u32,
    /// Running average weighted toward recent attempts
    pub average_score: f64,
    /// Timestamp of the latest matching history entry (epoch millis)
    pub last_attempt: Option<i64>,
    /// Difficulty of the concept this record tracks
    pub difficulty: u8,
}

impl PerformanceRecord {
    fn neutral(difficulty: u8) -> Self {
        Self {
            attempts: 0,
            correct: 0,
            average_score: NEUTRAL_PRIOR,
            last_attempt: None,
            difficulty,
        }
    }

    /// Fraction of correct attempts, or the neutral prior with no data
    pub fn mastery_level(&self) -> f64 {
        if self.attempts > 0 {
            f64::from(self.correct) / f64::from(self.attempts)
        } else {
            NEUTRAL_PRIOR
        }
    }
}

/// A concept together with its record and mastery level
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptStanding {
    pub concept: Concept,
    pub performance: PerformanceRecord,
    pub mastery_level: f64,
}

/// Classification output: three disjoint buckets plus the proficiency mean
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    /// Sorted ascending by mastery (weakest first)
    pub weaknesses: Vec<ConceptStanding>,
    /// Sorted ascending by mastery
    pub needs_review: Vec<ConceptStanding>,
    /// Sorted descending by mastery (strongest first)
    pub strengths: Vec<ConceptStanding>,
    /// Mean mastery across all concepts, neutral priors included
    pub overall_proficiency: f64,
}

// ==================== Analysis ====================

/// Classify every concept from the learner's history.
pub fn analyze_performance(user: &UserModel, concepts: &[Concept]) -> PerformanceAnalysis {
    let mut records: HashMap<String, PerformanceRecord> = concepts
        .iter()
        .map(|c| (c.concept.clone(), PerformanceRecord::neutral(c.difficulty)))
        .collect();

    for entry in &user.learning_history {
        let topic_lower = entry.topic.to_lowercase();
        for concept in concepts {
            let name_lower = concept.concept.to_lowercase();
            if !name_lower.contains(&topic_lower) && !topic_lower.contains(&name_lower) {
                continue;
            }
            if let Some(record) = records.get_mut(&concept.concept) {
                record.attempts += 1;
                if entry.performance >= HISTORY_CORRECT_THRESHOLD {
                    record.correct += 1;
                }
                record.average_score = (record.average_score + entry.performance) / 2.0;
                record.last_attempt = Some(entry.timestamp);
            }
        }
    }

    let mut weaknesses = Vec::new();
    let mut needs_review = Vec::new();
    let mut strengths = Vec::new();
    let mut mastery_sum = 0.0;

    for concept in concepts {
        let record = records
            .remove(&concept.concept)
            .unwrap_or_else(|| PerformanceRecord::neutral(concept.difficulty));
        let mastery = record.mastery_level();
        mastery_sum += mastery;

        let standing = ConceptStanding {
            concept: concept.clone(),
            performance: record,
            mastery_level: mastery,
        };

        if mastery < WEAK_MASTERY_CUTOFF
            || (standing.performance.attempts > WEAK_ATTEMPTS_GATE && mastery < WEAK_REVIEW_CUTOFF)
        {
            weaknesses.push(standing);
        } else if mastery >= STRONG_MASTERY_CUTOFF {
            strengths.push(standing);
        } else {
            needs_review.push(standing);
        }
    }

    sort_by_mastery(&mut weaknesses, false);
    sort_by_mastery(&mut needs_review, false);
    sort_by_mastery(&mut strengths, true);

    let overall_proficiency = if concepts.is_empty() {
        NEUTRAL_PRIOR
    } else {
        mastery_sum / concepts.len() as f64
    };

    PerformanceAnalysis {
        weaknesses,
        needs_review,
        strengths,
        overall_proficiency,
    }
}

fn sort_by_mastery(standings: &mut [ConceptStanding], descending: bool) {
    standings.sort_by(|a, b| {
        let ord = a
            .mastery_level
            .partial_cmp(&b.mastery_level)
            .unwrap_or(Ordering::Equal);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

// ==================== Tests ====================
