//! Adaptive Feedback Generator
//!
//! Derives study recommendations from a graded quiz and the learner's
//! performance analysis. Accuracy here is the fraction of fully-correct
//! answers per concept or question type; the 70%/80% cutoffs are
//! deliberately independent of the analyzer's mastery thresholds.
//!
//! Purely derived and stateless: no randomness, no side effects.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analyzer::PerformanceAnalysis;
use crate::types::{Question, QuestionType, QuizGrade};

// ==================== Constants ====================

/// Concepts below this accuracy become improvement areas
const IMPROVEMENT_CUTOFF: f64 = 0.7;

/// Concepts at or above this accuracy count as strengths
const STRENGTH_CUTOFF: f64 = 0.8;

/// Below this accuracy a remediation recommendation is high priority
const HIGH_PRIORITY_CUTOFF: f64 = 0.4;

// ==================== Data Structures ====================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Remediation,
    Advancement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One actionable study recommendation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub concept: String,
    pub priority: Priority,
    pub reason: String,
    pub action: String,
}

/// Accuracy over the quiz for one concept
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConceptAccuracy {
    pub concept: String,
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
}

/// Accuracy over the quiz for one question format
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAccuracy {
    pub question_type: QuestionType,
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
}

/// Running per-skill performance for progress tracking. Skills are
/// lowercased concept names; scores are partial-credit fractions in quiz
/// order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkillProgress {
    pub skill: String,
    pub scores: Vec<f64>,
    pub average: f64,
}

/// Full feedback payload for the presentation layer
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    /// Concepts below the improvement cutoff, weakest first
    pub improvement_areas: Vec<ConceptAccuracy>,
    /// Concepts at or above the strength cutoff, strongest first
    pub strengths: Vec<ConceptAccuracy>,
    /// Per-format accuracy in the canonical type order
    pub type_breakdown: Vec<TypeAccuracy>,
    pub recommendations: Vec<Recommendation>,
    pub skill_progress: Vec<SkillProgress>,
}

// ==================== Generation ====================

/// Build feedback from a graded quiz. `questions` supplies the per-result
/// question types; results are matched positionally.
pub fn generate_feedback(
    questions: &[Question],
    grade: &QuizGrade,
    analysis: &PerformanceAnalysis,
) -> FeedbackReport {
    let mut by_concept: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    let mut by_type: BTreeMap<&'static str, (u32, u32)> = BTreeMap::new();
    let mut by_skill: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for (index, result) in grade.results.iter().enumerate() {
        let concept_counts = by_concept.entry(result.concept_tested.clone()).or_default();
        concept_counts.1 += 1;
        if result.is_correct {
            concept_counts.0 += 1;
        }

        if let Some(question) = questions.get(index) {
            let type_counts = by_type.entry(question.question_type.as_str()).or_default();
            type_counts.1 += 1;
            if result.is_correct {
                type_counts.0 += 1;
            }
        }

        by_skill
            .entry(result.concept_tested.to_lowercase())
            .or_default()
            .push(result.partial_score / 100.0);
    }

    let mut improvement_areas = Vec::new();
    let mut strengths = Vec::new();
    for (concept, (correct, total)) in &by_concept {
        let accuracy = f64::from(*correct) / f64::from((*total).max(1));
        let entry = ConceptAccuracy {
            concept: concept.clone(),
            correct: *correct,
            total: *total,
            accuracy,
        };
        if accuracy < IMPROVEMENT_CUTOFF {
            improvement_areas.push(entry);
        } else if accuracy >= STRENGTH_CUTOFF {
            strengths.push(entry);
        }
    }
    improvement_areas.sort_by(|a, b| {
        a.accuracy
            .partial_cmp(&b.accuracy)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    strengths.sort_by(|a, b| {
        b.accuracy
            .partial_cmp(&a.accuracy)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let type_breakdown = QuestionType::ALL
        .iter()
        .filter_map(|qt| {
            by_type.get(qt.as_str()).map(|(correct, total)| TypeAccuracy {
                question_type: *qt,
                correct: *correct,
                total: *total,
                accuracy: f64::from(*correct) / f64::from((*total).max(1)),
            })
        })
        .collect();

    let recommendations = build_recommendations(&improvement_areas, &strengths, analysis);

    let skill_progress = by_skill
        .into_iter()
        .map(|(skill, scores)| {
            let average = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            };
            SkillProgress {
                skill,
                scores,
                average,
            }
        })
        .collect();

    FeedbackReport {
        improvement_areas,
        strengths,
        type_breakdown,
        recommendations,
        skill_progress,
    }
}

/// Remediation records for improvement areas, advancement records for
/// strengths. Tracked weak areas from the learner model sharpen the reason
/// and force high priority.
fn build_recommendations(
    improvement_areas: &[ConceptAccuracy],
    strengths: &[ConceptAccuracy],
    analysis: &PerformanceAnalysis,
) -> Vec<Recommendation> {
    let tracked_weak: HashSet<&str> = analysis
        .weaknesses
        .iter()
        .map(|s| s.concept.concept.as_str())
        .collect();

    let mut recommendations = Vec::new();

    for area in improvement_areas {
        let persistent = tracked_weak.contains(area.concept.as_str());
        let priority = if persistent || area.accuracy < HIGH_PRIORITY_CUTOFF {
            Priority::High
        } else {
            Priority::Medium
        };
        let reason = if persistent {
            format!(
                "Accuracy on {} was {:.0}% this quiz and it is a tracked weak area.",
                area.concept,
                area.accuracy * 100.0
            )
        } else {
            format!(
                "Accuracy on {} was {:.0}% this quiz.",
                area.concept,
                area.accuracy * 100.0
            )
        };
        recommendations.push(Recommendation {
            recommendation_type: RecommendationType::Remediation,
            concept: area.concept.clone(),
            priority,
            reason,
            action: format!(
                "Reread the material on {} and retake a focused quiz.",
                area.concept
            ),
        });
    }

    for strength in strengths {
        recommendations.push(Recommendation {
            recommendation_type: RecommendationType::Advancement,
            concept: strength.concept.clone(),
            priority: Priority::Low,
            reason: format!(
                "Accuracy on {} was {:.0}% this quiz.",
                strength.concept,
                strength.accuracy * 100.0
            ),
            action: format!(
                "Move on to harder questions that build on {}.",
                strength.concept
            ),
        });
    }

    recommendations
}

// ==================== Tests ====================
