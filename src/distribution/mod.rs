//! Question Distributor
//!
//! Turns a performance classification and a target question count into a
//! weakness-first allocation across the three adaptive categories. The
//! three counts always sum exactly to the requested total; advancement
//! absorbs whatever the weakness and review categories leave behind and may
//! exceed the strengths pool (generators cycle through the pool).

use serde::{Deserialize, Serialize};

use crate::analyzer::PerformanceAnalysis;
use crate::types::{REVIEW_SHARE, WEAKNESS_PER_CONCEPT, WEAKNESS_SHARE};

// ==================== Data Structures ====================

/// How many questions to draw from each category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAllocation {
    pub weakness: usize,
    pub review: usize,
    pub advancement: usize,
}

impl QuestionAllocation {
    pub fn total(&self) -> usize {
        self.weakness + self.review + self.advancement
    }
}

// ==================== Allocation ====================

/// Allocate `total` questions across weakness, review, and advancement.
pub fn allocate_questions(analysis: &PerformanceAnalysis, total: usize) -> QuestionAllocation {
    let weakness = if analysis.weaknesses.is_empty() {
        0
    } else {
        share_of(total, WEAKNESS_SHARE).min(analysis.weaknesses.len() * WEAKNESS_PER_CONCEPT)
    };

    let remainder = total.saturating_sub(weakness);
    let review = if analysis.needs_review.is_empty() || remainder == 0 {
        0
    } else {
        share_of(remainder, REVIEW_SHARE).min(analysis.needs_review.len())
    };

    let advancement = total.saturating_sub(weakness).saturating_sub(review);

    QuestionAllocation {
        weakness,
        review,
        advancement,
    }
}

/// `ceil(count * share)` clamped to a non-negative integer. NaN or negative
/// intermediate values collapse to zero rather than escaping to the caller.
fn share_of(count: usize, share: f64) -> usize {
    let raw = (count as f64 * share).ceil();
    if raw.is_finite() && raw > 0.0 {
        raw as usize
    } else {
        0
    }
}

// ==================== Tests ====================
