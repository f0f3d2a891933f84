//! Grading Engine
//!
//! Grades a quiz against a parallel sequence of learner answers. Each
//! question type has its own correctness semantics; free-text types award
//! partial credit from token overlap or edit-distance similarity. The
//! aggregate score is the rounded mean of per-question partial credit, not
//! the fraction of fully-correct answers.
//!
//! Unanswered or blank slots grade as incorrect with zero credit and are
//! recorded with the no-answer sentinel; nothing in here returns an error
//! for well-typed input.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::text::{normalize_answer, similarity, tokenize};
use crate::types::{Answer, GradedQuestion, Question, QuestionType, QuizGrade, QuizSession};

// ==================== Constants ====================

/// Sentinel recorded for unanswered questions
pub const NO_ANSWER: &str = "No answer";

/// Fill-blank: similarity above this is full credit
const FILL_SIM_FULL: f64 = 0.7;

/// Fill-blank: similarity above this (up to full) is half credit
const FILL_SIM_HALF: f64 = 0.4;

/// Short-answer: overlap ratio for full credit
const SHORT_RATIO_FULL: f64 = 0.7;

/// Short-answer: overlap ratio for 70 points
const SHORT_RATIO_HIGH: f64 = 0.5;

/// Short-answer: overlap ratio for 40 points
const SHORT_RATIO_LOW: f64 = 0.3;

/// Explain: minimum learner tokens before any credit
const EXPLAIN_MIN_TOKENS: usize = 5;

/// Explain: weight of the content-overlap component
const EXPLAIN_CONTENT_WEIGHT: f64 = 0.7;

/// Explain: weight of the length component
const EXPLAIN_LENGTH_WEIGHT: f64 = 0.3;

/// Explain: partial score at or above this counts as correct
const EXPLAIN_PASS_SCORE: f64 = 60.0;

// ==================== Grading ====================

/// Grade one quiz. `answers` is positionally parallel to `questions`;
/// missing or blank entries grade as unanswered.
pub fn grade_quiz(questions: &[Question], answers: &[Option<String>]) -> QuizGrade {
    let mut results = Vec::with_capacity(questions.len());
    let mut partial_sum = 0.0;
    let mut correct_count = 0u32;

    for (index, question) in questions.iter().enumerate() {
        let answer = answers
            .get(index)
            .and_then(|a| a.as_deref())
            .filter(|a| !a.trim().is_empty());

        let (is_correct, partial_score, user_answer) = match answer {
            None => (false, 0.0, NO_ANSWER.to_string()),
            Some(text) => {
                let (ok, score) = grade_answer(question, text);
                (ok, score, text.to_string())
            }
        };

        let partial_score = partial_score.clamp(0.0, 100.0);
        partial_sum += partial_score;
        if is_correct {
            correct_count += 1;
        }

        results.push(GradedQuestion {
            question_id: question.id.clone(),
            question: question.question.clone(),
            user_answer,
            correct_answer: question.answer.as_text(),
            is_correct,
            concept_tested: question.concept_tested.clone(),
            partial_score,
        });
    }

    let total = questions.len() as u32;
    let score = if total > 0 {
        (partial_sum / f64::from(total)).round() as u32
    } else {
        0
    };
    let partial_credit = (partial_sum / 100.0 * 10.0).round() / 10.0;

    debug!(total, correct = correct_count, score, "quiz graded");

    QuizGrade {
        score,
        correct: correct_count,
        total,
        results,
        partial_credit,
    }
}

/// Grade many independent sessions in parallel.
pub fn grade_quizzes(sessions: &[QuizSession]) -> Vec<QuizGrade> {
    sessions
        .par_iter()
        .map(|session| grade_quiz(&session.questions, &session.answers))
        .collect()
}

/// Dispatch on the closed question-type set. Returns (is_correct, partial).
fn grade_answer(question: &Question, user_answer: &str) -> (bool, f64) {
    match question.question_type {
        QuestionType::MultipleChoice => grade_exact(question, user_answer),
        QuestionType::TrueFalse => grade_true_false(question, user_answer),
        QuestionType::FillBlank => grade_fill_blank(question, user_answer),
        QuestionType::ShortAnswer => grade_short_answer(question, user_answer),
        QuestionType::Explain => grade_explain(question, user_answer),
    }
}

// ==================== Per-Type Strategies ====================

/// MCQ: exact string equality with the recorded answer option.
fn grade_exact(question: &Question, user_answer: &str) -> (bool, f64) {
    let is_correct = user_answer == question.answer.as_text();
    (is_correct, if is_correct { 100.0 } else { 0.0 })
}

/// True/false: the learner's string is true iff it spells "true"
/// (case-insensitive); compare to the boolean reference.
fn grade_true_false(question: &Question, user_answer: &str) -> (bool, f64) {
    let user_value = user_answer.trim().eq_ignore_ascii_case("true");
    let expected = match &question.answer {
        Answer::Bool(b) => *b,
        // Defensive: a text reference grades against its own normalization
        Answer::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    };
    let is_correct = user_value == expected;
    (is_correct, if is_correct { 100.0 } else { 0.0 })
}

/// Fill-blank: exact match after normalization, otherwise edit-distance
/// similarity gated on one string containing the other.
fn grade_fill_blank(question: &Question, user_answer: &str) -> (bool, f64) {
    let user = normalize_answer(user_answer);
    let reference = normalize_answer(&question.answer.as_text());

    if user == reference {
        return (true, 100.0);
    }
    if user.contains(&reference) || reference.contains(&user) {
        let sim = similarity(&user, &reference);
        if sim > FILL_SIM_FULL {
            return (true, 100.0);
        }
        if sim > FILL_SIM_HALF {
            return (false, 50.0);
        }
    }
    (false, 0.0)
}

/// Match ratio: shared unique tokens over the reference's unique tokens.
fn match_ratio(learner: &[String], reference: &[String]) -> f64 {
    let learner_set: HashSet<&str> = learner.iter().map(String::as_str).collect();
    let reference_set: HashSet<&str> = reference.iter().map(String::as_str).collect();
    let shared = learner_set.intersection(&reference_set).count();
    shared as f64 / reference_set.len().max(1) as f64
}

/// Short answer: banded token-overlap credit.
fn grade_short_answer(question: &Question, user_answer: &str) -> (bool, f64) {
    let learner = tokenize(user_answer);
    if learner.is_empty() {
        return (false, 0.0);
    }
    let reference = tokenize(&question.answer.as_text());
    let ratio = match_ratio(&learner, &reference);

    if ratio >= SHORT_RATIO_FULL {
        (true, 100.0)
    } else if ratio >= SHORT_RATIO_HIGH {
        (false, 70.0)
    } else if ratio >= SHORT_RATIO_LOW {
        (false, 40.0)
    } else {
        (false, 0.0)
    }
}

/// Explain: content overlap (70%) plus answer length (30%), with a minimum
/// length gate. Correct at 60 points.
fn grade_explain(question: &Question, user_answer: &str) -> (bool, f64) {
    let learner = tokenize(user_answer);
    if learner.len() < EXPLAIN_MIN_TOKENS {
        return (false, 0.0);
    }
    let reference = tokenize(&question.answer.as_text());

    let content_score = match_ratio(&learner, &reference) * EXPLAIN_CONTENT_WEIGHT;
    let length_ratio = learner.len() as f64 / reference.len().max(1) as f64;
    let length_score = length_ratio.min(1.0) * EXPLAIN_LENGTH_WEIGHT;

    let partial = (content_score + length_score) * 100.0;
    (partial >= EXPLAIN_PASS_SCORE, partial)
}

// ==================== Tests ====================
