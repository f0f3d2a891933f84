//! # tiku-algo - Adaptive Quiz Core Algorithms
//!
//! Pure Rust implementation of the quiz generation and grading engine:
//!
//! - **Performance Analyzer** - per-concept mastery from learning history
//! - **Question Distributor** - weakness-first question allocation
//! - **Question Generators** - five item formats from concept definitions
//! - **Quiz Assembler** - flat and adaptive quiz construction
//! - **Grading Engine** - partial-credit grading with text similarity
//! - **Feedback Generator** - study recommendations and skill progress
//!
//! ## Design goals
//!
//! - **Pure Rust** - no binding layer, usable from any Rust project
//! - **Deterministic** - all randomness flows through one seedable RNG,
//!   so a fixed seed reproduces a quiz exactly
//! - **Degrading, not failing** - malformed input shrinks the output
//!   instead of producing errors
//! - **Fully tested** - every scoring path has unit coverage
//!
//! ## Module structure
//!
//! - [`analyzer`] - performance records, classification, proficiency
//! - [`distribution`] - question count allocation
//! - [`generators`] - the five question strategies and template pools
//! - [`assembler`] - the [`QuizEngine`] entry point
//! - [`grading`] - per-question strategies and aggregate scoring
//! - [`feedback`] - recommendations and progress tracking
//! - [`text`] - normalization, tokenization, edit distance
//! - [`types`] - shared data model and constants
//!
//! ## Usage
//!
//! ```rust
//! use tiku_algo::{QuizEngine, Concept, Topic, UserModel};
//!
//! let topic = Topic {
//!     name: "Biology".to_string(),
//!     concepts: vec![Concept::new(
//!         "Mitosis",
//!         "Mitosis is cell division producing two identical daughter cells",
//!         3,
//!     )],
//! };
//!
//! let mut engine = QuizEngine::with_seed(42);
//! let quiz = engine.generate_adaptive_quiz(&topic, &UserModel::default(), 4);
//! let grade = tiku_algo::grade_quiz(&quiz, &vec![None; quiz.len()]);
//! assert_eq!(grade.score, 0);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

pub mod analyzer;
pub mod assembler;
pub mod distribution;
pub mod feedback;
pub mod generators;
pub mod grading;
pub mod text;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export the shared data model
pub use types::*;

/// Re-export the performance analyzer
pub use analyzer::{analyze_performance, ConceptStanding, PerformanceAnalysis, PerformanceRecord};

/// Re-export the question distributor
pub use distribution::{allocate_questions, QuestionAllocation};

/// Re-export the quiz engine
pub use assembler::QuizEngine;

/// Re-export the grading engine
pub use grading::{grade_quiz, grade_quizzes, NO_ANSWER};

/// Re-export the feedback generator
pub use feedback::{
    generate_feedback, ConceptAccuracy, FeedbackReport, Priority, Recommendation,
    RecommendationType, SkillProgress, TypeAccuracy,
};
