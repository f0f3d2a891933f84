//! Common Types and Constants
//!
//! Shared data structures used across all quiz-engine modules. Field names
//! serialize in camelCase so payloads match the shapes the presentation
//! layer and the key-value store exchange.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Neutral mastery prior for concepts with no attempts
pub const NEUTRAL_PRIOR: f64 = 0.5;

/// History performance at or above this counts as a correct attempt
pub const HISTORY_CORRECT_THRESHOLD: f64 = 0.7;

/// Mastery below this is always classified weak
pub const WEAK_MASTERY_CUTOFF: f64 = 0.4;

/// With more than this many attempts, mastery below `WEAK_REVIEW_CUTOFF` is weak
pub const WEAK_ATTEMPTS_GATE: u32 = 3;

/// Secondary weakness cutoff for well-sampled concepts
pub const WEAK_REVIEW_CUTOFF: f64 = 0.6;

/// Mastery at or above this is classified strong
pub const STRONG_MASTERY_CUTOFF: f64 = 0.8;

/// Share of the quiz reserved for weakness remediation
pub const WEAKNESS_SHARE: f64 = 0.5;

/// Cap on weakness questions per weak concept
pub const WEAKNESS_PER_CONCEPT: usize = 2;

/// Share of the post-weakness remainder allotted to review
pub const REVIEW_SHARE: f64 = 0.6;

/// Definition excerpt length for MCQ answers and distractors (chars)
pub const MCQ_EXCERPT_CHARS: usize = 100;

/// Definition excerpt length for fill-in-blank stems (chars)
pub const BLANK_EXCERPT_CHARS: usize = 60;

// ==================== Input Types ====================

/// A named unit of topic content with a definition and difficulty rating
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Concept name (identity within a topic)
    pub concept: String,
    /// Textual definition
    pub definition: String,
    /// Difficulty rating 1..=5
    pub difficulty: u8,
}

impl Concept {
    pub fn new(concept: &str, definition: &str, difficulty: u8) -> Self {
        Self {
            concept: concept.to_string(),
            definition: definition.to_string(),
            difficulty,
        }
    }

    /// A concept is usable by generators only when both name and definition
    /// are non-blank.
    pub fn is_well_formed(&self) -> bool {
        !self.concept.trim().is_empty() && !self.definition.trim().is_empty()
    }
}

/// A topic: name plus an ordered list of concepts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub concepts: Vec<Concept>,
}

/// One entry of a learner's study history
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Topic or concept label the learner studied
    pub topic: String,
    /// Normalized performance [0, 1]
    pub performance: f64,
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// Learner model as supplied by the user-model store
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserModel {
    pub learning_history: Vec<HistoryEntry>,
}

// ==================== Question Types ====================

/// Closed set of question formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "truefalse")]
    TrueFalse,
    #[serde(rename = "fillblank")]
    FillBlank,
    #[serde(rename = "shortanswer")]
    ShortAnswer,
    #[serde(rename = "explain")]
    Explain,
}

impl QuestionType {
    /// All formats, in the flat-mode cycle order
    pub const ALL: [QuestionType; 5] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::FillBlank,
        QuestionType::ShortAnswer,
        QuestionType::Explain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "mcq",
            Self::TrueFalse => "truefalse",
            Self::FillBlank => "fillblank",
            Self::ShortAnswer => "shortanswer",
            Self::Explain => "explain",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mcq" => Some(Self::MultipleChoice),
            "truefalse" => Some(Self::TrueFalse),
            "fillblank" => Some(Self::FillBlank),
            "shortanswer" => Some(Self::ShortAnswer),
            "explain" => Some(Self::Explain),
            _ => None,
        }
    }

    /// Suggested answering time in seconds
    pub fn estimated_time_secs(&self) -> u32 {
        match self {
            Self::MultipleChoice | Self::TrueFalse => 30,
            Self::FillBlank => 45,
            Self::ShortAnswer => 60,
            Self::Explain => 90,
        }
    }
}

/// Reference answer: free text for most formats, a boolean for true/false
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Bool(bool),
}

impl Answer {
    /// Canonical text form ("true"/"false" for booleans)
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Why a question was selected in adaptive mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    WeaknessRemediation,
    Review,
    Advancement,
}

impl Focus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeaknessRemediation => "weakness_remediation",
            Self::Review => "review",
            Self::Advancement => "advancement",
        }
    }

    /// Remediation urgency mirrors the focus category
    pub fn remediation_level(&self) -> RemediationLevel {
        match self {
            Self::WeaknessRemediation => RemediationLevel::High,
            Self::Review => RemediationLevel::Medium,
            Self::Advancement => RemediationLevel::Low,
        }
    }
}

/// Urgency of follow-up study attached to an adaptive question
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationLevel {
    High,
    Medium,
    Low,
}

/// Human-readable label for a 1..=5 difficulty rating
pub fn difficulty_label(difficulty: u8) -> &'static str {
    match difficulty {
        0 | 1 | 2 => "basic",
        3 => "intermediate",
        _ => "advanced",
    }
}

/// One generated test item
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Sequential id `q_1..q_n`, assigned by the assembler
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Prompt shown to the learner (never empty for generated questions)
    pub question: String,
    /// Reference answer
    pub answer: Answer,
    /// MCQ only: the four shuffled options
    pub options: Option<Vec<String>>,
    /// Free-text formats: answering guidance
    pub guidance: Option<String>,
    /// Difficulty of the tested concept
    pub difficulty: u8,
    /// Name of the concept this item tests
    pub concept_tested: String,
    /// Adaptive mode only: selection category
    pub focus: Option<Focus>,
    /// Adaptive mode only: difficulty label of the tested concept
    pub concept_difficulty: Option<String>,
    /// Weakness questions only: study hints scaled to mastery severity
    pub hints: Option<Vec<String>>,
    /// Adaptive mode only: difficulty the learner should be working at
    pub target_difficulty: Option<u8>,
    /// Adaptive mode only: suggested answering time in seconds
    pub estimated_time: Option<u32>,
    /// Adaptive mode only: urgency mirroring the focus
    pub remediation_level: Option<RemediationLevel>,
}

// ==================== Grading Types ====================

/// Per-question grading outcome
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedQuestion {
    pub question_id: String,
    /// Prompt, echoed for display
    pub question: String,
    /// The learner's answer, or the no-answer sentinel
    pub user_answer: String,
    /// Reference answer in text form
    pub correct_answer: String,
    pub is_correct: bool,
    pub concept_tested: String,
    /// Partial credit in [0, 100]
    pub partial_score: f64,
}

/// Aggregate grading result for one quiz
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGrade {
    /// Rounded mean of per-question partial credit, 0..=100
    pub score: u32,
    /// Count of fully correct answers
    pub correct: u32,
    pub total: u32,
    pub results: Vec<GradedQuestion>,
    /// Sum of partial credit fractions, one decimal
    pub partial_credit: f64,
}

/// Storage payload for a finished quiz, appended by the storage collaborator
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub topic: String,
    pub score: u32,
    pub correct: u32,
    pub total: u32,
    pub results: Vec<GradedQuestion>,
    /// Epoch milliseconds, supplied by the caller
    pub timestamp: i64,
}

impl QuizAttempt {
    pub fn from_grade(topic: &str, grade: &QuizGrade, timestamp: i64) -> Self {
        Self {
            topic: topic.to_string(),
            score: grade.score,
            correct: grade.correct,
            total: grade.total,
            results: grade.results.clone(),
            timestamp,
        }
    }
}

/// One quiz plus its learner answers, for batch grading
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizSession {
    pub questions: Vec<Question>,
    pub answers: Vec<Option<String>>,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_parse_roundtrip() {
        for qt in QuestionType::ALL {
            assert_eq!(QuestionType::parse(qt.as_str()), Some(qt));
        }
        assert_eq!(QuestionType::parse("MCQ"), Some(QuestionType::MultipleChoice));
        assert_eq!(QuestionType::parse("essay"), None);
        assert_eq!(QuestionType::parse(""), None);
    }

    #[test]
    fn test_estimated_times() {
        assert_eq!(QuestionType::MultipleChoice.estimated_time_secs(), 30);
        assert_eq!(QuestionType::TrueFalse.estimated_time_secs(), 30);
        assert_eq!(QuestionType::FillBlank.estimated_time_secs(), 45);
        assert_eq!(QuestionType::ShortAnswer.estimated_time_secs(), 60);
        assert_eq!(QuestionType::Explain.estimated_time_secs(), 90);
    }

    #[test]
    fn test_answer_as_text() {
        assert_eq!(Answer::Text("Mitosis".into()).as_text(), "Mitosis");
        assert_eq!(Answer::Bool(true).as_text(), "true");
        assert_eq!(Answer::Bool(false).as_text(), "false");
    }

    #[test]
    fn test_focus_remediation_levels() {
        assert_eq!(
            Focus::WeaknessRemediation.remediation_level(),
            RemediationLevel::High
        );
        assert_eq!(Focus::Review.remediation_level(), RemediationLevel::Medium);
        assert_eq!(Focus::Advancement.remediation_level(), RemediationLevel::Low);
    }

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(difficulty_label(1), "basic");
        assert_eq!(difficulty_label(2), "basic");
        assert_eq!(difficulty_label(3), "intermediate");
        assert_eq!(difficulty_label(4), "advanced");
        assert_eq!(difficulty_label(5), "advanced");
    }

    #[test]
    fn test_concept_well_formed() {
        assert!(Concept::new("Mitosis", "Cell division", 3).is_well_formed());
        assert!(!Concept::new("", "Cell division", 3).is_well_formed());
        assert!(!Concept::new("Mitosis", "   ", 3).is_well_formed());
    }

    #[test]
    fn test_question_serializes_camel_case() {
        let q = Question {
            id: "q_1".to_string(),
            question_type: QuestionType::FillBlank,
            question: "Fill in the blank".to_string(),
            answer: Answer::Text("Mitosis".to_string()),
            options: None,
            guidance: None,
            difficulty: 3,
            concept_tested: "Mitosis".to_string(),
            focus: Some(Focus::WeaknessRemediation),
            concept_difficulty: Some("intermediate".to_string()),
            hints: None,
            target_difficulty: Some(2),
            estimated_time: Some(45),
            remediation_level: Some(RemediationLevel::High),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "fillblank");
        assert_eq!(json["conceptTested"], "Mitosis");
        assert_eq!(json["focus"], "weakness_remediation");
        assert_eq!(json["targetDifficulty"], 2);
        assert_eq!(json["remediationLevel"], "high");
    }

    #[test]
    fn test_answer_serializes_untagged() {
        let text = serde_json::to_value(Answer::Text("yes".into())).unwrap();
        let boolean = serde_json::to_value(Answer::Bool(true)).unwrap();
        assert_eq!(text, serde_json::json!("yes"));
        assert_eq!(boolean, serde_json::json!(true));
    }

    #[test]
    fn test_quiz_attempt_from_grade() {
        let grade = QuizGrade {
            score: 85,
            correct: 3,
            total: 4,
            results: Vec::new(),
            partial_credit: 3.4,
        };
        let attempt = QuizAttempt::from_grade("Biology", &grade, 1_700_000_000_000);
        assert_eq!(attempt.topic, "Biology");
        assert_eq!(attempt.score, 85);
        assert_eq!(attempt.correct, 3);
        assert_eq!(attempt.total, 4);
        assert_eq!(attempt.timestamp, 1_700_000_000_000);
    }
}
