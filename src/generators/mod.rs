//! Question Generators
//!
//! Five independent strategies, each turning one concept into one question.
//! A generator returns `None` when the concept is malformed (blank name or
//! definition); the assembler skips such slots instead of failing the quiz.
//!
//! All randomness (template choice, option shuffles, the true/false coin)
//! comes from the caller-supplied `ChaCha8Rng`, so a fixed seed reproduces a
//! quiz exactly.

mod templates;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::text::excerpt;
use crate::types::{
    Answer, Concept, Question, QuestionType, BLANK_EXCERPT_CHARS, MCQ_EXCERPT_CHARS,
};

use templates::{
    render, EXPLAIN_GUIDANCE, EXPLAIN_PROMPTS, FALSE_STATEMENTS, FILL_BLANK_STEMS,
    GENERIC_DISTRACTORS, MCQ_STEMS, SHORT_ANSWER_GUIDANCE, SHORT_ANSWER_PROMPTS, TRUE_STATEMENTS,
};

// ==================== Shared Helpers ====================

/// Uniform draw from a template pool
fn pick<'a>(pool: &[&'a str], rng: &mut ChaCha8Rng) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Question skeleton with the fields every generator fills the same way.
/// The id stays empty until the assembler sequences the quiz.
fn base_question(
    question_type: QuestionType,
    prompt: String,
    answer: Answer,
    concept: &Concept,
) -> Question {
    Question {
        id: String::new(),
        question_type,
        question: prompt,
        answer,
        options: None,
        guidance: None,
        difficulty: concept.difficulty,
        concept_tested: concept.concept.clone(),
        focus: None,
        concept_difficulty: None,
        hints: None,
        target_difficulty: None,
        estimated_time: None,
        remediation_level: None,
    }
}

/// Replace case-insensitive occurrences of `needle` with a blank marker.
/// Comparison is per-scalar-value with primary lowercase mapping, so
/// multi-byte text never splits mid-character.
fn blank_out(text: &str, needle: &str) -> String {
    let fold = |c: char| c.to_lowercase().next().unwrap_or(c);
    let hay: Vec<char> = text.chars().collect();
    let hay_folded: Vec<char> = hay.iter().map(|&c| fold(c)).collect();
    let needle_folded: Vec<char> = needle.chars().map(fold).collect();
    if needle_folded.is_empty() || hay.len() < needle_folded.len() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < hay.len() {
        if i + needle_folded.len() <= hay.len()
            && hay_folded[i..i + needle_folded.len()] == needle_folded[..]
        {
            out.push_str("_____");
            i += needle_folded.len();
        } else {
            out.push(hay[i]);
            i += 1;
        }
    }
    out
}

// ==================== Multiple Choice ====================

/// Build an MCQ from a concept and its siblings. Distractors prefer other
/// concepts' definition prefixes; with fewer than three siblings available,
/// generic distractors referencing the concept name stand in.
pub fn multiple_choice(
    concept: &Concept,
    siblings: &[Concept],
    topic: &str,
    rng: &mut ChaCha8Rng,
) -> Option<Question> {
    if !concept.is_well_formed() {
        return None;
    }

    let prompt = render(pick(&MCQ_STEMS, rng), &concept.concept, topic, "");
    let correct = excerpt(&concept.definition, MCQ_EXCERPT_CHARS);

    let others: Vec<&Concept> = siblings
        .iter()
        .filter(|c| c.concept != concept.concept && c.is_well_formed())
        .collect();

    let distractors: Vec<String> = if others.len() >= 3 {
        others
            .choose_multiple(rng, 3)
            .map(|c| excerpt(&c.definition, MCQ_EXCERPT_CHARS))
            .collect()
    } else {
        GENERIC_DISTRACTORS
            .iter()
            .map(|t| render(t, &concept.concept, topic, ""))
            .collect()
    };

    let mut options = Vec::with_capacity(4);
    options.push(correct.clone());
    options.extend(distractors);
    options.shuffle(rng);

    let mut question = base_question(
        QuestionType::MultipleChoice,
        prompt,
        Answer::Text(correct),
        concept,
    );
    question.options = Some(options);
    Some(question)
}

// ==================== True / False ====================

/// Flip a fair coin, then phrase either a true statement or a factually
/// negated one. The answer is the coin, never the phrasing.
pub fn true_false(concept: &Concept, topic: &str, rng: &mut ChaCha8Rng) -> Option<Question> {
    if !concept.is_well_formed() {
        return None;
    }

    let is_true = rng.gen_bool(0.5);
    let pool = if is_true {
        &TRUE_STATEMENTS
    } else {
        &FALSE_STATEMENTS
    };
    let snippet = excerpt(&concept.definition, MCQ_EXCERPT_CHARS);
    let statement = render(pick(pool, rng), &concept.concept, topic, &snippet);

    Some(base_question(
        QuestionType::TrueFalse,
        format!("True or false: {statement}"),
        Answer::Bool(is_true),
        concept,
    ))
}

// ==================== Fill in the Blank ====================

/// Show a definition excerpt with the concept name blanked out; the exact
/// concept name is the reference answer.
pub fn fill_blank(concept: &Concept, topic: &str, rng: &mut ChaCha8Rng) -> Option<Question> {
    if !concept.is_well_formed() {
        return None;
    }

    let snippet = excerpt(&concept.definition, BLANK_EXCERPT_CHARS);
    let blanked = blank_out(&snippet, &concept.concept);
    let prompt = render(pick(&FILL_BLANK_STEMS, rng), &concept.concept, topic, &blanked);

    Some(base_question(
        QuestionType::FillBlank,
        prompt,
        Answer::Text(concept.concept.clone()),
        concept,
    ))
}

// ==================== Short Answer ====================

pub fn short_answer(concept: &Concept, topic: &str, rng: &mut ChaCha8Rng) -> Option<Question> {
    if !concept.is_well_formed() {
        return None;
    }

    let prompt = render(pick(&SHORT_ANSWER_PROMPTS, rng), &concept.concept, topic, "");
    let mut question = base_question(
        QuestionType::ShortAnswer,
        prompt,
        Answer::Text(concept.definition.clone()),
        concept,
    );
    question.guidance = Some(SHORT_ANSWER_GUIDANCE.to_string());
    Some(question)
}

// ==================== Explain ====================

pub fn explain(concept: &Concept, topic: &str, rng: &mut ChaCha8Rng) -> Option<Question> {
    if !concept.is_well_formed() {
        return None;
    }

    let prompt = render(pick(&EXPLAIN_PROMPTS, rng), &concept.concept, topic, "");
    let mut question = base_question(
        QuestionType::Explain,
        prompt,
        Answer::Text(concept.definition.clone()),
        concept,
    );
    question.guidance = Some(EXPLAIN_GUIDANCE.to_string());
    Some(question)
}

/// Dispatch a generator by question type (the closed set from `types`).
pub fn generate(
    question_type: QuestionType,
    concept: &Concept,
    siblings: &[Concept],
    topic: &str,
    rng: &mut ChaCha8Rng,
) -> Option<Question> {
    match question_type {
        QuestionType::MultipleChoice => multiple_choice(concept, siblings, topic, rng),
        QuestionType::TrueFalse => true_false(concept, topic, rng),
        QuestionType::FillBlank => fill_blank(concept, topic, rng),
        QuestionType::ShortAnswer => short_answer(concept, topic, rng),
        QuestionType::Explain => explain(concept, topic, rng),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn mitosis() -> Concept {
        Concept::new(
            "Mitosis",
            "Mitosis is cell division producing two identical daughter cells",
            3,
        )
    }

    fn biology_concepts() -> Vec<Concept> {
        vec![
            mitosis(),
            Concept::new("Meiosis", "Meiosis is cell division producing four gametes", 4),
            Concept::new("Osmosis", "Osmosis is the movement of water across a membrane", 2),
            Concept::new("Diffusion", "Diffusion is movement from high to low concentration", 2),
        ]
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_malformed_concept_yields_none() {
        let blank_name = Concept::new("", "some definition", 3);
        let blank_def = Concept::new("Mitosis", "  ", 3);
        let mut r = rng(1);

        assert!(multiple_choice(&blank_name, &[], "Biology", &mut r).is_none());
        assert!(true_false(&blank_def, "Biology", &mut r).is_none());
        assert!(fill_blank(&blank_name, "Biology", &mut r).is_none());
        assert!(short_answer(&blank_def, "Biology", &mut r).is_none());
        assert!(explain(&blank_name, "Biology", &mut r).is_none());
    }

    #[test]
    fn test_every_generator_produces_prompt_and_answer() {
        let concepts = biology_concepts();
        let mut r = rng(7);
        for qt in QuestionType::ALL {
            let q = generate(qt, &concepts[0], &concepts, "Biology", &mut r)
                .expect("well-formed concept must generate");
            assert!(!q.question.trim().is_empty());
            assert!(!q.answer.as_text().is_empty());
            assert_eq!(q.question_type, qt);
            assert_eq!(q.concept_tested, "Mitosis");
            assert_eq!(q.difficulty, 3);
        }
    }

    // ==================== MCQ Tests ====================

    #[test]
    fn test_mcq_options_contain_answer_and_sibling_distractors() {
        let concepts = biology_concepts();
        let mut r = rng(11);
        let q = multiple_choice(&concepts[0], &concepts, "Biology", &mut r).unwrap();

        let options = q.options.as_ref().unwrap();
        assert_eq!(options.len(), 4);
        let answer = q.answer.as_text();
        assert!(options.contains(&answer));
        assert_eq!(answer, concepts[0].definition);
        // Distractors come from the sibling pool, not the generic table
        for option in options {
            assert!(!option.contains("misconception"));
        }
    }

    #[test]
    fn test_mcq_falls_back_to_generic_distractors() {
        let concept = mitosis();
        let mut r = rng(3);
        let q = multiple_choice(&concept, std::slice::from_ref(&concept), "Biology", &mut r)
            .unwrap();

        let options = q.options.unwrap();
        assert_eq!(options.len(), 4);
        // Three synthesized distractors reference the concept by name
        let generic_count = options
            .iter()
            .filter(|o| o.contains("Mitosis") && **o != q.answer.as_text())
            .count();
        assert_eq!(generic_count, 3);
    }

    #[test]
    fn test_mcq_truncates_long_definitions_with_ellipsis() {
        let long_def = "x".repeat(150);
        let concept = Concept::new("LongOne", &long_def, 2);
        let mut r = rng(5);
        let q = multiple_choice(&concept, &[], "Biology", &mut r).unwrap();

        let answer = q.answer.as_text();
        assert_eq!(answer.chars().count(), 103); // 100 chars + "..."
        assert!(answer.ends_with("..."));
    }

    // ==================== True/False Tests ====================

    #[test]
    fn test_true_false_coin_is_the_answer() {
        let concept = mitosis();
        let mut seen_true = false;
        let mut seen_false = false;
        for seed in 0..32 {
            let mut r = rng(seed);
            let q = true_false(&concept, "Biology", &mut r).unwrap();
            assert!(q.question.starts_with("True or false:"));
            match q.answer {
                Answer::Bool(true) => seen_true = true,
                Answer::Bool(false) => seen_false = true,
                Answer::Text(_) => panic!("true/false answer must be boolean"),
            }
        }
        assert!(seen_true && seen_false, "fair coin should show both faces");
    }

    // ==================== Fill-Blank Tests ====================

    #[test]
    fn test_fill_blank_blanks_the_concept_name() {
        let concept = mitosis();
        let mut r = rng(9);
        let q = fill_blank(&concept, "Biology", &mut r).unwrap();

        assert_eq!(q.answer, Answer::Text("Mitosis".to_string()));
        assert!(q.question.contains("_____"));
        // The definition excerpt must not leak the answer
        let prompt_lower = q.question.to_lowercase();
        let leaked = prompt_lower
            .split("_____")
            .any(|chunk| chunk.contains("mitosis"));
        assert!(!leaked, "prompt leaked the answer: {}", q.question);
    }

    #[test]
    fn test_blank_out_is_case_insensitive() {
        assert_eq!(
            blank_out("Mitosis is cell division; mitosis repeats", "mitosis"),
            "_____ is cell division; _____ repeats"
        );
        assert_eq!(blank_out("no match here", "mitosis"), "no match here");
        assert_eq!(blank_out("short", "much longer needle"), "short");
    }

    // ==================== Free-Text Tests ====================

    #[test]
    fn test_short_answer_uses_full_definition_and_guidance() {
        let concept = mitosis();
        let mut r = rng(13);
        let q = short_answer(&concept, "Biology", &mut r).unwrap();

        assert_eq!(q.answer.as_text(), concept.definition);
        assert!(q.guidance.is_some());
    }

    #[test]
    fn test_explain_uses_full_definition_and_guidance() {
        let concept = mitosis();
        let mut r = rng(17);
        let q = explain(&concept, "Biology", &mut r).unwrap();

        assert_eq!(q.answer.as_text(), concept.definition);
        assert!(q.guidance.unwrap().contains("example"));
    }

    // ==================== Determinism Tests ====================

    #[test]
    fn test_template_choice_never_changes_the_answer() {
        let concepts = biology_concepts();
        for seed in 0..16 {
            let mut r = rng(seed);
            let q = fill_blank(&concepts[0], "Biology", &mut r).unwrap();
            assert_eq!(q.answer.as_text(), "Mitosis");

            let mut r = rng(seed);
            let q = short_answer(&concepts[0], "Biology", &mut r).unwrap();
            assert_eq!(q.answer.as_text(), concepts[0].definition);
        }
    }

    #[test]
    fn test_same_seed_reproduces_question() {
        let concepts = biology_concepts();
        let a = multiple_choice(&concepts[0], &concepts, "Biology", &mut rng(42)).unwrap();
        let b = multiple_choice(&concepts[0], &concepts, "Biology", &mut rng(42)).unwrap();
        assert_eq!(a.question, b.question);
        assert_eq!(a.options, b.options);
        assert_eq!(a.answer, b.answer);
    }
}
