//! Template String Pools
//!
//! Static phrasing tables for the five question generators. Wording variety
//! comes from a uniform draw over each pool; the draw never influences
//! correctness semantics, which live entirely in the generator and grading
//! code. Placeholders: `{concept}`, `{topic}`, `{definition}`.

pub(crate) const MCQ_STEMS: [&str; 4] = [
    "Which of the following best describes {concept}?",
    "In the context of {topic}, what is {concept}?",
    "Select the statement that correctly defines {concept}.",
    "What does the term {concept} refer to in {topic}?",
];

pub(crate) const TRUE_STATEMENTS: [&str; 3] = [
    "In {topic}, {concept} can be described as: {definition}",
    "{concept} refers to the following: {definition}",
    "The statement \"{definition}\" describes {concept}.",
];

pub(crate) const FALSE_STATEMENTS: [&str; 3] = [
    "{concept} has no connection to {topic} and is never covered by it.",
    "{concept} is best described as the exact opposite of: {definition}",
    "The description \"{definition}\" has nothing to do with {concept}.",
];

pub(crate) const FILL_BLANK_STEMS: [&str; 3] = [
    "Fill in the blank: _____ is described as \"{definition}\"",
    "Complete the statement: the term _____ matches this description: {definition}",
    "Which {topic} term fits? _____ — {definition}",
];

pub(crate) const SHORT_ANSWER_PROMPTS: [&str; 4] = [
    "In your own words, describe {concept}.",
    "What is {concept}? Answer in one or two sentences.",
    "Briefly explain what {concept} means in {topic}.",
    "Summarize the key idea behind {concept}.",
];

pub(crate) const EXPLAIN_PROMPTS: [&str; 3] = [
    "Explain {concept} in detail and describe why it matters in {topic}.",
    "Walk through {concept} step by step, including at least one example.",
    "Discuss {concept} thoroughly: what it is, how it works, and where it applies.",
];

/// Fallback MCQ distractors when fewer than three sibling concepts exist
pub(crate) const GENERIC_DISTRACTORS: [&str; 3] = [
    "A process unrelated to {concept} that only applies outside {topic}.",
    "The reverse of {concept}, which undoes its effects entirely.",
    "A common misconception about {concept} that the material corrects.",
];

pub(crate) const SHORT_ANSWER_GUIDANCE: &str =
    "Cover the main points of the definition in your own words.";

pub(crate) const EXPLAIN_GUIDANCE: &str =
    "Give a detailed answer with specific examples; complete explanations score higher.";

/// Substitute the placeholder fields of a template.
pub(crate) fn render(template: &str, concept: &str, topic: &str, definition: &str) -> String {
    template
        .replace("{concept}", concept)
        .replace("{topic}", topic)
        .replace("{definition}", definition)
}
