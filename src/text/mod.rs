//! Text Primitives for Grading
//!
//! Normalization, tokenization, and edit-distance similarity used by the
//! free-text grading strategies. All functions are pure and operate on
//! Unicode scalar values, so multi-byte input never panics.

// ==================== Normalization ====================

/// Strip punctuation, lowercase, and trim. Inner whitespace is preserved.
pub fn normalize_answer(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split into case-folded alphanumeric tokens, dropping empties.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Char-safe prefix of at most `max_chars`, with a trailing ellipsis when
/// the text was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

// ==================== Edit Distance ====================

/// Levenshtein distance over Unicode scalar values (two-row DP).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized edit-distance similarity: `1 - levenshtein(a,b) / max(len)`.
/// Two empty strings are identical (similarity 1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

// ==================== Tests ====================
