//! Comparator: measures how much of a job description's vocabulary a resume covers.
//!
//! Algorithm:
//! 1. Tokenize the candidate (resume) into a set for membership tests.
//! 2. Tokenize the target (job description), deduplicated in first-occurrence order.
//! 3. Count target tokens present in the candidate set; the rest are missing.
//! 4. score = round(100 × matched / unique target tokens), 0 when the target has no tokens.
//! 5. Missing keywords are sorted by codepoint.
//!
//! The computation is pure: no I/O, no shared state, same inputs → same result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::tokenizer::{default_config, TokenizerConfig};

/// Result of comparing a resume against a job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 0 – 100
    pub match_score: u8,
    /// Job description tokens absent from the resume. Sorted, no duplicates.
    pub missing_keywords: Vec<String>,
}

/// Keyword coverage comparator with an injected tokenizer config.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    tokenizer: TokenizerConfig,
}

impl Comparator {
    pub fn new(tokenizer: TokenizerConfig) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &TokenizerConfig {
        &self.tokenizer
    }

    /// Scores `candidate_text` against the vocabulary of `target_text`.
    pub fn compare(&self, candidate_text: &str, target_text: &str) -> MatchResult {
        compare_with(&self.tokenizer, candidate_text, target_text)
    }
}

/// Compares with the default stop words and length threshold.
pub fn compare_documents(candidate_text: &str, target_text: &str) -> MatchResult {
    compare_with(default_config(), candidate_text, target_text)
}

fn compare_with(
    tokenizer: &TokenizerConfig,
    candidate_text: &str,
    target_text: &str,
) -> MatchResult {
    let candidate_set: HashSet<String> = tokenizer.tokenize(candidate_text).into_iter().collect();
    let target_tokens = tokenizer.tokenize_unique(target_text);
    let unique_count = target_tokens.len();

    let mut matched = 0_usize;
    let mut missing = Vec::new();
    for token in target_tokens {
        if candidate_set.contains(&token) {
            matched += 1;
        } else {
            missing.push(token);
        }
    }

    // `String`'s `Ord` is byte-wise, which for UTF-8 is codepoint order.
    missing.sort_unstable();

    MatchResult {
        match_score: coverage_score(matched, unique_count),
        missing_keywords: missing,
    }
}

/// Percentage of `total` covered by `matched`, rounded to nearest with ties away from zero.
///
/// Computed in integers so exact halves (1 of 8 → 12.5) always round up.
/// Returns 0 when `total` is 0.
pub fn coverage_score(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let matched = matched.min(total) as u64;
    let total = total as u64;
    ((200 * matched + total) / (2 * total)) as u8
}
