//! Query complexity classification.
//!
//! Pure lexical classification: simple-pattern sets applied in strict
//! priority order, then a complexity-indicator count bounded by word count.
//! Matching is substring/regex based, not semantic; occasional
//! misclassification is the accepted price of near-zero latency.

pub mod error;
pub mod rules;

#[cfg(test)]
mod tests;

pub use error::{ClassifierError, ClassifierResult};
pub use rules::ClassifierRules;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{COMPLEX_INDICATOR_COUNT, COMPLEX_WORD_COUNT, MODERATE_WORD_COUNT};

/// Query complexity tier, ordered by expected reranking cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryComplexity {
    /// Direct fact lookup; reranking adds nothing.
    Simple,
    /// Single-hop reasoning; partial reranking suffices.
    Moderate,
    /// Multi-hop reasoning; full reranking preserves quality.
    Complex,
}

impl QueryComplexity {
    /// Stable lowercase name, matching the serialized form.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryComplexity::Simple => "simple",
            QueryComplexity::Moderate => "moderate",
            QueryComplexity::Complex => "complex",
        }
    }
}

impl std::fmt::Display for QueryComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a query landed in its complexity tier.
///
/// Produced by [`QueryClassifier::explain`]; recomputed from scratch on every
/// call, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub complexity: QueryComplexity,
    pub word_count: usize,
    /// Domain-specific simple patterns that matched.
    pub matched_domain_patterns: Vec<String>,
    /// General simple patterns that matched.
    pub matched_general_patterns: Vec<String>,
    /// Distinct complexity-indicator terms found in the query.
    pub matched_indicators: Vec<String>,
    pub reasoning: String,
}

/// Classifies query text into a [`QueryComplexity`] tier.
///
/// `classify` is a pure function of the query string: no side effects, no
/// stored state beyond the compiled rules, safe to call concurrently.
pub struct QueryClassifier {
    domain_simple: Vec<Regex>,
    general_simple: Vec<Regex>,
    complex_indicators: Vec<String>,
}

impl QueryClassifier {
    /// Creates a classifier with the built-in rule set.
    pub fn new() -> Self {
        Self::with_rules(&ClassifierRules::default())
            .expect("built-in classification rules always compile")
    }

    /// Creates a classifier from a custom rule set.
    pub fn with_rules(rules: &ClassifierRules) -> ClassifierResult<Self> {
        Ok(Self {
            domain_simple: compile(&rules.domain_simple)?,
            general_simple: compile(&rules.general_simple)?,
            complex_indicators: rules.complex_indicators.clone(),
        })
    }

    /// Classifies `query`, always terminating with a definite tier.
    pub fn classify(&self, query: &str) -> QueryComplexity {
        let normalized = normalize(query);

        if self.domain_simple.iter().any(|p| p.is_match(&normalized))
            || self.general_simple.iter().any(|p| p.is_match(&normalized))
        {
            return QueryComplexity::Simple;
        }

        let indicators = self.count_indicators(&normalized);
        let words = word_count(&normalized);

        if indicators >= COMPLEX_INDICATOR_COUNT || words > COMPLEX_WORD_COUNT {
            QueryComplexity::Complex
        } else if indicators == 1 || words > MODERATE_WORD_COUNT {
            QueryComplexity::Moderate
        } else {
            QueryComplexity::Simple
        }
    }

    /// Reports which rules fired for `query`, for debugging the rule set.
    pub fn explain(&self, query: &str) -> Classification {
        let normalized = normalize(query);
        let complexity = self.classify(query);

        let matched_indicators: Vec<String> = self
            .complex_indicators
            .iter()
            .filter(|term| contains_word(&normalized, term))
            .cloned()
            .collect();

        let reasoning = match complexity {
            QueryComplexity::Simple => "direct fact lookup, reranking skipped".to_string(),
            QueryComplexity::Moderate => format!(
                "single-hop reasoning ({} complexity indicators), partial reranking",
                matched_indicators.len()
            ),
            QueryComplexity::Complex => format!(
                "multi-hop reasoning ({} complexity indicators), full reranking",
                matched_indicators.len()
            ),
        };

        Classification {
            complexity,
            word_count: word_count(&normalized),
            matched_domain_patterns: matching_sources(&self.domain_simple, &normalized),
            matched_general_patterns: matching_sources(&self.general_simple, &normalized),
            matched_indicators,
            reasoning,
        }
    }

    fn count_indicators(&self, normalized: &str) -> usize {
        self.complex_indicators
            .iter()
            .filter(|term| contains_word(normalized, term))
            .count()
    }
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueryClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClassifier")
            .field("domain_simple", &self.domain_simple.len())
            .field("general_simple", &self.general_simple.len())
            .field("complex_indicators", &self.complex_indicators.len())
            .finish()
    }
}

fn compile(patterns: &[String]) -> ClassifierResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|source| ClassifierError::InvalidPattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

fn word_count(normalized: &str) -> usize {
    normalized.split_whitespace().count()
}

fn matching_sources(patterns: &[Regex], normalized: &str) -> Vec<String> {
    patterns
        .iter()
        .filter(|p| p.is_match(normalized))
        .map(|p| p.as_str().to_string())
        .collect()
}

/// Whole-word substring search.
///
/// `term` may span multiple words ("how to"); a match only counts when both
/// ends sit on non-alphanumeric boundaries, so "or" never fires inside "for".
fn contains_word(text: &str, term: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        let begin = start + pos;
        let end = begin + term.len();

        let boundary_before = text[..begin]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let boundary_after = text[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());

        if boundary_before && boundary_after {
            return true;
        }
        start = end;
    }
    false
}
