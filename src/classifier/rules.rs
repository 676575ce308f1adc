//! Classification rule sets.

/// Ordered rule data driving [`super::QueryClassifier`].
///
/// Rules apply in strict priority order: domain-specific simple patterns,
/// then general simple patterns, then the indicator count. An earlier match
/// wins; later rules never override it.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    /// Regex patterns for domain-specific direct-lookup queries.
    pub domain_simple: Vec<String>,
    /// Regex patterns for generic direct-lookup query shapes.
    pub general_simple: Vec<String>,
    /// Terms whose presence signals multi-hop reasoning. Counted as distinct
    /// whole-word occurrences.
    pub complex_indicators: Vec<String>,
}

impl ClassifierRules {
    /// Rule set tuned for the insurance FAQ corpus this layer was built
    /// against (English plus Vietnamese query forms).
    pub fn insurance() -> Self {
        Self {
            domain_simple: to_strings(&[
                r"(?:price|cost|fee)\s+of\b",
                r"insurance\s+(?:fee|premium|cost)",
                r"phí\s+bảo\s+hiểm\s+.{0,20}bao\s+nhiêu",
                r"\bclause\s+\d+",
                r"điều\s+khoản\s+số",
                r"^definition\s+of\s+.{1,15}$",
                r"^định\s+nghĩa\s+.{1,15}$",
                r"what\s+does\s+.{1,15}\s+mean",
            ]),
            general_simple: to_strings(&[
                r"^(?:who\s+is|what\s+is|when|where\s+is|ai\s+là|khi\s+nào)\b",
                r"^(?:is|are|do|does|có)\s+.{0,30}\?$",
            ]),
            complex_indicators: to_strings(&[
                "compare",
                "so sánh",
                "analyze",
                "phân tích",
                "why",
                "tại sao",
                "how to",
                "làm thế nào",
                "difference",
                "khác nhau",
                "best",
                "tốt nhất",
                "should choose",
                "nên chọn",
                "versus",
                "or",
                "và",
                "multiple",
            ]),
        }
    }
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self::insurance()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
