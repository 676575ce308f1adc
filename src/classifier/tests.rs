use super::rules::ClassifierRules;
use super::{QueryClassifier, QueryComplexity};

#[test]
fn test_classify_is_deterministic() {
    let classifier = QueryClassifier::new();
    let query = "Tại sao tôi nên chọn bảo hiểm A thay vì B?";

    let first = classifier.classify(query);
    for _ in 0..5 {
        assert_eq!(classifier.classify(query), first);
    }
}

#[test]
fn test_classify_domain_fee_pattern_is_simple() {
    let classifier = QueryClassifier::new();

    assert_eq!(
        classifier.classify("price of item X?"),
        QueryComplexity::Simple
    );
    assert_eq!(
        classifier.classify("Phí bảo hiểm xe hơi bao nhiêu?"),
        QueryComplexity::Simple
    );
    assert_eq!(
        classifier.classify("insurance premium for the basic plan"),
        QueryComplexity::Simple
    );
}

#[test]
fn test_classify_clause_and_definition_patterns() {
    let classifier = QueryClassifier::new();

    assert_eq!(
        classifier.classify("What does clause 5 say?"),
        QueryComplexity::Simple
    );
    assert_eq!(
        classifier.classify("definition of deductible"),
        QueryComplexity::Simple
    );
    assert_eq!(
        classifier.classify("what does co-pay mean"),
        QueryComplexity::Simple
    );
}

#[test]
fn test_classify_general_lead_words_are_simple() {
    let classifier = QueryClassifier::new();

    assert_eq!(
        classifier.classify("Who is the policy holder"),
        QueryComplexity::Simple
    );
    assert_eq!(
        classifier.classify("what is the capital of France"),
        QueryComplexity::Simple
    );
    assert_eq!(
        classifier.classify("Does the plan cover dental?"),
        QueryComplexity::Simple
    );
}

#[test]
fn test_classify_simple_pattern_overrides_indicators() {
    let classifier = QueryClassifier::new();

    // Matches a domain simple pattern while carrying three indicator terms;
    // the earlier rule must win.
    let query = "price of the best plan to compare or not";
    assert_eq!(classifier.classify(query), QueryComplexity::Simple);
}

#[test]
fn test_classify_two_indicators_is_complex() {
    let classifier = QueryClassifier::new();

    assert_eq!(
        classifier.classify("compare the basic plan against the best alternative"),
        QueryComplexity::Complex
    );
}

#[test]
fn test_classify_long_query_is_complex() {
    let classifier = QueryClassifier::new();

    // 25 words, two indicator terms.
    let query = "please compare the family coverage against the individual coverage and tell \
                 me which one gives the best value for a household of four people";
    assert_eq!(classifier.classify(query), QueryComplexity::Complex);

    // 22 words and no indicators still crosses the length bound.
    let query = "the policy document that arrived in the mail last week mentions several \
                 exclusions near the end that I could not fully understand";
    assert_eq!(classifier.classify(query), QueryComplexity::Complex);
}

#[test]
fn test_classify_single_indicator_is_moderate() {
    let classifier = QueryClassifier::new();

    assert_eq!(
        classifier.classify("health coverage versus dental coverage"),
        QueryComplexity::Moderate
    );
}

#[test]
fn test_classify_medium_length_is_moderate() {
    let classifier = QueryClassifier::new();

    // 11 words, no indicators, no simple-pattern match.
    let query = "the quick brown fox jumped over a lazy dog again today";
    assert_eq!(classifier.classify(query), QueryComplexity::Moderate);
}

#[test]
fn test_classify_short_plain_query_is_simple() {
    let classifier = QueryClassifier::new();

    assert_eq!(
        classifier.classify("coverage start date"),
        QueryComplexity::Simple
    );
}

#[test]
fn test_indicator_matching_respects_word_boundaries() {
    let classifier = QueryClassifier::new();

    // "for" must not count as "or", "bestseller" must not count as "best".
    assert_eq!(
        classifier.classify("renewal form for the bestseller plan"),
        QueryComplexity::Simple
    );
}

#[test]
fn test_classify_normalizes_case_and_whitespace() {
    let classifier = QueryClassifier::new();

    assert_eq!(
        classifier.classify("  PRICE OF ITEM X?  "),
        QueryComplexity::Simple
    );
}

#[test]
fn test_complexity_ordering() {
    assert!(QueryComplexity::Simple < QueryComplexity::Moderate);
    assert!(QueryComplexity::Moderate < QueryComplexity::Complex);
}

#[test]
fn test_complexity_display_names() {
    assert_eq!(QueryComplexity::Simple.as_str(), "simple");
    assert_eq!(QueryComplexity::Moderate.to_string(), "moderate");
    assert_eq!(QueryComplexity::Complex.to_string(), "complex");
}

#[test]
fn test_explain_reports_matched_rules() {
    let classifier = QueryClassifier::new();

    let report = classifier.explain("price of item X?");
    assert_eq!(report.complexity, QueryComplexity::Simple);
    assert!(!report.matched_domain_patterns.is_empty());
    assert!(report.matched_indicators.is_empty());
    assert_eq!(report.word_count, 4);

    let report = classifier.explain("compare the best plans");
    assert_eq!(report.complexity, QueryComplexity::Complex);
    assert_eq!(report.matched_indicators.len(), 2);
    assert!(report.matched_indicators.contains(&"compare".to_string()));
    assert!(report.matched_indicators.contains(&"best".to_string()));
}

#[test]
fn test_explain_is_repeatable() {
    let classifier = QueryClassifier::new();
    let query = "compare health and dental coverage for the best outcome";

    let first = classifier.explain(query);
    let second = classifier.explain(query);

    assert_eq!(first.complexity, second.complexity);
    assert_eq!(first.matched_indicators, second.matched_indicators);
    assert_eq!(first.word_count, second.word_count);
}

#[test]
fn test_with_rules_rejects_invalid_pattern() {
    let rules = ClassifierRules {
        domain_simple: vec!["(unclosed".to_string()],
        general_simple: Vec::new(),
        complex_indicators: Vec::new(),
    };

    assert!(QueryClassifier::with_rules(&rules).is_err());
}

#[test]
fn test_with_rules_custom_domain() {
    let rules = ClassifierRules {
        domain_simple: vec![r"ticket\s+\d+".to_string()],
        general_simple: Vec::new(),
        complex_indicators: vec!["escalate".to_string()],
    };
    let classifier = QueryClassifier::with_rules(&rules).expect("rules compile");

    assert_eq!(
        classifier.classify("status of ticket 123"),
        QueryComplexity::Simple
    );
    assert_eq!(
        classifier.classify("escalate this issue please"),
        QueryComplexity::Moderate
    );
}
