//! Substring-based value grouping.
//!
//! Buckets heterogeneous raw values into a smaller set of category labels.
//! A [`PatternList`] holds the user-configured patterns in priority order;
//! [`classify`] replaces a value with the first pattern that occurs inside
//! it as a contiguous substring, or leaves the value untouched when nothing
//! matches.
//!
//! ```
//! use pivotprep::transform::classifier::{classify, PatternList};
//! use pivotprep::models::FieldValue;
//!
//! let patterns = PatternList::parse("timeout,refused");
//! let grouped = classify(&patterns, FieldValue::text("connection refused by peer"));
//! assert_eq!(grouped, FieldValue::text("refused"));
//! ```
//!
//! Grouping applies to text cells only. Numbers, booleans and nulls pass
//! through unchanged, so a pivot over a numeric column still aggregates the
//! real values even when grouping is configured.

use crate::models::FieldValue;
use serde::{Deserialize, Serialize};

// =============================================================================
// Pattern List
// =============================================================================

/// Ordered grouping patterns, parsed from one comma-separated input string.
///
/// Order defines match priority: the leftmost pattern in the list wins, not
/// the pattern occurring leftmost in the value. A list whose *first* element
/// is the empty string is the sentinel for "grouping disabled"; an empty
/// pattern at any later position matches every value, exactly as the empty
/// string is a substring of everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternList {
    patterns: Vec<String>,
}

impl PatternList {
    /// Split a user-entered string on commas.
    ///
    /// Always yields at least one pattern: splitting the empty string gives
    /// `[""]`, the disabled sentinel. Patterns are kept verbatim, whitespace
    /// included.
    pub fn parse(input: &str) -> Self {
        Self { patterns: input.split(',').map(str::to_string).collect() }
    }

    /// Build from already-separated patterns. Empty input is normalized to
    /// the disabled sentinel so the first-element invariant always holds.
    pub fn from_patterns(patterns: Vec<String>) -> Self {
        if patterns.is_empty() {
            Self { patterns: vec![String::new()] }
        } else {
            Self { patterns }
        }
    }

    /// True when the first pattern is empty, i.e. grouping is disabled.
    pub fn is_disabled(&self) -> bool {
        self.patterns.first().map_or(true, |p| p.is_empty())
    }

    /// Patterns in priority order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// First pattern contained in `haystack`, by list order.
    pub fn first_match(&self, haystack: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|pattern| haystack.contains(pattern.as_str()))
            .map(String::as_str)
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Replace a value with the first pattern it contains.
///
/// A disabled pattern list (first pattern empty) leaves every value
/// untouched. Pure and total: for a fixed pattern list the result depends
/// on nothing but `value`, and the cost is O(patterns × value length).
/// Non-text values pass through unchanged. Every result is a fixed point:
/// a returned pattern matches itself first, since any earlier pattern it
/// contained would already have matched the original value.
pub fn classify(patterns: &PatternList, value: FieldValue) -> FieldValue {
    if patterns.is_disabled() {
        return value;
    }
    match value {
        FieldValue::Text(text) => match patterns.first_match(&text) {
            Some(pattern) => FieldValue::Text(pattern.to_string()),
            None => FieldValue::Text(text),
        },
        other => other,
    }
}

// =============================================================================
// Per-File Strategy
// =============================================================================

/// The per-value filter selected once per file load.
///
/// The disabled-sentinel check runs here, when the filter is built, not per
/// cell: the caller picks between the identity strategy and the grouping
/// strategy before the parse starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueFilter {
    /// Raw values flow through unchanged.
    Passthrough,
    /// Values are grouped by the configured patterns.
    Grouping(PatternList),
}

impl ValueFilter {
    /// Select the strategy for one file load from the current input text.
    pub fn from_pattern_text(input: &str) -> Self {
        let patterns = PatternList::parse(input);
        if patterns.is_disabled() {
            ValueFilter::Passthrough
        } else {
            ValueFilter::Grouping(patterns)
        }
    }

    /// Apply the filter to one cell value.
    pub fn apply(&self, value: FieldValue) -> FieldValue {
        match self {
            ValueFilter::Passthrough => value,
            ValueFilter::Grouping(patterns) => classify(patterns, value),
        }
    }

    /// True when this filter groups values.
    pub fn is_grouping(&self) -> bool {
        matches!(self, ValueFilter::Grouping(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::text(s)
    }

    #[test]
    fn test_empty_first_pattern_is_identity() {
        let patterns = PatternList::parse("");
        assert!(patterns.is_disabled());
        // The empty pattern is a substring of everything, so the sentinel
        // must short-circuit before any matching happens.
        assert_eq!(classify(&patterns, text("hello")), text("hello"));
        assert_eq!(classify(&patterns, text("")), text(""));

        // Later patterns are irrelevant once the first is empty.
        let patterns = PatternList::parse(",foo");
        assert!(patterns.is_disabled());
        assert_eq!(classify(&patterns, text("xfooy")), text("xfooy"));
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        let patterns = PatternList::parse("foo,bar");
        assert_eq!(classify(&patterns, text("xxfooyy")), text("foo"));
    }

    #[test]
    fn test_list_order_beats_occurrence_order() {
        // "foo" occurs first in the value, but "bar" is checked first.
        let patterns = PatternList::parse("bar,foo");
        assert_eq!(classify(&patterns, text("foobar")), text("bar"));
    }

    #[test]
    fn test_no_match_passes_through() {
        let patterns = PatternList::parse("zzz");
        assert_eq!(classify(&patterns, text("hello")), text("hello"));
    }

    #[test]
    fn test_later_empty_pattern_matches_everything() {
        // "a,,b": grouping is enabled (first pattern non-empty) and the
        // empty second pattern swallows any value "a" does not match.
        let patterns = PatternList::parse("a,,b");
        assert!(!patterns.is_disabled());
        assert_eq!(classify(&patterns, text("xax")), text("a"));
        assert_eq!(classify(&patterns, text("zzz")), text(""));
    }

    #[test]
    fn test_non_text_values_pass_through() {
        let patterns = PatternList::parse("1,true");
        assert_eq!(classify(&patterns, FieldValue::Number(15.0)), FieldValue::Number(15.0));
        assert_eq!(classify(&patterns, FieldValue::Bool(true)), FieldValue::Bool(true));
        assert_eq!(classify(&patterns, FieldValue::Null), FieldValue::Null);
    }

    #[test]
    fn test_reapplication_is_stable() {
        // Every result is a fixed point: "xba" groups to "ba", and "ba"
        // re-groups to "ba" — it contains the later pattern "a" too, but
        // "ba" sits earlier in the list and matches itself first.
        let patterns = PatternList::parse("ba,a");
        assert_eq!(classify(&patterns, text("xba")), text("ba"));

        for input in ["xba", "xa", "ab", "zzz", ""] {
            let once = classify(&patterns, text(input));
            let twice = classify(&patterns, once.clone());
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_filter_strategy_selection() {
        assert_eq!(ValueFilter::from_pattern_text(""), ValueFilter::Passthrough);
        assert!(ValueFilter::from_pattern_text("err,warn").is_grouping());
        // Empty first pattern disables grouping even with later patterns.
        assert_eq!(ValueFilter::from_pattern_text(",warn"), ValueFilter::Passthrough);
    }

    #[test]
    fn test_from_patterns_normalizes_empty() {
        let patterns = PatternList::from_patterns(vec![]);
        assert!(patterns.is_disabled());
    }

    proptest! {
        /// Disabled grouping is the identity for every value.
        #[test]
        fn prop_disabled_is_identity(value in ".*") {
            let patterns = PatternList::parse("");
            prop_assert_eq!(classify(&patterns, text(&value)), text(&value));
        }

        /// The result is always either the original value or one of the
        /// configured patterns.
        #[test]
        fn prop_result_is_value_or_pattern(
            input in "[a-c]{1,3}(,[a-c]{1,3}){0,3}",
            value in "[a-d]{0,8}",
        ) {
            let patterns = PatternList::parse(&input);
            let result = classify(&patterns, text(&value));
            let result_text = result.as_text().unwrap().to_string();
            prop_assert!(
                result_text == value
                    || patterns.patterns().contains(&result_text)
            );
        }

        /// Every classify result is a fixed point of classify.
        #[test]
        fn prop_results_are_fixed_points(
            input in "[a-c]{1,3}(,[a-c]{1,3}){0,3}",
            value in "[a-d]{0,8}",
        ) {
            let patterns = PatternList::parse(&input);
            let once = classify(&patterns, text(&value));
            prop_assert_eq!(classify(&patterns, once.clone()), once);
        }

        /// The winning pattern is the first in list order that the value
        /// contains; if none is contained the value survives.
        #[test]
        fn prop_first_match_priority(
            input in "[a-c]{1,3}(,[a-c]{1,3}){0,3}",
            value in "[a-d]{0,8}",
        ) {
            let patterns = PatternList::parse(&input);
            let expected = patterns
                .patterns()
                .iter()
                .find(|p| value.contains(p.as_str()))
                .cloned()
                .unwrap_or_else(|| value.clone());
            prop_assert_eq!(classify(&patterns, text(&value)), text(&expected));
        }
    }
}
