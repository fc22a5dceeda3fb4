//! Literal pattern construction
//!
//! Every character of the source text is matched literally. Case folding
//! and word-boundary anchors are the only options. Exact matching without
//! anchors is a plain substring search; everything else compiles a regex
//! whose size limits grow with the literal.

use crate::config::PropagatorConfig;
use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// Compiled program budget per byte of escaped pattern
const PROGRAM_BYTES_PER_PATTERN_BYTE: usize = 1 << 10;
/// Lazy DFA cache budget per byte of escaped pattern
const DFA_BYTES_PER_PATTERN_BYTE: usize = 1 << 6;
/// Default limits of `RegexBuilder`
const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);
const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

/// Matching options shared by all patterns of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    /// Match letter case exactly
    pub case_sensitive: bool,
    /// Anchor matches on word boundaries
    pub respect_word_boundaries: bool,
}

impl From<&PropagatorConfig> for PatternOptions {
    fn from(config: &PropagatorConfig) -> Self {
        Self {
            case_sensitive: config.case_sensitive,
            respect_word_boundaries: config.respect_word_boundaries,
        }
    }
}

/// Compiled literal pattern for one source text
#[derive(Debug, Clone)]
pub enum SpanPattern {
    /// Case-sensitive text without anchors
    Literal(String),
    /// Case folding and/or word-boundary anchors
    Regex(Regex),
}

impl SpanPattern {
    /// Compile a pattern for `text`
    ///
    /// Returns `None` for empty text: a zero-length span yields no matches.
    pub fn build(text: &str, options: PatternOptions) -> Result<Option<Self>> {
        if text.is_empty() {
            return Ok(None);
        }

        if options.case_sensitive && !options.respect_word_boundaries {
            return Ok(Some(Self::Literal(text.to_string())));
        }

        let escaped = regex::escape(text);
        let pattern = if options.respect_word_boundaries {
            format!(r"\b{escaped}\b")
        } else {
            escaped
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!options.case_sensitive)
            .size_limit(
                pattern
                    .len()
                    .saturating_mul(PROGRAM_BYTES_PER_PATTERN_BYTE)
                    .max(DEFAULT_SIZE_LIMIT),
            )
            .dfa_size_limit(
                pattern
                    .len()
                    .saturating_mul(DFA_BYTES_PER_PATTERN_BYTE)
                    .max(DEFAULT_DFA_SIZE_LIMIT),
            )
            .build()?;
        Ok(Some(Self::Regex(regex)))
    }

    /// Non-overlapping matches in `haystack`, left to right, as local byte ranges
    pub fn find_iter<'a>(
        &'a self,
        haystack: &'a str,
    ) -> Box<dyn Iterator<Item = (usize, usize)> + 'a> {
        match self {
            Self::Literal(text) => Box::new(
                haystack
                    .match_indices(text.as_str())
                    .map(|(start, m)| (start, start + m.len())),
            ),
            Self::Regex(regex) => Box::new(regex.find_iter(haystack).map(|m| (m.start(), m.end()))),
        }
    }

    /// The literal text or compiled regular expression source
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Regex(regex) => regex.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXACT: PatternOptions = PatternOptions {
        case_sensitive: true,
        respect_word_boundaries: false,
    };

    fn matches(text: &str, haystack: &str, options: PatternOptions) -> Vec<(usize, usize)> {
        SpanPattern::build(text, options)
            .unwrap()
            .map(|p| p.find_iter(haystack).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert_eq!(matches("a.b", "axb a.b", EXACT), vec![(4, 7)]);
        assert_eq!(matches("IL-2 (human)", "IL-2 (human)", EXACT), vec![(0, 12)]);
        assert_eq!(matches("x+", "xxx x+", EXACT), vec![(4, 6)]);
        assert_eq!(matches(r"\d", r"1 \d", EXACT), vec![(2, 4)]);
    }

    #[test]
    fn test_case_sensitivity() {
        let insensitive = PatternOptions {
            case_sensitive: false,
            ..EXACT
        };
        assert_eq!(matches("Cat", "The cat sat", insensitive), vec![(4, 7)]);
        assert!(matches("Cat", "The cat sat", EXACT).is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        let bounded = PatternOptions {
            respect_word_boundaries: true,
            ..EXACT
        };
        assert!(matches("cat", "category", bounded).is_empty());
        assert_eq!(matches("cat", "category", EXACT), vec![(0, 3)]);
        assert_eq!(matches("cat", "a cat.", bounded), vec![(2, 5)]);
    }

    #[test]
    fn test_non_overlapping_scan() {
        assert_eq!(matches("aa", "aaaa", EXACT), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_empty_text_builds_no_pattern() {
        assert!(SpanPattern::build("", EXACT).unwrap().is_none());
    }

    #[test]
    fn test_exact_matching_skips_regex() {
        let pattern = SpanPattern::build("a.b", EXACT).unwrap().unwrap();
        assert!(matches!(pattern, SpanPattern::Literal(_)));
        assert_eq!(pattern.as_str(), "a.b");
        assert_eq!(matches("é", "éé é", EXACT), vec![(0, 2), (2, 4), (5, 7)]);
    }

    #[test]
    fn test_long_text_compiles_in_every_mode() {
        let text = "é".repeat(200_000);
        for case_sensitive in [true, false] {
            for respect_word_boundaries in [true, false] {
                let options = PatternOptions {
                    case_sensitive,
                    respect_word_boundaries,
                };
                let pattern = SpanPattern::build(&text, options).unwrap();
                assert!(pattern.is_some(), "{options:?}");
            }
        }
    }

    #[test]
    fn test_pattern_source() {
        let bounded = PatternOptions {
            respect_word_boundaries: true,
            ..EXACT
        };
        let pattern = SpanPattern::build("a.b", bounded).unwrap().unwrap();
        assert_eq!(pattern.as_str(), r"\ba\.b\b");
    }
}
