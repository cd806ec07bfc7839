use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder character marking where the sequence number lands.
pub const PLACEHOLDER: char = '#';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern {0:?} has non-contiguous '#' placeholders")]
    NonContiguousHashes(String),
}

/// A parsed numbering pattern such as `arm_##_geo`.
///
/// The `#` run fixes the zero-padding width; text around it becomes prefix
/// and suffix. A pattern without any `#` is treated as if one were appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPattern {
    prefix: String,
    suffix: String,
    width: usize,
}

impl NumberPattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let mut raw = raw.to_string();
        if !raw.contains(PLACEHOLDER) {
            raw.push(PLACEHOLDER);
        }

        let width = raw.matches(PLACEHOLDER).count();
        let block: String = std::iter::repeat(PLACEHOLDER).take(width).collect();
        let Some(start) = raw.find(&block) else {
            return Err(PatternError::NonContiguousHashes(raw));
        };

        Ok(Self {
            prefix: raw[..start].to_string(),
            suffix: raw[start + width..].to_string(),
            width,
        })
    }

    /// Substitute a 1-based ordinal into the placeholder block. Ordinals wider
    /// than the block are kept whole rather than truncated.
    pub fn format(&self, ordinal: usize) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            ordinal,
            self.suffix,
            width = self.width
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_block_splits_into_prefix_and_suffix() {
        let pattern = NumberPattern::parse("arm_##_geo").unwrap();
        assert_eq!(pattern.prefix(), "arm_");
        assert_eq!(pattern.suffix(), "_geo");
        assert_eq!(pattern.width(), 2);
    }

    #[test]
    fn missing_placeholder_appends_one() {
        let pattern = NumberPattern::parse("arm").unwrap();
        assert_eq!(pattern.width(), 1);
        assert_eq!(pattern.format(3), "arm3");
    }

    #[test]
    fn placeholder_only_pattern_has_no_affixes() {
        let pattern = NumberPattern::parse("###").unwrap();
        assert_eq!(pattern.format(7), "007");
    }

    #[test]
    fn disjoint_placeholders_are_rejected() {
        let err = NumberPattern::parse("a#b#c").unwrap_err();
        assert_eq!(err, PatternError::NonContiguousHashes("a#b#c".to_string()));
    }

    #[test]
    fn ordinals_wider_than_block_are_not_truncated() {
        let pattern = NumberPattern::parse("n##").unwrap();
        assert_eq!(pattern.format(9), "n09");
        assert_eq!(pattern.format(123), "n123");
    }
}
