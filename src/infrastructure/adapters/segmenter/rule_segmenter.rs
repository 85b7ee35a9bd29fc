//! Rule Sentence Segmenter - 基于标点规则的分句器
//!
//! 实现 TextSegmenterPort trait，规则本身在领域层

use crate::application::ports::{SegmentError, TextSegmenterPort};
use crate::domain::{segment_sentences, SegmentConfig};

/// 规则分句器
#[derive(Debug, Clone, Default)]
pub struct RuleSentenceSegmenter {
    config: SegmentConfig,
}

impl RuleSentenceSegmenter {
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }
}

impl TextSegmenterPort for RuleSentenceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, SegmentError> {
        Ok(segment_sentences(text, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_sentence_per_line() {
        let segmenter = RuleSentenceSegmenter::default();
        let sentences = segmenter
            .segment("Aries is a fire sign.\nIt rules the head. Taurus follows!")
            .unwrap();

        assert_eq!(
            sentences,
            vec!["Aries is a fire sign.", "It rules the head.", "Taurus follows!"]
        );
    }

    #[test]
    fn test_min_chars_config() {
        let segmenter = RuleSentenceSegmenter::new(SegmentConfig { min_chars: 20 });
        let sentences = segmenter.segment("Short. Also short. Long enough now.").unwrap();
        assert_eq!(sentences, vec!["Short. Also short. Long enough now."]);
    }
}
