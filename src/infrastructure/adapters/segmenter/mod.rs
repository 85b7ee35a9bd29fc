//! Segmenter Adapter - 句子分割

mod rule_segmenter;

pub use rule_segmenter::RuleSentenceSegmenter;
