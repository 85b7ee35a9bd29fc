//! 句子分割器
//!
//! 将文档原文拆成一句一行。PDF 提取出的文本带有硬换行，
//! 先按空行还原段落，再在段落内按句末标点切分。

/// 默认最小字符数限制（0 表示不合并短句）
pub const DEFAULT_MIN_CHARS: usize = 0;

/// 句点结尾但不构成句末的常见缩写（小写比较）
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "st.", "jr.", "sr.", "vs.", "etc.", "e.g.", "i.e.",
    "no.", "fig.", "vol.", "approx.", "cf.",
];

/// 文本分割配置
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// 最小字符数限制（用于合并短句）
    pub min_chars: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

/// 检查是否为句末标点
#[inline]
fn is_strong_delimiter(ch: char) -> bool {
    matches!(ch, '。' | '？' | '！' | '.' | '?' | '!')
}

/// 全角句末标点后无需空白即可断句
#[inline]
fn is_cjk_delimiter(ch: char) -> bool {
    matches!(ch, '。' | '？' | '！')
}

/// 紧跟句末标点、应归属前一句的收尾字符
#[inline]
fn is_closing_char(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}' | '」' | '』')
}

/// 检查片段是否只包含引号或空白（应该被合并）
#[inline]
fn is_trivial_segment(s: &str) -> bool {
    s.chars().all(|c| {
        matches!(
            c,
            '"' | '\u{201C}' | '\u{201D}' | '\'' | '\u{2018}' | '\u{2019}' | ' ' | '\t'
        )
    })
}

fn ends_with_abbreviation(current: &str) -> bool {
    current
        .split_whitespace()
        .last()
        .map(|word| {
            let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
            ABBREVIATIONS.contains(&word.to_lowercase().as_str())
        })
        .unwrap_or(false)
}

/// 还原段落：空行分段，段内硬换行合并为空格，行尾连字符与小写续行直接拼接
fn join_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }

        let continues_word = current.ends_with('-')
            && line.chars().next().is_some_and(|c| c.is_lowercase());
        if continues_word {
            current.pop();
        } else if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
        .into_iter()
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// 在段落内按句末标点切分（不做合并）
fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = paragraph.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);

        if !is_strong_delimiter(ch) {
            continue;
        }

        // 连续标点（"..."、"?!"）留到最后一个再判断
        if chars.peek().is_some_and(|&c| is_strong_delimiter(c)) {
            continue;
        }

        while let Some(&next) = chars.peek() {
            if !is_closing_char(next) {
                break;
            }
            current.push(next);
            chars.next();
        }

        let at_boundary = is_cjk_delimiter(ch)
            || chars.peek().map_or(true, |c| c.is_whitespace());
        let is_abbreviation = ch == '.' && ends_with_abbreviation(&current);

        if at_boundary && !is_abbreviation {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// 合并短句直到满足 min_chars
fn merge_until_min_chars(sentences: Vec<String>, min_chars: usize) -> Vec<String> {
    if sentences.is_empty() || min_chars == 0 {
        return sentences;
    }

    let mut result: Vec<String> = Vec::new();
    let mut buffer = String::new();

    for sentence in sentences {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(&sentence);

        if buffer.chars().count() >= min_chars {
            result.push(std::mem::take(&mut buffer));
        }
    }

    // 处理剩余buffer
    if !buffer.is_empty() {
        if let Some(last) = result.last_mut() {
            last.push(' ');
            last.push_str(&buffer);
        } else {
            result.push(buffer);
        }
    }

    result
}

/// 对文本进行分句
///
/// 分句策略：
/// 1. 按空行还原段落，段内换行视为空格
/// 2. 段落内按句末标点切分，跳过缩写和小数点
/// 3. 只有引号的片段合并到前一句
/// 4. 按 min_chars 合并过短的句子（段落之间不合并）
pub fn segment_sentences(text: &str, config: &SegmentConfig) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    for paragraph in join_paragraphs(text) {
        let mut sentences: Vec<String> = Vec::new();
        for sentence in split_sentences(&paragraph) {
            if is_trivial_segment(&sentence) {
                if let Some(last) = sentences.last_mut() {
                    last.push_str(&sentence);
                }
            } else {
                sentences.push(sentence);
            }
        }
        result.extend(merge_until_min_chars(sentences, config.min_chars));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Vec<String> {
        segment_sentences(text, &SegmentConfig::default())
    }

    #[test]
    fn test_single_letter_sentences() {
        assert_eq!(segment("A. B. C."), vec!["A.", "B.", "C."]);
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let sentences = segment("Dr. Smith met Mrs. Jones, e.g. at noon. They talked.");
        assert_eq!(
            sentences,
            vec!["Dr. Smith met Mrs. Jones, e.g. at noon.", "They talked."]
        );
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        assert_eq!(
            segment("Pi is roughly 3.14 in value. Yes!"),
            vec!["Pi is roughly 3.14 in value.", "Yes!"]
        );
    }

    #[test]
    fn test_hard_wrapped_lines_are_joined() {
        let text = "The zodiac has twelve\nsigns. Each sign is tied\nto a season.\n\nNew paragraph.";
        assert_eq!(
            segment(text),
            vec![
                "The zodiac has twelve signs.",
                "Each sign is tied to a season.",
                "New paragraph.",
            ]
        );
    }

    #[test]
    fn test_hyphenated_line_break_rejoined() {
        assert_eq!(
            segment("Astro-\nlogy is old. Well-\nKnown too."),
            vec!["Astrology is old.", "Well- Known too."]
        );
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        assert_eq!(
            segment("He said \"Look up.\" Then he left."),
            vec!["He said \"Look up.\"", "Then he left."]
        );
    }

    #[test]
    fn test_repeated_punctuation() {
        assert_eq!(segment("Really?! Yes... fine."), vec!["Really?!", "Yes...", "fine."]);
    }

    #[test]
    fn test_cjk_sentences() {
        assert_eq!(segment("第一句。第二句！"), vec!["第一句。", "第二句！"]);
    }

    #[test]
    fn test_min_chars_merges_short_sentences() {
        let config = SegmentConfig { min_chars: 10 };
        let sentences = segment_sentences("Hi. Yo. This one is long enough.", &config);
        assert_eq!(sentences, vec!["Hi. Yo. This one is long enough."]);
    }

    #[test]
    fn test_quote_only_segment_merged() {
        assert!(is_trivial_segment("\""));
        assert!(is_trivial_segment("\" "));
        assert!(!is_trivial_segment("内容"));
    }

    #[test]
    fn test_empty_text() {
        assert!(segment("").is_empty());
        assert!(segment("\n\n  \n").is_empty());
    }
}
