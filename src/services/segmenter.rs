//! 题目切分 - 业务能力层
//!
//! 只负责"把一页的单词流切成若干道题"，不关心几何与页面生成

use crate::error::AppResult;
use crate::models::{Problem, ProblemStart, WordRecord};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::warn;

/// 题号标记：整个单词是"数字 + 句点"，句点后只允许空白
const MARKER_PATTERN: &str = r"^([0-9]+)\.\s*$";

/// 题目切分器
///
/// 职责：
/// - 识别题号标记
/// - 按标记把单词流切成题目
/// - 过滤题干中形如 "0." / "0.0" 的噪声单词
pub struct ProblemSegmenter {
    marker: Regex,
}

impl ProblemSegmenter {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            marker: Regex::new(MARKER_PATTERN)?,
        })
    }

    /// 单词是否为题号标记
    ///
    /// 全零的题号（"0." / "00."）有意不算标记：它们只出现在题干里（如小数、
    /// 坐标），按噪声处理。
    pub fn is_marker(&self, word: &str) -> bool {
        self.marker.is_match(word) && !is_numeral_noise(word)
    }

    /// 找出所有题号标记
    pub fn find_starts(&self, records: &[WordRecord]) -> Vec<ProblemStart> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| !is_numeral_noise(&record.word))
            .filter_map(|(index, record)| {
                self.marker.captures(&record.word).map(|caps| ProblemStart {
                    index,
                    number: caps[1].to_string(),
                    line_index: record.line_index,
                })
            })
            .collect()
    }

    /// 把一页的单词流切分成题目
    ///
    /// 每个标记到下一个标记（或页尾）之间的单词属于同一道题。
    pub fn segment_page(&self, page: usize, records: &[WordRecord]) -> Vec<Problem> {
        let starts = self.find_starts(records);

        starts
            .iter()
            .enumerate()
            .map(|(i, start)| {
                let end = starts.get(i + 1).map_or(records.len(), |next| next.index);
                build_problem(page, start, &records[start.index..end])
            })
            .collect()
    }
}

fn build_problem(page: usize, start: &ProblemStart, span: &[WordRecord]) -> Problem {
    let mut words = Vec::with_capacity(span.len());
    let mut lines = BTreeSet::new();
    let mut word_indices = Vec::with_capacity(span.len());

    for (offset, record) in span.iter().enumerate() {
        if offset != 0 && is_numeral_noise(&record.word) {
            continue;
        }
        words.push(record.word.as_str());
        lines.insert(record.line_index);
        word_indices.push(record.original_index);
    }

    Problem {
        page,
        number: parse_number(&start.number, page),
        text: words.join(" "),
        lines,
        word_indices,
        position: None,
    }
}

/// 只由 '0' 和 '.' 组成的单词
fn is_numeral_noise(word: &str) -> bool {
    let trimmed = word.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '0' || c == '.')
}

fn parse_number(digits: &str, page: usize) -> u64 {
    digits.parse().unwrap_or_else(|_| {
        warn!(
            "[第 {} 页] ⚠️ 题号 {} 超出范围，按 {} 处理",
            page,
            digits,
            u64::MAX
        );
        u64::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::word_stream::WordStreamExtractor;

    fn records(words: &[&str]) -> Vec<WordRecord> {
        WordStreamExtractor::new(100).build_records(words.iter().copied())
    }

    fn segmenter() -> ProblemSegmenter {
        ProblemSegmenter::new().unwrap()
    }

    #[test]
    fn test_marker_matching() {
        let s = segmenter();
        assert!(s.is_marker("12."));
        assert!(s.is_marker("3. "));
        assert!(s.is_marker("7.\n"));
        assert!(!s.is_marker("a12."));
        assert!(!s.is_marker("12.5"));
        assert!(!s.is_marker("12.5 "));
        assert!(!s.is_marker("12"));
        assert!(!s.is_marker(" 12."));
        assert!(!s.is_marker("."));
    }

    #[test]
    fn test_non_ascii_digits_are_not_markers() {
        assert!(!segmenter().is_marker("١٢."));
    }

    #[test]
    fn test_segment_two_problems() {
        let recs = records(&["1.", "Solve", "x.", "2.", "Find", "y."]);
        let problems = segmenter().segment_page(0, &recs);

        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].number, 1);
        assert_eq!(problems[0].text, "1. Solve x.");
        assert_eq!(problems[0].word_indices, vec![0, 1, 2]);
        assert_eq!(problems[1].number, 2);
        assert_eq!(problems[1].text, "2. Find y.");
        assert_eq!(problems[1].word_indices, vec![3, 4, 5]);
        assert!(problems.iter().all(|p| !p.is_resolved()));
    }

    #[test]
    fn test_words_before_first_marker_are_ignored() {
        let recs = records(&["Homework", "Set", "1.", "Add"]);
        let problems = segmenter().segment_page(2, &recs);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].page, 2);
        assert_eq!(problems[0].text, "1. Add");
        assert_eq!(problems[0].word_indices, vec![2, 3]);
    }

    #[test]
    fn test_zero_markers_are_body_noise() {
        let s = segmenter();
        assert!(!s.is_marker("0."));
        assert!(!s.is_marker("00. "));
        assert!(s.is_marker("10."));

        let recs = records(&["1.", "Compute", "0.", "plus", "0.0", "and", "..", "0.5"]);
        let problems = s.segment_page(0, &recs);

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].text, "1. Compute plus and 0.5");
        assert_eq!(problems[0].word_indices, vec![0, 1, 3, 5, 7]);
    }

    #[test]
    fn test_noise_tokens_inside_body_do_not_split() {
        let recs = records(&["1.", "Let", "x", "=", "0.0", "and", "00", "3."]);
        let problems = segmenter().segment_page(0, &recs);
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].text, "1. Let x = and");
        assert_eq!(problems[1].text, "3.");
    }

    #[test]
    fn test_lone_marker_has_empty_body() {
        let recs = records(&["5."]);
        let problems = segmenter().segment_page(0, &recs);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].text, "5.");
        assert_eq!(problems[0].word_indices, vec![0]);
        assert_eq!(problems[0].lines.iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_no_markers_no_problems() {
        let recs = records(&["Just", "some", "prose", "12.5"]);
        assert!(segmenter().segment_page(0, &recs).is_empty());
        assert!(segmenter().segment_page(0, &[]).is_empty());
    }

    #[test]
    fn test_start_count_matches_problem_count() {
        let recs = records(&["1.", "a", "2.", "b", "0.0", "3.", "4.", "c"]);
        let s = segmenter();
        assert_eq!(s.find_starts(&recs).len(), s.segment_page(0, &recs).len());
    }

    #[test]
    fn test_text_round_trips_through_word_indices() {
        let recs = records(&["1.", "Solve", "0.", "2.", "x", "..", "y\n", "z"]);
        for problem in segmenter().segment_page(0, &recs) {
            let joined: Vec<&str> = problem
                .word_indices
                .iter()
                .map(|&i| recs[i].word.as_str())
                .collect();
            assert_eq!(joined.join(" "), problem.text);
            assert!(problem.word_indices.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_lines_are_sorted_distinct() {
        let recs = records(&["1.", "a\n", "b", "c\n", "d"]);
        let problems = segmenter().segment_page(0, &recs);
        assert_eq!(
            problems[0].lines.iter().copied().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_huge_number_saturates() {
        let recs = records(&["99999999999999999999999."]);
        let problems = segmenter().segment_page(0, &recs);
        assert_eq!(problems[0].number, u64::MAX);
    }
}
