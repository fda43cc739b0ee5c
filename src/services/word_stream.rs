//! 单词流提取 - 业务能力层
//!
//! 只负责"把一页的单词连同行号读出来"，不关心题目

use crate::error::DocResult;
use crate::infrastructure::DocumentPort;
use crate::models::WordRecord;

/// 单词流提取器
pub struct WordStreamExtractor {
    /// 行缓冲超过该字符数时视为折行
    line_break_threshold: usize,
}

impl WordStreamExtractor {
    pub fn new(line_break_threshold: usize) -> Self {
        Self {
            line_break_threshold,
        }
    }

    /// 读取一页的全部单词
    pub fn extract(&self, port: &dyn DocumentPort, page: usize) -> DocResult<Vec<WordRecord>> {
        let count = port.word_count(page)?;
        let mut words = Vec::with_capacity(count);
        for index in 0..count {
            words.push(port.word_at(page, index)?);
        }
        Ok(self.build_records(words))
    }

    /// 为单词序列分配行号
    ///
    /// 单词本身含换行符，或者当前行已累积超过阈值个字符时，从该单词起换到下一行。
    pub fn build_records<I, S>(&self, words: I) -> Vec<WordRecord>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut line_index = 1;
        let mut line_len = 0usize;

        words
            .into_iter()
            .enumerate()
            .map(|(original_index, word)| {
                let word: String = word.into();
                if word.contains('\n') || line_len > self.line_break_threshold {
                    line_index += 1;
                    line_len = 0;
                }
                // 与单词后的空格一起计入
                line_len += word.chars().count() + 1;

                WordRecord {
                    word,
                    line_index,
                    original_index,
                }
            })
            .collect()
    }
}
