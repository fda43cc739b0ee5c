use serde::Serialize;

/// 页面上的单个单词及其行信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRecord {
    pub word: String,
    /// 行号（从 1 开始）
    pub line_index: usize,
    /// 在本页单词流中的原始索引（从 0 开始）
    pub original_index: usize,
}

/// 题号标记，如 `"12."`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemStart {
    /// 标记在单词流中的位置
    pub index: usize,
    /// 题号数字串
    pub number: String,
    pub line_index: usize,
}
