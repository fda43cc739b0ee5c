//! 题目处理上下文
//!
//! 封装"我正在处理第几页的第几道题"这一信息

use crate::models::Problem;
use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct ProblemCtx {
    /// 题目所在页（从 0 开始）
    pub page: usize,

    /// 印刷题号
    pub number: u64,

    /// 检测顺序中的序号（从 1 开始，仅用于日志显示）
    pub ordinal: usize,

    /// 题目总数
    pub total: usize,
}

impl ProblemCtx {
    pub fn new(problem: &Problem, ordinal: usize, total: usize) -> Self {
        Self {
            page: problem.page,
            number: problem.number,
            ordinal,
            total,
        }
    }
}

impl Display for ProblemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[题目 #{} 第{}页 {}/{}]",
            self.number, self.page, self.ordinal, self.total
        )
    }
}
