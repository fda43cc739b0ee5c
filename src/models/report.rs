//! 运行报告
//!
//! 单项失败不会中断流水线，而是作为 `SkipReason` 记录在报告中。

use serde::Serialize;
use thiserror::Error;

/// 单项处理被跳过（或降级）的原因
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// 题目的单词取不到任何四边形
    #[error("题目没有可用的四边形")]
    GeometryUnresolvable,
    /// 宿主未能创建临时标记（几何结果仍然可用）
    #[error("创建临时标记失败: {reason}")]
    AnnotationCreateFailed { reason: String },
    /// 裁剪四边形不是恰好 4 对有限坐标
    #[error("裁剪矩形格式错误 ({coords} 个坐标)")]
    MalformedRect { coords: usize },
    /// 删除注释失败
    #[error("删除注释 {name} 失败: {reason}")]
    AnnotationRemoveFailed { name: String, reason: String },
}

/// 被跳过的单项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedItem {
    pub page: usize,
    /// 题号；清理阶段的失败没有题号
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    pub reason: SkipReason,
}

/// 追加到文档末尾的裁剪页
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppendedPage {
    /// 最终文档中的页码
    pub page_index: usize,
    pub source_page: usize,
    pub problem_number: u64,
}

/// 清理统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanupStats {
    pub removed_by_name: usize,
    pub removed_by_sweep: usize,
    /// 按名称查找时已不存在的标记
    pub already_absent: usize,
    pub failures: Vec<SkippedItem>,
}

impl CleanupStats {
    pub fn removed(&self) -> usize {
        self.removed_by_name + self.removed_by_sweep
    }

    pub fn merge(&mut self, other: CleanupStats) {
        self.removed_by_name += other.removed_by_name;
        self.removed_by_sweep += other.removed_by_sweep;
        self.already_absent += other.already_absent;
        self.failures.extend(other.failures);
    }
}

/// 运行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    #[default]
    Completed,
    /// 整个文档没有题号标记
    NoProblems,
}

/// 一次运行的完整报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub original_pages: usize,
    pub problem_pages: usize,
    /// 第一张裁剪页的页码（等于原始页数）
    pub split_point: usize,
    pub segmented: usize,
    pub resolved: usize,
    pub appended: Vec<AppendedPage>,
    pub skipped: Vec<SkippedItem>,
    pub cleanup: CleanupStats,
}

impl RunReport {
    pub fn new(original_pages: usize) -> Self {
        Self {
            original_pages,
            split_point: original_pages,
            ..Default::default()
        }
    }

    pub fn skip(&mut self, page: usize, number: Option<u64>, reason: SkipReason) {
        self.skipped.push(SkippedItem {
            page,
            number,
            reason,
        });
    }

    pub fn total_pages(&self) -> usize {
        self.original_pages + self.problem_pages
    }
}
