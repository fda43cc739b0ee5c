//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理一个文档的全部题目，是文档级别的编排器。
//!
//! ## 阶段顺序
//!
//! 1. **分题**：逐页提取单词流并按题号切分
//! 2. **定位**：逐题解析几何并创建临时标记（委托 `ProblemFlow`）
//! 3. **排序**：按（页码，行带，横向位置）排阅读顺序
//! 4. **生成**：在原始页之后追加裁剪页
//! 5. **清理**：删除原始页上的临时标记
//!
//! 单项失败写入 `RunReport`，宿主的其他错误直接向上传播，不回滚。

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::DocumentPort;
use crate::models::{AnnotationRef, Placement, Problem, RunOutcome, RunReport};
use crate::services::{
    AnnotationCleaner, PageMaterializer, ProblemSegmenter, ReadingOrderSorter,
    WordStreamExtractor, MARKER_KIND,
};
use crate::workflow::{ProblemCtx, ProblemFlow, ProcessResult};
use tracing::{debug, info, warn};

/// 处理一个文档
///
/// # 参数
/// - `port`: 宿主文档
/// - `config`: 配置
///
/// # 返回
/// 本次运行的报告；没有任何题号时 `outcome` 为 `NoProblems`，文档保持不变
pub fn process_document(port: &mut dyn DocumentPort, config: &Config) -> AppResult<RunReport> {
    let original_pages = port.page_count();
    let mut report = RunReport::new(original_pages);

    log_document_start(port.source_path(), original_pages);

    // ========== 阶段 1：分题 ==========
    let problems = segment_all(port, config)?;
    report.segmented = problems.len();

    if problems.is_empty() {
        warn!("⚠️ 没有找到任何题号，文档保持不变");
        report.outcome = RunOutcome::NoProblems;
        return Ok(report);
    }
    info!("✓ 共找到 {} 道题目\n", problems.len());

    // ========== 阶段 2：定位与标记 ==========
    let mut flow = ProblemFlow::new(config);
    let total = problems.len();
    let mut placements: Vec<Placement> = Vec::with_capacity(total);

    for (index, problem) in problems.into_iter().enumerate() {
        let ctx = ProblemCtx::new(&problem, index + 1, total);
        match flow.run(port, problem, &ctx)? {
            ProcessResult::Placed {
                placement,
                degraded,
            } => {
                if let Some(reason) = degraded {
                    report.skip(ctx.page, Some(ctx.number), reason);
                }
                placements.push(placement);
            }
            ProcessResult::Skipped(reason) => {
                report.skip(ctx.page, Some(ctx.number), reason);
            }
        }
    }
    report.resolved = placements.len();

    let markers: Vec<AnnotationRef> = placements
        .iter()
        .filter_map(|p| p.annotation.clone())
        .collect();

    // ========== 阶段 3：排序 ==========
    let sorted = ReadingOrderSorter::new(config.band_tolerance).sort(placements);
    log_reading_order(&sorted);

    // ========== 阶段 4：生成裁剪页 ==========
    let materialized =
        PageMaterializer::new(config.header_height).materialize(port, sorted, original_pages)?;
    report.problem_pages = materialized.appended.len();
    report.appended = materialized.appended;
    report.skipped.extend(materialized.skipped);

    // ========== 阶段 5：清理临时标记 ==========
    report.cleanup = AnnotationCleaner::new(MARKER_KIND).clean(port, &markers, original_pages);

    log_document_complete(&report);
    Ok(report)
}

/// 逐页提取并切分题目
fn segment_all(port: &dyn DocumentPort, config: &Config) -> AppResult<Vec<Problem>> {
    let extractor = WordStreamExtractor::new(config.line_break_threshold);
    let segmenter = ProblemSegmenter::new()?;

    let mut problems = Vec::new();
    for page in 0..port.page_count() {
        let records = extractor.extract(port, page)?;
        let found = segmenter.segment_page(page, &records);
        debug!("第 {} 页: {} 个单词, {} 道题", page, records.len(), found.len());
        problems.extend(found);
    }
    Ok(problems)
}

// ========== 日志辅助函数 ==========

fn log_document_start(source: &str, pages: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📄 开始处理文档: {}", source);
    info!("📊 原始页数: {}", pages);
    info!("{}", "=".repeat(60));
}

fn log_reading_order(sorted: &[Placement]) {
    let order: Vec<String> = sorted
        .iter()
        .map(|p| format!("{}@{}", p.problem.number, p.problem.page))
        .collect();
    info!("📋 阅读顺序: {}", order.join(", "));
}

fn log_document_complete(report: &RunReport) {
    info!("\n{}", "─".repeat(60));
    info!("Original pages: {}", report.original_pages);
    info!("Problem pages: {}", report.problem_pages);
    info!("Split point: {}", report.split_point);
    for page in &report.appended {
        info!(
            "  第 {} 页 ← Problem {} (源页 {})",
            page.page_index, page.problem_number, page.source_page
        );
    }
    if !report.skipped.is_empty() {
        warn!("⚠️ 跳过 {} 项:", report.skipped.len());
        for item in &report.skipped {
            warn!("  第 {} 页 {:?}: {}", item.page, item.number, item.reason);
        }
    }
    info!("{}", "─".repeat(60));
}
