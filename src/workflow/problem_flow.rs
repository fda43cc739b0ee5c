//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的几何处理流程
//!
//! 流程顺序：
//! 1. 解析几何 → 创建临时标记
//! 2. 输出坐标日志
//! 3. 生成待裁剪的 Placement（无四边形时跳过）

use crate::config::Config;
use crate::error::DocResult;
use crate::infrastructure::DocumentPort;
use crate::models::{Placement, Problem, ResolvedGeometry, SkipReason};
use crate::services::GeometryResolver;
use crate::utils::logging::truncate_text;
use crate::workflow::problem_ctx::ProblemCtx;
use tracing::{debug, info, warn};

/// 题目处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// 得到裁剪区域；`degraded` 记录不影响裁剪的单项失败
    Placed {
        placement: Placement,
        degraded: Option<SkipReason>,
    },
    /// 跳过
    Skipped(SkipReason),
}

/// 题目处理流程
///
/// - 编排单道题的几何解析与日志输出
/// - 不持有文档，只依赖业务能力（services）
pub struct ProblemFlow {
    resolver: GeometryResolver,
    verbose_logging: bool,
}

impl ProblemFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: GeometryResolver::new(config.page_box_kind),
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn run(
        &mut self,
        port: &mut dyn DocumentPort,
        problem: Problem,
        ctx: &ProblemCtx,
    ) -> DocResult<ProcessResult> {
        info!("==== PROBLEM {} ====", problem.number);
        info!("{}", self.preview(&problem));

        let Some(geometry) = self.resolver.resolve(port, &problem)? else {
            warn!("{} ⚠️ 没有取到任何四边形，跳过此题", ctx);
            info!("");
            return Ok(ProcessResult::Skipped(SkipReason::GeometryUnresolvable));
        };

        self.log_geometry(&geometry);

        if self.verbose_logging {
            debug!(
                "{} 行: {:?}, 单词索引: {:?}",
                ctx, problem.lines, problem.word_indices
            );
        }

        let degraded = geometry
            .annotation_error
            .clone()
            .map(|reason| SkipReason::AnnotationCreateFailed { reason });
        if degraded.is_some() {
            warn!("{} ⚠️ 临时标记未创建，清理阶段由兜底扫描处理", ctx);
        }

        Ok(ProcessResult::Placed {
            placement: Placement::new(problem, &geometry),
            degraded,
        })
    }

    // ========== 日志辅助方法 ==========

    fn preview(&self, problem: &Problem) -> String {
        if self.verbose_logging {
            problem.to_string()
        } else {
            truncate_text(&problem.to_string(), 120)
        }
    }

    fn log_geometry(&self, geometry: &ResolvedGeometry) {
        let rect = geometry.rect;
        let (top, bottom) = rect.flipped_top_bottom(geometry.page_box.height());

        info!("Rectangle Coordinates:");
        info!("    Left: {}", rect.x_min);
        info!("    Right: {}", rect.x_max);
        info!("    Top: {}", rect.y_min);
        info!("    Bottom: {}", rect.y_max);
        info!("Correction coordinates ({} 页面, y 轴翻转):", geometry.rotation);
        info!("    Left: {}", rect.x_min);
        info!("    Right: {}", rect.x_max);
        info!("    Top: {}", top);
        info!("    Bottom: {}", bottom);
        info!("Bounding box: {}", geometry.bounding_box);
        info!("");
    }
}
