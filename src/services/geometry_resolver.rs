//! 几何解析 - 业务能力层
//!
//! 只负责"算出一道题在页面上的矩形并做临时标记"，不关心排序与生成页面

use crate::error::DocResult;
use crate::infrastructure::DocumentPort;
use crate::models::{
    bounding_rect, AnnotationKind, AnnotationRef, AnnotationSpec, AnnotationStyle, PageBoxKind,
    Problem, Quad, ResolvedGeometry, Rotation,
};
use tracing::{debug, info, warn};

/// 临时标记使用的注释类型
pub const MARKER_KIND: AnnotationKind = AnnotationKind::Square;

/// 几何解析器
///
/// 职责：
/// - 汇总题目所有单词的四边形，求外接矩形
/// - 按页面旋转状态校正矩形
/// - 在源页面上创建临时标记，并返回标记句柄供清理使用
pub struct GeometryResolver {
    page_box_kind: PageBoxKind,
    /// 本次运行已创建的标记数，用于保证名称唯一
    created: usize,
}

impl GeometryResolver {
    pub fn new(page_box_kind: PageBoxKind) -> Self {
        Self {
            page_box_kind,
            created: 0,
        }
    }

    /// 解析一道题的几何信息
    ///
    /// # 返回
    /// - `Ok(Some(_))`：解析成功（标记创建失败时 `annotation` 为空）
    /// - `Ok(None)`：题目的单词没有任何四边形
    /// - `Err(_)`：宿主查询失败
    pub fn resolve(
        &mut self,
        port: &mut dyn DocumentPort,
        problem: &Problem,
    ) -> DocResult<Option<ResolvedGeometry>> {
        let page = problem.page;
        let page_box = port.page_box(page, self.page_box_kind)?;
        let raw_rotation = port.page_rotation(page)?;
        let rotation = Rotation::from_degrees(raw_rotation).unwrap_or_else(|| {
            warn!(
                "[第 {} 页] ⚠️ 未知的旋转角度 {}，按 0° 处理",
                page, raw_rotation
            );
            Rotation::Deg0
        });

        let quads = self.collect_quads(port, problem)?;
        let Some(bounding_box) = bounding_rect(&quads) else {
            return Ok(None);
        };
        let rect = rotation.correct(bounding_box, &page_box);

        debug!(
            "题目 {} 共 {} 个四边形, 旋转 {}",
            problem.number,
            quads.len(),
            rotation
        );

        info!("为题目 {} 创建标记", problem.number);
        let spec = AnnotationSpec {
            rect,
            kind: MARKER_KIND,
            contents: problem.to_string(),
            name: Some(self.next_marker_name(problem.number)),
            style: Some(AnnotationStyle::marker()),
        };
        let (annotation, annotation_error) = match port.add_annotation(page, spec) {
            Ok(handle) => (Some(AnnotationRef::from(&handle)), None),
            Err(e) => {
                warn!("题目 {} 的标记创建失败: {}", problem.number, e);
                (None, Some(e.to_string()))
            }
        };

        Ok(Some(ResolvedGeometry {
            bounding_box,
            rect,
            page_box,
            rotation,
            annotation,
            annotation_error,
        }))
    }

    fn collect_quads(&self, port: &dyn DocumentPort, problem: &Problem) -> DocResult<Vec<Quad>> {
        let mut quads = Vec::new();
        for &index in &problem.word_indices {
            quads.extend(port.word_quads(problem.page, index)?);
        }
        Ok(quads)
    }

    /// 题号 + 创建时间 + 本次运行内的序号
    fn next_marker_name(&mut self, number: u64) -> String {
        self.created += 1;
        format!(
            "problem-{}-{}-{}",
            number,
            chrono::Local::now().format("%Y%m%d%H%M%S%3f"),
            self.created
        )
    }
}
