use crate::models::annotation::AnnotationRef;
use crate::models::geometry::{PageBox, Quad, Rect, Rotation};
use crate::models::problem::{Position, Problem};

/// 几何解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeometry {
    /// 所有单词四边形的外接矩形（旋转校正前）
    pub bounding_box: Rect,
    /// 旋转校正后的矩形
    pub rect: Rect,
    pub page_box: PageBox,
    pub rotation: Rotation,
    /// 临时标记的句柄，创建失败时为空
    pub annotation: Option<AnnotationRef>,
    /// 临时标记创建失败的原因
    pub annotation_error: Option<String>,
}

impl ResolvedGeometry {
    pub fn position(&self) -> Position {
        Position::from_rect(&self.rect, &self.page_box)
    }
}

/// 待生成裁剪页的题目
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// 已解析的题目（`position` 已填充）
    pub problem: Problem,
    pub rect: Rect,
    /// 裁剪用四边形
    pub quad: Quad,
    pub annotation: Option<AnnotationRef>,
}

impl Placement {
    pub fn new(mut problem: Problem, geometry: &ResolvedGeometry) -> Self {
        problem.position = Some(geometry.position());
        Self {
            problem,
            rect: geometry.rect,
            quad: geometry.rect.to_quad(),
            annotation: geometry.annotation.clone(),
        }
    }

    pub fn position(&self) -> Position {
        self.problem.position.unwrap_or_default()
    }
}
