//! 宿主文档接口 - 基础设施层
//!
//! 流水线对文档的所有读写都经过这个 trait，不直接依赖具体的宿主实现

use crate::error::DocResult;
use crate::models::{
    AnnotationHandle, AnnotationKind, AnnotationSpec, PageBox, PageBoxKind, Quad, Rect,
};
use std::ops::RangeInclusive;

/// 宿主文档
///
/// 职责：
/// - 暴露单词、四边形、页面框、旋转等只读查询
/// - 执行注释增删、插页、设置裁剪框等修改
/// - 不认识 Problem，不处理流程
pub trait DocumentPort {
    /// 当前页数
    fn page_count(&self) -> usize;

    /// 源文件路径，插页时作为页面来源
    fn source_path(&self) -> &str;

    fn word_count(&self, page: usize) -> DocResult<usize>;

    fn word_at(&self, page: usize, index: usize) -> DocResult<String>;

    /// 单词的四边形列表；取不到时返回空列表
    fn word_quads(&self, page: usize, index: usize) -> DocResult<Vec<Quad>>;

    fn page_box(&self, page: usize, kind: PageBoxKind) -> DocResult<PageBox>;

    /// 旋转角度（度）
    fn page_rotation(&self, page: usize) -> DocResult<i32>;

    fn add_annotation(&mut self, page: usize, spec: AnnotationSpec) -> DocResult<AnnotationHandle>;

    /// 列出页面上的注释，`kind` 为空时返回全部
    fn list_annotations(
        &self,
        page: usize,
        kind: Option<AnnotationKind>,
    ) -> DocResult<Vec<AnnotationHandle>>;

    fn destroy_annotation(&mut self, handle: &AnnotationHandle) -> DocResult<()>;

    /// 把 `source_path` 中 `source_pages` 的页面复制后插入到 `after` 之后
    fn insert_page(
        &mut self,
        after: usize,
        source_path: &str,
        source_pages: RangeInclusive<usize>,
    ) -> DocResult<()>;

    fn set_crop_box(&mut self, pages: RangeInclusive<usize>, rect: Rect) -> DocResult<()>;
}
