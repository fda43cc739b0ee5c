//! 裁剪页生成 - 业务能力层
//!
//! 为每道题复制源页面、裁剪、清除注释并盖上题号栏
//!
//! 宿主的插页原语只能把页面插到指定位置之后。这里始终插在原始页之后
//! （`split_point - 1`），新页会把之前插入的页往后挤；因此按阅读顺序
//! 从尾到头处理，最终追加区恰好是正序。

use crate::error::DocResult;
use crate::infrastructure::DocumentPort;
use crate::models::{
    AnnotationKind, AnnotationSpec, AnnotationStyle, AppendedPage, Placement, Rect, SkipReason,
    SkippedItem,
};
use tracing::{info, warn};

/// 从尾到头消费的插入队列
///
/// 以正序构造，`next()` 总是返回剩余元素中的最后一个。
#[derive(Debug)]
pub struct InsertQueue<T> {
    items: Vec<T>,
}

impl<T> InsertQueue<T> {
    /// 由已按阅读顺序排好的元素构造
    pub fn from_sorted(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Iterator for InsertQueue<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.items.pop()
    }
}

/// 裁剪页生成结果
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// 按最终页码排列的追加页
    pub appended: Vec<AppendedPage>,
    pub skipped: Vec<SkippedItem>,
}

/// 裁剪页生成器
///
/// 职责：
/// - 复制源页面并插到原始页之后
/// - 只清除新页上的注释，不碰原始页和其他副本
/// - 设置裁剪框、盖题号栏
pub struct PageMaterializer {
    header_height: f64,
}

impl PageMaterializer {
    pub fn new(header_height: f64) -> Self {
        Self { header_height }
    }

    /// 为排好序的题目生成裁剪页
    ///
    /// # 参数
    /// - `port`: 宿主文档
    /// - `sorted`: 按阅读顺序排好的题目
    /// - `split_point`: 原始页数，第一张裁剪页的页码
    pub fn materialize(
        &self,
        port: &mut dyn DocumentPort,
        sorted: Vec<Placement>,
        split_point: usize,
    ) -> DocResult<MaterializeReport> {
        let mut report = MaterializeReport::default();
        if split_point == 0 {
            return Ok(report);
        }

        let source = port.source_path().to_string();
        let queue = InsertQueue::from_sorted(sorted);
        info!("正在复制并裁剪 {} 个页面...", queue.len());

        // 从尾到头插入，inserted 为逆序
        let mut inserted = Vec::with_capacity(queue.len());
        for placement in queue {
            let number = placement.problem.number;
            let page = placement.problem.page;

            let Some(crop) = placement.quad.crop_rect() else {
                warn!(
                    "[题目 {}] ⚠️ 裁剪四边形格式错误 ({} 个坐标)，跳过",
                    number,
                    placement.quad.coords().len()
                );
                report.skipped.push(SkippedItem {
                    page,
                    number: Some(number),
                    reason: SkipReason::MalformedRect {
                        coords: placement.quad.coords().len(),
                    },
                });
                continue;
            };

            info!("[题目 {}] 裁剪区域: {}", number, placement.rect);
            port.insert_page(split_point - 1, &source, page..=page)?;
            let new_page = split_point;

            self.strip_annotations(port, new_page, number, &mut report);
            port.set_crop_box(new_page..=new_page, crop)?;
            self.stamp_header(port, new_page, placement.problem.label(), crop)?;

            inserted.push((page, number));
        }

        report.appended = inserted
            .into_iter()
            .rev()
            .enumerate()
            .map(|(offset, (source_page, problem_number))| AppendedPage {
                page_index: split_point + offset,
                source_page,
                problem_number,
            })
            .collect();

        info!("复制与裁剪完成，共生成 {} 页", report.appended.len());
        Ok(report)
    }

    /// 清除新页上的全部注释
    fn strip_annotations(
        &self,
        port: &mut dyn DocumentPort,
        page: usize,
        number: u64,
        report: &mut MaterializeReport,
    ) {
        let handles = match port.list_annotations(page, None) {
            Ok(handles) => handles,
            Err(e) => {
                warn!("[题目 {}] ⚠️ 无法列出第 {} 页的注释: {}", number, page, e);
                report.skipped.push(SkippedItem {
                    page,
                    number: Some(number),
                    reason: SkipReason::AnnotationRemoveFailed {
                        name: "*".to_string(),
                        reason: e.to_string(),
                    },
                });
                return;
            }
        };

        for handle in handles {
            if let Err(e) = port.destroy_annotation(&handle) {
                warn!("[题目 {}] ⚠️ 删除注释 {} 失败: {}", number, handle.name, e);
                report.skipped.push(SkippedItem {
                    page,
                    number: Some(number),
                    reason: SkipReason::AnnotationRemoveFailed {
                        name: handle.name.clone(),
                        reason: e.to_string(),
                    },
                });
            }
        }
    }

    /// 在裁剪区域顶部盖一个与裁剪区同宽的题号栏
    fn stamp_header(
        &self,
        port: &mut dyn DocumentPort,
        page: usize,
        label: String,
        crop: Rect,
    ) -> DocResult<()> {
        let height = self.header_height.min(crop.height());
        let spec = AnnotationSpec {
            rect: header_rect(crop, height),
            kind: AnnotationKind::FreeText,
            contents: label,
            name: None,
            style: Some(AnnotationStyle::header()),
        };
        port.add_annotation(page, spec)?;
        Ok(())
    }
}

fn header_rect(crop: Rect, height: f64) -> Rect {
    Rect::new(crop.x_min, crop.y_max - height, crop.x_max, crop.y_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;
    use crate::infrastructure::{MemoryDocument, MemoryPage};
    use crate::models::{
        AnnotationHandle, PageBox, PageBoxKind, Position, Problem, Quad, TextAlignment,
    };
    use std::collections::BTreeSet;
    use std::ops::RangeInclusive;

    /// 无法列出注释的宿主
    struct UnlistableAnnotations(MemoryDocument);

    impl DocumentPort for UnlistableAnnotations {
        fn page_count(&self) -> usize {
            self.0.page_count()
        }
        fn source_path(&self) -> &str {
            self.0.source_path()
        }
        fn word_count(&self, page: usize) -> DocResult<usize> {
            self.0.word_count(page)
        }
        fn word_at(&self, page: usize, index: usize) -> DocResult<String> {
            self.0.word_at(page, index)
        }
        fn word_quads(&self, page: usize, index: usize) -> DocResult<Vec<Quad>> {
            self.0.word_quads(page, index)
        }
        fn page_box(&self, page: usize, kind: PageBoxKind) -> DocResult<PageBox> {
            self.0.page_box(page, kind)
        }
        fn page_rotation(&self, page: usize) -> DocResult<i32> {
            self.0.page_rotation(page)
        }
        fn add_annotation(
            &mut self,
            page: usize,
            spec: AnnotationSpec,
        ) -> DocResult<AnnotationHandle> {
            self.0.add_annotation(page, spec)
        }
        fn list_annotations(
            &self,
            _: usize,
            _: Option<AnnotationKind>,
        ) -> DocResult<Vec<AnnotationHandle>> {
            Err(DocumentError::rejected("annotation index unavailable"))
        }
        fn destroy_annotation(&mut self, handle: &AnnotationHandle) -> DocResult<()> {
            self.0.destroy_annotation(handle)
        }
        fn insert_page(
            &mut self,
            after: usize,
            source_path: &str,
            source_pages: RangeInclusive<usize>,
        ) -> DocResult<()> {
            self.0.insert_page(after, source_path, source_pages)
        }
        fn set_crop_box(&mut self, pages: RangeInclusive<usize>, rect: Rect) -> DocResult<()> {
            self.0.set_crop_box(pages, rect)
        }
    }

    fn letter() -> PageBox {
        PageBox::new(0.0, 792.0, 612.0, 0.0)
    }

    fn document(pages: usize) -> MemoryDocument {
        let mut doc = MemoryDocument::new("exam.json");
        for _ in 0..pages {
            doc.push_page(MemoryPage::new(letter()));
        }
        doc
    }

    fn placement(page: usize, number: u64, rect: Rect) -> Placement {
        Placement {
            problem: Problem {
                page,
                number,
                text: format!("{}.", number),
                lines: BTreeSet::from([1]),
                word_indices: vec![0],
                position: Some(Position::default()),
            },
            rect,
            quad: Quad::from_rect(rect),
            annotation: None,
        }
    }

    #[test]
    fn test_insert_queue_yields_tail_first() {
        let queue = InsertQueue::from_sorted(vec![1, 2, 3]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.collect::<Vec<_>>(), vec![3, 2, 1]);
        assert!(InsertQueue::<u8>::from_sorted(Vec::new()).is_empty());
    }

    #[test]
    fn test_appended_block_is_in_sorted_order() {
        let mut doc = document(2);
        let sorted = vec![
            placement(0, 1, Rect::new(72.0, 700.0, 540.0, 760.0)),
            placement(0, 2, Rect::new(72.0, 500.0, 540.0, 690.0)),
            placement(1, 3, Rect::new(72.0, 600.0, 540.0, 760.0)),
        ];

        let report = PageMaterializer::new(18.0)
            .materialize(&mut doc, sorted, 2)
            .unwrap();

        assert_eq!(doc.page_count(), 5);
        let order: Vec<u64> = report.appended.iter().map(|p| p.problem_number).collect();
        assert_eq!(order, vec![1, 2, 3]);
        let indices: Vec<usize> = report.appended.iter().map(|p| p.page_index).collect();
        assert_eq!(indices, vec![2, 3, 4]);

        for (offset, expected) in ["Problem 1", "Problem 2", "Problem 3"].iter().enumerate() {
            let annotations = doc.annotations(2 + offset);
            assert_eq!(annotations.len(), 1);
            assert_eq!(annotations[0].contents, *expected);
        }
        assert_eq!(
            doc.page_box(2, PageBoxKind::Crop).unwrap(),
            PageBox::from_rect(Rect::new(72.0, 700.0, 540.0, 760.0))
        );
        assert_eq!(
            doc.page_box(4, PageBoxKind::Crop).unwrap(),
            PageBox::from_rect(Rect::new(72.0, 600.0, 540.0, 760.0))
        );
        // 原始页不受影响
        assert_eq!(doc.page_box(0, PageBoxKind::Crop).unwrap(), letter());
    }

    #[test]
    fn test_new_page_annotations_are_stripped_but_originals_kept() {
        let mut doc = document(1);
        doc.add_annotation(
            0,
            AnnotationSpec {
                rect: Rect::new(72.0, 700.0, 540.0, 760.0),
                kind: AnnotationKind::Square,
                contents: "marker".to_string(),
                name: Some("marker-1".to_string()),
                style: None,
            },
        )
        .unwrap();

        PageMaterializer::new(18.0)
            .materialize(
                &mut doc,
                vec![placement(0, 1, Rect::new(72.0, 700.0, 540.0, 760.0))],
                1,
            )
            .unwrap();

        assert_eq!(doc.annotations(0).len(), 1);
        let copied = doc.annotations(1);
        assert_eq!(copied.len(), 1);
        assert_eq!(copied[0].kind, AnnotationKind::FreeText);
    }

    #[test]
    fn test_unlistable_copy_is_recorded() {
        let mut doc = document(1);
        doc.add_annotation(
            0,
            AnnotationSpec {
                rect: Rect::new(72.0, 700.0, 540.0, 760.0),
                kind: AnnotationKind::Square,
                contents: "marker".to_string(),
                name: Some("marker-1".to_string()),
                style: None,
            },
        )
        .unwrap();
        let mut port = UnlistableAnnotations(doc);

        let report = PageMaterializer::new(18.0)
            .materialize(
                &mut port,
                vec![placement(0, 1, Rect::new(72.0, 700.0, 540.0, 760.0))],
                1,
            )
            .unwrap();

        assert_eq!(report.appended.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].number, Some(1));
        assert!(matches!(
            &report.skipped[0].reason,
            SkipReason::AnnotationRemoveFailed { name, .. } if name == "*"
        ));
    }

    #[test]
    fn test_header_is_centered_at_top_of_crop() {
        let mut doc = document(1);
        let crop = Rect::new(72.0, 700.0, 540.0, 760.0);
        PageMaterializer::new(18.0)
            .materialize(&mut doc, vec![placement(0, 4, crop)], 1)
            .unwrap();

        let header = &doc.annotations(1)[0];
        assert_eq!(header.rect, Rect::new(72.0, 742.0, 540.0, 760.0));
        assert_eq!(header.style.unwrap().alignment, TextAlignment::Center);
    }

    #[test]
    fn test_header_never_taller_than_crop() {
        let crop = Rect::new(0.0, 100.0, 50.0, 110.0);
        assert_eq!(header_rect(crop, 18.0f64.min(crop.height())), crop);
    }

    #[test]
    fn test_malformed_quad_is_skipped() {
        let mut doc = document(1);
        let mut broken = placement(0, 2, Rect::new(72.0, 500.0, 540.0, 690.0));
        broken.quad = Quad::new(vec![72.0, 500.0, 540.0, 690.0]);
        let sorted = vec![
            placement(0, 1, Rect::new(72.0, 700.0, 540.0, 760.0)),
            broken,
            placement(0, 3, Rect::new(72.0, 300.0, 540.0, 490.0)),
        ];

        let report = PageMaterializer::new(18.0)
            .materialize(&mut doc, sorted, 1)
            .unwrap();

        assert_eq!(doc.page_count(), 3);
        let order: Vec<u64> = report.appended.iter().map(|p| p.problem_number).collect();
        assert_eq!(order, vec![1, 3]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::MalformedRect { coords: 4 });
    }

    #[test]
    fn test_empty_document_generates_nothing() {
        let mut doc = document(0);
        let report = PageMaterializer::new(18.0)
            .materialize(&mut doc, Vec::new(), 0)
            .unwrap();
        assert!(report.appended.is_empty());
    }
}
