//! 临时标记清理 - 业务能力层
//!
//! 只负责"把原始页上的临时标记删干净"
//!
//! 两个阶段各自幂等，可以单独重复执行：
//! 1. 按记录的（页码，名称）逐个删除
//! 2. 扫描全部原始页，删除剩余的标记类型注释

use crate::infrastructure::DocumentPort;
use crate::models::{AnnotationKind, AnnotationRef, CleanupStats, SkipReason, SkippedItem};
use tracing::{debug, info, warn};

/// 临时标记清理器
pub struct AnnotationCleaner {
    marker_kind: AnnotationKind,
}

impl AnnotationCleaner {
    pub fn new(marker_kind: AnnotationKind) -> Self {
        Self { marker_kind }
    }

    /// 依次执行按名称删除与兜底扫描
    pub fn clean(
        &self,
        port: &mut dyn DocumentPort,
        handles: &[AnnotationRef],
        original_pages: usize,
    ) -> CleanupStats {
        info!("🧹 正在清理原始页上的临时标记...");
        let mut stats = self.remove_by_name(port, handles, original_pages);
        stats.merge(self.sweep(port, original_pages));
        info!(
            "✓ 清理完成: 按名称删除 {}, 兜底删除 {}, 失败 {}",
            stats.removed_by_name,
            stats.removed_by_sweep,
            stats.failures.len()
        );
        stats
    }

    /// 按记录的句柄删除
    pub fn remove_by_name(
        &self,
        port: &mut dyn DocumentPort,
        handles: &[AnnotationRef],
        original_pages: usize,
    ) -> CleanupStats {
        let mut stats = CleanupStats::default();

        for handle in handles.iter().filter(|h| h.page < original_pages) {
            let matches = match port.list_annotations(handle.page, Some(self.marker_kind)) {
                Ok(found) => found
                    .into_iter()
                    .filter(|a| a.name == handle.name)
                    .collect::<Vec<_>>(),
                Err(e) => {
                    record_failure(&mut stats, handle.page, &handle.name, &e.to_string());
                    continue;
                }
            };

            if matches.is_empty() {
                debug!("标记 {} 已不存在", handle.name);
                stats.already_absent += 1;
                continue;
            }

            for annotation in matches {
                match port.destroy_annotation(&annotation) {
                    Ok(()) => stats.removed_by_name += 1,
                    Err(e) => {
                        record_failure(&mut stats, annotation.page, &annotation.name, &e.to_string())
                    }
                }
            }
        }

        stats
    }

    /// 扫描全部原始页，删除剩余的标记类型注释
    pub fn sweep(&self, port: &mut dyn DocumentPort, original_pages: usize) -> CleanupStats {
        let mut stats = CleanupStats::default();

        for page in 0..original_pages.min(port.page_count()) {
            let remaining = match port.list_annotations(page, Some(self.marker_kind)) {
                Ok(found) => found,
                Err(e) => {
                    record_failure(&mut stats, page, "*", &e.to_string());
                    continue;
                }
            };

            for annotation in remaining {
                match port.destroy_annotation(&annotation) {
                    Ok(()) => stats.removed_by_sweep += 1,
                    Err(e) => {
                        record_failure(&mut stats, annotation.page, &annotation.name, &e.to_string())
                    }
                }
            }
        }

        stats
    }
}

fn record_failure(stats: &mut CleanupStats, page: usize, name: &str, reason: &str) {
    warn!("⚠️ 第 {} 页的注释 {} 删除失败: {}", page, name, reason);
    stats.failures.push(SkippedItem {
        page,
        number: None,
        reason: SkipReason::AnnotationRemoveFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MemoryDocument, MemoryPage};
    use crate::models::{AnnotationSpec, PageBox, Rect};

    fn spec(kind: AnnotationKind, name: &str) -> AnnotationSpec {
        AnnotationSpec {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            kind,
            contents: String::new(),
            name: Some(name.to_string()),
            style: None,
        }
    }

    fn document() -> MemoryDocument {
        let mut doc = MemoryDocument::new("exam.json");
        for _ in 0..3 {
            doc.push_page(MemoryPage::new(PageBox::new(0.0, 792.0, 612.0, 0.0)));
        }
        doc
    }

    fn marker_refs(doc: &mut MemoryDocument) -> Vec<AnnotationRef> {
        let a = doc.add_annotation(0, spec(AnnotationKind::Square, "m-1")).unwrap();
        let b = doc.add_annotation(1, spec(AnnotationKind::Square, "m-2")).unwrap();
        vec![AnnotationRef::from(&a), AnnotationRef::from(&b)]
    }

    #[test]
    fn test_remove_by_name_is_idempotent() {
        let mut doc = document();
        let refs = marker_refs(&mut doc);
        let cleaner = AnnotationCleaner::new(AnnotationKind::Square);

        let first = cleaner.remove_by_name(&mut doc, &refs, 3);
        assert_eq!(first.removed_by_name, 2);
        assert!(first.failures.is_empty());

        let second = cleaner.remove_by_name(&mut doc, &refs, 3);
        assert_eq!(second.removed_by_name, 0);
        assert_eq!(second.already_absent, 2);
        assert!(second.failures.is_empty());
    }

    #[test]
    fn test_sweep_catches_unrecorded_markers_only() {
        let mut doc = document();
        doc.add_annotation(0, spec(AnnotationKind::Square, "lost")).unwrap();
        doc.add_annotation(0, spec(AnnotationKind::Highlight, "user-note")).unwrap();
        doc.add_annotation(2, spec(AnnotationKind::Square, "beyond")).unwrap();
        let cleaner = AnnotationCleaner::new(AnnotationKind::Square);

        let stats = cleaner.sweep(&mut doc, 2);
        assert_eq!(stats.removed_by_sweep, 1);
        assert_eq!(doc.annotations(0).len(), 1);
        assert_eq!(doc.annotations(0)[0].name, "user-note");
        // 原始页范围之外的页面不处理
        assert_eq!(doc.annotations(2).len(), 1);

        let again = cleaner.sweep(&mut doc, 2);
        assert_eq!(again.removed(), 0);
    }

    #[test]
    fn test_clean_removes_duplicate_names() {
        let mut doc = document();
        doc.add_annotation(0, spec(AnnotationKind::Square, "same")).unwrap();
        doc.add_annotation(0, spec(AnnotationKind::Square, "same")).unwrap();
        let refs = vec![AnnotationRef {
            page: 0,
            name: "same".to_string(),
        }];

        let stats = AnnotationCleaner::new(AnnotationKind::Square).clean(&mut doc, &refs, 3);
        assert_eq!(stats.removed(), 2);
        assert!(doc.annotations(0).is_empty());
    }

    #[test]
    fn test_handles_past_original_pages_are_ignored() {
        let mut doc = document();
        doc.add_annotation(2, spec(AnnotationKind::Square, "copy")).unwrap();
        let refs = vec![AnnotationRef {
            page: 2,
            name: "copy".to_string(),
        }];

        let stats = AnnotationCleaner::new(AnnotationKind::Square).remove_by_name(&mut doc, &refs, 2);
        assert_eq!(stats.removed(), 0);
        assert_eq!(doc.annotations(2).len(), 1);
    }
}
