//! 内存文档 - 基础设施层
//!
//! `DocumentPort` 的内存实现。页面数据（单词、四边形、页面框、旋转、注释）
//! 可以从 JSON / TOML 文件加载，处理完成后再原样写回。

use crate::error::{DocResult, DocumentError};
use crate::infrastructure::document_port::DocumentPort;
use crate::models::{
    Annotation, AnnotationHandle, AnnotationKind, AnnotationSpec, PageBox, PageBoxKind, Quad,
    Rect,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// 页面上的一个单词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryWord {
    pub text: String,
    #[serde(default)]
    pub quads: Vec<Quad>,
}

/// 内存中的一页
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryPage {
    pub media_box: PageBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_box: Option<PageBox>,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub words: Vec<MemoryWord>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MemoryPage {
    pub fn new(media_box: PageBox) -> Self {
        Self {
            media_box,
            crop_box: None,
            rotation: 0,
            words: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    /// 添加一个单词，四边形取自 `rect`
    pub fn push_word(&mut self, text: impl Into<String>, rect: Rect) -> &mut Self {
        self.words.push(MemoryWord {
            text: text.into(),
            quads: vec![rect.to_quad()],
        });
        self
    }

    /// 添加一个没有几何信息的单词
    pub fn push_bare_word(&mut self, text: impl Into<String>) -> &mut Self {
        self.words.push(MemoryWord {
            text: text.into(),
            quads: Vec::new(),
        });
        self
    }

    /// 当前生效的裁剪框，未设置时等于媒体框
    pub fn effective_crop_box(&self) -> PageBox {
        self.crop_box.unwrap_or(self.media_box)
    }
}

/// 内存文档
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub pages: Vec<MemoryPage>,
    #[serde(skip)]
    next_annotation_id: usize,
}

impl MemoryDocument {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            pages: Vec::new(),
            next_annotation_id: 0,
        }
    }

    pub fn push_page(&mut self, page: MemoryPage) -> &mut Self {
        self.pages.push(page);
        self
    }

    pub fn page(&self, index: usize) -> Option<&MemoryPage> {
        self.pages.get(index)
    }

    /// 页面上的注释
    pub fn annotations(&self, page: usize) -> &[Annotation] {
        self.pages
            .get(page)
            .map(|p| p.annotations.as_slice())
            .unwrap_or_default()
    }

    fn page_ref(&self, page: usize) -> DocResult<&MemoryPage> {
        self.pages.get(page).ok_or(DocumentError::PageOutOfRange {
            page,
            count: self.pages.len(),
        })
    }

    fn page_mut(&mut self, page: usize) -> DocResult<&mut MemoryPage> {
        let count = self.pages.len();
        self.pages
            .get_mut(page)
            .ok_or(DocumentError::PageOutOfRange { page, count })
    }

    fn word_ref(&self, page: usize, index: usize) -> DocResult<&MemoryWord> {
        let p = self.page_ref(page)?;
        p.words.get(index).ok_or(DocumentError::WordOutOfRange {
            page,
            index,
            count: p.words.len(),
        })
    }

    fn check_range(&self, range: &RangeInclusive<usize>) -> DocResult<()> {
        let (start, end) = (*range.start(), *range.end());
        if start > end || end >= self.pages.len() {
            return Err(DocumentError::InvalidRange { start, end });
        }
        Ok(())
    }

    /// 生成本文档内未被占用的注释名称
    fn allocate_name(&mut self) -> String {
        loop {
            self.next_annotation_id += 1;
            let name = format!("annot-{}", self.next_annotation_id);
            let taken = self
                .pages
                .iter()
                .any(|p| p.annotations.iter().any(|a| a.name == name));
            if !taken {
                return name;
            }
        }
    }
}

impl DocumentPort for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn source_path(&self) -> &str {
        &self.path
    }

    fn word_count(&self, page: usize) -> DocResult<usize> {
        Ok(self.page_ref(page)?.words.len())
    }

    fn word_at(&self, page: usize, index: usize) -> DocResult<String> {
        Ok(self.word_ref(page, index)?.text.clone())
    }

    fn word_quads(&self, page: usize, index: usize) -> DocResult<Vec<Quad>> {
        Ok(self.word_ref(page, index)?.quads.clone())
    }

    fn page_box(&self, page: usize, kind: PageBoxKind) -> DocResult<PageBox> {
        let p = self.page_ref(page)?;
        Ok(match kind {
            PageBoxKind::Crop => p.effective_crop_box(),
            PageBoxKind::Media => p.media_box,
        })
    }

    fn page_rotation(&self, page: usize) -> DocResult<i32> {
        Ok(self.page_ref(page)?.rotation)
    }

    fn add_annotation(&mut self, page: usize, spec: AnnotationSpec) -> DocResult<AnnotationHandle> {
        self.page_ref(page)?;
        let name = match spec.name {
            Some(name) => name,
            None => self.allocate_name(),
        };
        let annotation = Annotation {
            name: name.clone(),
            kind: spec.kind,
            rect: spec.rect,
            contents: spec.contents,
            style: spec.style,
        };
        self.page_mut(page)?.annotations.push(annotation);
        Ok(AnnotationHandle {
            page,
            name,
            kind: spec.kind,
        })
    }

    fn list_annotations(
        &self,
        page: usize,
        kind: Option<AnnotationKind>,
    ) -> DocResult<Vec<AnnotationHandle>> {
        let p = self.page_ref(page)?;
        Ok(p.annotations
            .iter()
            .filter(|a| kind.map_or(true, |k| a.kind == k))
            .map(|a| AnnotationHandle {
                page,
                name: a.name.clone(),
                kind: a.kind,
            })
            .collect())
    }

    fn destroy_annotation(&mut self, handle: &AnnotationHandle) -> DocResult<()> {
        let p = self.page_mut(handle.page)?;
        let position = p
            .annotations
            .iter()
            .position(|a| a.name == handle.name && a.kind == handle.kind)
            .ok_or_else(|| DocumentError::AnnotationNotFound {
                page: handle.page,
                name: handle.name.clone(),
            })?;
        p.annotations.remove(position);
        Ok(())
    }

    fn insert_page(
        &mut self,
        after: usize,
        source_path: &str,
        source_pages: RangeInclusive<usize>,
    ) -> DocResult<()> {
        if source_path != self.path {
            return Err(DocumentError::SourceUnavailable {
                path: source_path.to_string(),
            });
        }
        self.check_range(&source_pages)?;
        if after >= self.pages.len() {
            return Err(DocumentError::PageOutOfRange {
                page: after,
                count: self.pages.len(),
            });
        }

        let copies: Vec<MemoryPage> = self.pages[source_pages].to_vec();
        let at = after + 1;
        self.pages.splice(at..at, copies);
        Ok(())
    }

    fn set_crop_box(&mut self, pages: RangeInclusive<usize>, rect: Rect) -> DocResult<()> {
        self.check_range(&pages)?;
        let crop = PageBox::from_rect(rect);
        for page in self.pages[pages].iter_mut() {
            page.crop_box = Some(crop);
        }
        Ok(())
    }
}
