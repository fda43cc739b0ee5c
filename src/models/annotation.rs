use crate::models::geometry::Rect;
use serde::{Deserialize, Serialize};

/// 注释类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// 方框（题目临时标记使用）
    Square,
    /// 文本框（题号栏使用）
    FreeText,
    Highlight,
    Text,
}

/// 文本对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// 注释外观
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    /// RGB，取值 0.0 ~ 1.0
    pub color: [f64; 3],
    #[serde(default)]
    pub alignment: TextAlignment,
}

impl AnnotationStyle {
    /// 黄色方框
    pub fn marker() -> Self {
        Self {
            color: [1.0, 1.0, 0.0],
            alignment: TextAlignment::Left,
        }
    }

    /// 黑色居中文字
    pub fn header() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            alignment: TextAlignment::Center,
        }
    }
}

/// 页面上的一个注释
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub kind: AnnotationKind,
    pub rect: Rect,
    #[serde(default)]
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<AnnotationStyle>,
}

/// 创建注释的参数
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSpec {
    pub rect: Rect,
    pub kind: AnnotationKind,
    pub contents: String,
    /// 为空时由宿主分配名称
    pub name: Option<String>,
    pub style: Option<AnnotationStyle>,
}

/// 宿主返回的注释句柄
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationHandle {
    pub page: usize,
    pub name: String,
    pub kind: AnnotationKind,
}

/// 注释的弱引用（页码 + 名称），仅用于尽力删除
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationRef {
    pub page: usize,
    pub name: String,
}

impl From<&AnnotationHandle> for AnnotationRef {
    fn from(handle: &AnnotationHandle) -> Self {
        Self {
            page: handle.page,
            name: handle.name.clone(),
        }
    }
}
