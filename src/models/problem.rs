use crate::models::geometry::{PageBox, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 题目在页面上的位置（相对页面框左上角，向下为正）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn from_rect(rect: &Rect, page_box: &PageBox) -> Self {
        Self {
            x: rect.x_min - page_box.x0,
            y: page_box.y1 - rect.y_max,
        }
    }
}

/// 从单词流中切分出的一道题
///
/// 切分后 `position` 为空，几何解析完成后才会填充。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    pub page: usize,
    pub number: u64,
    pub text: String,
    pub lines: BTreeSet<usize>,
    pub word_indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Problem {
    pub fn is_resolved(&self) -> bool {
        self.position.is_some()
    }

    /// 题号栏文字
    pub fn label(&self) -> String {
        format!("Problem {}", self.number)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Problem {}: {}", self.number, self.text)
    }
}
