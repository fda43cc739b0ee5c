//! 页面几何：页面框、矩形、四边形与页面旋转

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 页面框（宿主约定：左、上、右、下）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBox {
    pub x0: f64,
    pub y1: f64,
    pub x2: f64,
    pub y3: f64,
}

impl PageBox {
    pub fn new(x0: f64, y1: f64, x2: f64, y3: f64) -> Self {
        Self { x0, y1, x2, y3 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y3
    }

    /// 由矩形构造页面框（用于设置裁剪框）
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x0: rect.x_min,
            y1: rect.y_max,
            x2: rect.x_max,
            y3: rect.y_min,
        }
    }
}

/// 页面框类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageBoxKind {
    #[default]
    Crop,
    Media,
}

impl FromStr for PageBoxKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crop" | "cropbox" => Ok(PageBoxKind::Crop),
            "media" | "mediabox" => Ok(PageBoxKind::Media),
            other => Err(format!("未知的页面框类型: {}", other)),
        }
    }
}

/// 轴对齐矩形 `[x_min, y_min, x_max, y_max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// 按 y 轴翻转后的上、下边（原点移到页面顶部）
    pub fn flipped_top_bottom(&self, page_height: f64) -> (f64, f64) {
        (page_height - self.y_max, page_height - self.y_min)
    }

    /// 转换为四角点四边形
    pub fn to_quad(&self) -> Quad {
        Quad::from_rect(*self)
    }
}

impl From<[f64; 4]> for Rect {
    fn from(v: [f64; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rect> for [f64; 4] {
    fn from(r: Rect) -> Self {
        [r.x_min, r.y_min, r.x_max, r.y_max]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}, {:.2}, {:.2}]",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// 四边形：按 (x, y) 成对排列的角点坐标
///
/// 宿主返回的数据未经校验，完整的四边形恰好包含 4 对有限坐标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad {
    coords: Vec<f64>,
}

impl Quad {
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    /// 依次为左上、右上、左下、右下
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(vec![
            rect.x_min, rect.y_max, rect.x_max, rect.y_max, rect.x_min, rect.y_min, rect.x_max,
            rect.y_min,
        ])
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn corners(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.coords.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn is_well_formed(&self) -> bool {
        self.coords.len() == 8 && self.coords.iter().all(|c| c.is_finite())
    }

    /// 完整四边形的外接矩形；不完整时返回 `None`
    pub fn crop_rect(&self) -> Option<Rect> {
        if !self.is_well_formed() {
            return None;
        }
        bounding_rect(std::slice::from_ref(self))
    }
}

/// 所有四边形全部角点的外接矩形
///
/// 没有任何角点时返回 `None`。
pub fn bounding_rect(quads: &[Quad]) -> Option<Rect> {
    let mut corners = quads.iter().flat_map(|q| q.corners());
    let (x, y) = corners.next()?;
    let init = Rect::new(x, y, x, y);
    Some(corners.fold(init, |acc, (x, y)| {
        Rect::new(
            acc.x_min.min(x),
            acc.y_min.min(y),
            acc.x_max.max(x),
            acc.y_max.max(y),
        )
    }))
}

/// 页面旋转状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// 只接受 0 / 90 / 180 / 270
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// 将外接矩形校正到页面框坐标系
    pub fn correct(self, bbox: Rect, page_box: &PageBox) -> Rect {
        let width = page_box.width();
        let height = page_box.height();
        let Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        } = bbox;

        match self {
            Rotation::Deg0 => bbox,
            Rotation::Deg90 => Rect::new(y_min, width - x_max, y_max, width - x_min),
            Rotation::Deg180 => {
                Rect::new(width - x_max, height - y_max, width - x_min, height - y_min)
            }
            Rotation::Deg270 => Rect::new(height - y_max, x_min, height - y_min, x_max),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
