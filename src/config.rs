use crate::error::{AppError, AppResult, ConfigError};
use crate::models::PageBoxKind;
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 待处理的文档（.json / .toml）
    pub input_document: String,
    /// 处理后的文档输出路径
    pub output_document: String,
    /// 运行报告输出路径（JSON），为空则不写出
    pub report_file: Option<String>,
    /// 输出日志文件
    pub output_log_file: String,
    /// 行缓冲超过该字符数时视为换行
    pub line_break_threshold: usize,
    /// 纵向差值不超过该值的题目视为同一行
    pub band_tolerance: f64,
    /// 裁剪页顶部题号栏的高度
    pub header_height: f64,
    /// 读取页面尺寸时使用的页面框
    pub page_box_kind: PageBoxKind,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_document: "document.json".to_string(),
            output_document: "document.cropped.json".to_string(),
            report_file: None,
            output_log_file: "output.txt".to_string(),
            line_break_threshold: 100,
            band_tolerance: 20.0,
            header_height: 18.0,
            page_box_kind: PageBoxKind::Crop,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_document: std::env::var("INPUT_DOCUMENT").unwrap_or(default.input_document),
            output_document: std::env::var("OUTPUT_DOCUMENT").unwrap_or(default.output_document),
            report_file: std::env::var("REPORT_FILE").ok().or(default.report_file),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            line_break_threshold: std::env::var("LINE_BREAK_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.line_break_threshold),
            band_tolerance: std::env::var("BAND_TOLERANCE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.band_tolerance),
            header_height: std::env::var("HEADER_HEIGHT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.header_height),
            page_box_kind: std::env::var("PAGE_BOX_KIND").ok().and_then(|v| v.parse().ok()).unwrap_or(default.page_box_kind),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let path_str = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(&path_str, e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| AppError::file_parse_failed(&path_str, e))?;
        Ok(config)
    }

    /// 校验配置项取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_break_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "line_break_threshold".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if !self.band_tolerance.is_finite() || self.band_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "band_tolerance".to_string(),
                reason: format!("必须是非负有限数，当前为 {}", self.band_tolerance),
            });
        }
        if !self.header_height.is_finite() || self.header_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "header_height".to_string(),
                reason: format!("必须是正有限数，当前为 {}", self.header_height),
            });
        }
        Ok(())
    }
}
