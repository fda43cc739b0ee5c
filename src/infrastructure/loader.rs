//! 文档加载与保存
//!
//! 按扩展名识别格式：`.json` 或 `.toml`

use crate::error::{AppError, AppResult, FileError};
use crate::infrastructure::memory_document::MemoryDocument;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn detect_format(path: &Path) -> AppResult<Format> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(AppError::File(FileError::UnsupportedFormat {
            path: path.display().to_string(),
        })),
    }
}

/// 从文件加载文档
///
/// 文档的 `path` 会被设置为实际加载的文件路径，插页时以此作为页面来源。
pub fn load_document(path: &Path) -> AppResult<MemoryDocument> {
    let path_str = path.display().to_string();
    let format = detect_format(path)?;

    if !path.exists() {
        return Err(AppError::File(FileError::NotFound { path: path_str }));
    }

    let content =
        fs::read_to_string(path).map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let mut document: MemoryDocument = match format {
        Format::Json => serde_json::from_str(&content)
            .map_err(|e| AppError::file_parse_failed(&path_str, e))?,
        Format::Toml => {
            toml::from_str(&content).map_err(|e| AppError::file_parse_failed(&path_str, e))?
        }
    };

    document.path = path.to_string_lossy().to_string();

    info!(
        "成功加载文档: {} (共 {} 页)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        document.pages.len()
    );

    Ok(document)
}

/// 将文档写入文件
pub fn save_document(document: &MemoryDocument, path: &Path) -> AppResult<()> {
    let path_str = path.display().to_string();
    let content = match detect_format(path)? {
        Format::Json => serde_json::to_string_pretty(document)
            .map_err(|e| AppError::file_write_failed(&path_str, e))?,
        Format::Toml => toml::to_string_pretty(document)
            .map_err(|e| AppError::file_write_failed(&path_str, e))?,
    };

    fs::write(path, content).map_err(|e| AppError::file_write_failed(&path_str, e))?;
    info!("文档已保存至: {}", path_str);
    Ok(())
}
