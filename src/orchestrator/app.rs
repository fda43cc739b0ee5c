//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：写日志文件头、加载文档
//! 2. **资源管理**：唯一持有 `MemoryDocument` 的模块
//! 3. **结果输出**：保存处理后的文档与运行报告
//! 4. **全局统计**：输出最终摘要

use crate::config::Config;
use crate::infrastructure::{load_document, save_document, MemoryDocument};
use crate::models::RunReport;
use crate::orchestrator::pipeline;
use crate::utils::logging;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    document: MemoryDocument,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        info!("\n📁 正在加载文档...");
        let document = load_document(Path::new(&config.input_document))
            .with_context(|| format!("无法加载文档: {}", config.input_document))?;
        info!("✓ 已加载 {} 页", document.pages.len());

        Ok(Self { config, document })
    }

    /// 运行应用主逻辑
    pub fn run(mut self) -> Result<RunReport> {
        let report = pipeline::process_document(&mut self.document, &self.config)
            .with_context(|| format!("处理文档失败: {}", self.config.input_document))?;

        save_document(&self.document, Path::new(&self.config.output_document))
            .with_context(|| format!("无法保存文档: {}", self.config.output_document))?;
        info!("💾 文档已保存至: {}", self.config.output_document);

        if let Some(report_file) = &self.config.report_file {
            write_report(&report, report_file)?;
        }

        logging::append_summary(&self.config.output_log_file, &report)?;
        logging::print_final_stats(&report, &self.config.output_log_file);

        Ok(report)
    }
}

fn write_report(report: &RunReport, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("无法写入运行报告: {}", path))?;
    info!("📝 运行报告已保存至: {}", path);
    Ok(())
}
