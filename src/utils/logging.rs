//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::{Context, Result};
use crate::config::Config;
use crate::models::RunReport;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅者
///
/// 日志级别由 `RUST_LOG` 控制，默认 `info`。重复调用不会报错。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目裁剪日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 把运行摘要追加到日志文件末尾
pub fn append_summary(log_file_path: &str, report: &RunReport) -> Result<()> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;

    writeln!(file, "{}", "=".repeat(60))?;
    writeln!(file, "Original pages: {}", report.original_pages)?;
    writeln!(file, "Problem pages: {}", report.problem_pages)?;
    writeln!(file, "Split point: {}", report.split_point)?;
    for page in &report.appended {
        writeln!(
            file,
            "  page {} ← Problem {} (source page {})",
            page.page_index, page.problem_number, page.source_page
        )?;
    }
    writeln!(file, "Skipped: {}", report.skipped.len())?;
    writeln!(file, "{}", "=".repeat(60))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目裁剪模式");
    info!("📄 输入文档: {}", config.input_document);
    info!("📁 输出文档: {}", config.output_document);
    info!(
        "📊 换行阈值: {}, 行带容差: {}, 页面框: {:?}",
        config.line_break_threshold, config.band_tolerance, config.page_box_kind
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `report`: 运行报告
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(report: &RunReport, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("Original pages: {}", report.original_pages);
    info!("Problem pages: {}", report.problem_pages);
    info!("Split point: {}", report.split_point);
    info!("✅ 已生成: {}/{}", report.problem_pages, report.segmented);
    info!("⚠️ 跳过: {}", report.skipped.len());
    info!(
        "🧹 已删除标记: {} (失败 {})",
        report.cleanup.removed(),
        report.cleanup.failures.len()
    );
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
