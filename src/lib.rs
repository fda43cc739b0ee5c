//! # Problem Crop
//!
//! 把试卷文档中按 "1." "2." 编号的题目逐个裁剪成独立页面的 Rust 工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有宿主文档，只暴露能力
//! - `DocumentPort` - 宿主文档契约（单词、四边形、页面框、注释、插页、裁剪）
//! - `MemoryDocument` - 可从 JSON / TOML 加载的内存文档
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `WordStreamExtractor` / `ProblemSegmenter` - 单词流与分题
//! - `GeometryResolver` - 外接矩形、旋转校正、临时标记
//! - `ReadingOrderSorter` - 阅读顺序
//! - `PageMaterializer` - 复制、裁剪并盖题号栏
//! - `AnnotationCleaner` - 清理临时标记
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的几何处理流程
//! - `ProblemCtx` - 上下文封装（页码 + 题号 + 序号）
//! - `ProblemFlow` - 流程编排（解析 → 标记 → 日志）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用入口，管理文档的加载与保存
//! - `orchestrator/pipeline` - 单个文档处理器，按阶段调度
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, DocResult, DocumentError};
pub use infrastructure::{DocumentPort, MemoryDocument, MemoryPage};
pub use models::{Problem, RunOutcome, RunReport};
pub use orchestrator::{process_document, App};
pub use workflow::{ProblemCtx, ProblemFlow, ProcessResult};
