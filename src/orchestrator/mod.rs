//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责阶段调度和资源管理，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 加载与保存文档
//! - 写出运行报告、输出全局统计信息
//!
//! ### `pipeline` - 单个文档处理器
//! - 按固定顺序执行：分题 → 定位 → 排序 → 生成 → 清理
//! - 创建并复用 ProblemFlow
//! - 汇总单项失败到 RunReport
//!
//! ## 层次关系
//!
//! ```text
//! app (持有 MemoryDocument)
//!     ↓
//! pipeline (处理 Vec<Problem>)
//!     ↓
//! workflow::ProblemFlow (处理单个 Problem)
//!     ↓
//! services (能力层：segmenter / resolver / sorter / materializer / cleaner)
//!     ↓
//! infrastructure (基础设施：DocumentPort)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管资源，pipeline 管阶段
//! 2. **资源隔离**：只有编排层持有文档
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod app;
pub mod pipeline;

// 重新导出主要类型
pub use app::App;
pub use pipeline::process_document;
