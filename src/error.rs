use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 宿主文档错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 正则表达式编译失败
    #[error("正则表达式错误: {0}")]
    Pattern(#[from] regex::Error),
}

/// 宿主文档错误
///
/// 由 `DocumentPort` 的各项操作返回。流水线中未被单项容错捕获的宿主错误
/// 会一直向上传播到顶层处理器并终止运行。
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 页码越界
    #[error("页码 {page} 超出范围 (共 {count} 页)")]
    PageOutOfRange { page: usize, count: usize },
    /// 单词索引越界
    #[error("第 {page} 页的单词索引 {index} 超出范围 (共 {count} 个)")]
    WordOutOfRange {
        page: usize,
        index: usize,
        count: usize,
    },
    /// 注释不存在
    #[error("第 {page} 页不存在注释: {name}")]
    AnnotationNotFound { page: usize, name: String },
    /// 源文档不可用
    #[error("无法读取源文档: {path}")]
    SourceUnavailable { path: String },
    /// 页码区间无效
    #[error("页码区间 {start}..={end} 无效")]
    InvalidRange { start: usize, end: usize },
    /// 宿主拒绝执行操作
    #[error("宿主拒绝操作: {reason}")]
    Rejected { reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 解析文件失败
    #[error("解析文件失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 不支持的文件格式
    #[error("不支持的文件格式: {path} (仅支持 .json / .toml)")]
    UnsupportedFormat { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置项取值无效
    #[error("配置项 {field} 无效: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件解析错误
    pub fn file_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

impl DocumentError {
    /// 创建宿主拒绝错误
    pub fn rejected(reason: impl Into<String>) -> Self {
        DocumentError::Rejected {
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 宿主文档操作结果类型
pub type DocResult<T> = Result<T, DocumentError>;
