use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 批量输入解析错误
    Parse(ParseError),
    /// 提交流程错误
    Submit(SubmitError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Parse(e) => write!(f, "解析错误: {}", e),
            AppError::Submit(e) => write!(f, "提交错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Parse(e) => Some(e),
            AppError::Submit(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 批量输入解析错误
#[derive(Debug)]
pub enum ParseError {
    /// 输入既不是任务数组也不是单个任务对象
    InvalidBatch {
        array_error: String,
        object_error: String,
    },
    /// 读取输入文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidBatch {
                array_error,
                object_error,
            } => {
                write!(
                    f,
                    "输入无法解析为任务数组 ({}) 也无法解析为单个任务对象 ({})",
                    array_error, object_error
                )
            }
            ParseError::ReadFailed { path, source } => {
                write!(f, "读取批量输入文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::ReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 提交流程错误
///
/// 只有编排层需要分支处理的终止条件才建模为类型化错误：
/// 运行级取消必须立即中止整个批次，重试耗尽只影响单个任务。
#[derive(Debug)]
pub enum SubmitError {
    /// 外部取消信号触发，整个运行中止
    Cancelled,
    /// 重试次数耗尽
    Exhausted {
        endpoint: String,
        attempts: u32,
        last_reason: String,
    },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Cancelled => write!(f, "提交被外部取消信号中止"),
            SubmitError::Exhausted {
                endpoint,
                attempts,
                last_reason,
            } => {
                write!(
                    f,
                    "提交失败 ({}): 已尝试 {} 次, 最后原因: {}",
                    endpoint, attempts, last_reason
                )
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 缺少必需的配置项
    MissingRequired { name: String },
    /// 端点 URL 无法解析
    InvalidEndpoint { url: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingRequired { name } => {
                write!(f, "缺少必需的配置项: {}", name)
            }
            ConfigError::InvalidEndpoint { url, reason } => {
                write!(f, "端点 URL 无法解析 ({}): {}", url, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Parse(ParseError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Parse(ParseError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建端点配置错误
    pub fn invalid_endpoint(url: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidEndpoint {
            url: url.into(),
            reason: reason.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
