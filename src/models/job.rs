//! 任务数据模型
//!
//! 任务描述对客户端是不透明的：除 `QueueId` 外的字段一律原样转发，
//! 客户端只负责注入幂等令牌 `JobStartIdentifier`。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 目标执行队列字段名
pub const QUEUE_ID_FIELD: &str = "QueueId";
/// 客户端注入的幂等令牌字段名
pub const START_IDENTIFIER_FIELD: &str = "JobStartIdentifier";
/// 服务端响应中的任务标识字段名
pub const NAME_FIELD: &str = "Name";

/// 任务描述
///
/// 职责：
/// - 持有一个任务对象的全部字段（不透明负载）
/// - 提供 `QueueId` 的只读访问
/// - 注入且只注入一次 `JobStartIdentifier`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDescription {
    fields: Map<String, Value>,
}

impl JobDescription {
    /// 从字段表创建任务描述（主要用于测试）
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// 目标队列 ID（空字符串视为缺失）
    pub fn queue_id(&self) -> Option<&str> {
        self.fields
            .get(QUEUE_ID_FIELD)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    /// 确保任务带有 `JobStartIdentifier`，返回其值
    ///
    /// 第一次调用生成一个全新的 UUID 并写入字段表；
    /// 之后的调用（包括每次重试前）返回同一个值，绝不重新生成。
    pub fn ensure_start_identifier(&mut self) -> String {
        if let Some(existing) = self
            .fields
            .get(START_IDENTIFIER_FIELD)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
        {
            return existing.to_string();
        }

        let id = Uuid::new_v4().to_string();
        self.fields
            .insert(START_IDENTIFIER_FIELD.to_string(), Value::String(id.clone()));
        id
    }

    /// 当前的幂等令牌（未注入时为 None）
    pub fn start_identifier(&self) -> Option<&str> {
        self.fields
            .get(START_IDENTIFIER_FIELD)
            .and_then(|v| v.as_str())
    }

    /// 序列化用的完整字段表
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// 已接受任务记录
///
/// 服务端确认接收后创建一次，之后不再修改。
#[derive(Debug, Clone, Serialize)]
pub struct AcceptedJob {
    /// 服务端返回的任务标识（响应 `Name` 字段）
    pub job_id: String,
    /// 关联 ID（与任务标识相同）
    pub correlation_id: String,
    /// 目标队列 ID（从任务描述复制）
    pub queue_id: String,
    /// 接受时间（收到响应时的 UTC 时间）
    pub accepted_at: DateTime<Utc>,
}

impl AcceptedJob {
    /// 创建已接受任务记录，接受时间取当前 UTC 时间
    pub fn new(job_id: impl Into<String>, queue_id: impl Into<String>) -> Self {
        let job_id = job_id.into();
        Self {
            correlation_id: job_id.clone(),
            job_id,
            queue_id: queue_id.into(),
            accepted_at: Utc::now(),
        }
    }
}

/// 批量提交结果
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 已接受任务（按提交顺序）
    pub accepted: Vec<AcceptedJob>,
    /// 输入任务总数
    pub total_jobs: usize,
    /// 运行是否被外部取消中止
    pub aborted: bool,
}

impl BatchResult {
    /// 整体判定：所有输入任务都被接受才算成功
    ///
    /// 不存在"静默部分成功"——任何一个任务缺席都会让判定翻为 false。
    pub fn verdict(&self) -> bool {
        self.accepted.len() == self.total_jobs
    }
}
