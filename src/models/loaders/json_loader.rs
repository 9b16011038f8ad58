//! 批量输入加载器
//!
//! 输入约定宽松：既接受任务对象数组，也接受单个任务对象。
//! 两种形式都解析失败才算致命错误，整个运行在任何网络活动之前中止。

use crate::error::ParseError;
use crate::models::job::JobDescription;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 将原始 JSON 文本解析为有序任务列表
///
/// # 返回
/// 返回保持输入顺序的任务列表；数组和单对象两种形式都无法解析时返回
/// `ParseError::InvalidBatch`
pub fn parse_batch(raw: &str) -> Result<Vec<JobDescription>, ParseError> {
    // 先按数组解析
    let array_error = match serde_json::from_str::<Vec<JobDescription>>(raw) {
        Ok(jobs) => return Ok(jobs),
        Err(e) => e,
    };

    // 回退：按单个任务对象解析，包装成单元素列表
    match serde_json::from_str::<JobDescription>(raw) {
        Ok(job) => Ok(vec![job]),
        Err(object_error) => Err(ParseError::InvalidBatch {
            array_error: array_error.to_string(),
            object_error: object_error.to_string(),
        }),
    }
}

/// 从文件加载批量任务
pub async fn load_batch_file(path: impl AsRef<Path>) -> Result<Vec<JobDescription>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取批量输入文件: {}", path.display()))?;

    let jobs = parse_batch(&content)
        .with_context(|| format!("无法解析批量输入文件: {}", path.display()))?;

    tracing::info!("成功加载 {} 个任务", jobs.len());

    Ok(jobs)
}
