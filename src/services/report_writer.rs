//! 报告写入服务 - 业务能力层
//!
//! 只负责"写已接受任务报告"能力，不关心流程。
//! 宿主环境按行消费：每个已接受任务一行 JSON。

use crate::models::job::AcceptedJob;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 报告写入服务
pub struct ReportWriter {
    report_file_path: String,
}

impl ReportWriter {
    /// 创建新的报告写入服务
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            report_file_path: path.into(),
        }
    }

    /// 追加一条已接受任务记录
    pub fn write(&self, accepted: &AcceptedJob) -> Result<()> {
        debug!(
            "写入报告: 任务 {} | 队列 {} | 时间 {}",
            accepted.job_id, accepted.queue_id, accepted.accepted_at
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_file_path)
            .with_context(|| format!("无法打开报告文件: {}", self.report_file_path))?;

        let line = serde_json::to_string(accepted).context("序列化已接受任务记录失败")?;
        writeln!(file, "{}", line)?;

        Ok(())
    }
}
