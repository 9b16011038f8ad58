//! 批量任务处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量任务的顺序提交和结果汇总。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：构建共享 HTTP 客户端、提交服务、报告写入服务
//! 2. **批量加载**：解析输入文件（`Vec<JobDescription>`），解析失败整体中止
//! 3. **提交前校验**：缺少 `QueueId` 的任务直接记错并跳过，不消耗任何尝试
//! 4. **顺序提交**：一次一个任务，远端队列是共享且速率敏感的，
//!    并发提交会破坏带抖动的退避设计
//! 5. **结果汇总**：按输入顺序收集已接受任务，判定 = 接受数 == 输入数
//! 6. **取消传播**：运行级取消令牌，触发后立即停止后续任务
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个任务的重试细节（委托 JobSubmitter）
//! - **资源所有者**：唯一持有 QueueClient 的模块
//! - **故障隔离**：单任务的失败只影响自己，绝不跨任务传播（取消除外）
//! - **扩展点**：提交服务无共享可变状态，未来可换成有界并发而不改重试契约

use crate::clients::QueueClient;
use crate::config::Config;
use crate::error::SubmitError;
use crate::models::job::{BatchResult, JobDescription};
use crate::models::load_batch_file;
use crate::services::{JobSubmitter, ReportWriter};
use crate::utils::logging::{log_batch_loaded, log_startup, print_final_stats};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    client: QueueClient,
    submitter: JobSubmitter,
    report_writer: ReportWriter,
    cancel: CancellationToken,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let client = QueueClient::new(&config)?;
        let submitter = JobSubmitter::new(&config);
        let report_writer = ReportWriter::new(config.report_file.clone());

        log_startup(client.endpoint(), config.max_attempts);

        Ok(Self {
            config,
            client,
            submitter,
            report_writer,
            cancel: CancellationToken::new(),
        })
    }

    /// 运行级取消令牌，供操作员中止整个运行（如 Ctrl-C）
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchResult> {
        // 加载批量任务；解析失败在任何网络活动之前中止整个运行
        let jobs = load_batch_file(&self.config.batch_file).await?;

        if jobs.is_empty() {
            warn!("⚠️ 输入中没有任务，程序结束");
            return Ok(BatchResult::default());
        }

        log_batch_loaded(jobs.len());

        let result = self.process_all_jobs(jobs).await;

        print_final_stats(&result, &self.config.report_file);

        Ok(result)
    }

    /// 顺序提交所有任务并汇总结果
    pub async fn process_all_jobs(&self, jobs: Vec<JobDescription>) -> BatchResult {
        let mut result = BatchResult {
            total_jobs: jobs.len(),
            ..Default::default()
        };
        let mut rng = StdRng::from_entropy();

        for (idx, mut job) in jobs.into_iter().enumerate() {
            let job_index = idx + 1;

            if self.cancel.is_cancelled() {
                error!("🛑 收到取消信号，跳过剩余任务");
                result.aborted = true;
                break;
            }

            // 提交前校验：缺少 QueueId 的任务绝不发起 HTTP 请求
            let queue_id = match job.queue_id() {
                Some(q) => q.to_string(),
                None => {
                    error!("[任务 {}] ❌ 缺少 QueueId，跳过提交", job_index);
                    continue;
                }
            };

            info!("[任务 {}] 📤 正在提交到队列 {} ...", job_index, queue_id);

            match self
                .submitter
                .submit(&self.client, &mut job, job_index, &self.cancel, &mut rng)
                .await
            {
                Ok(accepted) => {
                    // 报告写入失败不改变任务的接受状态
                    if let Err(e) = self.report_writer.write(&accepted) {
                        warn!("[任务 {}] ⚠️ 写入报告失败: {}", job_index, e);
                    }
                    result.accepted.push(accepted);
                }
                Err(SubmitError::Cancelled) => {
                    error!("🛑 收到取消信号，中止整个运行");
                    result.aborted = true;
                    break;
                }
                Err(SubmitError::Exhausted { .. }) => {
                    // 提交服务已记录 error；任务缺席会让整体判定翻为失败
                }
            }
        }

        result
    }
}
