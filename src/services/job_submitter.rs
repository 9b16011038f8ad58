//! 任务提交服务 - 业务能力层
//!
//! 只负责"把一个任务提交到队列"的能力，不关心批次流程。
//!
//! 职责：
//! - 注入幂等令牌后按策略重试，直到成功或耗尽
//! - 只处理单个任务，不出现 Vec<JobDescription>
//! - 所有重试状态（剩余次数、随机退避）都是本次调用的局部值，
//!   任务之间不共享任何可变状态
//!
//! 两个取消来源严格区分：
//! - 单次请求超时由共享 Client 的 30 秒超时触发，按可重试失败处理
//! - 运行级 `CancellationToken` 由调用方持有，触发后立即中止，绝不重试

use crate::clients::{AttemptOutcome, QueueClient};
use crate::config::Config;
use crate::error::SubmitError;
use crate::models::job::{AcceptedJob, JobDescription};
use crate::utils::logging::truncate_text;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// 任务提交服务
pub struct JobSubmitter {
    max_attempts: u32,
    backoff_unit: Duration,
}

impl JobSubmitter {
    /// 创建新的提交服务
    pub fn new(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff_unit: Duration::from_millis(config.backoff_unit_ms),
        }
    }

    /// 提交一个任务，内部吸收瞬时故障
    ///
    /// # 参数
    /// - `client`: 共享的队列客户端
    /// - `job`: 任务描述（可变，用于注入幂等令牌）
    /// - `job_index`: 任务在批次中的编号（仅用于日志显示）
    /// - `cancel`: 运行级取消信号
    /// - `rng`: 随机源（显式传入，便于确定性测试）
    ///
    /// # 返回
    /// 成功返回已接受任务记录；重试耗尽返回 `Exhausted`；
    /// 外部取消返回 `Cancelled`，调用方必须中止整个运行
    pub async fn submit<R: Rng>(
        &self,
        client: &QueueClient,
        job: &mut JobDescription,
        job_index: usize,
        cancel: &CancellationToken,
        rng: &mut R,
    ) -> Result<AcceptedJob, SubmitError> {
        // 整个生命周期只注入一次，重试沿用同一个令牌
        let start_id = job.ensure_start_identifier();
        let queue_id = job.queue_id().unwrap_or_default().to_string();

        let mut remaining = self.max_attempts;
        let mut last_reason = String::from("未尝试");

        while remaining > 0 {
            let attempts_made = self.max_attempts - remaining;

            // 第二次及之后的尝试前做带抖动的线性退避
            if attempts_made > 0 {
                let delay = backoff_delay(attempts_made, self.backoff_unit, rng);
                info!(
                    "[任务 {}] ⏳ 等待 {:?} 后重试 ({}/{})",
                    job_index,
                    delay,
                    attempts_made + 1,
                    self.max_attempts
                );
                tokio::select! {
                    _ = cancel.cancelled() => return Err(SubmitError::Cancelled),
                    _ = sleep(delay) => {}
                }
            }

            let outcome = tokio::select! {
                _ = cancel.cancelled() => return Err(SubmitError::Cancelled),
                outcome = client.post_job(job) => outcome,
            };
            remaining -= 1;

            match outcome {
                AttemptOutcome::Accepted { name } => {
                    info!("[任务 {}] ✓ 提交成功, 任务标识: {}", job_index, name);
                    return Ok(AcceptedJob::new(name, &queue_id));
                }
                // 已知异常：2xx 但没有任务标识。记录 error 但仍按成功终止，
                // 产出空标识记录。改变此语义需系统负责人确认。
                AttemptOutcome::AcceptedMissingName => {
                    error!(
                        "[任务 {}] ❌ 服务端已接受但响应缺少任务标识 (令牌: {})",
                        job_index, start_id
                    );
                    return Ok(AcceptedJob::new("", &queue_id));
                }
                AttemptOutcome::AcceptedUnparseable { reason } => {
                    warn!(
                        "[任务 {}] ⚠️ 服务端已接受但响应体无法解析: {}",
                        job_index, reason
                    );
                    return Ok(AcceptedJob::new("", &queue_id));
                }
                AttemptOutcome::Rejected { status, body } => {
                    warn!(
                        "[任务 {}] ⚠️ 服务端拒绝 (HTTP {}) (尝试 {}/{}): {}",
                        job_index,
                        status,
                        attempts_made + 1,
                        self.max_attempts,
                        truncate_text(&body, 200)
                    );
                    last_reason = format!("HTTP {}: {}", status, truncate_text(&body, 200));
                }
                AttemptOutcome::Transport { reason, timeout } => {
                    if timeout {
                        // 超时是歧义结果，带上幂等令牌便于服务端关联排查
                        warn!(
                            "[任务 {}] ⚠️ 请求超时 (尝试 {}/{}), 令牌: {}",
                            job_index,
                            attempts_made + 1,
                            self.max_attempts,
                            start_id
                        );
                    } else {
                        warn!(
                            "[任务 {}] ⚠️ 网络错误 (尝试 {}/{}): {}",
                            job_index,
                            attempts_made + 1,
                            self.max_attempts,
                            reason
                        );
                    }
                    last_reason = reason;
                }
            }
        }

        error!(
            "[任务 {}] ❌ 重试耗尽 ({}): 已尝试 {} 次, 最后原因: {}",
            job_index,
            client.endpoint(),
            self.max_attempts,
            last_reason
        );

        Err(SubmitError::Exhausted {
            endpoint: client.endpoint().to_string(),
            attempts: self.max_attempts,
            last_reason,
        })
    }
}

/// 第 `attempts_made + 1` 次尝试前的退避时长
///
/// `attempts_made * random(1..=6)` 个基本单位：上界线性增长，
/// 每次带随机抖动，避免多个客户端对同一端点的同步重试风暴。
fn backoff_delay<R: Rng>(attempts_made: u32, unit: Duration, rng: &mut R) -> Duration {
    unit * (attempts_made * rng.gen_range(1..=6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_backoff_delay_within_bounds() {
        let unit = Duration::from_millis(100);
        let mut rng = rand::thread_rng();

        // 第 k 次尝试前 (k>=2) 的延迟必须落在 [(k-1)*1, (k-1)*6] 个单位内
        for attempts_made in 1..15u32 {
            for _ in 0..100 {
                let delay = backoff_delay(attempts_made, unit, &mut rng);
                assert!(delay >= unit * attempts_made);
                assert!(delay <= unit * (attempts_made * 6));
            }
        }
    }

    #[test]
    fn test_backoff_delay_deterministic_with_seeded_rng() {
        let unit = Duration::from_millis(100);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        for attempts_made in 1..15u32 {
            assert_eq!(
                backoff_delay(attempts_made, unit, &mut rng_a),
                backoff_delay(attempts_made, unit, &mut rng_b)
            );
        }
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts_before_request() {
        let config = Config {
            // 不可达端口，若取消不生效测试会走网络分支
            endpoint_url: "http://127.0.0.1:9/jobs".to_string(),
            ..Config::default()
        };
        let client = QueueClient::new(&config).unwrap();
        let submitter = JobSubmitter::new(&config);
        let mut job: JobDescription = serde_json::from_value(json!({"QueueId": "q1"})).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut rng = StdRng::seed_from_u64(1);
        let result = submitter
            .submit(&client, &mut job, 1, &cancel, &mut rng)
            .await;

        assert!(matches!(result, Err(SubmitError::Cancelled)));
    }
}
