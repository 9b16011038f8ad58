//! # Batch Job Submit
//!
//! 一个可靠的批量任务提交客户端：把一批任务描述逐个 POST 到远端队列 API，
//! 容忍瞬时网络故障、歧义超时和服务端拒绝，产出可审计的已接受任务记录
//! 和整批的单一成败判定。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/job` - `JobDescription`（不透明负载 + 幂等令牌）、
//!   `AcceptedJob`、`BatchResult`
//! - `models/loaders` - 批量输入解析（数组或单对象，宽松回退）
//!
//! ### ② 客户端层（Clients）
//! - `clients/queue_client` - 唯一的共享 HTTP 客户端持有者，
//!   一次 POST = 一个带标签的 `AttemptOutcome`
//!
//! ### ③ 业务能力层（Services）
//! - `JobSubmitter` - 单任务重试状态机（退避抖动、超时与取消区分）
//! - `ReportWriter` - 已接受任务报告写入能力
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 顺序驱动批次、校验、记账、取消传播
//!
//! ## 幂等契约
//!
//! 每个任务在首次发送前注入一个 `JobStartIdentifier`，所有重试沿用同一个值。
//! 服务端约定：相同令牌的重复提交指向同一个逻辑任务启动，
//! 因此客户端侧超时后的重试不会产生重复任务。

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{AttemptOutcome, QueueClient};
pub use config::Config;
pub use error::{AppError, AppResult, ParseError, SubmitError};
pub use models::{parse_batch, AcceptedJob, BatchResult, JobDescription};
pub use orchestrator::App;
pub use services::{JobSubmitter, ReportWriter};
