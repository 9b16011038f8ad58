//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量提交和结果汇总，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor::App (处理 Vec<JobDescription>)
//!     ↓
//! services::JobSubmitter (处理单个 JobDescription 的重试状态机)
//!     ↓
//! clients::QueueClient (单次 HTTP 往返)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只做调度、校验和记账，不做重试判断
//! 2. **资源隔离**：只有编排层持有 QueueClient 和取消令牌
//! 3. **无共享可变状态**：每个任务的重试状态都是提交调用的局部值

pub mod batch_processor;

pub use batch_processor::App;
