/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use crate::models::job::BatchResult;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志订阅器
///
/// 通过 RUST_LOG 环境变量控制级别，默认 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// 记录程序启动信息
pub fn log_startup(endpoint: &str, max_attempts: u32) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量任务提交模式");
    info!("📡 目标端点: {}", endpoint);
    info!("🔁 单任务最大尝试次数: {}", max_attempts);
    info!("{}", "=".repeat(60));
}

/// 记录批量任务加载信息
pub fn log_batch_loaded(total: usize) {
    info!("✓ 找到 {} 个待提交的任务", total);
    info!("📋 将逐个顺序提交（共享端点，避免重试风暴）\n");
}

/// 打印最终统计信息
pub fn print_final_stats(result: &BatchResult, report_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 批量提交完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已接受: {}/{}", result.accepted.len(), result.total_jobs);
    info!("❌ 未接受: {}", result.total_jobs - result.accepted.len());
    if result.aborted {
        info!("🛑 运行被外部取消中止，结果不完整");
    }
    info!(
        "整体判定: {}",
        if result.verdict() { "成功" } else { "失败" }
    );
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_file);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
