use anyhow::Result;
use batch_job_submit::utils::logging;
use batch_job_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化应用
    let app = App::initialize(config)?;

    // Ctrl-C 触发运行级取消：在途请求立即失败，不再开始新任务
    let cancel = app.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let result = app.run().await?;

    // 退出码反映整体判定
    if !result.verdict() {
        std::process::exit(1);
    }

    Ok(())
}
