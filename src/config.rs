/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 队列服务提交端点
    pub endpoint_url: String,
    /// 访问令牌（可选，拼接到 URL 查询参数）
    pub access_token: Option<String>,
    /// 批量任务输入文件（JSON）
    pub batch_file: String,
    /// 每个任务的最大提交尝试次数
    pub max_attempts: u32,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 退避基本单位（毫秒），测试时可调小
    pub backoff_unit_ms: u64,
    /// 已接受任务的报告文件
    pub report_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:8080/jobs".to_string(),
            access_token: None,
            batch_file: "jobs.json".to_string(),
            max_attempts: 15,
            request_timeout_secs: 30,
            backoff_unit_ms: 1000,
            report_file: "accepted_jobs.jsonl".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            endpoint_url: std::env::var("ENDPOINT_URL").unwrap_or(default.endpoint_url),
            access_token: std::env::var("ACCESS_TOKEN").ok().filter(|v| !v.is_empty()),
            batch_file: std::env::var("BATCH_FILE").unwrap_or(default.batch_file),
            max_attempts: std::env::var("MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_attempts),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            backoff_unit_ms: std::env::var("BACKOFF_UNIT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.backoff_unit_ms),
            report_file: std::env::var("REPORT_FILE").unwrap_or(default.report_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_policy() {
        let config = Config::default();
        assert_eq!(config.max_attempts, 15);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.backoff_unit_ms, 1000);
    }
}
