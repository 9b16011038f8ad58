//! 队列 API 客户端
//!
//! 封装所有与远端队列 API 相关的调用逻辑：
//! 持有整个运行期间唯一的 `reqwest::Client`（连接复用，构造后只读），
//! 一次 POST 对应一个分类后的尝试结果。

use crate::config::Config;
use crate::error::AppError;
use crate::models::job::{JobDescription, NAME_FIELD};
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 单次提交尝试的分类结果
///
/// 宽松解析是刻意的：响应契约没有严格版本化，
/// 缺少 `Name` 和响应体不可解析都是带标签的变体而不是错误。
#[derive(Debug)]
pub enum AttemptOutcome {
    /// 2xx 且响应体带有非空 `Name`
    Accepted { name: String },
    /// 2xx 但 `Name` 缺失或为空（已知异常，终态）
    AcceptedMissingName,
    /// 2xx 但响应体不是合法 JSON（终态，不重试）
    AcceptedUnparseable { reason: String },
    /// 非 2xx 状态码（可重试）
    Rejected { status: u16, body: String },
    /// 网络层失败（可重试）；`timeout` 区分单次请求超时和连接错误
    Transport { reason: String, timeout: bool },
}

/// 队列 API 客户端
pub struct QueueClient {
    client: Client,
    /// 完整提交 URL（含百分号编码后的访问令牌）
    submit_url: Url,
    /// 不含令牌的端点，仅用于日志
    endpoint_display: String,
}

impl QueueClient {
    /// 创建新的队列客户端
    ///
    /// 单次请求超时配置在共享 Client 上，对所有任务的所有尝试生效。
    pub fn new(config: &Config) -> Result<Self> {
        let mut submit_url = Url::parse(&config.endpoint_url)
            .map_err(|e| AppError::invalid_endpoint(&config.endpoint_url, e.to_string()))?;

        let endpoint_display = submit_url.to_string();

        // 访问令牌作为查询参数拼接，query_pairs_mut 负责百分号编码
        if let Some(token) = &config.access_token {
            submit_url
                .query_pairs_mut()
                .append_pair("access_token", token);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("构建 HTTP 客户端失败")?;

        Ok(Self {
            client,
            submit_url,
            endpoint_display,
        })
    }

    /// 不含令牌的端点地址（日志用）
    pub fn endpoint(&self) -> &str {
        &self.endpoint_display
    }

    /// 提交一个任务，返回分类后的尝试结果
    ///
    /// 本方法只做一次 HTTP 往返，不做重试，重试由提交服务负责。
    pub async fn post_job(&self, job: &JobDescription) -> AttemptOutcome {
        debug!("提交任务 Payload: {:?}", job.fields());

        let response = match self
            .client
            .post(self.submit_url.clone())
            .json(job.fields())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                return AttemptOutcome::Transport {
                    reason: e.to_string(),
                    timeout: e.is_timeout(),
                }
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                // 响应体读取失败和请求失败同等对待
                return AttemptOutcome::Transport {
                    reason: e.to_string(),
                    timeout: e.is_timeout(),
                };
            }
        };

        if !status.is_success() {
            return AttemptOutcome::Rejected {
                status: status.as_u16(),
                body,
            };
        }

        // 2xx：宽松解析响应体，提取任务标识
        match serde_json::from_str::<Value>(&body) {
            Ok(parsed) => match parsed.get(NAME_FIELD).and_then(|v| v.as_str()) {
                Some(name) if !name.is_empty() => AttemptOutcome::Accepted {
                    name: name.to_string(),
                },
                _ => AttemptOutcome::AcceptedMissingName,
            },
            Err(e) => AttemptOutcome::AcceptedUnparseable {
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_percent_encoded() {
        let config = Config {
            endpoint_url: "http://example.com/jobs".to_string(),
            access_token: Some("a b/c+d".to_string()),
            ..Config::default()
        };
        let client = QueueClient::new(&config).unwrap();

        let query = client.submit_url.query().unwrap();
        assert!(query.starts_with("access_token="));
        // 原始空格和斜杠不允许出现在查询串里
        assert!(!query.contains(' '));
        assert!(!query.contains('/'));
    }

    #[test]
    fn test_no_token_no_query() {
        let config = Config {
            endpoint_url: "http://example.com/jobs".to_string(),
            access_token: None,
            ..Config::default()
        };
        let client = QueueClient::new(&config).unwrap();
        assert!(client.submit_url.query().is_none());
        assert_eq!(client.endpoint(), "http://example.com/jobs");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = Config {
            endpoint_url: "::不是URL::".to_string(),
            ..Config::default()
        };
        assert!(QueueClient::new(&config).is_err());
    }
}
