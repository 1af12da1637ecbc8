use crate::config::toml_config::GenerationConfig;
use crate::domain::ports::ArticleGenerator;
use crate::utils::error::{Result, WarroomError};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// 產文 API 客戶端（chat-completion 形式）。
/// 只對流量限制 (HTTP 429) 做固定間隔重試，其餘錯誤立即放棄。
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_attempts: u32,
    retry_delay: Duration,
    timeout: Option<Duration>,
}

impl GenerationClient {
    pub fn new(config: &GenerationConfig, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_secs(config.retry_delay_seconds),
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl ArticleGenerator for GenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        for attempt in 1..=self.max_attempts {
            let mut request = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&payload);

            if let Some(timeout) = self.timeout {
                request = request.timeout(timeout);
            }

            tracing::debug!(
                "Generation request (attempt {}/{}) with model: {}",
                attempt,
                self.max_attempts,
                self.model
            );

            let response = request.send().await?;
            let status = response.status();
            tracing::debug!("Generation response status: {}", status);

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt < self.max_attempts {
                    tracing::warn!(
                        "⏳ Rate limited (attempt {}/{}), retrying in {:?}",
                        attempt,
                        self.max_attempts,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    continue;
                }
                return Err(WarroomError::RateLimited {
                    attempts: self.max_attempts,
                });
            }

            if !status.is_success() {
                return Err(WarroomError::GenerationApiError {
                    message: format!("HTTP {}", status),
                });
            }

            let json_data: serde_json::Value = response.json().await?;
            let content = json_data
                .pointer("/choices/0/message/content")
                .and_then(|v| v.as_str())
                .ok_or_else(|| WarroomError::MalformedResponse {
                    context: "choices[0].message.content".to_string(),
                })?;

            tracing::info!("✍️ Generation succeeded ({} chars)", content.chars().count());
            return Ok(content.trim().to_string());
        }

        Err(WarroomError::RateLimited {
            attempts: self.max_attempts,
        })
    }
}
