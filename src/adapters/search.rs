use crate::config::toml_config::SearchConfig;
use crate::domain::model::{OrganicResult, SearchOutcome, SearchStatus};
use crate::domain::ports::SearchProvider;
use crate::utils::error::{Result, WarroomError};
use reqwest::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct CacheEntry {
    fetched_at: Instant,
    results: Vec<OrganicResult>,
}

/// 搜尋 API 客戶端。
/// 同一關鍵字在快取時間窗內重複查詢直接重用結果，不再出站。
pub struct SearchClient {
    client: Client,
    endpoint: String,
    api_key: String,
    gl: String,
    hl: String,
    result_limit: usize,
    timeout: Option<Duration>,
    cache_ttl: Duration,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl SearchClient {
    pub fn new(config: &SearchConfig, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key,
            gl: config.gl.clone(),
            hl: config.hl.clone(),
            result_limit: config.result_limit,
            timeout: config.timeout_seconds.map(Duration::from_secs),
            cache_ttl: Duration::from_secs(config.cache_ttl_seconds),
            cache: Mutex::new(HashMap::new()),
        }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<OrganicResult>> {
        let payload = serde_json::json!({
            "q": query,
            "gl": self.gl,
            "hl": self.hl,
            "num": self.result_limit,
        });

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&payload);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Search request for keyword: {}", query);
        let response = request.send().await?;
        tracing::debug!("Search response status: {}", response.status());

        if !response.status().is_success() {
            return Err(WarroomError::SearchApiError {
                message: format!("HTTP {}", response.status()),
            });
        }

        let json_data: serde_json::Value = response.json().await?;

        // 回應缺 organic 視為查無資料，不是錯誤
        let organic = match json_data.get("organic") {
            Some(serde_json::Value::Array(items)) => items.clone(),
            _ => {
                tracing::info!("ℹ️ Search response has no organic results for: {}", query);
                return Ok(Vec::new());
            }
        };

        let mut results = Vec::new();
        for item in organic.into_iter().take(self.result_limit) {
            match serde_json::from_value::<OrganicResult>(item) {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!("Skipping malformed organic entry: {}", e);
                }
            }
        }

        Ok(results)
    }
}

#[async_trait::async_trait]
impl SearchProvider for SearchClient {
    async fn top_organic(&self, query: &str) -> Result<SearchOutcome> {
        {
            let cache = self.cache.lock().await;
            if let Some(entry) = cache.get(query) {
                if entry.fetched_at.elapsed() < self.cache_ttl {
                    tracing::debug!("♻️ Search cache hit for: {}", query);
                    let status = if entry.results.is_empty() {
                        SearchStatus::NoData
                    } else {
                        SearchStatus::Cached
                    };
                    return Ok(SearchOutcome {
                        status,
                        results: entry.results.clone(),
                    });
                }
            }
        }

        let results = self.fetch(query).await?;

        let mut cache = self.cache.lock().await;
        cache.insert(
            query.to_string(),
            CacheEntry {
                fetched_at: Instant::now(),
                results: results.clone(),
            },
        );

        let status = if results.is_empty() {
            SearchStatus::NoData
        } else {
            SearchStatus::Live
        };

        Ok(SearchOutcome { status, results })
    }
}
