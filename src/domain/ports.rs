use crate::domain::model::{KeywordRecord, ReportBundle, SearchOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 搜尋 API 的出站呼叫（含快取）
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn top_organic(&self, query: &str) -> Result<SearchOutcome>;
}

/// 產文 API 的出站呼叫
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// 一個視角的完整執行：讀檔 → 組裝 → 發布
#[async_trait]
pub trait View: Send + Sync {
    async fn extract(&self) -> Result<Vec<KeywordRecord>>;
    async fn compose(&self, records: Vec<KeywordRecord>) -> Result<ReportBundle>;
    async fn publish(&self, report: &ReportBundle) -> Result<String>;
}
