use serde::{Deserialize, Serialize};

/// 一列關鍵字數據，對應 school_data.csv 的欄位
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Search_Volume")]
    pub search_volume: u64,
    #[serde(rename = "Competition_Level")]
    pub competition_level: CompetitionLevel,
    #[serde(rename = "Opportunity_Score")]
    pub opportunity_score: f64,
}

/// 競爭程度分類，資料檔中文英文都有人填
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CompetitionLevel::Low => "低",
            CompetitionLevel::Medium => "中",
            CompetitionLevel::High => "高",
        }
    }
}

impl TryFrom<String> for CompetitionLevel {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.trim() {
            "低" => Ok(CompetitionLevel::Low),
            "中" => Ok(CompetitionLevel::Medium),
            "高" => Ok(CompetitionLevel::High),
            other => match other.to_ascii_lowercase().as_str() {
                "low" => Ok(CompetitionLevel::Low),
                "medium" | "mid" => Ok(CompetitionLevel::Medium),
                "high" => Ok(CompetitionLevel::High),
                _ => Err(format!("unknown competition level: {}", value)),
            },
        }
    }
}

impl From<CompetitionLevel> for String {
    fn from(level: CompetitionLevel) -> Self {
        level.label().to_string()
    }
}

/// 每個科系的聲量統計
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentTotals {
    pub department: String,
    pub total_volume: u64,
    pub keyword_count: usize,
}

/// 自然搜尋結果（非付費）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganicResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// 搜尋結果來源分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTag {
    Forum,
    JobBoard,
    OwnSite,
    Competitor,
    Other,
}

impl SourceTag {
    pub fn label(&self) -> &'static str {
        match self {
            SourceTag::Forum => "論壇討論",
            SourceTag::JobBoard => "求職平台",
            SourceTag::OwnSite => "本校網站",
            SourceTag::Competitor => "競爭學校",
            SourceTag::Other => "其他來源",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// 即時查詢結果
    Live,
    /// 快取時間窗內的重複查詢
    Cached,
    /// 回應缺少 organic 或為空，查無資料
    NoData,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub results: Vec<OrganicResult>,
}

impl SearchOutcome {
    pub fn no_data() -> Self {
        Self {
            status: SearchStatus::NoData,
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaggedResult {
    pub result: OrganicResult,
    pub tag: SourceTag,
}

/// 報告附件（行動清單 CSV、生成文章等）
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

/// View 組裝完成的輸出：終端摘要、報告本文、附件
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub headline: Vec<String>,
    pub markdown: String,
    pub attachments: Vec<Attachment>,
}
