use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarroomError {
    #[error("Keyword data file not found: {path}")]
    DataFileMissing { path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed keyword row {row}: {reason}")]
    DataRowError { row: usize, reason: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Search API error: {message}")]
    SearchApiError { message: String },

    #[error("Generation API error: {message}")]
    GenerationApiError { message: String },

    #[error("Generation API rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Unexpected API response: {context}")]
    MalformedResponse { context: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Network,
    Config,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WarroomError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DataFileMissing { .. } | Self::CsvError(_) | Self::DataRowError { .. } => {
                ErrorCategory::Data
            }
            Self::ApiError(_)
            | Self::SearchApiError { .. }
            | Self::GenerationApiError { .. }
            | Self::RateLimited { .. }
            | Self::MalformedResponse { .. } => ErrorCategory::Network,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
            Self::ProcessingError { .. } | Self::SerializationError(_) => ErrorCategory::Processing,
            Self::ZipError(_) | Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 沒有資料檔就什麼都做不了
            Self::DataFileMissing { .. } => ErrorSeverity::Critical,
            Self::CsvError(_) | Self::DataRowError { .. } => ErrorSeverity::High,
            // 外部 API 失敗不致命，報告仍可產出
            Self::ApiError(_)
            | Self::SearchApiError { .. }
            | Self::GenerationApiError { .. }
            | Self::RateLimited { .. }
            | Self::MalformedResponse { .. } => ErrorSeverity::Medium,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::ProcessingError { .. } | Self::SerializationError(_) => ErrorSeverity::High,
            Self::ZipError(_) | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::DataFileMissing { path } => {
                format!("確認 {} 是否存在，或用 [data].csv_path 指定正確路徑", path)
            }
            Self::CsvError(_) | Self::DataRowError { .. } => {
                "檢查 CSV 欄位是否為 Department,Keyword,Search_Volume,Competition_Level,Opportunity_Score"
                    .to_string()
            }
            Self::ApiError(_) => "檢查網路連線與 API 端點設定".to_string(),
            Self::SearchApiError { .. } => {
                "檢查 SERPER_API_KEY 與 [search].endpoint 設定".to_string()
            }
            Self::GenerationApiError { .. } | Self::MalformedResponse { .. } => {
                "檢查 OPENAI_API_KEY 與 [generation] 設定".to_string()
            }
            Self::RateLimited { .. } => "稍後重新執行，或降低產文頻率".to_string(),
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "檢查 warroom.toml 的設定值".to_string(),
            Self::ProcessingError { .. } | Self::SerializationError(_) => {
                "回報此問題並附上 --verbose 輸出".to_string()
            }
            Self::ZipError(_) | Self::IoError(_) => "確認輸出目錄存在且有寫入權限".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DataFileMissing { path } => {
                format!("錯誤：找不到 {}，請確認資料檔是否上傳成功。", path)
            }
            Self::CsvError(e) => format!("資料檔格式有誤：{}", e),
            Self::DataRowError { row, reason } => format!("資料檔第 {} 列有誤：{}", row, reason),
            Self::ApiError(e) => format!("連線外部服務失敗：{}", e),
            Self::SearchApiError { message } => format!("搜尋服務異常：{}", message),
            Self::GenerationApiError { message } => format!("產文服務異常：{}", message),
            Self::RateLimited { attempts } => {
                format!("產文服務流量限制，已重試 {} 次仍失敗", attempts)
            }
            Self::MalformedResponse { context } => format!("外部服務回應格式異常：{}", context),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WarroomError>;
