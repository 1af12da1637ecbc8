use crate::domain::tagging::TagRules;
use crate::utils::error::{Result, WarroomError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// warroom.toml 的完整結構。每個區塊都有預設值，沒有設定檔也能跑。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarroomConfig {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            name: "招生策略控制台".to_string(),
            description: "學校招生 SEO/GEO 戰情室".to_string(),
            version: "0.3.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: "school_data.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// None 表示自動：有金鑰才啟用
    pub enabled: Option<bool>,
    pub endpoint: String,
    /// 建議寫 "${SERPER_API_KEY}" 由環境變數注入
    pub api_key: Option<String>,
    /// 地區提示
    pub gl: String,
    /// 語言提示
    pub hl: String,
    pub result_limit: usize,
    pub cache_ttl_seconds: u64,
    pub timeout_seconds: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            endpoint: "https://google.serper.dev/search".to_string(),
            api_key: Some("${SERPER_API_KEY}".to_string()),
            gl: "tw".to_string(),
            hl: "zh-tw".to_string(),
            result_limit: 3,
            cache_ttl_seconds: 600,
            timeout_seconds: Some(20),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// 產文要花錢，預設關閉，用 --generate 或這裡打開
    pub enabled: bool,
    pub endpoint: String,
    /// 建議寫 "${OPENAI_API_KEY}" 由環境變數注入
    pub api_key: Option<String>,
    /// 單一固定模型，不做執行期退援
    pub model: String,
    pub max_attempts: u32,
    pub retry_delay_seconds: u64,
    pub timeout_seconds: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: Some("${OPENAI_API_KEY}".to_string()),
            model: "gpt-4o-mini".to_string(),
            max_attempts: 3,
            retry_delay_seconds: 2,
            timeout_seconds: Some(60),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: String,
    /// 把報告與附件打包成單一 ZIP 素材包
    pub archive: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            archive: false,
        }
    }
}

/// 搜尋結果來源判斷用的網域清單
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub own_domains: Vec<String>,
    pub competitor_domains: Vec<String>,
    pub forum_domains: Vec<String>,
    pub job_board_domains: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            own_domains: Vec::new(),
            competitor_domains: Vec::new(),
            forum_domains: vec![
                "dcard.tw".to_string(),
                "ptt.cc".to_string(),
                "mobile01.com".to_string(),
            ],
            job_board_domains: vec![
                "104.com.tw".to_string(),
                "1111.com.tw".to_string(),
                "yes123.com.tw".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub system_stats: Option<bool>,
}

impl From<&SiteConfig> for TagRules {
    fn from(site: &SiteConfig) -> Self {
        TagRules {
            forum_domains: site.forum_domains.clone(),
            job_board_domains: site.job_board_domains.clone(),
            own_domains: site.own_domains.clone(),
            competitor_domains: site.competitor_domains.clone(),
        }
    }
}

impl WarroomConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WarroomError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WarroomError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SERPER_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static env-var pattern");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("data.csv_path", &self.data.csv_path)?;
        validation::validate_file_extensions(
            "data.csv_path",
            std::slice::from_ref(&self.data.csv_path),
            &["csv"],
        )?;

        validation::validate_url("search.endpoint", &self.search.endpoint)?;
        validation::validate_range("search.result_limit", self.search.result_limit, 1, 10)?;

        validation::validate_url("generation.endpoint", &self.generation.endpoint)?;
        validation::validate_non_empty_string("generation.model", &self.generation.model)?;
        validation::validate_range("generation.max_attempts", self.generation.max_attempts, 1, 10)?;
        validation::validate_range(
            "generation.retry_delay_seconds",
            self.generation.retry_delay_seconds,
            0,
            60,
        )?;

        validation::validate_path("report.output_path", &self.report.output_path)?;
        validation::validate_positive_number(
            "search.cache_ttl_seconds",
            self.search.cache_ttl_seconds as usize,
            1,
        )?;

        Ok(())
    }

    /// 搜尋金鑰：空字串或未解析的 ${VAR} 佔位符都視為未設定
    pub fn search_key(&self) -> Option<&str> {
        resolved_key(self.search.api_key.as_deref())
    }

    /// 產文金鑰
    pub fn generation_key(&self) -> Option<&str> {
        resolved_key(self.generation.api_key.as_deref())
    }

    /// 搜尋步驟是否啟用：明確設定優先，否則看金鑰有沒有
    pub fn search_active(&self) -> bool {
        match self.search.enabled {
            Some(flag) => flag && self.search_key().is_some(),
            None => self.search_key().is_some(),
        }
    }

    pub fn output_path(&self) -> &str {
        &self.report.output_path
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

fn resolved_key(raw: Option<&str>) -> Option<&str> {
    match raw {
        Some(key) if !key.trim().is_empty() && !key.starts_with("${") => Some(key),
        _ => None,
    }
}

impl Validate for WarroomConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_config_file() {
        let config = WarroomConfig::default();
        assert_eq!(config.data.csv_path, "school_data.csv");
        assert_eq!(config.search.result_limit, 3);
        assert_eq!(config.search.gl, "tw");
        assert_eq!(config.generation.max_attempts, 3);
        assert!(!config.generation.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[dashboard]
name = "測試戰情室"
description = "test"
version = "1.0.0"

[data]
csv_path = "keywords.csv"

[search]
result_limit = 5
cache_ttl_seconds = 120

[report]
output_path = "./reports"
archive = true
"#;

        let config = WarroomConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.dashboard.name, "測試戰情室");
        assert_eq!(config.data.csv_path, "keywords.csv");
        assert_eq!(config.search.result_limit, 5);
        assert_eq!(config.search.cache_ttl_seconds, 120);
        assert!(config.report.archive);
        // 未設定的區塊吃預設值
        assert_eq!(config.generation.model, "gpt-4o-mini");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WARROOM_TEST_KEY", "sk-test-123");

        let toml_content = r#"
[search]
api_key = "${WARROOM_TEST_KEY}"
"#;

        let config = WarroomConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.search.api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(config.search_key(), Some("sk-test-123"));

        std::env::remove_var("WARROOM_TEST_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_means_no_key() {
        std::env::remove_var("WARROOM_ABSENT_KEY");
        let toml_content = r#"
[search]
api_key = "${WARROOM_ABSENT_KEY}"
"#;
        let config = WarroomConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.search_key(), None);
        assert!(!config.search_active());
    }

    #[test]
    fn test_search_active_respects_explicit_disable() {
        let mut config = WarroomConfig::default();
        config.search.api_key = Some("real-key".to_string());
        assert!(config.search_active());

        config.search.enabled = Some(false);
        assert!(!config.search_active());
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let mut config = WarroomConfig::default();
        config.search.result_limit = 0;
        assert!(config.validate().is_err());

        let mut config = WarroomConfig::default();
        config.generation.endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());

        let mut config = WarroomConfig::default();
        config.data.csv_path = "school_data.xlsx".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[data]
csv_path = "file_test.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = WarroomConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data.csv_path, "file_test.csv");
    }

    #[test]
    fn test_tag_rules_from_site_config() {
        let site = SiteConfig {
            own_domains: vec!["example-u.edu.tw".to_string()],
            ..SiteConfig::default()
        };
        let rules = TagRules::from(&site);
        assert_eq!(rules.own_domains, vec!["example-u.edu.tw".to_string()]);
        assert!(rules.forum_domains.contains(&"dcard.tw".to_string()));
    }
}
