use crate::app::views::{
    action_list_csv, format_count, publish_bundle, report_timestamp, sanitize_filename,
};
use crate::config::toml_config::WarroomConfig;
use crate::core::dataset;
use crate::domain::analytics;
use crate::domain::model::{
    Attachment, KeywordRecord, ReportBundle, SearchStatus, TaggedResult,
};
use crate::domain::ports::{ArticleGenerator, SearchProvider, Storage, View};
use crate::domain::prompt;
use crate::domain::tagging::TagRules;
use crate::utils::error::{Result, WarroomError};

/// 單一科系戰情室：必攻關鍵字、自然搜尋結果、GEO 提示詞、產文與行動清單
pub struct DepartmentView<S: Storage> {
    data_store: S,
    report_store: S,
    config: WarroomConfig,
    department: String,
    target_keyword: Option<String>,
    search: Option<Box<dyn SearchProvider>>,
    generator: Option<Box<dyn ArticleGenerator>>,
    archive: bool,
}

/// 搜尋步驟的結果，失敗一律轉成顯示字串
enum SearchSection {
    Skipped,
    NoData,
    Results {
        status: SearchStatus,
        tagged: Vec<TaggedResult>,
    },
    Failed(String),
}

enum ArticleSection {
    Skipped,
    Generated { filename: String, text: String },
    Failed(String),
}

impl<S: Storage> DepartmentView<S> {
    pub fn new(
        data_store: S,
        report_store: S,
        config: WarroomConfig,
        department: String,
    ) -> Self {
        let archive = config.report.archive;
        Self {
            data_store,
            report_store,
            config,
            department,
            target_keyword: None,
            search: None,
            generator: None,
            archive,
        }
    }

    pub fn with_target_keyword(mut self, keyword: Option<String>) -> Self {
        self.target_keyword = keyword;
        self
    }

    pub fn with_search(mut self, provider: Box<dyn SearchProvider>) -> Self {
        self.search = Some(provider);
        self
    }

    pub fn with_generator(mut self, generator: Box<dyn ArticleGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_archive(mut self, archive: bool) -> Self {
        self.archive = archive;
        self
    }

    fn slug(&self) -> String {
        sanitize_filename(&self.department)
    }

    fn empty_report(&self) -> ReportBundle {
        let title = format!("🔍 {}：AI 搜尋優化戰情室", self.department);
        ReportBundle {
            headline: vec![title.clone(), "⚠️ 此科系無數據。".to_string()],
            markdown: format!(
                "# {}\n\n產生時間：{}\n\n⚠️ 此科系無數據。\n",
                title,
                report_timestamp()
            ),
            attachments: Vec::new(),
        }
    }

    async fn run_search(&self, target: &str) -> SearchSection {
        let Some(provider) = &self.search else {
            return SearchSection::Skipped;
        };

        match provider.top_organic(target).await {
            Ok(outcome) if outcome.results.is_empty() => SearchSection::NoData,
            Ok(outcome) => {
                let rules = TagRules::from(&self.config.site);
                SearchSection::Results {
                    status: outcome.status,
                    tagged: rules.tag_all(outcome.results),
                }
            }
            // 外部呼叫失敗只影響這個區塊，報告照出
            Err(e) => {
                tracing::warn!("Search step failed: {}", e);
                SearchSection::Failed(e.user_friendly_message())
            }
        }
    }

    async fn run_generation(&self, geo_prompt: &str, target: &str) -> ArticleSection {
        let Some(generator) = &self.generator else {
            return ArticleSection::Skipped;
        };

        match generator.generate(geo_prompt).await {
            Ok(text) => ArticleSection::Generated {
                filename: format!("{}_{}.txt", self.slug(), sanitize_filename(target)),
                text,
            },
            Err(e) => {
                tracing::warn!("Generation step failed: {}", e);
                ArticleSection::Failed(e.user_friendly_message())
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> View for DepartmentView<S> {
    async fn extract(&self) -> Result<Vec<KeywordRecord>> {
        dataset::load_keywords(&self.data_store, &self.config.data.csv_path).await
    }

    async fn compose(&self, records: Vec<KeywordRecord>) -> Result<ReportBundle> {
        let rows = analytics::department_rows(&records, &self.department);

        let Some(best) = analytics::must_write(&rows) else {
            return Ok(self.empty_report());
        };
        let average = analytics::average_volume(&rows);

        // 目標關鍵字必須存在於該科系資料，出站呼叫前就擋下
        let target = match &self.target_keyword {
            Some(keyword) => {
                if !rows.iter().any(|r| r.keyword == *keyword) {
                    return Err(WarroomError::InvalidConfigValueError {
                        field: "department.keyword".to_string(),
                        value: keyword.clone(),
                        reason: format!("「{}」沒有這個關鍵字", self.department),
                    });
                }
                keyword.clone()
            }
            None => best.keyword.clone(),
        };

        let search_section = self.run_search(&target).await;

        let profile = prompt::select_profile(&target);
        let geo_prompt = prompt::build_prompt(&self.department, &target, &profile);

        let article_section = self.run_generation(&geo_prompt, &target).await;

        let actions = analytics::action_list(&rows);

        // --- 終端摘要 ---
        let title = format!("🔍 {}：AI 搜尋優化戰情室", self.department);
        let mut headline = vec![
            title.clone(),
            format!("🔥 本月必攻關鍵字：{}", best.keyword),
            format!("平均月搜尋量：{}", format_count(average)),
            format!(
                "🎯 目標關鍵字：{}（策略面向：{}）",
                target,
                profile.category.label()
            ),
        ];
        match &search_section {
            SearchSection::Skipped => {
                headline.push("💡 模式：GEO 策略引導（未啟用搜尋 API）".to_string())
            }
            SearchSection::NoData => headline.push("ℹ️ 查無搜尋資料。".to_string()),
            SearchSection::Results { status, tagged } => {
                let cached_note = if *status == SearchStatus::Cached {
                    "（快取）"
                } else {
                    ""
                };
                headline.push(format!(
                    "🌐 取得 {} 筆自然搜尋結果{}",
                    tagged.len(),
                    cached_note
                ));
            }
            SearchSection::Failed(message) => headline.push(format!("❌ {}", message)),
        }
        headline.push(format!(
            "💡 策略提示：針對「{}」，建議重點放在 {} 面向，並務必包含表格數據！",
            target,
            profile.category.label()
        ));
        match &article_section {
            ArticleSection::Skipped => {}
            ArticleSection::Generated { filename, .. } => {
                headline.push(format!("📄 文章已生成：{}", filename))
            }
            ArticleSection::Failed(message) => headline.push(format!("❌ {}", message)),
        }

        // --- 報告本文 ---
        let mut markdown = String::new();
        markdown.push_str(&format!("# {}\n\n", title));
        markdown.push_str(&format!("產生時間：{}\n\n", report_timestamp()));

        markdown.push_str("## 重點指標\n\n");
        markdown.push_str(&format!(
            "- 🔥 本月必攻關鍵字：**{}**（機會分數 {}）\n",
            best.keyword, best.opportunity_score
        ));
        markdown.push_str(&format!("- 平均月搜尋量：{}\n", format_count(average)));
        markdown.push_str(&format!(
            "- 🎯 目標關鍵字：**{}**（策略面向：{}）\n\n",
            target,
            profile.category.label()
        ));

        markdown.push_str("## 🌐 自然搜尋結果\n\n");
        match &search_section {
            SearchSection::Skipped => {
                markdown.push_str("💡 模式：GEO 策略引導（未啟用搜尋 API 連線）。\n\n");
            }
            SearchSection::NoData => {
                markdown.push_str("ℹ️ 查無搜尋資料。\n\n");
            }
            SearchSection::Failed(message) => {
                markdown.push_str(&format!("❌ {}\n\n", message));
            }
            SearchSection::Results { status, tagged } => {
                if *status == SearchStatus::Cached {
                    markdown.push_str("♻️ 快取時間窗內的重複查詢，重用上次結果。\n\n");
                }
                markdown.push_str("| # | 標題 | 來源 | 摘要 |\n|---|---|---|---|\n");
                for (i, item) in tagged.iter().enumerate() {
                    markdown.push_str(&format!(
                        "| {} | [{}]({}) | {} | {} |\n",
                        i + 1,
                        item.result.title,
                        item.result.link,
                        item.tag.label(),
                        item.result.snippet
                    ));
                }
                markdown.push('\n');
            }
        }

        markdown.push_str("## 🛠️ GEO 文案提示詞\n\n");
        markdown.push_str("```text\n");
        markdown.push_str(&geo_prompt);
        markdown.push_str("```\n\n");
        if matches!(article_section, ArticleSection::Skipped) {
            markdown.push_str("📋 請複製以上指令 (Prompt) 給 ChatGPT / Gemini。\n\n");
        }
        markdown.push_str(&format!(
            "💡 策略提示：針對「{}」，建議重點放在 **{}** 面向，並務必包含表格數據！\n\n",
            target,
            profile.category.label()
        ));

        let mut attachments = Vec::new();
        match &article_section {
            ArticleSection::Skipped => {}
            ArticleSection::Generated { filename, text } => {
                markdown.push_str("## 📄 生成文章\n\n");
                markdown.push_str(&format!("已存成 `{}`，全文如下：\n\n", filename));
                markdown.push_str(text);
                markdown.push_str("\n\n");
                attachments.push(Attachment {
                    filename: filename.clone(),
                    content: text.as_bytes().to_vec(),
                });
            }
            ArticleSection::Failed(message) => {
                markdown.push_str("## 📄 生成文章\n\n");
                markdown.push_str(&format!("❌ {}\n\n", message));
            }
        }

        markdown.push_str("## 📝 優先撰寫建議清單\n\n");
        markdown.push_str("| 關鍵字 | 月搜尋量 | 競爭程度 | 機會分數 |\n|---|---:|---|---:|\n");
        for row in &actions {
            markdown.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                row.keyword,
                format_count(row.search_volume),
                row.competition_level.label(),
                row.opportunity_score
            ));
        }

        attachments.push(Attachment {
            filename: format!("{}_action_list.csv", self.slug()),
            content: action_list_csv(&actions)?,
        });

        Ok(ReportBundle {
            headline,
            markdown,
            attachments,
        })
    }

    async fn publish(&self, report: &ReportBundle) -> Result<String> {
        let slug = self.slug();
        publish_bundle(
            &self.report_store,
            self.config.output_path(),
            &format!("{}_report.md", slug),
            &format!("{}_warroom_pack.zip", slug),
            self.archive,
            report,
        )
        .await
    }
}
