use crate::app::views::{format_count, publish_bundle, report_timestamp};
use crate::config::toml_config::WarroomConfig;
use crate::core::dataset;
use crate::domain::analytics;
use crate::domain::model::{Attachment, DepartmentTotals, KeywordRecord, ReportBundle};
use crate::domain::ports::{Storage, View};
use crate::utils::error::{Result, WarroomError};

const BAR_WIDTH: usize = 32;

/// 全校總覽：各科系聲量加總、聲量冠軍、長條圖
pub struct OverviewView<S: Storage> {
    data_store: S,
    report_store: S,
    config: WarroomConfig,
}

impl<S: Storage> OverviewView<S> {
    pub fn new(data_store: S, report_store: S, config: WarroomConfig) -> Self {
        Self {
            data_store,
            report_store,
            config,
        }
    }
}

fn bar_chart_lines(totals: &[DepartmentTotals]) -> Vec<String> {
    let mut sorted = totals.to_vec();
    sorted.sort_by(|a, b| b.total_volume.cmp(&a.total_volume));

    let max = sorted
        .first()
        .map(|t| t.total_volume)
        .unwrap_or(0)
        .max(1);

    sorted
        .iter()
        .map(|t| {
            let len = ((t.total_volume as u128 * BAR_WIDTH as u128) / max as u128) as usize;
            let bar = "█".repeat(len.max(1));
            format!(
                "{} │{} {}",
                t.department,
                bar,
                format_count(t.total_volume)
            )
        })
        .collect()
}

#[async_trait::async_trait]
impl<S: Storage> View for OverviewView<S> {
    async fn extract(&self) -> Result<Vec<KeywordRecord>> {
        dataset::load_keywords(&self.data_store, &self.config.data.csv_path).await
    }

    async fn compose(&self, records: Vec<KeywordRecord>) -> Result<ReportBundle> {
        let mut headline = vec!["📊 全校科系網路聲量總覽".to_string()];

        if records.is_empty() {
            // 空資料是中性狀態，不是錯誤
            headline.push("ℹ️ 資料檔沒有任何關鍵字列。".to_string());
            return Ok(ReportBundle {
                headline,
                markdown: format!(
                    "# 📊 全校科系網路聲量總覽\n\n產生時間：{}\n\nℹ️ 資料檔沒有任何關鍵字列。\n",
                    report_timestamp()
                ),
                attachments: Vec::new(),
            });
        }

        let total = analytics::total_volume(&records);
        let totals = analytics::department_totals(&records);
        let champion = analytics::volume_champion(&totals)
            .ok_or_else(|| WarroomError::ProcessingError {
                message: "no departments after grouping non-empty records".to_string(),
            })?;

        headline.push(format!("全校總潛在搜尋流量：{}", format_count(total)));
        headline.push(format!("網路聲量冠軍：{}", champion.department));
        headline.push(String::new());
        headline.extend(bar_chart_lines(&totals));

        let mut markdown = String::new();
        markdown.push_str("# 📊 全校科系網路聲量總覽\n\n");
        markdown.push_str(&format!("產生時間：{}\n\n", report_timestamp()));
        markdown.push_str(
            "此報告協助各系找出**「高潛力關鍵字」**，並提供**「讓 AI (ChatGPT) 看得懂」**的撰寫建議。\n\n",
        );
        markdown.push_str(&format!(
            "- 全校總潛在搜尋流量：**{}**\n",
            format_count(total)
        ));
        markdown.push_str(&format!("- 網路聲量冠軍：**{}**\n\n", champion.department));

        markdown.push_str("## 各科系月搜尋量\n\n");
        markdown.push_str("| 科系 | 月搜尋量 | 關鍵字數 |\n|---|---:|---:|\n");
        let mut sorted = totals.clone();
        sorted.sort_by(|a, b| b.total_volume.cmp(&a.total_volume));
        for dept in &sorted {
            markdown.push_str(&format!(
                "| {} | {} | {} |\n",
                dept.department,
                format_count(dept.total_volume),
                dept.keyword_count
            ));
        }

        markdown.push_str("\n```text\n");
        for line in bar_chart_lines(&totals) {
            markdown.push_str(&line);
            markdown.push('\n');
        }
        markdown.push_str("```\n");

        let attachments = vec![Attachment {
            filename: "department_totals.csv".to_string(),
            content: department_totals_csv(&sorted)?,
        }];

        Ok(ReportBundle {
            headline,
            markdown,
            attachments,
        })
    }

    async fn publish(&self, report: &ReportBundle) -> Result<String> {
        publish_bundle(
            &self.report_store,
            self.config.output_path(),
            "overview_report.md",
            "overview_pack.zip",
            self.config.report.archive,
            report,
        )
        .await
    }
}

fn department_totals_csv(totals: &[DepartmentTotals]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Department", "Total_Search_Volume", "Keyword_Count"])?;
    for dept in totals {
        let volume = dept.total_volume.to_string();
        let count = dept.keyword_count.to_string();
        writer.write_record([dept.department.as_str(), volume.as_str(), count.as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| WarroomError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })
}
