pub mod department;
pub mod overview;

use crate::domain::model::ReportBundle;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, WarroomError};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// 千分位格式，報表數字都走這裡
pub(crate) fn format_count(value: u64) -> String {
    let reversed: Vec<char> = value.to_string().chars().rev().collect();
    let mut out = String::new();
    for (i, c) in reversed.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out.chars().rev().collect()
}

/// 檔名不能帶的字元一律換底線
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            other => other,
        })
        .collect()
}

pub(crate) fn report_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

fn bundle_zip(files: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(*name, FileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// 發布報告：一般模式逐檔寫出，archive 模式打包成單一 ZIP 素材包
pub(crate) async fn publish_bundle<S: Storage>(
    store: &S,
    output_path: &str,
    report_name: &str,
    archive_name: &str,
    archive: bool,
    report: &ReportBundle,
) -> Result<String> {
    if archive {
        let mut files: Vec<(&str, &[u8])> = vec![(report_name, report.markdown.as_bytes())];
        for attachment in &report.attachments {
            files.push((attachment.filename.as_str(), attachment.content.as_slice()));
        }

        let zip_data = bundle_zip(&files)?;
        store.write_file(archive_name, &zip_data).await?;

        tracing::info!("📦 Materials pack saved: {}/{}", output_path, archive_name);
        return Ok(format!("{}/{}", output_path, archive_name));
    }

    store
        .write_file(report_name, report.markdown.as_bytes())
        .await?;
    for attachment in &report.attachments {
        store
            .write_file(&attachment.filename, &attachment.content)
            .await?;
    }

    tracing::info!("📁 Report saved: {}/{}", output_path, report_name);
    Ok(format!("{}/{}", output_path, report_name))
}

/// 行動清單 CSV（附件用）
pub(crate) fn action_list_csv(
    rows: &[&crate::domain::model::KeywordRecord],
) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Keyword", "Search_Volume", "Competition_Level", "Opportunity_Score"])?;
    for row in rows {
        let volume = row.search_volume.to_string();
        let score = row.opportunity_score.to_string();
        writer.write_record([
            row.keyword.as_str(),
            volume.as_str(),
            row.competition_level.label(),
            score.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| WarroomError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })
}
