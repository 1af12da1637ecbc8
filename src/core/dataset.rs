use crate::domain::model::KeywordRecord;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, WarroomError};

/// 透過 Storage 讀取關鍵字資料檔。
/// 檔案不存在是致命錯誤，直接中止整個視角。
pub async fn load_keywords<S: Storage>(storage: &S, path: &str) -> Result<Vec<KeywordRecord>> {
    tracing::debug!("Reading keyword data from: {}", path);

    let bytes = storage.read_file(path).await.map_err(|e| match e {
        WarroomError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            WarroomError::DataFileMissing {
                path: path.to_string(),
            }
        }
        other => other,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<KeywordRecord>().enumerate() {
        // 標頭算第 1 列
        let record = row.map_err(|e| WarroomError::DataRowError {
            row: index + 2,
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    if records.is_empty() {
        tracing::warn!("📝 Keyword file {} has no data rows", path);
    } else {
        tracing::info!("📊 Loaded {} keyword rows from {}", records.len(), path);
    }

    Ok(records)
}
