use crate::domain::model::{DepartmentTotals, KeywordRecord};
use std::collections::HashMap;

/// 全校總潛在搜尋流量
pub fn total_volume(records: &[KeywordRecord]) -> u64 {
    records.iter().map(|r| r.search_volume).sum()
}

/// 各科系聲量加總，維持資料檔中首次出現的順序
pub fn department_totals(records: &[KeywordRecord]) -> Vec<DepartmentTotals> {
    let mut totals: Vec<DepartmentTotals> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match index.get(record.department.as_str()) {
            Some(&i) => {
                totals[i].total_volume += record.search_volume;
                totals[i].keyword_count += 1;
            }
            None => {
                index.insert(record.department.as_str(), totals.len());
                totals.push(DepartmentTotals {
                    department: record.department.clone(),
                    total_volume: record.search_volume,
                    keyword_count: 1,
                });
            }
        }
    }

    totals
}

/// 網路聲量冠軍：加總搜尋量最高的科系，同分取先出現者
pub fn volume_champion(totals: &[DepartmentTotals]) -> Option<&DepartmentTotals> {
    let mut champion: Option<&DepartmentTotals> = None;
    for dept in totals {
        match champion {
            Some(best) if dept.total_volume <= best.total_volume => {}
            _ => champion = Some(dept),
        }
    }
    champion
}

pub fn department_rows<'a>(
    records: &'a [KeywordRecord],
    department: &str,
) -> Vec<&'a KeywordRecord> {
    records
        .iter()
        .filter(|r| r.department == department)
        .collect()
}

/// 本月必攻關鍵字：機會分數最高的一列。
/// 同分時比照原始資料：依分數升冪穩定排序後反轉，取第一筆。
pub fn must_write<'a>(rows: &[&'a KeywordRecord]) -> Option<&'a KeywordRecord> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| a.opportunity_score.total_cmp(&b.opportunity_score));
    sorted.reverse();
    sorted.first().copied()
}

/// 平均月搜尋量（無條件捨去，沿用報表習慣）
pub fn average_volume(rows: &[&KeywordRecord]) -> u64 {
    if rows.is_empty() {
        return 0;
    }
    let sum: u64 = rows.iter().map(|r| r.search_volume).sum();
    sum / rows.len() as u64
}

/// 優先撰寫建議清單：機會分數由高到低
pub fn action_list<'a>(rows: &[&'a KeywordRecord]) -> Vec<&'a KeywordRecord> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));
    sorted
}
