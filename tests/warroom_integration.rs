use geo_warroom::adapters::{generation::GenerationClient, search::SearchClient};
use geo_warroom::{DepartmentView, LocalStorage, OverviewView, ViewEngine, WarroomConfig, WarroomError};
use httpmock::prelude::*;
use tempfile::TempDir;

const SAMPLE_CSV: &str = "\
Department,Keyword,Search_Volume,Competition_Level,Opportunity_Score
護理系,護理系學什麼,900,低,5.5
護理系,護理師薪水,5400,高,9.2
護理系,護理系國考,2900,中,7.8
資管系,資管出路,3200,中,7.4
幼保系,幼保證照,1100,低,6.2
";

fn write_sample_csv(dir: &TempDir) {
    std::fs::write(dir.path().join("school_data.csv"), SAMPLE_CSV).unwrap();
}

fn test_config(output_dir: &TempDir) -> WarroomConfig {
    let mut config = WarroomConfig::default();
    config.data.csv_path = "school_data.csv".to_string();
    config.report.output_path = output_dir.path().to_str().unwrap().to_string();
    config
}

fn stores(data_dir: &TempDir, output_dir: &TempDir) -> (LocalStorage, LocalStorage) {
    (
        LocalStorage::new(data_dir.path().to_str().unwrap().to_string()),
        LocalStorage::new(output_dir.path().to_str().unwrap().to_string()),
    )
}

#[tokio::test]
async fn test_end_to_end_overview_report() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    write_sample_csv(&data_dir);

    let config = test_config(&output_dir);
    let (data_store, report_store) = stores(&data_dir, &output_dir);

    let view = OverviewView::new(data_store, report_store, config);
    let engine = ViewEngine::new_with_monitoring(view, false);

    let output_path = engine.run().await.unwrap();
    assert!(output_path.ends_with("overview_report.md"));

    let report = std::fs::read_to_string(output_dir.path().join("overview_report.md")).unwrap();
    // 總量 = 所有列加總
    assert!(report.contains("**13,500**"));
    // 護理系 9200 是聲量冠軍
    assert!(report.contains("網路聲量冠軍：**護理系**"));

    let totals_csv =
        std::fs::read_to_string(output_dir.path().join("department_totals.csv")).unwrap();
    assert!(totals_csv.contains("護理系,9200,3"));
    assert!(totals_csv.contains("資管系,3200,1"));
    assert!(totals_csv.contains("幼保系,1100,1"));
}

#[tokio::test]
async fn test_end_to_end_department_with_search_and_generation() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    write_sample_csv(&data_dir);

    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(200).json_body(serde_json::json!({
            "organic": [
                {"title": "護理師薪水大公開", "link": "https://www.dcard.tw/f/nursing/p/1", "snippet": "網友實測"},
                {"title": "護理師職缺與薪資", "link": "https://www.104.com.tw/jobs/search", "snippet": "薪資行情"},
                {"title": "護理學系介紹", "link": "https://nursing.example-u.edu.tw/", "snippet": "系所特色"}
            ]
        }));
    });
    let generation_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "護理師薪水全解析……"}}]
        }));
    });

    let mut config = test_config(&output_dir);
    config.search.endpoint = server.url("/search");
    config.generation.endpoint = server.url("/v1/chat/completions");
    config.site.own_domains = vec!["example-u.edu.tw".to_string()];

    let (data_store, report_store) = stores(&data_dir, &output_dir);

    let view = DepartmentView::new(data_store, report_store, config.clone(), "護理系".to_string())
        .with_search(Box::new(SearchClient::new(
            &config.search,
            "test-key".to_string(),
        )))
        .with_generator(Box::new(GenerationClient::new(
            &config.generation,
            "sk-test".to_string(),
        )));

    let engine = ViewEngine::new_with_monitoring(view, false);
    let output_path = engine.run().await.unwrap();

    search_mock.assert();
    generation_mock.assert();
    assert!(output_path.ends_with("護理系_report.md"));

    let report = std::fs::read_to_string(output_dir.path().join("護理系_report.md")).unwrap();
    // 預設目標 = 機會分數最高的關鍵字
    assert!(report.contains("護理師薪水"));
    // 搜尋結果帶來源分類
    assert!(report.contains("論壇討論"));
    assert!(report.contains("求職平台"));
    assert!(report.contains("本校網站"));
    // 生成文章在報告裡
    assert!(report.contains("護理師薪水全解析"));

    // 文章以「科系_關鍵字.txt」存檔
    let article =
        std::fs::read_to_string(output_dir.path().join("護理系_護理師薪水.txt")).unwrap();
    assert_eq!(article, "護理師薪水全解析……");

    let action_csv =
        std::fs::read_to_string(output_dir.path().join("護理系_action_list.csv")).unwrap();
    let lines: Vec<&str> = action_csv.lines().collect();
    assert_eq!(
        lines[0],
        "Keyword,Search_Volume,Competition_Level,Opportunity_Score"
    );
    // 機會分數由高到低
    assert!(lines[1].starts_with("護理師薪水"));
    assert!(lines[2].starts_with("護理系國考"));
    assert!(lines[3].starts_with("護理系學什麼"));
}

#[tokio::test]
async fn test_missing_data_file_halts_without_partial_render() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    // 不寫資料檔

    let config = test_config(&output_dir);
    let (data_store, report_store) = stores(&data_dir, &output_dir);

    let view = OverviewView::new(data_store, report_store, config);
    let engine = ViewEngine::new_with_monitoring(view, false);

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, WarroomError::DataFileMissing { .. }));

    // 輸出目錄保持空白，不會有半套報告
    let leftover: Vec<_> = std::fs::read_dir(output_dir.path()).unwrap().collect();
    assert!(leftover.is_empty());
}

#[tokio::test]
async fn test_department_search_failure_still_produces_report() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    write_sample_csv(&data_dir);

    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(500);
    });

    let mut config = test_config(&output_dir);
    config.search.endpoint = server.url("/search");

    let (data_store, report_store) = stores(&data_dir, &output_dir);
    let view = DepartmentView::new(data_store, report_store, config.clone(), "資管系".to_string())
        .with_search(Box::new(SearchClient::new(
            &config.search,
            "test-key".to_string(),
        )));

    let engine = ViewEngine::new_with_monitoring(view, false);
    let output_path = engine.run().await.unwrap();

    search_mock.assert();
    assert!(output_path.ends_with("資管系_report.md"));

    let report = std::fs::read_to_string(output_dir.path().join("資管系_report.md")).unwrap();
    // 搜尋失敗只變成一行顯示字串
    assert!(report.contains("搜尋服務異常"));
    // 其餘區塊照常產出
    assert!(report.contains("GEO 文案提示詞"));
    assert!(report.contains("優先撰寫建議清單"));
}

#[tokio::test]
async fn test_department_archive_mode_bundles_zip() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    write_sample_csv(&data_dir);

    let config = test_config(&output_dir);
    let (data_store, report_store) = stores(&data_dir, &output_dir);

    let view = DepartmentView::new(data_store, report_store, config, "幼保系".to_string())
        .with_archive(true);

    let engine = ViewEngine::new_with_monitoring(view, false);
    let output_path = engine.run().await.unwrap();

    assert!(output_path.ends_with("幼保系_warroom_pack.zip"));

    let zip_data = std::fs::read(output_dir.path().join("幼保系_warroom_pack.zip")).unwrap();
    let cursor = std::io::Cursor::new(zip_data);
    let mut archive = zip::ZipArchive::new(cursor).unwrap();

    let mut entries: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    entries.sort();
    assert_eq!(
        entries,
        vec![
            "幼保系_action_list.csv".to_string(),
            "幼保系_report.md".to_string()
        ]
    );

    // ZIP 是唯一的輸出檔
    let files: Vec<_> = std::fs::read_dir(output_dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[tokio::test]
async fn test_empty_department_produces_neutral_report() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    write_sample_csv(&data_dir);

    let config = test_config(&output_dir);
    let (data_store, report_store) = stores(&data_dir, &output_dir);

    let view = DepartmentView::new(data_store, report_store, config, "觀光系".to_string());
    let engine = ViewEngine::new_with_monitoring(view, false);

    // 查無科系是中性結果，不是錯誤
    let output_path = engine.run().await.unwrap();
    assert!(output_path.ends_with("觀光系_report.md"));

    let report = std::fs::read_to_string(output_dir.path().join("觀光系_report.md")).unwrap();
    assert!(report.contains("此科系無數據"));
}
