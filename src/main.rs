use clap::Parser;
use geo_warroom::adapters::{generation::GenerationClient, search::SearchClient};
use geo_warroom::config::{CliArgs, Command};
use geo_warroom::utils::{logger, validation::Validate};
use geo_warroom::{DepartmentView, LocalStorage, OverviewView, ViewEngine, WarroomConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🏫 Starting geo-warroom CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 載入 TOML 配置，沒有設定檔就吃內建預設值
    let mut config = if std::path::Path::new(&args.config).exists() {
        tracing::info!("📁 Loading configuration from: {}", args.config);
        match WarroomConfig::from_file(&args.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    } else {
        tracing::info!(
            "📁 No config file at {}, using built-in defaults",
            args.config
        );
        WarroomConfig::default()
    };

    // 應用命令列覆蓋設定
    if let Some(data) = &args.data {
        config.data.csv_path = data.clone();
        tracing::info!("🔧 Data file overridden to: {}", data);
    }
    if let Some(output) = &args.output {
        config.report.output_path = output.clone();
        tracing::info!("🔧 Output path overridden to: {}", output);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = args.monitor || config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let data_store = LocalStorage::new(String::new());
    let report_store = LocalStorage::new(config.output_path().to_string());

    let result = match &args.command {
        Command::Overview => {
            let view = OverviewView::new(data_store, report_store, config);
            ViewEngine::new_with_monitoring(view, monitor_enabled)
                .run()
                .await
        }
        Command::Department {
            name,
            keyword,
            no_search,
            generate,
            archive,
        } => {
            let mut view =
                DepartmentView::new(data_store, report_store, config.clone(), name.clone())
                    .with_target_keyword(keyword.clone())
                    .with_archive(*archive || config.report.archive);

            if *no_search {
                tracing::info!("🔕 Search step disabled by --no-search");
            } else if config.search_active() {
                let key = config.search_key().unwrap_or_default().to_string();
                view = view.with_search(Box::new(SearchClient::new(&config.search, key)));
            } else {
                tracing::info!("💡 模式：GEO 策略引導 (無搜尋 API 連線)");
            }

            if *generate || config.generation.enabled {
                match config.generation_key() {
                    Some(key) => {
                        let client = GenerationClient::new(&config.generation, key.to_string());
                        tracing::info!("✍️ Generation enabled with model: {}", client.model());
                        view = view.with_generator(Box::new(client));
                    }
                    None => {
                        tracing::warn!(
                            "⚠️ Generation requested but no API key resolved; staying in copy-paste mode"
                        );
                    }
                }
            }

            ViewEngine::new_with_monitoring(view, monitor_enabled)
                .run()
                .await
        }
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ War room report completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ 報告已產出！");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ War room run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                geo_warroom::utils::error::ErrorSeverity::Low => 0, // 警告，但成功
                geo_warroom::utils::error::ErrorSeverity::Medium => 2, // 外部服務錯誤
                geo_warroom::utils::error::ErrorSeverity::High => 1, // 處理錯誤
                geo_warroom::utils::error::ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
