pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Parser)]
#[command(name = "warroom")]
#[command(about = "學校招生 SEO/GEO 戰情室 — keyword analytics and GEO copy drafting")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "warroom.toml")]
    pub config: String,

    /// Keyword data CSV (overrides [data].csv_path)
    #[arg(long)]
    pub data: Option<String>,

    /// Report output directory (overrides [report].output_path)
    #[arg(long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase CPU/memory stats")]
    pub monitor: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 全校科系網路聲量總覽
    Overview,

    /// 單一科系的 AI 搜尋優化戰情室
    Department {
        /// Department name as it appears in the data file
        name: String,

        /// Target keyword (defaults to the department's top-opportunity keyword)
        #[arg(short, long)]
        keyword: Option<String>,

        /// Skip the organic-results search step
        #[arg(long)]
        no_search: bool,

        /// Submit the GEO prompt to the generation API
        #[arg(long)]
        generate: bool,

        /// Bundle report and attachments into a single ZIP pack
        #[arg(long)]
        archive: bool,
    },
}
