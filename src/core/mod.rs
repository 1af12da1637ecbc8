pub mod dataset;
pub mod engine;

pub use crate::domain::model::{KeywordRecord, ReportBundle};
pub use crate::domain::ports::{ArticleGenerator, SearchProvider, Storage, View};
pub use crate::utils::error::Result;
