// Adapters layer: concrete clients for the two external services.
// Domain code only sees the SearchProvider / ArticleGenerator ports.

pub mod generation;
pub mod search;
