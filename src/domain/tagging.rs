use crate::domain::model::{OrganicResult, SourceTag, TaggedResult};
use url::Url;

/// 搜尋結果來源判斷規則。
/// 比對順序：論壇 → 求職平台 → 本校 → 競爭學校，未命中為其他。
/// 本校在競爭學校之前，避免共用網域字尾時誤判自家網站。
#[derive(Debug, Clone, Default)]
pub struct TagRules {
    pub forum_domains: Vec<String>,
    pub job_board_domains: Vec<String>,
    pub own_domains: Vec<String>,
    pub competitor_domains: Vec<String>,
}

impl TagRules {
    pub fn tag(&self, link: &str) -> SourceTag {
        let host = Url::parse(link)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()));

        let matches = |domains: &[String]| -> bool {
            domains.iter().any(|domain| {
                let domain = domain.to_ascii_lowercase();
                match &host {
                    Some(host) => host == &domain || host.ends_with(&format!(".{}", domain)),
                    // 連結不是合法 URL 時退回子字串比對
                    None => link.to_ascii_lowercase().contains(&domain),
                }
            })
        };

        if matches(&self.forum_domains) {
            SourceTag::Forum
        } else if matches(&self.job_board_domains) {
            SourceTag::JobBoard
        } else if matches(&self.own_domains) {
            SourceTag::OwnSite
        } else if matches(&self.competitor_domains) {
            SourceTag::Competitor
        } else {
            SourceTag::Other
        }
    }

    pub fn tag_all(&self, results: Vec<OrganicResult>) -> Vec<TaggedResult> {
        results
            .into_iter()
            .map(|result| {
                let tag = self.tag(&result.link);
                TaggedResult { result, tag }
            })
            .collect()
    }
}
