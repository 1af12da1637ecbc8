//! GEO 文案提示詞：關鍵字分類與提示詞模板。
//!
//! 分類是對固定詞表做子字串比對，依固定優先順序取第一個命中，
//! 全部未命中則落到課程特色，對任何輸入都有結果。

/// 職涯／薪資相關詞
const CAREER_TERMS: [&str; 4] = ["薪水", "出路", "工作", "行情"];
/// 證照／國考相關詞
const CERT_TERMS: [&str; 3] = ["證照", "國考", "通過率"];
/// 比較／競品相關詞
const COMPARISON_TERMS: [&str; 4] = ["比較", "差別", "排名", "評價"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCategory {
    Career,
    Certification,
    Comparison,
    Curriculum,
}

impl PromptCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PromptCategory::Career => "職涯發展",
            PromptCategory::Certification => "證照考試",
            PromptCategory::Comparison => "競品比較",
            PromptCategory::Curriculum => "課程特色",
        }
    }
}

/// 每個分類對應的 (重點面向, 表格內容, 語氣) 三元組
#[derive(Debug, Clone, Copy)]
pub struct PromptProfile {
    pub category: PromptCategory,
    pub focus_point: &'static str,
    pub table_content: &'static str,
    pub tone: &'static str,
}

/// 依固定優先順序分類：職涯 → 證照 → 比較 → 課程特色
pub fn classify(keyword: &str) -> PromptCategory {
    if CAREER_TERMS.iter().any(|term| keyword.contains(term)) {
        PromptCategory::Career
    } else if CERT_TERMS.iter().any(|term| keyword.contains(term)) {
        PromptCategory::Certification
    } else if COMPARISON_TERMS.iter().any(|term| keyword.contains(term)) {
        PromptCategory::Comparison
    } else {
        PromptCategory::Curriculum
    }
}

pub fn profile_for(category: PromptCategory) -> PromptProfile {
    match category {
        PromptCategory::Career => PromptProfile {
            category,
            focus_point: "薪資範圍、就業市場穩定性、職位多元性",
            table_content: "不同工作場域（如醫院 vs 企業）的薪資與福利比較",
            tone: "親切、專業、數據導向",
        },
        PromptCategory::Certification => PromptProfile {
            category,
            focus_point: "國考及格率、輔導機制、證照價值",
            table_content: "本校 vs 全國平均及格率對照表",
            tone: "親切、專業、數據導向",
        },
        PromptCategory::Comparison => PromptProfile {
            category,
            focus_point: "課程差異、教學資源、畢業生表現",
            table_content: "本校與其他學校的重點項目比較表",
            tone: "客觀、中立、數據導向",
        },
        PromptCategory::Curriculum => PromptProfile {
            category,
            focus_point: "實作課程、實習機會、設備優勢",
            table_content: "大一到大四的關鍵核心課程地圖",
            tone: "親切、專業、數據導向",
        },
    }
}

pub fn select_profile(keyword: &str) -> PromptProfile {
    profile_for(classify(keyword))
}

/// 組出給產文引擎（或人工複製貼上）的完整指令
pub fn build_prompt(department: &str, keyword: &str, profile: &PromptProfile) -> String {
    format!(
        r#"【角色設定】：你是一位精通「GEO (生成式引擎優化)」的大學招生行銷專家。
【任務目標】：請為「{department}」針對關鍵字「{keyword}」撰寫一篇高權重文章。

【GEO 關鍵寫作要求】(為了讓 AI 優先引用)：
1. 📍 直接回答 (Direct Answer)：文章第一段請直接給出「{keyword}」的核心定義或數據結論，不要廢話。
2. 📊 結構化表格：請務必製作一個 Markdown 表格，內容為「{table}」。
3. 🎓 權威性內容：請強調「{focus}」，並適度引用權威數據。
4. ❓ FAQ 常見問答：文末請列出 3 個關於「{keyword}」的高中生常見問題並回答。

【語氣】：{tone}。
【字數】：約 800 字。
"#,
        department = department,
        keyword = keyword,
        table = profile.table_content,
        focus = profile.focus_point,
        tone = profile.tone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_keyword_maps_to_career() {
        assert_eq!(classify("護理師薪水"), PromptCategory::Career);
        assert_eq!(classify("資管出路好嗎"), PromptCategory::Career);
    }

    #[test]
    fn test_license_keyword_maps_to_certification() {
        assert_eq!(classify("幼保證照怎麼考"), PromptCategory::Certification);
        assert_eq!(classify("護理系國考"), PromptCategory::Certification);
    }

    #[test]
    fn test_comparison_keyword_maps_to_comparison() {
        assert_eq!(classify("護理系學校排名"), PromptCategory::Comparison);
    }

    #[test]
    fn test_unmatched_keyword_falls_to_curriculum() {
        assert_eq!(classify("護理系學什麼"), PromptCategory::Curriculum);
        assert_eq!(classify(""), PromptCategory::Curriculum);
    }

    #[test]
    fn test_priority_order_picks_earlier_list() {
        // 同時命中職涯與證照詞表，取優先順序較前的職涯
        assert_eq!(classify("護理師薪水與證照"), PromptCategory::Career);
        // 同時命中證照與比較詞表，取證照
        assert_eq!(classify("證照通過率排名"), PromptCategory::Certification);
    }

    #[test]
    fn test_prompt_interpolates_profile_triple() {
        let profile = select_profile("護理師薪水");
        let prompt = build_prompt("護理系", "護理師薪水", &profile);

        assert!(prompt.contains("護理系"));
        assert!(prompt.contains("護理師薪水"));
        assert!(prompt.contains(profile.focus_point));
        assert!(prompt.contains(profile.table_content));
        assert!(prompt.contains("約 800 字"));
        assert!(prompt.contains("3 個"));
    }
}
