//! Curated reference URLs and statutory citations
//!
//! Read-only, process-wide data. Entries are grouped by [`ReferenceSection`]; a
//! free-text [`lookup`] matches any entry whose topic keyword appears in the query.

/// A curated citation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub topic_keywords: &'static [&'static str],
    pub title: &'static str,
    /// One-line case summary, where one is curated
    pub summary: Option<&'static str>,
    pub url: &'static str,
}

/// A statute article relevant to rosai and harassment claims
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatuteCitation {
    pub law: &'static str,
    pub article: &'static str,
    pub subject: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSection {
    /// MHLW あかるい職場応援団 precedent listing
    HarassmentPrecedents,
    /// 労働保険審査会 decision summaries
    InsuranceDecisions,
    /// Court and precedent search portals
    CourtPortals,
    /// Leading rosai / harassment precedents, short court-search titles
    LeadingPrecedents,
    /// The same precedents under their full 全労連 case names
    LaborStandardPrecedents,
    /// 全労連 labor-standard precedent database
    LaborStandardDatabase,
    /// Recognition criteria for mental disorders
    RecognitionCriteria,
    /// e-Gov statute search
    LawPortal,
}

const HARASSMENT_KEYWORDS: &[&str] = &["パワハラ", "精神障害", "労災"];

const HARASSMENT_PRECEDENTS: &[ReferenceEntry] = &[ReferenceEntry {
    topic_keywords: &["ハラスメント", "裁判例"],
    title: "厚労省 あかるい職場応援団 裁判例",
    summary: None,
    url: "https://www.no-harassment.mhlw.go.jp/foundation/judicail-precedent/",
}];

const INSURANCE_DECISIONS: &[ReferenceEntry] = &[
    ReferenceEntry {
        topic_keywords: &["裁決", "審査会"],
        title: "裁決事案一覧",
        summary: None,
        url: "https://www.mhlw.go.jp/topics/bukyoku/shinsa/roudou/saiketu-youshi/",
    },
    ReferenceEntry {
        topic_keywords: &["裁決", "精神疾患"],
        title: "精神疾患関係裁決集(PDF)",
        summary: None,
        url: "http://gyosei-bunsyo.net/H21rsinsml.pdf",
    },
    ReferenceEntry {
        topic_keywords: &["裁決", "社労士"],
        title: "大阪SR会資料(PDF)",
        summary: None,
        url: "https://osakasr.jp/upload/files/uploadedfile/202405/jCVPGub33850.pdf",
    },
];

const COURT_PORTALS: &[ReferenceEntry] = &[
    ReferenceEntry {
        topic_keywords: &["判例"],
        title: "裁判所判例検索（総合）",
        summary: None,
        url: "https://www.courts.go.jp/hanrei/index.html",
    },
    ReferenceEntry {
        topic_keywords: &["判例", "労働"],
        title: "労働事件裁判例集",
        summary: None,
        url: "https://www.courts.go.jp/app/hanrei_jp/search2?page=1&sort=1&hanreiSyu=4",
    },
    ReferenceEntry {
        topic_keywords: &["判例", "労働"],
        title: "全労連判例検索",
        summary: None,
        url: "https://www.zenkiren.com/Portals/0/html/jinji/hannrei/",
    },
];

const LEADING_PRECEDENTS: &[ReferenceEntry] = &[
    ReferenceEntry {
        topic_keywords: HARASSMENT_KEYWORDS,
        title: "栃木労基署長事件（パワハラ・精神障害）",
        summary: Some("パワハラ等による精神障害、障害補償給付不支給処分取消"),
        url: "https://www.zenkiren.com/Portals/0/html/jinji/hannrei/shoshi/08736.html",
    },
    ReferenceEntry {
        topic_keywords: HARASSMENT_KEYWORDS,
        title: "半田労基署長事件（退職勧奨・精神障害）",
        summary: Some("パワハラ・退職勧奨による精神障害発症の業務起因性"),
        url: "https://www.zenkiren.com/Portals/0/html/jinji/hannrei/shoshi/09160.html",
    },
    ReferenceEntry {
        topic_keywords: HARASSMENT_KEYWORDS,
        title: "京都労基署長事件（集団いじめ）",
        summary: Some("精神障害・労災療養補償給付の認定"),
        url: "https://www.jaaww.or.jp/joho/data/2012_0120_29.html",
    },
];

const LABOR_STANDARD_PRECEDENTS: &[ReferenceEntry] = &[
    ReferenceEntry {
        topic_keywords: &["全労連"],
        title: "栃木労働基準監督署長事件",
        summary: Some("パワハラ等による精神障害、障害補償給付不支給処分取消"),
        url: "https://www.zenkiren.com/Portals/0/html/jinji/hannrei/shoshi/08736.html",
    },
    ReferenceEntry {
        topic_keywords: &["全労連"],
        title: "国・半田労基署長（医療法人B会D病院）事件",
        summary: Some("パワハラ・退職勧奨による精神障害発症の業務起因性"),
        url: "https://www.zenkiren.com/Portals/0/html/jinji/hannrei/shoshi/09160.html",
    },
    ReferenceEntry {
        topic_keywords: &["全労連"],
        title: "国・京都下労基署長事件（女性社員集団いじめ）",
        summary: Some("精神障害・労災療養補償給付の認定"),
        url: "https://www.jaaww.or.jp/joho/data/2012_0120_29.html",
    },
];

const LABOR_STANDARD_DATABASE: &[ReferenceEntry] = &[ReferenceEntry {
    topic_keywords: &["全労連"],
    title: "全労連判例DB",
    summary: None,
    url: "https://www.zenkiren.com/Portals/0/html/jinji/hannrei/",
}];

const RECOGNITION_CRITERIA: &[ReferenceEntry] = &[ReferenceEntry {
    topic_keywords: &["認定基準", "心理的負荷"],
    title: "認定基準PDF",
    summary: None,
    url: "https://www.mhlw.go.jp/content/000637497.pdf",
}];

const LAW_PORTAL: &[ReferenceEntry] = &[ReferenceEntry {
    topic_keywords: &["法令"],
    title: "e-Gov 法令検索",
    summary: None,
    url: "https://laws.e-gov.go.jp",
}];

pub const STATUTES: &[StatuteCitation] = &[
    StatuteCitation { law: "労働基準法", article: "第75条", subject: "療養補償" },
    StatuteCitation { law: "労働基準法", article: "第76条", subject: "休業補償" },
    StatuteCitation { law: "労働基準法", article: "第79条", subject: "障害補償" },
    StatuteCitation { law: "労災保険法", article: "第7条", subject: "業務災害の定義" },
    StatuteCitation { law: "労働施策総合推進法", article: "第30条の2", subject: "パワハラ防止措置義務" },
];

const ALL_SECTIONS: &[ReferenceSection] = &[
    ReferenceSection::HarassmentPrecedents,
    ReferenceSection::InsuranceDecisions,
    ReferenceSection::CourtPortals,
    ReferenceSection::LeadingPrecedents,
    ReferenceSection::LaborStandardPrecedents,
    ReferenceSection::LaborStandardDatabase,
    ReferenceSection::RecognitionCriteria,
    ReferenceSection::LawPortal,
];

impl ReferenceSection {
    pub fn entries(&self) -> &'static [ReferenceEntry] {
        match self {
            ReferenceSection::HarassmentPrecedents => HARASSMENT_PRECEDENTS,
            ReferenceSection::InsuranceDecisions => INSURANCE_DECISIONS,
            ReferenceSection::CourtPortals => COURT_PORTALS,
            ReferenceSection::LeadingPrecedents => LEADING_PRECEDENTS,
            ReferenceSection::LaborStandardPrecedents => LABOR_STANDARD_PRECEDENTS,
            ReferenceSection::LaborStandardDatabase => LABOR_STANDARD_DATABASE,
            ReferenceSection::RecognitionCriteria => RECOGNITION_CRITERIA,
            ReferenceSection::LawPortal => LAW_PORTAL,
        }
    }

    /// First entry of the section; every section has at least one
    pub fn primary(&self) -> &'static ReferenceEntry {
        &self.entries()[0]
    }
}

impl ReferenceEntry {
    pub fn matches(&self, topic: &str) -> bool {
        self.topic_keywords.iter().any(|k| topic.contains(k))
    }
}

/// Entries across all sections whose topic keyword occurs in `topic`.
/// Order follows section order, then entry order; empty when nothing matches.
pub fn lookup(topic: &str) -> Vec<&'static ReferenceEntry> {
    ALL_SECTIONS
        .iter()
        .flat_map(|s| s.entries())
        .filter(|e| e.matches(topic))
        .collect()
}

/// Leading precedents relevant to `keyword`, empty unless it names a
/// harassment or occupational-injury term
pub fn leading_precedents_for(keyword: &str) -> Vec<&'static ReferenceEntry> {
    ReferenceSection::LeadingPrecedents
        .entries()
        .iter()
        .filter(|e| e.matches(keyword))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_entries() {
        for section in ALL_SECTIONS {
            assert!(!section.entries().is_empty(), "{:?} is empty", section);
            assert!(section.primary().url.starts_with("http"));
        }
    }

    #[test]
    fn test_lookup_matches_keyword_substring() {
        let hits = lookup("パワハラによる適応障害");
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|e| e.summary.is_some()));
    }

    #[test]
    fn test_lookup_unknown_topic_is_empty() {
        assert!(lookup("特許").is_empty());
    }

    #[test]
    fn test_leading_precedents_only_for_harassment_terms() {
        assert_eq!(leading_precedents_for("労災認定").len(), 3);
        assert_eq!(leading_precedents_for("精神障害").len(), 3);
        assert!(leading_precedents_for("解雇").is_empty());
    }

    #[test]
    fn test_labor_standard_precedents_share_links_with_leading_precedents() {
        let leading = ReferenceSection::LeadingPrecedents.entries();
        let labor = ReferenceSection::LaborStandardPrecedents.entries();

        assert_eq!(leading.len(), labor.len());
        for (short, full) in leading.iter().zip(labor) {
            assert_eq!(short.url, full.url);
            assert_eq!(short.summary, full.summary);
            assert_ne!(short.title, full.title);
        }
        assert_eq!(labor[0].title, "栃木労働基準監督署長事件");
    }

    #[test]
    fn test_statutes_cover_harassment_prevention_duty() {
        assert!(STATUTES
            .iter()
            .any(|s| s.law == "労働施策総合推進法" && s.article == "第30条の2"));
    }
}
