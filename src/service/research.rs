//! Legal research operations rendered as plain text
//!
//! Each operation returns one text block. Section markers and numbering are part of
//! the output contract. Only the harassment-case search touches the network; every
//! other operation is assembled from the reference table.

use std::sync::Arc;

use url::Url;

use crate::model::{FetchConfig, PrecedentSourceConfig, StatementRequest, Verdict};
use crate::retriever::{DocumentFetcher, RetrievalRequest};
use crate::service::classifier::Classifier;
use crate::service::extractor::{extract, select_relevant};
use crate::service::reference_table::{self, ReferenceSection, STATUTES};
use crate::service::statement;

const COURT_SEARCH_URL: &str = "https://www.courts.go.jp/app/hanrei_jp/search2";
const LAW_SEARCH_URL: &str = "https://laws.e-gov.go.jp/search/";

const LOAD_CRITERIA_HEADER: &str = "【厚労省 業務による心理的負荷評価表 パワーハラスメント】（令和5年9月改正版）

■ 出来事の類型: ⑤パワーハラスメント

【強】と判断される例:
✓ 治療を要する程度の暴行を受けた場合
✓ 暴行を執拗に受けた場合
✓ 人格・人間性を否定するような精神的攻撃が執拗に行われた場合
✓ 必要以上に長時間にわたる叱責、他の労働者の面前における大声での威圧的な叱責など
  社会通念に照らして許容される範囲を超える精神的攻撃
✓ 中程度の攻撃を受けた場合で、会社に相談しても改善されなかった場合

■ 3つの認定要件（すべて必要）
要件1: 発症前おおむね6か月以内に強い心理的負荷があること
要件2: 対象疾病（うつ病・適応障害等）と診断されていること
要件3: 業務以外の要因で発病したとは認められないこと

━━━━━━━━━━━━━━━
■ 入力状況の評価
━━━━━━━━━━━━━━━";

const WITNESS_BONUS: &str = "【加点要素】目撃者の存在 → 証拠力が高く、認定を強化します";

/// Precedent listing with its URL validated
#[derive(Debug, Clone)]
pub struct PrecedentSource {
    pub url: Url,
    pub link_fragment: String,
    pub min_title_chars: usize,
}

impl TryFrom<PrecedentSourceConfig> for PrecedentSource {
    type Error = url::ParseError;

    fn try_from(config: PrecedentSourceConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            url: Url::parse(&config.url)?,
            link_fragment: config.link_fragment,
            min_title_chars: config.min_title_chars,
        })
    }
}

/// Service behind the research tools
pub struct LegalResearchService {
    fetcher: Arc<dyn DocumentFetcher>,
    classifier: Classifier,
    fetch_config: FetchConfig,
    precedents: PrecedentSource,
}

impl LegalResearchService {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        classifier: Classifier,
        fetch_config: FetchConfig,
        precedents: PrecedentSource,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            fetch_config,
            precedents,
        }
    }

    /// Search the MHLW harassment precedent listing.
    ///
    /// Fetch failures are reported in the text together with the listing URL.
    pub async fn search_harassment_cases(&self, category: &str, keyword: Option<&str>) -> String {
        let keyword = keyword.filter(|k| !k.is_empty());
        let source_url = self.precedents.url.clone();
        let request = RetrievalRequest::new(source_url.clone(), &self.fetch_config);

        let doc = match self.fetcher.fetch(&request).await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, url = %source_url, "Precedent listing fetch failed");
                return fetch_failure_text(&e.to_string(), &source_url, category, keyword);
            }
        };

        let fragment = self.precedents.link_fragment.as_str();
        let candidates = extract(&doc, |href| href.contains(fragment), self.precedents.min_title_chars);
        let selection = select_relevant(candidates, category, keyword);

        tracing::info!(
            category = category,
            results = selection.candidates().len(),
            fallback = selection.is_fallback(),
            "Harassment precedent search complete"
        );

        let mut lines = vec![format!(
            "【厚労省 あかるい職場応援団 裁判例】\n検索: {}{}\n",
            category,
            keyword.map(|k| format!("/{}", k)).unwrap_or_default()
        )];
        for (i, case) in selection.candidates().iter().enumerate() {
            lines.push(format!("{}. {}\n   {}\n", i + 1, case.title, case.url));
        }
        lines.push(format!("\n参考: {}", source_url));

        lines.join("\n")
    }

    /// Static pointers into 労働保険審査会 decisions
    pub fn search_labor_insurance_decisions(&self, keyword: &str) -> String {
        let mut lines = vec![format!("【労働保険審査会 裁決事案】\nキーワード: {}\n", keyword)];
        for entry in ReferenceSection::InsuranceDecisions.entries() {
            lines.push(format!("{}: {}", entry.title, entry.url));
        }
        lines.join("\n")
    }

    /// Court search URL, portal list, and leading precedents for harassment terms
    pub fn search_court_cases(&self, keyword: &str, case_type: Option<&str>) -> String {
        let search_url = build_search_url(
            COURT_SEARCH_URL,
            &[("page", "1"), ("sort", "1"), ("body", keyword)],
        );

        let mut lines = vec![
            format!(
                "【裁判所 判例検索】\nキーワード: {}{}\n",
                keyword,
                case_type
                    .filter(|t| !t.is_empty())
                    .map(|t| format!(" / {}", t))
                    .unwrap_or_default()
            ),
            format!("検索URL: {}\n", search_url),
        ];

        let portals = ReferenceSection::CourtPortals.entries();
        for (i, entry) in portals.iter().enumerate() {
            let trailer = if i + 1 == portals.len() { "\n" } else { "" };
            lines.push(format!("{}. {}: {}{}", i + 1, entry.title, entry.url, trailer));
        }

        let precedents = reference_table::leading_precedents_for(keyword);
        if !precedents.is_empty() {
            lines.push("【関連主要判例】".to_string());
            for entry in precedents {
                lines.push(format!("- {}: {}", entry.title, entry.url));
            }
        }

        lines.join("\n")
    }

    /// Rubric summary plus the classifier verdict for `situation`
    pub fn psychological_load_criteria(&self, situation: &str) -> String {
        let assessment = self.classifier.classify(situation);

        tracing::debug!(
            verdict = %assessment.verdict,
            categories = ?assessment.matched_categories,
            witness = assessment.has_witness(),
            "Classified situation"
        );

        let judgement = match assessment.verdict {
            Verdict::Strong => format!(
                "心理的負荷「強」に該当する可能性が高い\n{}",
                assessment.rationale
            ),
            Verdict::Borderline => assessment.rationale.clone(),
        };
        let witness = if assessment.has_witness() {
            format!("\n{}", WITNESS_BONUS)
        } else {
            String::new()
        };

        format!(
            "{}\n評価対象:「{}」\n\n【判定】→ {}\n{}\n\n■ 参照文書\n{}: {}",
            LOAD_CRITERIA_HEADER,
            situation,
            judgement,
            witness,
            ReferenceSection::RecognitionCriteria.primary().title,
            ReferenceSection::RecognitionCriteria.primary().url,
        )
    }

    /// e-Gov search URL and the core rosai/harassment articles
    pub fn search_law(&self, law_name: &str) -> String {
        let search_url = build_search_url(LAW_SEARCH_URL, &[("query", law_name)]);

        let articles: Vec<String> = STATUTES
            .iter()
            .map(|s| format!("- {} {}: {}", s.law, s.article, s.subject))
            .collect();

        format!(
            "【e-Gov 法令検索】\nキーワード: {}\n検索URL: {}\n\n【労働・労災の主要条文】\n{}\n\n{}",
            law_name,
            search_url,
            articles.join("\n"),
            ReferenceSection::LawPortal.primary().url
        )
    }

    /// Curated labor-standard precedents
    pub fn search_labor_standard_cases(&self, keyword: &str) -> String {
        let cases: Vec<String> = ReferenceSection::LaborStandardPrecedents
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{}. {}\n   {}\n   {}",
                    i + 1,
                    entry.title,
                    entry.summary.unwrap_or_default(),
                    entry.url
                )
            })
            .collect();

        let database = ReferenceSection::LaborStandardDatabase.primary();
        format!(
            "【全労連 労働基準判例検索】\nキーワード: {}\n\n【主要判例】\n{}\n\n{}: {}",
            keyword,
            cases.join("\n\n"),
            database.title,
            database.url
        )
    }

    /// Draft a 様式第23号 statement
    pub fn generate_statement(&self, req: &StatementRequest) -> String {
        statement::compose(req)
    }
}

/// Error text naming the listing that failed, plus curated entries related to the query
fn fetch_failure_text(
    error: &str,
    source_url: &Url,
    category: &str,
    keyword: Option<&str>,
) -> String {
    let mut text = format!("エラー: {}\n{}", error, source_url);

    let query = format!("{} {}", category, keyword.unwrap_or_default());
    let related: Vec<String> = reference_table::lookup(&query)
        .into_iter()
        .filter(|e| e.url != source_url.as_str())
        .map(|e| format!("- {}: {}", e.title, e.url))
        .collect();
    if !related.is_empty() {
        text.push_str("\n\n【関連資料】\n");
        text.push_str(&related.join("\n"));
    }

    text
}

/// Compose a search URL with form-encoded query parameters
fn build_search_url(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, base = base, "Failed to build search URL");
            base.to_string()
        }
    }
}
