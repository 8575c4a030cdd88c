//! Case candidate extraction from precedent listing pages
//!
//! Anchors are collected in document order, deduplicated by (title, url), and then
//! narrowed by a relevance filter. When the filter matches nothing the caller still
//! gets the head of the unfiltered list instead of an empty answer.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::model::CaseCandidate;
use crate::retriever::RetrievedDocument;

/// Maximum entries returned when the relevance filter matches
pub const MAX_RELEVANT: usize = 10;

/// Maximum entries returned by the unfiltered fallback
pub const MAX_FALLBACK: usize = 15;

/// Outcome of relevance selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Titles matched the category or keyword
    Relevant(Vec<CaseCandidate>),
    /// Nothing matched; head of the unfiltered candidates
    Fallback(Vec<CaseCandidate>),
}

impl Selection {
    pub fn candidates(&self) -> &[CaseCandidate] {
        match self {
            Selection::Relevant(c) | Selection::Fallback(c) => c,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Selection::Fallback(_))
    }
}

/// Extract (title, url) candidates from every anchor in the document.
///
/// An anchor is admitted when `link_predicate` accepts its href (missing href is
/// treated as empty) and its trimmed text is longer than `min_text_chars` characters.
/// Malformed markup never fails; the parser recovers what it can.
pub fn extract<P>(doc: &RetrievedDocument, link_predicate: P, min_text_chars: usize) -> Vec<CaseCandidate>
where
    P: Fn(&str) -> bool,
{
    let document = Html::parse_document(&doc.raw_markup);
    let selector = match Selector::parse("a") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let origin = doc.origin();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for element in document.select(&selector) {
        let href = element.value().attr("href").unwrap_or("");
        let text = element.text().collect::<String>();
        let title = text.trim();

        if !link_predicate(href) || title.chars().count() <= min_text_chars {
            continue;
        }

        let Some(url) = resolve_href(href, &origin, &doc.source_url) else {
            tracing::debug!(href = href, "Skipping unresolvable link");
            continue;
        };

        let candidate = CaseCandidate {
            title: title.to_string(),
            url,
        };

        if seen.insert(candidate.clone()) {
            candidates.push(candidate);
        }
    }

    tracing::debug!(
        url = %doc.source_url,
        count = candidates.len(),
        "Extracted case candidates"
    );

    candidates
}

/// Resolve an href to an absolute URL.
///
/// Hrefs with a scheme are kept as-is, rooted paths are appended to the origin,
/// anything else is joined onto the source URL.
fn resolve_href(href: &str, origin: &str, source_url: &Url) -> Option<Url> {
    if let Ok(url) = Url::parse(href) {
        return Some(url);
    }

    if href.starts_with('/') && !href.starts_with("//") {
        return Url::parse(&format!("{}{}", origin, href)).ok();
    }

    source_url.join(href).ok()
}

/// Keep candidates whose title contains `category`, or `keyword` when one is given.
///
/// Relevant matches are capped at [`MAX_RELEVANT`]. If none match, the first
/// [`MAX_FALLBACK`] unfiltered candidates are returned in document order.
/// An empty keyword counts as absent.
pub fn select_relevant(
    candidates: Vec<CaseCandidate>,
    category: &str,
    keyword: Option<&str>,
) -> Selection {
    let keyword = keyword.filter(|k| !k.is_empty());

    let relevant: Vec<CaseCandidate> = candidates
        .iter()
        .filter(|c| {
            c.title.contains(category) || keyword.map(|k| c.title.contains(k)).unwrap_or(false)
        })
        .take(MAX_RELEVANT)
        .cloned()
        .collect();

    if !relevant.is_empty() {
        return Selection::Relevant(relevant);
    }

    tracing::debug!(
        category = category,
        keyword = keyword.unwrap_or(""),
        available = candidates.len(),
        "No relevant titles, falling back to unfiltered candidates"
    );

    Selection::Fallback(candidates.into_iter().take(MAX_FALLBACK).collect())
}
