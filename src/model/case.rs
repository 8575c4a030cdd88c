use url::Url;

/// A (title, link) pair found in a precedent listing page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseCandidate {
    pub title: String,
    /// Always absolute; relative hrefs are resolved during extraction
    pub url: Url,
}
