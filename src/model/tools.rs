//! Argument records for the tool operations
//!
//! Deserializing into these types is the argument validation step: a missing
//! or mistyped required field is rejected before any operation runs.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHarassmentCasesArgs {
    /// Category such as 精神的攻撃, パワハラ or 叱責
    pub category: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordArgs {
    pub keyword: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchCourtCasesArgs {
    pub keyword: String,
    /// 労働, 行政, 民事 ...
    #[serde(default)]
    pub case_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SituationArgs {
    pub situation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchLawArgs {
    pub law_name: String,
}
