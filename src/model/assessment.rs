use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

/// Psychological-load tier derived from an incident narrative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 「強」: at least one strong indicator matched
    Strong,
    /// 「中」 or 「強」 boundary; more facts are needed
    Borderline,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Strong => write!(f, "強"),
            Verdict::Borderline => write!(f, "中/強 境界"),
        }
    }
}

/// Rubric category a strong-indicator token belongs to.
/// Config files name it in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    /// Face-to-face, loud or intimidating reprimand
    PublicHumiliation,
    /// Reprimand prolonged beyond necessity
    Duration,
    /// Attacks denying personhood or dignity
    DignityDenial,
}

impl IndicatorCategory {
    /// Rubric wording cited when this category triggers a Strong verdict
    pub fn rationale(&self) -> &'static str {
        match self {
            IndicatorCategory::PublicHumiliation => "「他の労働者の面前における大声での威圧的な叱責」",
            IndicatorCategory::Duration => "「必要以上に長時間にわたる叱責」",
            IndicatorCategory::DignityDenial => "「人格・人間性を否定するような精神的攻撃」",
        }
    }
}

/// Annotation independent of the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvidenceFlag {
    HasWitnessIndicator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityAssessment {
    pub verdict: Verdict,
    pub rationale: String,
    /// Categories that matched, in rule-table order, without repeats
    pub matched_categories: Vec<IndicatorCategory>,
    pub evidence_flags: BTreeSet<EvidenceFlag>,
}

impl SeverityAssessment {
    pub fn has_witness(&self) -> bool {
        self.evidence_flags.contains(&EvidenceFlag::HasWitnessIndicator)
    }
}
