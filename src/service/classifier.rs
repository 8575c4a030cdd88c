//! Keyword classifier for the 心理的負荷評価表 power-harassment category
//!
//! Verdicts come from an ordered rule table evaluated in one pass. Matching is a
//! case-sensitive substring test on the narrative exactly as given.

use std::collections::BTreeSet;

use crate::model::{
    ClassifierConfig, EvidenceFlag, IndicatorCategory, SeverityAssessment, Verdict,
};

/// Built-in strong indicators, in evaluation order
pub const STRONG_INDICATORS: &[(IndicatorCategory, &str)] = &[
    (IndicatorCategory::PublicHumiliation, "面前"),
    (IndicatorCategory::PublicHumiliation, "大声"),
    (IndicatorCategory::PublicHumiliation, "威圧"),
    (IndicatorCategory::Duration, "長時間"),
    (IndicatorCategory::DignityDenial, "人格"),
    (IndicatorCategory::DignityDenial, "否定"),
];

/// Tokens suggesting the incident had witnesses (a head count, 目撃, co-workers)
pub const WITNESS_INDICATORS: &[&str] = &["名", "目撃", "社員"];

pub const BORDERLINE_RATIONALE: &str = "「中」または「強」の境界線上。詳細な状況確認が必要\n\
確認事項: 発症前おおむね6か月以内の出来事か、対象疾病の診断があるか、業務以外の要因による発病でないか";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityRule {
    pub category: IndicatorCategory,
    pub token: String,
}

/// Rule-table classifier. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct Classifier {
    strong: Vec<SeverityRule>,
    witness: Vec<String>,
}

impl Classifier {
    /// Classifier with only the built-in tables
    pub fn new() -> Self {
        Self {
            strong: STRONG_INDICATORS
                .iter()
                .map(|(category, token)| SeverityRule {
                    category: *category,
                    token: token.to_string(),
                })
                .collect(),
            witness: WITNESS_INDICATORS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Built-in tables extended with configured rules
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let classifier = config
            .strong_indicators
            .iter()
            .fold(Self::new(), |c, rule| c.with_rule(rule.category, &rule.token));

        let classifier = config
            .witness_indicators
            .iter()
            .fold(classifier, |c, token| c.with_witness_token(token));

        tracing::debug!(
            strong_rules = classifier.rules().len(),
            witness_tokens = classifier.witness.len(),
            "Classifier rule table ready"
        );

        classifier
    }

    /// Append a strong-indicator rule. Empty tokens are ignored.
    pub fn with_rule(mut self, category: IndicatorCategory, token: &str) -> Self {
        if token.is_empty() {
            tracing::warn!(category = ?category, "Ignoring empty strong-indicator token");
        } else {
            self.strong.push(SeverityRule {
                category,
                token: token.to_string(),
            });
        }
        self
    }

    /// Append a witness token. Empty tokens are ignored.
    pub fn with_witness_token(mut self, token: &str) -> Self {
        if token.is_empty() {
            tracing::warn!("Ignoring empty witness token");
        } else {
            self.witness.push(token.to_string());
        }
        self
    }

    pub fn rules(&self) -> &[SeverityRule] {
        &self.strong
    }

    pub fn classify(&self, narrative: &str) -> SeverityAssessment {
        let mut matched_categories = Vec::new();
        for rule in &self.strong {
            if narrative.contains(rule.token.as_str()) && !matched_categories.contains(&rule.category) {
                matched_categories.push(rule.category);
            }
        }

        let mut evidence_flags = BTreeSet::new();
        if self.witness.iter().any(|t| narrative.contains(t.as_str())) {
            evidence_flags.insert(EvidenceFlag::HasWitnessIndicator);
        }

        let (verdict, rationale) = if matched_categories.is_empty() {
            (Verdict::Borderline, BORDERLINE_RATIONALE.to_string())
        } else {
            let cited: String = matched_categories.iter().map(|c| c.rationale()).collect();
            (Verdict::Strong, format!("根拠: {}に該当", cited))
        };

        SeverityAssessment {
            verdict,
            rationale,
            matched_categories,
            evidence_flags,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::IndicatorRuleConfig;

    #[test]
    fn test_prolonged_public_reprimand_is_strong() {
        let assessment = Classifier::new().classify("長時間にわたり面前で大声で叱責された");

        assert_eq!(assessment.verdict, Verdict::Strong);
        assert_eq!(
            assessment.matched_categories,
            vec![IndicatorCategory::PublicHumiliation, IndicatorCategory::Duration]
        );
        assert!(assessment.rationale.contains("面前における大声での威圧的な叱責"));
        assert!(assessment.rationale.contains("長時間にわたる叱責"));
        assert!(!assessment.rationale.contains("人格"));
    }

    #[test]
    fn test_light_warning_is_borderline() {
        let assessment = Classifier::new().classify("軽い注意を受けた");

        assert_eq!(assessment.verdict, Verdict::Borderline);
        assert_eq!(assessment.rationale, BORDERLINE_RATIONALE);
        assert!(assessment.matched_categories.is_empty());
        assert!(!assessment.has_witness());
    }

    #[test]
    fn test_dignity_denial_rationale() {
        let assessment = Classifier::new().classify("人格を否定する発言が続いた");

        assert_eq!(assessment.verdict, Verdict::Strong);
        assert_eq!(assessment.matched_categories, vec![IndicatorCategory::DignityDenial]);
        assert!(assessment.rationale.contains("人格・人間性を否定"));
    }

    #[test]
    fn test_any_strong_token_forces_strong() {
        let classifier = Classifier::new();
        let base = "軽い注意を受けた";
        assert_eq!(classifier.classify(base).verdict, Verdict::Borderline);

        for (_, token) in STRONG_INDICATORS {
            let narrative = format!("{} {}", base, token);
            assert_eq!(
                classifier.classify(&narrative).verdict,
                Verdict::Strong,
                "token {} should force Strong",
                token
            );
        }
    }

    #[test]
    fn test_witness_flag_independent_of_verdict() {
        let classifier = Classifier::new();

        let borderline = classifier.classify("同僚3名の前で注意された");
        assert_eq!(borderline.verdict, Verdict::Borderline);
        assert!(borderline.has_witness());

        let strong = classifier.classify("他の社員の面前で叱責された");
        assert_eq!(strong.verdict, Verdict::Strong);
        assert!(strong.has_witness());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = Classifier::new();
        let narrative = "上司から長時間、人格を否定される発言を受け、目撃者もいた";
        assert_eq!(classifier.classify(narrative), classifier.classify(narrative));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let classifier = Classifier::new().with_rule(IndicatorCategory::PublicHumiliation, "Shouted");
        assert_eq!(classifier.classify("shouted at").verdict, Verdict::Borderline);
        assert_eq!(classifier.classify("Shouted at").verdict, Verdict::Strong);
    }

    #[test]
    fn test_configured_rules_extend_tables() {
        let config = ClassifierConfig {
            strong_indicators: vec![
                IndicatorRuleConfig {
                    category: IndicatorCategory::DignityDenial,
                    token: "無能".to_string(),
                },
                IndicatorRuleConfig {
                    category: IndicatorCategory::Duration,
                    token: String::new(),
                },
            ],
            witness_indicators: vec!["同席".to_string()],
        };
        let classifier = Classifier::from_config(&config);

        assert_eq!(classifier.rules().len(), STRONG_INDICATORS.len() + 1);

        let assessment = classifier.classify("会議に同席した全員の前で無能と言われた");
        assert_eq!(assessment.verdict, Verdict::Strong);
        assert_eq!(assessment.matched_categories, vec![IndicatorCategory::DignityDenial]);
        assert!(assessment.has_witness());
    }
}
